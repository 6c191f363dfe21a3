//! HTTP plumbing shared by every endpoint wrapper.
//!
//! [`ApiClient`] owns the base URL, the [`Transport`] and the [`Session`].
//! It attaches bearer credentials, decodes JSON bodies and turns non-2xx
//! responses into [`VeriqoError`]s carrying the backend's `detail` message.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config;
use crate::error::{Result, VeriqoError};
use crate::session::Session;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

/// Whether a request carries the session's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Fail with [`VeriqoError::Unauthorized`] before sending if there is no token.
    Required,
    /// Attach the token when one is present.
    Optional,
    /// Never attach the token.
    Anonymous,
}

/// `detail` used when an error response carries no message of its own.
pub(crate) const NO_DETAIL: &str = "Request failed";

pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn Transport>,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>, session: Session) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Send a request and return the raw successful response.
    pub fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        auth: Auth,
    ) -> Result<ApiResponse> {
        let authorization = match auth {
            Auth::Anonymous => None,
            Auth::Optional => self.session.bearer(),
            Auth::Required => Some(self.session.bearer().ok_or_else(|| {
                VeriqoError::Unauthorized("Please sign in to continue".to_string())
            })?),
        };
        let request = ApiRequest {
            method,
            url: config::api_url(&self.base_url, path),
            authorization,
            body,
        };
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.transport.send(&request)?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(error_from_response(&response))
        }
    }

    fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        auth: Auth,
    ) -> Result<T> {
        let response = self.send(method, path, body, auth)?;
        decode(&response)
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str, auth: Auth) -> Result<T> {
        self.send_json(Method::Get, path, None, auth)
    }

    pub fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.send_json(Method::Post, path, Some(body), auth)
    }

    pub fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.send_json(Method::Put, path, Some(body), auth)
    }

    pub fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: Auth,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.send_json(Method::Patch, path, Some(body), auth)
    }

    /// DELETE, ignoring whatever body the backend returns.
    pub fn delete(&self, path: &str, auth: Auth) -> Result<()> {
        self.send(Method::Delete, path, None, auth)?;
        Ok(())
    }

    /// GET returning the undecoded body (CSV exports and the like).
    pub fn get_bytes(&self, path: &str, auth: Auth) -> Result<Vec<u8>> {
        Ok(self.send(Method::Get, path, None, auth)?.body)
    }
}

/// Decode a JSON body, treating an empty body as JSON `null`.
fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(Value::Null)?);
    }
    Ok(serde_json::from_slice(&response.body)?)
}

/// Pull a human-readable message out of an error body.
///
/// The backend sends `{"detail": "..."}` for handled errors and
/// `{"detail": [{"msg": "..."}, ...]}` for request validation failures.
pub(crate) fn extract_detail(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    match value.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|i| i.get("msg").and_then(|m| m.as_str()))
                .collect();
            (!msgs.is_empty()).then(|| msgs.join("; "))
        }
        other => Some(other.to_string()),
    }
}

fn error_from_response(response: &ApiResponse) -> VeriqoError {
    let status = response.status;
    let detail = extract_detail(&response.body).unwrap_or_else(|| NO_DETAIL.to_string());
    warn!(status, detail = %detail, "backend returned an error");
    match status {
        401 => VeriqoError::Unauthorized(detail),
        403 => VeriqoError::Forbidden(detail),
        _ => VeriqoError::Api { status, detail },
    }
}
