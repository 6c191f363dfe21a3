//! The single seam between the SDK and the network.
//!
//! Every backend call is expressed as an [`ApiRequest`] handed to a
//! [`Transport`]. The production implementation is [`HttpTransport`]; tests
//! substitute a recording double.

use std::fmt;
use std::time::Duration;

use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use tracing::debug;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        f.write_str(s)
    }
}

/// A fully resolved backend request.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    /// Value for the `Authorization` header, e.g. `"Bearer abc"`.
    pub authorization: Option<String>,
    pub body: Option<serde_json::Value>,
}

/// Raw backend response: status code and undecoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes [`ApiRequest`]s.
///
/// Implementations return `Ok` for any response that reached the server,
/// whatever its status; `Err` means the request never completed.
pub trait Transport: Send + Sync {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// [`Transport`] backed by a blocking `reqwest` client.
pub struct HttpTransport {
    timeout: Duration,
    client: OnceCell<Client>,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            client: OnceCell::new(),
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&self) -> Result<&Client> {
        self.client.get_or_try_init(|| {
            Ok(Client::builder()
                .timeout(self.timeout)
                .redirect(reqwest::redirect::Policy::limited(10))
                .build()?)
        })
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let client = self.client()?;
        let mut builder = match request.method {
            Method::Get => client.get(&request.url),
            Method::Post => client.post(&request.url),
            Method::Put => client.put(&request.url),
            Method::Patch => client.patch(&request.url),
            Method::Delete => client.delete(&request.url),
        };
        if let Some(auth) = &request.authorization {
            builder = builder.header(reqwest::header::AUTHORIZATION, auth);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let resp = builder.send()?;
        let status = resp.status().as_u16();
        let body = resp.bytes()?.to_vec();
        debug!(method = %request.method, url = %request.url, status, "backend responded");
        Ok(ApiResponse { status, body })
    }
}
