//! Message router for the extension background worker.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::api::AuthApi;
use crate::client::{ApiClient, Auth, NO_DETAIL};
use crate::config;
use crate::error::{Result, VeriqoError};
use crate::models::AnalyzeRequest;
use crate::session::Session;
use crate::transport::Transport;

use super::asin;
use super::message::{ActionResult, Message, Response, StatusResponse};
use super::store::ExtensionStore;

/// Outcome of the locked pre-flight step of an analysis.
enum Preflight {
    Cached(Value),
    LimitReached,
    Proceed { token: Option<String> },
}

// ---------------------------------------------------------------------------
// ExtensionWorker
// ---------------------------------------------------------------------------

/// Dispatches [`Message`]s to handlers backed by an [`ExtensionStore`].
///
/// The worker does not keep its own session: each backend call is made with
/// whatever token the store holds at that moment.
pub struct ExtensionWorker {
    base_url: String,
    transport: Arc<dyn Transport>,
    store: ExtensionStore,
}

impl ExtensionWorker {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>, store: ExtensionStore) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
            store,
        }
    }

    pub fn store(&self) -> &ExtensionStore {
        &self.store
    }

    /// Reset storage to its install-time defaults.
    pub fn install(&self) -> Result<()> {
        self.store.reset()?;
        info!("extension storage initialized");
        Ok(())
    }

    fn client(&self, token: Option<&str>) -> ApiClient {
        let session = match token {
            Some(t) => Session::with_token(t),
            None => Session::new(),
        };
        ApiClient::new(self.base_url.clone(), self.transport.clone(), session)
    }

    /// Route one message to its handler.
    pub fn dispatch(&self, message: Message) -> Response {
        debug!(action = message.action(), "dispatching extension message");
        match message {
            Message::AnalyzeProduct { url, asin } => {
                Response::Result(self.analyze_product(&url, &asin))
            }
            Message::GetStatus => Response::Status(self.status()),
            Message::Login { email, password } => Response::Result(self.login(&email, &password)),
            Message::Logout => Response::Result(self.logout()),
            Message::GetCachedAnalysis { asin } => Response::Cached(self.cached_analysis(&asin)),
        }
    }

    /// Decode a JSON message, dispatch it, and encode the reply.
    pub fn dispatch_json(&self, raw: &str) -> Result<String> {
        let message: Message = serde_json::from_str(raw)
            .map_err(|e| VeriqoError::InvalidArgument(format!("Unrecognized message: {e}")))?;
        Ok(serde_json::to_string(&self.dispatch(message))?)
    }

    /// Free-check usage and login state, straight from storage.
    pub fn status(&self) -> StatusResponse {
        self.store.inspect(|s| StatusResponse {
            free_checks_used: s.free_checks_used,
            free_checks_remaining: s.free_checks_remaining(),
            is_logged_in: s.is_logged_in(),
            user_email: s.user_email.clone(),
        })
    }

    pub fn cached_analysis(&self, asin: &str) -> Option<Value> {
        let key = asin.to_ascii_uppercase();
        self.store.inspect(|s| s.analysis_cache.get(&key).cloned())
    }

    /// Analyze a product, answering from cache when possible.
    ///
    /// Anonymous callers are limited to [`config::FREE_CHECKS_LIMIT`]
    /// analyses. A slot is reserved under the store lock before the backend
    /// is called and committed or released afterwards, and a given ASIN is
    /// counted at most once.
    pub fn analyze_product(&self, url: &str, asin_hint: &str) -> ActionResult {
        let key = if asin::is_asin(asin_hint) {
            asin_hint.to_ascii_uppercase()
        } else {
            match asin::extract_asin(url) {
                Some(a) => a,
                None => return ActionResult::failure("Could not find a product on this page"),
            }
        };

        let preflight = self.store.transaction(|s| {
            if let Some(hit) = s.analysis_cache.get(&key) {
                return Preflight::Cached(hit.clone());
            }
            match &s.user_token {
                Some(token) => Preflight::Proceed {
                    token: Some(token.clone()),
                },
                None if s.free_checks_available() == 0 => Preflight::LimitReached,
                None => {
                    s.free_checks_reserved += 1;
                    Preflight::Proceed { token: None }
                }
            }
        });

        let token = match preflight {
            Ok(Preflight::Cached(analysis)) => {
                debug!(asin = %key, "analysis cache hit");
                return ActionResult::analysis(analysis, true);
            }
            Ok(Preflight::LimitReached) => {
                info!(asin = %key, "free check limit reached");
                return ActionResult {
                    message: Some(config::FREE_LIMIT_MESSAGE.to_string()),
                    ..ActionResult::failure(config::FREE_LIMIT_ERROR)
                };
            }
            Ok(Preflight::Proceed { token }) => token,
            Err(e) => return ActionResult::failure(e.user_message()),
        };
        let anonymous = token.is_none();

        let client = self.client(token.as_deref());
        let (path, auth) = if anonymous {
            ("/extension/analyze", Auth::Anonymous)
        } else {
            ("/analyze", Auth::Required)
        };
        let fetched = client.post::<Value, _>(path, &AnalyzeRequest { amazon_url: url }, auth);

        let committed = self.store.transaction(|s| {
            if anonymous {
                s.free_checks_reserved = s.free_checks_reserved.saturating_sub(1);
            }
            let Ok(analysis) = &fetched else {
                return;
            };
            if anonymous && !s.analysis_cache.contains_key(&key) {
                s.free_checks_used += 1;
            }
            s.analysis_cache.insert(key.clone(), analysis.clone());
        });

        match (fetched, committed) {
            (Ok(analysis), Ok(())) => {
                info!(asin = %key, anonymous, "product analyzed");
                ActionResult::analysis(analysis, false)
            }
            (Ok(analysis), Err(e)) => {
                warn!(asin = %key, error = %e, "analysis stored in memory but not written to disk");
                ActionResult::analysis(analysis, false)
            }
            (Err(e), _) => {
                warn!(asin = %key, error = %e, "analysis failed");
                ActionResult::failure(failure_message(&e, "Analysis failed"))
            }
        }
    }

    /// Exchange credentials and remember the session in storage.
    pub fn login(&self, email: &str, password: &str) -> ActionResult {
        let client = self.client(None);
        let user = match AuthApi::new(&client).login(email, password) {
            Ok(user) => user,
            Err(e) => return ActionResult::failure(failure_message(&e, "Login failed")),
        };
        let token = client
            .session()
            .with_token_str(|t| t.map(str::to_string));

        let saved = self.store.transaction(|s| {
            s.user_token = token;
            s.user_email = user.email.clone();
            s.user_name = Some(user.name.clone());
            s.checks_remaining = Some(user.checks_remaining);
        });
        if let Err(e) = saved {
            warn!(error = %e, "signed in but could not write extension storage");
        }

        info!(user_id = %user.id, "extension signed in");
        ActionResult {
            user: serde_json::to_value(&user).ok(),
            ..ActionResult::ok()
        }
    }

    pub fn logout(&self) -> ActionResult {
        let cleared = self.store.transaction(|s| {
            s.user_token = None;
            s.user_email = None;
            s.user_name = None;
        });
        if let Err(e) = cleared {
            warn!(error = %e, "signed out but could not write extension storage");
        }
        ActionResult::ok()
    }
}

/// Backend `detail` verbatim, the generic network prompt, or `fallback`.
fn failure_message(e: &VeriqoError, fallback: &str) -> String {
    match e {
        VeriqoError::Api { detail, .. }
        | VeriqoError::Unauthorized(detail)
        | VeriqoError::Forbidden(detail)
            if detail != NO_DETAIL =>
        {
            detail.clone()
        }
        VeriqoError::Api { .. } | VeriqoError::Unauthorized(_) | VeriqoError::Forbidden(_) => {
            fallback.to_string()
        }
        other => other.user_message(),
    }
}
