//! Checkout confirmation poller.
//!
//! After the payment provider redirects back, the backend may not yet have
//! seen the webhook. [`PaymentPoller`] asks `/payments/status/{id}` at a fixed
//! interval until the session is paid, explicitly expired, or the attempt
//! budget runs out. There is no backoff or jitter.

use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::api::{AuthApi, PaymentsApi};
use crate::client::ApiClient;
use crate::config;
use crate::error::VeriqoError;
use crate::models::User;

/// Observable poller state: `Loading` until it settles on `Success` or `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentFailure {
    /// No session id came back from the provider redirect.
    MissingSession,
    /// The backend reported the checkout session as expired.
    Expired { attempts: u32 },
    /// No usable sign-in: either no token, or the backend rejected it.
    /// Retrying cannot help, so polling stops at once.
    Unauthorized { attempts: u32 },
    /// Every attempt came back unpaid or failed.
    Exhausted {
        attempts: u32,
        last_error: Option<String>,
    },
}

impl PaymentFailure {
    pub fn user_message(&self) -> &'static str {
        config::PAYMENT_SUPPORT_MESSAGE
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// Payment confirmed. `user` is the refreshed account, if the refresh worked.
    Success { user: Option<User>, attempts: u32 },
    Failed(PaymentFailure),
}

impl PaymentOutcome {
    pub fn state(&self) -> PaymentState {
        match self {
            PaymentOutcome::Success { .. } => PaymentState::Success,
            PaymentOutcome::Failed(_) => PaymentState::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, PaymentOutcome::Success { .. })
    }
}

// ---------------------------------------------------------------------------
// PaymentPoller
// ---------------------------------------------------------------------------

pub struct PaymentPoller<'a> {
    client: &'a ApiClient,
    max_attempts: u32,
    interval: Duration,
    observer: Option<Box<dyn FnMut(PaymentState) + 'a>>,
}

impl<'a> PaymentPoller<'a> {
    /// A poller with the default budget of 5 attempts, 2 seconds apart.
    pub fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            max_attempts: config::PAYMENT_POLL_ATTEMPTS,
            interval: config::PAYMENT_POLL_INTERVAL,
            observer: None,
        }
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Register a callback invoked on every state change.
    pub fn on_state<F: FnMut(PaymentState) + 'a>(mut self, f: F) -> Self {
        self.observer = Some(Box::new(f));
        self
    }

    fn emit(&mut self, state: PaymentState) {
        if let Some(observer) = self.observer.as_mut() {
            observer(state);
        }
    }

    fn settle(&mut self, outcome: PaymentOutcome) -> PaymentOutcome {
        self.emit(outcome.state());
        outcome
    }

    /// Poll until the checkout session settles.
    ///
    /// Makes at most `max_attempts` status calls and never sleeps after the
    /// last one. On success the session's user record is refreshed.
    pub fn poll(mut self, session_id: &str) -> PaymentOutcome {
        if session_id.trim().is_empty() {
            return self.settle(PaymentOutcome::Failed(PaymentFailure::MissingSession));
        }
        self.emit(PaymentState::Loading);

        let payments = PaymentsApi::new(self.client);
        let mut last_error = None;

        for attempt in 1..=self.max_attempts {
            match payments.status(session_id) {
                Ok(status) if status.is_paid() => {
                    info!(session_id, attempt, "payment confirmed");
                    let user = match AuthApi::new(self.client).me() {
                        Ok(user) => Some(user),
                        Err(e) => {
                            warn!(error = %e, "payment confirmed but user refresh failed");
                            None
                        }
                    };
                    return self.settle(PaymentOutcome::Success {
                        user,
                        attempts: attempt,
                    });
                }
                Ok(status) if status.is_expired() => {
                    warn!(session_id, attempt, "checkout session expired");
                    return self.settle(PaymentOutcome::Failed(PaymentFailure::Expired {
                        attempts: attempt,
                    }));
                }
                Ok(status) => {
                    debug!(
                        session_id,
                        attempt,
                        payment_status = ?status.payment_status,
                        "payment still pending"
                    );
                }
                Err(VeriqoError::Unauthorized(detail)) => {
                    warn!(session_id, attempt, detail = %detail, "payment status needs a signed-in session");
                    return self.settle(PaymentOutcome::Failed(PaymentFailure::Unauthorized {
                        attempts: attempt,
                    }));
                }
                Err(e) => {
                    warn!(session_id, attempt, error = %e, "payment status check failed");
                    last_error = Some(e.to_string());
                }
            }

            if attempt < self.max_attempts {
                thread::sleep(self.interval);
            }
        }

        self.settle(PaymentOutcome::Failed(PaymentFailure::Exhausted {
            attempts: self.max_attempts,
            last_error,
        }))
    }
}
