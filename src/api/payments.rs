//! Checkout endpoints under `/payments`.

use crate::client::{ApiClient, Auth};
use crate::error::{Result, VeriqoError};
use crate::models::{CheckoutRequest, CheckoutSession, PaymentStatus};

pub struct PaymentsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PaymentsApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Start a hosted checkout for `plan_id`; `origin_url` is where the
    /// payment provider sends the shopper back to.
    pub fn checkout(&self, plan_id: &str, origin_url: &str) -> Result<CheckoutSession> {
        self.client.post(
            "/payments/checkout",
            &CheckoutRequest {
                plan_id,
                origin_url,
            },
            Auth::Required,
        )
    }

    pub fn status(&self, session_id: &str) -> Result<PaymentStatus> {
        if session_id.trim().is_empty() {
            return Err(VeriqoError::InvalidArgument(
                "Missing checkout session id".to_string(),
            ));
        }
        self.client
            .get(&format!("/payments/status/{}", session_id), Auth::Required)
    }
}
