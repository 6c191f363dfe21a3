use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest<'a> {
    pub plan_id: &'a str,
    pub origin_url: &'a str,
}

/// Hosted checkout page to redirect the shopper to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub url: String,
    pub session_id: String,
}

/// Status of a checkout session as reported by `/payments/status/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

impl PaymentStatus {
    pub fn is_paid(&self) -> bool {
        self.payment_status.as_deref() == Some("paid")
    }

    pub fn is_expired(&self) -> bool {
        self.status.as_deref() == Some("expired")
    }
}
