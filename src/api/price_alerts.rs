//! Price watch endpoints under `/price-alerts`.

use serde_json::json;

use crate::client::{ApiClient, Auth};
use crate::error::{Result, VeriqoError};
use crate::models::{AlertToggle, NewPriceAlert, PriceAlert, PriceAlertUpdate, PriceCheckSummary};

pub struct PriceAlertApi<'a> {
    client: &'a ApiClient,
}

impl<'a> PriceAlertApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<PriceAlert>> {
        self.client.get("/price-alerts", Auth::Required)
    }

    pub fn create(&self, alert: &NewPriceAlert) -> Result<PriceAlert> {
        if alert.product_url.trim().is_empty() {
            return Err(VeriqoError::InvalidArgument(
                "A product URL is required".to_string(),
            ));
        }
        if let Some(price) = alert.target_price {
            if !price.is_finite() || price < 0.0 {
                return Err(VeriqoError::InvalidArgument(
                    "Target price must be a positive number".to_string(),
                ));
            }
        }
        self.client.post("/price-alerts", alert, Auth::Required)
    }

    pub fn update(&self, alert_id: &str, update: &PriceAlertUpdate) -> Result<PriceAlert> {
        self.client
            .put(&format!("/price-alerts/{}", alert_id), update, Auth::Required)
    }

    pub fn remove(&self, alert_id: &str) -> Result<()> {
        self.client
            .delete(&format!("/price-alerts/{}", alert_id), Auth::Required)
    }

    /// Flip an alert between active and paused; returns the new state.
    pub fn toggle(&self, alert_id: &str) -> Result<bool> {
        let toggled: AlertToggle = self.client.put(
            &format!("/price-alerts/{}/toggle", alert_id),
            &json!({}),
            Auth::Required,
        )?;
        Ok(toggled.is_active)
    }

    /// Ask the backend to re-price every active alert now.
    pub fn check_all(&self) -> Result<PriceCheckSummary> {
        self.client
            .post("/price-alerts/check", &json!({}), Auth::Required)
    }
}
