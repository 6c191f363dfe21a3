use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// PriceAlert — Server-tracked price watch on a product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    pub id: String,
    pub product_url: String,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default)]
    pub target_price: Option<f64>,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub price_dropped: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub last_checked: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl PriceAlert {
    /// Drop from the original price, if both prices are known and it fell.
    pub fn savings(&self) -> Option<f64> {
        match (self.original_price, self.current_price) {
            (Some(orig), Some(cur)) if cur < orig => Some(orig - cur),
            _ => None,
        }
    }

    pub fn target_reached(&self) -> bool {
        match (self.target_price, self.current_price) {
            (Some(target), Some(cur)) => cur <= target,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPriceAlert {
    pub product_url: String,
    pub target_price: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceAlertUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertToggle {
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceCheckSummary {
    #[serde(default)]
    pub price_drops: u32,
    #[serde(default)]
    pub checked: Option<u32>,
}
