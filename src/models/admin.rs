use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// AdminStats — Dashboard counters
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminStats {
    pub total_users: i64,
    pub premium_users: i64,
    pub premium_percentage: f64,
    pub total_analyses: i64,
    pub analyses_today: i64,
    pub new_users_today: i64,
    pub revenue_today: f64,
    pub mrr: f64,
    pub verdict_buy: i64,
    pub verdict_think: i64,
    pub verdict_avoid: i64,
}

/// Partial update applied to a user from the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_type: Option<String>,
}
