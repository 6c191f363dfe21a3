use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User — Account record as returned by `/auth/me` and the login endpoints
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default = "default_subscription")]
    pub subscription_type: String,
    #[serde(default)]
    pub subscription_expires: Option<String>,
    #[serde(default)]
    pub checks_used_this_month: Option<i64>,
    #[serde(default)]
    pub checks_remaining: i64,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_subscription() -> String {
    "free".to_string()
}

impl User {
    pub fn is_premium(&self) -> bool {
        self.subscription_type != "free"
    }
}

// ---------------------------------------------------------------------------
// AuthResponse — Token plus user, returned by every credential exchange
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResetPasswordRequest<'a> {
    pub token: &'a str,
    pub new_password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct OtpRequest<'a> {
    pub phone_number: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'a str>,
}

/// Generic `{status?, message?}` acknowledgement used by fire-and-forget endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
