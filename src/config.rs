use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BACKEND_URL: &str = "https://api.veriqo.app";
pub const API_PREFIX: &str = "/api";

/// Environment variable consulted when the builder is given no base URL.
pub const BACKEND_URL_ENV: &str = "VERIQO_BACKEND_URL";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Anonymous analyses allowed per browser before sign-up is required.
pub const FREE_CHECKS_LIMIT: u32 = 3;

pub const PAYMENT_POLL_ATTEMPTS: u32 = 5;
pub const PAYMENT_POLL_INTERVAL: Duration = Duration::from_secs(2);

pub const FREE_LIMIT_ERROR: &str = "FREE_LIMIT_REACHED";
pub const FREE_LIMIT_MESSAGE: &str =
    "You've used all 3 free checks. Sign up for unlimited access!";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
pub const PAYMENT_SUPPORT_MESSAGE: &str =
    "We couldn't confirm your payment. If you were charged, please contact support.";

pub const STORE_FILE: &str = "extension-storage.json";
pub const SESSION_FILE: &str = "session-token";

/// Resolve the backend base URL from the environment, falling back to the
/// production default. Trailing slashes are stripped.
pub fn backend_url() -> String {
    std::env::var(BACKEND_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
}

/// Join a base URL and an endpoint path under the `/api` prefix.
pub fn api_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{}{}/{}", base, API_PREFIX, path)
}

pub fn default_store_dir() -> PathBuf {
    if let Some(cache) = dirs::cache_dir() {
        cache.join("veriqo-sdk")
    } else {
        PathBuf::from(".veriqo-sdk-cache")
    }
}
