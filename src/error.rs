use crate::config;

#[derive(Debug, thiserror::Error)]
pub enum VeriqoError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Non-2xx response. `detail` is the backend's `detail` field when present.
    #[error("API error {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("FREE_LIMIT_REACHED")]
    FreeLimitReached,

    #[error("Premium plan required: {0}")]
    PremiumRequired(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

impl VeriqoError {
    /// True for failures that never produced an HTTP response.
    pub fn is_network(&self) -> bool {
        match self {
            VeriqoError::Http(e) => e.status().is_none(),
            VeriqoError::Transport(_) => true,
            _ => false,
        }
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, VeriqoError::Forbidden(_))
    }

    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            VeriqoError::Api { status, .. } => Some(*status),
            VeriqoError::Unauthorized(_) => Some(401),
            VeriqoError::Forbidden(_) => Some(403),
            VeriqoError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// The string shown to a shopper for this failure.
    ///
    /// Backend `detail` messages are passed through verbatim; anything that
    /// never reached the backend collapses to the generic retry prompt.
    pub fn user_message(&self) -> String {
        match self {
            VeriqoError::Api { detail, .. }
            | VeriqoError::Unauthorized(detail)
            | VeriqoError::PremiumRequired(detail)
            | VeriqoError::InvalidArgument(detail) => detail.clone(),
            VeriqoError::Forbidden(_) => "Admin access required".to_string(),
            VeriqoError::FreeLimitReached => config::FREE_LIMIT_MESSAGE.to_string(),
            VeriqoError::NotFound(what) => format!("{what} not found"),
            VeriqoError::Http(_)
            | VeriqoError::Io(_)
            | VeriqoError::Json(_)
            | VeriqoError::Transport(_) => config::NETWORK_ERROR_MESSAGE.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VeriqoError>;
