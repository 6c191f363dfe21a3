//! Message protocol between the extension's scripts and its background worker.
//!
//! Requests are JSON objects tagged by an `action` field; responses keep the
//! camelCase shapes the scripts already consume.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A request sent to the background worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Message {
    AnalyzeProduct {
        url: String,
        #[serde(default)]
        asin: String,
    },
    GetStatus,
    Login {
        email: String,
        password: String,
    },
    Logout,
    GetCachedAnalysis {
        asin: String,
    },
}

impl Message {
    pub fn action(&self) -> &'static str {
        match self {
            Message::AnalyzeProduct { .. } => "analyzeProduct",
            Message::GetStatus => "getStatus",
            Message::Login { .. } => "login",
            Message::Logout => "logout",
            Message::GetCachedAnalysis { .. } => "getCachedAnalysis",
        }
    }
}

/// Answer to `getStatus`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub free_checks_used: u32,
    pub free_checks_remaining: u32,
    pub is_logged_in: bool,
    pub user_email: Option<String>,
}

/// Success/failure envelope for `analyzeProduct`, `login` and `logout`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_cache: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn analysis(analysis: Value, from_cache: bool) -> Self {
        Self {
            success: true,
            analysis: Some(analysis),
            from_cache: from_cache.then_some(true),
            ..Default::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// True when the failure is the anonymous quota sentinel.
    pub fn is_free_limit(&self) -> bool {
        self.error.as_deref() == Some(crate::config::FREE_LIMIT_ERROR)
    }
}

/// Any worker reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Response {
    Status(StatusResponse),
    Result(ActionResult),
    /// `getCachedAnalysis`: the stored analysis, or `null`.
    Cached(Option<Value>),
}
