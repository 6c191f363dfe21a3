//! Product analysis, comparison, history and public insight endpoints.

use chrono::Utc;
use tracing::info;

use crate::client::{ApiClient, Auth};
use crate::error::{Result, VeriqoError};
use crate::models::{Analysis, AnalyzeRequest, CompareRequest, ComparisonResult};

/// Products a single comparison accepts.
pub const COMPARE_MIN: usize = 2;
pub const COMPARE_MAX: usize = 3;

// ---------------------------------------------------------------------------
// AnalysisApi
// ---------------------------------------------------------------------------

pub struct AnalysisApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AnalysisApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Analyze a product as the signed-in user. Consumes one of their checks.
    pub fn analyze(&self, amazon_url: &str) -> Result<Analysis> {
        let amazon_url = validate_product_url(amazon_url)?;
        let analysis: Analysis = self.client.post(
            "/analyze",
            &AnalyzeRequest { amazon_url },
            Auth::Required,
        )?;
        info!(id = %analysis.id, verdict = %analysis.verdict(), "analysis complete");
        Ok(analysis)
    }

    /// Analyze a product without an account, via the extension endpoint.
    pub fn analyze_anonymous(&self, amazon_url: &str) -> Result<Analysis> {
        let amazon_url = validate_product_url(amazon_url)?;
        self.client.post(
            "/extension/analyze",
            &AnalyzeRequest { amazon_url },
            Auth::Anonymous,
        )
    }

    /// Compare two or three products side by side.
    ///
    /// Blank entries and URLs that are not Amazon links are dropped before
    /// the count is checked.
    pub fn compare<S: AsRef<str>>(&self, urls: &[S]) -> Result<ComparisonResult> {
        let valid: Vec<String> = urls
            .iter()
            .map(|u| u.as_ref().trim())
            .filter(|u| !u.is_empty() && u.contains("amazon"))
            .map(str::to_string)
            .collect();
        if valid.len() < COMPARE_MIN {
            return Err(VeriqoError::InvalidArgument(
                "Please enter at least 2 valid Amazon URLs".to_string(),
            ));
        }
        if valid.len() > COMPARE_MAX {
            return Err(VeriqoError::InvalidArgument(
                "You can compare at most 3 products".to_string(),
            ));
        }
        self.client.post(
            "/compare",
            &CompareRequest {
                product_urls: &valid,
            },
            Auth::Required,
        )
    }

    /// The signed-in user's past analyses, newest first.
    pub fn history(&self) -> Result<Vec<Analysis>> {
        self.client.get("/history", Auth::Required)
    }

    /// Look up one analysis by id in the user's history.
    pub fn find_in_history(&self, id: &str) -> Result<Analysis> {
        self.history()?
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| VeriqoError::NotFound(format!("Analysis {}", id)))
    }

    /// Download the history as CSV.
    ///
    /// Export is a paid feature; free-plan sessions are refused locally
    /// without contacting the backend.
    pub fn export_history(&self) -> Result<Vec<u8>> {
        if let Some(user) = self.client.session().user() {
            if !user.is_premium() {
                return Err(VeriqoError::PremiumRequired(
                    "CSV export is available for Premium and Business plans".to_string(),
                ));
            }
        }
        self.client.get_bytes("/history/export", Auth::Required)
    }

    /// Public directory of analyzed products. No account needed.
    pub fn insights(&self) -> Result<Vec<Analysis>> {
        self.client.get("/insights", Auth::Anonymous)
    }

    pub fn insight(&self, product_id: &str) -> Result<Analysis> {
        self.client
            .get(&format!("/insights/{}", product_id), Auth::Anonymous)
    }
}

/// Suggested file name for a history export taken today.
pub fn export_file_name() -> String {
    format!("veriqo-history-{}.csv", Utc::now().format("%Y-%m-%d"))
}

fn validate_product_url(url: &str) -> Result<&str> {
    let url = url.trim();
    if url.is_empty() {
        return Err(VeriqoError::InvalidArgument(
            "Please enter an Amazon product URL".to_string(),
        ));
    }
    if !url.contains("amazon") {
        return Err(VeriqoError::InvalidArgument(
            "Please enter a valid Amazon product URL".to_string(),
        ));
    }
    Ok(url)
}
