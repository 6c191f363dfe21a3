use serde::{Deserialize, Serialize};

use crate::extension::asin;
use crate::verdict::Verdict;

// ---------------------------------------------------------------------------
// ThingToKnow — One recurring theme pulled from reviews
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThingToKnow {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub frequency: String,
}

// ---------------------------------------------------------------------------
// Analysis — A single product verdict
// ---------------------------------------------------------------------------

/// Product analysis produced by the backend.
///
/// `verdict` is kept exactly as sent so re-encoding is lossless; use
/// [`Analysis::verdict`] for the normalized bucket. `top_complaints` and
/// `who_should_not_buy` are the legacy names of `things_to_know` and
/// `best_suited_for` and only appear on old history rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub id: String,
    pub product_name: String,
    #[serde(default)]
    pub product_image: Option<String>,
    #[serde(default)]
    pub amazon_url: String,
    #[serde(default)]
    pub affiliate_url: Option<String>,
    #[serde(rename = "verdict", default)]
    pub raw_verdict: String,
    #[serde(default)]
    pub confidence_score: i64,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub things_to_know: Vec<ThingToKnow>,
    #[serde(default)]
    pub best_suited_for: Vec<String>,
    #[serde(default)]
    pub positive_highlights: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_complaints: Vec<ThingToKnow>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub who_should_not_buy: Vec<String>,
    #[serde(default)]
    pub analyzed_at: String,
    #[serde(default)]
    pub user_id: Option<String>,
}

impl Analysis {
    pub fn verdict(&self) -> Verdict {
        Verdict::normalize(&self.raw_verdict)
    }

    /// Confidence clamped to `0..=100`.
    pub fn confidence(&self) -> u8 {
        self.confidence_score.clamp(0, 100) as u8
    }

    pub fn asin(&self) -> Option<String> {
        asin::extract_asin(&self.amazon_url)
    }

    /// Review themes, falling back to the legacy complaint list.
    pub fn themes(&self) -> &[ThingToKnow] {
        if self.things_to_know.is_empty() {
            &self.top_complaints
        } else {
            &self.things_to_know
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest<'a> {
    pub amazon_url: &'a str,
}

// ---------------------------------------------------------------------------
// Comparison — Side-by-side result for 2-3 products
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CompareRequest<'a> {
    pub product_urls: &'a [String],
}

/// One compared product: either a full analysis or the URL that failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComparedProduct {
    Analyzed(Box<Analysis>),
    Failed { url: String, error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonWinner {
    #[serde(default)]
    pub id: Option<String>,
    pub product_name: String,
    #[serde(default)]
    pub confidence_score: i64,
    #[serde(default)]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    #[serde(default)]
    pub products: Vec<ComparedProduct>,
    #[serde(default)]
    pub comparison_summary: String,
    #[serde(default)]
    pub winner: Option<ComparisonWinner>,
}

impl ComparisonResult {
    pub fn analyzed(&self) -> impl Iterator<Item = &Analysis> {
        self.products.iter().filter_map(|p| match p {
            ComparedProduct::Analyzed(a) => Some(a.as_ref()),
            ComparedProduct::Failed { .. } => None,
        })
    }
}
