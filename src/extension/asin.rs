//! ASIN extraction from Amazon product URLs.

use once_cell::sync::Lazy;
use regex::Regex;

static DP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/dp/([A-Z0-9]{10})").expect("valid ASIN pattern"));
static GP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/gp/product/([A-Z0-9]{10})").expect("valid ASIN pattern"));

/// Extract the 10-character ASIN from a product URL or path.
///
/// Recognizes `/dp/<ASIN>` and `/gp/product/<ASIN>`. The result is upper-cased
/// so it can be used directly as a cache key.
pub fn extract_asin(url: &str) -> Option<String> {
    DP_PATTERN
        .captures(url)
        .or_else(|| GP_PATTERN.captures(url))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_ascii_uppercase())
}

/// Canonical product page URL for an ASIN.
pub fn canonical_product_url(asin: &str) -> String {
    format!("https://www.amazon.com/dp/{}", asin.to_ascii_uppercase())
}

/// True if `s` looks like an ASIN: exactly ten ASCII letters or digits.
pub fn is_asin(s: &str) -> bool {
    s.len() == 10 && s.bytes().all(|b| b.is_ascii_alphanumeric())
}
