//! Purchase verdict normalization.
//!
//! The backend has emitted two verdict vocabularies over time: the legacy
//! `buy` / `think` / `avoid` labels and the current `great_match` /
//! `good_match` / `consider_options` buckets. Every consumer in the SDK goes
//! through [`Verdict::normalize`] so the mapping lives in exactly one place.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// One of the three canonical verdict buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Verdict {
    GreatMatch,
    #[default]
    GoodMatch,
    ConsiderOptions,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [
        Verdict::GreatMatch,
        Verdict::GoodMatch,
        Verdict::ConsiderOptions,
    ];

    /// Map any historical or current verdict spelling onto a canonical bucket.
    ///
    /// Only the exact spellings the backend has produced are recognized;
    /// everything else (including the empty string) is `GoodMatch`.
    pub fn normalize(raw: &str) -> Verdict {
        match raw {
            "buy" | "BUY" | "great_match" => Verdict::GreatMatch,
            "think" | "THINK" | "good_match" => Verdict::GoodMatch,
            "avoid" | "AVOID" | "consider_options" => Verdict::ConsiderOptions,
            _ => Verdict::GoodMatch,
        }
    }

    /// Like [`normalize`](Self::normalize), treating a missing verdict as unrecognized.
    pub fn from_optional(raw: Option<&str>) -> Verdict {
        raw.map(Verdict::normalize).unwrap_or_default()
    }

    /// Canonical wire key, e.g. `"great_match"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::GreatMatch => "great_match",
            Verdict::GoodMatch => "good_match",
            Verdict::ConsiderOptions => "consider_options",
        }
    }

    /// Display label shown to shoppers.
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::GreatMatch => "Great Match",
            Verdict::GoodMatch => "Good Match",
            Verdict::ConsiderOptions => "Consider Options",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Verdict {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Verdict::normalize(s))
    }
}

impl Serialize for Verdict {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Verdict {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Verdict::from_optional(raw.as_deref()))
    }
}
