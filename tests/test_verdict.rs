//! Verdict normalization: every historical spelling lands in one bucket.

mod common;

use veriqo_sdk::models::Analysis;
use veriqo_sdk::Verdict;

// ---------------------------------------------------------------------------
// normalize
// ---------------------------------------------------------------------------

#[test]
fn legacy_labels_map_to_current_buckets() {
    let cases = [
        ("buy", Verdict::GreatMatch),
        ("BUY", Verdict::GreatMatch),
        ("think", Verdict::GoodMatch),
        ("THINK", Verdict::GoodMatch),
        ("avoid", Verdict::ConsiderOptions),
        ("AVOID", Verdict::ConsiderOptions),
    ];
    for (raw, expected) in cases {
        assert_eq!(Verdict::normalize(raw), expected, "verdict {raw:?}");
    }
}

#[test]
fn current_labels_map_to_themselves() {
    for v in Verdict::ALL {
        assert_eq!(Verdict::normalize(v.as_str()), v);
    }
}

#[test]
fn unrecognized_input_defaults_to_good_match() {
    for raw in ["unknown", "", "Buy", "great match", "consider", " buy"] {
        assert_eq!(Verdict::normalize(raw), Verdict::GoodMatch, "verdict {raw:?}");
    }
    assert_eq!(Verdict::from_optional(None), Verdict::GoodMatch);
}

#[test]
fn labels_and_keys() {
    assert_eq!(Verdict::GreatMatch.label(), "Great Match");
    assert_eq!(Verdict::GoodMatch.label(), "Good Match");
    assert_eq!(Verdict::ConsiderOptions.label(), "Consider Options");
    assert_eq!(Verdict::ConsiderOptions.as_str(), "consider_options");
    assert_eq!(Verdict::GreatMatch.to_string(), "Great Match");
    assert_eq!("avoid".parse::<Verdict>().unwrap(), Verdict::ConsiderOptions);
}

// ---------------------------------------------------------------------------
// serde
// ---------------------------------------------------------------------------

#[test]
fn deserializing_normalizes_and_serializing_is_canonical() {
    let v: Verdict = serde_json::from_str("\"BUY\"").unwrap();
    assert_eq!(v, Verdict::GreatMatch);
    let v: Verdict = serde_json::from_str("null").unwrap();
    assert_eq!(v, Verdict::GoodMatch);
    assert_eq!(serde_json::to_string(&Verdict::GoodMatch).unwrap(), "\"good_match\"");
}

#[test]
fn analysis_keeps_raw_verdict_but_reports_normalized() {
    let analysis: Analysis =
        serde_json::from_value(common::analysis_json("B000TEST01", "avoid")).unwrap();
    assert_eq!(analysis.raw_verdict, "avoid");
    assert_eq!(analysis.verdict(), Verdict::ConsiderOptions);

    let back = serde_json::to_value(&analysis).unwrap();
    assert_eq!(back["verdict"], "avoid");
}

#[test]
fn analysis_confidence_is_clamped() {
    let mut json = common::analysis_json("B000TEST01", "buy");
    json["confidence_score"] = serde_json::json!(140);
    let analysis: Analysis = serde_json::from_value(json).unwrap();
    assert_eq!(analysis.confidence(), 100);

    let mut json = common::analysis_json("B000TEST01", "buy");
    json["confidence_score"] = serde_json::json!(-5);
    let analysis: Analysis = serde_json::from_value(json).unwrap();
    assert_eq!(analysis.confidence(), 0);
}

#[test]
fn legacy_complaints_stand_in_for_things_to_know() {
    let json = serde_json::json!({
        "id": "old-1",
        "product_name": "Kettle",
        "amazon_url": "https://www.amazon.com/gp/product/b07xyz1234",
        "verdict": "think",
        "confidence_score": 55,
        "summary": "Fine.",
        "top_complaints": [{"title": "Leaks", "description": "Lid drips", "frequency": "rare"}],
        "who_should_not_buy": ["Tea purists"],
        "analyzed_at": "2024-06-01T00:00:00Z"
    });
    let analysis: Analysis = serde_json::from_value(json).unwrap();
    assert_eq!(analysis.themes().len(), 1);
    assert_eq!(analysis.themes()[0].title, "Leaks");
    assert_eq!(analysis.asin().as_deref(), Some("B07XYZ1234"));
}
