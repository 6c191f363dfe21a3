//! The tokio wrapper delegates to the blocking SDK on the blocking pool.

#![cfg(feature = "async")]

mod common;

use common::{MockTransport, Reply};
use serde_json::json;
use veriqo_sdk::transport::Method;
use veriqo_sdk::{AsyncVeriqoSdk, PaymentOutcome, Verdict};

async fn build(mock: &std::sync::Arc<MockTransport>, dir: &std::path::Path) -> AsyncVeriqoSdk {
    AsyncVeriqoSdk::builder()
        .base_url(common::BASE_URL)
        .transport(mock.clone())
        .store_dir(dir)
        .token("tok-async")
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn analyze_runs_through_blocking_sdk() {
    let mock = MockTransport::new();
    mock.on(Method::Post, "/analyze", Reply::ok(common::analysis_json("B000TEST01", "buy")));
    let tmp = tempfile::tempdir().unwrap();
    let sdk = build(&mock, tmp.path()).await;

    let analysis = sdk.analyze("https://www.amazon.com/dp/B000TEST01").await.unwrap();

    assert_eq!(analysis.verdict(), Verdict::GreatMatch);
    assert_eq!(
        mock.last_request().unwrap().authorization.as_deref(),
        Some("Bearer tok-async")
    );
}

#[tokio::test]
async fn confirm_payment_and_me_share_one_session() {
    let mock = MockTransport::new();
    mock.on(
        Method::Get,
        "/payments/status/cs_async",
        Reply::ok(json!({ "status": "complete", "payment_status": "paid" })),
    );
    mock.on(Method::Get, "/auth/me", Reply::ok(common::user_json("premium")));
    let tmp = tempfile::tempdir().unwrap();
    let sdk = build(&mock, tmp.path()).await;

    let outcome = sdk.confirm_payment("cs_async").await.unwrap();
    assert!(matches!(outcome, PaymentOutcome::Success { attempts: 1, .. }));

    let user = sdk.me().await.unwrap();
    assert!(user.is_premium());
    assert!(sdk.blocking().current_user().unwrap().is_premium());
}
