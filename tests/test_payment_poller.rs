//! Checkout confirmation poller against a scripted backend.

mod common;

use std::cell::RefCell;
use std::time::Duration;

use common::{MockTransport, Reply};
use serde_json::json;
use veriqo_sdk::payment::PaymentFailure;
use veriqo_sdk::transport::Method;
use veriqo_sdk::{config, PaymentOutcome, PaymentState};

const STATUS_PATH: &str = "/payments/status/cs_test_123";
const INTERVAL: Duration = Duration::from_millis(20);

fn pending() -> Reply {
    Reply::ok(json!({ "status": "open", "payment_status": "unpaid" }))
}

fn paid() -> Reply {
    Reply::ok(json!({ "status": "complete", "payment_status": "paid", "amount_total": 999, "currency": "usd" }))
}

#[test]
fn defaults_are_five_attempts_two_seconds_apart() {
    assert_eq!(config::PAYMENT_POLL_ATTEMPTS, 5);
    assert_eq!(config::PAYMENT_POLL_INTERVAL, Duration::from_secs(2));
}

#[test]
fn always_pending_makes_exactly_five_calls_then_fails() {
    let mock = MockTransport::new();
    mock.on(Method::Get, STATUS_PATH, pending());
    let (sdk, _tmp) = common::signed_in_sdk(&mock, "tok");

    let outcome = sdk.payment_poller().interval(INTERVAL).poll("cs_test_123");

    assert_eq!(
        outcome,
        PaymentOutcome::Failed(PaymentFailure::Exhausted {
            attempts: 5,
            last_error: None
        })
    );
    let calls = mock.calls_to(STATUS_PATH);
    assert_eq!(calls.len(), 5);
    assert_eq!(mock.call_count(), 5, "no user refresh on failure");
    for pair in calls.windows(2) {
        assert!(pair[1].at.duration_since(pair[0].at) >= INTERVAL);
    }
}

#[test]
fn paid_on_third_call_stops_and_refreshes_user() {
    let mock = MockTransport::new();
    mock.on(Method::Get, STATUS_PATH, pending())
        .on(Method::Get, STATUS_PATH, pending())
        .on(Method::Get, STATUS_PATH, paid());
    mock.on(Method::Get, "/auth/me", Reply::ok(common::user_json("premium")));
    let (sdk, _tmp) = common::signed_in_sdk(&mock, "tok");

    let outcome = sdk.payment_poller().interval(INTERVAL).poll("cs_test_123");

    match &outcome {
        PaymentOutcome::Success { user, attempts } => {
            assert_eq!(*attempts, 3);
            assert_eq!(user.as_ref().unwrap().subscription_type, "premium");
        }
        other => panic!("expected success, got {other:?}"),
    }
    assert_eq!(mock.calls_to(STATUS_PATH).len(), 3);
    assert_eq!(mock.calls_to("/auth/me").len(), 1);
    assert!(sdk.current_user().unwrap().is_premium());
}

#[test]
fn expired_session_fails_immediately() {
    let mock = MockTransport::new();
    mock.on(Method::Get, STATUS_PATH, pending())
        .on(Method::Get, STATUS_PATH, Reply::ok(json!({ "status": "expired", "payment_status": "unpaid" })));
    let (sdk, _tmp) = common::signed_in_sdk(&mock, "tok");

    let outcome = sdk.payment_poller().interval(INTERVAL).poll("cs_test_123");

    assert_eq!(
        outcome,
        PaymentOutcome::Failed(PaymentFailure::Expired { attempts: 2 })
    );
    assert_eq!(mock.call_count(), 2);
}

#[test]
fn errors_are_retried_until_paid() {
    let mock = MockTransport::new();
    mock.on(Method::Get, STATUS_PATH, Reply::NetworkError)
        .on(Method::Get, STATUS_PATH, Reply::detail(500, "Stripe unavailable"))
        .on(Method::Get, STATUS_PATH, paid());
    mock.on(Method::Get, "/auth/me", Reply::ok(common::user_json("premium")));
    let (sdk, _tmp) = common::signed_in_sdk(&mock, "tok");

    let outcome = sdk.payment_poller().interval(INTERVAL).poll("cs_test_123");

    assert!(outcome.is_success());
    assert_eq!(mock.calls_to(STATUS_PATH).len(), 3);
}

#[test]
fn persistent_errors_exhaust_attempts() {
    let mock = MockTransport::new();
    mock.on(Method::Get, STATUS_PATH, Reply::NetworkError);
    let (sdk, _tmp) = common::signed_in_sdk(&mock, "tok");

    let outcome = sdk
        .payment_poller()
        .max_attempts(3)
        .interval(Duration::ZERO)
        .poll("cs_test_123");

    match outcome {
        PaymentOutcome::Failed(failure @ PaymentFailure::Exhausted { attempts: 3, .. }) => {
            assert!(failure.user_message().contains("contact support"));
        }
        other => panic!("expected exhaustion, got {other:?}"),
    }
    assert_eq!(mock.call_count(), 3);
}

#[test]
fn missing_session_id_never_calls_backend() {
    let mock = MockTransport::new();
    let (sdk, _tmp) = common::signed_in_sdk(&mock, "tok");

    let outcome = sdk.payment_poller().poll("  ");

    assert_eq!(outcome, PaymentOutcome::Failed(PaymentFailure::MissingSession));
    assert_eq!(mock.call_count(), 0);
}

#[test]
fn paid_even_if_user_refresh_fails() {
    let mock = MockTransport::new();
    mock.on(Method::Get, STATUS_PATH, paid());
    mock.on(Method::Get, "/auth/me", Reply::NetworkError);
    let (sdk, _tmp) = common::signed_in_sdk(&mock, "tok");

    let outcome = sdk.payment_poller().interval(INTERVAL).poll("cs_test_123");

    assert_eq!(
        outcome,
        PaymentOutcome::Success {
            user: None,
            attempts: 1
        }
    );
}

#[test]
fn observer_sees_loading_then_terminal_state() {
    let mock = MockTransport::new();
    mock.on(Method::Get, STATUS_PATH, paid());
    mock.on(Method::Get, "/auth/me", Reply::ok(common::user_json("premium")));
    let (sdk, _tmp) = common::signed_in_sdk(&mock, "tok");

    let seen = RefCell::new(Vec::new());
    let outcome = sdk
        .payment_poller()
        .interval(INTERVAL)
        .on_state(|s| seen.borrow_mut().push(s))
        .poll("cs_test_123");

    assert_eq!(outcome.state(), PaymentState::Success);
    assert_eq!(
        seen.into_inner(),
        vec![PaymentState::Loading, PaymentState::Success]
    );
}

#[test]
fn status_requests_carry_bearer_token() {
    let mock = MockTransport::new();
    mock.on(Method::Get, STATUS_PATH, paid());
    mock.on(Method::Get, "/auth/me", Reply::ok(common::user_json("premium")));
    let (sdk, _tmp) = common::signed_in_sdk(&mock, "tok-abc");

    sdk.payment_poller().poll("cs_test_123");

    let first = &mock.calls_to(STATUS_PATH)[0];
    assert_eq!(first.request.authorization.as_deref(), Some("Bearer tok-abc"));
}

#[test]
fn signed_out_poll_stops_without_calling_or_sleeping() {
    let mock = MockTransport::new();
    mock.on(Method::Get, STATUS_PATH, paid());
    let (sdk, _tmp) = common::sdk(&mock);

    let started = std::time::Instant::now();
    let outcome = sdk
        .payment_poller()
        .interval(Duration::from_secs(2))
        .poll("cs_test_123");

    assert_eq!(
        outcome,
        PaymentOutcome::Failed(PaymentFailure::Unauthorized { attempts: 1 })
    );
    assert_eq!(mock.call_count(), 0);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn rejected_token_stops_polling() {
    let mock = MockTransport::new();
    mock.on(Method::Get, STATUS_PATH, Reply::detail(401, "Token expired"));
    let (sdk, _tmp) = common::signed_in_sdk(&mock, "stale");

    let outcome = sdk.payment_poller().interval(INTERVAL).poll("cs_test_123");

    assert_eq!(outcome.state(), PaymentState::Error);
    assert_eq!(
        outcome,
        PaymentOutcome::Failed(PaymentFailure::Unauthorized { attempts: 1 })
    );
    assert_eq!(mock.calls_to(STATUS_PATH).len(), 1);
}
