//! Confirm a checkout session after the payment provider redirects back.
//!
//! ```sh
//! VERIQO_TOKEN=... cargo run -- cs_live_123
//! ```
//!
//! The token is saved in the SDK store directory, so later runs can omit it.

use veriqo_sdk::payment::PaymentFailure;
use veriqo_sdk::{AsyncVeriqoSdk, PaymentOutcome};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let session_id = std::env::args().nth(1).unwrap_or_default();

    let mut builder = AsyncVeriqoSdk::builder().persist_session(true);
    if let Ok(token) = std::env::var("VERIQO_TOKEN") {
        builder = builder.token(token);
    }
    let sdk = builder.build().await.expect("Failed to initialize Veriqo SDK");
    eprintln!("{}", sdk.blocking());

    let outcome = sdk
        .confirm_payment(&session_id)
        .await
        .expect("payment task failed");

    match outcome {
        PaymentOutcome::Success { user, attempts } => {
            eprintln!("Payment confirmed after {attempts} check(s).");
            if let Some(user) = user {
                eprintln!("{} is now on the {} plan.", user.name, user.subscription_type);
            }
        }
        PaymentOutcome::Failed(PaymentFailure::Unauthorized { .. }) => {
            eprintln!("Sign in first: set VERIQO_TOKEN.");
            std::process::exit(2);
        }
        PaymentOutcome::Failed(failure) => {
            eprintln!("{failure:?}");
            eprintln!("{}", failure.user_message());
            std::process::exit(1);
        }
    }
}
