//! Browser-extension background worker.
//!
//! The extension's content and popup scripts talk to a background worker
//! through a small message protocol ([`message`]). The worker
//! ([`worker::ExtensionWorker`]) answers from a persistent local store
//! ([`store::ExtensionStore`]) where it can, and calls the backend otherwise.

pub mod asin;
pub mod message;
pub mod store;
pub mod worker;

pub use asin::{canonical_product_url, extract_asin};
pub use message::{ActionResult, Message, Response, StatusResponse};
pub use store::{ExtensionStore, StoreState};
pub use worker::ExtensionWorker;
