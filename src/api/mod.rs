//! Endpoint wrappers for the Veriqo backend.
//!
//! Each module provides a lightweight struct that borrows the
//! [`ApiClient`](crate::client::ApiClient) and exposes one method per REST
//! call, returning typed models.

pub mod admin;
pub mod analysis;
pub mod auth;
pub mod payments;
pub mod price_alerts;
pub mod wishlist;

pub use admin::AdminApi;
pub use analysis::AnalysisApi;
pub use auth::AuthApi;
pub use payments::PaymentsApi;
pub use price_alerts::PriceAlertApi;
pub use wishlist::WishlistApi;
