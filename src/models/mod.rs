pub mod admin;
pub mod analysis;
pub mod payment;
pub mod price_alert;
pub mod user;
pub mod wishlist;

pub use admin::*;
pub use analysis::*;
pub use payment::*;
pub use price_alert::*;
pub use user::*;
pub use wishlist::*;
