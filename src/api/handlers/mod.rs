//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod basket;
pub mod checkout;
pub mod health;
pub mod metrics;

pub use basket::{delete_basket_handler, get_basket_handler, update_basket_handler};
pub use checkout::checkout_handler;
pub use health::health_handler;
pub use self::metrics::metrics_handler;
