//! Business logic services for the application layer.

pub mod basket_service;
pub mod checkout_service;

pub use basket_service::BasketService;
pub use checkout_service::{CheckoutOutcome, CheckoutService, CheckoutState};
