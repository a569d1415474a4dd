//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! discount enrichment, and the checkout sequence. Services consume the
//! repository and client traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::basket_service::BasketService`] - Basket read/update/delete
//! - [`services::checkout_service::CheckoutService`] - Checkout sequencing

pub mod services;
