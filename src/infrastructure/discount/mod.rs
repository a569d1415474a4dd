//! External discount lookup clients.
//!
//! Provides a [`DiscountService`] trait with two implementations:
//! - [`HttpDiscountService`] - Production HTTP client
//! - [`StubDiscountService`] - Zero-discount fallback when unconfigured

mod http_discount;
mod service;
mod stub_discount;

pub use http_discount::HttpDiscountService;
pub use service::{Discount, DiscountError, DiscountService};
pub use stub_discount::StubDiscountService;

#[cfg(test)]
pub use service::MockDiscountService;
