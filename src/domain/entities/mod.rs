//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`ShoppingCart`] - Per-user cart aggregate, the unit of consistency
//! - [`CartItem`] - A single product line owned by exactly one cart
//!
//! The aggregate exclusively owns its line items; the repository layer holds
//! no aggregate state beyond a transient serialized copy in cache storage.

pub mod cart;

pub use cart::{CartItem, ShoppingCart};
