//! Shopping cart aggregate and its line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

/// A single product line inside a shopping cart.
///
/// Quantity is unsigned, so it can never go negative; `decrease_quantity`
/// saturates at zero instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartItem {
    /// Creates a new cart item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the product id or name is empty,
    /// or if the unit price is negative.
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        unit_price: Decimal,
        quantity: u32,
    ) -> Result<Self, AppError> {
        let product_id = product_id.into();
        let product_name = product_name.into();

        if product_id.trim().is_empty() {
            return Err(AppError::bad_request(
                "Product id cannot be empty",
                json!({ "field": "product_id" }),
            ));
        }
        if product_name.trim().is_empty() {
            return Err(AppError::bad_request(
                "Product name cannot be empty",
                json!({ "field": "product_name" }),
            ));
        }
        if unit_price < Decimal::ZERO {
            return Err(AppError::bad_request(
                "Unit price cannot be negative",
                json!({ "field": "unit_price", "value": unit_price.to_string() }),
            ));
        }

        Ok(Self {
            product_id,
            product_name,
            unit_price,
            quantity,
        })
    }

    /// Replaces the unit price.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the new price is negative.
    pub fn set_price(&mut self, new_price: Decimal) -> Result<(), AppError> {
        if new_price < Decimal::ZERO {
            return Err(AppError::bad_request(
                "Unit price cannot be negative",
                json!({ "field": "unit_price", "value": new_price.to_string() }),
            ));
        }
        self.unit_price = new_price;
        Ok(())
    }

    /// Adds `amount` to the quantity.
    pub fn increase_quantity(&mut self, amount: u32) {
        self.quantity = self.quantity.saturating_add(amount);
    }

    /// Subtracts `amount` from the quantity, clamping at zero.
    pub fn decrease_quantity(&mut self, amount: u32) {
        self.quantity = self.quantity.saturating_sub(amount);
    }

    /// Line total: unit price × quantity.
    pub fn total_price(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Per-user shopping cart, the unit of consistency for persistence.
///
/// Items are unique by product id: adding an item whose product id already
/// exists merges quantities instead of duplicating the line.
///
/// The total is derived, never stored; the persisted representation is the
/// user id plus the item list and round-trips exactly through serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingCart {
    pub user_id: String,
    pub items: Vec<CartItem>,
}

impl ShoppingCart {
    /// Creates an empty cart for the given user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the user id is empty.
    pub fn new(user_id: impl Into<String>) -> Result<Self, AppError> {
        let user_id = user_id.into();
        if user_id.trim().is_empty() {
            return Err(AppError::bad_request(
                "User id cannot be empty",
                json!({ "field": "user_id" }),
            ));
        }
        Ok(Self {
            user_id,
            items: Vec::new(),
        })
    }

    /// Adds an item, merging quantities when the product id already exists.
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(existing) = self
            .items
            .iter_mut()
            .find(|i| i.product_id == item.product_id)
        {
            existing.increase_quantity(item.quantity);
        } else {
            self.items.push(item);
        }
    }

    /// Removes the item with the given product id, if present.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Derived cart total: sum of line totals.
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::total_price).sum()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
