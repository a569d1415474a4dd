//! DTOs for basket read and update endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::{CartItem, ShoppingCart};
use crate::error::AppError;

fn validate_unit_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("unit_price_negative"));
    }
    Ok(())
}

/// Request to replace the basket for a user.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBasketRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    pub user_name: String,

    #[validate(nested)]
    pub items: Vec<BasketItemRequest>,
}

/// One basket line as supplied by the caller.
#[derive(Debug, Deserialize, Validate)]
pub struct BasketItemRequest {
    #[validate(length(min = 1, message = "Product id is required"))]
    pub product_id: String,

    #[validate(length(min = 1, message = "Product name is required"))]
    pub product_name: String,

    #[validate(custom(function = validate_unit_price))]
    pub unit_price: Decimal,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
}

impl BasketItemRequest {
    /// Converts the request line into a domain cart item.
    pub fn into_item(self) -> Result<CartItem, AppError> {
        CartItem::new(
            self.product_id,
            self.product_name,
            self.unit_price,
            self.quantity,
        )
    }
}

/// JSON representation of a basket returned by the API.
#[derive(Debug, Serialize)]
pub struct BasketResponse {
    pub user_name: String,
    pub items: Vec<BasketItemResponse>,
    pub total_price: Decimal,
}

/// One basket line as returned by the API.
#[derive(Debug, Serialize)]
pub struct BasketItemResponse {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl From<ShoppingCart> for BasketResponse {
    fn from(cart: ShoppingCart) -> Self {
        let total_price = cart.total_price();
        Self {
            user_name: cart.user_id,
            total_price,
            items: cart
                .items
                .into_iter()
                .map(|item| BasketItemResponse {
                    product_id: item.product_id,
                    product_name: item.product_name,
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}
