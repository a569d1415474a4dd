//! Checkout event published when a basket is checked out.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::ShoppingCart;

/// Integration event emitted to the message bus on successful checkout.
///
/// The item list and total price are taken from the live cart aggregate at
/// checkout time, never from checkout input. `event_id` is a fresh UUID per
/// publish so downstream consumers can deduplicate when the at-least-once
/// delivery (or a retried checkout after a failed basket delete) produces
/// duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketCheckoutEvent {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_name: String,
    pub total_price: Decimal,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub shipping_address: String,
    pub card_number: String,
    pub card_holder_name: String,
    pub card_expiration: String,
    pub items: Vec<BasketCheckoutItem>,
}

/// One cart line as carried by the checkout event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketCheckoutItem {
    pub product_id: String,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Identity, contact, and payment fields supplied by the checkout caller.
#[derive(Debug, Clone)]
pub struct CheckoutDetails {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email_address: String,
    pub shipping_address: String,
    pub card_number: String,
    pub card_holder_name: String,
    pub card_expiration: String,
}

impl BasketCheckoutEvent {
    /// Builds the event from checkout details and the loaded cart.
    ///
    /// The total is recomputed from the aggregate here so a stale or
    /// caller-tampered total can never reach the bus.
    pub fn from_cart(details: &CheckoutDetails, cart: &ShoppingCart) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_name: details.user_name.clone(),
            total_price: cart.total_price(),
            first_name: details.first_name.clone(),
            last_name: details.last_name.clone(),
            email_address: details.email_address.clone(),
            shipping_address: details.shipping_address.clone(),
            card_number: details.card_number.clone(),
            card_holder_name: details.card_holder_name.clone(),
            card_expiration: details.card_expiration.clone(),
            items: cart
                .items
                .iter()
                .map(|item| BasketCheckoutItem {
                    product_id: item.product_id.clone(),
                    product_name: item.product_name.clone(),
                    unit_price: item.unit_price,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}
