//! DTOs for the checkout endpoint.

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::checkout_event::CheckoutDetails;

/// Compiled regex for MM/YY card expiration.
static CARD_EXPIRATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/[0-9]{2}$").unwrap());

/// Compiled regex for card numbers (12-19 digits).
static CARD_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{12,19}$").unwrap());

/// Request to check out a user's basket.
///
/// `total_price` is accepted for interface compatibility but deliberately
/// ignored when the checkout event is built: the authoritative total always
/// comes from the stored aggregate.
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutBasketRequest {
    #[validate(length(min = 3, message = "Username must be at least 3 characters long"))]
    pub user_name: String,

    pub total_price: Option<Decimal>,

    #[validate(length(min = 1, max = 50, message = "FirstName must be 1-50 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 50, message = "LastName must be 1-50 characters"))]
    pub last_name: String,

    #[validate(email(message = "A valid email address is required"))]
    pub email_address: String,

    #[validate(length(min = 1, max = 180, message = "ShippingAddress must be 1-180 characters"))]
    pub shipping_address: String,

    #[validate(regex(path = *CARD_NUMBER_REGEX, message = "A valid card number is required"))]
    pub card_number: String,

    #[validate(length(min = 1, max = 100, message = "CardHolderName must be 1-100 characters"))]
    pub card_holder_name: String,

    #[validate(regex(path = *CARD_EXPIRATION_REGEX, message = "CardExpiration must be in MM/YY format"))]
    pub card_expiration: String,
}

impl CheckoutBasketRequest {
    /// Extracts the fields the checkout sequence uses. The caller-supplied
    /// total does not survive this conversion.
    pub fn into_details(self) -> CheckoutDetails {
        CheckoutDetails {
            user_name: self.user_name,
            first_name: self.first_name,
            last_name: self.last_name,
            email_address: self.email_address,
            shipping_address: self.shipping_address,
            card_number: self.card_number,
            card_holder_name: self.card_holder_name,
            card_expiration: self.card_expiration,
        }
    }
}

/// Response returned after a completed checkout.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub user_name: String,
    pub status: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CheckoutBasketRequest {
        CheckoutBasketRequest {
            user_name: "alice".to_string(),
            total_price: None,
            first_name: "Alice".to_string(),
            last_name: "Smith".to_string(),
            email_address: "alice@example.com".to_string(),
            shipping_address: "1 Main St".to_string(),
            card_number: "4111111111111111".to_string(),
            card_holder_name: "Alice Smith".to_string(),
            card_expiration: "12/30".to_string(),
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_bad_expiration_rejected() {
        let mut request = valid_request();
        request.card_expiration = "13/30".to_string();
        assert!(request.validate().is_err());

        request.card_expiration = "1230".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_bad_card_number_rejected() {
        let mut request = valid_request();
        request.card_number = "1234".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut request = valid_request();
        request.email_address = "not-an-email".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_caller_total_is_dropped() {
        let mut request = valid_request();
        request.total_price = Some(Decimal::new(1, 2));
        let details = request.into_details();
        assert_eq!(details.user_name, "alice");
    }
}
