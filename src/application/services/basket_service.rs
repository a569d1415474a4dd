//! Basket retrieval and update service.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{CartItem, ShoppingCart};
use crate::domain::repositories::CartRepository;
use crate::error::AppError;
use crate::infrastructure::discount::DiscountService;

/// Service for reading, updating, and deleting per-user baskets.
///
/// Updates rebuild the aggregate from the caller-supplied items (merging
/// duplicate product ids) and enrich each item with a discount lookup before
/// persisting through the repository chain.
pub struct BasketService {
    cart_repository: Arc<dyn CartRepository>,
    discount_service: Arc<dyn DiscountService>,
}

impl BasketService {
    /// Creates a new basket service.
    pub fn new(
        cart_repository: Arc<dyn CartRepository>,
        discount_service: Arc<dyn DiscountService>,
    ) -> Self {
        Self {
            cart_repository,
            discount_service,
        }
    }

    /// Retrieves the basket for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user has no basket.
    /// Returns [`AppError::StoreUnavailable`] on storage errors.
    pub async fn get_basket(&self, user_name: &str) -> Result<ShoppingCart, AppError> {
        self.cart_repository
            .get(user_name)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Basket not found",
                    json!({ "user_name": user_name }),
                )
            })
    }

    /// Replaces the basket for a user with the supplied items.
    ///
    /// Items sharing a product id are merged by quantity. Each item goes
    /// through a discount lookup first; a failed lookup keeps the original
    /// price and never aborts the update. The discount backend's answer may
    /// legitimately change between calls, so repeated updates can price the
    /// same item differently.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on malformed input and
    /// [`AppError::StoreUnavailable`] on storage errors.
    pub async fn update_basket(
        &self,
        user_name: &str,
        items: Vec<CartItem>,
    ) -> Result<ShoppingCart, AppError> {
        info!(user_name, items = items.len(), "Updating basket");

        let mut cart = ShoppingCart::new(user_name)?;

        for mut item in items {
            self.apply_discount(&mut item).await;
            cart.add_item(item);
        }

        let stored = self.cart_repository.put(cart).await?;

        info!(
            user_name,
            items = stored.item_count(),
            total = %stored.total_price(),
            "Basket updated"
        );

        Ok(stored)
    }

    /// Deletes the basket for a user. Deleting a missing basket is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreUnavailable`] on storage errors.
    pub async fn delete_basket(&self, user_name: &str) -> Result<(), AppError> {
        let existed = self.cart_repository.delete(user_name).await?;

        if !existed {
            debug!(user_name, "Delete requested for missing basket");
        }

        Ok(())
    }

    /// Reduces the item's unit price by the looked-up discount, floored at
    /// zero. Lookup failures are logged and leave the price untouched.
    async fn apply_discount(&self, item: &mut CartItem) {
        match self.discount_service.lookup(&item.product_name).await {
            Ok(discount) if discount.amount > Decimal::ZERO => {
                let discounted = (item.unit_price - discount.amount).max(Decimal::ZERO);
                match item.set_price(discounted) {
                    Ok(()) => info!(
                        product_name = %item.product_name,
                        amount = %discount.amount,
                        description = %discount.description,
                        new_price = %discounted,
                        "Applied discount"
                    ),
                    Err(e) => warn!(
                        product_name = %item.product_name,
                        error = %e,
                        "Discount produced an invalid price, keeping original"
                    ),
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!(
                    product_name = %item.product_name,
                    original_price = %item.unit_price,
                    error = %e,
                    "Discount lookup failed, keeping original price"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockCartRepository;
    use crate::infrastructure::discount::{Discount, DiscountError, MockDiscountService};

    fn no_discount() -> MockDiscountService {
        let mut discounts = MockDiscountService::new();
        discounts.expect_lookup().returning(|_| {
            Ok(Discount {
                amount: Decimal::ZERO,
                description: String::new(),
            })
        });
        discounts
    }

    fn item(price_cents: i64, quantity: u32) -> CartItem {
        CartItem::new("P1", "Widget", Decimal::new(price_cents, 2), quantity).unwrap()
    }

    #[tokio::test]
    async fn test_update_applies_discount() {
        let mut repo = MockCartRepository::new();
        repo.expect_put()
            .withf(|cart| cart.items[0].unit_price == Decimal::new(700, 2))
            .times(1)
            .returning(Ok);

        let mut discounts = MockDiscountService::new();
        discounts.expect_lookup().times(1).returning(|_| {
            Ok(Discount {
                amount: Decimal::new(300, 2),
                description: "spring sale".to_string(),
            })
        });

        let service = BasketService::new(Arc::new(repo), Arc::new(discounts));

        let cart = service
            .update_basket("alice", vec![item(1000, 2)])
            .await
            .unwrap();

        assert_eq!(cart.items[0].unit_price, Decimal::new(700, 2));
    }

    #[tokio::test]
    async fn test_discount_floors_price_at_zero() {
        let mut repo = MockCartRepository::new();
        repo.expect_put().times(1).returning(Ok);

        let mut discounts = MockDiscountService::new();
        discounts.expect_lookup().times(1).returning(|_| {
            Ok(Discount {
                amount: Decimal::new(1200, 2),
                description: "clearance".to_string(),
            })
        });

        let service = BasketService::new(Arc::new(repo), Arc::new(discounts));

        let cart = service
            .update_basket("alice", vec![item(1000, 2)])
            .await
            .unwrap();

        assert_eq!(cart.items[0].unit_price, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_failed_lookup_keeps_original_price() {
        let mut repo = MockCartRepository::new();
        repo.expect_put().times(1).returning(Ok);

        let mut discounts = MockDiscountService::new();
        discounts
            .expect_lookup()
            .times(1)
            .returning(|_| Err(DiscountError::Malformed("backend down".to_string())));

        let service = BasketService::new(Arc::new(repo), Arc::new(discounts));

        let cart = service
            .update_basket("alice", vec![item(1000, 2)])
            .await
            .unwrap();

        assert_eq!(cart.items[0].unit_price, Decimal::new(1000, 2));
    }

    #[tokio::test]
    async fn test_update_merges_duplicate_product_ids() {
        let mut repo = MockCartRepository::new();
        repo.expect_put()
            .withf(|cart| cart.item_count() == 1 && cart.items[0].quantity == 5)
            .times(1)
            .returning(Ok);

        let service = BasketService::new(Arc::new(repo), Arc::new(no_discount()));

        let cart = service
            .update_basket("alice", vec![item(1000, 2), item(1000, 3)])
            .await
            .unwrap();

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.items[0].quantity, 5);
    }

    #[tokio::test]
    async fn test_get_basket_not_found() {
        let mut repo = MockCartRepository::new();
        repo.expect_get().times(1).returning(|_| Ok(None));

        let service = BasketService::new(Arc::new(repo), Arc::new(no_discount()));

        let result = service.get_basket("alice").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_delete_missing_basket_is_ok() {
        let mut repo = MockCartRepository::new();
        repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = BasketService::new(Arc::new(repo), Arc::new(no_discount()));

        assert!(service.delete_basket("alice").await.is_ok());
    }
}
