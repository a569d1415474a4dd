mod common;

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use basket_api::api::handlers::{
    delete_basket_handler, get_basket_handler, update_basket_handler,
};
use basket_api::domain::entities::{CartItem, ShoppingCart};
use basket_api::domain::repositories::CartRepository;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

fn basket_app(state: basket_api::AppState) -> Router {
    Router::new()
        .route("/api/basket", post(update_basket_handler))
        .route(
            "/api/basket/{user_name}",
            get(get_basket_handler).delete(delete_basket_handler),
        )
        .with_state(state)
}

#[tokio::test]
async fn test_update_then_get_returns_basket() {
    let ctx = common::create_test_state();
    let server = TestServer::new(basket_app(ctx.state)).unwrap();

    let response = server
        .post("/api/basket")
        .json(&json!({
            "user_name": "alice",
            "items": [
                {
                    "product_id": "P1",
                    "product_name": "Widget",
                    "unit_price": "10.00",
                    "quantity": 2
                }
            ]
        }))
        .await;

    response.assert_status_ok();

    let response = server.get("/api/basket/alice").await;
    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["user_name"], "alice");
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["product_id"], "P1");
    assert_eq!(body["items"][0]["quantity"], 2);
    assert_eq!(body["total_price"], "20.00");
}

#[tokio::test]
async fn test_get_missing_basket_returns_404() {
    let ctx = common::create_test_state();
    let server = TestServer::new(basket_app(ctx.state)).unwrap();

    let response = server.get("/api/basket/nobody").await;

    response.assert_status_not_found();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_update_rejects_invalid_items() {
    let ctx = common::create_test_state();
    let server = TestServer::new(basket_app(ctx.state)).unwrap();

    let response = server
        .post("/api/basket")
        .json(&json!({
            "user_name": "alice",
            "items": [
                {
                    "product_id": "P1",
                    "product_name": "Widget",
                    "unit_price": "10.00",
                    "quantity": 0
                }
            ]
        }))
        .await;

    response.assert_status_bad_request();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_update_merges_duplicate_product_ids() {
    let ctx = common::create_test_state();
    let server = TestServer::new(basket_app(ctx.state)).unwrap();

    let response = server
        .post("/api/basket")
        .json(&json!({
            "user_name": "alice",
            "items": [
                { "product_id": "P1", "product_name": "Widget", "unit_price": "10.00", "quantity": 2 },
                { "product_id": "P1", "product_name": "Widget", "unit_price": "10.00", "quantity": 3 }
            ]
        }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["quantity"], 5);
    assert_eq!(body["total_price"], "50.00");
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let ctx = common::create_test_state();
    let server = TestServer::new(basket_app(ctx.state)).unwrap();

    // Deleting a basket that never existed still succeeds.
    let response = server.delete("/api/basket/alice").await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);

    server
        .post("/api/basket")
        .json(&json!({
            "user_name": "alice",
            "items": [
                { "product_id": "P1", "product_name": "Widget", "unit_price": "10.00", "quantity": 1 }
            ]
        }))
        .await
        .assert_status_ok();

    let response = server.delete("/api/basket/alice").await;
    response.assert_status(axum::http::StatusCode::NO_CONTENT);

    server.get("/api/basket/alice").await.assert_status_not_found();
}

#[tokio::test]
async fn test_get_after_update_is_served_from_cache() {
    let ctx = common::create_test_state();
    let store = ctx.store.clone();
    let server = TestServer::new(basket_app(ctx.state)).unwrap();

    server
        .post("/api/basket")
        .json(&json!({
            "user_name": "alice",
            "items": [
                { "product_id": "P1", "product_name": "Widget", "unit_price": "10.00", "quantity": 2 }
            ]
        }))
        .await
        .assert_status_ok();

    server.get("/api/basket/alice").await.assert_status_ok();
    server.get("/api/basket/alice").await.assert_status_ok();

    // Both reads hit the cache copy written on update.
    assert_eq!(store.get_count(), 0);
}

#[tokio::test]
async fn test_cold_cache_hits_store_exactly_once() {
    let ctx = common::create_test_state();
    let store = ctx.store.clone();

    // Seed the durable store directly so the cache starts cold.
    let mut cart = ShoppingCart::new("alice").unwrap();
    cart.add_item(CartItem::new("P1", "Widget", Decimal::new(1000, 2), 2).unwrap());
    store.put(cart).await.unwrap();

    let server = TestServer::new(basket_app(ctx.state)).unwrap();

    server.get("/api/basket/alice").await.assert_status_ok();
    server.get("/api/basket/alice").await.assert_status_ok();

    // First read fell through and populated the cache; second was a hit.
    assert_eq!(store.get_count(), 1);
}

#[tokio::test]
async fn test_update_applies_discount_from_lookup() {
    let ctx = common::create_test_state_with_discount(Arc::new(
        common::FixedDiscountService::with("Widget", Decimal::new(300, 2)),
    ));
    let server = TestServer::new(basket_app(ctx.state)).unwrap();

    let response = server
        .post("/api/basket")
        .json(&json!({
            "user_name": "alice",
            "items": [
                { "product_id": "P1", "product_name": "Widget", "unit_price": "10.00", "quantity": 2 }
            ]
        }))
        .await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["items"][0]["unit_price"], "7.00");
    assert_eq!(body["total_price"], "14.00");
}
