mod common;

use axum::{
    Router,
    http::StatusCode,
    routing::{get, post},
};
use axum_test::TestServer;
use basket_api::api::handlers::{checkout_handler, get_basket_handler, update_basket_handler};
use rust_decimal::Decimal;
use serde_json::json;

fn checkout_app(state: basket_api::AppState) -> Router {
    Router::new()
        .route("/api/basket", post(update_basket_handler))
        .route("/api/basket/checkout", post(checkout_handler))
        .route("/api/basket/{user_name}", get(get_basket_handler))
        .with_state(state)
}

fn checkout_body(user_name: &str) -> serde_json::Value {
    json!({
        "user_name": user_name,
        "first_name": "Alice",
        "last_name": "Smith",
        "email_address": "alice@example.com",
        "shipping_address": "1 Main St",
        "card_number": "4111111111111111",
        "card_holder_name": "Alice Smith",
        "card_expiration": "12/30"
    })
}

async fn seed_basket(server: &TestServer, user_name: &str) {
    server
        .post("/api/basket")
        .json(&json!({
            "user_name": user_name,
            "items": [
                { "product_id": "P1", "product_name": "Widget", "unit_price": "10.00", "quantity": 2 }
            ]
        }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_checkout_publishes_event_and_retires_basket() {
    let ctx = common::create_test_state();
    let publisher = ctx.publisher.clone();
    let store = ctx.store.clone();
    let server = TestServer::new(checkout_app(ctx.state)).unwrap();

    seed_basket(&server, "alice").await;

    let response = server.get("/api/basket/alice").await;
    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["total_price"], "20.00");

    let response = server
        .post("/api/basket/checkout")
        .json(&checkout_body("alice"))
        .await;

    response.assert_status(StatusCode::ACCEPTED);

    let events = publisher.published();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].user_name, "alice");
    assert_eq!(events[0].total_price, Decimal::new(2000, 2));
    assert_eq!(events[0].items.len(), 1);

    assert!(!store.contains("alice"));
    server.get("/api/basket/alice").await.assert_status_not_found();
}

#[tokio::test]
async fn test_checkout_without_basket_is_not_found() {
    let ctx = common::create_test_state();
    let publisher = ctx.publisher.clone();
    let server = TestServer::new(checkout_app(ctx.state)).unwrap();

    let response = server
        .post("/api/basket/checkout")
        .json(&checkout_body("nobody"))
        .await;

    response.assert_status_not_found();
    assert!(publisher.published().is_empty());
}

#[tokio::test]
async fn test_publish_failure_keeps_basket() {
    let ctx = common::create_test_state();
    let publisher = ctx.publisher.clone();
    let server = TestServer::new(checkout_app(ctx.state)).unwrap();

    seed_basket(&server, "alice").await;
    publisher.set_fail(true);

    let response = server
        .post("/api/basket/checkout")
        .json(&checkout_body("alice"))
        .await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "publish_failure");

    // The basket survives so the user can retry.
    assert!(publisher.published().is_empty());
    let response = server.get("/api/basket/alice").await;
    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["total_price"], "20.00");
}

#[tokio::test]
async fn test_delete_failure_after_publish_is_reported() {
    let ctx = common::create_test_state();
    let publisher = ctx.publisher.clone();
    let store = ctx.store.clone();
    let server = TestServer::new(checkout_app(ctx.state)).unwrap();

    seed_basket(&server, "alice").await;
    store.set_fail_deletes(true);

    let response = server
        .post("/api/basket/checkout")
        .json(&checkout_body("alice"))
        .await;

    // The event went out but the basket could not be retired: checkout
    // reports the failure instead of hiding the duplicate risk.
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(publisher.published().len(), 1);
    assert!(store.contains("alice"));
}

#[tokio::test]
async fn test_checkout_validation_failures() {
    let ctx = common::create_test_state();
    let server = TestServer::new(checkout_app(ctx.state)).unwrap();

    let mut body = checkout_body("alice");
    body["email_address"] = json!("not-an-email");
    let response = server.post("/api/basket/checkout").json(&body).await;
    response.assert_status_bad_request();

    let mut body = checkout_body("alice");
    body["card_expiration"] = json!("13/30");
    let response = server.post("/api/basket/checkout").json(&body).await;
    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_checkout_ignores_caller_supplied_total() {
    let ctx = common::create_test_state();
    let publisher = ctx.publisher.clone();
    let server = TestServer::new(checkout_app(ctx.state)).unwrap();

    seed_basket(&server, "alice").await;

    let mut body = checkout_body("alice");
    body["total_price"] = json!("0.01");
    let response = server.post("/api/basket/checkout").json(&body).await;
    response.assert_status(StatusCode::ACCEPTED);

    // The published total comes from the stored aggregate.
    let events = publisher.published();
    assert_eq!(events[0].total_price, Decimal::new(2000, 2));
}
