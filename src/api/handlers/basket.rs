//! Handlers for basket endpoints (get, update, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::basket::{BasketResponse, UpdateBasketRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the basket for a user.
///
/// # Endpoint
///
/// `GET /api/basket/{user_name}`
///
/// # Errors
///
/// Returns 404 Not Found if the user has no basket.
pub async fn get_basket_handler(
    Path(user_name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<BasketResponse>, AppError> {
    let cart = state.basket_service.get_basket(&user_name).await?;

    Ok(Json(cart.into()))
}

/// Replaces the basket for a user with the supplied items.
///
/// # Endpoint
///
/// `POST /api/basket`
///
/// # Request Body
///
/// ```json
/// {
///   "user_name": "alice",
///   "items": [
///     {
///       "product_id": "P1",
///       "product_name": "Widget",
///       "unit_price": "10.00",
///       "quantity": 2
///     }
///   ]
/// }
/// ```
///
/// Items sharing a product id are merged by quantity. Each item's price may
/// be reduced by the discount service before the basket is stored.
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails and 503 Service Unavailable
/// when the durable store is unreachable.
pub async fn update_basket_handler(
    State(state): State<AppState>,
    Json(payload): Json<UpdateBasketRequest>,
) -> Result<Json<BasketResponse>, AppError> {
    payload.validate()?;

    let mut items = Vec::with_capacity(payload.items.len());
    for item in payload.items {
        items.push(item.into_item()?);
    }

    let cart = state
        .basket_service
        .update_basket(&payload.user_name, items)
        .await?;

    Ok(Json(cart.into()))
}

/// Deletes the basket for a user.
///
/// # Endpoint
///
/// `DELETE /api/basket/{user_name}`
///
/// # Behavior
///
/// Deleting a missing basket succeeds: the endpoint is idempotent and always
/// returns 204 No Content unless the store is unreachable.
pub async fn delete_basket_handler(
    Path(user_name): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.basket_service.delete_basket(&user_name).await?;

    Ok(StatusCode::NO_CONTENT)
}
