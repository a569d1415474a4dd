//! Handler for the basket checkout endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::checkout::{CheckoutBasketRequest, CheckoutResponse};
use crate::application::services::CheckoutOutcome;
use crate::error::AppError;
use crate::state::AppState;

/// Checks out the basket for a user.
///
/// # Endpoint
///
/// `POST /api/basket/checkout`
///
/// # Sequence
///
/// Loads the basket, publishes the checkout event, then deletes the basket.
/// The event's item list and total come from the stored basket; any
/// `total_price` in the request body is ignored.
///
/// # Response Codes
///
/// - **202 Accepted**: event published and basket retired
/// - **404 Not Found**: the user has no basket to check out
/// - **502 Bad Gateway**: the event could not be published; the basket is kept
/// - **503 Service Unavailable**: the store failed; if this happens after a
///   successful publish the event is already downstream
pub async fn checkout_handler(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutBasketRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>), AppError> {
    payload.validate()?;

    let user_name = payload.user_name.clone();
    let outcome = state.checkout_service.checkout(payload.into_details()).await?;

    match outcome {
        CheckoutOutcome::Completed => Ok((
            StatusCode::ACCEPTED,
            Json(CheckoutResponse {
                user_name,
                status: "completed",
            }),
        )),
        CheckoutOutcome::NoSuchBasket => Err(AppError::not_found(
            "No basket to check out",
            json!({ "user_name": user_name }),
        )),
    }
}
