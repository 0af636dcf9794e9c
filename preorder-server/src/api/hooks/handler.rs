//! Platform Event Hook Handlers
//!
//! The host platform delivers its `cart.updated` events here; they fan out
//! on the internal bus to the follow-up worker.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::core::events::CartEvent;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// cart.updated payload: the cart id only, state is re-read from the store
#[derive(Debug, Deserialize)]
pub struct CartUpdatedPayload {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct HookAck {
    pub received: bool,
}

/// POST /hooks/cart-updated
pub async fn cart_updated(
    State(state): State<ServerState>,
    Json(payload): Json<CartUpdatedPayload>,
) -> AppResult<(StatusCode, Json<HookAck>)> {
    if payload.id.is_empty() {
        return Err(AppError::validation("cart id is required"));
    }

    state
        .cart_events
        .publish(CartEvent::Updated { cart_id: payload.id });

    Ok((StatusCode::ACCEPTED, Json(HookAck { received: true })))
}
