//! Platform Event Hooks 模块

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/hooks/cart-updated", post(handler::cart_updated))
}
