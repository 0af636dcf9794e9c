//! Preorder Admin API 模块

mod handler;

use axum::{
    Router,
    routing::{delete, get},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/admin/preorders", preorder_routes())
}

fn preorder_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/export", get(handler::export))
        .route("/{id}", delete(handler::soft_delete))
}
