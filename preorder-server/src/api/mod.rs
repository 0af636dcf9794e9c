//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`preorders`] - 预购单列表 / 导出 / 软删除
//! - [`availability`] - 变体可售性检查
//! - [`hooks`] - cart.updated 事件入口

pub mod availability;
pub mod health;
pub mod hooks;
pub mod preorders;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// 组装全部路由
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(preorders::router())
        .merge(availability::router())
        .merge(hooks::router())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
