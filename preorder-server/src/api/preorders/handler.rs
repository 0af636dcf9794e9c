//! Preorder Admin API Handlers

use axum::{
    Json,
    body::Body,
    extract::{Path, Query, State},
    http::header,
    response::Response,
};
use serde::{Deserialize, Serialize};

use crate::core::events::CartEvent;
use crate::core::ServerState;
use crate::db::repository::CartRepository;
use crate::preorder::report::DEFAULT_LIMIT;
use crate::preorder::{PreorderPage, export_preorders_csv, list_preorders};
use crate::utils::time::{date_stamp, now_iso};
use crate::utils::{AppError, AppResult};

/// Query params for listing preorders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// GET /admin/preorders - 预购单列表 (分页)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<PreorderPage>> {
    let repo = CartRepository::new(state.db.clone());
    let carts = repo.find_all().await?;
    Ok(Json(list_preorders(carts, query.limit, query.offset)))
}

/// GET /admin/preorders/export - 导出 CSV
pub async fn export(State(state): State<ServerState>) -> AppResult<Response> {
    let repo = CartRepository::new(state.db.clone());
    let carts = repo.find_all().await?;
    let csv = export_preorders_csv(carts);

    Response::builder()
        .header(header::CONTENT_TYPE, "text/csv; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"preorders-{}.csv\"", date_stamp()),
        )
        .body(Body::from(csv))
        .map_err(|e| AppError::internal(e.to_string()))
}

/// Soft-delete response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

/// DELETE /admin/preorders/:id - 软删除预购单
///
/// 只翻转 metadata 标记，cart 记录保留。
pub async fn soft_delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let repo = CartRepository::new(state.db.clone());
    repo.soft_delete_preorder(&id, now_iso()).await?;

    // Metadata writes are cart updates; let subscribers re-evaluate.
    state.cart_events.publish(CartEvent::Updated {
        cart_id: id.clone(),
    });

    Ok(Json(DeleteResponse { id, deleted: true }))
}
