//! Variant Availability API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::availability::{Sellability, evaluate};
use crate::core::ServerState;
use crate::db::repository::VariantRepository;
use crate::utils::{AppError, AppResult};

/// Query params for the availability check
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    #[serde(rename = "variantId")]
    pub variant_id: Option<String>,
}

/// GET /admin/custom?variantId= - 变体可售性检查
pub async fn variant_availability(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Sellability>> {
    let variant_id = query
        .variant_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::validation("variantId is required"))?;

    let repo = VariantRepository::new(state.db.clone());
    let variant = repo
        .find_by_id(&variant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Variant not found"))?;

    Ok(Json(evaluate(&variant)))
}
