//! Axum REST handlers for the catalog and quotation API.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use mediaquote_analytics::CatalogOverview;
use mediaquote_catalog::models::*;
use mediaquote_catalog::CatalogStore;
use mediaquote_core::types::{Asset, CampaignRequest, Platform, QuotationResult};
use mediaquote_core::QuoteError;
use mediaquote_quotation::QuotationEngine;

/// Shared API state.
#[derive(Clone)]
pub struct ApiState {
    pub store: Arc<CatalogStore>,
    pub engine: Arc<QuotationEngine>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn map_error(e: QuoteError) -> ApiError {
    let (status, tag) = match &e {
        QuoteError::PlatformNotFound(_) | QuoteError::AssetNotFound(_) => {
            (StatusCode::NOT_FOUND, "not_found")
        }
        QuoteError::PlatformInUse { .. } => (StatusCode::CONFLICT, "platform_in_use"),
        QuoteError::InvalidRequest(_) => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_request"),
        QuoteError::Store(_) => (StatusCode::BAD_GATEWAY, "store_unavailable"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };
    (
        status,
        Json(ErrorResponse {
            error: tag.to_string(),
            message: e.to_string(),
        }),
    )
}

// ─── Platforms ─────────────────────────────────────────────────────────────

pub async fn list_platforms(State(state): State<ApiState>) -> Json<Vec<Platform>> {
    Json(state.store.list_platforms())
}

pub async fn get_platform(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Platform>, StatusCode> {
    state
        .store
        .get_platform(id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn create_platform(
    State(state): State<ApiState>,
    Json(req): Json<CreatePlatformRequest>,
) -> (StatusCode, Json<Platform>) {
    let platform = state.store.create_platform(req, "admin");
    metrics::counter!("catalog.platforms.created").increment(1);
    (StatusCode::CREATED, Json(platform))
}

pub async fn update_platform(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdatePlatformRequest>,
) -> Result<Json<Platform>, StatusCode> {
    state
        .store
        .update_platform(id, req, "admin")
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn delete_platform(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .delete_platform(id, "admin")
        .map_err(map_error)?;
    metrics::counter!("catalog.platforms.deleted").increment(1);
    Ok(StatusCode::NO_CONTENT)
}

pub async fn platform_assets(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Asset>>, StatusCode> {
    if state.store.get_platform(id).is_none() {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(state.store.assets_for_platform(id)))
}

// ─── Assets ────────────────────────────────────────────────────────────────

pub async fn list_assets(State(state): State<ApiState>) -> Json<Vec<Asset>> {
    Json(state.store.list_assets())
}

pub async fn get_asset(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Asset>, StatusCode> {
    state
        .store
        .get_asset(id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn create_asset(
    State(state): State<ApiState>,
    Json(req): Json<CreateAssetRequest>,
) -> Result<(StatusCode, Json<Asset>), ApiError> {
    let asset = state.store.create_asset(req, "admin").map_err(map_error)?;
    metrics::counter!("catalog.assets.created").increment(1);
    Ok((StatusCode::CREATED, Json(asset)))
}

pub async fn update_asset(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateAssetRequest>,
) -> Result<Json<Asset>, StatusCode> {
    state
        .store
        .update_asset(id, req, "admin")
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

pub async fn delete_asset(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> StatusCode {
    if state.store.delete_asset(id, "admin") {
        metrics::counter!("catalog.assets.deleted").increment(1);
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// ─── Quotations ────────────────────────────────────────────────────────────

/// Run the quotation engine for a campaign request. Unmet preconditions
/// come back as an ordinary empty result; only store failures produce an
/// error status.
pub async fn create_quotation(
    State(state): State<ApiState>,
    Json(req): Json<CampaignRequest>,
) -> Result<Json<QuotationResult>, ApiError> {
    let result = state.engine.generate(&req).map_err(map_error)?;
    metrics::counter!("api.quotations.generated").increment(1);
    Ok(Json(result))
}

// ─── Analytics / audit ─────────────────────────────────────────────────────

pub async fn analytics_overview(State(state): State<ApiState>) -> Json<CatalogOverview> {
    let platforms = state.store.list_platforms();
    let assets = state.store.list_assets();
    Json(mediaquote_analytics::catalog_overview(&platforms, &assets))
}

pub async fn audit_log(State(state): State<ApiState>) -> Json<Vec<CatalogAuditEntry>> {
    Json(state.store.get_audit_log())
}

pub async fn healthz() -> &'static str {
    "ok"
}
