//! API router — mounts all endpoints under /api/v1.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, ApiState};

/// Build the API router with all endpoints.
pub fn api_router(state: ApiState) -> Router {
    Router::new()
        // Platforms
        .route(
            "/api/v1/platforms",
            get(handlers::list_platforms).post(handlers::create_platform),
        )
        .route(
            "/api/v1/platforms/{id}",
            get(handlers::get_platform)
                .put(handlers::update_platform)
                .delete(handlers::delete_platform),
        )
        .route("/api/v1/platforms/{id}/assets", get(handlers::platform_assets))
        // Assets
        .route(
            "/api/v1/assets",
            get(handlers::list_assets).post(handlers::create_asset),
        )
        .route(
            "/api/v1/assets/{id}",
            get(handlers::get_asset)
                .put(handlers::update_asset)
                .delete(handlers::delete_asset),
        )
        // Quotations
        .route("/api/v1/quotations", post(handlers::create_quotation))
        // Analytics
        .route("/api/v1/analytics/overview", get(handlers::analytics_overview))
        // Audit log
        .route("/api/v1/audit-log", get(handlers::audit_log))
        // Health
        .route("/healthz", get(handlers::healthz))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
