use axum::{
    routing::{get, post},
    Router,
};

use crate::api::handlers;

/// Configuration of all application routes
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Asset import handlers
        .route(
            "/api/asset/import-excel",
            post(handlers::a001_asset_import::import_excel),
        )
        .route(
            "/api/asset/import-template",
            get(handlers::a001_asset_import::import_template),
        )
}
