use crate::core::config::Config;
use crate::server::middleware::with_cors;
use crate::server::types::ErrorResponse;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub(super) mod languages;
pub(super) mod public;
pub(super) mod translations;

use languages::language_router;
use public::local_route;
use translations::translation_router;

/// Fallback for every path no route matches.
pub async fn handler_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse { error: "Route not found".to_string(), details: None }))
}

pub(crate) fn server_router(config: Arc<Config>) -> Router {
    let router = Router::new()
        .merge(local_route(config.clone()))
        .merge(language_router())
        .nest("/translations", translation_router(config))
        .fallback(handler_404)
        .layer(TraceLayer::new_for_http());
    with_cors(router)
}
