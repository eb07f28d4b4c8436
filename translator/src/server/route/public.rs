use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use tracing::warn;

use crate::core::config::Config;
use crate::server::types::MessageResponse;

pub(super) fn local_route(config: Arc<Config>) -> Router {
    Router::new().route("/health", get(health_checker_handler)).with_state(config)
}

/// Reports `UP` when the ledger, the object store and the queue all answer.
async fn health_checker_handler(State(config): State<Arc<Config>>) -> (StatusCode, Json<MessageResponse>) {
    let checks = [
        ("database", config.database().health_check().await.map_err(|e| e.to_string())),
        ("storage", config.storage().health_check().await.map_err(|e| e.to_string())),
        ("queue", config.queue().health_check().await.map_err(|e| e.to_string())),
    ];

    let mut healthy = true;
    for (dependency, result) in checks.iter() {
        if let Err(e) = result {
            warn!(dependency, error = %e, "Health check failed");
            healthy = false;
        }
    }

    if healthy {
        (StatusCode::OK, Json(MessageResponse { message: "UP".to_string() }))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(MessageResponse { message: "DOWN".to_string() }))
    }
}
