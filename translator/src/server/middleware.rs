use axum::extract::Request;
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_CREDENTIALS, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{from_fn, Next};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tower_http::set_header::SetResponseHeaderLayer;

use super::types::MessageResponse;

const ALLOWED_HEADERS: &str = "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token,X-Amz-User-Agent";
const ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS,PATCH";
const MAX_AGE_SECS: &str = "86400";

/// Answers preflight requests on any path without reaching the routes.
async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return (StatusCode::OK, Json(MessageResponse { message: "CORS preflight successful".to_string() }))
            .into_response();
    }
    next.run(request).await
}

/// Wraps the router so every response, preflight and fallback included, carries the permissive CORS headers.
pub fn with_cors(router: Router) -> Router {
    router
        .layer(from_fn(preflight))
        .layer(SetResponseHeaderLayer::overriding(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")))
        .layer(SetResponseHeaderLayer::overriding(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOWED_HEADERS)))
        .layer(SetResponseHeaderLayer::overriding(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS)))
        .layer(SetResponseHeaderLayer::overriding(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static(MAX_AGE_SECS)))
        .layer(SetResponseHeaderLayer::overriding(ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true")))
}
