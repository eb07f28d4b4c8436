use axum::routing::get;
use axum::{Json, Router};

use crate::types::languages::{Language, SUPPORTED_LANGUAGES};

/// The languages a document can be translated from and to.
async fn handle_list_languages() -> Json<&'static [Language]> {
    Json(SUPPORTED_LANGUAGES)
}

pub(super) fn language_router() -> Router {
    Router::new().route("/languages", get(handle_list_languages))
}
