use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::core::config::Config;
use crate::error::job::JobError;
use crate::server::error::{ApiServiceError, ApiServiceResult};
use crate::server::identity::owner_from_headers;
use crate::server::types::{CreateTranslationBody, TranslationJobResponse};
use crate::types::jobs::job_item::JobView;
use crate::worker::service::JobService;

fn caller(headers: &HeaderMap, config: &Config) -> Option<String> {
    owner_from_headers(headers, &config.server_config().identity_header)
}

/// Lists the caller's translation jobs, newest first.
///
/// # Errors
/// * `Unauthorized` - no caller identity
/// * `Ledger` - the job ledger could not be queried
#[instrument(skip_all)]
async fn handle_list_translations(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
) -> ApiServiceResult<Json<Vec<TranslationJobResponse>>> {
    let owner_id = caller(&headers, &config).ok_or(JobError::Unauthorized)?;
    let views = JobService::list_jobs(&owner_id, config.clone()).await?;
    Ok(Json(views.into_iter().map(TranslationJobResponse::from).collect()))
}

/// Accepts a document for translation and answers with the pending job.
///
/// The body is parsed by hand so that malformed JSON is reported like any other invalid input.
#[instrument(skip_all, fields(job_id = tracing::field::Empty))]
async fn handle_create_translation(
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiServiceResult<(StatusCode, Json<TranslationJobResponse>)> {
    let owner_id = caller(&headers, &config).ok_or(JobError::Unauthorized)?;
    let body: CreateTranslationBody =
        serde_json::from_slice(&body).map_err(|e| ApiServiceError::InvalidBody(e.to_string()))?;

    let job = JobService::create_job(body.into_request(Some(owner_id)), config.clone()).await?;
    tracing::Span::current().record("job_id", job.id.to_string().as_str());
    info!(status = %job.status, "Translation accepted");

    Ok((StatusCode::CREATED, Json(TranslationJobResponse::from(JobView { job, download_url: None }))))
}

/// Returns one of the caller's jobs, with a download reference once it is completed.
#[instrument(skip(config, headers), fields(job_id = %id))]
async fn handle_get_translation(
    Path(id): Path<String>,
    State(config): State<Arc<Config>>,
    headers: HeaderMap,
) -> ApiServiceResult<Json<TranslationJobResponse>> {
    let owner_id = caller(&headers, &config).ok_or(JobError::Unauthorized)?;
    let job_id = Uuid::parse_str(&id).map_err(|_| ApiServiceError::InvalidId(id.clone()))?;
    let view = JobService::get_owned_job(job_id, &owner_id, config.clone()).await?;
    Ok(Json(TranslationJobResponse::from(view)))
}

/// Routes under `/translations`.
pub(super) fn translation_router(config: Arc<Config>) -> Router {
    Router::new()
        .route("/", get(handle_list_translations).post(handle_create_translation))
        .route("/:id", get(handle_get_translation))
        .with_state(config)
}
