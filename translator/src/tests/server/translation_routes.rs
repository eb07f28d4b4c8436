use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use rstest::*;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use crate::core::client::queue::MockQueueClient;
use crate::core::client::storage::{MockStorageClient, StorageError};
use crate::server::route::server_router;
use crate::server::types::TranslationJobResponse;
use crate::tests::common::constants::{IDENTITY_HEADER, OTHER_OWNER_ID, OWNER_ID};
use crate::tests::common::{concurrent_write, pending_job};
use crate::tests::config::{TestConfigBuilder, TestConfigBuilderReturns};
use crate::types::jobs::job_item::TranslationJob;
use crate::types::jobs::types::JobStatus;

fn claims(owner_id: &str) -> String {
    json!({ "sub": owner_id }).to_string()
}

fn request(method: Method, uri: &str, owner_id: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri).header(header::CONTENT_TYPE, "application/json");
    if let Some(owner_id) = owner_id {
        builder = builder.header(IDENTITY_HEADER, claims(owner_id));
    }
    builder.body(body).unwrap()
}

async fn send(services: &TestConfigBuilderReturns, request: Request<Body>) -> Response {
    server_router(services.config.clone()).oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn create_body() -> Body {
    Body::from(
        json!({
            "fileName": "a.txt",
            "sourceLanguage": "en",
            "targetLanguage": "es",
            "fileContent": "Hello world"
        })
        .to_string(),
    )
}

#[rstest]
#[tokio::test]
async fn languages_lists_the_supported_set() {
    let services = TestConfigBuilder::new().build();

    let response = send(&services, request(Method::GET, "/languages", None, Body::empty())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let languages = json_body(response).await;
    let languages = languages.as_array().unwrap();
    assert_eq!(languages.len(), 15);
    assert!(languages.iter().any(|language| language["code"] == "es"));
}

#[rstest]
#[tokio::test]
async fn preflight_is_answered_on_any_path() {
    let services = TestConfigBuilder::new().build();

    let response = send(&services, request(Method::OPTIONS, "/translations/whatever", None, Body::empty())).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(response.headers()[header::ACCESS_CONTROL_MAX_AGE], "86400");
    assert_eq!(json_body(response).await["message"], "CORS preflight successful");
}

#[rstest]
#[tokio::test]
async fn unknown_route_is_not_found_with_cors_headers() {
    let services = TestConfigBuilder::new().build();

    let response = send(&services, request(Method::GET, "/nowhere", None, Body::empty())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(json_body(response).await["error"], "Route not found");
}

#[rstest]
#[tokio::test]
async fn create_answers_with_the_pending_job() {
    let services = TestConfigBuilder::new().build();

    let response = send(&services, request(Method::POST, "/translations", Some(OWNER_ID), create_body())).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS], "GET,POST,PUT,DELETE,OPTIONS,PATCH");
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let job: TranslationJobResponse = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(job.status, JobStatus::Pending);
    assert_eq!(job.user_id, OWNER_ID);
    assert_eq!(job.s3_input_key, format!("input/{}/{}/a.txt", OWNER_ID, job.id));
    assert_eq!(job.download_url, None);
    assert_eq!(services.database.get(job.id).unwrap().status, JobStatus::Pending);
    assert_eq!(services.queue.sent().len(), 1);
}

#[rstest]
#[tokio::test]
async fn create_without_identity_is_unauthorized() {
    let services = TestConfigBuilder::new().build();

    let response = send(&services, request(Method::POST, "/translations", None, create_body())).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(services.database.writes(), 0);
}

#[rstest]
#[case::not_json(Body::from("{not json"))]
#[case::empty(Body::empty())]
#[case::missing_fields(Body::from(json!({ "fileName": "a.txt" }).to_string()))]
#[tokio::test]
async fn invalid_body_is_a_bad_request(#[case] body: Body) {
    let services = TestConfigBuilder::new().build();

    let response = send(&services, request(Method::POST, "/translations", Some(OWNER_ID), body)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["error"].is_string());
    assert!(body["details"].is_string());
    assert_eq!(services.database.writes(), 0);
}

#[rstest]
#[tokio::test]
async fn list_is_scoped_to_the_caller() {
    let services = TestConfigBuilder::new().build();
    let own = pending_job(OWNER_ID, "mine");
    services.database.insert(own.clone());
    services.database.insert(pending_job(OTHER_OWNER_ID, "theirs"));

    let response = send(&services, request(Method::GET, "/translations", Some(OWNER_ID), Body::empty())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let jobs: Vec<TranslationJobResponse> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, own.id);
}

#[rstest]
#[tokio::test]
async fn list_without_identity_is_unauthorized() {
    let services = TestConfigBuilder::new().build();

    let response = send(&services, request(Method::GET, "/translations", None, Body::empty())).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[tokio::test]
async fn get_returns_completed_job_with_download_url(#[from(pending_job)] mut job: TranslationJob) {
    let services = TestConfigBuilder::new().build();
    concurrent_write(&mut job, JobStatus::Completed);
    job.output_location = Some(job.storage_path().output_key());
    job.translated_content = Some("[es]Hello world".to_string());
    services.database.insert(job.clone());

    let uri = format!("/translations/{}", job.id);
    let response = send(&services, request(Method::GET, &uri, Some(OWNER_ID), Body::empty())).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "completed");
    assert_eq!(body["translated_text"], "[es]Hello world");
    assert!(body["download_url"].as_str().unwrap().contains(&job.storage_path().output_key()));
}

#[rstest]
#[tokio::test]
async fn get_of_foreign_job_is_forbidden(#[from(pending_job)] job: TranslationJob) {
    let services = TestConfigBuilder::new().build();
    services.database.insert(job.clone());

    let uri = format!("/translations/{}", job.id);
    let response = send(&services, request(Method::GET, &uri, Some(OTHER_OWNER_ID), Body::empty())).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[rstest]
#[case::unknown_job(Uuid::new_v4().to_string())]
#[case::not_a_job_id("not-a-uuid".to_string())]
#[tokio::test]
async fn get_of_unknown_job_is_not_found(#[case] id: String) {
    let services = TestConfigBuilder::new().build();

    let uri = format!("/translations/{}", id);
    let response = send(&services, request(Method::GET, &uri, Some(OWNER_ID), Body::empty())).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn health_reports_up() {
    let services = TestConfigBuilder::new().build();

    let response = send(&services, request(Method::GET, "/health", None, Body::empty())).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["message"], "UP");
}

#[rstest]
#[tokio::test]
async fn health_reports_down_when_a_dependency_fails() {
    let mut storage = MockStorageClient::new();
    storage.expect_health_check().returning(|| Err(StorageError::InvalidBucketName("translator-input".to_string())));
    let mut queue = MockQueueClient::new();
    queue.expect_health_check().returning(|| Ok(()));
    let services =
        TestConfigBuilder::new().configure_storage(Box::new(storage)).configure_queue(Box::new(queue)).build();

    let response = send(&services, request(Method::GET, "/health", None, Body::empty())).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(response).await["message"], "DOWN");
}
