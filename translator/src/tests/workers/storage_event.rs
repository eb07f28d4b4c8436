use assert_matches::assert_matches;
use rstest::*;
use uuid::Uuid;

use crate::core::client::storage::StorageBucket;
use crate::error::job::JobError;
use crate::tests::common::constants::{OTHER_OWNER_ID, OWNER_ID};
use crate::tests::common::{concurrent_write, create_request, pending_job};
use crate::tests::config::TestConfigBuilder;
use crate::types::jobs::job_item::TranslationJob;
use crate::types::jobs::requests::{CreateJobRequest, StorageEvent, WorkerInvocation};
use crate::types::jobs::types::JobStatus;
use crate::types::queue::QueueType;
use crate::worker::event_handler::service::JobHandlerService;
use crate::worker::service::JobService;

fn object_created(key: &str) -> StorageEvent {
    StorageEvent { bucket: "input".to_string(), key: key.to_string(), event_name: "ObjectCreated:Put".to_string() }
}

fn sent_invocations(queue: &crate::tests::common::RecordingQueue) -> Vec<WorkerInvocation> {
    queue
        .sent()
        .into_iter()
        .map(|(queue_type, payload)| {
            assert_eq!(queue_type, QueueType::TranslationJobProcessing);
            serde_json::from_str(&payload).unwrap()
        })
        .collect()
}

#[rstest]
#[tokio::test]
async fn stored_document_is_forwarded_to_the_pipeline(#[from(pending_job)] job: TranslationJob) {
    let services = TestConfigBuilder::new().build();
    services.database.insert(job.clone());
    services.storage.insert(StorageBucket::Input, &job.input_location, "Hello world", "text/plain");

    JobHandlerService::handle_storage_event(object_created(&job.input_location), services.config.clone())
        .await
        .unwrap();

    assert_eq!(services.database.get(job.id).unwrap().status, JobStatus::Processing);
    let invocations = sent_invocations(&services.queue);
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].job_id, job.id);
    assert_eq!(invocations[0].content, "Hello world");
    assert_eq!(invocations[0].owner_id, OWNER_ID);
}

#[rstest]
#[tokio::test]
async fn binary_object_is_forwarded_as_base64(#[from(pending_job)] mut job: TranslationJob) {
    let services = TestConfigBuilder::new().build();
    job.file_name = "scan.pdf".to_string();
    job.content_type = "application/pdf".to_string();
    job.input_location = job.storage_path().input_key();
    services.database.insert(job.clone());
    services.storage.insert(StorageBucket::Input, &job.input_location, &b"%PDF-1.4"[..], "application/pdf");

    JobHandlerService::handle_storage_event(object_created(&job.input_location), services.config.clone())
        .await
        .unwrap();

    let invocations = sent_invocations(&services.queue);
    assert_eq!(invocations.len(), 1);
    assert_eq!(invocations[0].content, "JVBERi0xLjQ=");
    assert_eq!(invocations[0].content_type.as_deref(), Some("application/pdf"));
}

#[rstest]
#[tokio::test]
async fn form_encoded_key_is_decoded(#[from(pending_job)] mut job: TranslationJob) {
    let services = TestConfigBuilder::new().build();
    job.file_name = "my notes.txt".to_string();
    job.input_location = job.storage_path().input_key();
    services.database.insert(job.clone());
    services.storage.insert(StorageBucket::Input, &job.input_location, "Hello world", "text/plain");
    let key = format!("input/{}/{}/my+notes.txt", OWNER_ID, job.id);

    JobHandlerService::handle_storage_event(object_created(&key), services.config.clone()).await.unwrap();

    assert_eq!(services.database.get(job.id).unwrap().status, JobStatus::Processing);
    assert_eq!(sent_invocations(&services.queue).len(), 1);
}

#[rstest]
#[case::not_a_job_id("input/u1/j1/doc.txt".to_string())]
#[case::unrecorded_job(format!("input/{}/{}/doc.txt", OWNER_ID, Uuid::new_v4()))]
#[tokio::test]
async fn unknown_job_is_ignored(#[case] key: String) {
    let services = TestConfigBuilder::new().build();

    let result = JobHandlerService::handle_storage_event(object_created(&key), services.config.clone()).await;

    assert_matches!(result, Ok(()));
    assert_eq!(services.database.writes(), 0);
    assert!(services.queue.sent().is_empty());
}

#[rstest]
#[case::outside_input("uploads/user-1/doc.txt")]
#[case::missing_file_name("input/user-1/only-job")]
#[case::empty_owner("input//job/doc.txt")]
#[tokio::test]
async fn malformed_key_is_rejected(#[case] key: &str) {
    let services = TestConfigBuilder::new().build();

    let result = JobHandlerService::handle_storage_event(object_created(key), services.config.clone()).await;

    assert_matches!(result, Err(JobError::MalformedStorageKey(_)));
    assert_eq!(services.database.writes(), 0);
    assert!(services.queue.sent().is_empty());
}

#[rstest]
#[tokio::test]
async fn object_under_foreign_owner_is_ignored(#[from(pending_job)] job: TranslationJob) {
    let services = TestConfigBuilder::new().build();
    services.database.insert(job.clone());
    let key = format!("input/{}/{}/a.txt", OTHER_OWNER_ID, job.id);
    services.storage.insert(StorageBucket::Input, &key, "Hello world", "text/plain");

    JobHandlerService::handle_storage_event(object_created(&key), services.config.clone()).await.unwrap();

    assert_eq!(services.database.get(job.id).unwrap(), job);
    assert!(services.queue.sent().is_empty());
}

#[rstest]
#[tokio::test]
async fn finished_job_is_ignored(#[from(pending_job)] mut job: TranslationJob) {
    let services = TestConfigBuilder::new().build();
    concurrent_write(&mut job, JobStatus::Completed);
    services.database.insert(job.clone());
    services.storage.insert(StorageBucket::Input, &job.input_location, "Hello world", "text/plain");

    JobHandlerService::handle_storage_event(object_created(&job.input_location), services.config.clone())
        .await
        .unwrap();

    assert_eq!(services.database.get(job.id).unwrap(), job);
    assert!(services.queue.sent().is_empty());
}

#[rstest]
#[tokio::test]
async fn events_other_than_object_created_are_ignored(#[from(pending_job)] job: TranslationJob) {
    let services = TestConfigBuilder::new().build();
    services.database.insert(job.clone());
    let mut event = object_created(&job.input_location);
    event.event_name = "ObjectRemoved:Delete".to_string();

    JobHandlerService::handle_storage_event(event, services.config.clone()).await.unwrap();

    assert_eq!(services.database.writes(), 0);
    assert!(services.queue.sent().is_empty());
}

#[rstest]
#[tokio::test]
async fn unreadable_object_marks_job_failed(#[from(pending_job)] job: TranslationJob) {
    let services = TestConfigBuilder::new().build();
    services.database.insert(job.clone());

    let result =
        JobHandlerService::handle_storage_event(object_created(&job.input_location), services.config.clone()).await;

    assert_matches!(result, Err(JobError::StorageRead(_)));
    assert_eq!(services.database.get(job.id).unwrap().status, JobStatus::Failed);
    assert!(services.queue.sent().is_empty());
}

/// Runs both deliveries an HTTP submission produces: the direct dispatch and the
/// bucket notification for the object it stored.
async fn submit_and_deliver_twice(
    services: &crate::tests::config::TestConfigBuilderReturns,
    request: CreateJobRequest,
) -> (TranslationJob, Vec<WorkerInvocation>) {
    let job = JobService::create_job(request, services.config.clone()).await.unwrap();
    JobHandlerService::handle_storage_event(object_created(&job.input_location), services.config.clone())
        .await
        .unwrap();

    let invocations = sent_invocations(&services.queue);
    assert_eq!(invocations.len(), 2);
    for invocation in invocations.iter() {
        JobHandlerService::process_invocation(invocation.clone(), services.config.clone()).await.unwrap();
    }
    (services.database.get(job.id).unwrap(), invocations)
}

#[rstest]
#[case::text_named_like_a_pdf("notes.pdf", "Hello world", None, "[es]Hello world")]
#[case::pdf_named_like_text(
    "a.txt",
    "JVBERv/+",
    Some("application/pdf"),
    "[PDF Translation Placeholder] Original content length: 6 bytes"
)]
#[tokio::test]
async fn recorded_content_type_wins_over_the_file_extension(
    mut create_request: CreateJobRequest,
    #[case] file_name: &str,
    #[case] content: &str,
    #[case] content_type: Option<&str>,
    #[case] expected: &str,
) {
    let services = TestConfigBuilder::new().build();
    create_request.file_name = Some(file_name.to_string());
    create_request.content = Some(content.to_string());
    create_request.content_type = content_type.map(str::to_string);

    let (stored, invocations) = submit_and_deliver_twice(&services, create_request).await;

    assert_eq!(invocations[0], invocations[1]);
    assert_eq!(invocations[1].content, content);
    assert_eq!(stored.status, JobStatus::Completed);
    assert_eq!(stored.translated_content.as_deref(), Some(expected));
}

#[rstest]
#[tokio::test]
async fn double_delivery_ends_like_a_single_one(create_request: CreateJobRequest) {
    let single = TestConfigBuilder::new().build();
    let job = JobService::create_job(create_request.clone(), single.config.clone()).await.unwrap();
    let invocation = sent_invocations(&single.queue).remove(0);
    JobHandlerService::process_invocation(invocation, single.config.clone()).await.unwrap();
    let expected = single.database.get(job.id).unwrap();

    let services = TestConfigBuilder::new().build();
    let (stored, _) = submit_and_deliver_twice(&services, create_request).await;

    assert_eq!(stored.status, JobStatus::Completed);
    assert_eq!(stored.translated_content, expected.translated_content);
    assert_eq!(stored.output_location.is_some(), expected.output_location.is_some());
    assert_eq!(services.translator.calls(), single.translator.calls());
    let output = stored.output_location.unwrap();
    assert_eq!(services.storage.object(StorageBucket::Output, &output).unwrap(), "[es]Hello world");
}
