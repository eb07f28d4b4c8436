use assert_matches::assert_matches;
use chrono::Duration;
use rstest::*;
use uuid::Uuid;

use crate::core::client::database::{DatabaseError, MockDatabaseClient};
use crate::error::job::JobError;
use crate::tests::common::constants::{OTHER_OWNER_ID, OWNER_ID, SIGNED_URL_HOST};
use crate::tests::common::pending_job;
use crate::tests::config::TestConfigBuilder;
use crate::types::jobs::job_item::TranslationJob;
use crate::types::jobs::types::JobStatus;
use crate::worker::service::JobService;

fn completed(mut job: TranslationJob) -> TranslationJob {
    job.status = JobStatus::Completed;
    job.translated_content = Some("[es]Hello world".to_string());
    job.output_location = Some(job.storage_path().output_key());
    job.completed_at = Some(job.created_at);
    job
}

#[rstest]
#[tokio::test]
async fn list_returns_only_callers_jobs_newest_first() {
    let services = TestConfigBuilder::new().build();
    let mut older = pending_job(OWNER_ID, "first");
    older.created_at = older.created_at - Duration::minutes(5);
    let newer = pending_job(OWNER_ID, "second");
    let foreign = pending_job(OTHER_OWNER_ID, "not yours");
    for job in [older.clone(), newer.clone(), foreign.clone()] {
        services.database.insert(job);
    }

    let views = JobService::list_jobs(OWNER_ID, services.config.clone()).await.unwrap();

    let ids: Vec<Uuid> = views.iter().map(|view| view.job.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert!(!ids.contains(&foreign.id));
}

#[rstest]
#[tokio::test]
async fn only_completed_jobs_carry_a_download_url() {
    let services = TestConfigBuilder::new().build();
    let pending = pending_job(OWNER_ID, "pending");
    let done = completed(pending_job(OWNER_ID, "done"));
    services.database.insert(pending.clone());
    services.database.insert(done.clone());

    let views = JobService::list_jobs(OWNER_ID, services.config.clone()).await.unwrap();

    for view in views {
        if view.job.id == done.id {
            let url = view.download_url.expect("completed job should be signed");
            assert!(url.starts_with(&format!("https://{}/output/output/{}/{}/", SIGNED_URL_HOST, OWNER_ID, done.id)));
            assert!(url.ends_with("?expires=900"));
        } else {
            assert_eq!(view.download_url, None);
        }
    }
}

#[rstest]
#[tokio::test]
async fn signing_failure_degrades_to_no_url() {
    let services = TestConfigBuilder::new().build();
    let done = completed(pending_job(OWNER_ID, "done"));
    services.database.insert(done.clone());
    services.storage.fail_signing();

    let views = JobService::list_jobs(OWNER_ID, services.config.clone()).await.unwrap();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].download_url, None);

    let view = JobService::get_owned_job(done.id, OWNER_ID, services.config.clone()).await.unwrap();
    assert_eq!(view.job.status, JobStatus::Completed);
    assert_eq!(view.download_url, None);
}

#[rstest]
#[tokio::test]
async fn get_returns_owned_job(#[from(pending_job)] job: TranslationJob) {
    let services = TestConfigBuilder::new().build();
    services.database.insert(job.clone());

    let view = JobService::get_owned_job(job.id, OWNER_ID, services.config.clone()).await.unwrap();

    assert_eq!(view.job, job);
    assert_eq!(view.download_url, None);
}

#[rstest]
#[tokio::test]
async fn get_of_foreign_job_is_forbidden(#[from(pending_job)] job: TranslationJob) {
    let services = TestConfigBuilder::new().build();
    services.database.insert(job.clone());

    let result = JobService::get_owned_job(job.id, OTHER_OWNER_ID, services.config.clone()).await;

    assert_matches!(result, Err(JobError::Forbidden(id)) if id == job.id);
}

#[rstest]
#[tokio::test]
async fn get_of_unknown_job_is_not_found() {
    let services = TestConfigBuilder::new().build();
    let id = Uuid::new_v4();

    let result = JobService::get_owned_job(id, OWNER_ID, services.config.clone()).await;

    assert_matches!(result, Err(JobError::NotFound(missing)) if missing == id);
}

#[rstest]
#[tokio::test]
async fn ledger_failure_on_list_is_reported() {
    let mut database = MockDatabaseClient::new();
    database
        .expect_list_jobs_by_owner()
        .times(1)
        .withf(|owner_id| owner_id == OWNER_ID)
        .returning(|_| Err(DatabaseError::FailedToSerializeDocument("jobs".to_string())));
    let services = TestConfigBuilder::new().configure_database(Box::new(database)).build();

    let result = JobService::list_jobs(OWNER_ID, services.config.clone()).await;

    assert_matches!(result, Err(JobError::Ledger(DatabaseError::FailedToSerializeDocument(_))));
}
