use once_cell::sync::Lazy;
use opentelemetry::global;
use opentelemetry::metrics::{Counter, Histogram, Meter};

pub static TRANSLATOR_METRICS: Lazy<TranslatorMetrics> = Lazy::new(TranslatorMetrics::register);

/// Instruments recorded across the job lifecycle. Without an installed meter provider they are no-ops.
pub struct TranslatorMetrics {
    pub jobs_created: Counter<u64>,
    pub jobs_completed: Counter<u64>,
    pub jobs_failed: Counter<u64>,
    pub dispatch_failures: Counter<u64>,
    pub jobs_response_time: Histogram<f64>,
    pub db_calls_response_time: Histogram<f64>,
    pub storage_calls_response_time: Histogram<f64>,
    pub provider_calls_response_time: Histogram<f64>,
}

impl TranslatorMetrics {
    pub fn register() -> Self {
        let meter: Meter = global::meter("crates.translator.opentelemetry");

        let jobs_created = meter
            .u64_counter("jobs_created")
            .with_description("Count of translation jobs accepted by the ingress adapter")
            .with_unit("jobs")
            .build();

        let jobs_completed = meter
            .u64_counter("jobs_completed")
            .with_description("Count of translation jobs that reached completed")
            .with_unit("jobs")
            .build();

        let jobs_failed = meter
            .u64_counter("jobs_failed")
            .with_description("Count of translation jobs that reached failed")
            .with_unit("jobs")
            .build();

        let dispatch_failures = meter
            .u64_counter("dispatch_failures")
            .with_description("Count of worker invocations that could not be enqueued")
            .with_unit("jobs")
            .build();

        let jobs_response_time = meter
            .f64_histogram("jobs_response_time")
            .with_description("Time from the worker picking up a job to its terminal state")
            .with_unit("s")
            .build();

        let db_calls_response_time = meter
            .f64_histogram("db_calls_response_time")
            .with_description("Response time of DB calls over time")
            .with_unit("s")
            .build();

        let storage_calls_response_time = meter
            .f64_histogram("storage_calls_response_time")
            .with_description("Response time of object storage calls over time")
            .with_unit("s")
            .build();

        let provider_calls_response_time = meter
            .f64_histogram("provider_calls_response_time")
            .with_description("Response time of translation provider calls over time")
            .with_unit("s")
            .build();

        Self {
            jobs_created,
            jobs_completed,
            jobs_failed,
            dispatch_failures,
            jobs_response_time,
            db_calls_response_time,
            storage_calls_response_time,
            provider_calls_response_time,
        }
    }
}
