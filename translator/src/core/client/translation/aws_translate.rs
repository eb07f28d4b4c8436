use std::time::Instant;

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_translate::Client;
use opentelemetry::KeyValue;
use tracing::debug;

use super::{TranslationClient, TranslationError};
use crate::utils::metrics::TRANSLATOR_METRICS;

/// Amazon Translate backed provider
#[derive(Clone, Debug)]
pub struct AWSTranslate {
    client: Client,
}

impl AWSTranslate {
    pub fn new(aws_config: &SdkConfig) -> Self {
        let translate_config_builder = aws_sdk_translate::config::Builder::from(aws_config);
        Self { client: Client::from_conf(translate_config_builder.build()) }
    }
}

#[async_trait]
impl TranslationClient for AWSTranslate {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        let start = Instant::now();
        let output = self
            .client
            .translate_text()
            .text(text)
            .source_language_code(source_language)
            .target_language_code(target_language)
            .send()
            .await?;

        debug!(source_language, target_language, chars = text.chars().count(), "Translated chunk");
        let attributes = [KeyValue::new("provider_operation_name", "translate_text")];
        TRANSLATOR_METRICS.provider_calls_response_time.record(start.elapsed().as_secs_f64(), &attributes);
        Ok(output.translated_text().to_string())
    }
}
