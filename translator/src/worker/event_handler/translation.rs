use async_trait::async_trait;
use std::time::Instant;
use tracing::debug;

use crate::core::client::translation::{TranslationClient, TranslationError};
use crate::error::job::JobError;
use crate::utils::metrics::TRANSLATOR_METRICS;

/// Splits `text` into pieces of at most `chunk_size` characters, in order.
///
/// Boundaries fall on character (not byte) positions, so concatenating the
/// pieces always gives back `text`.
pub fn chunk_text(text: &str, chunk_size: usize) -> Vec<&str> {
    let chunk_size = chunk_size.max(1);
    let mut chunks = Vec::with_capacity(text.len() / chunk_size + 1);
    let mut start = 0;
    let mut count = 0;
    for (index, _) in text.char_indices() {
        if count == chunk_size {
            chunks.push(&text[start..index]);
            start = index;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        chunks.push(&text[start..]);
    }
    chunks
}

/// Translates plain text chunk by chunk, one call in flight at a time,
/// and reassembles the results in order with no separator.
pub async fn translate_text(
    client: &dyn TranslationClient,
    text: &str,
    source_language: &str,
    target_language: &str,
    chunk_size: usize,
) -> Result<String, TranslationError> {
    let start = Instant::now();
    let chunks = chunk_text(text, chunk_size);
    let mut translated = String::with_capacity(text.len());
    for (index, chunk) in chunks.iter().enumerate() {
        debug!(chunk = index, total = chunks.len(), "Translating chunk");
        translated.push_str(&client.translate(chunk, source_language, target_language).await?);
    }
    debug!(chunks = chunks.len(), duration_ms = start.elapsed().as_millis() as u64, "Text translated");
    Ok(translated)
}

/// Translation of documents that are not plain text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BinaryDocumentTranslator: Send + Sync {
    async fn translate(&self, data: &[u8], source_language: &str, target_language: &str) -> Result<String, JobError>;
}

/// Reports the document size instead of translating it.
///
/// TODO: replace with extract-translate-reassemble once a PDF text extractor is chosen.
pub struct PlaceholderBinaryTranslator;

#[async_trait]
impl BinaryDocumentTranslator for PlaceholderBinaryTranslator {
    async fn translate(&self, data: &[u8], _source_language: &str, _target_language: &str) -> Result<String, JobError> {
        Ok(format!("[PDF Translation Placeholder] Original content length: {} bytes", data.len()))
    }
}

pub(crate) fn record_translation_time(start: Instant) {
    TRANSLATOR_METRICS.jobs_response_time.record(start.elapsed().as_secs_f64(), &[]);
}
