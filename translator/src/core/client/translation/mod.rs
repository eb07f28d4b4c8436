pub mod aws_translate;
pub mod error;

use async_trait::async_trait;
pub use error::TranslationError;

/// Trait defining the machine translation provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationClient: Send + Sync {
    /// Translate one chunk of text. Chunks are sized by the caller to fit provider limits.
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError>;
}
