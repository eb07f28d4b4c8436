use aws_sdk_translate::error::SdkError;
use aws_sdk_translate::operation::translate_text::TranslateTextError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Failed to translate text: {0}")]
    TranslateTextError(#[from] SdkError<TranslateTextError>),

    #[error("Translation provider error: {0}")]
    Other(String),
}
