//! Error types for the Extractor

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during extraction
///
/// Field and topic extraction never fail; these errors cover the request
/// boundary (input validation) and the secondary model pass.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Input text is empty or whitespace only
    #[error("Meeting text is empty")]
    EmptyText,

    /// Text exceeds maximum length
    #[error("Text too long: {0} chars (max: {1})")]
    TextTooLong(usize, usize),

    /// Generative model error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Generative model call exceeded its time budget
    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
