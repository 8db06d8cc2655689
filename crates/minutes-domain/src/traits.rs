//! Trait definitions for external collaborators
//!
//! These traits define the boundaries between the extraction core and
//! infrastructure. Implementations live in other crates.

use crate::MeetingRecord;
use std::path::{Path, PathBuf};

/// Trait for generative model operations
///
/// Implemented by the infrastructure layer (minutes-llm). Calls block for a
/// bounded time; callers wrap them in their own timeout.
pub trait LlmProvider {
    /// Error type for model operations
    type Error;

    /// Generate a text completion for the prompt
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Name of the underlying model, for diagnostics
    fn model_name(&self) -> &str {
        "llm"
    }
}

/// Trait for turning a record into a document on disk
///
/// Implemented by the infrastructure layer (minutes-render). The core never
/// inspects the produced artifact.
pub trait DocumentRenderer {
    /// Error type for rendering
    type Error;

    /// Render `record` to `destination` and return the path actually written
    fn render(&self, record: &MeetingRecord, destination: &Path) -> Result<PathBuf, Self::Error>;

    /// File extension of produced documents (without the dot)
    fn extension(&self) -> &'static str;
}
