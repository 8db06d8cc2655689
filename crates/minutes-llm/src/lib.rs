//! Minutes LLM Provider Layer
//!
//! Generative-model collaborators for the secondary extraction pass.
//!
//! # Architecture
//!
//! This crate provides implementations of the `LlmProvider` trait from
//! `minutes-domain`. The extraction core treats every provider as a blocking
//! `text -> text` function with its own timeout.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//!
//! # Examples
//!
//! ```
//! use minutes_llm::MockProvider;
//! use minutes_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new("会议主题：季度复盘");
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, "会议主题：季度复盘");
//! ```

#![warn(missing_docs)]

pub mod ollama;

use minutes_domain::traits::LlmProvider as LlmProviderTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

pub use ollama::OllamaProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request exceeded its time budget
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Strip a chat preamble from model output
///
/// Models often echo part of the prompt or add a lead-in before the labeled
/// answer. Everything up to and including the first `---` marker is dropped;
/// output without a marker is only trimmed.
pub fn strip_preamble(output: &str) -> String {
    match output.find("---") {
        Some(idx) => output[idx + 3..].trim().to_string(),
        None => output.trim().to_string(),
    }
}

/// Mock LLM provider for deterministic testing
///
/// This provider returns pre-configured responses without making any network calls.
///
/// # Examples
///
/// ```
/// use minutes_llm::MockProvider;
/// use minutes_domain::traits::LlmProvider;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("any prompt").unwrap(), "Fixed response");
///
/// // Multiple responses
/// let mut provider = MockProvider::default();
/// provider.add_response("prompt1", "response1");
/// assert_eq!(provider.generate("prompt1").unwrap(), "response1");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, Option<String>>>>,
    call_count: Arc<Mutex<usize>>,
    fail_all: bool,
    delay: Option<Duration>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            fail_all: false,
            delay: None,
        }
    }

    /// Create a provider that fails every call
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Sleep for `delay` before answering (exercises caller timeouts)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&mut self, prompt: impl Into<String>, response: impl Into<String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(prompt.into(), Some(response.into()));
        }
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&mut self, prompt: impl Into<String>) {
        if let Ok(mut responses) = self.responses.lock() {
            responses.insert(prompt.into(), None);
        }
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.call_count.lock().map(|count| *count).unwrap_or(0)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        if let Ok(mut count) = self.call_count.lock() {
            *count = 0;
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        if let Ok(mut count) = self.call_count.lock() {
            *count += 1;
        }

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        if self.fail_all {
            return Err(LlmError::Other("Mock error".to_string()));
        }

        let responses = self
            .responses
            .lock()
            .map_err(|e| LlmError::Other(format!("Mock state poisoned: {}", e)))?;
        match responses.get(prompt) {
            Some(Some(response)) => Ok(response.clone()),
            Some(None) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
