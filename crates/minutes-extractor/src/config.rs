//! Configuration for the Extractor

use crate::error::ExtractorError;
use minutes_domain::MAX_TOPICS;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Decides whether a direct extraction is good enough to skip the model pass
///
/// A record is acceptable when at least `min_filled_fields` of
/// theme/host/location/attendees/duration are resolved, or at least
/// `min_resolved_topics` topics were found in the text.
// TODO: calibrate both thresholds against a corpus of real meeting notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidencePolicy {
    /// Resolved scalar fields needed on their own
    pub min_filled_fields: usize,

    /// Resolved topics needed on their own
    pub min_resolved_topics: usize,
}

impl ConfidencePolicy {
    /// Apply the policy
    pub fn accepts(&self, filled_fields: usize, resolved_topics: usize) -> bool {
        filled_fields >= self.min_filled_fields || resolved_topics >= self.min_resolved_topics
    }
}

impl Default for ConfidencePolicy {
    fn default() -> Self {
        Self {
            min_filled_fields: 3,
            min_resolved_topics: 1,
        }
    }
}

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum time for the generative model call (seconds)
    pub llm_timeout_secs: u64,

    /// Maximum number of topics kept in a record
    pub max_topics: usize,

    /// Characters of the first topic used when no theme was stated
    pub theme_display_length: usize,

    /// Whether low-confidence records trigger the model pass
    pub secondary_pass: bool,

    /// Acceptance thresholds for direct extraction
    pub confidence: ConfidencePolicy,
}

impl ExtractorConfig {
    /// Get the model timeout as a Duration
    pub fn llm_timeout(&self) -> Duration {
        Duration::from_secs(self.llm_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ExtractorError> {
        if self.max_text_length == 0 {
            return Err(ExtractorError::Config(
                "max_text_length must be greater than 0".to_string(),
            ));
        }
        if self.max_topics == 0 || self.max_topics > MAX_TOPICS {
            return Err(ExtractorError::Config(format!(
                "max_topics must be between 1 and {}",
                MAX_TOPICS
            )));
        }
        if self.theme_display_length == 0 {
            return Err(ExtractorError::Config(
                "theme_display_length must be greater than 0".to_string(),
            ));
        }
        if self.secondary_pass && self.llm_timeout_secs == 0 {
            return Err(ExtractorError::Config(
                "llm_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Offline preset: direct extraction only, the model is never called
    pub fn offline() -> Self {
        Self {
            secondary_pass: false,
            ..Self::default()
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ExtractorError> {
        toml::to_string_pretty(self)
            .map_err(|e| ExtractorError::Config(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 20_000,
            llm_timeout_secs: 120,
            max_topics: MAX_TOPICS,
            theme_display_length: 50,
            secondary_pass: true,
            confidence: ConfidencePolicy::default(),
        }
    }
}
