//! Result types for extraction

use minutes_domain::MeetingRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pipeline stage that emitted an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Meeting category chosen
    Classify,
    /// A scalar field cascade matched
    Field,
    /// Attendee list normalized
    Attendees,
    /// Topic segmentation finished
    Segment,
    /// One topic window resolved
    Topic,
    /// Confidence policy applied
    Confidence,
    /// Generative model pass
    Secondary,
    /// Primary and secondary records merged
    Merge,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Classify => "classify",
            Stage::Field => "field",
            Stage::Attendees => "attendees",
            Stage::Segment => "segment",
            Stage::Topic => "topic",
            Stage::Confidence => "confidence",
            Stage::Secondary => "secondary",
            Stage::Merge => "merge",
        };
        f.write_str(name)
    }
}

/// Diagnostic record of one pipeline decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageEvent {
    /// Stage that made the decision
    pub stage: Stage,
    /// Human-readable detail (rule index, strategy, window offsets)
    pub detail: String,
}

impl StageEvent {
    /// Create an event
    pub fn new(stage: Stage, detail: impl Into<String>) -> Self {
        Self {
            stage,
            detail: detail.into(),
        }
    }
}

/// Where the returned record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// Direct extraction was acceptable on its own
    Primary,
    /// Direct extraction merged with the model pass
    Merged,
    /// The model pass replaced direct extraction (document generation)
    Secondary,
    /// The model pass failed or was disabled; direct extraction returned as is
    PrimaryFallback,
}

/// Result of one extraction call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// The meeting record
    pub record: MeetingRecord,

    /// How the record was produced
    pub source: RecordSource,

    /// Text the record was extracted from (model output after a model pass)
    pub raw_text: String,

    /// Resolved scalar fields of the primary record
    pub filled_fields: usize,

    /// Topics resolved from the input text
    pub resolved_topics: usize,

    /// Model name used for the secondary pass, if one ran
    pub model_name: Option<String>,

    /// Why the secondary pass produced nothing
    pub secondary_error: Option<String>,

    /// Processing time in milliseconds
    pub processing_time_ms: u64,

    /// Pipeline decisions in order
    pub events: Vec<StageEvent>,
}
