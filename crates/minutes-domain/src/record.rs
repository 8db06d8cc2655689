//! Meeting record module - the structured output of one extraction call

use crate::MeetingType;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Sentinel for an unresolved scalar field or topic owner
pub const UNSPECIFIED: &str = "未指定";

/// Sentinel for a topic without preparation items
pub const DEFAULT_PREPARATION: &str = "无";

/// Text of the topic injected when a meeting was described but no topic resolved
pub const PLACEHOLDER_TOPIC: &str = "会议主要议题";

/// Upper bound on the number of topics in a record
pub const MAX_TOPICS: usize = 10;

/// One discussion topic with its owner and preparation items
///
/// Serialized as `{topic, leader, preparation}` for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// The topic statement (non-empty)
    #[serde(rename = "topic")]
    pub text: String,

    /// Person responsible for the topic
    #[serde(rename = "leader")]
    pub owner: String,

    /// What the owner prepares before the meeting
    pub preparation: String,
}

impl Topic {
    /// Create a topic with owner and preparation at their sentinels
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            owner: UNSPECIFIED.to_string(),
            preparation: DEFAULT_PREPARATION.to_string(),
        }
    }

    /// Placeholder topic used when no topic could be resolved
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TOPIC)
    }

    /// Whether the owner is still the sentinel
    pub fn has_owner(&self) -> bool {
        self.owner != UNSPECIFIED
    }

    /// Whether the preparation is still the sentinel
    pub fn has_preparation(&self) -> bool {
        self.preparation != DEFAULT_PREPARATION
    }
}

/// Structured meeting record
///
/// Every field always holds a value; unresolved fields hold their sentinel.
/// A record is built fresh for each extraction call and never shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRecord {
    /// Meeting theme
    pub theme: String,

    /// Meeting host
    pub host: String,

    /// Meeting location
    pub location: String,

    /// Normalized attendee names joined with `，`
    pub attendees: String,

    /// Meeting duration as written
    pub duration: String,

    /// Coarse meeting category
    pub meeting_type: MeetingType,

    /// Ordered topics, at most [`MAX_TOPICS`]
    pub topics: Vec<Topic>,
}

impl Default for MeetingRecord {
    fn default() -> Self {
        Self {
            theme: UNSPECIFIED.to_string(),
            host: UNSPECIFIED.to_string(),
            location: UNSPECIFIED.to_string(),
            attendees: UNSPECIFIED.to_string(),
            duration: UNSPECIFIED.to_string(),
            meeting_type: MeetingType::General,
            topics: Vec::new(),
        }
    }
}

impl MeetingRecord {
    /// Scalar fields taking part in the confidence count, with their labels
    pub fn scalar_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("theme", &self.theme),
            ("host", &self.host),
            ("location", &self.location),
            ("attendees", &self.attendees),
            ("duration", &self.duration),
        ]
    }

    /// Count of theme/host/location/attendees/duration that are not the sentinel
    pub fn filled_scalar_count(&self) -> usize {
        self.scalar_fields()
            .iter()
            .filter(|(_, value)| !is_unspecified(value))
            .count()
    }

    /// Whether every field still holds its default
    pub fn is_all_default(&self) -> bool {
        *self == MeetingRecord::default()
    }

    /// Render the record in the labeled line format the model is asked to emit
    ///
    /// Extracting this text again yields the same scalar fields and topics.
    pub fn to_labeled_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "会议主题：{}", self.theme);
        let _ = writeln!(out, "主持人：{}", self.host);
        let _ = writeln!(out, "会议地点：{}", self.location);
        let _ = writeln!(out, "参会人员：{}", self.attendees);
        let _ = writeln!(out, "会议时长：{}", self.duration);
        for (idx, topic) in self.topics.iter().enumerate() {
            let _ = writeln!(out, "议题{}：{}", idx + 1, topic.text);
            let _ = writeln!(out, "负责人：{}", topic.owner);
            let _ = writeln!(out, "会前准备：{}", topic.preparation);
        }
        out
    }
}

/// Whether a scalar value is the unresolved sentinel (or blank)
pub fn is_unspecified(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == UNSPECIFIED
}
