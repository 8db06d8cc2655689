//! Direct (rule-based) extraction of one meeting record
//!
//! Runs classification, the scalar field cascades, attendee normalization,
//! topic segmentation and per-topic resolution, then applies the theme
//! fallbacks and the placeholder rule. Never fails: anything unresolved stays
//! at its sentinel.

use crate::attendees::extract_attendees;
use crate::cascade::RuleSet;
use crate::classifier::classify;
use crate::config::{ConfidencePolicy, ExtractorConfig};
use crate::patterns::{theme_rules, DURATION_RULES, HOST_RULES, LOCATION_RULES};
use crate::resolver::resolve;
use crate::segmenter::segment;
use crate::types::{Stage, StageEvent};
use minutes_domain::{is_unspecified, MeetingRecord, Topic, UNSPECIFIED};
use tracing::debug;

/// Direct extraction result with the counts the confidence policy needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionOutcome {
    /// Extracted record
    pub record: MeetingRecord,

    /// Topics found in the text (the placeholder never counts)
    pub resolved_topics: usize,

    /// Decisions in pipeline order
    pub events: Vec<StageEvent>,
}

impl ExtractionOutcome {
    /// Resolved theme/host/location/attendees/duration
    pub fn filled_fields(&self) -> usize {
        self.record.filled_scalar_count()
    }

    /// Whether the record is good enough without a model pass
    pub fn is_acceptable(&self, policy: &ConfidencePolicy) -> bool {
        policy.accepts(self.filled_fields(), self.resolved_topics)
    }
}

fn cascade_field(rules: &RuleSet, text: &str, events: &mut Vec<StageEvent>) -> String {
    match rules.first_match(text) {
        Some(found) => {
            events.push(StageEvent::new(
                Stage::Field,
                format!("{} <- rule #{}", rules.field(), found.rule_index),
            ));
            found.value.to_string()
        }
        None => UNSPECIFIED.to_string(),
    }
}

/// First `limit` characters of `text`
fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Extract a meeting record from free text
pub fn extract(text: &str, config: &ExtractorConfig) -> ExtractionOutcome {
    let mut events = Vec::new();
    let mut record = MeetingRecord::default();

    if text.trim().is_empty() {
        return ExtractionOutcome {
            record,
            resolved_topics: 0,
            events,
        };
    }

    let kind = classify(text);
    record.meeting_type = kind;
    events.push(StageEvent::new(Stage::Classify, kind.label()));

    record.theme = cascade_field(theme_rules(kind), text, &mut events);
    record.host = cascade_field(&HOST_RULES, text, &mut events);
    record.location = cascade_field(&LOCATION_RULES, text, &mut events);
    record.duration = cascade_field(&DURATION_RULES, text, &mut events);

    record.attendees = extract_attendees(text);
    events.push(StageEvent::new(Stage::Attendees, record.attendees.clone()));

    let segmentation = segment(text, kind, config.max_topics);
    events.push(StageEvent::new(
        Stage::Segment,
        match segmentation.strategy {
            Some(strategy) => format!("{} ({} topics)", strategy.as_str(), segmentation.spans.len()),
            None => "no topics".to_string(),
        },
    ));

    let topics: Vec<Topic> = segmentation
        .spans
        .iter()
        .map(|span| {
            events.push(StageEvent::new(
                Stage::Topic,
                format!(
                    "#{} window {}..{}",
                    span.ordinal, span.marker_start, span.window_end
                ),
            ));
            resolve(span, text)
        })
        .collect();
    let resolved_topics = topics.len();
    record.topics = topics;

    if is_unspecified(&record.theme) {
        if let Some(first) = record.topics.first() {
            record.theme = truncate_chars(&first.text, config.theme_display_length);
        } else if let Some(theme) = kind.generic_theme() {
            record.theme = theme.to_string();
        }
    }

    if resolved_topics == 0 && record.filled_scalar_count() > 0 {
        record.topics.push(Topic::placeholder());
    }

    let outcome = ExtractionOutcome {
        record,
        resolved_topics,
        events,
    };
    debug!(
        "Direct extraction: {} fields, {} topics",
        outcome.filled_fields(),
        outcome.resolved_topics
    );
    outcome
}
