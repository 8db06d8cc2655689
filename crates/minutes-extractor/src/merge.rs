//! Dual-source merge

use minutes_domain::{is_unspecified, MeetingRecord, MeetingType, PLACEHOLDER_TOPIC};

fn merge_scalar(primary: &mut String, secondary: String) {
    if !is_unspecified(&secondary) {
        *primary = secondary;
    }
}

/// Combine a direct record with one extracted from model output
///
/// Field by field, a non-default secondary value overrides the primary one;
/// defaults never overwrite anything. Topics are replaced wholesale when the
/// secondary produced real topics, never unioned. A secondary made only of
/// the placeholder topic does not displace topics the primary found.
pub fn merge(primary: MeetingRecord, secondary: MeetingRecord) -> MeetingRecord {
    let mut merged = primary;

    merge_scalar(&mut merged.theme, secondary.theme);
    merge_scalar(&mut merged.host, secondary.host);
    merge_scalar(&mut merged.location, secondary.location);
    merge_scalar(&mut merged.attendees, secondary.attendees);
    merge_scalar(&mut merged.duration, secondary.duration);

    if secondary.meeting_type != MeetingType::General {
        merged.meeting_type = secondary.meeting_type;
    }

    let placeholder_only = secondary
        .topics
        .iter()
        .all(|topic| topic.text == PLACEHOLDER_TOPIC);
    if !secondary.topics.is_empty() && !(placeholder_only && !merged.topics.is_empty()) {
        merged.topics = secondary.topics;
    }

    merged
}
