//! Attendee list extraction and normalization
//!
//! The raw attendee span is split on list separators, and on `和` where it
//! joins two names. Connective particles are stripped, and the list is cut
//! at the first fragment that belongs to the next part of the sentence
//! (durations, topic lead-ins). Role nouns such as `负责人` do not end the
//! list, so `项目负责人张三` stays a name. Duplicates collapse by bare name
//! while keeping the most qualified spelling (`市场部的李明` beats `李明`).

use crate::cascade::{Field, Rule, RuleSet};
use minutes_domain::UNSPECIFIED;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Separator used when joining normalized names
pub const ATTENDEE_SEPARATOR: &str = "，";

/// Cascade locating the raw attendee span
pub static ATTENDEE_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        Field::Attendees,
        [
            Rule::new(r"参会人员[：:][ \t　]*([^。；;！？!?\n\r]+)", 1, Field::Attendees),
            Rule::new(
                r"(?:出席|参与|与会|参加)人员[：:][ \t　]*([^。；;！？!?\n\r]+)",
                1,
                Field::Attendees,
            ),
            Rule::new(r"参会者[：:][ \t　]*([^。；;！？!?\n\r]+)", 1, Field::Attendees),
            Rule::new(r"参加人员包括[ \t　]*([^。；;！？!?\n\r]+)", 1, Field::Attendees),
            Rule::new(
                r"参会人员(?:有|为|是|包括)[ \t　]*([^。；;！？!?\n\r]+)",
                1,
                Field::Attendees,
            ),
            Rule::new(
                r"(?:参会|参加|到场|参与|出席|与会)的(?:人员|人)?(?:有|是|为|包括)[ \t　]*([^。；;！？!?\n\r]+)",
                1,
                Field::Attendees,
            ),
            Rule::new(
                r"(?:参会|参加|出席|与会)(?:人员|人)(?:为|是|包括|有)[ \t　]*([^。；;！？!?\n\r]+)",
                1,
                Field::Attendees,
            ),
            Rule::new(
                r"邀请([^。；;：:！？!?\n\r]+?)(?:参加|参会|出席)",
                1,
                Field::Attendees,
            ),
        ],
    )
});

static SPLITTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[，,、/]|以及|还有").expect("splitter pattern is valid"));

static LEADING_PARTICLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:以及|还有|另外|包括|和|及|与|跟|也)").expect("leading particle pattern is valid")
});

static TRAILING_PARTICLE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:等人|等|一起|都|也)?(?:参加|参会|出席|到场)?(?:等人|等)?$")
        .expect("trailing particle pattern is valid")
});

static ROLE_TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"负责人|主持人|记录人").expect("role title pattern is valid"));

static ORG_QUALIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.{2,}?(?:部门|部|组|中心|处|科|室|团队|公司))(.{2,})$")
        .expect("qualifier pattern is valid")
});

/// Vocabulary that marks the end of the attendee list
const STOP_WORDS: &[&str] = &[
    "会议", "小时", "分钟", "议题", "讨论", "负责", "准备", "地点", "时间", "主持", "召开",
    "举行", "：", ":",
];

const CONNECTIVES: &[&str] = &["以及", "还有", "另外", "包括", "和", "及", "与", "跟", "也", "等", "等人"];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Attendee {
    display: String,
    bare: String,
}

impl Attendee {
    fn parse(display: &str) -> Self {
        let bare = match display.rfind('的') {
            Some(idx) if idx + '的'.len_utf8() < display.len() => {
                display[idx + '的'.len_utf8()..].to_string()
            }
            _ => match ORG_QUALIFIER.captures(display) {
                Some(caps) => caps[2].to_string(),
                None => display.to_string(),
            },
        };
        Self {
            display: display.to_string(),
            bare,
        }
    }

    fn is_qualified(&self) -> bool {
        self.display != self.bare
    }
}

/// Split a piece on each `和` that has at least two characters on both sides
///
/// Names such as `和平` or `王和` stay whole.
fn split_conjunction(piece: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut rest = piece.trim();
    while let Some((left, right)) = name_pair(rest) {
        parts.push(left);
        rest = right;
    }
    parts.push(rest);
    parts
}

fn name_pair(piece: &str) -> Option<(&str, &str)> {
    piece.match_indices('和').find_map(|(idx, conjunction)| {
        let left = piece[..idx].trim();
        let right = piece[idx + conjunction.len()..].trim();
        (left.chars().count() >= 2 && right.chars().count() >= 2).then_some((left, right))
    })
}

/// A strip that leaves a single character keeps the unstripped form
fn keep_name(before: &str, after: &str) -> String {
    if after.chars().count() == 1 {
        before.to_string()
    } else {
        after.to_string()
    }
}

fn strip_particles(piece: &str) -> String {
    let mut current = piece.trim().to_string();
    loop {
        let leading = keep_name(&current, LEADING_PARTICLE.replace(&current, "").trim());
        let trailing = keep_name(&leading, TRAILING_PARTICLE.replace(&leading, "").trim());
        if trailing == current {
            return current;
        }
        current = trailing;
    }
}

fn ends_list(piece: &str) -> bool {
    let piece = ROLE_TITLE.replace_all(piece, "");
    STOP_WORDS.iter().any(|word| piece.contains(word))
        || piece.chars().any(|c| c.is_ascii_digit())
}

/// Normalize a raw attendee span into an ordered, deduplicated name list
pub fn normalize(raw: &str) -> Vec<String> {
    let mut attendees: Vec<Attendee> = Vec::new();

    for piece in SPLITTER.split(raw).flat_map(split_conjunction) {
        if piece.is_empty() || CONNECTIVES.contains(&piece) {
            continue;
        }
        if ends_list(piece) {
            debug!("Attendee list ends at fragment: {}", piece);
            break;
        }

        let name = strip_particles(piece);
        if name.is_empty() {
            continue;
        }

        let candidate = Attendee::parse(&name);
        match attendees.iter().position(|a| a.bare == candidate.bare) {
            Some(idx) => {
                let existing = &attendees[idx];
                if existing.display == candidate.display {
                    continue;
                }
                match (existing.is_qualified(), candidate.is_qualified()) {
                    // The qualified spelling takes the bare one's slot
                    (false, true) => attendees[idx] = candidate,
                    (true, false) => {}
                    _ => attendees.push(candidate),
                }
            }
            None => attendees.push(candidate),
        }
    }

    attendees.into_iter().map(|a| a.display).collect()
}

/// Extract the attendee field from meeting text
///
/// Returns `未指定` when no attendee span is found or nothing survives
/// normalization.
pub fn extract_attendees(text: &str) -> String {
    let Some(found) = ATTENDEE_RULES.first_match(text) else {
        return UNSPECIFIED.to_string();
    };

    let names = normalize(found.value);
    if names.is_empty() {
        return UNSPECIFIED.to_string();
    }
    names.join(ATTENDEE_SEPARATOR)
}
