//! Ordered pattern cascades
//!
//! A cascade is a priority-ordered list of regex rules for one semantic field.
//! Evaluation stops at the first rule that matches; the rule's designated
//! capture group, trimmed, becomes the value. A rule whose pattern does not
//! compile is logged once and stays inert, so one bad rule never takes the
//! rest of the list down with it.

use regex::Regex;
use std::borrow::Cow;
use std::fmt;
use tracing::{debug, warn};

/// Semantic field a rule extracts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Meeting theme
    Theme,
    /// Meeting host
    Host,
    /// Meeting location
    Location,
    /// Raw attendee list
    Attendees,
    /// Meeting duration
    Duration,
    /// Owner of one topic
    TopicOwner,
    /// Preparation items of one topic
    Preparation,
}

impl Field {
    /// Stable name used in logs and stage events
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Theme => "theme",
            Field::Host => "host",
            Field::Location => "location",
            Field::Attendees => "attendees",
            Field::Duration => "duration",
            Field::TopicOwner => "topic_owner",
            Field::Preparation => "preparation",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(pattern, capture index, field)` entry of a cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Regex source
    pub pattern: Cow<'static, str>,
    /// Capture group holding the value
    pub group: usize,
    /// Field this rule extracts
    pub field: Field,
}

impl Rule {
    /// Rule from a static pattern
    pub const fn new(pattern: &'static str, group: usize, field: Field) -> Self {
        Self {
            pattern: Cow::Borrowed(pattern),
            group,
            field,
        }
    }

    /// Rule from a pattern built at runtime
    pub fn owned(pattern: String, group: usize, field: Field) -> Self {
        Self {
            pattern: Cow::Owned(pattern),
            group,
            field,
        }
    }
}

#[derive(Debug)]
struct CompiledRule {
    rule: Rule,
    regex: Option<Regex>,
}

/// A value produced by a cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeMatch<'t> {
    /// Position of the winning rule in the cascade
    pub rule_index: usize,
    /// Trimmed capture
    pub value: &'t str,
    /// Byte offset of the capture in the haystack
    pub start: usize,
    /// Byte offset just past the capture
    pub end: usize,
}

/// Compiled, ordered rules for one field
#[derive(Debug)]
pub struct RuleSet {
    field: Field,
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile a cascade; rules that fail to compile become inert
    pub fn new(field: Field, rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut set = Self {
            field,
            rules: Vec::new(),
        };
        set.extend(rules);
        set
    }

    /// Append rules after the existing ones
    pub fn extend(&mut self, rules: impl IntoIterator<Item = Rule>) {
        for rule in rules {
            let regex = match Regex::new(&rule.pattern) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    warn!(
                        "Skipping {} rule #{} ({}): {}",
                        self.field,
                        self.rules.len(),
                        rule.pattern,
                        e
                    );
                    None
                }
            };
            self.rules.push(CompiledRule { rule, regex });
        }
    }

    /// Field this cascade extracts
    pub fn field(&self) -> Field {
        self.field
    }

    /// Number of rules, inert ones included
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the cascade has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of rules that failed to compile
    pub fn inert_count(&self) -> usize {
        self.rules.iter().filter(|r| r.regex.is_none()).count()
    }

    /// Rule at `index`
    pub fn rule(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index).map(|r| &r.rule)
    }

    /// Evaluate rules in order and return the first non-empty capture
    ///
    /// A rule whose capture group did not participate, or whose capture is
    /// blank after trimming, counts as not matching.
    pub fn first_match<'t>(&self, text: &'t str) -> Option<CascadeMatch<'t>> {
        for (rule_index, compiled) in self.rules.iter().enumerate() {
            let Some(regex) = &compiled.regex else {
                continue;
            };
            let Some(caps) = regex.captures(text) else {
                continue;
            };
            let Some(group) = caps.get(compiled.rule.group) else {
                continue;
            };

            let raw = group.as_str();
            let value = raw.trim();
            if value.is_empty() {
                continue;
            }

            let start = group.start() + (raw.len() - raw.trim_start().len());
            debug!("{} matched by rule #{}: {}", self.field, rule_index, value);
            return Some(CascadeMatch {
                rule_index,
                value,
                start,
                end: start + value.len(),
            });
        }
        None
    }
}
