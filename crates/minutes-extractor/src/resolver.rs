//! Owner and preparation lookup for one topic window

use crate::cascade::{Field, Rule, RuleSet};
use crate::segmenter::TopicSpan;
use minutes_domain::{is_unspecified, Topic};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static OWNER_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        Field::TopicOwner,
        [
            Rule::new(r"负责人[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::TopicOwner),
            Rule::new(
                r"由[ \t　]*([^，,。；;：:！？!?\n\r]+?)[ \t　]*(?:来)?(?:负责|牵头|主讲|汇报|主持|跟进)",
                1,
                Field::TopicOwner,
            ),
            Rule::new(
                r"([^，,。；;：:！？!?\n\r]+?)(?:你|您)?(?:来)?(?:负责|牵头|主讲|汇报|跟进)",
                1,
                Field::TopicOwner,
            ),
            Rule::new(
                r"(?:^|[，,])[ \t　]*([^，,。；;：:！？!?\n\r]{1,12}?)(?:你|您)?(?:需要|需|要|来)?(?:提前)?准备",
                1,
                Field::TopicOwner,
            ),
        ],
    )
});

static OWNER_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:由|请|让|交给|交由|需要|需)+").expect("owner prefix pattern is valid")
});

static OWNER_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:你|您)?(?:来)?(?:提前|会前|事先|预先)?(?:负责|牵头|主讲|汇报|跟进)?$")
        .expect("owner suffix pattern is valid")
});

/// Captures that sit where a name goes but never name one person
const NON_OWNERS: &[&str] = &[
    "提前", "会前", "事先", "预先", "大家", "各位", "所有人", "全体", "我们", "你们", "相关人员",
    "请", "需要",
];

static TRAILING_PUNCTUATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[，,。；;、：:！？!?.\s]+$").expect("punctuation pattern is valid")
});

/// Preparation rules for a known owner
///
/// The owner's exact name must precede the preparation verb.
fn preparation_rules(owner: &str) -> RuleSet {
    let owner = regex::escape(owner);
    RuleSet::new(
        Field::Preparation,
        [
            Rule::owned(
                format!(
                    r"{owner}[ \t　]*(?:你|您)?(?:来)?(?:需要|需|要|负责|会)?(?:提前)?准备(?:好)?[ \t　]*([^，,。；;！？!?\n\r]+)"
                ),
                1,
                Field::Preparation,
            ),
            Rule::owned(
                format!(
                    r"{owner}[^，,。；;！？!?\n\r]*?[，,][ \t　]*(?:并|还|也)?(?:需要|需|要)?(?:提前)?准备(?:好)?[ \t　]*([^，,。；;！？!?\n\r]+)"
                ),
                1,
                Field::Preparation,
            ),
            Rule::owned(
                format!(r"{owner}[\s\S]*?会前准备[：:][ \t　]*([^，,。；;！？!?\n\r]+)"),
                1,
                Field::Preparation,
            ),
        ],
    )
}

fn clean_owner(raw: &str) -> Option<String> {
    let stripped = OWNER_PREFIX.replace(raw.trim(), "");
    let stripped = OWNER_SUFFIX.replace(stripped.trim(), "");
    let owner = stripped.trim();
    if is_unspecified(owner) || NON_OWNERS.contains(&owner) {
        None
    } else {
        Some(owner.to_string())
    }
}

fn clean_preparation(raw: &str) -> Option<String> {
    let item = TRAILING_PUNCTUATION.replace(raw.trim(), "");
    let item = item.trim();
    if item.is_empty() {
        None
    } else {
        Some(item.to_string())
    }
}

/// Find the owner of a topic inside `tail`
pub fn find_owner(tail: &str) -> Option<String> {
    OWNER_RULES
        .first_match(tail)
        .and_then(|found| clean_owner(found.value))
}

/// Find the preparation items `owner` is asked for inside `tail`
pub fn find_preparation(tail: &str, owner: &str) -> Option<String> {
    preparation_rules(owner)
        .first_match(tail)
        .and_then(|found| clean_preparation(found.value))
}

/// Build a topic from its span
///
/// Owner and preparation are searched only in the part of the window after
/// the topic statement. Preparation is looked up only once an owner is known;
/// anything unresolved stays at its sentinel.
pub fn resolve(span: &TopicSpan, source: &str) -> Topic {
    let mut topic = Topic::new(span.text(source).trim());
    let tail = span.tail(source);

    if let Some(owner) = find_owner(tail) {
        if let Some(preparation) = find_preparation(tail, &owner) {
            topic.preparation = preparation;
        }
        topic.owner = owner;
    }

    debug!(
        "Topic {} resolved: owner={} preparation={}",
        span.ordinal, topic.owner, topic.preparation
    );
    topic
}
