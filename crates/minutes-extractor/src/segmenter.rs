//! Topic segmentation
//!
//! Topics are located by sequential ordinal markers. Three strategies are
//! tried in order and the first one that yields at least one topic wins:
//!
//! 1. **Enumerated**: an intro such as `主要讨论三个议题：` announces a count;
//!    markers of either kind are searched after the intro, up to that count.
//!    If fewer topics turn up than announced, the other strategies run too
//!    and the one with the most topics wins.
//! 2. **Numeric**: `议题1：`, `第1项`, `1、` / `1.` / `1是` across the text.
//! 3. **Ordinal**: `议题一：`, `第一个议题是`, `一是` / `一、` across the text.
//!
//! Markers are searched with a cursor that only moves forward, so numeral
//! k+1 is always found after topic k, and the search stops at the first
//! numeral with no marker. Each topic owns a window from its marker to the
//! next marker or sentence boundary; owner and preparation lookups never
//! leave that window.

use minutes_domain::{MeetingType, MAX_TOPICS};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Chinese ordinal words, index 0 is `一`
pub const CHINESE_ORDINALS: [&str; MAX_TOPICS] =
    ["一", "二", "三", "四", "五", "六", "七", "八", "九", "十"];

/// Topic statement: one clause
const TOPIC: &str = r"[^，,；;。！？!?\n\r]+";

static INTRO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:会议主要说|主要讨论|主要有|共讨论|共有|讨论|包括)(?P<n>[一二两三四五六七八九十几0-9]+)[ \t　]*(?:个|项|件|点|条)[^，,：:。；;！？!?\n\r]*?[：:，,]",
    )
    .expect("intro pattern is valid")
});

static WINDOW_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[。！？!?]|\n[ \t　]*\n").expect("window end pattern is valid")
});

/// How the topics of a text were found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Count announced by an intro phrase
    Enumerated,
    /// Arabic numerals
    Numeric,
    /// Chinese ordinal words
    Ordinal,
}

impl Strategy {
    /// Stable name used in stage events
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Enumerated => "enumerated",
            Strategy::Numeric => "numeric",
            Strategy::Ordinal => "ordinal",
        }
    }
}

/// Byte offsets of one topic in the source text
///
/// `marker_start <= text_start < text_end <= window_end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicSpan {
    /// 1-based position in the sequence
    pub ordinal: usize,
    /// Start of the ordinal marker
    pub marker_start: usize,
    /// Start of the topic statement
    pub text_start: usize,
    /// End of the topic statement
    pub text_end: usize,
    /// End of the topic's window
    pub window_end: usize,
}

impl TopicSpan {
    /// The topic statement
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.text_start..self.text_end]
    }

    /// Marker, statement and everything up to the window end
    pub fn window<'a>(&self, source: &'a str) -> &'a str {
        &source[self.marker_start..self.window_end]
    }

    /// The part of the window after the statement
    pub fn tail<'a>(&self, source: &'a str) -> &'a str {
        &source[self.text_end..self.window_end]
    }
}

/// Result of segmenting one text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    /// Strategy that produced the spans (`None` when nothing was found)
    pub strategy: Option<Strategy>,
    /// Topic spans in text order
    pub spans: Vec<TopicSpan>,
}

/// Marker patterns for an Arabic numeral token
fn numeric_marker_patterns(n: &str) -> Vec<String> {
    vec![
        format!(r"(?P<m>议题[ \t　]*{n})[ \t　]*[、.．。:：][ \t　]*(?P<t>{TOPIC})"),
        format!(
            r"(?P<m>第[ \t　]*{n}[ \t　]*(?:项|个|点|条)(?:议题)?)[ \t　]*(?:是|[：:、，,])[ \t　]*(?P<t>{TOPIC})"
        ),
        format!(
            r"(?:^|[^0-9.．])(?P<m>{n})[ \t　]*(?:[、.．]|是)[ \t　]*(?P<t>[^0-9\s，,；;。！？!?][^，,；;。！？!?\n\r]*)"
        ),
    ]
}

/// Marker patterns for a Chinese ordinal token
fn ordinal_marker_patterns(cn: &str) -> Vec<String> {
    vec![
        format!(r"(?P<m>议题[ \t　]*{cn})[ \t　]*[、.．。:：][ \t　]*(?P<t>{TOPIC})"),
        format!(
            r"(?P<m>第{cn}(?:项|个|点|条)?(?:议题)?)[ \t　]*(?:是|[：:、，,])[ \t　]*(?P<t>{TOPIC})"
        ),
        format!(
            r"(?:^|[^一二三四五六七八九十第])(?P<m>{cn})[ \t　]*(?:[、.．]|是)[ \t　]*(?P<t>{TOPIC})"
        ),
    ]
}

/// Extra marker patterns for one meeting category and ordinal token
///
/// Tried after the generic forms, for both numerals and ordinal words.
pub fn category_marker_patterns(kind: MeetingType, token: &str) -> Vec<String> {
    let prefixes = match kind {
        MeetingType::General => return Vec::new(),
        MeetingType::Technical => "技术问题|问题",
        MeetingType::Business => "合作事项|商务议题",
        MeetingType::Project => "里程碑|任务",
        MeetingType::Team => "分享|事项",
    };
    vec![format!(
        r"(?P<m>(?:{prefixes})[ \t　]*{token})[ \t　]*(?:是|[：:、.．])[ \t　]*(?P<t>{TOPIC})"
    )]
}

fn compile_forms(patterns: Vec<String>) -> Vec<Regex> {
    patterns
        .into_iter()
        .filter_map(|pattern| match Regex::new(&pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!("Skipping topic marker ({}): {}", pattern, e);
                None
            }
        })
        .collect()
}

/// Compiled marker forms, indexed by ordinal - 1
struct MarkerForms {
    numeric: Vec<Vec<Regex>>,
    ordinal: Vec<Vec<Regex>>,
}

impl MarkerForms {
    fn build(
        numeric: impl Fn(&str) -> Vec<String>,
        ordinal: impl Fn(&str) -> Vec<String>,
    ) -> Self {
        Self {
            numeric: (1..=MAX_TOPICS)
                .map(|k| compile_forms(numeric(&k.to_string())))
                .collect(),
            ordinal: CHINESE_ORDINALS
                .iter()
                .map(|cn| compile_forms(ordinal(cn)))
                .collect(),
        }
    }

    fn forms(&self, ordinal: usize, numeric: bool) -> &[Regex] {
        let table = if numeric { &self.numeric } else { &self.ordinal };
        table.get(ordinal - 1).map(Vec::as_slice).unwrap_or(&[])
    }
}

static GENERIC_FORMS: Lazy<MarkerForms> =
    Lazy::new(|| MarkerForms::build(numeric_marker_patterns, ordinal_marker_patterns));

static CATEGORY_FORMS: Lazy<HashMap<MeetingType, MarkerForms>> = Lazy::new(|| {
    MeetingType::PRIORITY
        .into_iter()
        .map(|kind| {
            (
                kind,
                MarkerForms::build(
                    |token| category_marker_patterns(kind, token),
                    |token| category_marker_patterns(kind, token),
                ),
            )
        })
        .collect()
});

/// Parse an announced topic count (`三`, `两`, `3`, `几`)
fn parse_count(token: &str, max_topics: usize) -> usize {
    if let Ok(n) = token.parse::<usize>() {
        return n.min(max_topics);
    }
    let n = match token {
        "两" => 2,
        _ => CHINESE_ORDINALS
            .iter()
            .position(|cn| *cn == token)
            .map(|idx| idx + 1)
            .unwrap_or(max_topics),
    };
    n.min(max_topics)
}

struct Segmenter<'a> {
    text: &'a str,
    kind: MeetingType,
}

impl<'a> Segmenter<'a> {
    /// Try each form for `ordinal` from `cursor`, first matching form wins
    fn find(
        &self,
        cursor: usize,
        ordinal: usize,
        numeric: bool,
    ) -> Option<(usize, usize, usize)> {
        let category = CATEGORY_FORMS
            .get(&self.kind)
            .map(|forms| forms.forms(ordinal, numeric))
            .unwrap_or(&[]);

        for form in GENERIC_FORMS.forms(ordinal, numeric).iter().chain(category) {
            let Some(caps) = form.captures_at(self.text, cursor) else {
                continue;
            };
            let (Some(marker), Some(topic)) = (caps.name("m"), caps.name("t")) else {
                continue;
            };
            let raw = topic.as_str();
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let text_start = topic.start() + (raw.len() - raw.trim_start().len());
            return Some((marker.start(), text_start, text_start + trimmed.len()));
        }
        None
    }

    /// Walk ordinals 1..=count from `start`, stopping at the first gap
    ///
    /// With both marker kinds allowed, the earliest marker wins.
    fn walk(&self, start: usize, count: usize, numeric: &[bool]) -> Vec<(usize, usize, usize)> {
        let mut cursor = start;
        let mut found = Vec::new();

        for ordinal in 1..=count {
            let hit = numeric
                .iter()
                .filter_map(|is_numeric| self.find(cursor, ordinal, *is_numeric))
                .min_by_key(|hit| hit.0);
            let Some(hit) = hit else {
                break;
            };
            cursor = hit.2;
            found.push(hit);
        }
        found
    }

    /// Topics after an intro, with the count the intro announced
    fn enumerated(&self, max_topics: usize) -> (Vec<(usize, usize, usize)>, usize) {
        let Some(caps) = INTRO.captures(self.text) else {
            return (Vec::new(), 0);
        };
        let (Some(intro), Some(count)) = (caps.get(0), caps.name("n")) else {
            return (Vec::new(), 0);
        };

        let count = parse_count(count.as_str(), max_topics);
        debug!("Topic intro announces {} topics from byte {}", count, intro.end());

        (self.walk(intro.end(), count, &[false, true]), count)
    }

    fn numeric(&self, max_topics: usize) -> Vec<(usize, usize, usize)> {
        self.walk(0, max_topics, &[true])
    }

    fn ordinal(&self, max_topics: usize) -> Vec<(usize, usize, usize)> {
        self.walk(0, max_topics, &[false])
    }

    fn into_spans(&self, hits: Vec<(usize, usize, usize)>) -> Vec<TopicSpan> {
        let mut spans = Vec::with_capacity(hits.len());
        for (idx, &(marker_start, text_start, text_end)) in hits.iter().enumerate() {
            let next_marker = hits
                .get(idx + 1)
                .map(|next| next.0)
                .unwrap_or(self.text.len());
            let boundary = WINDOW_END
                .find_at(self.text, text_end)
                .map(|m| m.start())
                .unwrap_or(self.text.len());

            spans.push(TopicSpan {
                ordinal: idx + 1,
                marker_start,
                text_start,
                text_end,
                window_end: next_marker.min(boundary).max(text_end),
            });
        }
        spans
    }
}

/// Split `text` into topic spans
///
/// At most `max_topics` (capped at [`MAX_TOPICS`]) spans are returned.
pub fn segment(text: &str, kind: MeetingType, max_topics: usize) -> Segmentation {
    let max_topics = max_topics.clamp(1, MAX_TOPICS);
    let segmenter = Segmenter { text, kind };
    let mut best: Option<(Strategy, Vec<(usize, usize, usize)>)> = None;
    // Set once an intro announced more topics than its markers delivered
    let mut shortfall: Option<usize> = None;

    for strategy in [Strategy::Enumerated, Strategy::Numeric, Strategy::Ordinal] {
        let (mut hits, announced) = match strategy {
            Strategy::Enumerated => segmenter.enumerated(max_topics),
            Strategy::Numeric => (segmenter.numeric(max_topics), 0),
            Strategy::Ordinal => (segmenter.ordinal(max_topics), 0),
        };
        if hits.is_empty() {
            continue;
        }
        if let Some(announced) = shortfall {
            hits.truncate(announced);
        }
        debug!("{} strategy found {} topics", strategy.as_str(), hits.len());

        let found = hits.len();
        if best.as_ref().map_or(true, |(_, kept)| found > kept.len()) {
            best = Some((strategy, hits));
        }
        if found < announced {
            shortfall = Some(announced);
            continue;
        }
        if shortfall.is_none() {
            break;
        }
    }

    match best {
        Some((strategy, hits)) => Segmentation {
            strategy: Some(strategy),
            spans: segmenter.into_spans(hits),
        },
        None => Segmentation::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topics(text: &str) -> Vec<String> {
        segment(text, MeetingType::General, MAX_TOPICS)
            .spans
            .iter()
            .map(|span| span.text(text).to_string())
            .collect()
    }

    #[test]
    fn test_enumerated_intro() {
        let text = "主要讨论三个议题：一是项目当前进度，由张三负责；二是遇到的问题；三是下一步计划。";
        let result = segment(text, MeetingType::General, MAX_TOPICS);
        assert_eq!(result.strategy, Some(Strategy::Enumerated));
        assert_eq!(
            topics(text),
            vec!["项目当前进度", "遇到的问题", "下一步计划"]
        );
    }

    #[test]
    fn test_enumerated_count_bounds_topics() {
        let text = "主要讨论两个议题：一是预算，二是人员，三是场地。";
        assert_eq!(topics(text), vec!["预算", "人员"]);
    }

    #[test]
    fn test_enumerated_topics_span_sentences() {
        let text = "会议主要讨论三个议题：\n1. 项目进度，由张三负责。\n2. 遇到的问题，李四需要准备相关资料。\n3. 下一步计划，王五负责。";
        let result = segment(text, MeetingType::General, MAX_TOPICS);
        assert_eq!(result.strategy, Some(Strategy::Enumerated));
        assert_eq!(topics(text), vec!["项目进度", "遇到的问题", "下一步计划"]);
        assert_eq!(result.spans[1].tail(text), "，李四需要准备相关资料");
    }

    #[test]
    fn test_short_enumeration_falls_back() {
        let text = "1、预算审核\n2、人员安排\n3、场地协调\n以上主要讨论三个议题，1、预算优先。";
        let result = segment(text, MeetingType::General, MAX_TOPICS);
        assert_eq!(result.strategy, Some(Strategy::Numeric));
        assert_eq!(topics(text), vec!["预算审核", "人员安排", "场地协调"]);
    }

    #[test]
    fn test_numeric_markers() {
        let text = "1. 需求评审\n2. 接口联调\n3. 上线计划";
        let result = segment(text, MeetingType::General, MAX_TOPICS);
        assert_eq!(result.strategy, Some(Strategy::Numeric));
        assert_eq!(topics(text), vec!["需求评审", "接口联调", "上线计划"]);
    }

    #[test]
    fn test_labeled_markers() {
        let text = "议题1：项目当前进度\n负责人：张三\n会前准备：准备相关资料\n议题2：下一步计划\n负责人：李四\n会前准备：无\n";
        let result = segment(text, MeetingType::General, MAX_TOPICS);
        assert_eq!(result.spans.len(), 2);
        assert!(result.spans[0].tail(text).contains("负责人：张三"));
        assert!(!result.spans[0].tail(text).contains("李四"));
    }

    #[test]
    fn test_ordinal_markers() {
        let text = "一是当前进度，由张三负责；二是遇到的问题；三是下一步计划。";
        let result = segment(text, MeetingType::General, MAX_TOPICS);
        assert_eq!(result.strategy, Some(Strategy::Ordinal));
        assert_eq!(result.spans.len(), 3);
        assert_eq!(result.spans[0].tail(text), "，由张三负责；");
    }

    #[test]
    fn test_search_stops_at_gap() {
        // No 二, so 三 is never looked for
        let text = "一是预算；三是人员。";
        assert_eq!(topics(text), vec!["预算"]);
    }

    #[test]
    fn test_cursor_is_monotonic() {
        // 二 before 一 in the text cannot become topic 2
        let text = "二是旧事项；一是预算。";
        assert_eq!(topics(text), vec!["预算"]);
    }

    #[test]
    fn test_decimal_is_not_a_marker() {
        assert!(topics("会议持续1.5小时").is_empty());
        assert!(topics("明天上午10点开会").is_empty());
    }

    #[test]
    fn test_window_stops_at_sentence_end() {
        let text = "一是预算审核，张三负责。李四另外准备报表";
        let result = segment(text, MeetingType::General, MAX_TOPICS);
        let span = result.spans[0];
        assert_eq!(span.tail(text), "，张三负责");
        assert!(span.window(text).starts_with("一是"));
    }

    #[test]
    fn test_max_topics() {
        let text = "一是甲；二是乙；三是丙；四是丁。";
        assert_eq!(segment(text, MeetingType::General, 2).spans.len(), 2);
    }

    #[test]
    fn test_category_markers() {
        let text = "里程碑1：完成设计；里程碑2：完成开发。";
        assert!(segment(text, MeetingType::General, MAX_TOPICS).spans.is_empty());
        let result = segment(text, MeetingType::Project, MAX_TOPICS);
        assert_eq!(result.spans.len(), 2);
        assert_eq!(result.spans[1].text(text), "完成开发");
    }

    #[test]
    fn test_technical_markers() {
        let text = "技术问题1：接口超时。技术问题2：内存泄漏。";
        assert!(segment(text, MeetingType::General, MAX_TOPICS).spans.is_empty());
        let result = segment(text, MeetingType::Technical, MAX_TOPICS);
        assert_eq!(result.strategy, Some(Strategy::Numeric));
        assert_eq!(result.spans.len(), 2);
        assert_eq!(result.spans[0].text(text), "接口超时");
        assert_eq!(result.spans[1].text(text), "内存泄漏");
    }

    #[test]
    fn test_team_markers() {
        let text = "分享一：新人培训心得。分享二：工具使用技巧。";
        assert!(segment(text, MeetingType::General, MAX_TOPICS).spans.is_empty());
        let result = segment(text, MeetingType::Team, MAX_TOPICS);
        assert_eq!(result.strategy, Some(Strategy::Ordinal));
        assert_eq!(result.spans.len(), 2);
        assert_eq!(result.spans[1].text(text), "工具使用技巧");
    }

    #[test]
    fn test_no_topics() {
        let result = segment("明天开个会", MeetingType::General, MAX_TOPICS);
        assert_eq!(result.strategy, None);
        assert!(result.spans.is_empty());
        assert!(category_marker_patterns(MeetingType::General, "一").is_empty());
    }
}
