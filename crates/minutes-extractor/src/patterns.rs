//! Rule tables for the scalar meeting fields
//!
//! Every table lists labeled forms (`主持人：X`) before conversational ones
//! (`由X主持`). Captures stop at clause punctuation and line breaks, so a
//! value never runs into the next sentence or the next labeled line.

use crate::cascade::{Field, Rule, RuleSet};
use minutes_domain::MeetingType;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Host rules
pub static HOST_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        Field::Host,
        [
            Rule::new(r"主持人[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Host),
            Rule::new(r"会议主持[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Host),
            Rule::new(r"主持[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Host),
            Rule::new(r"由([^，,。；;：:！？!?\n\r]+?)(?:来)?主持", 1, Field::Host),
            Rule::new(r"([^，,。；;：:！？!?\n\r]+?)(?:来)?主持会议", 1, Field::Host),
        ],
    )
});

/// Location rules
///
/// `在`/`于` must not be the tail of words such as `关于` or `现在`. The
/// verb form captures nothing containing `在`/`于`, so in `于<时间>在<地点>召开`
/// the last preposition before the verb wins.
pub static LOCATION_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        Field::Location,
        [
            Rule::new(r"会议地点[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Location),
            Rule::new(r"会议场地[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Location),
            Rule::new(r"地点[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Location),
            Rule::new(
                r"(?:^|[^关对由属至现正存实所])(?:在|于)[ \t　]*([^在于，,。；;！？!?\n\r]+?)[ \t　]*(?:召开|举行|组织|进行|开展)",
                1,
                Field::Location,
            ),
            Rule::new(
                r"(?:^|[^关对由属至现正存实所])在([^，,。；;！？!?\n\r]+?会议室)",
                1,
                Field::Location,
            ),
            Rule::new(
                r"(?:^|[^关对由属至现正存实所])在([^，,。；;！？!?\n\r]*?(?:多功能厅|办公室|报告厅|礼堂|大厅|中心|大楼|楼|室|厅|馆|院))",
                1,
                Field::Location,
            ),
            Rule::new(r"会议将在([^，,。；;！？!?\n\r]+?)举行", 1, Field::Location),
        ],
    )
});

/// Duration rules
pub static DURATION_RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::new(
        Field::Duration,
        [
            Rule::new(r"会议时长[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Duration),
            Rule::new(r"时长[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Duration),
            Rule::new(r"会议大概开([^，,。；;！？!?\n\r]+)", 1, Field::Duration),
            Rule::new(
                r"(?:会议)?(?:将)?持续(?:约|大约|大概)?[ \t　]*([^，,。；;！？!?\n\r]+)",
                1,
                Field::Duration,
            ),
            Rule::new(r"(?:大概|大约)开[ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Duration),
            Rule::new(
                r"预计(?:开|用时|时长)?[ \t　]*([^，,。；;！？!?\n\r]*?(?:小时|分钟|钟头))",
                1,
                Field::Duration,
            ),
            Rule::new(
                r"(?:大约|大概|约)[ \t　]*([0-9一二两三四五六七八九十半]+[ \t　]*个?半?(?:小时|分钟|钟头))",
                1,
                Field::Duration,
            ),
            Rule::new(r"([0-9]+(?:\.[0-9]+)?[ \t　]*个?半?(?:小时|分钟))", 1, Field::Duration),
        ],
    )
});

fn base_theme_rules() -> Vec<Rule> {
    vec![
        Rule::new(r"会议主题[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
        Rule::new(r"主题[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
        Rule::new(r"会议议题[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
        Rule::new(r"讨论关于([^，,。；;！？!?\n\r]+?)的会议", 1, Field::Theme),
        Rule::new(r"关于([^，,。；;！？!?\n\r]+?)的会议", 1, Field::Theme),
        Rule::new(r"议题(?:是|为)([^，,。；;：:！？!?\n\r]+)", 1, Field::Theme),
        Rule::new(
            r"(?:主要|重点)讨论(?:的是)?([^一二两三四五六七八九十几0-9，,。；;：:！？!?\n\r][^，,。；;：:！？!?\n\r]*)",
            1,
            Field::Theme,
        ),
        Rule::new(
            r"(?:召开|举行|组织|开展|开个|开一个|开一次)(?:一次|一个|一场|个)?(?:关于)?([^，,。；;！？!?\n\r]+?)(?:会议|会)",
            1,
            Field::Theme,
        ),
        Rule::new(
            r"(?:为了|基于)([^，,。；;！？!?\n\r]+?)(?:召开|举行)(?:会议)?",
            1,
            Field::Theme,
        ),
        Rule::new(
            r"围绕([^，,。；;！？!?\n\r]+?)(?:展开讨论|进行讨论|进行)",
            1,
            Field::Theme,
        ),
        Rule::new(r"聚焦([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
    ]
}

/// Theme rules that only apply to one meeting category
///
/// Appended after the base theme rules for that category.
pub fn theme_extras(kind: MeetingType) -> Vec<Rule> {
    match kind {
        MeetingType::General => Vec::new(),
        MeetingType::Technical => vec![
            Rule::new(r"技术讨论[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
            Rule::new(r"需求评审[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
            Rule::new(r"架构设计[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
        ],
        MeetingType::Business => vec![
            Rule::new(r"商务洽谈[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
            Rule::new(r"市场分析[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
            Rule::new(r"项目报价[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
        ],
        MeetingType::Project => vec![
            Rule::new(r"项目进度[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
            Rule::new(r"项目评审[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
            Rule::new(r"项目计划[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
        ],
        MeetingType::Team => vec![
            Rule::new(r"周会[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
            Rule::new(r"部门会议[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
            Rule::new(r"团队分享[：:][ \t　]*([^，,。；;！？!?\n\r]+)", 1, Field::Theme),
        ],
    }
}

static THEME_RULES: Lazy<HashMap<MeetingType, RuleSet>> = Lazy::new(|| {
    let mut kinds = vec![MeetingType::General];
    kinds.extend(MeetingType::PRIORITY);
    kinds
        .into_iter()
        .map(|kind| {
            let mut set = RuleSet::new(Field::Theme, base_theme_rules());
            set.extend(theme_extras(kind));
            (kind, set)
        })
        .collect()
});

/// Theme cascade for a meeting category
pub fn theme_rules(kind: MeetingType) -> &'static RuleSet {
    // Every category is inserted above
    &THEME_RULES[&kind]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(set: &RuleSet, text: &str) -> Option<String> {
        set.first_match(text).map(|m| m.value.to_string())
    }

    #[test]
    fn test_tables_compile() {
        assert_eq!(HOST_RULES.inert_count(), 0);
        assert_eq!(LOCATION_RULES.inert_count(), 0);
        assert_eq!(DURATION_RULES.inert_count(), 0);
        for kind in MeetingType::PRIORITY {
            assert_eq!(theme_rules(kind).inert_count(), 0);
        }
    }

    #[test]
    fn test_host_forms() {
        assert_eq!(value(&HOST_RULES, "主持人：王经理，地点：A座"), Some("王经理".into()));
        assert_eq!(value(&HOST_RULES, "本次会议由李总主持。"), Some("李总".into()));
        assert_eq!(value(&HOST_RULES, "主持人：\n会议地点：三楼"), None);
    }

    #[test]
    fn test_location_forms() {
        assert_eq!(
            value(&LOCATION_RULES, "明天上午10点在三楼会议室召开项目会议"),
            Some("三楼会议室".into())
        );
        assert_eq!(
            value(&LOCATION_RULES, "会议地点：A座501\n主持人：王五"),
            Some("A座501".into())
        );
        assert_eq!(value(&LOCATION_RULES, "关于预算的会议由张三负责"), None);
    }

    #[test]
    fn test_location_after_time_phrase() {
        assert_eq!(
            value(&LOCATION_RULES, "会议将于明天下午三点在三楼会议室召开"),
            Some("三楼会议室".into())
        );
        assert_eq!(
            value(&LOCATION_RULES, "本次会议于周五上午10点在A座501举行。"),
            Some("A座501".into())
        );
    }

    #[test]
    fn test_duration_forms() {
        assert_eq!(value(&DURATION_RULES, "会议大概开1小时；"), Some("1小时".into()));
        assert_eq!(value(&DURATION_RULES, "会议持续约两个小时"), Some("两个小时".into()));
        assert_eq!(value(&DURATION_RULES, "预计用时30分钟"), Some("30分钟".into()));
        assert_eq!(value(&DURATION_RULES, "会议时长：未指定"), Some("未指定".into()));
    }

    #[test]
    fn test_theme_forms() {
        let rules = theme_rules(MeetingType::General);
        assert_eq!(value(rules, "会议主题：季度复盘\n"), Some("季度复盘".into()));
        assert_eq!(value(rules, "召开关于年度预算的会议"), Some("年度预算".into()));
        assert_eq!(value(rules, "下午召开项目进度会议"), Some("项目进度".into()));
        // Numeral after 主要讨论 introduces a topic list, not a theme
        assert_eq!(value(rules, "主要讨论三个议题：一是进度"), None);
    }

    #[test]
    fn test_theme_extras_by_category() {
        assert!(theme_extras(MeetingType::General).is_empty());
        let text = "需求评审：登录模块";
        assert_eq!(value(theme_rules(MeetingType::General), text), None);
        assert_eq!(
            value(theme_rules(MeetingType::Technical), text),
            Some("登录模块".into())
        );
    }
}
