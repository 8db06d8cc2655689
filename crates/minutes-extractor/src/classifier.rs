//! Keyword classifier for the meeting category

use minutes_domain::MeetingType;
use tracing::debug;

const TECHNICAL_KEYWORDS: &[&str] = &[
    "技术", "开发", "编程", "代码", "API", "架构", "数据库", "前端", "后端", "测试", "bug",
    "修复", "部署", "性能", "优化", "迭代", "版本", "需求", "设计",
];

const BUSINESS_KEYWORDS: &[&str] = &[
    "商务", "合作", "谈判", "客户", "市场", "销售", "营销", "推广", "策略", "预算", "财务",
    "投资", "盈利", "成本", "分析", "报告", "季度", "年度", "计划",
];

const PROJECT_KEYWORDS: &[&str] = &[
    "项目", "进度", "里程碑", "任务", "分工", "责任", "延期", "风险", "协调", "资源", "分配",
    "时间线", "甘特图", "交付", "验收",
];

const TEAM_KEYWORDS: &[&str] = &[
    "团队", "部门", "周会", "例会", "分享", "讨论", "交流", "培训", "总结", "回顾", "展望",
    "问题", "建议", "反馈",
];

/// Minimum votes a category needs to be chosen
const MIN_VOTES: usize = 2;

/// Keyword list for a category (empty for `General`)
pub fn keywords(kind: MeetingType) -> &'static [&'static str] {
    match kind {
        MeetingType::General => &[],
        MeetingType::Technical => TECHNICAL_KEYWORDS,
        MeetingType::Business => BUSINESS_KEYWORDS,
        MeetingType::Project => PROJECT_KEYWORDS,
        MeetingType::Team => TEAM_KEYWORDS,
    }
}

/// Number of distinct keywords of `kind` occurring in `text`
pub fn votes(text: &str, kind: MeetingType) -> usize {
    keywords(kind)
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .count()
}

/// Pick the category with the most keyword votes
///
/// Each keyword counts once no matter how often it occurs. A category needs
/// at least two votes; otherwise the meeting is `General`. Ties go to the
/// earlier entry of [`MeetingType::PRIORITY`].
pub fn classify(text: &str) -> MeetingType {
    let mut best = MeetingType::General;
    let mut best_votes = 0;

    for kind in MeetingType::PRIORITY {
        let count = votes(text, kind);
        if count > best_votes {
            best = kind;
            best_votes = count;
        }
    }

    if best_votes < MIN_VOTES {
        debug!("No category reached {} votes", MIN_VOTES);
        return MeetingType::General;
    }

    debug!("Classified as {} with {} votes", best, best_votes);
    best
}
