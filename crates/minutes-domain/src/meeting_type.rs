//! Meeting type module - coarse category of a meeting description

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse meeting category
///
/// Serialized with the display labels the renderer shows:
/// - General: `通用会议` (default, also used when no category is confident)
/// - Technical: `技术会议`
/// - Business: `商务会议`
/// - Project: `项目会议`
/// - Team: `团队会议`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MeetingType {
    /// No category reached the vote threshold
    #[default]
    #[serde(rename = "通用会议")]
    General,

    /// Engineering, development, release work
    #[serde(rename = "技术会议")]
    Technical,

    /// Customers, sales, budgets, partnerships
    #[serde(rename = "商务会议")]
    Business,

    /// Schedules, milestones, task assignment
    #[serde(rename = "项目会议")]
    Project,

    /// Department routines, reviews, sharing sessions
    #[serde(rename = "团队会议")]
    Team,
}

impl MeetingType {
    /// Categories in tie-break priority order (highest first)
    pub const PRIORITY: [MeetingType; 4] = [
        MeetingType::Technical,
        MeetingType::Business,
        MeetingType::Project,
        MeetingType::Team,
    ];

    /// Get the display label
    pub fn label(&self) -> &'static str {
        match self {
            MeetingType::General => "通用会议",
            MeetingType::Technical => "技术会议",
            MeetingType::Business => "商务会议",
            MeetingType::Project => "项目会议",
            MeetingType::Team => "团队会议",
        }
    }

    /// Generic theme used when neither a theme nor a topic was found
    ///
    /// Returns `None` for `General`, which keeps the sentinel.
    pub fn generic_theme(&self) -> Option<&'static str> {
        match self {
            MeetingType::General => None,
            MeetingType::Technical => Some("技术讨论会议"),
            MeetingType::Business => Some("商务洽谈会议"),
            MeetingType::Project => Some("项目进度会议"),
            MeetingType::Team => Some("团队例会"),
        }
    }

    /// Parse from a display label or an English name
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "通用会议" => return Some(MeetingType::General),
            "技术会议" => return Some(MeetingType::Technical),
            "商务会议" => return Some(MeetingType::Business),
            "项目会议" => return Some(MeetingType::Project),
            "团队会议" => return Some(MeetingType::Team),
            _ => {}
        }
        match s.trim().to_lowercase().as_str() {
            "general" => Some(MeetingType::General),
            "technical" => Some(MeetingType::Technical),
            "business" => Some(MeetingType::Business),
            "project" => Some(MeetingType::Project),
            "team" => Some(MeetingType::Team),
            _ => None,
        }
    }
}

impl fmt::Display for MeetingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for MeetingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid meeting type: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_general() {
        assert_eq!(MeetingType::default(), MeetingType::General);
        assert_eq!(MeetingType::General.generic_theme(), None);
    }

    #[test]
    fn test_parse_labels_and_names() {
        assert_eq!(MeetingType::parse("技术会议"), Some(MeetingType::Technical));
        assert_eq!(MeetingType::parse("Team"), Some(MeetingType::Team));
        assert_eq!(MeetingType::parse("会议"), None);
        assert!("project".parse::<MeetingType>().is_ok());
    }

    #[test]
    fn test_serializes_as_label() {
        let json = serde_json::to_string(&MeetingType::Business).unwrap();
        assert_eq!(json, "\"商务会议\"");
    }
}
