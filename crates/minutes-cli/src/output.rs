//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use minutes_domain::{is_unspecified, MeetingRecord};
use minutes_extractor::{ExtractionReport, RecordSource, StageEvent};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a record.
    pub fn format_record(&self, record: &MeetingRecord) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
            OutputFormat::Table => Ok(self.format_record_table(record)),
            OutputFormat::Labeled => Ok(record.to_labeled_text()),
        }
    }

    /// Format a two-pass report.
    ///
    /// JSON output carries the whole report; the other formats print the
    /// record followed by a one-line summary of where it came from.
    pub fn format_report(&self, report: &ExtractionReport) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(report)?);
        }

        let mut out = self.format_record(&report.record)?;
        out.push('\n');
        out.push_str(&self.source_line(report));
        if let Some(reason) = &report.secondary_error {
            out.push('\n');
            out.push_str(&self.warning(&format!("Model pass: {}", reason)));
        }
        Ok(out)
    }

    fn source_line(&self, report: &ExtractionReport) -> String {
        let source = match report.source {
            RecordSource::Primary => "direct extraction",
            RecordSource::Merged => "direct extraction merged with model output",
            RecordSource::Secondary => "model output",
            RecordSource::PrimaryFallback => "direct extraction (model pass unusable)",
        };
        self.info(&format!(
            "{} ({} fields, {} topics, {}ms)",
            source, report.filled_fields, report.resolved_topics, report.processing_time_ms
        ))
    }

    /// Format the pipeline trace, one stage per line.
    pub fn format_events(&self, events: &[StageEvent]) -> String {
        events
            .iter()
            .map(|event| {
                format!(
                    "{:>10}  {}",
                    self.colorize(&event.stage.to_string(), "cyan"),
                    event.detail
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a record as two tables: basic information and topics.
    fn format_record_table(&self, record: &MeetingRecord) -> String {
        let mut basic = Builder::default();
        basic.push_record(["项目", "内容"]);
        for (label, value) in [
            ("会议主题", &record.theme),
            ("主持人", &record.host),
            ("会议地点", &record.location),
            ("参会人员", &record.attendees),
            ("会议时长", &record.duration),
        ] {
            basic.push_record([label.to_string(), self.value(value)]);
        }
        basic.push_record(["会议类型".to_string(), record.meeting_type.label().to_string()]);

        let mut basic = basic.build();
        basic
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        if record.topics.is_empty() {
            return format!("{}\n{}", basic, self.colorize("暂无议题", "yellow"));
        }

        let mut topics = Builder::default();
        topics.push_record(["序号", "议题", "负责人", "会前准备"]);
        for (index, topic) in record.topics.iter().enumerate() {
            topics.push_record([
                (index + 1).to_string(),
                topic.text.clone(),
                self.value(&topic.owner),
                topic.preparation.clone(),
            ]);
        }

        let mut topics = topics.build();
        topics
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!("{}\n{}", basic, topics)
    }

    /// Dim sentinel values so resolved fields stand out.
    fn value(&self, value: &str) -> String {
        if is_unspecified(value) && self.color_enabled {
            value.dimmed().to_string()
        } else {
            value.to_string()
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minutes_domain::{MeetingType, Topic, UNSPECIFIED};

    fn create_test_record() -> MeetingRecord {
        let mut topic = Topic::new("项目当前进度");
        topic.owner = "张三".to_string();
        MeetingRecord {
            theme: "项目进度".to_string(),
            location: "三楼会议室".to_string(),
            attendees: "张三，李四".to_string(),
            meeting_type: MeetingType::Project,
            topics: vec![topic],
            ..Default::default()
        }
    }

    fn create_test_report(record: MeetingRecord) -> ExtractionReport {
        ExtractionReport {
            filled_fields: record.filled_scalar_count(),
            resolved_topics: record.topics.len(),
            record,
            source: RecordSource::PrimaryFallback,
            raw_text: "原文".to_string(),
            model_name: Some("mock".to_string()),
            secondary_error: Some("LLM call timed out after 1s".to_string()),
            processing_time_ms: 3,
            events: Vec::new(),
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_record(&create_test_record()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["theme"], "项目进度");
        assert_eq!(json["topics"][0]["leader"], "张三");
    }

    #[test]
    fn test_labeled_format() {
        let formatter = Formatter::new(OutputFormat::Labeled, false);
        let output = formatter.format_record(&create_test_record()).unwrap();
        assert!(output.contains("会议主题：项目进度"));
        assert!(output.contains(&format!("主持人：{}", UNSPECIFIED)));
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_record(&create_test_record()).unwrap();
        assert!(output.contains("会议地点"));
        assert!(output.contains("三楼会议室"));
        assert!(output.contains("负责人"));
        assert!(output.contains("项目会议"));
    }

    #[test]
    fn test_empty_topics() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_record(&MeetingRecord::default()).unwrap();
        assert!(output.contains("暂无议题"));
    }

    #[test]
    fn test_report_summary() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter
            .format_report(&create_test_report(create_test_record()))
            .unwrap();
        assert!(output.contains("model pass unusable"));
        assert!(output.contains("⚠ Model pass: LLM call timed out"));
    }

    #[test]
    fn test_report_json_is_whole_report() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter
            .format_report(&create_test_report(create_test_record()))
            .unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["source"], "primary_fallback");
        assert_eq!(json["record"]["theme"], "项目进度");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
        assert_eq!(formatter.value(UNSPECIFIED), UNSPECIFIED);
    }
}
