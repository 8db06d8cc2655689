//! Minutes Document Renderer
//!
//! Turns a [`MeetingRecord`] into a minutes document on disk. The extraction
//! core hands records over through the [`DocumentRenderer`] trait and never
//! looks at the artifact.
//!
//! The Markdown layout follows the printed minutes form: a `会议记录` title,
//! a basic-information table and a content table with one row per topic.

#![warn(missing_docs)]

use minutes_domain::traits::DocumentRenderer;
use minutes_domain::MeetingRecord;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while writing a document
#[derive(Error, Debug)]
pub enum RenderError {
    /// Filesystem error
    #[error("Failed to write {path}: {source}")]
    Io {
        /// Destination that could not be written
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}

/// File name for a document generated at `timestamp` (unix seconds)
pub fn document_name(timestamp: u64, extension: &str) -> String {
    format!("meeting_{}.{}", timestamp, extension)
}

/// File name for a document generated at `timestamp`, made unique by `tag`
///
/// Used where several documents can be generated in the same second.
pub fn tagged_document_name(timestamp: u64, tag: &str, extension: &str) -> String {
    format!("meeting_{}_{}.{}", timestamp, tag, extension)
}

/// Markdown minutes renderer
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    /// Create a renderer
    pub fn new() -> Self {
        Self
    }

    /// Render the document body
    pub fn render_to_string(&self, record: &MeetingRecord) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# 会议记录\n");

        let _ = writeln!(out, "## 基本信息\n");
        let _ = writeln!(out, "| 项目 | 内容 |");
        let _ = writeln!(out, "| --- | --- |");
        for (label, value) in [
            ("会议主题", record.theme.as_str()),
            ("主持人", record.host.as_str()),
            ("会议地点", record.location.as_str()),
            ("会议时长", record.duration.as_str()),
            ("参会人员", record.attendees.as_str()),
            ("会议类型", record.meeting_type.label()),
        ] {
            let _ = writeln!(out, "| {} | {} |", label, cell(value));
        }

        let _ = writeln!(out, "\n## 会议内容记录\n");
        if record.topics.is_empty() {
            let _ = writeln!(out, "暂无议题");
            return out;
        }
        let _ = writeln!(out, "| 序号 | 议题 | 负责人 | 会前准备 |");
        let _ = writeln!(out, "| --- | --- | --- | --- |");
        for (idx, topic) in record.topics.iter().enumerate() {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} |",
                idx + 1,
                cell(&topic.text),
                cell(&topic.owner),
                cell(&topic.preparation)
            );
        }
        out
    }
}

/// Escape a value for a single table cell
fn cell(value: &str) -> String {
    value
        .trim()
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

impl DocumentRenderer for MarkdownRenderer {
    type Error = RenderError;

    fn render(&self, record: &MeetingRecord, destination: &Path) -> Result<PathBuf, Self::Error> {
        let io_error = |source| RenderError::Io {
            path: destination.to_path_buf(),
            source,
        };

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(destination, self.render_to_string(record)).map_err(io_error)?;

        info!("Wrote minutes document to {}", destination.display());
        Ok(destination.to_path_buf())
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}
