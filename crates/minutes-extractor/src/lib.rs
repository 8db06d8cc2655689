//! Minutes Extractor
//!
//! Turns a free-text Chinese meeting description into a [`MeetingRecord`].
//!
//! # Overview
//!
//! Extraction is rule-based first. A keyword classifier picks the meeting
//! category, ordered pattern cascades fill the scalar fields, the attendee
//! list is normalized, and topics are segmented by ordinal markers with an
//! owner and preparation items resolved inside each topic's window.
//!
//! When the direct result is weak (fewer than three scalar fields and no
//! topic, by default), the text is sent to a generative model. Its labeled
//! answer goes through the same rules and is merged field by field into the
//! direct result. Model failures and timeouts fall back to the direct result.
//!
//! # Architecture
//!
//! ```text
//! text → classify → field cascades → attendees → segment → resolve → record
//!                                                                     │
//!                        (low confidence) → LLM → same rules → merge ─┘
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use minutes_extractor::{Extractor, ExtractorConfig};
//! use minutes_llm::MockProvider;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = Extractor::new(MockProvider::default(), ExtractorConfig::default());
//!
//! let report = extractor
//!     .extract("明天在三楼会议室开会，一是预算审核，由张三负责。")
//!     .await?;
//!
//! println!("主题: {}", report.record.theme);
//! println!("议题: {}", report.record.topics.len());
//! # Ok(())
//! # }
//! ```
//!
//! [`MeetingRecord`]: minutes_domain::MeetingRecord

#![warn(missing_docs)]

pub mod attendees;
pub mod cascade;
pub mod classifier;
pub mod config;
pub mod error;
pub mod extractor;
pub mod merge;
pub mod orchestrator;
pub mod patterns;
pub mod prompt;
pub mod resolver;
pub mod segmenter;
pub mod types;

#[cfg(test)]
mod tests;

pub use config::{ConfidencePolicy, ExtractorConfig};
pub use error::ExtractorError;
pub use extractor::Extractor;
pub use merge::merge;
pub use orchestrator::ExtractionOutcome;
pub use types::{ExtractionReport, RecordSource, Stage, StageEvent};
