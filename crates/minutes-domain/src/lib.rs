//! Minutes Domain Layer
//!
//! This crate holds the structured meeting record that the extraction core
//! produces and the renderer consumes, plus the trait interfaces for the two
//! external collaborators (generative model, document renderer).
//!
//! ## Key Concepts
//!
//! - **MeetingRecord**: theme, host, location, attendees, duration, meeting type
//!   and an ordered list of topics. Always fully populated.
//! - **Sentinel**: fixed default values (`未指定`, `无`) standing in for
//!   unresolved fields.
//! - **MeetingType**: coarse category chosen by keyword votes.
//!
//! ## Architecture
//!
//! The only external dependency is `serde`, because the serialized field
//! names (`topic`, `leader`, ...) are part of the renderer contract.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod meeting_type;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use meeting_type::MeetingType;
pub use record::{
    is_unspecified, MeetingRecord, Topic, DEFAULT_PREPARATION, MAX_TOPICS, PLACEHOLDER_TOPIC,
    UNSPECIFIED,
};
