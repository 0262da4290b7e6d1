//! Core processing logic for chatsieve.
//!
//! This module contains:
//! - [`timestamp`] - Repair and parsing of export timestamps
//! - [`filter`] - Message filtering by date, type, author, content, and reaction
//! - [`output`] - Text, CSV, JSON, and JSONL writers
//!
//! # Quick Start
//!
//! ```rust
//! use chatsieve::core::{FilterCriteria, filter_messages, normalize, to_text};
//! ```

pub mod filter;
pub mod output;
pub mod timestamp;

// Re-export main types for convenience
pub use filter::{
    FilterCriteria, Matcher, TypeSelection, apply_filters, filter_messages, matches,
    message_types,
};
pub use timestamp::{ParsedTimestamp, normalize, repair};

// Re-export Message from the crate root
pub use crate::Message;

#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
pub use output::{to_text, write_text};
