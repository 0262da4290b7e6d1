//! # Chatsieve
//!
//! A Rust library for filtering Discord chat exports (DiscordChatExporter
//! JSON) by date range, message type, author, content, and reaction emoji.
//!
//! ## Overview
//!
//! - [`document::ChatExport`] loads an export's `messages` array, accessing
//!   every record best-effort.
//! - [`core::timestamp`] repairs the loosely formatted ISO-8601 timestamps
//!   exports contain (`Z` suffix, one- or two-digit fractions) and parses them.
//! - [`core::filter`] keeps the records that pass every clause of a
//!   [`FilterCriteria`](core::FilterCriteria), in their original order.
//! - [`core::output`] and [`format`] render the survivors as text, CSV,
//!   JSON, or JSONL.
//!
//! ## Quick Start
//!
//! ```rust
//! use chatsieve::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let export = ChatExport::from_json_str(r#"{"messages": [
//!         {"type": "Default", "timestamp": "2023-10-20T12:00:00Z", "author": {"name": "Alice"}, "content": "hello"},
//!         {"type": "Default", "timestamp": "2023-10-22T12:00:00Z", "author": {"name": "Bob"}, "content": "world"}
//!     ]}"#)?;
//!
//!     let criteria = FilterCriteria::new()
//!         .with_date_from("2023-10-20")?
//!         .with_date_to("2023-10-21")?;
//!
//!     let filtered = filter_messages(export.messages(), &criteria);
//!     assert_eq!(to_text(filtered)?, "Alice (2023-10-20T12:00:00Z): hello\n");
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`message`] — [`Message`] record with defaulting accessors
//! - [`document`] — [`ChatExport`](document::ChatExport) loading
//! - [`core`] — Core functionality
//!   - [`core::timestamp`] — [`normalize`](core::normalize), [`repair`](core::repair)
//!   - [`core::filter`] — [`FilterCriteria`](core::FilterCriteria), [`filter_messages`](core::filter_messages), [`apply_filters`](core::apply_filters)
//!   - [`core::output`] — text, CSV, JSON, JSONL writers
//! - [`format`] — [`OutputFormat`](format::OutputFormat) and dispatch
//! - [`cli`] — CLI arguments (feature `cli`)
//! - [`error`] — Unified error types ([`SieveError`], [`Result`])
//! - [`prelude`] — Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod core;
pub mod document;
pub mod error;
pub mod format;
pub mod message;

// Re-export the main types at the crate root for convenience
pub use error::{Result, SieveError};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatsieve::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Message;
    pub use crate::message::{Author, Emoji, Reaction};

    pub use crate::error::{Result, SieveError};

    pub use crate::document::ChatExport;

    // Timestamps
    pub use crate::core::timestamp::{ParsedTimestamp, normalize};

    // Filtering
    pub use crate::core::filter::{
        FilterCriteria, TypeSelection, apply_filters, filter_messages, message_types,
    };

    // Output
    pub use crate::core::output::{to_text, write_text};
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
