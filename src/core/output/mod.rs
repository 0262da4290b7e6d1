//! Rendering of filtered messages.
//!
//! Every writer takes the surviving records in filter order and writes them
//! to any [`std::io::Write`]; nothing here touches the filesystem.
//!
//! - [`write_text`] / [`to_text`] - one `author (timestamp): content` line per record
//! - [`write_csv`] / [`to_csv`] - semicolon-delimited `Author;Timestamp;Content` - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - pretty JSON array of the original records - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - one original record per line - requires `json-output` feature
//!
//! # Example
//!
//! ```rust
//! use chatsieve::core::output::to_text;
//! use chatsieve::Message;
//!
//! let messages = vec![
//!     Message::new().with_author("Alice").with_timestamp("2023-10-20T12:00:00Z").with_content("hello"),
//!     Message::new().with_content("anonymous"),
//! ];
//!
//! let text = to_text(&messages)?;
//! assert_eq!(text, "Alice (2023-10-20T12:00:00Z): hello\nUnknown (): anonymous\n");
//! # Ok::<(), chatsieve::SieveError>(())
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
mod text_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
pub use text_writer::{format_line, to_text, write_text};
