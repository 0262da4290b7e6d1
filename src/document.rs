//! Loading chat export documents.
//!
//! An export is a JSON object with a top-level `messages` array. Loading is
//! forgiving about structure and strict about syntax:
//!
//! - text that is not JSON is an error ([`SieveError::Parse`]);
//! - JSON without a `messages` key, or whose top level is not an object,
//!   holds zero messages;
//! - a `messages` value that is not an array is [`SieveError::InvalidFormat`];
//! - a record that is not an object is skipped with a warning. Other records
//!   are unaffected;
//! - a known field with the wrong JSON type reads as absent, so the record
//!   still loads (see [`crate::message`]).
//!
//! # Example
//!
//! ```
//! use chatsieve::document::ChatExport;
//!
//! let export = ChatExport::from_json_str(r#"{"messages": [{"content": "hi"}]}"#)?;
//! assert_eq!(export.len(), 1);
//!
//! let empty = ChatExport::from_json_str(r#"{"guild": {"name": "Test"}}"#)?;
//! assert!(empty.is_empty());
//! # Ok::<(), chatsieve::SieveError>(())
//! ```

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::Message;
use crate::error::{Result, SieveError};

/// A loaded chat export: its message records in document order.
///
/// Held read-only after loading; filtering borrows from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatExport {
    messages: Vec<Message>,
}

impl ChatExport {
    /// Wraps already parsed records.
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Parses an export from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Value =
            serde_json::from_str(json).map_err(|e| SieveError::parse(e, None))?;
        Self::from_value(document)
    }

    /// Parses an export from any reader, e.g. stdin.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: Value =
            serde_json::from_reader(reader).map_err(|e| SieveError::parse(e, None))?;
        Self::from_value(document)
    }

    /// Reads and parses an export file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let document: Value = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| SieveError::parse(e, Some(PathBuf::from(path))))?;
        let export = Self::from_value(document)?;
        tracing::info!(path = %path.display(), messages = export.len(), "loaded chat export");
        Ok(export)
    }

    /// Extracts the records from an already parsed JSON document.
    pub fn from_value(document: Value) -> Result<Self> {
        let Value::Object(mut root) = document else {
            tracing::warn!("export top level is not an object; treating as empty");
            return Ok(Self::default());
        };

        let records = match root.remove("messages") {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(Value::Array(records)) => records,
            Some(other) => {
                return Err(SieveError::invalid_format(format!(
                    "`messages` must be an array, found {}",
                    json_type_name(&other)
                )));
            }
        };

        let messages = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value::<Message>(record) {
                Ok(msg) => Some(msg),
                Err(err) => {
                    tracing::warn!(index, error = %err, "skipping unreadable message record");
                    None
                }
            })
            .collect();

        Ok(Self { messages })
    }

    /// The records, in document order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Consumes the export, returning its records.
    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_records_in_order() {
        let export = ChatExport::from_json_str(
            r#"{"messages": [{"content": "first"}, {"content": "second"}]}"#,
        )
        .unwrap();

        let contents: Vec<_> = export.messages().iter().map(Message::content).collect();
        assert_eq!(contents, ["first", "second"]);
    }

    #[test]
    fn test_missing_messages_key_is_empty() {
        let export = ChatExport::from_json_str(r#"{"channel": {"name": "general"}}"#).unwrap();
        assert!(export.is_empty());
    }

    #[test]
    fn test_null_messages_is_empty() {
        let export = ChatExport::from_json_str(r#"{"messages": null}"#).unwrap();
        assert!(export.is_empty());
    }

    #[test]
    fn test_non_object_top_level_is_empty() {
        assert!(ChatExport::from_json_str("[1, 2, 3]").unwrap().is_empty());
        assert!(ChatExport::from_json_str("42").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let err = ChatExport::from_json_str("{ not json").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_messages_not_array_is_invalid_format() {
        let err = ChatExport::from_json_str(r#"{"messages": {"a": 1}}"#).unwrap_err();
        assert!(err.is_invalid_format());
        assert!(err.to_string().contains("found an object"));
    }

    #[test]
    fn test_bad_record_skipped_others_kept() {
        let export = ChatExport::from_json_str(
            r#"{"messages": [
                {"content": "ok"},
                "not a record",
                42,
                {"content": "also ok", "author": {"name": "Bob"}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(export.len(), 2);
        assert_eq!(export.messages()[1].author_name(), "Bob");
    }

    #[test]
    fn test_wrong_typed_fields_keep_record() {
        let export = ChatExport::from_json_str(
            r#"{"messages": [
                {"id": 1165, "type": "Default", "timestamp": "2023-10-20T12:00:00Z", "author": {"name": "Alice"}, "content": "hello"},
                {"id": "1166", "type": 0, "content": 42},
                {"reactions": [{"emoji": "x"}]}
            ]}"#,
        )
        .unwrap();

        assert_eq!(export.len(), 3);
        assert_eq!(export.messages()[0].id.as_deref(), Some("1165"));
        assert_eq!(export.messages()[0].content(), "hello");
        assert_eq!(export.messages()[1].kind(), "Unknown");
        assert_eq!(export.messages()[1].content(), "");
        assert_eq!(export.messages()[2].reactions().len(), 1);
    }

    #[test]
    fn test_from_reader() {
        let json = br#"{"messages": [{"type": "Default"}]}"#;
        let export = ChatExport::from_reader(&json[..]).unwrap();
        assert_eq!(export.into_messages()[0].kind(), "Default");
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = ChatExport::from_path("/definitely/not/here.json").unwrap_err();
        assert!(err.is_io());
    }
}
