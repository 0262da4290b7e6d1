//! Message records as they appear in a chat export.
//!
//! Every field of a [`Message`] is optional: exports are accessed
//! best-effort, and each accessor degrades to a documented default instead
//! of failing. Fields the filter does not know about are preserved in
//! [`Message::extra`] so a filtered record can be rendered back to JSON
//! without losing anything.
//!
//! | Accessor | Missing field yields |
//! |----------|----------------------|
//! | [`Message::kind`] | `"Unknown"` |
//! | [`Message::author_name`] | `""` |
//! | [`Message::display_author`] | `"Unknown"` |
//! | [`Message::content`] | `""` |
//! | [`Message::timestamp`] | `""` |
//! | [`Message::reactions`] | empty slice |
//! | [`Reaction::emoji_name`] | `""` |
//!
//! # Example
//!
//! ```
//! use chatsieve::Message;
//!
//! let msg: Message = serde_json::from_str(r#"{"author": {"name": "Alice"}}"#)?;
//! assert_eq!(msg.author_name(), "Alice");
//! assert_eq!(msg.kind(), "Unknown");
//! assert_eq!(msg.content(), "");
//! assert!(msg.reactions().is_empty());
//! # Ok::<(), serde_json::Error>(())
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Type reported for records without a `type` field.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Author shown for records without an author name.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A single message record from a chat export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Platform-specific message identifier (Discord snowflake).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: Option<String>,

    /// Raw ISO-8601-like timestamp, kept verbatim for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default, deserialize_with = "lenient::field")]
    pub timestamp: Option<String>,

    /// Message type, e.g. `Default` or `Reply`.
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default, deserialize_with = "lenient::field")]
    pub kind: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default, deserialize_with = "lenient::field")]
    pub author: Option<Author>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default, deserialize_with = "lenient::field")]
    pub content: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default, deserialize_with = "lenient::list")]
    pub reactions: Option<Vec<Reaction>>,

    /// Any other fields of the record, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Message author.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default, deserialize_with = "lenient::field")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A reaction attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default, deserialize_with = "lenient::field")]
    pub emoji: Option<Emoji>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The emoji of a reaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Emoji {
    /// Emoji name, e.g. `thumbsup` or the literal character.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default, deserialize_with = "lenient::field")]
    pub name: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    /// Creates an empty record. Every accessor returns its default.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn with_author(mut self, name: impl Into<String>) -> Self {
        self.author = Some(Author {
            name: Some(name.into()),
            ..Author::default()
        });
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Appends a reaction with the given emoji name.
    #[must_use]
    pub fn with_reaction(mut self, emoji_name: impl Into<String>) -> Self {
        self.reactions
            .get_or_insert_with(Vec::new)
            .push(Reaction::named(emoji_name));
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Raw timestamp string, or `""` when absent.
    pub fn timestamp(&self) -> &str {
        self.timestamp.as_deref().unwrap_or_default()
    }

    /// Message type, or [`UNKNOWN_TYPE`] when absent.
    pub fn kind(&self) -> &str {
        self.kind.as_deref().unwrap_or(UNKNOWN_TYPE)
    }

    /// Author name for matching, or `""` when absent.
    pub fn author_name(&self) -> &str {
        self.author
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .unwrap_or_default()
    }

    /// Author name for display, or [`UNKNOWN_AUTHOR`] when absent.
    pub fn display_author(&self) -> &str {
        self.author
            .as_ref()
            .and_then(|a| a.name.as_deref())
            .unwrap_or(UNKNOWN_AUTHOR)
    }

    /// Message text, or `""` when absent.
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// Reactions in export order, or an empty slice when absent.
    pub fn reactions(&self) -> &[Reaction] {
        self.reactions.as_deref().unwrap_or_default()
    }
}

impl Reaction {
    /// Creates a reaction whose emoji has the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            emoji: Some(Emoji {
                name: Some(name.into()),
                ..Emoji::default()
            }),
            ..Self::default()
        }
    }

    /// Emoji name, or `""` when the emoji or its name is absent.
    pub fn emoji_name(&self) -> &str {
        self.emoji
            .as_ref()
            .and_then(|e| e.name.as_deref())
            .unwrap_or_default()
    }
}

/// Field deserializers that read a wrongly typed value as absent.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(super) fn field<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).ok())
    }

    pub(super) fn id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(id) => Some(id),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        })
    }

    /// Keeps the readable items of an array. Anything else is absent.
    pub(super) fn list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => Some(
                items
                    .into_iter()
                    .filter_map(|item| serde_json::from_value(item).ok())
                    .collect(),
            ),
            _ => None,
        })
    }
}
