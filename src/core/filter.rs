//! Filter messages by date range, type, author, content, and reaction.
//!
//! This module provides [`FilterCriteria`] for defining filter criteria and
//! [`filter_messages`] / [`apply_filters`] for filtering message collections.
//!
//! # Filter Types
//!
//! | Clause | Method | Passes when |
//! |--------|--------|-------------|
//! | Date | [`with_start_date`](FilterCriteria::with_start_date), [`with_end_date`](FilterCriteria::with_end_date) | timestamp date within the inclusive range |
//! | Type | [`with_type`](FilterCriteria::with_type) | `type` equals the selection exactly, or selection is `All` |
//! | Author | [`with_author`](FilterCriteria::with_author) | author name contains the substring |
//! | Content | [`with_content`](FilterCriteria::with_content) | content contains the substring |
//! | Reaction | [`with_reaction`](FilterCriteria::with_reaction) | any reaction emoji name contains the substring |
//!
//! # Example
//!
//! ```
//! use chatsieve::core::filter::{FilterCriteria, filter_messages};
//! use chatsieve::Message;
//!
//! # fn main() -> chatsieve::Result<()> {
//! let messages = vec![
//!     Message::new().with_author("Alice").with_content("hello").with_timestamp("2023-10-20T12:00:00Z"),
//!     Message::new().with_author("Bob").with_content("world").with_timestamp("2023-10-22T12:00:00Z"),
//! ];
//!
//! let criteria = FilterCriteria::new()
//!     .with_date_from("2023-10-20")?
//!     .with_date_to("2023-10-21")?;
//!
//! let filtered = filter_messages(&messages, &criteria);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].author_name(), "Alice");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - The date range is always active. A record whose timestamp is present but
//!   unparsable is **excluded**; a record with no timestamp (or an empty one)
//!   passes the date clause.
//! - The date compared is the one written in the timestamp, at its own offset.
//! - Substring matching is case-insensitive; type matching is exact.
//! - Empty substrings disable their clause. Clauses are combined with AND.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::Message;
use crate::core::timestamp::normalize;
use crate::error::SieveError;

/// Sentinel that disables the type clause.
pub const ALL_TYPES: &str = "All";

/// Default lower bound of the date range.
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 10, 20).expect("valid calendar date")
}

/// Default upper bound of the date range.
pub fn default_end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 10, 21).expect("valid calendar date")
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(date_str: &str) -> Result<NaiveDate, SieveError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| SieveError::invalid_date(date_str))
}

/// Which message types pass the type clause.
///
/// Converts from strings: `"All"` is [`TypeSelection::All`], anything else
/// selects exactly that type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeSelection {
    /// Every type passes.
    #[default]
    All,
    /// Only records whose type equals this string pass.
    Only(String),
}

impl TypeSelection {
    pub fn is_all(&self) -> bool {
        matches!(self, TypeSelection::All)
    }

    fn accepts(&self, kind: &str) -> bool {
        match self {
            TypeSelection::All => true,
            TypeSelection::Only(selected) => selected == kind,
        }
    }
}

impl From<&str> for TypeSelection {
    fn from(s: &str) -> Self {
        if s == ALL_TYPES {
            TypeSelection::All
        } else {
            TypeSelection::Only(s.to_string())
        }
    }
}

impl From<String> for TypeSelection {
    fn from(s: String) -> Self {
        if s == ALL_TYPES {
            TypeSelection::All
        } else {
            TypeSelection::Only(s)
        }
    }
}

impl From<TypeSelection> for String {
    fn from(selection: TypeSelection) -> Self {
        match selection {
            TypeSelection::All => ALL_TYPES.to_string(),
            TypeSelection::Only(kind) => kind,
        }
    }
}

impl fmt::Display for TypeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSelection::All => f.write_str(ALL_TYPES),
            TypeSelection::Only(kind) => f.write_str(kind),
        }
    }
}

/// Criteria for filtering messages.
///
/// Built once and passed by reference; filtering never changes it. All
/// clauses are combined with AND logic.
///
/// # Examples
///
/// ```
/// use chatsieve::core::filter::FilterCriteria;
///
/// # fn main() -> chatsieve::Result<()> {
/// let criteria = FilterCriteria::new()
///     .with_date_from("2023-10-01")?
///     .with_date_to("2023-10-31")?
///     .with_type("Default")
///     .with_author("ali")
///     .with_reaction("thumbs");
///
/// assert!(criteria.is_restrictive());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// First date included (inclusive).
    pub start_date: NaiveDate,

    /// Last date included (inclusive).
    pub end_date: NaiveDate,

    /// Type selection, `All` to disable.
    pub selected_type: TypeSelection,

    /// Case-insensitive author name substring, empty to disable.
    pub author_substring: String,

    /// Case-insensitive content substring, empty to disable.
    pub content_substring: String,

    /// Case-insensitive reaction emoji name substring, empty to disable.
    pub reaction_substring: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
            end_date: default_end_date(),
            selected_type: TypeSelection::All,
            author_substring: String::new(),
            content_substring: String::new(),
            reaction_substring: String::new(),
        }
    }
}

impl FilterCriteria {
    /// Creates criteria with the default date range and no other clause.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = date;
        self
    }

    #[must_use]
    pub fn with_end_date(mut self, date: NaiveDate) -> Self {
        self.end_date = date;
        self
    }

    /// Sets the start date from a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(self, date_str: &str) -> Result<Self, SieveError> {
        Ok(self.with_start_date(parse_date(date_str)?))
    }

    /// Sets the end date from a `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(self, date_str: &str) -> Result<Self, SieveError> {
        Ok(self.with_end_date(parse_date(date_str)?))
    }

    /// Sets the type selection. `"All"` disables the clause.
    #[must_use]
    pub fn with_type(mut self, selection: impl Into<TypeSelection>) -> Self {
        self.selected_type = selection.into();
        self
    }

    #[must_use]
    pub fn with_author(mut self, substring: impl Into<String>) -> Self {
        self.author_substring = substring.into();
        self
    }

    #[must_use]
    pub fn with_content(mut self, substring: impl Into<String>) -> Self {
        self.content_substring = substring.into();
        self
    }

    #[must_use]
    pub fn with_reaction(mut self, substring: impl Into<String>) -> Self {
        self.reaction_substring = substring.into();
        self
    }

    /// Returns `true` if any clause besides the date range is active.
    pub fn is_restrictive(&self) -> bool {
        !self.selected_type.is_all()
            || !self.author_substring.is_empty()
            || !self.content_substring.is_empty()
            || !self.reaction_substring.is_empty()
    }

    /// Returns `true` if the range cannot contain any date.
    pub fn has_empty_range(&self) -> bool {
        self.start_date > self.end_date
    }

    /// Returns `true` if `msg` passes every clause.
    ///
    /// Lowercases the substring clauses on every call. Loops over many
    /// records should use [`matcher`](Self::matcher), [`filter_messages`],
    /// or [`apply_filters`] instead.
    pub fn matches(&self, msg: &Message) -> bool {
        self.matcher().matches(msg)
    }

    /// Prepares the criteria for repeated matching.
    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(self)
    }
}

/// Criteria with lowercased needles, computed once per filtering pass.
#[derive(Debug, Clone)]
pub struct Matcher<'a> {
    criteria: &'a FilterCriteria,
    author: String,
    content: String,
    reaction: String,
}

impl<'a> Matcher<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            criteria,
            author: criteria.author_substring.to_lowercase(),
            content: criteria.content_substring.to_lowercase(),
            reaction: criteria.reaction_substring.to_lowercase(),
        }
    }

    /// Returns `true` if `msg` passes every clause.
    pub fn matches(&self, msg: &Message) -> bool {
        self.date_matches(msg)
            && self.criteria.selected_type.accepts(msg.kind())
            && contains_ci(msg.author_name(), &self.author)
            && contains_ci(msg.content(), &self.content)
            && self.reaction_matches(msg)
    }

    fn date_matches(&self, msg: &Message) -> bool {
        let raw = msg.timestamp();
        if raw.is_empty() {
            return true;
        }

        match normalize(raw) {
            Some(ts) => {
                let date = ts.date();
                self.criteria.start_date <= date && date <= self.criteria.end_date
            }
            None => {
                tracing::debug!(timestamp = raw, "excluding record with unparsable timestamp");
                false
            }
        }
    }

    fn reaction_matches(&self, msg: &Message) -> bool {
        self.reaction.is_empty()
            || msg
                .reactions()
                .iter()
                .any(|r| contains_ci(r.emoji_name(), &self.reaction))
    }
}

/// Case-insensitive containment against an already lowercased needle.
///
/// An empty needle always matches.
fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    needle_lower.is_empty() || haystack.to_lowercase().contains(needle_lower)
}

/// Returns `true` if `msg` passes every clause of `criteria`.
pub fn matches(msg: &Message, criteria: &FilterCriteria) -> bool {
    criteria.matches(msg)
}

/// Returns references to the messages that pass `criteria`, in input order.
///
/// The input is left untouched.
pub fn filter_messages<'a>(messages: &'a [Message], criteria: &FilterCriteria) -> Vec<&'a Message> {
    let matcher = Matcher::new(criteria);
    messages.iter().filter(|msg| matcher.matches(msg)).collect()
}

/// Filters an owned collection, keeping input order.
///
/// # Examples
///
/// ```
/// use chatsieve::core::filter::{FilterCriteria, apply_filters};
/// use chatsieve::Message;
///
/// let messages = vec![
///     Message::new().with_content("Hello"),
///     Message::new().with_content("Goodbye"),
/// ];
///
/// let criteria = FilterCriteria::new().with_content("HELLO");
/// let filtered = apply_filters(messages, &criteria);
///
/// assert_eq!(filtered.len(), 1);
/// assert_eq!(filtered[0].content(), "Hello");
/// ```
pub fn apply_filters(messages: Vec<Message>, criteria: &FilterCriteria) -> Vec<Message> {
    let matcher = Matcher::new(criteria);
    messages
        .into_iter()
        .filter(|msg| matcher.matches(msg))
        .collect()
}

/// Sorted, de-duplicated message types, with `"Unknown"` for records
/// without a type.
pub fn message_types(messages: &[Message]) -> Vec<String> {
    messages
        .iter()
        .map(Message::kind)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(author: &str, content: &str, ts: Option<&str>) -> Message {
        let mut msg = Message::new()
            .with_kind("Default")
            .with_author(author)
            .with_content(content);
        if let Some(ts) = ts {
            msg = msg.with_timestamp(ts);
        }
        msg
    }

    fn october(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2023, 10, day).unwrap()
    }

    // =========================================================================
    // Date clause
    // =========================================================================

    #[test]
    fn test_date_range_inclusive() {
        let messages = vec![
            msg("A", "19th", Some("2023-10-19T23:59:59Z")),
            msg("A", "20th", Some("2023-10-20T00:00:00Z")),
            msg("A", "21st", Some("2023-10-21T23:59:59.9Z")),
            msg("A", "22nd", Some("2023-10-22T00:00:00Z")),
        ];

        let filtered = filter_messages(&messages, &FilterCriteria::new());
        let contents: Vec<_> = filtered.iter().map(|m| m.content()).collect();
        assert_eq!(contents, ["20th", "21st"]);
    }

    #[test]
    fn test_missing_timestamp_passes_date_clause() {
        let messages = vec![msg("A", "no ts", None)];
        let criteria = FilterCriteria::new()
            .with_start_date(october(1))
            .with_end_date(october(1));

        assert_eq!(filter_messages(&messages, &criteria).len(), 1);
    }

    #[test]
    fn test_empty_timestamp_passes_date_clause() {
        let messages = vec![msg("A", "empty ts", Some(""))];
        assert_eq!(filter_messages(&messages, &FilterCriteria::new()).len(), 1);
    }

    #[test]
    fn test_malformed_timestamp_is_excluded() {
        let messages = vec![msg("A", "bad", Some("yesterday at noon"))];
        assert!(filter_messages(&messages, &FilterCriteria::new()).is_empty());
    }

    #[test]
    fn test_date_uses_written_offset() {
        // 23:30 at -05:00 is the 21st in UTC, but the written date is the 20th.
        let messages = vec![msg("A", "late", Some("2023-10-20T23:30:00.5-05:00"))];
        let criteria = FilterCriteria::new()
            .with_start_date(october(20))
            .with_end_date(october(20));

        assert_eq!(filter_messages(&messages, &criteria).len(), 1);
    }

    #[test]
    fn test_inverted_range_excludes_timestamped() {
        let messages = vec![
            msg("A", "ts", Some("2023-10-20T12:00:00Z")),
            msg("A", "no ts", None),
        ];
        let criteria = FilterCriteria::new()
            .with_start_date(october(21))
            .with_end_date(october(20));

        assert!(criteria.has_empty_range());
        let filtered = filter_messages(&messages, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content(), "no ts");
    }

    // =========================================================================
    // Type clause
    // =========================================================================

    #[test]
    fn test_type_exact_match() {
        let messages = vec![
            msg("A", "1", None).with_kind("Default"),
            msg("A", "2", None).with_kind("Reply"),
            msg("A", "3", None).with_kind("default"),
        ];

        let criteria = FilterCriteria::new().with_type("Default");
        let filtered = filter_messages(&messages, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content(), "1");
    }

    #[test]
    fn test_missing_type_matches_unknown() {
        let mut untyped = msg("A", "untyped", None);
        untyped.kind = None;
        let messages = vec![untyped, msg("A", "typed", None)];

        let criteria = FilterCriteria::new().with_type("Unknown");
        let filtered = filter_messages(&messages, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content(), "untyped");
    }

    #[test]
    fn test_type_all_sentinel() {
        assert_eq!(TypeSelection::from("All"), TypeSelection::All);
        assert_eq!(
            TypeSelection::from("Reply"),
            TypeSelection::Only("Reply".to_string())
        );
        assert!(!FilterCriteria::new().with_type("All").is_restrictive());
    }

    // =========================================================================
    // Substring clauses
    // =========================================================================

    #[test]
    fn test_author_case_insensitive() {
        let messages = vec![
            msg("Alice", "1", None),
            msg("MALICE", "2", None),
            msg("Bob", "3", None),
        ];

        let filtered = filter_messages(&messages, &FilterCriteria::new().with_author("aLiC"));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_missing_author_excluded_by_author_filter() {
        let mut anon = msg("x", "anon", None);
        anon.author = None;
        let messages = vec![anon];

        assert!(filter_messages(&messages, &FilterCriteria::new().with_author("x")).is_empty());
        assert_eq!(filter_messages(&messages, &FilterCriteria::new()).len(), 1);
    }

    #[test]
    fn test_missing_content() {
        let mut empty = msg("A", "", None);
        empty.content = None;
        let messages = vec![empty];

        assert!(filter_messages(&messages, &FilterCriteria::new().with_content("hi")).is_empty());
        assert_eq!(filter_messages(&messages, &FilterCriteria::new()).len(), 1);
    }

    #[test]
    fn test_content_unicode_case() {
        let messages = vec![msg("A", "ПРИВЕТ мир", None)];
        let criteria = FilterCriteria::new().with_content("привет");
        assert_eq!(filter_messages(&messages, &criteria).len(), 1);
    }

    #[test]
    fn test_reaction_any_matches() {
        let messages = vec![
            msg("A", "1", None).with_reaction("fire").with_reaction("ThumbsUp"),
            msg("A", "2", None).with_reaction("heart"),
            msg("A", "3", None),
        ];

        let filtered = filter_messages(&messages, &FilterCriteria::new().with_reaction("thumbs"));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content(), "1");
    }

    #[test]
    fn test_reaction_without_emoji_name() {
        let mut record = msg("A", "1", None);
        record.reactions = Some(vec![crate::message::Reaction::default()]);
        let messages = vec![record];

        assert!(filter_messages(&messages, &FilterCriteria::new().with_reaction("x")).is_empty());
    }

    // =========================================================================
    // Orchestration
    // =========================================================================

    #[test]
    fn test_combined_clauses() {
        let messages = vec![
            msg("Alice", "hello there", Some("2023-10-20T09:00:00Z")).with_reaction("wave"),
            msg("Alice", "hello again", Some("2023-10-20T10:00:00Z")),
            msg("Bob", "hello", Some("2023-10-20T11:00:00Z")).with_reaction("wave"),
        ];

        let criteria = FilterCriteria::new()
            .with_type("Default")
            .with_author("alice")
            .with_content("HELLO")
            .with_reaction("wav");

        let filtered = filter_messages(&messages, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].content(), "hello there");
    }

    #[test]
    fn test_apply_filters_preserves_order() {
        let messages: Vec<_> = (0..10)
            .map(|i| msg(if i % 2 == 0 { "Even" } else { "Odd" }, &i.to_string(), None))
            .collect();

        let filtered = apply_filters(messages, &FilterCriteria::new().with_author("even"));
        let contents: Vec<_> = filtered.iter().map(|m| m.content()).collect();
        assert_eq!(contents, ["0", "2", "4", "6", "8"]);
    }

    #[test]
    fn test_matches_free_function() {
        let m = msg("Alice", "hi", Some("2023-10-20T12:00:00Z"));
        assert!(matches(&m, &FilterCriteria::new()));
        assert!(!matches(&m, &FilterCriteria::new().with_author("bob")));
    }

    #[test]
    fn test_message_types_sorted_unique() {
        let mut untyped = Message::new();
        untyped.kind = None;
        let messages = vec![
            Message::new().with_kind("Reply"),
            Message::new().with_kind("Default"),
            untyped,
            Message::new().with_kind("Reply"),
        ];

        assert_eq!(message_types(&messages), ["Default", "Reply", "Unknown"]);
        assert!(message_types(&[]).is_empty());
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    #[test]
    fn test_invalid_date_format() {
        let result = FilterCriteria::new().with_date_from("20-10-2023");
        assert!(matches!(result, Err(SieveError::InvalidDate { .. })));
    }

    #[test]
    fn test_matcher_agrees_with_matches() {
        let messages = vec![
            msg("Alice", "Hello there", Some("2023-10-20T09:00:00Z")).with_reaction("Wave"),
            msg("alice", "hello", Some("2023-10-25T09:00:00Z")).with_reaction("wave"),
            msg("Bob", "HELLO", None).with_reaction("wave"),
            msg("ALICE", "bye", None).with_reaction("WAVE"),
            msg("Alice", "hello", Some("garbage")),
        ];
        let criteria = FilterCriteria::new()
            .with_author("ALICE")
            .with_content("hello")
            .with_reaction("wAvE");

        let matcher = criteria.matcher();
        let by_matcher: Vec<bool> = messages.iter().map(|m| matcher.matches(m)).collect();
        let by_criteria: Vec<bool> = messages.iter().map(|m| criteria.matches(m)).collect();

        assert_eq!(by_matcher, [true, false, false, false, false]);
        assert_eq!(by_matcher, by_criteria);
    }

    #[test]
    fn test_default_range() {
        let criteria = FilterCriteria::default();
        assert_eq!(criteria.start_date, october(20));
        assert_eq!(criteria.end_date, october(21));
        assert!(!criteria.is_restrictive());
    }

    #[test]
    fn test_deserialize_partial_criteria() {
        let criteria: FilterCriteria = serde_json::from_str(
            r#"{"end_date": "2023-10-31", "selected_type": "Reply", "reaction_substring": "fire"}"#,
        )
        .unwrap();

        assert_eq!(criteria.start_date, october(20));
        assert_eq!(criteria.end_date, october(31));
        assert_eq!(criteria.selected_type, TypeSelection::Only("Reply".into()));
        assert_eq!(criteria.reaction_substring, "fire");
        assert!(criteria.author_substring.is_empty());
    }

    #[test]
    fn test_serialize_type_selection_as_string() {
        let json = serde_json::to_value(FilterCriteria::new()).unwrap();
        assert_eq!(json["selected_type"], "All");
        assert_eq!(json["start_date"], "2023-10-20");
    }
}
