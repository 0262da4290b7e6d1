//! Unified error types for chatsieve.
//!
//! Every fallible operation in the library returns [`SieveError`]. Note that
//! a malformed *timestamp* is not an error: the normalizer reports it as
//! `None` and the filter excludes the record. Errors are reserved for input
//! that cannot be read or parsed as a document at all.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatsieve operations.
///
/// # Example
///
/// ```rust
/// use chatsieve::error::Result;
/// use chatsieve::Message;
///
/// fn load_nothing() -> Result<Vec<Message>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, SieveError>;

/// The error type for all chatsieve operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SieveError {
    /// An I/O error occurred while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The export document is not valid JSON.
    ///
    /// Carries the file path when the document was loaded from disk.
    #[error("Failed to parse chat export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The document is valid JSON but its structure is unusable.
    ///
    /// Raised when `messages` is present but is not an array.
    #[error("Invalid export format: {message}")]
    InvalidFormat {
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date in filter configuration.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// JSON serialization error while rendering output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl SieveError {
    /// Creates a document parse error.
    pub fn parse(source: serde_json::Error, path: Option<PathBuf>) -> Self {
        SieveError::Parse { source, path }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        SieveError::InvalidFormat {
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        SieveError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, SieveError::Io(_))
    }

    /// Returns `true` if this is a document parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, SieveError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, SieveError::InvalidFormat { .. })
    }

    /// Returns `true` if this is an invalid date error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, SieveError::InvalidDate { .. })
    }
}
