//! Output format selection.
//!
//! [`OutputFormat`] names how filtered records are rendered and
//! [`write_to_format`] dispatches to the matching writer in
//! [`core::output`](crate::core::output).
//!
//! # Example
//!
//! ```rust
//! # #[cfg(feature = "json-output")]
//! # fn example() -> chatsieve::Result<()> {
//! use chatsieve::format::{OutputFormat, to_format_string};
//! use chatsieve::Message;
//!
//! let messages = vec![Message::new().with_author("Alice").with_content("hi")];
//!
//! let text = to_format_string(&messages, OutputFormat::Text)?;
//! assert_eq!(text, "Alice (): hi\n");
//!
//! let format: OutputFormat = "ndjson".parse().unwrap();
//! assert_eq!(format, OutputFormat::Jsonl);
//! # Ok(())
//! # }
//! # #[cfg(feature = "json-output")]
//! # example().unwrap();
//! ```

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::Message;
use crate::error::SieveError;

/// How filtered records are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// One `author (timestamp): content` line per record (default)
    #[default]
    Text,

    /// Semicolon-delimited `Author;Timestamp;Content`
    Csv,

    /// Pretty JSON array of the original records
    Json,

    /// One original record per line. Also known as NDJSON.
    Jsonl,
}

impl OutputFormat {
    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "csv", "json", "jsonl", "ndjson"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[
            OutputFormat::Text,
            OutputFormat::Csv,
            OutputFormat::Json,
            OutputFormat::Jsonl,
        ]
    }

    /// Returns `true` if the output is machine-readable data, so nothing
    /// else may be printed to the same stream.
    pub fn is_structured(&self) -> bool {
        !matches!(self, OutputFormat::Text)
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

fn missing_feature(format: OutputFormat) -> SieveError {
    let feature = match format {
        OutputFormat::Csv => "csv-output",
        _ => "json-output",
    };
    SieveError::invalid_format(format!(
        "Output format {} requires the '{}' feature to be enabled",
        format, feature
    ))
}

/// Writes records to `writer` in the specified format.
///
/// # Errors
///
/// Returns an error if:
/// - The required feature for the format is not enabled
/// - The writer fails
#[allow(unused_mut)]
pub fn write_to_format<'a, W, I>(
    mut writer: W,
    messages: I,
    format: OutputFormat,
) -> Result<(), SieveError>
where
    W: Write,
    I: IntoIterator<Item = &'a Message>,
{
    match format {
        OutputFormat::Text => crate::core::output::write_text(&mut writer, messages),
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::core::output::write_csv(&mut writer, messages),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::core::output::write_json(&mut writer, messages),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::core::output::write_jsonl(&mut writer, messages),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Renders records to a string in the specified format.
pub fn to_format_string<'a, I>(messages: I, format: OutputFormat) -> Result<String, SieveError>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut buf = Vec::new();
    write_to_format(&mut buf, messages, format)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
