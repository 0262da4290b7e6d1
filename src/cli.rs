//! Command-line interface definition using clap.
//!
//! [`Args`] maps each flag onto one clause of
//! [`FilterCriteria`](crate::core::filter::FilterCriteria); every flag has a
//! default that leaves its clause inactive, except the date range, which
//! always applies.

use chrono::NaiveDate;
use clap::{Parser, ValueEnum};

use crate::core::filter::{
    ALL_TYPES, FilterCriteria, default_end_date, default_start_date, parse_date,
};

/// Filter a Discord chat export by date, type, author, content, and reaction.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatsieve")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatsieve export.json
    chatsieve export.json --start-date 2023-10-01 --end-date 2023-10-31
    chatsieve export.json --author alice --reaction thumbsup
    chatsieve export.json --type Reply --format jsonl
    cat export.json | chatsieve - --list-types")]
pub struct Args {
    /// Path to the JSON export, or `-` for stdin
    pub input: String,

    /// First date included (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date, default_value_t = default_start_date())]
    pub start_date: NaiveDate,

    /// Last date included (YYYY-MM-DD)
    #[arg(long, value_name = "DATE", value_parser = parse_date, default_value_t = default_end_date())]
    pub end_date: NaiveDate,

    /// Message type to keep, or `All`
    #[arg(long = "type", value_name = "TYPE", default_value = ALL_TYPES)]
    pub message_type: String,

    /// Keep messages whose author name contains this text
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub author: String,

    /// Keep messages whose content contains this text
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub content: String,

    /// Keep messages with a reaction whose emoji name contains this text (e.g. thumbsup)
    #[arg(long, value_name = "TEXT", default_value = "")]
    pub reaction: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Print the distinct message types in the export and exit
    #[arg(long)]
    pub list_types: bool,
}

impl Args {
    /// Builds the filter criteria described by the flags.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new()
            .with_start_date(self.start_date)
            .with_end_date(self.end_date)
            .with_type(self.message_type.as_str())
            .with_author(self.author.as_str())
            .with_content(self.content.as_str())
            .with_reaction(self.reaction.as_str())
    }

    /// Returns `true` if the export is read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input == "-"
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum OutputFormat {
    /// `author (timestamp): content` lines, with match counts
    #[default]
    Text,

    /// CSV with semicolon delimiter
    Csv,

    /// JSON array of the matching records
    Json,

    /// One matching record per line (ideal for piping)
    #[value(alias = "ndjson")]
    Jsonl,
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Text => crate::format::OutputFormat::Text,
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}
