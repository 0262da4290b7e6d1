//! # chatsieve CLI
//!
//! Command-line interface for the chatsieve library.

use std::io::{self, Write};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatsieve::cli::Args;
use chatsieve::core::{filter_messages, message_types};
use chatsieve::document::ChatExport;
use chatsieve::format::{OutputFormat, write_to_format};
use chatsieve::SieveError;

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout only carries results. `RUST_LOG` overrides
/// the default `warn` level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), SieveError> {
    let args = <Args as ClapParser>::parse();

    let export = load_export(&args)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list_types {
        for kind in message_types(export.messages()) {
            writeln!(out, "{}", kind)?;
        }
        return Ok(());
    }

    let criteria = args.criteria();
    if criteria.has_empty_range() {
        tracing::warn!(
            start = %criteria.start_date,
            end = %criteria.end_date,
            "start date is after end date; only messages without a timestamp can match"
        );
    }

    let format: OutputFormat = args.format.into();
    if !format.is_structured() {
        writeln!(out, "Loaded {} messages.", export.len())?;
    }

    let filter_start = Instant::now();
    let filtered = filter_messages(export.messages(), &criteria);
    tracing::info!(
        total = export.len(),
        matched = filtered.len(),
        elapsed = ?filter_start.elapsed(),
        "filtered messages"
    );

    if !format.is_structured() {
        writeln!(out, "Found {} messages matching filters.", filtered.len())?;
    }

    write_to_format(&mut out, filtered, format)
}

fn load_export(args: &Args) -> Result<ChatExport, SieveError> {
    if args.reads_stdin() {
        let export = ChatExport::from_reader(io::stdin().lock())?;
        tracing::info!(messages = export.len(), "loaded chat export from stdin");
        Ok(export)
    } else {
        ChatExport::from_path(&args.input)
    }
}
