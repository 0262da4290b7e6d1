//! JSON output writer.

use std::io::Write;

use crate::Message;
use crate::error::Result;

/// Writes records as a pretty-printed JSON array.
///
/// Records are written as they were loaded, unknown fields included.
pub fn write_json<'a, W, I>(mut writer: W, messages: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Message>,
{
    let records: Vec<&Message> = messages.into_iter().collect();
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Same as [`write_json`], but returns a String.
pub fn to_json<'a, I>(messages: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Message>,
{
    let records: Vec<&Message> = messages.into_iter().collect();
    Ok(serde_json::to_string_pretty(&records)?)
}
