//! Plain-text output writer.

use std::io::Write;

use crate::Message;
use crate::error::Result;

/// Formats one record as `author (timestamp): content`.
///
/// A missing author shows as `Unknown`; a missing timestamp or content is
/// left empty.
pub fn format_line(msg: &Message) -> String {
    format!(
        "{} ({}): {}",
        msg.display_author(),
        msg.timestamp(),
        msg.content()
    )
}

/// Writes one line per record.
pub fn write_text<'a, W, I>(mut writer: W, messages: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Message>,
{
    for msg in messages {
        writeln!(writer, "{}", format_line(msg))?;
    }
    writer.flush()?;
    Ok(())
}

/// Same as [`write_text`], but returns a String.
pub fn to_text<'a, I>(messages: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut buf = Vec::new();
    write_text(&mut buf, messages)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
