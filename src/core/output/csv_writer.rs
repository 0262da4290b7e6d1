//! CSV output writer.

use std::io::Write;

use crate::Message;
use crate::error::Result;

/// Writes records as CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: `Author`, `Timestamp`, `Content`
/// - Missing author is `Unknown`, other missing fields are empty
pub fn write_csv<'a, W, I>(writer: W, messages: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Message>,
{
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    writer.write_record(["Author", "Timestamp", "Content"])?;

    for msg in messages {
        writer.write_record([msg.display_author(), msg.timestamp(), msg.content()])?;
    }

    writer.flush()?;
    Ok(())
}

/// Same as [`write_csv`], but returns a String.
pub fn to_csv<'a, I>(messages: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut buf = Vec::new();
    write_csv(&mut buf, messages)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
