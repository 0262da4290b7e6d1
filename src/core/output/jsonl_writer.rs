//! JSON Lines output writer.

use std::io::Write;

use crate::Message;
use crate::error::Result;

/// Writes one compact JSON record per line.
///
/// ```jsonl
/// {"type":"Default","author":{"name":"Alice"},"content":"hello"}
/// {"type":"Default","author":{"name":"Bob"},"content":"world"}
/// ```
pub fn write_jsonl<'a, W, I>(mut writer: W, messages: I) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Message>,
{
    for msg in messages {
        serde_json::to_writer(&mut writer, msg)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}

/// Same as [`write_jsonl`], but returns a String.
pub fn to_jsonl<'a, I>(messages: I) -> Result<String>
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut buf = Vec::new();
    write_jsonl(&mut buf, messages)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
