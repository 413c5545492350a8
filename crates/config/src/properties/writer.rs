//! Writer for the properties text format.
//!
//! Responsibilities:
//! - Encode keys and values with the escapes the scanner understands.
//! - Emit one `key=value` line per entry.
//!
//! Invariants:
//! - Output re-parses to the same keys and values.
//! - Non-ASCII characters are always written as lowercase `\uXXXX` escapes.

use std::io::Write;

use crate::error::Result;

/// Writes every entry as a `key=value` line. Entry order is unspecified.
pub(crate) fn write_entries<'a, W: Write + ?Sized>(
    writer: &mut W,
    entries: impl IntoIterator<Item = (&'a String, &'a String)>,
) -> Result<usize> {
    let mut count = 0;
    let mut line = String::new();
    for (key, value) in entries {
        line.clear();
        escape_into(&mut line, key, true);
        line.push('=');
        escape_into(&mut line, value, false);
        line.push('\n');
        writer.write_all(line.as_bytes())?;
        count += 1;
    }
    Ok(count)
}

/// Appends the escaped form of `text` to `out`.
///
/// Spaces are always escaped in keys. In values only the leading run of
/// spaces is escaped, since the scanner would otherwise strip it.
pub(crate) fn escape_into(out: &mut String, text: &str, is_key: bool) {
    let mut leading = true;
    for c in text.chars() {
        if c != ' ' {
            leading = false;
        }
        match c {
            ':' | '=' | '#' | '!' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' ' if is_key || leading => out.push_str("\\ "),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x0c' => out.push_str("\\f"),
            c if u32::from(c) >= 0x80 => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04x}", unit));
                }
            }
            c => out.push(c),
        }
    }
}
