#![forbid(unsafe_code)]

//! Plain-text views of a buffer for assertions in tests.

use crate::buffer::Buffer;

/// Convert a buffer to text, one line per row.
///
/// Empty cells become spaces and continuation cells are skipped, so each
/// wide character appears once.
pub fn buffer_to_text(buf: &Buffer) -> String {
    let capacity = (buf.width() as usize + 1) * buf.height() as usize;
    let mut out = String::with_capacity(capacity);

    for y in 0..buf.height() {
        if y > 0 {
            out.push('\n');
        }
        out.push_str(&row_text(buf, y));
    }
    out
}

/// Text of a single row (empty string when `y` is out of range).
pub fn row_text(buf: &Buffer, y: u16) -> String {
    let mut out = String::with_capacity(buf.width() as usize);
    if y >= buf.height() {
        return out;
    }
    for x in 0..buf.width() {
        let Some(cell) = buf.get(x, y) else {
            continue;
        };
        if cell.is_continuation() {
            continue;
        }
        out.push(cell.content.as_char().unwrap_or(' '));
    }
    out
}
