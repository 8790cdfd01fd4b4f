#![forbid(unsafe_code)]

//! Styled single-line text for widget labels.
//!
//! ```
//! use cascade_text::{Line, Span};
//! use cascade_style::Style;
//!
//! let line = Line::from_spans([
//!     Span::raw("Status: "),
//!     Span::styled("OK", Style::new().bold()),
//! ]);
//! assert_eq!(line.to_plain_text(), "Status: OK");
//! assert_eq!(line.width(), 10);
//!
//! let mut long = Line::raw("hello world");
//! long.truncate(8, Some("…"));
//! assert_eq!(long.to_plain_text(), "hello w…");
//! ```

pub mod text;

pub use text::{Line, Span};

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width of a string in cells.
#[inline]
pub fn display_width(s: &str) -> usize {
    if s.is_ascii() {
        return s.bytes().filter(|b| (0x20..=0x7E).contains(b)).count();
    }
    s.graphemes(true).map(grapheme_width).sum()
}

/// Display width of a single grapheme cluster.
///
/// Graphemes holding a control character occupy no cells.
#[inline]
pub fn grapheme_width(g: &str) -> usize {
    if g.chars().any(char::is_control) {
        return 0;
    }
    UnicodeWidthStr::width(g)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_width_skips_controls() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("a\tb"), 2);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn control_graphemes_have_no_width() {
        assert_eq!(grapheme_width("\t"), 0);
        assert_eq!(grapheme_width("\r\n"), 0);
        assert_eq!(grapheme_width("\u{1b}"), 0);
        assert_eq!(display_width("é\tb"), 2);
        assert_eq!(display_width("ab\tcd"), display_width("abcd"));
    }

    #[test]
    fn cjk_is_double_width() {
        assert_eq!(display_width("中文"), 4);
        assert_eq!(display_width("a中"), 3);
    }
}
