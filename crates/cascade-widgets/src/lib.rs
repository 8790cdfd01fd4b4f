#![forbid(unsafe_code)]

//! Widgets for Cascade.
//!
//! The crate's one widget is the [`cascader`](crate::cascader) menu; the
//! traits and draw helpers here are shared plumbing.

pub mod cascader;

use cascade_core::geometry::Rect;
use cascade_render::buffer::Buffer;
use cascade_render::cell::Cell;
use cascade_render::frame::Frame;
use cascade_style::Style;
use cascade_text::{Line, grapheme_width};
use unicode_segmentation::UnicodeSegmentation;

/// A `Widget` is a renderable component.
///
/// Widgets render themselves into a `Frame` within a given `Rect`. The frame
/// carries the cell buffer and, when enabled, the mouse hit grid.
pub trait Widget {
    /// Render the widget into the frame at the given area.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// A `StatefulWidget` is a widget that renders based on mutable state.
pub trait StatefulWidget {
    type State;

    /// Render the widget into the frame with mutable state.
    fn render(&self, area: Rect, frame: &mut Frame, state: &mut Self::State);
}

/// Fill `area` with blanks carrying `style`.
pub(crate) fn clear_area(buf: &mut Buffer, area: Rect, style: Style) {
    let mut blank = Cell::from_char(' ');
    style.apply_to(&mut blank);
    buf.fill(area, blank);
}

/// Draw a text span into a buffer at the given position.
///
/// Returns the x position after the last drawn character.
/// Stops at `max_x` (exclusive). Zero-width and control graphemes are not
/// drawn, so the advance always equals [`cascade_text::display_width`].
pub(crate) fn draw_text_span(
    buf: &mut Buffer,
    mut x: u16,
    y: u16,
    content: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    for grapheme in content.graphemes(true) {
        if x >= max_x {
            break;
        }
        let w = grapheme_width(grapheme);
        if w == 0 {
            continue;
        }
        if x as usize + w > max_x as usize {
            break;
        }
        if let Some(c) = grapheme.chars().next() {
            let mut cell = Cell::from_char(c);
            style.apply_to(&mut cell);
            buf.set(x, y, cell);
        }
        x = x.saturating_add(w as u16);
    }
    x
}

/// Draw every span of `line`, each span's own style layered over `base`.
pub(crate) fn draw_line(buf: &mut Buffer, x: u16, y: u16, line: &Line, base: Style, max_x: u16) -> u16 {
    let mut cursor = x;
    for span in line.spans() {
        let style = span.style.map_or(base, |s| s.merge(&base));
        cursor = draw_text_span(buf, cursor, y, span.as_str(), style, max_x);
        if cursor >= max_x {
            break;
        }
    }
    cursor
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_render::cell::{PackedRgba, StyleFlags};
    use cascade_text::Span;

    #[test]
    fn clear_area_paints_background() {
        let mut buf = Buffer::new(4, 2);
        buf.set(1, 1, Cell::from_char('z'));
        clear_area(&mut buf, Rect::new(0, 0, 4, 2), Style::new().bg(PackedRgba::BLACK));
        let cell = buf.get(1, 1).unwrap();
        assert_eq!(cell.content.as_char(), Some(' '));
        assert_eq!(cell.bg, PackedRgba::BLACK);
    }

    #[test]
    fn draw_text_span_basic() {
        let mut buf = Buffer::new(10, 1);
        let end_x = draw_text_span(&mut buf, 0, 0, "ABC", Style::default(), 10);

        assert_eq!(end_x, 3);
        assert_eq!(buf.get(0, 0).unwrap().content.as_char(), Some('A'));
        assert_eq!(buf.get(2, 0).unwrap().content.as_char(), Some('C'));
    }

    #[test]
    fn draw_text_span_clipped_at_max_x() {
        let mut buf = Buffer::new(10, 1);
        let end_x = draw_text_span(&mut buf, 0, 0, "ABCDEF", Style::default(), 3);

        assert_eq!(end_x, 3);
        assert!(buf.get(3, 0).unwrap().is_empty());
    }

    #[test]
    fn draw_text_span_skips_wide_char_at_edge() {
        let mut buf = Buffer::new(10, 1);
        let end_x = draw_text_span(&mut buf, 0, 0, "a中", Style::default(), 2);
        assert_eq!(end_x, 1);
    }

    #[test]
    fn draw_text_span_drops_control_chars() {
        let mut buf = Buffer::new(10, 1);
        let end_x = draw_text_span(&mut buf, 0, 0, "ab\tc\u{7}d", Style::default(), 10);

        assert_eq!(end_x, 4);
        assert_eq!(end_x as usize, cascade_text::display_width("ab\tc\u{7}d"));
        assert_eq!(buf.get(2, 0).unwrap().content.as_char(), Some('c'));
        assert_eq!(buf.get(3, 0).unwrap().content.as_char(), Some('d'));
        assert!(buf.get(4, 0).unwrap().is_empty());
    }

    #[test]
    fn draw_line_layers_span_styles() {
        let mut buf = Buffer::new(10, 1);
        let line = Line::from_spans([Span::raw("ab"), Span::styled("cd", Style::new().italic())]);
        let base = Style::new().fg(PackedRgba::WHITE);
        let end_x = draw_line(&mut buf, 0, 0, &line, base, 10);

        assert_eq!(end_x, 4);
        let plain = buf.get(0, 0).unwrap();
        assert_eq!(plain.fg, PackedRgba::WHITE);
        assert!(!plain.attrs.contains(StyleFlags::ITALIC));
        let styled = buf.get(2, 0).unwrap();
        assert_eq!(styled.fg, PackedRgba::WHITE);
        assert!(styled.attrs.contains(StyleFlags::ITALIC));
    }
}
