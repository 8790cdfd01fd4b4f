#![forbid(unsafe_code)]

//! Cell types.
//!
//! A `Cell` is one slot of the render grid: its content plus colors and
//! style flags. Wide characters occupy a head cell followed by
//! [`CellContent::Continuation`] cells.

use bitflags::bitflags;
use unicode_width::UnicodeWidthChar;

/// Packed RGBA color (`0xRRGGBBAA`).
///
/// Alpha 0 means "transparent", which is also the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self(0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque color from components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Color from components including alpha.
    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }
}

bitflags! {
    /// Text attribute flags for a cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct StyleFlags: u8 {
        const BOLD          = 0b0000_0001;
        const DIM           = 0b0000_0010;
        const ITALIC        = 0b0000_0100;
        const UNDERLINE     = 0b0000_1000;
        const REVERSE       = 0b0001_0000;
        const STRIKETHROUGH = 0b0010_0000;
    }
}

/// What a cell displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellContent {
    /// Nothing drawn.
    #[default]
    Empty,
    /// A single character.
    Char(char),
    /// Trailing half of a wide character to the left.
    Continuation,
}

impl CellContent {
    /// The character, if this is a head cell.
    #[inline]
    pub const fn as_char(&self) -> Option<char> {
        match self {
            Self::Char(c) => Some(*c),
            _ => None,
        }
    }

    /// Display width of the content (0 for empty and continuation cells).
    pub fn width(&self) -> usize {
        match self {
            Self::Char(c) => c.width().unwrap_or(0),
            _ => 0,
        }
    }
}

/// A single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    pub content: CellContent,
    pub fg: PackedRgba,
    pub bg: PackedRgba,
    pub attrs: StyleFlags,
}

impl Cell {
    /// A cell showing `c` with default colors.
    #[inline]
    pub const fn from_char(c: char) -> Self {
        Self {
            content: CellContent::Char(c),
            fg: PackedRgba::TRANSPARENT,
            bg: PackedRgba::TRANSPARENT,
            attrs: StyleFlags::empty(),
        }
    }

    /// A continuation cell carrying the colors of its head.
    #[inline]
    pub const fn continuation_of(head: &Cell) -> Self {
        Self {
            content: CellContent::Continuation,
            fg: head.fg,
            bg: head.bg,
            attrs: head.attrs,
        }
    }

    /// Whether nothing is drawn here.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        matches!(self.content, CellContent::Empty)
    }

    /// Whether this is the trailing half of a wide character.
    #[inline]
    pub const fn is_continuation(&self) -> bool {
        matches!(self.content, CellContent::Continuation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_components_round_trip() {
        let c = PackedRgba::rgba(10, 20, 30, 40);
        assert_eq!((c.r(), c.g(), c.b(), c.a()), (10, 20, 30, 40));
    }

    #[test]
    fn default_cell_is_empty() {
        let cell = Cell::default();
        assert!(cell.is_empty());
        assert_eq!(cell.content.as_char(), None);
        assert_eq!(cell.fg, PackedRgba::TRANSPARENT);
    }

    #[test]
    fn wide_char_width() {
        assert_eq!(CellContent::Char('a').width(), 1);
        assert_eq!(CellContent::Char('中').width(), 2);
        assert_eq!(CellContent::Continuation.width(), 0);
    }
}
