#![forbid(unsafe_code)]

//! Rendered structure reported back to the host.
//!
//! After each render the state holds a [`MenuLayout`]: where every column
//! and item landed, with identifiers and class names. Hosts use it to
//! position the overlay; input handling uses it as a fallback hit test.

use super::node::Identifier;
use cascade_core::geometry::Rect;
use cascade_render::frame::HitData;

/// Pack a column depth and item index into hit data.
#[inline]
pub const fn encode_hit(depth: usize, index: usize) -> HitData {
    ((depth as u64) << 32) | (index as u64 & 0xFFFF_FFFF)
}

/// Inverse of [`encode_hit`].
#[inline]
pub const fn decode_hit(data: HitData) -> (usize, usize) {
    ((data >> 32) as usize, (data & 0xFFFF_FFFF) as usize)
}

/// The whole menu.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MenuLayout {
    /// Union of all column rectangles.
    pub area: Rect,
    /// Classes on the root container.
    pub classes: Vec<String>,
    pub columns: Vec<ColumnLayout>,
}

impl MenuLayout {
    pub fn column(&self, depth: usize) -> Option<&ColumnLayout> {
        self.columns.iter().find(|c| c.depth == depth)
    }

    /// The column whose rectangle contains `(x, y)`.
    pub fn column_at(&self, x: u16, y: u16) -> Option<&ColumnLayout> {
        self.columns.iter().find(|c| c.rect.contains(x, y))
    }

    /// `(depth, index)` of the visible item at `(x, y)`.
    pub fn item_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        let column = self.column_at(x, y)?;
        column
            .items
            .iter()
            .find(|item| item.rect.is_some_and(|r| r.contains(x, y)))
            .map(|item| (column.depth, item.index))
    }

    /// Items across every column.
    pub fn item_count(&self) -> usize {
        self.columns.iter().map(|c| c.items.len()).sum()
    }

    /// Whether the root container carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// One rendered column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnLayout {
    pub depth: usize,
    pub rect: Rect,
    pub classes: Vec<String>,
    /// Index of the first visible item.
    pub offset: usize,
    pub items: Vec<ItemLayout>,
}

impl ColumnLayout {
    /// Largest useful scroll offset for this column.
    pub fn max_offset(&self) -> usize {
        self.items.len().saturating_sub(self.rect.height as usize)
    }
}

/// One item of a rendered column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemLayout {
    pub index: usize,
    pub value: Option<Identifier>,
    /// Plain text of what was drawn (custom output included).
    pub text: String,
    /// Row rectangle, `None` while scrolled out of view.
    pub rect: Option<Rect>,
    pub classes: Vec<String>,
    pub is_disabled: bool,
    pub is_active: bool,
    pub is_focused: bool,
    pub has_children: bool,
}

impl ItemLayout {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}
