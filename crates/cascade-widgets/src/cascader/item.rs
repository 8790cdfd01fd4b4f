#![forbid(unsafe_code)]

//! Display entries for a column.

use super::column::Column;
use super::node::Identifier;
use super::theme::ClassNames;
use cascade_text::Line;
use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

/// Read-only view of the identifiers that cannot be activated.
///
/// Lookup is by identifier alone, so equal identifiers in different sibling
/// groups are disabled together.
pub trait DisabledItems {
    fn is_disabled(&self, value: &Identifier) -> bool;
}

/// A disabled set that disables nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoDisabled;

impl DisabledItems for NoDisabled {
    fn is_disabled(&self, _value: &Identifier) -> bool {
        false
    }
}

impl<S: BuildHasher> DisabledItems for HashSet<Identifier, S> {
    fn is_disabled(&self, value: &Identifier) -> bool {
        self.contains(value)
    }
}

impl DisabledItems for BTreeSet<Identifier> {
    fn is_disabled(&self, value: &Identifier) -> bool {
        self.contains(value)
    }
}

impl DisabledItems for [Identifier] {
    fn is_disabled(&self, value: &Identifier) -> bool {
        self.contains(value)
    }
}

impl DisabledItems for Vec<Identifier> {
    fn is_disabled(&self, value: &Identifier) -> bool {
        self.as_slice().is_disabled(value)
    }
}

impl<const N: usize> DisabledItems for [Identifier; N] {
    fn is_disabled(&self, value: &Identifier) -> bool {
        self.as_slice().is_disabled(value)
    }
}

impl<T: DisabledItems + ?Sized> DisabledItems for &T {
    fn is_disabled(&self, value: &Identifier) -> bool {
        (**self).is_disabled(value)
    }
}

/// Whether the node value is in the disabled set. Nodes without an
/// identifier are never disabled.
#[inline]
pub fn is_value_disabled(disabled: &dyn DisabledItems, value: Option<&Identifier>) -> bool {
    value.is_some_and(|v| disabled.is_disabled(v))
}

/// Custom item content: receives the label, returns what to display.
pub type RenderMenuItem = dyn Fn(&str) -> Line;

/// One rendered row of a column.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemEntry {
    /// Position within the column.
    pub index: usize,
    pub value: Option<Identifier>,
    /// Default label text or the custom renderer's output.
    pub label: Line,
    pub is_disabled: bool,
    /// The node lies on the selected path.
    pub is_active: bool,
    pub is_focused: bool,
    pub has_children: bool,
}

impl ItemEntry {
    /// Class names in application order (base first).
    pub fn class_names(&self, classes: &ClassNames) -> Vec<String> {
        let mut out = vec![classes.item()];
        if self.has_children {
            out.push(classes.item_branch());
        }
        if self.is_active {
            out.push(classes.item_active());
        }
        if self.is_disabled {
            out.push(classes.item_disabled());
        }
        if self.is_focused {
            out.push(classes.item_focus());
        }
        out
    }
}

/// Maps nodes of a column to [`ItemEntry`] values.
pub struct ItemRenderer<'a> {
    disabled: &'a dyn DisabledItems,
    render: Option<&'a RenderMenuItem>,
}

impl std::fmt::Debug for ItemRenderer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemRenderer")
            .field("custom_render", &self.render.is_some())
            .finish()
    }
}

impl<'a> ItemRenderer<'a> {
    pub fn new(disabled: &'a dyn DisabledItems) -> Self {
        Self {
            disabled,
            render: None,
        }
    }

    #[must_use]
    pub fn render_with(mut self, render: Option<&'a RenderMenuItem>) -> Self {
        self.render = render;
        self
    }

    /// Entries for every node in `column`.
    ///
    /// `active` is the path index at this column's depth, `focused` the
    /// keyboard focus index if focus is in this column.
    pub fn entries(
        &self,
        column: &Column<'_>,
        active: Option<usize>,
        focused: Option<usize>,
    ) -> Vec<ItemEntry> {
        column
            .nodes()
            .iter()
            .enumerate()
            .map(|(index, node)| {
                let label = match self.render {
                    Some(render) => render(node.label()),
                    None => Line::raw(node.label()),
                };
                ItemEntry {
                    index,
                    value: node.value().cloned(),
                    label,
                    is_disabled: is_value_disabled(self.disabled, node.value()),
                    is_active: active == Some(index),
                    is_focused: focused == Some(index),
                    has_children: !node.is_leaf(),
                }
            })
            .collect()
    }
}
