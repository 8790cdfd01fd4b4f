#![forbid(unsafe_code)]

//! Selection path, activation, and select events.
//!
//! The path is a list of sibling indices from the roots. Only
//! [`SelectionController::activate`] extends or rewrites it; when the data
//! changes the widget state either [`reselect`](SelectionController::reselect)s
//! it by identifier or [`reset`](SelectionController::reset)s it.

use super::item::{DisabledItems, is_value_disabled};
use super::node::{CascadeNode, CascadeTree, Identifier};
use serde_json::Value;
use std::fmt;

/// Where a selection stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CascadeStatus {
    /// Nothing selected.
    Collapsed,
    /// The last selected node has children still to choose from.
    Partial,
    /// The last selected node is a leaf.
    Complete,
}

/// Whether an activation finished the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionPhase {
    /// A branch was chosen; its children are now shown.
    InProgress,
    /// A leaf was chosen.
    Complete,
}

/// Emitted for every activation that changed the path.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectEvent {
    /// The activated node's original record.
    pub node: Value,
    pub value: Option<Identifier>,
    pub label: String,
    pub depth: usize,
    pub index: usize,
    /// Sibling indices of the updated path.
    pub path: Vec<usize>,
    /// Identifiers along the updated path.
    pub path_values: Vec<Option<Identifier>>,
    /// Original records along the updated path.
    pub path_nodes: Vec<Value>,
    pub phase: SelectionPhase,
}

impl SelectEvent {
    pub fn is_complete(&self) -> bool {
        self.phase == SelectionPhase::Complete
    }
}

/// An activation that does not correspond to a visible item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationError {
    /// No column at `depth`: it is past the current path.
    DepthOutOfRange { depth: usize, path_len: usize },
    /// The column at `depth` comes from a leaf and is not shown.
    NoColumn { depth: usize },
    /// `index` is past the end of the column.
    IndexOutOfRange { depth: usize, index: usize, len: usize },
}

impl fmt::Display for ActivationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DepthOutOfRange { depth, path_len } => write!(
                f,
                "no column at depth {depth} (selected path has {path_len} nodes)"
            ),
            Self::NoColumn { depth } => {
                write!(f, "the node above depth {depth} is a leaf and has no column")
            }
            Self::IndexOutOfRange { depth, index, len } => write!(
                f,
                "item {index} out of range for column {depth} with {len} items"
            ),
        }
    }
}

impl std::error::Error for ActivationError {}

/// Callback invoked for each [`SelectEvent`].
pub type SelectListener = Box<dyn FnMut(&SelectEvent)>;

/// Owns the selected path and dispatches select events.
#[derive(Default)]
pub struct SelectionController {
    path: Vec<usize>,
    on_select: Option<SelectListener>,
}

impl fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionController")
            .field("path", &self.path)
            .field("on_select", &self.on_select.is_some())
            .finish()
    }
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the select callback.
    #[must_use]
    pub fn on_select(mut self, listener: impl FnMut(&SelectEvent) + 'static) -> Self {
        self.set_on_select(listener);
        self
    }

    pub fn set_on_select(&mut self, listener: impl FnMut(&SelectEvent) + 'static) {
        self.on_select = Some(Box::new(listener));
    }

    pub fn clear_on_select(&mut self) {
        self.on_select = None;
    }

    /// Sibling indices of the selected path.
    pub fn path(&self) -> &[usize] {
        &self.path
    }

    /// The selected nodes, root first. Empty if the path no longer resolves.
    pub fn path_nodes<'t>(&self, tree: &'t CascadeTree) -> Vec<&'t CascadeNode> {
        tree.resolve(&self.path).unwrap_or_default()
    }

    /// Whether the path still resolves against `tree`.
    pub fn is_valid_for(&self, tree: &CascadeTree) -> bool {
        tree.resolve(&self.path).is_some()
    }

    pub fn status(&self, tree: &CascadeTree) -> CascadeStatus {
        match tree.node(&self.path) {
            None => CascadeStatus::Collapsed,
            Some(node) if node.is_leaf() => CascadeStatus::Complete,
            Some(_) => CascadeStatus::Partial,
        }
    }

    /// Identifiers along the path, or `None` if a node on it has none.
    pub fn path_values(&self, tree: &CascadeTree) -> Option<Vec<Identifier>> {
        self.path_nodes(tree)
            .into_iter()
            .map(|n| n.value().cloned())
            .collect()
    }

    /// Point the path at the nodes of `tree` whose identifier chain is
    /// `values`, without emitting an event.
    ///
    /// Returns `false` and clears the path when the chain does not resolve.
    pub fn reselect(&mut self, tree: &CascadeTree, values: &[Identifier]) -> bool {
        match tree.find_path(values) {
            Some(path) => {
                self.path = path;
                true
            }
            None => {
                self.reset();
                false
            }
        }
    }

    /// Clear the path.
    pub fn reset(&mut self) {
        if !self.path.is_empty() {
            cascade_core::debug!(depth = self.path.len(), "cascade path reset");
        }
        self.path.clear();
    }

    /// Activate item `index` of the column at `depth`.
    ///
    /// Returns `Ok(None)` when the item is disabled: nothing changes and no
    /// event is emitted. Otherwise the path is cut to `depth`, the item is
    /// appended, the listener runs, and the event is returned.
    pub fn activate(
        &mut self,
        tree: &CascadeTree,
        disabled: &dyn DisabledItems,
        depth: usize,
        index: usize,
    ) -> Result<Option<SelectEvent>, ActivationError> {
        if depth > self.path.len() {
            return Err(ActivationError::DepthOutOfRange {
                depth,
                path_len: self.path.len(),
            });
        }
        let parents = &self.path[..depth];
        let column = tree
            .children_at(parents)
            .ok_or(ActivationError::NoColumn { depth })?;
        if depth > 0 && column.is_empty() {
            return Err(ActivationError::NoColumn { depth });
        }
        let node = column.get(index).ok_or(ActivationError::IndexOutOfRange {
            depth,
            index,
            len: column.len(),
        })?;

        if is_value_disabled(disabled, node.value()) {
            cascade_core::trace!(depth, index, "activation of disabled item ignored");
            return Ok(None);
        }

        self.path.truncate(depth);
        self.path.push(index);

        let nodes = self.path_nodes(tree);
        let phase = if node.is_leaf() {
            SelectionPhase::Complete
        } else {
            SelectionPhase::InProgress
        };
        let event = SelectEvent {
            node: node.raw().clone(),
            value: node.value().cloned(),
            label: node.label().to_string(),
            depth,
            index,
            path: self.path.clone(),
            path_values: nodes.iter().map(|n| n.value().cloned()).collect(),
            path_nodes: nodes.iter().map(|n| n.raw().clone()).collect(),
            phase,
        };
        cascade_core::debug!(
            depth,
            index,
            complete = event.is_complete(),
            "cascade item selected"
        );

        if let Some(listener) = self.on_select.as_mut() {
            listener(&event);
        }
        Ok(Some(event))
    }
}
