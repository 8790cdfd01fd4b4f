#![forbid(unsafe_code)]

//! Visible columns for a selected path.

use super::node::{CascadeNode, CascadeTree};

/// One sibling group on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column<'t> {
    depth: usize,
    parent: Option<&'t CascadeNode>,
    nodes: &'t [CascadeNode],
}

impl<'t> Column<'t> {
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The node whose children this column shows (`None` for the roots).
    pub fn parent(&self) -> Option<&'t CascadeNode> {
        self.parent
    }

    pub fn nodes(&self) -> &'t [CascadeNode] {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Columns for `path` (sibling indices from the roots).
///
/// The root column is always present. Each path node with children adds
/// the column of those children; the walk stops at the first leaf or at
/// an index that does not resolve.
pub fn build_columns<'t>(tree: &'t CascadeTree, path: &[usize]) -> Vec<Column<'t>> {
    let mut columns = Vec::with_capacity(path.len() + 1);
    columns.push(Column {
        depth: 0,
        parent: None,
        nodes: tree.roots(),
    });

    let mut siblings = tree.roots();
    for (depth, &index) in path.iter().enumerate() {
        let Some(node) = siblings.get(index) else {
            break;
        };
        if node.is_leaf() {
            break;
        }
        columns.push(Column {
            depth: depth + 1,
            parent: Some(node),
            nodes: node.children(),
        });
        siblings = node.children();
    }
    columns
}
