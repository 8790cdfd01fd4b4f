#![forbid(unsafe_code)]

//! Raw records to [`CascadeTree`].

use super::keys::{KeyMapping, NodeAccessor};
use super::node::{CascadeNode, CascadeTree};
use serde_json::Value;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Builds a [`CascadeTree`] through an injected [`NodeAccessor`].
///
/// Normalization is pure: the same input and accessor always produce the
/// same tree and signature.
#[derive(Debug, Clone)]
pub struct Normalizer<A = KeyMapping> {
    accessor: A,
}

impl Default for Normalizer<KeyMapping> {
    fn default() -> Self {
        Self::with_keys(KeyMapping::default())
    }
}

impl Normalizer<KeyMapping> {
    /// Normalizer reading the given field names.
    pub fn with_keys(keys: KeyMapping) -> Self {
        Self { accessor: keys }
    }
}

impl<A: NodeAccessor> Normalizer<A> {
    pub fn new(accessor: A) -> Self {
        Self { accessor }
    }

    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    /// Normalize a JSON hierarchy. Anything other than an array yields an
    /// empty tree.
    pub fn normalize(&self, data: &Value) -> CascadeTree {
        match data.as_array() {
            Some(nodes) => self.normalize_nodes(nodes),
            None => {
                cascade_core::debug!(kind = json_kind(data), "cascade data is not an array");
                CascadeTree::default()
            }
        }
    }

    /// Normalize a slice of root records.
    pub fn normalize_nodes(&self, nodes: &[Value]) -> CascadeTree {
        let roots: Vec<CascadeNode> = nodes.iter().map(|raw| self.build(raw, 0)).collect();
        let mut hasher = DefaultHasher::new();
        hash_level(&roots, &mut hasher);
        let tree = CascadeTree {
            roots,
            signature: hasher.finish(),
        };
        cascade_core::debug!(
            roots = tree.roots.len(),
            nodes = tree.node_count(),
            "normalized cascade data"
        );
        tree
    }

    fn build(&self, raw: &Value, depth: usize) -> CascadeNode {
        let children = self
            .accessor
            .children(raw)
            .map(|kids| kids.iter().map(|k| self.build(k, depth + 1)).collect())
            .unwrap_or_default();
        CascadeNode {
            value: self.accessor.value(raw),
            label: self.accessor.label(raw).unwrap_or_default(),
            children,
            depth,
            raw: raw.clone(),
        }
    }
}

fn hash_level(nodes: &[CascadeNode], hasher: &mut DefaultHasher) {
    nodes.len().hash(hasher);
    for node in nodes {
        node.value.hash(hasher);
        node.label.hash(hasher);
        hash_level(&node.children, hasher);
    }
}

#[cfg_attr(not(feature = "tracing"), allow(dead_code))]
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
