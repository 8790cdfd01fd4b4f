#![forbid(unsafe_code)]

//! Normalized cascade tree.

use serde_json::{Number, Value};
use std::fmt;

/// The value of a node.
///
/// Identifiers follow JSON value equality: numbers compare by numeric value
/// (`1.0 == 1`), and a number, a string and a composite value are never
/// equal to one another. Integral numbers are folded into [`Identifier::Int`]
/// (or [`Identifier::UInt`] above `i64::MAX`); every other number is kept as
/// the bit pattern of its `f64`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Identifier {
    Bool(bool),
    Int(i64),
    /// An integer above `i64::MAX`.
    UInt(u64),
    /// A non-integral number, as `f64::to_bits`.
    Float(u64),
    Text(String),
    /// An array or object, as its serialized JSON.
    Json(String),
}

impl Identifier {
    /// Read an identifier from a JSON value. `null` has no identifier.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => Some(Self::from_number(n)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Array(_) | Value::Object(_) => Some(Self::Json(value.to_string())),
        }
    }

    fn from_number(n: &Number) -> Self {
        if let Some(i) = n.as_i64() {
            Self::Int(i)
        } else if let Some(u) = n.as_u64() {
            Self::UInt(u)
        } else {
            n.as_f64()
                .map_or_else(|| Self::Json(n.to_string()), Self::from_f64)
        }
    }

    /// A numeric identifier, folded to an integer when `f` has no fraction.
    pub fn from_f64(f: f64) -> Self {
        const I64_END: f64 = 9_223_372_036_854_775_808.0;
        const U64_END: f64 = 18_446_744_073_709_551_616.0;
        if f.is_finite() && f.fract() == 0.0 {
            if (-I64_END..I64_END).contains(&f) {
                return Self::Int(f as i64);
            }
            if (0.0..U64_END).contains(&f) {
                return Self::UInt(f as u64);
            }
        }
        Self::Float(f.to_bits())
    }

    /// The identifier as a JSON value.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::UInt(u) => Value::from(*u),
            Self::Float(bits) => Value::from(f64::from_bits(*bits)),
            Self::Text(s) => Value::String(s.clone()),
            Self::Json(s) => serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.clone())),
        }
    }

    /// The text, when this is a text identifier.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            Self::Text(s) | Self::Json(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Identifier {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Identifier {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Identifier {
    fn from(f: f64) -> Self {
        Self::from_f64(f)
    }
}

impl From<bool> for Identifier {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl PartialEq<str> for Identifier {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Identifier {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// A normalized node.
#[derive(Debug, Clone, PartialEq)]
pub struct CascadeNode {
    pub(crate) value: Option<Identifier>,
    pub(crate) label: String,
    pub(crate) children: Vec<CascadeNode>,
    pub(crate) depth: usize,
    pub(crate) raw: Value,
}

impl CascadeNode {
    /// The node identifier, absent when the record had no value field.
    #[must_use]
    pub fn value(&self) -> Option<&Identifier> {
        self.value.as_ref()
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn children(&self) -> &[CascadeNode] {
        &self.children
    }

    /// Depth in the tree; roots are at depth 0.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The caller's original record.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }
}

/// The root column of normalized nodes plus a structural signature.
///
/// The signature changes whenever identifiers, labels, or shape change and
/// is what widget state uses to notice it is looking at different data.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CascadeTree {
    pub(crate) roots: Vec<CascadeNode>,
    pub(crate) signature: u64,
}

impl CascadeTree {
    #[must_use]
    pub fn roots(&self) -> &[CascadeNode] {
        &self.roots
    }

    #[must_use]
    pub fn signature(&self) -> u64 {
        self.signature
    }

    /// Whether there are no root nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes at every depth.
    #[must_use]
    pub fn node_count(&self) -> usize {
        fn count(nodes: &[CascadeNode]) -> usize {
            nodes.iter().map(|n| 1 + count(&n.children)).sum()
        }
        count(&self.roots)
    }

    /// The node reached by following sibling indices from the roots.
    #[must_use]
    pub fn node(&self, indices: &[usize]) -> Option<&CascadeNode> {
        let (last, parents) = indices.split_last()?;
        self.children_at(parents)?.get(*last)
    }

    /// The sibling group under the node at `indices` (the roots for `[]`).
    #[must_use]
    pub fn children_at(&self, indices: &[usize]) -> Option<&[CascadeNode]> {
        let mut nodes: &[CascadeNode] = &self.roots;
        for &i in indices {
            nodes = &nodes.get(i)?.children;
        }
        Some(nodes)
    }

    /// Every node along `indices`, or `None` if any index is out of range.
    #[must_use]
    pub fn resolve(&self, indices: &[usize]) -> Option<Vec<&CascadeNode>> {
        let mut out = Vec::with_capacity(indices.len());
        let mut nodes: &[CascadeNode] = &self.roots;
        for &i in indices {
            let node = nodes.get(i)?;
            out.push(node);
            nodes = &node.children;
        }
        Some(out)
    }

    /// Sibling indices of the first node (depth-first) whose identifier
    /// chain equals `values`.
    #[must_use]
    pub fn find_path(&self, values: &[Identifier]) -> Option<Vec<usize>> {
        let mut out = Vec::with_capacity(values.len());
        let mut nodes: &[CascadeNode] = &self.roots;
        for value in values {
            let i = nodes.iter().position(|n| n.value.as_ref() == Some(value))?;
            out.push(i);
            nodes = &nodes[i].children;
        }
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn identifier_from_json_keeps_types() {
        assert_eq!(Identifier::from_json(&json!("a")), Some(Identifier::from("a")));
        assert_eq!(Identifier::from_json(&json!(7)), Some(Identifier::Int(7)));
        assert_eq!(Identifier::from_json(&json!(true)), Some(Identifier::Bool(true)));
        assert_eq!(Identifier::from_json(&json!(1.5)), Some(Identifier::from(1.5)));
        assert_eq!(Identifier::from_json(&json!(null)), None);
    }

    #[test]
    fn numbers_compare_by_value() {
        assert_eq!(Identifier::from_json(&json!(1.0)), Identifier::from_json(&json!(1)));
        assert_eq!(Identifier::from_json(&json!(-0.0)), Some(Identifier::Int(0)));
        assert_eq!(
            Identifier::from_json(&json!(u64::MAX)),
            Some(Identifier::UInt(u64::MAX))
        );
        assert_ne!(Identifier::from(1.5), Identifier::from(2.5));
    }

    #[test]
    fn numbers_never_equal_strings() {
        assert_ne!(Identifier::from_json(&json!("1.5")), Identifier::from_json(&json!(1.5)));
        assert_ne!(Identifier::from_json(&json!("1")), Identifier::from_json(&json!(1.0)));
        assert_ne!(
            Identifier::from_json(&json!("[1,2]")),
            Identifier::from_json(&json!([1, 2]))
        );
    }

    #[test]
    fn float_identifier_round_trips_through_json() {
        let id = Identifier::from(0.25);
        assert_eq!(id.to_json(), json!(0.25));
        assert_eq!(id.to_string(), "0.25");
        assert_eq!(Identifier::from_json(&json!({"k": 1})).map(|i| i.to_json()), Some(json!({"k": 1})));
    }

    #[test]
    fn identifier_text_and_int_differ() {
        assert_ne!(Identifier::from("1"), Identifier::Int(1));
        assert_eq!(Identifier::Int(1).to_string(), "1");
    }

    #[test]
    fn identifier_to_json() {
        assert_eq!(Identifier::from("x").to_json(), json!("x"));
        assert_eq!(Identifier::Int(-3).to_json(), json!(-3));
    }

    #[test]
    fn identifier_compares_with_str() {
        assert!(Identifier::from("abc") == "abc");
        assert!(Identifier::Int(3) != "3");
    }
}
