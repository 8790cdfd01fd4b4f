#![forbid(unsafe_code)]

//! Field access for caller records.
//!
//! The normalizer never reads fields by itself; it asks a [`NodeAccessor`].
//! [`KeyMapping`] is the stock accessor that reads three named fields from a
//! JSON object. Implement the trait directly for any other record shape.

use super::node::Identifier;
use serde_json::Value;

/// Default field name for a node's value.
pub const DEFAULT_VALUE_KEY: &str = "value";
/// Default field name for a node's label.
pub const DEFAULT_LABEL_KEY: &str = "label";
/// Default field name for a node's children.
pub const DEFAULT_CHILDREN_KEY: &str = "children";

/// Reads the value, label, and children of a raw record.
///
/// Every method returns `None` for a missing or unusable field; the
/// normalizer treats that field as absent.
pub trait NodeAccessor {
    fn value(&self, raw: &Value) -> Option<Identifier>;

    fn label(&self, raw: &Value) -> Option<String>;

    fn children<'r>(&self, raw: &'r Value) -> Option<&'r [Value]>;
}

impl<A: NodeAccessor + ?Sized> NodeAccessor for &A {
    fn value(&self, raw: &Value) -> Option<Identifier> {
        (**self).value(raw)
    }

    fn label(&self, raw: &Value) -> Option<String> {
        (**self).label(raw)
    }

    fn children<'r>(&self, raw: &'r Value) -> Option<&'r [Value]> {
        (**self).children(raw)
    }
}

impl<A: NodeAccessor + ?Sized> NodeAccessor for Box<A> {
    fn value(&self, raw: &Value) -> Option<Identifier> {
        (**self).value(raw)
    }

    fn label(&self, raw: &Value) -> Option<String> {
        (**self).label(raw)
    }

    fn children<'r>(&self, raw: &'r Value) -> Option<&'r [Value]> {
        (**self).children(raw)
    }
}

/// Field names for value, label, and children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyMapping {
    value_key: String,
    label_key: String,
    children_key: String,
}

impl Default for KeyMapping {
    fn default() -> Self {
        Self {
            value_key: DEFAULT_VALUE_KEY.to_string(),
            label_key: DEFAULT_LABEL_KEY.to_string(),
            children_key: DEFAULT_CHILDREN_KEY.to_string(),
        }
    }
}

impl KeyMapping {
    /// Mapping with all three names given.
    pub fn new(
        value_key: impl Into<String>,
        label_key: impl Into<String>,
        children_key: impl Into<String>,
    ) -> Self {
        Self {
            value_key: value_key.into(),
            label_key: label_key.into(),
            children_key: children_key.into(),
        }
    }

    #[must_use]
    pub fn value_key(mut self, key: impl Into<String>) -> Self {
        self.value_key = key.into();
        self
    }

    #[must_use]
    pub fn label_key(mut self, key: impl Into<String>) -> Self {
        self.label_key = key.into();
        self
    }

    #[must_use]
    pub fn children_key(mut self, key: impl Into<String>) -> Self {
        self.children_key = key.into();
        self
    }

    pub fn value_field(&self) -> &str {
        &self.value_key
    }

    pub fn label_field(&self) -> &str {
        &self.label_key
    }

    pub fn children_field(&self) -> &str {
        &self.children_key
    }
}

impl NodeAccessor for KeyMapping {
    fn value(&self, raw: &Value) -> Option<Identifier> {
        raw.get(&self.value_key).and_then(Identifier::from_json)
    }

    fn label(&self, raw: &Value) -> Option<String> {
        match raw.get(&self.label_key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    fn children<'r>(&self, raw: &'r Value) -> Option<&'r [Value]> {
        raw.get(&self.children_key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
    }
}
