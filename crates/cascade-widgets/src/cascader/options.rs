#![forbid(unsafe_code)]

//! Serializable cascader configuration.
//!
//! ```
//! use cascade_widgets::cascader::options::CascaderOptions;
//!
//! let opts = CascaderOptions::from_json_str(r#"{
//!     "data": [{"myValue": "a", "myLabel": "A"}],
//!     "valueKey": "myValue",
//!     "labelKey": "myLabel",
//!     "disabledItemValues": ["a"],
//!     "menuWidth": 12
//! }"#).unwrap();
//!
//! assert_eq!(opts.menu_width, 12);
//! assert_eq!(opts.normalize().roots().len(), 1);
//! assert_eq!(opts.disabled_values().len(), 1);
//! ```

use super::keys::{DEFAULT_CHILDREN_KEY, DEFAULT_LABEL_KEY, DEFAULT_VALUE_KEY, KeyMapping};
use super::node::{CascadeTree, Identifier};
use super::normalize::Normalizer;
use super::theme::{ClassNames, DEFAULT_CLASS_PREFIX};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Default column width in cells.
pub const DEFAULT_MENU_WIDTH: u16 = 20;

/// Options accepted by the cascader, using the camelCase names hosts pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CascaderOptions {
    /// The raw hierarchy (required).
    pub data: Value,
    #[serde(default = "default_value_key")]
    pub value_key: String,
    #[serde(default = "default_label_key")]
    pub label_key: String,
    #[serde(default = "default_children_key")]
    pub children_key: String,
    #[serde(default)]
    pub disabled_item_values: Vec<Value>,
    #[serde(default = "default_menu_width")]
    pub menu_width: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_height: Option<u16>,
    #[serde(default = "default_class_prefix")]
    pub class_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

fn default_value_key() -> String {
    DEFAULT_VALUE_KEY.to_string()
}

fn default_label_key() -> String {
    DEFAULT_LABEL_KEY.to_string()
}

fn default_children_key() -> String {
    DEFAULT_CHILDREN_KEY.to_string()
}

fn default_menu_width() -> u16 {
    DEFAULT_MENU_WIDTH
}

fn default_class_prefix() -> String {
    DEFAULT_CLASS_PREFIX.to_string()
}

impl CascaderOptions {
    /// Options for `data` with every other field defaulted.
    pub fn new(data: Value) -> Self {
        Self {
            data,
            value_key: default_value_key(),
            label_key: default_label_key(),
            children_key: default_children_key(),
            disabled_item_values: Vec::new(),
            menu_width: DEFAULT_MENU_WIDTH,
            menu_height: None,
            class_prefix: default_class_prefix(),
            class_name: None,
        }
    }

    /// Parse and validate options from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, OptionsError> {
        let opts: Self = serde_json::from_str(json).map_err(OptionsError::Parse)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Convert and validate options from a JSON value.
    pub fn from_value(value: Value) -> Result<Self, OptionsError> {
        let opts: Self = serde_json::from_value(value).map_err(OptionsError::Parse)?;
        opts.validate()?;
        Ok(opts)
    }

    /// Check field constraints serde cannot express.
    pub fn validate(&self) -> Result<(), OptionsError> {
        for (field, key) in [
            ("valueKey", &self.value_key),
            ("labelKey", &self.label_key),
            ("childrenKey", &self.children_key),
        ] {
            if key.is_empty() {
                return Err(OptionsError::EmptyKey { field });
            }
        }
        if self.menu_width == 0 {
            return Err(OptionsError::ZeroMenuWidth);
        }
        if self.menu_height == Some(0) {
            return Err(OptionsError::ZeroMenuHeight);
        }
        Ok(())
    }

    pub fn key_mapping(&self) -> KeyMapping {
        KeyMapping::new(&self.value_key, &self.label_key, &self.children_key)
    }

    /// The disabled identifiers; `null` entries are dropped.
    pub fn disabled_values(&self) -> HashSet<Identifier> {
        self.disabled_item_values
            .iter()
            .filter_map(Identifier::from_json)
            .collect()
    }

    /// Normalize `data` with the configured keys.
    pub fn normalize(&self) -> CascadeTree {
        Normalizer::with_keys(self.key_mapping()).normalize(&self.data)
    }

    pub fn class_names(&self) -> ClassNames {
        let classes = ClassNames::new(&self.class_prefix);
        match &self.class_name {
            Some(name) => classes.with_class_name(name),
            None => classes,
        }
    }
}

/// Invalid cascader options.
#[derive(Debug)]
pub enum OptionsError {
    /// The JSON did not match the options shape.
    Parse(serde_json::Error),
    /// A key-name field was empty.
    EmptyKey { field: &'static str },
    ZeroMenuWidth,
    ZeroMenuHeight,
}

impl fmt::Display for OptionsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid cascader options: {err}"),
            Self::EmptyKey { field } => write!(f, "`{field}` must not be empty"),
            Self::ZeroMenuWidth => write!(f, "`menuWidth` must be > 0"),
            Self::ZeroMenuHeight => write!(f, "`menuHeight` must be > 0 when set"),
        }
    }
}

impl std::error::Error for OptionsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}
