#![forbid(unsafe_code)]

//! StyleSheet registry for named styles.
//!
//! Names work like CSS classes: widgets report the class names that apply
//! to each element and the sheet composes them into one [`Style`].
//!
//! ```
//! use cascade_style::{PackedRgba, Style, StyleSheet};
//!
//! let mut sheet = StyleSheet::new();
//! sheet.define("menu-item", Style::new().fg(PackedRgba::WHITE));
//! sheet.define("menu-item-disabled", Style::new().dim());
//!
//! let style = sheet.compose(&["menu-item", "menu-item-disabled"]);
//! assert_eq!(style.fg, Some(PackedRgba::WHITE));
//! ```

use crate::Style;
use std::collections::HashMap;

/// A registry of named styles.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    styles: HashMap<String, Style>,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define (or replace) a named style.
    pub fn define(&mut self, name: impl Into<String>, style: Style) {
        self.styles.insert(name.into(), style);
    }

    /// Builder form of [`define`](Self::define).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, style: Style) -> Self {
        self.define(name, style);
        self
    }

    /// Look up a style by name.
    pub fn get(&self, name: &str) -> Option<Style> {
        self.styles.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Compose styles in order; later names take precedence. Missing
    /// names are skipped.
    pub fn compose<S: AsRef<str>>(&self, names: &[S]) -> Style {
        names.iter().fold(Style::default(), |acc, name| {
            match self.styles.get(name.as_ref()) {
                Some(style) => style.merge(&acc),
                None => acc,
            }
        })
    }

    /// Copy every style from `other`, overriding same-named entries.
    pub fn extend(&mut self, other: &StyleSheet) {
        for (name, style) in &other.styles {
            self.styles.insert(name.clone(), *style);
        }
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.styles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
