#![forbid(unsafe_code)]

//! Class names and the default cascader stylesheet.

use cascade_style::{PackedRgba, Style, StyleSheet};

/// Default class prefix for the menu.
pub const DEFAULT_CLASS_PREFIX: &str = "picker-cascader-menu";

/// Class names derived from a prefix plus an optional extra class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassNames {
    prefix: String,
    extra: Option<String>,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self::new(DEFAULT_CLASS_PREFIX)
    }
}

impl ClassNames {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            extra: None,
        }
    }

    /// Add a caller class applied to the root container.
    #[must_use]
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        let class_name = class_name.into();
        self.extra = (!class_name.is_empty()).then_some(class_name);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn class_name(&self) -> Option<&str> {
        self.extra.as_deref()
    }

    /// `{prefix}-{suffix}`.
    pub fn scoped(&self, suffix: &str) -> String {
        format!("{}-{suffix}", self.prefix)
    }

    /// Classes on the root container.
    pub fn root(&self) -> Vec<String> {
        let mut classes = vec![self.scoped("items")];
        classes.extend(self.extra.clone());
        classes
    }

    pub fn column(&self) -> String {
        self.scoped("column")
    }

    pub fn item(&self) -> String {
        self.scoped("item")
    }

    pub fn item_active(&self) -> String {
        self.scoped("item-active")
    }

    pub fn item_disabled(&self) -> String {
        self.scoped("item-disabled")
    }

    pub fn item_focus(&self) -> String {
        self.scoped("item-focus")
    }

    pub fn item_branch(&self) -> String {
        self.scoped("item-branch")
    }
}

/// The built-in look for a cascader using `classes`.
pub fn default_stylesheet(classes: &ClassNames) -> StyleSheet {
    let surface = PackedRgba::rgb(30, 32, 38);
    let text = PackedRgba::rgb(220, 222, 228);
    let accent = PackedRgba::rgb(52, 120, 246);
    let muted = PackedRgba::rgb(110, 114, 124);

    StyleSheet::new()
        .with(classes.scoped("items"), Style::new().bg(surface).fg(text))
        .with(classes.column(), Style::new().bg(surface))
        .with(classes.item(), Style::new().fg(text))
        .with(classes.item_active(), Style::new().fg(accent).bold())
        .with(classes.item_disabled(), Style::new().fg(muted).dim())
        .with(classes.item_focus(), Style::new().reverse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cascade_style::StyleFlags;

    #[test]
    fn root_classes_include_custom_class() {
        let classes = ClassNames::new("cascader").with_class_name("custom");
        assert_eq!(classes.root(), vec!["cascader-items", "custom"]);
    }

    #[test]
    fn empty_class_name_is_ignored() {
        let classes = ClassNames::default().with_class_name("");
        assert_eq!(classes.root(), vec!["picker-cascader-menu-items"]);
        assert_eq!(classes.class_name(), None);
    }

    #[test]
    fn item_classes_use_prefix() {
        let classes = ClassNames::new("custom-prefix");
        assert_eq!(classes.item(), "custom-prefix-item");
        assert_eq!(classes.item_disabled(), "custom-prefix-item-disabled");
        assert_eq!(classes.column(), "custom-prefix-column");
    }

    #[test]
    fn default_sheet_styles_state_classes() {
        let classes = ClassNames::default();
        let sheet = default_stylesheet(&classes);
        let disabled = sheet.compose(&[classes.item(), classes.item_disabled()]);
        assert!(disabled.has_attr(StyleFlags::DIM));
        let active = sheet.compose(&[classes.item(), classes.item_active()]);
        assert!(active.has_attr(StyleFlags::BOLD));
    }
}
