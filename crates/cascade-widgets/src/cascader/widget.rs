#![forbid(unsafe_code)]

//! The cascader widget: one column per level of the selected path, laid
//! out side by side.

use super::column::build_columns;
use super::item::{DisabledItems, ItemEntry, ItemRenderer, NoDisabled, RenderMenuItem};
use super::layout::{ColumnLayout, ItemLayout, MenuLayout, encode_hit};
use super::node::CascadeTree;
use super::options::{CascaderOptions, DEFAULT_MENU_WIDTH};
use super::state::CascaderState;
use super::theme::{ClassNames, default_stylesheet};
use crate::{StatefulWidget, Widget, clear_area, draw_line, draw_text_span};
use cascade_core::geometry::{Rect, Size};
use cascade_render::frame::{Frame, HitId, HitRegion};
use cascade_style::{Style, StyleSheet};
use cascade_text::display_width;

const DEFAULT_EXPAND_SYMBOL: &str = "›";
const ELLIPSIS: &str = "…";

/// A cascading-selection menu over a [`CascadeTree`].
///
/// The widget borrows the tree and the disabled set; selection lives in
/// [`CascaderState`]. Column `d` starts `d * menu_width` cells right of
/// the render area's left edge.
pub struct Cascader<'a> {
    tree: &'a CascadeTree,
    disabled: &'a dyn DisabledItems,
    menu_width: u16,
    menu_height: Option<u16>,
    render_menu_item: Option<&'a RenderMenuItem>,
    classes: ClassNames,
    style: Style,
    stylesheet: Option<&'a StyleSheet>,
    hit_id: Option<HitId>,
    expand_symbol: &'a str,
}

impl std::fmt::Debug for Cascader<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cascader")
            .field("roots", &self.tree.roots().len())
            .field("menu_width", &self.menu_width)
            .field("menu_height", &self.menu_height)
            .field("classes", &self.classes)
            .field("custom_render", &self.render_menu_item.is_some())
            .field("hit_id", &self.hit_id)
            .finish()
    }
}

impl<'a> Cascader<'a> {
    pub fn new(tree: &'a CascadeTree) -> Self {
        Self {
            tree,
            disabled: &NoDisabled,
            menu_width: DEFAULT_MENU_WIDTH,
            menu_height: None,
            render_menu_item: None,
            classes: ClassNames::default(),
            style: Style::default(),
            stylesheet: None,
            hit_id: None,
            expand_symbol: DEFAULT_EXPAND_SYMBOL,
        }
    }

    /// Take width, height and class names from loaded options.
    ///
    /// The tree and disabled set are built by the caller (see
    /// [`CascaderOptions::normalize`] and [`CascaderOptions::disabled_values`])
    /// because the widget only borrows them.
    #[must_use]
    pub fn options(mut self, options: &CascaderOptions) -> Self {
        self.menu_width = options.menu_width.max(1);
        self.menu_height = options.menu_height.map(|h| h.max(1));
        self.classes = options.class_names();
        self
    }

    /// Identifiers to show as disabled.
    #[must_use]
    pub fn disabled_items(mut self, disabled: &'a dyn DisabledItems) -> Self {
        self.disabled = disabled;
        self
    }

    /// Cells per column.
    #[must_use]
    pub fn menu_width(mut self, width: u16) -> Self {
        self.menu_width = width.max(1);
        self
    }

    /// Rows per column; longer columns scroll.
    #[must_use]
    pub fn menu_height(mut self, height: u16) -> Self {
        self.menu_height = Some(height.max(1));
        self
    }

    /// Replace each label with the callback's output.
    #[must_use]
    pub fn render_menu_item(mut self, render: &'a RenderMenuItem) -> Self {
        self.render_menu_item = Some(render);
        self
    }

    #[must_use]
    pub fn class_prefix(mut self, prefix: impl Into<String>) -> Self {
        let extra = self.classes.class_name().map(str::to_owned);
        let classes = ClassNames::new(prefix);
        self.classes = match extra {
            Some(extra) => classes.with_class_name(extra),
            None => classes,
        };
        self
    }

    /// Extra class on the root container.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.classes = self.classes.with_class_name(class_name);
        self
    }

    /// Style layered over the root class style.
    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Resolve class styles through `sheet` instead of the built-in theme.
    #[must_use]
    pub fn stylesheet(mut self, sheet: &'a StyleSheet) -> Self {
        self.stylesheet = Some(sheet);
        self
    }

    /// Register a `HitRegion::Content` per visible item under this id.
    #[must_use]
    pub fn hit_id(mut self, id: HitId) -> Self {
        self.hit_id = Some(id);
        self
    }

    /// Marker drawn at the right edge of items with children.
    #[must_use]
    pub fn expand_symbol(mut self, symbol: &'a str) -> Self {
        self.expand_symbol = symbol;
        self
    }

    pub fn tree(&self) -> &'a CascadeTree {
        self.tree
    }

    pub fn disabled(&self) -> &'a dyn DisabledItems {
        self.disabled
    }

    pub fn classes(&self) -> &ClassNames {
        &self.classes
    }

    pub(crate) fn registered_hit_id(&self) -> Option<HitId> {
        self.hit_id
    }

    pub(crate) fn row_limit(&self) -> Option<u16> {
        self.menu_height
    }

    /// Size the menu wants for `path`: every column at full width, and
    /// either the fixed menu height or the longest column.
    pub fn size_hint(&self, path: &[usize]) -> Size {
        let columns = build_columns(self.tree, path);
        let width = (columns.len() * self.menu_width as usize).min(u16::MAX as usize) as u16;
        let height = self.menu_height.unwrap_or_else(|| {
            let longest = columns.iter().map(|c| c.len()).max().unwrap_or(0);
            longest.min(u16::MAX as usize) as u16
        });
        Size::new(width, height)
    }

    fn draw_item(&self, frame: &mut Frame, rect: Rect, entry: &ItemEntry, style: Style) {
        let buf = &mut frame.buffer;
        clear_area(buf, rect, style);

        let width = rect.width as usize;
        let symbol_width = if entry.has_children {
            display_width(self.expand_symbol)
        } else {
            0
        };
        let show_symbol = symbol_width > 0 && symbol_width < width;
        let label_width = if show_symbol {
            width.saturating_sub(symbol_width + 1)
        } else {
            width
        };

        let mut label = entry.label.clone();
        label.truncate(label_width, Some(ELLIPSIS));
        draw_line(buf, rect.x, rect.y, &label, style, rect.x + label_width as u16);

        if show_symbol {
            let sx = rect.right() - symbol_width as u16;
            draw_text_span(buf, sx, rect.y, self.expand_symbol, style, rect.right());
        }
    }
}

impl StatefulWidget for Cascader<'_> {
    type State = CascaderState;

    fn render(&self, area: Rect, frame: &mut Frame, state: &mut CascaderState) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_render",
            widget = "Cascader",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        state.sync(self.tree);
        let reveal = state.take_reveal();
        let mut layout = MenuLayout {
            area: Rect::default(),
            classes: self.classes.root(),
            columns: Vec::new(),
        };
        if area.is_empty() {
            state.finish_render(layout);
            return;
        }

        let fallback;
        let sheet = match self.stylesheet {
            Some(sheet) => sheet,
            None => {
                fallback = default_stylesheet(&self.classes);
                &fallback
            }
        };
        let root_style = self.style.merge(&sheet.compose(&layout.classes));
        let column_classes = vec![self.classes.column()];
        let column_style = sheet.compose(&column_classes).merge(&root_style);

        let renderer = ItemRenderer::new(self.disabled).render_with(self.render_menu_item);
        let height = self.menu_height.map_or(area.height, |h| h.min(area.height));
        let path = state.path().to_vec();
        let focus = state.focus();

        for column in build_columns(self.tree, &path) {
            let depth = column.depth();
            let x = area.x as usize + depth * self.menu_width as usize;
            if x >= area.right() as usize {
                break;
            }
            let x = x as u16;
            let rect = Rect::new(x, area.y, self.menu_width.min(area.right() - x), height);
            clear_area(&mut frame.buffer, rect, column_style);

            let active = path.get(depth).copied();
            let focused = focus.filter(|f| f.depth == depth).map(|f| f.index);
            let entries = renderer.entries(&column, active, focused);
            let target = if reveal { focused.or(active) } else { None };
            let offset = state.scroll_offset(depth, target, entries.len(), height as usize);

            let mut items = Vec::with_capacity(entries.len());
            for entry in entries {
                let classes = entry.class_names(&self.classes);
                let item_rect = entry
                    .index
                    .checked_sub(offset)
                    .filter(|row| *row < height as usize)
                    .map(|row| Rect::new(rect.x, rect.y + row as u16, rect.width, 1));

                if let Some(item_rect) = item_rect {
                    let style = sheet.compose(&classes).merge(&column_style);
                    self.draw_item(frame, item_rect, &entry, style);
                    if let Some(id) = self.hit_id {
                        frame.register_hit(
                            item_rect,
                            id,
                            HitRegion::Content,
                            encode_hit(depth, entry.index),
                        );
                    }
                }

                items.push(ItemLayout {
                    index: entry.index,
                    text: entry.label.to_plain_text(),
                    value: entry.value,
                    rect: item_rect,
                    classes,
                    is_disabled: entry.is_disabled,
                    is_active: entry.is_active,
                    is_focused: entry.is_focused,
                    has_children: entry.has_children,
                });
            }

            layout.area = layout.area.union(&rect);
            layout.columns.push(ColumnLayout {
                depth,
                rect,
                classes: column_classes.clone(),
                offset,
                items,
            });
        }

        state.finish_render(layout);
    }
}

impl Widget for Cascader<'_> {
    /// Render with a fresh, collapsed state.
    fn render(&self, area: Rect, frame: &mut Frame) {
        let mut state = CascaderState::default();
        StatefulWidget::render(self, area, frame, &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cascader::normalize::Normalizer;
    use crate::cascader::node::Identifier;
    use cascade_core::event::MouseEvent;
    use cascade_render::cell::StyleFlags;
    use cascade_render::headless::{buffer_to_text, row_text};
    use cascade_text::Line;
    use serde_json::json;
    use std::collections::HashSet;

    fn tree() -> CascadeTree {
        let n: Normalizer = Normalizer::default();
        n.normalize(&json!([
            {"value": "abc", "label": "abc"},
            {"value": "abcd", "label": "abcd"},
            {"value": "abcde", "label": "abcde", "children": [
                {"value": "vv-abc", "label": "vv-abc"},
                {"value": "vv-abcd", "label": "vv-abcd"}
            ]}
        ]))
    }

    #[test]
    fn renders_root_column_only_when_collapsed() {
        let tree = tree();
        let mut frame = Frame::new(30, 4);
        let mut state = CascaderState::default();
        let cascader = Cascader::new(&tree).menu_width(10);
        StatefulWidget::render(&cascader, Rect::new(0, 0, 30, 4), &mut frame, &mut state);

        let layout = state.layout();
        assert_eq!(layout.columns.len(), 1);
        assert_eq!(layout.columns[0].items.len(), 3);
        assert_eq!(layout.area, Rect::new(0, 0, 10, 4));
        assert!(row_text(&frame.buffer, 0).starts_with("abc "));
        assert!(row_text(&frame.buffer, 2).starts_with("abcde"));
    }

    #[test]
    fn branch_items_show_expand_symbol() {
        let tree = tree();
        let mut frame = Frame::new(10, 3);
        Widget::render(&Cascader::new(&tree).menu_width(10), Rect::new(0, 0, 10, 3), &mut frame);

        let row = row_text(&frame.buffer, 2);
        assert_eq!(row.chars().nth(9), Some('›'));
        assert_eq!(row_text(&frame.buffer, 0).chars().nth(9), Some(' '));
    }

    #[test]
    fn active_branch_opens_second_column() {
        let tree = tree();
        let mut frame = Frame::new(20, 3);
        let mut state = CascaderState::default();
        let cascader = Cascader::new(&tree).menu_width(10);
        state.activate(&cascader, 0, 2);
        StatefulWidget::render(&cascader, Rect::new(0, 0, 20, 3), &mut frame, &mut state);

        let layout = state.layout();
        assert_eq!(layout.columns.len(), 2);
        assert_eq!(layout.columns[1].rect, Rect::new(10, 0, 10, 3));
        assert!(layout.columns[0].items[2].is_active);
        assert_eq!(layout.columns[1].items[0].text, "vv-abc");
        assert!(buffer_to_text(&frame.buffer).lines().next().unwrap().contains("vv-abc"));
    }

    #[test]
    fn long_labels_are_truncated_with_ellipsis() {
        let n: Normalizer = Normalizer::default();
        let tree = n.normalize(&json!([{"value": 1, "label": "a very long label"}]));
        let mut frame = Frame::new(8, 1);
        Widget::render(&Cascader::new(&tree).menu_width(8), Rect::new(0, 0, 8, 1), &mut frame);
        assert_eq!(row_text(&frame.buffer, 0), "a very …");
    }

    #[test]
    fn hit_regions_span_menu_width() {
        let tree = tree();
        let mut frame = Frame::with_hit_grid(30, 3);
        let cascader = Cascader::new(&tree).menu_width(10).hit_id(HitId::new(7));
        Widget::render(&cascader, Rect::new(0, 0, 30, 3), &mut frame);

        for x in 0..10 {
            assert_eq!(
                frame.hit_test(x, 1),
                Some((HitId::new(7), HitRegion::Content, encode_hit(0, 1)))
            );
        }
        assert_eq!(frame.hit_test(10, 1), None);
    }

    #[test]
    fn disabled_items_use_disabled_class_and_style() {
        let tree = tree();
        let disabled: HashSet<Identifier> = [Identifier::from("abcd")].into_iter().collect();
        let mut frame = Frame::new(10, 3);
        let mut state = CascaderState::default();
        let cascader = Cascader::new(&tree).menu_width(10).disabled_items(&disabled);
        StatefulWidget::render(&cascader, Rect::new(0, 0, 10, 3), &mut frame, &mut state);

        let item = &state.layout().columns[0].items[1];
        assert!(item.is_disabled);
        assert!(item.has_class("picker-cascader-menu-item-disabled"));
        assert!(frame.buffer.get(0, 1).unwrap().attrs.contains(StyleFlags::DIM));
        assert!(!frame.buffer.get(0, 0).unwrap().attrs.contains(StyleFlags::DIM));
    }

    #[test]
    fn custom_render_output_is_drawn() {
        let tree = tree();
        let render = |label: &str| Line::styled(label.to_uppercase(), Style::new().italic());
        let mut frame = Frame::new(10, 3);
        let mut state = CascaderState::default();
        let cascader = Cascader::new(&tree).menu_width(10).render_menu_item(&render);
        StatefulWidget::render(&cascader, Rect::new(0, 0, 10, 3), &mut frame, &mut state);

        assert!(row_text(&frame.buffer, 1).starts_with("ABCD"));
        assert!(frame.buffer.get(0, 1).unwrap().attrs.contains(StyleFlags::ITALIC));
        assert_eq!(state.layout().columns[0].items[1].text, "ABCD");
    }

    #[test]
    fn menu_height_limits_rows_and_scrolls_to_active() {
        let n: Normalizer = Normalizer::default();
        let data: Vec<_> = (0..6).map(|i| json!({"value": i, "label": format!("item {i}")})).collect();
        let tree = n.normalize(&json!(data));
        let cascader = Cascader::new(&tree).menu_width(10).menu_height(2);
        let mut state = CascaderState::default();
        state.activate(&cascader, 0, 4);

        let mut frame = Frame::new(10, 6);
        StatefulWidget::render(&cascader, Rect::new(0, 0, 10, 6), &mut frame, &mut state);

        let column = &state.layout().columns[0];
        assert_eq!(column.rect.height, 2);
        assert_eq!(column.offset, 3);
        assert_eq!(column.items[4].rect, Some(Rect::new(0, 1, 10, 1)));
        assert_eq!(column.items[0].rect, None);
        assert_eq!(row_text(&frame.buffer, 1).trim_end(), "item 4");
    }

    #[test]
    fn columns_past_the_area_are_not_laid_out() {
        let tree = tree();
        let cascader = Cascader::new(&tree).menu_width(10);
        let mut state = CascaderState::default();
        state.activate(&cascader, 0, 2);

        let mut frame = Frame::new(14, 3);
        StatefulWidget::render(&cascader, Rect::new(0, 0, 14, 3), &mut frame, &mut state);
        let layout = state.layout();
        assert_eq!(layout.columns.len(), 2);
        assert_eq!(layout.columns[1].rect.width, 4);

        let mut frame = Frame::new(10, 3);
        StatefulWidget::render(&cascader, Rect::new(0, 0, 10, 3), &mut frame, &mut state);
        assert_eq!(state.layout().columns.len(), 1);
    }

    #[test]
    fn empty_area_renders_nothing() {
        let tree = tree();
        let mut frame = Frame::new(5, 5);
        let mut state = CascaderState::default();
        StatefulWidget::render(&Cascader::new(&tree), Rect::new(0, 0, 0, 0), &mut frame, &mut state);
        assert!(state.layout().columns.is_empty());
        assert!(frame.buffer.get(0, 0).unwrap().is_empty());
    }

    #[test]
    fn size_hint_counts_columns() {
        let tree = tree();
        let cascader = Cascader::new(&tree).menu_width(10);
        assert_eq!(cascader.size_hint(&[]), Size::new(10, 3));
        assert_eq!(cascader.size_hint(&[2]), Size::new(20, 3));
        assert_eq!(cascader.menu_height(5).size_hint(&[0]), Size::new(10, 5));
    }

    #[test]
    fn mouse_click_without_hit_grid_uses_layout() {
        let tree = tree();
        let cascader = Cascader::new(&tree).menu_width(10);
        let mut state = CascaderState::default();
        let mut frame = Frame::new(20, 3);
        StatefulWidget::render(&cascader, Rect::new(0, 0, 20, 3), &mut frame, &mut state);

        let result = state.handle_mouse(&cascader, &MouseEvent::left_click(3, 0), None);
        assert!(matches!(result, crate::cascader::CascadeResult::Selected(ref e) if e.value == Some("abc".into())));
        assert_eq!(state.path(), &[0]);
    }
}
