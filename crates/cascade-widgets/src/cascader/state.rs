#![forbid(unsafe_code)]

//! Persistent cascader state and input handling.

use super::item::{DisabledItems, is_value_disabled};
use super::layout::{MenuLayout, decode_hit};
use super::node::{CascadeNode, CascadeTree, Identifier};
use super::selection::{CascadeStatus, SelectEvent, SelectionController};
use super::widget::Cascader;
use cascade_core::event::{Event, KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use cascade_render::frame::{HitData, HitId, HitRegion};

/// Rows moved per wheel notch.
const SCROLL_LINES: usize = 3;

/// Keyboard focus: an item of one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Focus {
    pub depth: usize,
    pub index: usize,
}

/// Outcome of an input event.
#[derive(Debug, Clone, PartialEq)]
pub enum CascadeResult {
    /// Nothing changed. Disabled items and rejected activations end here.
    Ignored,
    /// The path changed.
    Selected(SelectEvent),
    FocusMoved(Focus),
    /// A column's scroll offset changed.
    Scrolled,
    /// The path was cleared.
    Collapsed,
}

#[derive(Clone, Copy)]
enum Step {
    Next,
    Prev,
    First,
    Last,
    PageDown,
    PageUp,
}

/// State for a [`Cascader`]: the selected path, keyboard focus, per-column
/// scroll offsets, and the layout of the last render.
#[derive(Debug)]
pub struct CascaderState {
    controller: SelectionController,
    focus: Option<Focus>,
    offsets: Vec<usize>,
    reveal: bool,
    signature: Option<u64>,
    selected: Option<Vec<Identifier>>,
    layout: MenuLayout,
}

impl Default for CascaderState {
    fn default() -> Self {
        Self {
            controller: SelectionController::new(),
            focus: None,
            offsets: Vec::new(),
            reveal: true,
            signature: None,
            selected: None,
            layout: MenuLayout::default(),
        }
    }
}

impl CascaderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the select callback.
    #[must_use]
    pub fn on_select(mut self, listener: impl FnMut(&SelectEvent) + 'static) -> Self {
        self.controller.set_on_select(listener);
        self
    }

    pub fn set_on_select(&mut self, listener: impl FnMut(&SelectEvent) + 'static) {
        self.controller.set_on_select(listener);
    }

    pub fn clear_on_select(&mut self) {
        self.controller.clear_on_select();
    }

    pub fn controller(&self) -> &SelectionController {
        &self.controller
    }

    /// Sibling indices of the selected path.
    pub fn path(&self) -> &[usize] {
        self.controller.path()
    }

    pub fn status(&self, tree: &CascadeTree) -> CascadeStatus {
        self.controller.status(tree)
    }

    pub fn focus(&self) -> Option<Focus> {
        self.focus
    }

    /// Where everything landed during the last render.
    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    /// Scroll offset of the column at `depth`.
    pub fn offset(&self, depth: usize) -> usize {
        self.offsets.get(depth).copied().unwrap_or(0)
    }

    /// Clear the path, focus, and scroll offsets.
    pub fn reset(&mut self) {
        self.controller.reset();
        self.focus = None;
        self.offsets.clear();
        self.reveal = true;
        self.selected = None;
    }

    /// Bring the state in line with `tree`.
    ///
    /// When the tree's signature differs from the one seen last, focus and
    /// offsets are cleared and the path is looked up again by the
    /// identifiers it last selected; it is reset if they no longer resolve.
    /// A path whose indices no longer resolve is reset too. Focus outside
    /// the visible columns is dropped. Returns `true` if a selection was
    /// discarded.
    pub fn sync(&mut self, tree: &CascadeTree) -> bool {
        let signature = tree.signature();
        let changed = self.signature.is_some_and(|seen| seen != signature);
        self.signature = Some(signature);

        if changed {
            let had_path = !self.controller.path().is_empty();
            let selected = self.selected.take();
            self.reset();
            let mut kept = false;
            if had_path
                && let Some(values) = selected
                && self.controller.reselect(tree, &values)
            {
                self.selected = Some(values);
                kept = true;
            }
            let discarded = had_path && !kept;
            cascade_core::debug!(discarded, "cascade data changed");
            return discarded;
        }

        if !self.controller.is_valid_for(tree) {
            let discarded = !self.controller.path().is_empty();
            self.reset();
            return discarded;
        }

        if let Some(focus) = self.focus
            && column_nodes(tree, self.controller.path(), focus.depth)
                .is_none_or(|nodes| focus.index >= nodes.len())
        {
            self.focus = None;
        }
        false
    }

    /// Activate item `index` of the column at `depth`, as a click would.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn activate(&mut self, cascader: &Cascader<'_>, depth: usize, index: usize) -> CascadeResult {
        let tree = cascader.tree();
        self.sync(tree);
        match self
            .controller
            .activate(tree, cascader.disabled(), depth, index)
        {
            Ok(Some(event)) => {
                self.selected = self.controller.path_values(tree);
                self.focus = Some(Focus { depth, index });
                self.offsets.truncate(depth + 1);
                self.reveal = true;
                CascadeResult::Selected(event)
            }
            Ok(None) => CascadeResult::Ignored,
            Err(err) => {
                cascade_core::debug!(error = %err, "cascade activation rejected");
                CascadeResult::Ignored
            }
        }
    }

    /// Dispatch a canonical event.
    pub fn handle_event(
        &mut self,
        cascader: &Cascader<'_>,
        event: &Event,
        hit: Option<(HitId, HitRegion, HitData)>,
    ) -> CascadeResult {
        match event {
            Event::Key(key) => self.handle_key(cascader, key),
            Event::Mouse(mouse) => self.handle_mouse(cascader, mouse, hit),
        }
    }

    /// Handle a mouse event.
    ///
    /// `hit` is `frame.hit_test(event.x, event.y)` when the cascader was
    /// rendered with a hit id. Without one the last layout is consulted.
    pub fn handle_mouse(
        &mut self,
        cascader: &Cascader<'_>,
        event: &MouseEvent,
        hit: Option<(HitId, HitRegion, HitData)>,
    ) -> CascadeResult {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                match self.mouse_target(cascader, event, hit) {
                    Some((depth, index)) => self.activate(cascader, depth, index),
                    None => CascadeResult::Ignored,
                }
            }
            MouseEventKind::ScrollUp => {
                let Some(depth) = self.layout.column_at(event.x, event.y).map(|c| c.depth) else {
                    return CascadeResult::Ignored;
                };
                self.scroll_up(depth, SCROLL_LINES)
            }
            MouseEventKind::ScrollDown => {
                let Some((depth, max)) = self
                    .layout
                    .column_at(event.x, event.y)
                    .map(|c| (c.depth, c.max_offset()))
                else {
                    return CascadeResult::Ignored;
                };
                self.scroll_down(depth, SCROLL_LINES, max)
            }
            _ => CascadeResult::Ignored,
        }
    }

    fn mouse_target(
        &self,
        cascader: &Cascader<'_>,
        event: &MouseEvent,
        hit: Option<(HitId, HitRegion, HitData)>,
    ) -> Option<(usize, usize)> {
        match (cascader.registered_hit_id(), hit) {
            (Some(expected), Some((id, HitRegion::Content, data))) if id == expected => {
                Some(decode_hit(data))
            }
            (Some(_), Some(_)) => None,
            _ => self.layout.item_at(event.x, event.y),
        }
    }

    fn scroll_up(&mut self, depth: usize, lines: usize) -> CascadeResult {
        let current = self.offset(depth);
        if current == 0 {
            return CascadeResult::Ignored;
        }
        self.set_offset(depth, current.saturating_sub(lines));
        CascadeResult::Scrolled
    }

    fn scroll_down(&mut self, depth: usize, lines: usize, max: usize) -> CascadeResult {
        let current = self.offset(depth);
        let next = (current + lines).min(max);
        if next == current {
            return CascadeResult::Ignored;
        }
        self.set_offset(depth, next);
        CascadeResult::Scrolled
    }

    fn set_offset(&mut self, depth: usize, offset: usize) {
        if self.offsets.len() <= depth {
            self.offsets.resize(depth + 1, 0);
        }
        self.offsets[depth] = offset;
    }

    /// Handle a key press.
    ///
    /// Up/Down/Home/End and PageUp/PageDown move focus within a column,
    /// skipping disabled items. A page is `menu_height` rows, or the
    /// rendered column height. A character focuses the next enabled item
    /// whose label starts with it. Enter activates the focused item, Right
    /// does so only for branches; both then focus the first enabled child.
    /// Left moves focus to the parent column without touching the path.
    /// Escape collapses.
    pub fn handle_key(&mut self, cascader: &Cascader<'_>, key: &KeyEvent) -> CascadeResult {
        if !key.is_actionable() {
            return CascadeResult::Ignored;
        }
        self.sync(cascader.tree());
        match key.code {
            KeyCode::Down => self.move_focus(cascader, Step::Next),
            KeyCode::Up => self.move_focus(cascader, Step::Prev),
            KeyCode::Home => self.move_focus(cascader, Step::First),
            KeyCode::End => self.move_focus(cascader, Step::Last),
            KeyCode::PageDown => self.move_focus(cascader, Step::PageDown),
            KeyCode::PageUp => self.move_focus(cascader, Step::PageUp),
            KeyCode::Char(c) => self.focus_by_initial(cascader, c),
            KeyCode::Left => self.focus_parent(),
            KeyCode::Right => self.enter_focused(cascader, true),
            KeyCode::Enter => self.enter_focused(cascader, false),
            KeyCode::Escape => self.collapse(),
        }
    }

    /// Explicit focus, or else the last node of the path.
    fn current_focus(&self) -> Option<Focus> {
        self.focus.or_else(|| {
            let path = self.controller.path();
            path.last().map(|&index| Focus {
                depth: path.len() - 1,
                index,
            })
        })
    }

    fn move_focus(&mut self, cascader: &Cascader<'_>, step: Step) -> CascadeResult {
        let disabled = cascader.disabled();
        let (depth, target) = match self.current_focus() {
            Some(current) => {
                let Some(nodes) = column_nodes(cascader.tree(), self.controller.path(), current.depth)
                else {
                    return CascadeResult::Ignored;
                };
                let enabled = |i: &usize| !is_value_disabled(disabled, nodes[*i].value());
                let len = nodes.len();
                let page = self.page_rows(cascader, current.depth);
                let target = match step {
                    Step::Next => (current.index + 1..len).find(enabled),
                    Step::Prev => (0..current.index).rev().find(enabled),
                    Step::First => (0..len).find(enabled),
                    Step::Last => (0..len).rev().find(enabled),
                    Step::PageDown => {
                        let end = current.index.saturating_add(page).min(len.saturating_sub(1));
                        (current.index + 1..=end)
                            .rev()
                            .find(enabled)
                            .or_else(|| (end + 1..len).find(enabled))
                    }
                    Step::PageUp => {
                        let start = current.index.saturating_sub(page);
                        (start..current.index)
                            .find(enabled)
                            .or_else(|| (0..start).rev().find(enabled))
                    }
                };
                (current.depth, target)
            }
            None => {
                let roots = cascader.tree().roots();
                let target = match step {
                    Step::Next | Step::First | Step::PageDown => first_enabled(roots, disabled),
                    Step::Prev | Step::Last | Step::PageUp => last_enabled(roots, disabled),
                };
                (0, target)
            }
        };

        match target {
            Some(index) => self.set_focus(Focus { depth, index }),
            None => CascadeResult::Ignored,
        }
    }

    /// Focus the next enabled item of the focused column (the roots when
    /// nothing is focused) whose label starts with `c`, ignoring case.
    fn focus_by_initial(&mut self, cascader: &Cascader<'_>, c: char) -> CascadeResult {
        let (depth, start) = match self.current_focus() {
            Some(current) => (current.depth, current.index + 1),
            None => (0, 0),
        };
        let Some(nodes) = column_nodes(cascader.tree(), self.controller.path(), depth) else {
            return CascadeResult::Ignored;
        };
        let disabled = cascader.disabled();
        let wanted: String = c.to_lowercase().collect();
        let len = nodes.len();
        let target = (0..len).map(|k| (start + k) % len).find(|&i| {
            let node = &nodes[i];
            !is_value_disabled(disabled, node.value())
                && node.label().to_lowercase().starts_with(&wanted)
        });
        match target {
            Some(index) => self.set_focus(Focus { depth, index }),
            None => CascadeResult::Ignored,
        }
    }

    /// Rows in one page of the column at `depth`.
    fn page_rows(&self, cascader: &Cascader<'_>, depth: usize) -> usize {
        cascader
            .row_limit()
            .or_else(|| self.layout.column(depth).map(|c| c.rect.height))
            .map_or(1, usize::from)
            .max(1)
    }

    fn set_focus(&mut self, focus: Focus) -> CascadeResult {
        if self.focus == Some(focus) {
            return CascadeResult::Ignored;
        }
        self.focus = Some(focus);
        self.reveal = true;
        CascadeResult::FocusMoved(focus)
    }

    fn focus_parent(&mut self) -> CascadeResult {
        let Some(current) = self.current_focus() else {
            return CascadeResult::Ignored;
        };
        let Some(parent_depth) = current.depth.checked_sub(1) else {
            return CascadeResult::Ignored;
        };
        let Some(&index) = self.controller.path().get(parent_depth) else {
            return CascadeResult::Ignored;
        };
        let focus = Focus {
            depth: parent_depth,
            index,
        };
        self.focus = Some(focus);
        self.reveal = true;
        CascadeResult::FocusMoved(focus)
    }

    fn enter_focused(&mut self, cascader: &Cascader<'_>, branches_only: bool) -> CascadeResult {
        let Some(current) = self.current_focus() else {
            return CascadeResult::Ignored;
        };
        let Some(node) = column_nodes(cascader.tree(), self.controller.path(), current.depth)
            .and_then(|nodes| nodes.get(current.index))
        else {
            return CascadeResult::Ignored;
        };
        if branches_only && node.is_leaf() {
            return CascadeResult::Ignored;
        }
        let first_child = first_enabled(node.children(), cascader.disabled());

        let result = self.activate(cascader, current.depth, current.index);
        if matches!(result, CascadeResult::Selected(_))
            && let Some(index) = first_child
        {
            self.focus = Some(Focus {
                depth: current.depth + 1,
                index,
            });
        }
        result
    }

    fn collapse(&mut self) -> CascadeResult {
        if self.controller.path().is_empty() && self.focus.is_none() {
            return CascadeResult::Ignored;
        }
        self.reset();
        CascadeResult::Collapsed
    }

    /// Consume the pending request to scroll focus or selection into view.
    pub(crate) fn take_reveal(&mut self) -> bool {
        std::mem::take(&mut self.reveal)
    }

    /// Clamp and store the offset for `depth`, scrolling `target` into a
    /// viewport of `height` rows.
    pub(crate) fn scroll_offset(
        &mut self,
        depth: usize,
        target: Option<usize>,
        len: usize,
        height: usize,
    ) -> usize {
        let max = len.saturating_sub(height);
        let mut offset = self.offset(depth).min(max);
        if let Some(target) = target
            && height > 0
        {
            if target < offset {
                offset = target;
            } else if target >= offset + height {
                offset = target + 1 - height;
            }
        }
        self.set_offset(depth, offset);
        offset
    }

    pub(crate) fn finish_render(&mut self, layout: MenuLayout) {
        self.offsets.truncate(layout.columns.len());
        self.layout = layout;
    }
}

/// Nodes of the column at `depth` for `path`, if that column is shown.
fn column_nodes<'t>(tree: &'t CascadeTree, path: &[usize], depth: usize) -> Option<&'t [CascadeNode]> {
    if depth > path.len() {
        return None;
    }
    let nodes = tree.children_at(&path[..depth])?;
    (depth == 0 || !nodes.is_empty()).then_some(nodes)
}

fn first_enabled(nodes: &[CascadeNode], disabled: &dyn DisabledItems) -> Option<usize> {
    nodes
        .iter()
        .position(|n| !is_value_disabled(disabled, n.value()))
}

fn last_enabled(nodes: &[CascadeNode], disabled: &dyn DisabledItems) -> Option<usize> {
    nodes
        .iter()
        .rposition(|n| !is_value_disabled(disabled, n.value()))
}
