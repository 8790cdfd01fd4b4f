#![forbid(unsafe_code)]

//! Cascading-selection menu.
//!
//! A hierarchy of records becomes a row of columns: the roots, then the
//! children of each selected branch. The pieces compose in order:
//!
//! 1. [`Normalizer`] turns raw JSON records into a [`CascadeTree`], reading
//!    fields through a [`NodeAccessor`] such as [`KeyMapping`].
//! 2. [`build_columns`] derives the visible columns from the selected path.
//! 3. [`ItemRenderer`] classifies each node (disabled, active, focused,
//!    branch) and produces its display content.
//! 4. [`SelectionController`] applies activations to the path and emits
//!    [`SelectEvent`]s.
//!
//! [`Cascader`] and [`CascaderState`] tie these to a [`Frame`](cascade_render::frame::Frame).
//!
//! # Example
//!
//! ```
//! use cascade_core::event::MouseEvent;
//! use cascade_core::geometry::Rect;
//! use cascade_render::frame::{Frame, HitId};
//! use cascade_widgets::StatefulWidget;
//! use cascade_widgets::cascader::{Cascader, CascaderState, CascadeResult, Normalizer};
//! use serde_json::json;
//!
//! let normalizer: Normalizer = Normalizer::default();
//! let tree = normalizer.normalize(&json!([
//!     {"value": "fruit", "label": "Fruit", "children": [
//!         {"value": "apple", "label": "Apple"}
//!     ]}
//! ]));
//!
//! let cascader = Cascader::new(&tree).menu_width(10).hit_id(HitId::new(1));
//! let mut state = CascaderState::new();
//! let mut frame = Frame::with_hit_grid(20, 4);
//! cascader.render(Rect::new(0, 0, 20, 4), &mut frame, &mut state);
//!
//! let click = MouseEvent::left_click(2, 0);
//! let hit = frame.hit_test(2, 0);
//! let result = state.handle_mouse(&cascader, &click, hit);
//! assert!(matches!(result, CascadeResult::Selected(ref e) if !e.is_complete()));
//! assert_eq!(state.path(), &[0]);
//! ```

pub mod column;
pub mod item;
pub mod keys;
pub mod layout;
pub mod node;
pub mod normalize;
pub mod options;
pub mod selection;
pub mod state;
pub mod theme;
pub mod widget;

pub use column::{Column, build_columns};
pub use item::{DisabledItems, ItemEntry, ItemRenderer, NoDisabled, RenderMenuItem};
pub use keys::{KeyMapping, NodeAccessor};
pub use layout::{ColumnLayout, ItemLayout, MenuLayout};
pub use node::{CascadeNode, CascadeTree, Identifier};
pub use normalize::Normalizer;
pub use options::{CascaderOptions, OptionsError};
pub use selection::{
    ActivationError, CascadeStatus, SelectEvent, SelectListener, SelectionController,
    SelectionPhase,
};
pub use state::{CascadeResult, CascaderState, Focus};
pub use theme::{ClassNames, default_stylesheet};
pub use widget::Cascader;
