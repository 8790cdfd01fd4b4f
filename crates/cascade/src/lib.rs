#![forbid(unsafe_code)]

//! Cascade public facade crate.
//!
//! Re-exports the types needed to build, render, and drive a cascading
//! selection menu, plus a prelude for day-to-day use.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use cascade_core::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
pub use cascade_core::geometry::{Rect, Size};
#[cfg(feature = "tracing-json")]
pub use cascade_core::logging::init_json;

// --- Render re-exports -----------------------------------------------------

pub use cascade_render::buffer::Buffer;
pub use cascade_render::cell::{Cell, PackedRgba, StyleFlags};
pub use cascade_render::frame::{Frame, HitData, HitId, HitRegion};
pub use cascade_render::headless::buffer_to_text;

// --- Style and text re-exports ---------------------------------------------

pub use cascade_style::{Style, StyleSheet};
pub use cascade_text::{Line, Span, display_width};

// --- Widget re-exports -----------------------------------------------------

pub use cascade_widgets::cascader;
pub use cascade_widgets::cascader::{
    ActivationError, CascadeResult, CascadeStatus, CascadeTree, Cascader, CascaderOptions,
    CascaderState, ClassNames, DisabledItems, Identifier, KeyMapping, MenuLayout, NodeAccessor,
    Normalizer, OptionsError, SelectEvent,
};
pub use cascade_widgets::{StatefulWidget, Widget};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Cascade.
#[derive(Debug)]
pub enum Error {
    /// Options failed to load or validate.
    Options(OptionsError),
    /// An activation did not name a visible item.
    Activation(ActivationError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Options(err) => write!(f, "{err}"),
            Self::Activation(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Options(err) => Some(err),
            Self::Activation(err) => Some(err),
        }
    }
}

impl From<OptionsError> for Error {
    fn from(err: OptionsError) -> Self {
        Self::Options(err)
    }
}

impl From<ActivationError> for Error {
    fn from(err: ActivationError) -> Self {
        Self::Activation(err)
    }
}

/// Standard result type for Cascade APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CascadeResult, CascadeTree, Cascader, CascaderOptions, CascaderState, Error, Event, Frame,
        HitId, Identifier, KeyCode, KeyEvent, MouseEvent, Normalizer, Rect, Result, SelectEvent,
        StatefulWidget, Style, Widget,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn options_error_converts_and_keeps_source() {
        let err: Error = CascaderOptions::from_json_str("{").unwrap_err().into();
        assert!(matches!(err, Error::Options(OptionsError::Parse(_))));
        assert!(err.source().is_some());
    }

    #[test]
    fn activation_error_displays_inner_message() {
        let inner = ActivationError::NoColumn { depth: 2 };
        let err = Error::from(inner);
        assert_eq!(err.to_string(), inner.to_string());
    }
}
