#![forbid(unsafe_code)]

//! ftk public facade crate.
//!
//! Re-exports the widget, screen, and terminal types applications need and
//! offers a small prelude. Each layer stays reachable as a module
//! ([`core`], [`widgets`], [`screen`]) for everything not re-exported here.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use ftk_core::canvas::Canvas;
pub use ftk_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use ftk_core::geometry::Rect;
pub use ftk_core::input::{InputSource, ScriptedInput};
pub use ftk_core::render::{BorderStyle, Orientation, Renderer, TextAttr};

#[cfg(not(target_arch = "wasm32"))]
pub use ftk_core::input::CrosstermInput;
#[cfg(not(target_arch = "wasm32"))]
pub use ftk_core::terminal::{TerminalGuard, TerminalRenderer};

// --- Widget re-exports -----------------------------------------------------

pub use ftk_widgets::{
    Actions, BindError, Button, Clipboard, Entry, ExitType, Interact, KeyBindingTable, KeyChord,
    Label, RadioList, ScrollList, SelectionList, ViewportState, Widget, WidgetError, WidgetId,
    activate,
};

// --- Screen re-exports -----------------------------------------------------

pub use ftk_screen::{
    ScreenAction, ScreenError, ScreenRegistry, ScreenRequests, TraversalConfig, TraverseOutcome,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for ftk apps.
#[derive(Debug)]
pub enum Error {
    /// I/O failure during terminal setup or teardown.
    Io(std::io::Error),
    /// A widget could not be constructed.
    Widget(WidgetError),
    /// A key binding was refused.
    Bind(BindError),
    /// Screen traversal failed.
    Screen(ScreenError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Widget(err) => write!(f, "{err}"),
            Self::Bind(err) => write!(f, "{err}"),
            Self::Screen(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Widget(err) => Some(err),
            Self::Bind(err) => Some(err),
            Self::Screen(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<WidgetError> for Error {
    fn from(err: WidgetError) -> Self {
        Self::Widget(err)
    }
}

impl From<BindError> for Error {
    fn from(err: BindError) -> Self {
        Self::Bind(err)
    }
}

impl From<ScreenError> for Error {
    fn from(err: ScreenError) -> Self {
        Self::Screen(err)
    }
}

/// Standard result type for ftk APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BorderStyle, Button, Canvas, Clipboard, Entry, Error, Event, ExitType, Interact, KeyCode,
        KeyEvent, Label, Modifiers, RadioList, Rect, Renderer, Result, ScreenRegistry,
        ScrollList, SelectionList, TraversalConfig, TraverseOutcome, Widget,
    };

    pub use crate::{core, screen, widgets};
}

pub use ftk_core as core;
pub use ftk_screen as screen;
pub use ftk_widgets as widgets;
