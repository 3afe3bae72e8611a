#![forbid(unsafe_code)]

//! Widget construction and binding errors.

use ftk_core::geometry::Rect;

use crate::binding::KeyChord;

/// A widget could not be constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// The requested geometry is empty or does not fit the surface.
    DoesNotFit { requested: Rect, surface: Rect },
    /// The widget needs content (items, choices) and none was supplied.
    Empty,
}

impl std::fmt::Display for WidgetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DoesNotFit { requested, surface } => write!(
                f,
                "widget area {}x{} at ({}, {}) does not fit surface {}x{}",
                requested.width,
                requested.height,
                requested.x,
                requested.y,
                surface.width,
                surface.height
            ),
            Self::Empty => write!(f, "widget requires at least one item"),
        }
    }
}

impl std::error::Error for WidgetError {}

/// A key binding was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindError {
    /// The key lies outside the representable input range.
    Unrepresentable(KeyChord),
}

impl std::fmt::Display for BindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unrepresentable(chord) => write!(f, "cannot bind unrepresentable key {chord:?}"),
        }
    }
}

impl std::error::Error for BindError {}
