#![forbid(unsafe_code)]

//! Screens: an ordered set of widgets sharing one terminal surface.
//!
//! - [`ScreenRegistry`] owns the widgets, their z-order, and the focus index.
//! - Focus traversal (`focus_next`, `focus_previous`, ...) lives on the
//!   registry and always unfocuses the old widget before focusing the new one.
//! - [`ScreenRequests`] lets code running inside a widget (binding handlers,
//!   hooks) ask for registry mutations that are applied between input units.
//! - [`ScreenRegistry::traverse`] is the screen-level input loop.

pub mod error;
mod focus;
pub mod registry;
pub mod requests;
pub mod traverse;

pub use error::ScreenError;
pub use registry::ScreenRegistry;
pub use requests::{ScreenExit, ScreenRequest, ScreenRequests};
pub use traverse::{Intercept, ScreenAction, TraversalConfig, TraverseOutcome};
