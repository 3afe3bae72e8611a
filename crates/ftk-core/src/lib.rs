#![forbid(unsafe_code)]

//! Core: input events, geometry, and the renderer/terminal collaborators
//! every ftk widget is written against.

pub mod canvas;
pub mod event;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod render;
#[cfg(not(target_arch = "wasm32"))]
pub mod terminal;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, error, info, trace, warn};
