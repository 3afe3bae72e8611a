#![forbid(unsafe_code)]

use std::io;

/// Failures that end a screen traversal.
#[derive(Debug)]
pub enum ScreenError {
    /// The input source failed.
    Input(io::Error),
    /// The renderer could not flush.
    Render(io::Error),
}

impl std::fmt::Display for ScreenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Input(e) => write!(f, "input error: {e}"),
            Self::Render(e) => write!(f, "render error: {e}"),
        }
    }
}

impl std::error::Error for ScreenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Input(e) | Self::Render(e) => Some(e),
        }
    }
}
