#![forbid(unsafe_code)]

//! The renderer collaborator.
//!
//! Widgets draw exclusively through [`Renderer`]. The trait is the whole
//! presentational surface the toolkit needs: boxes, shadows, text runs, area
//! clears, and an audible reject signal. [`Canvas`](crate::canvas::Canvas) is
//! the headless implementation; [`TerminalRenderer`](crate::terminal::TerminalRenderer)
//! drives a real terminal.

use std::io;

use bitflags::bitflags;

use crate::geometry::Rect;

/// Characters used to draw a border around a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderChars {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderChars {
    /// Simple box-drawing characters (U+250x).
    pub const SQUARE: Self = Self {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };

    /// Rounded corners.
    pub const ROUNDED: Self = Self {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        horizontal: '─',
        vertical: '│',
    };

    /// Double-line border.
    pub const DOUBLE: Self = Self {
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
        horizontal: '═',
        vertical: '║',
    };

    /// Heavy (thick) border.
    pub const HEAVY: Self = Self {
        top_left: '┏',
        top_right: '┓',
        bottom_left: '┗',
        bottom_right: '┛',
        horizontal: '━',
        vertical: '┃',
    };

    /// ASCII-only border.
    pub const ASCII: Self = Self {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
    };
}

/// Named border presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    #[default]
    Square,
    Rounded,
    Double,
    Heavy,
    Ascii,
}

impl BorderStyle {
    /// The glyph table for this preset.
    #[must_use]
    pub const fn chars(self) -> BorderChars {
        match self {
            Self::Square => BorderChars::SQUARE,
            Self::Rounded => BorderChars::ROUNDED,
            Self::Double => BorderChars::DOUBLE,
            Self::Heavy => BorderChars::HEAVY,
            Self::Ascii => BorderChars::ASCII,
        }
    }
}

bitflags! {
    /// Text attributes for a run of text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextAttr: u8 {
        const BOLD      = 0b0001;
        const DIM       = 0b0010;
        const UNDERLINE = 0b0100;
        /// Used for the highlighted row of a focused list.
        const REVERSE   = 0b1000;
    }
}

/// Direction a text run is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Presentational primitives consumed by widgets.
///
/// Implementations clip everything to the surface; callers never need to
/// bounds-check.
pub trait Renderer {
    /// Surface size as `(rows, cols)`.
    fn surface_size(&self) -> (u16, u16);

    /// Draw a border along the edge of `area`.
    fn draw_box(&mut self, area: Rect, style: BorderStyle);

    /// Draw a one-cell drop shadow below and right of `area`.
    fn draw_shadow(&mut self, area: Rect);

    /// Write `text` starting at `(x, y)`.
    fn write_text(&mut self, x: u16, y: u16, text: &str, attr: TextAttr, orientation: Orientation);

    /// Blank every cell in `area`.
    fn clear_area(&mut self, area: Rect);

    /// Signal a rejected input (terminal bell).
    fn beep(&mut self);

    /// Push pending output to the device.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// The full surface as a rectangle.
    fn surface(&self) -> Rect {
        let (rows, cols) = self.surface_size();
        Rect::from_size(cols, rows)
    }
}
