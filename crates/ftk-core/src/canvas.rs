#![forbid(unsafe_code)]

//! Headless renderer.
//!
//! `Canvas` is a row-major grid of [`CanvasCell`]s implementing
//! [`Renderer`]. It never touches a terminal, which makes it the backend for
//! every test and for snapshot-style assertions.
//!
//! # Invariants
//!
//! 1. `cells.len() == width * height`
//! 2. Width and height never change after creation
//! 3. Writes outside the grid are silently clipped

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::geometry::Rect;
use crate::render::{BorderStyle, Orientation, Renderer, TextAttr};

/// Shadow glyph used by [`Canvas::draw_shadow`].
pub const SHADOW_CHAR: char = '░';

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasCell {
    pub ch: char,
    pub attr: TextAttr,
}

impl Default for CanvasCell {
    fn default() -> Self {
        Self {
            ch: ' ',
            attr: TextAttr::empty(),
        }
    }
}

/// A headless drawing surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<CanvasCell>,
    beeps: usize,
    draw_calls: usize,
}

impl Canvas {
    /// Create a blank canvas with the given dimensions.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![CanvasCell::default(); size],
            beeps: 0,
            draw_calls: 0,
        }
    }

    /// Canvas width in cells.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Canvas height in cells.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    /// The cell at `(x, y)`, if inside the grid.
    pub fn cell(&self, x: u16, y: u16) -> Option<&CanvasCell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    fn set(&mut self, x: u16, y: u16, ch: char, attr: TextAttr) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = CanvasCell { ch, attr };
        }
    }

    /// Row `y` as a string, trailing blanks trimmed.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        let start = y as usize * self.width as usize;
        let row: String = self.cells[start..start + self.width as usize]
            .iter()
            .map(|c| c.ch)
            .collect();
        row.trim_end().to_string()
    }

    /// Every row, joined with newlines.
    pub fn contents(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of `beep` calls so far.
    pub const fn beeps(&self) -> usize {
        self.beeps
    }

    /// Number of drawing primitive calls so far.
    pub const fn draw_calls(&self) -> usize {
        self.draw_calls
    }

    /// Blank the whole grid. Counters are kept.
    pub fn clear(&mut self) {
        self.cells.fill(CanvasCell::default());
    }
}

impl Renderer for Canvas {
    fn surface_size(&self) -> (u16, u16) {
        (self.height, self.width)
    }

    fn draw_box(&mut self, area: Rect, style: BorderStyle) {
        self.draw_calls += 1;
        if area.width < 2 || area.height < 2 {
            return;
        }
        let chars = style.chars();
        let (right, bottom) = (area.right() - 1, area.bottom() - 1);
        for x in area.x + 1..right {
            self.set(x, area.y, chars.horizontal, TextAttr::empty());
            self.set(x, bottom, chars.horizontal, TextAttr::empty());
        }
        for y in area.y + 1..bottom {
            self.set(area.x, y, chars.vertical, TextAttr::empty());
            self.set(right, y, chars.vertical, TextAttr::empty());
        }
        self.set(area.x, area.y, chars.top_left, TextAttr::empty());
        self.set(right, area.y, chars.top_right, TextAttr::empty());
        self.set(area.x, bottom, chars.bottom_left, TextAttr::empty());
        self.set(right, bottom, chars.bottom_right, TextAttr::empty());
    }

    fn draw_shadow(&mut self, area: Rect) {
        self.draw_calls += 1;
        if area.is_empty() {
            return;
        }
        for x in area.x + 1..=area.right() {
            self.set(x, area.bottom(), SHADOW_CHAR, TextAttr::DIM);
        }
        for y in area.y + 1..area.bottom() {
            self.set(area.right(), y, SHADOW_CHAR, TextAttr::DIM);
        }
    }

    fn write_text(&mut self, x: u16, y: u16, text: &str, attr: TextAttr, orientation: Orientation) {
        self.draw_calls += 1;
        let (mut cx, mut cy) = (x, y);
        for grapheme in text.graphemes(true) {
            let w = UnicodeWidthStr::width(grapheme) as u16;
            if w == 0 {
                continue;
            }
            let Some(c) = grapheme.chars().next() else {
                continue;
            };
            self.set(cx, cy, c, attr);
            match orientation {
                Orientation::Horizontal => {
                    // Wide glyphs occupy a continuation cell.
                    for extra in 1..w {
                        self.set(cx.saturating_add(extra), cy, ' ', attr);
                    }
                    cx = cx.saturating_add(w);
                }
                Orientation::Vertical => cy = cy.saturating_add(1),
            }
        }
    }

    fn clear_area(&mut self, area: Rect) {
        self.draw_calls += 1;
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                self.set(x, y, ' ', TextAttr::empty());
            }
        }
    }

    fn beep(&mut self) {
        self.beeps += 1;
    }
}
