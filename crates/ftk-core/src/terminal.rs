#![forbid(unsafe_code)]

//! Crossterm terminal backend.
//!
//! [`TerminalRenderer`] queues crossterm commands on any [`Write`] and only
//! touches the device on [`Renderer::flush`]. [`TerminalGuard`] owns raw mode
//! and the alternate screen for the lifetime of a session and restores the
//! terminal on drop, including on panic unwinding.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};

use crate::geometry::Rect;
use crate::render::{BorderStyle, Orientation, Renderer, TextAttr};

/// A [`Renderer`] that writes crossterm escape sequences.
///
/// Queue failures are latched and reported by the next `flush`.
pub struct TerminalRenderer<W: Write> {
    out: W,
    rows: u16,
    cols: u16,
    pending_error: Option<io::Error>,
}

impl<W: Write> std::fmt::Debug for TerminalRenderer<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalRenderer")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("has_pending_error", &self.pending_error.is_some())
            .finish()
    }
}

impl TerminalRenderer<io::Stdout> {
    /// Renderer on stdout sized to the current terminal.
    pub fn stdout() -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::new(io::stdout(), rows, cols))
    }
}

impl<W: Write> TerminalRenderer<W> {
    /// Create a renderer over `out` for a surface of `rows` x `cols`.
    pub fn new(out: W, rows: u16, cols: u16) -> Self {
        Self {
            out,
            rows,
            cols,
            pending_error: None,
        }
    }

    /// Record a terminal resize.
    pub fn resize(&mut self, rows: u16, cols: u16) {
        self.rows = rows;
        self.cols = cols;
    }

    /// Consume the renderer, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn latch(&mut self, result: io::Result<()>) {
        if let Err(err) = result
            && self.pending_error.is_none()
        {
            self.pending_error = Some(err);
        }
    }

    fn clipped<'t>(&self, x: u16, text: &'t str) -> &'t str {
        let room = self.cols.saturating_sub(x) as usize;
        match text.char_indices().nth(room) {
            Some((idx, _)) => &text[..idx],
            None => text,
        }
    }

    fn put(&mut self, x: u16, y: u16, text: &str, attr: TextAttr) {
        if y >= self.rows || x >= self.cols {
            return;
        }
        let text = self.clipped(x, text).to_string();
        let result = (|| -> io::Result<()> {
            queue!(self.out, MoveTo(x, y))?;
            for (flag, attribute) in [
                (TextAttr::BOLD, Attribute::Bold),
                (TextAttr::DIM, Attribute::Dim),
                (TextAttr::UNDERLINE, Attribute::Underlined),
                (TextAttr::REVERSE, Attribute::Reverse),
            ] {
                if attr.contains(flag) {
                    queue!(self.out, SetAttribute(attribute))?;
                }
            }
            queue!(self.out, Print(text))?;
            if !attr.is_empty() {
                queue!(self.out, SetAttribute(Attribute::Reset))?;
            }
            Ok(())
        })();
        self.latch(result);
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn surface_size(&self) -> (u16, u16) {
        (self.rows, self.cols)
    }

    fn draw_box(&mut self, area: Rect, style: BorderStyle) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let chars = style.chars();
        let inner = area.width as usize - 2;
        let horizontal: String = std::iter::repeat_n(chars.horizontal, inner).collect();
        let top = format!("{}{horizontal}{}", chars.top_left, chars.top_right);
        let bottom = format!("{}{horizontal}{}", chars.bottom_left, chars.bottom_right);
        self.put(area.x, area.y, &top, TextAttr::empty());
        for y in area.y + 1..area.bottom() - 1 {
            let vertical = chars.vertical.to_string();
            self.put(area.x, y, &vertical, TextAttr::empty());
            self.put(area.right() - 1, y, &vertical, TextAttr::empty());
        }
        self.put(area.x, area.bottom() - 1, &bottom, TextAttr::empty());
    }

    fn draw_shadow(&mut self, area: Rect) {
        if area.is_empty() {
            return;
        }
        let shade: String = std::iter::repeat_n(' ', area.width as usize).collect();
        self.put(area.x + 1, area.bottom(), &shade, TextAttr::REVERSE);
        for y in area.y + 1..area.bottom() {
            self.put(area.right(), y, " ", TextAttr::REVERSE);
        }
    }

    fn write_text(&mut self, x: u16, y: u16, text: &str, attr: TextAttr, orientation: Orientation) {
        match orientation {
            Orientation::Horizontal => self.put(x, y, text, attr),
            Orientation::Vertical => {
                let mut buf = [0u8; 4];
                for (row, ch) in text.chars().enumerate() {
                    let y = y.saturating_add(row as u16);
                    self.put(x, y, ch.encode_utf8(&mut buf), attr);
                }
            }
        }
    }

    fn clear_area(&mut self, area: Rect) {
        let blank: String = std::iter::repeat_n(' ', area.width as usize).collect();
        for y in area.y..area.bottom() {
            self.put(area.x, y, &blank, TextAttr::empty());
        }
    }

    fn beep(&mut self) {
        let result = queue!(self.out, Print('\u{7}'));
        self.latch(result);
    }

    fn flush(&mut self) -> io::Result<()> {
        if let Some(err) = self.pending_error.take() {
            return Err(err);
        }
        self.out.flush()
    }
}

/// Raw mode + alternate screen for the lifetime of the guard.
#[derive(Debug)]
pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    /// Enter raw mode, switch to the alternate screen, hide the cursor.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        crate::info!("terminal raw mode enabled");
        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(err);
        }
        Ok(Self { active: true })
    }

    /// Restore the terminal now instead of at drop.
    pub fn leave(mut self) -> io::Result<()> {
        self.restore()
    }

    fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        let mut stdout = io::stdout();
        let shown = execute!(stdout, Show, LeaveAlternateScreen);
        // Exit raw mode last, even if the screen switch failed.
        let raw = terminal::disable_raw_mode();
        crate::info!("terminal restored");
        shown.and(raw)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}
