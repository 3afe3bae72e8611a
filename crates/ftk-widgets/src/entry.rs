#![forbid(unsafe_code)]

//! Single-line text entry.
//!
//! The field scrolls horizontally to keep the cursor visible. Editing keys:
//!
//! | Key | Action |
//! |-----|--------|
//! | printable | insert at cursor |
//! | Backspace / Delete | remove before / at cursor |
//! | Left / Right / Home / End | move cursor |
//! | Ctrl-U | erase the field |
//! | Ctrl-T | transpose the characters around the cursor |
//! | Ctrl-X | cut the field to the clipboard |
//! | Ctrl-Y | copy the field to the clipboard |
//! | Ctrl-V | replace the field with the clipboard |
//! | Enter / Tab | accept (if the minimum length is met) |
//! | Escape | cancel |
//!
//! A read-only entry rejects every key that would change the value.

use std::any::Any;

use ftk_core::event::{KeyCode, KeyEvent, Modifiers};
use ftk_core::geometry::Rect;
use ftk_core::render::{BorderStyle, Orientation, Renderer, TextAttr};
use unicode_width::UnicodeWidthChar;

use crate::activation::{Controls, Dispatch, Interact};
use crate::base::{ExitType, WidgetBase};
use crate::clipboard::Clipboard;
use crate::error::WidgetError;
use crate::{Widget, content_area, display_width, draw_chrome};

/// A single-line text field.
#[derive(Debug)]
pub struct Entry {
    base: WidgetBase,
    controls: Controls<Self>,
    label: String,
    title: Option<String>,
    value: Vec<char>,
    committed: String,
    cursor: usize,
    left: usize,
    max_length: usize,
    min_length: usize,
    editable: bool,
    filler: char,
    mask: Option<char>,
    clipboard: Clipboard,
}

fn char_width(c: char) -> usize {
    c.width().unwrap_or(0).max(1)
}

impl Entry {
    /// Create an entry in `area` of `surface`, with `label` drawn before the
    /// field.
    pub fn new(surface: Rect, area: Rect, label: impl Into<String>) -> Result<Self, WidgetError> {
        let base = WidgetBase::new(surface, area)?;
        Ok(Self {
            base,
            controls: Controls::new(),
            label: label.into(),
            title: None,
            value: Vec::new(),
            committed: String::new(),
            cursor: 0,
            left: 0,
            max_length: usize::MAX,
            min_length: 0,
            editable: true,
            filler: ' ',
            mask: None,
            clipboard: Clipboard::new(),
        })
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_box(mut self, boxed: bool) -> Self {
        self.base.set_boxed(boxed);
        self
    }

    #[must_use]
    pub fn with_border(mut self, border: BorderStyle) -> Self {
        self.base.set_border(border);
        self
    }

    /// Initial (and committed) value, truncated to the maximum length.
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.set_value(value);
        self.committed = self.value();
        self
    }

    /// Longest value accepted, in characters.
    #[must_use]
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self.value.truncate(max_length);
        self.cursor = self.cursor.min(self.value.len());
        self
    }

    /// Shortest value that can be accepted.
    #[must_use]
    pub fn with_min_length(mut self, min_length: usize) -> Self {
        self.min_length = min_length;
        self
    }

    /// Whether keys may change the value.
    #[must_use]
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Character shown in unused field cells.
    #[must_use]
    pub fn with_filler(mut self, filler: char) -> Self {
        self.filler = filler;
        self
    }

    /// Display every character as `mask` (password fields).
    #[must_use]
    pub fn with_mask(mut self, mask: char) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Share a clipboard with other entries.
    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Clipboard) -> Self {
        self.clipboard = clipboard;
        self
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replace the value and move the cursor to its end.
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into().chars().take(self.max_length).collect();
        self.cursor = self.value.len();
        self.left = 0;
        self.scroll_to_cursor();
    }

    pub fn clear(&mut self) {
        self.set_value("");
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// First visible character.
    pub fn left_char(&self) -> usize {
        self.left
    }

    pub fn is_editable(&self) -> bool {
        self.editable
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    fn field_area(&self) -> Rect {
        let content = content_area(self.base.area(), self.base.boxed(), self.title.is_some());
        let label = (display_width(&self.label) as u16).min(content.width);
        Rect::new(content.x + label, content.y, content.width - label, content.height.min(1))
    }

    fn scroll_to_cursor(&mut self) {
        let width = self.field_area().width as usize;
        if self.cursor < self.left {
            self.left = self.cursor;
        }
        while self.left < self.cursor {
            let used: usize = self.value[self.left..self.cursor]
                .iter()
                .map(|&c| char_width(c))
                .sum::<usize>()
                + 1;
            if used <= width {
                break;
            }
            self.left += 1;
        }
    }

    fn edit(&mut self, key: KeyEvent) -> Option<Dispatch> {
        let ctrl = key.modifiers == Modifiers::CTRL;
        let handled = match key.code {
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                self.value.remove(self.cursor);
                true
            }
            KeyCode::Backspace => false,
            KeyCode::Delete if self.cursor < self.value.len() => {
                self.value.remove(self.cursor);
                true
            }
            KeyCode::Delete => false,
            KeyCode::Char('u') if ctrl => {
                self.value.clear();
                self.cursor = 0;
                true
            }
            KeyCode::Char('t') if ctrl => self.transpose(),
            KeyCode::Char('x') if ctrl => {
                if self.value.is_empty() {
                    false
                } else {
                    self.clipboard.set(self.value());
                    self.value.clear();
                    self.cursor = 0;
                    true
                }
            }
            KeyCode::Char('v') if ctrl => {
                if self.clipboard.is_empty() {
                    false
                } else {
                    let pasted = self.clipboard.get();
                    self.set_value(pasted);
                    true
                }
            }
            _ => match key.printable() {
                Some(c) if self.value.len() < self.max_length => {
                    self.value.insert(self.cursor, c);
                    self.cursor += 1;
                    true
                }
                Some(_) => false,
                None => return None,
            },
        };
        Some(if handled {
            Dispatch::Handled
        } else {
            Dispatch::Rejected
        })
    }

    fn transpose(&mut self) -> bool {
        if self.value.len() < 2 || self.cursor == 0 {
            return false;
        }
        let at = self.cursor.min(self.value.len() - 1);
        self.value.swap(at - 1, at);
        true
    }

    fn is_edit_key(key: &KeyEvent) -> bool {
        let ctrl = key.modifiers == Modifiers::CTRL;
        matches!(key.code, KeyCode::Backspace | KeyCode::Delete)
            || (ctrl && matches!(key.code, KeyCode::Char('u' | 't' | 'x' | 'v')))
            || key.printable().is_some()
    }
}

impl Widget for Entry {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "Entry"
    }

    fn draw_focused(&mut self, out: &mut dyn Renderer, boxed: bool, focused: bool) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_draw",
            widget = "Entry",
            x = self.base.area().x,
            y = self.base.area().y,
            w = self.base.area().width,
            h = self.base.area().height
        )
        .entered();

        if !self.base.is_visible() {
            return;
        }
        let content = draw_chrome(out, &self.base, boxed, self.title.as_deref());
        if content.is_empty() {
            return;
        }
        out.write_text(content.x, content.y, &self.label, TextAttr::empty(), Orientation::Horizontal);

        let field = self.field_area();
        let width = field.width as usize;
        let mut shown = String::new();
        let mut used = 0;
        let mut cursor_col = None;
        for (i, &c) in self.value.iter().enumerate().skip(self.left) {
            let glyph = self.mask.unwrap_or(c);
            let w = char_width(glyph);
            if used + w > width {
                break;
            }
            if i == self.cursor {
                cursor_col = Some((used, glyph));
            }
            shown.push(glyph);
            used += w;
        }
        if cursor_col.is_none() && self.cursor >= self.left && used < width {
            cursor_col = Some((used, self.filler));
        }
        shown.extend(std::iter::repeat_n(self.filler, width.saturating_sub(used)));
        out.write_text(field.x, field.y, &shown, TextAttr::UNDERLINE, Orientation::Horizontal);

        if focused && let Some((col, glyph)) = cursor_col {
            let mut buf = [0u8; 4];
            out.write_text(
                field.x + col as u16,
                field.y,
                glyph.encode_utf8(&mut buf),
                TextAttr::REVERSE,
                Orientation::Horizontal,
            );
        }
    }

    fn inject(&mut self, out: &mut dyn Renderer, key: KeyEvent) -> ExitType {
        crate::activation::inject(self, out, key)
    }

    fn save_data(&mut self) {
        self.committed = self.value();
    }

    fn refresh_data(&mut self) {
        let committed = self.committed.clone();
        self.set_value(committed);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Interact for Entry {
    type Output = String;

    fn controls(&self) -> &Controls<Self> {
        &self.controls
    }

    fn controls_mut(&mut self) -> &mut Controls<Self> {
        &mut self.controls
    }

    fn dispatch(&mut self, _out: &mut dyn Renderer, key: KeyEvent) -> Dispatch {
        let ctrl = key.modifiers == Modifiers::CTRL;
        let result = match key.code {
            KeyCode::Left if self.cursor > 0 => {
                self.cursor -= 1;
                Dispatch::Handled
            }
            KeyCode::Right if self.cursor < self.value.len() => {
                self.cursor += 1;
                Dispatch::Handled
            }
            KeyCode::Left | KeyCode::Right => Dispatch::Rejected,
            KeyCode::Home => {
                self.cursor = 0;
                Dispatch::Handled
            }
            KeyCode::End => {
                self.cursor = self.value.len();
                Dispatch::Handled
            }
            KeyCode::Char('y') if ctrl => {
                if self.value.is_empty() {
                    Dispatch::Rejected
                } else {
                    self.clipboard.set(self.value());
                    Dispatch::Handled
                }
            }
            KeyCode::Enter | KeyCode::Tab if self.value.len() >= self.min_length => {
                Dispatch::Exit(ExitType::Normal)
            }
            KeyCode::Enter | KeyCode::Tab => Dispatch::Rejected,
            KeyCode::Escape => Dispatch::Exit(ExitType::EscapeHit),
            _ if !self.editable && Self::is_edit_key(&key) => Dispatch::Rejected,
            _ => self.edit(key).unwrap_or(Dispatch::Rejected),
        };
        self.scroll_to_cursor();
        result
    }

    fn result(&self) -> String {
        self.value()
    }
}
