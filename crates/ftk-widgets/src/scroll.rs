#![forbid(unsafe_code)]

//! Scrolling list widget.
//!
//! Displays a list of text items with a cursor. Enter (or Tab) accepts the
//! item under the cursor; Escape cancels.
//!
//! # Example
//!
//! ```
//! use ftk_core::canvas::Canvas;
//! use ftk_core::event::{KeyCode, KeyEvent};
//! use ftk_core::geometry::Rect;
//! use ftk_core::render::Renderer;
//! use ftk_widgets::{Interact, ScrollList};
//!
//! let mut canvas = Canvas::new(20, 6);
//! let mut list = ScrollList::new(canvas.surface(), Rect::new(0, 0, 20, 6), ["a", "b", "c"])
//!     .unwrap()
//!     .with_box(true);
//! let keys = [KeyEvent::new(KeyCode::Down), KeyEvent::new(KeyCode::Enter)];
//! assert_eq!(list.replay(&mut canvas, &keys), Some(1));
//! ```

use std::any::Any;

use ftk_core::event::{KeyCode, KeyEvent};
use ftk_core::geometry::Rect;
use ftk_core::render::{BorderStyle, Renderer};

use crate::activation::{Controls, Dispatch, Interact};
use crate::base::{ExitType, WidgetBase};
use crate::error::WidgetError;
use crate::list::ListCore;
use crate::viewport::ViewportState;
use crate::{Widget, display_width};

/// A scrolling list of text items.
#[derive(Debug)]
pub struct ScrollList {
    base: WidgetBase,
    controls: Controls<Self>,
    list: ListCore,
    highlight_symbol: Option<String>,
}

impl ScrollList {
    /// Create a list in `area` of `surface`.
    pub fn new(
        surface: Rect,
        area: Rect,
        items: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, WidgetError> {
        let base = WidgetBase::new(surface, area)?;
        let items = items.into_iter().map(Into::into).collect();
        let mut list = Self {
            base,
            controls: Controls::new(),
            list: ListCore::new(items, 0),
            highlight_symbol: None,
        };
        list.list.relayout(&list.base);
        Ok(list)
    }

    /// Show a title row above the items.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.list.title = Some(title.into());
        self.list.relayout(&self.base);
        self
    }

    /// Draw a border around the list.
    #[must_use]
    pub fn with_box(mut self, boxed: bool) -> Self {
        self.base.set_boxed(boxed);
        self.list.relayout(&self.base);
        self
    }

    #[must_use]
    pub fn with_border(mut self, border: BorderStyle) -> Self {
        self.base.set_border(border);
        self
    }

    #[must_use]
    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.base.set_shadow(shadow);
        self
    }

    /// Reserve the rightmost column for a scrollbar.
    #[must_use]
    pub fn with_scrollbar(mut self, scrollbar: bool) -> Self {
        self.list.scrollbar = scrollbar;
        self.list.relayout(&self.base);
        self
    }

    /// Prefix the item under the cursor with `symbol`.
    #[must_use]
    pub fn with_highlight_symbol(mut self, symbol: impl Into<String>) -> Self {
        let symbol = symbol.into();
        self.list.set_gutter(display_width(&symbol));
        self.highlight_symbol = Some(symbol);
        self.list.relayout(&self.base);
        self
    }

    pub fn items(&self) -> &[String] {
        &self.list.items
    }

    pub fn len(&self) -> usize {
        self.list.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.items.is_empty()
    }

    /// Replace every item. The cursor is clamped to the new list.
    pub fn set_items(&mut self, items: impl IntoIterator<Item = impl Into<String>>) {
        self.list.items = items.into_iter().map(Into::into).collect();
        self.list.relayout(&self.base);
    }

    /// Append an item.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.list.items.push(item.into());
        self.list.relayout(&self.base);
    }

    /// Insert an item before `index` (appending when past the end).
    pub fn insert_item(&mut self, index: usize, item: impl Into<String>) {
        let index = index.min(self.list.items.len());
        self.list.items.insert(index, item.into());
        self.list.relayout(&self.base);
    }

    /// Remove the item at `index`.
    pub fn delete_item(&mut self, index: usize) -> Option<String> {
        if index >= self.list.items.len() {
            return None;
        }
        let removed = self.list.items.remove(index);
        self.list.relayout(&self.base);
        Some(removed)
    }

    /// Index under the cursor, `None` for an empty list.
    pub fn current_item(&self) -> Option<usize> {
        self.list.current()
    }

    /// Move the cursor, clamping to the list.
    pub fn set_current_item(&mut self, index: usize) {
        self.list.viewport.set_position(index);
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.list.viewport
    }
}

impl Widget for ScrollList {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "ScrollList"
    }

    fn draw_focused(&mut self, out: &mut dyn Renderer, boxed: bool, focused: bool) {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!(
            "widget_draw",
            widget = "ScrollList",
            x = self.base.area().x,
            y = self.base.area().y,
            w = self.base.area().width,
            h = self.base.area().height
        )
        .entered();

        if !self.base.is_visible() {
            return;
        }
        let symbol = self.highlight_symbol.as_deref();
        let current = self.list.viewport.current_item();
        self.list
            .draw(out, &self.base, boxed, focused, |index, item| match symbol {
                Some(symbol) if index == current => format!("{symbol}{item}"),
                Some(symbol) => format!("{}{item}", " ".repeat(display_width(symbol))),
                None => item.to_string(),
            });
    }

    fn inject(&mut self, out: &mut dyn Renderer, key: KeyEvent) -> ExitType {
        crate::activation::inject(self, out, key)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Interact for ScrollList {
    type Output = usize;

    fn controls(&self) -> &Controls<Self> {
        &self.controls
    }

    fn controls_mut(&mut self) -> &mut Controls<Self> {
        &mut self.controls
    }

    fn dispatch(&mut self, _out: &mut dyn Renderer, key: KeyEvent) -> Dispatch {
        if let Some(result) = self.list.navigate(&key) {
            return result;
        }
        match key.code {
            KeyCode::Enter | KeyCode::Tab if !self.is_empty() => Dispatch::Exit(ExitType::Normal),
            KeyCode::Escape => Dispatch::Exit(ExitType::EscapeHit),
            _ => Dispatch::Rejected,
        }
    }

    fn result(&self) -> usize {
        self.list.viewport.current_item()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftk_core::canvas::Canvas;

    fn list(items: usize, height: u16) -> (Canvas, ScrollList) {
        let canvas = Canvas::new(20, height);
        let list = ScrollList::new(
            canvas.surface(),
            Rect::new(0, 0, 20, height),
            (0..items).map(|i| format!("item {i}")),
        )
        .unwrap();
        (canvas, list)
    }

    #[test]
    fn draws_visible_items() {
        let (mut canvas, mut list) = list(10, 3);
        list.draw(&mut canvas, false);
        assert_eq!(canvas.contents(), "item 0\nitem 1\nitem 2");
    }

    #[test]
    fn boxed_title_layout() {
        let canvas = Canvas::new(20, 6);
        let list = ScrollList::new(canvas.surface(), Rect::new(0, 0, 20, 6), ["a", "b", "c", "d"])
            .unwrap()
            .with_box(true)
            .with_title("Pick");
        assert_eq!(list.viewport().view_size(), 3);
    }

    #[test]
    fn highlight_symbol_marks_cursor() {
        let (mut canvas, list) = list(3, 3);
        let mut list = list.with_highlight_symbol("> ");
        list.set_current_item(1);
        list.draw(&mut canvas, false);
        assert_eq!(canvas.row_text(0), "  item 0");
        assert_eq!(canvas.row_text(1), "> item 1");
    }

    #[test]
    fn enter_returns_cursor() {
        let (mut canvas, mut list) = list(10, 3);
        let keys = [
            KeyEvent::new(KeyCode::Down),
            KeyEvent::new(KeyCode::Down),
            KeyEvent::new(KeyCode::Enter),
        ];
        assert_eq!(list.replay(&mut canvas, &keys), Some(2));
        assert_eq!(list.exit_type(), ExitType::Normal);
    }

    #[test]
    fn escape_yields_nothing() {
        let (mut canvas, mut list) = list(10, 3);
        assert_eq!(list.replay(&mut canvas, &[KeyEvent::new(KeyCode::Escape)]), None);
        assert_eq!(list.exit_type(), ExitType::EscapeHit);
    }

    #[test]
    fn unknown_key_beeps() {
        let (mut canvas, mut list) = list(10, 3);
        assert_eq!(list.inject(&mut canvas, KeyEvent::char('q')), ExitType::EarlyExit);
        assert_eq!(canvas.beeps(), 1);
    }

    #[test]
    fn enter_on_empty_list_is_rejected() {
        let (mut canvas, mut list) = list(0, 3);
        assert_eq!(list.inject(&mut canvas, KeyEvent::new(KeyCode::Enter)), ExitType::EarlyExit);
        assert_eq!(canvas.beeps(), 1);
        assert_eq!(list.current_item(), None);
    }

    #[test]
    fn delete_clamps_cursor() {
        let (_, mut list) = list(3, 3);
        list.set_current_item(2);
        assert_eq!(list.delete_item(2).as_deref(), Some("item 2"));
        assert_eq!(list.current_item(), Some(1));
        assert_eq!(list.delete_item(7), None);
    }

    #[test]
    fn scrollbar_takes_a_column() {
        let (mut canvas, list) = list(10, 3);
        let mut list = list.with_scrollbar(true);
        list.draw(&mut canvas, false);
        assert_eq!(canvas.cell(19, 0).map(|c| c.ch), Some('█'));
        assert_eq!(canvas.cell(19, 1).map(|c| c.ch), Some('│'));
    }
}
