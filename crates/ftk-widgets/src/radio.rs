#![forbid(unsafe_code)]

//! Radio list: exactly one item can be chosen.
//!
//! Space marks the item under the cursor. Enter accepts and yields the
//! marked index.

use std::any::Any;

use ftk_core::event::{KeyCode, KeyEvent};
use ftk_core::geometry::Rect;
use ftk_core::render::{BorderStyle, Renderer};

use crate::Widget;
use crate::activation::{Controls, Dispatch, Interact};
use crate::base::{ExitType, WidgetBase};
use crate::error::WidgetError;
use crate::list::ListCore;
use crate::viewport::ViewportState;

const MARKED: &str = "(*) ";
const UNMARKED: &str = "( ) ";

/// A list with a single marked item.
#[derive(Debug)]
pub struct RadioList {
    base: WidgetBase,
    controls: Controls<Self>,
    list: ListCore,
    selected: usize,
    committed: usize,
}

impl RadioList {
    /// Create a radio list. Fails on an empty item list.
    pub fn new(
        surface: Rect,
        area: Rect,
        items: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, WidgetError> {
        let base = WidgetBase::new(surface, area)?;
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return Err(WidgetError::Empty);
        }
        let mut radio = Self {
            base,
            controls: Controls::new(),
            list: ListCore::new(items, MARKED.len()),
            selected: 0,
            committed: 0,
        };
        radio.list.relayout(&radio.base);
        Ok(radio)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.list.title = Some(title.into());
        self.list.relayout(&self.base);
        self
    }

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
    pub fn with_scrollbar(mut self, scrollbar: bool) -> Self {
        self.list.scrollbar = scrollbar;
        self.list.relayout(&self.base);
        self
    }

    /// Initially marked item (clamped). Also becomes the committed value.
    #[must_use]
    pub fn with_selected(mut self, index: usize) -> Self {
        self.set_selected(index);
        self.committed = self.selected;
        self
    }

    pub fn items(&self) -> &[String] {
        &self.list.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn set_selected(&mut self, index: usize) {
        self.selected = index.min(self.list.items.len() - 1);
    }

    pub fn current_item(&self) -> usize {
        self.list.viewport.current_item()
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.list.viewport
    }
}

impl Widget for RadioList {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "RadioList"
    }

    fn draw_focused(&mut self, out: &mut dyn Renderer, boxed: bool, focused: bool) {
        if !self.base.is_visible() {
            return;
        }
        let selected = self.selected;
        self.list.draw(out, &self.base, boxed, focused, |index, item| {
            let mark = if index == selected { MARKED } else { UNMARKED };
            format!("{mark}{item}")
        });
    }

    fn inject(&mut self, out: &mut dyn Renderer, key: KeyEvent) -> ExitType {
        crate::activation::inject(self, out, key)
    }

    fn save_data(&mut self) {
        self.committed = self.selected;
    }

    fn refresh_data(&mut self) {
        self.selected = self.committed;
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Interact for RadioList {
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
            KeyCode::Char(' ') => {
                self.selected = self.list.viewport.current_item();
                Dispatch::Handled
            }
            KeyCode::Enter | KeyCode::Tab => Dispatch::Exit(ExitType::Normal),
            KeyCode::Escape => Dispatch::Exit(ExitType::EscapeHit),
            _ => Dispatch::Rejected,
        }
    }

    fn result(&self) -> usize {
        self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftk_core::canvas::Canvas;

    fn radio() -> (Canvas, RadioList) {
        let canvas = Canvas::new(16, 3);
        let radio =
            RadioList::new(canvas.surface(), Rect::new(0, 0, 16, 3), ["red", "green", "blue"])
                .unwrap();
        (canvas, radio)
    }

    #[test]
    fn empty_items_rejected() {
        let surface = Rect::from_size(10, 3);
        let err = RadioList::new(surface, surface, Vec::<String>::new()).unwrap_err();
        assert_eq!(err, WidgetError::Empty);
    }

    #[test]
    fn space_marks_cursor_item() {
        let (mut canvas, mut radio) = radio();
        let keys = [
            KeyEvent::new(KeyCode::Down),
            KeyEvent::new(KeyCode::Down),
            KeyEvent::char(' '),
            KeyEvent::new(KeyCode::Up),
            KeyEvent::new(KeyCode::Enter),
        ];
        assert_eq!(radio.replay(&mut canvas, &keys), Some(2));
        assert_eq!(canvas.row_text(2), "(*) blue");
        assert_eq!(canvas.row_text(0), "( ) red");
    }

    #[test]
    fn refresh_data_restores_committed() {
        let (mut canvas, mut radio) = radio();
        radio.replay(&mut canvas, &[KeyEvent::new(KeyCode::Down), KeyEvent::char(' ')]);
        assert_eq!(radio.selected(), 1);
        radio.refresh_data();
        assert_eq!(radio.selected(), 0);
        radio.set_selected(9);
        assert_eq!(radio.selected(), 2);
        radio.save_data();
        radio.set_selected(0);
        radio.refresh_data();
        assert_eq!(radio.selected(), 2);
    }
}
