#![forbid(unsafe_code)]

//! Push button. Enter or Space presses it.

use std::any::Any;

use ftk_core::event::{KeyCode, KeyEvent};
use ftk_core::geometry::Rect;
use ftk_core::render::{BorderStyle, Orientation, Renderer, TextAttr};

use crate::activation::{Controls, Dispatch, Interact};
use crate::base::{ExitType, WidgetBase};
use crate::error::WidgetError;
use crate::{Widget, display_width, draw_chrome, slice_columns};

/// A labelled button.
#[derive(Debug)]
pub struct Button {
    base: WidgetBase,
    controls: Controls<Self>,
    label: String,
}

impl Button {
    /// Create a button. Fails on an empty label.
    pub fn new(surface: Rect, area: Rect, label: impl Into<String>) -> Result<Self, WidgetError> {
        let label = label.into();
        if label.is_empty() {
            return Err(WidgetError::Empty);
        }
        Ok(Self {
            base: WidgetBase::new(surface, area)?,
            controls: Controls::new(),
            label,
        })
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

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "Button"
    }

    fn draw_focused(&mut self, out: &mut dyn Renderer, boxed: bool, focused: bool) {
        if !self.base.is_visible() {
            return;
        }
        let content = draw_chrome(out, &self.base, boxed, None);
        if content.is_empty() {
            return;
        }
        let text = slice_columns(&self.label, 0, content.width as usize);
        let pad = (content.width as usize).saturating_sub(display_width(&text)) / 2;
        let attr = if focused {
            TextAttr::REVERSE
        } else {
            TextAttr::empty()
        };
        let y = content.y + content.height / 2;
        out.write_text(content.x + pad as u16, y, &text, attr, Orientation::Horizontal);
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

impl Interact for Button {
    type Output = ();

    fn controls(&self) -> &Controls<Self> {
        &self.controls
    }

    fn controls_mut(&mut self) -> &mut Controls<Self> {
        &mut self.controls
    }

    fn dispatch(&mut self, _out: &mut dyn Renderer, key: KeyEvent) -> Dispatch {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Dispatch::Exit(ExitType::Normal),
            KeyCode::Escape => Dispatch::Exit(ExitType::EscapeHit),
            _ => Dispatch::Rejected,
        }
    }

    fn result(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftk_core::canvas::Canvas;

    #[test]
    fn label_is_centered() {
        let mut canvas = Canvas::new(10, 3);
        let mut button = Button::new(canvas.surface(), Rect::new(0, 0, 10, 3), "OK")
            .unwrap()
            .with_box(true);
        button.draw(&mut canvas, true);
        assert_eq!(canvas.row_text(1), "│   OK   │");
    }

    #[test]
    fn space_presses() {
        let mut canvas = Canvas::new(6, 1);
        let mut button = Button::new(canvas.surface(), Rect::new(0, 0, 6, 1), "Go").unwrap();
        assert_eq!(button.replay(&mut canvas, &[KeyEvent::char('x'), KeyEvent::char(' ')]), Some(()));
        assert_eq!(canvas.beeps(), 1);
    }

    #[test]
    fn empty_label_rejected() {
        let surface = Rect::from_size(5, 1);
        assert_eq!(Button::new(surface, surface, "").unwrap_err(), WidgetError::Empty);
    }
}
