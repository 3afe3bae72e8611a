#![forbid(unsafe_code)]

//! Static text. Labels never take focus; activating one waits for any key,
//! and Escape dismisses it as a cancellation.

use std::any::Any;

use ftk_core::event::{KeyCode, KeyEvent};
use ftk_core::geometry::Rect;
use ftk_core::render::{BorderStyle, Orientation, Renderer, TextAttr};

use crate::activation::{Controls, Dispatch, Interact};
use crate::base::{ExitType, WidgetBase};
use crate::error::WidgetError;
use crate::{Widget, draw_chrome, slice_columns};

/// One or more lines of text.
#[derive(Debug)]
pub struct Label {
    base: WidgetBase,
    controls: Controls<Self>,
    lines: Vec<String>,
    attr: TextAttr,
    last_key: Option<KeyEvent>,
}

impl Label {
    pub fn new(
        surface: Rect,
        area: Rect,
        lines: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, WidgetError> {
        let mut base = WidgetBase::new(surface, area)?;
        base.set_accepts_focus(false);
        Ok(Self {
            base,
            controls: Controls::new(),
            lines: lines.into_iter().map(Into::into).collect(),
            attr: TextAttr::empty(),
            last_key: None,
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

    #[must_use]
    pub fn with_shadow(mut self, shadow: bool) -> Self {
        self.base.set_shadow(shadow);
        self
    }

    #[must_use]
    pub fn with_attr(mut self, attr: TextAttr) -> Self {
        self.attr = attr;
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn set_lines(&mut self, lines: impl IntoIterator<Item = impl Into<String>>) {
        self.lines = lines.into_iter().map(Into::into).collect();
    }
}

impl Widget for Label {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "Label"
    }

    fn draw_focused(&mut self, out: &mut dyn Renderer, boxed: bool, _focused: bool) {
        if !self.base.is_visible() {
            return;
        }
        let content = draw_chrome(out, &self.base, boxed, None);
        for (row, line) in self.lines.iter().take(content.height as usize).enumerate() {
            let text = slice_columns(line, 0, content.width as usize);
            out.write_text(
                content.x,
                content.y + row as u16,
                &text,
                self.attr,
                Orientation::Horizontal,
            );
        }
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

impl Interact for Label {
    /// The key that dismissed the label.
    type Output = KeyEvent;

    fn controls(&self) -> &Controls<Self> {
        &self.controls
    }

    fn controls_mut(&mut self) -> &mut Controls<Self> {
        &mut self.controls
    }

    fn dispatch(&mut self, _out: &mut dyn Renderer, key: KeyEvent) -> Dispatch {
        self.last_key = Some(key);
        match key.code {
            KeyCode::Escape => Dispatch::Exit(ExitType::EscapeHit),
            _ => Dispatch::Exit(ExitType::Normal),
        }
    }

    fn result(&self) -> KeyEvent {
        self.last_key.unwrap_or(KeyEvent::new(KeyCode::Null))
    }
}
