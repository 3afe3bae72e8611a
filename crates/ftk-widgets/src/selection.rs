#![forbid(unsafe_code)]

//! Selection list: every item carries one of several choices.
//!
//! Space cycles the choice of the item under the cursor. The result is the
//! choice index of every item.

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

/// A list where each item has a cycling choice.
#[derive(Debug)]
pub struct SelectionList {
    base: WidgetBase,
    controls: Controls<Self>,
    list: ListCore,
    choices: Vec<String>,
    choice_width: usize,
    selections: Vec<usize>,
    committed: Vec<usize>,
}

impl SelectionList {
    /// Create a selection list. Fails when `items` or `choices` is empty.
    pub fn new(
        surface: Rect,
        area: Rect,
        items: impl IntoIterator<Item = impl Into<String>>,
        choices: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self, WidgetError> {
        let base = WidgetBase::new(surface, area)?;
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        if items.is_empty() || choices.is_empty() {
            return Err(WidgetError::Empty);
        }
        let choice_width = choices.iter().map(|c| display_width(c)).max().unwrap_or(0);
        let selections = vec![0; items.len()];
        let mut selection = Self {
            base,
            controls: Controls::new(),
            list: ListCore::new(items, choice_width + 1),
            choices,
            choice_width,
            committed: selections.clone(),
            selections,
        };
        selection.list.relayout(&selection.base);
        Ok(selection)
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

    pub fn items(&self) -> &[String] {
        &self.list.items
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn selections(&self) -> &[usize] {
        &self.selections
    }

    /// Set the choice of `item`. Out-of-range arguments are ignored.
    pub fn set_selection(&mut self, item: usize, choice: usize) {
        if choice < self.choices.len()
            && let Some(slot) = self.selections.get_mut(item)
        {
            *slot = choice;
        }
    }

    pub fn current_item(&self) -> usize {
        self.list.viewport.current_item()
    }

    pub fn viewport(&self) -> &ViewportState {
        &self.list.viewport
    }
}

impl Widget for SelectionList {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "SelectionList"
    }

    fn draw_focused(&mut self, out: &mut dyn Renderer, boxed: bool, focused: bool) {
        if !self.base.is_visible() {
            return;
        }
        let (choices, selections, width) = (&self.choices, &self.selections, self.choice_width);
        self.list.draw(out, &self.base, boxed, focused, |index, item| {
            let choice = &choices[selections[index]];
            let pad = width.saturating_sub(display_width(choice));
            format!("{choice}{} {item}", " ".repeat(pad))
        });
    }

    fn inject(&mut self, out: &mut dyn Renderer, key: KeyEvent) -> ExitType {
        crate::activation::inject(self, out, key)
    }

    fn save_data(&mut self) {
        self.committed.clone_from(&self.selections);
    }

    fn refresh_data(&mut self) {
        self.selections.clone_from(&self.committed);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Interact for SelectionList {
    type Output = Vec<usize>;

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
                let item = self.list.viewport.current_item();
                let slot = &mut self.selections[item];
                *slot = (*slot + 1) % self.choices.len();
                Dispatch::Handled
            }
            KeyCode::Enter | KeyCode::Tab => Dispatch::Exit(ExitType::Normal),
            KeyCode::Escape => Dispatch::Exit(ExitType::EscapeHit),
            _ => Dispatch::Rejected,
        }
    }

    fn result(&self) -> Vec<usize> {
        self.selections.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftk_core::canvas::Canvas;

    fn selection() -> (Canvas, SelectionList) {
        let canvas = Canvas::new(20, 4);
        let selection = SelectionList::new(
            canvas.surface(),
            Rect::new(0, 0, 20, 4),
            ["eggs", "ham", "toast"],
            ["[ ]", "[x]", "[?]"],
        )
        .unwrap();
        (canvas, selection)
    }

    #[test]
    fn space_cycles_choices() {
        let (mut canvas, mut sel) = selection();
        let keys = [
            KeyEvent::char(' '),
            KeyEvent::new(KeyCode::Down),
            KeyEvent::char(' '),
            KeyEvent::char(' '),
            KeyEvent::char(' '),
            KeyEvent::char(' '),
            KeyEvent::new(KeyCode::Enter),
        ];
        assert_eq!(sel.replay(&mut canvas, &keys), Some(vec![1, 1, 0]));
        assert_eq!(canvas.row_text(0), "[x] eggs");
    }

    #[test]
    fn empty_choices_rejected() {
        let surface = Rect::from_size(10, 3);
        let err = SelectionList::new(surface, surface, ["a"], Vec::<String>::new()).unwrap_err();
        assert_eq!(err, WidgetError::Empty);
    }

    #[test]
    fn set_selection_ignores_out_of_range() {
        let (_, mut sel) = selection();
        sel.set_selection(1, 2);
        sel.set_selection(7, 1);
        sel.set_selection(0, 9);
        assert_eq!(sel.selections(), &[0, 2, 0]);
    }

    #[test]
    fn refresh_data_discards_edits() {
        let (mut canvas, mut sel) = selection();
        sel.replay(&mut canvas, &[KeyEvent::char(' ')]);
        assert_eq!(sel.selections(), &[1, 0, 0]);
        sel.refresh_data();
        assert_eq!(sel.selections(), &[0, 0, 0]);
    }
}
