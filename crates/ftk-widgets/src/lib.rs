#![forbid(unsafe_code)]

//! Widgets for ftk.
//!
//! Every widget implements [`Widget`], the object-safe surface a screen
//! registry works with, and [`Interact`], the typed surface that carries
//! key bindings, hooks, and the widget's command table.
//!
//! # Drawing
//!
//! Widgets draw straight onto a [`Renderer`]. Drawing is idempotent: the
//! same state always produces the same cells, so a registry may redraw any
//! widget at any time.

pub mod activation;
pub mod base;
pub mod binding;
pub mod button;
pub mod clipboard;
pub mod entry;
pub mod error;
pub mod label;
mod list;
pub mod radio;
pub mod scroll;
pub mod selection;
pub mod viewport;

use std::any::Any;

use ftk_core::event::KeyEvent;
use ftk_core::geometry::Rect;
use ftk_core::render::{Orientation, Renderer, TextAttr};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

pub use activation::{Actions, Controls, Dispatch, Interact, activate, inject};
pub use base::{ExitType, WidgetBase, WidgetId};
pub use binding::{Binding, KeyBindingTable, KeyChord, translate_default};
pub use button::Button;
pub use clipboard::Clipboard;
pub use entry::Entry;
pub use error::{BindError, WidgetError};
pub use label::Label;
pub use radio::RadioList;
pub use scroll::ScrollList;
pub use selection::SelectionList;
pub use viewport::ViewportState;

/// The object-safe widget interface.
///
/// Screens hold widgets as `Box<dyn Widget>`. Typed access goes through
/// [`as_any`](Widget::as_any) / [`as_any_mut`](Widget::as_any_mut).
pub trait Widget: Any {
    fn base(&self) -> &WidgetBase;

    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Short type name used in logs.
    fn kind(&self) -> &'static str;

    /// Render with an explicit focus state, ignoring `has_focus`.
    fn draw_focused(&mut self, out: &mut dyn Renderer, boxed: bool, focused: bool);

    /// Render using the widget's own focus flag.
    fn draw(&mut self, out: &mut dyn Renderer, boxed: bool) {
        let focused = self.base().has_focus();
        self.draw_focused(out, boxed, focused);
    }

    /// Blank the cells the widget occupies.
    fn erase(&mut self, out: &mut dyn Renderer) {
        out.clear_area(self.base().footprint());
    }

    /// Show the focused look. Called after `has_focus` is set.
    fn focus(&mut self, out: &mut dyn Renderer) {
        let boxed = self.base().boxed();
        self.draw_focused(out, boxed, true);
    }

    /// Show the unfocused look. Called before `has_focus` is cleared.
    fn unfocus(&mut self, out: &mut dyn Renderer) {
        let boxed = self.base().boxed();
        self.draw_focused(out, boxed, false);
    }

    /// Move the widget, absolutely or by an offset, keeping it on the surface.
    fn move_to(&mut self, out: &mut dyn Renderer, x: i32, y: i32, relative: bool, refresh: bool) {
        let area = self.base().area();
        let surface = out.surface();
        let target = if relative {
            area.offset(x, y)
        } else {
            let clamp = |v: i32| v.clamp(0, i32::from(u16::MAX)) as u16;
            area.at(clamp(x), clamp(y))
        };
        let x = target.x.min(surface.right().saturating_sub(area.width));
        let y = target.y.min(surface.bottom().saturating_sub(area.height));
        if self.base().is_visible() {
            self.erase(out);
        }
        self.base_mut().set_area(area.at(x, y));
        if refresh && self.base().is_visible() {
            let boxed = self.base().boxed();
            self.draw(out, boxed);
        }
    }

    /// Interpret one key through the activation protocol.
    fn inject(&mut self, out: &mut dyn Renderer, key: KeyEvent) -> ExitType;

    fn id(&self) -> WidgetId {
        self.base().id()
    }

    fn exit_type(&self) -> ExitType {
        self.base().exit_type()
    }

    fn accepts_focus(&self) -> bool {
        self.base().accepts_focus()
    }

    /// Commit edited state. Called when a screen is accepted.
    fn save_data(&mut self) {}

    /// Reload committed state, discarding edits.
    fn refresh_data(&mut self) {}

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Area left for content once the border and a title row are accounted for.
pub fn content_area(area: Rect, boxed: bool, titled: bool) -> Rect {
    let mut inner = if boxed { area.inset(1) } else { area };
    if titled && inner.height > 0 {
        inner = Rect::new(inner.x, inner.y + 1, inner.width, inner.height - 1);
    }
    inner
}

/// Clear the widget, then draw its shadow, border, and title.
///
/// `boxed` only controls whether the border is drawn; the returned content
/// area always follows the widget's configured layout.
pub(crate) fn draw_chrome(
    out: &mut dyn Renderer,
    base: &WidgetBase,
    boxed: bool,
    title: Option<&str>,
) -> Rect {
    let area = base.area();
    out.clear_area(area);
    if base.shadow() {
        out.draw_shadow(area);
    }
    if boxed {
        out.draw_box(area, base.border());
    }
    let titled = title.is_some();
    if let Some(title) = title {
        let inner = if base.boxed() { area.inset(1) } else { area };
        if inner.height > 0 && inner.width > 0 {
            let text = slice_columns(title, 0, inner.width as usize);
            let pad = (inner.width as usize).saturating_sub(text.width()) / 2;
            out.write_text(
                inner.x + pad as u16,
                inner.y,
                &text,
                TextAttr::BOLD,
                Orientation::Horizontal,
            );
        }
    }
    content_area(area, base.boxed(), titled)
}

/// The part of `text` between display columns `skip` and `skip + width`.
///
/// Wide graphemes straddling either edge are dropped.
pub(crate) fn slice_columns(text: &str, skip: usize, width: usize) -> String {
    let mut col = 0;
    let mut out = String::new();
    for grapheme in text.graphemes(true) {
        let w = grapheme.width();
        if col >= skip && col + w <= skip + width {
            out.push_str(grapheme);
        }
        col += w;
        if col >= skip + width {
            break;
        }
    }
    out
}

/// Display width of `text`.
pub(crate) fn display_width(text: &str) -> usize {
    text.width()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_columns_skips_and_clips() {
        assert_eq!(slice_columns("abcdef", 2, 3), "cde");
        assert_eq!(slice_columns("abc", 5, 3), "");
        assert_eq!(slice_columns("ab", 0, 10), "ab");
    }

    #[test]
    fn slice_columns_drops_split_wide_glyph() {
        assert_eq!(slice_columns("日本", 1, 4), "本");
        assert_eq!(slice_columns("日本", 0, 3), "日");
    }

    #[test]
    fn content_area_subtracts_border_and_title() {
        let area = Rect::new(0, 0, 10, 6);
        assert_eq!(content_area(area, false, false), area);
        assert_eq!(content_area(area, true, false), Rect::new(1, 1, 8, 4));
        assert_eq!(content_area(area, true, true), Rect::new(1, 2, 8, 3));
    }
}
