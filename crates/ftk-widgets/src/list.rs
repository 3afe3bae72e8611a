#![forbid(unsafe_code)]

//! Item storage, layout, and drawing shared by the list widgets.

use ftk_core::event::{KeyCode, KeyEvent};
use ftk_core::geometry::Rect;
use ftk_core::render::{Orientation, Renderer, TextAttr};

use crate::activation::Dispatch;
use crate::base::WidgetBase;
use crate::viewport::ViewportState;
use crate::{content_area, display_width, draw_chrome, slice_columns};

const TRACK_CHAR: &str = "│";
const THUMB_CHAR: &str = "█";

#[derive(Debug, Clone)]
pub(crate) struct ListCore {
    pub(crate) items: Vec<String>,
    pub(crate) title: Option<String>,
    pub(crate) scrollbar: bool,
    pub(crate) viewport: ViewportState,
    gutter: usize,
}

impl ListCore {
    pub(crate) fn new(items: Vec<String>, gutter: usize) -> Self {
        Self {
            items,
            title: None,
            scrollbar: false,
            viewport: ViewportState::new(0),
            gutter,
        }
    }

    pub(crate) fn set_gutter(&mut self, gutter: usize) {
        self.gutter = gutter;
    }

    /// Row area and optional scrollbar track.
    pub(crate) fn layout(&self, base: &WidgetBase) -> (Rect, Option<Rect>) {
        let content = content_area(base.area(), base.boxed(), self.title.is_some());
        if self.scrollbar && content.width > 1 {
            let rows = Rect::new(content.x, content.y, content.width - 1, content.height);
            let track = Rect::new(content.right() - 1, content.y, 1, content.height);
            (rows, Some(track))
        } else {
            (content, None)
        }
    }

    /// Recompute viewport geometry after items or layout changed.
    pub(crate) fn relayout(&mut self, base: &WidgetBase) {
        let (rows, _) = self.layout(base);
        self.viewport.set_available_rows(rows.height as usize);
        self.viewport.set_view_size(self.items.len());
        let widest = self
            .items
            .iter()
            .map(|item| display_width(item))
            .max()
            .unwrap_or(0)
            + self.gutter;
        self.viewport
            .set_max_left_char(widest.saturating_sub(rows.width as usize));
    }

    /// Standard list navigation. `None` when `key` is not a navigation key.
    pub(crate) fn navigate(&mut self, key: &KeyEvent) -> Option<Dispatch> {
        if matches!(key.code, KeyCode::Char(_)) && key.printable().is_none() {
            return None;
        }
        self.viewport.navigate(key.code).map(|moved| {
            if moved {
                Dispatch::Handled
            } else {
                Dispatch::Rejected
            }
        })
    }

    pub(crate) fn current(&self) -> Option<usize> {
        (!self.items.is_empty()).then(|| self.viewport.current_item())
    }

    /// Draw chrome, rows, and scrollbar. `line` renders one item with its
    /// gutter.
    pub(crate) fn draw(
        &self,
        out: &mut dyn Renderer,
        base: &WidgetBase,
        boxed: bool,
        focused: bool,
        line: impl Fn(usize, &str) -> String,
    ) {
        draw_chrome(out, base, boxed, self.title.as_deref());
        let (rows, track) = self.layout(base);
        let width = rows.width as usize;

        for (row, index) in self.viewport.visible_range().enumerate() {
            if row >= rows.height as usize {
                break;
            }
            let full = line(index, &self.items[index]);
            let mut text = slice_columns(&full, self.viewport.left_char(), width);
            let attr = if index == self.viewport.current_item() {
                let pad = width.saturating_sub(display_width(&text));
                text.extend(std::iter::repeat_n(' ', pad));
                if focused {
                    TextAttr::REVERSE
                } else {
                    TextAttr::UNDERLINE
                }
            } else {
                TextAttr::empty()
            };
            out.write_text(rows.x, rows.y + row as u16, &text, attr, Orientation::Horizontal);
        }

        if let Some(track) = track {
            let len = track.height as usize;
            out.write_text(
                track.x,
                track.y,
                &TRACK_CHAR.repeat(len),
                TextAttr::DIM,
                Orientation::Vertical,
            );
            if !self.viewport.is_empty() && len > 0 {
                let pos = self.viewport.thumb_position(len);
                let size = self.viewport.toggle_size().min(len);
                out.write_text(
                    track.x,
                    track.y + pos as u16,
                    &THUMB_CHAR.repeat(size),
                    TextAttr::empty(),
                    Orientation::Vertical,
                );
            }
        }
    }
}
