#![forbid(unsafe_code)]

//! The widget registry of one screen.
//!
//! # Invariants
//!
//! 1. Registration order is z-order: later widgets draw on top.
//! 2. `focus` is `None` or the index of a widget whose `has_focus` is set.
//! 3. At most one registered widget has `has_focus` set.
//! 4. Index shifts from removal or restacking keep `focus` on the same
//!    logical widget.

use ftk_core::render::Renderer;
use ftk_widgets::{Widget, WidgetId};
use tracing::debug;

use crate::requests::{ScreenExit, ScreenRequest, ScreenRequests};

/// Ordered widgets plus the focus index.
#[derive(Default)]
pub struct ScreenRegistry {
    pub(crate) widgets: Vec<Box<dyn Widget>>,
    pub(crate) focus: Option<usize>,
    requests: ScreenRequests,
}

impl std::fmt::Debug for ScreenRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenRegistry")
            .field(
                "widgets",
                &self
                    .widgets
                    .iter()
                    .map(|w| (w.id(), w.kind()))
                    .collect::<Vec<_>>(),
            )
            .field("focus", &self.focus)
            .field("pending_requests", &self.requests.len())
            .finish()
    }
}

impl ScreenRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle for queueing deferred mutations.
    pub fn requests(&self) -> ScreenRequests {
        self.requests.clone()
    }

    /// Append a widget on top of the z-order. Returns its index.
    ///
    /// The first focusable widget registered into a screen without focus
    /// becomes the focused widget; it is drawn as such on the next refresh.
    pub fn register<W: Widget>(&mut self, widget: W) -> usize {
        self.register_boxed(Box::new(widget))
    }

    /// [`register`](Self::register) for an already boxed widget.
    pub fn register_boxed(&mut self, mut widget: Box<dyn Widget>) -> usize {
        let index = self.widgets.len();
        let takes_focus = self.focus.is_none() && widget.accepts_focus();
        widget.base_mut().set_has_focus(takes_focus);
        if takes_focus {
            self.focus = Some(index);
        }
        debug!(
            widget = %widget.id(),
            kind = widget.kind(),
            index,
            focused = takes_focus,
            "widget registered"
        );
        self.widgets.push(widget);
        index
    }

    /// Remove a widget, handing ownership back. Dropping the returned box
    /// destroys the widget.
    ///
    /// Removing the focused widget moves focus to the next focusable widget.
    /// Unknown ids are ignored.
    pub fn unregister(&mut self, out: &mut dyn Renderer, id: WidgetId) -> Option<Box<dyn Widget>> {
        let index = self.position(id)?;
        let mut widget = self.widgets.remove(index);
        debug!(widget = %id, kind = widget.kind(), index, "widget unregistered");

        match self.focus {
            Some(focus) if focus == index => {
                widget.unfocus(out);
                widget.base_mut().set_has_focus(false);
                let seed = index.checked_sub(1);
                let next = self.scan_forward(seed);
                self.focus = next;
                self.switch_indices(out, next, None);
                debug!(from = %id, to = ?next.map(|i| self.widgets[i].id()), "focus repaired");
            }
            Some(focus) if focus > index => self.focus = Some(focus - 1),
            _ => {}
        }
        Some(widget)
    }

    /// Unregister, erase, and drop a widget. Returns whether it existed.
    pub fn destroy(&mut self, out: &mut dyn Renderer, id: WidgetId) -> bool {
        match self.unregister(out, id) {
            Some(mut widget) => {
                widget.erase(out);
                true
            }
            None => false,
        }
    }

    /// One compositing pass: erase hidden widgets, then draw visible ones in
    /// z-order. Only the focused widget is drawn focused.
    pub fn refresh(&mut self, out: &mut dyn Renderer) {
        for widget in self.widgets.iter_mut().filter(|w| !w.base().is_visible()) {
            widget.erase(out);
        }
        let focus = self.focus;
        for (index, widget) in self.widgets.iter_mut().enumerate() {
            widget.base_mut().set_has_focus(focus == Some(index));
            if widget.base().is_visible() {
                let boxed = widget.base().boxed();
                widget.draw(out, boxed);
            }
        }
    }

    /// Erase every widget.
    pub fn erase_all(&mut self, out: &mut dyn Renderer) {
        for widget in &mut self.widgets {
            widget.erase(out);
        }
    }

    /// Move a widget to the top of the z-order.
    pub fn raise(&mut self, id: WidgetId) -> bool {
        self.restack(id, |widgets, widget| widgets.push(widget))
    }

    /// Move a widget to the bottom of the z-order.
    pub fn lower(&mut self, id: WidgetId) -> bool {
        self.restack(id, |widgets, widget| widgets.insert(0, widget))
    }

    fn restack(
        &mut self,
        id: WidgetId,
        place: impl FnOnce(&mut Vec<Box<dyn Widget>>, Box<dyn Widget>),
    ) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let focused = self.focused();
        let widget = self.widgets.remove(index);
        place(&mut self.widgets, widget);
        self.focus = focused.and_then(|id| self.position(id));
        true
    }

    /// Make a widget visible and draw it.
    pub fn show(&mut self, out: &mut dyn Renderer, id: WidgetId) -> bool {
        let Some(widget) = self.widget_mut(id) else {
            return false;
        };
        widget.base_mut().set_visible(true);
        let boxed = widget.base().boxed();
        widget.draw(out, boxed);
        true
    }

    /// Hide a widget and erase it.
    pub fn hide(&mut self, out: &mut dyn Renderer, id: WidgetId) -> bool {
        let Some(widget) = self.widget_mut(id) else {
            return false;
        };
        widget.base_mut().set_visible(false);
        widget.erase(out);
        true
    }

    /// Apply queued requests in order. Returns the exit request, if any.
    ///
    /// Requests queued while applying are applied too.
    pub fn apply_requests(&mut self, out: &mut dyn Renderer) -> Option<ScreenExit> {
        let mut exit = None;
        while let Some(request) = self.requests.pop() {
            debug!(?request, "applying screen request");
            match request {
                ScreenRequest::Unregister(id) => {
                    self.destroy(out, id);
                }
                ScreenRequest::Show(id) => {
                    self.show(out, id);
                }
                ScreenRequest::Hide(id) => {
                    self.hide(out, id);
                }
                ScreenRequest::Focus(id) => {
                    self.set_focus(out, id);
                }
                ScreenRequest::ExitOk => exit = exit.or(Some(ScreenExit::Accept)),
                ScreenRequest::ExitCancel => exit = exit.or(Some(ScreenExit::Cancel)),
            }
        }
        exit
    }

    /// Call `save_data` on every widget.
    pub fn save_all(&mut self) {
        for widget in &mut self.widgets {
            widget.save_data();
        }
    }

    /// Call `refresh_data` on every widget.
    pub fn reload_all(&mut self) {
        for widget in &mut self.widgets {
            widget.refresh_data();
        }
    }

    /// Index of a widget.
    pub fn position(&self, id: WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| w.id() == id)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.position(id).is_some()
    }

    /// Ids in z-order.
    pub fn ids(&self) -> Vec<WidgetId> {
        self.widgets.iter().map(|w| w.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Widget> {
        self.widgets.iter().map(|w| w.as_ref())
    }

    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.widgets.iter().find(|w| w.id() == id).map(|w| w.as_ref())
    }

    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut (dyn Widget + 'static)> {
        self.widgets.iter_mut().find(|w| w.id() == id).map(|w| w.as_mut())
    }

    /// Typed access to a registered widget.
    pub fn get<W: Widget>(&self, id: WidgetId) -> Option<&W> {
        self.widget(id)?.as_any().downcast_ref::<W>()
    }

    /// Typed mutable access to a registered widget.
    pub fn get_mut<W: Widget>(&mut self, id: WidgetId) -> Option<&mut W> {
        self.widget_mut(id)?.as_any_mut().downcast_mut::<W>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftk_core::canvas::Canvas;
    use ftk_core::geometry::Rect;
    use ftk_core::render::Renderer;
    use ftk_widgets::{Button, Label};

    fn canvas() -> Canvas {
        Canvas::new(20, 6)
    }

    fn button(canvas: &Canvas, y: u16, label: &str) -> Button {
        Button::new(canvas.surface(), Rect::new(0, y, 10, 1), label).unwrap()
    }

    fn label(canvas: &Canvas, y: u16, text: &str) -> Label {
        Label::new(canvas.surface(), Rect::new(0, y, 10, 1), [text]).unwrap()
    }

    #[test]
    fn register_returns_index_and_focuses_first_focusable() {
        let c = canvas();
        let mut screen = ScreenRegistry::new();
        assert_eq!(screen.register(label(&c, 0, "title")), 0);
        assert_eq!(screen.focus_index(), None);
        let ok = button(&c, 1, "OK");
        let ok_id = ok.id();
        assert_eq!(screen.register(ok), 1);
        assert_eq!(screen.register(button(&c, 2, "Cancel")), 2);
        assert_eq!(screen.focused(), Some(ok_id));
        assert!(screen.widget(ok_id).unwrap().base().has_focus());
    }

    #[test]
    fn unregister_shifts_focus_index() {
        let mut c = canvas();
        let mut screen = ScreenRegistry::new();
        let first = label(&c, 0, "a");
        let first_id = first.id();
        screen.register(first);
        let ok = button(&c, 1, "OK");
        let ok_id = ok.id();
        screen.register(ok);
        assert_eq!(screen.focus_index(), Some(1));

        let removed = screen.unregister(&mut c, first_id).unwrap();
        assert_eq!(removed.id(), first_id);
        assert_eq!(screen.focus_index(), Some(0));
        assert_eq!(screen.focused(), Some(ok_id));
    }

    #[test]
    fn unregister_unknown_is_noop() {
        let mut c = canvas();
        let mut screen = ScreenRegistry::new();
        screen.register(button(&c, 0, "OK"));
        let stray = button(&c, 1, "X");
        assert!(screen.unregister(&mut c, stray.id()).is_none());
        assert_eq!(screen.len(), 1);
    }

    #[test]
    fn unregister_focused_moves_to_next() {
        let mut c = canvas();
        let mut screen = ScreenRegistry::new();
        let a = button(&c, 0, "A");
        let b = button(&c, 1, "B");
        let (a_id, b_id) = (a.id(), b.id());
        screen.register(a);
        screen.register(label(&c, 2, "-"));
        screen.register(b);
        let removed = screen.unregister(&mut c, a_id).unwrap();
        assert!(!removed.base().has_focus());
        assert_eq!(screen.focused(), Some(b_id));
        assert!(screen.widget(b_id).unwrap().base().has_focus());

        screen.unregister(&mut c, b_id);
        assert_eq!(screen.focused(), None);
    }

    #[test]
    fn refresh_is_idempotent() {
        let mut c = canvas();
        let mut screen = ScreenRegistry::new();
        screen.register(label(&c, 0, "Name"));
        screen.register(button(&c, 1, "OK"));
        screen.refresh(&mut c);
        let once = c.contents();
        screen.refresh(&mut c);
        assert_eq!(c.contents(), once);
        assert!(once.contains("Name"));
    }

    #[test]
    fn refresh_erases_hidden_widgets() {
        let mut c = canvas();
        let mut screen = ScreenRegistry::new();
        let l = label(&c, 0, "gone");
        let id = l.id();
        screen.register(l);
        screen.refresh(&mut c);
        assert_eq!(c.row_text(0), "gone");
        screen.widget_mut(id).unwrap().base_mut().set_visible(false);
        screen.refresh(&mut c);
        assert_eq!(c.row_text(0), "");
    }

    #[test]
    fn raise_and_lower_keep_focus_on_same_widget() {
        let c = canvas();
        let mut screen = ScreenRegistry::new();
        let a = button(&c, 0, "A");
        let a_id = a.id();
        screen.register(a);
        let b = button(&c, 1, "B");
        let b_id = b.id();
        screen.register(b);
        assert!(screen.raise(a_id));
        assert_eq!(screen.ids(), vec![b_id, a_id]);
        assert_eq!(screen.focused(), Some(a_id));
        assert!(screen.lower(a_id));
        assert_eq!(screen.ids(), vec![a_id, b_id]);
        assert_eq!(screen.focus_index(), Some(0));
    }

    #[test]
    fn typed_access() {
        let c = canvas();
        let mut screen = ScreenRegistry::new();
        let b = button(&c, 0, "OK");
        let id = b.id();
        screen.register(b);
        assert_eq!(screen.get::<Button>(id).map(Button::label), Some("OK"));
        assert!(screen.get::<Label>(id).is_none());
        screen.get_mut::<Button>(id).unwrap().set_label("Done");
        assert_eq!(screen.get::<Button>(id).unwrap().label(), "Done");
    }

    #[test]
    fn requests_apply_in_order() {
        let mut c = canvas();
        let mut screen = ScreenRegistry::new();
        let a = button(&c, 0, "A");
        let b = button(&c, 1, "B");
        let (a_id, b_id) = (a.id(), b.id());
        screen.register(a);
        screen.register(b);
        let requests = screen.requests();
        requests.focus(b_id);
        requests.hide(a_id);
        requests.exit_cancel();
        requests.exit_ok();
        assert_eq!(screen.apply_requests(&mut c), Some(ScreenExit::Cancel));
        assert_eq!(screen.focused(), Some(b_id));
        assert!(!screen.widget(a_id).unwrap().base().is_visible());
        assert!(requests.is_empty());

        requests.unregister(a_id);
        assert_eq!(screen.apply_requests(&mut c), None);
        assert!(!screen.contains(a_id));
    }
}
