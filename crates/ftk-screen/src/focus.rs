#![forbid(unsafe_code)]

//! Focus traversal over a [`ScreenRegistry`].
//!
//! Scans wrap around the registration order and skip widgets that do not
//! accept focus. A focus change always unfocuses the old widget before the
//! new one is focused, so at most one widget draws as focused.

use ftk_core::render::Renderer;
use ftk_widgets::WidgetId;
use tracing::debug;

use crate::registry::ScreenRegistry;

impl ScreenRegistry {
    /// Id of the focused widget.
    pub fn focused(&self) -> Option<WidgetId> {
        self.focus.map(|i| self.widgets[i].id())
    }

    /// Index of the focused widget.
    pub fn focus_index(&self) -> Option<usize> {
        self.focus
    }

    /// Move focus to the next focusable widget, wrapping at the end.
    pub fn focus_next(&mut self, out: &mut dyn Renderer) -> Option<WidgetId> {
        let next = self.scan_forward(self.focus);
        self.move_focus(out, next, "next")
    }

    /// Move focus to the previous focusable widget, wrapping at the start.
    pub fn focus_previous(&mut self, out: &mut dyn Renderer) -> Option<WidgetId> {
        let next = self.scan_backward(self.focus);
        self.move_focus(out, next, "previous")
    }

    /// Focus the first focusable widget in registration order.
    pub fn focus_first(&mut self, out: &mut dyn Renderer) -> Option<WidgetId> {
        let next = self.scan_forward(None);
        self.move_focus(out, next, "first")
    }

    /// Focus the last focusable widget in registration order.
    pub fn focus_last(&mut self, out: &mut dyn Renderer) -> Option<WidgetId> {
        let next = self.scan_backward(None);
        self.move_focus(out, next, "last")
    }

    /// Focus a specific widget. Fails, leaving focus alone, when the widget
    /// is unknown or does not accept focus.
    pub fn set_focus(&mut self, out: &mut dyn Renderer, id: WidgetId) -> bool {
        match self.position(id) {
            Some(index) if self.widgets[index].accepts_focus() => {
                self.move_focus(out, Some(index), "direct");
                true
            }
            _ => false,
        }
    }

    /// Hand focus from `old` to `new`.
    ///
    /// `old` is unfocused first, then `new` is focused and becomes the
    /// registry's focused widget. The widget actually holding focus is
    /// unfocused too when `old` names a different one. Equal ids do nothing.
    /// A `new` that is unknown or refuses focus leaves the registry without
    /// focus.
    pub fn switch_focus(
        &mut self,
        out: &mut dyn Renderer,
        new: Option<WidgetId>,
        old: Option<WidgetId>,
    ) {
        if new == old {
            return;
        }
        let old = old.and_then(|id| self.position(id));
        let new = new
            .and_then(|id| self.position(id))
            .filter(|&i| self.widgets[i].accepts_focus());
        let current = self.focus;
        if current != old && current != new {
            self.switch_indices(out, None, current);
        }
        self.focus = new;
        self.switch_indices(out, new, old);
    }

    fn move_focus(
        &mut self,
        out: &mut dyn Renderer,
        next: Option<usize>,
        direction: &'static str,
    ) -> Option<WidgetId> {
        let old = self.focus;
        self.focus = next;
        self.switch_indices(out, next, old);
        let focused = self.focused();
        debug!(
            direction,
            from = ?old.map(|i| self.widgets[i].id()),
            to = ?focused,
            "focus moved"
        );
        focused
    }

    pub(crate) fn switch_indices(
        &mut self,
        out: &mut dyn Renderer,
        new: Option<usize>,
        old: Option<usize>,
    ) {
        if new == old {
            return;
        }
        if let Some(old) = old
            && let Some(widget) = self.widgets.get_mut(old)
        {
            widget.unfocus(out);
            widget.base_mut().set_has_focus(false);
        }
        if let Some(new) = new
            && let Some(widget) = self.widgets.get_mut(new)
        {
            widget.base_mut().set_has_focus(true);
            widget.focus(out);
        }
    }

    /// First focusable index after `start`, wrapping; from index 0 when
    /// `start` is `None`. `start` itself is considered last.
    pub(crate) fn scan_forward(&self, start: Option<usize>) -> Option<usize> {
        let n = self.widgets.len();
        (0..n)
            .map(|step| match start {
                None => step,
                Some(s) => (s + 1 + step) % n,
            })
            .find(|&i| self.widgets[i].accepts_focus())
    }

    /// First focusable index before `start`, wrapping; from the last index
    /// when `start` is `None`.
    pub(crate) fn scan_backward(&self, start: Option<usize>) -> Option<usize> {
        let n = self.widgets.len();
        (0..n)
            .map(|step| match start {
                None => n - 1 - step,
                Some(s) => (s + 2 * n - 1 - step) % n,
            })
            .find(|&i| self.widgets[i].accepts_focus())
    }
}

#[cfg(test)]
mod tests {
    use ftk_core::canvas::Canvas;
    use ftk_core::geometry::Rect;
    use ftk_core::render::Renderer;
    use ftk_widgets::{Button, Label, Widget, WidgetId};

    use crate::ScreenRegistry;

    /// `[label, A, label, B, C]`
    fn screen(canvas: &Canvas) -> (ScreenRegistry, [WidgetId; 3]) {
        let surface = canvas.surface();
        let row = |y| Rect::new(0, y, 8, 1);
        let mut screen = ScreenRegistry::new();
        let mut ids = Vec::new();
        screen.register(Label::new(surface, row(0), ["-"]).unwrap());
        for (y, name) in [(1, "A"), (3, "B"), (4, "C")] {
            if y == 3 {
                screen.register(Label::new(surface, row(2), ["-"]).unwrap());
            }
            let b = Button::new(surface, row(y), name).unwrap();
            ids.push(b.id());
            screen.register(b);
        }
        (screen, [ids[0], ids[1], ids[2]])
    }

    fn focused_count(screen: &ScreenRegistry) -> usize {
        screen.iter().filter(|w| w.base().has_focus()).count()
    }

    #[test]
    fn next_wraps_and_skips_unfocusable() {
        let mut c = Canvas::new(10, 6);
        let (mut screen, [a, b, cc]) = screen(&c);
        assert_eq!(screen.focused(), Some(a));
        assert_eq!(screen.focus_next(&mut c), Some(b));
        assert_eq!(screen.focus_next(&mut c), Some(cc));
        assert_eq!(screen.focus_next(&mut c), Some(a));
        assert_eq!(focused_count(&screen), 1);
    }

    #[test]
    fn previous_wraps() {
        let mut c = Canvas::new(10, 6);
        let (mut screen, [a, b, cc]) = screen(&c);
        assert_eq!(screen.focus_previous(&mut c), Some(cc));
        assert_eq!(screen.focus_previous(&mut c), Some(b));
        assert_eq!(screen.focus_previous(&mut c), Some(a));
        assert_eq!(focused_count(&screen), 1);
    }

    #[test]
    fn first_and_last() {
        let mut c = Canvas::new(10, 6);
        let (mut screen, [a, _, cc]) = screen(&c);
        assert_eq!(screen.focus_last(&mut c), Some(cc));
        assert_eq!(screen.focus_first(&mut c), Some(a));
        assert_eq!(screen.focus_index(), Some(1));
    }

    #[test]
    fn set_focus_rejects_unfocusable() {
        let mut c = Canvas::new(10, 6);
        let (mut screen, [a, b, _]) = screen(&c);
        let label = screen.ids()[0];
        assert!(!screen.set_focus(&mut c, label));
        assert_eq!(screen.focused(), Some(a));
        assert!(screen.set_focus(&mut c, b));
        assert_eq!(screen.focused(), Some(b));
        assert!(!screen.widget(a).unwrap().base().has_focus());
    }

    #[test]
    fn switch_focus_same_is_noop() {
        let mut c = Canvas::new(10, 6);
        let (mut screen, [a, b, _]) = screen(&c);
        let calls = c.draw_calls();
        screen.switch_focus(&mut c, Some(a), Some(a));
        assert_eq!(c.draw_calls(), calls);
        screen.switch_focus(&mut c, Some(b), Some(a));
        assert_eq!(screen.focused(), Some(b));
        assert_eq!(focused_count(&screen), 1);
    }

    #[test]
    fn switch_focus_unfocuses_the_real_holder() {
        let mut c = Canvas::new(10, 6);
        let (mut screen, [a, b, cc]) = screen(&c);
        assert!(screen.set_focus(&mut c, cc));

        screen.switch_focus(&mut c, Some(b), Some(a));
        assert_eq!(screen.focused(), Some(b));
        assert_eq!(focused_count(&screen), 1);

        screen.switch_focus(&mut c, None, Some(a));
        assert_eq!(screen.focused(), None);
        assert_eq!(focused_count(&screen), 0);
    }

    #[test]
    fn no_focusable_widgets() {
        let mut c = Canvas::new(10, 6);
        let mut screen = ScreenRegistry::new();
        screen.register(Label::new(c.surface(), Rect::new(0, 0, 4, 1), ["x"]).unwrap());
        assert_eq!(screen.focus_next(&mut c), None);
        assert_eq!(screen.focus_previous(&mut c), None);
        assert_eq!(screen.focus_first(&mut c), None);

        let mut empty = ScreenRegistry::new();
        assert_eq!(empty.focus_next(&mut c), None);
    }

    #[test]
    fn single_focusable_stays_put() {
        let mut c = Canvas::new(10, 6);
        let mut screen = ScreenRegistry::new();
        let b = Button::new(c.surface(), Rect::new(0, 0, 4, 1), "B").unwrap();
        let id = b.id();
        screen.register(b);
        assert_eq!(screen.focus_next(&mut c), Some(id));
        assert_eq!(screen.focus_previous(&mut c), Some(id));
        assert!(screen.widget(id).unwrap().base().has_focus());
    }
}
