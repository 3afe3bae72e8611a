#![forbid(unsafe_code)]

//! Ordering of `unfocus`/`focus` calls during focus changes.
//!
//! Every change must fully unfocus the old widget (`unfocus()` while its flag
//! is still set, then the flag cleared) before the new one is focused (flag
//! set, then `focus()`), so no two widgets ever draw as focused at once.

use std::any::Any;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use ftk_core::canvas::Canvas;
use ftk_core::event::KeyEvent;
use ftk_core::geometry::Rect;
use ftk_core::render::Renderer;
use ftk_screen::ScreenRegistry;
use ftk_widgets::{ExitType, Widget, WidgetBase, WidgetId};

// ============================================================================
// Test Infrastructure
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Call {
    Focus,
    Unfocus,
}

/// One focus callback: who, which call, the widget's own flag at the time,
/// and how many widgets looked focused just before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Record {
    id: WidgetId,
    call: Call,
    flag: bool,
    lit_before: usize,
}

#[derive(Default)]
struct Journal {
    records: Vec<Record>,
    lit: BTreeSet<WidgetId>,
}

type Shared = Rc<RefCell<Journal>>;

struct Recorder {
    base: WidgetBase,
    journal: Shared,
}

impl Recorder {
    fn record(&self, call: Call) {
        let mut journal = self.journal.borrow_mut();
        let record = Record {
            id: self.base.id(),
            call,
            flag: self.base.has_focus(),
            lit_before: journal.lit.len(),
        };
        journal.records.push(record);
        match call {
            Call::Focus => journal.lit.insert(record.id),
            Call::Unfocus => journal.lit.remove(&record.id),
        };
    }
}

impl Widget for Recorder {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn kind(&self) -> &'static str {
        "Recorder"
    }

    fn draw_focused(&mut self, _out: &mut dyn Renderer, _boxed: bool, _focused: bool) {}

    fn focus(&mut self, _out: &mut dyn Renderer) {
        self.record(Call::Focus);
    }

    fn unfocus(&mut self, _out: &mut dyn Renderer) {
        self.record(Call::Unfocus);
    }

    fn inject(&mut self, _out: &mut dyn Renderer, _key: KeyEvent) -> ExitType {
        ExitType::EarlyExit
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Three recorders `[A, B, C]`; A holds focus and its registration is lit.
fn setup() -> (Canvas, ScreenRegistry, Shared, [WidgetId; 3]) {
    let canvas = Canvas::new(8, 3);
    let journal = Shared::default();
    let mut screen = ScreenRegistry::new();
    let mut ids = Vec::new();
    for row in 0..3 {
        let base = WidgetBase::new(canvas.surface(), Rect::new(0, row, 8, 1)).unwrap();
        ids.push(base.id());
        screen.register(Recorder {
            base,
            journal: Rc::clone(&journal),
        });
    }
    journal.borrow_mut().lit.insert(ids[0]);
    (canvas, screen, journal, [ids[0], ids[1], ids[2]])
}

fn take(journal: &Shared) -> Vec<Record> {
    std::mem::take(&mut journal.borrow_mut().records)
}

fn unfocus(id: WidgetId) -> Record {
    Record {
        id,
        call: Call::Unfocus,
        flag: true,
        lit_before: 1,
    }
}

fn focus(id: WidgetId) -> Record {
    Record {
        id,
        call: Call::Focus,
        flag: true,
        lit_before: 0,
    }
}

fn flagged(screen: &ScreenRegistry) -> Vec<WidgetId> {
    screen
        .iter()
        .filter(|w| w.base().has_focus())
        .map(|w| w.id())
        .collect()
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn focus_next_unfocuses_before_focusing() {
    let (mut canvas, mut screen, journal, [a, b, _]) = setup();
    screen.focus_next(&mut canvas);
    assert_eq!(take(&journal), vec![unfocus(a), focus(b)]);
    assert_eq!(flagged(&screen), vec![b]);
}

#[test]
fn set_focus_unfocuses_before_focusing() {
    let (mut canvas, mut screen, journal, [a, _, c]) = setup();
    assert!(screen.set_focus(&mut canvas, c));
    assert_eq!(take(&journal), vec![unfocus(a), focus(c)]);
    assert_eq!(flagged(&screen), vec![c]);
}

#[test]
fn switch_focus_unfocuses_before_focusing() {
    let (mut canvas, mut screen, journal, [a, b, _]) = setup();
    screen.switch_focus(&mut canvas, Some(b), Some(a));
    assert_eq!(take(&journal), vec![unfocus(a), focus(b)]);
    assert_eq!(screen.focused(), Some(b));
    assert_eq!(flagged(&screen), vec![b]);
}

#[test]
fn unregister_unfocuses_before_repairing() {
    let (mut canvas, mut screen, journal, [a, b, _]) = setup();
    let removed = screen.unregister(&mut canvas, a).unwrap();
    assert_eq!(take(&journal), vec![unfocus(a), focus(b)]);
    assert!(!removed.base().has_focus());
    assert_eq!(flagged(&screen), vec![b]);
}

// ============================================================================
// Stale `old` argument
// ============================================================================

#[test]
fn switch_focus_with_stale_old_keeps_a_single_focus() {
    let (mut canvas, mut screen, journal, [a, b, c]) = setup();
    assert!(screen.set_focus(&mut canvas, c));
    take(&journal);

    screen.switch_focus(&mut canvas, Some(b), Some(a));

    let records = take(&journal);
    assert_eq!(records.first(), Some(&unfocus(c)));
    assert_eq!(records.last(), Some(&focus(b)));
    assert_eq!(screen.focused(), Some(b));
    assert_eq!(flagged(&screen), vec![b]);
    assert_eq!(journal.borrow().lit, BTreeSet::from([b]));
}

#[test]
fn switch_focus_to_none_clears_the_real_focus() {
    let (mut canvas, mut screen, journal, [a, _, c]) = setup();
    assert!(screen.set_focus(&mut canvas, c));
    take(&journal);

    screen.switch_focus(&mut canvas, None, Some(a));

    assert_eq!(take(&journal).first(), Some(&unfocus(c)));
    assert_eq!(screen.focused(), None);
    assert!(flagged(&screen).is_empty());
    assert!(journal.borrow().lit.is_empty());
}
