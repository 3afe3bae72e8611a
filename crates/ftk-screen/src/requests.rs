#![forbid(unsafe_code)]

//! Deferred registry mutations.
//!
//! Widgets are borrowed mutably while they interpret a key, so a binding
//! handler cannot touch the registry directly. It pushes a
//! [`ScreenRequest`] onto a [`ScreenRequests`] handle instead; the registry
//! applies the queue after the key has been fully processed.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use ftk_widgets::WidgetId;

/// A mutation to apply once the current input unit is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenRequest {
    /// Remove (and erase) a widget.
    Unregister(WidgetId),
    /// Make a widget visible and draw it.
    Show(WidgetId),
    /// Hide a widget and erase it.
    Hide(WidgetId),
    /// Move focus to a widget.
    Focus(WidgetId),
    /// End traversal, committing.
    ExitOk,
    /// End traversal, discarding.
    ExitCancel,
}

/// How a screen asked to stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenExit {
    Accept,
    Cancel,
}

/// Cloneable handle to a registry's request queue.
#[derive(Debug, Clone, Default)]
pub struct ScreenRequests(Rc<RefCell<VecDeque<ScreenRequest>>>);

impl ScreenRequests {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, request: ScreenRequest) {
        self.0.borrow_mut().push_back(request);
    }

    pub fn unregister(&self, id: WidgetId) {
        self.push(ScreenRequest::Unregister(id));
    }

    pub fn show(&self, id: WidgetId) {
        self.push(ScreenRequest::Show(id));
    }

    pub fn hide(&self, id: WidgetId) {
        self.push(ScreenRequest::Hide(id));
    }

    pub fn focus(&self, id: WidgetId) {
        self.push(ScreenRequest::Focus(id));
    }

    pub fn exit_ok(&self) {
        self.push(ScreenRequest::ExitOk);
    }

    pub fn exit_cancel(&self) {
        self.push(ScreenRequest::ExitCancel);
    }

    /// Number of pending requests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Pop the oldest pending request.
    pub(crate) fn pop(&self) -> Option<ScreenRequest> {
        self.0.borrow_mut().pop_front()
    }
}
