#![forbid(unsafe_code)]

//! A shared paste buffer.
//!
//! Entry widgets cut and copy into a [`Clipboard`] and paste from it.
//! Cloning the handle shares the buffer, so every entry on a screen given
//! the same handle sees the same contents.

use std::cell::RefCell;
use std::rc::Rc;

/// Handle to a shared text buffer.
#[derive(Debug, Clone, Default)]
pub struct Clipboard(Rc<RefCell<String>>);

impl Clipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the contents.
    pub fn set(&self, text: impl Into<String>) {
        *self.0.borrow_mut() = text.into();
    }

    /// A copy of the contents.
    #[must_use]
    pub fn get(&self) -> String {
        self.0.borrow().clone()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Whether two handles share a buffer.
    #[must_use]
    pub fn same_buffer(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
