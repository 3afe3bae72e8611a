#![forbid(unsafe_code)]

//! Input sources.
//!
//! [`InputSource::read_event`] is the single suspension point of the toolkit:
//! everything between two reads runs to completion. A read error is fatal
//! for the activation loop that issued it.

use std::collections::VecDeque;
use std::io;

use crate::event::{Event, KeyEvent};

/// A blocking source of terminal events.
pub trait InputSource {
    /// Block until the next event arrives.
    fn read_event(&mut self) -> io::Result<Event>;

    /// Block until the next key press (or repeat), discarding other events.
    fn read_key(&mut self) -> io::Result<KeyEvent> {
        loop {
            if let Some(key) = self.read_event()?.as_key() {
                return Ok(key);
            }
        }
    }
}

impl<I: InputSource + ?Sized> InputSource for &mut I {
    fn read_event(&mut self) -> io::Result<Event> {
        (**self).read_event()
    }
}

/// A finite, pre-recorded event queue.
///
/// Once drained, every read fails with [`io::ErrorKind::UnexpectedEof`], which
/// the activation loop reports as an `Error` exit.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    events: VecDeque<Event>,
    reads: usize,
}

impl ScriptedInput {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a sequence of key presses.
    pub fn keys(keys: impl IntoIterator<Item = impl Into<KeyEvent>>) -> Self {
        Self {
            events: keys.into_iter().map(|k| Event::Key(k.into())).collect(),
            reads: 0,
        }
    }

    /// Script the characters of `text` as key presses.
    pub fn text(text: &str) -> Self {
        Self::keys(text.chars())
    }

    /// Append an event (builder).
    #[must_use]
    pub fn then(mut self, event: Event) -> Self {
        self.events.push_back(event);
        self
    }

    /// Append a key press (builder).
    #[must_use]
    pub fn then_key(self, key: impl Into<KeyEvent>) -> Self {
        self.then(Event::Key(key.into()))
    }

    /// Append an event.
    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Events not yet read.
    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    /// Number of successful reads so far.
    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl InputSource for ScriptedInput {
    fn read_event(&mut self) -> io::Result<Event> {
        let event = self
            .events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "input script exhausted"))?;
        self.reads += 1;
        Ok(event)
    }
}

/// Reads events from the controlling terminal via crossterm.
///
/// The terminal must already be in raw mode; see
/// [`TerminalGuard`](crate::terminal::TerminalGuard).
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermInput;

#[cfg(not(target_arch = "wasm32"))]
impl InputSource for CrosstermInput {
    fn read_event(&mut self) -> io::Result<Event> {
        loop {
            if let Some(event) = Event::from_crossterm(crossterm::event::read()?) {
                return Ok(event);
            }
        }
    }
}
