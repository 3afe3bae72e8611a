#![forbid(unsafe_code)]

//! Per-widget key binding tables.
//!
//! A [`KeyBindingTable`] maps a [`KeyChord`] to either a substitute key or a
//! handler closure. Handlers capture whatever context they need; there is no
//! separate user-data slot.
//!
//! Keys that are not bound at all pass through [`translate_default`] before
//! the widget's own command dispatch sees them. Bound keys never do.

use std::collections::HashMap;
use std::rc::Rc;

use ftk_core::event::{KeyCode, KeyEvent, Modifiers};

use crate::error::BindError;

/// Highest function key a binding may name.
pub const MAX_FUNCTION_KEY: u8 = 63;

/// Lookup key of a binding table: a key code plus its modifiers.
///
/// The event kind is ignored, so presses and repeats share bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: KeyCode,
    pub modifiers: Modifiers,
}

impl KeyChord {
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// Ctrl + `c`.
    #[must_use]
    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::CTRL)
    }

    /// Whether a binding can be installed for this chord.
    #[must_use]
    pub const fn is_representable(&self) -> bool {
        match self.code {
            KeyCode::F(n) => n >= 1 && n <= MAX_FUNCTION_KEY,
            _ => true,
        }
    }
}

impl From<KeyEvent> for KeyChord {
    fn from(key: KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

impl From<&KeyEvent> for KeyChord {
    fn from(key: &KeyEvent) -> Self {
        Self::new(key.code, key.modifiers)
    }
}

impl From<KeyCode> for KeyChord {
    fn from(code: KeyCode) -> Self {
        Self::new(code, Modifiers::NONE)
    }
}

impl From<char> for KeyChord {
    fn from(c: char) -> Self {
        Self::new(KeyCode::Char(c), Modifiers::NONE)
    }
}

/// A binding handler.
///
/// Returning `true` means the key was fully handled and the widget's own
/// command dispatch is skipped.
pub type Handler<W> = Rc<dyn Fn(&mut W, &KeyEvent) -> bool>;

/// What a bound key does.
pub enum Binding<W> {
    /// Interpret another key in place of the pressed one.
    Substitute(KeyEvent),
    /// Run a callback.
    Handler(Handler<W>),
}

impl<W> Clone for Binding<W> {
    fn clone(&self) -> Self {
        match self {
            Self::Substitute(key) => Self::Substitute(*key),
            Self::Handler(handler) => Self::Handler(Rc::clone(handler)),
        }
    }
}

impl<W> std::fmt::Debug for Binding<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Substitute(key) => f.debug_tuple("Substitute").field(key).finish(),
            Self::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

/// The outcome of looking a key up.
pub enum Resolution<W> {
    /// Unbound: translate and dispatch.
    Unbound(KeyEvent),
    /// Bound to a substitute key: dispatch it untranslated.
    Substitute(KeyEvent),
    /// Bound to a handler.
    Handler(Handler<W>),
}

/// Key bindings owned by one widget.
pub struct KeyBindingTable<W> {
    bindings: HashMap<KeyChord, Binding<W>>,
}

impl<W> Default for KeyBindingTable<W> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<W> std::fmt::Debug for KeyBindingTable<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.bindings.iter()).finish()
    }
}

impl<W> KeyBindingTable<W> {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `binding` for `key`, replacing any previous binding.
    ///
    /// Substituting [`KeyCode::Null`] is the empty binding and changes nothing.
    pub fn bind(&mut self, key: impl Into<KeyChord>, binding: Binding<W>) -> Result<(), BindError> {
        let chord = key.into();
        if !chord.is_representable() {
            return Err(BindError::Unrepresentable(chord));
        }
        if let Binding::Substitute(sub) = &binding
            && sub.code == KeyCode::Null
        {
            return Ok(());
        }
        self.bindings.insert(chord, binding);
        Ok(())
    }

    /// Bind `key` to a handler closure.
    pub fn bind_handler(
        &mut self,
        key: impl Into<KeyChord>,
        handler: impl Fn(&mut W, &KeyEvent) -> bool + 'static,
    ) -> Result<(), BindError> {
        self.bind(key, Binding::Handler(Rc::new(handler)))
    }

    /// Make `key` behave like `substitute`.
    pub fn bind_substitute(
        &mut self,
        key: impl Into<KeyChord>,
        substitute: impl Into<KeyEvent>,
    ) -> Result<(), BindError> {
        self.bind(key, Binding::Substitute(substitute.into()))
    }

    /// Remove the binding for `key`. Returns whether one existed.
    pub fn unbind(&mut self, key: impl Into<KeyChord>) -> bool {
        self.bindings.remove(&key.into()).is_some()
    }

    /// Remove every binding.
    pub fn clean(&mut self) {
        self.bindings.clear();
    }

    #[must_use]
    pub fn is_bound(&self, key: impl Into<KeyChord>) -> bool {
        self.bindings.contains_key(&key.into())
    }

    #[must_use]
    pub fn get(&self, key: impl Into<KeyChord>) -> Option<&Binding<W>> {
        self.bindings.get(&key.into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Decide how `key` should be interpreted.
    #[must_use]
    pub fn resolve(&self, key: &KeyEvent) -> Resolution<W> {
        match self.bindings.get(&KeyChord::from(key)) {
            Some(Binding::Substitute(sub)) => Resolution::Substitute(*sub),
            Some(Binding::Handler(handler)) => Resolution::Handler(Rc::clone(handler)),
            None => Resolution::Unbound(translate_default(*key)),
        }
    }
}

/// Map raw terminal keys onto the keys widgets dispatch on.
///
/// Covers carriage return, line feed, and tab arriving as characters, plus
/// the emacs-style control chords for navigation.
#[must_use]
pub fn translate_default(key: KeyEvent) -> KeyEvent {
    let plain = key.modifiers.is_empty();
    let ctrl = key.modifiers == Modifiers::CTRL;
    let code = match key.code {
        KeyCode::Char('\r' | '\n') if plain => KeyCode::Enter,
        KeyCode::Char('\t') if plain => KeyCode::Tab,
        KeyCode::Char('\u{1b}') if plain => KeyCode::Escape,
        KeyCode::Char('[') if ctrl => KeyCode::Escape,
        KeyCode::Char('h') if ctrl => KeyCode::Backspace,
        KeyCode::Char('b') if ctrl => KeyCode::PageUp,
        KeyCode::Char('f') if ctrl => KeyCode::PageDown,
        KeyCode::Char('p') if ctrl => KeyCode::Up,
        KeyCode::Char('n') if ctrl => KeyCode::Down,
        KeyCode::Char('a') if ctrl => KeyCode::Home,
        KeyCode::Char('e') if ctrl => KeyCode::End,
        _ => return key,
    };
    KeyEvent::new(code).with_kind(key.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        hits: u32,
    }

    #[test]
    fn handler_binding_resolves() {
        let mut table = KeyBindingTable::<Counter>::new();
        table
            .bind_handler('q', |c: &mut Counter, _| {
                c.hits += 1;
                true
            })
            .unwrap();
        let mut counter = Counter { hits: 0 };
        match table.resolve(&KeyEvent::char('q')) {
            Resolution::Handler(h) => assert!(h(&mut counter, &KeyEvent::char('q'))),
            _ => panic!("expected handler"),
        }
        assert_eq!(counter.hits, 1);
    }

    #[test]
    fn rebinding_replaces() {
        let mut table = KeyBindingTable::<Counter>::new();
        table.bind_substitute('j', KeyCode::Down).unwrap();
        table.bind_substitute('j', KeyCode::Up).unwrap();
        assert_eq!(table.len(), 1);
        assert!(matches!(
            table.resolve(&KeyEvent::char('j')),
            Resolution::Substitute(k) if k.code == KeyCode::Up
        ));
    }

    #[test]
    fn null_substitute_is_noop() {
        let mut table = KeyBindingTable::<Counter>::new();
        table.bind_substitute('x', KeyCode::Null).unwrap();
        assert!(!table.is_bound('x'));
        assert!(table.is_empty());
    }

    #[test]
    fn out_of_range_function_keys_rejected() {
        let mut table = KeyBindingTable::<Counter>::new();
        assert!(table.bind_substitute(KeyCode::F(64), KeyCode::Enter).is_err());
        assert!(table.bind_substitute(KeyCode::F(0), KeyCode::Enter).is_err());
        assert!(table.bind_substitute(KeyCode::F(63), KeyCode::Enter).is_ok());
    }

    #[test]
    fn unbind_and_clean() {
        let mut table = KeyBindingTable::<Counter>::new();
        table.bind_substitute('a', KeyCode::Home).unwrap();
        table.bind_substitute('z', KeyCode::End).unwrap();
        assert!(table.unbind('a'));
        assert!(!table.unbind('a'));
        assert!(table.is_bound('z'));
        table.clean();
        assert!(table.is_empty());
    }

    #[test]
    fn modifiers_distinguish_chords() {
        let mut table = KeyBindingTable::<Counter>::new();
        table.bind_substitute(KeyChord::ctrl('k'), KeyCode::End).unwrap();
        assert!(!table.is_bound('k'));
        assert!(table.is_bound(KeyEvent::ctrl_char('k')));
    }

    #[test]
    fn unbound_keys_are_translated() {
        let table = KeyBindingTable::<Counter>::new();
        assert!(matches!(
            table.resolve(&KeyEvent::char('\r')),
            Resolution::Unbound(k) if k.code == KeyCode::Enter
        ));
    }

    #[test]
    fn default_translation_table() {
        let cases = [
            (KeyEvent::char('\n'), KeyCode::Enter),
            (KeyEvent::char('\t'), KeyCode::Tab),
            (KeyEvent::ctrl_char('['), KeyCode::Escape),
            (KeyEvent::ctrl_char('h'), KeyCode::Backspace),
            (KeyEvent::ctrl_char('b'), KeyCode::PageUp),
            (KeyEvent::ctrl_char('f'), KeyCode::PageDown),
            (KeyEvent::ctrl_char('p'), KeyCode::Up),
            (KeyEvent::ctrl_char('n'), KeyCode::Down),
            (KeyEvent::ctrl_char('a'), KeyCode::Home),
            (KeyEvent::ctrl_char('e'), KeyCode::End),
        ];
        for (raw, expected) in cases {
            assert_eq!(translate_default(raw).code, expected, "{raw:?}");
        }
        assert_eq!(translate_default(KeyEvent::char('h')), KeyEvent::char('h'));
        assert_eq!(translate_default(KeyEvent::new(KeyCode::Up)).code, KeyCode::Up);
    }
}
