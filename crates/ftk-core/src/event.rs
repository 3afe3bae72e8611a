#![forbid(unsafe_code)]

//! Terminal events and the key input unit.
//!
//! Every widget consumes input one [`KeyEvent`] at a time. The remaining
//! [`Event`] variants are handled by the screen-level traversal loop and never
//! reach a widget directly.
//!
//! Terminals that cannot report key kinds produce `Press` for every key.
//! A key is "extended" when it is not a plain character (arrows, function
//! keys, Enter), the same split curses makes with its function-key flag.

use bitflags::bitflags;
#[cfg(not(target_arch = "wasm32"))]
use crossterm::event as cte;

/// One event read from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// Terminal was resized.
    Resize {
        /// Columns.
        width: u16,
        /// Rows.
        height: u16,
    },

    /// Bracketed paste. The traversal loop replays it as character keys.
    Paste(String),

    /// Focus gained or lost by the terminal window itself.
    ///
    /// `true` when the window gained focus.
    Focus(bool),
}

impl Event {
    /// Convert a Crossterm event into an ftk [`Event`].
    ///
    /// Mouse events are not part of the input model and map to `None`.
    #[must_use]
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_crossterm(event: cte::Event) -> Option<Self> {
        map_crossterm_event_internal(event)
    }

    /// The key event, if this is a key press or repeat.
    #[must_use]
    pub fn as_key(&self) -> Option<KeyEvent> {
        match self {
            Self::Key(key) if key.kind != KeyEventKind::Release => Some(*key),
            _ => None,
        }
    }
}

/// A keyboard event: the "input unit" widgets consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key.
    pub code: KeyCode,

    /// Held modifiers.
    pub modifiers: Modifiers,

    /// Press, repeat, or release.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// An unmodified key press.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Shorthand for a plain character key.
    #[must_use]
    pub const fn char(c: char) -> Self {
        Self::new(KeyCode::Char(c))
    }

    /// Shorthand for a Ctrl+character chord.
    #[must_use]
    pub const fn ctrl_char(c: char) -> Self {
        Self::new(KeyCode::Char(c)).with_modifiers(Modifiers::CTRL)
    }

    /// Replace the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Replace the event kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this is the character key `c`, ignoring modifiers.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }

    /// The character carried by this key, if it is an unmodified (or
    /// shift-only) character key.
    #[must_use]
    pub fn printable(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c)
                if !c.is_control() && (self.modifiers - Modifiers::SHIFT).is_empty() =>
            {
                Some(c)
            }
            _ => None,
        }
    }

    /// True for every key that is not a plain character.
    #[must_use]
    pub const fn is_extended(&self) -> bool {
        !matches!(self.code, KeyCode::Char(_))
    }

    /// Ctrl held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Alt held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Shift held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

impl From<char> for KeyEvent {
    fn from(c: char) -> Self {
        Self::char(c)
    }
}

/// The key of a [`KeyEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character, including control characters such as `'\r'`.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Backspace key.
    Backspace,

    /// Tab key.
    Tab,

    /// Shift+Tab (back-tab).
    BackTab,

    /// Delete key.
    Delete,

    /// Insert key.
    Insert,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Function key (F1-F63).
    F(u8),

    /// Ctrl+Space / Ctrl+@. As a binding substitute it means "no key".
    Null,
}

/// Whether a key went down, repeated, or came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Also reported when the terminal cannot tell.
    #[default]
    Press,

    /// Auto-repeat while held.
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super, Meta, Hyper, or Command.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn map_crossterm_event_internal(event: cte::Event) -> Option<Event> {
    Some(match event {
        cte::Event::Key(key) => Event::Key(KeyEvent {
            code: KeyCode::from_crossterm(key.code)?,
            modifiers: Modifiers::from_crossterm(key.modifiers),
            kind: match key.kind {
                cte::KeyEventKind::Press => KeyEventKind::Press,
                cte::KeyEventKind::Repeat => KeyEventKind::Repeat,
                cte::KeyEventKind::Release => KeyEventKind::Release,
            },
        }),
        cte::Event::Resize(width, height) => Event::Resize { width, height },
        cte::Event::Paste(text) => Event::Paste(text),
        cte::Event::FocusGained => Event::Focus(true),
        cte::Event::FocusLost => Event::Focus(false),
        cte::Event::Mouse(_) => return None,
    })
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyCode {
    /// Media, modifier-only, and lock keys have no ftk equivalent.
    fn from_crossterm(code: cte::KeyCode) -> Option<Self> {
        use cte::KeyCode as C;
        let code = match code {
            C::Char(c) => Self::Char(c),
            C::F(n) => Self::F(n),
            C::Esc => Self::Escape,
            C::Enter => Self::Enter,
            C::Backspace => Self::Backspace,
            C::Tab => Self::Tab,
            C::BackTab => Self::BackTab,
            C::Delete => Self::Delete,
            C::Insert => Self::Insert,
            C::Home => Self::Home,
            C::End => Self::End,
            C::PageUp => Self::PageUp,
            C::PageDown => Self::PageDown,
            C::Up => Self::Up,
            C::Down => Self::Down,
            C::Left => Self::Left,
            C::Right => Self::Right,
            C::Null => Self::Null,
            _ => return None,
        };
        Some(code)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Modifiers {
    /// Super, Hyper, and Meta all fold into [`Modifiers::SUPER`].
    fn from_crossterm(held: cte::KeyModifiers) -> Self {
        use cte::KeyModifiers as M;
        [
            (M::SHIFT, Self::SHIFT),
            (M::ALT, Self::ALT),
            (M::CONTROL, Self::CTRL),
            (M::SUPER, Self::SUPER),
            (M::HYPER, Self::SUPER),
            (M::META, Self::SUPER),
        ]
        .into_iter()
        .filter(|(ct, _)| held.contains(*ct))
        .fold(Self::NONE, |acc, (_, ours)| acc | ours)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn ct_key(code: cte::KeyCode, modifiers: cte::KeyModifiers) -> cte::Event {
        cte::Event::Key(cte::KeyEvent::new(code, modifiers))
    }

    #[test]
    fn plain_and_extended_keys() {
        let q = KeyEvent::char('q');
        assert!(q.is_char('q') && !q.is_char('x'));
        assert!(!q.is_extended());
        for code in [KeyCode::Enter, KeyCode::F(3), KeyCode::Up, KeyCode::Null] {
            assert!(KeyEvent::new(code).is_extended(), "{code:?}");
        }
    }

    #[test]
    fn printable_ignores_ctrl_chords() {
        assert_eq!(KeyEvent::char('a').printable(), Some('a'));
        assert_eq!(
            KeyEvent::char('A')
                .with_modifiers(Modifiers::SHIFT)
                .printable(),
            Some('A')
        );
        assert_eq!(KeyEvent::ctrl_char('a').printable(), None);
        assert_eq!(
            KeyEvent::char('a').with_modifiers(Modifiers::ALT).printable(),
            None
        );
        assert_eq!(KeyEvent::char('\t').printable(), None);
        assert_eq!(KeyEvent::new(KeyCode::Left).printable(), None);
    }

    #[test]
    fn modifier_queries() {
        let chord = KeyEvent::ctrl_char('c');
        assert!(chord.ctrl() && !chord.alt() && !chord.shift());
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[test]
    fn as_key_skips_release() {
        let press = Event::Key(KeyEvent::char('x'));
        let release = Event::Key(KeyEvent::char('x').with_kind(KeyEventKind::Release));
        assert_eq!(press.as_key(), Some(KeyEvent::char('x')));
        assert_eq!(release.as_key(), None);
        assert_eq!(Event::Focus(true).as_key(), None);
    }

    #[test]
    fn crossterm_keys_translate() {
        let esc = Event::from_crossterm(ct_key(cte::KeyCode::Esc, cte::KeyModifiers::NONE));
        assert_eq!(esc, Some(Event::Key(KeyEvent::new(KeyCode::Escape))));

        let chord = Event::from_crossterm(ct_key(
            cte::KeyCode::Char('x'),
            cte::KeyModifiers::CONTROL | cte::KeyModifiers::SHIFT,
        ));
        assert_eq!(
            chord,
            Some(Event::Key(
                KeyEvent::char('x').with_modifiers(Modifiers::CTRL | Modifiers::SHIFT)
            ))
        );

        let caps = ct_key(cte::KeyCode::CapsLock, cte::KeyModifiers::NONE);
        assert_eq!(Event::from_crossterm(caps), None);
    }

    #[test]
    fn crossterm_meta_is_super() {
        for held in [
            cte::KeyModifiers::SUPER,
            cte::KeyModifiers::HYPER,
            cte::KeyModifiers::META,
        ] {
            assert_eq!(Modifiers::from_crossterm(held), Modifiers::SUPER);
        }
    }

    #[test]
    fn crossterm_non_key_events() {
        assert_eq!(
            Event::from_crossterm(cte::Event::Resize(80, 24)),
            Some(Event::Resize {
                width: 80,
                height: 24
            })
        );
        assert_eq!(
            Event::from_crossterm(cte::Event::Paste("hi".into())),
            Some(Event::Paste("hi".into()))
        );
        assert_eq!(
            Event::from_crossterm(cte::Event::FocusLost),
            Some(Event::Focus(false))
        );
        let mouse = cte::Event::Mouse(cte::MouseEvent {
            kind: cte::MouseEventKind::Moved,
            column: 0,
            row: 0,
            modifiers: cte::KeyModifiers::NONE,
        });
        assert_eq!(Event::from_crossterm(mouse), None);
    }
}
