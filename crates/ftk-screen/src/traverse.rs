#![forbid(unsafe_code)]

//! The screen-level input loop.
//!
//! [`ScreenRegistry::traverse`] reads one event at a time. A small set of
//! screen keys (see [`TraversalConfig`]) is handled by the screen itself;
//! intercepts get the next look; every other key goes to the focused
//! widget. Queued [`ScreenRequests`](crate::ScreenRequests) are applied
//! after each key.

use std::collections::HashMap;

use ftk_core::event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers};
use ftk_core::input::InputSource;
use ftk_core::render::Renderer;
use ftk_widgets::{ExitType, KeyChord, translate_default};
use tracing::{debug, debug_span};

use crate::error::ScreenError;
use crate::registry::ScreenRegistry;
use crate::requests::ScreenExit;

/// What a screen key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenAction {
    NextField,
    PreviousField,
    /// Accept the screen, committing every widget.
    ExitOk,
    /// Leave the screen without committing.
    ExitCancel,
    /// Reload committed data into every widget and redraw.
    Reset,
    /// Clear the surface and redraw.
    Redraw,
}

/// A screen-level key hook. Returns `true` when it consumed the key.
pub type Intercept = Box<dyn Fn(&KeyEvent, &mut ScreenRegistry, &mut dyn Renderer) -> bool>;

/// How a traversal ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraverseOutcome {
    Accepted,
    Cancelled,
    /// No widget could take focus.
    NoFocus,
}

/// Screen keys, intercepts, and start-up behaviour of a traversal.
pub struct TraversalConfig {
    keys: HashMap<KeyChord, ScreenAction>,
    intercepts: Vec<Intercept>,
    refresh_on_start: bool,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        let keys = [
            (KeyChord::from(KeyCode::Tab), ScreenAction::NextField),
            (KeyChord::from(KeyCode::BackTab), ScreenAction::PreviousField),
            (
                KeyChord::new(KeyCode::BackTab, Modifiers::SHIFT),
                ScreenAction::PreviousField,
            ),
            (KeyChord::from(KeyCode::F(10)), ScreenAction::ExitOk),
            (KeyChord::ctrl('x'), ScreenAction::ExitCancel),
            (KeyChord::ctrl('r'), ScreenAction::Reset),
            (KeyChord::ctrl('l'), ScreenAction::Redraw),
        ];
        Self {
            keys: keys.into_iter().collect(),
            intercepts: Vec::new(),
            refresh_on_start: true,
        }
    }
}

impl std::fmt::Debug for TraversalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraversalConfig")
            .field("keys", &self.keys)
            .field("intercepts", &self.intercepts.len())
            .field("refresh_on_start", &self.refresh_on_start)
            .finish()
    }
}

impl TraversalConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Map a key to a screen action, replacing any previous mapping.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<KeyChord>, action: ScreenAction) -> Self {
        self.keys.insert(key.into(), action);
        self
    }

    /// Hand a key back to the widgets.
    #[must_use]
    pub fn without_key(mut self, key: impl Into<KeyChord>) -> Self {
        self.keys.remove(&key.into());
        self
    }

    /// Append an intercept. Intercepts run in insertion order.
    #[must_use]
    pub fn with_intercept(
        mut self,
        intercept: impl Fn(&KeyEvent, &mut ScreenRegistry, &mut dyn Renderer) -> bool + 'static,
    ) -> Self {
        self.intercepts.push(Box::new(intercept));
        self
    }

    /// Whether the screen is fully drawn before the first read.
    #[must_use]
    pub fn with_refresh_on_start(mut self, refresh: bool) -> Self {
        self.refresh_on_start = refresh;
        self
    }

    pub fn refresh_on_start(&self) -> bool {
        self.refresh_on_start
    }

    /// The screen action bound to `key`, checking the raw key first and then
    /// its default translation.
    pub fn action_for(&self, key: &KeyEvent) -> Option<ScreenAction> {
        self.keys
            .get(&KeyChord::from(key))
            .or_else(|| self.keys.get(&KeyChord::from(translate_default(*key))))
            .copied()
    }
}

impl ScreenRegistry {
    /// Run the screen until it is accepted or cancelled.
    ///
    /// An existing focus is kept; otherwise the first focusable widget is
    /// focused. A widget exiting normally moves focus to the next field and
    /// a widget hitting escape cancels the screen.
    pub fn traverse(
        &mut self,
        out: &mut dyn Renderer,
        input: &mut dyn InputSource,
        config: &TraversalConfig,
    ) -> Result<TraverseOutcome, ScreenError> {
        let _span = debug_span!("traverse", widgets = self.len()).entered();

        if self.focus.is_none() && self.focus_first(out).is_none() {
            debug!("no focusable widget");
            return Ok(TraverseOutcome::NoFocus);
        }
        if config.refresh_on_start {
            self.refresh(out);
        }
        out.flush().map_err(ScreenError::Render)?;

        loop {
            let event = input.read_event().map_err(|e| {
                debug!(error = %e, "traversal input failed");
                ScreenError::Input(e)
            })?;

            let exit = match event {
                Event::Key(key) if key.kind == KeyEventKind::Release => None,
                Event::Key(key) => self.input_unit(out, key, config),
                Event::Paste(text) => text
                    .chars()
                    .find_map(|c| self.input_unit(out, KeyEvent::char(c), config)),
                Event::Resize { width, height } => {
                    debug!(width, height, "resize");
                    self.refresh(out);
                    self.apply_requests(out)
                }
                Event::Focus(_) => None,
            };
            out.flush().map_err(ScreenError::Render)?;

            match exit {
                Some(ScreenExit::Accept) => {
                    self.save_all();
                    debug!("screen accepted");
                    return Ok(TraverseOutcome::Accepted);
                }
                Some(ScreenExit::Cancel) => {
                    debug!("screen cancelled");
                    return Ok(TraverseOutcome::Cancelled);
                }
                None if self.focus.is_none() => {
                    debug!("focus lost");
                    return Ok(TraverseOutcome::NoFocus);
                }
                None => {}
            }
        }
    }

    /// One key, followed by the requests it queued.
    fn input_unit(
        &mut self,
        out: &mut dyn Renderer,
        key: KeyEvent,
        config: &TraversalConfig,
    ) -> Option<ScreenExit> {
        let exit = self.handle_key(out, key, config);
        let requested = self.apply_requests(out);
        exit.or(requested)
    }

    fn handle_key(
        &mut self,
        out: &mut dyn Renderer,
        key: KeyEvent,
        config: &TraversalConfig,
    ) -> Option<ScreenExit> {
        if let Some(action) = config.action_for(&key) {
            debug!(?action, "screen key");
            match action {
                ScreenAction::NextField => {
                    self.focus_next(out);
                }
                ScreenAction::PreviousField => {
                    self.focus_previous(out);
                }
                ScreenAction::ExitOk => return Some(ScreenExit::Accept),
                ScreenAction::ExitCancel => return Some(ScreenExit::Cancel),
                ScreenAction::Reset => {
                    self.reload_all();
                    self.refresh(out);
                }
                ScreenAction::Redraw => {
                    let surface = out.surface();
                    out.clear_area(surface);
                    self.refresh(out);
                }
            }
            return None;
        }

        if config.intercepts.iter().any(|hook| hook(&key, self, out)) {
            return None;
        }

        let index = self.focus?;
        match self.widgets[index].inject(out, key) {
            ExitType::Normal => {
                self.focus_next(out);
                None
            }
            ExitType::EscapeHit => Some(ScreenExit::Cancel),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_screen_keys() {
        let config = TraversalConfig::default();
        assert!(config.refresh_on_start());
        assert_eq!(
            config.action_for(&KeyEvent::new(KeyCode::Tab)),
            Some(ScreenAction::NextField)
        );
        assert_eq!(
            config.action_for(&KeyEvent::char('\t')),
            Some(ScreenAction::NextField)
        );
        assert_eq!(
            config.action_for(&KeyEvent::new(KeyCode::BackTab)),
            Some(ScreenAction::PreviousField)
        );
        assert_eq!(
            config.action_for(&KeyEvent::new(KeyCode::F(10))),
            Some(ScreenAction::ExitOk)
        );
        assert_eq!(
            config.action_for(&KeyEvent::ctrl_char('x')),
            Some(ScreenAction::ExitCancel)
        );
        assert_eq!(
            config.action_for(&KeyEvent::ctrl_char('r')),
            Some(ScreenAction::Reset)
        );
        assert_eq!(
            config.action_for(&KeyEvent::ctrl_char('l')),
            Some(ScreenAction::Redraw)
        );
        assert_eq!(config.action_for(&KeyEvent::char('x')), None);
        assert_eq!(config.action_for(&KeyEvent::new(KeyCode::Enter)), None);
    }

    #[test]
    fn builder_overrides() {
        let config = TraversalConfig::new()
            .without_key(KeyEvent::ctrl_char('x'))
            .with_key(KeyCode::Escape, ScreenAction::ExitCancel)
            .with_key(KeyCode::Down, ScreenAction::NextField)
            .with_refresh_on_start(false)
            .with_intercept(|_, _, _| false);
        assert!(!config.refresh_on_start());
        assert_eq!(config.action_for(&KeyEvent::ctrl_char('x')), None);
        assert_eq!(
            config.action_for(&KeyEvent::new(KeyCode::Escape)),
            Some(ScreenAction::ExitCancel)
        );
        assert_eq!(
            config.action_for(&KeyEvent::new(KeyCode::Down)),
            Some(ScreenAction::NextField)
        );
        assert!(format!("{config:?}").contains("intercepts: 1"));
    }
}
