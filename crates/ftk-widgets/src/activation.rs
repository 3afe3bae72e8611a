#![forbid(unsafe_code)]

//! The activation protocol.
//!
//! [`inject`] interprets exactly one key for one widget:
//!
//! 1. reset the exit type to the "still running" sentinel (`EarlyExit`);
//! 2. run the pre-process hook; `false` suppresses interpretation;
//! 3. resolve the key through the widget's binding table: a handler that
//!    returns `true` completes the key, a substitute key is dispatched as
//!    is, and unbound keys go through the default translation first;
//! 4. dispatch to the widget's command table;
//! 5. if the key did not complete, run the post-process hook;
//! 6. if the key did not complete, force the exit type back to `EarlyExit`.
//!
//! [`activate`] draws the widget and feeds it keys, either from an
//! [`InputSource`] or from a finite replay list, until the exit type leaves
//! `EarlyExit`. Only a `Normal` exit yields the widget's result.

use std::rc::Rc;

use ftk_core::event::KeyEvent;
use ftk_core::input::InputSource;
use ftk_core::render::Renderer;

use crate::Widget;
use crate::base::ExitType;
use crate::binding::{KeyBindingTable, KeyChord, Resolution};
use crate::error::BindError;

/// A pre- or post-process hook.
pub type Hook<W> = Rc<dyn Fn(&mut W, &KeyEvent) -> bool>;

/// What the widget's command table did with a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The key was consumed; keep going.
    Handled,
    /// The key is not meaningful here. The protocol beeps and keeps going.
    Rejected,
    /// The key ends the activation.
    Exit(ExitType),
}

/// Bindings and hooks attached to one widget.
pub struct Controls<W> {
    bindings: KeyBindingTable<W>,
    pre_process: Option<Hook<W>>,
    post_process: Option<Hook<W>>,
}

impl<W> Default for Controls<W> {
    fn default() -> Self {
        Self {
            bindings: KeyBindingTable::new(),
            pre_process: None,
            post_process: None,
        }
    }
}

impl<W> std::fmt::Debug for Controls<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controls")
            .field("bindings", &self.bindings)
            .field("pre_process", &self.pre_process.is_some())
            .field("post_process", &self.post_process.is_some())
            .finish()
    }
}

impl<W> Controls<W> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bindings(&self) -> &KeyBindingTable<W> {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindingTable<W> {
        &mut self.bindings
    }

    pub fn set_pre_process(&mut self, hook: impl Fn(&mut W, &KeyEvent) -> bool + 'static) {
        self.pre_process = Some(Rc::new(hook));
    }

    pub fn clear_pre_process(&mut self) {
        self.pre_process = None;
    }

    pub fn set_post_process(&mut self, hook: impl Fn(&mut W, &KeyEvent) -> bool + 'static) {
        self.post_process = Some(Rc::new(hook));
    }

    pub fn clear_post_process(&mut self) {
        self.post_process = None;
    }

    pub fn pre_process(&self) -> Option<Hook<W>> {
        self.pre_process.clone()
    }

    pub fn post_process(&self) -> Option<Hook<W>> {
        self.post_process.clone()
    }
}

/// A widget that can be driven by the activation protocol.
pub trait Interact: Widget + Sized {
    /// What a `Normal` exit hands back.
    type Output;

    fn controls(&self) -> &Controls<Self>;

    fn controls_mut(&mut self) -> &mut Controls<Self>;

    /// The widget's own command table.
    fn dispatch(&mut self, out: &mut dyn Renderer, key: KeyEvent) -> Dispatch;

    /// The widget's current result.
    fn result(&self) -> Self::Output;

    /// Bind `key` to a handler.
    fn bind(
        &mut self,
        key: impl Into<KeyChord>,
        handler: impl Fn(&mut Self, &KeyEvent) -> bool + 'static,
    ) -> Result<(), BindError> {
        self.controls_mut().bindings_mut().bind_handler(key, handler)
    }

    /// Make `key` act like `substitute`.
    fn bind_substitute(
        &mut self,
        key: impl Into<KeyChord>,
        substitute: impl Into<KeyEvent>,
    ) -> Result<(), BindError> {
        self.controls_mut()
            .bindings_mut()
            .bind_substitute(key, substitute)
    }

    fn unbind(&mut self, key: impl Into<KeyChord>) -> bool {
        self.controls_mut().bindings_mut().unbind(key)
    }

    fn clean_bindings(&mut self) {
        self.controls_mut().bindings_mut().clean();
    }

    fn is_bound(&self, key: impl Into<KeyChord>) -> bool {
        self.controls().bindings().is_bound(key)
    }

    fn set_pre_process(&mut self, hook: impl Fn(&mut Self, &KeyEvent) -> bool + 'static) {
        self.controls_mut().set_pre_process(hook);
    }

    fn set_post_process(&mut self, hook: impl Fn(&mut Self, &KeyEvent) -> bool + 'static) {
        self.controls_mut().set_post_process(hook);
    }

    /// Run an interactive activation reading from `input`.
    fn activate(
        &mut self,
        out: &mut dyn Renderer,
        input: &mut dyn InputSource,
    ) -> Option<Self::Output> {
        activate(self, out, Actions::Interactive(input))
    }

    /// Run an activation over a fixed key list.
    fn replay(&mut self, out: &mut dyn Renderer, keys: &[KeyEvent]) -> Option<Self::Output> {
        activate(self, out, Actions::Replay(keys))
    }
}

/// Where an activation gets its keys.
pub enum Actions<'a> {
    /// Block on a live source until the widget exits.
    Interactive(&'a mut dyn InputSource),
    /// Inject these keys in order; stop early if the widget exits.
    Replay(&'a [KeyEvent]),
}

/// Interpret one key. Returns the resulting exit type.
pub fn inject<W: Interact>(widget: &mut W, out: &mut dyn Renderer, key: KeyEvent) -> ExitType {
    widget.base_mut().set_exit_type(ExitType::EarlyExit);
    let mut complete = false;

    let proceed = match widget.controls().pre_process() {
        Some(hook) => hook(widget, &key),
        None => true,
    };

    if proceed {
        let command = match widget.controls().bindings().resolve(&key) {
            Resolution::Handler(handler) => {
                if handler(widget, &key) {
                    complete = true;
                    None
                } else {
                    Some(key)
                }
            }
            Resolution::Substitute(sub) => Some(sub),
            Resolution::Unbound(translated) => Some(translated),
        };

        if let Some(command) = command {
            match widget.dispatch(out, command) {
                Dispatch::Handled => {}
                Dispatch::Rejected => out.beep(),
                Dispatch::Exit(exit) => {
                    widget.base_mut().set_exit_type(exit);
                    complete = true;
                }
            }
        }
    }

    if !complete {
        if let Some(hook) = widget.controls().post_process() {
            hook(widget, &key);
        }
        widget.base_mut().set_exit_type(ExitType::EarlyExit);
    }

    let exit = widget.exit_type();
    if exit.is_running() && widget.base().is_visible() {
        let boxed = widget.base().boxed();
        widget.draw(out, boxed);
    }
    exit
}

/// Drive `widget` until it exits or the actions run out.
///
/// The widget is treated as focused for the duration; its prior focus flag
/// is restored afterwards. Returns the widget's result only on a `Normal`
/// exit. A failing input source or renderer ends the activation with
/// [`ExitType::Error`].
pub fn activate<W: Interact>(
    widget: &mut W,
    out: &mut dyn Renderer,
    actions: Actions<'_>,
) -> Option<W::Output> {
    let had_focus = widget.base().has_focus();
    widget.base_mut().set_has_focus(true);
    let boxed = widget.base().boxed();
    widget.draw(out, boxed);

    if let Err(_err) = out.flush() {
        ftk_core::warn!(widget = widget.kind(), error = %_err, "render failed");
        widget.base_mut().set_exit_type(ExitType::Error);
    } else {
        match actions {
            Actions::Interactive(input) => loop {
                let key = match input.read_key() {
                    Ok(key) => key,
                    Err(_err) => {
                        ftk_core::warn!(widget = widget.kind(), error = %_err, "input failed");
                        widget.base_mut().set_exit_type(ExitType::Error);
                        break;
                    }
                };
                if !step(widget, out, key) {
                    break;
                }
            },
            Actions::Replay(keys) => {
                let mut running = true;
                for key in keys {
                    if !step(widget, out, *key) {
                        running = false;
                        break;
                    }
                }
                if running {
                    widget.base_mut().set_exit_type(ExitType::EarlyExit);
                }
            }
        }
    }

    if !had_focus {
        widget.base_mut().set_has_focus(false);
        if widget.base().is_visible() {
            widget.draw(out, boxed);
            if let Err(_err) = out.flush() {
                ftk_core::warn!(widget = widget.kind(), error = %_err, "render failed");
                widget.base_mut().set_exit_type(ExitType::Error);
            }
        }
    }

    let exit = widget.exit_type();
    ftk_core::debug!(widget = widget.kind(), exit = ?exit, "activation finished");
    (exit == ExitType::Normal).then(|| widget.result())
}

/// Inject one key and flush. Returns whether the activation keeps running.
fn step<W: Interact>(widget: &mut W, out: &mut dyn Renderer, key: KeyEvent) -> bool {
    let exit = inject(widget, out, key);
    if let Err(_err) = out.flush() {
        ftk_core::warn!(widget = widget.kind(), error = %_err, "render failed");
        widget.base_mut().set_exit_type(ExitType::Error);
        return false;
    }
    exit.is_running()
}
