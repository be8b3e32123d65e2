//! Actions bound to keys and encoder gestures.
//!
//! An action runs when its trigger fires ([`Action::execute`]) and gets a
//! chance to reverse itself when the trigger ends ([`Action::undo`]).  Undo
//! is best-effort symmetry, not a transaction log: a press action holds
//! modifiers down, its undo releases them.
//!
//! Switching apps is expressed in the return value.  An action that wants a
//! different app focused returns a [`SwitchRequest`]; the dispatcher
//! carries it out after the handler returns.  Inside a [`Sequence`] a
//! switch request short-circuits the remaining steps.

use crate::device::Macropad;
use crate::domain::settings::{AppId, Settings};
use crate::engine::timer::TimerRegistry;

pub mod hid;
pub mod switching;

/// Everything an action, binding, or app may touch while handling an event.
pub struct EngineContext<'a> {
    pub device: &'a mut dyn Macropad,
    pub settings: &'a mut Settings,
    pub timers: &'a mut TimerRegistry,
    /// The app holding focus while this event is handled.
    pub current: AppId,
}

/// A request to focus a different app, returned through the action chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchRequest {
    pub target: AppId,
}

/// Something a key press or encoder gesture can do.
pub trait Action {
    /// Runs the action.  Returning `Some` asks the dispatcher to focus
    /// another app once the current handler finishes.
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest>;

    /// Reverses whatever `execute` left held.  Defaults to doing nothing.
    fn undo(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        let _ = ctx;
        None
    }
}

/// Runs a list of actions in order.
///
/// Undo replays the same forward order; each inner undo is written against
/// its own execute, so reversing the list would unwind unrelated state in
/// the wrong shape.
pub struct Sequence {
    actions: Vec<Box<dyn Action>>,
}

impl Sequence {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    /// Appends a step.
    pub fn then(mut self, action: impl Action + 'static) -> Self {
        self.actions.push(Box::new(action));
        self
    }
}

impl Default for Sequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Action for Sequence {
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        for action in &self.actions {
            if let Some(request) = action.execute(ctx) {
                return Some(request);
            }
        }
        None
    }

    fn undo(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        for action in &self.actions {
            if let Some(request) = action.undo(ctx) {
                return Some(request);
            }
        }
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
