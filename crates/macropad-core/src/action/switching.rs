//! App switching and settings-conditional actions.
//!
//! Switching is cooperative: these actions return a [`SwitchRequest`]
//! instead of touching the dispatcher, and the dispatcher refocuses after
//! the current handler unwinds.

use std::collections::HashMap;

use super::{Action, EngineContext, SwitchRequest};
use crate::domain::settings::{AppId, HostOs, Settings, OS_SETTING};

/// Switches focus to a fixed target app.
///
/// Switching away records the departing app on the previous-app stack so a
/// [`PreviousApp`] action can return to it.  Requesting the app already in
/// focus does nothing and leaves the stack untouched.
pub struct SwitchApp {
    target: AppId,
}

impl SwitchApp {
    pub fn new(target: AppId) -> Self {
        Self { target }
    }
}

impl Action for SwitchApp {
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        if self.target == ctx.current {
            return None;
        }
        ctx.settings.push_previous_app(ctx.current);
        Some(SwitchRequest { target: self.target })
    }
}

/// Returns to the most recently stacked app.
///
/// An empty stack is a silent no-op; back keys stay harmless on the home
/// app.
pub struct PreviousApp;

impl Action for PreviousApp {
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        ctx.settings.pop_previous_app().map(|target| SwitchRequest { target })
    }
}

/// Delegates to one of several actions based on a text setting.
///
/// Selection per event: an override registered for the current value wins;
/// an override registered as disabled suppresses the action entirely; any
/// other value, or a missing or non-text setting, runs the default.
pub struct SettingsDependent {
    setting: String,
    default: Box<dyn Action>,
    overrides: HashMap<String, Option<Box<dyn Action>>>,
}

impl SettingsDependent {
    pub fn new(setting: impl Into<String>, default: impl Action + 'static) -> Self {
        Self {
            setting: setting.into(),
            default: Box::new(default),
            overrides: HashMap::new(),
        }
    }

    /// Registers an override for one setting value.
    pub fn when(mut self, value: impl Into<String>, action: impl Action + 'static) -> Self {
        self.overrides.insert(value.into(), Some(Box::new(action)));
        self
    }

    /// Suppresses the action for one setting value.
    pub fn disabled_when(mut self, value: impl Into<String>) -> Self {
        self.overrides.insert(value.into(), None);
        self
    }

    fn select<'a>(&'a self, settings: &Settings) -> Option<&'a dyn Action> {
        match settings.get_text(&self.setting).and_then(|value| self.overrides.get(value)) {
            Some(entry) => entry.as_deref(),
            None => Some(self.default.as_ref()),
        }
    }
}

impl Action for SettingsDependent {
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        match self.select(ctx.settings) {
            Some(action) => action.execute(ctx),
            None => None,
        }
    }

    fn undo(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        match self.select(ctx.settings) {
            Some(action) => action.undo(ctx),
            None => None,
        }
    }
}

/// A [`SettingsDependent`] keyed on the host OS setting.
///
/// The canonical use is chords that differ between macOS, Windows, and
/// Linux.
pub struct MacroAction {
    inner: SettingsDependent,
}

impl MacroAction {
    pub fn new(default: impl Action + 'static) -> Self {
        Self { inner: SettingsDependent::new(OS_SETTING, default) }
    }

    /// Overrides the action for one host OS.
    pub fn on(mut self, os: HostOs, action: impl Action + 'static) -> Self {
        self.inner = self.inner.when(os.as_setting_value(), action);
        self
    }

    /// Suppresses the action for one host OS.
    pub fn disabled_on(mut self, os: HostOs) -> Self {
        self.inner = self.inner.disabled_when(os.as_setting_value());
        self
    }
}

impl Action for MacroAction {
    fn execute(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        self.inner.execute(ctx)
    }

    fn undo(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        self.inner.undo(ctx)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
