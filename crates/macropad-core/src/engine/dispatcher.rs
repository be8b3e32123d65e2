//! Focus dispatch: the loop that owns the device and routes events.
//!
//! The dispatcher owns every long-lived engine piece: the device, the
//! event source, the timer registry, the settings store, and the app
//! registry.  Each [`step`](Dispatcher::step) polls one batch and hands
//! the events to the focused app.  Focus is re-read per event, so a switch
//! mid-batch routes the rest of the batch to the incoming app.

use thiserror::Error;
use tracing::{info, warn};

use crate::action::{EngineContext, SwitchRequest};
use crate::device::Macropad;
use crate::domain::settings::{AppId, Settings};
use crate::engine::source::EventSource;
use crate::engine::timer::TimerRegistry;
use crate::layout::App;

/// Registered apps, addressed by the [`AppId`] handed out at registration.
pub struct AppRegistry {
    apps: Vec<App>,
}

impl AppRegistry {
    pub fn new() -> Self {
        Self { apps: Vec::new() }
    }

    /// Adds an app and returns its permanent id.
    ///
    /// Switcher layouts capture the returned id, so apps that are switch
    /// targets must be registered before the layouts that point at them.
    pub fn register(&mut self, app: App) -> AppId {
        let id = AppId::new(self.apps.len());
        self.apps.push(app);
        id
    }

    pub fn get(&self, id: AppId) -> Option<&App> {
        self.apps.get(id.index())
    }

    pub fn contains(&self, id: AppId) -> bool {
        id.index() < self.apps.len()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

impl Default for AppRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors constructing a [`Dispatcher`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    #[error("app registry is empty")]
    EmptyRegistry,
    #[error("unknown app id {0}")]
    UnknownApp(AppId),
}

/// Owns the engine state and drives focus dispatch.
///
/// The host builds one dispatcher around its concrete device, calls
/// [`start`](Dispatcher::start) once, then calls [`step`](Dispatcher::step)
/// from its tick loop.
pub struct Dispatcher<D: Macropad> {
    device: D,
    source: EventSource,
    timers: TimerRegistry,
    settings: Settings,
    registry: AppRegistry,
    current: AppId,
    default_factory: Box<dyn Fn() -> App>,
}

impl<D: Macropad> Dispatcher<D> {
    /// Builds a dispatcher focused on `initial`.
    ///
    /// `default_factory` builds the app registered in place of a switch
    /// target the registry does not know.
    pub fn new(
        mut device: D,
        settings: Settings,
        registry: AppRegistry,
        initial: AppId,
        default_factory: impl Fn() -> App + 'static,
    ) -> Result<Self, DispatchError> {
        if registry.is_empty() {
            return Err(DispatchError::EmptyRegistry);
        }
        if !registry.contains(initial) {
            return Err(DispatchError::UnknownApp(initial));
        }
        let source = EventSource::new(&mut device);
        Ok(Self {
            device,
            source,
            timers: TimerRegistry::new(),
            settings,
            registry,
            current: initial,
            default_factory: Box::new(default_factory),
        })
    }

    /// The app currently holding focus.
    pub fn current(&self) -> AppId {
        self.current
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }

    /// Enters the initial app: paints it and installs its double-tap set.
    pub fn start(&mut self) {
        self.enter_focus();
    }

    /// Polls one batch and dispatches it.  Returns the number of events
    /// handled.
    pub fn step(&mut self) -> usize {
        let events = self.source.poll(&mut self.device, &mut self.timers, &mut self.settings);
        let handled = events.len();
        for event in events {
            let Some(app) = self.registry.get(self.current) else {
                break;
            };
            let mut ctx = EngineContext {
                device: &mut self.device,
                settings: &mut self.settings,
                timers: &mut self.timers,
                current: self.current,
            };
            let request = app.handle_event(&mut ctx, event);
            if let Some(SwitchRequest { target }) = request {
                self.focus(target);
            }
        }
        handled
    }

    /// Moves focus to `target`.  An unknown target registers a fresh
    /// default app and focuses that instead.
    fn focus(&mut self, target: AppId) {
        if self.registry.contains(target) {
            self.current = target;
        } else {
            warn!("switch requested to unknown app {target}, falling back to the default app");
            let fallback = (self.default_factory)();
            self.current = self.registry.register(fallback);
        }
        self.enter_focus();
    }

    fn enter_focus(&mut self) {
        let Some(app) = self.registry.get(self.current) else {
            return;
        };
        info!("focusing app {:?} ({})", app.name(), self.current);
        let mut ctx = EngineContext {
            device: &mut self.device,
            settings: &mut self.settings,
            timers: &mut self.timers,
            current: self.current,
        };
        app.on_focus(&mut ctx);
        let slots: Vec<usize> = app.double_tap_slots().to_vec();
        self.source.track(slots, &mut self.timers);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
