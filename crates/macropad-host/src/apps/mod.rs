//! Bundled app layouts.
//!
//! Each module exposes a `layout()` function returning the declarative
//! [`Layout`](macropad_core::Layout) for one app.  Slot numbering is
//! left-to-right, top-to-bottom across the 4×3 key grid:
//!
//! ```text
//!  0  1  2
//!  3  4  5
//!  6  7  8
//!  9 10 11
//! ```
//!
//! Switcher keys need the target app ids, which only exist after
//! registration.  The wiring order in `main` is therefore: register every
//! switch target first, collect the ids into [`SwitchTargets`], then build
//! the home layout last.

use macropad_core::{App, AppId, AppRegistry, LayoutError};

pub mod func;
pub mod home;
pub mod macro_settings;
pub mod nav;
pub mod numpad;

/// Registered ids of the apps the home screen switches to.
#[derive(Debug, Clone, Copy)]
pub struct SwitchTargets {
    pub settings: AppId,
    pub numpad: AppId,
    pub nav: AppId,
    pub func: AppId,
}

/// The fully wired bundled registry.
pub struct Bundle {
    pub registry: AppRegistry,
    /// Id of the home app, the initial focus.
    pub home: AppId,
    pub targets: SwitchTargets,
}

/// Registers every bundled app and returns the wired registry.
///
/// # Errors
///
/// Returns [`LayoutError`] if any bundled layout fails to build.
pub fn bundle() -> Result<Bundle, LayoutError> {
    let mut registry = AppRegistry::new();
    let targets = SwitchTargets {
        settings: registry.register(App::new(macro_settings::layout()?)),
        numpad: registry.register(App::new(numpad::layout()?)),
        nav: registry.register(App::new(nav::layout()?)),
        func: registry.register(App::new(func::layout()?)),
    };
    let home = registry.register(App::new(home::layout(&targets)?));
    Ok(Bundle { registry, home, targets })
}
