//! Macropad host entry point.
//!
//! Wires the terminal simulator to the engine dispatcher and runs the tick
//! loop until stdin closes or a quit command arrives.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ config::load()           -- macropad.toml, defaults when absent
//!  └─ TerminalMacropad::spawn  -- stdin reader thread
//!  └─ AppRegistry              -- settings, numpad, nav, func, then home
//!  └─ Dispatcher               -- start() paints home; step() once per tick
//! ```
//!
//! The config file path may be given as the first argument; otherwise
//! `macropad.toml` in the working directory is used.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use macropad_core::{App, Dispatcher, Layout, Settings};
use macropad_host::apps::{self, home, Bundle};
use macropad_host::config;
use macropad_host::infrastructure::TerminalMacropad;

fn main() -> anyhow::Result<()> {
    // Load configuration first: it supplies the default log filter.
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("macropad.toml"));
    let config = config::load(&config_path)
        .with_context(|| format!("loading config from {}", config_path.display()))?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.general.log_filter.clone())),
        )
        .init();

    info!("macropad host starting (OS {:?})", config.general.host_os);

    // ── Settings ──────────────────────────────────────────────────────────────
    let mut settings = Settings::new();
    settings.set_host_os(config.general.host_os);
    settings.set_pixel_timeout(config.pixels.timeout());

    // ── App registry ──────────────────────────────────────────────────────────
    let Bundle { registry, home: home_id, targets } =
        apps::bundle().context("building the bundled app layouts")?;

    // ── Device and dispatcher ─────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let device = TerminalMacropad::spawn(Arc::clone(&running))
        .context("spawning the stdin reader thread")?;

    let default_factory = move || {
        home::layout(&targets)
            .map(App::new)
            .unwrap_or_else(|_| App::new(Layout::empty("Home")))
    };
    let mut dispatcher = Dispatcher::new(device, settings, registry, home_id, default_factory)
        .context("building the dispatcher")?;
    dispatcher.start();

    info!("ready.  Input: p/r/t/d <slot>, + and - to rotate, b/bd/bu for the knob, q to quit.");

    // ── Tick loop ─────────────────────────────────────────────────────────────
    let tick = Duration::from_millis(config.general.tick_sleep_ms);
    while running.load(Ordering::Relaxed) {
        dispatcher.step();
        std::thread::sleep(tick);
    }

    info!("macropad host stopped");
    Ok(())
}
