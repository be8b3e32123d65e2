//! TOML configuration for the host binary.
//!
//! The host reads a single `macropad.toml` from the working directory (or a
//! path given on the command line).  Example:
//!
//! ```toml
//! [general]
//! host_os = "MAC"
//! log_filter = "info"
//! tick_sleep_ms = 10
//!
//! [pixels]
//! timeout_minutes = 20
//! ```
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent from the TOML file, so the binary
//! runs correctly with no config file at all and with partial files that only
//! override one or two settings.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use macropad_core::HostOs;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level host configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pixels: PixelConfig,
}

/// General host behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// The operating system the pad is plugged into: `"MAC"`, `"WIN"`, `"LIN"`.
    ///
    /// Seeds the OS setting at startup; the settings app can change it at
    /// runtime.
    #[serde(default = "default_host_os")]
    pub host_os: HostOs,
    /// `tracing` filter directive used when `RUST_LOG` is unset, e.g.
    /// `"info"` or `"macropad_core=debug,info"`.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Sleep between engine ticks, in milliseconds.
    #[serde(default = "default_tick_sleep_ms")]
    pub tick_sleep_ms: u64,
}

/// LED inactivity blanking settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PixelConfig {
    /// Minutes of inactivity before the LEDs go dark.  `0` disables blanking.
    #[serde(default = "default_timeout_minutes")]
    pub timeout_minutes: u64,
}

impl PixelConfig {
    /// The blanking timeout as the engine expects it: `None` when disabled.
    pub fn timeout(&self) -> Option<Duration> {
        if self.timeout_minutes == 0 {
            None
        } else {
            Some(Duration::from_secs(self.timeout_minutes * 60))
        }
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_host_os() -> HostOs {
    HostOs::Windows
}
fn default_log_filter() -> String {
    "info".to_string()
}
fn default_tick_sleep_ms() -> u64 {
    10
}
fn default_timeout_minutes() -> u64 {
    20
}

impl Default for HostConfig {
    fn default() -> Self {
        Self { general: GeneralConfig::default(), pixels: PixelConfig::default() }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host_os: default_host_os(),
            log_filter: default_log_filter(),
            tick_sleep_ms: default_tick_sleep_ms(),
        }
    }
}

impl Default for PixelConfig {
    fn default() -> Self {
        Self { timeout_minutes: default_timeout_minutes() }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Loads [`HostConfig`] from `path`, returning `HostConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load(path: &Path) -> Result<HostConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: HostConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HostConfig::default()),
        Err(e) => Err(ConfigError::Io { path: path.to_path_buf(), source: e }),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
