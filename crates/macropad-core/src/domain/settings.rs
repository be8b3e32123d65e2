//! The shared settings store and its well-known keys.
//!
//! A single [`Settings`] instance lives inside the dispatcher and is handed
//! to every action, binding, and timer callback through their context.  Apps
//! communicate through it: a select key in one app writes the host OS, a
//! macro key in another reads it back on its next press.
//!
//! Arbitrary state goes in the free-form string-keyed map.  State the engine
//! itself depends on (host OS, the previous-app stack, pixel power state,
//! the color scheme) has typed accessors; the host OS accessor reads and
//! writes the map under [`OS_SETTING`] so select keys and typed callers
//! always agree.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::color::{Color, ColorScheme};

/// Well-known key holding the host operating system wire value
/// (`"MAC"`, `"WIN"`, or `"LIN"`).
pub const OS_SETTING: &str = "OS";

/// Pixel inactivity timeout applied when the host does not configure one.
const DEFAULT_PIXEL_TIMEOUT: Duration = Duration::from_secs(20 * 60);

/// Opaque handle to an app held by the dispatcher's registry.
///
/// Ids are assigned at registration and never reused, so a stale id on the
/// previous-app stack can be detected rather than silently hitting the
/// wrong app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AppId(usize);

impl AppId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// Registration index of this app.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The operating system of the machine the pad is plugged into.
///
/// Macro keys and settings-dependent actions pick their behavior from this.
/// Serialized with the same wire values the settings map uses, so a host
/// config file can say `host_os = "MAC"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostOs {
    #[serde(rename = "MAC")]
    Mac,
    #[serde(rename = "WIN")]
    Windows,
    #[serde(rename = "LIN")]
    Linux,
}

impl HostOs {
    /// The string stored under [`OS_SETTING`].
    pub fn as_setting_value(self) -> &'static str {
        match self {
            HostOs::Mac => "MAC",
            HostOs::Windows => "WIN",
            HostOs::Linux => "LIN",
        }
    }

    /// Parses a settings-map value back into a typed OS.
    pub fn from_setting_value(value: &str) -> Option<Self> {
        match value {
            "MAC" => Some(HostOs::Mac),
            "WIN" => Some(HostOs::Windows),
            "LIN" => Some(HostOs::Linux),
            _ => None,
        }
    }
}

/// A value in the free-form settings map.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingValue {
    Text(String),
    Integer(i64),
    Flag(bool),
}

impl SettingValue {
    /// The contained text, if this is a [`SettingValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SettingValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Text(text) => write!(f, "{text}"),
            SettingValue::Integer(value) => write!(f, "{value}"),
            SettingValue::Flag(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for SettingValue {
    fn from(text: &str) -> Self {
        SettingValue::Text(text.to_owned())
    }
}

impl From<String> for SettingValue {
    fn from(text: String) -> Self {
        SettingValue::Text(text)
    }
}

impl From<i64> for SettingValue {
    fn from(value: i64) -> Self {
        SettingValue::Integer(value)
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Flag(value)
    }
}

/// Shared state reachable from every app, action, and timer callback.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    values: HashMap<String, SettingValue>,
    previous_apps: Vec<AppId>,
    scheme: ColorScheme,
    pixel_timeout: Option<Duration>,
    pixels_disabled: bool,
}

impl Settings {
    pub fn new() -> Self {
        // The OS key is always present so map-level readers (select keys,
        // settings-dependent actions) and the typed accessor agree.
        let mut values = HashMap::new();
        values.insert(
            OS_SETTING.to_owned(),
            SettingValue::Text(HostOs::Windows.as_setting_value().to_owned()),
        );
        Self {
            values,
            previous_apps: Vec::new(),
            scheme: ColorScheme::default(),
            pixel_timeout: Some(DEFAULT_PIXEL_TIMEOUT),
            pixels_disabled: false,
        }
    }

    // ── Free-form values ──────────────────────────────────────────────────────

    pub fn get(&self, key: &str) -> Option<&SettingValue> {
        self.values.get(key)
    }

    /// The text under `key`, if present and textual.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(SettingValue::as_text)
    }

    pub fn put(&mut self, key: impl Into<String>, value: impl Into<SettingValue>) {
        self.values.insert(key.into(), value.into());
    }

    // ── Host OS ───────────────────────────────────────────────────────────────

    /// The current host OS, defaulting to Windows when the map holds no
    /// recognizable value.
    pub fn host_os(&self) -> HostOs {
        self.get_text(OS_SETTING)
            .and_then(HostOs::from_setting_value)
            .unwrap_or(HostOs::Windows)
    }

    pub fn set_host_os(&mut self, os: HostOs) {
        self.put(OS_SETTING, os.as_setting_value());
    }

    // ── Previous-app stack ────────────────────────────────────────────────────

    /// Records `app` as the place to return to on the next "previous app"
    /// action.
    pub fn push_previous_app(&mut self, app: AppId) {
        self.previous_apps.push(app);
    }

    /// Pops the most recently recorded app, or `None` when the stack is
    /// empty.
    pub fn pop_previous_app(&mut self) -> Option<AppId> {
        self.previous_apps.pop()
    }

    pub fn previous_app_depth(&self) -> usize {
        self.previous_apps.len()
    }

    // ── Pixels ────────────────────────────────────────────────────────────────

    /// Inactivity window after which the LEDs are darkened.  `None` disables
    /// the timeout entirely.
    pub fn pixel_timeout(&self) -> Option<Duration> {
        self.pixel_timeout
    }

    pub fn set_pixel_timeout(&mut self, timeout: Option<Duration>) {
        self.pixel_timeout = timeout;
    }

    /// Whether the LEDs are currently dark due to inactivity.
    pub fn pixels_disabled(&self) -> bool {
        self.pixels_disabled
    }

    pub fn set_pixels_disabled(&mut self, disabled: bool) {
        self.pixels_disabled = disabled;
    }

    // ── Colors ────────────────────────────────────────────────────────────────

    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    pub fn scheme_mut(&mut self) -> &mut ColorScheme {
        &mut self.scheme
    }

    /// Resolves a binding color to a packed RGB value through the active
    /// scheme.
    pub fn color(&self, color: &Color) -> u32 {
        match color {
            Color::Rgb(value) => *value,
            Color::Named(name) => self.scheme.resolve(name),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_os_defaults_to_windows() {
        let settings = Settings::new();
        assert_eq!(settings.host_os(), HostOs::Windows);
    }

    #[test]
    fn test_host_os_reads_value_written_through_the_map() {
        // A select key writes the raw wire value; the typed accessor must see it.
        let mut settings = Settings::new();
        settings.put(OS_SETTING, "MAC");
        assert_eq!(settings.host_os(), HostOs::Mac);
    }

    #[test]
    fn test_set_host_os_is_visible_through_the_map() {
        let mut settings = Settings::new();
        settings.set_host_os(HostOs::Linux);
        assert_eq!(settings.get_text(OS_SETTING), Some("LIN"));
    }

    #[test]
    fn test_host_os_with_garbage_value_falls_back_to_windows() {
        let mut settings = Settings::new();
        settings.put(OS_SETTING, "BEOS");
        assert_eq!(settings.host_os(), HostOs::Windows);
    }

    #[test]
    fn test_put_and_get_round_trip() {
        let mut settings = Settings::new();
        settings.put("brightness", 7i64);
        assert_eq!(settings.get("brightness"), Some(&SettingValue::Integer(7)));
    }

    #[test]
    fn test_get_text_ignores_non_text_values() {
        let mut settings = Settings::new();
        settings.put("muted", true);
        assert_eq!(settings.get_text("muted"), None);
    }

    #[test]
    fn test_previous_app_stack_pops_in_reverse_push_order() {
        let mut settings = Settings::new();
        settings.push_previous_app(AppId::new(0));
        settings.push_previous_app(AppId::new(2));
        assert_eq!(settings.pop_previous_app(), Some(AppId::new(2)));
        assert_eq!(settings.pop_previous_app(), Some(AppId::new(0)));
        assert_eq!(settings.pop_previous_app(), None);
    }

    #[test]
    fn test_color_resolves_named_through_scheme() {
        let settings = Settings::new();
        assert_eq!(settings.color(&Color::Named("color-2".into())), 0x431A04);
    }

    #[test]
    fn test_color_passes_rgb_through_unchanged() {
        let settings = Settings::new();
        assert_eq!(settings.color(&Color::Rgb(0xDEAD00)), 0xDEAD00);
    }

    #[test]
    fn test_pixel_timeout_has_a_default() {
        let settings = Settings::new();
        assert_eq!(settings.pixel_timeout(), Some(Duration::from_secs(20 * 60)));
    }

    #[test]
    fn test_setting_value_display_matches_contents() {
        assert_eq!(SettingValue::Text("WIN".into()).to_string(), "WIN");
        assert_eq!(SettingValue::Integer(-3).to_string(), "-3");
        assert_eq!(SettingValue::Flag(true).to_string(), "true");
    }
}
