//! Key bindings: what a slot shows and what it does.
//!
//! A binding is pure behavior plus appearance.  It owns no display or LED
//! state; the app paints labels and colors *from* the binding into the
//! device whenever focus changes or a linked setting is written.
//!
//! Bindings are shared `Rc`s between the layout template and the live
//! app, so every method takes `&self`.  Mutable state belongs in the
//! settings store or the device.

use std::collections::HashMap;

use crate::action::{Action, EngineContext, SwitchRequest};
use crate::domain::color::Color;
use crate::domain::settings::{HostOs, SettingValue, Settings};

/// Pixel color painted while a macro key is held down.
const HELD_FLASH_COLOR: u32 = 0xFFFFFF;

/// Behavior and appearance of one key slot.
pub trait KeyBinding {
    /// Label painted above the slot.
    fn label(&self, settings: &Settings) -> String;

    /// LED color for the slot, resolved to packed RGB.
    fn color(&self, settings: &Settings) -> u32;

    /// Press behavior.
    fn on_press(&self, ctx: &mut EngineContext<'_>, slot: usize) -> Option<SwitchRequest>;

    /// Release behavior.
    fn on_release(&self, ctx: &mut EngineContext<'_>, slot: usize) -> Option<SwitchRequest>;

    /// Double-tap press behavior.  Only reachable when
    /// [`has_double_tap`](KeyBinding::has_double_tap) reports `true`.
    fn on_double_tap(&self, ctx: &mut EngineContext<'_>, slot: usize) -> Option<SwitchRequest> {
        let _ = (ctx, slot);
        None
    }

    /// Double-tap release behavior.
    fn on_double_tap_release(
        &self,
        ctx: &mut EngineContext<'_>,
        slot: usize,
    ) -> Option<SwitchRequest> {
        let _ = (ctx, slot);
        None
    }

    /// Whether this slot needs double-tap tracking while its app has
    /// focus.
    fn has_double_tap(&self) -> bool {
        false
    }

    /// The setting whose writes should repaint this key (and its linked
    /// siblings) immediately, without waiting for a focus change.
    fn setting_link(&self) -> Option<&str> {
        None
    }
}

// ── Key ───────────────────────────────────────────────────────────────────────

/// A plain labeled key running one action, with an optional second action
/// on double tap.
pub struct Key {
    label: String,
    color: Color,
    action: Option<Box<dyn Action>>,
    double_tap: Option<Box<dyn Action>>,
}

impl Key {
    pub fn new(
        label: impl Into<String>,
        color: impl Into<Color>,
        action: impl Action + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            action: Some(Box::new(action)),
            double_tap: None,
        }
    }

    /// A key with appearance but no behavior.
    pub fn inert(label: impl Into<String>, color: impl Into<Color>) -> Self {
        Self { label: label.into(), color: color.into(), action: None, double_tap: None }
    }

    /// Adds a double-tap action.
    pub fn double_tap(mut self, action: impl Action + 'static) -> Self {
        self.double_tap = Some(Box::new(action));
        self
    }
}

impl KeyBinding for Key {
    fn label(&self, _settings: &Settings) -> String {
        self.label.clone()
    }

    fn color(&self, settings: &Settings) -> u32 {
        settings.color(&self.color)
    }

    fn on_press(&self, ctx: &mut EngineContext<'_>, _slot: usize) -> Option<SwitchRequest> {
        self.action.as_deref().and_then(|action| action.execute(ctx))
    }

    fn on_release(&self, ctx: &mut EngineContext<'_>, _slot: usize) -> Option<SwitchRequest> {
        self.action.as_deref().and_then(|action| action.undo(ctx))
    }

    fn on_double_tap(&self, ctx: &mut EngineContext<'_>, _slot: usize) -> Option<SwitchRequest> {
        self.double_tap.as_deref().and_then(|action| action.execute(ctx))
    }

    fn on_double_tap_release(
        &self,
        ctx: &mut EngineContext<'_>,
        _slot: usize,
    ) -> Option<SwitchRequest> {
        self.double_tap.as_deref().and_then(|action| action.undo(ctx))
    }

    fn has_double_tap(&self) -> bool {
        self.double_tap.is_some()
    }
}

// ── MacroKey ──────────────────────────────────────────────────────────────────

/// A key whose action depends on the host OS.
///
/// The slot flashes white while held, restoring its configured color on
/// release.  An OS without an override falls back to the default action;
/// an OS registered as disabled renders blank, stays dark, and ignores
/// presses.
pub struct MacroKey {
    label: String,
    color: Color,
    default: Option<Box<dyn Action>>,
    overrides: HashMap<HostOs, Option<Box<dyn Action>>>,
    double_tap: Option<Box<dyn Action>>,
}

impl MacroKey {
    pub fn new(
        label: impl Into<String>,
        color: impl Into<Color>,
        default: impl Action + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            default: Some(Box::new(default)),
            overrides: HashMap::new(),
            double_tap: None,
        }
    }

    /// Overrides the action for one host OS.
    pub fn on(mut self, os: HostOs, action: impl Action + 'static) -> Self {
        self.overrides.insert(os, Some(Box::new(action)));
        self
    }

    /// Disables the key for one host OS.
    pub fn disabled_on(mut self, os: HostOs) -> Self {
        self.overrides.insert(os, None);
        self
    }

    /// Adds a double-tap action, shared by all host OSes.
    pub fn double_tap(mut self, action: impl Action + 'static) -> Self {
        self.double_tap = Some(Box::new(action));
        self
    }

    fn current<'a>(&'a self, settings: &Settings) -> Option<&'a dyn Action> {
        match self.overrides.get(&settings.host_os()) {
            Some(entry) => entry.as_deref(),
            None => self.default.as_deref(),
        }
    }
}

impl KeyBinding for MacroKey {
    fn label(&self, settings: &Settings) -> String {
        if self.current(settings).is_some() {
            self.label.clone()
        } else {
            String::new()
        }
    }

    fn color(&self, settings: &Settings) -> u32 {
        if self.current(settings).is_some() {
            settings.color(&self.color)
        } else {
            0x000000
        }
    }

    fn on_press(&self, ctx: &mut EngineContext<'_>, slot: usize) -> Option<SwitchRequest> {
        if self.current(ctx.settings).is_none() {
            return None;
        }
        ctx.device.set_pixel(slot, HELD_FLASH_COLOR);
        ctx.device.show_pixels();
        match self.current(ctx.settings) {
            Some(action) => action.execute(ctx),
            None => None,
        }
    }

    fn on_release(&self, ctx: &mut EngineContext<'_>, slot: usize) -> Option<SwitchRequest> {
        if self.current(ctx.settings).is_none() {
            return None;
        }
        let request = match self.current(ctx.settings) {
            Some(action) => action.undo(ctx),
            None => None,
        };
        let color = self.color(ctx.settings);
        ctx.device.set_pixel(slot, color);
        ctx.device.show_pixels();
        request
    }

    fn on_double_tap(&self, ctx: &mut EngineContext<'_>, _slot: usize) -> Option<SwitchRequest> {
        self.double_tap.as_deref().and_then(|action| action.execute(ctx))
    }

    fn on_double_tap_release(
        &self,
        ctx: &mut EngineContext<'_>,
        _slot: usize,
    ) -> Option<SwitchRequest> {
        self.double_tap.as_deref().and_then(|action| action.undo(ctx))
    }

    fn has_double_tap(&self) -> bool {
        self.double_tap.is_some()
    }
}

// ── SettingsValueKey ──────────────────────────────────────────────────────────

/// A key displaying the current value of a setting.
///
/// The label template substitutes `{value}`; a text map can rename
/// specific values and a color map picks the LED color by value (named
/// colors resolve through the scheme).  Unmapped values stay dark.
pub struct SettingsValueKey {
    setting: String,
    template: String,
    text_map: HashMap<String, String>,
    color_map: HashMap<String, Color>,
    action: Option<Box<dyn Action>>,
}

impl SettingsValueKey {
    pub fn new(setting: impl Into<String>) -> Self {
        Self {
            setting: setting.into(),
            template: "{value}".to_owned(),
            text_map: HashMap::new(),
            color_map: HashMap::new(),
            action: None,
        }
    }

    /// Replaces the label template.  `{value}` expands to the (mapped)
    /// setting value.
    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Renames one raw value for display.
    pub fn map_text(mut self, value: impl Into<String>, shown: impl Into<String>) -> Self {
        self.text_map.insert(value.into(), shown.into());
        self
    }

    /// Assigns an LED color to one raw value.
    pub fn map_color(mut self, value: impl Into<String>, color: impl Into<Color>) -> Self {
        self.color_map.insert(value.into(), color.into());
        self
    }

    /// Adds a press action.
    pub fn action(mut self, action: impl Action + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    fn raw_value(&self, settings: &Settings) -> String {
        settings.get(&self.setting).map(SettingValue::to_string).unwrap_or_default()
    }
}

impl KeyBinding for SettingsValueKey {
    fn label(&self, settings: &Settings) -> String {
        let raw = self.raw_value(settings);
        let shown = self.text_map.get(&raw).cloned().unwrap_or(raw);
        self.template.replace("{value}", &shown)
    }

    fn color(&self, settings: &Settings) -> u32 {
        match self.color_map.get(&self.raw_value(settings)) {
            Some(color) => settings.color(color),
            None => 0x000000,
        }
    }

    fn on_press(&self, ctx: &mut EngineContext<'_>, _slot: usize) -> Option<SwitchRequest> {
        self.action.as_deref().and_then(|action| action.execute(ctx))
    }

    fn on_release(&self, ctx: &mut EngineContext<'_>, _slot: usize) -> Option<SwitchRequest> {
        self.action.as_deref().and_then(|action| action.undo(ctx))
    }

    fn setting_link(&self) -> Option<&str> {
        Some(&self.setting)
    }
}

// ── SettingsSelectKey ─────────────────────────────────────────────────────────

/// A key that writes a fixed value into a setting when pressed.
///
/// While its value is the selected one, the label carries a `>` marker and
/// the LED shows the configured color; otherwise the marker is a space and
/// the LED stays dark.  Pressing any select key repaints every sibling
/// linked to the same setting.
pub struct SettingsSelectKey {
    label: String,
    color: Color,
    setting: String,
    value: SettingValue,
    action: Option<Box<dyn Action>>,
}

impl SettingsSelectKey {
    pub fn new(
        label: impl Into<String>,
        color: impl Into<Color>,
        setting: impl Into<String>,
        value: impl Into<SettingValue>,
    ) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            setting: setting.into(),
            value: value.into(),
            action: None,
        }
    }

    /// Adds an action to run after the setting is written.
    pub fn action(mut self, action: impl Action + 'static) -> Self {
        self.action = Some(Box::new(action));
        self
    }

    fn selected(&self, settings: &Settings) -> bool {
        settings.get(&self.setting) == Some(&self.value)
    }
}

impl KeyBinding for SettingsSelectKey {
    fn label(&self, settings: &Settings) -> String {
        let marker = if self.selected(settings) { '>' } else { ' ' };
        format!("{marker} {}", self.label)
    }

    fn color(&self, settings: &Settings) -> u32 {
        if self.selected(settings) {
            settings.color(&self.color)
        } else {
            0x000000
        }
    }

    fn on_press(&self, ctx: &mut EngineContext<'_>, _slot: usize) -> Option<SwitchRequest> {
        ctx.settings.put(self.setting.clone(), self.value.clone());
        self.action.as_deref().and_then(|action| action.execute(ctx))
    }

    fn on_release(&self, ctx: &mut EngineContext<'_>, _slot: usize) -> Option<SwitchRequest> {
        self.action.as_deref().and_then(|action| action.undo(ctx))
    }

    fn setting_link(&self) -> Option<&str> {
        Some(&self.setting)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
