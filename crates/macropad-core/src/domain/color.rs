//! Color references and the named color scheme.
//!
//! Layouts rarely spell out raw RGB values.  A binding usually names a scheme
//! entry ("nav", "media"), and the active [`ColorScheme`] resolves the name
//! when the LEDs are painted.  Scheme entries may alias other entries, so a
//! whole layout family can be re-themed by redefining a handful of names.

use std::collections::HashMap;

/// Maximum scheme lookups performed while resolving one name.
///
/// Poorly-formed schemes (cycles, over-long alias chains) resolve to black
/// instead of looping.
pub const MAX_ALIAS_HOPS: usize = 5;

/// The muted default palette, `color-1` through `color-10`.
const PALETTE: [u32; 10] = [
    0x4D0204, 0x431A04, 0x442602, 0x4E1C02, 0x4F3803, 0x243417, 0x112A22, 0x132423, 0x161D24,
    0x0A1F28,
];

/// Semantic names pointing into the palette.
const ALIASES: [(&str, &str); 8] = [
    ("nav", "color-3"),
    ("func", "color-4"),
    ("media", "color-6"),
    ("numpad", "color-2"),
    ("apps", "color-7"),
    ("winman", "color-9"),
    ("alert", "color-1"),
    ("back", "color-5"),
];

/// Brand colors for the host platforms, used by OS indicator keys.
const PLATFORM_COLORS: [(&str, u32); 3] = [
    ("mac", 0x555555),
    ("windows", 0x00A4EF),
    ("linux", 0x25D366),
];

/// A color as written in a layout: either a concrete RGB value or the name
/// of a scheme entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Color {
    /// Packed `0xRRGGBB`.
    Rgb(u32),
    /// Resolved through the active [`ColorScheme`] at paint time.
    Named(String),
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Color::Rgb(value)
    }
}

impl From<&str> for Color {
    fn from(name: &str) -> Self {
        Color::Named(name.to_owned())
    }
}

impl From<String> for Color {
    fn from(name: String) -> Self {
        Color::Named(name)
    }
}

/// Named palette with alias support.
///
/// Entry values are themselves [`Color`]s, so an entry can either hold an RGB
/// value or point at another entry by name.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    entries: HashMap<String, Color>,
}

impl ColorScheme {
    /// A scheme with no entries.  Every name resolves to black.
    pub fn empty() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Adds or replaces an entry.
    pub fn set(&mut self, name: impl Into<String>, color: impl Into<Color>) {
        self.entries.insert(name.into(), color.into());
    }

    /// Resolves a name to a packed RGB value.
    ///
    /// Follows aliases for at most [`MAX_ALIAS_HOPS`] lookups.  Missing names
    /// and over-long chains resolve to black.
    pub fn resolve(&self, name: &str) -> u32 {
        let mut current = name;
        for _ in 0..MAX_ALIAS_HOPS {
            match self.entries.get(current) {
                Some(Color::Rgb(value)) => return *value,
                Some(Color::Named(next)) => current = next,
                None => return 0x000000,
            }
        }
        0x000000
    }
}

impl Default for ColorScheme {
    /// The built-in palette plus semantic and platform aliases.
    fn default() -> Self {
        let mut scheme = Self::empty();
        for (index, value) in PALETTE.iter().enumerate() {
            scheme.set(format!("color-{}", index + 1), *value);
        }
        for (name, target) in ALIASES {
            scheme.set(name, target);
        }
        for (name, value) in PLATFORM_COLORS {
            scheme.set(name, value);
        }
        scheme
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
