//! Apps and key layouts.
//!
//! A [`Layout`] is the immutable template for one app: which binding sits
//! in each of the 12 slots and what the encoder does.  An [`App`] wraps a
//! layout into the live instance the dispatcher focuses.
//!
//! Layouts are assembled through [`Layout::builder`], which defers slot
//! errors until [`LayoutBuilder::build`] so definitions read as one chain.

use std::rc::Rc;

use thiserror::Error;

use crate::action::Action;
use crate::domain::event::KEY_COUNT;

pub mod app;
pub mod binding;

pub use app::App;

use binding::KeyBinding;

/// Errors raised while assembling a [`Layout`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// A binding was assigned to a slot outside `0..KEY_COUNT`.
    #[error("key slot {0} is out of range (layout has {KEY_COUNT} slots)")]
    SlotOutOfRange(usize),
}

/// Immutable description of what the pad does while one app has focus.
pub struct Layout {
    name: String,
    keys: [Option<Rc<dyn KeyBinding>>; KEY_COUNT],
    encoder_button: Option<Box<dyn Action>>,
    encoder_increase: Option<Box<dyn Action>>,
    encoder_decrease: Option<Box<dyn Action>>,
}

impl Layout {
    /// Starts building a layout with every slot empty.
    pub fn builder(name: impl Into<String>) -> LayoutBuilder {
        LayoutBuilder {
            name: name.into(),
            keys: std::array::from_fn(|_| None),
            encoder_button: None,
            encoder_increase: None,
            encoder_decrease: None,
            error: None,
        }
    }

    /// A layout with no bindings at all.
    ///
    /// Infallible, so it can serve as the last-resort fallback when a
    /// configured layout fails to build.
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keys: std::array::from_fn(|_| None),
            encoder_button: None,
            encoder_increase: None,
            encoder_decrease: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn key(&self, slot: usize) -> Option<&Rc<dyn KeyBinding>> {
        self.keys.get(slot).and_then(Option::as_ref)
    }

    pub(crate) fn encoder_button(&self) -> Option<&dyn Action> {
        self.encoder_button.as_deref()
    }

    pub(crate) fn encoder_increase(&self) -> Option<&dyn Action> {
        self.encoder_increase.as_deref()
    }

    pub(crate) fn encoder_decrease(&self) -> Option<&dyn Action> {
        self.encoder_decrease.as_deref()
    }
}

/// Chained builder for [`Layout`].
///
/// Slot errors are recorded instead of panicking and reported by
/// [`build`](LayoutBuilder::build); only the first error survives.
pub struct LayoutBuilder {
    name: String,
    keys: [Option<Rc<dyn KeyBinding>>; KEY_COUNT],
    encoder_button: Option<Box<dyn Action>>,
    encoder_increase: Option<Box<dyn Action>>,
    encoder_decrease: Option<Box<dyn Action>>,
    error: Option<LayoutError>,
}

impl LayoutBuilder {
    /// Assigns a binding to a slot.  Assigning the same slot twice keeps
    /// the later binding.
    pub fn key(mut self, slot: usize, binding: impl KeyBinding + 'static) -> Self {
        match self.keys.get_mut(slot) {
            Some(entry) => *entry = Some(Rc::new(binding)),
            None => {
                if self.error.is_none() {
                    self.error = Some(LayoutError::SlotOutOfRange(slot));
                }
            }
        }
        self
    }

    /// Sets the action run while the encoder button is held.
    pub fn encoder_button(mut self, action: impl Action + 'static) -> Self {
        self.encoder_button = Some(Box::new(action));
        self
    }

    /// Sets the action run per clockwise encoder detent.
    pub fn encoder_increase(mut self, action: impl Action + 'static) -> Self {
        self.encoder_increase = Some(Box::new(action));
        self
    }

    /// Sets the action run per counter-clockwise encoder detent.
    pub fn encoder_decrease(mut self, action: impl Action + 'static) -> Self {
        self.encoder_decrease = Some(Box::new(action));
        self
    }

    /// Finishes the layout, reporting the first slot error recorded.
    pub fn build(self) -> Result<Layout, LayoutError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(Layout {
            name: self.name,
            keys: self.keys,
            encoder_button: self.encoder_button,
            encoder_increase: self.encoder_increase,
            encoder_decrease: self.encoder_decrease,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
