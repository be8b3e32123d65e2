//! The live app: a layout bound to its slots plus focus and event routing.

use std::rc::Rc;

use super::binding::KeyBinding;
use super::Layout;
use crate::action::{Action, EngineContext, SwitchRequest};
use crate::device::DisplayRegion;
use crate::domain::event::{Event, KeyTransition, KEY_COUNT};
use crate::engine::timer::TimerContext;

/// Timer id for the pixel inactivity timeout.
///
/// Shared by every app: a focus change or any handled event re-arms the
/// same timer, so exactly one countdown exists at a time.
pub const PIXELS_TIMER_ID: &str = "disable pixels timer";

/// A binding attached to its slot in a live app.
struct BoundKey {
    binding: Rc<dyn KeyBinding>,
    slot: usize,
}

impl BoundKey {
    /// Stages this key's current label and color.  The caller flushes with
    /// `refresh_display` / `show_pixels` once the batch is complete.
    fn repaint(&self, ctx: &mut EngineContext<'_>) {
        let label = self.binding.label(ctx.settings);
        let color = self.binding.color(ctx.settings);
        ctx.device.set_display_text(DisplayRegion::KeySlot(self.slot), &label);
        ctx.device.set_pixel(self.slot, color);
    }

    fn press(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        self.binding.on_press(ctx, self.slot)
    }

    fn release(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        self.binding.on_release(ctx, self.slot)
    }

    fn double_tap(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        self.binding.on_double_tap(ctx, self.slot)
    }

    fn double_tap_release(&self, ctx: &mut EngineContext<'_>) -> Option<SwitchRequest> {
        self.binding.on_double_tap_release(ctx, self.slot)
    }

    fn setting_link(&self) -> Option<&str> {
        self.binding.setting_link()
    }
}

/// A focusable instance of a [`Layout`].
///
/// The dispatcher keeps one `App` per registered layout and routes every
/// classified event to whichever one holds focus.  All methods take
/// `&self`: an app owns no mutable state, it reads and writes through the
/// context.
pub struct App {
    layout: Layout,
    keys: Vec<Option<BoundKey>>,
    double_tap_slots: Vec<usize>,
}

impl App {
    pub fn new(layout: Layout) -> Self {
        let keys = (0..KEY_COUNT)
            .map(|slot| {
                layout.key(slot).map(|binding| BoundKey { binding: Rc::clone(binding), slot })
            })
            .collect();
        let double_tap_slots = (0..KEY_COUNT)
            .filter(|&slot| layout.key(slot).is_some_and(|binding| binding.has_double_tap()))
            .collect();
        Self { layout, keys, double_tap_slots }
    }

    pub fn name(&self) -> &str {
        self.layout.name()
    }

    /// Slots the event source must watch for double taps while this app
    /// has focus.  Ascending order.
    pub fn double_tap_slots(&self) -> &[usize] {
        &self.double_tap_slots
    }

    /// Runs the focus-entry sequence.
    ///
    /// Releases any keyboard, consumer, mouse, and tone state the outgoing
    /// app left active, repaints the display and LEDs for this layout, and
    /// arms the pixel inactivity timeout.
    pub fn on_focus(&self, ctx: &mut EngineContext<'_>) {
        ctx.device.release_all_keys();
        ctx.device.release_consumer();
        ctx.device.release_all_mouse();
        ctx.device.stop_tone();

        ctx.device.set_display_text(DisplayRegion::Title, self.layout.name());
        for slot in 0..KEY_COUNT {
            let label = match &self.keys[slot] {
                Some(key) => key.binding.label(ctx.settings),
                None => String::new(),
            };
            ctx.device.set_display_text(DisplayRegion::KeySlot(slot), &label);
        }
        ctx.device.refresh_display();

        self.paint_pixels(ctx);
        ctx.device.show_pixels();

        self.arm_pixel_timer(ctx);
    }

    /// Routes one classified event into this app's bindings.
    ///
    /// Every event counts as activity: LEDs darkened by the inactivity
    /// timeout relight first, and the timeout re-arms.
    pub fn handle_event(&self, ctx: &mut EngineContext<'_>, event: Event) -> Option<SwitchRequest> {
        if ctx.settings.pixels_disabled() {
            self.paint_pixels(ctx);
            ctx.device.show_pixels();
        }
        self.arm_pixel_timer(ctx);

        match event {
            Event::EncoderRotate { position, previous_position } => {
                if position > previous_position {
                    self.run_encoder(ctx, self.layout.encoder_increase())
                } else if position < previous_position {
                    self.run_encoder(ctx, self.layout.encoder_decrease())
                } else {
                    None
                }
            }
            Event::EncoderButton { pressed } => match self.layout.encoder_button() {
                Some(action) if pressed => action.execute(ctx),
                Some(action) => action.undo(ctx),
                None => None,
            },
            Event::Key(transition) => self.key_event(ctx, transition),
            Event::DoubleTap { slot, pressed } => {
                let key = self.keys.get(slot).and_then(Option::as_ref)?;
                if pressed {
                    key.double_tap(ctx)
                } else {
                    key.double_tap_release(ctx)
                }
            }
        }
    }

    /// One encoder detent: execute, then undo unless the action switched
    /// apps.
    fn run_encoder(
        &self,
        ctx: &mut EngineContext<'_>,
        action: Option<&dyn Action>,
    ) -> Option<SwitchRequest> {
        let action = action?;
        if let Some(request) = action.execute(ctx) {
            return Some(request);
        }
        action.undo(ctx)
    }

    fn key_event(
        &self,
        ctx: &mut EngineContext<'_>,
        transition: KeyTransition,
    ) -> Option<SwitchRequest> {
        let key = self.keys.get(transition.slot).and_then(Option::as_ref)?;
        if !transition.pressed {
            return key.release(ctx);
        }

        let request = key.press(ctx);
        // A press that switched apps skips the linked repaint: the incoming
        // app repaints everything on focus anyway.
        if request.is_none() {
            if let Some(setting) = key.setting_link() {
                self.repaint_linked(ctx, setting);
            }
        }
        request
    }

    /// Repaints every key linked to `setting`, the writer included, and
    /// flushes the staged display and LED state.
    fn repaint_linked(&self, ctx: &mut EngineContext<'_>, setting: &str) {
        for key in self.keys.iter().flatten() {
            if key.setting_link() == Some(setting) {
                key.repaint(ctx);
            }
        }
        ctx.device.refresh_display();
        ctx.device.show_pixels();
    }

    /// Stages every slot's current color and marks the LEDs lit.
    fn paint_pixels(&self, ctx: &mut EngineContext<'_>) {
        for slot in 0..KEY_COUNT {
            let color = match &self.keys[slot] {
                Some(key) => key.binding.color(ctx.settings),
                None => 0x000000,
            };
            ctx.device.set_pixel(slot, color);
        }
        ctx.settings.set_pixels_disabled(false);
    }

    fn arm_pixel_timer(&self, ctx: &mut EngineContext<'_>) {
        let Some(timeout) = ctx.settings.pixel_timeout() else {
            return;
        };
        ctx.timers.add(
            PIXELS_TIMER_ID,
            timeout,
            Box::new(|ctx: &mut TimerContext<'_>| {
                for slot in 0..KEY_COUNT {
                    ctx.device.set_pixel(slot, 0x000000);
                }
                ctx.device.show_pixels();
                ctx.settings.set_pixels_disabled(true);
                Vec::new()
            }),
        );
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
