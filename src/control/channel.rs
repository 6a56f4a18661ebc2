//! Debounced tap/hold state machine for one dimmer channel.
//!
//! Each channel owns one button, one PWM output, and one brightness
//! level. The main loop calls [`ChannelController::update`] once per
//! tick with the raw input level and the current monotonic time; the
//! controller runs the debounce and gesture classification and mutates
//! its level accordingly.
//!
//! ## Gesture semantics
//!
//! | Gesture | Condition                           | Result                     |
//! |---------|-------------------------------------|----------------------------|
//! | Tap     | Debounced release before hold limit | level += 16 (wrap 255 → 0) |
//! | Hold    | Debounced press > 1500 ms           | level = 0, tap suppressed  |
//!
//! The tap fires on the transition to *released*, never while the
//! button is still down — a press that turns into a hold therefore
//! never steps the level first.

use crate::config::{DEBOUNCE_MS, HOLD_CLEAR_MS, LEVEL_STEP};

/// Number of dimmer channels (R, G, B).
pub const CHANNEL_COUNT: usize = 3;

/// Brightness levels indexed by channel.
pub type Levels = [u8; CHANNEL_COUNT];

/// Events emitted after gesture classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEvent {
    /// A debounced tap stepped the level; carries the new value.
    Tap { level: u8 },
    /// A hold crossed the clear threshold and reset the level to zero.
    HoldCleared,
}

/// Per-channel debounce + tap/hold state machine.
#[derive(Debug, Clone)]
pub struct ChannelController {
    level: u8,
    /// Raw input level seen on the previous tick.
    raw_last: bool,
    /// Debounced input level.
    stable: bool,
    /// Monotonic time of the last raw edge (debounce and hold anchor).
    last_transition_ms: u32,
    /// Latched once a press is classified as a hold; suppresses the
    /// tap increment when the button is eventually released.
    held: bool,
}

impl ChannelController {
    pub fn new(initial_level: u8) -> Self {
        Self {
            level: initial_level,
            raw_last: false,
            stable: false,
            last_transition_ms: 0,
            held: false,
        }
    }

    /// Current brightness level (PWM duty, 0–255).
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Debounced pressed state.
    pub fn stable_pressed(&self) -> bool {
        self.stable
    }

    /// How long the debounced press has been anchored, in milliseconds.
    /// Zero when the button is not stably pressed.
    pub fn pressed_for_ms(&self, now_ms: u32) -> u32 {
        if self.stable {
            now_ms.wrapping_sub(self.last_transition_ms)
        } else {
            0
        }
    }

    /// Latch the hold flag without touching the level. Used by the
    /// coordinated save gesture so the releases that follow it do not
    /// step the channels.
    pub fn mark_held(&mut self) {
        self.held = true;
    }

    /// Advance the state machine one tick.
    ///
    /// `raw_pressed` is the current raw input level, `now_ms` the
    /// monotonic time. Interval math wraps, so a rolled-over counter
    /// still yields correct durations.
    pub fn update(&mut self, raw_pressed: bool, now_ms: u32) -> Option<ChannelEvent> {
        let mut event = None;

        // Any raw edge (including bounce) restarts the debounce window.
        if raw_pressed != self.raw_last {
            self.last_transition_ms = now_ms;
            self.raw_last = raw_pressed;
        }

        // Commit the raw level once it has held steady long enough.
        let elapsed = now_ms.wrapping_sub(self.last_transition_ms);
        if elapsed >= DEBOUNCE_MS && raw_pressed != self.stable {
            self.stable = raw_pressed;
            if !self.stable && !self.held {
                self.level = step_level(self.level);
                event = Some(ChannelEvent::Tap { level: self.level });
            }
            // Cleared on every commit; the hold rule below re-latches it
            // within this same call while the button stays down.
            self.held = false;
        }

        // Hold detection runs every tick, independent of the commit.
        if self.stable && now_ms.wrapping_sub(self.last_transition_ms) > HOLD_CLEAR_MS {
            self.level = 0;
            if !self.held {
                event = Some(ChannelEvent::HoldCleared);
            }
            self.held = true;
        }

        event
    }
}

/// Step a level by [`LEVEL_STEP`], wrapping to zero past 255.
fn step_level(level: u8) -> u8 {
    let next = u16::from(level) + u16::from(LEVEL_STEP);
    if next > u16::from(u8::MAX) { 0 } else { next as u8 }
}
