//! Application service — the hexagonal core.
//!
//! [`AppService`] owns the three channel state machines and the
//! last-applied duty mirror.  It exposes a clean, hardware-agnostic
//! API; all I/O flows through port traits injected at call sites, so
//! the entire service is testable with mock adapters.
//!
//! ```text
//!  ButtonPort ──▶ ┌────────────────────────┐ ──▶ PwmPort
//!   ClockPort ──▶ │       AppService        │ ──▶ LevelPort
//!                 │  3 × channel machine    │ ──▶ EventSink
//!                 │  + save gesture         │
//!                 └────────────────────────┘
//! ```

use log::{info, warn};

use crate::config::BLINK_STEP_MS;
use crate::control::channel::{CHANNEL_COUNT, ChannelController, ChannelEvent, Levels};
use crate::control::gesture::save_triggered;

use super::events::AppEvent;
use super::ports::{ButtonPort, ClockPort, EventSink, LevelPort, PwmPort};

/// The application service orchestrates all domain logic.
pub struct AppService {
    channels: [ChannelController; CHANNEL_COUNT],
    /// Duty last written to each output; outputs are only touched when
    /// the live level diverges from this mirror.
    applied: Levels,
}

impl AppService {
    /// Construct the service with the levels restored from storage
    /// (or `[0, 0, 0]` on a virgin board).
    ///
    /// Does **not** drive the outputs — call [`start`](Self::start) next.
    pub fn new(initial: Levels) -> Self {
        Self {
            channels: initial.map(ChannelController::new),
            applied: initial,
        }
    }

    /// Current brightness levels.
    pub fn levels(&self) -> Levels {
        let mut levels = [0u8; CHANNEL_COUNT];
        for (slot, ch) in levels.iter_mut().zip(&self.channels) {
            *slot = ch.level();
        }
        levels
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive all outputs to the restored levels, before the first tick.
    pub fn start(&mut self, hw: &mut impl PwmPort, sink: &mut impl EventSink) {
        let levels = self.levels();
        self.drive_all(hw, levels);
        self.applied = levels;
        sink.emit(&AppEvent::Started(levels));
        info!("AppService started, levels={:?}", levels);
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one full control cycle: sample inputs → advance the three
    /// state machines → apply changed duties → check the save gesture.
    ///
    /// The `hw` parameter satisfies **both** [`ButtonPort`] and
    /// [`PwmPort`] — this avoids a double mutable borrow while keeping
    /// the port boundary explicit.
    pub fn tick(
        &mut self,
        hw: &mut (impl ButtonPort + PwmPort),
        clock: &impl ClockPort,
        store: &mut impl LevelPort,
        sink: &mut impl EventSink,
    ) {
        let now_ms = clock.now_ms();

        // 1. Sample + advance every channel.
        for (idx, ch) in self.channels.iter_mut().enumerate() {
            let raw = hw.is_pressed(idx);
            match ch.update(raw, now_ms) {
                Some(ChannelEvent::Tap { level }) => {
                    sink.emit(&AppEvent::LevelChanged {
                        channel: idx,
                        level,
                    });
                }
                Some(ChannelEvent::HoldCleared) => {
                    sink.emit(&AppEvent::ChannelCleared { channel: idx });
                }
                None => {}
            }
        }

        // 2. Write-on-change duty application.
        for idx in 0..CHANNEL_COUNT {
            let level = self.channels[idx].level();
            if level != self.applied[idx] {
                hw.set_duty(idx, level);
                self.applied[idx] = level;
            }
        }

        // 3. Coordinated save gesture, evaluated after the updates.
        //    Re-fires every tick the hold condition persists.
        if save_triggered(&self.channels, now_ms) {
            self.acknowledge_and_save(hw, clock, store, sink);
        }
    }

    // ── Save gesture effect ───────────────────────────────────

    /// Blink acknowledgment, hold latching, and the durable write.
    ///
    /// The blink is a blocking off→on→off→on sequence; inputs are not
    /// sampled during its ~300 ms window.
    fn acknowledge_and_save(
        &mut self,
        hw: &mut impl PwmPort,
        clock: &impl ClockPort,
        store: &mut impl LevelPort,
        sink: &mut impl EventSink,
    ) {
        let levels = self.levels();

        self.drive_all(hw, [0; CHANNEL_COUNT]);
        clock.delay_ms(BLINK_STEP_MS);
        self.drive_all(hw, levels);
        clock.delay_ms(BLINK_STEP_MS);
        self.drive_all(hw, [0; CHANNEL_COUNT]);
        clock.delay_ms(BLINK_STEP_MS);
        self.drive_all(hw, levels);

        // The buttons are still down; make sure the releases that end
        // the gesture do not step the channels.
        for ch in &mut self.channels {
            ch.mark_held();
        }

        match store.save(&levels) {
            Ok(()) => sink.emit(&AppEvent::LevelsSaved(levels)),
            Err(e) => warn!("level save failed ({e}), keeping previous record"),
        }
    }

    /// Unconditionally drive all three outputs. Bypasses the applied
    /// mirror — callers restore it to a consistent state themselves.
    fn drive_all(&self, hw: &mut impl PwmPort, levels: Levels) {
        for (idx, &level) in levels.iter().enumerate() {
            hw.set_duty(idx, level);
        }
    }
}
