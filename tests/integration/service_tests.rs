//! Integration tests for the AppService → channel machines → PWM/NVS
//! pipeline.
//!
//! These run on the host and drive the full control path through mock
//! ports: raw button levels in, duty writes and storage saves out.

use crate::mock_hw::{MockClock, MockHardware, MockNvs, VecSink};

use trilight::app::events::AppEvent;
use trilight::app::ports::{ClockPort, LevelPort};
use trilight::app::service::AppService;
use trilight::control::channel::Levels;

struct Fixture {
    app: AppService,
    hw: MockHardware,
    clock: MockClock,
    nvs: MockNvs,
    sink: VecSink,
}

impl Fixture {
    /// Started service with `initial` levels already applied; the PWM
    /// write log is cleared so tests see only their own traffic.
    fn new(initial: Levels) -> Self {
        let mut f = Self {
            app: AppService::new(initial),
            hw: MockHardware::new(),
            clock: MockClock::new(),
            nvs: MockNvs::new(),
            sink: VecSink::new(),
        };
        f.app.start(&mut f.hw, &mut f.sink);
        f.hw.writes.clear();
        f
    }

    fn tick_at(&mut self, now_ms: u32) {
        self.clock.set(now_ms);
        self.app
            .tick(&mut self.hw, &self.clock, &mut self.nvs, &mut self.sink);
    }

    /// One clean tap on `channel`: press, commit, release, commit.
    fn tap_at(&mut self, channel: usize, t: u32) {
        self.hw.press(channel);
        self.tick_at(t);
        self.tick_at(t + 40);
        self.hw.release(channel);
        self.tick_at(t + 100);
        self.tick_at(t + 140);
    }

    fn level_changes(&self) -> Vec<(usize, u8)> {
        self.sink
            .events
            .iter()
            .filter_map(|e| match e {
                AppEvent::LevelChanged { channel, level } => Some((*channel, *level)),
                _ => None,
            })
            .collect()
    }
}

// ── Startup ──────────────────────────────────────────────────

#[test]
fn start_applies_restored_levels() {
    let mut app = AppService::new([16, 32, 48]);
    let mut hw = MockHardware::new();
    let mut sink = VecSink::new();
    app.start(&mut hw, &mut sink);

    assert_eq!(hw.duties, [16, 32, 48]);
    assert_eq!(hw.writes, vec![(0, 16), (1, 32), (2, 48)]);
    assert_eq!(sink.events, vec![AppEvent::Started([16, 32, 48])]);
}

// ── Tap semantics ────────────────────────────────────────────

#[test]
fn tap_steps_one_channel_and_leaves_the_others() {
    let mut f = Fixture::new([0, 0, 0]);
    f.tap_at(0, 0);

    assert_eq!(f.hw.duties, [16, 0, 0]);
    assert_eq!(f.level_changes(), vec![(0, 16)]);
    assert_eq!(f.nvs.save_count, 0, "a tap must not persist anything");
}

#[test]
fn taps_on_different_channels_are_independent() {
    let mut f = Fixture::new([0, 0, 0]);
    f.tap_at(1, 0);
    f.tap_at(1, 1000);
    f.tap_at(2, 2000);

    assert_eq!(f.hw.duties, [0, 32, 16]);
}

#[test]
fn tap_from_240_wraps_to_zero() {
    let mut f = Fixture::new([240, 0, 0]);
    f.tap_at(0, 0);

    assert_eq!(f.hw.duties[0], 0);
    assert_eq!(f.level_changes(), vec![(0, 0)]);
}

// ── Output-write minimization ────────────────────────────────

#[test]
fn idle_ticks_write_nothing() {
    let mut f = Fixture::new([100, 150, 200]);
    for t in (0..500).step_by(10) {
        f.tick_at(t);
    }
    assert!(f.hw.writes.is_empty(), "no level change, no PWM traffic");
}

#[test]
fn each_level_change_writes_exactly_once() {
    let mut f = Fixture::new([0, 0, 0]);
    f.tap_at(0, 0);
    // Plenty of idle ticks after the tap.
    for t in (200..800).step_by(10) {
        f.tick_at(t);
    }
    assert_eq!(f.hw.writes, vec![(0, 16)]);
}

// ── Hold-to-clear ────────────────────────────────────────────

#[test]
fn hold_clears_channel_and_suppresses_release_tap() {
    let mut f = Fixture::new([128, 64, 32]);
    f.hw.press(0);
    f.tick_at(0);
    f.tick_at(40);
    f.tick_at(1000);
    assert_eq!(f.hw.duties[0], 128, "not yet past the clear threshold");

    f.tick_at(1541);
    assert_eq!(f.hw.duties[0], 0);
    assert!(f.sink.events.contains(&AppEvent::ChannelCleared { channel: 0 }));

    f.hw.release(0);
    f.tick_at(1600);
    f.tick_at(1640);
    assert_eq!(f.hw.duties, [0, 64, 32]);
    assert!(f.level_changes().is_empty(), "release after a hold must not step");
}

// ── Save gesture ─────────────────────────────────────────────

#[test]
fn save_gesture_blinks_and_persists_current_levels() {
    let mut f = Fixture::new([32, 64, 96]);
    f.hw.press_all();
    f.tick_at(0);
    f.tick_at(40);

    f.tick_at(900);
    assert_eq!(f.nvs.save_count, 0, "900ms hold is below the save threshold");

    f.tick_at(1001);
    assert_eq!(f.nvs.save_count, 1);
    assert_eq!(f.nvs.load().unwrap(), [32, 64, 96]);
    assert!(f.sink.events.contains(&AppEvent::LevelsSaved([32, 64, 96])));

    // Blink acknowledgment: off → on → off → on, 100ms steps.
    assert_eq!(*f.clock.delays.borrow(), vec![100, 100, 100]);
    let blink: Vec<(usize, u8)> = f.hw.writes.clone();
    assert_eq!(
        blink,
        vec![
            (0, 0),
            (1, 0),
            (2, 0),
            (0, 32),
            (1, 64),
            (2, 96),
            (0, 0),
            (1, 0),
            (2, 0),
            (0, 32),
            (1, 64),
            (2, 96),
        ]
    );

    // The blocking blink advanced time by 300ms.
    assert_eq!(f.clock.now_ms(), 1301);

    // Releasing afterwards must not step any channel.
    f.hw.release_all();
    f.tick_at(1310);
    f.tick_at(1350);
    assert!(f.level_changes().is_empty());
    assert_eq!(f.hw.duties, [32, 64, 96]);
}

#[test]
fn save_gesture_refires_while_the_hold_persists() {
    let mut f = Fixture::new([16, 16, 16]);
    f.hw.press_all();
    f.tick_at(0);
    f.tick_at(40);

    f.tick_at(1001);
    f.tick_at(f.clock.now_ms()); // still held, still qualifying
    assert_eq!(f.nvs.save_count, 2, "no single-shot latch");
}

#[test]
fn partial_hold_never_saves() {
    let mut f = Fixture::new([16, 16, 16]);
    f.hw.press(0);
    f.hw.press(1);
    f.tick_at(0);
    f.tick_at(40);
    f.tick_at(2000);
    f.tick_at(3000);
    assert_eq!(f.nvs.save_count, 0, "two buttons are not a save gesture");
}

#[test]
fn hold_past_clear_threshold_saves_zeros() {
    let mut f = Fixture::new([32, 64, 96]);
    f.hw.press_all();
    f.tick_at(0);
    f.tick_at(40);

    // First qualifying tick lands past the per-channel clear threshold:
    // the channels zero first, then the gesture persists the zeros.
    f.tick_at(1550);
    assert_eq!(f.hw.duties, [0, 0, 0]);
    assert_eq!(f.nvs.load().unwrap(), [0, 0, 0]);
}

// ── Persistence round-trip ───────────────────────────────────

#[test]
fn saved_levels_survive_a_restart() {
    let mut f = Fixture::new([80, 160, 240]);
    f.hw.press_all();
    f.tick_at(0);
    f.tick_at(40);
    f.tick_at(1001);
    assert_eq!(f.nvs.save_count, 1);

    // Simulated restart: load from the same store, build a new service.
    let restored = f.nvs.load().unwrap();
    assert_eq!(restored, [80, 160, 240]);

    let mut app = AppService::new(restored);
    let mut hw = MockHardware::new();
    let mut sink = VecSink::new();
    app.start(&mut hw, &mut sink);
    assert_eq!(hw.duties, [80, 160, 240]);
}

#[test]
fn virgin_store_yields_dark_channels() {
    let nvs = MockNvs::new();
    let levels = nvs.load().unwrap();
    assert_eq!(levels, [0, 0, 0]);

    let mut app = AppService::new(levels);
    let mut hw = MockHardware::new();
    let mut sink = VecSink::new();
    app.start(&mut hw, &mut sink);
    assert_eq!(hw.duties, [0, 0, 0]);
}
