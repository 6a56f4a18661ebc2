//! Mock adapters for integration tests.
//!
//! Records every PWM write and storage save so tests can assert on the
//! full command history without touching real GPIO/PWM registers.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use trilight::app::events::AppEvent;
use trilight::app::ports::{
    ButtonPort, ClockPort, EventSink, LevelError, LevelPort, PwmPort, StorageError, StoragePort,
};
use trilight::control::channel::Levels;

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Raw button levels the next tick will sample.
    pub buttons: [bool; 3],
    /// Every `set_duty` call, in order.
    pub writes: Vec<(usize, u8)>,
    /// Duties as last written, indexed by channel.
    pub duties: [u8; 3],
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            buttons: [false; 3],
            writes: Vec::new(),
            duties: [0; 3],
        }
    }

    pub fn press(&mut self, channel: usize) {
        self.buttons[channel] = true;
    }

    pub fn release(&mut self, channel: usize) {
        self.buttons[channel] = false;
    }

    pub fn press_all(&mut self) {
        self.buttons = [true; 3];
    }

    pub fn release_all(&mut self) {
        self.buttons = [false; 3];
    }
}

impl ButtonPort for MockHardware {
    fn is_pressed(&self, channel: usize) -> bool {
        self.buttons[channel]
    }
}

impl PwmPort for MockHardware {
    fn set_duty(&mut self, channel: usize, duty: u8) {
        self.writes.push((channel, duty));
        self.duties[channel] = duty;
    }
}

// ── MockClock ─────────────────────────────────────────────────

/// Manually advanced clock. `delay_ms` moves time forward exactly like
/// the real blocking delay would, and records each requested duration.
pub struct MockClock {
    now: Cell<u32>,
    pub delays: RefCell<Vec<u32>>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(0),
            delays: RefCell::new(Vec::new()),
        }
    }

    pub fn set(&self, now_ms: u32) {
        self.now.set(now_ms);
    }
}

impl ClockPort for MockClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }

    fn delay_ms(&self, ms: u32) {
        self.delays.borrow_mut().push(ms);
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

// ── MockNvs ───────────────────────────────────────────────────

const LEVELS_NAMESPACE: &str = "trilight";
const LEVELS_KEY: &str = "levels";

pub struct MockNvs {
    store: HashMap<String, Vec<u8>>,
    /// Number of `LevelPort::save` calls.
    pub save_count: usize,
}

impl MockNvs {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            save_count: 0,
        }
    }

    fn composite_key(namespace: &str, key: &str) -> String {
        format!("{}::{}", namespace, key)
    }
}

impl StoragePort for MockNvs {
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError> {
        let k = Self::composite_key(namespace, key);
        match self.store.get(&k) {
            Some(v) => {
                let n = v.len().min(buf.len());
                buf[..n].copy_from_slice(&v[..n]);
                Ok(n)
            }
            None => Err(StorageError::NotFound),
        }
    }

    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError> {
        let k = Self::composite_key(namespace, key);
        self.store.insert(k, data.to_vec());
        Ok(())
    }

}

impl LevelPort for MockNvs {
    fn load(&self) -> Result<Levels, LevelError> {
        let mut buf = [0u8; 8];
        match StoragePort::read(self, LEVELS_NAMESPACE, LEVELS_KEY, &mut buf) {
            Ok(n) => postcard::from_bytes(&buf[..n]).map_err(|_| LevelError::Corrupted),
            Err(StorageError::NotFound) => Ok([0; 3]),
            Err(_) => Err(LevelError::IoError),
        }
    }

    fn save(&mut self, levels: &Levels) -> Result<(), LevelError> {
        self.save_count += 1;
        let bytes = postcard::to_allocvec(levels).map_err(|_| LevelError::IoError)?;
        StoragePort::write(self, LEVELS_NAMESPACE, LEVELS_KEY, &bytes)
            .map_err(|_| LevelError::IoError)
    }
}

// ── VecSink ───────────────────────────────────────────────────

pub struct VecSink {
    pub events: Vec<AppEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }
}

impl EventSink for VecSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}
