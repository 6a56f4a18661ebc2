//! Port traits — the boundary between the domain core and everything else.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! The driven adapters (buttons, PWM, clock, storage, event sinks)
//! implement these traits; [`AppService`](super::service::AppService)
//! takes them as generic parameters, so the domain never touches a
//! register or an IDF call directly.

use crate::control::channel::Levels;

// ───────────────────────────────────────────────────────────────
// Button port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain samples the raw button levels through this.
pub trait ButtonPort {
    /// Raw (undebounced) pressed state of one channel's button.
    fn is_pressed(&self, channel: usize) -> bool;
}

// ───────────────────────────────────────────────────────────────
// PWM port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: the domain drives the LED outputs through this.
pub trait PwmPort {
    /// Set one channel's 8-bit PWM duty.
    fn set_duty(&mut self, channel: usize, duty: u8);
}

// ───────────────────────────────────────────────────────────────
// Clock port (monotonic time + blocking delay)
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock. The counter is free-running and wraps
/// at `u32::MAX`; consumers measure intervals with `wrapping_sub`.
pub trait ClockPort {
    fn now_ms(&self) -> u32;

    /// Block for `ms` milliseconds. Used only by the save-acknowledgment
    /// blink; inputs are not sampled while this runs.
    fn delay_ms(&self, ms: u32);
}

// ───────────────────────────────────────────────────────────────
// Level persistence port (driven adapter: domain ↔ durable storage)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the three channel levels.
pub trait LevelPort {
    /// Load the saved levels. Returns `[0, 0, 0]` when nothing has been
    /// saved yet (virgin storage).
    fn load(&self) -> Result<Levels, LevelError>;

    /// Persist the levels. The write is atomic — a power cut mid-save
    /// leaves the previous record intact.
    fn save(&mut self, levels: &Levels) -> Result<(), LevelError>;
}

// ───────────────────────────────────────────────────────────────
// Storage port (driven adapter: raw NVS blobs)
// ───────────────────────────────────────────────────────────────

/// Persistent key-value byte storage, namespaced so the level record
/// cannot collide with any future subsystem's keys.  [`LevelPort`]
/// implementations layer the typed record on top of this.
///
/// The level lifecycle only ever reads and writes; there is no delete
/// path.  Writes are atomic — ESP-IDF NVS commits each blob as a unit,
/// and the in-memory simulation trivially does the same.
pub trait StoragePort {
    /// Read a value into `buf`.  Returns the number of bytes copied.
    fn read(&self, namespace: &str, key: &str, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Write a value atomically, replacing any previous contents.
    fn write(&mut self, namespace: &str, key: &str, data: &[u8]) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go (serial log in
/// production, a vector in tests).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`LevelPort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelError {
    /// Stored record failed to decode (wrong size or malformed blob).
    Corrupted,
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`StoragePort`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Requested key does not exist.
    NotFound,
    /// Storage partition is full.
    Full,
    /// Generic I/O error.
    IoError,
}

impl core::fmt::Display for LevelError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "level record corrupted"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "key not found"),
            Self::Full => write!(f, "storage full"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
