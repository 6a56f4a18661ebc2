//! Control-loop timing and step parameters.
//!
//! All values are fixed at compile time — the board has no provisioning
//! surface, so there is nothing to persist or override at runtime.

/// A raw input level must hold steady this long before it is committed
/// as the debounced level.
pub const DEBOUNCE_MS: u32 = 30;

/// Holding all three buttons simultaneously past this threshold
/// triggers the save gesture.
pub const HOLD_SAVE_MS: u32 = 1000;

/// Holding a single button past this threshold clears that channel
/// to zero and suppresses the tap increment on release.
pub const HOLD_CLEAR_MS: u32 = 1500;

/// Brightness added per tap; a step past 255 wraps the channel to zero.
pub const LEVEL_STEP: u8 = 16;

/// Duration of each phase of the save-acknowledgment blink.
pub const BLINK_STEP_MS: u32 = 100;
