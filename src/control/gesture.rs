//! Coordinated three-button save gesture.
//!
//! The only coupling between the otherwise independent channels: when
//! all three buttons are stably held past [`HOLD_SAVE_MS`], the current
//! levels are persisted. The predicate lives here; the effect (blink
//! acknowledgment, hold latching, the storage write) is orchestrated by
//! [`AppService`](crate::app::service::AppService).
//!
//! There is deliberately no single-shot latch — the gesture re-fires on
//! every tick the condition keeps holding.

use crate::config::HOLD_SAVE_MS;
use crate::control::channel::{CHANNEL_COUNT, ChannelController};

/// True when every channel reports a debounced press older than the
/// save threshold.
pub fn save_triggered(channels: &[ChannelController; CHANNEL_COUNT], now_ms: u32) -> bool {
    channels
        .iter()
        .all(|ch| ch.stable_pressed() && ch.pressed_for_ms(now_ms) > HOLD_SAVE_MS)
}
