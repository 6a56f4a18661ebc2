//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — in production they go to the
//! serial log.

use crate::control::channel::Levels;

/// Structured events emitted by the application core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller started; carries the levels restored from storage.
    Started(Levels),

    /// A tap stepped one channel's brightness.
    LevelChanged { channel: usize, level: u8 },

    /// A long hold cleared one channel to zero.
    ChannelCleared { channel: usize },

    /// The save gesture persisted the current levels.
    LevelsSaved(Levels),
}
