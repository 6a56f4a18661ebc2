//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production).

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(levels) => {
                info!("START | levels={:?}", levels);
            }
            AppEvent::LevelChanged { channel, level } => {
                info!("LEVEL | ch{} -> {}", channel, level);
            }
            AppEvent::ChannelCleared { channel } => {
                info!("CLEAR | ch{} held, level -> 0", channel);
            }
            AppEvent::LevelsSaved(levels) => {
                info!("SAVE  | levels={:?} persisted", levels);
            }
        }
    }
}
