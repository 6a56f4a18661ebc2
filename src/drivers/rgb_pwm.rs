//! RGB LED PWM driver.
//!
//! Three LEDC PWM channels (CH0-2) drive discrete R/G/B LEDs (or a
//! common-cathode RGB LED).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the LEDC duty registers via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;

pub struct RgbPwm {
    current: [u8; 3],
}

impl RgbPwm {
    pub fn new() -> Self {
        Self { current: [0; 3] }
    }

    /// Set one channel's 8-bit duty.
    pub fn set_level(&mut self, channel: usize, duty: u8) {
        hw_init::ledc_set(hw_init::LEDC_CH_LED[channel], duty);
        self.current[channel] = duty;
    }

    /// Duties as last written, indexed by channel.
    pub fn current_levels(&self) -> [u8; 3] {
        self.current
    }
}
