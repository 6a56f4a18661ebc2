//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the button bank and the PWM driver, exposing them through
//! [`ButtonPort`] and [`PwmPort`].  This is the only module (together
//! with the drivers underneath it) that touches actual hardware.  On
//! non-espidf targets, the underlying drivers use cfg-gated simulation
//! stubs.

use crate::app::ports::{ButtonPort, PwmPort};
use crate::drivers::buttons::ButtonBank;
use crate::drivers::rgb_pwm::RgbPwm;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    buttons: ButtonBank,
    pwm: RgbPwm,
}

impl HardwareAdapter {
    pub fn new(buttons: ButtonBank, pwm: RgbPwm) -> Self {
        Self { buttons, pwm }
    }
}

impl ButtonPort for HardwareAdapter {
    fn is_pressed(&self, channel: usize) -> bool {
        self.buttons.is_pressed(channel)
    }
}

impl PwmPort for HardwareAdapter {
    fn set_duty(&mut self, channel: usize, duty: u8) {
        self.pwm.set_level(channel, duty);
    }
}
