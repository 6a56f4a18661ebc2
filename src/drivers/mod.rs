//! Hardware drivers. Everything ESP-IDF-specific is cfg-gated inside
//! `hw_init`; the drivers above it compile (with in-memory stubs) on
//! any host target.

pub mod buttons;
pub mod hw_init;
pub mod rgb_pwm;
