//! GPIO / peripheral pin assignments for the TriLight main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Channel buttons (momentary, active-low with external pull-ups)
// ---------------------------------------------------------------------------

/// Red-channel push-button.
pub const BUTTON_R_GPIO: i32 = 4;
/// Green-channel push-button.
pub const BUTTON_G_GPIO: i32 = 5;
/// Blue-channel push-button.
pub const BUTTON_B_GPIO: i32 = 6;

/// Button inputs indexed by channel (0 = R, 1 = G, 2 = B).
pub const BUTTON_GPIOS: [i32; 3] = [BUTTON_R_GPIO, BUTTON_G_GPIO, BUTTON_B_GPIO];

// ---------------------------------------------------------------------------
// LED outputs (discrete R/G/B dies or a common-cathode RGB LED)
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 11;
pub const LED_G_GPIO: i32 = 12;
pub const LED_B_GPIO: i32 = 13;

/// PWM outputs indexed by channel (0 = R, 1 = G, 2 = B).
pub const LED_GPIOS: [i32; 3] = [LED_R_GPIO, LED_G_GPIO, LED_B_GPIO];

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC base frequency for the LED channels (1 kHz — flicker-free).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
