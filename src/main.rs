//! TriLight Firmware — Main Entry Point
//!
//! Hexagonal architecture over a fixed-rate polling loop.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                  │
//! │                                                          │
//! │  HardwareAdapter    LogEventSink   NvsAdapter  TimeAdapter│
//! │  (Button+Pwm)       (EventSink)    (Level+NVS) (Clock)   │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ──────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────┐      │
//! │  │            AppService (pure logic)             │      │
//! │  │  3 × debounce/tap/hold machine · save gesture  │      │
//! │  └────────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! One loop iteration = read all three buttons, advance the three
//! channel machines, apply changed duties, check the save gesture.
//! No interrupts, no scheduler — the buttons are polled.

#![deny(unused_must_use)]

use anyhow::Result;
use log::{info, warn};

use trilight::adapters::hardware::HardwareAdapter;
use trilight::adapters::log_sink::LogEventSink;
use trilight::adapters::nvs::NvsAdapter;
use trilight::adapters::time::TimeAdapter;
use trilight::app::ports::LevelPort;
use trilight::app::service::AppService;
use trilight::drivers;
use trilight::drivers::buttons::ButtonBank;
use trilight::drivers::rgb_pwm::RgbPwm;

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }

    info!("TriLight v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = drivers::hw_init::init_peripherals() {
        // Nothing useful runs without GPIO and LEDC; park the task.
        log::error!("peripheral init failed: {}, halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 2. Restore levels from NVS (or defaults) ──────────────
    let mut nvs = match NvsAdapter::new() {
        Ok(n) => n,
        Err(e) => {
            warn!("NVS init failed ({}), running without persistence", e);
            // Continue without NVS — levels will not survive this
            // session.  On next reboot, NVS should self-heal.
            NvsAdapter::default()
        }
    };
    let levels = match nvs.load() {
        Ok(levels) => levels,
        Err(e) => {
            warn!("level load failed ({}), using defaults", e);
            [0; 3]
        }
    };

    // ── 3. Construct adapters ─────────────────────────────────
    let clock = TimeAdapter::new();
    let mut hw = HardwareAdapter::new(ButtonBank::new(), RgbPwm::new());
    let mut sink = LogEventSink::new();

    // ── 4. Construct app service ──────────────────────────────
    let mut app = AppService::new(levels);
    app.start(&mut hw, &mut sink);

    info!("System ready. Entering control loop.");

    // ── 5. Polling loop ───────────────────────────────────────
    // Ticks run back-to-back; the only blocking stretch is the
    // save-acknowledgment blink inside tick().
    loop {
        app.tick(&mut hw, &clock, &mut nvs, &mut sink);

        // Pace the host simulation so it doesn't peg a core.
        #[cfg(not(target_os = "espidf"))]
        std::thread::sleep(std::time::Duration::from_millis(1));
    }
}
