//! Hardware port implementations for the RP2350 badge.
//!
//! Everything in here is ARM-only and compiled into the firmware binary; the
//! host test suite exercises the same port traits through mocks instead.

pub mod inputs;
pub mod leds;
pub mod logsink;
pub mod power;
pub mod screen;
pub mod sensors;

use badge_envlog::ports::Clock;
use embassy_time::Instant;

/// Millisecond uptime clock for log line timestamps.
pub struct Uptime;

impl Clock for Uptime {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}
