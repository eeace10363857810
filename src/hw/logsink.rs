//! On-device sensor log sink.
//!
//! The board has no filesystem, so the `sensorlog.txt` record stream lands in
//! a circular buffer of recent lines and is echoed over defmt for capture on
//! a host. Lines arrive fully formatted from the loop; this sink never
//! reorders or rewrites them.

use badge_envlog::ports::{LogSink, PortError};
use heapless::String;

/// Number of log lines retained on-device.
pub const LOG_ENTRIES: usize = 32;

/// Maximum characters per retained line.
pub const LOG_LINE_LEN: usize = 96;

pub struct RingLog {
    entries: [String<LOG_LINE_LEN>; LOG_ENTRIES],
    head: usize,
    count: usize,
}

impl RingLog {
    pub const fn new() -> Self {
        Self {
            entries: [const { String::new() }; LOG_ENTRIES],
            head: 0,
            count: 0,
        }
    }

    /// Retained lines, oldest first.
    #[allow(dead_code)] // read path for a future on-device log view
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let start = if self.count == LOG_ENTRIES { self.head } else { 0 };
        (0..self.count).map(move |i| self.entries[(start + i) % LOG_ENTRIES].as_str())
    }
}

impl Default for RingLog {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for RingLog {
    fn append(&mut self, line: &str) -> Result<(), PortError> {
        let mut entry: String<LOG_LINE_LEN> = String::new();
        for c in line.trim_end_matches('\n').chars().take(LOG_LINE_LEN - 1) {
            entry.push(c).ok();
        }
        defmt::info!("log: {=str}", entry.as_str());

        self.entries[self.head] = entry;
        self.head = (self.head + 1) % LOG_ENTRIES;
        if self.count < LOG_ENTRIES {
            self.count += 1;
        }
        Ok(())
    }
}
