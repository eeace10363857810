//! Battery voltage sense on the VSYS ADC divider.

use badge_envlog::ports::BatteryMonitor;
use embassy_rp::adc::{Adc, Blocking, Channel};

/// ADC reference voltage.
const VREF: f32 = 3.3;

/// VSYS sits behind a 1:3 resistor divider on the board.
const DIVIDER: f32 = 3.0;

/// 12-bit conversion full scale.
const ADC_MAX: f32 = 4096.0;

pub struct VsysMonitor<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> VsysMonitor<'d> {
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl BatteryMonitor for VsysMonitor<'_> {
    fn voltage(&mut self) -> Option<f32> {
        // A failed conversion is indistinguishable from hardware without
        // battery sense; both map to the fail-soft "unsupported" condition.
        let raw = self.adc.blocking_read(&mut self.channel).ok()?;
        Some(f32::from(raw) * VREF / ADC_MAX * DIVIDER)
    }
}
