//! The polling loop: one pure step function plus startup.
//!
//! Iteration order is fixed: button edges drive the LED animation mode (when
//! enabled), then fresh sensor/light/battery reads, then one display frame
//! drawn through a scoped screen handle, then a log line on the configured
//! cadence. The caller owns the inter-iteration sleep.
//!
//! Any `Err` out of here is fatal to the firmware; the only tolerated fault
//! is an unsupported battery voltage, absorbed inside the indicator.

use core::fmt::Write;

use heapless::String;

use crate::animation;
use crate::battery;
use crate::config::{
    BACKLIGHT,
    BatteryConfig,
    LABEL,
    LINE_GAS,
    LINE_LABEL,
    LINE_PRESSURE,
    LINE_TEMP_HUM,
    LoopConfig,
};
use crate::ports::{
    BOTTOM_RIGHT,
    BatteryMonitor,
    Buttons,
    Clock,
    DisplayPort,
    EnvReading,
    EnvSensor,
    Leds,
    LightSensor,
    LogSink,
    PortError,
    Screen,
    TOP_RIGHT,
};

/// Loop-owned mutable state, threaded explicitly through every step.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoopState {
    /// Current animation mode (0..=6).
    pub mode: u8,
    /// Iterations since the last log write.
    pub write_timer: u8,
}

impl LoopState {
    pub const fn new() -> Self {
        Self {
            mode: 0,
            write_timer: 0,
        }
    }
}

// =============================================================================
// Display Text Formatting
// =============================================================================

/// `"23.4 C 45 %"` - temperature to one decimal, humidity to none.
pub fn temp_hum_line(temperature: f32, humidity: f32) -> String<24> {
    let mut line = String::new();
    let _ = write!(line, "{temperature:2.1} C {humidity:2.0} %");
    line
}

/// `"1012.3 hPa"` - pressure to one decimal.
pub fn pressure_line(pressure: f32) -> String<24> {
    let mut line = String::new();
    let _ = write!(line, "{pressure:5.1} hPa");
    line
}

/// `"150.0 kOhm"` - gas resistance scaled to kOhm, one decimal.
pub fn gas_line(gas_resistance: u32) -> String<24> {
    let kohm = gas_resistance as f32 / 1000.0;
    let mut line = String::new();
    let _ = write!(line, "{kohm:4.1} kOhm");
    line
}

/// One whitespace-separated log record, newline-terminated.
///
/// Raw values, not the display formatting: gas resistance stays in Ohm and
/// the ambient light scalar appears here even though it is never displayed.
/// An unsupported battery voltage is recorded as 0.00.
pub fn log_line(
    timestamp_ms: u64,
    reading: &EnvReading,
    ambient_light: f32,
    voltage: Option<f32>,
) -> String<96> {
    let mut line = String::new();
    let _ = write!(
        line,
        "{} {:.1} {:.1} {:.1} {} {} {:.2}\n",
        timestamp_ms,
        reading.temperature,
        reading.humidity,
        reading.pressure,
        reading.gas_resistance,
        ambient_light,
        voltage.unwrap_or(0.0),
    );
    line
}

// =============================================================================
// Startup and Step
// =============================================================================

/// One-time setup before the loop: blank the LEDs, initialize the sensor,
/// and draw the splash frame (label only, backlight on).
pub fn startup<E, D, S>(env: &mut E, display: &mut D, leds: &mut S) -> Result<(), PortError>
where
    E: EnvSensor,
    D: DisplayPort,
    S: Leds,
{
    leds.clear();
    env.init()?;

    let mut screen = display.open()?;
    screen.clear();
    screen.backlight(BACKLIGHT);
    screen.print(LABEL, LINE_LABEL);
    screen.update()?;
    Ok(())
}

/// Run one loop iteration against the given ports.
///
/// The display handle is opened and dropped within this call, so the panel
/// is released before the caller sleeps - including on the error path.
#[allow(clippy::too_many_arguments)]
pub fn step<E, L, B, D, S, K, C, G>(
    state: &mut LoopState,
    cfg: &LoopConfig,
    bat: &BatteryConfig,
    env: &mut E,
    light: &mut L,
    battery: &mut B,
    display: &mut D,
    leds: &mut S,
    buttons: &mut K,
    clock: &C,
    log: &mut G,
) -> Result<(), PortError>
where
    E: EnvSensor,
    L: LightSensor,
    B: BatteryMonitor,
    D: DisplayPort,
    S: Leds,
    K: Buttons,
    C: Clock,
    G: LogSink,
{
    // LED mode only moves on press edges; an idle poll leaves the chain alone.
    if cfg.enable_animation {
        let pressed = buttons.read(BOTTOM_RIGHT | TOP_RIGHT);
        if pressed != 0 {
            state.mode = animation::advance(state.mode, pressed);
            animation::apply(leds, state.mode);
        }
    }

    let reading = env.read()?;
    let ambient_light = light.read()?;
    let voltage = battery.voltage();

    {
        let mut screen = display.open()?;
        screen.clear();
        battery::render(&mut screen, bat, voltage);
        screen.print(LABEL, LINE_LABEL);
        screen.print(&temp_hum_line(reading.temperature, reading.humidity), LINE_TEMP_HUM);
        screen.print(&pressure_line(reading.pressure), LINE_PRESSURE);
        screen.print(&gas_line(reading.gas_resistance), LINE_GAS);
        screen.update()?;
    }

    state.write_timer += 1;
    if state.write_timer >= cfg.log_every_n {
        let line = log_line(clock.now_ms(), &reading, ambient_light, voltage);
        log.append(&line)?;
        state.write_timer = 0;
    }

    Ok(())
}
