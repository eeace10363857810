//! Compile-time configuration for the polling loop.
//!
//! All values are `const`; there is no CLI, environment, or config file.
//! Threshold ordering is validated at compile time so a bad edit fails the
//! build instead of producing a nonsense battery glyph.

use crate::ports::Rgb;

// =============================================================================
// Battery Indicator
// =============================================================================

/// Battery indicator configuration: on/off flag plus the three band colors.
///
/// Constant for the process lifetime; the indicator reads it every frame.
#[derive(Clone, Copy, Debug)]
pub struct BatteryConfig {
    /// Draw the indicator at all.
    pub indicator: bool,
    /// Color for a well-charged battery (voltage above [`BATT_GOOD`]).
    pub good: Rgb,
    /// Color for an acceptable charge (voltage above [`BATT_OK`]).
    pub ok: Rgb,
    /// Color for a battery that needs charging soon.
    pub bad: Rgb,
}

/// Default battery indicator: green / gold / red bands.
pub const BATTERY: BatteryConfig = BatteryConfig {
    indicator: true,
    good: Rgb::new(0, 230, 0),
    ok: Rgb::new(255, 215, 0),
    bad: Rgb::new(255, 0, 0),
};

/// Voltage above which the battery counts as well charged.
pub const BATT_GOOD: f32 = 3.7;

/// Voltage above which the battery counts as acceptable.
pub const BATT_OK: f32 = 3.6;

/// Voltage above which the glyph is drawn fully filled (charging).
/// Cell voltage only exceeds nominal while on the charger.
pub const BATT_CHARGING: f32 = 4.1;

/// Voltage below which the interior fill bar is not drawn at all.
pub const BATT_EMPTY: f32 = 3.5;

// Compile-time validation: thresholds must be in ascending order
const _: () = assert!(BATT_EMPTY < BATT_OK);
const _: () = assert!(BATT_OK < BATT_GOOD);
const _: () = assert!(BATT_GOOD < BATT_CHARGING);

// =============================================================================
// Loop Driver
// =============================================================================

/// Parameters for one loop variant.
///
/// The two supported variants (quiet logger vs. interactive badge) share one
/// loop body and differ only in these values.
#[derive(Clone, Copy, Debug)]
pub struct LoopConfig {
    /// Poll buttons and drive the LED animation modes.
    pub enable_animation: bool,
    /// Write one log line every N iterations (1 = every iteration).
    pub log_every_n: u8,
    /// Sleep between iterations, in milliseconds.
    pub sleep_ms: u64,
}

/// Quiet variant: no buttons/LEDs, a log line every iteration, slow poll.
pub const QUIET: LoopConfig = LoopConfig {
    enable_animation: false,
    log_every_n: 1,
    sleep_ms: 10_000,
};

/// Interactive variant: button-driven LED modes, log every 5th poll.
pub const INTERACTIVE: LoopConfig = LoopConfig {
    enable_animation: true,
    log_every_n: 5,
    sleep_ms: 2_000,
};

const _: () = assert!(QUIET.log_every_n > 0);
const _: () = assert!(INTERACTIVE.log_every_n > 0);

// =============================================================================
// Display Layout
// =============================================================================

/// Static label printed on the top display line.
pub const LABEL: &str = "badge-envlog";

/// Backlight level used for every frame.
pub const BACKLIGHT: u8 = 5;

/// Y position of the label line.
pub const LINE_LABEL: i32 = 0;

/// Y position of the temperature/humidity line.
pub const LINE_TEMP_HUM: i32 = 20;

/// Y position of the pressure line.
pub const LINE_PRESSURE: i32 = 40;

/// Y position of the gas-resistance line.
pub const LINE_GAS: i32 = 60;

/// Logical name of the sensor log record stream.
///
/// Boards with a filesystem append to a flat file of this name; elsewhere
/// the log sink decides where lines actually go.
pub const LOG_NAME: &str = "sensorlog.txt";
