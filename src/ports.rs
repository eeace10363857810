//! Port traits for every external collaborator.
//!
//! The loop never touches hardware directly; it talks to these traits so the
//! whole iteration can run on the host against recording mocks. The firmware
//! binary provides the real implementations in `hw/`.
//!
//! # Failure contract
//!
//! One condition is recoverable by design: a battery monitor that cannot
//! report voltage returns `None` and the indicator silently draws nothing.
//! Every other failure surfaces as [`PortError`], propagates out of the loop,
//! and halts the firmware. There is no retry, no backoff, no degraded mode.

use core::fmt;

/// Error raised by a fallible port operation.
///
/// The loop does not distinguish causes beyond the subsystem; any of these
/// terminates the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortError {
    /// Environment or light sensor bus failure.
    Sensor,
    /// Display open or flush failure.
    Display,
    /// Log sink append failure.
    Storage,
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor => f.write_str("sensor bus failure"),
            Self::Display => f.write_str("display failure"),
            Self::Storage => f.write_str("log sink failure"),
        }
    }
}

/// An RGB color triple as the LED chain and display understand it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black, used to blank glyph interiors before drawing.
    pub const BLACK: Self = Self::new(0, 0, 0);
}

// =============================================================================
// Sensors
// =============================================================================

/// One reading from the gas/climate sensor.
///
/// Produced fresh each iteration; not retained beyond it except when logged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvReading {
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub humidity: f32,
    /// Barometric pressure in hPa.
    pub pressure: f32,
    /// Gas sensor resistance in Ohm.
    pub gas_resistance: u32,
}

/// Temperature/humidity/pressure/gas sensor (BME68x class).
pub trait EnvSensor {
    /// One-time sensor setup, called before the loop starts.
    fn init(&mut self) -> Result<(), PortError>;

    /// Take a fresh measurement.
    fn read(&mut self) -> Result<EnvReading, PortError>;
}

/// Ambient light sensor. The scalar is logged, never displayed.
pub trait LightSensor {
    fn read(&mut self) -> Result<f32, PortError>;
}

/// Battery voltage accessor.
pub trait BatteryMonitor {
    /// Current battery voltage, or `None` on hardware revisions that cannot
    /// report it. `None` is the one fail-soft condition in the system.
    fn voltage(&mut self) -> Option<f32>;
}

// =============================================================================
// Display
// =============================================================================

/// The display as a scoped resource: opened at the start of a frame, closed
/// when the handle drops. Release-on-drop guarantees the panel is never left
/// held across the inter-iteration sleep, even on an error path.
pub trait DisplayPort {
    type Screen<'a>: Screen
    where
        Self: 'a;

    fn open(&mut self) -> Result<Self::Screen<'_>, PortError>;
}

/// An open display surface.
///
/// Drawing calls are infallible buffer writes; only [`Screen::update`] talks
/// to the panel.
pub trait Screen {
    /// Blank the frame.
    fn clear(&mut self);

    /// Set the backlight level.
    fn backlight(&mut self, level: u8);

    /// Print a text line starting at the left edge of row `posy`.
    fn print(&mut self, text: &str, posy: i32);

    /// Draw a rectangle between corners `(x0, y0)` and `(x1, y1)`,
    /// outlined or filled.
    fn rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, filled: bool, color: Rgb);

    /// Push the frame to the panel.
    fn update(&mut self) -> Result<(), PortError>;
}

// =============================================================================
// LEDs and Buttons
// =============================================================================

/// The badge LED chain plus the three bright "rocket" LEDs.
pub trait Leds {
    /// Turn every chain LED off.
    fn clear(&mut self);

    /// Set one chain LED.
    fn set(&mut self, index: usize, color: Rgb);

    /// Set one rocket LED brightness (0..=15).
    fn set_rocket(&mut self, index: usize, brightness: u8);

    /// Rainbow wash across the chain at the given intensity (0.0..=1.0).
    fn rainbow(&mut self, intensity: f32);
}

/// Bit flag for the bottom-right button.
pub const BOTTOM_RIGHT: u8 = 1 << 1;

/// Bit flag for the top-right button.
pub const TOP_RIGHT: u8 = 1 << 2;

/// The two corner buttons.
pub trait Buttons {
    /// Return the subset of `mask` whose buttons had a press edge since the
    /// previous poll.
    fn read(&mut self, mask: u8) -> u8;
}

// =============================================================================
// Clock and Log Sink
// =============================================================================

/// Monotonic timestamp source for log lines.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Append-only sink for sensor log lines.
///
/// Lines arrive fully formatted and newline-terminated. The sink must not
/// reorder or buffer across iterations; there is no rotation and no header.
pub trait LogSink {
    fn append(&mut self, line: &str) -> Result<(), PortError>;
}
