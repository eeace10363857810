//! Recording mock ports for host-side tests.
//!
//! Each mock records the exact call sequence it received so tests can assert
//! on ordering and arguments, not just end state.

use std::collections::VecDeque;

use crate::ports::{
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
    Rgb,
    Screen,
};

// =============================================================================
// Screen / Display
// =============================================================================

/// One recorded drawing call.
#[derive(Clone, Debug, PartialEq)]
pub enum ScreenOp {
    Clear,
    Backlight(u8),
    Print(String, i32),
    Rect {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        filled: bool,
        color: Rgb,
    },
    Update,
}

/// A rect call flattened out for convenient assertions.
#[derive(Clone, Debug, PartialEq)]
pub struct RectCall {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    pub filled: bool,
    pub color: Rgb,
}

fn rects_of(ops: &[ScreenOp]) -> Vec<RectCall> {
    ops.iter()
        .filter_map(|op| match *op {
            ScreenOp::Rect {
                x0,
                y0,
                x1,
                y1,
                filled,
                color,
            } => Some(RectCall {
                x0,
                y0,
                x1,
                y1,
                filled,
                color,
            }),
            _ => None,
        })
        .collect()
}

/// Standalone screen for unit tests that draw onto one surface.
#[derive(Default)]
pub struct MockScreen {
    pub ops: Vec<ScreenOp>,
}

impl MockScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rects(&self) -> Vec<RectCall> {
        rects_of(&self.ops)
    }
}

impl Screen for MockScreen {
    fn clear(&mut self) {
        self.ops.push(ScreenOp::Clear);
    }

    fn backlight(&mut self, level: u8) {
        self.ops.push(ScreenOp::Backlight(level));
    }

    fn print(&mut self, text: &str, posy: i32) {
        self.ops.push(ScreenOp::Print(text.to_owned(), posy));
    }

    fn rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, filled: bool, color: Rgb) {
        self.ops.push(ScreenOp::Rect {
            x0,
            y0,
            x1,
            y1,
            filled,
            color,
        });
    }

    fn update(&mut self) -> Result<(), PortError> {
        self.ops.push(ScreenOp::Update);
        Ok(())
    }
}

/// Display port recording one op list per opened frame, plus open/close
/// counts to verify the scoped-resource contract.
#[derive(Default)]
pub struct MockDisplay {
    pub frames: Vec<Vec<ScreenOp>>,
    pub open_count: usize,
    pub close_count: usize,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Print calls of the most recent frame, as `(text, posy)` pairs.
    pub fn last_frame_prints(&self) -> Vec<(String, i32)> {
        self.frames
            .last()
            .map(|ops| {
                ops.iter()
                    .filter_map(|op| match op {
                        ScreenOp::Print(text, posy) => Some((text.clone(), *posy)),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Rect calls of the most recent frame.
    pub fn last_frame_rects(&self) -> Vec<RectCall> {
        self.frames.last().map(|ops| rects_of(ops)).unwrap_or_default()
    }
}

pub struct MockFrame<'a> {
    display: &'a mut MockDisplay,
}

impl MockFrame<'_> {
    fn push(&mut self, op: ScreenOp) {
        self.display
            .frames
            .last_mut()
            .expect("frame op before open")
            .push(op);
    }
}

impl Screen for MockFrame<'_> {
    fn clear(&mut self) {
        self.push(ScreenOp::Clear);
    }

    fn backlight(&mut self, level: u8) {
        self.push(ScreenOp::Backlight(level));
    }

    fn print(&mut self, text: &str, posy: i32) {
        self.push(ScreenOp::Print(text.to_owned(), posy));
    }

    fn rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, filled: bool, color: Rgb) {
        self.push(ScreenOp::Rect {
            x0,
            y0,
            x1,
            y1,
            filled,
            color,
        });
    }

    fn update(&mut self) -> Result<(), PortError> {
        self.push(ScreenOp::Update);
        Ok(())
    }
}

impl Drop for MockFrame<'_> {
    fn drop(&mut self) {
        self.display.close_count += 1;
    }
}

impl DisplayPort for MockDisplay {
    type Screen<'a>
        = MockFrame<'a>
    where
        Self: 'a;

    fn open(&mut self) -> Result<Self::Screen<'_>, PortError> {
        self.open_count += 1;
        self.frames.push(Vec::new());
        Ok(MockFrame { display: self })
    }
}

// =============================================================================
// Sensors
// =============================================================================

pub struct MockEnv {
    pub reading: EnvReading,
    pub init_count: usize,
    pub read_count: usize,
}

impl MockEnv {
    pub fn new(reading: EnvReading) -> Self {
        Self {
            reading,
            init_count: 0,
            read_count: 0,
        }
    }
}

impl EnvSensor for MockEnv {
    fn init(&mut self) -> Result<(), PortError> {
        self.init_count += 1;
        Ok(())
    }

    fn read(&mut self) -> Result<EnvReading, PortError> {
        self.read_count += 1;
        Ok(self.reading)
    }
}

pub struct MockLight(pub f32);

impl LightSensor for MockLight {
    fn read(&mut self) -> Result<f32, PortError> {
        Ok(self.0)
    }
}

pub struct MockBattery(pub Option<f32>);

impl BatteryMonitor for MockBattery {
    fn voltage(&mut self) -> Option<f32> {
        self.0
    }
}

// =============================================================================
// LEDs and Buttons
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LedOp {
    Clear,
    Set(usize, Rgb),
    Rocket(usize, u8),
    Rainbow(f32),
}

#[derive(Default)]
pub struct MockLeds {
    pub ops: Vec<LedOp>,
}

impl MockLeds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Leds for MockLeds {
    fn clear(&mut self) {
        self.ops.push(LedOp::Clear);
    }

    fn set(&mut self, index: usize, color: Rgb) {
        self.ops.push(LedOp::Set(index, color));
    }

    fn set_rocket(&mut self, index: usize, brightness: u8) {
        self.ops.push(LedOp::Rocket(index, brightness));
    }

    fn rainbow(&mut self, intensity: f32) {
        self.ops.push(LedOp::Rainbow(intensity));
    }
}

/// Buttons scripted with one edge mask per poll; empty script means idle.
#[derive(Default)]
pub struct MockButtons {
    pub script: VecDeque<u8>,
}

impl MockButtons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripted(edges: &[u8]) -> Self {
        Self {
            script: edges.iter().copied().collect(),
        }
    }
}

impl Buttons for MockButtons {
    fn read(&mut self, mask: u8) -> u8 {
        self.script.pop_front().unwrap_or(0) & mask
    }
}

// =============================================================================
// Clock and Log Sink
// =============================================================================

pub struct MockClock(pub u64);

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.0
    }
}

#[derive(Default)]
pub struct MockLog {
    pub lines: Vec<String>,
}

impl MockLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LogSink for MockLog {
    fn append(&mut self, line: &str) -> Result<(), PortError> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}
