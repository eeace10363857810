//! Battery indicator rendering.
//!
//! Pure policy: voltage selects a color band and a glyph geometry, then the
//! glyph is drawn onto an already-open screen. Neither `clear` nor `update`
//! is called here, so the indicator composes with the rest of the frame.
//!
//! Voltage is a rough charge proxy; the band thresholds in [`crate::config`]
//! are estimates, not calibration.

use crate::config::{BATT_CHARGING, BATT_EMPTY, BATT_GOOD, BATT_OK, BatteryConfig};
use crate::ports::{Rgb, Screen};

// Glyph bounding box, fixed top-right of the panel.
const BODY_X0: i32 = 140;
const BODY_Y0: i32 = 2;
const BODY_X1: i32 = 154;
const BODY_Y1: i32 = 9;
const NUB_X0: i32 = 155;
const NUB_Y0: i32 = 4;
const NUB_X1: i32 = 157;
const NUB_Y1: i32 = 7;

/// Pixels of interior fill bar per volt above [`BATT_EMPTY`].
const FILL_PX_PER_VOLT: f32 = 20.0;

/// Select the color band for a voltage.
///
/// Returns `None` when the indicator is disabled or the hardware revision
/// cannot report voltage; the caller then draws nothing.
pub fn color_for(bat: &BatteryConfig, voltage: Option<f32>) -> Option<Rgb> {
    if !bat.indicator {
        return None;
    }
    let v = voltage?;
    if v > BATT_GOOD {
        Some(bat.good)
    } else if v > BATT_OK {
        Some(bat.ok)
    } else {
        Some(bat.bad)
    }
}

/// Draw the battery glyph for `voltage` onto an open screen.
///
/// - Above [`BATT_CHARGING`] the glyph is a single filled rect (a cell only
///   exceeds nominal voltage while charging).
/// - Otherwise the body is blanked, outlined in the band color, and an
///   interior bar is filled with a width linear in the voltage, clipped by
///   the body box. No bar is drawn at or below [`BATT_EMPTY`].
/// - The terminal nub is drawn whenever a color was selected at all.
pub fn render<S: Screen>(screen: &mut S, bat: &BatteryConfig, voltage: Option<f32>) {
    let (Some(v), Some(color)) = (voltage, color_for(bat, voltage)) else {
        return;
    };

    if v > BATT_CHARGING {
        screen.rect(BODY_X0, BODY_Y0, NUB_X0, BODY_Y1, true, color);
    } else {
        screen.rect(BODY_X0, BODY_Y0, BODY_X1, BODY_Y1, true, Rgb::BLACK);
        screen.rect(BODY_X0, BODY_Y0, BODY_X1, BODY_Y1, false, color);
        if v > BATT_EMPTY {
            let width = ((v - BATT_EMPTY) * FILL_PX_PER_VOLT) as i32;
            screen.rect(BODY_X0 + 1, BODY_Y0 + 1, BODY_X0 + 2 + width, BODY_Y1 - 1, true, color);
        }
    }
    screen.rect(NUB_X0, NUB_Y0, NUB_X1, NUB_Y1, true, color);
}
