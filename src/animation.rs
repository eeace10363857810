//! LED animation mode state machine.
//!
//! A counter in 0..=6, advanced only by button press edges: bottom-right
//! adds 1, top-right adds 2, and both may stack within one poll. A result
//! above 6 wraps to 0 before the mode is acted on, so exactly one mode's LED
//! sequence runs per poll - never a fallthrough of several.
//!
//! The mode is loop-owned state; it is not persisted across restarts.

use crate::ports::{BOTTOM_RIGHT, Leds, Rgb, TOP_RIGHT};

/// Highest animation mode before the counter wraps back to 0.
pub const MODE_MAX: u8 = 6;

/// Number of LEDs in the chain.
pub const LED_COUNT: usize = 15;

/// First LED of the 4-LED top-edge highlight used by mode 5.
const HIGHLIGHT_FIRST: usize = 11;

const GRAY_HIGHLIGHT: Rgb = Rgb::new(127, 127, 127);
const GRAY_WASH: Rgb = Rgb::new(120, 120, 120);

/// Advance the mode counter for one poll's press edges.
///
/// Returns the new mode. With no edges the mode is unchanged.
pub fn advance(mode: u8, pressed: u8) -> u8 {
    let mut next = mode;
    if pressed & BOTTOM_RIGHT != 0 {
        next += 1;
    }
    if pressed & TOP_RIGHT != 0 {
        next += 2;
    }
    if next > MODE_MAX { 0 } else { next }
}

/// Drive the LED chain for the current mode.
///
/// One fixed call sequence per mode; the rainbow modes deliberately skip the
/// clear so the wash fades over whatever the chain showed before.
pub fn apply<L: Leds>(leds: &mut L, mode: u8) {
    match mode {
        0 => {
            leds.clear();
            rockets_off(leds);
        }
        1 => {
            rockets_off(leds);
            leds.rainbow(0.2);
        }
        2 => {
            rockets_off(leds);
            leds.rainbow(0.6);
        }
        3 => {
            leds.clear();
            leds.set_rocket(0, 2);
            leds.set_rocket(1, 15);
            leds.set_rocket(2, 15);
        }
        4 => {
            leds.clear();
            leds.set_rocket(0, 15);
            leds.set_rocket(1, 15);
            leds.set_rocket(2, 15);
        }
        5 => {
            leds.clear();
            rockets_off(leds);
            for i in HIGHLIGHT_FIRST..HIGHLIGHT_FIRST + 4 {
                leds.set(i, GRAY_HIGHLIGHT);
            }
        }
        _ => {
            leds.clear();
            rockets_off(leds);
            for i in 0..LED_COUNT {
                leds.set(i, GRAY_WASH);
            }
        }
    }
}

fn rockets_off<L: Leds>(leds: &mut L) {
    leds.set_rocket(0, 0);
    leds.set_rocket(1, 0);
    leds.set_rocket(2, 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{LedOp, MockLeds};

    #[test]
    fn advance_without_edges_keeps_mode() {
        for mode in 0..=MODE_MAX {
            assert_eq!(advance(mode, 0), mode);
        }
    }

    #[test]
    fn bottom_right_adds_one_top_right_adds_two() {
        assert_eq!(advance(0, BOTTOM_RIGHT), 1);
        assert_eq!(advance(0, TOP_RIGHT), 2);
        assert_eq!(advance(3, BOTTOM_RIGHT | TOP_RIGHT), 6);
    }

    #[test]
    fn wraps_to_zero_past_mode_max() {
        assert_eq!(advance(6, BOTTOM_RIGHT), 0);
        assert_eq!(advance(5, TOP_RIGHT), 0);
        // 6 + 1 + 2 = 9 wraps straight to 0, not 2
        assert_eq!(advance(6, BOTTOM_RIGHT | TOP_RIGHT), 0);
    }

    #[test]
    fn wrapped_mode_runs_only_the_mode_zero_sequence() {
        let mode = advance(6, BOTTOM_RIGHT | TOP_RIGHT);
        let mut leds = MockLeds::new();
        apply(&mut leds, mode);
        assert_eq!(
            leds.ops,
            vec![
                LedOp::Clear,
                LedOp::Rocket(0, 0),
                LedOp::Rocket(1, 0),
                LedOp::Rocket(2, 0),
            ]
        );
    }

    #[test]
    fn rainbow_modes_skip_the_clear() {
        for (mode, intensity) in [(1u8, 0.2f32), (2, 0.6)] {
            let mut leds = MockLeds::new();
            apply(&mut leds, mode);
            assert!(!leds.ops.contains(&LedOp::Clear));
            assert_eq!(*leds.ops.last().unwrap(), LedOp::Rainbow(intensity));
        }
    }

    #[test]
    fn mode_five_highlights_the_top_edge() {
        let mut leds = MockLeds::new();
        apply(&mut leds, 5);
        let set_indices: Vec<usize> = leds
            .ops
            .iter()
            .filter_map(|op| match op {
                LedOp::Set(i, _) => Some(*i),
                _ => None,
            })
            .collect();
        assert_eq!(set_indices, vec![11, 12, 13, 14]);
    }

    #[test]
    fn mode_six_washes_the_whole_chain() {
        let mut leds = MockLeds::new();
        apply(&mut leds, 6);
        let sets = leds
            .ops
            .iter()
            .filter(|op| matches!(op, LedOp::Set(_, _)))
            .count();
        assert_eq!(sets, LED_COUNT);
    }
}
