//! Corner buttons behind the [`Buttons`] port.
//!
//! Active-low inputs with time-based debouncing. The port reports press
//! edges: a bit is set only on the poll where the button went down.

use badge_envlog::ports::{BOTTOM_RIGHT, Buttons, TOP_RIGHT};
use embassy_rp::gpio::Input;
use embassy_time::{Duration, Instant};

/// Debounce duration in milliseconds.
const DEBOUNCE_MS: u64 = 50;

/// Edge detector for one button with contact-bounce suppression.
struct ButtonState {
    was_pressed: bool,
    last_change: Option<Instant>,
}

impl ButtonState {
    const fn new() -> Self {
        Self {
            was_pressed: false,
            last_change: None,
        }
    }

    /// Returns true only on the falling edge (button just pressed).
    fn just_pressed(&mut self, is_low: bool) -> bool {
        if is_low != self.was_pressed {
            if let Some(last) = self.last_change
                && last.elapsed() < Duration::from_millis(DEBOUNCE_MS)
            {
                return false;
            }

            self.was_pressed = is_low;
            self.last_change = Some(Instant::now());

            return is_low;
        }

        false
    }
}

/// The two right-edge buttons of the badge.
pub struct CornerButtons<'d> {
    top_right: Input<'d>,
    bottom_right: Input<'d>,
    top_state: ButtonState,
    bottom_state: ButtonState,
}

impl<'d> CornerButtons<'d> {
    pub fn new(top_right: Input<'d>, bottom_right: Input<'d>) -> Self {
        Self {
            top_right,
            bottom_right,
            top_state: ButtonState::new(),
            bottom_state: ButtonState::new(),
        }
    }
}

impl Buttons for CornerButtons<'_> {
    fn read(&mut self, mask: u8) -> u8 {
        let mut edges = 0;
        if self.top_state.just_pressed(self.top_right.is_low()) {
            edges |= TOP_RIGHT;
        }
        if self.bottom_state.just_pressed(self.bottom_right.is_low()) {
            edges |= BOTTOM_RIGHT;
        }
        edges & mask
    }
}
