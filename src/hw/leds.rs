//! Badge LEDs: WS2812 chain via PIO plus three PWM "rocket" LEDs.
//!
//! The [`Leds`] port is synchronous, but the WS2812 DMA transfer is async, so
//! port calls mutate a local color buffer and the main loop calls
//! [`LedChain::flush`] after each step.

use badge_envlog::animation::LED_COUNT;
use badge_envlog::ports::{Leds, Rgb};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio_programs::ws2812::PioWs2812;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use smart_leds::RGB8;

/// Rocket brightness full scale (card-style 0..=15).
const ROCKET_TOP: u16 = 15;

/// Color wheel: 0..255 maps around the hue circle.
fn wheel(mut pos: u8) -> RGB8 {
    pos = 255 - pos;
    if pos < 85 {
        return (255 - pos * 3, 0, pos * 3).into();
    }
    if pos < 170 {
        pos -= 85;
        return (0, pos * 3, 255 - pos * 3).into();
    }
    pos -= 170;
    (pos * 3, 255 - pos * 3, 0).into()
}

fn scale(c: RGB8, intensity: f32) -> RGB8 {
    let s = intensity.clamp(0.0, 1.0);
    RGB8::new(
        (f32::from(c.r) * s) as u8,
        (f32::from(c.g) * s) as u8,
        (f32::from(c.b) * s) as u8,
    )
}

pub struct LedChain<'d> {
    ws2812: PioWs2812<'d, PIO0, 0, LED_COUNT>,
    chain: [RGB8; LED_COUNT],
    rockets: [Pwm<'d>; 3],
    rocket_cfg: PwmConfig,
    dirty: bool,
}

impl<'d> LedChain<'d> {
    pub fn new(ws2812: PioWs2812<'d, PIO0, 0, LED_COUNT>, rockets: [Pwm<'d>; 3]) -> Self {
        let mut rocket_cfg = PwmConfig::default();
        rocket_cfg.top = ROCKET_TOP;
        rocket_cfg.compare_a = 0;
        Self {
            ws2812,
            chain: [RGB8::default(); LED_COUNT],
            rockets,
            rocket_cfg,
            dirty: false,
        }
    }

    /// Push the chain buffer out over PIO if anything changed.
    pub async fn flush(&mut self) {
        if self.dirty {
            self.ws2812.write(&self.chain).await;
            self.dirty = false;
        }
    }
}

impl Leds for LedChain<'_> {
    fn clear(&mut self) {
        self.chain = [RGB8::default(); LED_COUNT];
        self.dirty = true;
    }

    fn set(&mut self, index: usize, color: Rgb) {
        if index < LED_COUNT {
            self.chain[index] = RGB8::new(color.r, color.g, color.b);
            self.dirty = true;
        }
    }

    fn set_rocket(&mut self, index: usize, brightness: u8) {
        if let Some(pwm) = self.rockets.get_mut(index) {
            self.rocket_cfg.compare_a = u16::from(brightness).min(ROCKET_TOP);
            pwm.set_config(&self.rocket_cfg);
        }
    }

    fn rainbow(&mut self, intensity: f32) {
        for (i, led) in self.chain.iter_mut().enumerate() {
            let pos = (i * 256 / LED_COUNT) as u8;
            *led = scale(wheel(pos), intensity);
        }
        self.dirty = true;
    }
}
