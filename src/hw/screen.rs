//! ST7789 display behind the [`DisplayPort`] trait.
//!
//! Blocking SPI with a single static RGB565 framebuffer. The port hands out a
//! [`Frame`] per iteration; drawing calls write into the framebuffer and
//! `update` pushes the whole frame to the panel. Dropping the frame releases
//! the display, which satisfies the open/close-per-iteration contract.

use badge_envlog::ports::{DisplayPort, PortError, Rgb, Screen};
use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{Duration, block_for};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use profont::PROFONT_14_POINT;

/// Display dimensions (landscape mode after 90 degree rotation).
pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 240;
pub const BUFFER_SIZE: usize = WIDTH * HEIGHT * 2;

// ST7789 commands
const SWRESET: u8 = 0x01;
const SLPOUT: u8 = 0x11;
const NORON: u8 = 0x13;
const INVON: u8 = 0x21;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;
const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3A;

// MADCTL flags
const MADCTL_MX: u8 = 0x40;
const MADCTL_MV: u8 = 0x20;

/// Backlight PWM resolution; port levels are 0..=100.
const BACKLIGHT_TOP: u16 = 100;

fn rgb565(color: Rgb) -> Rgb565 {
    Rgb565::new(color.r >> 3, color.g >> 2, color.b >> 3)
}

/// ST7789 panel plus backlight, owning the framebuffer.
pub struct St7789<'d> {
    spi: Spi<'d, SPI0, Blocking>,
    dc: Output<'d>,
    cs: Output<'d>,
    backlight: Pwm<'d>,
    backlight_cfg: PwmConfig,
    framebuffer: &'static mut [u8; BUFFER_SIZE],
}

impl<'d> St7789<'d> {
    pub fn new(
        spi: Spi<'d, SPI0, Blocking>,
        dc: Output<'d>,
        cs: Output<'d>,
        mut backlight: Pwm<'d>,
        framebuffer: &'static mut [u8; BUFFER_SIZE],
    ) -> Self {
        let mut backlight_cfg = PwmConfig::default();
        backlight_cfg.top = BACKLIGHT_TOP;
        backlight_cfg.compare_a = 0;
        backlight.set_config(&backlight_cfg);
        Self {
            spi,
            dc,
            cs,
            backlight,
            backlight_cfg,
            framebuffer,
        }
    }

    /// Panel init sequence: reset, RGB565, landscape, inversion on.
    pub fn init(&mut self) {
        self.write_command(SWRESET);
        block_for(Duration::from_millis(150));

        self.write_command(SLPOUT);
        block_for(Duration::from_millis(10));

        self.write_command(COLMOD);
        self.write_data(&[0x55]);

        self.write_command(MADCTL);
        self.write_data(&[MADCTL_MV | MADCTL_MX]);

        self.write_command(INVON);
        block_for(Duration::from_millis(10));

        self.write_command(NORON);
        block_for(Duration::from_millis(10));

        self.write_command(DISPON);
        block_for(Duration::from_millis(10));

        // Window stays full-screen; update() only ever sends whole frames.
        self.set_window(0, 0, WIDTH as u16, HEIGHT as u16);
    }

    fn write_command(&mut self, cmd: u8) {
        self.cs.set_low();
        self.dc.set_low();
        self.spi.blocking_write(&[cmd]).ok();
        self.cs.set_high();
    }

    fn write_data(&mut self, data: &[u8]) {
        self.cs.set_low();
        self.dc.set_high();
        self.spi.blocking_write(data).ok();
        self.cs.set_high();
    }

    fn set_window(&mut self, x: u16, y: u16, w: u16, h: u16) {
        let x1 = x + w - 1;
        let y1 = y + h - 1;

        self.write_command(CASET);
        self.write_data(&[(x >> 8) as u8, x as u8, (x1 >> 8) as u8, x1 as u8]);

        self.write_command(RASET);
        self.write_data(&[(y >> 8) as u8, y as u8, (y1 >> 8) as u8, y1 as u8]);
    }

    fn flush(&mut self) -> Result<(), PortError> {
        self.cs.set_low();
        self.dc.set_low();
        self.spi.blocking_write(&[RAMWR]).map_err(|_| PortError::Display)?;
        self.dc.set_high();
        self.spi
            .blocking_write(&self.framebuffer[..])
            .map_err(|_| PortError::Display)?;
        self.cs.set_high();
        Ok(())
    }

    fn set_backlight(&mut self, level: u8) {
        self.backlight_cfg.compare_a = u16::from(level).min(BACKLIGHT_TOP);
        self.backlight.set_config(&self.backlight_cfg);
    }
}

impl<'d> DisplayPort for St7789<'d> {
    type Screen<'a>
        = Frame<'a, 'd>
    where
        Self: 'a;

    fn open(&mut self) -> Result<Self::Screen<'_>, PortError> {
        Ok(Frame { panel: self })
    }
}

/// One open frame on the panel.
pub struct Frame<'a, 'd> {
    panel: &'a mut St7789<'d>,
}

impl Frame<'_, '_> {
    fn fill_rect(&mut self, area: Rectangle, color: Rgb565) {
        area.into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut Target {
                framebuffer: &mut *self.panel.framebuffer,
            })
            .ok();
    }
}

impl Screen for Frame<'_, '_> {
    fn clear(&mut self) {
        self.panel.framebuffer.fill(0);
    }

    fn backlight(&mut self, level: u8) {
        self.panel.set_backlight(level);
    }

    fn print(&mut self, text: &str, posy: i32) {
        let style = MonoTextStyle::new(&PROFONT_14_POINT, Rgb565::WHITE);
        Text::with_baseline(text, Point::new(0, posy), style, Baseline::Top)
            .draw(&mut Target {
                framebuffer: &mut *self.panel.framebuffer,
            })
            .ok();
    }

    fn rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, filled: bool, color: Rgb) {
        let area = Rectangle::with_corners(Point::new(x0, y0), Point::new(x1, y1));
        if filled {
            self.fill_rect(area, rgb565(color));
        } else {
            area.into_styled(PrimitiveStyle::with_stroke(rgb565(color), 1))
                .draw(&mut Target {
                    framebuffer: &mut *self.panel.framebuffer,
                })
                .ok();
        }
    }

    fn update(&mut self) -> Result<(), PortError> {
        self.panel.flush()
    }
}

/// `DrawTarget` over the raw RGB565 framebuffer.
struct Target<'a> {
    framebuffer: &'a mut [u8; BUFFER_SIZE],
}

impl Target<'_> {
    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: Rgb565) {
        if x >= 0 && x < WIDTH as i32 && y >= 0 && y < HEIGHT as i32 {
            let idx = (y as usize * WIDTH + x as usize) * 2;
            let raw: RawU16 = color.into();
            let bytes = raw.into_inner().to_be_bytes();
            self.framebuffer[idx] = bytes[0];
            self.framebuffer[idx + 1] = bytes[1];
        }
    }
}

impl OriginDimensions for Target<'_> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Target<'_> {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }
}
