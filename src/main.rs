//! Badge environment logger firmware for the RP2350.
//!
//! Polls a BME688 gas/climate sensor and a BH1750 ambient light sensor,
//! renders the readings plus a battery glyph to the ST7789 panel, cycles an
//! LED animation mode from the two right-edge buttons, and appends a log
//! line on the configured cadence. One sequential loop; any driver failure
//! is fatal by design.
//!
//! # Button Controls
//!
//! - **Top-right**: animation mode +2
//! - **Bottom-right**: animation mode +1 (wraps to 0 past 6)

#![cfg_attr(target_arch = "arm", no_std)]
#![cfg_attr(target_arch = "arm", no_main)]
// Crate-level lints (match lib.rs for consistency)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

#[cfg(target_arch = "arm")]
mod hw;

#[cfg(target_arch = "arm")]
mod firmware {
    use badge_envlog::app::{self, LoopState};
    use badge_envlog::config::{BATTERY, INTERACTIVE};
    use bosch_bme680::{Bme680, Configuration, DeviceAddress};
    use core::cell::RefCell;
    use defmt::info;
    use embassy_executor::Spawner;
    use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
    use embassy_rp::bind_interrupts;
    use embassy_rp::gpio::{Input, Level, Output, Pull};
    use embassy_rp::i2c::{Config as I2cConfig, I2c};
    use embassy_rp::peripherals::PIO0;
    use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
    use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
    use embassy_rp::pwm::Pwm;
    use embassy_rp::spi::{Config as SpiConfig, Spi};
    use embassy_time::{Delay, Timer};
    use embedded_hal_bus::i2c::RefCellDevice;
    use static_cell::StaticCell;
    use {defmt_rtt as _, panic_probe as _};

    use crate::hw::Uptime;
    use crate::hw::inputs::CornerButtons;
    use crate::hw::leds::LedChain;
    use crate::hw::logsink::RingLog;
    use crate::hw::power::VsysMonitor;
    use crate::hw::screen::{BUFFER_SIZE, St7789};
    use crate::hw::sensors::{AmbientLight, Bme688};

    bind_interrupts!(struct Irqs {
        PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
    });

    fn display_spi_config() -> SpiConfig {
        let mut config = SpiConfig::default();
        config.frequency = 62_500_000;
        config
    }

    #[embassy_executor::main]
    async fn main(_spawner: Spawner) {
        info!("badge-envlog starting...");
        let p = embassy_rp::init(Default::default());

        // Display: ST7789 over blocking SPI0, backlight on PWM
        let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, display_spi_config());
        let dc = Output::new(p.PIN_16, Level::Low);
        let cs = Output::new(p.PIN_17, Level::High);
        let backlight = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_20, Default::default());

        static FRAMEBUFFER: StaticCell<[u8; BUFFER_SIZE]> = StaticCell::new();
        let framebuffer = FRAMEBUFFER.init([0; BUFFER_SIZE]);
        let mut display = St7789::new(spi, dc, cs, backlight, framebuffer);
        display.init();
        info!("Display initialized");

        // Shared I2C0 bus: BME688 + BH1750
        let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, I2cConfig::default());
        let i2c_bus = RefCell::new(i2c);

        let bme = Bme680::new(
            RefCellDevice::new(&i2c_bus),
            DeviceAddress::Primary,
            Delay,
            &Configuration::default(),
            20,
        )
        .expect("BME688 probe failed");
        let mut env = Bme688::new(bme);
        let mut light = AmbientLight::new(bh1750::BH1750::new(RefCellDevice::new(&i2c_bus), Delay, false));

        // Battery sense on the VSYS divider
        let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
        let vsys = Channel::new_pin(p.PIN_29, Pull::None);
        let mut battery = VsysMonitor::new(adc, vsys);

        // LED chain via PIO, rockets on PWM
        let Pio { mut common, sm0, .. } = Pio::new(p.PIO0, Irqs);
        let program = PioWs2812Program::new(&mut common);
        let ws2812 = PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_8, &program);
        let rockets = [
            Pwm::new_output_a(p.PWM_SLICE0, p.PIN_0, Default::default()),
            Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, Default::default()),
            Pwm::new_output_a(p.PWM_SLICE3, p.PIN_6, Default::default()),
        ];
        let mut leds = LedChain::new(ws2812, rockets);

        // Right-edge buttons, active low
        let mut buttons = CornerButtons::new(
            Input::new(p.PIN_14, Pull::Up),
            Input::new(p.PIN_15, Pull::Up),
        );

        let mut log = RingLog::new();
        let clock = Uptime;

        app::startup(&mut env, &mut display, &mut leds).expect("startup failed");
        leds.flush().await;
        info!("Main loop starting");

        let cfg = INTERACTIVE;
        let mut state = LoopState::new();
        loop {
            app::step(
                &mut state,
                &cfg,
                &BATTERY,
                &mut env,
                &mut light,
                &mut battery,
                &mut display,
                &mut leds,
                &mut buttons,
                &clock,
                &mut log,
            )
            .expect("loop iteration failed");
            leds.flush().await;
            Timer::after_millis(cfg.sleep_ms).await;
        }
    }
}

/// The firmware entry point only exists on the ARM target; host builds carry
/// the test suite in the library.
#[cfg(not(target_arch = "arm"))]
fn main() {
    eprintln!("badge-envlog is firmware; build for the RP2350 target");
}
