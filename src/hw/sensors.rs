//! BME688 and BH1750 bindings on the shared I2C bus.

use badge_envlog::ports::{EnvReading, EnvSensor, LightSensor, PortError};
use bh1750::{BH1750, Resolution};
use bosch_bme680::Bme680;
use embassy_time::Delay;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

/// Gas/climate sensor port over a `bosch-bme680` driver instance.
pub struct Bme688<I2C> {
    driver: Bme680<I2C, Delay>,
}

impl<I2C> Bme688<I2C>
where
    I2C: I2c,
{
    pub fn new(driver: Bme680<I2C, Delay>) -> Self {
        Self { driver }
    }
}

impl<I2C> EnvSensor for Bme688<I2C>
where
    I2C: I2c,
{
    fn init(&mut self) -> Result<(), PortError> {
        // The driver configures the chip in its constructor; one discarded
        // measurement warms up the gas hot plate.
        self.driver.measure().map(|_| ()).map_err(|_| PortError::Sensor)
    }

    fn read(&mut self) -> Result<EnvReading, PortError> {
        let data = self.driver.measure().map_err(|_| PortError::Sensor)?;
        Ok(EnvReading {
            temperature: data.temperature,
            humidity: data.humidity,
            pressure: data.pressure,
            gas_resistance: data.gas_resistance.unwrap_or(0.0) as u32,
        })
    }
}

/// Ambient light port over a BH1750 in one-time high-resolution mode.
pub struct AmbientLight<I2C, D> {
    driver: BH1750<I2C, D>,
}

impl<I2C, D> AmbientLight<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(driver: BH1750<I2C, D>) -> Self {
        Self { driver }
    }
}

impl<I2C, D> LightSensor for AmbientLight<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn read(&mut self) -> Result<f32, PortError> {
        self.driver
            .get_one_time_measurement(Resolution::High)
            .map_err(|_| PortError::Sensor)
    }
}
