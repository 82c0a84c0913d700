use crate::crc8;
use crate::hw_def::*;
use crate::types::*;

use embedded_hal::{
    delay::DelayNs,
    i2c::{Error as I2cError, ErrorKind, I2c},
};

cfg_if::cfg_if! {
    if #[cfg(feature = "defmt")] {
        use defmt::{trace, warn};
    } else if #[cfg(feature = "log")] {
        use log::{trace, warn};
    } else {
        macro_rules! trace {
            ($($arg:tt)*) => {};
        }
        macro_rules! warn {
            ($($arg:tt)*) => {};
        }
    }
}

// Every public operation here is one complete bus exchange (trigger, poll, fetch).  Sharing the
// bus between drivers is left to the I2c implementation, e.g. embedded-hal-bus's mutex devices.
impl<I2C, Delay, E> Htu21d<I2C, Delay>
where
    I2C: I2c<Error = E>,
    E: I2cError,
    Delay: DelayNs,
{
    /// Create a new HTU21D driver instance
    pub fn new(i2c: I2C, delay: Delay) -> Self {
        Self { i2c, delay }
    }

    /// Destroy the driver and give back the bus and delay
    pub fn release(self) -> (I2C, Delay) {
        (self.i2c, self.delay)
    }

    fn send_command(&mut self, cmd: Command) -> Result<(), Error<E>> {
        self.i2c.write(I2C_ADDR, &cmd.to_be_bytes()).map_err(Error::I2c)
    }

    /// Wait for a triggered conversion and fetch MSB, LSB and checksum.
    ///
    /// The device NACKs its read address until the conversion is done, so a NACK means "not ready"
    /// and is polled again.  Any other bus error ends the exchange.
    fn poll_measurement(&mut self) -> Result<[u8; MEASUREMENT_LEN], Error<E>> {
        let mut read_buf = [0u8; MEASUREMENT_LEN];
        for attempt in 1..=POLL_MAX_ATTEMPTS {
            self.delay.delay_ms(POLL_INTERVAL_MS);
            match self.i2c.read(I2C_ADDR, &mut read_buf) {
                Ok(()) => {
                    trace!("htu21d::poll_measurement(): ready after {} polls: {:?}", attempt, read_buf);
                    return Ok(read_buf);
                }
                Err(i2c_err) if matches!(i2c_err.kind(), ErrorKind::NoAcknowledge(_)) => {
                    trace!("htu21d::poll_measurement(): not ready, poll {}/{}", attempt, POLL_MAX_ATTEMPTS);
                }
                Err(i2c_err) => return Err(Error::I2c(i2c_err)),
            }
        }
        warn!("htu21d::poll_measurement(): no measurement after {} polls", POLL_MAX_ATTEMPTS);
        Err(Error::Timeout)
    }

    /// Trigger a no-hold measurement and return the verified raw word
    pub fn read_raw(&mut self, kind: MeasurementKind) -> Result<RawMeasurement, Error<E>> {
        self.send_command(kind.trigger_command())?;
        let [msb, lsb, checksum] = self.poll_measurement()?;
        let word = u16::from_be_bytes([msb, lsb]);
        if !crc8::validate(word, checksum) {
            warn!("htu21d::read_raw(): crc mismatch: word={}, crc={}, crc_expect={}",
                word, checksum, crc8::compute(word));
            return Err(Error::CrcMismatch);
        }
        Ok(RawMeasurement::from_word(word))
    }

    /// Measure relative humidity in percent
    pub fn read_humidity(&mut self) -> Result<f32, Error<E>> {
        Ok(self.read_raw(MeasurementKind::Humidity)?.humidity_percent())
    }

    /// Measure temperature in Centigrade
    pub fn read_temperature(&mut self) -> Result<f32, Error<E>> {
        Ok(self.read_raw(MeasurementKind::Temperature)?.centigrade())
    }

    /// Measure humidity, then temperature
    pub fn measure(&mut self) -> Result<TempAndRelHumid, Error<E>> {
        let humidity = self.read_raw(MeasurementKind::Humidity)?;
        let temperature = self.read_raw(MeasurementKind::Temperature)?;
        Ok(TempAndRelHumid::from_raw(temperature, humidity))
    }

    /// Read the user register.  Register reads carry no checksum.
    pub fn read_config_register(&mut self) -> Result<ConfigRegister, Error<E>> {
        let mut read_buf = [0u8; 1];
        self.i2c
            .write_read(I2C_ADDR, &Command::ReadUserRegister.to_be_bytes(), &mut read_buf)
            .map_err(Error::I2c)?;
        let reg = ConfigRegister::from(read_buf[0]);
        trace!("htu21d::read_config_register(): {}", reg.raw());
        Ok(reg)
    }

    /// Write the user register as-is.
    ///
    /// Reserved bits must hold the values last read from the device; prefer
    /// [`set_resolution`](Self::set_resolution) and [`set_heater`](Self::set_heater).
    pub fn write_config_register(&mut self, reg: ConfigRegister) -> Result<(), Error<E>> {
        let [cmd] = Command::WriteUserRegister.to_be_bytes();
        trace!("htu21d::write_config_register(): {}", reg.raw());
        self.i2c.write(I2C_ADDR, &[cmd, reg.raw()]).map_err(Error::I2c)
    }

    /// Select the measurement resolution, leaving all other register bits untouched
    pub fn set_resolution(&mut self, resolution: Resolution) -> Result<(), Error<E>> {
        let reg = self.read_config_register()?;
        self.write_config_register(reg.with_resolution(resolution))
    }

    /// Select the measurement resolution by datasheet level (0 to 3)
    pub fn set_resolution_level(&mut self, level: u8) -> Result<(), Error<E>> {
        let resolution = Resolution::try_from(level).map_err(|_| Error::InvalidInputData)?;
        self.set_resolution(resolution)
    }

    /// Enable or disable the on-chip heater, leaving all other register bits untouched
    pub fn set_heater(&mut self, enabled: bool) -> Result<(), Error<E>> {
        let reg = self.read_config_register()?;
        self.write_config_register(reg.with_heater(enabled))
    }

    /// Software reset; the user register returns to its power-on default except the heater bit
    pub fn soft_reset(&mut self) -> Result<(), Error<E>> {
        self.send_command(Command::SoftReset)?;
        self.delay.delay_ms(SOFT_RESET_DELAY_MS);
        Ok(())
    }
}
