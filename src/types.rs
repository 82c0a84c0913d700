use crate::hw_def::*;

use core::fmt;

#[cfg(feature="defmt")]
use defmt::Format;

/// HTU21D(F) device driver
#[derive(Debug)]
pub struct Htu21d<I2C, Delay> {
    pub(crate) i2c: I2C,
    pub(crate) delay: Delay,
}

/// All possible errors in this crate
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error<E> {
    /// I²C communication error
    I2c(E),
    /// Invalid input data provided
    InvalidInputData,
    /// The device did not deliver a measurement within the polling window
    Timeout,
    /// Failure of a checksum from the device was detected
    CrcMismatch,
}
impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {e:?}"),
            Error::InvalidInputData => write!(f, "invalid input data"),
            Error::Timeout => write!(f, "timed out waiting for measurement"),
            Error::CrcMismatch => write!(f, "measurement checksum mismatch"),
        }
    }
}
impl<E: fmt::Debug> core::error::Error for Error<E> {}

/// Which quantity a measurement trigger asks for
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MeasurementKind {
    /// relative humidity
    Humidity,
    /// temperature
    Temperature,
}
impl MeasurementKind {
    pub(crate) const fn trigger_command(self) -> Command {
        match self {
            Self::Humidity => Command::TriggerRelHumidNoHold,
            Self::Temperature => Command::TriggerTempNoHold,
        }
    }
}

/// Measurement word from the device, checksum verified and status bits cleared
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RawMeasurement(u16);
impl RawMeasurement {
    /// Wrap a word read from the device, clearing the two status bits
    pub const fn from_word(word: u16) -> Self {
        Self(word & !MEASUREMENT_STATUS_MASK)
    }
    /// Get the unprocessed value
    pub const fn value(&self) -> u16 {
        self.0
    }
    /// Interpret as relative humidity in percent
    pub fn humidity_percent(&self) -> f32 {
        raw_rel_humid_to_percent(self.0)
    }
    /// Interpret as temperature in Centigrade
    pub fn centigrade(&self) -> f32 {
        raw_temp_to_centigrade(self.0)
    }
    /// Interpret as temperature in Fahrenheit
    pub fn fahrenheit(&self) -> f32 {
        raw_temp_to_fahrenheit(self.0)
    }
}

/// Temp and relative humidity from the device after conversion
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TempAndRelHumid {
    /// degrees centigrade
    pub centigrade: f32,
    /// degrees fahrenheit
    pub fahrenheit: f32,
    /// relative humidity in percent
    pub humidity_percent: f32,
}
impl TempAndRelHumid {
    pub(crate) fn from_raw(temperature: RawMeasurement, humidity: RawMeasurement) -> Self {
        Self {
            centigrade: temperature.centigrade(),
            fahrenheit: temperature.fahrenheit(),
            humidity_percent: humidity.humidity_percent(),
        }
    }
}

/// Measurement resolution, selected through the user register.
///
/// Lower resolutions convert faster.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Resolution {
    /// 12 bit humidity, 14 bit temperature (power-on default)
    #[default]
    Rh12Temp14,
    /// 8 bit humidity, 12 bit temperature
    Rh8Temp12,
    /// 10 bit humidity, 13 bit temperature
    Rh10Temp13,
    /// 11 bit humidity, 11 bit temperature
    Rh11Temp11,
}
impl Resolution {
    /// User register bits selecting this resolution (bits 7 and 0 only)
    pub const fn register_bits(self) -> u8 {
        match self {
            Self::Rh12Temp14 => 0,
            Self::Rh8Temp12 => 1 << USER_REG_BIT_RESOLUTION_LSB,
            Self::Rh10Temp13 => 1 << USER_REG_BIT_RESOLUTION_MSB,
            Self::Rh11Temp11 => USER_REG_RESOLUTION_MASK,
        }
    }
    /// Decode the resolution bits of a user register value, ignoring all other bits
    pub const fn from_register_bits(reg: u8) -> Self {
        let msb = reg & (1 << USER_REG_BIT_RESOLUTION_MSB) != 0;
        let lsb = reg & (1 << USER_REG_BIT_RESOLUTION_LSB) != 0;
        match (msb, lsb) {
            (false, false) => Self::Rh12Temp14,
            (false, true) => Self::Rh8Temp12,
            (true, false) => Self::Rh10Temp13,
            (true, true) => Self::Rh11Temp11,
        }
    }
    /// Humidity resolution in bits
    pub const fn humidity_bits(self) -> u8 {
        match self {
            Self::Rh12Temp14 => 12,
            Self::Rh8Temp12 => 8,
            Self::Rh10Temp13 => 10,
            Self::Rh11Temp11 => 11,
        }
    }
    /// Temperature resolution in bits
    pub const fn temperature_bits(self) -> u8 {
        match self {
            Self::Rh12Temp14 => 14,
            Self::Rh8Temp12 => 12,
            Self::Rh10Temp13 => 13,
            Self::Rh11Temp11 => 11,
        }
    }
}
impl TryFrom<u8> for Resolution {
    type Error = ();
    /// Levels 0 to 3, in datasheet order
    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::Rh12Temp14),
            1 => Ok(Self::Rh8Temp12),
            2 => Ok(Self::Rh10Temp13),
            3 => Ok(Self::Rh11Temp11),
            _ => Err(()),
        }
    }
}

/// Contents of the user (configuration) register.
///
/// The `with_*` builders only touch their own bits; reserved bits pass through unchanged so a
/// value read from the device can be modified and written back.
#[cfg_attr(feature = "defmt", derive(Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ConfigRegister(u8);
impl From<u8> for ConfigRegister {
    fn from(raw: u8) -> Self {
        Self(raw)
    }
}
impl From<ConfigRegister> for u8 {
    fn from(reg: ConfigRegister) -> Self {
        reg.0
    }
}
impl ConfigRegister {
    /// Get the raw register value
    pub const fn raw(&self) -> u8 {
        self.0
    }
    /// Currently selected resolution
    pub const fn resolution(&self) -> Resolution {
        Resolution::from_register_bits(self.0)
    }
    /// Same register with only the resolution bits replaced
    pub const fn with_resolution(self, resolution: Resolution) -> Self {
        Self((self.0 & !USER_REG_RESOLUTION_MASK) | (resolution.register_bits() & USER_REG_RESOLUTION_MASK))
    }
    /// On-chip heater is enabled
    pub const fn heater_enabled(&self) -> bool {
        self.0 & USER_REG_HEATER_MASK != 0
    }
    /// Same register with only the heater bit replaced
    pub const fn with_heater(self, enabled: bool) -> Self {
        if enabled {
            Self(self.0 | USER_REG_HEATER_MASK)
        } else {
            Self(self.0 & !USER_REG_HEATER_MASK)
        }
    }
    /// Supply voltage has dropped below 2.25 V (read-only status)
    pub const fn end_of_battery(&self) -> bool {
        self.0 & (1 << USER_REG_BIT_END_OF_BATTERY) != 0
    }
}
impl fmt::Display for ConfigRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resolution = self.resolution();
        write!(f, "ConfigRegister {{ 0x{:02x}; RH {} bit, T {} bit ",
            self.0, resolution.humidity_bits(), resolution.temperature_bits())?;
        if self.heater_enabled() {
            write!(f, "heater_enabled ")?;
        }
        if self.end_of_battery() {
            write!(f, "end_of_battery ")?;
        }
        write!(f, "}}")
    }
}

/// Convert a raw humidity word to relative humidity in percent.  No clamping is applied.
pub fn raw_rel_humid_to_percent(raw: u16) -> f32 {
    raw as f32 * RH_SLOPE + RH_OFFSET
}

/// Convert a raw temperature word to degrees Centigrade
pub fn raw_temp_to_centigrade(raw: u16) -> f32 {
    raw as f32 * TEMP_SLOPE + TEMP_OFFSET
}

/// Convert a raw temperature word to degrees Fahrenheit
pub fn raw_temp_to_fahrenheit(raw: u16) -> f32 {
    raw_temp_to_centigrade(raw) * 1.8 + 32.0
}
