//! Wire-level definitions for the HTU21D(F): bus address, command set, user register layout and
//! protocol timing.  Values are from the manufacturer's datasheet.

/// 7-bit I²C address of the device (not configurable)
pub const I2C_ADDR: u8 = 0x40;

/// Commands understood by the device.  Each is sent as a single byte.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub(crate) enum Command {
    TriggerTempNoHold = 0xF3,
    TriggerRelHumidNoHold = 0xF5,
    WriteUserRegister = 0xE6,
    ReadUserRegister = 0xE7,
    SoftReset = 0xFE,
}
impl Command {
    pub(crate) const fn to_be_bytes(self) -> [u8; 1] {
        [self as u8]
    }
}

/// delay between polls while waiting for a no-hold conversion to complete
pub(crate) const POLL_INTERVAL_MS: u32 = 10;
/// maximum number of polls before giving up; the datasheet quotes ~50 ms conversion time
pub(crate) const POLL_MAX_ATTEMPTS: u8 = 10;
/// time the device needs to reboot after a soft reset
pub(crate) const SOFT_RESET_DELAY_MS: u32 = 15;

/// number of bytes returned by a measurement: MSB, LSB, checksum
pub(crate) const MEASUREMENT_LEN: usize = 3;
/// the two low-order bits of a measurement word are status, not data
pub(crate) const MEASUREMENT_STATUS_MASK: u16 = 0b11;

/// 9-bit CRC polynomial x^8 + x^5 + x^4 + 1
pub(crate) const CRC_POLYNOMIAL: u32 = 0x0131;

// User register layout
pub(crate) const USER_REG_BIT_RESOLUTION_MSB: u8 = 7;
pub(crate) const USER_REG_BIT_END_OF_BATTERY: u8 = 6;
pub(crate) const USER_REG_BIT_HEATER_ENABLE: u8 = 2;
pub(crate) const USER_REG_BIT_RESOLUTION_LSB: u8 = 0;
pub(crate) const USER_REG_RESOLUTION_MASK: u8 =
    (1 << USER_REG_BIT_RESOLUTION_MSB) | (1 << USER_REG_BIT_RESOLUTION_LSB);
pub(crate) const USER_REG_HEATER_MASK: u8 = 1 << USER_REG_BIT_HEATER_ENABLE;

// Conversion curves, datasheet page 15
pub(crate) const RH_SLOPE: f32 = 125.0 / 65536.0;
pub(crate) const RH_OFFSET: f32 = -6.0;
pub(crate) const TEMP_SLOPE: f32 = 175.72 / 65536.0;
pub(crate) const TEMP_OFFSET: f32 = -46.85;
