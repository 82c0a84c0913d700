//! Checksum used by the HTU21D on measurement words.
//!
//! The device appends an 8-bit CRC to every 16-bit measurement, generated by MSB-first polynomial
//! division with x^8 + x^5 + x^4 + 1.  The division below runs over a 24-bit register exactly as
//! the datasheet describes it so results match the sensor bit for bit.

use crate::hw_def::CRC_POLYNOMIAL;

/// polynomial aligned to the top of a 24-bit register (0x98_8000)
const SHIFTED_DIVISOR: u32 = CRC_POLYNOMIAL << 15;

/// Remainder of `(value << 8) | checksum` after dividing out the top 16 bit positions
const fn remainder(value: u16, checksum: u8) -> u8 {
    let mut remainder = (value as u32) << 8 | checksum as u32;
    let mut divisor = SHIFTED_DIVISOR;

    let mut bit = 24;
    while bit > 8 {
        bit -= 1;
        if remainder & (1 << bit) != 0 {
            remainder ^= divisor;
        }
        divisor >>= 1;
    }

    // bits 23..8 are now clear
    remainder as u8
}

/// Compute the checksum the sensor would send with `value`
pub const fn compute(value: u16) -> u8 {
    remainder(value, 0)
}

/// Check `value` against the `checksum` byte received with it
pub const fn validate(value: u16, checksum: u8) -> bool {
    remainder(value, checksum) == 0
}
