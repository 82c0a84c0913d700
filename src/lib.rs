//! This is a platform-agnostic Rust driver for the HTU21D and HTU21DF low-cost, high-precision
//! humidity and temperature digital sensors using the [`embedded-hal`] traits.
//!
//! [`embedded-hal`]: https://github.com/rust-embedded/embedded-hal/tree/master/embedded-hal
//!
//! This driver allows you to:
//! - Trigger no-hold measurements of relative humidity and temperature and poll for the result.
//! - Verify the checksum sent with every measurement.
//! - Read and write the user register.
//! - Select one of the four measurement resolutions.
//! - Enable/disable the on-chip heater.
//! - Read the end-of-battery status bit.
//! - Trigger a software reset.
//!
//! This driver does not support the following device features:
//! - Hold-master measurements (the device stretches the clock until the conversion is done).
//! - Async API.
//!
//! ## Features
//!
//! - `blocking`: Enables blocking API.
//! - `defmt`: Enables logging using the `defmt` framework.
//! - `log`: Enables logging using the `log` framework.
//!
//! ## Supported devices: HTU21D, HTU21DF
//!
//! The HTU21D(F) is a digital humidity sensor with temperature output. Every measurement is
//! returned as a 16-bit word followed by an 8-bit CRC, and the conversion time depends on the
//! selected resolution (up to ~50 ms for 14-bit temperature). In no-hold mode the sensor does not
//! acknowledge reads until the conversion is finished, so the driver polls every 10 ms and gives
//! up after 10 attempts.
//!
//! Datasheet:
//!   [HTU21D(F)](https://cdn-shop.adafruit.com/datasheets/1899_HTU21D.pdf)
//!
//! To use this driver, import this crate and an `embedded_hal` implementation, then instantiate
//! the device.
//!
//! ## Example:
//!
//! ```no_run
//! use htu21d::{Error, Htu21d, Resolution};
//!
//! # fn run<I2C, Delay>(i2c: I2C, delay: Delay) -> Result<(), Error<I2C::Error>>
//! # where I2C: embedded_hal::i2c::I2c, Delay: embedded_hal::delay::DelayNs {
//! // Platform-specific: an embedded_hal::i2c::I2c and an embedded_hal::delay::DelayNs instance
//! let mut htu21d = Htu21d::new(i2c, delay);
//!
//! htu21d.set_resolution(Resolution::Rh12Temp14)?;
//!
//! match htu21d.read_humidity() {
//!     Ok(_humidity) => { /* e.g. 54.8 %RH */ }
//!     // The caller decides whether to retry
//!     Err(Error::Timeout | Error::CrcMismatch) => {}
//!     Err(e) => return Err(e),
//! }
//!
//! let datum = htu21d.measure()?;
//! let _ = (datum.humidity_percent, datum.centigrade);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(not(test), no_std)]

#[cfg(not(feature = "blocking"))]
compile_error!("The \"blocking\" feature must be enabled");

#[cfg(all(feature = "defmt", feature = "log"))]
compile_error!("Features \"defmt\" and \"log\" are mutually exclusive and cannot be enabled together");

pub mod crc8;
#[cfg(feature = "blocking")]
mod device_impl;
mod hw_def;
mod types;

pub use crate::{hw_def::*, types::*};
