use embedded_hal::{
    delay::DelayNs,
    i2c::{ErrorKind, NoAcknowledgeSource},
};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use htu21d::{ConfigRegister, Error, Htu21d, I2C_ADDR, MeasurementKind, Resolution};

/// Records every requested delay in milliseconds instead of sleeping
#[derive(Debug, Default)]
struct RecordingDelay {
    delays_ms: Vec<u32>,
}
impl RecordingDelay {
    fn total_ms(&self) -> u32 {
        self.delays_ms.iter().sum()
    }
}
impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.delays_ms.push(ns / 1_000_000);
    }
    fn delay_ms(&mut self, ms: u32) {
        self.delays_ms.push(ms);
    }
}

const NACK: ErrorKind = ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address);

fn not_ready() -> I2cTransaction {
    I2cTransaction::read(I2C_ADDR, vec![0; 3]).with_error(NACK)
}

fn assert_close(actual: f32, expected: f32) {
    assert!((actual - expected).abs() < 1e-3, "actual={actual}, expected={expected}");
}

fn finish(htu21d: Htu21d<I2cMock, RecordingDelay>) -> RecordingDelay {
    let (mut i2c, delay) = htu21d.release();
    // Finalise expectations
    i2c.done();
    delay
}

#[test]
fn humidity_end_to_end() {
    let i2c = I2cMock::new(&[
        I2cTransaction::write(I2C_ADDR, vec![0xF5]),
        not_ready(),
        not_ready(),
        I2cTransaction::read(I2C_ADDR, vec![0x4E, 0x85, 0x6B]),
    ]);
    let mut htu21d = Htu21d::new(i2c, RecordingDelay::default());

    let humidity = htu21d.read_humidity().unwrap();
    // 0x4E85 with status bits cleared is 0x4E84
    assert_close(humidity, 0x4E84 as f32 * 125.0 / 65536.0 - 6.0);
    assert_close(humidity, 32.3377);

    let delay = finish(htu21d);
    assert_eq!(delay.delays_ms, vec![10, 10, 10]);
}

#[test]
fn temperature_first_poll() {
    let i2c = I2cMock::new(&[
        I2cTransaction::write(I2C_ADDR, vec![0xF3]),
        I2cTransaction::read(I2C_ADDR, vec![0x68, 0x3A, 0x7C]),
    ]);
    let mut htu21d = Htu21d::new(i2c, RecordingDelay::default());

    let centigrade = htu21d.read_temperature().unwrap();
    assert_close(centigrade, 24.6864);

    let delay = finish(htu21d);
    assert_eq!(delay.total_ms(), 10);
}

#[test]
fn raw_read_clears_status_bits() {
    let i2c = I2cMock::new(&[
        I2cTransaction::write(I2C_ADDR, vec![0xF5]),
        I2cTransaction::read(I2C_ADDR, vec![0x4E, 0x85, 0x6B]),
    ]);
    let mut htu21d = Htu21d::new(i2c, RecordingDelay::default());

    let raw = htu21d.read_raw(MeasurementKind::Humidity).unwrap();
    assert_eq!(raw.value(), 0x4E84);

    finish(htu21d);
}

#[test]
fn timeout_after_poll_ceiling() {
    let mut expectations = vec![I2cTransaction::write(I2C_ADDR, vec![0xF3])];
    expectations.extend((0..10).map(|_| not_ready()));
    let i2c = I2cMock::new(&expectations);
    let mut htu21d = Htu21d::new(i2c, RecordingDelay::default());

    assert_eq!(htu21d.read_temperature(), Err(Error::Timeout));

    let delay = finish(htu21d);
    assert_eq!(delay.delays_ms.len(), 10);
    assert_eq!(delay.total_ms(), 100);
}

#[test]
fn crc_mismatch_is_reported() {
    let i2c = I2cMock::new(&[
        I2cTransaction::write(I2C_ADDR, vec![0xF5]),
        I2cTransaction::read(I2C_ADDR, vec![0x4E, 0x85, 0x6C]),
    ]);
    let mut htu21d = Htu21d::new(i2c, RecordingDelay::default());

    assert_eq!(htu21d.read_humidity(), Err(Error::CrcMismatch));

    finish(htu21d);
}

#[test]
fn bus_error_stops_polling() {
    let i2c = I2cMock::new(&[
        I2cTransaction::write(I2C_ADDR, vec![0xF5]),
        not_ready(),
        I2cTransaction::read(I2C_ADDR, vec![0; 3]).with_error(ErrorKind::Bus),
    ]);
    let mut htu21d = Htu21d::new(i2c, RecordingDelay::default());

    assert_eq!(htu21d.read_humidity(), Err(Error::I2c(ErrorKind::Bus)));

    let delay = finish(htu21d);
    assert_eq!(delay.delays_ms.len(), 2);
}

#[test]
fn trigger_error_is_propagated() {
    let i2c = I2cMock::new(&[
        I2cTransaction::write(I2C_ADDR, vec![0xF3]).with_error(ErrorKind::ArbitrationLoss),
    ]);
    let mut htu21d = Htu21d::new(i2c, RecordingDelay::default());

    assert_eq!(htu21d.read_temperature(), Err(Error::I2c(ErrorKind::ArbitrationLoss)));

    let delay = finish(htu21d);
    assert!(delay.delays_ms.is_empty());
}

#[test]
fn measure_reads_humidity_then_temperature() {
    let i2c = I2cMock::new(&[
        I2cTransaction::write(I2C_ADDR, vec![0xF5]),
        I2cTransaction::read(I2C_ADDR, vec![0x4E, 0x85, 0x6B]),
        I2cTransaction::write(I2C_ADDR, vec![0xF3]),
        not_ready(),
        I2cTransaction::read(I2C_ADDR, vec![0x68, 0x3A, 0x7C]),
    ]);
    let mut htu21d = Htu21d::new(i2c, RecordingDelay::default());

    let datum = htu21d.measure().unwrap();
    assert_close(datum.humidity_percent, 32.3377);
    assert_close(datum.centigrade, 24.6864);
    assert_close(datum.fahrenheit, 24.6864 * 1.8 + 32.0);

    finish(htu21d);
}

#[test]
fn read_config_register() {
    let i2c = I2cMock::new(&[
        I2cTransaction::write_read(I2C_ADDR, vec![0xE7], vec![0b0100_0111]),
    ]);
    let mut htu21d = Htu21d::new(i2c, RecordingDelay::default());

    let reg = htu21d.read_config_register().unwrap();
    assert_eq!(reg, ConfigRegister::from(0b0100_0111));
    assert_eq!(reg.resolution(), Resolution::Rh8Temp12);
    assert!(reg.heater_enabled());
    assert!(reg.end_of_battery());

    finish(htu21d);
}

#[test]
fn set_resolution_read_modify_write() {
    let i2c = I2cMock::new(&[
        I2cTransaction::write_read(I2C_ADDR, vec![0xE7], vec![0b0111_1011]),
        I2cTransaction::write(I2C_ADDR, vec![0xE6, 0b1111_1010]),
    ]);
    let mut htu21d = Htu21d::new(i2c, RecordingDelay::default());

    htu21d.set_resolution(Resolution::Rh10Temp13).unwrap();

    finish(htu21d);
}

#[test]
fn set_resolution_level() {
    let i2c = I2cMock::new(&[
        I2cTransaction::write_read(I2C_ADDR, vec![0xE7], vec![0b0000_0010]),
        I2cTransaction::write(I2C_ADDR, vec![0xE6, 0b1000_0011]),
    ]);
    let mut htu21d = Htu21d::new(i2c, RecordingDelay::default());

    htu21d.set_resolution_level(3).unwrap();

    finish(htu21d);
}

#[test]
fn invalid_resolution_level_touches_nothing() {
    let expectations: [I2cTransaction; 0] = [];
    let i2c = I2cMock::new(&expectations);
    let mut htu21d = Htu21d::new(i2c, RecordingDelay::default());

    assert_eq!(htu21d.set_resolution_level(4), Err(Error::InvalidInputData));

    finish(htu21d);
}

#[test]
fn set_heater() {
    let i2c = I2cMock::new(&[
        I2cTransaction::write_read(I2C_ADDR, vec![0xE7], vec![0b1000_0011]),
        I2cTransaction::write(I2C_ADDR, vec![0xE6, 0b1000_0111]),
        I2cTransaction::write_read(I2C_ADDR, vec![0xE7], vec![0b1000_0111]),
        I2cTransaction::write(I2C_ADDR, vec![0xE6, 0b1000_0011]),
    ]);
    let mut htu21d = Htu21d::new(i2c, RecordingDelay::default());

    htu21d.set_heater(true).unwrap();
    htu21d.set_heater(false).unwrap();

    finish(htu21d);
}

#[test]
fn soft_reset_waits_for_reboot() {
    let i2c = I2cMock::new(&[I2cTransaction::write(I2C_ADDR, vec![0xFE])]);
    let mut htu21d = Htu21d::new(i2c, RecordingDelay::default());

    htu21d.soft_reset().unwrap();

    let delay = finish(htu21d);
    assert_eq!(delay.delays_ms, vec![15]);
}
