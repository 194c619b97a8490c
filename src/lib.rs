//! BMP280 temperature acquisition core.
//!
//! Platform-agnostic driver built on `embedded-hal`. It resets and configures the
//! sensor, reads the per-device calibration block once, and turns raw readings into
//! temperatures in hundredths of a degree Celsius with the datasheet's 32-bit
//! integer compensation.
//!
//! ```ignore
//! use bmp280_chardev::{Bmp280, Config, I2cTransport, TemperatureNode};
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//!
//! let sensor: Bmp280<CriticalSectionRawMutex, _> =
//!     Bmp280::new(I2cTransport::new_primary(i2c), Config::default());
//! sensor.initialize(&mut delay)?;
//!
//! let node = TemperatureNode::new(&sensor);
//! let n = node.read(&mut buf, 0)?; // b"2350\n"
//! ```
//!
//! Temperature resolution: 0.01 C

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(all(test, not(feature = "std")))]
#[macro_use]
extern crate std;

// must stay first, the logging macros are textually scoped
mod fmt;

pub mod acquisition;
pub mod calibration;
pub mod chardev;
pub mod compensation;
pub mod config;
pub mod device;
pub mod register;
pub mod sequencer;
pub mod transport;

pub use acquisition::AcquisitionError;
pub use calibration::{CalibrationCoefficients, CalibrationStore, StoreError};
pub use chardev::{NodeError, TemperatureNode};
pub use compensation::{compensate, RawSample, Temperature};
pub use config::{Config, Oversampling, PowerMode};
pub use device::Bmp280;
pub use register::{Address, Register};
pub use sequencer::{InitError, SensorState};
pub use transport::{I2cTransport, LegacyI2cTransport, Transport, TransportError};

/// `core::fmt::Write` sink over a borrowed byte buffer.
pub struct ByteMutWriter<'a> {
    buf: &'a mut [u8],
    cursor: usize,
}

impl<'a> ByteMutWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        ByteMutWriter { buf, cursor: 0 }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.cursor]
    }

    pub fn as_str(&self) -> &str {
        // only whole `&str`s are ever written
        core::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn clear(&mut self) {
        self.cursor = 0;
    }
}

impl core::fmt::Write for ByteMutWriter<'_> {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let end = self.cursor + bytes.len();
        if end > self.buf.len() {
            return Err(core::fmt::Error);
        }
        self.buf[self.cursor..end].copy_from_slice(bytes);
        self.cursor = end;
        Ok(())
    }
}
