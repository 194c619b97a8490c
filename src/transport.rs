//! Register transactions against the sensor.
//!
//! A [`Transport`] performs exactly one addressed transaction per call and never
//! retries. Retry and abort policy belongs to the callers.

use embedded_hal_02::blocking::i2c as i2c_02;
use embedded_hal_1::i2c::{Error as _, ErrorKind, I2c};

use crate::register::Address;

/// Largest payload accepted by [`Transport::write`] after the register byte.
pub const MAX_PAYLOAD_LEN: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// The bus reported a failure: no acknowledge, arbitration loss, or adapter error
    Bus(ErrorKind),
    /// Payload longer than [`MAX_PAYLOAD_LEN`]
    PayloadTooLong,
}

impl core::fmt::Display for TransportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TransportError::Bus(kind) => write!(f, "bus transaction failed: {}", kind),
            TransportError::PayloadTooLong => write!(f, "write payload too long"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TransportError {}

/// Addressed register access on a shared bus.
pub trait Transport {
    /// Writes `payload` starting at `register`.
    fn write(&mut self, register: u8, payload: &[u8]) -> Result<(), TransportError>;

    /// Selects `register`, then reads `buf.len()` bytes into `buf`.
    fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), TransportError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write(&mut self, register: u8, payload: &[u8]) -> Result<(), TransportError> {
        T::write(self, register, payload)
    }

    fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), TransportError> {
        T::read(self, register, buf)
    }
}

fn frame(register: u8, payload: &[u8], buf: &mut [u8; MAX_PAYLOAD_LEN + 1]) -> Result<usize, TransportError> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(TransportError::PayloadTooLong);
    }
    buf[0] = register;
    buf[1..=payload.len()].copy_from_slice(payload);
    Ok(payload.len() + 1)
}

/// [`Transport`] over an embedded-hal 1.0 I²C bus.
pub struct I2cTransport<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cTransport<I2C>
where
    I2C: I2c,
{
    pub fn new(i2c: I2C, address: Address) -> Self {
        I2cTransport {
            i2c,
            address: address.addr(),
        }
    }

    pub fn new_primary(i2c: I2C) -> Self {
        Self::new(i2c, Address::Primary)
    }

    pub fn new_secondary(i2c: I2C) -> Self {
        Self::new(i2c, Address::Secondary)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Transport for I2cTransport<I2C>
where
    I2C: I2c,
{
    fn write(&mut self, register: u8, payload: &[u8]) -> Result<(), TransportError> {
        let mut buf = [0u8; MAX_PAYLOAD_LEN + 1];
        let len = frame(register, payload, &mut buf)?;
        self.i2c
            .write(self.address, &buf[..len])
            .map_err(|e| TransportError::Bus(e.kind()))
    }

    fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), TransportError> {
        self.i2c
            .write_read(self.address, &[register], buf)
            .map_err(|e| TransportError::Bus(e.kind()))
    }
}

/// [`Transport`] over an embedded-hal 0.2 blocking I²C bus.
///
/// 0.2 bus errors carry no kind, they are all reported as [`ErrorKind::Other`].
pub struct LegacyI2cTransport<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> LegacyI2cTransport<I2C>
where
    I2C: i2c_02::Write + i2c_02::WriteRead,
{
    pub fn new(i2c: I2C, address: Address) -> Self {
        LegacyI2cTransport {
            i2c,
            address: address.addr(),
        }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Transport for LegacyI2cTransport<I2C>
where
    I2C: i2c_02::Write + i2c_02::WriteRead,
{
    fn write(&mut self, register: u8, payload: &[u8]) -> Result<(), TransportError> {
        let mut buf = [0u8; MAX_PAYLOAD_LEN + 1];
        let len = frame(register, payload, &mut buf)?;
        self.i2c
            .write(self.address, &buf[..len])
            .map_err(|_| TransportError::Bus(ErrorKind::Other))
    }

    fn read(&mut self, register: u8, buf: &mut [u8]) -> Result<(), TransportError> {
        self.i2c
            .write_read(self.address, &[register], buf)
            .map_err(|_| TransportError::Bus(ErrorKind::Other))
    }
}
