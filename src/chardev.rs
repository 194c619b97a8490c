//! Character-device style read surface.
//!
//! Each read at offset 0 takes one fresh sample and returns it as a decimal line in
//! hundredths of a degree, `"2350\n"` for 23.50 C. Errors are never replaced by a
//! default reading.

use core::fmt::Write as _;

use embassy_sync::blocking_mutex::raw::RawMutex;

use crate::acquisition::AcquisitionError;
use crate::device::Bmp280;
use crate::transport::Transport;
use crate::ByteMutWriter;

pub const DEVICE_NAME: &str = "bmp280";

/// `i32::MIN` plus newline fits.
const LINE_CAPACITY: usize = 16;

pub const EIO: i32 = 5;
pub const EINVAL: i32 = 22;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NodeError {
    Acquisition(AcquisitionError),
    /// Caller buffer cannot hold the whole line
    BufferTooSmall,
    /// The node is read-only
    NotSupported,
}

impl NodeError {
    /// Positive errno for the host's I/O convention.
    pub fn errno(&self) -> i32 {
        match self {
            NodeError::Acquisition(_) => EIO,
            NodeError::BufferTooSmall | NodeError::NotSupported => EINVAL,
        }
    }
}

impl From<AcquisitionError> for NodeError {
    fn from(e: AcquisitionError) -> Self {
        NodeError::Acquisition(e)
    }
}

impl core::fmt::Display for NodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            NodeError::Acquisition(e) => write!(f, "{}", e),
            NodeError::BufferTooSmall => write!(f, "read buffer too small"),
            NodeError::NotSupported => write!(f, "operation not supported"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NodeError {}

pub struct TemperatureNode<'d, M: RawMutex, T> {
    sensor: &'d Bmp280<M, T>,
}

impl<'d, M, T> TemperatureNode<'d, M, T>
where
    M: RawMutex,
    T: Transport,
{
    pub fn new(sensor: &'d Bmp280<M, T>) -> Self {
        TemperatureNode { sensor }
    }

    pub fn name(&self) -> &'static str {
        DEVICE_NAME
    }

    /// Fills `buf` with one reading and returns the byte count.
    ///
    /// Returns 0 for any `offset > 0`, so readers that loop until end of file stop
    /// after one line.
    pub fn read(&self, buf: &mut [u8], offset: u64) -> Result<usize, NodeError> {
        if offset > 0 {
            return Ok(0);
        }
        let temperature = self.sensor.read_temperature()?;

        let mut line = [0u8; LINE_CAPACITY];
        let mut writer = ByteMutWriter::new(&mut line);
        writeln!(writer, "{}", temperature).map_err(|_| NodeError::BufferTooSmall)?;
        let bytes = writer.as_bytes();
        if buf.len() < bytes.len() {
            return Err(NodeError::BufferTooSmall);
        }
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(bytes.len())
    }

    pub fn write(&self, _buf: &[u8], _offset: u64) -> Result<usize, NodeError> {
        Err(NodeError::NotSupported)
    }
}
