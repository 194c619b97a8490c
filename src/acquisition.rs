//! Per-read temperature acquisition.

use crate::calibration::StoreError;
use crate::compensation::{compensate, RawSample, Temperature};
use crate::device::Context;
use crate::register::{Register, TEMPERATURE_LEN};
use crate::sequencer::SensorState;
use crate::transport::{Transport, TransportError};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcquisitionError {
    /// The sensor has not been initialized, or its initialization failed
    NotReady,
    /// The bus transaction failed; the sensor stays ready
    TransportFailed(TransportError),
}

impl From<StoreError> for AcquisitionError {
    fn from(_: StoreError) -> Self {
        AcquisitionError::NotReady
    }
}

impl core::fmt::Display for AcquisitionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AcquisitionError::NotReady => write!(f, "sensor not ready"),
            AcquisitionError::TransportFailed(e) => write!(f, "temperature read failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AcquisitionError {}

/// Assembles `ut` from `temp_msb`, `temp_lsb` and the high nibble of `temp_xlsb`.
pub fn decode_raw_sample(data: &[u8; TEMPERATURE_LEN]) -> RawSample {
    let data_msb: u32 = (data[0] as u32) << 12;
    let data_lsb: u32 = (data[1] as u32) << 4;
    let data_xlsb: u32 = (data[2] as u32) >> 4;
    RawSample::from_bits(data_msb | data_lsb | data_xlsb)
}

impl<T: Transport> Context<T> {
    pub(crate) fn read_raw(&mut self) -> Result<RawSample, AcquisitionError> {
        if self.state != SensorState::Ready {
            return Err(AcquisitionError::NotReady);
        }
        let mut data = [0u8; TEMPERATURE_LEN];
        self.transport
            .read(Register::TempMsb.addr(), &mut data)
            .map_err(|e| {
                warn!("temperature read failed: {}", e);
                AcquisitionError::TransportFailed(e)
            })?;
        trace!("raw temperature data: {} {} {}", data[0], data[1], data[2]);
        Ok(decode_raw_sample(&data))
    }

    pub(crate) fn read_temperature(&mut self) -> Result<Temperature, AcquisitionError> {
        let raw = self.read_raw()?;
        let calibration = self.calibration.get()?;
        Ok(compensate(raw, &calibration))
    }

    pub(crate) fn chip_id(&mut self) -> Result<u8, AcquisitionError> {
        let mut id = [0u8; 1];
        self.transport
            .read(Register::ChipId.addr(), &mut id)
            .map_err(AcquisitionError::TransportFailed)?;
        Ok(id[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_datasheet_sample() {
        assert_eq!(decode_raw_sample(&[0x7E, 0xED, 0x00]).value(), 519888);
    }

    #[test]
    fn low_nibble_of_xlsb_is_ignored() {
        assert_eq!(
            decode_raw_sample(&[0x7E, 0xED, 0x0F]),
            decode_raw_sample(&[0x7E, 0xED, 0x00])
        );
        assert_eq!(decode_raw_sample(&[0xFF, 0xFF, 0xF0]).value(), 0xF_FFFF);
        assert_eq!(decode_raw_sample(&[0x00, 0x00, 0x10]).value(), 1);
    }
}
