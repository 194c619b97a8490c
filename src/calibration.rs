//! Factory trimming parameters for the temperature path.

use crate::register::CALIBRATION_LEN;

macro_rules! concat_bytes {
    ($msb:expr, $lsb:expr) => {
        (($msb as u16) << 8) | ($lsb as u16)
    };
}

/// `dig_T1`, `dig_T2`, `dig_T3` as programmed at manufacture.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationCoefficients {
    pub t1: u16,
    pub t2: i16,
    pub t3: i16,
}

impl CalibrationCoefficients {
    /// Decodes the little-endian calibration block starting at `calib00`.
    pub fn from_bytes(data: &[u8; CALIBRATION_LEN]) -> Self {
        CalibrationCoefficients {
            t1: concat_bytes!(data[1], data[0]),
            t2: concat_bytes!(data[3], data[2]) as i16,
            t3: concat_bytes!(data[5], data[4]) as i16,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StoreError {
    /// Coefficients were requested before the calibration block was read
    NotCalibrated,
    /// Coefficients are written once per sensor lifetime
    AlreadyCalibrated,
}

impl core::fmt::Display for StoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StoreError::NotCalibrated => write!(f, "sensor not calibrated"),
            StoreError::AlreadyCalibrated => write!(f, "calibration already stored"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StoreError {}

/// Write-once holder for [`CalibrationCoefficients`].
#[derive(Debug, Default)]
pub struct CalibrationStore {
    coefficients: Option<CalibrationCoefficients>,
}

impl CalibrationStore {
    pub const fn new() -> Self {
        CalibrationStore { coefficients: None }
    }

    pub fn set(&mut self, coefficients: CalibrationCoefficients) -> Result<(), StoreError> {
        if self.coefficients.is_some() {
            return Err(StoreError::AlreadyCalibrated);
        }
        self.coefficients = Some(coefficients);
        Ok(())
    }

    pub fn get(&self) -> Result<CalibrationCoefficients, StoreError> {
        self.coefficients.ok_or(StoreError::NotCalibrated)
    }

    pub fn is_calibrated(&self) -> bool {
        self.coefficients.is_some()
    }
}
