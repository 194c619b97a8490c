//! Start-up sequence: soft reset, mode configuration, calibration read.

use embedded_hal_1::delay::DelayNs;

use crate::calibration::CalibrationCoefficients;
use crate::device::Context;
use crate::register::{Register, CALIBRATION_LEN, SOFT_RESET_CMD};
use crate::transport::{Transport, TransportError};

/// Lifecycle of a sensor.
///
/// Moves strictly forward. Any failure during [`initialize`](crate::Bmp280::initialize)
/// ends in `Faulted`, which is only left by building a new driver.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorState {
    Uninitialized,
    Resetting,
    Configuring,
    /// Calibrated and accepting reads
    Ready,
    Faulted,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// Writing the soft reset command failed
    ResetFailed(TransportError),
    /// Writing `ctrl_meas` failed
    ConfigureFailed(TransportError),
    /// Reading the calibration block failed, nothing was stored
    CalibrationFailed(TransportError),
    /// Initialization only runs on an uninitialized sensor
    InvalidState(SensorState),
}

impl core::fmt::Display for InitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InitError::ResetFailed(e) => write!(f, "soft reset failed: {}", e),
            InitError::ConfigureFailed(e) => write!(f, "mode configuration failed: {}", e),
            InitError::CalibrationFailed(e) => write!(f, "calibration read failed: {}", e),
            InitError::InvalidState(state) => write!(f, "cannot initialize from state {:?}", state),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InitError {}

impl<T: Transport> Context<T> {
    pub(crate) fn initialize<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), InitError> {
        if self.state != SensorState::Uninitialized {
            return Err(InitError::InvalidState(self.state));
        }
        match self.run_sequence(delay) {
            Ok(()) => {
                self.state = SensorState::Ready;
                info!("bmp280 initialized");
                Ok(())
            }
            Err(e) => {
                self.state = SensorState::Faulted;
                error!("bmp280 initialization aborted: {}", e);
                Err(e)
            }
        }
    }

    fn run_sequence<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), InitError> {
        self.state = SensorState::Resetting;
        self.soft_reset(delay)?;

        self.state = SensorState::Configuring;
        self.configure()?;

        let coefficients = self.read_calibration()?;
        // the store is empty while uninitialized, so this only commits
        self.calibration
            .set(coefficients)
            .map_err(|_| InitError::InvalidState(self.state))
    }

    fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), InitError> {
        self.transport
            .write(Register::Reset.addr(), &[SOFT_RESET_CMD])
            .map_err(InitError::ResetFailed)?;
        delay.delay_ms(self.config.settle_ms());
        Ok(())
    }

    fn configure(&mut self) -> Result<(), InitError> {
        let ctrl_meas = self.config.ctrl_meas();
        debug!("writing ctrl_meas {}", ctrl_meas);
        self.transport
            .write(Register::CtrlMeas.addr(), &[ctrl_meas])
            .map_err(InitError::ConfigureFailed)
    }

    fn read_calibration(&mut self) -> Result<CalibrationCoefficients, InitError> {
        let mut data = [0u8; CALIBRATION_LEN];
        self.transport
            .read(Register::Calibration.addr(), &mut data)
            .map_err(InitError::CalibrationFailed)?;
        let coefficients = CalibrationCoefficients::from_bytes(&data);
        info!(
            "calibration data: T1={}, T2={}, T3={}",
            coefficients.t1,
            coefficients.t2,
            coefficients.t3
        );
        Ok(coefficients)
    }
}
