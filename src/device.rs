//! Shared driver context.
//!
//! All sensor state lives in one [`Bmp280`] value. Initialization, acquisition and
//! diagnostics each take the same lock for the whole bus exchange, so two callers
//! can never interleave the register-select and data phases of their transactions,
//! and no reading can observe a half-initialized sensor.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal_1::delay::DelayNs;

use crate::acquisition::AcquisitionError;
use crate::calibration::{CalibrationCoefficients, CalibrationStore, StoreError};
use crate::compensation::{RawSample, Temperature};
use crate::config::Config;
use crate::sequencer::{InitError, SensorState};
use crate::transport::Transport;

pub(crate) struct Context<T> {
    pub(crate) transport: T,
    pub(crate) config: Config,
    pub(crate) state: SensorState,
    pub(crate) calibration: CalibrationStore,
}

impl<T> Context<T> {
    pub(crate) const fn new(transport: T, config: Config) -> Self {
        Context {
            transport,
            config,
            state: SensorState::Uninitialized,
            calibration: CalibrationStore::new(),
        }
    }
}

/// BMP280 temperature sensor.
///
/// `M` selects the lock: `CriticalSectionRawMutex` when the sensor is shared
/// between threads or interrupt contexts, `NoopRawMutex` when it is not.
pub struct Bmp280<M: RawMutex, T> {
    inner: Mutex<M, RefCell<Context<T>>>,
}

impl<M, T> Bmp280<M, T>
where
    M: RawMutex,
    T: Transport,
{
    pub fn new(transport: T, config: Config) -> Self {
        Bmp280 {
            inner: Mutex::new(RefCell::new(Context::new(transport, config))),
        }
    }

    /// Soft-resets, configures and calibrates the sensor.
    ///
    /// Runs once. A failure leaves the sensor [`SensorState::Faulted`] for good.
    pub fn initialize<D: DelayNs>(&self, delay: &mut D) -> Result<(), InitError> {
        self.with_context(|ctx| ctx.initialize(delay))
    }

    /// Reads and compensates one temperature sample.
    pub fn read_temperature(&self) -> Result<Temperature, AcquisitionError> {
        self.with_context(|ctx| ctx.read_temperature())
    }

    /// Reads one uncompensated sample.
    pub fn read_raw(&self) -> Result<RawSample, AcquisitionError> {
        self.with_context(|ctx| ctx.read_raw())
    }

    pub fn chip_id(&self) -> Result<u8, AcquisitionError> {
        self.with_context(|ctx| ctx.chip_id())
    }

    pub fn state(&self) -> SensorState {
        self.with_context(|ctx| ctx.state)
    }

    pub fn calibration(&self) -> Result<CalibrationCoefficients, StoreError> {
        self.with_context(|ctx| ctx.calibration.get())
    }

    pub fn config(&self) -> Config {
        self.with_context(|ctx| ctx.config)
    }

    /// Tears the driver down and hands back the transport.
    ///
    /// Takes `self` by value: every borrow used by an in-flight call has ended
    /// before this can run.
    pub fn release(self) -> T {
        self.inner.into_inner().into_inner().transport
    }

    fn with_context<R>(&self, f: impl FnOnce(&mut Context<T>) -> R) -> R {
        self.inner.lock(|ctx| f(&mut ctx.borrow_mut()))
    }
}
