//! Measurement configuration written to `ctrl_meas` during initialization.

const CTRL_MEAS_TEMP_MSK: u8 = 0xE0;
const CTRL_MEAS_TEMP_POS: u8 = 0x05;

const CTRL_MEAS_PRESS_MSK: u8 = 0x1C;
const CTRL_MEAS_PRESS_POS: u8 = 0x02;

const CTRL_MEAS_MODE_MSK: u8 = 0x03;
const CTRL_MEAS_MODE_POS: u8 = 0x00;

/// The sensor needs 2ms after a soft reset before it answers again.
pub const MIN_RESET_SETTLE_MS: u32 = 2;

macro_rules! set_bits {
    ($reg_data:expr, $mask:expr, $pos:expr, $data:expr) => {
        ($reg_data & !$mask) | (($data << $pos) & $mask)
    };
}

/// Oversampling setting, `osrs_t` / `osrs_p` field codes.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    /// Measurement skipped, output set to 0x80000
    Skipped = 0x00,
    X1 = 0x01,
    X2 = 0x02,
    X4 = 0x03,
    X8 = 0x04,
    X16 = 0x05,
}

/// Power mode, `mode` field codes.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    Sleep = 0x00,
    Forced = 0x01,
    Normal = 0x03,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub temperature_oversampling: Oversampling,
    pub pressure_oversampling: Oversampling,
    pub mode: PowerMode,
    /// Wait after the soft reset, never shorter than [`MIN_RESET_SETTLE_MS`].
    pub reset_settle_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Normal mode, x1 temperature and pressure oversampling (`ctrl_meas = 0x27`).
    pub const fn new() -> Self {
        Config {
            temperature_oversampling: Oversampling::X1,
            pressure_oversampling: Oversampling::X1,
            mode: PowerMode::Normal,
            reset_settle_ms: MIN_RESET_SETTLE_MS,
        }
    }

    pub const fn with_temperature_oversampling(mut self, oversampling: Oversampling) -> Self {
        self.temperature_oversampling = oversampling;
        self
    }

    pub const fn with_pressure_oversampling(mut self, oversampling: Oversampling) -> Self {
        self.pressure_oversampling = oversampling;
        self
    }

    pub const fn with_mode(mut self, mode: PowerMode) -> Self {
        self.mode = mode;
        self
    }

    pub const fn with_reset_settle_ms(mut self, ms: u32) -> Self {
        self.reset_settle_ms = ms;
        self
    }

    /// Settle delay actually applied after reset.
    pub const fn settle_ms(&self) -> u32 {
        if self.reset_settle_ms < MIN_RESET_SETTLE_MS {
            MIN_RESET_SETTLE_MS
        } else {
            self.reset_settle_ms
        }
    }

    /// Byte written to [`Register::CtrlMeas`](crate::register::Register::CtrlMeas).
    pub const fn ctrl_meas(&self) -> u8 {
        let data = 0u8;
        let data = set_bits!(
            data,
            CTRL_MEAS_TEMP_MSK,
            CTRL_MEAS_TEMP_POS,
            self.temperature_oversampling as u8
        );
        let data = set_bits!(
            data,
            CTRL_MEAS_PRESS_MSK,
            CTRL_MEAS_PRESS_POS,
            self.pressure_oversampling as u8
        );
        set_bits!(data, CTRL_MEAS_MODE_MSK, CTRL_MEAS_MODE_POS, self.mode as u8)
    }
}
