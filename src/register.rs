//! BMP280 register map.
//!
//! Only the registers touched by temperature acquisition are listed. Addresses and
//! transfer lengths come from the BMP280 datasheet, section 4.2 "Memory map".

/// Command written to [`Register::Reset`] to trigger a power-on-reset sequence.
pub const SOFT_RESET_CMD: u8 = 0xB6;

/// Value of [`Register::ChipId`] on a BMP280.
pub const BMP280_CHIP_ID: u8 = 0x58;
/// Value of [`Register::ChipId`] on a BME280, which shares the temperature path.
pub const BME280_CHIP_ID: u8 = 0x60;

/// Bytes in the temperature calibration block (`dig_T1..dig_T3`).
pub const CALIBRATION_LEN: usize = 6;
/// Bytes in the temperature data block (`temp_msb`, `temp_lsb`, `temp_xlsb`).
pub const TEMPERATURE_LEN: usize = 3;

/// 7-bit peripheral address, selected by the level of the SDO pin.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Address {
    /// SDO tied to GND
    #[default]
    Primary = 0x76,
    /// SDO tied to VDDIO
    Secondary = 0x77,
}

impl Address {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    Read,
    Write,
    ReadWrite,
}

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// `id`, reads back [`BMP280_CHIP_ID`]
    ChipId = 0xD0,
    /// `reset`, accepts [`SOFT_RESET_CMD`]
    Reset = 0xE0,
    /// `ctrl_meas`, temperature/pressure oversampling and power mode
    CtrlMeas = 0xF4,
    /// `calib00`, start of the little-endian `dig_T1`, `dig_T2`, `dig_T3` block
    Calibration = 0x88,
    /// `temp_msb`, followed by `temp_lsb` and `temp_xlsb`
    TempMsb = 0xFA,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }

    pub const fn access(self) -> Access {
        match self {
            Register::ChipId | Register::Calibration | Register::TempMsb => Access::Read,
            Register::Reset => Access::Write,
            Register::CtrlMeas => Access::ReadWrite,
        }
    }

    /// Number of bytes moved by one transaction on this register.
    pub const fn transfer_len(self) -> usize {
        match self {
            Register::Calibration => CALIBRATION_LEN,
            Register::TempMsb => TEMPERATURE_LEN,
            Register::ChipId | Register::Reset | Register::CtrlMeas => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_map_matches_datasheet() {
        assert_eq!(Register::Reset.addr(), 0xE0);
        assert_eq!(Register::CtrlMeas.addr(), 0xF4);
        assert_eq!(Register::Calibration.addr(), 0x88);
        assert_eq!(Register::TempMsb.addr(), 0xFA);
        assert_eq!(Register::Calibration.transfer_len(), 6);
        assert_eq!(Register::TempMsb.transfer_len(), 3);
        assert_eq!(Register::Reset.access(), Access::Write);
    }

    #[test]
    fn default_address_is_primary() {
        assert_eq!(Address::default().addr(), 0x76);
        assert_eq!(Address::Secondary.addr(), 0x77);
    }
}
