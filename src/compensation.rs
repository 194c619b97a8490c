//! Integer temperature compensation.
//!
//! Reproduces the 32-bit fixed-point routine `bmp280_compensate_T_int32` from the
//! BMP280 datasheet (section 8.2). Every shift and factor below is part of the
//! published algorithm; changing any of them moves the last digit of the result.
//!
//! Resolution: 0.01 C

use crate::calibration::CalibrationCoefficients;

/// Width of the `ut` ADC output.
pub const RAW_SAMPLE_BITS: u32 = 20;
const RAW_SAMPLE_MASK: u32 = (1 << RAW_SAMPLE_BITS) - 1;

// var1 = ((ut >> 3) - (T1 << 1)) * T2 >> 11
const VAR1_RAW_SHIFT: u32 = 3;
const VAR1_T1_SHIFT: u32 = 1;
const VAR1_SHIFT: u32 = 11;

// var2 = (((ut >> 4) - T1)^2 >> 12) * T3 >> 14
const VAR2_RAW_SHIFT: u32 = 4;
const VAR2_SQUARE_SHIFT: u32 = 12;
const VAR2_SHIFT: u32 = 14;

// T = (t_fine * 5 + 128) >> 8
const OUTPUT_SCALE: i32 = 5;
const OUTPUT_ROUNDING: i32 = 128;
const OUTPUT_SHIFT: u32 = 8;

/// Uncompensated 20-bit temperature reading.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawSample(u32);

impl RawSample {
    /// Keeps the low [`RAW_SAMPLE_BITS`] bits of `bits`.
    pub const fn from_bits(bits: u32) -> Self {
        RawSample(bits & RAW_SAMPLE_MASK)
    }

    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Compensated temperature in hundredths of a degree Celsius.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature(i32);

impl Temperature {
    pub const fn from_hundredths(hundredths: i32) -> Self {
        Temperature(hundredths)
    }

    /// `2350` is 23.50 C
    pub const fn hundredths(self) -> i32 {
        self.0
    }
}

impl core::fmt::Display for Temperature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `var1 + var2`, the fine resolution temperature the datasheet calls `t_fine`.
///
/// Products wrap in two's complement like the reference C code on 32-bit targets,
/// so the function is total over every raw sample and coefficient set.
pub fn fine_temperature(raw: RawSample, calibration: &CalibrationCoefficients) -> i32 {
    let raw = raw.value() as i32;
    let t1 = i32::from(calibration.t1);
    let t2 = i32::from(calibration.t2);
    let t3 = i32::from(calibration.t3);

    let var1 = ((raw >> VAR1_RAW_SHIFT) - (t1 << VAR1_T1_SHIFT)).wrapping_mul(t2) >> VAR1_SHIFT;

    let delta = (raw >> VAR2_RAW_SHIFT) - t1;
    let var2 = (delta.wrapping_mul(delta) >> VAR2_SQUARE_SHIFT).wrapping_mul(t3) >> VAR2_SHIFT;

    var1.wrapping_add(var2)
}

/// Converts a raw sample to [`Temperature`]. Pure and infallible.
pub fn compensate(raw: RawSample, calibration: &CalibrationCoefficients) -> Temperature {
    let t_fine = fine_temperature(raw, calibration);
    Temperature(t_fine.wrapping_mul(OUTPUT_SCALE).wrapping_add(OUTPUT_ROUNDING) >> OUTPUT_SHIFT)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASHEET: CalibrationCoefficients = CalibrationCoefficients {
        t1: 27504,
        t2: 26435,
        t3: -1000,
    };

    #[test]
    fn datasheet_reference_vector() {
        let raw = RawSample::from_bits(519888);
        assert_eq!(fine_temperature(raw, &DATASHEET), 128422);
        assert_eq!(compensate(raw, &DATASHEET), Temperature::from_hundredths(2508));
    }

    #[test]
    fn negative_terms_round_toward_negative_infinity() {
        // var2 = -6076000 >> 14 must be -371, not the truncated -370
        let calibration = CalibrationCoefficients { t2: 0, ..DATASHEET };
        let raw = RawSample::from_bits(519888);
        assert_eq!(fine_temperature(raw, &calibration), -371);
        assert_eq!(compensate(raw, &calibration).hundredths(), -7);
    }

    #[test]
    fn raw_sample_is_masked_to_20_bits() {
        assert_eq!(RawSample::from_bits(0xFFF0_0000 | 0x7EED0).value(), 0x7EED0);
        assert_eq!(RawSample::from_bits(u32::MAX).value(), 0xF_FFFF);
    }

    #[test]
    fn deterministic() {
        let raw = RawSample::from_bits(415148);
        let first = compensate(raw, &DATASHEET);
        for _ in 0..16 {
            assert_eq!(compensate(raw, &DATASHEET), first);
        }
    }

    #[test]
    fn total_over_extreme_inputs() {
        let extremes = [
            CalibrationCoefficients { t1: 0, t2: i16::MAX, t3: i16::MAX },
            CalibrationCoefficients { t1: u16::MAX, t2: i16::MIN, t3: i16::MIN },
            CalibrationCoefficients { t1: u16::MAX, t2: i16::MAX, t3: i16::MIN },
        ];
        for calibration in extremes.iter() {
            for bits in [0, 1, 0x80000, 0xFFFFF] {
                let raw = RawSample::from_bits(bits);
                assert_eq!(compensate(raw, calibration), compensate(raw, calibration));
            }
        }
    }

    #[test]
    fn displays_hundredths() {
        let mut buf = [0u8; 16];
        let mut writer = crate::ByteMutWriter::new(&mut buf);
        core::fmt::write(&mut writer, format_args!("{}", Temperature::from_hundredths(-1234))).unwrap();
        assert_eq!(writer.as_str(), "-1234");
    }
}
