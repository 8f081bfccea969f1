//! Quantization to restricted floating formats
//!
//! Values are truncated toward zero onto the grid of the target format, so
//! the result never has a larger magnitude than the input and representable
//! values are fixed points.
//!
//! The legacy format is IBM System/360 single precision: sign bit, 7-bit
//! excess-64 base-16 exponent, 24-bit fraction. A word with characteristic
//! `c` and fraction `m` denotes `m * 16^(c - 70)`.

use crate::errors::{CoreError, Result};

/// Target representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatKind {
    /// IBM hexadecimal single precision
    Legacy,
    /// IEEE 754 single precision
    Ieee,
}

impl FloatKind {
    pub fn name(&self) -> &'static str {
        match self {
            FloatKind::Legacy => "IBM single precision",
            FloatKind::Ieee => "IEEE single precision",
        }
    }
}

const SIGN_BIT: u32 = 0x8000_0000;
const EXPONENT_MASK: u32 = 0x7f00_0000;
const FRACTION_MASK: u32 = 0x00ff_ffff;
const FRACTION_MIN: f64 = 1_048_576.0; // 0x100000, normalised lower bound
const FRACTION_LIMIT: f64 = 16_777_216.0; // 0x1000000
const MAX_CHARACTERISTIC: i32 = 127;
// Characteristic whose scale factor 16^(c - 70) is one.
const UNIT_CHARACTERISTIC: i32 = 70;

fn hex_scale(characteristic: i32) -> f64 {
    16f64.powi(characteristic - UNIT_CHARACTERISTIC)
}

fn legacy_max() -> f64 {
    f64::from(FRACTION_MASK) * hex_scale(MAX_CHARACTERISTIC)
}

/// A 32-bit word in the IBM hexadecimal single-precision format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LegacyFloat(u32);

impl LegacyFloat {
    pub const ZERO: LegacyFloat = LegacyFloat(0);

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    pub fn is_negative(&self) -> bool {
        self.0 & SIGN_BIT != 0
    }

    /// Excess-64 exponent field
    pub fn characteristic(&self) -> u32 {
        (self.0 & EXPONENT_MASK) >> 24
    }

    pub fn fraction(&self) -> u32 {
        self.0 & FRACTION_MASK
    }

    /// Decode to a double. Every legacy value is exactly representable.
    pub fn to_f64(&self) -> f64 {
        let magnitude = f64::from(self.fraction()) * hex_scale(self.characteristic() as i32);
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Encode the largest-magnitude legacy value not exceeding `|value|`
    ///
    /// # Errors
    ///
    /// - `CoreError::NotANumber` for NaN input
    /// - `CoreError::MagnitudeOutOfRange` when `|value|` exceeds the largest legacy value
    pub fn from_f64_toward_zero(value: f64) -> Result<Self> {
        if value.is_nan() {
            return Err(CoreError::NotANumber);
        }
        let magnitude = value.abs();
        if magnitude > legacy_max() {
            return Err(CoreError::MagnitudeOutOfRange {
                value,
                representation: FloatKind::Legacy.name(),
            });
        }
        if magnitude == 0.0 {
            return Ok(Self::ZERO);
        }

        // Pick c so that 0x100000 <= |value| / 16^(c-70) < 0x1000000, then
        // correct for rounding in the logarithm.
        let mut characteristic = (magnitude.log2() / 4.0).floor() as i32 + 65;
        while characteristic > 0 && magnitude / hex_scale(characteristic) < FRACTION_MIN {
            characteristic -= 1;
        }
        while magnitude / hex_scale(characteristic) >= FRACTION_LIMIT {
            characteristic += 1;
        }
        // Below the normalised range only unnormalised fractions at c = 0 remain.
        let characteristic = characteristic.clamp(0, MAX_CHARACTERISTIC);

        let fraction = (magnitude / hex_scale(characteristic)).floor() as u32;
        if fraction == 0 {
            return Ok(Self::ZERO);
        }
        let sign = if value < 0.0 { SIGN_BIT } else { 0 };
        Ok(Self(sign | ((characteristic as u32) << 24) | fraction))
    }
}

/// Quantize `value` onto the grid of `kind`, rounding toward zero
///
/// # Errors
///
/// - `CoreError::NotANumber` for NaN input
/// - `CoreError::MagnitudeOutOfRange` when the magnitude exceeds the format's range
///
/// # Example
///
/// ```
/// use gribkit_core::numeric::{quantize, FloatKind};
///
/// let q = quantize(1.1, FloatKind::Legacy).unwrap();
/// assert!((q - 1.0999994277954).abs() < 1e-9);
/// assert_eq!(quantize(q, FloatKind::Legacy).unwrap(), q);
/// ```
pub fn quantize(value: f64, kind: FloatKind) -> Result<f64> {
    match kind {
        FloatKind::Legacy => nearest_smaller_ibm_float(value),
        FloatKind::Ieee => nearest_smaller_ieee_float(value),
    }
}

/// Largest-magnitude IBM single-precision value not exceeding `|value|`, sign kept
///
/// # Errors
///
/// See [`quantize`].
pub fn nearest_smaller_ibm_float(value: f64) -> Result<f64> {
    Ok(LegacyFloat::from_f64_toward_zero(value)?.to_f64())
}

/// Largest-magnitude IEEE single-precision value not exceeding `|value|`, sign kept
///
/// # Errors
///
/// See [`quantize`].
pub fn nearest_smaller_ieee_float(value: f64) -> Result<f64> {
    if value.is_nan() {
        return Err(CoreError::NotANumber);
    }
    if value.abs() > f64::from(f32::MAX) {
        return Err(CoreError::MagnitudeOutOfRange {
            value,
            representation: FloatKind::Ieee.name(),
        });
    }
    let mut single = value as f32;
    // The cast rounds to nearest; step one unit back toward zero if it went past.
    if f64::from(single).abs() > value.abs() {
        single = f32::from_bits(single.to_bits() - 1);
    }
    Ok(f64::from(single))
}
