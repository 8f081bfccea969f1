#![allow(clippy::unwrap_used, clippy::expect_used)]

use gribkit_core::errors::{CoreError, ExErrorKind};
use gribkit_core::numeric::{
    nearest_smaller_ibm_float, nearest_smaller_ieee_float, quantize, FloatKind, LegacyFloat,
};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {} got {}",
        expected,
        actual
    );
}

#[test]
fn test_ibm_known_values() {
    assert_close(nearest_smaller_ibm_float(1.1).unwrap(), 1.0999994277954);
    assert_close(nearest_smaller_ibm_float(10.6).unwrap(), 10.599999427795);
    assert_close(nearest_smaller_ibm_float(7.85).unwrap(), 7.8499994277954);
}

#[test]
fn test_ieee_known_values() {
    assert_close(nearest_smaller_ieee_float(1.1).unwrap(), 1.0999999046325);
    assert_close(nearest_smaller_ieee_float(10.6).unwrap(), 10.599999427795);
    assert_close(nearest_smaller_ieee_float(7.85).unwrap(), 7.8499999046325);
}

#[test]
fn test_exact_values_are_unchanged() {
    for kind in [FloatKind::Legacy, FloatKind::Ieee] {
        assert_eq!(quantize(0.0, kind).unwrap(), 0.0);
        assert_eq!(quantize(1.0, kind).unwrap(), 1.0);
        assert_eq!(quantize(-1.0, kind).unwrap(), -1.0);
        assert_eq!(quantize(0.5, kind).unwrap(), 0.5);
        assert_eq!(quantize(1024.0, kind).unwrap(), 1024.0);
    }
}

#[test]
fn test_negative_values_truncate_toward_zero() {
    let ibm = nearest_smaller_ibm_float(-1.1).unwrap();
    assert_close(ibm, -1.0999994277954);
    let ieee = nearest_smaller_ieee_float(-1.1).unwrap();
    assert_close(ieee, -1.0999999046325);
}

#[test]
fn test_legacy_word_layout() {
    let one = LegacyFloat::from_f64_toward_zero(1.0).unwrap();
    assert_eq!(one.bits(), 0x4110_0000);
    assert_eq!(one.characteristic(), 0x41);
    assert_eq!(one.fraction(), 0x10_0000);
    assert!(!one.is_negative());

    let minus = LegacyFloat::from_f64_toward_zero(-118.625).unwrap();
    assert_eq!(minus.bits(), 0xC276_A000);
    assert_eq!(minus.to_f64(), -118.625);
}

#[test]
fn test_out_of_range_magnitudes() {
    let err = quantize(1e300, FloatKind::Legacy).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::OutOfRange);

    let err = quantize(-1e39, FloatKind::Ieee).unwrap_err();
    assert!(matches!(err, CoreError::MagnitudeOutOfRange { .. }));
}

#[test]
fn test_nan_rejected() {
    assert_eq!(quantize(f64::NAN, FloatKind::Legacy), Err(CoreError::NotANumber));
    assert_eq!(quantize(f64::NAN, FloatKind::Ieee), Err(CoreError::NotANumber));
}

#[test]
fn test_tiny_values_flush_toward_zero() {
    assert_eq!(quantize(1e-300, FloatKind::Legacy).unwrap(), 0.0);
    assert_eq!(quantize(1e-300, FloatKind::Ieee).unwrap(), 0.0);
}

proptest! {
    #[test]
    fn prop_quantize_is_idempotent(x in -1.0e30f64..1.0e30f64) {
        for kind in [FloatKind::Legacy, FloatKind::Ieee] {
            let once = quantize(x, kind).unwrap();
            prop_assert_eq!(quantize(once, kind).unwrap(), once);
        }
    }

    #[test]
    fn prop_quantize_never_grows_and_keeps_sign(x in -1.0e30f64..1.0e30f64) {
        for kind in [FloatKind::Legacy, FloatKind::Ieee] {
            let q = quantize(x, kind).unwrap();
            prop_assert!(q.abs() <= x.abs());
            prop_assert!(q == 0.0 || q.signum() == x.signum());
        }
    }
}
