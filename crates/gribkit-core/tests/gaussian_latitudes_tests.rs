#![allow(clippy::unwrap_used, clippy::expect_used)]

use gribkit_core::errors::{CoreError, ExErrorKind};
use gribkit_core::numeric::{gaussian_latitudes, gaussian_latitudes_into, GaussianLatitudes};

const TOLERANCE: f64 = 1e-6;

const ORDER_640_HEAD: [f64; 16] = [
    89.892396, 89.753005, 89.612790, 89.472390, 89.331918, 89.191413, 89.050889, 88.910352,
    88.769808, 88.629259, 88.488706, 88.348150, 88.207592, 88.067032, 87.926471, 87.785908,
];

const ORDER_640_TAIL: [f64; 18] = [
    -87.504781, -87.645345, -87.785908, -87.926471, -88.067032, -88.207592, -88.348150,
    -88.488706, -88.629259, -88.769808, -88.910352, -89.050889, -89.191413, -89.331918,
    -89.472390, -89.612790, -89.753005, -89.892396,
];

#[test]
fn test_order_640_reference_values() {
    let lats = gaussian_latitudes(640).unwrap();
    assert_eq!(lats.len(), 1280);

    for (i, expected) in ORDER_640_HEAD.iter().enumerate() {
        assert!(
            (lats[i] - expected).abs() < TOLERANCE,
            "lats[{}] = {} expected {}",
            i,
            lats[i],
            expected
        );
    }
    for (k, expected) in ORDER_640_TAIL.iter().enumerate() {
        let i = 1262 + k;
        assert!(
            (lats[i] - expected).abs() < TOLERANCE,
            "lats[{}] = {} expected {}",
            i,
            lats[i],
            expected
        );
    }
}

#[test]
fn test_symmetry_across_operational_orders() {
    let orders = [32, 48, 80, 128, 160, 200, 256, 320, 400, 512, 640, 1024, 1280, 2000];
    for order in orders {
        let lats = gaussian_latitudes(order).unwrap();
        let nlat = 2 * order;
        assert_eq!(lats.len(), nlat);
        assert!((lats[0] + lats[nlat - 1]).abs() < TOLERANCE, "order {}", order);
        for i in 0..order {
            assert!(
                (lats[i] + lats[nlat - 1 - i]).abs() < TOLERANCE,
                "order {} index {}",
                order,
                i
            );
        }
    }
}

#[test]
fn test_strictly_decreasing_north_to_south() {
    let lats = gaussian_latitudes(400).unwrap();
    assert!(lats[0] < 90.0);
    assert!(lats.windows(2).all(|w| w[0] > w[1]));
    assert!(lats[399] > 0.0 && lats[400] < 0.0);
}

#[test]
fn test_into_caller_buffer() {
    let mut buffer = vec![0.0; 64];
    gaussian_latitudes_into(32, &mut buffer).unwrap();
    assert_eq!(buffer, gaussian_latitudes(32).unwrap());

    let mut short = vec![0.0; 63];
    let err = gaussian_latitudes_into(32, &mut short).unwrap_err();
    assert_eq!(
        err,
        CoreError::BufferLengthMismatch {
            expected: 64,
            actual: 63
        }
    );
}

#[test]
fn test_zero_order_is_invalid_argument() {
    let err = gaussian_latitudes(0).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidArgument);
}

#[test]
fn test_grid_wrapper_brackets_latitude() {
    let grid = GaussianLatitudes::compute(48).unwrap();
    assert_eq!(grid.order(), 48);
    assert_eq!(grid.len(), 96);

    let b = grid.bracket(45.0).unwrap();
    let lats = grid.as_slice();
    assert_eq!(b.upper, b.lower + 1);
    assert!(lats[b.lower] >= 45.0 && 45.0 >= lats[b.upper]);
}

#[test]
fn test_huge_orders_return_status_instead_of_aborting() {
    let overflowing = usize::MAX / 2 + 1;
    let mut empty: Vec<f64> = Vec::new();
    let err = gaussian_latitudes_into(overflowing, &mut empty).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidArgument);

    let err = gaussian_latitudes(usize::MAX / 4).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::AllocationFailure);
    assert_eq!(err.code(), "ERR_ALLOCATION_FAILURE");
}
