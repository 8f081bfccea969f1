//! Gaussian grid latitudes
//!
//! The `2N` latitudes of a Gaussian grid of order `N` are the arcsines of
//! the roots of the Legendre polynomial `P_2N`. Each root in the northern
//! hemisphere is seeded from the asymptotic position of the zeros of the
//! Bessel function `J0` and polished with Newton iteration on the
//! three-term recurrence; the southern hemisphere is filled by symmetry.

use crate::errors::{CoreError, Result};
use crate::numeric::search::{bracket, Bracket};
use crate::{log_op_end, log_op_error, log_op_start};
use std::f64::consts::PI;
use std::time::Instant;

const CONVERGENCE_TOLERANCE: f64 = 1.0e-12;
const MAX_ITERATIONS: usize = 20;

/// Latitudes of one Gaussian grid, north to south, in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianLatitudes {
    order: usize,
    latitudes: Vec<f64>,
}

impl GaussianLatitudes {
    /// Compute the latitudes for grid order `order`
    ///
    /// # Errors
    ///
    /// See [`gaussian_latitudes`].
    pub fn compute(order: usize) -> Result<Self> {
        Ok(Self {
            order,
            latitudes: gaussian_latitudes(order)?,
        })
    }

    /// Number of latitudes between a pole and the equator
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.latitudes
    }

    pub fn len(&self) -> usize {
        self.latitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latitudes.is_empty()
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.latitudes
    }

    /// Indices of the two grid latitudes enclosing `latitude`
    ///
    /// # Errors
    ///
    /// Only fails for grids with fewer than two latitudes, which `compute` never builds.
    pub fn bracket(&self, latitude: f64) -> Result<Bracket> {
        bracket(&self.latitudes, latitude)
    }
}

/// Compute the `2 * order` Gaussian latitudes, north to south
///
/// # Errors
///
/// - `CoreError::InvalidGaussianOrder` if `order` is zero or `2 * order` overflows
/// - `CoreError::AllocationFailed` if the output vector cannot be allocated
/// - `CoreError::NoConvergence` if a root does not settle within the iteration cap
///
/// # Example
///
/// ```
/// use gribkit_core::numeric::gaussian_latitudes;
///
/// let lats = gaussian_latitudes(32).unwrap();
/// assert_eq!(lats.len(), 64);
/// assert_eq!(lats[0], -lats[63]);
/// ```
pub fn gaussian_latitudes(order: usize) -> Result<Vec<f64>> {
    let nlat = latitude_count(order)?;
    let mut latitudes = Vec::new();
    latitudes
        .try_reserve_exact(nlat)
        .map_err(|_| CoreError::AllocationFailed { elements: nlat })?;
    latitudes.resize(nlat, 0.0);
    gaussian_latitudes_into(order, &mut latitudes)?;
    Ok(latitudes)
}

/// `2 * order`, rejecting orders whose latitude count does not fit in `usize`
fn latitude_count(order: usize) -> Result<usize> {
    order
        .checked_mul(2)
        .ok_or(CoreError::InvalidGaussianOrder { order })
}

/// Fill `out` with the `2 * order` Gaussian latitudes, north to south
///
/// # Errors
///
/// - `CoreError::InvalidGaussianOrder` if `order` is zero or `2 * order` overflows
/// - `CoreError::BufferLengthMismatch` if `out.len() != 2 * order`
/// - `CoreError::NoConvergence` if a root does not settle within the iteration cap
pub fn gaussian_latitudes_into(order: usize, out: &mut [f64]) -> Result<()> {
    let started = Instant::now();
    log_op_start!("gaussian_latitudes", order = order);

    let result = solve(order, out);
    let duration_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(()) => {
            log_op_end!("gaussian_latitudes", duration_ms = duration_ms, order = order);
        }
        Err(err) => {
            log_op_error!(
                "gaussian_latitudes",
                err.clone(),
                duration_ms = duration_ms,
                order = order
            );
        }
    }
    result
}

fn solve(order: usize, out: &mut [f64]) -> Result<()> {
    if order == 0 {
        return Err(CoreError::InvalidGaussianOrder { order });
    }
    let nlat = latitude_count(order)?;
    if out.len() != nlat {
        return Err(CoreError::BufferLengthMismatch {
            expected: nlat,
            actual: out.len(),
        });
    }

    let n = nlat as f64;
    let scale = ((n + 0.5) * (n + 0.5) + (1.0 - (2.0 / PI) * (2.0 / PI)) * 0.25).sqrt();

    for j in 0..order {
        let mut root = (bessel_j0_zero(j + 1) / scale).cos();
        let mut converged = false;
        for _ in 0..MAX_ITERATIONS {
            let (p, dp) = legendre_with_derivative(nlat, root);
            let step = p / dp;
            root -= step;
            if step.abs() < CONVERGENCE_TOLERANCE {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(CoreError::NoConvergence {
                index: j,
                iterations: MAX_ITERATIONS,
            });
        }

        let latitude = root.asin().to_degrees();
        out[j] = latitude;
        out[nlat - 1 - j] = -latitude;
    }
    Ok(())
}

/// McMahon's expansion for the k-th positive zero of J0 (k starts at 1)
fn bessel_j0_zero(k: usize) -> f64 {
    let beta = (k as f64 - 0.25) * PI;
    let b2 = beta * beta;
    beta + 1.0 / (8.0 * beta) - 31.0 / (384.0 * beta * b2) + 3779.0 / (15360.0 * beta * b2 * b2)
}

/// `P_n(x)` and `P_n'(x)` for |x| < 1
fn legendre_with_derivative(n: usize, x: f64) -> (f64, f64) {
    let mut previous = 1.0;
    let mut current = x;
    for k in 2..=n {
        let k = k as f64;
        let next = ((2.0 * k - 1.0) * x * current - (k - 1.0) * previous) / k;
        previous = current;
        current = next;
    }
    let derivative = n as f64 * (previous - x * current) / (1.0 - x * x);
    (current, derivative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bessel_seed_is_close() {
        assert!((bessel_j0_zero(1) - 2.404_825_557_7).abs() < 5e-3);
        assert!((bessel_j0_zero(10) - 30.634_606_468_4).abs() < 1e-6);
    }

    #[test]
    fn test_legendre_low_degree() {
        let x = 0.3;
        let (p2, dp2) = legendre_with_derivative(2, x);
        assert!((p2 - 0.5 * (3.0 * x * x - 1.0)).abs() < 1e-15);
        assert!((dp2 - 3.0 * x).abs() < 1e-14);
    }

    #[test]
    fn test_order_one() {
        // Roots of P_2 are +-1/sqrt(3)
        let lats = gaussian_latitudes(1).unwrap();
        let expected = (1.0f64 / 3.0f64.sqrt()).asin().to_degrees();
        assert!((lats[0] - expected).abs() < 1e-12);
        assert_eq!(lats[1], -lats[0]);
    }

    #[test]
    fn test_zero_order_rejected() {
        assert_eq!(
            gaussian_latitudes(0),
            Err(CoreError::InvalidGaussianOrder { order: 0 })
        );
    }

    #[test]
    fn test_overflowing_order_rejected_without_panic() {
        let order = usize::MAX / 2 + 1;
        let mut out: Vec<f64> = Vec::new();
        assert_eq!(
            gaussian_latitudes_into(order, &mut out),
            Err(CoreError::InvalidGaussianOrder { order })
        );
        assert_eq!(
            gaussian_latitudes(order),
            Err(CoreError::InvalidGaussianOrder { order })
        );
    }

    #[test]
    fn test_unallocatable_order_reports_allocation_failure() {
        let order = usize::MAX / 4;
        let err = gaussian_latitudes(order).unwrap_err();
        assert_eq!(
            err,
            CoreError::AllocationFailed {
                elements: order * 2
            }
        );
        assert_eq!(err.kind(), crate::errors::ExErrorKind::AllocationFailure);
    }

    #[test]
    fn test_wrong_buffer_length_rejected() {
        let mut out = vec![0.0; 5];
        assert_eq!(
            gaussian_latitudes_into(3, &mut out),
            Err(CoreError::BufferLengthMismatch {
                expected: 6,
                actual: 5
            })
        );
    }
}
