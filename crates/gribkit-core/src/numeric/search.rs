//! Bracket search over strictly monotonic arrays

use crate::errors::{CoreError, Result};

/// Adjacent index pair enclosing a target value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub lower: usize,
    pub upper: usize,
}

/// Find `lower`, `upper = lower + 1` with the target between `values[lower]`
/// and `values[upper]`.
///
/// The direction is taken from the end points: ascending when
/// `values[0] < values[last]`, descending otherwise. In both directions a
/// target equal to an interior element opens the interval starting at that
/// element; a target equal to the last element closes the final interval. Targets outside the
/// range fall into the first or last interval.
///
/// The array must be strictly monotonic; otherwise the result is some
/// interval, but not a meaningful one.
///
/// # Errors
///
/// `CoreError::SearchArrayTooShort` if `values` has fewer than two elements.
///
/// # Example
///
/// ```
/// use gribkit_core::numeric::{bracket, Bracket};
///
/// let lats = [88.0, 78.0, 0.0, -88.0];
/// assert_eq!(bracket(&lats, -88.0).unwrap(), Bracket { lower: 2, upper: 3 });
/// ```
pub fn bracket(values: &[f64], target: f64) -> Result<Bracket> {
    if values.len() < 2 {
        return Err(CoreError::SearchArrayTooShort { len: values.len() });
    }
    let last = values.len() - 1;
    let ascending = values[0] < values[last];

    let mut lower = 0;
    let mut upper = last;
    while upper - lower > 1 {
        let mid = (lower + upper) / 2;
        let at_or_past_mid = if ascending {
            target >= values[mid]
        } else {
            target <= values[mid]
        };
        if at_or_past_mid {
            lower = mid;
        } else {
            upper = mid;
        }
    }
    Ok(Bracket { lower, upper })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_elements_is_single_interval() {
        assert_eq!(bracket(&[1.0, 2.0], 1.5).unwrap(), Bracket { lower: 0, upper: 1 });
        assert_eq!(bracket(&[2.0, 1.0], 1.5).unwrap(), Bracket { lower: 0, upper: 1 });
    }

    #[test]
    fn test_descending_interior_match_opens_interval() {
        let desc = [88.0, 78.0, 0.0, -88.0];
        assert_eq!(bracket(&desc, 78.0).unwrap(), Bracket { lower: 1, upper: 2 });
        assert_eq!(bracket(&desc, 0.0).unwrap(), Bracket { lower: 2, upper: 3 });
    }

    #[test]
    fn test_out_of_range_targets_clamp() {
        let asc = [0.0, 1.0, 2.0, 3.0];
        assert_eq!(bracket(&asc, -5.0).unwrap(), Bracket { lower: 0, upper: 1 });
        assert_eq!(bracket(&asc, 9.0).unwrap(), Bracket { lower: 2, upper: 3 });
    }

    #[test]
    fn test_short_arrays_rejected() {
        assert_eq!(
            bracket(&[1.0], 1.0),
            Err(CoreError::SearchArrayTooShort { len: 1 })
        );
        assert!(bracket(&[], 1.0).is_err());
    }
}
