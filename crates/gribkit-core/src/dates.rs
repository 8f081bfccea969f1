//! Calendar validation for reference dates

use chrono::{NaiveDate, NaiveTime};

/// Whether the components name an existing proleptic Gregorian date and time
///
/// Seconds run 0..=59; leap seconds are rejected.
///
/// # Example
///
/// ```
/// use gribkit_core::dates::is_date_valid;
///
/// assert!(is_date_valid(2020, 2, 29, 0, 0, 0));
/// assert!(!is_date_valid(2023, 2, 29, 0, 0, 0));
/// ```
pub fn is_date_valid(year: i64, month: i64, day: i64, hour: i64, minute: i64, second: i64) -> bool {
    let date = match (i32::try_from(year), u32::try_from(month), u32::try_from(day)) {
        (Ok(y), Ok(mo), Ok(d)) => NaiveDate::from_ymd_opt(y, mo, d),
        _ => None,
    };
    let time = match (
        u32::try_from(hour),
        u32::try_from(minute),
        u32::try_from(second),
    ) {
        (Ok(h), Ok(mi), Ok(s)) if s < 60 => NaiveTime::from_hms_opt(h, mi, s),
        _ => None,
    };
    date.is_some() && time.is_some()
}
