#![allow(clippy::unwrap_used, clippy::expect_used)]

use gribkit_core::dates::is_date_valid;
use gribkit_core::diagnostics::Context;
use gribkit_core::strings::{ends_with, lrtrim, split};
use gribkit_core::version::{api_version, build_date, git_sha1};

#[test]
fn test_split_counts() {
    let ctx = Context::new();
    assert_eq!(split(&ctx, "Born|To|Be|Wild", "|").unwrap().len(), 4);
    assert_eq!(split(&ctx, "12345|a gap|", "|").unwrap(), vec!["12345", "a gap"]);
    assert_eq!(split(&ctx, "Steppenwolf", ",").unwrap(), vec!["Steppenwolf"]);
}

#[test]
fn test_split_empty_input_is_reported() {
    let mut ctx = Context::new();
    ctx.set_assertion_failed_proc(Some(std::sync::Arc::new(|_: &str| {})));
    assert!(split(&ctx, "", "|").is_err());
}

#[test]
fn test_lrtrim() {
    assert_eq!(lrtrim(" Standing  ", false, true), " Standing");
    assert_eq!(lrtrim("  Weeping ", true, false), "Weeping ");
    assert_eq!(lrtrim("  Silhouette ", true, true), "Silhouette");
    assert_eq!(lrtrim(" The Forest Of October  ", true, true), "The Forest Of October");
    assert_eq!(lrtrim("\t\n Apostle In Triumph \r ", true, true), "Apostle In Triumph");
}

#[test]
fn test_ends_with() {
    assert!(ends_with("GRIB2.tmpl", "tmpl"));
    assert!(ends_with("GRIB2.tmpl", ".tmpl"));
    assert!(ends_with("", ""));
    assert!(ends_with(".", "."));
    assert!(ends_with("Bam", ""));

    assert!(!ends_with("GRIB2.tmpl", "tmp"));
    assert!(!ends_with("GRIB2.tmpl", "tmpl0"));
    assert!(!ends_with("GRIB2.tmpl", "1.tmpl"));
    assert!(!ends_with("GRIB2.tmpl", " "));
}

#[test]
fn test_valid_dates() {
    assert!(is_date_valid(1979, 12, 1, 0, 0, 0));
    assert!(is_date_valid(1900, 1, 1, 0, 0, 0));
    assert!(is_date_valid(1964, 4, 6, 0, 0, 0));
    assert!(is_date_valid(2023, 3, 4, 0, 0, 0));
    assert!(is_date_valid(2023, 3, 4, 12, 0, 0));
    assert!(is_date_valid(2023, 3, 4, 0, 10, 0));
    assert!(is_date_valid(2023, 3, 4, 0, 0, 59));
    assert!(is_date_valid(0, 3, 4, 0, 0, 0));
    assert!(is_date_valid(2020, 2, 29, 0, 0, 0));
}

#[test]
fn test_invalid_dates() {
    assert!(!is_date_valid(2023, -1, 1, 0, 0, 0));
    assert!(!is_date_valid(2023, 0, 1, 0, 0, 0));
    assert!(!is_date_valid(2023, 13, 1, 0, 0, 0));
    assert!(!is_date_valid(2023, 1, 0, 0, 0, 0));
    assert!(!is_date_valid(2023, 1, 32, 0, 0, 0));
    assert!(!is_date_valid(2023, 1, -7, 0, 0, 0));
    assert!(!is_date_valid(2023, 1, 1, 99, 0, 0));
    assert!(!is_date_valid(2023, 1, 1, -1, 0, 0));
    assert!(!is_date_valid(2023, 1, 1, 0, 61, 0));
    assert!(!is_date_valid(2023, 1, 1, 0, -1, 0));
    assert!(!is_date_valid(2023, 1, 1, 0, 0, -1));
    assert!(!is_date_valid(2023, 1, 1, 0, 0, 60));
    assert!(!is_date_valid(2023, 2, 29, 0, 0, 0));
}

#[test]
fn test_version_info() {
    assert!(api_version() > 0);
    assert!(git_sha1().chars().all(|c| c.is_ascii_hexdigit()));
    assert!(!build_date().contains('\n'));
}
