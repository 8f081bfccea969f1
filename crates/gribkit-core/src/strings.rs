//! Small text helpers used when handling key names and file names

use crate::diagnostics::Context;
use crate::errors::Result;

/// Split `input` on any of the characters in `delimiters`
///
/// Empty tokens are dropped, so leading, trailing and repeated delimiters
/// produce nothing.
///
/// # Errors
///
/// An empty `input` or `delimiters` is an invariant failure: it is reported
/// through the context's assertion observer and returned as
/// `CoreError::AssertionFailed`.
///
/// # Example
///
/// ```
/// use gribkit_core::diagnostics::Context;
/// use gribkit_core::strings::split;
///
/// let parts = split(&Context::new(), "12345|a gap|", "|").unwrap();
/// assert_eq!(parts, vec!["12345", "a gap"]);
/// ```
pub fn split(ctx: &Context, input: &str, delimiters: &str) -> Result<Vec<String>> {
    ctx.ensure(!input.is_empty(), "split: input is empty")?;
    ctx.ensure(!delimiters.is_empty(), "split: no delimiters given")?;

    Ok(input
        .split(|c: char| delimiters.contains(c))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect())
}

/// Trim ASCII whitespace from the left end, the right end, or both
pub fn lrtrim(input: &str, left: bool, right: bool) -> &str {
    let mut out = input;
    if left {
        out = out.trim_start_matches(|c: char| c.is_ascii_whitespace());
    }
    if right {
        out = out.trim_end_matches(|c: char| c.is_ascii_whitespace());
    }
    out
}

/// Whether `s` ends with `suffix`; every string ends with the empty suffix
pub fn ends_with(s: &str, suffix: &str) -> bool {
    s.ends_with(suffix)
}
