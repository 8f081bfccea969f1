//! gribkit core - numeric and semantic support for GRIB message handling
//!
//! This crate provides the pieces that higher-level message code leans on:
//! - Quantization of reals to legacy IBM and IEEE single-precision floats
//! - Gaussian grid latitudes from Legendre polynomial roots
//! - Concept resolution into canonical condition strings
//! - Parsing of `key=value,key!=value` filter expressions
//! - Bracketing of values in monotonic arrays
//! - An explicitly passed diagnostics context for logging and invariant failures

pub mod concept;
pub mod dates;
pub mod diagnostics;
pub mod errors;
pub mod expression;
pub mod logging_facility;
pub mod numeric;
pub mod strings;
pub mod version;

// Re-export commonly used types
pub use concept::{ConceptResolver, FieldLookup, FieldMap, InMemoryRuleTable, RuleTable};
pub use diagnostics::{Context, ContextConfig, Severity};
pub use errors::{CoreError, ExError, ExErrorKind, Result};
pub use expression::{parse_keyval_string, KeyValueAssignment};
pub use numeric::{bracket, gaussian_latitudes, quantize, Bracket, FloatKind};
