//! Numeric primitives
//!
//! - Restricted-precision float quantization (IBM hexadecimal and IEEE single)
//! - Gaussian grid latitudes
//! - Bracket search over monotonic arrays

pub mod float_codec;
pub mod gaussian;
pub mod search;

pub use float_codec::{
    nearest_smaller_ibm_float, nearest_smaller_ieee_float, quantize, FloatKind, LegacyFloat,
};
pub use gaussian::{gaussian_latitudes, gaussian_latitudes_into, GaussianLatitudes};
pub use search::{bracket, Bracket};
