//! Core types shared across gribkit facilities
//!
//! This crate provides the foundational types used by the numeric core,
//! the concept resolver and the logging facility:
//!
//! - **Field values**: FieldValue, ValueType (typed values read from a message)
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
pub mod value;

pub use value::{FieldValue, ValueType};
