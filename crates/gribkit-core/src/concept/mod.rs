//! Concept resolution
//!
//! A concept is an edition-independent name (`typeOfLevel`, `paramId`)
//! whose values are defined by rows of literal field conditions. Given a
//! message handle, the resolver finds which row applies and renders the
//! literal conditions as a condition string such as
//! `typeOfFirstFixedSurface=1,typeOfSecondFixedSurface=255`.

pub mod handle;
pub mod resolver;
pub mod table;

pub use handle::{FieldLookup, FieldMap};
pub use resolver::ConceptResolver;
pub use table::{
    ConceptRule, Condition, ConditionOperand, EditionSignature, InMemoryRuleTable, RuleTable,
};
