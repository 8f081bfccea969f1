//! Read-only access to a message's field values

use crate::errors::{CoreError, Result};
use gribkit_core_types::FieldValue;
use std::collections::BTreeMap;

/// Field lookups on a decoded message
///
/// The resolver only ever reads through this trait; it never sees the
/// message layout.
pub trait FieldLookup {
    /// Current value of field `name`
    ///
    /// # Errors
    ///
    /// `CoreError::FieldNotFound` if the message has no such field.
    fn field_value(&self, name: &str) -> Result<FieldValue>;
}

impl<T: FieldLookup + ?Sized> FieldLookup for &T {
    fn field_value(&self, name: &str) -> Result<FieldValue> {
        (**self).field_value(name)
    }
}

/// In-memory field set
///
/// # Example
///
/// ```
/// use gribkit_core::concept::{FieldLookup, FieldMap};
/// use gribkit_core_types::FieldValue;
///
/// let fields = FieldMap::new().with("edition", 2).with("stepTypeInternal", "instant");
/// assert_eq!(fields.field_value("edition").unwrap(), FieldValue::Long(2));
/// assert!(fields.field_value("centre").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap {
    fields: BTreeMap<String, FieldValue>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.fields.remove(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FieldLookup for FieldMap {
    fn field_value(&self, name: &str) -> Result<FieldValue> {
        self.fields
            .get(name)
            .cloned()
            .ok_or_else(|| CoreError::FieldNotFound {
                field: name.to_string(),
            })
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for FieldMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = FieldMap::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}
