//! Concept rule tables
//!
//! A rule table maps each concept to an ordered list of rows. Row order is
//! significant: the first applicable row wins.
//!
//! The concrete storage is behind [`RuleTable`]; [`InMemoryRuleTable`] is
//! built in code or loaded from a YAML or JSON document:
//!
//! ```yaml
//! schema_version: 0
//! version: "sample-1"
//! concepts:
//!   typeOfLevel:
//!     - value: surface
//!       edition: 2
//!       conditions:
//!         - { field: typeOfFirstFixedSurface, value: 1 }
//!         - { field: typeOfSecondFixedSurface, value: 255 }
//! ```
//!
//! A condition either names a literal `value` or copies another field with
//! `from_field`. Rows without `edition` apply to every edition.

use crate::errors::{CoreError, Result};
use gribkit_core_types::FieldValue;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Which editions a row applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditionSignature {
    #[default]
    Any,
    Edition(i64),
}

impl EditionSignature {
    /// Whether a message of `edition` (if known) is covered
    pub fn admits(&self, edition: Option<i64>) -> bool {
        match self {
            EditionSignature::Any => true,
            EditionSignature::Edition(e) => edition == Some(*e),
        }
    }
}

/// Right-hand side of a condition
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionOperand {
    Literal(FieldValue),
    /// The current value of another field
    FieldRef(String),
}

/// `field = operand`
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub field: String,
    pub operand: ConditionOperand,
}

impl Condition {
    pub fn literal(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self {
            field: field.into(),
            operand: ConditionOperand::Literal(value.into()),
        }
    }

    pub fn field_ref(field: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operand: ConditionOperand::FieldRef(source.into()),
        }
    }
}

/// One row: the concept takes `value` when every condition holds
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptRule {
    pub value: String,
    pub edition: EditionSignature,
    pub conditions: Vec<Condition>,
}

impl ConceptRule {
    pub fn new(value: impl Into<String>, edition: EditionSignature, conditions: Vec<Condition>) -> Self {
        Self {
            value: value.into(),
            edition,
            conditions,
        }
    }
}

/// Read-only access to concept rows
pub trait RuleTable: Send + Sync {
    /// Identifier of the table contents, reported in logs
    fn version(&self) -> &str;

    /// Rows for `concept` in table order, or `None` for an unknown concept
    fn rows_for(&self, concept: &str) -> Option<&[ConceptRule]>;

    /// Names of all concepts in the table
    fn concepts(&self) -> Vec<&str>;
}

/// Rule table held in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryRuleTable {
    version: String,
    concepts: BTreeMap<String, Vec<ConceptRule>>,
}

impl InMemoryRuleTable {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            concepts: BTreeMap::new(),
        }
    }

    /// Append a row to `concept` (builder style)
    pub fn with_rule(mut self, concept: impl Into<String>, rule: ConceptRule) -> Self {
        self.push_rule(concept, rule);
        self
    }

    pub fn push_rule(&mut self, concept: impl Into<String>, rule: ConceptRule) {
        self.concepts.entry(concept.into()).or_default().push(rule);
    }

    /// Load a table from a YAML document
    ///
    /// # Errors
    ///
    /// `CoreError::InvalidRuleTable` if the document does not parse or fails validation.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let doc: RuleTableDocV0 = serde_yaml::from_str(content)?;
        doc.into_table()
    }

    /// Load a table from a JSON document
    ///
    /// # Errors
    ///
    /// `CoreError::InvalidRuleTable` if the document does not parse or fails validation.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let doc: RuleTableDocV0 = serde_json::from_str(content)?;
        doc.into_table()
    }
}

impl RuleTable for InMemoryRuleTable {
    fn version(&self) -> &str {
        &self.version
    }

    fn rows_for(&self, concept: &str) -> Option<&[ConceptRule]> {
        self.concepts.get(concept).map(Vec::as_slice)
    }

    fn concepts(&self) -> Vec<&str> {
        self.concepts.keys().map(String::as_str).collect()
    }
}

// ===== Document format v0 =====

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleTableDocV0 {
    schema_version: u32,
    version: String,
    concepts: BTreeMap<String, Vec<RuleDoc>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleDoc {
    value: FieldValue,
    #[serde(default)]
    edition: Option<i64>,
    conditions: Vec<ConditionDoc>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConditionDoc {
    field: String,
    #[serde(default)]
    value: Option<FieldValue>,
    #[serde(default)]
    from_field: Option<String>,
}

fn invalid(reason: String) -> CoreError {
    CoreError::InvalidRuleTable { reason }
}

impl RuleTableDocV0 {
    fn into_table(self) -> Result<InMemoryRuleTable> {
        if self.schema_version != 0 {
            return Err(invalid(format!(
                "Unsupported schema_version: {}. Expected 0",
                self.schema_version
            )));
        }
        if self.version.trim().is_empty() {
            return Err(invalid("version must not be empty".to_string()));
        }

        let mut table = InMemoryRuleTable::new(self.version);
        for (concept, rows) in self.concepts {
            if rows.is_empty() {
                return Err(invalid(format!("concept {} has no rows", concept)));
            }
            for row in rows {
                let rule = row.into_rule(&concept)?;
                table.push_rule(concept.clone(), rule);
            }
        }
        Ok(table)
    }
}

impl RuleDoc {
    fn into_rule(self, concept: &str) -> Result<ConceptRule> {
        let value = self.value.to_string();
        if self.conditions.is_empty() {
            return Err(invalid(format!(
                "row {} of concept {} has no conditions",
                value, concept
            )));
        }
        let conditions = self
            .conditions
            .into_iter()
            .map(|c| c.into_condition(concept, &value))
            .collect::<Result<Vec<_>>>()?;
        let edition = self
            .edition
            .map_or(EditionSignature::Any, EditionSignature::Edition);
        Ok(ConceptRule::new(value, edition, conditions))
    }
}

impl ConditionDoc {
    fn into_condition(self, concept: &str, row: &str) -> Result<Condition> {
        if self.field.trim().is_empty() {
            return Err(invalid(format!(
                "row {} of concept {} has a condition without a field",
                row, concept
            )));
        }
        match (self.value, self.from_field) {
            (Some(value), None) => Ok(Condition::literal(self.field, value)),
            (None, Some(source)) => Ok(Condition::field_ref(self.field, source)),
            _ => Err(invalid(format!(
                "condition on {} in row {} of concept {} needs exactly one of value or from_field",
                self.field, row, concept
            ))),
        }
    }
}
