//! Concept evaluation and condition-string rendering

use super::handle::FieldLookup;
use super::table::{ConceptRule, Condition, ConditionOperand, RuleTable};
use crate::diagnostics::{Context, Severity};
use crate::errors::{CoreError, Result};
use crate::{log_op_end, log_op_error, log_op_start};
use gribkit_core_types::FieldValue;
use std::sync::Arc;
use std::time::Instant;

/// Field holding the message edition
const EDITION_FIELD: &str = "edition";

/// Pseudo-field that always reads as 1; used for default rows and never rendered
const ALWAYS_ONE_FIELD: &str = "one";

/// Resolves concepts against a shared, read-only rule table
///
/// Cloning is cheap; clones share the same table.
#[derive(Clone)]
pub struct ConceptResolver {
    table: Arc<dyn RuleTable>,
}

impl ConceptResolver {
    pub fn new(table: Arc<dyn RuleTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &dyn RuleTable {
        self.table.as_ref()
    }

    /// Value the concept currently takes on `handle`
    ///
    /// The first row applicable to the handle's edition whose conditions all
    /// hold decides the value.
    ///
    /// # Errors
    ///
    /// - `CoreError::UnknownConcept` if the table has no rows for `concept`
    /// - `CoreError::ConceptNoMatch` if no row matches the handle
    pub fn current_value(
        &self,
        ctx: &Context,
        handle: &dyn FieldLookup,
        concept: &str,
    ) -> Result<String> {
        let rows = self.rows(concept)?;
        let edition = edition_of(handle);
        rows.iter()
            .filter(|row| row.edition.admits(edition))
            .find(|row| row.conditions.iter().all(|c| condition_holds(handle, c)))
            .map(|row| {
                ctx.log(
                    Severity::Debug,
                    &format!("concept {} evaluates to {}", concept, row.value),
                );
                row.value.clone()
            })
            .ok_or_else(|| CoreError::ConceptNoMatch {
                concept: concept.to_string(),
            })
    }

    /// Render the condition string for `concept`
    ///
    /// With `value` set, the first applicable row carrying that value is
    /// rendered; otherwise the concept's current value on `handle` is used.
    /// Conditions are emitted in row order as `name=value` joined by `,`.
    /// Template references are rendered with the referenced field's current
    /// value.
    ///
    /// # Errors
    ///
    /// - `CoreError::UnknownConcept` if the table has no rows for `concept`
    /// - `CoreError::ConceptNoMatch` if no applicable row carries the value
    /// - `CoreError::FieldNotFound` if a referenced field is absent
    /// - `CoreError::AssertionFailed` if the rendered string contains whitespace
    ///
    /// # Example
    ///
    /// ```
    /// use std::sync::Arc;
    /// use gribkit_core::concept::*;
    /// use gribkit_core::diagnostics::Context;
    ///
    /// let table = InMemoryRuleTable::new("doc").with_rule(
    ///     "stepType",
    ///     ConceptRule::new(
    ///         "instant",
    ///         EditionSignature::Edition(2),
    ///         vec![
    ///             Condition::literal("selectStepTemplateInstant", 1),
    ///             Condition::literal("stepTypeInternal", "instant"),
    ///         ],
    ///     ),
    /// );
    /// let resolver = ConceptResolver::new(Arc::new(table));
    /// let handle = FieldMap::new()
    ///     .with("edition", 2)
    ///     .with("selectStepTemplateInstant", 1)
    ///     .with("stepTypeInternal", "instant");
    ///
    /// let rendered = resolver.resolve(&Context::new(), &handle, "stepType", None).unwrap();
    /// assert_eq!(rendered, "selectStepTemplateInstant=1,stepTypeInternal=instant");
    /// ```
    pub fn resolve(
        &self,
        ctx: &Context,
        handle: &dyn FieldLookup,
        concept: &str,
        value: Option<&str>,
    ) -> Result<String> {
        let started = Instant::now();
        log_op_start!("resolve_concept", concept = concept);

        let result = self.resolve_inner(ctx, handle, concept, value);
        let duration_ms = started.elapsed().as_millis() as u64;
        match &result {
            Ok(rendered) => {
                log_op_end!(
                    "resolve_concept",
                    duration_ms = duration_ms,
                    concept = concept,
                    rule_table_version = self.table.version(),
                    concept_value = rendered.as_str()
                );
            }
            Err(err) => {
                log_op_error!(
                    "resolve_concept",
                    err.clone(),
                    duration_ms = duration_ms,
                    concept = concept
                );
            }
        }
        result
    }

    fn resolve_inner(
        &self,
        ctx: &Context,
        handle: &dyn FieldLookup,
        concept: &str,
        value: Option<&str>,
    ) -> Result<String> {
        let rows = self.rows(concept)?;
        let target = match value {
            Some(v) => v.to_string(),
            None => self.current_value(ctx, handle, concept)?,
        };

        let edition = edition_of(handle);
        let row = rows
            .iter()
            .find(|row| row.edition.admits(edition) && row.value == target)
            .ok_or_else(|| CoreError::ConceptNoMatch {
                concept: concept.to_string(),
            })?;

        let rendered = render_row(handle, row)?;
        ctx.ensure(
            !rendered.chars().any(char::is_whitespace),
            &format!("condition string for {} contains whitespace", concept),
        )?;
        ctx.log(
            Severity::Debug,
            &format!("concept {}={} resolved to {}", concept, target, rendered),
        );
        Ok(rendered)
    }

    fn rows(&self, concept: &str) -> Result<&[ConceptRule]> {
        self.table
            .rows_for(concept)
            .ok_or_else(|| CoreError::UnknownConcept {
                concept: concept.to_string(),
            })
    }
}

impl std::fmt::Debug for ConceptResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConceptResolver")
            .field("table_version", &self.table.version())
            .finish()
    }
}

fn edition_of(handle: &dyn FieldLookup) -> Option<i64> {
    handle
        .field_value(EDITION_FIELD)
        .ok()
        .and_then(|v| v.as_long())
}

fn field_or_one(handle: &dyn FieldLookup, name: &str) -> Result<FieldValue> {
    if name == ALWAYS_ONE_FIELD {
        return Ok(FieldValue::Long(1));
    }
    handle.field_value(name)
}

/// A condition on an absent field does not hold
fn condition_holds(handle: &dyn FieldLookup, condition: &Condition) -> bool {
    let Ok(actual) = field_or_one(handle, &condition.field) else {
        return false;
    };
    match &condition.operand {
        ConditionOperand::Literal(expected) => actual.matches(expected),
        ConditionOperand::FieldRef(source) => match field_or_one(handle, source) {
            Ok(expected) => actual.matches(&expected),
            Err(_) => false,
        },
    }
}

fn render_row(handle: &dyn FieldLookup, row: &ConceptRule) -> Result<String> {
    let mut parts = Vec::with_capacity(row.conditions.len());
    for condition in &row.conditions {
        if condition.field == ALWAYS_ONE_FIELD {
            continue;
        }
        let value = match &condition.operand {
            ConditionOperand::Literal(v) => v.clone(),
            ConditionOperand::FieldRef(source) => field_or_one(handle, source)?,
        };
        parts.push(format!("{}={}", condition.field, value));
    }
    Ok(parts.join(","))
}
