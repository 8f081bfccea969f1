//! Filter expression parsing
//!
//! Turns `key=value,key!=value,...` strings into typed assignments. The
//! input is borrowed and never modified; every assignment owns its data.
//!
//! Beyond the basic form a token may carry:
//! - a type suffix on the key (`level:d=850`, `step:i=6`, `shortName:s=t`)
//! - alternatives separated by `/` (`level=500/850`)
//! - the literal `missing` for numeric keys

use crate::diagnostics::{Context, Severity};
use crate::errors::{CoreError, Result};
use crate::{log_op_end, log_op_error, log_op_start};
use gribkit_core_types::{FieldValue, ValueType};
use std::time::Instant;

/// One parsed `name=value` or `name!=value` term
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueAssignment {
    pub name: String,
    /// Type the value was coerced to
    pub value_type: ValueType,
    /// `None` when values were not required and the token was a bare key
    pub value: Option<FieldValue>,
    /// Further values from a `/`-separated list
    pub alternatives: Vec<FieldValue>,
    /// `true` for `=`, `false` for `!=`
    pub equal: bool,
}

impl KeyValueAssignment {
    /// The value followed by its alternatives
    pub fn values(&self) -> impl Iterator<Item = &FieldValue> {
        self.value.iter().chain(self.alternatives.iter())
    }

    /// Whether `candidate` satisfies this term
    pub fn accepts(&self, candidate: &FieldValue) -> bool {
        let hit = self.values().any(|v| v.matches(candidate));
        hit == self.equal
    }
}

/// Parse a comma-separated list of assignments
///
/// `tool` names the caller in error messages. Empty tokens (as in `a=1,,b=2`)
/// are skipped and an empty input yields no assignments.
///
/// # Errors
///
/// - `CoreError::TooManyTokens` if there are more than `max_count` tokens
/// - `CoreError::MalformedToken` if `values_required` and a token has no
///   `=`/`!=`, or if a key or value is empty
/// - `CoreError::ValueCoercion` if a value does not convert to its type
///
/// Every failure is also logged through `ctx` at error severity.
///
/// # Example
///
/// ```
/// use gribkit_core::diagnostics::Context;
/// use gribkit_core::expression::parse_keyval_string;
/// use gribkit_core_types::{FieldValue, ValueType};
///
/// let ctx = Context::new();
/// let terms = parse_keyval_string(&ctx, None, "x=14", true, ValueType::Long, 16).unwrap();
/// assert_eq!(terms[0].value, Some(FieldValue::Long(14)));
/// ```
pub fn parse_keyval_string(
    ctx: &Context,
    tool: Option<&str>,
    input: &str,
    values_required: bool,
    default_type: ValueType,
    max_count: usize,
) -> Result<Vec<KeyValueAssignment>> {
    let started = Instant::now();
    log_op_start!("parse_keyval");

    let result = parse_terms(input, values_required, default_type, max_count);
    let duration_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(terms) => {
            log_op_end!("parse_keyval", duration_ms = duration_ms, token_count = terms.len());
        }
        Err(err) => {
            let prefix = match tool {
                Some(tool) => format!("{} error", tool),
                None => "Error".to_string(),
            };
            ctx.log(Severity::Error, &format!("{}: {}", prefix, err));
            log_op_error!("parse_keyval", err.clone(), duration_ms = duration_ms);
        }
    }
    result
}

fn parse_terms(
    input: &str,
    values_required: bool,
    default_type: ValueType,
    max_count: usize,
) -> Result<Vec<KeyValueAssignment>> {
    let tokens: Vec<&str> = input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();
    if tokens.len() > max_count {
        return Err(CoreError::TooManyTokens { max: max_count });
    }

    tokens
        .into_iter()
        .map(|token| parse_token(token, values_required, default_type))
        .collect()
}

fn parse_token(
    token: &str,
    values_required: bool,
    default_type: ValueType,
) -> Result<KeyValueAssignment> {
    let (key, raw_value, equal) = if values_required {
        split_operator(token)?
    } else {
        (token, "", true)
    };

    let (name, value_type) = match key.split_once(':') {
        Some((name, suffix)) => (
            name.trim(),
            suffix
                .trim()
                .chars()
                .next()
                .map_or(default_type, ValueType::from_suffix),
        ),
        None => (key.trim(), default_type),
    };
    if name.is_empty() {
        return Err(malformed(token, "empty key"));
    }

    if !values_required {
        return Ok(KeyValueAssignment {
            name: name.to_string(),
            value_type,
            value: None,
            alternatives: Vec::new(),
            equal,
        });
    }

    let raw_value = raw_value.trim();
    if raw_value.is_empty() {
        return Err(malformed(
            token,
            &format!("no value provided for key \"{}\"", name),
        ));
    }

    let mut values = raw_value
        .split('/')
        .map(|text| coerce(name, text.trim(), value_type))
        .collect::<Result<Vec<_>>>()?;
    let first = values.remove(0);
    let value_type = match value_type {
        ValueType::Undefined => first.value_type(),
        other => other,
    };

    Ok(KeyValueAssignment {
        name: name.to_string(),
        value_type,
        value: Some(first),
        alternatives: values,
        equal,
    })
}

/// Split at the first `=`; a `!` directly before it makes the term `!=`
fn split_operator(token: &str) -> Result<(&str, &str, bool)> {
    let Some(pos) = token.find('=') else {
        return Err(malformed(token, "expected '=' or '!='"));
    };
    let value = &token[pos + 1..];
    match token[..pos].strip_suffix('!') {
        Some(key) => Ok((key, value, false)),
        None => Ok((&token[..pos], value, true)),
    }
}

fn coerce(name: &str, text: &str, value_type: ValueType) -> Result<FieldValue> {
    let is_missing = text.eq_ignore_ascii_case("missing");
    let coercion_error = || CoreError::ValueCoercion {
        key: name.to_string(),
        text: text.to_string(),
        expected: value_type.name().to_string(),
    };
    match value_type {
        ValueType::String => Ok(FieldValue::Str(text.to_string())),
        ValueType::Missing => Ok(FieldValue::Missing),
        _ if is_missing => Ok(FieldValue::Missing),
        ValueType::Long => text.parse().map(FieldValue::Long).map_err(|_| coercion_error()),
        ValueType::Double => text
            .parse()
            .map(FieldValue::Double)
            .map_err(|_| coercion_error()),
        ValueType::Undefined => Ok(text
            .parse()
            .map(FieldValue::Long)
            .or_else(|_| text.parse().map(FieldValue::Double))
            .unwrap_or_else(|_| FieldValue::Str(text.to_string()))),
    }
}

fn malformed(token: &str, reason: &str) -> CoreError {
    CoreError::MalformedToken {
        token: token.to_string(),
        reason: reason.to_string(),
    }
}
