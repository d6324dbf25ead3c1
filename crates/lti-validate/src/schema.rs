//! Schema definition and record validation.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::ValidationError;
use crate::value::{Record, Value};

/// The coercion target a field rule declares.
///
/// The set is closed: a schema cannot name an unsupported target, so the
/// "unknown data type" failure mode is ruled out when the schema is written
/// rather than detected when a record is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldType {
    /// Coerce to a string (the default).
    #[default]
    Str,
    /// Coerce to an integer.
    Int,
    /// Coerce to a float.
    Float,
    /// Coerce to a boolean. Any non-empty string coerces to `true`,
    /// the literal `"False"` included.
    Bool,
}

/// Validation rule for a single field.
///
/// Missing settings default to the permissive choice, so rules are written
/// with struct-update syntax:
///
/// ```rust
/// use lti_validate::{FieldRule, FieldType};
///
/// let rule = FieldRule {
///     required: true,
///     expected_type: FieldType::Int,
///     ..FieldRule::default()
/// };
/// assert!(!rule.recommended);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldRule {
    /// Fail validation if the field is absent.
    pub required: bool,
    /// Warn, but do not fail, if the field is absent.
    pub recommended: bool,
    /// Target type the field value is coerced to.
    pub expected_type: FieldType,
    /// Accepted values for the field; empty accepts anything.
    pub allowed_values: Vec<String>,
}

/// A set of field rules keyed by field name.
///
/// Field order never affects the validation outcome; rules are kept sorted
/// so that the first failure reported is deterministic.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    rules: BTreeMap<String, FieldRule>,
}

impl Schema {
    /// Build a schema from (field name, rule) pairs.
    pub fn new<N: Into<String>>(rules: impl IntoIterator<Item = (N, FieldRule)>) -> Self {
        Self {
            rules: rules
                .into_iter()
                .map(|(name, rule)| (name.into(), rule))
                .collect(),
        }
    }

    /// Names of the fields the schema is configured for.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Whether `name` is one of the schema's fields.
    #[must_use]
    pub fn has_field(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Validate `record` against the schema.
    ///
    /// On success, returns a new record in which every declared field is
    /// coerced to its declared type; undeclared fields carry over untouched
    /// and the input record is left exactly as received. Validation stops at
    /// the first failing field.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first field that is absent
    /// while required, cannot be coerced, or holds a disallowed value.
    pub fn validate(&self, record: &Record) -> Result<Record, ValidationError> {
        let mut validated = record.clone();

        for (field, rule) in &self.rules {
            let Some(value) = validated.get(field) else {
                if rule.required {
                    debug!(field, "missing required field");
                    return Err(ValidationError::MissingRequiredField(field.clone()));
                }
                if rule.recommended {
                    warn!(field, "recommended field is missing");
                }
                continue;
            };

            let Some(coerced) = coerce(value, rule.expected_type) else {
                debug!(field, "can't convert data type");
                return Err(ValidationError::TypeMismatch(field.clone()));
            };

            if !rule.allowed_values.is_empty()
                && !rule.allowed_values.iter().any(|v| *v == coerced.to_string())
            {
                debug!(field, "invalid value");
                return Err(ValidationError::InvalidValue(field.clone()));
            }

            validated.insert(field.clone(), coerced);
        }

        Ok(validated)
    }
}

/// Coerce `value` to `target`, or `None` when the value cannot represent it.
fn coerce(value: &Value, target: FieldType) -> Option<Value> {
    let coerced = match (value, target) {
        (Value::Str(_), FieldType::Str)
        | (Value::Int(_), FieldType::Int)
        | (Value::Float(_), FieldType::Float)
        | (Value::Bool(_), FieldType::Bool) => value.clone(),
        (_, FieldType::Str) => Value::Str(value.to_string()),
        (Value::Str(s), FieldType::Int) => Value::Int(s.trim().parse().ok()?),
        (Value::Float(x), FieldType::Int) => Value::Int(*x as i64),
        (Value::Bool(b), FieldType::Int) => Value::Int(i64::from(*b)),
        (Value::Str(s), FieldType::Float) => Value::Float(s.trim().parse().ok()?),
        (Value::Int(n), FieldType::Float) => Value::Float(*n as f64),
        (Value::Bool(b), FieldType::Float) => Value::Float(if *b { 1.0 } else { 0.0 }),
        (_, FieldType::Bool) => Value::Bool(value.is_truthy()),
    };
    Some(coerced)
}
