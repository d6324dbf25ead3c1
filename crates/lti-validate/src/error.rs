//! Error types for schema validation.

/// Errors raised when a record does not match its schema.
///
/// These are expected data errors: callers probing whether a parameter set
/// matches a schema treat every variant as "does not match" and move on.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A field marked `required` is absent from the record.
    #[error("missing required field: {0}")]
    MissingRequiredField(String),

    /// A field value could not be coerced to its declared type.
    #[error("can't convert data type in field: {0}")]
    TypeMismatch(String),

    /// A field value falls outside the rule's allowed set.
    #[error("invalid value in field: {0}")]
    InvalidValue(String),
}
