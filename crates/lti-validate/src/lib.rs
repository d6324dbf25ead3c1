//! Schema-driven validation of request parameter records.
//!
//! This crate provides a small rule engine for checking that a record of
//! named values agrees with a schema. Each field rule can require the
//! field's presence, coerce its value to a declared type, restrict it to a
//! set of accepted values, or mark it as recommended (absence warns but
//! never fails).
//!
//! # Usage
//!
//! ```rust
//! use lti_validate::{FieldRule, FieldType, Record, Schema, Value};
//!
//! let schema = Schema::new([
//!     ("lti_version", FieldRule {
//!         required: true,
//!         allowed_values: vec!["LTI-1p0".to_owned()],
//!         ..FieldRule::default()
//!     }),
//!     ("launch_count", FieldRule {
//!         expected_type: FieldType::Int,
//!         ..FieldRule::default()
//!     }),
//! ]);
//!
//! let record: Record = [
//!     ("lti_version".to_owned(), Value::Str("LTI-1p0".to_owned())),
//!     ("launch_count".to_owned(), Value::Str("3".to_owned())),
//! ]
//! .into_iter()
//! .collect();
//!
//! let validated = schema.validate(&record).unwrap();
//! assert_eq!(validated["launch_count"], Value::Int(3));
//! ```
//!
//! Validation never mutates the caller's record: coerced values land in the
//! returned copy.

mod error;
mod schema;
mod value;

pub use error::ValidationError;
pub use schema::{FieldRule, FieldType, Schema};
pub use value::{Record, Value};
