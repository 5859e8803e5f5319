// Copyright (c) 2025 - Cowboy AI, Inc.
//! Structural Validation Boundary
//!
//! Turns untyped JSON into a typed, checked value or a structural failure.
//! Validation happens in two passes:
//!
//! 1. **Shape**: `serde` deserialization into the target type. Missing
//!    fields, wrong types and unknown discriminants fail with `parse_error`.
//! 2. **Invariants**: [`Validate::validate`] on the typed value. Violations
//!    fail with `invalid_payload`.
//!
//! Both passes report the underlying violation as diagnostic data
//! (`{"violation": "..."}`) and never panic.
//!
//! # Design Principles
//!
//! - **Pure Functions**: No I/O, no mutations, deterministic
//! - **Explicit Errors**: Return detailed validation failures
//! - **Composable**: Small checks that combine with `?`

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::errors::StructuralError;
use crate::result::{fail, DomainResult, Failure};

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Invariant violation found in an otherwise well-formed value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required text field is blank
    #[error("Field {field} must not be blank")]
    BlankField { field: String },

    /// Two timestamps are out of order
    #[error("Field {later} must not precede {earlier}")]
    OutOfOrder { earlier: String, later: String },

    /// A field holds a value its type forbids
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },
}

/// Invariants a value must satisfy beyond its serde shape
///
/// The default implementation accepts every value, for types whose shape is
/// the whole contract.
pub trait Validate {
    /// Check the value's invariants
    fn validate(&self) -> ValidationResult {
        Ok(())
    }
}

/// Require a non-blank string
pub fn require_non_blank(field: &str, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Require `later` to be at or after `earlier`
pub fn require_ordered(
    earlier_field: &str,
    earlier: DateTime<Utc>,
    later_field: &str,
    later: DateTime<Utc>,
) -> ValidationResult {
    if later < earlier {
        return Err(ValidationError::OutOfOrder {
            earlier: earlier_field.to_string(),
            later: later_field.to_string(),
        });
    }
    Ok(())
}

/// Check the invariants of an already typed value
pub fn check<T: Validate>(value: T) -> DomainResult<T, StructuralError> {
    match value.validate() {
        Ok(()) => Ok(value),
        Err(err) => fail(StructuralError::InvalidPayload, Some(violation(err))),
    }
}

/// Parse untyped data into a checked value
pub fn safe_parse<T>(value: Value) -> DomainResult<T, StructuralError>
where
    T: DeserializeOwned + Validate,
{
    let parsed: T = serde_json::from_value(value)
        .map_err(|err| Failure::new(StructuralError::ParseError, Some(violation(err))))?;
    check(parsed)
}

/// Parse a `{tag_key: tag, content_key: content}` record
///
/// Used for adjacently tagged enums, where `tag` selects which shape
/// `content` must have.
pub fn parse_tagged<T>(
    tag_key: &str,
    content_key: &str,
    tag: &str,
    content: Value,
) -> DomainResult<T, StructuralError>
where
    T: DeserializeOwned + Validate,
{
    let mut record = Map::new();
    record.insert(tag_key.to_string(), Value::String(tag.to_string()));
    record.insert(content_key.to_string(), content);
    safe_parse(Value::Object(record))
}

/// Split the serialized form of an adjacently tagged value into its content
pub(crate) fn tagged_content(tagged: Value, content_key: &str) -> Value {
    match tagged {
        Value::Object(mut record) => record.remove(content_key).unwrap_or(Value::Null),
        other => other,
    }
}

fn violation(err: impl std::fmt::Display) -> Value {
    json!({ "violation": err.to_string() })
}
