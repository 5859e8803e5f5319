// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for the command-processing core
//!
//! Two families live here:
//!
//! - **Failure codes** ([`StructuralError`], [`RoutingError`]) travel inside a
//!   [`Failure`](crate::result::Failure) and are part of the domain contract.
//! - **Setup errors** ([`CoreError`]) are raised while wiring the core
//!   (registering routes, loading configuration) and never appear in a
//!   pipeline result.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::result::FailureCode;

/// Structural failure raised at the validation boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum StructuralError {
    /// Data does not have the shape required by its schema
    #[error("parse_error")]
    ParseError,

    /// Data has the right shape but violates an invariant of its type
    #[error("invalid_payload")]
    InvalidPayload,
}

impl FailureCode for StructuralError {
    fn code(&self) -> &'static str {
        match self {
            StructuralError::ParseError => "parse_error",
            StructuralError::InvalidPayload => "invalid_payload",
        }
    }
}

/// Routing failure raised by the dispatch router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum RoutingError {
    /// The command discriminant is not part of the declared command union
    #[error("invalid_command_type")]
    InvalidCommandType,

    /// The command discriminant is declared but no workflow handles it
    #[error("not_implemented")]
    NotImplemented,
}

impl FailureCode for RoutingError {
    fn code(&self) -> &'static str {
        match self {
            RoutingError::InvalidCommandType => "invalid_command_type",
            RoutingError::NotImplemented => "not_implemented",
        }
    }
}

/// Errors that can occur while wiring the core
#[derive(Debug, Error)]
pub enum CoreError {
    /// A route was registered for a command type outside the declared union
    #[error("Command type {0} is not declared by the command union")]
    UndeclaredRoute(String),

    /// A second workflow was registered for the same command type
    #[error("Command type {0} is already routed to a workflow")]
    DuplicateRoute(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type for setup operations
pub type CoreResult<T> = Result<T, CoreError>;

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_serde_names() {
        for code in [StructuralError::ParseError, StructuralError::InvalidPayload] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, serde_json::Value::String(code.code().to_string()));
            assert_eq!(code.to_string(), code.code());
        }

        for code in [RoutingError::InvalidCommandType, RoutingError::NotImplemented] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, serde_json::Value::String(code.code().to_string()));
        }
    }

    #[test]
    fn test_serde_error_converts() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(CoreError::from(err), CoreError::Serialization(_)));
    }
}
