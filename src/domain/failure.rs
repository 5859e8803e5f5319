// Copyright (c) 2025 - Cowboy AI, Inc.
//! Failure codes of the compute-resource lifecycle

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::errors::{RoutingError, StructuralError};
use crate::result::FailureCode;

/// Every way a compute-resource workflow or policy can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ResourceFailure {
    /// Data does not have the shape required by its schema
    #[error("parse_error")]
    ParseError,

    /// Data has the right shape but violates an invariant
    #[error("invalid_payload")]
    InvalidPayload,

    /// Command discriminant outside the command union
    #[error("invalid_command_type")]
    InvalidCommandType,

    /// Declared command with no workflow
    #[error("not_implemented")]
    NotImplemented,

    /// Registering a resource that already exists
    #[error("already_registered")]
    AlreadyRegistered,

    /// The resource is not at a stage that accepts this command
    #[error("invalid_resource_state_for_this_action")]
    InvalidResourceStateForThisAction,

    /// The command is dated before the resource entered its current stage
    #[error("action_predates_current_stage")]
    ActionPredatesCurrentStage,

    /// The resource has been decommissioned
    #[error("already_decommissioned")]
    AlreadyDecommissioned,

    /// A policy received an event it does not react to
    #[error("unexpected_trigger")]
    UnexpectedTrigger,

    /// Command or trigger concerns a different resource
    #[error("unrelated_resource")]
    UnrelatedResource,
}

impl FailureCode for ResourceFailure {
    fn code(&self) -> &'static str {
        match self {
            Self::ParseError => "parse_error",
            Self::InvalidPayload => "invalid_payload",
            Self::InvalidCommandType => "invalid_command_type",
            Self::NotImplemented => "not_implemented",
            Self::AlreadyRegistered => "already_registered",
            Self::InvalidResourceStateForThisAction => "invalid_resource_state_for_this_action",
            Self::ActionPredatesCurrentStage => "action_predates_current_stage",
            Self::AlreadyDecommissioned => "already_decommissioned",
            Self::UnexpectedTrigger => "unexpected_trigger",
            Self::UnrelatedResource => "unrelated_resource",
        }
    }
}

impl From<StructuralError> for ResourceFailure {
    fn from(err: StructuralError) -> Self {
        match err {
            StructuralError::ParseError => Self::ParseError,
            StructuralError::InvalidPayload => Self::InvalidPayload,
        }
    }
}

impl From<RoutingError> for ResourceFailure {
    fn from(err: RoutingError) -> Self {
        match err {
            RoutingError::InvalidCommandType => Self::InvalidCommandType,
            RoutingError::NotImplemented => Self::NotImplemented,
        }
    }
}
