// Copyright (c) 2025 - Cowboy AI, Inc.
//! Compute Resource Commands
//!
//! Commands express intent and can be rejected. Each one names the resource
//! it targets and the instant it takes effect.
//!
//! # Time Handling
//!
//! Every command carries an explicit `at`. Workflows never read the clock;
//! the instant recorded in an event is the one the command asked for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Hostname, ResourceType};
use crate::message::{MessageBody, MessageKind};
use crate::validation::{require_non_blank, Validate, ValidationError, ValidationResult};

/// Register a new compute resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterResource {
    pub resource_id: Uuid,
    pub hostname: Hostname,
    pub resource_type: ResourceType,

    /// Resource this guest runs on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Hostname>,

    pub at: DateTime<Utc>,
}

/// Put a provisioned resource into service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivateResource {
    pub resource_id: Uuid,
    pub at: DateTime<Utc>,
}

/// Take an active resource out of service for maintenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeginMaintenance {
    pub resource_id: Uuid,
    pub reason: String,
    pub at: DateTime<Utc>,
}

/// Return a resource from maintenance to service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndMaintenance {
    pub resource_id: Uuid,
    pub at: DateTime<Utc>,
}

/// Retire a resource for good
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecommissionResource {
    pub resource_id: Uuid,
    pub reason: String,
    pub at: DateTime<Utc>,
}

/// Command union of the compute-resource lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ResourceCommand {
    RegisterResource(RegisterResource),
    ActivateResource(ActivateResource),
    BeginMaintenance(BeginMaintenance),
    EndMaintenance(EndMaintenance),
    DecommissionResource(DecommissionResource),
}

impl ResourceCommand {
    pub const REGISTER_RESOURCE: &'static str = "register-resource";
    pub const ACTIVATE_RESOURCE: &'static str = "activate-resource";
    pub const BEGIN_MAINTENANCE: &'static str = "begin-maintenance";
    pub const END_MAINTENANCE: &'static str = "end-maintenance";
    pub const DECOMMISSION_RESOURCE: &'static str = "decommission-resource";

    /// Resource the command targets
    pub fn resource_id(&self) -> Uuid {
        match self {
            Self::RegisterResource(cmd) => cmd.resource_id,
            Self::ActivateResource(cmd) => cmd.resource_id,
            Self::BeginMaintenance(cmd) => cmd.resource_id,
            Self::EndMaintenance(cmd) => cmd.resource_id,
            Self::DecommissionResource(cmd) => cmd.resource_id,
        }
    }

    /// Instant the command takes effect
    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Self::RegisterResource(cmd) => cmd.at,
            Self::ActivateResource(cmd) => cmd.at,
            Self::BeginMaintenance(cmd) => cmd.at,
            Self::EndMaintenance(cmd) => cmd.at,
            Self::DecommissionResource(cmd) => cmd.at,
        }
    }
}

impl MessageBody for ResourceCommand {
    const KIND: MessageKind = MessageKind::Cmd;

    const TYPES: &'static [&'static str] = &[
        Self::REGISTER_RESOURCE,
        Self::ACTIVATE_RESOURCE,
        Self::BEGIN_MAINTENANCE,
        Self::END_MAINTENANCE,
        Self::DECOMMISSION_RESOURCE,
    ];

    fn message_type(&self) -> &'static str {
        match self {
            Self::RegisterResource(_) => Self::REGISTER_RESOURCE,
            Self::ActivateResource(_) => Self::ACTIVATE_RESOURCE,
            Self::BeginMaintenance(_) => Self::BEGIN_MAINTENANCE,
            Self::EndMaintenance(_) => Self::END_MAINTENANCE,
            Self::DecommissionResource(_) => Self::DECOMMISSION_RESOURCE,
        }
    }
}

impl Validate for ResourceCommand {
    fn validate(&self) -> ValidationResult {
        match self {
            Self::RegisterResource(cmd) => validate_placement(
                &cmd.hostname,
                cmd.resource_type,
                cmd.host.as_ref(),
            ),
            Self::BeginMaintenance(cmd) => require_non_blank("reason", &cmd.reason),
            Self::DecommissionResource(cmd) => require_non_blank("reason", &cmd.reason),
            Self::ActivateResource(_) | Self::EndMaintenance(_) => Ok(()),
        }
    }
}

/// A host is only named by guests, and never by the resource itself
pub(crate) fn validate_placement(
    hostname: &Hostname,
    resource_type: ResourceType,
    host: Option<&Hostname>,
) -> ValidationResult {
    let Some(host) = host else {
        return Ok(());
    };

    if !resource_type.is_guest() {
        return Err(ValidationError::InvalidField {
            field: "host".to_string(),
            reason: format!("a {} does not run on a host", resource_type.as_str()),
        });
    }

    if host == hostname {
        return Err(ValidationError::InvalidField {
            field: "host".to_string(),
            reason: "a resource cannot host itself".to_string(),
        });
    }

    Ok(())
}
