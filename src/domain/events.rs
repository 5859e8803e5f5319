// Copyright (c) 2025 - Cowboy AI, Inc.
//! Compute Resource Domain Events
//!
//! Events are facts: past-tense, immutable, never rejected. Identity,
//! timestamp and causality are added when the builder stamps them into
//! messages, so the bodies here carry only what changed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::commands::validate_placement;
use super::{Hostname, ResourceType};
use crate::message::{MessageBody, MessageKind};
use crate::validation::{require_non_blank, Validate, ValidationResult};

/// Resource was registered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRegistered {
    pub resource_id: Uuid,
    pub hostname: Hostname,
    pub resource_type: ResourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Hostname>,
    pub at: DateTime<Utc>,
}

/// Resource entered service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceActivated {
    pub resource_id: Uuid,
    pub at: DateTime<Utc>,
}

/// Resource left service for maintenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceStarted {
    pub resource_id: Uuid,
    pub reason: String,
    pub at: DateTime<Utc>,
}

/// Resource returned to service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaintenanceEnded {
    pub resource_id: Uuid,
    pub at: DateTime<Utc>,
}

/// Resource was retired
///
/// Carries the hostname so guests can be matched against it without
/// loading the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDecommissioned {
    pub resource_id: Uuid,
    pub hostname: Hostname,
    pub reason: String,
    pub at: DateTime<Utc>,
}

/// Event union of the compute-resource lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum ResourceEvent {
    ResourceRegistered(ResourceRegistered),
    ResourceActivated(ResourceActivated),
    MaintenanceStarted(MaintenanceStarted),
    MaintenanceEnded(MaintenanceEnded),
    ResourceDecommissioned(ResourceDecommissioned),
}

impl ResourceEvent {
    pub const RESOURCE_REGISTERED: &'static str = "resource-registered";
    pub const RESOURCE_ACTIVATED: &'static str = "resource-activated";
    pub const MAINTENANCE_STARTED: &'static str = "maintenance-started";
    pub const MAINTENANCE_ENDED: &'static str = "maintenance-ended";
    pub const RESOURCE_DECOMMISSIONED: &'static str = "resource-decommissioned";

    /// Resource the event happened to
    pub fn resource_id(&self) -> Uuid {
        match self {
            Self::ResourceRegistered(e) => e.resource_id,
            Self::ResourceActivated(e) => e.resource_id,
            Self::MaintenanceStarted(e) => e.resource_id,
            Self::MaintenanceEnded(e) => e.resource_id,
            Self::ResourceDecommissioned(e) => e.resource_id,
        }
    }
}

impl MessageBody for ResourceEvent {
    const KIND: MessageKind = MessageKind::Evt;

    const TYPES: &'static [&'static str] = &[
        Self::RESOURCE_REGISTERED,
        Self::RESOURCE_ACTIVATED,
        Self::MAINTENANCE_STARTED,
        Self::MAINTENANCE_ENDED,
        Self::RESOURCE_DECOMMISSIONED,
    ];

    fn message_type(&self) -> &'static str {
        match self {
            Self::ResourceRegistered(_) => Self::RESOURCE_REGISTERED,
            Self::ResourceActivated(_) => Self::RESOURCE_ACTIVATED,
            Self::MaintenanceStarted(_) => Self::MAINTENANCE_STARTED,
            Self::MaintenanceEnded(_) => Self::MAINTENANCE_ENDED,
            Self::ResourceDecommissioned(_) => Self::RESOURCE_DECOMMISSIONED,
        }
    }
}

impl Validate for ResourceEvent {
    fn validate(&self) -> ValidationResult {
        match self {
            Self::ResourceRegistered(e) => {
                validate_placement(&e.hostname, e.resource_type, e.host.as_ref())
            }
            Self::MaintenanceStarted(e) => require_non_blank("reason", &e.reason),
            Self::ResourceDecommissioned(e) => require_non_blank("reason", &e.reason),
            Self::ResourceActivated(_) | Self::MaintenanceEnded(_) => Ok(()),
        }
    }
}
