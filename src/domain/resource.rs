// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Functional Compute Resource Aggregate
//!
//! Each lifecycle stage is its own struct, so a stage carries exactly the
//! fields that exist at that stage:
//!
//! ```text
//! unregistered ─register→ provisioning ─activate→ active ⇄ maintenance
//!                              │                    │          │
//!                              └──────── decommission ─────────┴→ decommissioned
//! ```
//!
//! # Reconstruction
//!
//! ```rust,ignore
//! let state = ResourceAggregate::from_events(id, &events);
//! ```
//!
//! [`ResourceAggregate::evolve`] is total: an event that does not apply to
//! the current stage (or to this resource) leaves the state unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::commands::validate_placement;
use super::events::ResourceEvent;
use super::{Hostname, ResourceType};
use crate::aggregate::AggregateState;
use crate::validation::{require_non_blank, require_ordered, Validate, ValidationResult};

/// What a resource is, fixed at registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceProfile {
    pub hostname: Hostname,
    pub resource_type: ResourceType,

    /// Resource this guest runs on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<Hostname>,

    pub registered_at: DateTime<Utc>,
}

impl Validate for ResourceProfile {
    fn validate(&self) -> ValidationResult {
        validate_placement(&self.hostname, self.resource_type, self.host.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unregistered {
    pub id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provisioning {
    pub id: Uuid,
    pub profile: ResourceProfile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Active {
    pub id: Uuid,
    pub profile: ResourceProfile,

    /// Last time the resource entered service
    pub activated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMaintenance {
    pub id: Uuid,
    pub profile: ResourceProfile,
    pub activated_at: DateTime<Utc>,
    pub reason: String,
    pub since: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decommissioned {
    pub id: Uuid,
    pub profile: ResourceProfile,
    pub reason: String,
    pub decommissioned_at: DateTime<Utc>,
}

/// A compute resource at one lifecycle stage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tag", content = "data", rename_all = "snake_case")]
pub enum ResourceAggregate {
    Unregistered(Unregistered),
    Provisioning(Provisioning),
    Active(Active),
    Maintenance(InMaintenance),
    Decommissioned(Decommissioned),
}

impl ResourceAggregate {
    pub const UNREGISTERED: &'static str = "unregistered";
    pub const PROVISIONING: &'static str = "provisioning";
    pub const ACTIVE: &'static str = "active";
    pub const MAINTENANCE: &'static str = "maintenance";
    pub const DECOMMISSIONED: &'static str = "decommissioned";

    /// A resource nobody has registered yet
    pub fn initial(id: Uuid) -> Self {
        Self::Unregistered(Unregistered { id })
    }

    /// Aggregate id
    pub fn id(&self) -> Uuid {
        match self {
            Self::Unregistered(s) => s.id,
            Self::Provisioning(s) => s.id,
            Self::Active(s) => s.id,
            Self::Maintenance(s) => s.id,
            Self::Decommissioned(s) => s.id,
        }
    }

    /// Registration profile, once registered
    pub fn profile(&self) -> Option<&ResourceProfile> {
        match self {
            Self::Unregistered(_) => None,
            Self::Provisioning(s) => Some(&s.profile),
            Self::Active(s) => Some(&s.profile),
            Self::Maintenance(s) => Some(&s.profile),
            Self::Decommissioned(s) => Some(&s.profile),
        }
    }

    /// Instant the current stage began
    pub fn stage_started_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Unregistered(_) => None,
            Self::Provisioning(s) => Some(s.profile.registered_at),
            Self::Active(s) => Some(s.activated_at),
            Self::Maintenance(s) => Some(s.since),
            Self::Decommissioned(s) => Some(s.decommissioned_at),
        }
    }

    pub fn is_decommissioned(&self) -> bool {
        matches!(self, Self::Decommissioned(_))
    }

    /// Whether this resource runs on `host`
    pub fn is_hosted_on(&self, host: &Hostname) -> bool {
        self.profile()
            .and_then(|profile| profile.host.as_ref())
            .is_some_and(|own_host| own_host == host)
    }

    /// Apply one event
    pub fn evolve(self, event: &ResourceEvent) -> Self {
        if event.resource_id() != self.id() {
            return self;
        }

        match (self, event) {
            (Self::Unregistered(s), ResourceEvent::ResourceRegistered(e)) => {
                Self::Provisioning(Provisioning {
                    id: s.id,
                    profile: ResourceProfile {
                        hostname: e.hostname.clone(),
                        resource_type: e.resource_type,
                        host: e.host.clone(),
                        registered_at: e.at,
                    },
                })
            }

            (Self::Provisioning(s), ResourceEvent::ResourceActivated(e)) => Self::Active(Active {
                id: s.id,
                profile: s.profile,
                activated_at: e.at,
            }),

            (Self::Active(s), ResourceEvent::MaintenanceStarted(e)) => {
                Self::Maintenance(InMaintenance {
                    id: s.id,
                    profile: s.profile,
                    activated_at: s.activated_at,
                    reason: e.reason.clone(),
                    since: e.at,
                })
            }

            (Self::Maintenance(s), ResourceEvent::MaintenanceEnded(e)) => Self::Active(Active {
                id: s.id,
                profile: s.profile,
                activated_at: e.at,
            }),

            (state, ResourceEvent::ResourceDecommissioned(e)) => match state {
                Self::Provisioning(Provisioning { id, profile })
                | Self::Active(Active { id, profile, .. })
                | Self::Maintenance(InMaintenance { id, profile, .. }) => {
                    Self::Decommissioned(Decommissioned {
                        id,
                        profile,
                        reason: e.reason.clone(),
                        decommissioned_at: e.at,
                    })
                }
                other => other,
            },

            (state, _) => state,
        }
    }

    /// Replay a history from the initial state
    pub fn from_events(id: Uuid, events: &[ResourceEvent]) -> Self {
        events
            .iter()
            .fold(Self::initial(id), |state, event| state.evolve(event))
    }
}

impl AggregateState for ResourceAggregate {
    const TAGS: &'static [&'static str] = &[
        Self::UNREGISTERED,
        Self::PROVISIONING,
        Self::ACTIVE,
        Self::MAINTENANCE,
        Self::DECOMMISSIONED,
    ];

    fn tag(&self) -> &'static str {
        match self {
            Self::Unregistered(_) => Self::UNREGISTERED,
            Self::Provisioning(_) => Self::PROVISIONING,
            Self::Active(_) => Self::ACTIVE,
            Self::Maintenance(_) => Self::MAINTENANCE,
            Self::Decommissioned(_) => Self::DECOMMISSIONED,
        }
    }
}

impl Validate for ResourceAggregate {
    fn validate(&self) -> ValidationResult {
        match self {
            Self::Unregistered(_) => Ok(()),
            Self::Provisioning(s) => s.profile.validate(),
            Self::Active(s) => {
                s.profile.validate()?;
                require_ordered(
                    "registered_at",
                    s.profile.registered_at,
                    "activated_at",
                    s.activated_at,
                )
            }
            Self::Maintenance(s) => {
                s.profile.validate()?;
                require_non_blank("reason", &s.reason)?;
                require_ordered(
                    "registered_at",
                    s.profile.registered_at,
                    "activated_at",
                    s.activated_at,
                )?;
                require_ordered("activated_at", s.activated_at, "since", s.since)
            }
            Self::Decommissioned(s) => {
                s.profile.validate()?;
                require_non_blank("reason", &s.reason)?;
                require_ordered(
                    "registered_at",
                    s.profile.registered_at,
                    "decommissioned_at",
                    s.decommissioned_at,
                )
            }
        }
    }
}
