// Copyright (c) 2025 - Cowboy AI, Inc.
//! Compute Resource Lifecycle
//!
//! A complete domain built on the core: value objects, a tagged aggregate,
//! one workflow per command, a router over all of them and a cross-entity
//! policy.
//!
//! # Value Objects with Invariants
//!
//! - [`Hostname`] - DNS-validated hostnames (RFC 1123)
//! - [`ResourceType`] - Compute resource taxonomy
//!
//! # Lifecycle
//!
//! - [`ResourceAggregate`] - one variant per stage
//! - [`ResourceCommand`] / [`ResourceEvent`] - message bodies
//! - [`ResourceFailure`] - closed failure codes
//! - [`resource_router`] - dispatch over every command
//! - [`guest_decommission_policy`] - host retirement cascades to guests

pub mod commands;
pub mod events;
pub mod failure;
pub mod hostname;
pub mod policies;
pub mod resource;
pub mod resource_type;
pub mod workflows;

pub use commands::{
    ActivateResource, BeginMaintenance, DecommissionResource, EndMaintenance, RegisterResource,
    ResourceCommand,
};
pub use events::{
    MaintenanceEnded, MaintenanceStarted, ResourceActivated, ResourceDecommissioned, ResourceEvent,
    ResourceRegistered,
};
pub use failure::ResourceFailure;
pub use hostname::{Hostname, HostnameError};
pub use policies::{guest_decommission_policy, GuestDecommission, ResourceEventMessage};
pub use resource::{
    Active, Decommissioned, InMaintenance, Provisioning, ResourceAggregate, ResourceProfile,
    Unregistered,
};
pub use resource_type::ResourceType;
pub use workflows::{
    activate_resource, begin_maintenance, decommission_resource, end_maintenance,
    register_resource, resource_router, ResourceCommandMessage, ResourceRouter,
};
