// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for cim-command-core
//!
//! Provides deterministic builders, ids and commands for the integration
//! tests. All UUIDs and timestamps are fixed so runs are reproducible.
//!
//! # Design Principles
//! - No `Uuid::now_v7()` or `Utc::now()`: the builder runs on a fixed clock
//!   and a sequential id generator
//! - Commands are built through the builder, the same way a host would

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use cim_command_core::domain::{
    ActivateResource, BeginMaintenance, DecommissionResource, EndMaintenance, Hostname,
    RegisterResource, ResourceAggregate, ResourceCommand, ResourceType,
};
use cim_command_core::message::{FixedClock, Message, MessageBuilder, SequentialIdGenerator};

pub const RESOURCE_ID_1: &str = "01934f4a-1000-7000-8000-000000001000";
pub const RESOURCE_ID_2: &str = "01934f4a-1001-7000-8000-000000001001";
pub const HOST_ID: &str = "01934f4a-2000-7000-8000-000000002000";

pub const CORRELATION_ID_1: &str = "01934f4a-c001-7000-8000-00000000c001";

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

/// Parse a fixed UUID from a constant string
pub fn parse_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).expect("Invalid UUID in test fixture")
}

/// Fixed timestamp
pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

/// Fixed timestamp shifted by whole minutes
pub fn minutes_after(minutes: i64) -> DateTime<Utc> {
    fixed_timestamp() + Duration::minutes(minutes)
}

/// Builder on the fixed clock with ids 1, 2, 3, ...
pub fn test_builder() -> MessageBuilder {
    MessageBuilder::new(
        Arc::new(FixedClock(fixed_timestamp())),
        Arc::new(SequentialIdGenerator::new()),
    )
}

pub fn hostname(name: &str) -> Hostname {
    Hostname::new(name).expect("Invalid hostname in test fixture")
}

pub fn resource_id() -> Uuid {
    parse_uuid(RESOURCE_ID_1)
}

pub fn register_resource_data() -> Value {
    json!({
        "resource_id": RESOURCE_ID_1,
        "hostname": "web01.example.com",
        "resource_type": "physical_server",
        "at": FIXED_TIMESTAMP
    })
}

pub fn register_body(
    id: Uuid,
    name: &str,
    resource_type: ResourceType,
    host: Option<&str>,
) -> ResourceCommand {
    ResourceCommand::RegisterResource(RegisterResource {
        resource_id: id,
        hostname: hostname(name),
        resource_type,
        host: host.map(hostname),
        at: fixed_timestamp(),
    })
}

pub fn activate_body(id: Uuid, minutes: i64) -> ResourceCommand {
    ResourceCommand::ActivateResource(ActivateResource {
        resource_id: id,
        at: minutes_after(minutes),
    })
}

pub fn begin_maintenance_body(id: Uuid, minutes: i64) -> ResourceCommand {
    ResourceCommand::BeginMaintenance(BeginMaintenance {
        resource_id: id,
        reason: "kernel upgrade".to_string(),
        at: minutes_after(minutes),
    })
}

pub fn end_maintenance_body(id: Uuid, minutes: i64) -> ResourceCommand {
    ResourceCommand::EndMaintenance(EndMaintenance {
        resource_id: id,
        at: minutes_after(minutes),
    })
}

pub fn decommission_body(id: Uuid, minutes: i64) -> ResourceCommand {
    ResourceCommand::DecommissionResource(DecommissionResource {
        resource_id: id,
        reason: "end of life".to_string(),
        at: minutes_after(minutes),
    })
}

/// Root command message for a body
pub fn command(builder: &MessageBuilder, body: ResourceCommand) -> Message<ResourceCommand> {
    builder
        .issue(body, None)
        .expect("Invalid command in test fixture")
}

pub fn unregistered() -> ResourceAggregate {
    ResourceAggregate::initial(resource_id())
}

/// An active aggregate that parses but was activated before it registered
pub fn corrupted_active(id: &str, host: Option<&str>) -> ResourceAggregate {
    let mut profile = json!({
        "hostname": "vm01.example.com",
        "resource_type": "virtual_machine",
        "registered_at": FIXED_TIMESTAMP
    });
    if let Some(host) = host {
        profile["host"] = json!(host);
    }

    serde_json::from_value(json!({
        "tag": "active",
        "data": {
            "id": id,
            "profile": profile,
            "activated_at": "2026-01-19T11:00:00Z"
        }
    }))
    .expect("corrupted state still has a valid shape")
}
