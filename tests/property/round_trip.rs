// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Message Wire Format
//!
//! Any command body that satisfies its schema, built through the message
//! builder under any trace, must serialize and parse back to an equal
//! message.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use cim_command_core::domain::{
    ActivateResource, BeginMaintenance, DecommissionResource, EndMaintenance, Hostname,
    RegisterResource, ResourceCommand, ResourceType,
};
use cim_command_core::message::{
    DomainTrace, FixedClock, Message, MessageBody, MessageBuilder, SequentialIdGenerator,
};

// ============================================================================
// Property Test Strategies
// ============================================================================

fn uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

/// Instants between 1970 and 2096, with sub-millisecond noise
fn instant() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..4_000_000_000, 0u32..1_000_000_000)
        .prop_map(|(secs, nanos)| Utc.timestamp_opt(secs, nanos).unwrap())
}

/// Resource names in mixed case; hosts live under a separate domain
fn resource_name() -> impl Strategy<Value = Hostname> {
    "[a-zA-Z][a-zA-Z0-9-]{0,12}[a-zA-Z0-9]\\.example\\.com"
        .prop_map(|name| Hostname::new(name).unwrap())
}

fn host_name() -> impl Strategy<Value = Hostname> {
    "(hv|ct)[0-9]{1,3}\\.example\\.(net|org)".prop_map(|name| Hostname::new(name).unwrap())
}

fn reason() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 ,.:-]{0,40}"
}

fn resource_type() -> impl Strategy<Value = ResourceType> {
    prop_oneof![
        Just(ResourceType::PhysicalServer),
        Just(ResourceType::Hypervisor),
        Just(ResourceType::ContainerHost),
        Just(ResourceType::VirtualMachine),
        Just(ResourceType::Container),
        Just(ResourceType::Appliance),
    ]
}

fn register() -> impl Strategy<Value = ResourceCommand> {
    (uuid(), resource_name(), resource_type(), host_name(), any::<bool>(), instant()).prop_map(
        |(resource_id, hostname, resource_type, host, hosted, at)| {
            ResourceCommand::RegisterResource(RegisterResource {
                resource_id,
                hostname,
                resource_type,
                // Only guests may name a host
                host: (hosted && resource_type.is_guest()).then_some(host),
                at,
            })
        },
    )
}

fn resource_command() -> impl Strategy<Value = ResourceCommand> {
    prop_oneof![
        register(),
        (uuid(), instant()).prop_map(|(resource_id, at)| {
            ResourceCommand::ActivateResource(ActivateResource { resource_id, at })
        }),
        (uuid(), reason(), instant()).prop_map(|(resource_id, reason, at)| {
            ResourceCommand::BeginMaintenance(BeginMaintenance { resource_id, reason, at })
        }),
        (uuid(), instant()).prop_map(|(resource_id, at)| {
            ResourceCommand::EndMaintenance(EndMaintenance { resource_id, at })
        }),
        (uuid(), reason(), instant()).prop_map(|(resource_id, reason, at)| {
            ResourceCommand::DecommissionResource(DecommissionResource { resource_id, reason, at })
        }),
    ]
}

fn trace() -> impl Strategy<Value = Option<DomainTrace>> {
    prop_oneof![
        Just(None),
        Just(Some(DomainTrace::root())),
        (uuid(), proptest::option::of(uuid()))
            .prop_map(|(correlation, causation)| Some(DomainTrace::new(correlation, causation))),
    ]
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: A built message survives JSON serialization unchanged
    #[test]
    fn prop_new_message_round_trips(
        body in resource_command(),
        trace in trace(),
        now in instant(),
        first_id in 1u64..1_000_000,
    ) {
        let builder = MessageBuilder::new(
            Arc::new(FixedClock(now)),
            Arc::new(SequentialIdGenerator::starting_at(first_id)),
        );

        let mut tagged = serde_json::to_value(&body).unwrap();
        let data = tagged["data"].take();
        let message = builder
            .new_message::<ResourceCommand>(body.message_type(), trace.as_ref(), data)
            .unwrap();
        prop_assert_eq!(message.body(), &body);

        let wire = serde_json::to_value(&message).unwrap();
        let reparsed = Message::<ResourceCommand>::from_json(wire).unwrap();
        prop_assert_eq!(reparsed, message);
    }
}
