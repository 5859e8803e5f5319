// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Aggregate Replay
//!
//! Whatever sequence of commands reaches the router, the aggregate it ends
//! with must equal a replay of the accepted events, must stay valid, and a
//! rejected command must leave the aggregate untouched.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use cim_command_core::domain::{
    resource_router, ActivateResource, BeginMaintenance, DecommissionResource, EndMaintenance,
    Hostname, RegisterResource, ResourceAggregate, ResourceCommand, ResourceEvent, ResourceType,
};
use cim_command_core::message::{FixedClock, MessageBuilder, SequentialIdGenerator};
use cim_command_core::validation::Validate;

use std::sync::Arc;

fn at(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 19, 12, 0, 0).unwrap() + Duration::minutes(minute)
}

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Arbitrary command for a resource; `other` targets a different id
fn resource_command(id: Uuid, other: Uuid) -> impl Strategy<Value = ResourceCommand> {
    let target = prop_oneof![4 => Just(id), 1 => Just(other)];

    (0u8..5, target, 0i64..120).prop_map(|(kind, resource_id, minute)| match kind {
        0 => ResourceCommand::RegisterResource(RegisterResource {
            resource_id,
            hostname: Hostname::new("web01.example.com").unwrap(),
            resource_type: ResourceType::PhysicalServer,
            host: None,
            at: at(minute),
        }),
        1 => ResourceCommand::ActivateResource(ActivateResource {
            resource_id,
            at: at(minute),
        }),
        2 => ResourceCommand::BeginMaintenance(BeginMaintenance {
            resource_id,
            reason: "patching".to_string(),
            at: at(minute),
        }),
        3 => ResourceCommand::EndMaintenance(EndMaintenance {
            resource_id,
            at: at(minute),
        }),
        _ => ResourceCommand::DecommissionResource(DecommissionResource {
            resource_id,
            reason: "retired".to_string(),
            at: at(minute),
        }),
    })
}

fn command_sequence() -> impl Strategy<Value = Vec<ResourceCommand>> {
    prop::collection::vec(
        resource_command(Uuid::from_u128(1), Uuid::from_u128(2)),
        0..30,
    )
}

fn builder() -> MessageBuilder {
    MessageBuilder::new(
        Arc::new(FixedClock(at(0))),
        Arc::new(SequentialIdGenerator::starting_at(100)),
    )
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: The live aggregate equals a replay of accepted events
    #[test]
    fn prop_state_equals_replay(commands in command_sequence()) {
        let id = Uuid::from_u128(1);
        let router = resource_router().unwrap();
        let builder = builder();

        let mut state = ResourceAggregate::initial(id);
        let mut history: Vec<ResourceEvent> = Vec::new();

        for body in commands {
            let raw = builder.issue(body, None).unwrap().to_raw().unwrap();
            match router.dispatch(&raw, state.clone()) {
                Ok(output) => {
                    prop_assert_eq!(output.events.len(), 1);
                    history.extend(output.events);
                    state = output.new_state;
                }
                // Rejected commands leave `state` as it was
                Err(failure) => prop_assert_eq!(failure.codes().len(), 1),
            }
            prop_assert!(state.validate().is_ok());
        }

        prop_assert_eq!(ResourceAggregate::from_events(id, &history), state);
    }

    /// Property: Commands for another resource are always rejected
    #[test]
    fn prop_foreign_commands_never_apply(commands in command_sequence()) {
        let id = Uuid::from_u128(1);
        let router = resource_router().unwrap();
        let builder = builder();

        let mut state = ResourceAggregate::initial(id);
        for body in commands {
            let foreign = body.resource_id() != id;
            let raw = builder.issue(body, None).unwrap().to_raw().unwrap();
            let result = router.dispatch(&raw, state.clone());

            if foreign {
                prop_assert!(result.is_err());
            } else if let Ok(output) = result {
                state = output.new_state;
            }
        }
    }
}
