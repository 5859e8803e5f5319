// Copyright (c) 2025 - Cowboy AI, Inc.
//! Compute Resource Workflows
//!
//! One workflow per command. Every workflow shares the same gate:
//!
//! 1. the stored aggregate must be valid
//! 2. the command must target this aggregate (`unrelated_resource`)
//! 3. the aggregate must be at a stage that accepts the command
//! 4. the command must not predate the current stage
//!
//! and then decides exactly one event, which [`ResourceAggregate::evolve`]
//! folds into the next stage.
//!
//! # Business Rules
//!
//! - A resource registers once (`already_registered`)
//! - Nothing happens to a decommissioned resource (`already_decommissioned`)
//! - Commands dated before the current stage began are rejected
//!   (`action_predates_current_stage`)

use serde_json::json;

use super::commands::ResourceCommand;
use super::events::*;
use super::failure::ResourceFailure;
use super::resource::ResourceAggregate;
use crate::aggregate::{validate_aggregate, AggregateState};
use crate::dispatch::Router;
use crate::errors::CoreResult;
use crate::message::Message;
use crate::result::{fail, succeed, DomainResult};
use crate::workflow::{Workflow, WorkflowSpec};

/// Command message handled by the resource workflows
pub type ResourceCommandMessage = Message<ResourceCommand>;

/// Router over every resource command
pub type ResourceRouter =
    Router<'static, ResourceCommand, ResourceAggregate, ResourceEvent, ResourceFailure>;

const PROVISIONING_ONLY: &[&str] = &[ResourceAggregate::PROVISIONING];
const ACTIVE_ONLY: &[&str] = &[ResourceAggregate::ACTIVE];
const MAINTENANCE_ONLY: &[&str] = &[ResourceAggregate::MAINTENANCE];
const REGISTERED: &[&str] = &[
    ResourceAggregate::PROVISIONING,
    ResourceAggregate::ACTIVE,
    ResourceAggregate::MAINTENANCE,
];

type Step = DomainResult<ResourceAggregate, ResourceFailure>;
type Decision = DomainResult<Vec<ResourceEvent>, ResourceFailure>;

macro_rules! resource_workflow {
    ($(#[$doc:meta])* $name:ident, $command_type:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy)]
        pub struct $name;

        impl WorkflowSpec for $name {
            type Command = ResourceCommandMessage;
            type State = ResourceAggregate;
            type Event = ResourceEvent;
            type Failure = ResourceFailure;
            const NAME: &'static str = $command_type;
        }
    };
}

resource_workflow!(
    /// `register-resource`: unregistered → provisioning
    RegisterResourceWorkflow,
    ResourceCommand::REGISTER_RESOURCE
);
resource_workflow!(
    /// `activate-resource`: provisioning → active
    ActivateResourceWorkflow,
    ResourceCommand::ACTIVATE_RESOURCE
);
resource_workflow!(
    /// `begin-maintenance`: active → maintenance
    BeginMaintenanceWorkflow,
    ResourceCommand::BEGIN_MAINTENANCE
);
resource_workflow!(
    /// `end-maintenance`: maintenance → active
    EndMaintenanceWorkflow,
    ResourceCommand::END_MAINTENANCE
);
resource_workflow!(
    /// `decommission-resource`: any registered stage → decommissioned
    DecommissionResourceWorkflow,
    ResourceCommand::DECOMMISSION_RESOURCE
);

/// Stored aggregate must satisfy its own invariants
pub fn validate_resource(state: ResourceAggregate) -> Step {
    validate_aggregate(state).map_err(|failure| failure.cast())
}

/// Command must target the aggregate it is applied to
pub fn targets_resource(command: &ResourceCommandMessage, state: ResourceAggregate) -> Step {
    let target = command.body().resource_id();
    if target != state.id() {
        return fail(
            ResourceFailure::UnrelatedResource,
            Some(json!({ "resource_id": state.id(), "target": target })),
        );
    }
    succeed(state)
}

/// Aggregate must be at one of `stages`
pub fn requires_stage(
    stages: &'static [&'static str],
) -> impl Fn(&ResourceCommandMessage, ResourceAggregate) -> Step + Send + Sync + 'static {
    move |_command: &ResourceCommandMessage, state: ResourceAggregate| {
        if stages.contains(&state.tag()) {
            return succeed(state);
        }
        let code = if state.is_decommissioned() {
            ResourceFailure::AlreadyDecommissioned
        } else {
            ResourceFailure::InvalidResourceStateForThisAction
        };
        fail(code, Some(json!({ "stage": state.tag() })))
    }
}

/// Aggregate must not be registered yet
pub fn requires_unregistered(_command: &ResourceCommandMessage, state: ResourceAggregate) -> Step {
    match state {
        ResourceAggregate::Unregistered(_) => succeed(state),
        registered => fail(
            ResourceFailure::AlreadyRegistered,
            Some(json!({ "stage": registered.tag() })),
        ),
    }
}

/// Command must not be dated before the current stage began
pub fn not_before_current_stage(command: &ResourceCommandMessage, state: ResourceAggregate) -> Step {
    match state.stage_started_at() {
        Some(started) if command.body().at() < started => fail(
            ResourceFailure::ActionPredatesCurrentStage,
            Some(json!({ "stage": state.tag(), "since": started })),
        ),
        _ => succeed(state),
    }
}

fn wrong_command<T>(command: &ResourceCommandMessage) -> DomainResult<T, ResourceFailure> {
    fail(
        ResourceFailure::InvalidCommandType,
        Some(json!({ "type": command.message_type() })),
    )
}

fn decide_register(command: &ResourceCommandMessage, _state: &ResourceAggregate) -> Decision {
    let ResourceCommand::RegisterResource(cmd) = command.body() else {
        return wrong_command(command);
    };

    succeed(vec![ResourceEvent::ResourceRegistered(ResourceRegistered {
        resource_id: cmd.resource_id,
        hostname: cmd.hostname.clone(),
        resource_type: cmd.resource_type,
        host: cmd.host.clone(),
        at: cmd.at,
    })])
}

fn decide_activate(command: &ResourceCommandMessage, _state: &ResourceAggregate) -> Decision {
    let ResourceCommand::ActivateResource(cmd) = command.body() else {
        return wrong_command(command);
    };

    succeed(vec![ResourceEvent::ResourceActivated(ResourceActivated {
        resource_id: cmd.resource_id,
        at: cmd.at,
    })])
}

fn decide_begin_maintenance(
    command: &ResourceCommandMessage,
    _state: &ResourceAggregate,
) -> Decision {
    let ResourceCommand::BeginMaintenance(cmd) = command.body() else {
        return wrong_command(command);
    };

    succeed(vec![ResourceEvent::MaintenanceStarted(MaintenanceStarted {
        resource_id: cmd.resource_id,
        reason: cmd.reason.clone(),
        at: cmd.at,
    })])
}

fn decide_end_maintenance(command: &ResourceCommandMessage, _state: &ResourceAggregate) -> Decision {
    let ResourceCommand::EndMaintenance(cmd) = command.body() else {
        return wrong_command(command);
    };

    succeed(vec![ResourceEvent::MaintenanceEnded(MaintenanceEnded {
        resource_id: cmd.resource_id,
        at: cmd.at,
    })])
}

fn decide_decommission(command: &ResourceCommandMessage, state: &ResourceAggregate) -> Decision {
    let ResourceCommand::DecommissionResource(cmd) = command.body() else {
        return wrong_command(command);
    };
    let Some(profile) = state.profile() else {
        return fail(
            ResourceFailure::InvalidResourceStateForThisAction,
            Some(json!({ "stage": state.tag() })),
        );
    };

    succeed(vec![ResourceEvent::ResourceDecommissioned(
        ResourceDecommissioned {
            resource_id: cmd.resource_id,
            hostname: profile.hostname.clone(),
            reason: cmd.reason.clone(),
            at: cmd.at,
        },
    )])
}

pub fn register_resource() -> Workflow<'static, RegisterResourceWorkflow> {
    Workflow::new(validate_resource, decide_register, ResourceAggregate::evolve)
        .with_constraint(targets_resource)
        .with_constraint(requires_unregistered)
}

pub fn activate_resource() -> Workflow<'static, ActivateResourceWorkflow> {
    Workflow::new(validate_resource, decide_activate, ResourceAggregate::evolve)
        .with_constraint(targets_resource)
        .with_constraint(requires_stage(PROVISIONING_ONLY))
        .with_constraint(not_before_current_stage)
}

pub fn begin_maintenance() -> Workflow<'static, BeginMaintenanceWorkflow> {
    Workflow::new(validate_resource, decide_begin_maintenance, ResourceAggregate::evolve)
        .with_constraint(targets_resource)
        .with_constraint(requires_stage(ACTIVE_ONLY))
        .with_constraint(not_before_current_stage)
}

pub fn end_maintenance() -> Workflow<'static, EndMaintenanceWorkflow> {
    Workflow::new(validate_resource, decide_end_maintenance, ResourceAggregate::evolve)
        .with_constraint(targets_resource)
        .with_constraint(requires_stage(MAINTENANCE_ONLY))
        .with_constraint(not_before_current_stage)
}

pub fn decommission_resource() -> Workflow<'static, DecommissionResourceWorkflow> {
    Workflow::new(validate_resource, decide_decommission, ResourceAggregate::evolve)
        .with_constraint(targets_resource)
        .with_constraint(requires_stage(REGISTERED))
        .with_constraint(not_before_current_stage)
}

/// Router with every resource command wired to its workflow
pub fn resource_router() -> CoreResult<ResourceRouter> {
    Router::new()
        .route(ResourceCommand::REGISTER_RESOURCE, register_resource())?
        .route(ResourceCommand::ACTIVATE_RESOURCE, activate_resource())?
        .route(ResourceCommand::BEGIN_MAINTENANCE, begin_maintenance())?
        .route(ResourceCommand::END_MAINTENANCE, end_maintenance())?
        .route(ResourceCommand::DECOMMISSION_RESOURCE, decommission_resource())
}
