// Copyright (c) 2025 - Cowboy AI, Inc.
//! Compute Resource Policies
//!
//! Retiring a host retires what runs on it. [`guest_decommission_policy`]
//! is evaluated once per guest when a `resource-decommissioned` event
//! arrives, and asks for that guest to be decommissioned too.

use serde_json::json;

use super::commands::{DecommissionResource, ResourceCommand};
use super::events::ResourceEvent;
use super::failure::ResourceFailure;
use super::resource::ResourceAggregate;
use super::workflows::validate_resource;
use crate::message::{Message, MessageBody};
use crate::policy::{CommandIntent, Policy, PolicySpec};
use crate::result::{fail, succeed, DomainResult};

/// Event message consumed by resource policies
pub type ResourceEventMessage = Message<ResourceEvent>;

/// Decommission guests of a decommissioned host
#[derive(Debug, Clone, Copy)]
pub struct GuestDecommission;

impl PolicySpec for GuestDecommission {
    type Trigger = ResourceEventMessage;
    type State = ResourceAggregate;
    type Command = CommandIntent<ResourceCommand>;
    type Failure = ResourceFailure;
    const NAME: &'static str = "guest-decommission";
}

fn host_decommissioned(
    trigger: &ResourceEventMessage,
    _guest: &ResourceAggregate,
) -> DomainResult<(), ResourceFailure> {
    match trigger.body() {
        ResourceEvent::ResourceDecommissioned(_) => succeed(()),
        other => fail(
            ResourceFailure::UnexpectedTrigger,
            Some(json!({ "type": other.message_type() })),
        ),
    }
}

fn hosted_on_trigger(
    trigger: &ResourceEventMessage,
    guest: ResourceAggregate,
) -> DomainResult<ResourceAggregate, ResourceFailure> {
    let ResourceEvent::ResourceDecommissioned(host) = trigger.body() else {
        return fail(ResourceFailure::UnexpectedTrigger, None);
    };

    if !guest.is_hosted_on(&host.hostname) {
        return fail(
            ResourceFailure::UnrelatedResource,
            Some(json!({ "guest": guest.id(), "host": host.hostname })),
        );
    }
    succeed(guest)
}

fn decommission_guest(
    trigger: &ResourceEventMessage,
    guest: &ResourceAggregate,
) -> DomainResult<Option<CommandIntent<ResourceCommand>>, ResourceFailure> {
    let ResourceEvent::ResourceDecommissioned(host) = trigger.body() else {
        return fail(ResourceFailure::UnexpectedTrigger, None);
    };

    if guest.is_decommissioned() {
        return succeed(None);
    }

    // The follow-up must not predate the guest's own stage
    let at = guest
        .stage_started_at()
        .map_or(host.at, |started| started.max(host.at));

    let command = ResourceCommand::DecommissionResource(DecommissionResource {
        resource_id: guest.id(),
        reason: format!("host {} decommissioned: {}", host.hostname, host.reason),
        at,
    });

    succeed(Some(CommandIntent::caused_by(trigger, command)))
}

/// When a host is decommissioned, decommission each guest hosted on it
pub fn guest_decommission_policy() -> Policy<'static, GuestDecommission> {
    Policy::new(validate_resource, host_decommissioned, decommission_guest)
        .with_constraint(hosted_on_trigger)
}
