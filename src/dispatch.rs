// Copyright (c) 2025 - Cowboy AI, Inc.
//! Command Dispatch Router
//!
//! Maps a command's `type` discriminant to the workflow that handles it.
//!
//! ```text
//! RawMessage.type ──┬── not in B::TYPES ──────────→ invalid_command_type
//!                   ├── declared, no workflow ────→ not_implemented
//!                   └── routed ─→ parse ─→ Workflow::execute
//! ```
//!
//! Routing validates nothing itself. The routed handler parses the raw
//! command into its typed form, so structural failures come from there.

use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use crate::errors::{CoreError, CoreResult, RoutingError, StructuralError};
use crate::message::{Message, MessageBody, RawMessage};
use crate::result::{accept_res_partial, fail, succeed, DomainResult};
use crate::workflow::{Workflow, WorkflowOutput, WorkflowSpec};

type Handler<'a, S, E, F> =
    Box<dyn Fn(&RawMessage, S) -> DomainResult<WorkflowOutput<S, E>, F> + Send + Sync + 'a>;

/// Router from command discriminant to workflow
pub struct Router<'a, B, S, E, F> {
    routes: HashMap<&'static str, Handler<'a, S, E, F>>,
    _body: PhantomData<fn() -> B>,
}

impl<'a, B, S, E, F> Router<'a, B, S, E, F>
where
    B: MessageBody,
    F: From<StructuralError> + From<RoutingError> + Clone,
{
    /// Router with no routes
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            _body: PhantomData,
        }
    }

    /// Route a declared command type to its workflow
    ///
    /// Each declared type routes to at most one workflow.
    pub fn route<W>(mut self, command_type: &str, workflow: Workflow<'a, W>) -> CoreResult<Self>
    where
        W: WorkflowSpec<Command = Message<B>, State = S, Event = E, Failure = F> + 'a,
        S: 'a,
        E: 'a,
        F: 'a,
    {
        let declared = B::TYPES
            .iter()
            .copied()
            .find(|declared| *declared == command_type)
            .ok_or_else(|| CoreError::UndeclaredRoute(command_type.to_string()))?;

        if self.routes.contains_key(declared) {
            return Err(CoreError::DuplicateRoute(command_type.to_string()));
        }

        let handler: Handler<'a, S, E, F> = Box::new(move |raw: &RawMessage, state: S| {
            let command =
                Message::<B>::parse(raw.clone()).map_err(|failure| failure.cast::<F>())?;
            workflow.execute(&command, state)
        });
        self.routes.insert(declared, handler);

        Ok(self)
    }

    /// Whether a workflow handles this command type
    pub fn is_routed(&self, command_type: &str) -> bool {
        self.routes.contains_key(command_type)
    }

    /// Declared command types without a workflow
    pub fn unrouted(&self) -> Vec<&'static str> {
        B::TYPES
            .iter()
            .copied()
            .filter(|declared| !self.routes.contains_key(declared))
            .collect()
    }

    /// Hand a command and the current state to the matching workflow
    pub fn dispatch(
        &self,
        command: &RawMessage,
        state: S,
    ) -> DomainResult<WorkflowOutput<S, E>, F> {
        let command_type = command.message_type.as_str();

        let known = if B::TYPES.contains(&command_type) {
            succeed(state)
        } else {
            fail(
                F::from(RoutingError::InvalidCommandType),
                Some(json!({ "type": command_type })),
            )
        };

        let handler = self
            .routes
            .get(command_type)
            .map(|handler| move |state: S| handler(command, state));

        accept_res_partial(handler, F::from(RoutingError::NotImplemented))(known)
    }
}

impl<B, S, E, F> Default for Router<'_, B, S, E, F>
where
    B: MessageBody,
    F: From<StructuralError> + From<RoutingError> + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<B, S, E, F> fmt::Debug for Router<'_, B, S, E, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut routes: Vec<_> = self.routes.keys().collect();
        routes.sort();
        f.debug_struct("Router").field("routes", &routes).finish()
    }
}
