// Copyright (c) 2025 - Cowboy AI, Inc.
//! Policy Composition Engine
//!
//! A policy is the event-driven counterpart of a workflow. It reacts to an
//! event and a piece of side state (often another aggregate) and may ask for
//! a follow-up command:
//!
//! ```text
//! (evt, state) → validate state → invariant → constraints (in order) → react
//!                                                                        ↓
//!                                                          Option<CommandIntent>
//! ```
//!
//! Ordering and short-circuiting match the workflow engine. The reaction is
//! pure: it returns a [`CommandIntent`] (trace plus body) and the host turns
//! it into a command with
//! [`MessageBuilder::issue_intent`](crate::message::MessageBuilder::issue_intent).
//! This closes cross-entity loops ("when the host is retired, retire its
//! guests") without the core dispatching anything.

use std::fmt;
use std::marker::PhantomData;

use crate::instrument::{observe, Instrumentation};
use crate::message::{derive_trace, DomainTrace, Message};
use crate::result::{DomainResult, FailureCode};
use crate::workflow::{apply_constraints, Constraint, StateValidator};

/// Binds the concrete types of one policy
pub trait PolicySpec {
    /// Event the policy reacts to
    type Trigger;

    /// Side state consulted
    type State;

    /// Command it may emit
    type Command;

    /// Closed set of failure codes
    type Failure;

    /// Name used by instrumentation
    const NAME: &'static str;
}

/// Check relating the trigger to the side state
pub type Invariant<'a, E, S, F> = Box<dyn Fn(&E, &S) -> DomainResult<(), F> + Send + Sync + 'a>;

/// Computes the follow-up command, if any
pub type ReactFunction<'a, E, S, C, F> =
    Box<dyn Fn(&E, &S) -> DomainResult<Option<C>, F> + Send + Sync + 'a>;

/// A command a policy wants issued, not yet stamped with identity
#[derive(Debug, Clone, PartialEq)]
pub struct CommandIntent<B> {
    /// Trace the command must carry
    pub trace: DomainTrace,

    /// Command body
    pub body: B,
}

impl<B> CommandIntent<B> {
    /// Intent caused by `trigger`, continuing its chain
    pub fn caused_by<T>(trigger: &Message<T>, body: B) -> Self {
        Self {
            trace: derive_trace(trigger),
            body,
        }
    }
}

/// A composed policy pipeline
pub struct Policy<'a, P: PolicySpec> {
    validate_state: StateValidator<'a, P::State, P::Failure>,
    invariant: Invariant<'a, P::Trigger, P::State, P::Failure>,
    constraints: Vec<Constraint<'a, P::Trigger, P::State, P::Failure>>,
    react: ReactFunction<'a, P::Trigger, P::State, P::Command, P::Failure>,
    _spec: PhantomData<fn() -> P>,
}

impl<'a, P: PolicySpec> Policy<'a, P> {
    /// Policy with no constraints
    pub fn new<V, I, R>(validate_state: V, invariant: I, react: R) -> Self
    where
        V: Fn(P::State) -> DomainResult<P::State, P::Failure> + Send + Sync + 'a,
        I: Fn(&P::Trigger, &P::State) -> DomainResult<(), P::Failure> + Send + Sync + 'a,
        R: Fn(&P::Trigger, &P::State) -> DomainResult<Option<P::Command>, P::Failure>
            + Send
            + Sync
            + 'a,
    {
        Self {
            validate_state: Box::new(validate_state),
            invariant: Box::new(invariant),
            constraints: Vec::new(),
            react: Box::new(react),
            _spec: PhantomData,
        }
    }

    /// Append a constraint; constraints run in the order they are added
    pub fn with_constraint<G>(mut self, constraint: G) -> Self
    where
        G: Fn(&P::Trigger, P::State) -> DomainResult<P::State, P::Failure> + Send + Sync + 'a,
    {
        self.constraints.push(Box::new(constraint));
        self
    }

    /// Execute the pipeline
    pub fn execute(
        &self,
        trigger: &P::Trigger,
        state: P::State,
    ) -> DomainResult<Option<P::Command>, P::Failure> {
        let state = (self.validate_state)(state)?;
        (self.invariant)(trigger, &state)?;
        let state = apply_constraints(&self.constraints, trigger, state)?;
        (self.react)(trigger, &state)
    }

    /// Execute and report the outcome to an observer
    pub fn execute_observed(
        &self,
        trigger: &P::Trigger,
        state: P::State,
        instrumentation: &dyn Instrumentation,
    ) -> DomainResult<Option<P::Command>, P::Failure>
    where
        P::Failure: FailureCode,
    {
        observe(instrumentation, P::NAME, self.execute(trigger, state))
    }
}

impl<P: PolicySpec> fmt::Debug for Policy<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("name", &P::NAME)
            .field("constraints", &self.constraints.len())
            .finish()
    }
}
