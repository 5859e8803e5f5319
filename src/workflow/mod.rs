// Copyright (c) 2025 - Cowboy AI, Inc.
//! Workflow Composition Engine
//!
//! A workflow turns a command and the current aggregate into new events and
//! the evolved aggregate, or a single failure:
//!
//! ```text
//! (cmd, state) → validate state → constraints (in order) → decide → evolve
//!                     ↓                  ↓                    ↓
//!                  Failure            Failure              Failure
//! ```
//!
//! # Short-Circuit Semantics
//!
//! - Invalid state aborts before any constraint runs
//! - The first failing constraint aborts; later constraints are not evaluated
//! - A decision may return zero events; the fold is then a no-op
//! - The fold applies events left to right without re-validating
//!
//! # Pure Functions
//!
//! Every stage is a pure function of its inputs. Time and identity come from
//! the command payload or from the message builder outside the pipeline.
//!
//! # Example
//!
//! ```rust,ignore
//! let workflow = Workflow::<ActivateResource>::new(validate_state, decide, evolve)
//!     .with_constraint(must_be_provisioning)
//!     .with_constraint(must_not_predate_stage);
//!
//! let WorkflowOutput { events, new_state } = workflow.execute(&command, state)?;
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::instrument::{observe, Instrumentation};
use crate::result::{DomainResult, FailureCode};

/// Binds the concrete types of one workflow
pub trait WorkflowSpec {
    /// Command the workflow accepts
    type Command;

    /// Aggregate state it operates on
    type State;

    /// Events it produces
    type Event;

    /// Closed set of failure codes
    type Failure;

    /// Name used by instrumentation
    const NAME: &'static str;
}

/// Validates the incoming state
pub type StateValidator<'a, S, F> = Box<dyn Fn(S) -> DomainResult<S, F> + Send + Sync + 'a>;

/// Business rule checked against a command (or trigger) and the state
pub type Constraint<'a, C, S, F> =
    Box<dyn Fn(&C, S) -> DomainResult<S, F> + Send + Sync + 'a>;

/// Computes the events a valid command produces
pub type DecideFunction<'a, C, S, E, F> =
    Box<dyn Fn(&C, &S) -> DomainResult<Vec<E>, F> + Send + Sync + 'a>;

/// Applies one event to a state
pub type EvolveFunction<'a, S, E> = Box<dyn Fn(S, &E) -> S + Send + Sync + 'a>;

/// Successful outcome of a workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowOutput<S, E> {
    /// Events decided, in order
    pub events: Vec<E>,

    /// State after folding the events
    pub new_state: S,
}

/// Run constraints in order, stopping at the first failure
pub fn apply_constraints<C, S, F>(
    constraints: &[Constraint<'_, C, S, F>],
    command: &C,
    state: S,
) -> DomainResult<S, F> {
    constraints
        .iter()
        .try_fold(state, |state, constraint| constraint(command, state))
}

/// A composed workflow pipeline
pub struct Workflow<'a, W: WorkflowSpec> {
    validate_state: StateValidator<'a, W::State, W::Failure>,
    constraints: Vec<Constraint<'a, W::Command, W::State, W::Failure>>,
    decide: DecideFunction<'a, W::Command, W::State, W::Event, W::Failure>,
    evolve: EvolveFunction<'a, W::State, W::Event>,
    _spec: PhantomData<fn() -> W>,
}

impl<'a, W: WorkflowSpec> Workflow<'a, W> {
    /// Workflow with no constraints
    pub fn new<V, D, Ev>(validate_state: V, decide: D, evolve: Ev) -> Self
    where
        V: Fn(W::State) -> DomainResult<W::State, W::Failure> + Send + Sync + 'a,
        D: Fn(&W::Command, &W::State) -> DomainResult<Vec<W::Event>, W::Failure>
            + Send
            + Sync
            + 'a,
        Ev: Fn(W::State, &W::Event) -> W::State + Send + Sync + 'a,
    {
        Self {
            validate_state: Box::new(validate_state),
            constraints: Vec::new(),
            decide: Box::new(decide),
            evolve: Box::new(evolve),
            _spec: PhantomData,
        }
    }

    /// Append a constraint; constraints run in the order they are added
    pub fn with_constraint<G>(mut self, constraint: G) -> Self
    where
        G: Fn(&W::Command, W::State) -> DomainResult<W::State, W::Failure> + Send + Sync + 'a,
    {
        self.constraints.push(Box::new(constraint));
        self
    }

    /// Number of constraints
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Execute the pipeline
    pub fn execute(
        &self,
        command: &W::Command,
        state: W::State,
    ) -> DomainResult<WorkflowOutput<W::State, W::Event>, W::Failure> {
        let state = (self.validate_state)(state)?;
        let state = apply_constraints(&self.constraints, command, state)?;
        let events = (self.decide)(command, &state)?;
        let new_state = self.evolve_all(state, &events);

        Ok(WorkflowOutput { events, new_state })
    }

    /// Execute and report the outcome to an observer
    ///
    /// Returns exactly what [`Workflow::execute`] returns.
    pub fn execute_observed(
        &self,
        command: &W::Command,
        state: W::State,
        instrumentation: &dyn Instrumentation,
    ) -> DomainResult<WorkflowOutput<W::State, W::Event>, W::Failure>
    where
        W::Failure: FailureCode,
    {
        observe(instrumentation, W::NAME, self.execute(command, state))
    }

    /// Fold events over a state, left to right
    pub fn evolve_all(&self, state: W::State, events: &[W::Event]) -> W::State {
        events
            .iter()
            .fold(state, |state, event| (self.evolve)(state, event))
    }
}

impl<W: WorkflowSpec> fmt::Debug for Workflow<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Workflow")
            .field("name", &W::NAME)
            .field("constraints", &self.constraints.len())
            .finish()
    }
}
