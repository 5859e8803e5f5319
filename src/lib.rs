// Copyright (c) 2025 - Cowboy AI, Inc.
//! Command-processing core for the Composable Information Machine
//!
//! Pure building blocks for event-sourced domains:
//!
//! - [`result`] - `DomainResult` and its fail-fast combinators
//! - [`validation`] - structural validation of untyped data
//! - [`message`] - commands and events with causal traces
//! - [`aggregate`] - tagged-state aggregates
//! - [`workflow`] - `validate → constraints → decide → evolve` pipelines
//! - [`policy`] - event-driven follow-up commands
//! - [`dispatch`] - routing commands to workflows
//! - [`instrument`] - transparent observation of pipeline outcomes
//! - [`config`] - host-facing configuration
//!
//! [`domain`] is a complete compute-resource lifecycle built on top of them.
//!
//! Nothing here performs I/O. Time and identity enter only through the
//! [`MessageBuilder`](message::MessageBuilder).

pub mod aggregate;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod errors;
pub mod instrument;
pub mod message;
pub mod policy;
pub mod result;
pub mod validation;
pub mod workflow;

// Re-export commonly used types
pub use aggregate::{new_aggregate, validate_aggregate, AggregateRecord, AggregateState};
pub use config::{CoreConfig, IdStrategy};
pub use dispatch::Router;
pub use errors::{CoreError, CoreResult, RoutingError, StructuralError};
pub use instrument::{observe, Instrumentation, NoopInstrumentation, TracingInstrumentation};
pub use message::{
    derive_trace, DomainTrace, Message, MessageBody, MessageBuilder, MessageKind, RawMessage,
};
pub use policy::{CommandIntent, Policy, PolicySpec};
pub use result::{
    accept_res, accept_res_partial, fail, fail_many, is_failure, is_success, split_res, succeed,
    Cause, DomainResult, Failure, FailureCode,
};
pub use validation::{safe_parse, Validate, ValidationError, ValidationResult};
pub use workflow::{Workflow, WorkflowOutput, WorkflowSpec};
