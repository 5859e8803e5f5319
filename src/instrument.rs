// Copyright (c) 2025 - Cowboy AI, Inc.
//! Instrumentation Boundary
//!
//! The core never logs. Hosts that want to observe pipelines attach an
//! [`Instrumentation`] through [`observe`] (or `execute_observed` on
//! workflows and policies). The observer sees each outcome and the result is
//! handed back untouched, so output is identical with or without it. A
//! panicking observer is contained and never reaches the caller.

use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{debug, warn};

use crate::result::{DomainResult, FailureCode};

/// Observer of pipeline outcomes
pub trait Instrumentation: Send + Sync {
    /// A pipeline succeeded
    fn on_success(&self, pipeline: &'static str);

    /// A pipeline failed with the given codes
    fn on_failure(&self, pipeline: &'static str, codes: &[&'static str]);
}

/// Observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInstrumentation;

impl Instrumentation for NoopInstrumentation {
    fn on_success(&self, _pipeline: &'static str) {}

    fn on_failure(&self, _pipeline: &'static str, _codes: &[&'static str]) {}
}

/// Observer that emits `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingInstrumentation;

impl Instrumentation for TracingInstrumentation {
    fn on_success(&self, pipeline: &'static str) {
        debug!(pipeline, "pipeline succeeded");
    }

    fn on_failure(&self, pipeline: &'static str, codes: &[&'static str]) {
        warn!(pipeline, codes = ?codes, "pipeline failed");
    }
}

/// Report a result to an observer and return it unchanged
pub fn observe<T, F: FailureCode>(
    instrumentation: &dyn Instrumentation,
    pipeline: &'static str,
    result: DomainResult<T, F>,
) -> DomainResult<T, F> {
    let report = || match &result {
        Ok(_) => instrumentation.on_success(pipeline),
        Err(failure) => instrumentation.on_failure(pipeline, &failure.codes()),
    };

    // Observer panics stay inside the boundary
    let _ = catch_unwind(AssertUnwindSafe(report));
    result
}
