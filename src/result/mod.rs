// Copyright (c) 2025 - Cowboy AI, Inc.
//! Result Algebra
//!
//! Every stage of the core returns a [`DomainResult`]: either the stage's
//! data or a [`Failure`] carrying one or more [`Cause`]s.
//!
//! ```text
//! DomainResult<S, F> = Ok(S) | Err(Failure { cause: [Cause<F>, ...] })
//! ```
//!
//! # Combinators
//!
//! - [`accept_res`] - bind: failures pass through, successes feed the next stage
//! - [`accept_res_partial`] - bind for stages that may be unavailable
//! - [`split_res`] - terminal step collapsing a result into one value
//!
//! Chaining `accept_res` over N stages behaves exactly like applying the
//! stages one at a time, in order. The first failure aborts every remaining
//! stage and reaches the caller unchanged.
//!
//! # Example
//!
//! ```rust
//! use cim_command_core::errors::StructuralError;
//! use cim_command_core::result::{accept_res, fail, succeed, DomainResult};
//!
//! let halve = |n: u32| -> DomainResult<u32, StructuralError> {
//!     if n % 2 == 0 {
//!         succeed(n / 2)
//!     } else {
//!         fail(StructuralError::InvalidPayload, None)
//!     }
//! };
//!
//! let quarter = |n| accept_res(halve)(accept_res(halve)(succeed(n)));
//! assert_eq!(quarter(8).unwrap(), 2);
//! assert!(quarter(6).is_err());
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A stable, machine-readable failure code
///
/// Implemented by every closed set of failure codes. The returned string is
/// the code's serde name.
pub trait FailureCode: Clone + fmt::Debug + PartialEq {
    /// The snake_case code string
    fn code(&self) -> &'static str;
}

/// One reason a stage failed: a code plus optional diagnostic payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cause<F> {
    /// Failure code
    pub msg: F,

    /// Diagnostic payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl<F> Cause<F> {
    /// Create a cause without diagnostic data
    pub fn new(msg: F) -> Self {
        Self { msg, data: None }
    }

    /// Create a cause with diagnostic data
    pub fn with_data(msg: F, data: Value) -> Self {
        Self {
            msg,
            data: Some(data),
        }
    }
}

/// A failed result
///
/// Always holds at least one cause; the constructors make an empty failure
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Failure<F> {
    cause: Vec<Cause<F>>,
}

impl<F> Failure<F> {
    /// Single-cause failure
    pub fn new(code: F, data: Option<Value>) -> Self {
        Self::from_cause(Cause { msg: code, data })
    }

    /// Failure from an existing cause
    pub fn from_cause(cause: Cause<F>) -> Self {
        Self { cause: vec![cause] }
    }

    /// Failure from a first cause and any number of further causes
    pub fn many(first: Cause<F>, rest: impl IntoIterator<Item = Cause<F>>) -> Self {
        let mut cause = vec![first];
        cause.extend(rest);
        Self { cause }
    }

    /// All causes, in the order they were recorded
    pub fn causes(&self) -> &[Cause<F>] {
        &self.cause
    }

    /// The first (and, in fail-fast pipelines, only) cause
    pub fn first(&self) -> &Cause<F> {
        &self.cause[0]
    }

    /// The failure code of the first cause
    pub fn code(&self) -> &F {
        &self.first().msg
    }

    /// Translate every code, keeping diagnostic data
    pub fn map_code<G>(self, f: impl Fn(F) -> G) -> Failure<G> {
        Failure {
            cause: self
                .cause
                .into_iter()
                .map(|c| Cause {
                    msg: f(c.msg),
                    data: c.data,
                })
                .collect(),
        }
    }

    /// Widen the code type through `From`
    ///
    /// Used to lift structural and routing failures into a workflow's own
    /// failure type.
    pub fn cast<G: From<F>>(self) -> Failure<G> {
        self.map_code(G::from)
    }
}

impl<F: FailureCode> Failure<F> {
    /// Code strings of every cause
    pub fn codes(&self) -> Vec<&'static str> {
        self.cause.iter().map(|c| c.msg.code()).collect()
    }
}

impl<F: FailureCode> fmt::Display for Failure<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.codes().join(", "))
    }
}

impl<F: FailureCode> std::error::Error for Failure<F> {}

/// Result of every stage in the core
pub type DomainResult<S, F> = Result<S, Failure<F>>;

/// Wrap data as a success
pub fn succeed<S, F>(data: S) -> DomainResult<S, F> {
    Ok(data)
}

/// Single-cause failure with optional diagnostic data
pub fn fail<S, F>(code: F, data: Option<Value>) -> DomainResult<S, F> {
    Err(Failure::new(code, data))
}

/// Multi-cause failure
pub fn fail_many<S, F>(
    first: Cause<F>,
    rest: impl IntoIterator<Item = Cause<F>>,
) -> DomainResult<S, F> {
    Err(Failure::many(first, rest))
}

/// True for a success
pub fn is_success<S, F>(result: &DomainResult<S, F>) -> bool {
    result.is_ok()
}

/// True for a failure
pub fn is_failure<S, F>(result: &DomainResult<S, F>) -> bool {
    result.is_err()
}

/// Lift a stage into a result-to-result function
///
/// A failure passes through untouched; a success is handed to `f`, whose
/// result (success or failure) is returned as is.
pub fn accept_res<S, T, F, G>(f: G) -> impl Fn(DomainResult<S, F>) -> DomainResult<T, F>
where
    G: Fn(S) -> DomainResult<T, F>,
{
    move |result: DomainResult<S, F>| result.and_then(&f)
}

/// Like [`accept_res`], for a stage that may not exist
///
/// When `f` is `None`, a success input turns into a failure with code
/// `unavailable`. Failure inputs still pass through untouched.
pub fn accept_res_partial<S, T, F, G>(
    f: Option<G>,
    unavailable: F,
) -> impl Fn(DomainResult<S, F>) -> DomainResult<T, F>
where
    G: Fn(S) -> DomainResult<T, F>,
    F: Clone,
{
    move |result: DomainResult<S, F>| -> DomainResult<T, F> {
        let data = result?;
        match &f {
            Some(f) => f(data),
            None => fail(unavailable.clone(), None),
        }
    }
}

/// Collapse a result into a single value
pub fn split_res<S, F, T>(
    on_success: impl FnOnce(S) -> T,
    on_failure: impl FnOnce(Failure<F>) -> T,
) -> impl FnOnce(DomainResult<S, F>) -> T {
    move |result: DomainResult<S, F>| match result {
        Ok(data) => on_success(data),
        Err(failure) => on_failure(failure),
    }
}
