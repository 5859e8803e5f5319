// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Result Algebra
//!
//! `accept_res` is a bind: chaining it over N stages must equal applying
//! the stages one by one, and the first failure must reach the caller
//! unchanged with every later stage skipped.

use std::cell::Cell;

use cim_command_core::errors::StructuralError;
use cim_command_core::result::{
    accept_res, accept_res_partial, fail, split_res, succeed, DomainResult,
};
use proptest::prelude::*;
use serde_json::json;

type R = DomainResult<i64, StructuralError>;

/// A stage: add `step`, failing once the running total passes `limit`
#[derive(Debug, Clone, Copy)]
struct Stage {
    step: i64,
    limit: i64,
}

impl Stage {
    fn run(self, n: i64) -> R {
        let next = n + self.step;
        if next > self.limit {
            fail(StructuralError::InvalidPayload, Some(json!({ "at": next })))
        } else {
            succeed(next)
        }
    }
}

// ============================================================================
// Property Test Strategies
// ============================================================================

fn stage() -> impl Strategy<Value = Stage> {
    (-20i64..20, -50i64..200).prop_map(|(step, limit)| Stage { step, limit })
}

fn stages() -> impl Strategy<Value = Vec<Stage>> {
    prop::collection::vec(stage(), 0..12)
}

fn input() -> impl Strategy<Value = R> {
    prop_oneof![
        (-100i64..100).prop_map(succeed::<i64, StructuralError>),
        Just(fail::<i64, _>(StructuralError::ParseError, None)),
    ]
}

/// Apply stages one by one with plain `match`
fn sequential(stages: &[Stage], start: R) -> R {
    let mut current = start;
    for stage in stages {
        current = match current {
            Ok(n) => stage.run(n),
            Err(failure) => return Err(failure),
        };
    }
    current
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: Chained `accept_res` equals sequential application
    #[test]
    fn prop_chain_equals_sequential(stages in stages(), start in input()) {
        let chained = stages
            .iter()
            .fold(start.clone(), |acc, stage| accept_res(move |n: i64| stage.run(n))(acc));

        prop_assert_eq!(chained, sequential(&stages, start));
    }

    /// Property: Associativity of bind
    ///
    /// `(r >>= f) >>= g` equals `r >>= (|x| f(x) >>= g)`.
    #[test]
    fn prop_accept_res_associative(f in stage(), g in stage(), start in input()) {
        let then_f = accept_res(move |n: i64| f.run(n));
        let then_g = accept_res(move |n: i64| g.run(n));
        let left = then_g(then_f(start.clone()));

        let f_then_g = accept_res(move |n: i64| accept_res(move |m: i64| g.run(m))(f.run(n)));
        let right = f_then_g(start);

        prop_assert_eq!(left, right);
    }

    /// Property: Failures pass through without running the stage
    #[test]
    fn prop_failure_skips_remaining_stages(stages in stages()) {
        let calls = Cell::new(0usize);
        let start: R = fail(StructuralError::ParseError, Some(json!({ "origin": true })));

        let result = stages.iter().fold(start.clone(), |acc, stage| {
            accept_res(|n: i64| {
                calls.set(calls.get() + 1);
                stage.run(n)
            })(acc)
        });

        prop_assert_eq!(result, start);
        prop_assert_eq!(calls.get(), 0);
    }

    /// Property: A missing stage only fails successes
    #[test]
    fn prop_partial_without_stage(start in input()) {
        let missing: Option<fn(i64) -> R> = None;
        let result = accept_res_partial(missing, StructuralError::InvalidPayload)(start.clone());

        match start {
            Ok(_) => prop_assert_eq!(
                result.unwrap_err().codes(),
                vec!["invalid_payload"]
            ),
            Err(_) => prop_assert_eq!(result, start),
        }
    }

    /// Property: `split_res` picks exactly one branch
    #[test]
    fn prop_split_res_collapses(start in input()) {
        let collapsed = split_res(|n: i64| n.to_string(), |_| "failed".to_string())(start.clone());

        prop_assert_eq!(collapsed == "failed", start.is_err());
    }
}
