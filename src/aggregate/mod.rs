// Copyright (c) 2025 - Cowboy AI, Inc.
//! Tagged-State Aggregates
//!
//! An aggregate is an entity at one lifecycle stage. Each stage is its own
//! variant with its own fields, so a state such as "active but never
//! activated" cannot be written down:
//!
//! ```text
//! { "tag": "provisioning", "data": { id, profile } }
//! { "tag": "active",       "data": { id, profile, activated_at } }
//! ```
//!
//! Aggregates are replaced, never mutated: a workflow folds events over the
//! previous value to produce the next one.
//!
//! # Construction
//!
//! [`new_aggregate`] is the validated entry point from untyped data. Typed
//! values built directly can be re-checked with [`validate_aggregate`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::errors::StructuralError;
use crate::result::DomainResult;
use crate::validation::{check, parse_tagged, tagged_content, Validate};

/// A tagged aggregate state
///
/// Implemented by an adjacently tagged enum (`tag` / `data`) with one
/// variant per lifecycle stage.
pub trait AggregateState: Serialize + DeserializeOwned + Validate + Clone + fmt::Debug {
    /// Every declared stage tag
    const TAGS: &'static [&'static str];

    /// Stage tag of this value
    fn tag(&self) -> &'static str;
}

/// Build an aggregate from a tag and untyped data
pub fn new_aggregate<A: AggregateState>(
    tag: &str,
    data: Value,
) -> DomainResult<A, StructuralError> {
    parse_tagged("tag", "data", tag, data)
}

/// Re-check the invariants of a typed aggregate
pub fn validate_aggregate<A: AggregateState>(state: A) -> DomainResult<A, StructuralError> {
    check(state)
}

/// Untyped `{tag, data}` record, as stored or transported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRecord {
    /// Stage tag
    pub tag: String,

    /// Stage-specific data
    pub data: Value,
}

impl AggregateRecord {
    /// Record for a typed aggregate
    pub fn from_state<A: AggregateState>(state: &A) -> serde_json::Result<Self> {
        Ok(Self {
            tag: state.tag().to_string(),
            data: tagged_content(serde_json::to_value(state)?, "data"),
        })
    }

    /// Validate the record into a typed aggregate
    pub fn parse<A: AggregateState>(self) -> DomainResult<A, StructuralError> {
        new_aggregate(&self.tag, self.data)
    }
}
