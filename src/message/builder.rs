// Copyright (c) 2025 - Cowboy AI, Inc.
//! Message Builder
//!
//! The only component allowed to read a clock or mint identifiers. Both are
//! injected, so production code passes [`SystemClock`] and a UUID generator
//! while tests pass [`FixedClock`] and [`SequentialIdGenerator`] and get
//! fully deterministic messages.
//!
//! # Construction Steps
//!
//! 1. Normalize the trace: without a correlation id the message becomes a
//!    chain root (fresh correlation id, no causation id)
//! 2. Mint the message id and timestamp
//! 3. Assemble the wire record
//! 4. Validate it against the body schema; nothing partially valid escapes

use chrono::{DateTime, SubsecRound, Utc};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::StructuralError;
use crate::message::{derive_trace, DomainTrace, Message, MessageBody, RawMessage};
use crate::policy::CommandIntent;
use crate::result::{DomainResult, Failure};
use crate::validation::tagged_content;

/// Source of the current instant
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Source of fresh message and correlation ids
pub trait IdGenerator: Send + Sync {
    /// A fresh id
    fn next_id(&self) -> Uuid;
}

/// Time-ordered UUID v7 ids
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7Generator;

impl IdGenerator for UuidV7Generator {
    fn next_id(&self) -> Uuid {
        Uuid::now_v7()
    }
}

/// Random UUID v4 ids
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV4Generator;

impl IdGenerator for UuidV4Generator {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Counter-based ids (`00000000-...-0001`, `...-0002`, ...)
#[derive(Debug)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    /// Start counting at 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Start counting at `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> Uuid {
        Uuid::from_u128(u128::from(self.next.fetch_add(1, Ordering::Relaxed)))
    }
}

/// Builds validated, causally linked messages
#[derive(Clone)]
pub struct MessageBuilder {
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl MessageBuilder {
    /// Builder with explicit clock and id source
    pub fn new(clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { clock, ids }
    }

    /// Wall clock and UUID v7 ids
    pub fn system() -> Self {
        Self::new(Arc::new(SystemClock), Arc::new(UuidV7Generator))
    }

    /// Build a message of kind `B::KIND` from untyped data
    pub fn new_message<B: MessageBody>(
        &self,
        message_type: &str,
        trace: Option<&DomainTrace>,
        data: Value,
    ) -> DomainResult<Message<B>, StructuralError> {
        let (correlation_id, causation_id) = match trace {
            Some(DomainTrace {
                correlation_id: Some(correlation_id),
                causation_id,
            }) => (*correlation_id, *causation_id),
            _ => (self.ids.next_id(), None),
        };

        let raw = RawMessage {
            id: self.ids.next_id(),
            msg_type: B::KIND,
            message_type: message_type.to_string(),
            // Wire timestamps are millisecond precision
            timestamp: self.clock.now().trunc_subsecs(3),
            correlation_id,
            causation_id,
            data,
        };

        Message::parse(raw)
    }

    /// Build a message from a typed body
    pub fn issue<B: MessageBody>(
        &self,
        body: B,
        trace: Option<&DomainTrace>,
    ) -> DomainResult<Message<B>, StructuralError> {
        let data = serde_json::to_value(&body).map_err(|err| {
            Failure::new(
                StructuralError::ParseError,
                Some(json!({ "violation": err.to_string() })),
            )
        })?;

        self.new_message(body.message_type(), trace, tagged_content(data, "data"))
    }

    /// Stamp workflow event bodies as messages caused by `cause`
    pub fn record_events<C, E: MessageBody>(
        &self,
        cause: &Message<C>,
        events: Vec<E>,
    ) -> DomainResult<Vec<Message<E>>, StructuralError> {
        let trace = derive_trace(cause);
        events
            .into_iter()
            .map(|event| self.issue(event, Some(&trace)))
            .collect()
    }

    /// Turn a policy's command intent into a command message
    pub fn issue_intent<B: MessageBody>(
        &self,
        intent: CommandIntent<B>,
    ) -> DomainResult<Message<B>, StructuralError> {
        self.issue(intent.body, Some(&intent.trace))
    }
}

impl Default for MessageBuilder {
    fn default() -> Self {
        Self::system()
    }
}

impl std::fmt::Debug for MessageBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageBuilder").finish_non_exhaustive()
    }
}
