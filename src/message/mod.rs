// Copyright (c) 2025 - Cowboy AI, Inc.
//! Commands, Events and their Causal Trace
//!
//! Every message carries its own identity plus the two ids that place it in
//! a causal chain:
//!
//! - **correlationid**: stable across the whole chain (saga, request flow)
//! - **causationid**: id of the message that directly caused this one,
//!   absent on the chain root
//!
//! ```text
//! register-resource     id: m1  correlationid: c1  causationid: -
//!   ↓
//! resource-registered   id: m2  correlationid: c1  causationid: m1
//!   ↓
//! activate-resource     id: m3  correlationid: c1  causationid: m2
//! ```
//!
//! [`derive_trace`] is the only sanctioned way to extend a chain.
//!
//! # Wire Shape
//!
//! ```text
//! { id, msgType: "cmd"|"evt", type, timestamp (unix millis),
//!   correlationid, causationid?, data }
//! ```
//!
//! [`RawMessage`] is that record as received; [`Message`] is the validated
//! form with a typed body. Bodies are adjacently tagged enums
//! (`{"type": ..., "data": ...}`) implementing [`MessageBody`].

pub mod builder;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};
use std::fmt;
use uuid::Uuid;

use crate::errors::StructuralError;
use crate::result::{fail, DomainResult};
use crate::validation::{parse_tagged, safe_parse, tagged_content, Validate};

pub use builder::{
    Clock, FixedClock, IdGenerator, MessageBuilder, SequentialIdGenerator, SystemClock,
    UuidV4Generator, UuidV7Generator,
};

/// Whether a message is a command or an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Intent to change state
    Cmd,

    /// Fact that already happened
    Evt,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Cmd => write!(f, "cmd"),
            MessageKind::Evt => write!(f, "evt"),
        }
    }
}

/// The ids threaded from one message to the next
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DomainTrace {
    /// Chain the message belongs to
    #[serde(rename = "correlationid", default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<Uuid>,

    /// Message that directly caused this one
    #[serde(rename = "causationid", default, skip_serializing_if = "Option::is_none")]
    pub causation_id: Option<Uuid>,
}

impl DomainTrace {
    /// Empty trace: the next message starts a new chain
    pub fn root() -> Self {
        Self::default()
    }

    /// Trace with explicit ids
    pub fn new(correlation_id: Uuid, causation_id: Option<Uuid>) -> Self {
        Self {
            correlation_id: Some(correlation_id),
            causation_id,
        }
    }
}

/// Typed payload of a message
///
/// Implemented by a closed enum of command or event bodies. The serde form
/// must be adjacently tagged with `type` and `data`:
///
/// ```rust,ignore
/// #[derive(Serialize, Deserialize)]
/// #[serde(tag = "type", content = "data", rename_all = "kebab-case")]
/// enum OrderCommand {
///     PlaceOrder(PlaceOrder),
///     CancelOrder(CancelOrder),
/// }
/// ```
pub trait MessageBody: Serialize + DeserializeOwned + Validate + Clone + fmt::Debug {
    /// Kind shared by every variant
    const KIND: MessageKind;

    /// Every declared `type` discriminant
    const TYPES: &'static [&'static str];

    /// Discriminant of this value
    fn message_type(&self) -> &'static str;
}

/// A message as it travels on the wire, not yet validated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Unique message id
    pub id: Uuid,

    /// Command or event
    #[serde(rename = "msgType")]
    pub msg_type: MessageKind,

    /// Discriminant naming the specific command or event
    #[serde(rename = "type")]
    pub message_type: String,

    /// Creation instant
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,

    /// Chain the message belongs to
    #[serde(rename = "correlationid")]
    pub correlation_id: Uuid,

    /// Message that directly caused this one
    #[serde(rename = "causationid", default, skip_serializing_if = "Option::is_none")]
    pub causation_id: Option<Uuid>,

    /// Type-specific payload
    pub data: Value,
}

impl Validate for RawMessage {}

impl RawMessage {
    /// Parse a raw record from JSON
    pub fn from_json(value: Value) -> DomainResult<Self, StructuralError> {
        safe_parse(value)
    }
}

/// A validated message with a typed body
///
/// Messages are immutable once built: fields are read through accessors and
/// the only constructors validate.
#[derive(Debug, Clone, PartialEq)]
pub struct Message<B> {
    id: Uuid,
    timestamp: DateTime<Utc>,
    correlation_id: Uuid,
    causation_id: Option<Uuid>,
    body: B,
}

impl<B: MessageBody> Message<B> {
    /// Validate a raw record against the body's schema
    pub fn parse(raw: RawMessage) -> DomainResult<Self, StructuralError> {
        if raw.msg_type != B::KIND {
            return fail(
                StructuralError::ParseError,
                Some(json!({
                    "violation": format!("expected msgType {}, found {}", B::KIND, raw.msg_type)
                })),
            );
        }

        let body: B = parse_tagged("type", "data", &raw.message_type, raw.data)?;

        Ok(Self {
            id: raw.id,
            timestamp: raw.timestamp,
            correlation_id: raw.correlation_id,
            causation_id: raw.causation_id,
            body,
        })
    }

    /// Validate an untyped JSON message
    pub fn from_json(value: Value) -> DomainResult<Self, StructuralError> {
        RawMessage::from_json(value).and_then(Self::parse)
    }

    /// Convert back to the wire record
    pub fn to_raw(&self) -> serde_json::Result<RawMessage> {
        let data = tagged_content(serde_json::to_value(&self.body)?, "data");

        Ok(RawMessage {
            id: self.id,
            msg_type: B::KIND,
            message_type: self.body.message_type().to_string(),
            timestamp: self.timestamp,
            correlation_id: self.correlation_id,
            causation_id: self.causation_id,
            data,
        })
    }

    /// Command or event
    pub fn kind(&self) -> MessageKind {
        B::KIND
    }

    /// Discriminant of the body
    pub fn message_type(&self) -> &'static str {
        self.body.message_type()
    }
}

impl<B> Message<B> {
    /// Unique message id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Creation instant
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Chain the message belongs to
    pub fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }

    /// Message that directly caused this one
    pub fn causation_id(&self) -> Option<Uuid> {
        self.causation_id
    }

    /// Typed payload
    pub fn body(&self) -> &B {
        &self.body
    }

    /// Consume the message, keeping the payload
    pub fn into_body(self) -> B {
        self.body
    }

    /// The trace this message carries
    pub fn trace(&self) -> DomainTrace {
        DomainTrace::new(self.correlation_id, self.causation_id)
    }
}

impl<B: MessageBody> Serialize for Message<B> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_raw()
            .map_err(<S::Error as serde::ser::Error>::custom)?
            .serialize(serializer)
    }
}

/// The trace the next message in the chain must carry
pub fn derive_trace<B>(message: &Message<B>) -> DomainTrace {
    DomainTrace::new(message.correlation_id, Some(message.id))
}
