// Copyright (c) 2025 - Cowboy AI, Inc.
//! Configuration for hosts embedding the core

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::errors::{CoreError, CoreResult};
use crate::instrument::{Instrumentation, NoopInstrumentation, TracingInstrumentation};
use crate::message::{IdGenerator, MessageBuilder, SystemClock, UuidV4Generator, UuidV7Generator};

/// How fresh message and correlation ids are minted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    /// Time-ordered UUID v7
    #[default]
    V7,

    /// Random UUID v4
    V4,
}

/// Core configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Id strategy for the message builder
    pub id_strategy: IdStrategy,

    /// Report pipeline outcomes through `tracing`
    pub trace_pipelines: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::V7,
            trace_pipelines: false,
        }
    }
}

impl CoreConfig {
    /// Load from a JSON document; missing fields take their defaults
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::Configuration(e.to_string()))
    }

    /// Message builder on the wall clock with the configured ids
    pub fn message_builder(&self) -> MessageBuilder {
        let ids: Arc<dyn IdGenerator> = match self.id_strategy {
            IdStrategy::V7 => Arc::new(UuidV7Generator),
            IdStrategy::V4 => Arc::new(UuidV4Generator),
        };
        MessageBuilder::new(Arc::new(SystemClock), ids)
    }

    /// Observer matching `trace_pipelines`
    pub fn instrumentation(&self) -> Box<dyn Instrumentation> {
        if self.trace_pipelines {
            Box::new(TracingInstrumentation)
        } else {
            Box::new(NoopInstrumentation)
        }
    }
}
