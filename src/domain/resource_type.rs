// Copyright (c) 2025 - Cowboy AI, Inc.
//! Compute Resource Type
//!
//! The kinds of compute resource the lifecycle tracks, and which of them run
//! on top of another resource.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Compute resource taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// Physical server (bare metal)
    PhysicalServer,
    /// Hypervisor
    Hypervisor,
    /// Container host
    ContainerHost,
    /// Virtual machine
    VirtualMachine,
    /// Container
    Container,
    /// Generic appliance (catch-all)
    Appliance,
}

impl ResourceType {
    /// Snake-case name, as serialized
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PhysicalServer => "physical_server",
            Self::Hypervisor => "hypervisor",
            Self::ContainerHost => "container_host",
            Self::VirtualMachine => "virtual_machine",
            Self::Container => "container",
            Self::Appliance => "appliance",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PhysicalServer => "Physical Server",
            Self::Hypervisor => "Hypervisor",
            Self::ContainerHost => "Container Host",
            Self::VirtualMachine => "Virtual Machine",
            Self::Container => "Container",
            Self::Appliance => "Appliance",
        }
    }

    /// Whether this resource runs on a host
    ///
    /// Only guests may name a host in their profile.
    pub fn is_guest(&self) -> bool {
        matches!(self, Self::VirtualMachine | Self::Container)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
