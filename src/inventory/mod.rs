// Copyright (c) 2025 - Cowboy AI, Inc.
//! Source Inventory Hierarchy
//!
//! The source platform organizes managed entities in a tree: hosts sit under
//! clusters or compute resources, which sit under folders, which sit under a
//! datacenter. Only the parent links and type tags matter here.
//!
//! # Walking the tree
//!
//! ```text
//! HostSystem:host-42
//!     ↓ parent
//! ClusterComputeResource:domain-c7
//!     ↓ parent
//! Folder:group-h4
//!     ↓ parent
//! Datacenter:datacenter-3   ← resolved
//! ```
//!
//! [`DatacenterResolver`] performs that walk through an [`InventoryClient`].

pub mod resolver;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::RemoteError;

pub use resolver::{DatacenterResolver, DEFAULT_MAX_HOPS};

/// Type tag of the organizational container a host belongs to
pub const DATACENTER_KIND: &str = "Datacenter";

/// Type tag of a host
pub const HOST_KIND: &str = "HostSystem";

/// Reference to a managed entity: its type tag and opaque identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: String,
    pub value: String,
}

impl EntityRef {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }

    pub fn is_datacenter(&self) -> bool {
        self.kind == DATACENTER_KIND
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.value)
    }
}

/// A virtualization host, identified by display name and inventory reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HostRef {
    pub name: String,
    pub reference: EntityRef,
}

impl HostRef {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference: EntityRef::new(HOST_KIND, id),
        }
    }
}

impl fmt::Display for HostRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Resolved datacenter handle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Datacenter {
    pub reference: EntityRef,
    pub name: String,
}

/// Read access to the inventory tree
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Parent of `entity`, or `None` at the top of the tree
    async fn parent_of(&self, entity: &EntityRef) -> Result<Option<EntityRef>, RemoteError>;

    /// Resolve a datacenter reference into a usable handle
    async fn datacenter(&self, entity: &EntityRef) -> Result<Datacenter, RemoteError>;
}
