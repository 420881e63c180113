// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network Mapping Validation
//!
//! Before a migration plan is admitted, every VM's interfaces are resolved
//! against the plan's network map and checked for destination conflicts.
//!
//! # Resolution precedence
//!
//! | Reference carries  | Matched against source       |
//! |--------------------|------------------------------|
//! | `id`               | `id`                         |
//! | `type`             | `type`                       |
//! | `name`             | `(namespace, name)`          |
//!
//! The first non-empty key decides; there is no fallback to a later key.
//!
//! Everything here is a pure function of its inputs.

pub mod duplicates;
pub mod mapping;
pub mod resolver;
pub mod vm;

pub use duplicates::{validate_network_duplicates, DuplicateReport, NetworkConflict};
pub use mapping::{
    DestinationKind, DestinationNetwork, NetworkMap, NetworkPair, NetworkRef, POD_NETWORK_TYPE,
};
pub use resolver::find_mapping_for_nic_ref;
pub use vm::{nic_network_refs, VmNetwork, VmNetworkSource};
