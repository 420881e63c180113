// Copyright (c) 2025 - Cowboy AI, Inc.
//! Duplicate destination detection
//!
//! A VM can attach to the pod network at most once, and to any given
//! secondary (multus) network at most once. Several distinct secondary
//! networks are fine. Interfaces that the map does not cover, and interfaces
//! mapped to `ignored`, never take part in a conflict.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::network::mapping::{DestinationKind, NetworkMap, NetworkRef};
use crate::network::resolver::find_mapping_for_nic_ref;

/// A destination that more than one interface of the same VM resolves to
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NetworkConflict {
    MultiplePodNetworks {
        count: usize,
    },
    SharedMultusNetwork {
        namespace: String,
        name: String,
        count: usize,
    },
}

impl fmt::Display for NetworkConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkConflict::MultiplePodNetworks { count } => {
                write!(f, "{} interfaces are mapped to the pod network", count)
            }
            NetworkConflict::SharedMultusNetwork {
                namespace,
                name,
                count,
            } => write!(
                f,
                "{} interfaces are mapped to network attachment {}/{}",
                count, namespace, name
            ),
        }
    }
}

/// Result of checking one VM's interfaces against a network map
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateReport {
    /// More than one interface resolves to the pod network
    pub pod_duplicate: bool,
    /// Some multus destination is resolved by more than one interface
    pub multus_duplicate: bool,
    conflicts: Vec<NetworkConflict>,
}

impl DuplicateReport {
    pub fn has_duplicates(&self) -> bool {
        self.pod_duplicate || self.multus_duplicate
    }

    /// Conflicts behind the flags, pod first, then multus by namespace and name
    pub fn conflicts(&self) -> &[NetworkConflict] {
        &self.conflicts
    }
}

/// Check whether a VM's interfaces collide on a destination network
///
/// Each reference is resolved with [`find_mapping_for_nic_ref`]. Pod
/// destinations share one counter; multus destinations are counted per
/// (namespace, name). An absent map or an empty reference list yields a
/// report with both flags false.
pub fn validate_network_duplicates(
    nic_refs: &[NetworkRef],
    network_map: Option<&NetworkMap>,
) -> DuplicateReport {
    let mut pod_count = 0usize;
    let mut multus_counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();

    for nic_ref in nic_refs {
        let Some(pair) = find_mapping_for_nic_ref(nic_ref, network_map) else {
            continue;
        };
        match pair.destination.kind {
            DestinationKind::Pod => pod_count += 1,
            DestinationKind::Multus => {
                let key = (
                    pair.destination.namespace.as_str(),
                    pair.destination.name.as_str(),
                );
                *multus_counts.entry(key).or_default() += 1;
            }
            DestinationKind::Ignored => {}
        }
    }

    let mut conflicts = Vec::new();
    if pod_count > 1 {
        conflicts.push(NetworkConflict::MultiplePodNetworks { count: pod_count });
    }
    conflicts.extend(
        multus_counts
            .into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|((namespace, name), count)| NetworkConflict::SharedMultusNetwork {
                namespace: namespace.to_string(),
                name: name.to_string(),
                count,
            }),
    );

    DuplicateReport {
        pod_duplicate: pod_count > 1,
        multus_duplicate: conflicts
            .iter()
            .any(|c| matches!(c, NetworkConflict::SharedMultusNetwork { .. })),
        conflicts,
    }
}
