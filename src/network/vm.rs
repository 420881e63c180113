// Copyright (c) 2025 - Cowboy AI, Inc.
//! VM network list to interface references

use serde::{Deserialize, Serialize};

use crate::network::mapping::NetworkRef;

/// Where one VM network attaches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VmNetworkSource {
    Pod,
    Multus {
        /// `namespace/name` or a bare `name` in the VM's namespace
        network_name: String,
    },
}

/// One network entry of a VM definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmNetwork {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<VmNetworkSource>,
}

impl VmNetwork {
    pub fn pod(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: Some(VmNetworkSource::Pod),
        }
    }

    pub fn multus(name: impl Into<String>, network_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: Some(VmNetworkSource::Multus {
                network_name: network_name.into(),
            }),
        }
    }
}

/// Interface references for a VM's networks, in declaration order
///
/// Pod networks become a `pod` type reference. Multus networks become a
/// (namespace, name) reference, taking the namespace from the network name
/// when qualified and from `vm_namespace` otherwise. Networks without a
/// source are skipped.
pub fn nic_network_refs(networks: &[VmNetwork], vm_namespace: &str) -> Vec<NetworkRef> {
    networks
        .iter()
        .filter_map(|network| match network.source.as_ref()? {
            VmNetworkSource::Pod => Some(NetworkRef::pod()),
            VmNetworkSource::Multus { network_name } => {
                let (namespace, name) = match network_name.split_once('/') {
                    Some((namespace, name)) => (namespace, name),
                    None => (vm_namespace, network_name.as_str()),
                };
                Some(NetworkRef::by_name(namespace, name))
            }
        })
        .collect()
}
