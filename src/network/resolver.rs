// Copyright (c) 2025 - Cowboy AI, Inc.
//! Interface reference to mapping entry resolution

use crate::network::mapping::{NetworkMap, NetworkPair, NetworkRef};

/// Mapping entry configured for a VM interface's source network
///
/// The first non-empty key of the reference selects the lookup, in order:
/// identifier, type tag, then (namespace, name). Only that key is compared;
/// a reference whose identifier matches nothing is not retried by name.
/// An absent map matches nothing.
pub fn find_mapping_for_nic_ref<'a>(
    nic_ref: &NetworkRef,
    network_map: Option<&'a NetworkMap>,
) -> Option<&'a NetworkPair> {
    let network_map = network_map?;

    if !nic_ref.id.is_empty() {
        return network_map.find_network(&nic_ref.id);
    }
    if !nic_ref.network_type.is_empty() {
        return network_map.find_network_by_type(&nic_ref.network_type);
    }
    if !nic_ref.name.is_empty() {
        return network_map.find_network_by_name_and_namespace(&nic_ref.namespace, &nic_ref.name);
    }
    None
}
