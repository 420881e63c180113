// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Duplicate Detection
//!
//! Maps are keyed by source identifier `net-N`; interface lists draw from a
//! slightly larger identifier range so some interfaces are always unmapped.

use proptest::prelude::*;
use std::collections::HashMap;

use migration_plane::network::{
    find_mapping_for_nic_ref, validate_network_duplicates, DestinationKind, DestinationNetwork,
    NetworkMap, NetworkPair, NetworkRef,
};

// ============================================================================
// Strategies
// ============================================================================

fn destination() -> impl Strategy<Value = DestinationNetwork> {
    prop_oneof![
        Just(DestinationNetwork::pod()),
        Just(DestinationNetwork::ignored()),
        (0..2usize, 0..3usize).prop_map(|(ns, name)| {
            DestinationNetwork::multus(format!("ns{}", ns), format!("nad-{}", name))
        }),
    ]
}

fn network_map() -> impl Strategy<Value = NetworkMap> {
    prop::collection::vec((0..6usize, destination()), 0..8).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(id, destination)| {
                NetworkPair::new(NetworkRef::by_id(format!("net-{}", id)), destination)
            })
            .collect()
    })
}

fn nic_refs() -> impl Strategy<Value = Vec<NetworkRef>> {
    prop::collection::vec(
        (0..8usize).prop_map(|id| NetworkRef::by_id(format!("net-{}", id))),
        0..10,
    )
}

/// Straightforward recount of the duplicate rules
fn expected_flags(refs: &[NetworkRef], map: &NetworkMap) -> (bool, bool) {
    let mut pods = 0;
    let mut multus: HashMap<(String, String), usize> = HashMap::new();

    for nic_ref in refs {
        let Some(pair) = map.map.iter().find(|pair| pair.source.id == nic_ref.id) else {
            continue;
        };
        match pair.destination.kind {
            DestinationKind::Pod => pods += 1,
            DestinationKind::Multus => {
                *multus
                    .entry((
                        pair.destination.namespace.clone(),
                        pair.destination.name.clone(),
                    ))
                    .or_default() += 1
            }
            DestinationKind::Ignored => {}
        }
    }

    (pods > 1, multus.values().any(|count| *count > 1))
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Property: no interfaces, no conflicts
    #[test]
    fn prop_empty_refs_never_conflict(map in network_map()) {
        let report = validate_network_duplicates(&[], Some(&map));
        prop_assert!(!report.pod_duplicate);
        prop_assert!(!report.multus_duplicate);
    }

    /// Property: an absent map behaves like a map with no entries
    #[test]
    fn prop_absent_map_never_conflicts(refs in nic_refs()) {
        let absent = validate_network_duplicates(&refs, None);
        let empty = validate_network_duplicates(&refs, Some(&NetworkMap::default()));

        prop_assert!(!absent.has_duplicates());
        prop_assert_eq!(absent, empty);
    }

    /// Property: flags match an independent recount
    #[test]
    fn prop_flags_match_recount(refs in nic_refs(), map in network_map()) {
        let report = validate_network_duplicates(&refs, Some(&map));
        let (pod, multus) = expected_flags(&refs, &map);

        prop_assert_eq!(report.pod_duplicate, pod);
        prop_assert_eq!(report.multus_duplicate, multus);
    }

    /// Property: interface order does not matter
    #[test]
    fn prop_order_independent(refs in nic_refs(), map in network_map()) {
        let mut reversed = refs.clone();
        reversed.reverse();

        prop_assert_eq!(
            validate_network_duplicates(&refs, Some(&map)),
            validate_network_duplicates(&reversed, Some(&map))
        );
    }

    /// Property: unmapped interfaces never change the outcome
    #[test]
    fn prop_unmapped_refs_are_excluded(
        refs in nic_refs(),
        map in network_map(),
        extra in prop::collection::vec("[a-z]{1,8}", 0..5),
    ) {
        let mut padded = refs.clone();
        for name in extra {
            padded.push(NetworkRef::by_id(format!("unmapped-{}", name)));
            padded.push(NetworkRef::by_name("nowhere", name));
        }

        prop_assert_eq!(
            validate_network_duplicates(&refs, Some(&map)),
            validate_network_duplicates(&padded, Some(&map))
        );
    }

    /// Property: flags and the conflict list always agree
    #[test]
    fn prop_flags_agree_with_conflicts(refs in nic_refs(), map in network_map()) {
        let report = validate_network_duplicates(&refs, Some(&map));
        prop_assert_eq!(report.has_duplicates(), !report.conflicts().is_empty());
    }

    /// Property: a set identifier decides resolution whatever else is set
    #[test]
    fn prop_id_precedence(
        id in 0..8usize,
        network_type in "[a-z]{0,4}",
        name in "[a-z]{0,4}",
        map in network_map(),
    ) {
        let plain = NetworkRef::by_id(format!("net-{}", id));
        let noisy = NetworkRef {
            network_type,
            namespace: "ns".to_string(),
            name,
            ..plain.clone()
        };

        prop_assert_eq!(
            find_mapping_for_nic_ref(&plain, Some(&map)),
            find_mapping_for_nic_ref(&noisy, Some(&map))
        );
    }
}
