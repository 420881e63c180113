// Copyright (c) 2025 - Cowboy AI, Inc.
//! Network map value types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Source type tag used for a VM's pod network interface
pub const POD_NETWORK_TYPE: &str = "pod";

/// Reference to the source-side network of one VM interface
///
/// Three alternative keys identify the network. When several are set, the
/// identifier wins over the type tag, which wins over (namespace, name).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkRef {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,

    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub network_type: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl NetworkRef {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn by_type(network_type: impl Into<String>) -> Self {
        Self {
            network_type: network_type.into(),
            ..Self::default()
        }
    }

    pub fn by_name(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn pod() -> Self {
        Self::by_type(POD_NETWORK_TYPE)
    }
}

impl fmt::Display for NetworkRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.id.is_empty() {
            write!(f, "id:{}", self.id)
        } else if !self.network_type.is_empty() {
            write!(f, "type:{}", self.network_type)
        } else if self.namespace.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}", self.namespace, self.name)
        }
    }
}

/// Kind of destination network an interface is mapped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DestinationKind {
    /// The cluster's default pod network; a VM can attach to it only once
    Pod,
    /// A named secondary network attachment
    #[doc(alias = "multi-attach")]
    Multus,
    /// Interface deliberately left unmapped
    Ignored,
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationKind::Pod => write!(f, "pod"),
            DestinationKind::Multus => write!(f, "multus"),
            DestinationKind::Ignored => write!(f, "ignored"),
        }
    }
}

/// Destination side of a network mapping entry
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DestinationNetwork {
    #[serde(rename = "type")]
    pub kind: DestinationKind,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl DestinationNetwork {
    pub fn pod() -> Self {
        Self {
            kind: DestinationKind::Pod,
            namespace: String::new(),
            name: String::new(),
        }
    }

    pub fn multus(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: DestinationKind::Multus,
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    pub fn ignored() -> Self {
        Self {
            kind: DestinationKind::Ignored,
            namespace: String::new(),
            name: String::new(),
        }
    }
}

/// One entry of a network map
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NetworkPair {
    pub source: NetworkRef,
    pub destination: DestinationNetwork,
}

impl NetworkPair {
    pub fn new(source: NetworkRef, destination: DestinationNetwork) -> Self {
        Self {
            source,
            destination,
        }
    }
}

/// Ordered mapping from source networks to destination networks
///
/// Entries are found by matching their source, first match in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkMap {
    #[serde(default)]
    pub map: Vec<NetworkPair>,
}

impl NetworkMap {
    pub fn new(map: Vec<NetworkPair>) -> Self {
        Self { map }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkPair> {
        self.map.iter()
    }

    /// Entry whose source identifier equals `id`
    pub fn find_network(&self, id: &str) -> Option<&NetworkPair> {
        self.map.iter().find(|pair| pair.source.id == id)
    }

    /// Entry whose source type tag equals `network_type`
    pub fn find_network_by_type(&self, network_type: &str) -> Option<&NetworkPair> {
        self.map
            .iter()
            .find(|pair| pair.source.network_type == network_type)
    }

    /// Entry whose source (namespace, name) equals the given pair
    pub fn find_network_by_name_and_namespace(
        &self,
        namespace: &str,
        name: &str,
    ) -> Option<&NetworkPair> {
        self.map
            .iter()
            .find(|pair| pair.source.namespace == namespace && pair.source.name == name)
    }
}

impl FromIterator<NetworkPair> for NetworkMap {
    fn from_iter<I: IntoIterator<Item = NetworkPair>>(iter: I) -> Self {
        Self {
            map: iter.into_iter().collect(),
        }
    }
}
