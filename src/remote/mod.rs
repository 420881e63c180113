// Copyright (c) 2025 - Cowboy AI, Inc.
//! Remote host boundaries
//!
//! Traits for the two host-side collaborators the copy-offload reconciler
//! needs, plus the value types that cross them:
//!
//! - [`HostCommandRunner`] runs an `esxcli`-style command on a host and returns
//!   row-structured output ([`CommandRow`]).
//! - [`DatastoreUploader`] stages a local file at the root of a datastore.
//!
//! Faults raised by the host are carried as [`HostFault`] and classified by
//! [`HostFault::kind`], which is the only place that inspects fault text.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::errors::RemoteError;
use crate::inventory::{Datacenter, HostRef};

/// Marker the host puts in a fault message when a queried package is absent
pub const NO_MATCH_MARKER: &str = "[NoMatchError]";

/// Root under which datastores are mounted on the host
pub const DEFAULT_VOLUMES_ROOT: &str = "/vmfs/volumes";

/// Closed classification of host faults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaultKind {
    /// The queried object does not exist on the host
    NotFound,
    Other,
}

/// Structured fault returned by a host command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostFault {
    pub messages: Vec<String>,
}

impl HostFault {
    pub fn new<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn kind(&self) -> FaultKind {
        if self.messages.iter().any(|m| m.contains(NO_MATCH_MARKER)) {
            FaultKind::NotFound
        } else {
            FaultKind::Other
        }
    }
}

impl fmt::Display for HostFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.messages.is_empty() {
            write!(f, "<no fault messages>")
        } else {
            write!(f, "{}", self.messages.join("; "))
        }
    }
}

impl RemoteError {
    /// Fault classification, if this error is a structured host fault
    pub fn fault_kind(&self) -> Option<FaultKind> {
        match self {
            RemoteError::Fault(fault) => Some(fault.kind()),
            RemoteError::Transport(_) => None,
        }
    }
}

/// One row of command output with named-field lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandRow {
    fields: BTreeMap<String, String>,
}

impl CommandRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn value(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for CommandRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Runs management commands on a host
#[async_trait]
pub trait HostCommandRunner: Send + Sync {
    /// Execute `args` (e.g. `["software", "vib", "get", "-n", "pkg"]`) on `host`
    async fn run_esx_command(
        &self,
        host: &HostRef,
        args: &[String],
    ) -> Result<Vec<CommandRow>, RemoteError>;
}

/// Stages files on datastores
#[async_trait]
pub trait DatastoreUploader: Send + Sync {
    /// Upload `local_path` to the root of `datastore` in `datacenter` as `file_name`
    async fn upload_file(
        &self,
        datacenter: &Datacenter,
        datastore: &str,
        local_path: &Path,
        file_name: &str,
    ) -> Result<(), RemoteError>;
}

/// Host-side path of a file at the root of a datastore
pub fn datastore_path(volumes_root: &str, datastore: &str, file_name: &str) -> String {
    format!(
        "{}/{}/{}",
        volumes_root.trim_end_matches('/'),
        datastore,
        file_name
    )
}
