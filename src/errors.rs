// Copyright (c) 2025 - Cowboy AI, Inc.
//! Error types for copy-offload reconciliation
//!
//! Errors are layered the same way calls are:
//!
//! - [`RemoteError`] is what a remote collaborator reports (a structured host
//!   fault or a transport failure).
//! - [`CallError`] is what a single call through a
//!   [`CallContext`](crate::context::CallContext) produces: the remote error,
//!   or cancellation/timeout imposed by the caller.
//! - [`OffloadError`] is what the reconciler and datacenter resolver return,
//!   always enriched with the host (and datastore, where relevant).

use std::time::Duration;
use thiserror::Error;

use crate::remote::HostFault;

/// Failure reported by a remote collaborator
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// Structured fault raised by the host
    #[error("host fault: {0}")]
    Fault(HostFault),

    /// Transport or session failure
    #[error("transport error: {0}")]
    Transport(String),
}

/// Outcome of a single remote call that did not succeed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CallError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// The caller's cancellation token fired while the call was in flight
    #[error("operation was cancelled")]
    Cancelled,

    /// The call exceeded the per-call timeout
    #[error("operation timed out after {0:?}")]
    TimedOut(Duration),
}

impl CallError {
    /// True when the call was aborted by the caller rather than failing remotely
    pub fn is_cancelled(&self) -> bool {
        matches!(self, CallError::Cancelled)
    }
}

/// Errors returned by agent reconciliation and datacenter resolution
#[derive(Debug, Error)]
pub enum OffloadError {
    /// Querying the installed agent version failed for a reason other than
    /// the agent being absent
    #[error("failed to get the agent version from host {host}: {source}")]
    VersionQuery {
        host: String,
        #[source]
        source: CallError,
    },

    /// Fetching a parent reference while walking the inventory failed
    #[error("failed to retrieve parent of {entity} for host {host}: {source}")]
    Hierarchy {
        host: String,
        entity: String,
        #[source]
        source: CallError,
    },

    /// The datacenter handle for a reached datacenter could not be resolved
    #[error("failed to resolve datacenter {entity} for host {host}: {source}")]
    DatacenterLookup {
        host: String,
        entity: String,
        #[source]
        source: CallError,
    },

    /// The parent chain ended without reaching a datacenter
    #[error("could not determine datacenter for host '{host}'")]
    DatacenterNotFound { host: String },

    /// The parent chain did not reach a datacenter within the hop budget
    #[error("datacenter for host '{host}' not reached within {max_hops} hops")]
    HierarchyTooDeep { host: String, max_hops: usize },

    /// Staging the agent package on the datastore failed
    #[error("failed to upload the agent package to {path} for host {host}: {source}")]
    Upload {
        host: String,
        datastore: String,
        path: String,
        #[source]
        source: CallError,
    },

    /// The install command failed on the host
    #[error("failed to install the agent package {path} on host {host}: {source}")]
    Install {
        host: String,
        path: String,
        #[source]
        source: CallError,
    },
}

impl OffloadError {
    /// Host the failing operation was running against
    pub fn host(&self) -> &str {
        match self {
            OffloadError::VersionQuery { host, .. }
            | OffloadError::Hierarchy { host, .. }
            | OffloadError::DatacenterLookup { host, .. }
            | OffloadError::DatacenterNotFound { host }
            | OffloadError::HierarchyTooDeep { host, .. }
            | OffloadError::Upload { host, .. }
            | OffloadError::Install { host, .. } => host,
        }
    }

    /// The underlying call error, for variants wrapping a remote call
    pub fn call_error(&self) -> Option<&CallError> {
        match self {
            OffloadError::VersionQuery { source, .. }
            | OffloadError::Hierarchy { source, .. }
            | OffloadError::DatacenterLookup { source, .. }
            | OffloadError::Upload { source, .. }
            | OffloadError::Install { source, .. } => Some(source),
            OffloadError::DatacenterNotFound { .. } | OffloadError::HierarchyTooDeep { .. } => {
                None
            }
        }
    }

    /// True when the operation stopped because the caller cancelled it
    pub fn is_cancelled(&self) -> bool {
        self.call_error().is_some_and(CallError::is_cancelled)
    }
}

/// Result type for offload operations
pub type OffloadResult<T> = Result<T, OffloadError>;

/// Configuration loading errors
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable was set but could not be parsed
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },

    /// The assembled configuration violates a constraint
    #[error("configuration error: {0}")]
    Invalid(String),
}
