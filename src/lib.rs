//! Migration control plane core
//!
//! Two pieces of the VM-migration control plane that need to be exactly right:
//!
//! - [`offload`]: converge a source host's copy-offload agent onto a desired
//!   version before an offloaded storage copy, resolving the host's datacenter
//!   through [`inventory`] to stage the package.
//! - [`network`]: resolve a VM's interface references against a network map
//!   and flag duplicate pod and multus destinations before a plan is admitted.
//!
//! Remote collaborators (command execution, uploads, inventory reads) are
//! traits in [`remote`] and [`inventory`]; every remote call runs through a
//! [`CallContext`] carrying cancellation, timeout and the logging span.

pub mod config;
pub mod context;
pub mod errors;
pub mod inventory;
pub mod network;
pub mod offload;
pub mod remote;
pub mod telemetry;

// Re-export commonly used types
pub use config::OffloadConfig;
pub use context::CallContext;
pub use errors::{CallError, ConfigError, OffloadError, OffloadResult, RemoteError};
pub use inventory::{Datacenter, DatacenterResolver, EntityRef, HostRef, InventoryClient};
pub use network::{
    find_mapping_for_nic_ref, validate_network_duplicates, DuplicateReport, NetworkMap, NetworkRef,
};
pub use offload::{AgentReconciler, AgentVersion, ReconcileOutcome};
pub use remote::{CommandRow, DatastoreUploader, FaultKind, HostCommandRunner, HostFault};
