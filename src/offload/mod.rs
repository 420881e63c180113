// Copyright (c) 2025 - Cowboy AI, Inc.
//! Storage Copy-Offload Preparation
//!
//! Hardware-accelerated copy-offload needs a small agent package installed on
//! the source host. [`AgentReconciler::ensure`] converges the host onto a
//! desired agent version before an offloaded copy starts:
//!
//! ```text
//! query version ──equal──▶ done (no-op)
//!      │
//!   differs / not installed
//!      ↓
//! resolve datacenter → upload package → install package → done
//! ```
//!
//! Upload and install are not transactional. A failure between them leaves
//! the package staged on the datastore; calling `ensure` again re-uploads and
//! re-installs. Callers that may reconcile the same host concurrently must
//! serialize those calls themselves.

pub mod agent;

pub use agent::{AgentReconciler, AgentVersion, ReconcileOutcome};
