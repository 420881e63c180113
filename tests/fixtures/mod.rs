// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for migration-plane
//!
//! Provides a scripted in-memory stand-in for the source platform: it answers
//! agent queries and installs, accepts uploads, and serves a parent chain for
//! the inventory walk. Every call is recorded so tests can assert exactly
//! which remote operations ran.
//!
//! # Design Principles
//! - Deterministic: no clocks, no randomness
//! - Failures are injected per boundary, never by accident
//! - Installing changes the reported version, so repeated reconciles converge

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use migration_plane::inventory::{Datacenter, EntityRef, HostRef, InventoryClient};
use migration_plane::remote::{CommandRow, DatastoreUploader, HostCommandRunner, HostFault};
use migration_plane::RemoteError;

pub const HOST_NAME: &str = "esx01.lab.example.com";
pub const HOST_ID: &str = "host-42";
pub const DATACENTER_ID: &str = "datacenter-3";
pub const DATACENTER_NAME: &str = "dc-east";
pub const DATASTORE: &str = "ds-fast";
pub const AGENT_NAME: &str = "vmkfstools-wrapper";

/// Route crate logs to the test output; safe to call from every test
pub fn init_tracing() {
    migration_plane::telemetry::init_test_tracing(tracing::Level::DEBUG);
}

/// The host every fixture reconciles
pub fn host() -> HostRef {
    HostRef::new(HOST_NAME, HOST_ID)
}

/// Parent chain above the host: cluster → folder → datacenter
pub fn default_chain() -> Vec<EntityRef> {
    vec![
        EntityRef::new("ClusterComputeResource", "domain-c7"),
        EntityRef::new("Folder", "group-h4"),
        EntityRef::new("Datacenter", DATACENTER_ID),
    ]
}

/// Fault the host raises when the agent package is absent
pub fn not_installed_fault() -> RemoteError {
    RemoteError::Fault(HostFault::new([format!(
        "[NoMatchError] No VIB matching VIB search specification '{}'.",
        AGENT_NAME
    )]))
}

/// A remote call observed by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Command(Vec<String>),
    ParentOf(EntityRef),
    Datacenter(EntityRef),
    Upload {
        datacenter: String,
        datastore: String,
        local_path: PathBuf,
        file_name: String,
    },
}

impl RecordedCall {
    pub fn is_upload(&self) -> bool {
        matches!(self, RecordedCall::Upload { .. })
    }

    pub fn is_install(&self) -> bool {
        matches!(self, RecordedCall::Command(args) if args.get(2).map(String::as_str) == Some("install"))
    }

    pub fn is_parent_lookup(&self) -> bool {
        matches!(self, RecordedCall::ParentOf(_))
    }
}

/// Scripted source platform
pub struct FakeVsphere {
    installed: Mutex<Option<String>>,
    package_version: String,
    query_failure: Option<RemoteError>,
    query_rows: Option<Vec<CommandRow>>,
    upload_failure: Option<RemoteError>,
    install_failure: Option<RemoteError>,
    install_failure_once: Mutex<Option<RemoteError>>,
    hang_upload: bool,
    parents: HashMap<EntityRef, Option<EntityRef>>,
    parent_failures: HashMap<EntityRef, RemoteError>,
    datacenter_failure: Option<RemoteError>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeVsphere {
    /// Host without the agent, under the default chain, shipping `package_version`
    pub fn new(package_version: &str) -> Self {
        let fake = Self {
            installed: Mutex::new(None),
            package_version: package_version.to_string(),
            query_failure: None,
            query_rows: None,
            upload_failure: None,
            install_failure: None,
            install_failure_once: Mutex::new(None),
            hang_upload: false,
            parents: HashMap::new(),
            parent_failures: HashMap::new(),
            datacenter_failure: None,
            calls: Mutex::new(Vec::new()),
        };
        fake.with_chain(default_chain())
    }

    pub fn with_installed(self, version: &str) -> Self {
        *self.installed.lock().unwrap() = Some(version.to_string());
        self
    }

    /// Replace the parent chain; the last element has no parent
    pub fn with_chain(mut self, chain: Vec<EntityRef>) -> Self {
        self.parents.clear();
        let mut child = host().reference;
        for entity in chain {
            self.parents.insert(child, Some(entity.clone()));
            child = entity;
        }
        self.parents.insert(child, None);
        self
    }

    /// Raw parent links, for malformed trees such as cycles
    pub fn with_parent_link(mut self, child: EntityRef, parent: Option<EntityRef>) -> Self {
        self.parents.insert(child, parent);
        self
    }

    pub fn failing_query(mut self, err: RemoteError) -> Self {
        self.query_failure = Some(err);
        self
    }

    /// Answer version queries with `rows` until an install lands
    pub fn with_query_rows(mut self, rows: Vec<CommandRow>) -> Self {
        self.query_rows = Some(rows);
        self
    }

    pub fn failing_upload(mut self, err: RemoteError) -> Self {
        self.upload_failure = Some(err);
        self
    }

    pub fn failing_install(mut self, err: RemoteError) -> Self {
        self.install_failure = Some(err);
        self
    }

    /// Only the next install fails
    pub fn failing_install_once(self, err: RemoteError) -> Self {
        *self.install_failure_once.lock().unwrap() = Some(err);
        self
    }

    pub fn failing_parent_of(mut self, entity: EntityRef, err: RemoteError) -> Self {
        self.parent_failures.insert(entity, err);
        self
    }

    pub fn failing_datacenter(mut self, err: RemoteError) -> Self {
        self.datacenter_failure = Some(err);
        self
    }

    /// Uploads never complete
    pub fn hanging_upload(mut self) -> Self {
        self.hang_upload = true;
        self
    }

    pub fn installed(&self) -> Option<String> {
        self.installed.lock().unwrap().clone()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&RecordedCall) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl HostCommandRunner for FakeVsphere {
    async fn run_esx_command(
        &self,
        _host: &HostRef,
        args: &[String],
    ) -> Result<Vec<CommandRow>, RemoteError> {
        self.record(RecordedCall::Command(args.to_vec()));

        match args.get(2).map(String::as_str) {
            Some("get") => {
                if let Some(err) = &self.query_failure {
                    return Err(err.clone());
                }
                if let (None, Some(rows)) = (self.installed(), &self.query_rows) {
                    return Ok(rows.clone());
                }
                match self.installed() {
                    Some(version) => Ok(vec![CommandRow::new()
                        .with("Name", AGENT_NAME)
                        .with("Version", version)]),
                    None => Err(not_installed_fault()),
                }
            }
            Some("install") => {
                if let Some(err) = &self.install_failure {
                    return Err(err.clone());
                }
                if let Some(err) = self.install_failure_once.lock().unwrap().take() {
                    return Err(err);
                }
                *self.installed.lock().unwrap() = Some(self.package_version.clone());
                Ok(vec![CommandRow::new().with("Message", "Operation finished successfully.")])
            }
            _ => Err(RemoteError::Transport(format!("unexpected command {:?}", args))),
        }
    }
}

#[async_trait]
impl DatastoreUploader for FakeVsphere {
    async fn upload_file(
        &self,
        datacenter: &Datacenter,
        datastore: &str,
        local_path: &Path,
        file_name: &str,
    ) -> Result<(), RemoteError> {
        self.record(RecordedCall::Upload {
            datacenter: datacenter.name.clone(),
            datastore: datastore.to_string(),
            local_path: local_path.to_path_buf(),
            file_name: file_name.to_string(),
        });

        if self.hang_upload {
            std::future::pending::<()>().await;
        }
        match &self.upload_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl InventoryClient for FakeVsphere {
    async fn parent_of(&self, entity: &EntityRef) -> Result<Option<EntityRef>, RemoteError> {
        self.record(RecordedCall::ParentOf(entity.clone()));

        if let Some(err) = self.parent_failures.get(entity) {
            return Err(err.clone());
        }
        self.parents
            .get(entity)
            .cloned()
            .ok_or_else(|| RemoteError::Transport(format!("managed object {} not found", entity)))
    }

    async fn datacenter(&self, entity: &EntityRef) -> Result<Datacenter, RemoteError> {
        self.record(RecordedCall::Datacenter(entity.clone()));

        if let Some(err) = &self.datacenter_failure {
            return Err(err.clone());
        }
        Ok(Datacenter {
            reference: entity.clone(),
            name: DATACENTER_NAME.to_string(),
        })
    }
}
