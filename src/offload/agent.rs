// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host agent version reconciliation

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, info_span};
use uuid::Uuid;

use crate::config::OffloadConfig;
use crate::context::CallContext;
use crate::errors::{CallError, OffloadError, OffloadResult};
use crate::inventory::{DatacenterResolver, HostRef, InventoryClient};
use crate::remote::{datastore_path, DatastoreUploader, FaultKind, HostCommandRunner};

/// Field of the package query output carrying the installed version
const VERSION_FIELD: &str = "Version";

/// Agent version reported by a host; empty when the agent is not installed
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentVersion(String);

impl AgentVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    pub fn not_installed() -> Self {
        Self::default()
    }

    pub fn is_installed(&self) -> bool {
        !self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for AgentVersion {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for AgentVersion {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// What a successful [`AgentReconciler::ensure`] did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReconcileOutcome {
    /// The host already ran the desired version; nothing was touched
    AlreadyCurrent { version: AgentVersion },

    /// The package was uploaded and installed
    Installed {
        previous: AgentVersion,
        installed: AgentVersion,
        package_path: String,
    },
}

impl ReconcileOutcome {
    pub fn changed(&self) -> bool {
        matches!(self, ReconcileOutcome::Installed { .. })
    }
}

/// Converges a host's copy-offload agent onto a desired version
pub struct AgentReconciler<C: ?Sized> {
    client: Arc<C>,
    config: OffloadConfig,
    resolver: DatacenterResolver,
}

impl<C> AgentReconciler<C>
where
    C: HostCommandRunner + DatastoreUploader + InventoryClient + ?Sized,
{
    pub fn new(client: Arc<C>, config: OffloadConfig) -> Self {
        let resolver = DatacenterResolver::new(config.max_hops);
        Self {
            client,
            config,
            resolver,
        }
    }

    pub fn config(&self) -> &OffloadConfig {
        &self.config
    }

    /// Make sure `host` runs `desired_version` of the agent
    ///
    /// Returns without touching the host when the installed version already
    /// matches. Otherwise stages the package on `datastore` and installs it,
    /// overwriting whatever is installed. The resulting version is not
    /// re-queried.
    pub async fn ensure(
        &self,
        host: &HostRef,
        datastore: &str,
        desired_version: &str,
        ctx: &CallContext,
    ) -> OffloadResult<ReconcileOutcome> {
        let span = info_span!(
            parent: ctx.span(),
            "agent_reconcile",
            host = %host.name,
            datastore,
            desired_version,
            operation_id = %Uuid::now_v7()
        );
        let mut ctx = ctx.scoped(span);
        if ctx.call_timeout().is_none() {
            if let Some(timeout) = self.config.call_timeout() {
                ctx = ctx.with_call_timeout(timeout);
            }
        }

        info!(parent: ctx.span(), "ensuring agent version on host");

        let current = self.installed_version(host, &ctx).await?;
        info!(
            parent: ctx.span(),
            version = %current,
            installed = current.is_installed(),
            "current agent version on host"
        );

        if current == desired_version {
            return Ok(ReconcileOutcome::AlreadyCurrent { version: current });
        }

        let datacenter = self.resolver.resolve(self.client.as_ref(), host, &ctx).await?;

        let file_name = self.config.package_file_name();
        let package_path = datastore_path(&self.config.volumes_root, datastore, &file_name);
        ctx.call(self.client.upload_file(
            &datacenter,
            datastore,
            &self.config.agent_path,
            &file_name,
        ))
        .await
        .map_err(|source| OffloadError::Upload {
            host: host.name.clone(),
            datastore: datastore.to_string(),
            path: package_path.clone(),
            source,
        })?;
        info!(parent: ctx.span(), path = %package_path, "uploaded agent package");

        self.install_package(host, &package_path, &ctx).await?;
        info!(parent: ctx.span(), "installed agent package on host");

        Ok(ReconcileOutcome::Installed {
            previous: current,
            installed: AgentVersion::new(desired_version),
            package_path,
        })
    }

    /// Version of the agent currently installed on `host`
    ///
    /// A not-found fault means the agent is absent and yields an empty
    /// version. Any other failure is returned with the host attached.
    pub async fn installed_version(
        &self,
        host: &HostRef,
        ctx: &CallContext,
    ) -> OffloadResult<AgentVersion> {
        let args = command(["software", "vib", "get", "-n", self.config.agent_name.as_str()]);

        let rows = match ctx.call(self.client.run_esx_command(host, &args)).await {
            Ok(rows) => rows,
            Err(CallError::Remote(err)) if err.fault_kind() == Some(FaultKind::NotFound) => {
                debug!(parent: ctx.span(), "agent package not installed");
                return Ok(AgentVersion::not_installed());
            }
            Err(source) => {
                return Err(OffloadError::VersionQuery {
                    host: host.name.clone(),
                    source,
                })
            }
        };

        debug!(parent: ctx.span(), response = ?rows, "agent query result");
        Ok(rows
            .first()
            .and_then(|row| row.value(VERSION_FIELD))
            .map(AgentVersion::new)
            .unwrap_or_default())
    }

    async fn install_package(
        &self,
        host: &HostRef,
        package_path: &str,
        ctx: &CallContext,
    ) -> OffloadResult<()> {
        let args = command(["software", "vib", "install", "-f", "1", "-v", package_path]);

        let rows = ctx
            .call(self.client.run_esx_command(host, &args))
            .await
            .map_err(|source| OffloadError::Install {
                host: host.name.clone(),
                path: package_path.to_string(),
                source,
            })?;

        debug!(parent: ctx.span(), response = ?rows, "agent install result");
        Ok(())
    }
}

fn command<const N: usize>(args: [&str; N]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}
