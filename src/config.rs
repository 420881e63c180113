// Copyright (c) 2025 - Cowboy AI, Inc.
//! Copy-offload configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::ConfigError;
use crate::inventory::DEFAULT_MAX_HOPS;
use crate::remote::DEFAULT_VOLUMES_ROOT;

/// Name of the host agent package
pub const DEFAULT_AGENT_NAME: &str = "vmkfstools-wrapper";

/// Where the agent package is shipped inside the populator image
pub const DEFAULT_AGENT_PATH: &str = "/bin/vmkfstools-wrapper.vib";

/// Configuration for agent reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffloadConfig {
    /// Package name queried and installed on the host
    #[serde(default = "default_agent_name")]
    pub agent_name: String,

    /// Local path of the package file to upload
    #[serde(default = "default_agent_path")]
    pub agent_path: PathBuf,

    /// Mount root of datastores on the host
    #[serde(default = "default_volumes_root")]
    pub volumes_root: String,

    /// Parent fetches allowed when resolving a host's datacenter
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,

    /// Per remote call timeout in seconds; `None` or `0` leaves calls unbounded
    #[serde(default = "default_call_timeout_secs")]
    pub call_timeout_secs: Option<u64>,
}

fn default_agent_name() -> String {
    DEFAULT_AGENT_NAME.to_string()
}

fn default_agent_path() -> PathBuf {
    PathBuf::from(DEFAULT_AGENT_PATH)
}

fn default_volumes_root() -> String {
    DEFAULT_VOLUMES_ROOT.to_string()
}

fn default_max_hops() -> usize {
    DEFAULT_MAX_HOPS
}

fn default_call_timeout_secs() -> Option<u64> {
    Some(300)
}

impl Default for OffloadConfig {
    fn default() -> Self {
        Self {
            agent_name: default_agent_name(),
            agent_path: default_agent_path(),
            volumes_root: default_volumes_root(),
            max_hops: default_max_hops(),
            call_timeout_secs: default_call_timeout_secs(),
        }
    }
}

impl OffloadConfig {
    /// Load configuration from environment variables
    ///
    /// Unset variables keep their defaults. `OFFLOAD_CALL_TIMEOUT_SECS=0`
    /// disables the per-call timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("OFFLOAD_AGENT_NAME") {
            config.agent_name = name;
        }
        if let Some(path) = lookup("OFFLOAD_AGENT_PATH") {
            config.agent_path = PathBuf::from(path);
        }
        if let Some(root) = lookup("OFFLOAD_VOLUMES_ROOT") {
            config.volumes_root = root;
        }
        if let Some(hops) = lookup("OFFLOAD_MAX_HOPS") {
            config.max_hops = parse_var("OFFLOAD_MAX_HOPS", &hops)?;
        }
        if let Some(secs) = lookup("OFFLOAD_CALL_TIMEOUT_SECS") {
            let secs: u64 = parse_var("OFFLOAD_CALL_TIMEOUT_SECS", &secs)?;
            config.call_timeout_secs = (secs > 0).then_some(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.agent_name.trim().is_empty() {
            return Err(ConfigError::Invalid("agent name cannot be empty".to_string()));
        }
        if self.agent_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("agent path cannot be empty".to_string()));
        }
        if self.volumes_root.trim().is_empty() {
            return Err(ConfigError::Invalid("volumes root cannot be empty".to_string()));
        }
        if self.max_hops == 0 {
            return Err(ConfigError::Invalid("max_hops must be at least 1".to_string()));
        }
        Ok(())
    }

    /// File name the package is staged under on the datastore
    pub fn package_file_name(&self) -> String {
        format!("{}.vib", self.agent_name)
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

fn parse_var<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        value: value.to_string(),
    })
}
