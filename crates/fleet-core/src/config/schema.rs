//! Configuration schema for fleet.toml

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::cluster::StaticMembership;
use crate::transport::TransportKind;

/// Root configuration structure for fleet.toml
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct FleetConfig {
    /// Cluster membership
    #[serde(default)]
    pub cluster: ClusterConfig,

    /// How commands are launched on each host
    #[serde(default)]
    pub launcher: LauncherConfig,

    /// Values looked up by processes when deriving their environment
    #[serde(default)]
    pub env: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ClusterConfig {
    #[serde(default)]
    pub masters: Vec<String>,

    #[serde(default)]
    pub workers: Vec<String>,

    /// Host file with one master per line, relative to the config file
    #[serde(default)]
    pub masters_file: Option<PathBuf>,

    /// Host file with one worker per line, relative to the config file
    #[serde(default)]
    pub workers_file: Option<PathBuf>,

    /// Identifier of this machine; defaults to the OS hostname
    #[serde(default)]
    pub local_host: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LauncherConfig {
    /// Launcher executable run on every host
    #[serde(default = "default_launcher_path")]
    pub path: String,

    /// "ssh" or "local"
    #[serde(default = "default_transport")]
    pub transport: String,

    #[serde(default = "default_ssh_options")]
    pub ssh_options: Vec<String>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            path: default_launcher_path(),
            transport: default_transport(),
            ssh_options: default_ssh_options(),
        }
    }
}

fn default_launcher_path() -> String {
    "bin/fleet".to_string()
}

fn default_transport() -> String {
    "ssh".to_string()
}

fn default_ssh_options() -> Vec<String> {
    vec!["-o".to_string(), "StrictHostKeyChecking=no".to_string()]
}

impl FleetConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for host in self.cluster.masters.iter().chain(&self.cluster.workers) {
            validate_host(host)?;
        }
        if let Some(local) = &self.cluster.local_host {
            validate_host(local)?;
        }
        if self.launcher.path.trim().is_empty() {
            anyhow::bail!("launcher.path must not be empty");
        }
        self.transport_kind()?;
        Ok(())
    }

    pub fn transport_kind(&self) -> anyhow::Result<TransportKind> {
        TransportKind::parse(&self.launcher.transport).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid launcher.transport '{}': must be 'ssh' or 'local'",
                self.launcher.transport
            )
        })
    }

    pub fn membership(&self) -> StaticMembership {
        StaticMembership::new(self.cluster.masters.clone(), self.cluster.workers.clone())
    }

    /// Canonical service invocation prefixed to every command.
    pub fn service_invocation(&self) -> String {
        format!("{} process", self.launcher.path.trim())
    }

    /// Configured local host, else the OS hostname, else `localhost`.
    pub fn local_host(&self) -> String {
        if let Some(host) = &self.cluster.local_host {
            return host.clone();
        }
        hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "localhost".to_string())
    }
}

pub(crate) fn validate_host(host: &str) -> anyhow::Result<()> {
    if host.trim().is_empty() {
        anyhow::bail!("Host names must not be empty");
    }
    if host.chars().any(char::is_whitespace) {
        anyhow::bail!("Invalid host name '{}': must not contain whitespace", host);
    }
    Ok(())
}
