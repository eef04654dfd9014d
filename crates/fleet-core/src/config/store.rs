//! Config store for locating and loading fleet.toml.

use std::path::{Path, PathBuf};

use super::{FleetConfig, hosts, parser};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "FLEET_CONF";

#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_path: PathBuf,
}

impl ConfigStore {
    /// Locate the config file from `FLEET_CONF` or the user config directory.
    pub fn from_env() -> anyhow::Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
            return Ok(Self::from_path(PathBuf::from(path)));
        }
        let global_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("fleet");
        Ok(Self::from_path(global_dir.join("fleet.toml")))
    }

    pub fn from_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Load the config, merging host files into the inline host lists.
    ///
    /// A missing config file yields defaults.
    pub fn load(&self) -> anyhow::Result<FleetConfig> {
        if !self.config_path.exists() {
            tracing::debug!(path = %self.config_path.display(), "config file not found, using defaults");
            return Ok(FleetConfig::new());
        }
        let mut config = parser::parse_fleet_toml(&self.config_path)?;
        let base = self.config_path.parent().unwrap_or_else(|| Path::new("."));

        if let Some(file) = config.cluster.masters_file.clone() {
            let listed = hosts::parse_host_file(&base.join(file))?;
            merge_hosts(&mut config.cluster.masters, listed);
        }
        if let Some(file) = config.cluster.workers_file.clone() {
            let listed = hosts::parse_host_file(&base.join(file))?;
            merge_hosts(&mut config.cluster.workers, listed);
        }
        Ok(config)
    }
}

fn merge_hosts(hosts: &mut Vec<String>, listed: Vec<String>) {
    for host in listed {
        if !hosts.contains(&host) {
            hosts.push(host);
        }
    }
}
