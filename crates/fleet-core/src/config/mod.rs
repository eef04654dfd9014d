//! Configuration: fleet.toml, host files and key/value lookup.

pub mod hosts;
pub mod parser;
pub mod schema;
pub mod store;

use std::collections::HashMap;

pub use hosts::{parse_host_file, parse_host_list};
pub use parser::{parse_fleet_toml, parse_fleet_toml_str, to_toml};
pub use schema::{ClusterConfig, FleetConfig, LauncherConfig};
pub use store::{CONFIG_ENV_VAR, ConfigStore};

/// Read-only key/value lookup used when deriving process environments.
pub trait ConfigProvider: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

/// `[env]` entries first, then the process environment.
impl ConfigProvider for FleetConfig {
    fn get(&self, key: &str) -> Option<String> {
        self.env
            .get(key)
            .cloned()
            .or_else(|| std::env::var(key).ok())
    }
}

impl ConfigProvider for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}
