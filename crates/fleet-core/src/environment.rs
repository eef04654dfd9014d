//! Environment snapshot handed to the transport for every host.

use std::collections::BTreeMap;

/// Environment variables applied to dispatched commands.
///
/// Ordered by name so rendered assignments are stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecEnv {
    vars: BTreeMap<String, String>,
}

impl ExecEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(|v| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
