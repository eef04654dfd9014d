//! Shared core types used across the process, command and deploy layers.

use serde::{Deserialize, Serialize};

/// Which membership list a process draws its hosts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HostRole {
    /// Hosts listed as masters.
    Masters,
    /// Hosts listed as workers.
    Workers,
    /// Masters followed by workers.
    All,
}

impl HostRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostRole::Masters => "masters",
            HostRole::Workers => "workers",
            HostRole::All => "all",
        }
    }
}

/// Structural kind of a registered process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProcessKind {
    /// A single controllable daemon.
    Leaf,
    /// A named group over a fixed list of child processes.
    Composite,
}

/// Logical target of a start or stop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scope {
    /// Every host the membership source lists for the process role.
    All,
    /// The current host only.
    Local,
    /// An explicit set of host identifiers.
    Hosts(Vec<String>),
}

impl Scope {
    /// Parse the scope names accepted on the command line.
    pub fn parse(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Scope::All),
            "local" => Ok(Scope::Local),
            _ => anyhow::bail!("Invalid scope: {}. Use 'all' or 'local'", s),
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::All => write!(f, "all"),
            Scope::Local => write!(f, "local"),
            Scope::Hosts(hosts) => write!(f, "hosts[{}]", hosts.join(",")),
        }
    }
}
