//! Scope resolution: turn a logical target into concrete hosts.

use crate::cluster::MembershipSource;
use crate::error::{FleetError, Result};
use crate::types::{HostRole, Scope};

/// Ordered, deduplicated host identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSet {
    hosts: Vec<String>,
}

impl HostSet {
    pub fn new() -> Self {
        Self { hosts: Vec::new() }
    }

    pub fn single(host: impl Into<String>) -> Self {
        Self {
            hosts: vec![host.into()],
        }
    }

    /// Insert a host unless already present. Returns whether it was added.
    pub fn insert(&mut self, host: impl Into<String>) -> bool {
        let host = host.into();
        if self.hosts.contains(&host) {
            return false;
        }
        self.hosts.push(host);
        true
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.hosts.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.hosts
    }
}

impl<S: Into<String>> FromIterator<S> for HostSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = HostSet::new();
        for host in iter {
            set.insert(host);
        }
        set
    }
}

impl<'a> IntoIterator for &'a HostSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.hosts.iter()
    }
}

/// Resolves scopes against a membership source and the local host name.
pub struct HostScopeResolver<'a> {
    membership: &'a dyn MembershipSource,
    local_host: &'a str,
}

impl<'a> HostScopeResolver<'a> {
    pub fn new(membership: &'a dyn MembershipSource, local_host: &'a str) -> Self {
        Self {
            membership,
            local_host,
        }
    }

    pub fn resolve(&self, scope: &Scope, role: HostRole) -> Result<HostSet> {
        resolve_scope(scope, role, self.membership, self.local_host)
    }
}

/// Resolve a scope for a process role.
///
/// Explicit hosts are validated against the role's membership list and keep
/// the order they were given in.
pub fn resolve_scope(
    scope: &Scope,
    role: HostRole,
    membership: &dyn MembershipSource,
    local_host: &str,
) -> Result<HostSet> {
    match scope {
        Scope::Local => Ok(HostSet::single(local_host)),
        Scope::All => {
            let hosts: HostSet = membership.list_hosts(role).into_iter().collect();
            if hosts.is_empty() {
                return Err(FleetError::NoHostsConfigured {
                    role: role.as_str().to_string(),
                });
            }
            Ok(hosts)
        }
        Scope::Hosts(requested) => {
            let known = membership.list_hosts(role);
            let mut hosts = HostSet::new();
            for host in requested {
                if !known.iter().any(|k| k == host) {
                    return Err(FleetError::UnknownHost {
                        host: host.clone(),
                        role: role.as_str().to_string(),
                    });
                }
                hosts.insert(host.as_str());
            }
            if hosts.is_empty() {
                return Err(FleetError::Configuration(
                    "explicit host list must not be empty".to_string(),
                ));
            }
            Ok(hosts)
        }
    }
}
