//! Cluster membership: which hosts play which role.

use crate::types::HostRole;

/// Read-only source of host identifiers per role.
pub trait MembershipSource: Send + Sync {
    /// Hosts for the role, in configured order.
    fn list_hosts(&self, role: HostRole) -> Vec<String>;
}

/// In-memory membership lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticMembership {
    masters: Vec<String>,
    workers: Vec<String>,
}

impl StaticMembership {
    pub fn new(masters: Vec<String>, workers: Vec<String>) -> Self {
        Self { masters, workers }
    }
}

impl MembershipSource for StaticMembership {
    fn list_hosts(&self, role: HostRole) -> Vec<String> {
        match role {
            HostRole::Masters => self.masters.clone(),
            HostRole::Workers => self.workers.clone(),
            HostRole::All => {
                let mut hosts = self.masters.clone();
                for worker in &self.workers {
                    if !hosts.contains(worker) {
                        hosts.push(worker.clone());
                    }
                }
                hosts
            }
        }
    }
}
