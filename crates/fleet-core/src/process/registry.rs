//! Process registry for looking up controllable processes by name.
//!
//! Built once at startup and read-only afterwards; frontends pass it to
//! whatever needs to resolve a process name.

use super::{Process, ProcessDescriptor, catalog};
use crate::error::{FleetError, Result};

#[derive(Debug, Clone)]
pub struct ProcessRegistry {
    processes: Vec<Process>,
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        Self::with_default_processes()
    }
}

impl ProcessRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            processes: Vec::new(),
        }
    }

    /// Create a registry with all built-in processes.
    pub fn with_default_processes() -> Self {
        Self {
            processes: catalog::default_processes(),
        }
    }

    /// Register a process. Names must be unique.
    pub fn register(&mut self, process: Process) -> Result<()> {
        if self.get(process.name()).is_some() {
            return Err(FleetError::Configuration(format!(
                "process '{}' is already registered",
                process.name()
            )));
        }
        self.processes.push(process);
        Ok(())
    }

    pub fn all(&self) -> &[Process] {
        &self.processes
    }

    pub fn get(&self, name: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.name() == name)
    }

    /// Like [`get`](Self::get), but unknown names are an error.
    pub fn lookup(&self, name: &str) -> Result<&Process> {
        self.get(name)
            .ok_or_else(|| FleetError::UnknownProcess(name.to_string()))
    }

    pub fn names(&self) -> Vec<&str> {
        self.processes.iter().map(|p| p.name()).collect()
    }

    pub fn descriptors(&self) -> Vec<ProcessDescriptor> {
        self.processes.iter().map(Process::descriptor).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HostRole, ProcessKind, Scope};

    #[test]
    fn test_default_processes_registered() {
        let registry = ProcessRegistry::with_default_processes();
        let names = registry.names();

        assert_eq!(
            names,
            vec![
                "master",
                "job_master",
                "worker",
                "job_worker",
                "proxy",
                "masters",
                "job_masters",
                "workers",
                "job_workers",
                "proxies",
                "local",
                "all",
            ]
        );
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = ProcessRegistry::with_default_processes();
        let err = registry.register(catalog::proxy()).unwrap_err();
        assert!(matches!(err, FleetError::Configuration(_)));
        assert_eq!(registry.names().len(), 12);
    }

    #[test]
    fn test_lookup_unknown() {
        let registry = ProcessRegistry::new();
        assert_eq!(
            registry.lookup("nope").unwrap_err(),
            FleetError::UnknownProcess("nope".into())
        );
    }

    #[test]
    fn test_descriptors_carry_role_and_default_scope() {
        let registry = ProcessRegistry::with_default_processes();
        let proxies = registry.get("proxies").unwrap().descriptor();
        assert_eq!(proxies.kind, ProcessKind::Composite);
        assert_eq!(proxies.role, HostRole::All);
        assert_eq!(proxies.default_scope, Scope::All);

        let worker = registry.get("worker").unwrap().descriptor();
        assert_eq!(worker.kind, ProcessKind::Leaf);
        assert_eq!(worker.role, HostRole::Workers);
        assert_eq!(worker.default_scope, Scope::Local);
    }

    #[test]
    fn test_descriptor_serializes_kebab_case() {
        let registry = ProcessRegistry::with_default_processes();
        let descriptor = registry.get("job_workers").unwrap().descriptor();

        let json = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(json["name"], "job_workers");
        assert_eq!(json["kind"], "composite");
        assert_eq!(json["role"], "workers");
        assert_eq!(json["default_scope"], "all");
    }
}
