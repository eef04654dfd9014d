//! Built-in process definitions.

use super::{CompositeProcess, LeafProcess, Process};
use crate::types::{HostRole, Scope};

pub const MASTER: &str = "master";
pub const JOB_MASTER: &str = "job_master";
pub const WORKER: &str = "worker";
pub const JOB_WORKER: &str = "job_worker";
pub const PROXY: &str = "proxy";

fn leaf(name: &str, role: HostRole, logger: &str) -> Process {
    LeafProcess::new(
        name,
        role,
        format!("FLEET_{}_JAVA_OPTS", name.to_uppercase()),
        vec![format!("-Dfleet.logger.type={}", logger)],
    )
    .into()
}

fn group(name: &str, role: HostRole, default_scope: Scope, children: Vec<Process>) -> Process {
    CompositeProcess::new(name, role, default_scope, children).into()
}

pub fn master() -> Process {
    leaf(MASTER, HostRole::Masters, "MASTER_LOGGER")
}

pub fn job_master() -> Process {
    leaf(JOB_MASTER, HostRole::Masters, "JOB_MASTER_LOGGER")
}

pub fn worker() -> Process {
    leaf(WORKER, HostRole::Workers, "WORKER_LOGGER")
}

pub fn job_worker() -> Process {
    leaf(JOB_WORKER, HostRole::Workers, "JOB_WORKER_LOGGER")
}

pub fn proxy() -> Process {
    leaf(PROXY, HostRole::All, "PROXY_LOGGER")
}

pub fn masters() -> Process {
    group("masters", HostRole::Masters, Scope::All, vec![master()])
}

pub fn job_masters() -> Process {
    group("job_masters", HostRole::Masters, Scope::All, vec![job_master()])
}

pub fn workers() -> Process {
    group("workers", HostRole::Workers, Scope::All, vec![worker()])
}

pub fn job_workers() -> Process {
    group("job_workers", HostRole::Workers, Scope::All, vec![job_worker()])
}

pub fn proxies() -> Process {
    group("proxies", HostRole::All, Scope::All, vec![proxy()])
}

/// Every daemon on this machine.
pub fn local() -> Process {
    group(
        "local",
        HostRole::All,
        Scope::Local,
        vec![master(), job_master(), worker(), job_worker(), proxy()],
    )
}

/// Every group across the fleet.
pub fn all() -> Process {
    group(
        "all",
        HostRole::All,
        Scope::All,
        vec![masters(), job_masters(), workers(), job_workers(), proxies()],
    )
}

/// All built-in processes in registration order.
pub fn default_processes() -> Vec<Process> {
    vec![
        master(),
        job_master(),
        worker(),
        job_worker(),
        proxy(),
        masters(),
        job_masters(),
        workers(),
        job_workers(),
        proxies(),
        local(),
        all(),
    ]
}
