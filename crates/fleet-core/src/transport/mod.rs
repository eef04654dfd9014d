//! Host transports: how a built command reaches a host.
//!
//! The dispatcher treats every transport call as a blocking unit of work and
//! never looks at how the command gets there. Timeouts, if any, are the
//! transport's business.

mod local;
mod ssh;

pub use local::LocalShellTransport;
pub use ssh::{SshTransport, shell_quote};

use crate::environment::ExecEnv;

/// Runs a shell command on a host and reports its exit status.
pub trait ExecutionTransport: Send + Sync {
    /// Run `command` on `host` with `env` applied.
    ///
    /// `Ok` carries the exit status of a command that ran; `Err` means the
    /// command could not be attempted or did not finish normally.
    fn run_on_host(&self, host: &str, command: &str, env: &ExecEnv) -> anyhow::Result<i32>;
}

/// Transport names accepted in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    Local,
    Ssh,
}

impl TransportKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "local" => Some(TransportKind::Local),
            "ssh" => Some(TransportKind::Ssh),
            _ => None,
        }
    }
}

pub(crate) fn exit_code(status: std::process::ExitStatus) -> anyhow::Result<i32> {
    status
        .code()
        .ok_or_else(|| anyhow::anyhow!("command terminated by signal"))
}
