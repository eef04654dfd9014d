use std::process::Command;

use anyhow::Context;

use super::{ExecutionTransport, exit_code};
use crate::environment::ExecEnv;

/// Runs commands through `sh -c` on this machine, whatever host is named.
#[derive(Debug, Clone)]
pub struct LocalShellTransport {
    shell: String,
}

impl Default for LocalShellTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalShellTransport {
    pub fn new() -> Self {
        Self {
            shell: "sh".to_string(),
        }
    }

    pub fn with_shell(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

impl ExecutionTransport for LocalShellTransport {
    fn run_on_host(&self, host: &str, command: &str, env: &ExecEnv) -> anyhow::Result<i32> {
        tracing::debug!(host, command, "running local command");
        let status = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .envs(env.iter())
            .status()
            .with_context(|| format!("Failed to spawn {} for '{}'", self.shell, command))?;
        exit_code(status)
    }
}
