use std::process::Command;

use anyhow::Context;

use super::{ExecutionTransport, exit_code};
use crate::environment::ExecEnv;

/// Runs commands on remote hosts through the `ssh` client.
#[derive(Debug, Clone)]
pub struct SshTransport {
    program: String,
    options: Vec<String>,
}

impl Default for SshTransport {
    fn default() -> Self {
        Self::new(vec![
            "-o".to_string(),
            "StrictHostKeyChecking=no".to_string(),
        ])
    }
}

impl SshTransport {
    pub fn new(options: Vec<String>) -> Self {
        Self {
            program: "ssh".to_string(),
            options,
        }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Command line executed by the remote shell: env assignments, then the command.
    pub fn remote_command(command: &str, env: &ExecEnv) -> String {
        let mut parts: Vec<String> = env
            .iter()
            .map(|(key, value)| format!("{}={}", key, shell_quote(value)))
            .collect();
        parts.push(command.to_string());
        parts.join(" ")
    }
}

impl ExecutionTransport for SshTransport {
    fn run_on_host(&self, host: &str, command: &str, env: &ExecEnv) -> anyhow::Result<i32> {
        let remote = Self::remote_command(command, env);
        tracing::debug!(host, command = %remote, "running remote command");
        let status = Command::new(&self.program)
            .args(&self.options)
            .arg(host)
            .arg(&remote)
            .status()
            .with_context(|| format!("Failed to reach {} via {}", host, self.program))?;
        exit_code(status)
    }
}

/// Quote a value for a POSIX shell using single quotes.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}
