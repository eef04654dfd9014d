//! Per-host outcomes and their aggregation.

use crate::error::{FleetError, RemoteExecutionError};

/// Result of running a command on one host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub host: String,
    /// Exit status, when the command ran to completion.
    pub exit_status: Option<i32>,
    pub error: Option<RemoteExecutionError>,
}

impl ExecutionOutcome {
    /// Outcome for a command that ran and exited with `status`.
    ///
    /// A non-zero status records an error.
    pub fn exited(host: impl Into<String>, status: i32) -> Self {
        let host = host.into();
        let error = (status != 0)
            .then(|| RemoteExecutionError::new(host.clone(), format!("exit status {}", status)));
        Self {
            host,
            exit_status: Some(status),
            error,
        }
    }

    /// Outcome for a command that could not be attempted or did not finish.
    pub fn failed(host: impl Into<String>, reason: impl Into<String>) -> Self {
        let host = host.into();
        Self {
            error: Some(RemoteExecutionError::new(host.clone(), reason)),
            host,
            exit_status: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Verdict over an ordered sequence of outcomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateResult {
    pub command: String,
    pub outcomes: Vec<ExecutionOutcome>,
}

impl AggregateResult {
    pub fn new(command: impl Into<String>, outcomes: Vec<ExecutionOutcome>) -> Self {
        Self {
            command: command.into(),
            outcomes,
        }
    }

    pub fn success(&self) -> bool {
        self.outcomes.iter().all(ExecutionOutcome::is_success)
    }

    /// Hosts whose outcome carries an error, in outcome order.
    pub fn failing_hosts(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !o.is_success())
            .map(|o| o.host.as_str())
            .collect()
    }

    /// `Ok` on full success, otherwise a [`FleetError::Dispatch`] naming every failing host.
    pub fn into_result(self) -> Result<Vec<ExecutionOutcome>, FleetError> {
        let failures: Vec<RemoteExecutionError> = self
            .outcomes
            .iter()
            .filter_map(|o| o.error.clone())
            .collect();
        if failures.is_empty() {
            return Ok(self.outcomes);
        }
        Err(FleetError::Dispatch {
            command: self.command,
            failures,
        })
    }
}
