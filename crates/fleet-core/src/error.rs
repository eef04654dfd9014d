//! Error types for process lifecycle operations.
//!
//! Resolution and build errors abort an invocation before anything is
//! dispatched. Per-host failures are carried as [`RemoteExecutionError`]
//! values and only surface once outcomes are aggregated.

use thiserror::Error;

/// A single host's command failed or the host could not be reached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{host}: {reason}")]
pub struct RemoteExecutionError {
    pub host: String,
    pub reason: String,
}

impl RemoteExecutionError {
    pub fn new(host: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            reason: reason.into(),
        }
    }
}

/// Errors returned by process start/stop operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetError {
    /// Bad or unknown flag, or a missing required setting.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An explicit scope named a host the membership source does not list.
    #[error("Unknown host '{host}' for role {role}")]
    UnknownHost { host: String, role: String },

    /// Scope `all` resolved against an empty membership list.
    #[error("No hosts configured for role {role}")]
    NoHostsConfigured { role: String },

    /// A single host failed.
    #[error("Remote execution failed on {0}")]
    RemoteExecution(RemoteExecutionError),

    /// One or more hosts failed while running a command.
    #[error("Command '{command}' failed on {} host(s): {}", failures.len(), format_failures(failures))]
    Dispatch {
        command: String,
        failures: Vec<RemoteExecutionError>,
    },

    /// One or more children of a composite process failed.
    #[error("Process '{process}' failed in {} child process(es): {}", failures.len(), format_children(failures))]
    Composite {
        process: String,
        failures: Vec<(String, FleetError)>,
    },

    /// No process registered under the requested name.
    #[error("Unknown process '{0}'")]
    UnknownProcess(String),
}

impl FleetError {
    /// Every host named by this error, including those nested in composite failures.
    pub fn failing_hosts(&self) -> Vec<String> {
        match self {
            FleetError::RemoteExecution(err) => vec![err.host.clone()],
            FleetError::Dispatch { failures, .. } => {
                failures.iter().map(|f| f.host.clone()).collect()
            }
            FleetError::Composite { failures, .. } => failures
                .iter()
                .flat_map(|(_, err)| err.failing_hosts())
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn format_failures(failures: &[RemoteExecutionError]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_children(failures: &[(String, FleetError)]) -> String {
    failures
        .iter()
        .map(|(child, err)| format!("[{}] {}", child, err))
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Result<T> = std::result::Result<T, FleetError>;
