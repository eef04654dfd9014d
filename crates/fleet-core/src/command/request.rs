//! Start and stop request values built by the CLI layer.

use std::collections::HashMap;

use super::flags::{FlagSpec, START_FLAGS, STOP_FLAGS};
use crate::types::Scope;

/// Which lifecycle transition a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Start,
    Stop,
}

impl Lifecycle {
    /// Subcommand token used on the command line.
    pub fn subcommand(&self) -> &'static str {
        match self {
            Lifecycle::Start => "start",
            Lifecycle::Stop => "stop",
        }
    }

    pub fn declared_flags(&self) -> &'static [FlagSpec] {
        match self {
            Lifecycle::Start => START_FLAGS,
            Lifecycle::Stop => STOP_FLAGS,
        }
    }
}

/// Shared view over [`StartRequest`] and [`StopRequest`].
pub trait LifecycleRequest {
    fn lifecycle(&self) -> Lifecycle;

    /// Name of the invoking command.
    fn command_name(&self) -> &str;

    fn flags(&self) -> &HashMap<String, String>;

    fn scope(&self) -> &Scope;
}

/// Request to start a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRequest {
    name: String,
    flags: HashMap<String, String>,
    scope: Scope,
}

impl StartRequest {
    pub fn new(scope: Scope) -> Self {
        Self {
            name: Lifecycle::Start.subcommand().to_string(),
            flags: HashMap::new(),
            scope,
        }
    }

    pub fn with_flag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.flags.insert(key.into(), value.into());
        self
    }

    pub fn with_async(self, enabled: bool) -> Self {
        self.with_flag("async", enabled.to_string())
    }

    pub fn with_skip_kill_on_start(self, enabled: bool) -> Self {
        self.with_flag("skip_kill_on_start", enabled.to_string())
    }
}

impl LifecycleRequest for StartRequest {
    fn lifecycle(&self) -> Lifecycle {
        Lifecycle::Start
    }

    fn command_name(&self) -> &str {
        &self.name
    }

    fn flags(&self) -> &HashMap<String, String> {
        &self.flags
    }

    fn scope(&self) -> &Scope {
        &self.scope
    }
}

/// Request to stop a process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopRequest {
    name: String,
    flags: HashMap<String, String>,
    scope: Scope,
}

impl StopRequest {
    pub fn new(scope: Scope) -> Self {
        Self {
            name: Lifecycle::Stop.subcommand().to_string(),
            flags: HashMap::new(),
            scope,
        }
    }

    pub fn with_flag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.flags.insert(key.into(), value.into());
        self
    }

    pub fn with_soft(self, enabled: bool) -> Self {
        self.with_flag("soft", enabled.to_string())
    }
}

impl LifecycleRequest for StopRequest {
    fn lifecycle(&self) -> Lifecycle {
        Lifecycle::Stop
    }

    fn command_name(&self) -> &str {
        &self.name
    }

    fn flags(&self) -> &HashMap<String, String> {
        &self.flags
    }

    fn scope(&self) -> &Scope {
        &self.scope
    }
}
