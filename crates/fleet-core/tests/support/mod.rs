#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use fleet_core::cluster::StaticMembership;
use fleet_core::context::ExecutionContext;
use fleet_core::environment::ExecEnv;
use fleet_core::transport::ExecutionTransport;

/// What the fake transport does for one host.
#[derive(Debug, Clone)]
pub enum HostBehavior {
    Exit(i32),
    Unreachable(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub host: String,
    pub command: String,
    pub env: ExecEnv,
}

/// Scripted transport recording every call in completion order.
#[derive(Debug, Default)]
pub struct FakeTransport {
    behaviors: HashMap<String, HostBehavior>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<Call>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, host: &str, behavior: HostBehavior) -> Self {
        self.behaviors.insert(host.to_string(), behavior);
        self
    }

    pub fn with_delay(mut self, host: &str, delay: Duration) -> Self {
        self.delays.insert(host.to_string(), delay);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.command).collect()
    }
}

impl ExecutionTransport for FakeTransport {
    fn run_on_host(&self, host: &str, command: &str, env: &ExecEnv) -> anyhow::Result<i32> {
        if let Some(delay) = self.delays.get(host) {
            std::thread::sleep(*delay);
        }
        self.calls.lock().unwrap().push(Call {
            host: host.to_string(),
            command: command.to_string(),
            env: env.clone(),
        });
        match self.behaviors.get(host) {
            Some(HostBehavior::Exit(code)) => Ok(*code),
            Some(HostBehavior::Unreachable(reason)) => anyhow::bail!("{}", reason),
            None => Ok(0),
        }
    }
}

pub fn hosts(names: &[&str]) -> Vec<String> {
    names.iter().map(|h| h.to_string()).collect()
}

/// Context with `bin/fleet process` as service and `local-1` as this host.
pub fn context(
    masters: &[&str],
    workers: &[&str],
    transport: Arc<FakeTransport>,
) -> ExecutionContext {
    context_with_config(masters, workers, HashMap::new(), transport)
}

pub fn context_with_config(
    masters: &[&str],
    workers: &[&str],
    config: HashMap<String, String>,
    transport: Arc<FakeTransport>,
) -> ExecutionContext {
    ExecutionContext::new(
        "bin/fleet process",
        "local-1",
        Arc::new(StaticMembership::new(hosts(masters), hosts(workers))),
        Arc::new(config),
        transport,
    )
    .expect("context should build")
}
