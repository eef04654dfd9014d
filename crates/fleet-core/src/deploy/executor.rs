//! Fan-out dispatcher: run one command across a host set.

use std::sync::Arc;

use anyhow::Context;
use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinHandle;

use super::outcome::ExecutionOutcome;
use super::scope::HostSet;
use crate::environment::ExecEnv;
use crate::transport::ExecutionTransport;

/// Executes built commands through a transport.
///
/// A single host is run directly on the calling thread. Larger sets get one
/// blocking task per host; every task is awaited and outcomes come back in
/// host-set order regardless of completion order. The dispatcher never
/// fails: unreachable hosts become outcomes with an error.
///
/// Callers may already be inside a tokio runtime. In that case the fan-out is
/// driven from a scoped helper thread, since the owned runtime cannot block a
/// thread that is running async tasks.
pub struct Dispatcher {
    transport: Arc<dyn ExecutionTransport>,
    // Only `None` once dropped.
    runtime: Option<Runtime>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        // A plain drop blocks, which tokio forbids inside async contexts.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn ExecutionTransport>) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .thread_name("fleet-dispatch")
            .enable_all()
            .build()
            .context("Failed to create dispatch runtime")?;
        Ok(Self {
            transport,
            runtime: Some(runtime),
        })
    }

    pub fn execute(&self, command: &str, hosts: &HostSet, env: &ExecEnv) -> Vec<ExecutionOutcome> {
        match hosts.as_slice() {
            [] => Vec::new(),
            [host] => vec![run_one(self.transport.as_ref(), host, command, env)],
            _ if Handle::try_current().is_ok() => self.fan_out_off_runtime(command, hosts, env),
            _ => self.fan_out(command, hosts, env),
        }
    }

    fn fan_out_off_runtime(
        &self,
        command: &str,
        hosts: &HostSet,
        env: &ExecEnv,
    ) -> Vec<ExecutionOutcome> {
        tracing::debug!(hosts = hosts.len(), "fanning out from a helper thread");
        let joined = std::thread::scope(|scope| {
            scope
                .spawn(|| self.fan_out(command, hosts, env))
                .join()
        });
        match joined {
            Ok(outcomes) => outcomes,
            Err(_) => {
                tracing::warn!(command, "dispatch thread panicked");
                fail_all(hosts, "dispatch thread panicked")
            }
        }
    }

    fn fan_out(&self, command: &str, hosts: &HostSet, env: &ExecEnv) -> Vec<ExecutionOutcome> {
        let Some(runtime) = self.runtime.as_ref() else {
            return fail_all(hosts, "dispatcher has shut down");
        };
        let command: Arc<str> = Arc::from(command);
        let env = Arc::new(env.clone());

        runtime.block_on(async {
            let handles: Vec<(String, JoinHandle<ExecutionOutcome>)> = hosts
                .iter()
                .map(|host| {
                    let transport = Arc::clone(&self.transport);
                    let command = Arc::clone(&command);
                    let env = Arc::clone(&env);
                    let task_host = host.clone();
                    let handle = tokio::task::spawn_blocking(move || {
                        run_one(transport.as_ref(), &task_host, &command, &env)
                    });
                    (host.clone(), handle)
                })
                .collect();

            let mut outcomes = Vec::with_capacity(handles.len());
            for (host, handle) in handles {
                let outcome = match handle.await {
                    Ok(outcome) => outcome,
                    Err(err) => {
                        tracing::warn!(host = %host, error = %err, "host worker did not complete");
                        ExecutionOutcome::failed(host, format!("worker did not complete: {}", err))
                    }
                };
                outcomes.push(outcome);
            }
            outcomes
        })
    }
}

fn fail_all(hosts: &HostSet, reason: &str) -> Vec<ExecutionOutcome> {
    hosts
        .iter()
        .map(|host| ExecutionOutcome::failed(host.clone(), reason))
        .collect()
}

fn run_one(
    transport: &dyn ExecutionTransport,
    host: &str,
    command: &str,
    env: &ExecEnv,
) -> ExecutionOutcome {
    tracing::debug!(host, command, "dispatching");
    let outcome = match transport.run_on_host(host, command, env) {
        Ok(status) => ExecutionOutcome::exited(host, status),
        Err(err) => ExecutionOutcome::failed(host, format!("{:#}", err)),
    };
    if let Some(err) = &outcome.error {
        tracing::warn!(host, reason = %err.reason, "command failed");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::thread::ThreadId;

    use super::*;

    struct ThreadRecorder {
        seen: Mutex<Vec<ThreadId>>,
    }

    impl ExecutionTransport for ThreadRecorder {
        fn run_on_host(&self, _host: &str, _command: &str, _env: &ExecEnv) -> anyhow::Result<i32> {
            self.seen.lock().unwrap().push(std::thread::current().id());
            Ok(0)
        }
    }

    struct Panicking;

    impl ExecutionTransport for Panicking {
        fn run_on_host(&self, host: &str, _command: &str, _env: &ExecEnv) -> anyhow::Result<i32> {
            if host == "bad" {
                panic!("transport bug");
            }
            Ok(0)
        }
    }

    #[test]
    fn single_host_runs_on_calling_thread() {
        let transport = Arc::new(ThreadRecorder {
            seen: Mutex::new(Vec::new()),
        });
        let dispatcher = Dispatcher::new(transport.clone()).unwrap();

        let outcomes = dispatcher.execute("cmd", &HostSet::single("h1"), &ExecEnv::new());

        assert_eq!(outcomes.len(), 1);
        assert_eq!(
            transport.seen.lock().unwrap().as_slice(),
            [std::thread::current().id()]
        );
    }

    #[test]
    fn empty_host_set_yields_no_outcomes() {
        let dispatcher = Dispatcher::new(Arc::new(Panicking)).unwrap();
        assert!(dispatcher.execute("cmd", &HostSet::new(), &ExecEnv::new()).is_empty());
    }

    #[test]
    fn panicking_worker_becomes_failed_outcome() {
        let dispatcher = Dispatcher::new(Arc::new(Panicking)).unwrap();
        let hosts: HostSet = ["ok1", "bad", "ok2"].into_iter().collect();

        let outcomes = dispatcher.execute("cmd", &hosts, &ExecEnv::new());

        let hosts: Vec<&str> = outcomes.iter().map(|o| o.host.as_str()).collect();
        assert_eq!(hosts, ["ok1", "bad", "ok2"]);
        assert!(outcomes[0].is_success());
        assert!(!outcomes[1].is_success());
        assert_eq!(outcomes[1].exit_status, None);
        assert!(outcomes[2].is_success());
    }

    #[tokio::test]
    async fn fan_out_inside_current_thread_runtime() {
        let dispatcher = Dispatcher::new(Arc::new(Panicking)).unwrap();
        let hosts: HostSet = ["h1", "h2", "h3"].into_iter().collect();

        let outcomes = dispatcher.execute("cmd", &hosts, &ExecEnv::new());

        let hosts: Vec<&str> = outcomes.iter().map(|o| o.host.as_str()).collect();
        assert_eq!(hosts, ["h1", "h2", "h3"]);
        assert!(outcomes.iter().all(ExecutionOutcome::is_success));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn fan_out_inside_multi_thread_runtime() {
        let dispatcher = Dispatcher::new(Arc::new(Panicking)).unwrap();
        let hosts: HostSet = ["ok", "bad"].into_iter().collect();

        let outcomes = dispatcher.execute("cmd", &hosts, &ExecEnv::new());

        assert!(outcomes[0].is_success());
        assert!(!outcomes[1].is_success());
    }
}
