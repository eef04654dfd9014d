//! Fan-out ordering and failure isolation.

mod support;

use std::sync::Arc;
use std::time::Duration;

use fleet_core::deploy::{AggregateResult, Dispatcher, HostSet};
use fleet_core::environment::ExecEnv;

use support::{FakeTransport, HostBehavior};

#[test]
fn outcomes_follow_host_order_not_completion_order() {
    let transport = Arc::new(
        FakeTransport::new()
            .with_delay("slow", Duration::from_millis(300))
            .with_delay("medium", Duration::from_millis(150)),
    );
    let dispatcher = Dispatcher::new(transport.clone()).unwrap();
    let hosts: HostSet = ["slow", "medium", "fast"].into_iter().collect();

    let outcomes = dispatcher.execute("bin/fleet process start worker", &hosts, &ExecEnv::new());

    let reported: Vec<&str> = outcomes.iter().map(|o| o.host.as_str()).collect();
    assert_eq!(reported, ["slow", "medium", "fast"]);

    // Hosts ran concurrently, so fast finished before slow.
    let completed: Vec<String> = transport.calls().into_iter().map(|c| c.host).collect();
    let position = |host: &str| completed.iter().position(|h| h == host).unwrap();
    assert_eq!(completed.len(), 3);
    assert!(position("fast") < position("slow"), "{completed:?}");
}

#[test]
fn failure_on_one_host_does_not_cancel_siblings() {
    let transport = Arc::new(
        FakeTransport::new()
            .with("h1", HostBehavior::Unreachable("connection refused"))
            .with_delay("h3", Duration::from_millis(100)),
    );
    let dispatcher = Dispatcher::new(transport.clone()).unwrap();
    let hosts: HostSet = ["h1", "h2", "h3"].into_iter().collect();

    let outcomes = dispatcher.execute("cmd", &hosts, &ExecEnv::new());

    assert_eq!(outcomes.len(), 3);
    assert_eq!(transport.calls().len(), 3);
    assert!(!outcomes[0].is_success());
    assert_eq!(outcomes[0].exit_status, None);
    assert!(outcomes[1].is_success());
    assert!(outcomes[2].is_success());
}

#[test]
fn aggregate_lists_exactly_the_failing_hosts() {
    let transport = Arc::new(
        FakeTransport::new()
            .with("b", HostBehavior::Exit(1))
            .with("d", HostBehavior::Unreachable("no route to host")),
    );
    let dispatcher = Dispatcher::new(transport).unwrap();
    let hosts: HostSet = ["a", "b", "c", "d"].into_iter().collect();

    let aggregate = AggregateResult::new("cmd", dispatcher.execute("cmd", &hosts, &ExecEnv::new()));

    assert!(!aggregate.success());
    assert_eq!(aggregate.failing_hosts(), ["b", "d"]);

    let err = aggregate.into_result().unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("b: exit status 1"), "{msg}");
    assert!(msg.contains("d: no route to host"), "{msg}");
}

#[test]
fn env_snapshot_reaches_every_host() {
    let transport = Arc::new(FakeTransport::new());
    let dispatcher = Dispatcher::new(transport.clone()).unwrap();
    let hosts: HostSet = ["h1", "h2"].into_iter().collect();
    let mut env = ExecEnv::new();
    env.set("FLEET_WORKER_JAVA_OPTS", "-Xmx1g");

    dispatcher.execute("cmd", &hosts, &env);

    let calls = transport.calls();
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| c.env == env && c.command == "cmd"));
}
