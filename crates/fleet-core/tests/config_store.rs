use tempfile::TempDir;

use fleet_core::cluster::MembershipSource;
use fleet_core::config::{ConfigProvider, ConfigStore};
use fleet_core::context::ExecutionContext;
use fleet_core::types::HostRole;

fn write(temp: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = temp.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create dir");
    }
    std::fs::write(&path, content).expect("Failed to write file");
    path
}

#[test]
fn missing_config_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::from_path(temp.path().join("absent.toml"));

    let config = store.load().expect("defaults should load");

    assert!(config.cluster.masters.is_empty());
    assert_eq!(config.service_invocation(), "bin/fleet process");
}

#[test]
fn host_files_are_merged_relative_to_config() {
    let temp = TempDir::new().unwrap();
    write(&temp, "conf/masters", "# primary\nm1\n");
    write(&temp, "conf/workers", "w1\nw2 # rack 2\n\nw1\n");
    let config_path = write(
        &temp,
        "fleet.toml",
        r#"
[cluster]
workers = ["w0"]
masters_file = "conf/masters"
workers_file = "conf/workers"
local_host = "m1"
"#,
    );

    let config = ConfigStore::from_path(config_path).load().unwrap();

    assert_eq!(config.cluster.masters, vec!["m1"]);
    assert_eq!(config.cluster.workers, vec!["w0", "w1", "w2"]);
    let membership = config.membership();
    assert_eq!(
        membership.list_hosts(HostRole::All),
        vec!["m1", "w0", "w1", "w2"]
    );
}

#[test]
fn missing_host_file_is_an_error() {
    let temp = TempDir::new().unwrap();
    let config_path = write(
        &temp,
        "fleet.toml",
        "[cluster]\nworkers_file = \"conf/nope\"\n",
    );

    let err = ConfigStore::from_path(config_path).load().unwrap_err();

    assert!(format!("{err:#}").contains("conf/nope"));
}

#[test]
fn env_section_backs_config_lookups() {
    let temp = TempDir::new().unwrap();
    let config_path = write(
        &temp,
        "fleet.toml",
        "[env]\nFLEET_WORKER_JAVA_OPTS = \"-Xmx2g\"\n",
    );

    let config = ConfigStore::from_path(config_path).load().unwrap();

    assert_eq!(
        config.get("FLEET_WORKER_JAVA_OPTS"),
        Some("-Xmx2g".to_string())
    );
    assert_eq!(config.get("FLEET_TEST_SURELY_UNSET_KEY_4242"), None);
}

#[test]
fn context_from_config_uses_launcher_path() {
    let temp = TempDir::new().unwrap();
    let config_path = write(
        &temp,
        "fleet.toml",
        r#"
[cluster]
local_host = "edge-7"

[launcher]
path = "/opt/fleet/bin/fleet"
transport = "local"
"#,
    );
    let config = ConfigStore::from_path(config_path).load().unwrap();

    let ctx = ExecutionContext::from_config(config).unwrap();

    assert_eq!(ctx.service(), "/opt/fleet/bin/fleet process");
    assert_eq!(ctx.local_host(), "edge-7");
}
