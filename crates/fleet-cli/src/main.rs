//! Fleet - cluster process control
//!
//! Usage:
//!   fleet list                      # Show registered processes
//!   fleet start workers             # Start every worker in the cluster
//!   fleet stop master --soft        # Stop the master on this host
//!   fleet start all --dry-run       # Print commands without running them

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fleet_core::command::{StartRequest, StopRequest};
use fleet_core::config::ConfigStore;
use fleet_core::context::ExecutionContext;
use fleet_core::process::{InvocationPlan, Process, ProcessRegistry};
use fleet_core::types::Scope;

#[derive(Parser)]
#[command(name = "fleet")]
#[command(about = "Start and stop cluster processes", long_about = None)]
struct Cli {
    /// Path to fleet.toml (defaults to $FLEET_CONF, then ~/.config/fleet/fleet.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a process or process group
    Start {
        #[command(flatten)]
        target: TargetArgs,

        /// Return without waiting for the process to report ready
        #[arg(long = "async")]
        async_start: bool,

        /// Do not kill an already running instance first
        #[arg(long)]
        skip_kill_on_start: bool,
    },

    /// Stop a process or process group
    Stop {
        #[command(flatten)]
        target: TargetArgs,

        /// Terminate gracefully instead of killing
        #[arg(long)]
        soft: bool,
    },

    /// List registered processes
    List {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// Process name (see `fleet list`)
    process: String,

    /// Target scope (all, local); defaults to the process's own default
    #[arg(long, conflicts_with = "hosts")]
    scope: Option<String>,

    /// Explicit hosts to act on
    #[arg(long, value_delimiter = ',', value_name = "HOST")]
    hosts: Vec<String>,

    /// Print the commands and hosts without running anything
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fleet=info,fleet_core=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let registry = ProcessRegistry::with_default_processes();

    match cli.command {
        Commands::List { format } => run_list(&registry, format),
        Commands::Start {
            target,
            async_start,
            skip_kill_on_start,
        } => run_start(
            cli.config,
            &registry,
            target,
            async_start,
            skip_kill_on_start,
        ),
        Commands::Stop { target, soft } => run_stop(cli.config, &registry, target, soft),
    }
}

fn load_context(config: Option<PathBuf>) -> Result<ExecutionContext> {
    let store = match config {
        Some(path) => ConfigStore::from_path(path),
        None => ConfigStore::from_env()?,
    };
    tracing::debug!(path = %store.config_path().display(), "loading config");
    ExecutionContext::from_config(store.load()?)
}

fn resolve_target_scope(process: &Process, target: &TargetArgs) -> Result<Scope> {
    if !target.hosts.is_empty() {
        return Ok(Scope::Hosts(target.hosts.clone()));
    }
    match &target.scope {
        Some(s) => Scope::parse(s),
        None => Ok(process.descriptor().default_scope),
    }
}

fn run_start(
    config: Option<PathBuf>,
    registry: &ProcessRegistry,
    target: TargetArgs,
    async_start: bool,
    skip_kill_on_start: bool,
) -> Result<()> {
    let process = registry.lookup(&target.process)?;
    let scope = resolve_target_scope(process, &target)?;
    let ctx = load_context(config)?;

    let mut request = StartRequest::new(scope);
    if async_start {
        request = request.with_async(true);
    }
    if skip_kill_on_start {
        request = request.with_skip_kill_on_start(true);
    }

    if target.dry_run {
        print_plans(&process.plan_start(&ctx, &request)?);
        return Ok(());
    }

    process.start(&ctx, &request)?;
    println!("✓ Started {}", process.name());
    Ok(())
}

fn run_stop(
    config: Option<PathBuf>,
    registry: &ProcessRegistry,
    target: TargetArgs,
    soft: bool,
) -> Result<()> {
    let process = registry.lookup(&target.process)?;
    let scope = resolve_target_scope(process, &target)?;
    let ctx = load_context(config)?;

    let mut request = StopRequest::new(scope);
    if soft {
        request = request.with_soft(true);
    }

    if target.dry_run {
        print_plans(&process.plan_stop(&ctx, &request)?);
        return Ok(());
    }

    process.stop(&ctx, &request)?;
    println!("✓ Stopped {}", process.name());
    Ok(())
}

fn print_plans(plans: &[InvocationPlan]) {
    for plan in plans {
        println!("{}", plan.command);
        for host in &plan.hosts {
            println!("  → {}", host);
        }
    }
}

fn run_list(registry: &ProcessRegistry, format: OutputFormat) -> Result<()> {
    let descriptors = registry.descriptors();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&descriptors)?);
        }
        OutputFormat::Table => {
            println!(
                "{:<14} {:<10} {:<8} DEFAULT SCOPE",
                "NAME", "KIND", "ROLE"
            );
            for d in descriptors {
                let kind = match d.kind {
                    fleet_core::types::ProcessKind::Leaf => "leaf",
                    fleet_core::types::ProcessKind::Composite => "group",
                };
                println!(
                    "{:<14} {:<10} {:<8} {}",
                    d.name,
                    kind,
                    d.role.as_str(),
                    d.default_scope
                );
            }
        }
    }
    Ok(())
}
