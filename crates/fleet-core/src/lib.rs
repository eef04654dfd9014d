//! Fleet Core Library
//!
//! Process lifecycle orchestration for a cluster control plane: resolve a
//! named process, build its start/stop command, fan it out across the
//! target hosts and aggregate per-host failures.

pub mod cluster;
pub mod command;
pub mod config;
pub mod context;
pub mod deploy;
pub mod environment;
pub mod error;
pub mod process;
pub mod transport;
pub mod types;

/// Re-exports of commonly used types
pub mod prelude {
    // Configuration
    pub use crate::config::{ConfigProvider, ConfigStore, FleetConfig};

    // Requests and commands
    pub use crate::command::{LifecycleRequest, StartRequest, StopRequest, build_command};

    // Processes
    pub use crate::process::{
        CompositeProcess, InvocationPlan, LeafProcess, Process, ProcessDescriptor,
        ProcessRegistry,
    };

    // Deploy
    pub use crate::cluster::{MembershipSource, StaticMembership};
    pub use crate::context::ExecutionContext;
    pub use crate::deploy::{AggregateResult, Dispatcher, ExecutionOutcome, HostSet};
    pub use crate::environment::ExecEnv;
    pub use crate::transport::ExecutionTransport;

    // Shared types
    pub use crate::error::{FleetError, RemoteExecutionError};
    pub use crate::types::{HostRole, ProcessKind, Scope};
}
