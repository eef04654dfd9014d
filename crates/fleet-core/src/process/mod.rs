//! Process abstraction: the unit of lifecycle control.
//!
//! A process is either a leaf daemon or a composite group over child
//! processes. Both expose the same operations; composites fold over their
//! children explicitly instead of building a command of their own.

pub mod catalog;
pub mod composite;
pub mod leaf;
pub mod registry;

use serde::Serialize;

pub use composite::CompositeProcess;
pub use leaf::LeafProcess;
pub use registry::ProcessRegistry;

use crate::command::{LifecycleRequest, StartRequest, StopRequest};
use crate::config::ConfigProvider;
use crate::context::ExecutionContext;
use crate::deploy::HostSet;
use crate::environment::ExecEnv;
use crate::error::Result;
use crate::types::{HostRole, ProcessKind, Scope};

/// Identity of a registered process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessDescriptor {
    pub name: String,
    pub kind: ProcessKind,
    pub role: HostRole,
    pub default_scope: Scope,
}

/// One command a start or stop would dispatch, and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationPlan {
    pub process: String,
    pub command: String,
    pub hosts: HostSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Process {
    Leaf(LeafProcess),
    Composite(CompositeProcess),
}

impl Process {
    pub fn name(&self) -> &str {
        match self {
            Process::Leaf(leaf) => leaf.name(),
            Process::Composite(group) => group.name(),
        }
    }

    pub fn kind(&self) -> ProcessKind {
        match self {
            Process::Leaf(_) => ProcessKind::Leaf,
            Process::Composite(_) => ProcessKind::Composite,
        }
    }

    pub fn descriptor(&self) -> ProcessDescriptor {
        let (role, default_scope) = match self {
            Process::Leaf(leaf) => (leaf.role(), Scope::Local),
            Process::Composite(group) => (group.role(), group.default_scope().clone()),
        };
        ProcessDescriptor {
            name: self.name().to_string(),
            kind: self.kind(),
            role,
            default_scope,
        }
    }

    /// Apply the environment variables this process needs.
    pub fn set_env_vars(&self, config: &dyn ConfigProvider, env: &mut ExecEnv) {
        match self {
            Process::Leaf(leaf) => leaf.set_env_vars(config, env),
            Process::Composite(group) => group.set_env_vars(config, env),
        }
    }

    pub fn build_start_command(&self, service: &str, req: &StartRequest) -> Result<String> {
        self.build_command(service, req)
    }

    pub fn build_stop_command(&self, service: &str, req: &StopRequest) -> Result<String> {
        self.build_command(service, req)
    }

    pub fn start(&self, ctx: &ExecutionContext, req: &StartRequest) -> Result<()> {
        self.run(ctx, req)
    }

    pub fn stop(&self, ctx: &ExecutionContext, req: &StopRequest) -> Result<()> {
        self.run(ctx, req)
    }

    /// Commands and hosts a start would use, without dispatching.
    pub fn plan_start(
        &self,
        ctx: &ExecutionContext,
        req: &StartRequest,
    ) -> Result<Vec<InvocationPlan>> {
        self.plan(ctx, req)
    }

    /// Commands and hosts a stop would use, without dispatching.
    pub fn plan_stop(
        &self,
        ctx: &ExecutionContext,
        req: &StopRequest,
    ) -> Result<Vec<InvocationPlan>> {
        self.plan(ctx, req)
    }

    fn build_command<R: LifecycleRequest>(&self, service: &str, req: &R) -> Result<String> {
        match self {
            Process::Leaf(leaf) => leaf.build_command(service, req),
            Process::Composite(group) => group.build_command(service, req),
        }
    }

    fn plan<R: LifecycleRequest>(
        &self,
        ctx: &ExecutionContext,
        req: &R,
    ) -> Result<Vec<InvocationPlan>> {
        match self {
            Process::Leaf(leaf) => Ok(vec![leaf.plan(ctx, req)?]),
            Process::Composite(group) => group.plan(ctx, req),
        }
    }

    fn run<R: LifecycleRequest>(&self, ctx: &ExecutionContext, req: &R) -> Result<()> {
        match self {
            Process::Leaf(leaf) => leaf.run(ctx, req),
            Process::Composite(group) => group.run(ctx, req),
        }
    }
}

impl From<LeafProcess> for Process {
    fn from(leaf: LeafProcess) -> Self {
        Process::Leaf(leaf)
    }
}

impl From<CompositeProcess> for Process {
    fn from(group: CompositeProcess) -> Self {
        Process::Composite(group)
    }
}
