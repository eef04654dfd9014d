//! Composite processes: named groups over a fixed, ordered child list.

use crate::command::{LifecycleRequest, build_command};
use crate::config::ConfigProvider;
use crate::context::ExecutionContext;
use crate::environment::ExecEnv;
use crate::error::{FleetError, Result};
use crate::types::{HostRole, Scope};

use super::{InvocationPlan, Process};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeProcess {
    name: String,
    role: HostRole,
    default_scope: Scope,
    children: Vec<Process>,
}

impl CompositeProcess {
    pub fn new(
        name: impl Into<String>,
        role: HostRole,
        default_scope: Scope,
        children: Vec<Process>,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            default_scope,
            children,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> HostRole {
        self.role
    }

    pub fn default_scope(&self) -> &Scope {
        &self.default_scope
    }

    pub fn children(&self) -> &[Process] {
        &self.children
    }

    pub fn set_env_vars(&self, config: &dyn ConfigProvider, env: &mut ExecEnv) {
        for child in &self.children {
            child.set_env_vars(config, env);
        }
    }

    /// The group's own command line, e.g. `bin/fleet process start proxies`.
    ///
    /// `run` never dispatches this; it is what a remote launcher would receive
    /// to act on the whole group.
    pub fn build_command<R: LifecycleRequest>(&self, service: &str, req: &R) -> Result<String> {
        build_command(
            service,
            req.command_name(),
            &self.name,
            req.flags(),
            req.lifecycle().declared_flags(),
        )
    }

    pub fn plan<R: LifecycleRequest>(
        &self,
        ctx: &ExecutionContext,
        req: &R,
    ) -> Result<Vec<InvocationPlan>> {
        let mut plans = Vec::new();
        for child in &self.children {
            plans.extend(child.plan(ctx, req)?);
        }
        Ok(plans)
    }

    /// Run every child in order with the same request.
    ///
    /// The whole tree is planned first, so a scope or flag error in any child
    /// aborts before anything is dispatched. After that a failing child does
    /// not stop its siblings; all failures are returned together.
    pub fn run<R: LifecycleRequest>(&self, ctx: &ExecutionContext, req: &R) -> Result<()> {
        let plans = self.plan(ctx, req)?;
        tracing::info!(
            process = %self.name,
            action = req.command_name(),
            children = self.children.len(),
            invocations = plans.len(),
            "running group"
        );
        let mut failures = Vec::new();
        for child in &self.children {
            if let Err(err) = child.run(ctx, req) {
                tracing::warn!(process = %self.name, child = child.name(), error = %err, "child failed");
                failures.push((child.name().to_string(), err));
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(FleetError::Composite {
                process: self.name.clone(),
                failures,
            })
        }
    }
}
