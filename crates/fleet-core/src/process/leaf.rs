//! Leaf processes: one concrete daemon per host.

use crate::command::{LifecycleRequest, build_command};
use crate::config::ConfigProvider;
use crate::context::ExecutionContext;
use crate::deploy::AggregateResult;
use crate::environment::ExecEnv;
use crate::error::Result;
use crate::types::HostRole;

use super::InvocationPlan;

/// Configuration key holding JVM options shared by every process.
pub const COMMON_JAVA_OPTS: &str = "FLEET_JAVA_OPTS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafProcess {
    name: String,
    role: HostRole,
    java_opts_var: String,
    default_opts: Vec<String>,
}

impl LeafProcess {
    pub fn new(
        name: impl Into<String>,
        role: HostRole,
        java_opts_var: impl Into<String>,
        default_opts: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role,
            java_opts_var: java_opts_var.into(),
            default_opts,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> HostRole {
        self.role
    }

    /// Environment variable carrying this process's JVM options.
    pub fn java_opts_var(&self) -> &str {
        &self.java_opts_var
    }

    /// Default options, then common options, then process-specific options.
    pub fn set_env_vars(&self, config: &dyn ConfigProvider, env: &mut ExecEnv) {
        let mut opts = self.default_opts.clone();
        opts.extend(config.get(COMMON_JAVA_OPTS));
        opts.extend(config.get(&self.java_opts_var));
        opts.retain(|o| !o.trim().is_empty());
        env.set(self.java_opts_var.clone(), opts.join(" "));
    }

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
    ) -> Result<InvocationPlan> {
        let hosts = ctx.resolver().resolve(req.scope(), self.role)?;
        let command = self.build_command(ctx.service(), req)?;
        Ok(InvocationPlan {
            process: self.name.clone(),
            command,
            hosts,
        })
    }

    /// Resolve, build, dispatch, aggregate.
    pub fn run<R: LifecycleRequest>(&self, ctx: &ExecutionContext, req: &R) -> Result<()> {
        tracing::info!(
            process = %self.name,
            action = req.command_name(),
            scope = %req.scope(),
            "running lifecycle command"
        );
        let plan = self.plan(ctx, req)?;

        let mut env = ExecEnv::new();
        self.set_env_vars(ctx.config(), &mut env);

        let outcomes = ctx.dispatcher().execute(&plan.command, &plan.hosts, &env);
        let aggregate = AggregateResult::new(plan.command, outcomes);
        if aggregate.success() {
            tracing::info!(process = %self.name, hosts = aggregate.outcomes.len(), "completed");
        }
        aggregate.into_result().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn master() -> LeafProcess {
        LeafProcess::new(
            "master",
            HostRole::Masters,
            "FLEET_MASTER_JAVA_OPTS",
            vec!["-Dfleet.logger.type=MASTER_LOGGER".into()],
        )
    }

    #[test]
    fn env_combines_default_common_and_specific_opts() {
        let config: HashMap<String, String> = [
            (COMMON_JAVA_OPTS.to_string(), "-Xmx4g".to_string()),
            ("FLEET_MASTER_JAVA_OPTS".to_string(), "-Dx=1".to_string()),
        ]
        .into_iter()
        .collect();
        let mut env = ExecEnv::new();

        master().set_env_vars(&config, &mut env);

        assert_eq!(
            env.get("FLEET_MASTER_JAVA_OPTS"),
            Some("-Dfleet.logger.type=MASTER_LOGGER -Xmx4g -Dx=1")
        );
    }

    #[test]
    fn env_tolerates_missing_values() {
        let config: HashMap<String, String> = HashMap::new();
        let mut env = ExecEnv::new();

        master().set_env_vars(&config, &mut env);

        assert_eq!(
            env.get("FLEET_MASTER_JAVA_OPTS"),
            Some("-Dfleet.logger.type=MASTER_LOGGER")
        );
    }
}
