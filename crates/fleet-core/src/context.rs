//! Execution context for dependency injection.

use std::sync::Arc;

use crate::cluster::MembershipSource;
use crate::config::{ConfigProvider, FleetConfig};
use crate::deploy::{Dispatcher, HostScopeResolver};
use crate::transport::{ExecutionTransport, LocalShellTransport, SshTransport, TransportKind};

/// Everything a process needs to start or stop itself.
///
/// Frontends build this once per invocation and pass it to processes.
pub struct ExecutionContext {
    service: String,
    local_host: String,
    membership: Arc<dyn MembershipSource>,
    config: Arc<dyn ConfigProvider>,
    dispatcher: Dispatcher,
}

impl std::fmt::Debug for ExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("service", &self.service)
            .field("local_host", &self.local_host)
            .finish_non_exhaustive()
    }
}

impl ExecutionContext {
    /// Create a context with explicit collaborators.
    pub fn new(
        service: impl Into<String>,
        local_host: impl Into<String>,
        membership: Arc<dyn MembershipSource>,
        config: Arc<dyn ConfigProvider>,
        transport: Arc<dyn ExecutionTransport>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            service: service.into(),
            local_host: local_host.into(),
            membership,
            config,
            dispatcher: Dispatcher::new(transport)?,
        })
    }

    /// Create a context from a loaded fleet.toml, picking the configured transport.
    pub fn from_config(config: FleetConfig) -> anyhow::Result<Self> {
        let transport: Arc<dyn ExecutionTransport> = match config.transport_kind()? {
            TransportKind::Local => Arc::new(LocalShellTransport::new()),
            TransportKind::Ssh => Arc::new(SshTransport::new(config.launcher.ssh_options.clone())),
        };
        let service = config.service_invocation();
        let local_host = config.local_host();
        let membership = Arc::new(config.membership());
        Self::new(service, local_host, membership, Arc::new(config), transport)
    }

    /// Canonical service invocation, e.g. `bin/fleet process`.
    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn local_host(&self) -> &str {
        &self.local_host
    }

    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn resolver(&self) -> HostScopeResolver<'_> {
        HostScopeResolver::new(self.membership.as_ref(), &self.local_host)
    }
}
