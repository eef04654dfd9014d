//! Deploy coordination: scope resolution, fan-out and aggregation.

pub mod executor;
pub mod outcome;
pub mod scope;

pub use executor::Dispatcher;
pub use outcome::{AggregateResult, ExecutionOutcome};
pub use scope::{HostScopeResolver, HostSet, resolve_scope};
