//! Lifecycle requests and the command builder.

pub mod builder;
pub mod flags;
pub mod request;

pub use builder::build_command;
pub use flags::{FlagKind, FlagSpec, START_FLAGS, STOP_FLAGS};
pub use request::{Lifecycle, LifecycleRequest, StartRequest, StopRequest};
