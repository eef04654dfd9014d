//! Declared lifecycle flags and their command-line tokens.

/// How a flag value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Boolean switch: `true` emits the token, `false` emits nothing.
    Switch,
}

/// A flag a lifecycle command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    /// Key used in request flag maps.
    pub key: &'static str,
    /// Token appended to the command line.
    pub token: &'static str,
    pub kind: FlagKind,
}

/// Run the start without waiting for the daemon to report ready.
pub const ASYNC: FlagSpec = FlagSpec {
    key: "async",
    token: "--async",
    kind: FlagKind::Switch,
};

/// Do not kill an already running instance before starting.
pub const SKIP_KILL_ON_START: FlagSpec = FlagSpec {
    key: "skip_kill_on_start",
    token: "--skipKillOnStart",
    kind: FlagKind::Switch,
};

/// Send SIGTERM instead of SIGKILL.
pub const SOFT: FlagSpec = FlagSpec {
    key: "soft",
    token: "--soft",
    kind: FlagKind::Switch,
};

/// Flags accepted by `start`, in the order they are appended.
pub const START_FLAGS: &[FlagSpec] = &[ASYNC, SKIP_KILL_ON_START];

/// Flags accepted by `stop`, in the order they are appended.
pub const STOP_FLAGS: &[FlagSpec] = &[SOFT];

pub(crate) fn parse_switch(key: &str, value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => {
            tracing::debug!(flag = key, value, "non-boolean switch value");
            None
        }
    }
}
