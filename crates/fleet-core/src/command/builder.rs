//! Command line construction for lifecycle requests.
//!
//! The produced string always has the shape
//! `<service invocation> <subcommand> <process name> [flags...]`
//! with flags in declaration order. This shape is the stable contract
//! between the control plane and the launcher on each host.

use std::collections::HashMap;

use super::flags::{FlagKind, FlagSpec, parse_switch};
use crate::error::{FleetError, Result};

/// Build a command line from its parts.
///
/// Unknown flag keys and malformed switch values are rejected rather than
/// dropped.
pub fn build_command(
    service: &str,
    subcommand: &str,
    process: &str,
    flags: &HashMap<String, String>,
    declared: &[FlagSpec],
) -> Result<String> {
    if service.trim().is_empty() {
        return Err(FleetError::Configuration(
            "service invocation must not be empty".to_string(),
        ));
    }
    ensure_known_flags(subcommand, flags, declared)?;

    let mut parts = vec![service.to_string(), subcommand.to_string(), process.to_string()];
    for spec in declared {
        let Some(value) = flags.get(spec.key) else {
            continue;
        };
        match spec.kind {
            FlagKind::Switch => {
                let enabled = parse_switch(spec.key, value).ok_or_else(|| {
                    FleetError::Configuration(format!(
                        "flag '{}' expects true or false, got '{}'",
                        spec.key, value
                    ))
                })?;
                if enabled {
                    parts.push(spec.token.to_string());
                }
            }
        }
    }
    Ok(parts.join(" "))
}

fn ensure_known_flags(
    subcommand: &str,
    flags: &HashMap<String, String>,
    declared: &[FlagSpec],
) -> Result<()> {
    let mut unknown: Vec<&str> = flags
        .keys()
        .map(|k| k.as_str())
        .filter(|k| !declared.iter().any(|spec| spec.key == *k))
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort_unstable();
    Err(FleetError::Configuration(format!(
        "unsupported flag(s) for {}: {}",
        subcommand,
        unknown.join(", ")
    )))
}
