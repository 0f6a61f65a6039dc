// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! CLI argument parsing for per-crate debug flags
//!
//! Supports flags like `--debug-wirenet-connectivity` to raise one crate's
//! log level to `debug`.

use std::collections::BTreeSet;
use std::env;

use crate::KNOWN_CRATES;

/// Parse debug flags from command-line arguments
///
/// # Example
/// ```rust
/// use wirenet_observability::CrateDebugFlags;
///
/// let flags = CrateDebugFlags::from_args(vec!["--debug-wirenet-sparse".to_string()]);
/// assert!(flags.is_enabled("wirenet-sparse"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrateDebugFlags {
    pub enabled_crates: BTreeSet<String>,
}

impl CrateDebugFlags {
    /// Parse debug flags from command-line arguments
    ///
    /// Looks for arguments matching `--debug-{crate-name}` pattern.
    /// Also supports `--debug-all` to enable all crates.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut flags = CrateDebugFlags::default();
        for arg in args {
            if arg == "--debug-all" {
                flags.enable_all();
            } else if let Some(crate_name) = arg.strip_prefix("--debug-") {
                flags.enabled_crates.insert(crate_name.to_string());
            }
        }
        flags
    }

    /// Enable every crate in [`KNOWN_CRATES`]
    pub fn enable_all(&mut self) {
        self.enabled_crates
            .extend(KNOWN_CRATES.iter().map(|name| name.to_string()));
    }

    pub fn is_enabled(&self, crate_name: &str) -> bool {
        self.enabled_crates.contains(crate_name)
    }

    pub fn any_enabled(&self) -> bool {
        !self.enabled_crates.is_empty()
    }

    /// `tracing::Level::DEBUG` if enabled, `tracing::Level::INFO` otherwise
    pub fn log_level(&self, crate_name: &str) -> tracing::Level {
        if self.is_enabled(crate_name) {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }

    /// Create a tracing filter from debug flags
    ///
    /// Format: `"wirenet-sparse=debug,info"`, or just `default_level` if none enabled.
    pub fn to_filter_string(&self, default_level: &str) -> String {
        let mut filters: Vec<String> = self
            .enabled_crates
            .iter()
            .map(|crate_name| format!("{}=debug", crate_name))
            .collect();
        filters.push(default_level.to_lowercase());
        filters.join(",")
    }
}

/// Parse debug flags from process arguments and `WIRENET_DEBUG`
///
/// Environment variable format: comma-separated crate names, or `all`.
pub fn parse_debug_flags() -> CrateDebugFlags {
    let mut flags = CrateDebugFlags::from_args(env::args());

    if let Ok(env_var) = env::var("WIRENET_DEBUG") {
        if env_var == "all" {
            flags.enable_all();
        } else {
            flags.enabled_crates.extend(
                env_var
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(String::from),
            );
        }
    }

    flags
}

/// Generate help text for debug flags
pub fn debug_flags_help() -> String {
    format!(
        r#"Debug Flags:
  --debug-all                    Enable debug logging for all crates
  --debug-{{crate-name}}          Enable debug logging for specific crate

Available crates:
  {}

Environment Variable:
  WIRENET_DEBUG={{crate-name}}[,{{crate-name}}]  Enable debug for crates (comma-separated)
  WIRENET_DEBUG=all                               Enable debug for all crates
"#,
        KNOWN_CRATES.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_crate_flag() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-wirenet-connectivity".to_string()]);
        assert!(flags.is_enabled("wirenet-connectivity"));
        assert!(!flags.is_enabled("wirenet-sparse"));
    }

    #[test]
    fn test_debug_all() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-all".to_string()]);
        for crate_name in KNOWN_CRATES {
            assert!(flags.is_enabled(crate_name), "{} should be enabled", crate_name);
        }
    }

    #[test]
    fn test_unrelated_args_ignored() {
        let flags = CrateDebugFlags::from_args(vec!["--verbose".to_string(), "run".to_string()]);
        assert!(!flags.any_enabled());
    }

    #[test]
    fn test_filter_string() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-wirenet-sparse".to_string()]);
        assert_eq!(flags.to_filter_string("INFO"), "wirenet-sparse=debug,info");
        assert_eq!(CrateDebugFlags::default().to_filter_string("warn"), "warn");
    }

    #[test]
    fn test_log_level() {
        let flags = CrateDebugFlags::from_args(vec!["--debug-wirenet-sparse".to_string()]);
        assert_eq!(flags.log_level("wirenet-sparse"), tracing::Level::DEBUG);
        assert_eq!(flags.log_level("wirenet-config"), tracing::Level::INFO);
    }
}
