// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines all configuration structs that map to sections in
//! `wirenet_configuration.toml`.

use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct WirenetConfig {
    pub connectivity: ConnectivityConfig,
    pub solver: SolverConfig,
    pub logging: LoggingConfig,
}

/// Connection table behavior
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectivityConfig {
    /// What wiring an already-wired pair of entries does
    pub merge_policy: MergePolicy,
    /// Initial number of containers the connection table reserves
    pub table_capacity: usize,
}

impl Default for ConnectivityConfig {
    fn default() -> Self {
        Self {
            merge_policy: MergePolicy::KeepExisting,
            table_capacity: 64,
        }
    }
}

/// Outcome of wiring a (source, destination) pair that is already wired
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// Leave the existing cell and its auxiliary value untouched
    #[default]
    KeepExisting,
    /// Reset the existing cell's auxiliary value to the destination entry
    Overwrite,
}

impl fmt::Display for MergePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergePolicy::KeepExisting => write!(f, "keep-existing"),
            MergePolicy::Overwrite => write!(f, "overwrite"),
        }
    }
}

impl FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keep-existing" | "keep_existing" | "keep" => Ok(MergePolicy::KeepExisting),
            "overwrite" => Ok(MergePolicy::Overwrite),
            other => Err(format!("unknown merge policy '{}'", other)),
        }
    }
}

/// Solver thread count
///
/// Carried for an external kinetics solver. Nothing in this workspace
/// reads it; the connectivity crates are single-threaded.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Worker threads (0 = auto-detect)
    pub num_threads: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { num_threads: 0 }
    }
}

impl SolverConfig {
    /// Thread count with 0 resolved to the available parallelism
    pub fn effective_threads(&self) -> usize {
        if self.num_threads > 0 {
            return self.num_threads;
        }
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Log format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}
