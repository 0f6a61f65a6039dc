// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration validation
//!
//! This module provides validation logic to ensure configuration values are
//! consistent and within valid ranges.

use crate::{ConfigError, ConfigResult, WirenetConfig};

/// Upper bound on `solver.num_threads`
pub const MAX_SOLVER_THREADS: usize = 1024;

/// Log levels accepted by `logging.level`
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validation errors that can occur during config validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every failed check
pub fn validate_config(config: &WirenetConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_connectivity(config, &mut errors);
    validate_solver(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_connectivity(config: &WirenetConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.connectivity.table_capacity == 0 {
        errors.push(ConfigValidationError::InvalidValue {
            field: "connectivity.table_capacity".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
}

fn validate_solver(config: &WirenetConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.solver.num_threads > MAX_SOLVER_THREADS {
        errors.push(ConfigValidationError::InvalidValue {
            field: "solver.num_threads".to_string(),
            reason: format!(
                "{} exceeds the maximum of {} (0 = auto-detect)",
                config.solver.num_threads, MAX_SOLVER_THREADS
            ),
        });
    }
}

fn validate_logging(config: &WirenetConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.trim();
    if level.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "logging.level".to_string(),
        });
    } else if !LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("'{}' is not one of {}", level, LOG_LEVELS.join(", ")),
        });
    }
}
