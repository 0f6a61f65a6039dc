// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Unified logging initialization for wirenet
//!
//! Console output always; a rolling JSON log file per run with the
//! `file-logging` feature.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};
use wirenet_config::{LogFormat, LoggingConfig};

use crate::cli::CrateDebugFlags;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logging initialization result
///
/// Keep it alive for the life of the process; dropping it flushes file output.
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder holding the log file, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Build the `EnvFilter` directive string for the given flags and config
pub fn filter_directives(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> String {
    debug_flags.to_filter_string(&config.level)
}

fn console_layer(filter: EnvFilter, format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_filter(filter)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(filter)
            .boxed(),
    }
}

fn env_filter(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives)
        .with_context(|| format!("Invalid log filter directives: {}", directives))
}

/// Initialize console logging
///
/// # Errors
///
/// Fails if the filter directives do not parse or a global subscriber is
/// already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, config: &LoggingConfig) -> Result<LoggingGuard> {
    let directives = filter_directives(debug_flags, config);
    let layers = vec![console_layer(env_filter(&directives)?, config.format)];

    Registry::default()
        .with(layers)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    Ok(LoggingGuard {
        #[cfg(feature = "file-logging")]
        _file_guard: None,
        log_dir: None,
    })
}

/// Initialize console logging plus a daily-rolling JSON file
///
/// Creates `{log_dir}/run_YYYYmmdd_HHMMSS/wirenet.log` (default `./logs`).
#[cfg(feature = "file-logging")]
pub fn init_logging_with_file(
    debug_flags: &CrateDebugFlags,
    config: &LoggingConfig,
    log_dir: Option<PathBuf>,
) -> Result<LoggingGuard> {
    use chrono::Utc;
    use tracing_appender::rolling;

    let base_log_dir = log_dir.unwrap_or_else(|| PathBuf::from("./logs"));
    let run_folder = base_log_dir.join(format!("run_{}", Utc::now().format("%Y%m%d_%H%M%S")));
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    let directives = filter_directives(debug_flags, config);
    let file_appender = rolling::daily(&run_folder, "wirenet.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .json()
        .with_filter(env_filter(&directives)?)
        .boxed();

    let layers = vec![
        console_layer(env_filter(&directives)?, config.format),
        file_layer,
    ];

    Registry::default()
        .with(layers)
        .try_init()
        .context("Failed to install global tracing subscriber")?;

    Ok(LoggingGuard {
        _file_guard: Some(guard),
        log_dir: Some(run_folder),
    })
}
