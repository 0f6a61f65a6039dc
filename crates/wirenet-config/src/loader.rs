// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)
//!
//! Environment variables are only read inside [`load_config`] and
//! [`apply_environment_overrides`], never at type-definition time.

use crate::{ConfigError, ConfigResult, WirenetConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "wirenet_configuration.toml";

/// Find the wirenet configuration file
///
/// Search order:
/// 1. `WIRENET_CONFIG_PATH` environment variable
/// 2. Current working directory
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("WIRENET_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        }
        return Err(ConfigError::FileNotFound(format!(
            "Config file specified by WIRENET_CONFIG_PATH not found: {}",
            path.display()
        )));
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));
        let mut current = cwd.as_path();
        for _ in 0..5 {
            match current.parent() {
                Some(parent) => {
                    search_paths.push(parent.join(CONFIG_FILE_NAME));
                    current = parent;
                }
                None => break,
            }
        }
    }

    if let Some(path) = search_paths.iter().find(|p| p.exists()) {
        return Ok(path.clone());
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "'{}' not found in any of these locations:\n{}\n\nSet WIRENET_CONFIG_PATH to specify a custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or an
/// override carries an unparseable value
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<WirenetConfig> {
    let config_file = match config_path {
        Some(path) => path.to_path_buf(),
        None => find_config_file()?,
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: WirenetConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config)?;
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli)?;
    }

    Ok(config)
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `WIRENET_MERGE_POLICY` -> `connectivity.merge_policy`
/// - `WIRENET_TABLE_CAPACITY` -> `connectivity.table_capacity`
/// - `WIRENET_NUM_THREADS` -> `solver.num_threads`
/// - `WIRENET_LOG_LEVEL` -> `logging.level`
pub fn apply_environment_overrides(config: &mut WirenetConfig) -> ConfigResult<()> {
    let vars: HashMap<String, String> = [
        ("WIRENET_MERGE_POLICY", "merge_policy"),
        ("WIRENET_TABLE_CAPACITY", "table_capacity"),
        ("WIRENET_NUM_THREADS", "num_threads"),
        ("WIRENET_LOG_LEVEL", "log_level"),
    ]
    .into_iter()
    .filter_map(|(var, key)| env::var(var).ok().map(|value| (key.to_string(), value)))
    .collect();

    apply_overrides(config, &vars)
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments (e.g., `{"num_threads": "8", "merge_policy": "overwrite"}`)
pub fn apply_cli_overrides(
    config: &mut WirenetConfig,
    cli_args: &HashMap<String, String>,
) -> ConfigResult<()> {
    apply_overrides(config, cli_args)
}

fn apply_overrides(config: &mut WirenetConfig, values: &HashMap<String, String>) -> ConfigResult<()> {
    if let Some(value) = values.get("merge_policy") {
        config.connectivity.merge_policy = value.parse().map_err(ConfigError::InvalidValue)?;
    }
    if let Some(value) = values.get("table_capacity") {
        config.connectivity.table_capacity = parse_number("table_capacity", value)?;
    }
    if let Some(value) = values.get("num_threads") {
        config.solver.num_threads = parse_number("num_threads", value)?;
    }
    if let Some(value) = values.get("log_level") {
        config.logging.level = value.clone();
    }
    Ok(())
}

fn parse_number(key: &str, value: &str) -> ConfigResult<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(format!("{} = '{}' is not a number", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MergePolicy;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: &[&str] = &[
        "WIRENET_MERGE_POLICY",
        "WIRENET_TABLE_CAPACITY",
        "WIRENET_NUM_THREADS",
        "WIRENET_LOG_LEVEL",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("WIRENET_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("WIRENET_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        env::set_var("WIRENET_CONFIG_PATH", "/nonexistent/wirenet.toml");
        let result = find_config_file();
        env::remove_var("WIRENET_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[solver]").unwrap();
        writeln!(file, "num_threads = 4").unwrap();
        writeln!(file, "[connectivity]").unwrap();
        writeln!(file, "merge_policy = \"overwrite\"").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.solver.num_threads, 4);
        assert_eq!(config.connectivity.merge_policy, MergePolicy::Overwrite);
        assert_eq!(config.connectivity.table_capacity, 64);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_toml() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "[solver\nnum_threads = ").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = WirenetConfig::default();

        env::set_var("WIRENET_NUM_THREADS", "12");
        env::set_var("WIRENET_MERGE_POLICY", "overwrite");
        let result = apply_environment_overrides(&mut config);
        clear_env();

        assert!(result.is_ok());
        assert_eq!(config.solver.num_threads, 12);
        assert_eq!(config.connectivity.merge_policy, MergePolicy::Overwrite);
    }

    #[test]
    fn test_environment_override_rejects_garbage() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = WirenetConfig::default();

        env::set_var("WIRENET_NUM_THREADS", "many");
        let result = apply_environment_overrides(&mut config);
        clear_env();

        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
        assert_eq!(config.solver.num_threads, 0);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = WirenetConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("table_capacity".to_string(), "256".to_string());
        cli_args.insert("log_level".to_string(), "debug".to_string());

        apply_cli_overrides(&mut config, &cli_args).unwrap();

        assert_eq!(config.connectivity.table_capacity, 256);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_env();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[solver]").unwrap();
        writeln!(file, "num_threads = 2").unwrap();
        writeln!(file, "[logging]").unwrap();
        writeln!(file, "level = \"warn\"").unwrap();

        env::set_var("WIRENET_NUM_THREADS", "6");
        env::set_var("WIRENET_LOG_LEVEL", "debug");

        let mut cli_args = HashMap::new();
        cli_args.insert("num_threads".to_string(), "8".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args));
        clear_env();
        let config = config.unwrap();

        // CLI wins for threads, env wins for level (no CLI override)
        assert_eq!(config.solver.num_threads, 8);
        assert_eq!(config.logging.level, "debug");
    }
}
