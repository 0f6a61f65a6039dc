// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # wirenet-observability
//!
//! Logging setup shared by wirenet binaries and test harnesses.
//!
//! Library crates only emit `tracing` events with their crate name as the
//! target (`target: "wirenet-connectivity"`); this crate installs the
//! subscriber and turns per-crate debug flags into filter directives.
//!
//! ## Features
//! - `file-logging`: daily-rolling JSON log file per run

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known wirenet crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &[
    "wirenet-sparse",
    "wirenet-connectivity",
    "wirenet-config",
];
