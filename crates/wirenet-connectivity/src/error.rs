// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for connectivity operations

use crate::ids::{Endpoints, Side};
use wirenet_sparse::SparseError;

/// Connectivity errors
///
/// All of these are local failures returned to the caller. An unsupported
/// connection slot is not an error (see `single_traversal`).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectivityError {
    /// Entry index outside the collection snapshot
    #[error("Invalid {side} entry index {entry} (entries: {bound})")]
    InvalidIndex {
        side: Side,
        entry: u32,
        bound: u32,
    },

    /// Copy target collections do not match the copied dimensions
    #[error("Incompatible copy target: expected {expected:?} entries, got {actual:?}")]
    IncompatibleCopyTarget {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// `flip` called on a traversal that has not produced a peer yet
    #[error("Cannot flip a traversal before it has produced a peer")]
    FlipBeforeAdvance,

    /// One-to-one wiring between collections of different sizes
    #[error("One-to-one wiring needs equal entry counts: {source_entries} vs {dest_entries}")]
    DimensionMismatch {
        source_entries: u32,
        dest_entries: u32,
    },

    #[error("Wiring already registered: {0}")]
    DuplicateWiring(Endpoints),

    #[error("No wiring registered for {0}")]
    UnknownWiring(Endpoints),

    #[error("Invalid connectivity snapshot: {0}")]
    InvalidSnapshot(String),

    #[error(transparent)]
    Sparse(#[from] SparseError),
}

/// Result type for connectivity operations
pub type Result<T> = core::result::Result<T, ConnectivityError>;

pub(crate) fn check_entry(side: Side, entry: u32, bound: u32) -> Result<()> {
    if entry >= bound {
        return Err(ConnectivityError::InvalidIndex { side, entry, bound });
    }
    Ok(())
}
