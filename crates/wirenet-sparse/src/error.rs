// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for sparse storage operations

/// Sparse storage errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SparseError {
    /// Row index outside the matrix dimensions
    #[error("Row {row} out of range (rows: {n_rows})")]
    RowOutOfRange {
        /// Requested row
        row: u32,
        /// Number of rows in the matrix
        n_rows: u32,
    },

    /// Column index outside the matrix dimensions
    #[error("Column {column} out of range (columns: {n_columns})")]
    ColumnOutOfRange {
        /// Requested column
        column: u32,
        /// Number of columns in the matrix
        n_columns: u32,
    },

    /// A serialized matrix does not describe a valid matrix
    #[error("Invalid sparse matrix snapshot: {0}")]
    InvalidSnapshot(String),
}

/// Result type for sparse storage operations
pub type Result<T> = core::result::Result<T, SparseError>;
