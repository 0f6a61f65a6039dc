// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # wirenet-sparse
//!
//! Sparse adjacency storage for message connectivity.
//!
//! `SparseMatrix<T>` maps (row, column) pairs to a value with fixed
//! dimensions, and enumerates populated cells by row or by column:
//! - **Rows** are contiguous in memory and returned as borrowed slices
//! - **Columns** are gathered across rows and returned owned
//!
//! ## Features
//! - `serde` (default): `Serialize`/`Deserialize` on `SerializableSparseMatrix`
//!
//! ```rust
//! use wirenet_sparse::SparseMatrix;
//!
//! let mut matrix = SparseMatrix::new(3, 2);
//! matrix.set(1, 0, 0u32)?;
//! assert_eq!(matrix.row(1)?.columns, &[0]);
//! assert_eq!(matrix.column(0)?.rows, vec![1]);
//! # Ok::<(), wirenet_sparse::SparseError>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod matrix;

pub use error::{Result, SparseError};
pub use matrix::{ColumnView, RowView, SerializableSparseMatrix, SparseMatrix};
