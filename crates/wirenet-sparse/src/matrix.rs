// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Compressed sparse row matrix
//!
//! Cells are stored row by row in three parallel arrays:
//! - `row_start[r]..row_start[r + 1]` is the slice of row `r`
//! - `col_index` holds the populated columns of each row in ascending order
//! - `values` holds the value of each populated cell
//!
//! Row lookups are a slice borrow. Column lookups binary-search every row.

use crate::error::{Result, SparseError};
use std::mem;
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sparse 2D matrix with fixed dimensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SparseMatrix<T> {
    n_rows: u32,
    n_columns: u32,
    row_start: Vec<usize>,
    col_index: Vec<u32>,
    values: Vec<T>,
}

/// Populated cells of one row, borrowed from the matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowView<'a, T> {
    /// Populated columns, ascending
    pub columns: &'a [u32],
    /// Value of each populated column
    pub values: &'a [T],
}

impl<'a, T> RowView<'a, T> {
    /// Number of populated cells in the row
    pub fn count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// (column, value) pairs in ascending column order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &'a T)> + 'a {
        self.columns.iter().copied().zip(self.values.iter())
    }
}

/// Populated cells of one column, collected from every row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView<T> {
    /// Rows with a populated cell in the column, ascending
    pub rows: Vec<u32>,
    /// Value of each populated cell
    pub values: Vec<T>,
}

impl<T> ColumnView<T> {
    /// Number of populated cells in the column
    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// (row, value) pairs in ascending row order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> + '_ {
        self.rows.iter().copied().zip(self.values.iter())
    }
}

impl<T> SparseMatrix<T> {
    /// Create an empty matrix with the given dimensions
    pub fn new(n_rows: u32, n_columns: u32) -> Self {
        Self::with_capacity(n_rows, n_columns, 0)
    }

    /// Create an empty matrix with room for `cells` populated cells
    pub fn with_capacity(n_rows: u32, n_columns: u32, cells: usize) -> Self {
        Self {
            n_rows,
            n_columns,
            row_start: vec![0; n_rows as usize + 1],
            col_index: Vec::with_capacity(cells),
            values: Vec::with_capacity(cells),
        }
    }

    pub fn n_rows(&self) -> u32 {
        self.n_rows
    }

    pub fn n_columns(&self) -> u32 {
        self.n_columns
    }

    /// (rows, columns)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.n_rows, self.n_columns)
    }

    /// Number of populated cells
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reserve room for `additional` more populated cells
    pub fn reserve(&mut self, additional: usize) {
        self.col_index.reserve(additional);
        self.values.reserve(additional);
    }

    /// Remove every populated cell. Dimensions are kept.
    pub fn clear(&mut self) {
        self.col_index.clear();
        self.values.clear();
        self.row_start.iter_mut().for_each(|start| *start = 0);
    }

    /// Insert or overwrite the cell at (row, column)
    ///
    /// Returns the previous value if the cell was already populated.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell lies outside the matrix dimensions.
    pub fn set(&mut self, row: u32, column: u32, value: T) -> Result<Option<T>> {
        self.check_row(row)?;
        self.check_column(column)?;

        let range = self.row_range(row);
        match self.col_index[range.clone()].binary_search(&column) {
            Ok(offset) => Ok(Some(mem::replace(
                &mut self.values[range.start + offset],
                value,
            ))),
            Err(offset) => {
                let at = range.start + offset;
                self.col_index.insert(at, column);
                self.values.insert(at, value);
                for start in &mut self.row_start[row as usize + 1..] {
                    *start += 1;
                }
                Ok(None)
            }
        }
    }

    /// Remove the cell at (row, column), returning its value if it was populated
    ///
    /// # Errors
    ///
    /// Returns an error if the cell lies outside the matrix dimensions.
    pub fn unset(&mut self, row: u32, column: u32) -> Result<Option<T>> {
        self.check_row(row)?;
        self.check_column(column)?;

        let range = self.row_range(row);
        match self.col_index[range.clone()].binary_search(&column) {
            Ok(offset) => {
                let at = range.start + offset;
                self.col_index.remove(at);
                let value = self.values.remove(at);
                for start in &mut self.row_start[row as usize + 1..] {
                    *start -= 1;
                }
                Ok(Some(value))
            }
            Err(_) => Ok(None),
        }
    }

    /// Value at (row, column), `None` if unpopulated or out of range
    pub fn get(&self, row: u32, column: u32) -> Option<&T> {
        if row >= self.n_rows {
            return None;
        }
        let range = self.row_range(row);
        self.col_index[range.clone()]
            .binary_search(&column)
            .ok()
            .map(|offset| &self.values[range.start + offset])
    }

    pub fn contains(&self, row: u32, column: u32) -> bool {
        self.get(row, column).is_some()
    }

    /// Every populated cell of `row`, in ascending column order
    ///
    /// # Errors
    ///
    /// Returns `SparseError::RowOutOfRange` if `row >= n_rows`.
    pub fn row(&self, row: u32) -> Result<RowView<'_, T>> {
        self.check_row(row)?;
        let range = self.row_range(row);
        Ok(RowView {
            columns: &self.col_index[range.clone()],
            values: &self.values[range],
        })
    }

    /// Every populated cell as (row, column, value), row-major
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32, &T)> + '_ {
        (0..self.n_rows).flat_map(move |row| {
            let range = self.row_range(row);
            self.col_index[range.clone()]
                .iter()
                .zip(&self.values[range])
                .map(move |(&column, value)| (row, column, value))
        })
    }

    fn row_range(&self, row: u32) -> Range<usize> {
        let row = row as usize;
        self.row_start[row]..self.row_start[row + 1]
    }

    fn check_row(&self, row: u32) -> Result<()> {
        if row >= self.n_rows {
            return Err(SparseError::RowOutOfRange {
                row,
                n_rows: self.n_rows,
            });
        }
        Ok(())
    }

    fn check_column(&self, column: u32) -> Result<()> {
        if column >= self.n_columns {
            return Err(SparseError::ColumnOutOfRange {
                column,
                n_columns: self.n_columns,
            });
        }
        Ok(())
    }
}

impl<T: Clone> SparseMatrix<T> {
    /// Every populated cell of `column`, in ascending row order
    ///
    /// # Errors
    ///
    /// Returns `SparseError::ColumnOutOfRange` if `column >= n_columns`.
    pub fn column(&self, column: u32) -> Result<ColumnView<T>> {
        self.check_column(column)?;

        let mut view = ColumnView {
            rows: Vec::new(),
            values: Vec::new(),
        };
        for row in 0..self.n_rows {
            let range = self.row_range(row);
            if let Ok(offset) = self.col_index[range.clone()].binary_search(&column) {
                view.rows.push(row);
                view.values.push(self.values[range.start + offset].clone());
            }
        }
        Ok(view)
    }

    /// Matrix with rows and columns swapped
    pub fn transpose(&self) -> SparseMatrix<T> {
        let mut counts = vec![0usize; self.n_columns as usize + 1];
        for &column in &self.col_index {
            counts[column as usize + 1] += 1;
        }
        for i in 1..counts.len() {
            counts[i] += counts[i - 1];
        }
        let row_start = counts.clone();

        // Row-major input keeps each output row ascending.
        let mut slots: Vec<Option<(u32, T)>> = vec![None; self.nnz()];
        let mut next = counts;
        for (row, column, value) in self.iter() {
            let at = next[column as usize];
            slots[at] = Some((row, value.clone()));
            next[column as usize] += 1;
        }

        let (col_index, values) = slots.into_iter().flatten().unzip();
        SparseMatrix {
            n_rows: self.n_columns,
            n_columns: self.n_rows,
            row_start,
            col_index,
            values,
        }
    }

    /// Build a matrix from (row, column, value) cells
    ///
    /// Cells may arrive in any order. A repeated cell keeps its last value.
    ///
    /// # Errors
    ///
    /// Returns an error if any cell lies outside the dimensions.
    pub fn from_triplets<I>(n_rows: u32, n_columns: u32, cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, u32, T)>,
    {
        let mut matrix = Self::new(n_rows, n_columns);
        let mut cells: Vec<(u32, u32, T)> = cells.into_iter().collect();
        for &(row, column, _) in &cells {
            matrix.check_row(row)?;
            matrix.check_column(column)?;
        }
        cells.sort_by_key(|&(row, column, _)| (row, column));

        matrix.reserve(cells.len());
        let mut previous: Option<(u32, u32)> = None;
        for (row, column, value) in cells {
            // Sorted input: a repeat can only be the cell pushed last.
            if previous == Some((row, column)) {
                if let Some(last) = matrix.values.last_mut() {
                    *last = value;
                }
                continue;
            }
            previous = Some((row, column));
            matrix.col_index.push(column);
            matrix.values.push(value);
            matrix.row_start[row as usize + 1] += 1;
        }
        for row in 1..matrix.row_start.len() {
            matrix.row_start[row] += matrix.row_start[row - 1];
        }
        Ok(matrix)
    }

    /// Serializable copy of the matrix (dimensions plus cell list)
    pub fn to_serializable(&self) -> SerializableSparseMatrix<T> {
        SerializableSparseMatrix {
            n_rows: self.n_rows,
            n_columns: self.n_columns,
            cells: self
                .iter()
                .map(|(row, column, value)| (row, column, value.clone()))
                .collect(),
        }
    }

    /// Rebuild a matrix from its serializable form, validating every cell
    ///
    /// # Errors
    ///
    /// Returns `SparseError::InvalidSnapshot` for out-of-range or repeated cells.
    pub fn try_from_serializable(snapshot: SerializableSparseMatrix<T>) -> Result<Self> {
        let cell_count = snapshot.cells.len();
        let matrix = Self::from_triplets(snapshot.n_rows, snapshot.n_columns, snapshot.cells)
            .map_err(|e| SparseError::InvalidSnapshot(e.to_string()))?;
        if matrix.nnz() != cell_count {
            return Err(SparseError::InvalidSnapshot(format!(
                "{} repeated cells",
                cell_count - matrix.nnz()
            )));
        }
        Ok(matrix)
    }
}

/// Serializable version of `SparseMatrix`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SerializableSparseMatrix<T> {
    /// Number of rows
    pub n_rows: u32,
    /// Number of columns
    pub n_columns: u32,
    /// Populated cells (row, column, value), row-major
    pub cells: Vec<(u32, u32, T)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_set_and_get() {
        let mut matrix = SparseMatrix::new(3, 2);
        assert_eq!(matrix.set(1, 0, 7u32).unwrap(), None);
        assert_eq!(matrix.get(1, 0), Some(&7));
        assert_eq!(matrix.get(0, 0), None);
        assert_eq!(matrix.nnz(), 1);
        assert_eq!(matrix.dimensions(), (3, 2));
    }

    #[test]
    fn test_set_overwrites() {
        let mut matrix = SparseMatrix::new(2, 2);
        matrix.set(0, 1, 1u32).unwrap();
        assert_eq!(matrix.set(0, 1, 5).unwrap(), Some(1));
        assert_eq!(matrix.get(0, 1), Some(&5));
        assert_eq!(matrix.nnz(), 1);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut matrix = SparseMatrix::new(3, 2);
        assert_eq!(
            matrix.set(3, 0, 0u32),
            Err(SparseError::RowOutOfRange { row: 3, n_rows: 3 })
        );
        assert_eq!(
            matrix.set(0, 2, 0u32),
            Err(SparseError::ColumnOutOfRange {
                column: 2,
                n_columns: 2
            })
        );
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_row_is_ascending() {
        let mut matrix = SparseMatrix::new(2, 5);
        matrix.set(0, 4, 40u32).unwrap();
        matrix.set(0, 1, 10).unwrap();
        matrix.set(0, 3, 30).unwrap();
        matrix.set(1, 0, 100).unwrap();

        let row = matrix.row(0).unwrap();
        assert_eq!(row.count(), 3);
        assert_eq!(row.columns, &[1, 3, 4]);
        assert_eq!(row.values, &[10, 30, 40]);
        assert_eq!(matrix.row(1).unwrap().columns, &[0]);
    }

    #[test]
    fn test_column_collects_rows() {
        let mut matrix = SparseMatrix::new(4, 3);
        matrix.set(3, 2, 1u32).unwrap();
        matrix.set(0, 2, 2).unwrap();
        matrix.set(1, 1, 3).unwrap();

        let column = matrix.column(2).unwrap();
        assert_eq!(column.rows, vec![0, 3]);
        assert_eq!(column.values, vec![2, 1]);
        assert!(matrix.column(0).unwrap().is_empty());
        assert!(matrix.column(3).is_err());
    }

    #[test]
    fn test_unset() {
        let mut matrix = SparseMatrix::new(3, 3);
        matrix.set(0, 0, 1u32).unwrap();
        matrix.set(1, 1, 2).unwrap();
        matrix.set(2, 2, 3).unwrap();

        assert_eq!(matrix.unset(1, 1).unwrap(), Some(2));
        assert_eq!(matrix.unset(1, 1).unwrap(), None);
        assert_eq!(matrix.nnz(), 2);
        assert_eq!(matrix.get(2, 2), Some(&3));
        assert!(matrix.row(1).unwrap().is_empty());
    }

    #[test]
    fn test_clone_does_not_alias() {
        let mut original = SparseMatrix::new(2, 2);
        original.set(0, 1, 1u32).unwrap();
        let copy = original.clone();
        original.set(1, 0, 2).unwrap();

        assert_eq!(copy.nnz(), 1);
        assert_eq!(original.nnz(), 2);
    }

    #[test]
    fn test_transpose() {
        let mut matrix = SparseMatrix::new(2, 3);
        matrix.set(0, 2, 'a').unwrap();
        matrix.set(1, 0, 'b').unwrap();
        matrix.set(1, 2, 'c').unwrap();

        let transposed = matrix.transpose();
        assert_eq!(transposed.dimensions(), (3, 2));
        assert_eq!(transposed.row(2).unwrap().columns, &[0, 1]);
        assert_eq!(transposed.row(2).unwrap().values, &['a', 'c']);
        assert_eq!(transposed.get(0, 1), Some(&'b'));
        assert_eq!(transposed.transpose(), matrix);
    }

    #[test]
    fn test_clear_keeps_dimensions() {
        let mut matrix = SparseMatrix::new(2, 2);
        matrix.set(1, 1, 1u32).unwrap();
        matrix.clear();
        assert!(matrix.is_empty());
        assert_eq!(matrix.dimensions(), (2, 2));
        assert!(matrix.row(1).unwrap().is_empty());
    }

    #[test]
    fn test_from_triplets_keeps_last_value() {
        let matrix =
            SparseMatrix::from_triplets(2, 2, vec![(1, 1, 1u32), (0, 0, 2), (1, 1, 3)]).unwrap();
        assert_eq!(matrix.nnz(), 2);
        assert_eq!(matrix.get(1, 1), Some(&3));
    }

    fn cells_with_repeats(n_rows: u32) -> Vec<(u32, u32, u32)> {
        (0..n_rows)
            .rev()
            .map(|row| (row, row % 97, row))
            .chain((0..n_rows).step_by(3).map(|row| (row, row % 97, row + 1)))
            .collect()
    }

    #[test]
    fn test_from_triplets_matches_set() {
        let cells = cells_with_repeats(2_000);
        let mut expected = SparseMatrix::new(2_000, 97);
        for &(row, column, value) in &cells {
            expected.set(row, column, value).unwrap();
        }
        assert_eq!(SparseMatrix::from_triplets(2_000, 97, cells).unwrap(), expected);
    }

    #[test]
    fn test_from_triplets_large() {
        let n_rows = 100_000u32;
        let built = SparseMatrix::from_triplets(n_rows, 97, cells_with_repeats(n_rows)).unwrap();

        assert_eq!(built.nnz(), n_rows as usize);
        for row in 0..n_rows {
            let view = built.row(row).unwrap();
            let value = if row % 3 == 0 { row + 1 } else { row };
            assert_eq!(view.columns, &[row % 97]);
            assert_eq!(view.values, &[value]);
        }
    }

    #[test]
    fn test_from_triplets_empty_rows_between() {
        let matrix =
            SparseMatrix::from_triplets(5, 3, vec![(4, 2, 1u32), (0, 1, 2), (4, 0, 3)]).unwrap();
        assert_eq!(matrix.row(0).unwrap().columns, &[1]);
        assert!(matrix.row(1).unwrap().is_empty());
        assert!(matrix.row(3).unwrap().is_empty());
        assert_eq!(matrix.row(4).unwrap().columns, &[0, 2]);
        assert_eq!(matrix.row(4).unwrap().values, &[3, 1]);
    }

    #[test]
    fn test_snapshot_rejects_bad_cells() {
        let snapshot = SerializableSparseMatrix {
            n_rows: 1,
            n_columns: 1,
            cells: vec![(0, 4, 0u32)],
        };
        assert!(matches!(
            SparseMatrix::try_from_serializable(snapshot),
            Err(SparseError::InvalidSnapshot(_))
        ));

        let repeated = SerializableSparseMatrix {
            n_rows: 1,
            n_columns: 1,
            cells: vec![(0, 0, 0u32), (0, 0, 1)],
        };
        assert!(SparseMatrix::try_from_serializable(repeated).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_snapshot_json() {
        let mut matrix = SparseMatrix::new(3, 2);
        matrix.set(1, 0, 0u32).unwrap();
        matrix.set(2, 1, 1).unwrap();

        let json = serde_json::to_string(&matrix.to_serializable()).unwrap();
        let snapshot: SerializableSparseMatrix<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(SparseMatrix::try_from_serializable(snapshot).unwrap(), matrix);
    }

    fn cells() -> impl Strategy<Value = Vec<(u32, u32, u32)>> {
        prop::collection::vec((0u32..8, 0u32..6, any::<u32>()), 0..40)
    }

    proptest! {
        #[test]
        fn test_row_and_column_agree(cells in cells()) {
            let mut matrix = SparseMatrix::new(8, 6);
            for &(row, column, value) in &cells {
                matrix.set(row, column, value).unwrap();
            }
            for (row, column, value) in matrix.iter() {
                let row_view = matrix.row(row).unwrap();
                prop_assert!(row_view.iter().any(|(c, v)| c == column && v == value));
                let column_view = matrix.column(column).unwrap();
                prop_assert!(column_view.iter().any(|(r, v)| r == row && v == value));
            }
        }

        #[test]
        fn test_enumeration_strictly_ascending(cells in cells()) {
            let matrix = SparseMatrix::from_triplets(8, 6, cells).unwrap();
            for row in 0..8 {
                let columns = matrix.row(row).unwrap().columns;
                prop_assert!(columns.windows(2).all(|w| w[0] < w[1]));
            }
            for column in 0..6 {
                let first = matrix.column(column).unwrap();
                prop_assert!(first.rows.windows(2).all(|w| w[0] < w[1]));
                prop_assert_eq!(first, matrix.column(column).unwrap());
            }
        }

        #[test]
        fn test_last_write_wins(cells in cells()) {
            let mut matrix = SparseMatrix::new(8, 6);
            let mut expected = std::collections::BTreeMap::new();
            for &(row, column, value) in &cells {
                matrix.set(row, column, value).unwrap();
                expected.insert((row, column), value);
            }
            prop_assert_eq!(matrix.nnz(), expected.len());
            for ((row, column), value) in expected {
                prop_assert_eq!(matrix.get(row, column), Some(&value));
            }
        }
    }
}
