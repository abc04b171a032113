//! Rectangular binary patterns carried by presets.
//!
//! Preset sources describe patterns as nested arrays of integers. Any
//! non-zero entry is treated as a live cell, so a pattern is always 0/1
//! regardless of what the source contained.

use crate::cell;

/// Errors raised when building a [`Pattern`] from nested rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// The pattern had no rows or its rows had no columns.
    #[error("pattern is empty")]
    Empty,

    /// A row's length differs from the first row's.
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
}

/// A rectangular 0/1 pattern stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Pattern {
    /// Build a pattern from nested rows, coercing non-zero values to live.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError::Empty`] for a pattern without cells and
    /// [`PatternError::Ragged`] when rows differ in length.
    pub fn from_rows(rows: &[Vec<i64>]) -> Result<Self, PatternError> {
        let cols = rows.first().map_or(0, Vec::len);
        if cols == 0 {
            return Err(PatternError::Empty);
        }

        let mut cells = Vec::with_capacity(rows.len().saturating_mul(cols));
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(PatternError::Ragged {
                    row: index,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(
                row.iter()
                    .map(|&value| if value == 0 { cell::DEAD } else { cell::ALIVE }),
            );
        }

        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// The cell at `(row, col)`, or `None` outside the pattern.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let index = row.checked_mul(self.cols)?.checked_add(col)?;
        self.cells.get(index).copied()
    }

    /// One row of the pattern as a slice.
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        let start = row.checked_mul(self.cols)?;
        let end = start.checked_add(self.cols)?;
        self.cells.get(start..end)
    }

    /// Number of live cells.
    pub fn live_cells(&self) -> usize {
        self.cells.iter().filter(|&&c| cell::is_alive(c)).count()
    }
}
