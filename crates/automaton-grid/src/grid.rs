//! Fixed-size cell grid.
//!
//! A [`Grid`] is a `rows x cols` array of integer cell states stored
//! row-major. Dimensions are fixed at construction. Rule engines never
//! mutate a grid while scanning it: [`Grid::derive`] reads the frozen
//! current state and writes a fresh buffer, which then replaces the old
//! grid wholesale.
//!
//! # Pattern placement
//!
//! [`Grid::place_pattern`] centers a [`Pattern`] on an otherwise empty grid.
//! A pattern larger than the grid is cut from the bottom and right rather
//! than rejected; the returned [`Placement`] records whether that happened.

use automaton_types::{Pattern, cell};
use rand::Rng;
use tracing::debug;

use crate::error::GridError;

/// Probability of a live cell in a random fill when none is configured.
///
/// Matches a uniform draw from `{0, 1}`.
pub const DEFAULT_DENSITY: f64 = 0.5;

/// How a new grid is populated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    /// Every cell dead.
    Empty,
    /// Each cell independently alive with probability `density`.
    Random {
        /// Probability of a live cell, clamped to `[0, 1]`.
        density: f64,
    },
}

/// Where a pattern landed on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// First grid row covered by the pattern.
    pub row_offset: usize,
    /// First grid column covered by the pattern.
    pub col_offset: usize,
    /// Pattern rows actually copied.
    pub rows_used: usize,
    /// Pattern columns actually copied.
    pub cols_used: usize,
    /// Whether part of the pattern was cut off at the bottom or right.
    pub truncated: bool,
}

/// Number of cells in each state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateCounts {
    /// Cells in state 0.
    pub dead: usize,
    /// Cells in state 1 (binary alive / emotional neutral).
    pub neutral: usize,
    /// Cells in state 2.
    pub happy: usize,
    /// Cells in state 3.
    pub angry: usize,
}

impl StateCounts {
    /// All non-dead cells.
    pub const fn alive(&self) -> usize {
        self.neutral
            .saturating_add(self.happy)
            .saturating_add(self.angry)
    }
}

/// A fixed-size, row-major grid of cell states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Create a grid with every cell dead.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is zero.
    pub fn empty(rows: usize, cols: usize) -> Result<Self, GridError> {
        let len = checked_len(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![cell::DEAD; len],
        })
    }

    /// Create a grid where each cell is alive with probability `density`.
    ///
    /// Density is clamped to `[0, 1]`; a non-finite density falls back to
    /// [`DEFAULT_DENSITY`].
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is zero.
    pub fn random<R: Rng>(
        rows: usize,
        cols: usize,
        density: f64,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        Ok(Self::empty(rows, cols)?.randomized(density, rng))
    }

    /// Create a grid with the given [`Fill`].
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is zero.
    pub fn create<R: Rng>(
        rows: usize,
        cols: usize,
        fill: Fill,
        rng: &mut R,
    ) -> Result<Self, GridError> {
        match fill {
            Fill::Empty => Self::empty(rows, cols),
            Fill::Random { density } => Self::random(rows, cols, density, rng),
        }
    }

    /// Build a grid from explicit rows of states.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] for an empty input,
    /// [`GridError::Ragged`] for rows of unequal length, and
    /// [`GridError::InvalidState`] for a value above the largest state.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, GridError> {
        let cols = rows.first().map_or(0, Vec::len);
        let len = checked_len(rows.len(), cols)?;
        let mut cells = Vec::with_capacity(len);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: index,
                    expected: cols,
                    found: row.len(),
                });
            }
            if let Some(&bad) = row.iter().find(|&&v| v > cell::MAX_STATE) {
                return Err(GridError::InvalidState(bad));
            }
            cells.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    /// Create an empty `rows x cols` grid with `pattern` centered on it.
    ///
    /// The offset is `max((rows - pattern_rows) / 2, 0)` per axis. Any part
    /// of the pattern that does not fit is dropped from the bottom/right.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is zero.
    pub fn place_pattern(
        rows: usize,
        cols: usize,
        pattern: &Pattern,
    ) -> Result<(Self, Placement), GridError> {
        let mut grid = Self::empty(rows, cols)?;
        let placement = grid.stamp_centered(pattern);
        Ok((grid, placement))
    }

    /// A dead grid with the same dimensions.
    pub fn cleared(&self) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            cells: vec![cell::DEAD; self.cells.len()],
        }
    }

    /// A freshly randomized grid with the same dimensions.
    ///
    /// Density is clamped to `[0, 1]`; a non-finite density falls back to
    /// [`DEFAULT_DENSITY`].
    pub fn randomized<R: Rng>(&self, density: f64, rng: &mut R) -> Self {
        let p = sanitize_density(density);
        let cells = (0..self.cells.len())
            .map(|_| if rng.random_bool(p) { cell::ALIVE } else { cell::DEAD })
            .collect();
        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Copy `pattern` onto this grid, centered, cutting it at the
    /// bottom/right if it does not fit. Cells outside the pattern's
    /// footprint are left as they are.
    pub fn stamp_centered(&mut self, pattern: &Pattern) -> Placement {
        let row_offset = self.rows.saturating_sub(pattern.rows()) / 2;
        let col_offset = self.cols.saturating_sub(pattern.cols()) / 2;
        let row_end = row_offset.saturating_add(pattern.rows()).min(self.rows);
        let col_end = col_offset.saturating_add(pattern.cols()).min(self.cols);
        let rows_used = row_end.saturating_sub(row_offset);
        let cols_used = col_end.saturating_sub(col_offset);

        for pattern_row in 0..rows_used {
            let Some(source) = pattern.row(pattern_row).and_then(|r| r.get(..cols_used)) else {
                continue;
            };
            let Some(start) = self.index(row_offset.saturating_add(pattern_row), col_offset) else {
                continue;
            };
            if let Some(target) = self.cells.get_mut(start..start.saturating_add(cols_used)) {
                target.copy_from_slice(source);
            }
        }

        let placement = Placement {
            row_offset,
            col_offset,
            rows_used,
            cols_used,
            truncated: rows_used < pattern.rows() || cols_used < pattern.cols(),
        };

        if placement.truncated {
            debug!(
                pattern_rows = pattern.rows(),
                pattern_cols = pattern.cols(),
                rows = self.rows,
                cols = self.cols,
                "pattern larger than grid, truncated at bottom/right"
            );
        }

        placement
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// The state at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.index(row, col).and_then(|i| self.cells.get(i).copied())
    }

    /// Write a single cell.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfBounds`] for a coordinate outside the grid
    /// and [`GridError::InvalidState`] for a value above the largest state.
    pub fn set(&mut self, row: usize, col: usize, state: u8) -> Result<(), GridError> {
        if state > cell::MAX_STATE {
            return Err(GridError::InvalidState(state));
        }
        let slot = self
            .index(row, col)
            .and_then(|i| self.cells.get_mut(i))
            .ok_or(GridError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })?;
        *slot = state;
        Ok(())
    }

    /// Set a cell dead. Returns `false` if the coordinate is outside the grid.
    pub fn clear_cell(&mut self, row: usize, col: usize) -> bool {
        match self.index(row, col).and_then(|i| self.cells.get_mut(i)) {
            Some(slot) => {
                *slot = cell::DEAD;
                true
            }
            None => false,
        }
    }

    /// Raw row-major cell storage.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> Option<&[u8]> {
        let start = self.index(row, 0)?;
        self.cells.get(start..start.saturating_add(self.cols))
    }

    /// Iterate `(row, col, state)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.cells
            .chunks_exact(self.cols)
            .enumerate()
            .flat_map(|(r, row)| row.iter().enumerate().map(move |(c, &v)| (r, c, v)))
    }

    /// Build the next grid from this frozen one.
    ///
    /// `rule` receives `(row, col, current_state)` and returns the new state,
    /// which is capped at the largest valid state. `self` is never touched,
    /// so every call to `rule` observes the same snapshot.
    pub fn derive<F>(&self, mut rule: F) -> Self
    where
        F: FnMut(usize, usize, u8) -> u8,
    {
        let cells = self
            .iter()
            .map(|(r, c, v)| rule(r, c, v).min(cell::MAX_STATE))
            .collect();
        Self {
            rows: self.rows,
            cols: self.cols,
            cells,
        }
    }

    /// Number of non-dead cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&v| cell::is_alive(v)).count()
    }

    /// Per-state cell counts.
    pub fn state_counts(&self) -> StateCounts {
        let mut counts = StateCounts::default();
        for &value in &self.cells {
            let bucket = match value {
                cell::DEAD => &mut counts.dead,
                cell::NEUTRAL => &mut counts.neutral,
                cell::HAPPY => &mut counts.happy,
                _ => &mut counts.angry,
            };
            *bucket = bucket.saturating_add(1);
        }
        counts
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        row.checked_mul(self.cols)?.checked_add(col)
    }
}

fn checked_len(rows: usize, cols: usize) -> Result<usize, GridError> {
    if rows == 0 || cols == 0 {
        return Err(GridError::InvalidDimensions { rows, cols });
    }
    rows.checked_mul(cols)
        .ok_or(GridError::InvalidDimensions { rows, cols })
}

fn sanitize_density(density: f64) -> f64 {
    if density.is_finite() {
        density.clamp(0.0, 1.0)
    } else {
        DEFAULT_DENSITY
    }
}
