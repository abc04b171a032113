//! Moore-neighborhood statistics.
//!
//! Every cell has up to eight neighbors at offsets `{-1, 0, 1}^2` minus the
//! cell itself. The board does not wrap: coordinates that fall outside
//! `[0, rows) x [0, cols)` are skipped, so edge cells have five neighbors
//! and corner cells three.

use automaton_types::cell;

use crate::grid::Grid;

/// The eight Moore offsets as `(row_delta, col_delta)`.
const OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Neighbor statistics used by the emotional rule family.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NeighborTally {
    /// Neighbors in any non-dead state.
    pub alive: u8,
    /// Neighbors in the happy state.
    pub happy: u8,
    /// Neighbors in the angry state.
    pub angry: u8,
}

/// In-bounds neighbor coordinates of `(row, col)`.
pub fn neighbor_coords(
    grid: &Grid,
    row: usize,
    col: usize,
) -> impl Iterator<Item = (usize, usize)> + '_ {
    OFFSETS.iter().filter_map(move |&(dr, dc)| {
        let r = row.checked_add_signed(dr)?;
        let c = col.checked_add_signed(dc)?;
        (r < grid.rows() && c < grid.cols()).then_some((r, c))
    })
}

/// Number of live neighbors of `(row, col)`.
///
/// Any non-zero state counts as alive, so emotional states left on the
/// board after a mode switch still contribute.
pub fn live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    neighbor_states(grid, row, col).fold(0_u8, |count, state| {
        if cell::is_alive(state) {
            count.saturating_add(1)
        } else {
            count
        }
    })
}

/// Alive, happy, and angry neighbor counts of `(row, col)`.
pub fn tally(grid: &Grid, row: usize, col: usize) -> NeighborTally {
    let mut tally = NeighborTally::default();
    for state in neighbor_states(grid, row, col) {
        if cell::is_alive(state) {
            tally.alive = tally.alive.saturating_add(1);
        }
        match state {
            cell::HAPPY => tally.happy = tally.happy.saturating_add(1),
            cell::ANGRY => tally.angry = tally.angry.saturating_add(1),
            _ => {}
        }
    }
    tally
}

fn neighbor_states(grid: &Grid, row: usize, col: usize) -> impl Iterator<Item = u8> + '_ {
    neighbor_coords(grid, row, col).filter_map(|(r, c)| grid.get(r, c))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn full(rows: usize, cols: usize, state: u8) -> Grid {
        Grid::from_rows(&vec![vec![state; cols]; rows]).unwrap()
    }

    #[test]
    fn corner_sees_three_neighbors() {
        let grid = full(4, 4, cell::ALIVE);
        assert_eq!(neighbor_coords(&grid, 0, 0).count(), 3);
        assert_eq!(live_neighbors(&grid, 0, 0), 3);
        assert_eq!(live_neighbors(&grid, 3, 3), 3);
    }

    #[test]
    fn edge_sees_five_and_interior_eight() {
        let grid = full(4, 4, cell::ALIVE);
        assert_eq!(live_neighbors(&grid, 0, 1), 5);
        assert_eq!(live_neighbors(&grid, 2, 2), 8);
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        let grid = full(1, 1, cell::ALIVE);
        assert_eq!(neighbor_coords(&grid, 0, 0).count(), 0);
        assert_eq!(live_neighbors(&grid, 0, 0), 0);
    }

    #[test]
    fn cell_itself_is_not_counted() {
        let grid = Grid::from_rows(&[vec![0, 0, 0], vec![0, 1, 0], vec![0, 0, 0]]).unwrap();
        assert_eq!(live_neighbors(&grid, 1, 1), 0);
        assert_eq!(live_neighbors(&grid, 0, 0), 1);
    }

    #[test]
    fn no_wraparound() {
        let grid = Grid::from_rows(&[vec![1, 0, 0, 1]]).unwrap();
        assert_eq!(live_neighbors(&grid, 0, 0), 0);
        assert_eq!(live_neighbors(&grid, 0, 3), 0);
    }

    #[test]
    fn emotional_tally_splits_states() {
        let grid = Grid::from_rows(&[
            vec![cell::HAPPY, cell::NEUTRAL, cell::ANGRY],
            vec![cell::HAPPY, cell::DEAD, cell::DEAD],
            vec![cell::DEAD, cell::ANGRY, cell::DEAD],
        ])
        .unwrap();
        let t = tally(&grid, 1, 1);
        assert_eq!(
            t,
            NeighborTally {
                alive: 5,
                happy: 2,
                angry: 2
            }
        );
    }

    #[test]
    fn non_binary_states_count_as_live() {
        let grid = Grid::from_rows(&[vec![cell::HAPPY, cell::DEAD, cell::ANGRY]]).unwrap();
        assert_eq!(live_neighbors(&grid, 0, 1), 2);
    }
}
