//! Per-generation update rules.
//!
//! Both rule families read one frozen [`Grid`] and produce a fresh one;
//! neither ever writes into the grid it is scanning. [`next_generation`]
//! picks the family from the active [`Mode`] once per tick.
//!
//! - [`binary`] -- Life-like survive/birth rules over a [`RuleSet`].
//! - [`emotional`] -- Four-state rules with angry-cell kill propagation.

pub mod binary;
pub mod emotional;

use automaton_grid::Grid;
use automaton_types::{Mode, RuleSet};

/// The result of advancing one generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// The next grid.
    pub grid: Grid,
    /// Number of cells that cleared their neighborhood this generation.
    /// Always zero in binary mode.
    pub detonations: usize,
}

/// Advance `grid` by one generation under `mode`.
///
/// `rules` is only consulted in [`Mode::Binary`].
pub fn next_generation(mode: Mode, grid: &Grid, rules: &RuleSet) -> Generation {
    match mode {
        Mode::Binary => Generation {
            grid: binary::next_generation(grid, rules),
            detonations: 0,
        },
        Mode::Emotional => emotional::next_generation(grid),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use automaton_types::cell;

    use super::*;

    #[test]
    fn dispatch_follows_mode() {
        // Binary mode treats the angry value as an ordinary live cell;
        // emotional mode clears its neighborhood.
        let grid = Grid::from_rows(&[
            vec![1, 1, 0],
            vec![0, cell::ANGRY, 0],
            vec![0, 0, 0],
        ])
        .unwrap();

        let binary = next_generation(Mode::Binary, &grid, &RuleSet::default());
        assert_eq!(binary.detonations, 0);
        assert_eq!(binary.grid.get(1, 1), Some(cell::ANGRY));
        assert_eq!(binary.grid.get(0, 0), Some(cell::ALIVE));

        let emotional = next_generation(Mode::Emotional, &grid, &RuleSet::default());
        assert!(emotional.detonations >= 1);
        assert_eq!(emotional.grid.get(0, 0), Some(cell::DEAD));
        assert_eq!(emotional.grid.get(0, 1), Some(cell::DEAD));
    }
}
