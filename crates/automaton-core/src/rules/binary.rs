//! Life-like binary rules.
//!
//! A live cell whose live-neighbor count is not in `survive` dies; a dead
//! cell whose count is in `birth` comes alive; every other cell keeps its
//! state. Any non-zero value counts as live, so emotional states left over
//! from a mode switch survive unchanged or die, but are never reborn as
//! anything other than `1`.

use automaton_grid::{Grid, live_neighbors};
use automaton_types::{RuleSet, cell};

/// Compute the next binary generation from a frozen grid.
pub fn next_generation(current: &Grid, rules: &RuleSet) -> Grid {
    current.derive(|row, col, state| {
        let count = live_neighbors(current, row, col);
        if cell::is_alive(state) {
            if rules.survives(count) { state } else { cell::DEAD }
        } else if rules.is_born(count) {
            cell::ALIVE
        } else {
            cell::DEAD
        }
    })
}
