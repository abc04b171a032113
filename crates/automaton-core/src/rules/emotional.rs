//! Four-state "emotional" rules.
//!
//! States: dead (0), neutral (1), happy (2), angry (3). Each generation is
//! computed in two phases over one frozen snapshot of the current grid:
//!
//! 1. **Transitions.** Every cell's own next state is written to a fresh
//!    buffer:
//!    - a live cell with 2 live neighbors becomes happy, 3 neutral, 4
//!      angry, and any other count dies;
//!    - a dead cell with exactly 2 happy neighbors is born neutral, and
//!      otherwise stays dead.
//! 2. **Kills.** Every *kill source* clears all of its in-bounds neighbors
//!    in the fresh buffer. Kill sources are angry cells, and dead cells
//!    with exactly one angry neighbor.
//!
//! Kills are applied after all transitions and only ever write `0`, so a
//! kill always overrides a birth or transition on the same coordinate and
//! the result does not depend on scan order. A kill source does not clear
//! itself; its own next state comes from phase 1.

use automaton_grid::{Grid, NeighborTally, neighbor_coords, tally};
use automaton_types::cell;
use tracing::trace;

use super::Generation;

/// Compute the next emotional generation from a frozen grid.
pub fn next_generation(current: &Grid) -> Generation {
    let mut kill_sources = Vec::new();

    let mut next = current.derive(|row, col, state| {
        let neighbors = tally(current, row, col);
        if is_kill_source(state, neighbors) {
            kill_sources.push((row, col));
        }
        transition(state, neighbors)
    });

    for &(row, col) in &kill_sources {
        for (r, c) in neighbor_coords(current, row, col) {
            next.clear_cell(r, c);
        }
    }

    trace!(detonations = kill_sources.len(), "emotional generation computed");

    Generation {
        grid: next,
        detonations: kill_sources.len(),
    }
}

/// A cell's own next state, ignoring kills.
const fn transition(state: u8, neighbors: NeighborTally) -> u8 {
    if cell::is_alive(state) {
        match neighbors.alive {
            2 => cell::HAPPY,
            3 => cell::NEUTRAL,
            4 => cell::ANGRY,
            _ => cell::DEAD,
        }
    } else if neighbors.happy == 2 {
        cell::NEUTRAL
    } else {
        cell::DEAD
    }
}

const fn is_kill_source(state: u8, neighbors: NeighborTally) -> bool {
    state == cell::ANGRY || (state == cell::DEAD && neighbors.angry == 1)
}
