//! Cell grid and neighborhood counting for the automaton simulator.
//!
//! This crate models the board itself: a fixed-size, row-major array of
//! integer cell states, the centered placement of preset patterns, and the
//! edge-clipped Moore-neighborhood statistics the rule engines consume.
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid construction and cell writes.
//! - [`grid`] -- [`Grid`] storage, random and empty fills, pattern placement.
//! - [`neighborhood`] -- Live-neighbor counts and emotional tallies.

pub mod error;
pub mod grid;
pub mod neighborhood;

// Re-export primary types at crate root.
pub use error::GridError;
pub use grid::{DEFAULT_DENSITY, Fill, Grid, Placement, StateCounts};
pub use neighborhood::{NeighborTally, live_neighbors, neighbor_coords, tally};
