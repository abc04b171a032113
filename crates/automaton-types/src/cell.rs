//! Cell-state constants.
//!
//! Cells are stored as small integers. Binary mode uses only [`DEAD`] and
//! [`ALIVE`]; emotional mode reuses `1` as [`NEUTRAL`] and adds [`HAPPY`]
//! and [`ANGRY`]. No grid ever stores a value above [`MAX_STATE`].

/// An empty cell in either mode.
pub const DEAD: u8 = 0;

/// A live cell in binary mode.
pub const ALIVE: u8 = 1;

/// A live, neutral cell in emotional mode (same value as [`ALIVE`]).
pub const NEUTRAL: u8 = 1;

/// A live, happy cell in emotional mode.
pub const HAPPY: u8 = 2;

/// A live, angry cell in emotional mode. Angry cells clear their
/// neighborhood every generation.
pub const ANGRY: u8 = 3;

/// The largest state value any mode can produce.
pub const MAX_STATE: u8 = ANGRY;

/// Whether a raw value counts as alive for neighbor counting.
pub const fn is_alive(state: u8) -> bool {
    state != DEAD
}
