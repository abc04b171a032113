//! Enumeration types for the automaton simulator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell;

/// The active rule family.
///
/// The mode decides which update strategy runs each generation and which
/// cell states are meaningful. Switching modes never rewrites the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Classic two-state life-like rules driven by a [`RuleSet`].
    ///
    /// [`RuleSet`]: crate::RuleSet
    #[default]
    Binary,
    /// Four-state automaton: dead, neutral, happy, angry.
    Emotional,
}

impl Mode {
    /// The largest cell value this mode produces.
    pub const fn max_state(self) -> u8 {
        match self {
            Self::Binary => cell::ALIVE,
            Self::Emotional => cell::MAX_STATE,
        }
    }

    /// Whether `state` lies in this mode's valid range.
    pub const fn is_valid_state(self, state: u8) -> bool {
        state <= self.max_state()
    }

    /// The other mode.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Binary => Self::Emotional,
            Self::Emotional => Self::Binary,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary => f.write_str("binary"),
            Self::Emotional => f.write_str("emotional"),
        }
    }
}
