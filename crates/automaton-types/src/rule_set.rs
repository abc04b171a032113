//! Survive/birth neighbor-count sets for the binary rule family.
//!
//! A [`RuleSet`] generalizes Conway's B3/S23 to any life-like rule: a live
//! cell survives when its live-neighbor count is in `survive`, and a dead
//! cell is born when its count is in `birth`. Counts are always within
//! `0..=MAX_NEIGHBORS`; anything else could never match a Moore
//! neighborhood and is discarded on construction.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of cells in a Moore neighborhood.
pub const MAX_NEIGHBORS: u8 = 8;

/// Survive and birth counts for binary mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    /// Neighbor counts at which a live cell stays alive.
    survive: BTreeSet<u8>,
    /// Neighbor counts at which a dead cell becomes alive.
    birth: BTreeSet<u8>,
}

impl Default for RuleSet {
    /// Conway's Game of Life: survive on 2 or 3, birth on 3.
    fn default() -> Self {
        Self {
            survive: BTreeSet::from([2, 3]),
            birth: BTreeSet::from([3]),
        }
    }
}

impl RuleSet {
    /// Build a rule set from arbitrary counts.
    ///
    /// Counts above [`MAX_NEIGHBORS`] are dropped. Duplicates collapse.
    pub fn new(
        survive: impl IntoIterator<Item = u8>,
        birth: impl IntoIterator<Item = u8>,
    ) -> Self {
        Self {
            survive: survive.into_iter().filter(|&c| c <= MAX_NEIGHBORS).collect(),
            birth: birth.into_iter().filter(|&c| c <= MAX_NEIGHBORS).collect(),
        }
    }

    /// Build a rule set from untrusted integers, returning the values that
    /// were discarded for being outside `0..=8`.
    pub fn from_counts(survive: &[i64], birth: &[i64]) -> (Self, Vec<i64>) {
        let mut rejected = Vec::new();
        let mut keep = |counts: &[i64]| -> BTreeSet<u8> {
            let mut set = BTreeSet::new();
            for &raw in counts {
                match u8::try_from(raw) {
                    Ok(count) if count <= MAX_NEIGHBORS => {
                        set.insert(count);
                    }
                    _ => rejected.push(raw),
                }
            }
            set
        };
        let survive = keep(survive);
        let birth = keep(birth);
        (Self { survive, birth }, rejected)
    }

    /// Whether a live cell with `count` live neighbors survives.
    pub fn survives(&self, count: u8) -> bool {
        self.survive.contains(&count)
    }

    /// Whether a dead cell with `count` live neighbors is born.
    pub fn is_born(&self, count: u8) -> bool {
        self.birth.contains(&count)
    }

    /// The survive counts, ascending.
    pub const fn survive(&self) -> &BTreeSet<u8> {
        &self.survive
    }

    /// The birth counts, ascending.
    pub const fn birth(&self) -> &BTreeSet<u8> {
        &self.birth
    }
}

impl fmt::Display for RuleSet {
    /// Formats as `B3/S23`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("B")?;
        for count in &self.birth {
            write!(f, "{count}")?;
        }
        f.write_str("/S")?;
        for count in &self.survive {
            write!(f, "{count}")?;
        }
        Ok(())
    }
}

/// The on-disk rule source shape: `{"survive": [...], "birth": [...]}`.
///
/// Both keys are required. Values are kept as wide integers so that
/// out-of-range counts can be reported instead of failing the whole
/// document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RuleSpec {
    /// Raw survive counts.
    pub survive: Vec<i64>,
    /// Raw birth counts.
    pub birth: Vec<i64>,
}

impl RuleSpec {
    /// Convert into a [`RuleSet`], returning any rejected counts.
    pub fn into_rule_set(self) -> (RuleSet, Vec<i64>) {
        RuleSet::from_counts(&self.survive, &self.birth)
    }
}
