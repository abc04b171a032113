//! Shared type definitions for the automaton simulator.
//!
//! This crate is the single source of truth for the vocabulary used across
//! the workspace: the integer cell states, the active rule [`Mode`], the
//! life-like [`RuleSet`], and the binary [`Pattern`] carried by presets.
//!
//! # Modules
//!
//! - [`cell`] -- Cell-state constants shared by both rule families.
//! - [`enums`] -- The [`Mode`] enumeration.
//! - [`rule_set`] -- Survive/birth neighbor-count sets for binary mode.
//! - [`pattern`] -- Rectangular 0/1 patterns loaded from preset sources.

pub mod cell;
pub mod enums;
pub mod pattern;
pub mod rule_set;

// Re-export primary types at crate root.
pub use enums::Mode;
pub use pattern::{Pattern, PatternError};
pub use rule_set::{MAX_NEIGHBORS, RuleSet, RuleSpec};
