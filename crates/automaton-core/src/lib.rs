//! Simulation core for the automaton simulator.
//!
//! This crate owns everything between the board and the presentation
//! layer: the two rule engines, the [`Automaton`] controller that the
//! presentation layer drives once per tick, the rule and preset sources,
//! configuration loading, and the cooperative tick runner.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `automaton-config.yaml` into
//!   strongly-typed structs.
//! - [`controller`] -- [`Automaton`]: active grid, mode, pause state, and
//!   the per-tick [`step`](controller::Automaton::step).
//! - [`rules`] -- Binary life-like and four-state emotional update rules.
//! - [`runner`] -- Fixed-interval tick loop with stop and bounds handling.
//! - [`sources`] -- Rule and preset sources with documented fallbacks.
//!
//! [`Automaton`]: controller::Automaton

pub mod config;
pub mod controller;
pub mod rules;
pub mod runner;
pub mod sources;

// Re-export primary types at crate root.
pub use controller::{Automaton, AutomatonOptions, GenerationSummary, PresetLoad};
pub use sources::{Preset, PresetLibrary, RANDOM_PRESET};
