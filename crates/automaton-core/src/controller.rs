//! The automaton controller.
//!
//! [`Automaton`] owns the active grid, the active [`Mode`], the binary
//! [`RuleSet`], the preset library, and the pause flag. The presentation
//! layer (the tick runner, or any other driver) calls
//! [`step`](Automaton::step) once per tick and forwards user intents to the
//! remaining operations.
//!
//! The grid is replaced wholesale each generation. Nothing here blocks or
//! spawns work, so a single owner can drive it without locking.

use automaton_grid::{DEFAULT_DENSITY, Grid, GridError, Placement, StateCounts};
use automaton_types::{Mode, RuleSet};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tracing::{debug, info, warn};

use crate::rules;
use crate::sources::{Preset, PresetLibrary, RANDOM_PRESET};

/// Construction-time settings for an [`Automaton`].
#[derive(Debug, Clone)]
pub struct AutomatonOptions {
    /// Binary-mode survive/birth counts.
    pub rules: RuleSet,
    /// Named presets available to [`Automaton::load_preset`].
    pub presets: PresetLibrary,
    /// Probability of a live cell when the board is randomized.
    pub density: f64,
    /// Seed for reproducible random boards. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for AutomatonOptions {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            presets: PresetLibrary::default(),
            density: DEFAULT_DENSITY,
            seed: None,
        }
    }
}

/// What [`Automaton::load_preset`] did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetLoad {
    /// The board was refilled at random.
    Randomized,
    /// A pattern was centered on an empty board.
    Placed(Placement),
}

/// Snapshot of the board after a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationSummary {
    /// Generations advanced since the board was last loaded.
    pub generation: u64,
    /// Mode the generation ran under.
    pub mode: Mode,
    /// Number of non-dead cells.
    pub population: usize,
    /// Per-state cell counts.
    pub counts: StateCounts,
    /// Kill sources triggered this generation (emotional mode only).
    pub detonations: usize,
    /// Cells whose state differs from the previous generation.
    pub changed: usize,
}

/// Holds the simulation state and advances it one generation per tick.
#[derive(Debug)]
pub struct Automaton {
    grid: Grid,
    mode: Mode,
    rules: RuleSet,
    presets: PresetLibrary,
    paused: bool,
    generation: u64,
    density: f64,
    rng: SmallRng,
}

impl Automaton {
    /// Create a controller with a randomized `rows x cols` board.
    ///
    /// The controller starts paused, in [`Mode::Binary`], at generation 0.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidDimensions`] if either dimension is zero.
    pub fn new(rows: usize, cols: usize, options: AutomatonOptions) -> Result<Self, GridError> {
        let mut rng = options
            .seed
            .map_or_else(|| SmallRng::from_rng(&mut rand::rng()), SmallRng::seed_from_u64);
        let grid = Grid::random(rows, cols, options.density, &mut rng)?;

        info!(
            rows,
            cols,
            rules = %options.rules,
            presets = options.presets.len(),
            seed = ?options.seed,
            "Automaton created"
        );

        Ok(Self {
            grid,
            mode: Mode::default(),
            rules: options.rules,
            presets: options.presets,
            paused: true,
            generation: 0,
            density: options.density,
            rng,
        })
    }

    /// Advance one generation unless paused.
    ///
    /// Returns `None` and leaves the grid untouched while paused.
    pub fn step(&mut self) -> Option<GenerationSummary> {
        if self.paused {
            return None;
        }

        let next = rules::next_generation(self.mode, &self.grid, &self.rules);
        let changed = self
            .grid
            .cells()
            .iter()
            .zip(next.grid.cells())
            .filter(|(before, after)| before != after)
            .count();

        self.grid = next.grid;
        self.generation = self.generation.saturating_add(1);

        let summary = GenerationSummary {
            detonations: next.detonations,
            changed,
            ..self.summary()
        };
        debug!(
            generation = summary.generation,
            mode = %summary.mode,
            population = summary.population,
            changed,
            detonations = summary.detonations,
            "Generation advanced"
        );
        Some(summary)
    }

    /// Switch the active rule family. The grid is left as it is.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            info!(from = %self.mode, to = %mode, "Mode changed");
            self.mode = mode;
        }
    }

    /// Switch to the other rule family and return it.
    pub fn toggle_mode(&mut self) -> Mode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    /// Replace the board with a preset and pause.
    ///
    /// [`Preset::Random`] (including [`RANDOM_PRESET`]) refills the board at
    /// random. A pattern is centered on an empty board, truncated at the
    /// bottom/right if it does not fit. An unknown name is treated as
    /// [`RANDOM_PRESET`]. The generation counter restarts at 0.
    pub fn load_preset(&mut self, name: &str) -> PresetLoad {
        let pattern = match self.presets.get(name) {
            Some(Preset::Pattern(pattern)) => Some(pattern),
            Some(Preset::Random) => None,
            None => {
                warn!(preset = name, fallback = RANDOM_PRESET, "Unknown preset");
                None
            }
        };

        let load = match pattern {
            None => {
                self.grid = self.grid.randomized(self.density, &mut self.rng);
                PresetLoad::Randomized
            }
            Some(pattern) => {
                let mut grid = self.grid.cleared();
                let placement = grid.stamp_centered(pattern);
                self.grid = grid;
                PresetLoad::Placed(placement)
            }
        };

        self.paused = true;
        self.generation = 0;
        info!(
            preset = name,
            population = self.grid.population(),
            ?load,
            "Preset loaded"
        );
        load
    }

    /// Flip the pause flag and return the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        debug!(paused = self.paused, "Pause toggled");
        self.paused
    }

    /// Stop advancing on [`step`](Self::step).
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume advancing on [`step`](Self::step).
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Replace the binary-mode rules. Counts above 8 are ignored.
    pub fn set_rules(
        &mut self,
        survive: impl IntoIterator<Item = u8>,
        birth: impl IntoIterator<Item = u8>,
    ) {
        self.rules = RuleSet::new(survive, birth);
        info!(rules = %self.rules, "Rules changed");
    }

    /// The current board.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The active rule family.
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The binary-mode rules.
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Whether [`step`](Self::step) is currently a no-op.
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Generations advanced since construction or the last preset load.
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Preset names in display order.
    pub fn preset_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.presets.names()
    }

    /// Summary of the current board. `detonations` and `changed` are zero.
    pub fn summary(&self) -> GenerationSummary {
        let counts = self.grid.state_counts();
        GenerationSummary {
            generation: self.generation,
            mode: self.mode,
            population: counts.alive(),
            counts,
            detonations: 0,
            changed: 0,
        }
    }
}
