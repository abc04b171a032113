//! Headless engine for the automaton simulator.
//!
//! Stands in for an interactive front end: it sizes the board, loads the
//! rule and preset sources, and drives the [`Automaton`] at a fixed tick
//! interval until a bound is reached or Ctrl-C is pressed.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `automaton-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Decide the board size (config, env, or terminal prompt)
//! 4. Load the rule and preset sources
//! 5. Create the automaton and apply the start mode and preset
//! 6. Wire Ctrl-C to the stop handle
//! 7. Run the tick loop
//! 8. Log the result

mod bootstrap;
mod callback;
mod error;

use std::path::Path;

use automaton_core::config::AutomatonConfig;
use automaton_core::runner::{self, RunBounds, StopHandle};
use automaton_core::{Automaton, AutomatonOptions, PresetLibrary, sources};
use automaton_types::RuleSet;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::callback::SummaryLogger;
use crate::error::EngineError;

const CONFIG_FILE: &str = "automaton-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the board cannot be
/// created.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config_path = Path::new(CONFIG_FILE);
    let config = load_config(config_path)?;

    // 2. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"))
        }))
        .with_target(true)
        .init();

    info!("automaton-engine starting");
    if config_path.exists() {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }

    // 3. Decide the board size.
    let size = bootstrap::board_size(&config.board);
    info!(rows = size.rows, cols = size.cols, "Board size chosen");

    // 4. Load sources.
    let rules = sources::load_rules(&config.sources.rules_path);
    let presets = sources::load_presets(&config.sources.presets_path);

    // 5. Create the automaton.
    let mut automaton = build_automaton(&config, size.rows, size.cols, rules, presets)?;

    // 6. Wire Ctrl-C.
    let stop = StopHandle::new();
    {
        let stop = stop.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl-C received, stopping");
                    stop.stop();
                }
                Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
            }
        });
    }

    // 7. Run the tick loop.
    let bounds = RunBounds::from(&config.simulation);
    let mut callback = SummaryLogger::new(config.logging.summary_every);
    let result = runner::run(&mut automaton, &bounds, &stop, &mut callback).await;

    // 8. Log results.
    runner::log_simulation_end(&result);
    info!(
        end_reason = ?result.end_reason,
        total_ticks = result.total_ticks,
        summaries_logged = callback.logged(),
        "automaton-engine shutdown complete"
    );

    Ok(())
}

/// Load configuration from `path`, or defaults (plus env overrides) when
/// the file does not exist.
fn load_config(path: &Path) -> Result<AutomatonConfig, EngineError> {
    if path.exists() {
        Ok(AutomatonConfig::from_file(path)?)
    } else {
        Ok(AutomatonConfig::parse("")?)
    }
}

/// Create the automaton and apply the configured starting state.
fn build_automaton(
    config: &AutomatonConfig,
    rows: usize,
    cols: usize,
    rules: RuleSet,
    presets: PresetLibrary,
) -> Result<Automaton, EngineError> {
    let mut automaton = Automaton::new(
        rows,
        cols,
        AutomatonOptions {
            rules,
            presets,
            density: config.board.random_density,
            seed: config.board.seed,
        },
    )?;

    automaton.set_mode(config.simulation.start_mode);
    automaton.load_preset(&config.simulation.start_preset);
    if config.simulation.start_running {
        automaton.resume();
    }
    Ok(automaton)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn zero_board_size_in_config_starts_a_default_board() {
        let config = AutomatonConfig::parse("board:\n  rows: 0\n  cols: 10\n  seed: 1\n").unwrap();
        let size = bootstrap::board_size(&config.board);
        let automaton = build_automaton(
            &config,
            size.rows,
            size.cols,
            RuleSet::default(),
            PresetLibrary::default(),
        )
        .unwrap();
        assert_eq!(automaton.grid().rows(), bootstrap::DEFAULT_DIMENSION);
        assert_eq!(automaton.grid().cols(), 10);
    }

    #[test]
    fn negative_board_size_in_config_starts_a_default_board() {
        let config = AutomatonConfig::parse("board:\n  rows: -5\n  cols: -5\n").unwrap();
        let size = bootstrap::board_size(&config.board);
        assert_eq!(size, bootstrap::BoardSize::default());
        let automaton = build_automaton(
            &config,
            size.rows,
            size.cols,
            RuleSet::default(),
            PresetLibrary::default(),
        );
        assert!(automaton.is_ok());
    }
}
