//! Configuration loading and typed config structures for the automaton
//! simulator.
//!
//! The canonical configuration lives in `automaton-config.yaml` at the
//! project root. Every field has a default, so an empty file (or a missing
//! section) is a valid configuration.
//!
//! Environment variables override the board size:
//! - `AUTOMATON_ROWS` overrides `board.rows`
//! - `AUTOMATON_COLS` overrides `board.cols`
//!
//! Override values that are not positive integers are ignored. A
//! non-positive size in the file itself is kept as written and replaced by
//! the default when the board is created.

use std::path::{Path, PathBuf};

use automaton_grid::DEFAULT_DENSITY;
use automaton_types::Mode;
use serde::Deserialize;
use tracing::warn;

use crate::sources::RANDOM_PRESET;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level automaton configuration.
///
/// Mirrors the structure of `automaton-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AutomatonConfig {
    /// Board size and random fill.
    #[serde(default)]
    pub board: BoardConfig,

    /// Rule and preset source files.
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Tick loop and starting state.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AutomatonConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.board.apply_env_overrides();
        Ok(config)
    }
}

/// Board configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardConfig {
    /// Number of rows. When unset the engine asks at startup; zero or
    /// negative falls back to the default size.
    #[serde(default)]
    pub rows: Option<i64>,

    /// Number of columns. When unset the engine asks at startup; zero or
    /// negative falls back to the default size.
    #[serde(default)]
    pub cols: Option<i64>,

    /// Probability of a live cell when the board is randomized.
    #[serde(default = "default_random_density")]
    pub random_density: f64,

    /// Seed for reproducible random boards.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: None,
            cols: None,
            random_density: default_random_density(),
            seed: None,
        }
    }
}

impl BoardConfig {
    /// Override the board size with environment variables when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Override the board size from an arbitrary variable lookup.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(rows) = positive_dimension(&lookup, "AUTOMATON_ROWS") {
            self.rows = Some(rows);
        }
        if let Some(cols) = positive_dimension(&lookup, "AUTOMATON_COLS") {
            self.cols = Some(cols);
        }
    }
}

fn positive_dimension(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<i64> {
    let raw = lookup(key)?;
    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => Some(value),
        _ => {
            warn!(key, value = %raw, "Ignoring invalid board dimension override");
            None
        }
    }
}

/// Locations of the rule and preset sources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourcesConfig {
    /// Path to the rule source JSON.
    #[serde(default = "default_rules_path")]
    pub rules_path: PathBuf,

    /// Path to the preset source JSON.
    #[serde(default = "default_presets_path")]
    pub presets_path: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            rules_path: default_rules_path(),
            presets_path: default_presets_path(),
        }
    }
}

/// Tick loop and starting state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Maximum ticks to run (0 = unlimited).
    #[serde(default)]
    pub max_ticks: u64,

    /// Maximum wall-clock seconds to run (0 = unlimited).
    #[serde(default)]
    pub max_real_time_seconds: u64,

    /// Rule family active at startup.
    #[serde(default)]
    pub start_mode: Mode,

    /// Preset loaded at startup.
    #[serde(default = "default_start_preset")]
    pub start_preset: String,

    /// Whether to resume immediately after loading the start preset.
    #[serde(default = "default_true")]
    pub start_running: bool,

    /// Stop once every cell is dead.
    #[serde(default)]
    pub stop_on_extinction: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
            max_real_time_seconds: 0,
            start_mode: Mode::default(),
            start_preset: default_start_preset(),
            start_running: true,
            stop_on_extinction: false,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default log level when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log a generation summary every this many generations (0 = never).
    #[serde(default = "default_summary_every")]
    pub summary_every: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            summary_every: default_summary_every(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_random_density() -> f64 {
    DEFAULT_DENSITY
}

fn default_rules_path() -> PathBuf {
    PathBuf::from("rules.json")
}

fn default_presets_path() -> PathBuf {
    PathBuf::from("presets.json")
}

const fn default_tick_interval_ms() -> u64 {
    200
}

fn default_start_preset() -> String {
    RANDOM_PRESET.to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_summary_every() -> u64 {
    10
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AutomatonConfig::default();
        assert_eq!(config.board.rows, None);
        assert!((config.board.random_density - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.sources.rules_path, PathBuf::from("rules.json"));
        assert_eq!(config.simulation.tick_interval_ms, 200);
        assert_eq!(config.simulation.start_mode, Mode::Binary);
        assert_eq!(config.simulation.start_preset, RANDOM_PRESET);
        assert!(config.simulation.start_running);
        assert_eq!(config.logging.summary_every, 10);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
board:
  rows: 40
  cols: 60
  random_density: 0.25
  seed: 99

sources:
  rules_path: "config/highlife.json"
  presets_path: "config/presets.json"

simulation:
  tick_interval_ms: 50
  max_ticks: 500
  max_real_time_seconds: 30
  start_mode: emotional
  start_preset: "Glider"
  start_running: false
  stop_on_extinction: true

logging:
  level: "debug"
  summary_every: 25
"#;

        let config = AutomatonConfig::parse(yaml).unwrap();
        assert_eq!(config.board.rows, Some(40));
        assert_eq!(config.board.cols, Some(60));
        assert_eq!(config.board.seed, Some(99));
        assert_eq!(
            config.sources.rules_path,
            PathBuf::from("config/highlife.json")
        );
        assert_eq!(config.simulation.max_ticks, 500);
        assert_eq!(config.simulation.start_mode, Mode::Emotional);
        assert_eq!(config.simulation.start_preset, "Glider");
        assert!(!config.simulation.start_running);
        assert!(config.simulation.stop_on_extinction);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = AutomatonConfig::parse("simulation:\n  max_ticks: 7\n").unwrap();
        assert_eq!(config.simulation.max_ticks, 7);
        assert_eq!(config.simulation.tick_interval_ms, 200);
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(AutomatonConfig::parse("").is_ok());
    }

    #[test]
    fn non_positive_board_size_still_parses() {
        let config = AutomatonConfig::parse("board:\n  rows: -5\n  cols: 0\n").unwrap();
        assert_eq!(config.board.rows, Some(-5));
        assert_eq!(config.board.cols, Some(0));
        assert_eq!(config.simulation, SimulationConfig::default());
    }

    #[test]
    fn unknown_mode_is_an_error() {
        let err = AutomatonConfig::parse("simulation:\n  start_mode: ternary\n").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AutomatonConfig::from_file(Path::new("/nonexistent/automaton-config.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn overrides_replace_board_size() {
        let vars = BTreeMap::from([("AUTOMATON_ROWS", "12"), ("AUTOMATON_COLS", " 34 ")]);
        let mut board = BoardConfig::default();
        board.apply_overrides(|key| vars.get(key).map(|v| (*v).to_owned()));
        assert_eq!(board.rows, Some(12));
        assert_eq!(board.cols, Some(34));
    }

    #[test]
    fn invalid_overrides_are_ignored() {
        let vars = BTreeMap::from([("AUTOMATON_ROWS", "0"), ("AUTOMATON_COLS", "wide")]);
        let mut board = BoardConfig {
            rows: Some(5),
            ..BoardConfig::default()
        };
        board.apply_overrides(|key| vars.get(key).map(|v| (*v).to_owned()));
        assert_eq!(board.rows, Some(5));
        assert_eq!(board.cols, None);
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("automaton-config.yaml");
        if path.exists() {
            let config = AutomatonConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
