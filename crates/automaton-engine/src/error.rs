//! Error types for the engine binary.
//!
//! [`EngineError`] wraps every failure that can stop the engine before the
//! tick loop starts. Missing rule or preset sources and bad board-size
//! answers are recovered with defaults and never reach this type.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: automaton_core::config::ConfigError,
    },

    /// The board could not be created.
    #[error("grid error: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: automaton_grid::GridError,
    },
}
