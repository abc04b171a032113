//! Rule and preset sources.
//!
//! Both sources are JSON documents read once at startup:
//!
//! - the rule source: `{"survive": [2, 3], "birth": [3]}`
//! - the preset source: an object mapping preset names to either `null`
//!   (a random board) or a rectangular array of 0/1 rows.
//!
//! Neither source is ever fatal. A missing or malformed rule source falls
//! back to [`RuleSet::default`]; a missing or malformed preset source falls
//! back to a library containing only [`RANDOM_PRESET`]. Individual bad
//! entries are dropped with a warning.

use std::path::Path;

use automaton_types::{Pattern, RuleSet, RuleSpec};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Name of the reserved preset that regenerates a random board.
pub const RANDOM_PRESET: &str = "Random";

/// Errors raised while reading a source document.
///
/// These never escape [`load_rules`] or [`load_presets`]; they are logged
/// and replaced by the documented defaults.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source file could not be read.
    #[error("failed to read source file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The source is not valid JSON or has the wrong shape.
    #[error("failed to parse source JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The preset source's top level is not a JSON object.
    #[error("preset source must be a JSON object")]
    NotAnObject,
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Parse a rule source document.
///
/// Returns the rule set and any counts rejected for being outside `0..=8`.
///
/// # Errors
///
/// Returns [`SourceError::Json`] if the document is not valid JSON or lacks
/// either the `survive` or `birth` array.
pub fn parse_rules(json: &str) -> Result<(RuleSet, Vec<i64>), SourceError> {
    let spec: RuleSpec = serde_json::from_str(json)?;
    Ok(spec.into_rule_set())
}

/// Load the rule source at `path`, falling back to Conway's rules.
pub fn load_rules(path: &Path) -> RuleSet {
    let parsed = std::fs::read_to_string(path)
        .map_err(SourceError::from)
        .and_then(|json| parse_rules(&json));

    match parsed {
        Ok((rules, rejected)) => {
            if !rejected.is_empty() {
                warn!(
                    path = %path.display(),
                    ?rejected,
                    "Dropped neighbor counts outside 0..=8"
                );
            }
            info!(path = %path.display(), %rules, "Rules loaded");
            rules
        }
        Err(e) => {
            let rules = RuleSet::default();
            warn!(
                path = %path.display(),
                error = %e,
                %rules,
                "Rule source unavailable, using defaults"
            );
            rules
        }
    }
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// What a preset places on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preset {
    /// Regenerate the board with a uniform random binary fill.
    Random,
    /// Center this pattern on an otherwise empty board.
    Pattern(Pattern),
}

/// An ordered collection of named presets.
///
/// [`RANDOM_PRESET`] is always present, always first, and always maps to
/// [`Preset::Random`]. The remaining entries keep the order of the source
/// document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetLibrary {
    entries: Vec<(String, Preset)>,
}

impl Default for PresetLibrary {
    fn default() -> Self {
        Self {
            entries: vec![(RANDOM_PRESET.to_owned(), Preset::Random)],
        }
    }
}

impl PresetLibrary {
    /// Build a library from a preset source document.
    ///
    /// Entries whose value is neither `null` nor a non-empty rectangular
    /// array of integer rows are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Json`] for invalid JSON and
    /// [`SourceError::NotAnObject`] when the top level is not an object.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        let Value::Object(map) = serde_json::from_str::<Value>(json)? else {
            return Err(SourceError::NotAnObject);
        };

        let mut library = Self::default();
        for (name, value) in map {
            if name == RANDOM_PRESET {
                if !value.is_null() {
                    warn!(preset = %name, "Reserved preset name given a pattern, ignoring it");
                }
                continue;
            }
            match parse_preset(value) {
                Ok(preset) => library.insert(name, preset),
                Err(reason) => warn!(preset = %name, %reason, "Skipping invalid preset"),
            }
        }

        debug!(presets = library.len(), "Preset library built");
        Ok(library)
    }

    /// Add or replace a preset. [`RANDOM_PRESET`] cannot be replaced.
    pub fn insert(&mut self, name: String, preset: Preset) {
        if name == RANDOM_PRESET {
            return;
        }
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = preset;
        } else {
            self.entries.push((name, preset));
        }
    }

    /// Preset names in display order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Look up a preset by exact name.
    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, preset)| preset)
    }

    /// Whether a preset with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of presets, including [`RANDOM_PRESET`].
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`: the random preset is always present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn parse_preset(value: Value) -> Result<Preset, String> {
    if value.is_null() {
        return Ok(Preset::Random);
    }
    let rows: Vec<Vec<i64>> = serde_json::from_value(value).map_err(|e| e.to_string())?;
    Pattern::from_rows(&rows)
        .map(Preset::Pattern)
        .map_err(|e| e.to_string())
}

/// Load the preset source at `path`, falling back to a random-only library.
pub fn load_presets(path: &Path) -> PresetLibrary {
    let parsed = std::fs::read_to_string(path)
        .map_err(SourceError::from)
        .and_then(|json| PresetLibrary::from_json(&json));

    match parsed {
        Ok(library) => {
            info!(path = %path.display(), presets = library.len(), "Presets loaded");
            library
        }
        Err(e) => {
            warn!(
                path = %path.display(),
                error = %e,
                "Preset source unavailable, only the random preset is available"
            );
            PresetLibrary::default()
        }
    }
}
