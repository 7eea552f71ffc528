//! Configuration loading and typed config structures for the Toroid
//! simulation.
//!
//! The canonical configuration lives in `toroid-config.yaml`. This module
//! defines strongly-typed structs that mirror the YAML structure and a
//! loader that reads the file. Every section and field has a default, so
//! an empty file is a valid configuration.

use std::path::Path;

use serde::Deserialize;
use toroid_grid::{Evaluation, GridConfig, GridError};

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

    /// The grid section describes an impossible grid.
    #[error("invalid grid section: {source}")]
    Grid {
        /// The underlying grid error.
        #[from]
        source: GridError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `toroid-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Grid dimensions and evaluation strategy.
    #[serde(default)]
    pub grid: GridSection,

    /// How the initial generation is built.
    #[serde(default)]
    pub seed: SeedConfig,

    /// Run loop pacing and bounds.
    #[serde(default)]
    pub run: RunConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
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
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }
}

/// Grid dimensions and evaluation strategy.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GridSection {
    /// Number of columns.
    #[serde(default = "default_width")]
    pub width: usize,

    /// Number of rows.
    #[serde(default = "default_height")]
    pub height: usize,

    /// How next generations are built (`full` or `affected`).
    #[serde(default)]
    pub evaluation: Evaluation,
}

impl GridSection {
    /// Validate the dimensions into a [`GridConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Grid`] if either dimension is zero.
    pub fn grid_config(&self) -> Result<GridConfig, ConfigError> {
        Ok(GridConfig::new(self.width, self.height)?)
    }
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            evaluation: Evaluation::default(),
        }
    }
}

/// How the initial generation is built.
///
/// Applied in order: random fill, then the named pattern, then `cells`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SeedConfig {
    /// Built-in pattern name (see [`PATTERNS`](crate::seeding::PATTERNS)).
    #[serde(default)]
    pub pattern: Option<String>,

    /// Row of the pattern's upper-left corner.
    #[serde(default)]
    pub origin_row: usize,

    /// Column of the pattern's upper-left corner.
    #[serde(default)]
    pub origin_col: usize,

    /// Extra live cells as `[row, col]` pairs.
    #[serde(default)]
    pub cells: Vec<(usize, usize)>,

    /// Probability in `[0, 1]` that each cell starts alive.
    #[serde(default)]
    pub random_density: Option<f64>,

    /// Seed for the random fill.
    #[serde(default)]
    pub random_seed: u64,
}

/// Run loop pacing and bounds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Real-time milliseconds between steps.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many steps (0 = until termination or stop request).
    #[serde(default)]
    pub max_steps: u64,

    /// Print each generation to the terminal.
    #[serde(default = "default_true")]
    pub render: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_steps: 0,
            render: true,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log filter directive (trace, debug, info, warn, error, or a full
    /// `EnvFilter` expression).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_width() -> usize {
    40
}

const fn default_height() -> usize {
    20
}

const fn default_tick_interval_ms() -> u64 {
    100
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}
