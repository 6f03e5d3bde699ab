//! Loading errors
//!
//! Unlike the engine's errors these carry owned strings: they describe files
//! and records, are produced once at startup, and end up in logs.

use lumisim_core::SimulationError;

/// Failure while loading configuration, reference data or presets
#[derive(Debug, thiserror_no_std::Error)]
pub enum PresetError {
    /// File could not be read
    #[error("Failed to read {path}: {message}")]
    Io {
        /// File that failed
        path: String,
        /// OS error text
        message: String,
    },

    /// Text is not valid JSON for the expected shape
    #[error("Failed to parse: {0}")]
    Parse(String),

    /// One record of a dataset is unusable
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord {
        /// 1-based line (CSV) or record number (JSON)
        line: usize,
        /// What was wrong with it
        reason: String,
    },

    /// Parsed configuration fails the engine's checks
    #[error("Invalid configuration: {0}")]
    Config(SimulationError),

    /// No preset with this name
    #[error("Preset not found: {0}")]
    NotFound(String),

    /// A preset with this qualified name already exists
    #[error("Preset {0} already registered")]
    Duplicate(String),

    /// A writer panicked while holding the registry lock
    #[error("Preset registry lock poisoned")]
    LockPoisoned,
}

impl From<SimulationError> for PresetError {
    fn from(err: SimulationError) -> Self {
        Self::Config(err)
    }
}

impl From<serde_json::Error> for PresetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl PresetError {
    pub(crate) fn io(path: &std::path::Path, err: &std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn record(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            line,
            reason: reason.into(),
        }
    }
}
