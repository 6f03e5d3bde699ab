//! Error Types for Simulation Failures
//!
//! ## Design Philosophy
//!
//! Every failure in the engine is local to a single request: a rejected
//! input, a degenerate model evaluation, or a misconfigured catalog simply
//! withholds that one result. Nothing here is fatal to the caller's process
//! and nothing is retried, since every operation is deterministic.
//!
//! Errors stay small and `Copy` so they can be returned from the hot path
//! and stored next to form state without allocation. Messages are
//! `&'static str` only.
//!
//! ## Error Categories
//!
//! ### Invalid input
//! - `InvalidInput`: missing, non-numeric or non-finite value
//! - `BelowMinimum`: committed value under the configured floor
//!
//! ### Degenerate arithmetic
//! - `ArithmeticDegenerate`: the model produced NaN or infinity
//!
//! ### Configuration
//! - `EmptyCatalog`: no fixture at all to recommend
//! - `InvalidDomain` / `InvalidSampleCount`: bad projection request
//! - `InvalidConfig`: a setting that cannot produce meaningful results
//!
//! Two conditions are deliberately *not* errors: a catalog/technology
//! mismatch and a missing bootstrap reference dataset. Both still produce a
//! result, and both are tagged on that result (see
//! [`FixtureSelection`](crate::recommend::FixtureSelection) and
//! [`BandMethod`](crate::uncertainty::BandMethod)).
//!
//! ```rust
//! use lumisim_core::{AreaValidator, InputValidator, SimulationError};
//!
//! let validator = AreaValidator::default();
//! match validator.commit("3") {
//!     Ok(area) => { let _ = area; }
//!     Err(SimulationError::BelowMinimum { min, .. }) => {
//!         // Show "minimum is {min} m²" next to the field
//!         assert_eq!(min, 5.0);
//!     }
//!     Err(_) => {}
//! }
//! ```

use core::fmt;

use thiserror_no_std::Error;

/// Result type for simulation operations
pub type EngineResult<T> = Result<T, SimulationError>;

/// Which user-facing input a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    /// Room floor area in square meters
    Area,
    /// Requested target illuminance in lux
    TargetIlluminance,
}

impl fmt::Display for InputField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Area => f.write_str("area"),
            Self::TargetIlluminance => f.write_str("target illuminance"),
        }
    }
}

/// Simulation errors - kept small and copyable
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum SimulationError {
    /// Input missing, not a number, or not finite
    #[error("Invalid {field}: {reason}")]
    InvalidInput {
        /// Offending input
        field: InputField,
        /// Short human readable explanation
        reason: &'static str,
    },

    /// Committed value below the configured minimum
    #[error("{field} {value} is below the minimum of {min}")]
    BelowMinimum {
        /// Offending input
        field: InputField,
        /// Value as entered
        value: f64,
        /// Configured minimum
        min: f64,
    },

    /// Model evaluation produced NaN or infinity
    #[error("Model produced a non-finite prediction")]
    ArithmeticDegenerate,

    /// Fixture catalog has no entries
    #[error("Fixture catalog is empty")]
    EmptyCatalog,

    /// Projection domain is empty, inverted or non-finite
    #[error("Invalid projection domain [{min}, {max}]")]
    InvalidDomain {
        /// Requested lower bound
        min: f64,
        /// Requested upper bound
        max: f64,
    },

    /// Projection needs at least two samples
    #[error("Projection needs at least 2 samples, got {requested}")]
    InvalidSampleCount {
        /// Requested sample count
        requested: usize,
    },

    /// Configuration value outside its usable range
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Which setting is wrong
        reason: &'static str,
    },
}

impl SimulationError {
    /// True for errors the user can fix by editing a form field
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::BelowMinimum { .. })
    }

    /// The form field this error should be displayed next to, if any
    pub fn field(&self) -> Option<InputField> {
        match self {
            Self::InvalidInput { field, .. } | Self::BelowMinimum { field, .. } => Some(*field),
            _ => None,
        }
    }
}
