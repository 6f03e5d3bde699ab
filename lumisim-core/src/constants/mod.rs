//! Constants for Lumisim Core
//!
//! Centralized numeric values used throughout the engine. Every value here is
//! a *default*: the [`SimulatorConfig`](crate::config::SimulatorConfig) carries
//! the values actually used at runtime, so deployments and tests can override
//! any of them without touching code.
//!
//! ## Organization
//!
//! - **Lighting**: illuminance presets, utilization factor, input minimums
//! - **Uncertainty**: band widths and bootstrap bounds
//! - **Model**: the default least-squares coefficient set
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Include units in the name (`_M2`, `_LUX`, `_PCT`)
//! 3. Record where each value comes from

/// Illuminance presets, utilization factor and input limits.
pub mod lighting;

/// Uncertainty band widths and bootstrap sampling bounds.
pub mod uncertainty;

/// Default regression coefficients.
pub mod model;

pub use lighting::{
    CLASSROOM_TARGET_LUX, MEETING_ROOM_TARGET_LUX, MIN_AREA_M2, MIN_TARGET_LUX,
    MIN_PREDICTED_LUMENS, OFFICE_TARGET_LUX, UTILIZATION_FACTOR,
};

pub use uncertainty::{
    BOOTSTRAP_DEFAULT_ITERATIONS, BOOTSTRAP_MAX_ITERATIONS, BOOTSTRAP_MIN_ITERATIONS,
    DEFAULT_BAND_PCT, NARROW_BAND_PCT, WIDE_BAND_PCT,
};
