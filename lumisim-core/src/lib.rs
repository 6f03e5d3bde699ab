//! Core prediction engine for Lumisim
//!
//! Estimates the luminous flux a room needs from its area, room type and
//! lighting technology using a precomputed regression model, then turns
//! that into a fixture recommendation, an uncertainty band and chart data.
//!
//! Key constraints:
//! - Coefficients are loaded once and never fitted or mutated at runtime
//! - Every call is synchronous, deterministic in fixed-band mode
//! - Builds without `std` (alloc only) for embedding in other hosts
//!
//! ```rust
//! use lumisim_core::{
//!     AreaValidator, InputValidator, RoomType, SimulationRequest, Simulator, SimulatorConfig,
//!     Technology,
//! };
//!
//! let simulator = Simulator::new(SimulatorConfig::default())?;
//!
//! // Commit the form field, then simulate
//! let area = AreaValidator::default().commit("35")?;
//! let result = simulator.simulate(&SimulationRequest::new(
//!     area,
//!     RoomType::Office,
//!     Technology::Fluorescent,
//! ))?;
//!
//! println!(
//!     "{} lm ({}-{}), {} x {}",
//!     result.predicted_lumens,
//!     result.uncertainty_low,
//!     result.uncertainty_high,
//!     result.unit_count,
//!     result.fixture_id,
//! );
//! # Ok::<(), lumisim_core::SimulationError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod catalog;
pub mod config;
pub mod constants;
pub mod curve;
pub mod errors;
pub mod model;
pub mod recommend;
pub mod simulator;
pub mod traits;
pub mod types;
pub mod uncertainty;
pub mod validators;

// Public API
pub use catalog::{Fixture, FixtureCatalog};
pub use config::SimulatorConfig;
pub use curve::{AreaDomain, CurvePoint, ProjectionCurveGenerator};
pub use errors::{EngineResult, InputField, SimulationError};
pub use model::{ModelForm, Prediction, RegressionCoefficients, RegressionModel};
pub use recommend::{FixtureSelection, Recommendation, RecommendationEngine, UnitRounding};
pub use simulator::{SimulationRequest, SimulationResult, Simulator};
pub use traits::{InputValidator, PredictionModel};
pub use types::{PredictionInput, RoomType, Technology};
pub use uncertainty::{
    BandMethod, BandWidth, BootstrapEstimator, RandomSource, ReferenceDataset, ReferenceRow,
    UncertaintyBand, UncertaintyMode,
};
pub use validators::{AreaValidator, CommitPolicy, DraftState, IlluminanceValidator};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn simulator_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Simulator>();
        assert_send_sync::<SimulatorConfig>();
    }
}
