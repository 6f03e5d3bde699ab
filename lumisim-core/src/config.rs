//! Simulator configuration
//!
//! Everything the engine needs that is not part of a single request. Loaded
//! once, validated once, then never mutated. With the `serde` feature every
//! field is optional in the serialized form and falls back to the default.
//!
//! ```json
//! {
//!   "model": { "form": "linear_interaction", "coefficients": { "...": 0 } },
//!   "uncertainty": { "kind": "bootstrap", "iterations": 300 },
//!   "unit_rounding": "ceiling",
//!   "bootstrap_seed": 42
//! }
//! ```

use crate::{
    catalog::FixtureCatalog,
    constants::{
        CLASSROOM_TARGET_LUX, DEFAULT_BAND_PCT, MEETING_ROOM_TARGET_LUX, MIN_AREA_M2,
        MIN_TARGET_LUX, OFFICE_TARGET_LUX, UTILIZATION_FACTOR,
    },
    errors::{EngineResult, SimulationError},
    model::RegressionModel,
    recommend::UnitRounding,
    traits::Validatable,
    types::{RoomTable, RoomType},
    uncertainty::UncertaintyMode,
    validators::CommitPolicy,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulatorConfig {
    /// Regression form and coefficients
    pub model: RegressionModel,
    /// Fixtures available for recommendation, in preference order
    pub catalog: FixtureCatalog,
    /// Target illuminance (lux) per room type when the request has none
    pub lux_presets: RoomTable<f64>,
    /// Fraction of installed lumens that reaches the work plane
    pub utilization_factor: f64,
    /// Smallest accepted area (m²)
    pub min_area: f64,
    /// Smallest accepted target illuminance (lux)
    pub min_target_lux: f64,
    /// Band half-width (percent) when the request does not pick one
    pub default_band_percent: f64,
    /// Band algorithm
    pub uncertainty: UncertaintyMode,
    /// Fixture count rounding
    pub unit_rounding: UnitRounding,
    /// Below-minimum handling for committed inputs
    pub commit_policy: CommitPolicy,
    /// Fixed seed for bootstrap draws; `None` draws from entropy
    pub bootstrap_seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            model: RegressionModel::default(),
            catalog: FixtureCatalog::default(),
            lux_presets: RoomTable::new(
                CLASSROOM_TARGET_LUX,
                OFFICE_TARGET_LUX,
                MEETING_ROOM_TARGET_LUX,
            ),
            utilization_factor: UTILIZATION_FACTOR,
            min_area: MIN_AREA_M2,
            min_target_lux: MIN_TARGET_LUX,
            default_band_percent: DEFAULT_BAND_PCT,
            uncertainty: UncertaintyMode::default(),
            unit_rounding: UnitRounding::default(),
            commit_policy: CommitPolicy::default(),
            bootstrap_seed: None,
        }
    }
}

impl SimulatorConfig {
    /// Check every numeric setting
    pub fn validate(&self) -> EngineResult<()> {
        let positive = |v: f64| v.is_valid() && v > 0.0;

        if self.catalog.is_empty() {
            return Err(SimulationError::EmptyCatalog);
        }
        if !positive(self.utilization_factor) || self.utilization_factor > 1.0 {
            return Err(SimulationError::InvalidConfig {
                reason: "utilization factor must be in (0, 1]",
            });
        }
        if !positive(self.min_area) {
            return Err(SimulationError::InvalidConfig {
                reason: "minimum area must be positive",
            });
        }
        if !positive(self.min_target_lux) {
            return Err(SimulationError::InvalidConfig {
                reason: "minimum illuminance must be positive",
            });
        }
        if !positive(self.default_band_percent) || self.default_band_percent >= 100.0 {
            return Err(SimulationError::InvalidConfig {
                reason: "default band percent must be in (0, 100)",
            });
        }
        if RoomType::ALL.iter().any(|r| !positive(*self.lux_presets.get(*r))) {
            return Err(SimulationError::InvalidConfig {
                reason: "illuminance presets must be positive",
            });
        }
        let bad_fixture = self.catalog.fixtures().iter().any(|f| {
            !positive(f.lumens_per_unit) || !f.watts_per_unit.is_valid() || f.watts_per_unit < 0.0
        });
        if bad_fixture {
            return Err(SimulationError::InvalidConfig {
                reason: "fixtures need positive lumens and non-negative watts",
            });
        }
        Ok(())
    }

    /// Target illuminance preset for a room type
    pub fn target_for(&self, room: RoomType) -> f64 {
        *self.lux_presets.get(room)
    }
}
