//! Fixture recommendation
//!
//! Turns a lumen requirement into a concrete installation: which fixture,
//! how many units, total power, and the illuminance those units achieve.
//!
//! ## Selection
//!
//! The first catalog entry with the requested technology wins. When none
//! exists the catalog's first entry is used instead, and the result is
//! tagged [`FixtureSelection::Fallback`]. A fallback means the catalog is
//! incomplete for a supported technology, so it is also logged at warn level
//! and counted.
//!
//! ## Unit count
//!
//! ```text
//! units     = max(1, round(lumens / lumens_per_unit))
//! power     = units × watts_per_unit
//! achieved  = units × lumens_per_unit / area × utilization_factor
//! ```
//!
//! Rounding to the nearest unit is the inherited behaviour and may
//! under-deliver by up to half a fixture; the uncertainty band already
//! covers that. [`UnitRounding::Ceiling`] is available for deployments that
//! want the count to always cover the requirement.

use core::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    catalog::{Fixture, FixtureCatalog},
    constants::{MIN_PREDICTED_LUMENS, UTILIZATION_FACTOR},
    errors::{EngineResult, InputField, SimulationError},
    traits::Validatable,
    types::Technology,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a fractional fixture count becomes whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnitRounding {
    /// Round half away from zero
    #[default]
    Nearest,
    /// Always round up
    Ceiling,
}

impl UnitRounding {
    fn apply(self, ratio: f64) -> f64 {
        match self {
            Self::Nearest => libm::round(ratio),
            Self::Ceiling => libm::ceil(ratio),
        }
    }
}

/// Requested technology had no fixture in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CatalogMismatch {
    /// Technology the caller asked for
    pub requested: Technology,
    /// Technology of the fixture used instead
    pub substituted: Technology,
}

/// Whether the fixture came from a clean match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum FixtureSelection {
    /// Fixture technology matches the request
    Exact,
    /// Catalog default used because nothing matched
    Fallback(CatalogMismatch),
}

impl FixtureSelection {
    /// True for the fallback path
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// Derived installation for a lumen requirement
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Chosen fixture
    pub fixture: Fixture,
    /// How the fixture was chosen
    pub selection: FixtureSelection,
    /// Number of units, at least 1
    pub unit_count: u32,
    /// `unit_count × watts_per_unit`
    pub total_power_watts: f64,
    /// Illuminance delivered after the utilization factor (lux)
    pub achieved_illuminance: f64,
}

impl Recommendation {
    /// Whether the installation reaches a target illuminance
    pub fn meets(&self, target_lux: f64) -> bool {
        self.achieved_illuminance >= target_lux
    }
}

/// Picks fixtures and sizes installations
#[derive(Debug)]
pub struct RecommendationEngine {
    catalog: FixtureCatalog,
    utilization_factor: f64,
    rounding: UnitRounding,
    fallbacks: AtomicUsize,
}

impl RecommendationEngine {
    /// Create an engine over a catalog
    pub fn new(catalog: FixtureCatalog, utilization_factor: f64, rounding: UnitRounding) -> Self {
        if let Some(missing) = catalog.missing_technologies().first() {
            log_warn!("Fixture catalog has no {} entry; requests will fall back", missing);
        }
        Self {
            catalog,
            utilization_factor,
            rounding,
            fallbacks: AtomicUsize::new(0),
        }
    }

    /// Catalog used for selection
    pub fn catalog(&self) -> &FixtureCatalog {
        &self.catalog
    }

    /// Number of recommendations that had to fall back so far
    pub fn fallback_count(&self) -> usize {
        self.fallbacks.load(Ordering::Relaxed)
    }

    /// Select a fixture without recording anything
    pub fn select(&self, technology: Technology) -> EngineResult<(&Fixture, FixtureSelection)> {
        if let Some(fixture) = self.catalog.first_for(technology) {
            return Ok((fixture, FixtureSelection::Exact));
        }
        let fallback = self.catalog.first().ok_or(SimulationError::EmptyCatalog)?;
        Ok((
            fallback,
            FixtureSelection::Fallback(CatalogMismatch {
                requested: technology,
                substituted: fallback.technology,
            }),
        ))
    }

    /// Recommend an installation for `lumens` over `area`
    pub fn recommend(
        &self,
        lumens: f64,
        technology: Technology,
        area: f64,
    ) -> EngineResult<Recommendation> {
        let (fixture, selection) = self.select(technology)?;

        if let FixtureSelection::Fallback(mismatch) = selection {
            self.fallbacks.fetch_add(1, Ordering::Relaxed);
            log_warn!(
                "No {} fixture in catalog, falling back to '{}' ({})",
                mismatch.requested,
                fixture.id,
                mismatch.substituted
            );
        }

        self.size(fixture, selection, lumens, area)
    }

    /// Percent of power saved by LED over fluorescent for the same requirement
    ///
    /// `None` unless the catalog has a matching fixture for both technologies.
    pub fn energy_savings_percent(&self, lumens: f64, area: f64) -> Option<f64> {
        let led = self.catalog.first_for(Technology::Led)?;
        let fluorescent = self.catalog.first_for(Technology::Fluorescent)?;

        let led = self.size(led, FixtureSelection::Exact, lumens, area).ok()?;
        let fluorescent = self
            .size(fluorescent, FixtureSelection::Exact, lumens, area)
            .ok()?;

        if fluorescent.total_power_watts <= 0.0 {
            return None;
        }
        Some(
            (fluorescent.total_power_watts - led.total_power_watts) / fluorescent.total_power_watts
                * 100.0,
        )
    }

    fn size(
        &self,
        fixture: &Fixture,
        selection: FixtureSelection,
        lumens: f64,
        area: f64,
    ) -> EngineResult<Recommendation> {
        if !area.is_valid() || area <= 0.0 {
            return Err(SimulationError::InvalidInput {
                field: InputField::Area,
                reason: "area must be a positive number",
            });
        }
        if !lumens.is_valid() || !fixture.lumens_per_unit.is_valid() || fixture.lumens_per_unit <= 0.0
        {
            return Err(SimulationError::ArithmeticDegenerate);
        }

        // Negative requirements never reach the count
        let lumens = lumens.max(MIN_PREDICTED_LUMENS);
        let units = self.rounding.apply(lumens / fixture.lumens_per_unit).max(1.0);
        if !units.is_valid() || units > f64::from(u32::MAX) {
            return Err(SimulationError::ArithmeticDegenerate);
        }
        let unit_count = units as u32;
        let delivered = f64::from(unit_count) * fixture.lumens_per_unit;

        Ok(Recommendation {
            fixture: fixture.clone(),
            selection,
            unit_count,
            total_power_watts: f64::from(unit_count) * fixture.watts_per_unit,
            achieved_illuminance: delivered / area * self.utilization_factor,
        })
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(FixtureCatalog::default(), UTILIZATION_FACTOR, UnitRounding::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn fluorescent_only() -> FixtureCatalog {
        FixtureCatalog::new(vec![Fixture::new(
            "fluor",
            "Fluorescent",
            Technology::Fluorescent,
            2800.0,
            58.0,
        )])
    }

    #[test]
    fn sizes_installation_with_nearest_rounding() {
        let engine = RecommendationEngine::default();

        // 20820 / 3600 = 5.78 -> 6 units
        let rec = engine.recommend(20820.0, Technology::Led, 35.0).unwrap();
        assert_eq!(rec.fixture.id, "led-panel-3600");
        assert_eq!(rec.selection, FixtureSelection::Exact);
        assert_eq!(rec.unit_count, 6);
        assert_eq!(rec.total_power_watts, 216.0);

        let expected_lux = 6.0 * 3600.0 / 35.0 * 0.8;
        assert!((rec.achieved_illuminance - expected_lux).abs() < 1e-9);
    }

    #[test]
    fn nearest_rounding_can_under_deliver() {
        let engine = RecommendationEngine::default();

        // 5.2 fixtures -> 5 units, 18000 lm < 18720 lm
        let rec = engine.recommend(18720.0, Technology::Led, 30.0).unwrap();
        assert_eq!(rec.unit_count, 5);
    }

    #[test]
    fn ceiling_rounding_covers_requirement() {
        let engine = RecommendationEngine::new(
            FixtureCatalog::default(),
            UTILIZATION_FACTOR,
            UnitRounding::Ceiling,
        );

        let rec = engine.recommend(18720.0, Technology::Led, 30.0).unwrap();
        assert_eq!(rec.unit_count, 6);
    }

    #[test]
    fn unit_count_never_below_one() {
        let engine = RecommendationEngine::default();

        let rec = engine.recommend(1.0, Technology::Led, 5.0).unwrap();
        assert_eq!(rec.unit_count, 1);
        assert_eq!(rec.total_power_watts, 36.0);

        let rec = engine.recommend(-500.0, Technology::Led, 5.0).unwrap();
        assert_eq!(rec.unit_count, 1);
    }

    #[test]
    fn unit_count_overflow_is_degenerate() {
        let engine = RecommendationEngine::default();

        // 1e15 lm / 3600 lm is far beyond u32::MAX fixtures
        assert_eq!(
            engine.recommend(1e15, Technology::Led, 1e12),
            Err(SimulationError::ArithmeticDegenerate)
        );

        // Largest count that still fits is sized normally
        let lumens = f64::from(u32::MAX) * 3600.0;
        let rec = engine.recommend(lumens, Technology::Led, 1e12).unwrap();
        assert_eq!(rec.unit_count, u32::MAX);
    }

    #[test]
    fn mismatch_falls_back_and_is_counted() {
        let engine =
            RecommendationEngine::new(fluorescent_only(), UTILIZATION_FACTOR, UnitRounding::Nearest);

        let rec = engine.recommend(10000.0, Technology::Led, 20.0).unwrap();
        assert_eq!(rec.fixture.id, "fluor");
        assert_eq!(
            rec.selection,
            FixtureSelection::Fallback(CatalogMismatch {
                requested: Technology::Led,
                substituted: Technology::Fluorescent,
            })
        );
        assert_eq!(engine.fallback_count(), 1);

        // Clean matches leave the counter alone
        engine.recommend(10000.0, Technology::Fluorescent, 20.0).unwrap();
        assert_eq!(engine.fallback_count(), 1);
    }

    #[test]
    fn empty_catalog_is_an_error() {
        let engine = RecommendationEngine::new(
            FixtureCatalog::new(vec![]),
            UTILIZATION_FACTOR,
            UnitRounding::Nearest,
        );
        assert_eq!(
            engine.recommend(1000.0, Technology::Led, 10.0),
            Err(SimulationError::EmptyCatalog)
        );
    }

    #[test]
    fn rejects_degenerate_area() {
        let engine = RecommendationEngine::default();
        let err = engine.recommend(1000.0, Technology::Led, 0.0).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn led_saves_energy_over_fluorescent() {
        let engine = RecommendationEngine::default();

        // LED: 6 × 36 W = 216 W, fluorescent: round(7.44) = 7 × 58 W = 406 W
        let savings = engine.energy_savings_percent(20820.0, 35.0).unwrap();
        let expected = (406.0 - 216.0) / 406.0 * 100.0;
        assert!((savings - expected).abs() < 1e-9);

        let engine =
            RecommendationEngine::new(fluorescent_only(), UTILIZATION_FACTOR, UnitRounding::Nearest);
        assert_eq!(engine.energy_savings_percent(20820.0, 35.0), None);
        assert_eq!(engine.fallback_count(), 0);
    }
}
