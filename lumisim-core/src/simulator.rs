//! Simulation facade
//!
//! Wires validation, prediction, recommendation and uncertainty behind one
//! call. A [`Simulator`] is built once from a [`SimulatorConfig`] and then
//! shared; every call is synchronous and touches no mutable state apart
//! from the catalog fallback counter.
//!
//! ```text
//! SimulationRequest
//!   -> AreaValidator / IlluminanceValidator
//!   -> PredictionModel::predict               (floored at 1 lm)
//!   -> UncertaintyBand                        (fixed or bootstrap)
//!   -> RecommendationEngine::recommend
//!   -> SimulationResult                       (rounded for display)
//! ```
//!
//! All arithmetic runs on the full-precision lumen value. Rounding to whole
//! lumens only happens when the result is assembled, so the headline number
//! and both band edges come from the same value.
//!
//! ```rust
//! use lumisim_core::{RoomType, SimulationRequest, Simulator, SimulatorConfig, Technology};
//!
//! let simulator = Simulator::new(SimulatorConfig::default())?;
//! let result = simulator.simulate(&SimulationRequest::new(
//!     35.0,
//!     RoomType::Classroom,
//!     Technology::Led,
//! ))?;
//!
//! assert_eq!(result.predicted_lumens, 20820);
//! assert!(result.uncertainty_low <= result.predicted_lumens);
//! assert!(result.predicted_lumens <= result.uncertainty_high);
//! # Ok::<(), lumisim_core::SimulationError>(())
//! ```

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{
    config::SimulatorConfig,
    curve::{AreaDomain, CurvePoint, ProjectionCurveGenerator},
    errors::EngineResult,
    model::RegressionModel,
    recommend::{FixtureSelection, RecommendationEngine},
    traits::{InputValidator, PredictionModel},
    types::{PredictionInput, RoomType, Technology},
    uncertainty::{
        bootstrap::clamp_iterations,
        rng::{default_source, RandomSource},
        BandMethod, BandWidth, BootstrapEstimator, ReferenceDataset, UncertaintyBand,
        UncertaintyMode,
    },
    validators::{AreaValidator, IlluminanceValidator},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One simulation request as entered in the form
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationRequest {
    /// Floor area (m²)
    pub area: f64,
    /// Room category
    pub room_type: RoomType,
    /// Lighting technology
    pub technology: Technology,
    /// Requested illuminance (lux); the room preset when absent
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_illuminance: Option<f64>,
    /// Fixed band width; the configured default when absent
    #[cfg_attr(feature = "serde", serde(default))]
    pub band_width: Option<BandWidth>,
}

impl SimulationRequest {
    /// Request with the room's preset illuminance and the default band
    pub fn new(area: f64, room_type: RoomType, technology: Technology) -> Self {
        Self {
            area,
            room_type,
            technology,
            target_illuminance: None,
            band_width: None,
        }
    }

    /// Ask for a specific illuminance
    pub fn with_target(mut self, lux: f64) -> Self {
        self.target_illuminance = Some(lux);
        self
    }

    /// Pick a fixed band width
    pub fn with_band(mut self, band_width: BandWidth) -> Self {
        self.band_width = Some(band_width);
        self
    }
}

/// Everything the presentation layer shows for one request
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationResult {
    /// Headline requirement, rounded (lm)
    pub predicted_lumens: u64,
    /// Requirement before rounding (lm)
    pub lumens_exact: f64,
    /// Lower band edge, rounded (lm)
    pub uncertainty_low: u64,
    /// Upper band edge, rounded (lm)
    pub uncertainty_high: u64,
    /// Algorithm that produced the band
    pub band_method: BandMethod,
    /// Catalog id of the recommended fixture
    pub fixture_id: String,
    /// Whether the fixture matched the requested technology
    pub fixture_selection: FixtureSelection,
    /// Number of fixtures
    pub unit_count: u32,
    /// Installed power (W)
    pub total_power_watts: f64,
    /// Illuminance the installation delivers (lux)
    pub achieved_illuminance: f64,
    /// Illuminance the result was checked against (lux)
    pub target_illuminance: f64,
    /// `achieved_illuminance >= target_illuminance`
    pub meets_target: bool,
    /// Power saved by LED over fluorescent, LED requests only (%)
    pub energy_savings_percent: Option<f64>,
}

/// The prediction engine behind the simulator form
#[derive(Debug)]
pub struct Simulator<M = RegressionModel> {
    config: SimulatorConfig,
    model: M,
    engine: RecommendationEngine,
    bootstrap: Option<BootstrapEstimator>,
    area: AreaValidator,
    illuminance: IlluminanceValidator,
}

impl Simulator<RegressionModel> {
    /// Build a simulator around the configured regression model
    pub fn new(config: SimulatorConfig) -> EngineResult<Self> {
        let model = config.model.clone();
        Self::with_model(config, model)
    }

    /// Build a simulator with a reference dataset for bootstrap bands
    pub fn with_reference(
        config: SimulatorConfig,
        dataset: Arc<ReferenceDataset>,
    ) -> EngineResult<Self> {
        Ok(Self::new(config)?.attach_reference(dataset))
    }
}

impl<M: PredictionModel> Simulator<M> {
    /// Build a simulator around any prediction model
    ///
    /// The configuration is validated here, once.
    pub fn with_model(config: SimulatorConfig, model: M) -> EngineResult<Self> {
        config.validate()?;

        let engine = RecommendationEngine::new(
            config.catalog.clone(),
            config.utilization_factor,
            config.unit_rounding,
        );
        let area = AreaValidator::new(config.min_area, config.commit_policy);
        let illuminance = IlluminanceValidator::new(config.min_target_lux, config.commit_policy);

        if let UncertaintyMode::Bootstrap { .. } = config.uncertainty {
            log_debug!("Bootstrap bands configured; waiting for reference data");
        }

        Ok(Self {
            config,
            model,
            engine,
            bootstrap: None,
            area,
            illuminance,
        })
    }

    /// Attach historical data; residuals are computed against this model now
    pub fn attach_reference(mut self, dataset: Arc<ReferenceDataset>) -> Self {
        self.bootstrap = Some(BootstrapEstimator::new(&self.model, dataset));
        self
    }

    /// Active configuration
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Prediction model
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Recommendation engine, including its fallback counter
    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    /// Bootstrap estimator, if reference data was attached
    pub fn bootstrap(&self) -> Option<&BootstrapEstimator> {
        self.bootstrap.as_ref()
    }

    /// Validator for the area field, configured with the engine's minimum
    pub fn area_validator(&self) -> &AreaValidator {
        &self.area
    }

    /// Validator for the target illuminance field
    pub fn illuminance_validator(&self) -> &IlluminanceValidator {
        &self.illuminance
    }

    /// Run one simulation
    ///
    /// Bootstrap draws come from the configured seed, or from entropy when
    /// none is set. Use [`Simulator::simulate_with`] to inject draws.
    pub fn simulate(&self, request: &SimulationRequest) -> EngineResult<SimulationResult> {
        let mut rng = default_source(self.config.bootstrap_seed);
        self.simulate_with(request, &mut rng)
    }

    /// Run one simulation with an explicit random source
    pub fn simulate_with<R: RandomSource + ?Sized>(
        &self,
        request: &SimulationRequest,
        rng: &mut R,
    ) -> EngineResult<SimulationResult> {
        let area = self.area.validate(request.area)?;
        let target = match request.target_illuminance {
            Some(lux) => self.illuminance.validate(lux)?,
            None => self.config.target_for(request.room_type),
        };

        let input = PredictionInput::new(area, request.room_type, request.technology);
        let prediction = self.model.predict(&input)?;
        let lumens = prediction.lumens();

        let band = self.band(lumens, prediction.rounded(), request.band_width, rng);
        let recommendation = self.engine.recommend(lumens, request.technology, area)?;

        let energy_savings_percent = match request.technology {
            Technology::Led => self.engine.energy_savings_percent(lumens, area),
            Technology::Fluorescent => None,
        };

        log_trace!(
            "{} m² {} {}: {} lm, {} x {}",
            area,
            request.room_type,
            request.technology,
            prediction.rounded(),
            recommendation.unit_count,
            recommendation.fixture.id
        );

        Ok(SimulationResult {
            predicted_lumens: prediction.rounded(),
            lumens_exact: lumens,
            uncertainty_low: band.low_rounded(),
            uncertainty_high: band.high_rounded(),
            band_method: band.method,
            meets_target: recommendation.meets(target),
            fixture_id: recommendation.fixture.id,
            fixture_selection: recommendation.selection,
            unit_count: recommendation.unit_count,
            total_power_watts: recommendation.total_power_watts,
            achieved_illuminance: recommendation.achieved_illuminance,
            target_illuminance: target,
            energy_savings_percent,
        })
    }

    /// Chart data for the request's room type and technology
    ///
    /// The request's area is highlighted when it passes validation.
    pub fn projection(
        &self,
        request: &SimulationRequest,
        domain: AreaDomain,
        sample_count: usize,
    ) -> EngineResult<Vec<CurvePoint>> {
        let highlight = self.area.validate(request.area).ok();
        ProjectionCurveGenerator::new(&self.model).curve(
            request.room_type,
            request.technology,
            domain,
            sample_count,
            highlight,
        )
    }

    /// Band around a prediction per the configured mode
    ///
    /// Fixed bands are taken around the reported whole-lumen headline,
    /// bootstrap resamples around the exact value. A requested band width only applies to fixed bands,
    /// including the fallback used when bootstrap data is missing.
    fn band<R: RandomSource + ?Sized>(
        &self,
        lumens: f64,
        headline: u64,
        band_width: Option<BandWidth>,
        rng: &mut R,
    ) -> UncertaintyBand {
        let percent = band_width.map_or(self.config.default_band_percent, BandWidth::percent);

        let iterations = match self.config.uncertainty {
            UncertaintyMode::FixedPercent => {
                return UncertaintyBand::fixed(headline as f64, percent);
            }
            UncertaintyMode::Bootstrap { iterations } => iterations,
        };

        if clamp_iterations(iterations) != iterations {
            log_debug!(
                "Bootstrap iterations {} clamped to {}",
                iterations,
                clamp_iterations(iterations)
            );
        }

        match self
            .bootstrap
            .as_ref()
            .and_then(|estimator| estimator.estimate(lumens, iterations, rng))
        {
            Some(band) => band,
            None => {
                log_warn!(
                    "Reference data unavailable, using fixed {}% band instead of bootstrap",
                    percent
                );
                UncertaintyBand::fixed_fallback(headline as f64, percent)
            }
        }
    }
}
