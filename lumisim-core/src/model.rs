//! Closed-form regression model
//!
//! Evaluates the least-squares fit supplied by configuration. One functional
//! form is chosen per deployment:
//!
//! ```text
//! Linear             y = b0 + b1·a + room[r] + tech[t]
//! LinearInteraction  y = Linear + room_slope[r]·a
//! Polynomial         y = LinearInteraction + b2·a²
//! LogLinear          y = exp(LinearInteraction) - 1
//! ```
//!
//! The model itself never clamps. Callers go through
//! [`PredictionModel::predict`] which rejects non-finite output and floors
//! the usable value at [`MIN_PREDICTED_LUMENS`].
//!
//! ## Break-even area
//!
//! With a negative intercept the raw prediction is negative for small rooms.
//! [`RegressionModel::break_even_area`] reports where it crosses zero so the
//! presentation layer can annotate the chart; the engine itself floors.

use crate::{
    constants::{model as defaults, MIN_PREDICTED_LUMENS},
    errors::{EngineResult, SimulationError},
    traits::{PredictionModel, Validatable},
    types::{PredictionInput, RoomTable, RoomType, Technology, TechnologyTable},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Functional form of the regression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ModelForm {
    /// Shared slope, categorical offsets only
    Linear,
    /// Per-room-type slope added to the shared slope
    LinearInteraction,
    /// Interaction model plus a quadratic area term
    Polynomial,
    /// Interaction model fitted on `ln(1 + lumens)`
    LogLinear,
}

/// Fitted coefficients, immutable once loaded
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegressionCoefficients {
    /// Constant term
    pub intercept: f64,
    /// Shared area slope
    pub area_slope: f64,
    /// Base offset per room type
    #[cfg_attr(feature = "serde", serde(default))]
    pub room_offsets: RoomTable<f64>,
    /// Extra area slope per room type (interaction forms only)
    #[cfg_attr(feature = "serde", serde(default))]
    pub room_area_slopes: Option<RoomTable<f64>>,
    /// Offset per technology
    #[cfg_attr(feature = "serde", serde(default))]
    pub technology_offsets: TechnologyTable<f64>,
    /// Quadratic area coefficient (polynomial form only)
    #[cfg_attr(feature = "serde", serde(default))]
    pub area_quadratic: Option<f64>,
}

impl Default for RegressionCoefficients {
    fn default() -> Self {
        Self {
            intercept: defaults::INTERCEPT_LM,
            area_slope: defaults::AREA_SLOPE_LM_PER_M2,
            room_offsets: RoomTable::new(0.0, defaults::OFFICE_OFFSET_LM, 0.0),
            room_area_slopes: Some(RoomTable::new(
                0.0,
                defaults::OFFICE_AREA_SLOPE_LM_PER_M2,
                0.0,
            )),
            technology_offsets: TechnologyTable::new(0.0, defaults::FLUORESCENT_OFFSET_LM),
            area_quadratic: None,
        }
    }
}

/// Regression model: a form plus its coefficients
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegressionModel {
    /// Functional form selected at configuration time
    pub form: ModelForm,
    /// Fitted coefficients
    pub coefficients: RegressionCoefficients,
}

impl Default for RegressionModel {
    fn default() -> Self {
        Self::new(ModelForm::LinearInteraction, RegressionCoefficients::default())
    }
}

impl RegressionModel {
    /// Create a model from a form and coefficients
    pub fn new(form: ModelForm, coefficients: RegressionCoefficients) -> Self {
        Self { form, coefficients }
    }

    /// Area slope that applies to a room type under this form
    fn effective_slope(&self, room: RoomType) -> f64 {
        let c = &self.coefficients;
        match self.form {
            ModelForm::Linear => c.area_slope,
            _ => c.area_slope + c.room_area_slopes.map_or(0.0, |s| *s.get(room)),
        }
    }

    /// Everything that does not depend on area
    fn constant_term(&self, room: RoomType, technology: Technology) -> f64 {
        let c = &self.coefficients;
        c.intercept + c.room_offsets.get(room) + c.technology_offsets.get(technology)
    }

    fn quadratic(&self) -> f64 {
        match self.form {
            ModelForm::Polynomial => self.coefficients.area_quadratic.unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Smallest positive area at which the raw prediction reaches zero
    ///
    /// `None` when the prediction is already non-negative at zero area or
    /// never becomes so.
    pub fn break_even_area(&self, room: RoomType, technology: Technology) -> Option<f64> {
        let b0 = self.constant_term(room, technology);
        if b0 >= 0.0 {
            return None;
        }
        let b1 = self.effective_slope(room);
        let b2 = self.quadratic();

        if b2 == 0.0 {
            return if b1 > 0.0 { Some(-b0 / b1) } else { None };
        }

        let discriminant = b1 * b1 - 4.0 * b2 * b0;
        if discriminant < 0.0 {
            return None;
        }
        let root = libm::sqrt(discriminant);
        let candidates = [(-b1 - root) / (2.0 * b2), (-b1 + root) / (2.0 * b2)];
        candidates
            .into_iter()
            .filter(|a| *a > 0.0)
            .fold(None, |best: Option<f64>, a| Some(best.map_or(a, |b| b.min(a))))
    }
}

impl PredictionModel for RegressionModel {
    fn predict_raw(&self, input: &PredictionInput) -> f64 {
        let a = input.area;
        let linear = self.constant_term(input.room_type, input.technology)
            + self.effective_slope(input.room_type) * a;

        match self.form {
            ModelForm::Linear | ModelForm::LinearInteraction => linear,
            ModelForm::Polynomial => linear + self.quadratic() * a * a,
            ModelForm::LogLinear => libm::expm1(linear),
        }
    }

    fn form(&self) -> ModelForm {
        self.form
    }

    fn is_monotone_in_area(&self, room: RoomType, _technology: Technology) -> bool {
        let slope = self.effective_slope(room);
        match self.form {
            // Sufficient for a >= 0: derivative b1 + 2·b2·a never negative
            ModelForm::Polynomial => slope >= 0.0 && self.quadratic() >= 0.0,
            _ => slope >= 0.0,
        }
    }
}

/// Post-processed model output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    raw: f64,
    lumens: f64,
}

impl Prediction {
    /// Check a raw model value and apply the lumen floor
    pub fn from_raw(raw: f64) -> EngineResult<Self> {
        if !raw.is_valid() {
            return Err(SimulationError::ArithmeticDegenerate);
        }
        Ok(Self {
            raw,
            lumens: raw.max(MIN_PREDICTED_LUMENS),
        })
    }

    /// Unclamped model output, possibly negative
    pub fn raw(&self) -> f64 {
        self.raw
    }

    /// Full-precision lumens, never below the floor
    pub fn lumens(&self) -> f64 {
        self.lumens
    }

    /// True if the floor replaced the raw value
    pub fn was_floored(&self) -> bool {
        self.raw < MIN_PREDICTED_LUMENS
    }

    /// Lumens rounded for display
    pub fn rounded(&self) -> u64 {
        round_lumens(self.lumens)
    }
}

/// Round a lumen value to the nearest whole lumen, saturating at zero
pub fn round_lumens(value: f64) -> u64 {
    if value <= 0.0 || !value.is_valid() {
        0
    } else {
        libm::round(value) as u64
    }
}
