//! Core traits for the prediction engine
//!
//! These traits define the seams where a deployment plugs in its own pieces.
//! Keep them small - the engine only needs a model and a source of randomness.

use crate::errors::{EngineResult, InputField, SimulationError};
use crate::model::{ModelForm, Prediction};
use crate::types::{PredictionInput, RoomType, Technology};
use crate::validators::{
    utils::{self, ParsedDraft},
    CommitPolicy, DraftState,
};

/// Strategy interface for lumen prediction
///
/// Implemented by [`RegressionModel`](crate::model::RegressionModel) for the
/// four configured functional forms. Tests and alternative deployments can
/// supply their own implementation.
pub trait PredictionModel {
    /// Evaluate the model without any post-processing
    ///
    /// The value may be negative (below the break-even area) or non-finite
    /// for degenerate coefficients.
    fn predict_raw(&self, input: &PredictionInput) -> f64;

    /// Functional form used by this model
    fn form(&self) -> ModelForm;

    /// Whether predictions never decrease as area grows
    fn is_monotone_in_area(&self, room: RoomType, technology: Technology) -> bool;

    /// Evaluate and post-process a prediction
    ///
    /// Rejects non-finite output and clamps the usable value to the minimum
    /// lumen floor.
    fn predict(&self, input: &PredictionInput) -> EngineResult<Prediction> {
        Prediction::from_raw(self.predict_raw(input))
    }
}

impl<M: PredictionModel + ?Sized> PredictionModel for &M {
    fn predict_raw(&self, input: &PredictionInput) -> f64 {
        (**self).predict_raw(input)
    }

    fn form(&self) -> ModelForm {
        (**self).form()
    }

    fn is_monotone_in_area(&self, room: RoomType, technology: Technology) -> bool {
        (**self).is_monotone_in_area(room, technology)
    }
}

/// Committed-value validator for a numeric form field
///
/// Implementors only describe the field; parsing and policy live in the
/// provided methods so every field behaves the same way.
pub trait InputValidator {
    /// Field reported in errors
    fn field(&self) -> InputField;

    /// Smallest accepted value
    fn minimum(&self) -> f64;

    /// What happens to a committed value below the minimum
    fn policy(&self) -> CommitPolicy;

    /// Classify text while the user is still typing
    ///
    /// Never clamps and never fails: intermediate states are expected.
    fn check_draft(&self, raw: &str) -> DraftState {
        match utils::parse_draft(raw) {
            ParsedDraft::Empty => DraftState::Empty,
            ParsedDraft::Incomplete => DraftState::Incomplete,
            ParsedDraft::NotANumber => DraftState::NotANumber,
            ParsedDraft::Number(value) if utils::meets_minimum(value, self.minimum()) => {
                DraftState::Valid(value)
            }
            ParsedDraft::Number(value) => DraftState::BelowMinimum(value),
        }
    }

    /// Validate text when the field loses focus
    fn commit(&self, raw: &str) -> EngineResult<f64> {
        match utils::parse_draft(raw) {
            ParsedDraft::Number(value) => self.validate(value),
            ParsedDraft::Empty => Err(SimulationError::InvalidInput {
                field: self.field(),
                reason: "a value is required",
            }),
            ParsedDraft::Incomplete | ParsedDraft::NotANumber => {
                Err(SimulationError::InvalidInput {
                    field: self.field(),
                    reason: "not a number",
                })
            }
        }
    }

    /// Validate an already numeric value under the commit policy
    ///
    /// Zero and negative values are rejected under either policy.
    fn validate(&self, value: f64) -> EngineResult<f64> {
        let min = self.minimum();
        if !value.is_valid() {
            return Err(SimulationError::InvalidInput {
                field: self.field(),
                reason: "not a finite number",
            });
        }
        if value >= min {
            return Ok(value);
        }
        match self.policy() {
            CommitPolicy::Clamp if value > 0.0 => {
                log_debug!("Clamping {} from {} to {}", self.field(), value, min);
                Ok(min)
            }
            _ => Err(SimulationError::BelowMinimum {
                field: self.field(),
                value,
                min,
            }),
        }
    }
}

/// Trait for values that can be validated
pub trait Validatable {
    /// Check if the value is usable in arithmetic (not NaN, infinite, etc)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}
