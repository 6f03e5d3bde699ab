//! Room area validator
//!
//! The regression was fitted on rooms of a few square meters and up; below
//! the configured minimum the prediction is outside the data range.

use crate::{
    constants::lighting::MIN_AREA_M2,
    errors::InputField,
    traits::InputValidator,
};

use super::CommitPolicy;

/// Validator for the room area field (m²)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaValidator {
    /// Smallest accepted area
    min_area_m2: f64,

    /// Below-minimum handling on commit
    policy: CommitPolicy,
}

impl Default for AreaValidator {
    fn default() -> Self {
        Self {
            min_area_m2: MIN_AREA_M2,
            policy: CommitPolicy::Reject,
        }
    }
}

impl AreaValidator {
    /// Create a validator with a custom minimum
    ///
    /// A non-finite or non-positive minimum falls back to the default.
    pub fn new(min_area_m2: f64, policy: CommitPolicy) -> Self {
        let min_area_m2 = if min_area_m2.is_finite() && min_area_m2 > 0.0 {
            min_area_m2
        } else {
            MIN_AREA_M2
        };
        Self { min_area_m2, policy }
    }
}

impl InputValidator for AreaValidator {
    fn field(&self) -> InputField {
        InputField::Area
    }

    fn minimum(&self) -> f64 {
        self.min_area_m2
    }

    fn policy(&self) -> CommitPolicy {
        self.policy
    }
}
