//! Target illuminance validator

use crate::{
    constants::lighting::MIN_TARGET_LUX,
    errors::InputField,
    traits::InputValidator,
};

use super::CommitPolicy;

/// Validator for the optional target illuminance field (lux)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IlluminanceValidator {
    min_lux: f64,
    policy: CommitPolicy,
}

impl Default for IlluminanceValidator {
    fn default() -> Self {
        Self {
            min_lux: MIN_TARGET_LUX,
            policy: CommitPolicy::Reject,
        }
    }
}

impl IlluminanceValidator {
    /// Create a validator with a custom minimum
    pub fn new(min_lux: f64, policy: CommitPolicy) -> Self {
        let min_lux = if min_lux.is_finite() && min_lux > 0.0 {
            min_lux
        } else {
            MIN_TARGET_LUX
        };
        Self { min_lux, policy }
    }
}

impl InputValidator for IlluminanceValidator {
    fn field(&self) -> InputField {
        InputField::TargetIlluminance
    }

    fn minimum(&self) -> f64 {
        self.min_lux
    }

    fn policy(&self) -> CommitPolicy {
        self.policy
    }
}
