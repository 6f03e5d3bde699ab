//! Uncertainty Bands Around a Prediction
//!
//! ## Overview
//!
//! A point prediction from a least-squares fit hides the model error. The
//! simulator always shows a low/high interval next to the headline number,
//! produced by one of two algorithms declared in configuration:
//!
//! ### Fixed percentage
//! ```text
//! low  = max(0, L × (1 - p))
//! high = L × (1 + p)          p ∈ {5%, 10%}, default 7%
//! ```
//! Deterministic, O(1), independent of historical data.
//!
//! ### Residual bootstrap
//! Resamples residuals from real installations around the point prediction
//! and takes the empirical 95% interval. See [`bootstrap`].
//!
//! ## Fallback Visibility
//!
//! The two algorithms are not interchangeable. When bootstrap mode is
//! configured but no reference data is available, the engine falls back to
//! a fixed band and tags it [`BandMethod::FixedPercentFallback`] so the
//! result never passes a fixed band off as a bootstrap one.
//!
//! ## Precision
//!
//! Band edges are kept at full precision and only rounded by
//! [`UncertaintyBand::low_rounded`] / [`UncertaintyBand::high_rounded`] at
//! the presentation boundary.

pub mod bootstrap;
pub mod rng;

pub use bootstrap::{BootstrapEstimator, ReferenceDataset, ReferenceRow};
pub use rng::RandomSource;

use crate::{
    constants::uncertainty::{BOOTSTRAP_DEFAULT_ITERATIONS, NARROW_BAND_PCT, WIDE_BAND_PCT},
    model::round_lumens,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Band width the user can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BandWidth {
    /// ±5%
    Five,
    /// ±10%
    Ten,
}

impl BandWidth {
    /// Half-width in percent
    pub fn percent(self) -> f64 {
        match self {
            Self::Five => NARROW_BAND_PCT,
            Self::Ten => WIDE_BAND_PCT,
        }
    }
}

impl TryFrom<u8> for BandWidth {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(Self::Five),
            10 => Ok(Self::Ten),
            other => Err(other),
        }
    }
}

/// Band algorithm declared in configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum UncertaintyMode {
    /// Fixed percentage around the prediction
    #[default]
    FixedPercent,
    /// Residual bootstrap over the reference dataset
    Bootstrap {
        /// Resampling iterations, clamped to [100, 500]
        #[cfg_attr(feature = "serde", serde(default = "default_iterations"))]
        iterations: usize,
    },
}

#[cfg(feature = "serde")]
fn default_iterations() -> usize {
    BOOTSTRAP_DEFAULT_ITERATIONS
}

impl UncertaintyMode {
    /// Bootstrap mode with the default iteration count
    pub fn bootstrap() -> Self {
        Self::Bootstrap {
            iterations: BOOTSTRAP_DEFAULT_ITERATIONS,
        }
    }
}

/// Algorithm that actually produced a band
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum BandMethod {
    /// Fixed percentage, as configured
    FixedPercent {
        /// Half-width in percent
        percent: f64,
    },
    /// Residual bootstrap
    Bootstrap {
        /// Iterations after clamping
        iterations: usize,
    },
    /// Fixed percentage standing in for an unavailable bootstrap
    FixedPercentFallback {
        /// Half-width in percent
        percent: f64,
    },
}

impl BandMethod {
    /// True if bootstrap was requested but could not run
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::FixedPercentFallback { .. })
    }
}

/// Low/high interval around a prediction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UncertaintyBand {
    /// Lower edge (lumens), never negative
    pub low: f64,
    /// Upper edge (lumens)
    pub high: f64,
    /// Algorithm that produced the band
    pub method: BandMethod,
}

impl UncertaintyBand {
    /// Symmetric percentage band around `lumens`
    pub fn fixed(lumens: f64, percent: f64) -> Self {
        let p = percent / 100.0;
        Self {
            low: (lumens * (1.0 - p)).max(0.0),
            high: lumens * (1.0 + p),
            method: BandMethod::FixedPercent { percent },
        }
    }

    /// Fixed band tagged as a stand-in for bootstrap
    pub fn fixed_fallback(lumens: f64, percent: f64) -> Self {
        Self {
            method: BandMethod::FixedPercentFallback { percent },
            ..Self::fixed(lumens, percent)
        }
    }

    /// Lower edge rounded for display
    pub fn low_rounded(&self) -> u64 {
        round_lumens(self.low)
    }

    /// Upper edge rounded for display
    pub fn high_rounded(&self) -> u64 {
        round_lumens(self.high)
    }

    /// Whether a value lies inside the band
    pub fn contains(&self, value: f64) -> bool {
        self.low <= value && value <= self.high
    }

    /// Distance between the edges
    pub fn width(&self) -> f64 {
        self.high - self.low
    }
}
