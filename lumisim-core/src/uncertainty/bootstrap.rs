//! Residual bootstrap over historical installations
//!
//! ## Algorithm
//!
//! ```text
//! residual_i = observed_i - model(area_i, room_i, tech_i)       (once)
//!
//! for k in 1..=N:                                    N ∈ [100, 500]
//!     i      = uniform row index
//!     y_k    = point + residual_i
//!
//! sort y
//! low  = max(0, y[2.5%])        high = y[97.5%]       (nearest rank)
//! ```
//!
//! The band depends on the current point prediction *and* the whole
//! reference dataset, so it is recomputed on every call. Nothing is cached
//! between calls except the residuals, which only depend on the model.
//!
//! An empirical interval need not contain the point it was built around
//! (every residual could share a sign), so the final band is widened to
//! include the point.
//!
//! ## Memory
//!
//! Draws go into a fixed `heapless::Vec` sized by the iteration cap, so a
//! bootstrap never allocates.

use alloc::sync::Arc;
use alloc::vec::Vec;

use heapless::Vec as FixedVec;

use crate::{
    constants::uncertainty::{
        BOOTSTRAP_LOWER_PERCENTILE, BOOTSTRAP_MAX_ITERATIONS, BOOTSTRAP_MIN_ITERATIONS,
        BOOTSTRAP_UPPER_PERCENTILE,
    },
    traits::{PredictionModel, Validatable},
    types::{PredictionInput, RoomType, Technology},
};

use super::{rng::RandomSource, BandMethod, UncertaintyBand};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One historical installation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferenceRow {
    /// Floor area (m²)
    pub area: f64,
    /// Room category
    pub room_type: RoomType,
    /// Installed technology
    pub technology: Technology,
    /// Lumens actually required on site
    pub observed_lumens: f64,
}

impl ReferenceRow {
    /// Model input describing this row
    pub fn input(&self) -> PredictionInput {
        PredictionInput::new(self.area, self.room_type, self.technology)
    }
}

/// Read-only historical dataset, shared between estimators
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceDataset {
    rows: Vec<ReferenceRow>,
}

impl ReferenceDataset {
    /// Wrap loaded rows
    pub fn new(rows: Vec<ReferenceRow>) -> Self {
        Self { rows }
    }

    /// All rows in load order
    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if nothing was loaded
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<ReferenceRow> for ReferenceDataset {
    fn from_iter<I: IntoIterator<Item = ReferenceRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Clamp a requested iteration count to the supported range
pub fn clamp_iterations(requested: usize) -> usize {
    requested.clamp(BOOTSTRAP_MIN_ITERATIONS, BOOTSTRAP_MAX_ITERATIONS)
}

/// Nearest-rank percentile of sorted values; `p` in `[0, 1]`
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let rank = libm::ceil(p * n as f64) as usize;
    Some(sorted[rank.clamp(1, n) - 1])
}

/// Residual bootstrap estimator
#[derive(Debug, Clone)]
pub struct BootstrapEstimator {
    dataset: Arc<ReferenceDataset>,
    residuals: Vec<f64>,
}

impl BootstrapEstimator {
    /// Precompute residuals of `model` over `dataset`
    ///
    /// Rows whose residual is not finite are skipped.
    pub fn new<M: PredictionModel>(model: &M, dataset: Arc<ReferenceDataset>) -> Self {
        let residuals: Vec<f64> = dataset
            .rows()
            .iter()
            .map(|row| row.observed_lumens - model.predict_raw(&row.input()))
            .filter(|r| r.is_valid())
            .collect();

        if residuals.len() < dataset.len() {
            log_warn!(
                "Skipped {} reference rows with non-finite residuals",
                dataset.len() - residuals.len()
            );
        }
        log_debug!("Bootstrap estimator ready with {} residuals", residuals.len());

        Self { dataset, residuals }
    }

    /// Dataset the residuals came from
    pub fn dataset(&self) -> &ReferenceDataset {
        &self.dataset
    }

    /// Residuals in dataset order
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// True if there is nothing to resample
    pub fn is_empty(&self) -> bool {
        self.residuals.is_empty()
    }

    /// 95% band around `point`, or `None` with no usable residuals
    pub fn estimate<R: RandomSource + ?Sized>(
        &self,
        point: f64,
        iterations: usize,
        rng: &mut R,
    ) -> Option<UncertaintyBand> {
        if self.residuals.is_empty() || !point.is_valid() {
            return None;
        }

        let iterations = clamp_iterations(iterations);
        let mut samples: FixedVec<f64, BOOTSTRAP_MAX_ITERATIONS> = FixedVec::new();
        for _ in 0..iterations {
            let residual = self.residuals[rng.next_index(self.residuals.len())];
            if samples.push(point + residual).is_err() {
                break;
            }
        }
        samples.sort_unstable_by(f64::total_cmp);

        let low = percentile(&samples, BOOTSTRAP_LOWER_PERCENTILE)?.max(0.0);
        let high = percentile(&samples, BOOTSTRAP_UPPER_PERCENTILE)?;
        log_trace!("Bootstrap band [{}, {}] around {}", low, high, point);

        Some(UncertaintyBand {
            low: low.min(point),
            high: high.max(point),
            method: BandMethod::Bootstrap { iterations },
        })
    }
}
