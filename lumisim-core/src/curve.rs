//! Projection curve for charting
//!
//! Samples predicted lumens across an area range for one room type and
//! technology. Pure: the same arguments always give the same points.
//!
//! The current input's area is always part of the output, inserted into the
//! evenly spaced grid when it does not already fall on it, so the highlighted
//! marker sits exactly on the curve and matches the headline number.
//!
//! Points below the break-even area use the same lumen floor as every other
//! prediction; the domain is never clipped.

use alloc::vec::Vec;

use crate::{
    errors::{EngineResult, SimulationError},
    traits::{PredictionModel, Validatable},
    types::{PredictionInput, RoomType, Technology},
};

/// Upper bound on samples per curve
pub const MAX_CURVE_SAMPLES: usize = 2048;

/// Area range to sample, in m²
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaDomain {
    min: f64,
    max: f64,
}

impl AreaDomain {
    /// Validate `0 < min < max`, both finite
    pub fn new(min: f64, max: f64) -> EngineResult<Self> {
        if !min.is_valid() || !max.is_valid() || min <= 0.0 || min >= max {
            return Err(SimulationError::InvalidDomain { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound
    pub fn max(&self) -> f64 {
        self.max
    }

    /// `count` evenly spaced areas including both bounds
    fn grid(&self, count: usize) -> impl Iterator<Item = f64> + '_ {
        let step = (self.max - self.min) / (count - 1) as f64;
        (0..count).map(move |i| {
            if i + 1 == count {
                self.max
            } else {
                self.min + step * i as f64
            }
        })
    }
}

/// One sampled point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Area (m²)
    pub area: f64,
    /// Predicted lumens, floored
    pub lumens: f64,
    /// True for the caller's current input
    pub highlighted: bool,
}

/// Samples a model over an area range
#[derive(Debug, Clone, Copy)]
pub struct ProjectionCurveGenerator<'m, M> {
    model: &'m M,
}

impl<'m, M: PredictionModel> ProjectionCurveGenerator<'m, M> {
    /// Wrap a model
    pub fn new(model: &'m M) -> Self {
        Self { model }
    }

    /// Sample `sample_count` points, plus `highlight` if it is off-grid
    pub fn curve(
        &self,
        room_type: RoomType,
        technology: Technology,
        domain: AreaDomain,
        sample_count: usize,
        highlight: Option<f64>,
    ) -> EngineResult<Vec<CurvePoint>> {
        if !(2..=MAX_CURVE_SAMPLES).contains(&sample_count) {
            return Err(SimulationError::InvalidSampleCount {
                requested: sample_count,
            });
        }

        let base = PredictionInput::new(domain.min(), room_type, technology);
        let point = |area: f64, highlighted: bool| -> EngineResult<CurvePoint> {
            let prediction = self.model.predict(&base.with_area(area))?;
            Ok(CurvePoint {
                area,
                lumens: prediction.lumens(),
                highlighted,
            })
        };

        let highlight = highlight.filter(|a| a.is_valid() && *a > 0.0);
        let mut points = Vec::with_capacity(sample_count + 1);
        let mut placed = false;

        for area in domain.grid(sample_count) {
            let on_grid = highlight.is_some_and(|h| same_area(h, area));
            placed |= on_grid;
            points.push(point(area, on_grid)?);
        }

        if let (Some(area), false) = (highlight, placed) {
            points.push(point(area, true)?);
            points.sort_by(|a, b| a.area.total_cmp(&b.area));
        }

        Ok(points)
    }
}

fn same_area(a: f64, b: f64) -> bool {
    let scale = a.max(b).max(1.0);
    let diff = if a > b { a - b } else { b - a };
    diff <= scale * 1e-12
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RegressionModel;

    #[test]
    fn domain_validation() {
        assert!(AreaDomain::new(5.0, 100.0).is_ok());
        assert!(AreaDomain::new(100.0, 5.0).is_err());
        assert!(AreaDomain::new(0.0, 5.0).is_err());
        assert!(AreaDomain::new(5.0, f64::INFINITY).is_err());
    }

    #[test]
    fn grid_includes_both_bounds() {
        let model = RegressionModel::default();
        let generator = ProjectionCurveGenerator::new(&model);
        let domain = AreaDomain::new(5.0, 105.0).unwrap();

        let points = generator
            .curve(RoomType::Office, Technology::Led, domain, 11, None)
            .unwrap();

        assert_eq!(points.len(), 11);
        assert_eq!(points[0].area, 5.0);
        assert_eq!(points[10].area, 105.0);
        assert!((points[1].area - 15.0).abs() < 1e-9);
        assert!(points.iter().all(|p| !p.highlighted));
    }

    #[test]
    fn off_grid_highlight_is_inserted_in_order() {
        let model = RegressionModel::default();
        let generator = ProjectionCurveGenerator::new(&model);
        let domain = AreaDomain::new(5.0, 105.0).unwrap();

        let points = generator
            .curve(RoomType::Classroom, Technology::Led, domain, 11, Some(37.5))
            .unwrap();

        assert_eq!(points.len(), 12);
        let marker = points.iter().position(|p| p.highlighted).unwrap();
        assert_eq!(points[marker].area, 37.5);
        assert!(points.windows(2).all(|w| w[0].area <= w[1].area));

        let headline = model
            .predict(&PredictionInput::new(37.5, RoomType::Classroom, Technology::Led))
            .unwrap();
        assert_eq!(points[marker].lumens, headline.lumens());
    }

    #[test]
    fn on_grid_highlight_is_not_duplicated() {
        let model = RegressionModel::default();
        let generator = ProjectionCurveGenerator::new(&model);
        let domain = AreaDomain::new(5.0, 105.0).unwrap();

        let points = generator
            .curve(RoomType::Classroom, Technology::Led, domain, 11, Some(55.0))
            .unwrap();

        assert_eq!(points.len(), 11);
        assert_eq!(points.iter().filter(|p| p.highlighted).count(), 1);
    }

    #[test]
    fn values_below_break_even_are_floored() {
        let model = RegressionModel::default();
        let generator = ProjectionCurveGenerator::new(&model);
        let domain = AreaDomain::new(1.0, 4.0).unwrap();

        let points = generator
            .curve(RoomType::Classroom, Technology::Led, domain, 4, None)
            .unwrap();
        assert!(points.iter().all(|p| p.lumens == 1.0));
    }

    #[test]
    fn rejects_bad_sample_counts() {
        let model = RegressionModel::default();
        let generator = ProjectionCurveGenerator::new(&model);
        let domain = AreaDomain::new(5.0, 50.0).unwrap();

        for count in [0, 1, MAX_CURVE_SAMPLES + 1] {
            assert_eq!(
                generator.curve(RoomType::Office, Technology::Led, domain, count, None),
                Err(SimulationError::InvalidSampleCount { requested: count })
            );
        }
    }
}
