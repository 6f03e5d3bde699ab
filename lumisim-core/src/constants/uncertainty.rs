//! Uncertainty Band Constants

// ===== FIXED PERCENTAGE BANDS =====

/// Narrow band selectable by the user (±5%).
pub const NARROW_BAND_PCT: f64 = 5.0;

/// Wide band selectable by the user (±10%).
pub const WIDE_BAND_PCT: f64 = 10.0;

/// Band used when the caller does not select one (±7%).
///
/// Standard error of the original least-squares fit.
pub const DEFAULT_BAND_PCT: f64 = 7.0;

// ===== BOOTSTRAP =====

/// Lower bound on bootstrap resampling iterations.
///
/// Fewer draws make the 2.5th/97.5th percentiles meaningless.
pub const BOOTSTRAP_MIN_ITERATIONS: usize = 100;

/// Upper bound on bootstrap resampling iterations.
///
/// Bounds per-request cost so the estimate can stay synchronous. Also sizes
/// the stack buffer used to collect resampled values.
pub const BOOTSTRAP_MAX_ITERATIONS: usize = 500;

/// Iterations used when the configuration does not say otherwise.
pub const BOOTSTRAP_DEFAULT_ITERATIONS: usize = 200;

/// Lower percentile of the bootstrap interval.
pub const BOOTSTRAP_LOWER_PERCENTILE: f64 = 0.025;

/// Upper percentile of the bootstrap interval.
pub const BOOTSTRAP_UPPER_PERCENTILE: f64 = 0.975;
