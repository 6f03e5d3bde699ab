//! Default Least-Squares Coefficients
//!
//! Fitted offline on historical installations. Classroom and LED are the
//! reference categories, so their offsets are zero.
//!
//! No fitted values exist yet for meeting rooms; they share the classroom
//! baseline until the next fit.

/// Model intercept (lumens).
pub const INTERCEPT_LM: f64 = -3315.10;

/// Lumens per square meter for the reference category.
pub const AREA_SLOPE_LM_PER_M2: f64 = 689.57;

/// Office base offset (lumens).
pub const OFFICE_OFFSET_LM: f64 = -762.36;

/// Office area interaction slope (lumens per m²).
pub const OFFICE_AREA_SLOPE_LM_PER_M2: f64 = 323.22;

/// Fluorescent technology offset (lumens).
pub const FLUORESCENT_OFFSET_LM: f64 = 8603.72;
