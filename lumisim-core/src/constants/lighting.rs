//! Lighting Design Constants
//!
//! Target illuminance presets and the simplifications applied when turning a
//! lumen requirement into a fixture count.

// ===== TARGET ILLUMINANCE PRESETS =====

/// Target illuminance for classrooms (lux).
///
/// Maintained illuminance for teaching spaces.
///
/// Source: EN 12464-1, educational buildings
pub const CLASSROOM_TARGET_LUX: f64 = 500.0;

/// Target illuminance for offices (lux).
///
/// Source: EN 12464-1 general office areas, as used by the simulator
pub const OFFICE_TARGET_LUX: f64 = 400.0;

/// Target illuminance for meeting rooms (lux).
///
/// Source: EN 12464-1, conference and meeting rooms
pub const MEETING_ROOM_TARGET_LUX: f64 = 500.0;

// ===== RECOMMENDATION =====

/// Utilization factor applied to delivered lumens.
///
/// Fixed simplification of fixture, room and maintenance losses. Not a
/// photometric coefficient of utilization.
pub const UTILIZATION_FACTOR: f64 = 0.8;

/// Floor applied to every predicted lumen value.
///
/// Zero lumens is meaningless as a requirement and would break the
/// fixture-count division.
pub const MIN_PREDICTED_LUMENS: f64 = 1.0;

// ===== INPUT LIMITS =====

/// Minimum viable room area (m²).
///
/// Below this the fitted model is outside its data range.
pub const MIN_AREA_M2: f64 = 5.0;

/// Minimum target illuminance a user may request (lux).
pub const MIN_TARGET_LUX: f64 = 1.0;
