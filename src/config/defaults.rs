//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Configuration Loading
// ============================================================================

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "PETRO_CALC_CONFIG";

/// Config file looked up in the current working directory.
pub const CONFIG_FILE_NAME: &str = "petro_calc.toml";

// ============================================================================
// Trajectory
// ============================================================================

/// Course length used to report dogleg severity (e.g. rad/30 ft).
pub const DLS_COURSE_LENGTH: f64 = 30.0;

/// Below this |x| the ratio factor uses the series 1 + x²/12.
///
/// At 1e-6 the dropped x⁴ term is ~1e-26, far below f64 resolution around 1.
pub const RATIO_FACTOR_SERIES_THRESHOLD: f64 = 1e-6;

/// A dogleg within this distance of π is a full reversal.
///
/// `acos` near -1 only resolves angles to about sqrt(2ε) ≈ 1.5e-8, so an
/// exactly opposite pair of directions can come out up to a few 1e-8 short
/// of π. The tolerance sits well above that floor.
pub const REVERSAL_TOLERANCE: f64 = 1e-6;

/// Minimum resultant length of two unit headings for a circular azimuth mean.
pub const OPPOSITE_HEADING_TOLERANCE: f64 = 1e-12;

// ============================================================================
// Inflow Performance
// ============================================================================

/// Number of (p_wf, q) points in a generated IPR curve.
pub const IPR_CURVE_POINTS: usize = 100;

/// Vogel linear coefficient.
pub const VOGEL_LINEAR_COEFFICIENT: f64 = 0.2;

/// Vogel quadratic coefficient.
pub const VOGEL_QUADRATIC_COEFFICIENT: f64 = 0.8;
