//! Minimum Curvature segment geometry
//!
//! Per-segment calculations between two consecutive survey stations:
//! - Dogleg angle (spherical law of cosines)
//! - Dogleg severity (turn per unit measured depth)
//! - Ratio factor (chord to circular-arc correction)
//! - Northing / easting / TVD increments

use serde::Serialize;
use std::f64::consts::PI;

use super::types::SurveyStation;
use crate::config::defaults::{
    OPPOSITE_HEADING_TOLERANCE, RATIO_FACTOR_SERIES_THRESHOLD, REVERSAL_TOLERANCE,
};
use crate::config::{AzimuthAveraging, RatioFactorBasis, SurveyConfig};

/// Geometry of one survey segment (station i-1 to station i).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    /// Measured-depth increment along the wellbore
    pub delta_md: f64,
    /// Total turn angle between the two station directions (radians)
    pub dogleg: f64,
    /// Dogleg per unit measured depth; 0.0 when `delta_md` is zero
    pub dogleg_severity: f64,
    pub ratio_factor: f64,
    pub delta_northing: f64,
    pub delta_easting: f64,
    pub delta_tvd: f64,
}

// ============================================================================
// Dogleg
// ============================================================================

/// Dogleg angle β between two station directions.
///
/// cos β = cos I₁ cos I₂ + sin I₁ sin I₂ cos(A₂ − A₁)
///
/// The cosine is clamped into [-1, 1] before `acos` so rounding on
/// near-parallel or near-opposite directions cannot produce NaN.
pub fn dogleg_angle(prev: &SurveyStation, curr: &SurveyStation) -> f64 {
    let cos_dogleg = prev.inclination.cos() * curr.inclination.cos()
        + prev.inclination.sin() * curr.inclination.sin() * (curr.azimuth - prev.azimuth).cos();
    cos_dogleg.clamp(-1.0, 1.0).acos()
}

/// Dogleg severity: turn angle per unit measured depth.
///
/// A zero-length segment has no computable turn rate and reports 0.0.
pub fn dogleg_severity(dogleg: f64, delta_md: f64) -> f64 {
    if delta_md == 0.0 {
        0.0
    } else {
        dogleg / delta_md
    }
}

/// True when the dogleg is a full reversal and the connecting arc is undefined.
///
/// Compared against `REVERSAL_TOLERANCE` rather than exact π: rounding in the
/// cosine leaves opposite directions a few 1e-8 short of π after `acos`.
pub fn is_reversal(dogleg: f64) -> bool {
    PI - dogleg < REVERSAL_TOLERANCE
}

// ============================================================================
// Ratio Factor
// ============================================================================

/// Ratio factor RF = (2 / x) · tan(x / 2).
///
/// x == 0 is a straight segment and RF = 1, the limit of the expression.
/// Very small |x| uses the series 1 + x²/12 so that x/2 cannot underflow.
pub fn ratio_factor(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else if x.abs() < RATIO_FACTOR_SERIES_THRESHOLD {
        1.0 + x * x / 12.0
    } else {
        (2.0 / x) * (x / 2.0).tan()
    }
}

// ============================================================================
// Azimuth Averaging
// ============================================================================

/// Mean heading of a segment.
///
/// `Arithmetic` is (A₁ + A₂) / 2, which lands on the wrong side of the
/// circle when the segment crosses north (359° and 1° average to 180°).
/// `Circular` takes the shortest-arc mean and falls back to the arithmetic
/// mean when the two headings are exactly opposite.
pub fn mean_azimuth(prev: f64, curr: f64, averaging: AzimuthAveraging) -> f64 {
    let arithmetic = (prev + curr) / 2.0;
    match averaging {
        AzimuthAveraging::Arithmetic => arithmetic,
        AzimuthAveraging::Circular => {
            let sin_sum = prev.sin() + curr.sin();
            let cos_sum = prev.cos() + curr.cos();
            if sin_sum.hypot(cos_sum) < OPPOSITE_HEADING_TOLERANCE {
                arithmetic
            } else {
                sin_sum.atan2(cos_sum)
            }
        }
    }
}

// ============================================================================
// Segment
// ============================================================================

/// Compute the geometry of the segment from `prev` to `curr`.
///
/// Does not check for reversed directions; `is_reversal(segment.dogleg)`
/// identifies those when the dogleg-angle basis is in use.
pub fn segment(prev: &SurveyStation, curr: &SurveyStation, config: &SurveyConfig) -> Segment {
    let delta_md = curr.md - prev.md;
    let dogleg = dogleg_angle(prev, curr);
    let dls = dogleg_severity(dogleg, delta_md);

    let ratio_factor = match config.ratio_factor_basis {
        RatioFactorBasis::DoglegSeverity => ratio_factor(dls),
        RatioFactorBasis::DoglegAngle => ratio_factor(dogleg),
    };

    let sin_avg_inc = (prev.inclination.sin() + curr.inclination.sin()) / 2.0;
    let cos_avg_inc = (prev.inclination.cos() + curr.inclination.cos()) / 2.0;
    let azimuth = mean_azimuth(prev.azimuth, curr.azimuth, config.azimuth_averaging);

    let course = ratio_factor * delta_md;

    Segment {
        delta_md,
        dogleg,
        dogleg_severity: dls,
        ratio_factor,
        delta_northing: course * sin_avg_inc * azimuth.cos(),
        delta_easting: course * sin_avg_inc * azimuth.sin(),
        delta_tvd: course * cos_avg_inc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_ratio_factor_straight_segment() {
        assert_eq!(ratio_factor(0.0), 1.0);
    }

    #[test]
    fn test_ratio_factor_quarter_turn() {
        // (2 / (π/2)) · tan(π/4) = 4/π
        let rf = ratio_factor(FRAC_PI_2);
        assert!((rf - 4.0 / PI).abs() < EPS, "RF should be 4/π, got {}", rf);
    }

    #[test]
    fn test_ratio_factor_series_branch_is_continuous() {
        let x = RATIO_FACTOR_SERIES_THRESHOLD;
        let series = ratio_factor(x * 0.999);
        let closed = ratio_factor(x * 1.001);
        assert!((series - closed).abs() < 1e-15);
        assert!(ratio_factor(f64::MIN_POSITIVE) >= 1.0);
    }

    #[test]
    fn test_dogleg_of_identical_directions_is_near_zero() {
        let a = SurveyStation::new(0.0, 0.7, 1.3);
        let b = SurveyStation::new(100.0, 0.7, 1.3);
        let dogleg = dogleg_angle(&a, &b);
        assert!(dogleg.is_finite());
        assert!(dogleg < 1e-7, "Parallel stations should have ~0 dogleg, got {}", dogleg);
    }

    #[test]
    fn test_dogleg_vertical_to_horizontal() {
        let a = SurveyStation::new(0.0, 0.0, 0.0);
        let b = SurveyStation::new(1000.0, FRAC_PI_2, 0.0);
        assert!((dogleg_angle(&a, &b) - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_dogleg_clamps_opposite_directions() {
        let a = SurveyStation::new(0.0, FRAC_PI_2, 0.0);
        let b = SurveyStation::new(10.0, FRAC_PI_2, PI);
        let dogleg = dogleg_angle(&a, &b);
        assert!(!dogleg.is_nan());
        assert!(is_reversal(dogleg));
    }

    #[test]
    fn test_reversal_detected_through_acos_rounding() {
        // cos β rounds to -1 + ε here, which acos maps to about π - 1.5e-8
        let a = SurveyStation::new(0.0, 0.0157, 0.031);
        let b = SurveyStation::new(100.0, PI - 0.0157, 0.031 + PI);
        let dogleg = dogleg_angle(&a, &b);
        assert!(is_reversal(dogleg), "π - β = {:e}", PI - dogleg);

        assert!(!is_reversal(PI - 1e-3));
        assert!(!is_reversal(FRAC_PI_2));
    }

    #[test]
    fn test_dogleg_severity_zero_length() {
        assert_eq!(dogleg_severity(0.5, 0.0), 0.0);
        assert!((dogleg_severity(0.5, 100.0) - 0.005).abs() < EPS);
    }

    #[test]
    fn test_mean_azimuth_wraparound() {
        let a1 = 359.0_f64.to_radians();
        let a2 = 1.0_f64.to_radians();

        let naive = mean_azimuth(a1, a2, AzimuthAveraging::Arithmetic);
        assert!((naive - PI).abs() < EPS, "Arithmetic mean should be 180°");

        let circular = mean_azimuth(a1, a2, AzimuthAveraging::Circular);
        assert!(circular.abs() < EPS, "Circular mean should be 0°, got {}", circular);
    }

    #[test]
    fn test_mean_azimuth_opposite_headings_fall_back() {
        let m = mean_azimuth(0.0, PI, AzimuthAveraging::Circular);
        assert!((m - FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_zero_length_segment_has_no_increment() {
        let cfg = SurveyConfig::default();
        let a = SurveyStation::new(500.0, 0.2, 0.4);
        let b = SurveyStation::new(500.0, 0.9, 2.1);
        let seg = segment(&a, &b, &cfg);
        assert_eq!(seg.dogleg_severity, 0.0);
        assert_eq!(seg.ratio_factor, 1.0);
        assert_eq!(seg.delta_northing, 0.0);
        assert_eq!(seg.delta_easting, 0.0);
        assert_eq!(seg.delta_tvd, 0.0);
    }

    #[test]
    fn test_straight_inclined_segment_reduces_to_tangent() {
        let cfg = SurveyConfig::default();
        let (inc, azi) = (0.5_f64, 0.8_f64);
        let a = SurveyStation::new(1000.0, inc, azi);
        let b = SurveyStation::new(1100.0, inc, azi);
        let seg = segment(&a, &b, &cfg);

        assert!((seg.ratio_factor - 1.0).abs() < EPS);
        assert!((seg.delta_tvd - 100.0 * inc.cos()).abs() < 1e-6);
        assert!((seg.delta_northing - 100.0 * inc.sin() * azi.cos()).abs() < 1e-6);
        assert!((seg.delta_easting - 100.0 * inc.sin() * azi.sin()).abs() < 1e-6);
    }

    #[test]
    fn test_dogleg_angle_basis_quarter_circle() {
        let cfg = SurveyConfig {
            ratio_factor_basis: RatioFactorBasis::DoglegAngle,
            ..SurveyConfig::default()
        };
        let a = SurveyStation::new(0.0, 0.0, 0.0);
        let b = SurveyStation::new(1000.0, FRAC_PI_2, 0.0);
        let seg = segment(&a, &b, &cfg);

        // Arc of radius 2000/π: both the drop and the reach equal the radius
        let radius = 2000.0 / PI;
        assert!((seg.delta_tvd - radius).abs() < 1e-6, "got {}", seg.delta_tvd);
        assert!((seg.delta_northing - radius).abs() < 1e-6);
        assert!(seg.delta_easting.abs() < 1e-9);
    }
}
