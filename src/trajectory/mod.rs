//! Trajectory Module
//!
//! Converts an ordered directional survey into wellbore positions using the
//! Minimum Curvature Method.
//!
//! ## Functions
//! - `integrate()` - Walk the survey with the globally loaded options
//! - `integrate_with()` - Same, with explicit `SurveyConfig`
//! - `segment()` - Geometry of a single station pair
//!
//! Each step depends on the previous accumulated position, so one survey is a
//! strictly sequential scan. Separate surveys share nothing and may be
//! integrated on separate threads.

pub mod minimum_curvature;
pub mod types;

pub use minimum_curvature::{
    dogleg_angle, dogleg_severity, is_reversal, mean_azimuth, ratio_factor, segment, Segment,
};
pub use types::{Position, SeedState, SurveyError, SurveyStation, Trajectory};

pub use crate::config::{AzimuthAveraging, RatioFactorBasis, SurveyConfig};

use tracing::debug;

/// Integrate a survey using the global configuration (`config::get().survey`).
///
/// Returns one position per station, with `seed` at index 0.
///
/// The global options are fixed on first use: calling this before
/// `config::init()` locks in the built-in defaults, and a later `init()` is
/// ignored with a warning. Call `init()` first, or use `integrate_with()`.
pub fn integrate(stations: &[SurveyStation], seed: SeedState) -> Result<Trajectory, SurveyError> {
    integrate_with(stations, seed, &crate::config::get().survey)
}

/// Integrate a survey with explicit options.
///
/// Either the full trajectory is returned or the call fails before any
/// position is produced.
pub fn integrate_with(
    stations: &[SurveyStation],
    seed: SeedState,
    config: &SurveyConfig,
) -> Result<Trajectory, SurveyError> {
    validate_survey(stations, seed, config)?;

    let mut trajectory = Trajectory::seeded(stations.len(), seed);
    let mut zero_length_segments = 0usize;

    for (offset, pair) in stations.windows(2).enumerate() {
        let index = offset + 1;
        let seg = segment(&pair[0], &pair[1], config);

        if config.ratio_factor_basis == RatioFactorBasis::DoglegAngle && is_reversal(seg.dogleg) {
            return Err(SurveyError::ReversedDirection { index });
        }
        if seg.delta_md == 0.0 {
            zero_length_segments += 1;
        }

        trajectory.advance(index, &seg);
    }

    if zero_length_segments > 0 {
        debug!(
            count = zero_length_segments,
            "Zero-length segments: dogleg severity 0, ratio factor 1"
        );
    }
    debug!(
        stations = trajectory.len(),
        basis = ?config.ratio_factor_basis,
        averaging = ?config.azimuth_averaging,
        "Survey integrated"
    );

    Ok(trajectory)
}

/// Check the survey and seed before any computation.
fn validate_survey(
    stations: &[SurveyStation],
    seed: SeedState,
    config: &SurveyConfig,
) -> Result<(), SurveyError> {
    if stations.is_empty() {
        return Err(SurveyError::EmptySurvey);
    }

    let seed_fields = [
        ("seed easting", seed.easting),
        ("seed northing", seed.northing),
        ("seed tvd", seed.tvd),
    ];
    if let Some((field, _)) = seed_fields.iter().find(|(_, v)| !v.is_finite()) {
        return Err(SurveyError::NonFinite {
            index: 0,
            field: *field,
        });
    }

    for (index, station) in stations.iter().enumerate() {
        let fields = [
            ("measured depth", station.md),
            ("inclination", station.inclination),
            ("azimuth", station.azimuth),
        ];
        if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SurveyError::NonFinite {
                index,
                field: *field,
            });
        }
    }

    if config.validate_depths {
        for (offset, pair) in stations.windows(2).enumerate() {
            if pair[1].md < pair[0].md {
                return Err(SurveyError::NonMonotonicDepth {
                    index: offset + 1,
                    previous: pair[0].md,
                    current: pair[1].md,
                });
            }
        }
    }

    Ok(())
}
