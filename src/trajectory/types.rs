//! Survey Data Types
//!
//! Stations are read-only inputs owned by the caller. The trajectory is built
//! once per call into buffers sized to the station count, so every output
//! sequence is index-aligned with the survey.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::minimum_curvature::Segment;

// ============================================================================
// Inputs
// ============================================================================

/// A single directional survey station.
///
/// Angles are in radians: inclination is measured from true vertical
/// (0 = vertical, π/2 = horizontal), azimuth from north.
///
/// Deserializes from either an object (`{"md": .., "inclination": .., "azimuth": ..}`)
/// or a bare `[md, inclination, azimuth]` triple.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurveyStation {
    /// Measured depth along the wellbore
    #[serde(alias = "measured_depth")]
    pub md: f64,

    /// Inclination from true vertical (radians)
    #[serde(alias = "inc")]
    pub inclination: f64,

    /// Azimuth from north (radians)
    #[serde(alias = "azi")]
    pub azimuth: f64,
}

impl SurveyStation {
    pub const fn new(md: f64, inclination: f64, azimuth: f64) -> Self {
        Self {
            md,
            inclination,
            azimuth,
        }
    }
}

impl From<(f64, f64, f64)> for SurveyStation {
    fn from((md, inclination, azimuth): (f64, f64, f64)) -> Self {
        Self::new(md, inclination, azimuth)
    }
}

/// A point on the wellbore in local grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub easting: f64,
    pub northing: f64,
    /// True vertical depth, positive down
    pub tvd: f64,
}

impl Position {
    pub const fn new(easting: f64, northing: f64, tvd: f64) -> Self {
        Self {
            easting,
            northing,
            tvd,
        }
    }
}

/// Known position of the first station: initial easting, initial northing
/// and datum TVD.
pub type SeedState = Position;

// ============================================================================
// Result
// ============================================================================

/// Computed wellbore path, one entry per survey station.
///
/// `easting()[i]`, `northing()[i]` and `tvd()[i]` belong to station `i`;
/// entry 0 is the seed. `dogleg_severity()[i]` is the turn rate of the
/// segment ending at station `i` (entry 0 is always 0.0).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    easting: Vec<f64>,
    northing: Vec<f64>,
    tvd: Vec<f64>,
    dogleg_severity: Vec<f64>,
}

impl Trajectory {
    /// Allocate buffers for `len` stations with the seed at index 0.
    ///
    /// `len` must be at least 1; the integrator rejects empty surveys first.
    pub(crate) fn seeded(len: usize, seed: SeedState) -> Self {
        let mut trajectory = Self {
            easting: vec![0.0; len],
            northing: vec![0.0; len],
            tvd: vec![0.0; len],
            dogleg_severity: vec![0.0; len],
        };
        trajectory.easting[0] = seed.easting;
        trajectory.northing[0] = seed.northing;
        trajectory.tvd[0] = seed.tvd;
        trajectory
    }

    /// Write station `index` as station `index - 1` plus the segment increment.
    pub(crate) fn advance(&mut self, index: usize, segment: &Segment) {
        let prev = index - 1;
        self.easting[index] = self.easting[prev] + segment.delta_easting;
        self.northing[index] = self.northing[prev] + segment.delta_northing;
        self.tvd[index] = self.tvd[prev] + segment.delta_tvd;
        self.dogleg_severity[index] = segment.dogleg_severity;
    }

    pub fn easting(&self) -> &[f64] {
        &self.easting
    }

    pub fn northing(&self) -> &[f64] {
        &self.northing
    }

    pub fn tvd(&self) -> &[f64] {
        &self.tvd
    }

    /// Dogleg severity per unit measured depth (radians per unit length).
    pub fn dogleg_severity(&self) -> &[f64] {
        &self.dogleg_severity
    }

    /// Dogleg severity scaled to a reporting course length, e.g. rad/30 ft.
    pub fn dogleg_severity_per_course(&self, course_length: f64) -> Vec<f64> {
        self.dogleg_severity
            .iter()
            .map(|dls| dls * course_length)
            .collect()
    }

    /// Number of stations (always equal to the input survey length).
    pub fn len(&self) -> usize {
        self.tvd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tvd.is_empty()
    }

    pub fn position(&self, index: usize) -> Option<Position> {
        Some(Position::new(
            *self.easting.get(index)?,
            *self.northing.get(index)?,
            *self.tvd.get(index)?,
        ))
    }

    pub fn last_position(&self) -> Option<Position> {
        self.len().checked_sub(1).and_then(|i| self.position(i))
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.easting
            .iter()
            .zip(&self.northing)
            .zip(&self.tvd)
            .map(|((&e, &n), &t)| Position::new(e, n, t))
    }

    /// Split into `(easting, northing, tvd)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.easting, self.northing, self.tvd)
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Boundary validation failures. Guarded singularities (zero measured-depth
/// increment, zero dogleg) are not errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurveyError {
    #[error("Survey contains no stations")]
    EmptySurvey,

    #[error("Measured depth decreases at station {index}: {current} after {previous}")]
    NonMonotonicDepth {
        index: usize,
        previous: f64,
        current: f64,
    },

    #[error("Station {index} has a non-finite {field}")]
    NonFinite { index: usize, field: &'static str },

    #[error("Segment ending at station {index} reverses direction; dogleg arc is undefined")]
    ReversedDirection { index: usize },
}
