//! Inflow Performance Relationships
//!
//! Closed-form models relating bottomhole flowing pressure to production
//! rate. Pressures in psia, rates in STB/day (any consistent units work;
//! nothing here converts).
//!
//! ## Models
//! - `back_pressure` - C-n (Rawlins-Schellhardt) power law, two test points
//! - `productivity_index` - Linear PI, one test point
//! - `vogel` - Vogel solution-gas-drive curve, one test point
//!
//! Each model has a solve-for-parameter and an evaluate-at-point function,
//! plus a struct implementing `InflowModel` for curve generation.

pub mod back_pressure;
pub mod productivity_index;
pub mod vogel;

pub use back_pressure::BackPressure;
pub use productivity_index::ProductivityIndex;
pub use vogel::Vogel;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from IPR model evaluation or fitting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IprError {
    #[error("Pressures must be positive: p_wf = {p_wf}, p_r = {p_r}")]
    NonPositivePressure { p_wf: f64, p_r: f64 },

    #[error("Bottomhole flowing pressure {p_wf} exceeds reservoir pressure {p_r}")]
    FlowingAboveReservoir { p_wf: f64, p_r: f64 },

    #[error("Pressure drawdown is zero at p_wf = {p_wf}")]
    ZeroDrawdown { p_wf: f64 },

    #[error("Flow rate must be positive, got {0}")]
    NonPositiveRate(f64),

    #[error("Test points do not determine the model: {0}")]
    DegenerateTestPoints(String),

    #[error("Non-finite {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("IPR curve needs at least 2 points, got {0}")]
    TooFewPoints(usize),
}

/// One point on an IPR curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IprPoint {
    /// Bottomhole flowing pressure
    pub p_wf: f64,
    /// Flow rate at `p_wf`
    pub q: f64,
}

/// A fitted inflow model for one well.
pub trait InflowModel {
    /// Average reservoir pressure; the curve runs from 0 up to this value.
    fn reservoir_pressure(&self) -> f64;

    /// Flow rate at bottomhole flowing pressure `p_wf`.
    fn flow_rate_at(&self, p_wf: f64) -> Result<f64, IprError>;

    /// Rate at zero flowing pressure.
    fn absolute_open_flow(&self) -> Result<f64, IprError> {
        self.flow_rate_at(0.0)
    }

    /// `points` evenly spaced pressures from 0 to p_r inclusive, with rates.
    fn curve(&self, points: usize) -> Result<Vec<IprPoint>, IprError> {
        curve_pressures(self.reservoir_pressure(), points)?
            .into_iter()
            .map(|p_wf| {
                Ok(IprPoint {
                    p_wf,
                    q: self.flow_rate_at(p_wf)?,
                })
            })
            .collect()
    }

    /// Curve with the configured density (`config::get().ipr.curve_points`).
    fn default_curve(&self) -> Result<Vec<IprPoint>, IprError> {
        self.curve(crate::config::get().ipr.curve_points)
    }
}

/// Evenly spaced flowing pressures from 0 to `p_r`; the last value is exactly `p_r`.
#[allow(clippy::cast_precision_loss)]
pub fn curve_pressures(p_r: f64, points: usize) -> Result<Vec<f64>, IprError> {
    if points < 2 {
        return Err(IprError::TooFewPoints(points));
    }
    check_finite("reservoir pressure", p_r)?;
    if p_r <= 0.0 {
        return Err(IprError::NonPositivePressure { p_wf: 0.0, p_r });
    }

    let intervals = (points - 1) as f64;
    Ok((0..points)
        .map(|i| (p_r * i as f64 / intervals).min(p_r))
        .collect())
}

/// Shared pressure checks for every model.
///
/// `p_wf < 0` or `p_r <= 0` is `NonPositivePressure`; `p_wf > p_r` is
/// `FlowingAboveReservoir`.
pub fn validate_pressures(p_wf: f64, p_r: f64) -> Result<(), IprError> {
    check_finite("flowing pressure", p_wf)?;
    check_finite("reservoir pressure", p_r)?;
    if p_wf < 0.0 || p_r <= 0.0 {
        return Err(IprError::NonPositivePressure { p_wf, p_r });
    }
    if p_wf > p_r {
        return Err(IprError::FlowingAboveReservoir { p_wf, p_r });
    }
    Ok(())
}

pub(crate) fn check_finite(field: &'static str, value: f64) -> Result<(), IprError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(IprError::NonFinite { field, value })
    }
}
