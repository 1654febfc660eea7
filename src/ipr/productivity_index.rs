//! Linear productivity-index IPR
//!
//! Formula: q = J × (p_r − p_wf)
//!
//! Where:
//! - J = Productivity index (STB/day/psi)
//! - p_r = Average reservoir pressure (psia)
//! - p_wf = Bottomhole flowing pressure (psia)

use super::{check_finite, validate_pressures, InflowModel, IprError};

/// Flow rate at `p_wf` for productivity index `productivity_index`.
pub fn flow_rate(p_wf: f64, p_r: f64, productivity_index: f64) -> Result<f64, IprError> {
    validate_pressures(p_wf, p_r)?;
    check_finite("productivity index", productivity_index)?;

    Ok(productivity_index * (p_r - p_wf))
}

/// Productivity index from one stabilized test (q1 at p_wf1).
///
/// A test at p_wf1 = p_r has no drawdown and cannot determine J.
pub fn solve_productivity_index(q1: f64, p_r: f64, p_wf1: f64) -> Result<f64, IprError> {
    validate_pressures(p_wf1, p_r)?;
    check_finite("flow rate", q1)?;

    let drawdown = p_r - p_wf1;
    if drawdown == 0.0 {
        return Err(IprError::ZeroDrawdown { p_wf: p_wf1 });
    }

    Ok(q1 / drawdown)
}

/// Fitted linear IPR.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductivityIndex {
    pub p_r: f64,
    pub productivity_index: f64,
}

impl ProductivityIndex {
    pub fn from_test_point(q1: f64, p_r: f64, p_wf1: f64) -> Result<Self, IprError> {
        Ok(Self {
            p_r,
            productivity_index: solve_productivity_index(q1, p_r, p_wf1)?,
        })
    }
}

impl InflowModel for ProductivityIndex {
    fn reservoir_pressure(&self) -> f64 {
        self.p_r
    }

    fn flow_rate_at(&self, p_wf: f64) -> Result<f64, IprError> {
        flow_rate(p_wf, self.p_r, self.productivity_index)
    }
}
