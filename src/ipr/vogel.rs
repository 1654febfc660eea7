//! Vogel IPR for solution-gas-drive reservoirs below bubble point
//!
//! Formula: q = q_max × (1 − 0.2 × (p_wf / p_r) − 0.8 × (p_wf / p_r)²)

use super::{check_finite, validate_pressures, InflowModel, IprError};
use crate::config::defaults::{VOGEL_LINEAR_COEFFICIENT, VOGEL_QUADRATIC_COEFFICIENT};

/// Dimensionless Vogel factor q / q_max at pressure ratio `r = p_wf / p_r`.
fn vogel_factor(r: f64) -> f64 {
    1.0 - VOGEL_LINEAR_COEFFICIENT * r - VOGEL_QUADRATIC_COEFFICIENT * r * r
}

/// Flow rate at `p_wf` for maximum (absolute open flow) rate `q_max`.
pub fn flow_rate(p_wf: f64, p_r: f64, q_max: f64) -> Result<f64, IprError> {
    validate_pressures(p_wf, p_r)?;
    check_finite("maximum flow rate", q_max)?;

    Ok(q_max * vogel_factor(p_wf / p_r))
}

/// Maximum flow rate from one stabilized test (q1 at p_wf1).
///
/// At p_wf1 = p_r the Vogel factor is zero and q_max is undetermined.
pub fn solve_qmax(q1: f64, p_wf1: f64, p_r: f64) -> Result<f64, IprError> {
    validate_pressures(p_wf1, p_r)?;
    check_finite("flow rate", q1)?;

    if p_wf1 == p_r {
        return Err(IprError::ZeroDrawdown { p_wf: p_wf1 });
    }

    Ok(q1 / vogel_factor(p_wf1 / p_r))
}

/// Fitted Vogel IPR.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vogel {
    pub p_r: f64,
    pub q_max: f64,
}

impl Vogel {
    pub fn from_test_point(q1: f64, p_wf1: f64, p_r: f64) -> Result<Self, IprError> {
        Ok(Self {
            p_r,
            q_max: solve_qmax(q1, p_wf1, p_r)?,
        })
    }
}

impl InflowModel for Vogel {
    fn reservoir_pressure(&self) -> f64 {
        self.p_r
    }

    fn flow_rate_at(&self, p_wf: f64) -> Result<f64, IprError> {
        flow_rate(p_wf, self.p_r, self.q_max)
    }

    fn absolute_open_flow(&self) -> Result<f64, IprError> {
        Ok(self.q_max)
    }
}
