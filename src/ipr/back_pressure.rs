//! C-n (back-pressure) IPR
//!
//! Formula: q = C × (p̄² − p_wf²)ⁿ
//!
//! C and n are matched from two stabilized tests:
//! - n = ln(q1 / q2) / (ln(p̄² − p_wf1²) − ln(p̄² − p_wf2²))
//! - C = q1 / (p̄² − p_wf1²)ⁿ

use super::{check_finite, validate_pressures, InflowModel, IprError};

/// Match C and n from two test points.
///
/// Both rates must be positive and both tests must have a drawdown; tests
/// with identical drawdowns cannot separate C from n.
pub fn solve_constants(
    q1: f64,
    p_wf1: f64,
    q2: f64,
    p_wf2: f64,
    p_bar: f64,
) -> Result<(f64, f64), IprError> {
    validate_pressures(p_wf1, p_bar)?;
    validate_pressures(p_wf2, p_bar)?;
    for q in [q1, q2] {
        check_finite("flow rate", q)?;
        if q <= 0.0 {
            return Err(IprError::NonPositiveRate(q));
        }
    }

    let p_bar_sq = p_bar * p_bar;
    let drawdown1 = p_bar_sq - p_wf1 * p_wf1;
    let drawdown2 = p_bar_sq - p_wf2 * p_wf2;
    if drawdown1 <= 0.0 {
        return Err(IprError::ZeroDrawdown { p_wf: p_wf1 });
    }
    if drawdown2 <= 0.0 {
        return Err(IprError::ZeroDrawdown { p_wf: p_wf2 });
    }

    let log_span = drawdown1.ln() - drawdown2.ln();
    if log_span == 0.0 {
        return Err(IprError::DegenerateTestPoints(format!(
            "both tests have drawdown {drawdown1} (p_wf1 = {p_wf1}, p_wf2 = {p_wf2})"
        )));
    }

    let n = (q1 / q2).ln() / log_span;
    let c = q1 / drawdown1.powf(n);
    Ok((c, n))
}

/// Flow rate at `p_wf` for constants `c`, `n` and average reservoir pressure `p_bar`.
pub fn flow_rate(c: f64, n: f64, p_bar: f64, p_wf: f64) -> Result<f64, IprError> {
    validate_pressures(p_wf, p_bar)?;
    check_finite("C", c)?;
    check_finite("n", n)?;

    Ok(c * (p_bar * p_bar - p_wf * p_wf).powf(n))
}

/// Fitted C-n IPR.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackPressure {
    pub p_bar: f64,
    pub c: f64,
    pub n: f64,
}

impl BackPressure {
    pub fn from_test_points(
        q1: f64,
        p_wf1: f64,
        q2: f64,
        p_wf2: f64,
        p_bar: f64,
    ) -> Result<Self, IprError> {
        let (c, n) = solve_constants(q1, p_wf1, q2, p_wf2, p_bar)?;
        Ok(Self { p_bar, c, n })
    }
}

impl InflowModel for BackPressure {
    fn reservoir_pressure(&self) -> f64 {
        self.p_bar
    }

    fn flow_rate_at(&self, p_wf: f64) -> Result<f64, IprError> {
        flow_rate(self.c, self.n, self.p_bar, p_wf)
    }
}
