//! Variance: deviation of a node's current value from its baseline

use std::fmt;

use crate::domain::rounding::{round_to, VARIANCE_PRECISION};

/// Percentage deviation from baseline.
///
/// A zero baseline has no meaningful deviation and is reported as `0%`;
/// everything else is rounded to two decimals, e.g. `10.00%` or `-12.50%`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Variance {
    ZeroBaseline,
    Percent(f64),
}

impl Variance {
    pub fn percent(self) -> f64 {
        match self {
            Variance::ZeroBaseline => 0.0,
            Variance::Percent(p) => p,
        }
    }

    pub fn is_zero(self) -> bool {
        self.percent() == 0.0
    }
}

impl fmt::Display for Variance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variance::ZeroBaseline => write!(f, "0%"),
            Variance::Percent(p) => write!(f, "{:.2}%", p),
        }
    }
}

/// `(value - baseline) / baseline * 100`, or `0%` when the baseline is zero.
pub fn variance(value: f64, baseline: f64) -> Variance {
    if baseline == 0.0 {
        return Variance::ZeroBaseline;
    }
    Variance::Percent(round_to(
        (value - baseline) / baseline * 100.0,
        VARIANCE_PRECISION,
    ))
}
