//! Pure statistics over price and return series
//!
//! Everything here is synchronous and side-effect free. Sample statistics use
//! the `n - 1` denominator. Malformed input is rejected with a typed
//! [`RiskError`] rather than propagated as NaN.

mod classify;
mod correlation;
mod drawdown;
mod market;
mod ratios;
mod returns;
mod var;
mod volatility;

pub use classify::{RiskLevel, RiskThresholds, classify_risk, risk_factors, suitable_for};
pub use correlation::{
    CorrelationBasis, TickerPair, align, correlation_matrix, pairwise_correlations,
};
pub use drawdown::{Drawdown, max_drawdown};
pub use market::{beta, correlation, interpret_beta};
pub use ratios::{sharpe_ratio, sortino_ratio};
pub use returns::{annualized_return, compute_returns, period_return};
pub use var::{TRADING_DAYS_PER_MONTH, VarMethod, scale_var, value_at_risk};
pub use volatility::{annualized_volatility, downside_deviation, volatility_category};

use crate::error::{Result, RiskError};

/// Trading days per year
pub const DEFAULT_PERIODS_PER_YEAR: f64 = 252.0;

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample variance; callers guarantee at least two values.
fn sample_variance(values: &[f64]) -> f64 {
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() as f64 - 1.0)
}

/// Sample covariance; callers guarantee equal lengths of at least two.
fn sample_covariance(a: &[f64], b: &[f64]) -> f64 {
    let (ma, mb) = (mean(a), mean(b));
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - ma) * (y - mb))
        .sum::<f64>()
        / (a.len() as f64 - 1.0)
}

/// Pearson r of two equal-length samples, `None` when either is flat.
fn pearson(a: &[f64], b: &[f64]) -> Option<f64> {
    let var_a = sample_variance(a);
    let var_b = sample_variance(b);
    if var_a == 0.0 || var_b == 0.0 {
        return None;
    }
    let r = sample_covariance(a, b) / (var_a.sqrt() * var_b.sqrt());
    Some(r.clamp(-1.0, 1.0))
}

fn check_finite(context: &str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(pos) => Err(RiskError::InvalidParameter(format!(
            "{context}: non-finite value {} at index {pos}",
            values[pos]
        ))),
        None => Ok(()),
    }
}

fn check_periods_per_year(periods_per_year: f64) -> Result<()> {
    if periods_per_year.is_finite() && periods_per_year > 0.0 {
        Ok(())
    } else {
        Err(RiskError::InvalidParameter(format!(
            "periods_per_year must be positive, got {periods_per_year}"
        )))
    }
}

fn require(context: &str, needed: usize, actual: usize) -> Result<()> {
    if actual < needed {
        Err(RiskError::insufficient(context, needed, actual))
    } else {
        Ok(())
    }
}
