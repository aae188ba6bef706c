//! Risk-adjusted return ratios
//!
//! Both ratios use the arithmetic annualized return `mean * periods_per_year`.
//! When the denominator is exactly zero they return a sentinel instead of an
//! error: `f64::INFINITY` if the excess return is positive, `0.0` otherwise.
//! Sortino only uses the infinite sentinel when no return is a loss; losses
//! without dispersion (a single one, or several equal ones) give `0.0`.

use super::{
    annualized_volatility, check_finite, check_periods_per_year, downside_deviation, mean, require,
};
use crate::error::Result;

/// `(annualized_return - risk_free_rate) / annualized_volatility`
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64, periods_per_year: f64) -> Result<f64> {
    let volatility = annualized_volatility(returns, periods_per_year)?;
    let excess = mean(returns) * periods_per_year - risk_free_rate;
    Ok(ratio_or_sentinel(excess, volatility))
}

/// Like [`sharpe_ratio`] but penalising only returns below zero
pub fn sortino_ratio(returns: &[f64], risk_free_rate: f64, periods_per_year: f64) -> Result<f64> {
    check_periods_per_year(periods_per_year)?;
    check_finite("sortino ratio", returns)?;
    require("sortino ratio", 2, returns.len())?;

    let downside = downside_deviation(returns, 0.0, periods_per_year)?;
    if downside == 0.0 && returns.iter().any(|r| *r < 0.0) {
        return Ok(0.0);
    }
    let excess = mean(returns) * periods_per_year - risk_free_rate;
    Ok(ratio_or_sentinel(excess, downside))
}

fn ratio_or_sentinel(excess: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        if excess > 0.0 { f64::INFINITY } else { 0.0 }
    } else {
        excess / denominator
    }
}
