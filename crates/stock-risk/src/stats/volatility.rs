//! Volatility measures

use super::{check_finite, check_periods_per_year, require, sample_variance};
use crate::error::{Result, RiskError};

/// Sample standard deviation of `returns` scaled by `sqrt(periods_per_year)`
pub fn annualized_volatility(returns: &[f64], periods_per_year: f64) -> Result<f64> {
    check_periods_per_year(periods_per_year)?;
    check_finite("volatility", returns)?;
    require("volatility", 2, returns.len())?;
    Ok(sample_variance(returns).sqrt() * periods_per_year.sqrt())
}

/// Annualized sample standard deviation of the returns strictly below
/// `threshold`.
///
/// Zero when fewer than two returns fall below the threshold: a single
/// observation has no dispersion.
pub fn downside_deviation(returns: &[f64], threshold: f64, periods_per_year: f64) -> Result<f64> {
    check_periods_per_year(periods_per_year)?;
    check_finite("downside deviation", returns)?;
    if !threshold.is_finite() {
        return Err(RiskError::InvalidParameter(format!(
            "downside threshold must be finite, got {threshold}"
        )));
    }
    let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < threshold).collect();
    if downside.len() < 2 {
        return Ok(0.0);
    }
    Ok(sample_variance(&downside).sqrt() * periods_per_year.sqrt())
}

/// Bucket an annualized volatility percentage
pub fn volatility_category(volatility_pct: f64) -> &'static str {
    if volatility_pct < 15.0 {
        "Low"
    } else if volatility_pct < 30.0 {
        "Moderate"
    } else {
        "High"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RETURNS: [f64; 6] = [0.01, -0.02, 0.015, -0.005, 0.03, -0.01];

    #[test]
    fn test_scales_with_sqrt_periods() {
        let daily = annualized_volatility(&RETURNS, 1.0).unwrap();
        let yearly = annualized_volatility(&RETURNS, 252.0).unwrap();
        let weekly = annualized_volatility(&RETURNS, 52.0).unwrap();

        assert!(daily > 0.0);
        assert!((yearly - daily * 252.0_f64.sqrt()).abs() < 1e-12);
        assert!((weekly - daily * 52.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_constant_returns_have_zero_volatility() {
        assert_eq!(annualized_volatility(&[0.25; 5], 252.0).unwrap(), 0.0);
    }

    #[test]
    fn test_volatility_errors() {
        assert!(matches!(
            annualized_volatility(&[0.01], 252.0),
            Err(RiskError::InsufficientData { .. })
        ));
        assert!(matches!(
            annualized_volatility(&RETURNS, 0.0),
            Err(RiskError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_non_finite_returns_are_rejected() {
        assert!(matches!(
            annualized_volatility(&[f64::NAN, 0.01, 0.02], 252.0),
            Err(RiskError::InvalidParameter(_))
        ));
        assert!(matches!(
            downside_deviation(&[-0.01, f64::NEG_INFINITY, -0.02], 0.0, 252.0),
            Err(RiskError::InvalidParameter(_))
        ));
        assert!(downside_deviation(&RETURNS, f64::NAN, 252.0).is_err());
    }

    #[test]
    fn test_downside_deviation() {
        let dd = downside_deviation(&RETURNS, 0.0, 1.0).unwrap();
        // Negative returns: -0.02, -0.005, -0.01
        let expected = sample_variance(&[-0.02, -0.005, -0.01]).sqrt();
        assert!((dd - expected).abs() < 1e-12);
    }

    #[test]
    fn test_downside_deviation_without_losses() {
        assert_eq!(downside_deviation(&[0.01, 0.02, 0.03], 0.0, 252.0).unwrap(), 0.0);
        assert_eq!(downside_deviation(&[0.01, -0.02, 0.03], 0.0, 252.0).unwrap(), 0.0);
    }

    #[test]
    fn test_downside_threshold() {
        // With a 2% hurdle every return below it counts.
        let dd = downside_deviation(&[0.01, 0.015, 0.03], 0.02, 1.0).unwrap();
        let expected = sample_variance(&[0.01, 0.015]).sqrt();
        assert!((dd - expected).abs() < 1e-12);
    }

    #[test]
    fn test_volatility_category() {
        assert_eq!(volatility_category(10.0), "Low");
        assert_eq!(volatility_category(15.0), "Moderate");
        assert_eq!(volatility_category(29.9), "Moderate");
        assert_eq!(volatility_category(30.0), "High");
    }
}
