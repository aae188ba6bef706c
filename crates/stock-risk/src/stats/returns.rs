//! Return derivation

use super::{check_periods_per_year, require};
use crate::error::{Result, RiskError};
use crate::series::{PriceSeries, ReturnSeries};

/// Simple per-period returns: `close[i] / close[i-1] - 1`
pub fn compute_returns(series: &PriceSeries) -> Result<ReturnSeries> {
    require("returns", 2, series.len())?;

    let bars = series.bars();
    let (dates, values): (Vec<_>, Vec<_>) = bars
        .windows(2)
        .map(|w| (w[1].date, w[1].close / w[0].close - 1.0))
        .unzip();

    ReturnSeries::new(series.ticker(), dates, values)
}

/// Fractional change from the first to the last close
pub fn period_return(series: &PriceSeries) -> Result<f64> {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) if series.len() >= 2 => Ok(last.close / first.close - 1.0),
        _ => Err(RiskError::insufficient("period return", 2, series.len())),
    }
}

/// Compounded yearly return, treating `len / periods_per_year` as the
/// number of years the series spans.
pub fn annualized_return(series: &PriceSeries, periods_per_year: f64) -> Result<f64> {
    check_periods_per_year(periods_per_year)?;
    let total = period_return(series)?;
    let years = series.len() as f64 / periods_per_year;
    Ok((1.0 + total).powf(1.0 / years) - 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::fixtures::{day, series};

    #[test]
    fn test_ten_percent_steps() {
        let returns = compute_returns(&series("X", &[100.0, 110.0, 121.0])).unwrap();
        assert_eq!(returns.len(), 2);
        for r in returns.values() {
            assert!((r - 0.10).abs() < 1e-12);
        }
        assert_eq!(returns.dates(), &[day(1), day(2)]);
    }

    #[test]
    fn test_exact_returns() {
        let returns = compute_returns(&series("X", &[100.0, 150.0, 75.0])).unwrap();
        assert_eq!(returns.values(), &[0.5, -0.5]);
    }

    #[test]
    fn test_insufficient_data() {
        let err = compute_returns(&series("X", &[100.0])).unwrap_err();
        assert!(matches!(
            err,
            RiskError::InsufficientData { needed: 2, actual: 1, .. }
        ));
    }

    #[test]
    fn test_period_and_annualized_return() {
        let s = series("X", &[100.0, 105.0, 110.0, 121.0]);
        assert!((period_return(&s).unwrap() - 0.21).abs() < 1e-12);

        // Four samples with four periods per year is exactly one year.
        assert!((annualized_return(&s, 4.0).unwrap() - 0.21).abs() < 1e-12);
        // Two samples with four periods per year is half a year.
        let half = series("X", &[100.0, 110.0]);
        assert!((annualized_return(&half, 4.0).unwrap() - 0.21).abs() < 1e-12);
    }

    #[test]
    fn test_annualized_return_rejects_bad_periods() {
        let s = series("X", &[100.0, 110.0]);
        assert!(matches!(
            annualized_return(&s, 0.0),
            Err(RiskError::InvalidParameter(_))
        ));
    }
}
