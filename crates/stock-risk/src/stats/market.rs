//! Market sensitivity: beta and correlation against another series

use super::{pearson, require, sample_covariance, sample_variance};
use crate::error::{Result, RiskError};
use crate::series::ReturnSeries;

/// Regression slope of `asset` on `benchmark`: `cov(a, b) / var(b)`.
///
/// Both series must cover exactly the same dates; nothing is truncated here.
pub fn beta(asset: &ReturnSeries, benchmark: &ReturnSeries) -> Result<f64> {
    check_aligned(asset, benchmark)?;

    let bench_var = sample_variance(benchmark.values());
    if bench_var == 0.0 {
        return Err(RiskError::UndefinedStatistic(format!(
            "beta: {} returns have zero variance",
            benchmark.ticker()
        )));
    }

    Ok(sample_covariance(asset.values(), benchmark.values()) / bench_var)
}

/// Pearson correlation coefficient of two aligned return series
pub fn correlation(a: &ReturnSeries, b: &ReturnSeries) -> Result<f64> {
    check_aligned(a, b)?;

    pearson(a.values(), b.values()).ok_or_else(|| {
        let flat = if sample_variance(a.values()) == 0.0 { a.ticker() } else { b.ticker() };
        RiskError::UndefinedStatistic(format!("correlation: {flat} returns have zero variance"))
    })
}

/// Human-readable reading of a beta value
pub fn interpret_beta(beta: f64) -> String {
    if beta < 0.8 {
        format!(
            "{:.0}% less volatile than market (defensive)",
            (1.0 - beta).abs() * 100.0
        )
    } else if beta <= 1.2 {
        "Similar volatility to market".to_string()
    } else {
        format!(
            "{:.0}% more volatile than market (aggressive)",
            (beta - 1.0) * 100.0
        )
    }
}

pub(super) fn check_aligned(a: &ReturnSeries, b: &ReturnSeries) -> Result<()> {
    if a.len() != b.len() {
        return Err(RiskError::AlignmentError(format!(
            "{} has {} returns but {} has {}",
            a.ticker(),
            a.len(),
            b.ticker(),
            b.len()
        )));
    }
    if let Some((da, db)) = a.dates().iter().zip(b.dates()).find(|(da, db)| da != db) {
        return Err(RiskError::AlignmentError(format!(
            "{} and {} disagree on dates ({da} vs {db})",
            a.ticker(),
            b.ticker()
        )));
    }
    require("pairwise statistic", 2, a.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::fixtures::{series, series_from};
    use crate::stats::compute_returns;

    fn returns(ticker: &str, closes: &[f64]) -> ReturnSeries {
        compute_returns(&series(ticker, closes)).unwrap()
    }

    fn scaled(ticker: &str, base: &ReturnSeries, factor: f64) -> ReturnSeries {
        let values = base.values().iter().map(|r| r * factor).collect();
        ReturnSeries::new(ticker, base.dates().to_vec(), values).unwrap()
    }

    const PRICES: [f64; 6] = [100.0, 102.0, 99.0, 104.0, 103.0, 107.0];

    #[test]
    fn test_beta_against_itself() {
        let r = returns("AAPL", &PRICES);
        assert!((beta(&r, &r).unwrap() - 1.0).abs() < 1e-12);
        assert!((correlation(&r, &r).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_beta_of_leveraged_series() {
        let bench = returns("SPY", &PRICES);
        let levered = scaled("LEV", &bench, 2.0);

        assert!((beta(&levered, &bench).unwrap() - 2.0).abs() < 1e-12);
        assert!((correlation(&levered, &bench).unwrap() - 1.0).abs() < 1e-12);

        let inverse = scaled("INV", &bench, -1.0);
        assert!((correlation(&inverse, &bench).unwrap() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mismatched_lengths_are_rejected() {
        let a = returns("A", &PRICES);
        let b = returns("B", &PRICES[..5]);
        assert!(matches!(beta(&a, &b), Err(RiskError::AlignmentError(_))));
        assert!(matches!(correlation(&b, &a), Err(RiskError::AlignmentError(_))));
    }

    #[test]
    fn test_mismatched_dates_are_rejected() {
        let a = returns("A", &PRICES);
        let b = compute_returns(&series_from("B", 3, &PRICES)).unwrap();
        assert!(matches!(beta(&a, &b), Err(RiskError::AlignmentError(_))));
    }

    #[test]
    fn test_flat_benchmark() {
        let a = returns("A", &PRICES);
        let flat = returns("FLAT", &[100.0; 6]);
        assert!(matches!(beta(&a, &flat), Err(RiskError::UndefinedStatistic(_))));
        assert!(matches!(correlation(&a, &flat), Err(RiskError::UndefinedStatistic(_))));
    }

    #[test]
    fn test_flat_asset_has_zero_beta() {
        let bench = returns("SPY", &PRICES);
        let cash = returns("CASH", &[100.0; 6]);
        assert_eq!(beta(&cash, &bench).unwrap(), 0.0);
        assert!(matches!(correlation(&cash, &bench), Err(RiskError::UndefinedStatistic(_))));
    }

    #[test]
    fn test_interpret_beta() {
        assert_eq!(interpret_beta(0.5), "50% less volatile than market (defensive)");
        assert_eq!(interpret_beta(1.0), "Similar volatility to market");
        assert_eq!(interpret_beta(1.5), "50% more volatile than market (aggressive)");
    }
}
