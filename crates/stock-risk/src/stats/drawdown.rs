//! Peak-to-trough drawdown

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::require;
use crate::error::Result;
use crate::series::PriceSeries;

/// Deepest decline from a running peak
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drawdown {
    /// `(trough - peak) / peak`, zero or negative
    pub pct: f64,
    pub peak_date: Option<NaiveDate>,
    pub trough_date: Option<NaiveDate>,
}

/// Single pass over closing prices tracking the running maximum.
///
/// Ties resolve to the earliest trough. A series that never declines reports
/// zero with no dates.
pub fn max_drawdown(series: &PriceSeries) -> Result<Drawdown> {
    require("max drawdown", 1, series.len())?;

    let mut deepest = Drawdown {
        pct: 0.0,
        peak_date: None,
        trough_date: None,
    };
    let mut peak: Option<(f64, NaiveDate)> = None;

    for bar in series.bars() {
        let (peak_close, peak_date) = match peak {
            Some((close, date)) if close >= bar.close => (close, date),
            _ => {
                peak = Some((bar.close, bar.date));
                continue;
            }
        };

        let pct = (bar.close - peak_close) / peak_close;
        if pct < deepest.pct {
            deepest = Drawdown {
                pct,
                peak_date: Some(peak_date),
                trough_date: Some(bar.date),
            };
        }
    }

    Ok(deepest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RiskError;
    use crate::series::fixtures::{day, series};

    #[test]
    fn test_rising_series_has_no_drawdown() {
        let dd = max_drawdown(&series("X", &[100.0, 101.0, 105.0, 120.0])).unwrap();
        assert_eq!(dd.pct, 0.0);
        assert_eq!(dd.trough_date, None);
        assert_eq!(dd.peak_date, None);
    }

    #[test]
    fn test_dip_then_recovery() {
        let dd = max_drawdown(&series("X", &[100.0, 80.0, 120.0])).unwrap();
        assert!((dd.pct + 0.20).abs() < 1e-12);
        assert_eq!(dd.peak_date, Some(day(0)));
        assert_eq!(dd.trough_date, Some(day(1)));
    }

    #[test]
    fn test_deepest_after_new_peak() {
        let dd = max_drawdown(&series("X", &[100.0, 110.0, 105.0, 120.0, 90.0, 115.0])).unwrap();
        assert!((dd.pct + 0.25).abs() < 1e-12);
        assert_eq!(dd.peak_date, Some(day(3)));
        assert_eq!(dd.trough_date, Some(day(4)));
    }

    #[test]
    fn test_ties_keep_earliest_trough() {
        let dd = max_drawdown(&series("X", &[100.0, 50.0, 100.0, 50.0])).unwrap();
        assert!((dd.pct + 0.5).abs() < 1e-12);
        assert_eq!(dd.trough_date, Some(day(1)));
    }

    #[test]
    fn test_flat_prices_after_peak() {
        let dd = max_drawdown(&series("X", &[100.0, 100.0, 100.0])).unwrap();
        assert_eq!(dd.pct, 0.0);
        assert_eq!(dd.trough_date, None);
    }

    #[test]
    fn test_empty_series() {
        let empty = PriceSeries::new("X", Vec::new()).unwrap();
        assert!(matches!(
            max_drawdown(&empty),
            Err(RiskError::InsufficientData { .. })
        ));
    }
}
