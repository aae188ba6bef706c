//! Price and return series

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RiskError};

/// One daily OHLCV sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl PriceBar {
    /// Bar where open, high, low and close are all `close`.
    ///
    /// Handy when only closing prices are known.
    pub fn from_close(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
            volume: 0,
        }
    }
}

/// Ordered price history for one ticker.
///
/// Dates are strictly increasing and every price is finite and positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    ticker: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Create a validated series
    pub fn new(ticker: impl Into<String>, bars: Vec<PriceBar>) -> Result<Self> {
        let ticker = ticker.into();
        validate_bars(&ticker, &bars)?;
        Ok(Self { ticker, bars })
    }

    /// Parse the provider JSON shape: an array of
    /// `{date, open, high, low, close, volume}` records.
    pub fn from_json(ticker: impl Into<String>, json: &str) -> Result<Self> {
        let bars: Vec<PriceBar> = serde_json::from_str(json)?;
        Self::new(ticker, bars)
    }

    /// Build a series from `(date, close)` pairs
    pub fn from_closes<I>(ticker: impl Into<String>, closes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let bars = closes
            .into_iter()
            .map(|(date, close)| PriceBar::from_close(date, close))
            .collect();
        Self::new(ticker, bars)
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Closing prices in date order
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Sample dates in order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// Keep only the bars whose date satisfies `keep`.
    ///
    /// Order is preserved, so the result still satisfies the series invariant.
    pub(crate) fn retain_dates<F>(&self, keep: F) -> Self
    where
        F: Fn(&NaiveDate) -> bool,
    {
        Self {
            ticker: self.ticker.clone(),
            bars: self.bars.iter().filter(|b| keep(&b.date)).copied().collect(),
        }
    }

    /// Descriptive statistics over closing prices
    pub fn summary(&self) -> Result<PriceSummary> {
        let (first, last) = match (self.first(), self.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(RiskError::insufficient("price summary", 1, 0)),
        };

        let closes = self.closes();
        let n = closes.len() as f64;
        let mean = closes.iter().sum::<f64>() / n;
        let min = closes.iter().copied().fold(f64::INFINITY, f64::min);
        let max = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let std_dev = if closes.len() > 1 {
            (closes.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            0.0
        };

        Ok(PriceSummary {
            ticker: self.ticker.clone(),
            data_points: closes.len(),
            start_date: first.date,
            end_date: last.date,
            current_price: last.close,
            mean,
            min,
            max,
            std_dev,
            volatility_pct: std_dev / mean * 100.0,
        })
    }
}

impl<'de> Deserialize<'de> for PriceSeries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            ticker: String,
            bars: Vec<PriceBar>,
        }

        let raw = Raw::deserialize(deserializer)?;
        PriceSeries::new(raw.ticker, raw.bars).map_err(serde::de::Error::custom)
    }
}

fn validate_bars(ticker: &str, bars: &[PriceBar]) -> Result<()> {
    let invalid = |reason: String| RiskError::InvalidSeries {
        ticker: ticker.to_string(),
        reason,
    };

    for bar in bars {
        let prices = [bar.open, bar.high, bar.low, bar.close];
        if prices.iter().any(|p| !p.is_finite() || *p <= 0.0) {
            return Err(invalid(format!("non-positive or non-finite price on {}", bar.date)));
        }
    }

    if let Some(pair) = bars.windows(2).find(|w| w[1].date <= w[0].date) {
        return Err(invalid(format!(
            "dates not strictly increasing ({} then {})",
            pair[0].date, pair[1].date
        )));
    }

    Ok(())
}

/// Summary statistics of closing prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub ticker: String,
    pub data_points: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub current_price: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
    /// Standard deviation relative to the mean price
    pub volatility_pct: f64,
}

/// Per-period fractional returns derived from closing prices.
///
/// Each return carries the date of the later of the two closes. There is one
/// date per value, dates strictly increase and every value is finite.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSeries {
    ticker: String,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl ReturnSeries {
    /// Create a validated return series
    pub fn new(ticker: impl Into<String>, dates: Vec<NaiveDate>, values: Vec<f64>) -> Result<Self> {
        let ticker = ticker.into();
        let invalid = |reason: String| RiskError::InvalidSeries {
            ticker: ticker.clone(),
            reason,
        };

        if dates.len() != values.len() {
            return Err(invalid(format!(
                "{} dates for {} returns",
                dates.len(),
                values.len()
            )));
        }
        if let Some(pair) = dates.windows(2).find(|w| w[1] <= w[0]) {
            return Err(invalid(format!(
                "dates not strictly increasing ({} then {})",
                pair[0], pair[1]
            )));
        }
        if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
            return Err(invalid(format!("non-finite return on {}", dates[pos])));
        }

        Ok(Self {
            ticker,
            dates,
            values,
        })
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Arithmetic mean of the returns
    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            None
        } else {
            Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
        }
    }
}

impl<'de> Deserialize<'de> for ReturnSeries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            ticker: String,
            dates: Vec<NaiveDate>,
            values: Vec<f64>,
        }

        let raw = Raw::deserialize(deserializer)?;
        ReturnSeries::new(raw.ticker, raw.dates, raw.values).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(u64::from(n))
    }

    pub fn series(ticker: &str, closes: &[f64]) -> PriceSeries {
        PriceSeries::from_closes(
            ticker,
            closes.iter().enumerate().map(|(i, c)| (day(i as u32), *c)),
        )
        .unwrap()
    }

    pub fn series_from(ticker: &str, start: u32, closes: &[f64]) -> PriceSeries {
        PriceSeries::from_closes(
            ticker,
            closes
                .iter()
                .enumerate()
                .map(|(i, c)| (day(start + i as u32), *c)),
        )
        .unwrap()
    }
}
