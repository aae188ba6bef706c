//! Yahoo Finance price provider

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

use super::PriceProvider;
use crate::error::{Result, RiskError};
use crate::period::Period;
use crate::series::{PriceBar, PriceSeries};

/// Yahoo Finance daily history, no API key required
#[derive(Debug, Clone, Default)]
pub struct YahooProvider {}

impl YahooProvider {
    /// Create a new Yahoo Finance provider
    pub fn new() -> Self {
        Self {}
    }

    async fn history_between(
        &self,
        ticker: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<yahoo::Quote>> {
        let provider =
            yahoo::YahooConnector::new().map_err(|e| RiskError::Provider(e.to_string()))?;

        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| RiskError::Provider(format!("Invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| RiskError::Provider(format!("Invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(ticker, start_odt, end_odt)
            .await
            .map_err(|e| RiskError::Provider(e.to_string()))?;

        response
            .quotes()
            .map_err(|e| RiskError::Provider(e.to_string()))
    }
}

#[async_trait]
impl PriceProvider for YahooProvider {
    async fn fetch_history(&self, ticker: &str, period: Period) -> Result<PriceSeries> {
        let end = Utc::now();
        let start = end - chrono::Duration::days(period.lookback_days());

        tracing::info!(ticker, %period, "Fetching price history from Yahoo Finance");
        let quotes = self.history_between(ticker, start, end).await?;

        let bars = quotes_to_bars(quotes.iter().map(|q| {
            (q.timestamp as i64, q.open, q.high, q.low, q.close, q.volume)
        }));
        if bars.is_empty() {
            return Err(RiskError::DataUnavailable {
                ticker: ticker.to_string(),
                reason: format!("No usable quotes for period {period}"),
            });
        }

        tracing::debug!(ticker, data_points = bars.len(), "Fetched price history");
        PriceSeries::new(ticker, bars)
    }

    fn name(&self) -> &'static str {
        "yahoo"
    }
}

/// Turn raw `(unix_ts, open, high, low, close, volume)` quotes into bars that
/// satisfy the series invariant: one bar per calendar date (the latest quote
/// wins), positive prices only, sorted by date.
fn quotes_to_bars<I>(quotes: I) -> Vec<PriceBar>
where
    I: IntoIterator<Item = (i64, f64, f64, f64, f64, u64)>,
{
    let mut by_date = std::collections::BTreeMap::new();
    for (ts, open, high, low, close, volume) in quotes {
        let Some(date) = DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()) else {
            continue;
        };
        let bar = PriceBar {
            date,
            open,
            high,
            low,
            close,
            volume,
        };
        let prices = [bar.open, bar.high, bar.low, bar.close];
        if prices.iter().all(|p| p.is_finite() && *p > 0.0) {
            by_date.insert(date, bar);
        }
    }
    by_date.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const DAY: i64 = 86_400;
    // 2024-01-02 14:30 UTC
    const OPEN_TS: i64 = 1_704_205_800;

    #[test]
    fn test_quotes_to_bars_orders_and_dedups() {
        let bars = quotes_to_bars([
            (OPEN_TS + DAY, 11.0, 11.0, 11.0, 11.0, 10),
            (OPEN_TS, 10.0, 10.0, 10.0, 10.0, 5),
            (OPEN_TS + DAY + 60, 12.0, 12.0, 12.0, 12.0, 20),
        ]);

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
        assert_eq!(bars[0].close, 10.0);
        assert_eq!(bars[1].close, 12.0);
        assert_eq!(bars[1].volume, 20);
    }

    #[test]
    fn test_quotes_to_bars_drops_bad_prices() {
        let bars = quotes_to_bars([
            (OPEN_TS, 10.0, 10.0, 10.0, 0.0, 5),
            (OPEN_TS + DAY, 10.0, f64::NAN, 10.0, 10.0, 5),
            (OPEN_TS + 2 * DAY, 10.0, 10.0, 10.0, 10.0, 5),
        ]);
        assert_eq!(bars.len(), 1);
        assert!(PriceSeries::new("X", bars).is_ok());
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(YahooProvider::new().name(), "yahoo");
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_fetch_history() {
        let provider = YahooProvider::new();
        let series = provider.fetch_history("AAPL", Period::OneMonth).await.unwrap();
        assert_eq!(series.ticker(), "AAPL");
        assert!(series.len() > 10);
    }
}
