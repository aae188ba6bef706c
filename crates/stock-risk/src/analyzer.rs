//! Fetch-then-compute service
//!
//! [`RiskAnalyzer`] wires a [`PriceProvider`], a caller-owned [`PriceCache`]
//! and a [`RiskEngine`] together. Independent fetches run concurrently; all
//! statistics run synchronously once the data is in hand.

use futures::future::try_join_all;
use std::sync::Arc;

use crate::cache::{CacheKey, PriceCache};
use crate::config::RiskConfig;
use crate::error::{Result, RiskError};
use crate::period::Period;
use crate::provider::PriceProvider;
use crate::report::{ComparisonReport, RiskEngine, RiskReport};
use crate::series::PriceSeries;

/// Risk analysis over provider data
pub struct RiskAnalyzer<P> {
    provider: Arc<P>,
    cache: PriceCache,
    engine: RiskEngine,
}

impl<P: PriceProvider> RiskAnalyzer<P> {
    /// Create an analyzer with a fresh cache sized from `config.cache_ttl`
    pub fn new(provider: Arc<P>, config: RiskConfig) -> Self {
        let cache = PriceCache::new(config.cache_ttl);
        Self::with_cache(provider, config, cache)
    }

    /// Create an analyzer that shares an existing cache
    pub fn with_cache(provider: Arc<P>, config: RiskConfig, cache: PriceCache) -> Self {
        Self {
            provider,
            cache,
            engine: RiskEngine::new(config),
        }
    }

    pub fn cache(&self) -> &PriceCache {
        &self.cache
    }

    pub fn engine(&self) -> &RiskEngine {
        &self.engine
    }

    /// Price history for one ticker, served from cache when possible
    pub async fn history(&self, ticker: &str, period: Period) -> Result<Arc<PriceSeries>> {
        let ticker = normalize_ticker(ticker)?;
        let key = CacheKey::new(&ticker, period);
        self.cache
            .get_or_fetch(key, || async {
                tracing::debug!(ticker = %ticker, provider = self.provider.name(), "Fetching");
                self.provider.fetch_history(&ticker, period).await
            })
            .await
    }

    /// Risk report for `ticker` against the configured benchmark
    pub async fn analyze_risk(&self, ticker: &str, period: Period) -> Result<RiskReport> {
        let benchmark = self.engine.config().benchmark.clone();
        tracing::info!(ticker, benchmark = %benchmark, %period, "Running risk analysis");

        let (asset, bench) =
            tokio::try_join!(self.history(ticker, period), self.history(&benchmark, period))?;

        self.engine.risk_report(&asset, &bench, period)
    }

    /// Comparison report across `tickers`
    pub async fn compare(&self, tickers: &[&str], period: Period) -> Result<ComparisonReport> {
        if tickers.len() < 2 {
            return Err(RiskError::InvalidParameter(format!(
                "need at least 2 tickers to compare, got {}",
                tickers.len()
            )));
        }
        tracing::info!(count = tickers.len(), %period, "Comparing stocks");

        let fetched = try_join_all(tickers.iter().map(|t| self.history(t, period))).await?;
        let series: Vec<PriceSeries> = fetched.iter().map(|s| PriceSeries::clone(s)).collect();

        self.engine.compare(&series, period)
    }
}

fn normalize_ticker(ticker: &str) -> Result<String> {
    let ticker = ticker.trim();
    if ticker.is_empty() || ticker.chars().any(char::is_whitespace) {
        return Err(RiskError::InvalidParameter(format!("Invalid ticker: {ticker:?}")));
    }
    Ok(ticker.to_uppercase())
}
