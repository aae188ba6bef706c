//! Market-data providers
//!
//! The statistics engine never fetches anything itself. A [`PriceProvider`]
//! supplies validated [`PriceSeries`] values; timeouts and transport errors
//! live here, not in the engine.

pub mod yahoo;

use async_trait::async_trait;

use crate::error::Result;
use crate::period::Period;
use crate::series::PriceSeries;

pub use yahoo::YahooProvider;

/// Source of daily price history
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Daily bars for `ticker` covering `period`, oldest first
    async fn fetch_history(&self, ticker: &str, period: Period) -> Result<PriceSeries>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}
