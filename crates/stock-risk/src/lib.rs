//! Risk and comparative statistics for stock price series
//!
//! This crate turns daily OHLCV history into descriptive, risk and comparison
//! metrics. It includes:
//!
//! - Validated price and return series
//! - Volatility, downside deviation, beta and correlation
//! - Value at Risk (parametric normal or historical)
//! - Sharpe and Sortino ratios, maximum drawdown
//! - Configurable Low / Moderate / High risk classification
//! - Multi-ticker comparison with a correlation matrix and rankings
//! - A Yahoo Finance provider and a caller-owned price cache
//!
//! # Architecture
//!
//! [`stats`] holds the pure, synchronous functions. [`RiskEngine`] assembles
//! them into [`RiskReport`] and [`ComparisonReport`] values. [`RiskAnalyzer`]
//! is the async layer that fetches through a [`PriceProvider`], memoizes
//! series in a [`PriceCache`], and hands the data to the engine.
//!
//! # Example
//!
//! ```rust,ignore
//! use stock_risk::{Period, RiskAnalyzer, RiskConfig, YahooProvider};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> stock_risk::Result<()> {
//!     stock_risk::init_tracing();
//!
//!     let analyzer = RiskAnalyzer::new(Arc::new(YahooProvider::new()), RiskConfig::default());
//!     let report = analyzer.analyze_risk("AAPL", Period::OneYear).await?;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!
//!     Ok(())
//! }
//! ```

pub mod analyzer;
pub mod cache;
pub mod config;
pub mod error;
pub mod period;
pub mod provider;
pub mod report;
pub mod series;
pub mod stats;

// Re-export main types for convenience
pub use analyzer::RiskAnalyzer;
pub use cache::{CacheKey, PriceCache};
pub use config::{RiskConfig, RiskConfigBuilder};
pub use error::{Result, RiskError};
pub use period::Period;
pub use provider::{PriceProvider, YahooProvider};
pub use report::{ComparisonReport, RiskEngine, RiskReport};
pub use series::{PriceBar, PriceSeries, PriceSummary, ReturnSeries};
pub use stats::{CorrelationBasis, RiskLevel, RiskThresholds, TickerPair, VarMethod};

// Re-export logging setup from stock-utils
pub use stock_utils::{init_tracing, init_tracing_with};
