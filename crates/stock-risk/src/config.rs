//! Configuration for risk analysis operations

use crate::error::{Result, RiskError};
use crate::stats::{CorrelationBasis, DEFAULT_PERIODS_PER_YEAR, RiskThresholds, VarMethod};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Benchmark used when none is configured (S&P 500)
pub const DEFAULT_BENCHMARK: &str = "^GSPC";

/// Configuration for risk analysis operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskConfig {
    /// Benchmark ticker for beta and correlation
    pub benchmark: String,

    /// Sampling frequency of the input series
    pub periods_per_year: f64,

    /// Annual risk-free rate as a fraction
    pub risk_free_rate: f64,

    /// Confidence level for Value at Risk
    pub var_confidence: f64,

    /// Quantile estimator for Value at Risk
    pub var_method: VarMethod,

    /// Risk classification cut-offs
    pub thresholds: RiskThresholds,

    /// Input for the comparison correlation matrix
    #[serde(default)]
    pub correlation_basis: CorrelationBasis,

    /// How long fetched price series stay cached
    pub cache_ttl: Duration,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            benchmark: DEFAULT_BENCHMARK.to_string(),
            periods_per_year: DEFAULT_PERIODS_PER_YEAR,
            risk_free_rate: 0.0,
            var_confidence: 0.95,
            var_method: VarMethod::Parametric,
            thresholds: RiskThresholds::default(),
            correlation_basis: CorrelationBasis::Prices,
            cache_ttl: Duration::from_secs(3600), // 1 hour
        }
    }
}

impl RiskConfig {
    /// Create a new configuration builder
    pub fn builder() -> RiskConfigBuilder {
        RiskConfigBuilder::default()
    }

    /// Override benchmark and risk-free rate from the environment
    pub fn with_env(mut self) -> Result<Self> {
        if let Ok(benchmark) = std::env::var("STOCK_RISK_BENCHMARK") {
            self.benchmark = benchmark;
        }
        if let Ok(rate) = std::env::var("STOCK_RISK_FREE_RATE") {
            self.risk_free_rate = rate.trim().parse().map_err(|_| {
                RiskError::Config(format!("STOCK_RISK_FREE_RATE is not a number: {rate}"))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.benchmark.trim().is_empty() {
            return Err(RiskError::Config("benchmark must not be empty".to_string()));
        }

        if !(self.periods_per_year.is_finite() && self.periods_per_year > 0.0) {
            return Err(RiskError::Config(format!(
                "periods_per_year must be positive, got {}",
                self.periods_per_year
            )));
        }

        if !self.risk_free_rate.is_finite() {
            return Err(RiskError::Config("risk_free_rate must be finite".to_string()));
        }

        if !(self.var_confidence > 0.0 && self.var_confidence < 1.0) {
            return Err(RiskError::Config(format!(
                "var_confidence must be in (0, 1), got {}",
                self.var_confidence
            )));
        }

        if !self.thresholds.is_consistent() {
            return Err(RiskError::Config(
                "risk thresholds must be non-negative with low <= high".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for RiskConfig
#[derive(Debug, Default)]
pub struct RiskConfigBuilder {
    benchmark: Option<String>,
    periods_per_year: Option<f64>,
    risk_free_rate: Option<f64>,
    var_confidence: Option<f64>,
    var_method: Option<VarMethod>,
    thresholds: Option<RiskThresholds>,
    correlation_basis: Option<CorrelationBasis>,
    cache_ttl: Option<Duration>,
}

impl RiskConfigBuilder {
    /// Set the benchmark ticker
    pub fn benchmark(mut self, ticker: impl Into<String>) -> Self {
        self.benchmark = Some(ticker.into());
        self
    }

    /// Set the number of samples per year (252 for daily, 52 for weekly)
    pub fn periods_per_year(mut self, periods: f64) -> Self {
        self.periods_per_year = Some(periods);
        self
    }

    /// Set the annual risk-free rate
    pub fn risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = Some(rate);
        self
    }

    /// Set the VaR confidence level
    pub fn var_confidence(mut self, confidence: f64) -> Self {
        self.var_confidence = Some(confidence);
        self
    }

    /// Set the VaR estimator
    pub fn var_method(mut self, method: VarMethod) -> Self {
        self.var_method = Some(method);
        self
    }

    /// Set risk classification cut-offs
    pub fn thresholds(mut self, thresholds: RiskThresholds) -> Self {
        self.thresholds = Some(thresholds);
        self
    }

    /// Set what comparison correlations are computed on
    pub fn correlation_basis(mut self, basis: CorrelationBasis) -> Self {
        self.correlation_basis = Some(basis);
        self
    }

    /// Set cache TTL for fetched price series
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<RiskConfig> {
        let defaults = RiskConfig::default();

        let config = RiskConfig {
            benchmark: self.benchmark.unwrap_or(defaults.benchmark),
            periods_per_year: self.periods_per_year.unwrap_or(defaults.periods_per_year),
            risk_free_rate: self.risk_free_rate.unwrap_or(defaults.risk_free_rate),
            var_confidence: self.var_confidence.unwrap_or(defaults.var_confidence),
            var_method: self.var_method.unwrap_or(defaults.var_method),
            thresholds: self.thresholds.unwrap_or(defaults.thresholds),
            correlation_basis: self.correlation_basis.unwrap_or(defaults.correlation_basis),
            cache_ttl: self.cache_ttl.unwrap_or(defaults.cache_ttl),
        };

        config.validate()?;
        Ok(config)
    }
}
