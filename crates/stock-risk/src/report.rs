//! Risk and comparison reports
//!
//! [`RiskEngine`] turns already-fetched price series into immutable,
//! JSON-serializable report values. Percentages are expressed as percent
//! (`12.5` means 12.5%), ratios and coefficients as plain numbers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::config::RiskConfig;
use crate::error::{Result, RiskError};
use crate::period::Period;
use crate::series::PriceSeries;
use crate::stats::{self, RiskLevel, TRADING_DAYS_PER_MONTH, TickerPair, VarMethod};

/// Risk profile of one ticker against a benchmark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    pub ticker: String,
    pub benchmark: String,
    pub period: Period,
    /// Last sample date shared by ticker and benchmark
    pub analysis_date: NaiveDate,
    pub data_points: usize,
    pub price_data: PriceData,
    pub volatility_metrics: VolatilityMetrics,
    pub market_risk: MarketRisk,
    pub value_at_risk: ValueAtRisk,
    pub risk_adjusted_metrics: RiskAdjustedMetrics,
    pub risk_assessment: RiskAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceData {
    pub current_price: f64,
    pub period_return_pct: f64,
    pub price_range: PriceRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolatilityMetrics {
    pub annualized_volatility_pct: f64,
    pub downside_deviation_pct: f64,
    pub volatility_category: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketRisk {
    pub beta: f64,
    /// `None` when the ticker's returns are flat and r is undefined
    pub correlation_with_market: Option<f64>,
    pub beta_interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAtRisk {
    pub confidence_level: f64,
    pub method: VarMethod,
    pub daily_var_pct: f64,
    pub monthly_var_pct: f64,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAdjustedMetrics {
    #[serde(with = "unbounded_ratio")]
    pub sharpe_ratio: f64,
    #[serde(with = "unbounded_ratio")]
    pub sortino_ratio: f64,
    pub max_drawdown_pct: f64,
    pub max_drawdown_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub overall_risk: RiskLevel,
    pub risk_factors: Vec<String>,
    pub suitable_for: String,
}

/// Side-by-side performance of several tickers over the same dates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub period: Period,
    pub comparison_date: NaiveDate,
    pub date_range: DateRange,
    pub stocks: Vec<StockSummary>,
    /// Pairs involving a flat series map to `None`
    pub correlations: BTreeMap<TickerPair, Option<f64>>,
    pub rankings: Rankings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockSummary {
    pub ticker: String,
    pub start_price: f64,
    pub end_price: f64,
    pub total_return_pct: f64,
    pub annualized_return_pct: f64,
    pub volatility_pct: f64,
    #[serde(with = "unbounded_ratio")]
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rankings {
    pub best_return: String,
    pub worst_return: String,
    pub most_volatile: String,
    pub least_volatile: String,
    pub best_risk_adjusted: String,
}

impl ComparisonReport {
    pub fn stock(&self, ticker: &str) -> Option<&StockSummary> {
        self.stocks.iter().find(|s| s.ticker == ticker)
    }

    pub fn correlation(&self, a: &str, b: &str) -> Option<f64> {
        self.correlations.get(&TickerPair::new(a, b)).copied().flatten()
    }
}

/// Builds reports from price series using one [`RiskConfig`]
#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    config: RiskConfig,
}

impl RiskEngine {
    pub fn new(config: RiskConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// Full risk profile of `asset` measured against `benchmark`.
    ///
    /// Both series are first restricted to the dates they share.
    pub fn risk_report(
        &self,
        asset: &PriceSeries,
        benchmark: &PriceSeries,
        period: Period,
    ) -> Result<RiskReport> {
        let cfg = &self.config;
        let mut aligned = stats::align(&[asset, benchmark])?.into_iter();
        let (asset, benchmark) = match (aligned.next(), aligned.next()) {
            (Some(a), Some(b)) => (a, b),
            _ => return Err(RiskError::AlignmentError("alignment lost a series".to_string())),
        };

        tracing::debug!(
            ticker = asset.ticker(),
            benchmark = benchmark.ticker(),
            data_points = asset.len(),
            "Analyzing aligned series"
        );

        let asset_returns = stats::compute_returns(&asset)?;
        let bench_returns = stats::compute_returns(&benchmark)?;
        let returns = asset_returns.values();
        let ppy = cfg.periods_per_year;

        let summary = asset.summary()?;
        let price_data = PriceData {
            current_price: summary.current_price,
            period_return_pct: stats::period_return(&asset)? * 100.0,
            price_range: PriceRange {
                min: summary.min,
                max: summary.max,
            },
        };

        let volatility_pct = stats::annualized_volatility(returns, ppy)? * 100.0;
        let volatility_metrics = VolatilityMetrics {
            annualized_volatility_pct: volatility_pct,
            downside_deviation_pct: stats::downside_deviation(returns, 0.0, ppy)? * 100.0,
            volatility_category: stats::volatility_category(volatility_pct).to_string(),
        };

        let beta = stats::beta(&asset_returns, &bench_returns)?;
        let correlation_with_market = match stats::correlation(&asset_returns, &bench_returns) {
            Ok(r) => Some(r),
            Err(RiskError::UndefinedStatistic(reason)) => {
                tracing::debug!(%reason, "Correlation with market undefined");
                None
            }
            Err(e) => return Err(e),
        };
        let market_risk = MarketRisk {
            beta,
            correlation_with_market,
            beta_interpretation: stats::interpret_beta(beta),
        };

        let daily_var = stats::value_at_risk(returns, cfg.var_confidence, cfg.var_method)?;
        let daily_var_pct = daily_var * 100.0;
        let value_at_risk = ValueAtRisk {
            confidence_level: cfg.var_confidence,
            method: cfg.var_method,
            daily_var_pct,
            monthly_var_pct: stats::scale_var(daily_var, TRADING_DAYS_PER_MONTH) * 100.0,
            interpretation: format!(
                "{:.0}% confidence that daily loss won't exceed {:.2}%",
                cfg.var_confidence * 100.0,
                daily_var_pct.abs()
            ),
        };

        let drawdown = stats::max_drawdown(&asset)?;
        let max_drawdown_pct = drawdown.pct * 100.0;
        let risk_adjusted_metrics = RiskAdjustedMetrics {
            sharpe_ratio: stats::sharpe_ratio(returns, cfg.risk_free_rate, ppy)?,
            sortino_ratio: stats::sortino_ratio(returns, cfg.risk_free_rate, ppy)?,
            max_drawdown_pct,
            max_drawdown_date: drawdown.trough_date,
        };

        let level = stats::classify_risk(volatility_pct, beta.abs(), max_drawdown_pct, &cfg.thresholds);
        let risk_assessment = RiskAssessment {
            overall_risk: level,
            risk_factors: stats::risk_factors(volatility_pct, beta, max_drawdown_pct, &cfg.thresholds),
            suitable_for: stats::suitable_for(level).to_string(),
        };

        Ok(RiskReport {
            ticker: asset.ticker().to_string(),
            benchmark: benchmark.ticker().to_string(),
            period,
            analysis_date: summary.end_date,
            data_points: asset.len(),
            price_data,
            volatility_metrics,
            market_risk,
            value_at_risk,
            risk_adjusted_metrics,
            risk_assessment,
        })
    }

    /// Compare two or more tickers over the dates they all share
    pub fn compare(&self, series: &[PriceSeries], period: Period) -> Result<ComparisonReport> {
        if series.len() < 2 {
            return Err(RiskError::InvalidParameter(format!(
                "need at least 2 tickers to compare, got {}",
                series.len()
            )));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = series.iter().find(|s| !seen.insert(s.ticker())) {
            return Err(RiskError::InvalidParameter(format!(
                "ticker {} listed more than once",
                dup.ticker()
            )));
        }

        let aligned = stats::align(series)?;
        let reference = aligned
            .first()
            .ok_or_else(|| RiskError::AlignmentError("no series after alignment".to_string()))?;
        let (start, end) = match (reference.first(), reference.last()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => return Err(RiskError::AlignmentError("no overlapping data".to_string())),
        };

        tracing::debug!(
            tickers = series.len(),
            data_points = reference.len(),
            "Found overlapping data points"
        );

        let stocks = aligned
            .iter()
            .map(|s| self.stock_summary(s))
            .collect::<Result<Vec<_>>>()?;
        let correlations = stats::pairwise_correlations(&aligned, self.config.correlation_basis)?;
        let rankings = Rankings {
            best_return: pick(&stocks, |s| s.total_return_pct, Pick::Highest),
            worst_return: pick(&stocks, |s| s.total_return_pct, Pick::Lowest),
            most_volatile: pick(&stocks, |s| s.volatility_pct, Pick::Highest),
            least_volatile: pick(&stocks, |s| s.volatility_pct, Pick::Lowest),
            best_risk_adjusted: pick(&stocks, |s| s.sharpe_ratio, Pick::Highest),
        };

        Ok(ComparisonReport {
            period,
            comparison_date: end,
            date_range: DateRange { start, end },
            stocks,
            correlations,
            rankings,
        })
    }

    fn stock_summary(&self, series: &PriceSeries) -> Result<StockSummary> {
        let ppy = self.config.periods_per_year;
        let returns = stats::compute_returns(series)?;
        let (start_price, end_price) = match (series.first(), series.last()) {
            (Some(first), Some(last)) => (first.close, last.close),
            _ => return Err(RiskError::insufficient("stock summary", 2, 0)),
        };

        Ok(StockSummary {
            ticker: series.ticker().to_string(),
            start_price,
            end_price,
            total_return_pct: stats::period_return(series)? * 100.0,
            annualized_return_pct: stats::annualized_return(series, ppy)? * 100.0,
            volatility_pct: stats::annualized_volatility(returns.values(), ppy)? * 100.0,
            sharpe_ratio: stats::sharpe_ratio(returns.values(), self.config.risk_free_rate, ppy)?,
            max_drawdown_pct: stats::max_drawdown(series)?.pct * 100.0,
        })
    }
}

#[derive(Clone, Copy)]
enum Pick {
    Highest,
    Lowest,
}

/// Ticker with the extreme `key`; ties go to the first listed.
fn pick<F>(stocks: &[StockSummary], key: F, which: Pick) -> String
where
    F: Fn(&StockSummary) -> f64,
{
    stocks
        .iter()
        .reduce(|best, s| {
            let better = match which {
                Pick::Highest => key(s) > key(best),
                Pick::Lowest => key(s) < key(best),
            };
            if better { s } else { best }
        })
        .map(|s| s.ticker.clone())
        .unwrap_or_default()
}

/// Ratios may be `+inf` when their denominator is zero. JSON has no infinity,
/// so such values are written as `null` and read back as `+inf`.
mod unbounded_ratio {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_none()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}
