//! Cross-series alignment and pairwise correlation

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use super::{compute_returns, pearson, require};
use crate::error::{Result, RiskError};
use crate::series::PriceSeries;

/// What a pairwise correlation is measured on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationBasis {
    /// Aligned closing prices
    #[default]
    Prices,
    /// Simple per-period returns of the aligned closes
    Returns,
}

/// Unordered pair of tickers.
///
/// The smaller ticker is always stored first so `(A, B)` and `(B, A)` are the
/// same key. Serialized as `"A_B"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickerPair {
    first: String,
    second: String,
}

impl TickerPair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.first == ticker || self.second == ticker
    }
}

impl fmt::Display for TickerPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.first, self.second)
    }
}

impl FromStr for TickerPair {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('_') {
            Some((a, b)) if !a.is_empty() && !b.is_empty() => Ok(Self::new(a, b)),
            _ => Err(RiskError::InvalidParameter(format!("Invalid ticker pair: {s}"))),
        }
    }
}

impl Serialize for TickerPair {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TickerPair {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Restrict every series to the dates they all share (inner join on date)
pub fn align<S: Borrow<PriceSeries>>(series: &[S]) -> Result<Vec<PriceSeries>> {
    let Some((head, rest)) = series.split_first() else {
        return Err(RiskError::InvalidParameter(
            "align needs at least one series".to_string(),
        ));
    };

    let mut common: BTreeSet<NaiveDate> = head.borrow().dates().into_iter().collect();
    for s in rest {
        let dates: BTreeSet<NaiveDate> = s.borrow().dates().into_iter().collect();
        common = common.intersection(&dates).copied().collect();
    }

    if common.is_empty() {
        let tickers: Vec<&str> = series.iter().map(|s| s.borrow().ticker()).collect();
        return Err(RiskError::AlignmentError(format!(
            "no overlapping dates across {}",
            tickers.join(", ")
        )));
    }

    Ok(series
        .iter()
        .map(|s| s.borrow().retain_dates(|d| common.contains(d)))
        .collect())
}

/// Pearson correlation for every unordered pair of tickers.
///
/// Every series must already cover the same dates (see [`align`]). Fails with
/// `UndefinedStatistic` if any series is flat on the chosen basis; use
/// [`pairwise_correlations`] to get `None` for such pairs instead.
pub fn correlation_matrix(
    series: &[PriceSeries],
    basis: CorrelationBasis,
) -> Result<BTreeMap<TickerPair, f64>> {
    pairwise_correlations(series, basis)?
        .into_iter()
        .map(|(pair, r)| {
            r.map(|r| (pair.clone(), r)).ok_or_else(|| {
                RiskError::UndefinedStatistic(format!("correlation: {pair} includes a flat series"))
            })
        })
        .collect()
}

/// Like [`correlation_matrix`] but a pair involving a flat series maps to
/// `None` rather than failing the whole matrix.
pub fn pairwise_correlations(
    series: &[PriceSeries],
    basis: CorrelationBasis,
) -> Result<BTreeMap<TickerPair, Option<f64>>> {
    if series.len() < 2 {
        return Err(RiskError::InvalidParameter(format!(
            "correlation matrix needs at least 2 series, got {}",
            series.len()
        )));
    }

    let mut seen = HashSet::new();
    if let Some(dup) = series.iter().find(|s| !seen.insert(s.ticker())) {
        return Err(RiskError::InvalidParameter(format!(
            "duplicate ticker {}",
            dup.ticker()
        )));
    }

    let head = &series[0];
    let reference = head.dates();
    if let Some(off) = series.iter().find(|s| s.dates() != reference) {
        return Err(RiskError::AlignmentError(format!(
            "{} covers {} dates but {} covers {} different ones",
            head.ticker(),
            reference.len(),
            off.ticker(),
            off.len()
        )));
    }

    let samples = series
        .iter()
        .map(|s| match basis {
            CorrelationBasis::Prices => Ok(s.closes()),
            CorrelationBasis::Returns => Ok(compute_returns(s)?.values().to_vec()),
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;
    require("correlation", 2, samples[0].len())?;

    let mut matrix = BTreeMap::new();
    for (i, (a, xs)) in series.iter().zip(&samples).enumerate() {
        for (b, ys) in series[i + 1..].iter().zip(&samples[i + 1..]) {
            matrix.insert(TickerPair::new(a.ticker(), b.ticker()), pearson(xs, ys));
        }
    }
    Ok(matrix)
}
