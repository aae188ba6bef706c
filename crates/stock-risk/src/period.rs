//! Look-back periods for price history requests

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RiskError;

/// Look-back window for historical prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Period {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
    TwoYears,
    FiveYears,
    Max,
}

impl Period {
    pub const ALL: [Period; 7] = [
        Period::OneMonth,
        Period::ThreeMonths,
        Period::SixMonths,
        Period::OneYear,
        Period::TwoYears,
        Period::FiveYears,
        Period::Max,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Period::OneMonth => "1mo",
            Period::ThreeMonths => "3mo",
            Period::SixMonths => "6mo",
            Period::OneYear => "1y",
            Period::TwoYears => "2y",
            Period::FiveYears => "5y",
            Period::Max => "max",
        }
    }

    /// Calendar days covered by the period
    pub fn lookback_days(self) -> i64 {
        match self {
            Period::OneMonth => 30,
            Period::ThreeMonths => 90,
            Period::SixMonths => 180,
            Period::OneYear => 365,
            Period::TwoYears => 730,
            Period::FiveYears => 1825,
            Period::Max => 36500, // ~100 years
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                RiskError::InvalidParameter(format!(
                    "Invalid period: {s}. Supported: 1mo, 3mo, 6mo, 1y, 2y, 5y, max"
                ))
            })
    }
}

impl TryFrom<String> for Period {
    type Error = RiskError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        for period in Period::ALL {
            assert_eq!(period.to_string().parse::<Period>().unwrap(), period);
        }
        assert_eq!("6MO".parse::<Period>().unwrap(), Period::SixMonths);
    }

    #[test]
    fn test_invalid_period() {
        let err = "10d".parse::<Period>().unwrap_err();
        assert!(matches!(err, RiskError::InvalidParameter(_)));
    }

    #[test]
    fn test_serde_uses_short_form() {
        assert_eq!(serde_json::to_string(&Period::OneYear).unwrap(), "\"1y\"");
        let p: Period = serde_json::from_str("\"5y\"").unwrap();
        assert_eq!(p, Period::FiveYears);
        assert!(serde_json::from_str::<Period>("\"7y\"").is_err());
    }

    #[test]
    fn test_lookback_is_monotonic() {
        let days: Vec<i64> = Period::ALL.iter().map(|p| p.lookback_days()).collect();
        assert!(days.windows(2).all(|w| w[0] < w[1]));
    }
}
