//! Categorical risk assessment

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall risk bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        };
        f.write_str(label)
    }
}

/// Cut-offs used by [`classify_risk`].
///
/// Volatility and drawdown are percentages (`25.0` means 25%), beta is an
/// absolute value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskThresholds {
    pub low_volatility_pct: f64,
    pub low_beta: f64,
    pub low_drawdown_pct: f64,
    pub high_volatility_pct: f64,
    pub high_beta: f64,
    pub high_drawdown_pct: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            low_volatility_pct: 15.0,
            low_beta: 0.8,
            low_drawdown_pct: 15.0,
            high_volatility_pct: 30.0,
            high_beta: 1.2,
            high_drawdown_pct: 30.0,
        }
    }
}

impl RiskThresholds {
    /// Low cut-offs must not exceed the matching high ones
    pub fn is_consistent(&self) -> bool {
        let all = [
            self.low_volatility_pct,
            self.low_beta,
            self.low_drawdown_pct,
            self.high_volatility_pct,
            self.high_beta,
            self.high_drawdown_pct,
        ];
        all.iter().all(|v| v.is_finite() && *v >= 0.0)
            && self.low_volatility_pct <= self.high_volatility_pct
            && self.low_beta <= self.high_beta
            && self.low_drawdown_pct <= self.high_drawdown_pct
    }
}

/// High if any measure exceeds its high cut-off, Low if all sit below their
/// low cut-offs, Moderate otherwise.
pub fn classify_risk(
    volatility_pct: f64,
    beta_abs: f64,
    max_drawdown_pct: f64,
    thresholds: &RiskThresholds,
) -> RiskLevel {
    let (vol, beta, dd) = (volatility_pct, beta_abs.abs(), max_drawdown_pct.abs());

    if vol > thresholds.high_volatility_pct
        || beta > thresholds.high_beta
        || dd > thresholds.high_drawdown_pct
    {
        RiskLevel::High
    } else if vol < thresholds.low_volatility_pct
        && beta < thresholds.low_beta
        && dd < thresholds.low_drawdown_pct
    {
        RiskLevel::Low
    } else {
        RiskLevel::Moderate
    }
}

/// Notable contributors to the assessment, worst first
pub fn risk_factors(
    volatility_pct: f64,
    beta: f64,
    max_drawdown_pct: f64,
    thresholds: &RiskThresholds,
) -> Vec<String> {
    let dd = max_drawdown_pct.abs();
    let mut factors = Vec::new();

    if volatility_pct > thresholds.high_volatility_pct {
        factors.push(format!("High volatility ({volatility_pct:.2}%)"));
    }
    if beta.abs() > thresholds.high_beta {
        factors.push(format!("Beta significantly above 1 ({beta:.2})"));
    }
    if dd > thresholds.high_drawdown_pct {
        factors.push(format!("Large maximum drawdown ({dd:.2}%)"));
    }

    if factors.is_empty() {
        if volatility_pct < 20.0 {
            factors.push(format!("Moderate volatility ({volatility_pct:.2}%)"));
        }
        if (thresholds.low_beta..=thresholds.high_beta).contains(&beta) {
            factors.push(format!("Market-like beta ({beta:.2})"));
        }
    }

    factors
}

/// Investor profile matching a risk level
pub fn suitable_for(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "Conservative investors seeking stability",
        RiskLevel::Moderate => "Balanced investors with moderate risk tolerance",
        RiskLevel::High => "Aggressive investors with high risk tolerance",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let t = RiskThresholds::default();
        assert_eq!(classify_risk(10.0, 0.5, 5.0, &t), RiskLevel::Low);
        assert_eq!(classify_risk(20.0, 1.0, 10.0, &t), RiskLevel::Moderate);
        assert_eq!(classify_risk(14.0, 0.5, 15.0, &t), RiskLevel::Moderate);
        assert_eq!(classify_risk(35.0, 0.5, 5.0, &t), RiskLevel::High);
        assert_eq!(classify_risk(10.0, 1.3, 5.0, &t), RiskLevel::High);
        assert_eq!(classify_risk(10.0, 0.5, 31.0, &t), RiskLevel::High);
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        let t = RiskThresholds::default();
        assert_eq!(classify_risk(30.0, 1.2, 30.0, &t), RiskLevel::Moderate);
        assert_eq!(classify_risk(15.0, 0.5, 5.0, &t), RiskLevel::Moderate);
    }

    #[test]
    fn test_negative_inputs_use_magnitude() {
        let t = RiskThresholds::default();
        assert_eq!(classify_risk(10.0, -1.5, 5.0, &t), RiskLevel::High);
        assert_eq!(classify_risk(10.0, 0.5, -40.0, &t), RiskLevel::High);
    }

    #[test]
    fn test_custom_thresholds() {
        let strict = RiskThresholds {
            high_volatility_pct: 12.0,
            low_volatility_pct: 5.0,
            ..RiskThresholds::default()
        };
        assert!(strict.is_consistent());
        assert_eq!(classify_risk(13.0, 0.5, 5.0, &strict), RiskLevel::High);

        let broken = RiskThresholds {
            low_beta: 2.0,
            ..RiskThresholds::default()
        };
        assert!(!broken.is_consistent());
    }

    #[test]
    fn test_risk_factors() {
        let t = RiskThresholds::default();
        let factors = risk_factors(45.0, 1.5, -35.0, &t);
        assert_eq!(
            factors,
            vec![
                "High volatility (45.00%)".to_string(),
                "Beta significantly above 1 (1.50)".to_string(),
                "Large maximum drawdown (35.00%)".to_string(),
            ]
        );

        let calm = risk_factors(12.0, 1.0, -5.0, &t);
        assert_eq!(
            calm,
            vec![
                "Moderate volatility (12.00%)".to_string(),
                "Market-like beta (1.00)".to_string(),
            ]
        );
    }

    #[test]
    fn test_suitable_for() {
        assert_eq!(suitable_for(RiskLevel::Low), "Conservative investors seeking stability");
        assert_eq!(RiskLevel::High.to_string(), "High");
    }
}
