//! Strategy catalog: named weighting profiles over the four factors.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::task::ComponentScores;

/// Per-factor weights. The built-in sets sum to 1.0; custom ones need not.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StrategyWeights {
    #[serde(default)]
    pub urgency: f64,
    #[serde(default)]
    pub importance: f64,
    #[serde(default)]
    pub effort: f64,
    #[serde(default)]
    pub dependencies: f64,
}

impl StrategyWeights {
    pub const fn new(urgency: f64, importance: f64, effort: f64, dependencies: f64) -> Self {
        Self {
            urgency,
            importance,
            effort,
            dependencies,
        }
    }

    pub fn sum(&self) -> f64 {
        self.urgency + self.importance + self.effort + self.dependencies
    }

    /// Replace negative or non-finite weights with 0.0.
    pub fn sanitized(self) -> Self {
        fn clean(name: &str, w: f64) -> f64 {
            if w.is_finite() && w >= 0.0 {
                w
            } else {
                warn!(factor = name, weight = w, "invalid custom weight replaced with 0.0");
                0.0
            }
        }

        Self {
            urgency: clean("urgency", self.urgency),
            importance: clean("importance", self.importance),
            effort: clean("effort", self.effort),
            dependencies: clean("dependencies", self.dependencies),
        }
    }

    /// Direct weighted sum; no normalization or clamping.
    pub fn combine(&self, s: &ComponentScores) -> f64 {
        s.urgency * self.urgency
            + s.importance * self.importance
            + s.effort * self.effort
            + s.dependencies * self.dependencies
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    #[default]
    SmartBalance,
    FastestWins,
    HighImpact,
    DeadlineDriven,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::SmartBalance,
        Strategy::FastestWins,
        Strategy::HighImpact,
        Strategy::DeadlineDriven,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::SmartBalance => "smart_balance",
            Strategy::FastestWins => "fastest_wins",
            Strategy::HighImpact => "high_impact",
            Strategy::DeadlineDriven => "deadline_driven",
        }
    }

    pub fn weights(self) -> StrategyWeights {
        match self {
            Strategy::SmartBalance => StrategyWeights::new(0.35, 0.30, 0.20, 0.15),
            Strategy::FastestWins => StrategyWeights::new(0.20, 0.20, 0.50, 0.10),
            Strategy::HighImpact => StrategyWeights::new(0.15, 0.60, 0.15, 0.10),
            Strategy::DeadlineDriven => StrategyWeights::new(0.70, 0.15, 0.10, 0.05),
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Strategy::SmartBalance => {
                "Balances urgency, importance, effort, and dependencies for optimal task prioritization."
            }
            Strategy::FastestWins => {
                "Prioritizes low-effort tasks to maximize quick wins and build momentum."
            }
            Strategy::HighImpact => {
                "Focuses on high-importance tasks regardless of urgency or effort."
            }
            Strategy::DeadlineDriven => {
                "Prioritizes tasks based primarily on due dates and deadlines."
            }
        }
    }

    /// Lenient lookup: unknown names fall back to `smart_balance`.
    pub fn resolve(name: &str) -> Self {
        match name.parse() {
            Ok(s) => s,
            Err(_) => {
                debug!(requested = name, "unknown strategy, using smart_balance");
                Strategy::default()
            }
        }
    }
}

impl FromStr for Strategy {
    type Err = anyhow::Error;

    /// Strict lookup. Accepts `deadline-driven` and any casing.
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase().replace('-', "_");
        match Strategy::ALL.into_iter().find(|st| st.name() == key) {
            Some(st) => Ok(st),
            None => bail!(
                "unknown strategy '{s}' (expected one of: smart_balance, fastest_wins, high_impact, deadline_driven)"
            ),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The weights actually applied to a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightProfile {
    Named(Strategy),
    Custom(StrategyWeights),
}

impl WeightProfile {
    /// Custom weights win over the strategy name entirely.
    pub fn resolve(strategy: &str, custom: Option<&StrategyWeights>) -> Self {
        match custom {
            Some(w) => WeightProfile::Custom(w.sanitized()),
            None => WeightProfile::Named(Strategy::resolve(strategy)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeightProfile::Named(s) => s.name(),
            WeightProfile::Custom(_) => "custom",
        }
    }

    pub fn weights(&self) -> StrategyWeights {
        match self {
            WeightProfile::Named(s) => s.weights(),
            WeightProfile::Custom(w) => *w,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_weights_sum_to_one() {
        for s in Strategy::ALL {
            assert!((s.weights().sum() - 1.0).abs() < 1e-9, "{s} does not sum to 1");
        }
    }

    #[test]
    fn strict_parse_accepts_variants() {
        assert_eq!("deadline_driven".parse::<Strategy>().unwrap(), Strategy::DeadlineDriven);
        assert_eq!("High-Impact".parse::<Strategy>().unwrap(), Strategy::HighImpact);
        assert!("yolo".parse::<Strategy>().is_err());
    }

    #[test]
    fn unknown_name_falls_back() {
        assert_eq!(Strategy::resolve("yolo"), Strategy::SmartBalance);
        assert_eq!(Strategy::resolve("fastest_wins"), Strategy::FastestWins);
    }

    #[test]
    fn custom_weights_override_strategy() {
        let w = StrategyWeights::new(1.0, 0.0, 0.0, 0.0);
        let p = WeightProfile::resolve("high_impact", Some(&w));
        assert_eq!(p.name(), "custom");
        assert_eq!(p.weights(), w);
    }

    #[test]
    fn custom_weights_are_sanitized() {
        let w = StrategyWeights::new(-1.0, f64::NAN, 0.5, 0.25).sanitized();
        assert_eq!(w, StrategyWeights::new(0.0, 0.0, 0.5, 0.25));
    }

    #[test]
    fn missing_weight_keys_default_to_zero() {
        let w: StrategyWeights = serde_json::from_str(r#"{"effort": 1.0}"#).unwrap();
        assert_eq!(w, StrategyWeights::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn combine_is_a_plain_weighted_sum() {
        let s = ComponentScores {
            urgency: 2.0,
            importance: 1.0,
            effort: 1.0,
            dependencies: 1.0,
        };
        let total = Strategy::DeadlineDriven.weights().combine(&s);
        assert!((total - 1.7).abs() < 1e-9);
    }
}
