use serde::{Deserialize, Serialize};

/// Sizing and target settings shared by every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerConfig {
    // Risk (fraction of account size, in (0, 1))
    pub risk_percent: f64,

    // Per-level sizing weight, stage order
    pub weights: Vec<f64>,

    // Cumulative profit target per stage, as a fraction of account size
    pub target_profit_percents: Vec<f64>,

    // Fees (absolute cost per unit)
    pub fee_per_unit: f64,

    // Rounding (decimal places)
    pub qty_precision: u32,
    pub price_precision: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            risk_percent: 0.10,
            weights: vec![1.0, 3.0, 5.0],
            target_profit_percents: vec![0.02, 0.02, 0.02],
            fee_per_unit: 0.0,
            qty_precision: 1,
            price_precision: 4,
        }
    }
}

/// Per-call replacements for any [`PlannerConfig`] field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weights: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_profit_percents: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_per_unit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qty_precision: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_precision: Option<u32>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Effective configuration for one call. `base` is left untouched.
    pub fn apply(&self, base: &PlannerConfig) -> PlannerConfig {
        PlannerConfig {
            risk_percent: self.risk_percent.unwrap_or(base.risk_percent),
            weights: self.weights.clone().unwrap_or_else(|| base.weights.clone()),
            target_profit_percents: self
                .target_profit_percents
                .clone()
                .unwrap_or_else(|| base.target_profit_percents.clone()),
            fee_per_unit: self.fee_per_unit.unwrap_or(base.fee_per_unit),
            qty_precision: self.qty_precision.unwrap_or(base.qty_precision),
            price_precision: self.price_precision.unwrap_or(base.price_precision),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub planner: PlannerConfig,

    // Logging
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Missing or unparsable values fall
    /// back to the built-in defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PlannerConfig::default();

        let num = |key: &str, default: f64| -> f64 {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };
        let places = |key: &str, default: u32| -> u32 {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };
        let list = |key: &str, default: &[f64]| -> Vec<f64> {
            lookup(key)
                .and_then(|v| parse_list(&v))
                .unwrap_or_else(|| default.to_vec())
        };

        let planner = PlannerConfig {
            risk_percent: num("PLANNER_RISK_PERCENT", defaults.risk_percent),
            weights: list("PLANNER_WEIGHTS", &defaults.weights),
            target_profit_percents: list(
                "PLANNER_TARGET_PROFIT_PERCENTS",
                &defaults.target_profit_percents,
            ),
            fee_per_unit: num("PLANNER_FEE_PER_UNIT", defaults.fee_per_unit),
            qty_precision: places("PLANNER_QTY_PRECISION", defaults.qty_precision),
            price_precision: places("PLANNER_PRICE_PRECISION", defaults.price_precision),
        };

        Config {
            planner,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        }
    }
}

/// Parse "1, 3, 5" into numbers. Any bad element rejects the whole list.
fn parse_list(raw: &str) -> Option<Vec<f64>> {
    let values: Option<Vec<f64>> = raw
        .split(',')
        .map(|s| s.trim().parse::<f64>().ok())
        .collect();
    values.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn built_in_defaults() {
        let cfg = PlannerConfig::default();
        assert_eq!(cfg.risk_percent, 0.10);
        assert_eq!(cfg.weights, vec![1.0, 3.0, 5.0]);
        assert_eq!(cfg.target_profit_percents, vec![0.02, 0.02, 0.02]);
        assert_eq!(cfg.fee_per_unit, 0.0);
        assert_eq!(cfg.qty_precision, 1);
        assert_eq!(cfg.price_precision, 4);
    }

    #[test]
    fn env_values_replace_defaults() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("PLANNER_RISK_PERCENT", "0.05"),
            ("PLANNER_WEIGHTS", "1, 2, 4"),
            ("PLANNER_TARGET_PROFIT_PERCENTS", "0.0211,0.0209,0.0253"),
            ("PLANNER_QTY_PRECISION", "3"),
            ("LOG_LEVEL", "debug"),
        ]));
        assert_eq!(cfg.planner.risk_percent, 0.05);
        assert_eq!(cfg.planner.weights, vec![1.0, 2.0, 4.0]);
        assert_eq!(cfg.planner.target_profit_percents, vec![0.0211, 0.0209, 0.0253]);
        assert_eq!(cfg.planner.qty_precision, 3);
        assert_eq!(cfg.planner.price_precision, 4);
        assert_eq!(cfg.log_level, "debug");
    }

    #[test]
    fn bad_env_values_fall_back() {
        let cfg = Config::from_lookup(lookup_from(&[
            ("PLANNER_RISK_PERCENT", "ten"),
            ("PLANNER_WEIGHTS", "1,x,5"),
            ("PLANNER_PRICE_PRECISION", "-2"),
        ]));
        assert_eq!(cfg.planner, PlannerConfig::default());
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn overrides_apply_only_set_fields() {
        let base = PlannerConfig::default();
        let overrides = ConfigOverrides {
            fee_per_unit: Some(1.5),
            weights: Some(vec![2.0, 2.0]),
            ..Default::default()
        };
        let effective = overrides.apply(&base);
        assert_eq!(effective.fee_per_unit, 1.5);
        assert_eq!(effective.weights, vec![2.0, 2.0]);
        assert_eq!(effective.risk_percent, base.risk_percent);
        assert_eq!(effective.target_profit_percents, base.target_profit_percents);
        // base unchanged
        assert_eq!(base, PlannerConfig::default());
    }

    #[test]
    fn empty_overrides() {
        assert!(ConfigOverrides::default().is_empty());
        let some = ConfigOverrides {
            qty_precision: Some(0),
            ..Default::default()
        };
        assert!(!some.is_empty());
    }
}
