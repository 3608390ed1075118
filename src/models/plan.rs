use serde::{Deserialize, Serialize};

use crate::config::ConfigOverrides;
use crate::models::Side;

/// One calculation request, shaped like the record a form submits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanInput {
    pub side: Side,
    pub limit: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit2: Option<f64>,
    /// Stage 1 take profit, used verbatim.
    pub tp: f64,
    pub sl: f64,
    pub leverage: f64,
    pub account_size: f64,
    #[serde(flatten)]
    pub overrides: ConfigOverrides,
}

impl PlanInput {
    pub fn new(side: Side, limit: f64, tp: f64, sl: f64, leverage: f64, account_size: f64) -> Self {
        Self {
            side,
            limit,
            limit1: None,
            limit2: None,
            tp,
            sl,
            leverage,
            account_size,
            overrides: ConfigOverrides::default(),
        }
    }

    pub fn with_limit1(mut self, level: f64) -> Self {
        self.limit1 = Some(level);
        self
    }

    pub fn with_limit2(mut self, level: f64) -> Self {
        self.limit2 = Some(level);
        self
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Entry levels that take part in the plan, in (limit, limit1, limit2)
    /// order. Absent and non-finite levels are dropped, not zero-filled.
    pub fn active_levels(&self) -> Vec<f64> {
        [Some(self.limit), self.limit1, self.limit2]
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub price: f64,
    pub qty: f64,
    pub take_profit: f64,
    pub take_profit_amount: f64,
    pub take_profit_percent: f64,
    pub stop_loss: f64,
    pub leverage: f64,
}
