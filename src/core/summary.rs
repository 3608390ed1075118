use serde::{Deserialize, Serialize};

use crate::core::rounding::round2;
use crate::models::{Side, Stage};

/// Aggregate view of a computed plan, assuming every stage fills.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub side: Side,
    pub stages: usize,
    pub total_qty: f64,
    pub average_entry: f64,
    /// Loss if all stages fill and the stop is hit.
    pub risk_at_stop: f64,
    pub final_take_profit: f64,
    pub final_target_amount: f64,
}

impl PlanSummary {
    pub fn from_stages(side: Side, stages: &[Stage]) -> Option<Self> {
        let last = stages.last()?;

        let total_qty: f64 = stages.iter().map(|s| s.qty).sum();
        let sum_equity: f64 = stages.iter().map(|s| s.price * s.qty).sum();
        let average_entry = if total_qty > 0.0 {
            sum_equity / total_qty
        } else {
            0.0
        };
        let risk_at_stop: f64 = stages
            .iter()
            .map(|s| s.qty * side.distance_to_stop(s.price, s.stop_loss))
            .sum();

        Some(Self {
            side,
            stages: stages.len(),
            total_qty: round2(total_qty),
            average_entry: round2(average_entry),
            risk_at_stop: round2(risk_at_stop),
            final_take_profit: last.take_profit,
            final_target_amount: last.take_profit_amount,
        })
    }
}
