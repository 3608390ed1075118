use std::borrow::Cow;

use tracing::debug;

use crate::config::PlannerConfig;
use crate::core::rounding::{round2, round_to, MAX_PRECISION};
use crate::error::ValidationError;
use crate::models::{PlanInput, Side, Stage};

/// Computes staged entry plans against a fixed set of defaults.
///
/// The planner never mutates its defaults; per-call overrides carried by the
/// input are merged into a fresh configuration for that call only.
#[derive(Debug, Clone, Default)]
pub struct PositionPlanner {
    defaults: PlannerConfig,
}

impl PositionPlanner {
    pub fn new(defaults: PlannerConfig) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &PlannerConfig {
        &self.defaults
    }

    pub fn calculate(&self, input: &PlanInput) -> Result<Vec<Stage>, ValidationError> {
        calculate(input, &self.defaults)
    }
}

/// Build the stage list for `input` under `config`.
///
/// Quantities are split so that a simultaneous stop-out of every level loses
/// `account_size * risk_percent`, each level's share proportional to its
/// weight. Stage `k` then gets the exit price at which the combined position
/// of levels `0..=k` makes `account_size * target_profit_percents[k]`.
/// Stage 0 always uses `input.tp` as given.
///
/// Overrides carried on `input` replace the matching fields of `config` for
/// this call only.
pub fn calculate(input: &PlanInput, config: &PlannerConfig) -> Result<Vec<Stage>, ValidationError> {
    let config: Cow<'_, PlannerConfig> = if input.overrides.is_empty() {
        Cow::Borrowed(config)
    } else {
        Cow::Owned(input.overrides.apply(config))
    };
    let config = config.as_ref();

    let levels = input.active_levels();
    validate(input, config, &levels)?;

    let n = levels.len();
    let weights = &config.weights[..n];
    let targets = &config.target_profit_percents[..n];
    let distances: Vec<f64> = levels
        .iter()
        .map(|&px| input.side.distance_to_stop(px, input.sl))
        .collect();

    let qtys = allocate_quantities(
        input.account_size * config.risk_percent,
        weights,
        &distances,
        config.qty_precision,
    );

    let mut stages = Vec::with_capacity(n);
    let mut sum_equity = 0.0;
    let mut sum_qty = 0.0;

    for k in 0..n {
        sum_equity += levels[k] * qtys[k];
        sum_qty += qtys[k];
        // NaN and infinity fail here too
        if !(sum_qty > 0.0 && sum_qty.is_finite()) {
            return Err(ValidationError::InvalidAggregateQuantity {
                stage: k,
                qty: sum_qty,
            });
        }

        let target_amount = input.account_size * targets[k];
        if !target_amount.is_finite() {
            return Err(ValidationError::InvalidTargetAmount {
                stage: k,
                amount: target_amount,
            });
        }
        let take_profit = if k == 0 {
            input.tp
        } else {
            solve_take_profit(
                input.side,
                target_amount,
                sum_equity,
                sum_qty,
                config.fee_per_unit,
            )
        };
        if !take_profit.is_finite() {
            return Err(ValidationError::InvalidTakeProfit {
                stage: k,
                price: take_profit,
            });
        }

        debug!(
            stage = k,
            price = levels[k],
            qty = qtys[k],
            sum_qty,
            take_profit,
            "stage solved"
        );

        stages.push(Stage {
            price: levels[k],
            qty: qtys[k],
            take_profit: round_to(take_profit, config.price_precision),
            take_profit_amount: round2(target_amount),
            take_profit_percent: round2(targets[k] * 100.0),
            stop_loss: input.sl,
            leverage: input.leverage,
        });
    }

    Ok(stages)
}

fn validate(input: &PlanInput, config: &PlannerConfig, levels: &[f64]) -> Result<(), ValidationError> {
    if levels.is_empty() {
        return Err(ValidationError::NoLevels);
    }
    if !input.sl.is_finite() {
        return Err(ValidationError::InvalidStopLoss(input.sl));
    }
    if !(input.account_size.is_finite() && input.account_size > 0.0) {
        return Err(ValidationError::InvalidAccountSize(input.account_size));
    }
    if !(input.leverage.is_finite() && input.leverage > 0.0) {
        return Err(ValidationError::InvalidLeverage(input.leverage));
    }
    // NaN fails both comparisons
    if !(config.risk_percent > 0.0 && config.risk_percent < 1.0) {
        return Err(ValidationError::InvalidRiskPercent(config.risk_percent));
    }

    let n = levels.len();
    if !leading_positive(&config.weights, n) {
        return Err(ValidationError::InvalidWeights {
            levels: n,
            weights: config.weights.clone(),
        });
    }
    if !leading_positive(&config.target_profit_percents, n) {
        return Err(ValidationError::InvalidTargetProfitPercents {
            levels: n,
            percents: config.target_profit_percents.clone(),
        });
    }
    if !(config.fee_per_unit.is_finite() && config.fee_per_unit >= 0.0) {
        return Err(ValidationError::InvalidFeePerUnit(config.fee_per_unit));
    }
    for (field, value) in [
        ("qty precision", config.qty_precision),
        ("price precision", config.price_precision),
    ] {
        if value > MAX_PRECISION {
            return Err(ValidationError::InvalidPrecision {
                field,
                value,
                max: MAX_PRECISION,
            });
        }
    }

    for &level in levels {
        if input.side.distance_to_stop(level, input.sl) <= 0.0 {
            return Err(ValidationError::WrongSideOfStop {
                side: input.side,
                level,
                stop_loss: input.sl,
            });
        }
    }

    Ok(())
}

/// The first `n` values exist, are finite and strictly positive.
fn leading_positive(values: &[f64], n: usize) -> bool {
    values.len() >= n && values[..n].iter().all(|v| v.is_finite() && *v > 0.0)
}

/// Risk-weighted split of `risk_budget` across levels.
///
/// `base = risk_budget / sum(weight * distance)`; level `i` gets
/// `base * weight[i]`, rounded to `precision` places.
pub fn allocate_quantities(
    risk_budget: f64,
    weights: &[f64],
    distances: &[f64],
    precision: u32,
) -> Vec<f64> {
    let denom: f64 = weights
        .iter()
        .zip(distances)
        .map(|(w, d)| w * d)
        .sum();
    let base_qty = risk_budget / denom;

    debug!(risk_budget, denom, base_qty, "quantities allocated");

    weights
        .iter()
        .map(|w| round_to(base_qty * w, precision))
        .collect()
}

/// Exit price at which the aggregate position earns `target_amount` after
/// `fee_per_unit` on every unit.
pub fn solve_take_profit(
    side: Side,
    target_amount: f64,
    sum_equity: f64,
    sum_qty: f64,
    fee_per_unit: f64,
) -> f64 {
    match side {
        Side::Long => (target_amount + sum_equity + fee_per_unit * sum_qty) / sum_qty,
        // target and fees both pull the exit below the average entry
        Side::Short => (sum_equity - (target_amount + fee_per_unit * sum_qty)) / sum_qty,
    }
}
