use crate::models::Side;

/// Reasons a plan cannot be computed. Every variant aborts the whole call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("at least one entry level (limit) is required")]
    NoLevels,
    #[error("stop loss must be a finite number, got {0}")]
    InvalidStopLoss(f64),
    #[error("account size must be finite and > 0, got {0}")]
    InvalidAccountSize(f64),
    #[error("leverage must be finite and > 0, got {0}")]
    InvalidLeverage(f64),
    #[error("risk percent must lie in (0, 1), got {0}")]
    InvalidRiskPercent(f64),
    #[error("weights invalid for {levels} level(s): {weights:?}")]
    InvalidWeights { levels: usize, weights: Vec<f64> },
    #[error("target profit percents invalid for {levels} level(s): {percents:?}")]
    InvalidTargetProfitPercents { levels: usize, percents: Vec<f64> },
    #[error("fee per unit must be finite and >= 0, got {0}")]
    InvalidFeePerUnit(f64),
    #[error("{field} must be at most {max} decimal places, got {value}")]
    InvalidPrecision {
        field: &'static str,
        value: u32,
        max: u32,
    },
    #[error("{side} level {level} is on the wrong side of stop loss {stop_loss} (distance must be > 0)")]
    WrongSideOfStop {
        side: Side,
        level: f64,
        stop_loss: f64,
    },
    #[error("invalid aggregate quantity {qty} at stage {stage}")]
    InvalidAggregateQuantity { stage: usize, qty: f64 },
    #[error("take profit at stage {stage} is not a finite price ({price})")]
    InvalidTakeProfit { stage: usize, price: f64 },
    #[error("profit target at stage {stage} is not a finite amount ({amount})")]
    InvalidTargetAmount { stage: usize, amount: f64 },
    #[error("unknown side '{0}', expected LONG or SHORT")]
    InvalidSide(String),
}
