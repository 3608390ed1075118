use crate::config::PlannerConfig;
use crate::models::{PlanInput, Side};

/// Defaults used by the reference LONG scenario.
pub fn reference_config() -> PlannerConfig {
    PlannerConfig {
        risk_percent: 0.10,
        weights: vec![1.0, 3.0, 5.0],
        target_profit_percents: vec![0.0211, 0.0209, 0.0253],
        fee_per_unit: 0.0,
        qty_precision: 1,
        price_precision: 4,
    }
}

/// LONG, three levels scaling down toward a stop at 4556.
pub fn reference_input() -> PlanInput {
    PlanInput::new(Side::Long, 4658.0, 4757.0, 4556.0, 30.0, 321000.0)
        .with_limit1(4622.0)
        .with_limit2(4590.0)
}

/// SHORT, three levels scaling up toward a stop at 120.
pub fn short_input() -> PlanInput {
    PlanInput::new(Side::Short, 100.0, 95.0, 120.0, 10.0, 10000.0)
        .with_limit1(104.0)
        .with_limit2(110.0)
}

pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "expected {expected}, got {actual} (tol {tol})"
    );
}
