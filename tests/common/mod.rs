use position_planner::config::PlannerConfig;
use position_planner::models::{PlanInput, Side};

/// Defaults the web form ships with.
pub fn form_config() -> PlannerConfig {
    PlannerConfig {
        risk_percent: 0.10,
        weights: vec![1.0, 3.0, 5.0],
        target_profit_percents: vec![0.0211, 0.0209, 0.0253],
        fee_per_unit: 0.0,
        qty_precision: 1,
        price_precision: 4,
    }
}

pub fn long_three_levels() -> PlanInput {
    PlanInput::new(Side::Long, 4658.0, 4757.0, 4556.0, 30.0, 321000.0)
        .with_limit1(4622.0)
        .with_limit2(4590.0)
}

/// Round with ties away from zero, independent of the crate's helper.
pub fn round(n: f64, decimals: i32) -> f64 {
    let p = 10f64.powi(decimals);
    (n * p).round() / p
}

pub fn close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol
}
