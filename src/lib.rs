pub mod config;
pub mod core;
pub mod error;
pub mod models;
#[cfg(test)]
pub mod test_helpers;

pub use crate::config::{ConfigOverrides, PlannerConfig};
pub use crate::core::{calculate, PlanSummary, PositionPlanner};
pub use crate::error::ValidationError;
pub use crate::models::{PlanInput, Side, Stage};
