pub mod planner;
pub mod rounding;
pub mod summary;

pub use planner::{calculate, PositionPlanner};
pub use summary::PlanSummary;
