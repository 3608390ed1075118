pub mod plan;
pub mod side;

pub use plan::{PlanInput, Stage};
pub use side::Side;
