pub mod planner;
pub mod step;

pub use planner::build_steps;
pub use step::{InstallStep, RemoveStep, ReviewPolicy, Step, StepKind, StepPlan};
