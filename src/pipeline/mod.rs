//! Structure for combining the rigid-body and joint sets to perform an actual simulation step.

pub use joint_solver::{JointConstraint, JointSolver};
pub use physics_pipeline::{PhysicsPipeline, StepReport};

mod joint_solver;
mod physics_pipeline;
