pub use self::ball_joint::BallJoint;
pub use self::joint::{Joint, JointData};
pub use self::joint_error::JointError;
pub use self::joint_params::{JointParams, JointType};
pub use self::joint_set::{JointHandle, JointSet};
pub use self::joint_view::JointView;
#[cfg(feature = "dim3")]
pub use self::revolute_joint::RevoluteJoint;

mod ball_joint;
mod joint;
mod joint_error;
mod joint_params;
mod joint_set;
mod joint_view;
#[cfg(feature = "dim3")]
mod revolute_joint;
