//! Structures related to dynamics: bodies, joints, etc.

pub use self::integration_parameters::IntegrationParameters;
#[cfg(feature = "dim3")]
pub use self::joint::RevoluteJoint;
pub use self::joint::{
    BallJoint, Joint, JointData, JointError, JointHandle, JointParams, JointSet, JointType,
    JointView,
};
pub use self::rigid_body::{RigidBody, RigidBodyBuilder, RigidBodyHandle, RigidBodyType};
pub use self::rigid_body_set::RigidBodySet;

mod integration_parameters;
mod joint;
mod rigid_body;
mod rigid_body_set;
