use crate::dynamics::{JointHandle, JointType, RigidBodyHandle};

/// Errors reported by the joint set and by the pipeline when it resolves joints.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum JointError {
    /// The joint handle does not refer to a live joint.
    #[error("no joint matches the handle {0:?}")]
    InvalidHandle(JointHandle),
    /// The rigid-body handle does not refer to a live rigid-body.
    #[error("the rigid-body handle {0:?} does not refer to a live rigid-body")]
    InvalidBodyHandle(RigidBodyHandle),
    /// Both ends of the joint are attached to the same rigid-body.
    #[error("a joint cannot attach the rigid-body {0:?} to itself")]
    SelfJoint(RigidBodyHandle),
    /// A joint axis has a zero length, so no joint frame can be derived from it.
    #[error("the joint axis must have a non-zero length")]
    DegenerateAxis,
    /// The requested property does not exist for this type of joint.
    #[error("{joint_type} joints have no {property}")]
    NotApplicable {
        /// The type of the joint that was queried.
        joint_type: JointType,
        /// The name of the requested property.
        property: &'static str,
    },
    /// The requested operation is not supported by the dimension this crate was built for.
    #[error("unsupported configuration: {0}")]
    UnsupportedConfiguration(&'static str),
}
