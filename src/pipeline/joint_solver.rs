use crate::dynamics::{IntegrationParameters, JointHandle, JointType, RigidBodyHandle, RigidBodySet};
use crate::math::{Point, Real, Vector};
#[cfg(feature = "dim3")]
use na::Unit;

/// A joint whose rigid-bodies were resolved for the current step, expressed in world-space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct JointConstraint {
    /// The joint this constraint was built from.
    pub joint: JointHandle,
    /// The type of the joint this constraint was built from.
    pub joint_type: JointType,
    /// The first rigid-body attached to the joint.
    pub body1: RigidBodyHandle,
    /// The second rigid-body attached to the joint.
    pub body2: RigidBodyHandle,
    /// The first anchor, in world-space.
    pub world_anchor1: Point<Real>,
    /// The second anchor, in world-space.
    pub world_anchor2: Point<Real>,
    /// `world_anchor2 - world_anchor1`.
    pub linear_error: Vector<Real>,
    /// The velocity needed to correct `linear_error` within one step, scaled by the joint ERP.
    pub linear_rhs: Vector<Real>,
    /// The normalized world-space axes of revolute joints.
    #[cfg(feature = "dim3")]
    pub world_axes: Option<[Unit<Vector<Real>>; 2]>,
}

/// The constraint solver the joints are handed to at each step.
///
/// The solver only gets read access to the rigid-bodies and the resolved joints.
pub trait JointSolver {
    /// Computes the constraint forces for the given joints.
    fn solve_joints(
        &mut self,
        params: &IntegrationParameters,
        bodies: &RigidBodySet,
        constraints: &[JointConstraint],
    );
}

impl JointSolver for () {
    fn solve_joints(
        &mut self,
        _params: &IntegrationParameters,
        _bodies: &RigidBodySet,
        _constraints: &[JointConstraint],
    ) {
    }
}
