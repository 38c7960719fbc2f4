#[cfg(feature = "dim3")]
use crate::dynamics::RevoluteJoint;
use crate::dynamics::{BallJoint, JointHandle, JointType, RigidBodyHandle};
use crate::math::{Point, Real, Vector};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
/// An enum grouping all possible types of joints.
pub enum JointData {
    /// A Ball joint that removes all relative linear degrees of freedom between the affected bodies.
    Ball(BallJoint),
    /// A revolute joint that removes all degrees of freedom between the affected
    /// bodies except for the rotation along one axis.
    #[cfg(feature = "dim3")]
    Revolute(RevoluteJoint),
}

impl JointData {
    /// The type of this joint.
    pub fn joint_type(&self) -> JointType {
        match self {
            JointData::Ball(_) => JointType::Ball,
            #[cfg(feature = "dim3")]
            JointData::Revolute(_) => JointType::Revolute,
        }
    }

    /// The anchor on the first body, in its local space.
    pub fn local_anchor1(&self) -> &Point<Real> {
        match self {
            JointData::Ball(j) => &j.local_anchor1,
            #[cfg(feature = "dim3")]
            JointData::Revolute(j) => &j.local_anchor1,
        }
    }

    /// The anchor on the second body, in its local space.
    pub fn local_anchor2(&self) -> &Point<Real> {
        match self {
            JointData::Ball(j) => &j.local_anchor2,
            #[cfg(feature = "dim3")]
            JointData::Revolute(j) => &j.local_anchor2,
        }
    }

    /// The axis on the first body, in its local space, if this type of joint has one.
    pub fn local_axis1(&self) -> Option<&Vector<Real>> {
        match self {
            JointData::Ball(_) => None,
            #[cfg(feature = "dim3")]
            JointData::Revolute(j) => Some(&j.local_axis1),
        }
    }

    /// The axis on the second body, in its local space, if this type of joint has one.
    pub fn local_axis2(&self) -> Option<&Vector<Real>> {
        match self {
            JointData::Ball(_) => None,
            #[cfg(feature = "dim3")]
            JointData::Revolute(j) => Some(&j.local_axis2),
        }
    }

    /// Gets a reference to the underlying ball joint, if `self` is one.
    pub fn as_ball(&self) -> Option<&BallJoint> {
        match self {
            JointData::Ball(j) => Some(j),
            #[cfg(feature = "dim3")]
            _ => None,
        }
    }

    /// Gets a reference to the underlying revolute joint, if `self` is one.
    #[cfg(feature = "dim3")]
    pub fn as_revolute(&self) -> Option<&RevoluteJoint> {
        match self {
            JointData::Revolute(j) => Some(j),
            _ => None,
        }
    }
}

impl From<BallJoint> for JointData {
    fn from(j: BallJoint) -> Self {
        JointData::Ball(j)
    }
}

#[cfg(feature = "dim3")]
impl From<RevoluteJoint> for JointData {
    fn from(j: RevoluteJoint) -> Self {
        JointData::Revolute(j)
    }
}

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
/// A joint attached to two bodies.
///
/// Nothing about a joint changes after its insertion into a `JointSet`.
pub struct Joint {
    handle: JointHandle,
    body1: RigidBodyHandle,
    body2: RigidBodyHandle,
    data: JointData,
}

impl Joint {
    pub(crate) fn new(
        handle: JointHandle,
        body1: RigidBodyHandle,
        body2: RigidBodyHandle,
        data: JointData,
    ) -> Self {
        Self {
            handle,
            body1,
            body2,
            data,
        }
    }

    /// The handle of this joint in its joint set.
    pub fn handle(&self) -> JointHandle {
        self.handle
    }

    /// Handle to the first body attached to this joint.
    ///
    /// This may refer to a rigid-body that was removed since the joint was created.
    pub fn body1(&self) -> RigidBodyHandle {
        self.body1
    }

    /// Handle to the second body attached to this joint.
    ///
    /// This may refer to a rigid-body that was removed since the joint was created.
    pub fn body2(&self) -> RigidBodyHandle {
        self.body2
    }

    /// Is `body` one of the two bodies attached to this joint?
    pub fn is_attached_to(&self, body: RigidBodyHandle) -> bool {
        self.body1 == body || self.body2 == body
    }

    /// The type of this joint.
    pub fn joint_type(&self) -> JointType {
        self.data.joint_type()
    }

    /// The joint geometric parameters.
    pub fn data(&self) -> &JointData {
        &self.data
    }
}
