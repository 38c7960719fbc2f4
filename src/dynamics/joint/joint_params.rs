#[cfg(feature = "dim3")]
use crate::dynamics::RevoluteJoint;
use crate::dynamics::{BallJoint, JointData, JointError};
use crate::math::{Point, Real, Vector};
use std::fmt;

/// The type of a joint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub enum JointType {
    /// A joint removing all relative translation between two anchors.
    Ball,
    /// A joint removing all relative motion except the rotation around one axis.
    #[cfg(feature = "dim3")]
    Revolute,
}

impl JointType {
    /// The stable name of this joint type, as displayed to scripts.
    pub fn as_str(self) -> &'static str {
        match self {
            JointType::Ball => "Ball",
            #[cfg(feature = "dim3")]
            JointType::Revolute => "Revolute",
        }
    }
}

impl fmt::Display for JointType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
enum JointParamsKind {
    Ball {
        anchor1: Point<Real>,
        anchor2: Point<Real>,
    },
    #[cfg(feature = "dim3")]
    Revolute {
        anchor1: Point<Real>,
        axis1: Vector<Real>,
        anchor2: Point<Real>,
        axis2: Vector<Real>,
    },
}

/// The description of a joint to be inserted into a [`JointSet`](crate::dynamics::JointSet).
///
/// A `JointParams` can only be obtained from one of its per-type constructors, so it always
/// carries exactly the fields its joint type needs.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct JointParams(JointParamsKind);

impl JointParams {
    /// Create a new joint descriptor that builds Ball joints.
    ///
    /// A ball joints allows three relative rotational degrees of freedom
    /// by preventing any relative translation between the anchors of the
    /// two attached rigid-bodies.
    pub fn ball(anchor1: Point<Real>, anchor2: Point<Real>) -> Self {
        Self(JointParamsKind::Ball { anchor1, anchor2 })
    }

    /// Create a new joint descriptor that builds Revolute joints.
    ///
    /// A revolute joint removes all degrees of freedom between the affected
    /// bodies except for the rotation along one axis. The axes don't have to be
    /// normalized: they are stored as given.
    #[cfg(feature = "dim3")]
    pub fn revolute(
        anchor1: Point<Real>,
        axis1: Vector<Real>,
        anchor2: Point<Real>,
        axis2: Vector<Real>,
    ) -> Self {
        Self(JointParamsKind::Revolute {
            anchor1,
            axis1,
            anchor2,
            axis2,
        })
    }

    /// The type of joint this descriptor builds.
    pub fn joint_type(&self) -> JointType {
        match self.0 {
            JointParamsKind::Ball { .. } => JointType::Ball,
            #[cfg(feature = "dim3")]
            JointParamsKind::Revolute { .. } => JointType::Revolute,
        }
    }

    /// The anchor on the first body, in its local space.
    pub fn anchor1(&self) -> Point<Real> {
        match self.0 {
            JointParamsKind::Ball { anchor1, .. } => anchor1,
            #[cfg(feature = "dim3")]
            JointParamsKind::Revolute { anchor1, .. } => anchor1,
        }
    }

    /// The anchor on the second body, in its local space.
    pub fn anchor2(&self) -> Point<Real> {
        match self.0 {
            JointParamsKind::Ball { anchor2, .. } => anchor2,
            #[cfg(feature = "dim3")]
            JointParamsKind::Revolute { anchor2, .. } => anchor2,
        }
    }

    /// The axis on the first body, if this type of joint has one.
    pub fn axis1(&self) -> Option<Vector<Real>> {
        match self.0 {
            JointParamsKind::Ball { .. } => None,
            #[cfg(feature = "dim3")]
            JointParamsKind::Revolute { axis1, .. } => Some(axis1),
        }
    }

    /// The axis on the second body, if this type of joint has one.
    pub fn axis2(&self) -> Option<Vector<Real>> {
        match self.0 {
            JointParamsKind::Ball { .. } => None,
            #[cfg(feature = "dim3")]
            JointParamsKind::Revolute { axis2, .. } => Some(axis2),
        }
    }

    /// Converts this description into the joint data stored by the joint set.
    pub(crate) fn into_joint_data(self) -> Result<JointData, JointError> {
        match self.0 {
            JointParamsKind::Ball { anchor1, anchor2 } => {
                Ok(JointData::Ball(BallJoint::new(anchor1, anchor2)))
            }
            #[cfg(feature = "dim3")]
            JointParamsKind::Revolute {
                anchor1,
                axis1,
                anchor2,
                axis2,
            } => Ok(JointData::Revolute(RevoluteJoint::new(
                anchor1, axis1, anchor2, axis2,
            )?)),
        }
    }
}
