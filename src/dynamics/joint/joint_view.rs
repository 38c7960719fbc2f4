use crate::dynamics::{Joint, JointData, JointError, JointHandle, JointType, RigidBodyHandle};
use crate::math::{Point, Real, Rotation, Vector};

/// A read-only view of a joint living in a [`JointSet`](crate::dynamics::JointSet).
///
/// The view borrows the joint set, so the joint it points to can't be removed while the view
/// is alive. To hold on to a joint across frames, keep its [`JointHandle`] instead and get a
/// new view each time: a removed handle then simply yields no view.
#[derive(Copy, Clone, Debug)]
pub struct JointView<'a> {
    handle: JointHandle,
    joint: &'a Joint,
}

impl<'a> JointView<'a> {
    pub(crate) fn new(handle: JointHandle, joint: &'a Joint) -> Self {
        Self { handle, joint }
    }

    /// The handle this view was obtained with.
    pub fn handle(&self) -> JointHandle {
        self.handle
    }

    /// The underlying joint.
    pub fn joint(&self) -> &'a Joint {
        self.joint
    }

    /// The geometric parameters of the underlying joint.
    pub fn data(&self) -> &'a JointData {
        self.joint.data()
    }

    /// The unique identifier of the first rigid-body this joint is attached to.
    pub fn body_handle1(&self) -> RigidBodyHandle {
        self.joint.body1()
    }

    /// The unique identifier of the second rigid-body this joint is attached to.
    pub fn body_handle2(&self) -> RigidBodyHandle {
        self.joint.body2()
    }

    /// The type of this joint.
    pub fn joint_type(&self) -> JointType {
        self.joint.joint_type()
    }

    /// The position of the first anchor of this joint.
    ///
    /// The first anchor gives the position of the application point on the
    /// local frame of the first rigid-body it is attached to.
    pub fn anchor1(&self) -> Point<Real> {
        *self.joint.data().local_anchor1()
    }

    /// The position of the second anchor of this joint.
    ///
    /// The second anchor gives the position of the application point on the
    /// local frame of the second rigid-body it is attached to.
    pub fn anchor2(&self) -> Point<Real> {
        *self.joint.data().local_anchor2()
    }

    /// The first axis of this joint, if any.
    ///
    /// For joints where an application axis makes sense (e.g. the revolute joint),
    /// this returns the application axis on the first rigid-body this joint is attached to,
    /// expressed in the local-space of this first rigid-body. Returns `None` for ball joints.
    pub fn axis1(&self) -> Option<Vector<Real>> {
        self.joint.data().local_axis1().copied()
    }

    /// The second axis of this joint, if any.
    ///
    /// See [`Self::axis1`].
    pub fn axis2(&self) -> Option<Vector<Real>> {
        self.joint.data().local_axis2().copied()
    }

    /// The rotation that maps the `x` axis to this joint's first (normalized) local axis.
    ///
    /// Only revolute joints have a frame, and only in 3D. The frame also carries an arbitrary
    /// twist about the axis: it isn't the shortest-arc rotation from `x`, so an axis equal to
    /// `x` gives a quarter turn about `x` instead of the identity.
    pub fn frame_x1(&self) -> Result<Rotation<Real>, JointError> {
        self.frame(true)
    }

    /// The rotation that maps the `x` axis to this joint's second (normalized) local axis.
    ///
    /// Only revolute joints have a frame, and only in 3D. See [`Self::frame_x1`] for the twist
    /// about the axis.
    pub fn frame_x2(&self) -> Result<Rotation<Real>, JointError> {
        self.frame(false)
    }

    #[cfg(feature = "dim3")]
    fn frame(&self, first: bool) -> Result<Rotation<Real>, JointError> {
        match self.joint.data() {
            JointData::Revolute(j) if first => Ok(*j.local_frame1()),
            JointData::Revolute(j) => Ok(*j.local_frame2()),
            JointData::Ball(_) => Err(JointError::NotApplicable {
                joint_type: JointType::Ball,
                property: "frame",
            }),
        }
    }

    #[cfg(feature = "dim2")]
    fn frame(&self, _first: bool) -> Result<Rotation<Real>, JointError> {
        Err(JointError::UnsupportedConfiguration(
            "joint frames are only defined in 3D",
        ))
    }
}
