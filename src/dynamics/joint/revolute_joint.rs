use crate::dynamics::JointError;
use crate::math::{Point, Real, Rotation, Vector};
use crate::utils::WBasis;
use na::Unit;

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
/// A joint that removes all relative motion between two bodies, except for the rotations along one axis.
pub struct RevoluteJoint {
    /// Where the revolute joint is attached on the first body, expressed in the local space of the first attached body.
    pub local_anchor1: Point<Real>,
    /// Where the revolute joint is attached on the second body, expressed in the local space of the second attached body.
    pub local_anchor2: Point<Real>,
    /// The rotation axis of this revolute joint expressed in the local space of the first attached body.
    ///
    /// This is stored exactly as it was given, and may not be normalized.
    pub local_axis1: Vector<Real>,
    /// The rotation axis of this revolute joint expressed in the local space of the second attached body.
    ///
    /// This is stored exactly as it was given, and may not be normalized.
    pub local_axis2: Vector<Real>,
    local_frame1: Rotation<Real>,
    local_frame2: Rotation<Real>,
}

impl RevoluteJoint {
    /// Creates a new revolute joint with the given point of applications and axis, all expressed
    /// in the local-space of the affected bodies.
    ///
    /// Fails with [`JointError::DegenerateAxis`] if one of the axes has a zero length or a
    /// non-finite component.
    pub fn new(
        local_anchor1: Point<Real>,
        local_axis1: Vector<Real>,
        local_anchor2: Point<Real>,
        local_axis2: Vector<Real>,
    ) -> Result<Self, JointError> {
        Ok(Self {
            local_anchor1,
            local_anchor2,
            local_axis1,
            local_axis2,
            local_frame1: frame_from_axis(local_axis1)?,
            local_frame2: frame_from_axis(local_axis2)?,
        })
    }

    /// The rotation mapping the `x` axis to the (normalized) first local axis of this joint.
    ///
    /// The `y` and `z` axes are mapped to an arbitrary orthonormal basis of the plane orthogonal
    /// to the axis, so this isn't the shortest-arc rotation: an axis already equal to `x` yields
    /// a quarter turn about `x` rather than the identity.
    pub fn local_frame1(&self) -> &Rotation<Real> {
        &self.local_frame1
    }

    /// The rotation mapping the `x` axis to the (normalized) second local axis of this joint.
    ///
    /// See [`Self::local_frame1`] for the twist about the axis.
    pub fn local_frame2(&self) -> &Rotation<Real> {
        &self.local_frame2
    }
}

fn frame_from_axis(axis: Vector<Real>) -> Result<Rotation<Real>, JointError> {
    // An infinite component normalizes to NaN.
    if !axis.iter().all(|c| c.is_finite()) {
        return Err(JointError::DegenerateAxis);
    }

    let axis = Unit::try_new(axis, Real::EPSILON).ok_or(JointError::DegenerateAxis)?;
    let [b1, b2] = axis.into_inner().orthonormal_basis();
    Ok(Rotation::from_basis_unchecked(&[axis.into_inner(), b1, b2]))
}
