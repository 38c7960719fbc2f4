use crate::data::HandleTable;
use crate::dynamics::{
    Joint, JointError, JointParams, JointType, JointView, RigidBodyHandle, RigidBodySet,
};
use crate::math::{Point, Real, Rotation, Vector};

/// The unique identifier of a joint added to the joint set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct JointHandle(pub crate::data::Index);

impl JointHandle {
    /// Converts this handle into its (index, generation) components.
    pub fn into_raw_parts(self) -> (u32, u32) {
        self.0.into_raw_parts()
    }

    /// Reconstructs an handle from its (index, generation) components.
    pub fn from_raw_parts(id: u32, generation: u32) -> Self {
        Self(crate::data::Index::from_raw_parts(id, generation))
    }

    /// An always-invalid joint handle.
    pub fn invalid() -> Self {
        Self(crate::data::Index::invalid())
    }
}

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Default, Debug)]
/// A set of joints that can be handled by a physics pipeline.
///
/// The joint set owns its joints, but not the rigid-bodies they are attached to: those are
/// only referred to by handle, and are validated when a joint is inserted.
///
/// # Example
/// ```
/// # use rapier_joints::prelude::*;
/// let mut bodies = RigidBodySet::new();
/// let body1 = bodies.insert(RigidBodyBuilder::fixed());
/// let body2 = bodies.insert(RigidBodyBuilder::dynamic());
///
/// let mut joints = JointSet::new();
/// let params = JointParams::ball(Point::origin(), Point::origin());
/// let handle = joints.insert(&bodies, body1, body2, params).unwrap();
///
/// let joint = joints.get(handle).unwrap();
/// assert_eq!(joint.joint_type().as_str(), "Ball");
/// assert_eq!(joint.body_handle1(), body1);
///
/// joints.remove(handle);
/// assert!(joints.get(handle).is_none());
/// ```
pub struct JointSet {
    joints: HandleTable<Joint>,
}

impl JointSet {
    /// Creates a new empty set of joints.
    pub fn new() -> Self {
        Self {
            joints: HandleTable::new(),
        }
    }

    /// The number of joints on this set.
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// `true` if there are no joints in this set.
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Is the given joint handle valid?
    pub fn contains(&self, handle: JointHandle) -> bool {
        self.joints.contains(handle.0)
    }

    /// Inserts a new joint between `body1` and `body2` into this set and retrieves its handle.
    ///
    /// Both bodies must be live members of `bodies`, and must be distinct.
    pub fn insert(
        &mut self,
        bodies: &RigidBodySet,
        body1: RigidBodyHandle,
        body2: RigidBodyHandle,
        params: JointParams,
    ) -> Result<JointHandle, JointError> {
        let result = Self::validate_bodies(bodies, body1, body2)
            .and_then(|_| params.into_joint_data());

        let data = match result {
            Ok(data) => data,
            Err(err) => {
                log::warn!(
                    "Rejected {} joint between {:?} and {:?}: {}",
                    params.joint_type(),
                    body1,
                    body2,
                    err
                );
                return Err(err);
            }
        };

        let handle = JointHandle(
            self.joints
                .insert_with(|id| Joint::new(JointHandle(id), body1, body2, data)),
        );
        log::debug!(
            "Inserted {} joint {:?} between {:?} and {:?}",
            params.joint_type(),
            handle,
            body1,
            body2
        );
        Ok(handle)
    }

    fn validate_bodies(
        bodies: &RigidBodySet,
        body1: RigidBodyHandle,
        body2: RigidBodyHandle,
    ) -> Result<(), JointError> {
        for body in [body1, body2] {
            if !bodies.contains(body) {
                return Err(JointError::InvalidBodyHandle(body));
            }
        }

        if body1 == body2 {
            return Err(JointError::SelfJoint(body1));
        }

        Ok(())
    }

    /// Gets a read-only view of the joint with the given handle.
    pub fn get(&self, handle: JointHandle) -> Option<JointView<'_>> {
        self.joints
            .get(handle.0)
            .map(|joint| JointView::new(handle, joint))
    }

    /// Gets the joint with the given handle without a known generation.
    ///
    /// This is useful when you know you want the joint at position `i` but
    /// don't know what is its current generation number. Generation numbers are
    /// used to protect from the ABA problem because the joint position `i`
    /// are recycled between two insertion and a removal.
    ///
    /// Using this is discouraged in favor of `self.get(handle)` which does not
    /// suffer form the ABA problem.
    pub fn get_unknown_gen(&self, i: u32) -> Option<(JointView<'_>, JointHandle)> {
        let (joint, id) = self.joints.get_unknown_gen(i)?;
        let handle = JointHandle(id);
        Some((JointView::new(handle, joint), handle))
    }

    /// Iterates through all the joints on this set.
    pub fn iter(&self) -> impl Iterator<Item = (JointHandle, &Joint)> {
        self.joints.iter().map(|(h, j)| (JointHandle(h), j))
    }

    /// Iterates through all the joints attached to the given rigid-body.
    pub fn joints_attached_to(
        &self,
        body: RigidBodyHandle,
    ) -> impl Iterator<Item = JointView<'_>> {
        self.iter()
            .filter(move |(_, joint)| joint.is_attached_to(body))
            .map(|(handle, joint)| JointView::new(handle, joint))
    }

    /// Removes a joint from this set.
    pub fn remove(&mut self, handle: JointHandle) -> Option<Joint> {
        let removed = self.joints.remove(handle.0);
        if removed.is_some() {
            log::debug!("Removed joint {:?}", handle);
        }
        removed
    }

    /// Removes all the joints attached to the given rigid-body and returns their handles.
    ///
    /// This is never called automatically when a rigid-body is removed from its set.
    pub fn remove_joints_attached_to_rigid_body(
        &mut self,
        body: RigidBodyHandle,
    ) -> Vec<JointHandle> {
        let to_remove: Vec<_> = self
            .iter()
            .filter(|(_, joint)| joint.is_attached_to(body))
            .map(|(handle, _)| handle)
            .collect();

        for handle in &to_remove {
            self.joints.remove(handle.0);
        }

        if !to_remove.is_empty() {
            log::debug!(
                "Removed {} joint(s) attached to {:?}",
                to_remove.len(),
                body
            );
        }

        to_remove
    }

    /// Removes every joint from this set.
    ///
    /// Every handle obtained before this call becomes permanently invalid, even after new
    /// joints are inserted.
    pub fn free(&mut self) {
        log::debug!("Freeing a joint set with {} joint(s)", self.joints.len());
        self.joints.clear();
    }

    fn view(&self, handle: JointHandle) -> Result<JointView<'_>, JointError> {
        self.get(handle).ok_or(JointError::InvalidHandle(handle))
    }

    /// The handle of the first rigid-body the given joint is attached to.
    pub fn joint_body_handle1(&self, handle: JointHandle) -> Result<RigidBodyHandle, JointError> {
        Ok(self.view(handle)?.body_handle1())
    }

    /// The handle of the second rigid-body the given joint is attached to.
    pub fn joint_body_handle2(&self, handle: JointHandle) -> Result<RigidBodyHandle, JointError> {
        Ok(self.view(handle)?.body_handle2())
    }

    /// The type of the given joint.
    pub fn joint_type(&self, handle: JointHandle) -> Result<JointType, JointError> {
        Ok(self.view(handle)?.joint_type())
    }

    /// The rotation mapping the `x` axis to the first local axis of the given joint.
    pub fn joint_frame_x1(&self, handle: JointHandle) -> Result<Rotation<Real>, JointError> {
        self.view(handle)?.frame_x1()
    }

    /// The rotation mapping the `x` axis to the second local axis of the given joint.
    pub fn joint_frame_x2(&self, handle: JointHandle) -> Result<Rotation<Real>, JointError> {
        self.view(handle)?.frame_x2()
    }

    /// The first anchor of the given joint, in the local-space of its first rigid-body.
    pub fn joint_anchor1(&self, handle: JointHandle) -> Result<Point<Real>, JointError> {
        Ok(self.view(handle)?.anchor1())
    }

    /// The second anchor of the given joint, in the local-space of its second rigid-body.
    pub fn joint_anchor2(&self, handle: JointHandle) -> Result<Point<Real>, JointError> {
        Ok(self.view(handle)?.anchor2())
    }

    /// The first axis of the given joint, in the local-space of its first rigid-body.
    ///
    /// Fails with [`JointError::NotApplicable`] for joints without axis.
    pub fn joint_axis1(&self, handle: JointHandle) -> Result<Vector<Real>, JointError> {
        let view = self.view(handle)?;
        view.axis1().ok_or(JointError::NotApplicable {
            joint_type: view.joint_type(),
            property: "axis",
        })
    }

    /// The second axis of the given joint, in the local-space of its second rigid-body.
    ///
    /// Fails with [`JointError::NotApplicable`] for joints without axis.
    pub fn joint_axis2(&self, handle: JointHandle) -> Result<Vector<Real>, JointError> {
        let view = self.view(handle)?;
        view.axis2().ok_or(JointError::NotApplicable {
            joint_type: view.joint_type(),
            property: "axis",
        })
    }
}

#[cfg(test)]
mod test {
    use crate::dynamics::{
        JointError, JointHandle, JointParams, JointSet, JointType, RigidBodyBuilder,
        RigidBodyHandle, RigidBodySet,
    };
    use crate::math::{Point, Real, Vector};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    fn two_bodies() -> (RigidBodySet, RigidBodyHandle, RigidBodyHandle) {
        let mut bodies = RigidBodySet::new();
        let h1 = bodies.insert(RigidBodyBuilder::fixed());
        let h2 = bodies.insert(RigidBodyBuilder::dynamic());
        (bodies, h1, h2)
    }

    fn random_point(rng: &mut Pcg32) -> Point<Real> {
        Point::from(Vector::from_fn(|_, _| rng.gen_range(-100.0..100.0)))
    }

    #[test]
    fn ball_joint_between_first_two_bodies() {
        let (bodies, h1, h2) = two_bodies();
        assert_eq!(h1.into_raw_parts().0, 0);
        assert_eq!(h2.into_raw_parts().0, 1);

        let mut joints = JointSet::new();
        let params = JointParams::ball(Point::origin(), Point::origin());
        let handle = joints.insert(&bodies, h1, h2, params).unwrap();

        let view = joints.get(handle).unwrap();
        assert_eq!(view.handle(), handle);
        assert_eq!(view.joint_type(), JointType::Ball);
        assert_eq!(view.joint_type().as_str(), "Ball");
        assert_eq!(view.body_handle1(), h1);
        assert_eq!(view.body_handle2(), h2);
        assert_eq!(view.axis1(), None);
        assert_eq!(joints.joint_body_handle1(handle), Ok(h1));
        assert_eq!(joints.joint_body_handle2(handle), Ok(h2));
        assert_eq!(
            joints.joint_axis1(handle),
            Err(JointError::NotApplicable {
                joint_type: JointType::Ball,
                property: "axis"
            })
        );
    }

    #[test]
    fn anchors_round_trip_exactly() {
        let (bodies, h1, h2) = two_bodies();
        let mut joints = JointSet::new();
        let mut rng = Pcg32::seed_from_u64(0);

        for _ in 0..50 {
            let a1 = random_point(&mut rng);
            let a2 = random_point(&mut rng);
            let handle = joints
                .insert(&bodies, h1, h2, JointParams::ball(a1, a2))
                .unwrap();

            assert_eq!(joints.joint_anchor1(handle), Ok(a1));
            assert_eq!(joints.joint_anchor2(handle), Ok(a2));
        }
    }

    #[cfg(feature = "dim3")]
    #[test]
    fn revolute_axes_round_trip_exactly() {
        let (bodies, h1, h2) = two_bodies();
        let mut joints = JointSet::new();
        let axis1 = Vector::new(0.0, 1.0, 0.0);
        let axis2 = Vector::new(0.3, -7.25, 1.0e-3);
        let params = JointParams::revolute(Point::origin(), axis1, Point::origin(), axis2);
        let handle = joints.insert(&bodies, h1, h2, params).unwrap();

        assert_eq!(joints.joint_type(handle), Ok(JointType::Revolute));
        assert_eq!(joints.joint_axis1(handle), Ok(axis1));
        assert_eq!(joints.joint_axis2(handle), Ok(axis2));
        assert_eq!(joints.get(handle).unwrap().axis2(), Some(axis2));

        let frame1 = joints.joint_frame_x1(handle).unwrap();
        let frame2 = joints.joint_frame_x2(handle).unwrap();
        assert!((frame1 * Vector::x() - axis1).norm() < 1.0e-5);
        assert!((frame2 * Vector::x() - axis2.normalize()).norm() < 1.0e-5);
    }

    #[cfg(feature = "dim3")]
    #[test]
    fn ball_joints_have_no_frame() {
        let (bodies, h1, h2) = two_bodies();
        let mut joints = JointSet::new();
        let params = JointParams::ball(Point::origin(), Point::origin());
        let handle = joints.insert(&bodies, h1, h2, params).unwrap();

        assert!(matches!(
            joints.joint_frame_x1(handle),
            Err(JointError::NotApplicable { .. })
        ));
    }

    #[cfg(feature = "dim2")]
    #[test]
    fn frames_are_unsupported_in_2d() {
        let (bodies, h1, h2) = two_bodies();
        let mut joints = JointSet::new();
        let params = JointParams::ball(Point::origin(), Point::origin());
        let handle = joints.insert(&bodies, h1, h2, params).unwrap();

        assert!(matches!(
            joints.joint_frame_x2(handle),
            Err(JointError::UnsupportedConfiguration(_))
        ));
    }

    #[cfg(feature = "dim3")]
    #[test]
    fn zero_axis_is_rejected_without_inserting() {
        let (bodies, h1, h2) = two_bodies();
        let mut joints = JointSet::new();
        let params =
            JointParams::revolute(Point::origin(), Vector::zeros(), Point::origin(), Vector::y());

        assert_eq!(
            joints.insert(&bodies, h1, h2, params),
            Err(JointError::DegenerateAxis)
        );
        assert!(joints.is_empty());
    }

    #[cfg(feature = "dim3")]
    #[test]
    fn infinite_axis_is_rejected_without_inserting() {
        let (bodies, h1, h2) = two_bodies();
        let mut joints = JointSet::new();
        let infinite = Vector::new(Real::INFINITY, 0.0, 0.0);
        let params = JointParams::revolute(Point::origin(), infinite, Point::origin(), Vector::y());

        assert_eq!(
            joints.insert(&bodies, h1, h2, params),
            Err(JointError::DegenerateAxis)
        );
        assert!(joints.is_empty());
    }

    #[test]
    fn unknown_body_is_rejected() {
        let (bodies, h1, _) = two_bodies();
        let mut joints = JointSet::new();
        let never_inserted = RigidBodyHandle::from_raw_parts(42, 0);
        let params = JointParams::ball(Point::origin(), Point::origin());

        assert_eq!(
            joints.insert(&bodies, never_inserted, h1, params),
            Err(JointError::InvalidBodyHandle(never_inserted))
        );
        assert_eq!(
            joints.insert(&bodies, h1, RigidBodyHandle::invalid(), params),
            Err(JointError::InvalidBodyHandle(RigidBodyHandle::invalid()))
        );
        assert!(joints.is_empty());
    }

    #[test]
    fn removed_body_is_rejected() {
        let (mut bodies, h1, h2) = two_bodies();
        bodies.remove(h2);
        let mut joints = JointSet::new();
        let params = JointParams::ball(Point::origin(), Point::origin());

        assert_eq!(
            joints.insert(&bodies, h1, h2, params),
            Err(JointError::InvalidBodyHandle(h2))
        );
    }

    #[test]
    fn self_joint_is_rejected() {
        let (bodies, h1, _) = two_bodies();
        let mut joints = JointSet::new();
        let params = JointParams::ball(Point::origin(), Point::origin());

        assert_eq!(
            joints.insert(&bodies, h1, h1, params),
            Err(JointError::SelfJoint(h1))
        );
    }

    #[test]
    fn consecutive_handles_are_distinct() {
        let (bodies, h1, h2) = two_bodies();
        let mut joints = JointSet::new();
        let params = JointParams::ball(Point::origin(), Point::origin());

        let j1 = joints.insert(&bodies, h1, h2, params).unwrap();
        let j2 = joints.insert(&bodies, h1, h2, params).unwrap();
        let j3 = joints.insert(&bodies, h2, h1, params).unwrap();
        assert_ne!(j1, j2);
        assert_ne!(j2, j3);
        assert_ne!(j1, j3);
        assert_eq!(joints.len(), 3);
    }

    #[test]
    fn unknown_and_removed_handles_are_missing() {
        let (bodies, h1, h2) = two_bodies();
        let mut joints = JointSet::new();
        let params = JointParams::ball(Point::origin(), Point::origin());

        assert!(joints.get(JointHandle::invalid()).is_none());
        assert!(joints.get(JointHandle::from_raw_parts(0, 0)).is_none());

        let handle = joints.insert(&bodies, h1, h2, params).unwrap();
        assert!(joints.remove(handle).is_some());
        assert!(joints.remove(handle).is_none());
        assert!(joints.get(handle).is_none());
        assert_eq!(
            joints.joint_body_handle1(handle),
            Err(JointError::InvalidHandle(handle))
        );

        // The slot is recycled, but the old handle still doesn't resolve.
        let recycled = joints.insert(&bodies, h2, h1, params).unwrap();
        assert_eq!(recycled.into_raw_parts().0, handle.into_raw_parts().0);
        assert!(joints.get(handle).is_none());
        assert_eq!(joints.joint_body_handle1(recycled), Ok(h2));
    }

    #[test]
    fn free_invalidates_every_handle() {
        let (bodies, h1, h2) = two_bodies();
        let mut joints = JointSet::new();
        let params = JointParams::ball(Point::origin(), Point::origin());
        let handles: Vec<_> = (0..10)
            .map(|_| joints.insert(&bodies, h1, h2, params).unwrap())
            .collect();

        joints.free();
        joints.free();
        assert!(joints.is_empty());
        assert!(handles.iter().all(|h| joints.get(*h).is_none()));

        let _ = joints.insert(&bodies, h1, h2, params).unwrap();
        assert!(handles.iter().all(|h| joints.get(*h).is_none()));
        assert!(handles
            .iter()
            .all(|h| joints.joint_anchor1(*h) == Err(JointError::InvalidHandle(*h))));
    }

    #[test]
    fn removing_a_body_leaves_stale_handles_in_joints() {
        let (mut bodies, h1, h2) = two_bodies();
        let mut joints = JointSet::new();
        let params = JointParams::ball(Point::origin(), Point::origin());
        let handle = joints.insert(&bodies, h1, h2, params).unwrap();

        bodies.remove(h1);
        assert_eq!(joints.joint_body_handle1(handle), Ok(h1));
        assert!(!bodies.contains(h1));
    }

    #[test]
    fn explicit_cascading_removal() {
        let mut bodies = RigidBodySet::new();
        let h1 = bodies.insert(RigidBodyBuilder::fixed());
        let h2 = bodies.insert(RigidBodyBuilder::dynamic());
        let h3 = bodies.insert(RigidBodyBuilder::dynamic());
        let mut joints = JointSet::new();
        let params = JointParams::ball(Point::origin(), Point::origin());

        let j12 = joints.insert(&bodies, h1, h2, params).unwrap();
        let j23 = joints.insert(&bodies, h2, h3, params).unwrap();
        let j31 = joints.insert(&bodies, h3, h1, params).unwrap();

        let attached: Vec<_> = joints.joints_attached_to(h3).map(|v| v.handle()).collect();
        assert_eq!(attached, vec![j23, j31]);

        let removed = joints.remove_joints_attached_to_rigid_body(h3);
        assert_eq!(removed, vec![j23, j31]);
        assert!(joints.contains(j12));
        assert_eq!(joints.len(), 1);
        assert!(joints.remove_joints_attached_to_rigid_body(h3).is_empty());
    }

    #[test]
    fn unknown_generation_lookup() {
        let (bodies, h1, h2) = two_bodies();
        let mut joints = JointSet::new();
        let params = JointParams::ball(Point::origin(), Point::origin());
        let handle = joints.insert(&bodies, h1, h2, params).unwrap();

        let (view, found) = joints.get_unknown_gen(handle.into_raw_parts().0).unwrap();
        assert_eq!(found, handle);
        assert_eq!(view.body_handle2(), h2);
        assert!(joints.get_unknown_gen(7).is_none());
    }

    #[cfg(all(feature = "serde-serialize", feature = "dim3"))]
    #[test]
    fn snapshot_round_trip() {
        let (mut bodies, h1, h2) = two_bodies();
        let h3 = bodies.insert(RigidBodyBuilder::dynamic().translation(Vector::x()));
        let mut joints = JointSet::new();
        let ball = joints
            .insert(
                &bodies,
                h1,
                h2,
                JointParams::ball(Point::new(1.0, 2.0, 3.0), Point::origin()),
            )
            .unwrap();
        let axis1 = Vector::new(0.0, 2.0, 0.0);
        let revolute = joints
            .insert(
                &bodies,
                h2,
                h3,
                JointParams::revolute(Point::origin(), axis1, Point::origin(), Vector::z()),
            )
            .unwrap();
        joints.remove(ball);

        let bytes = bincode::serialize(&joints).unwrap();
        let restored: JointSet = bincode::deserialize(&bytes).unwrap();
        let body_bytes = bincode::serialize(&bodies).unwrap();
        let restored_bodies: RigidBodySet = bincode::deserialize(&body_bytes).unwrap();

        assert_eq!(restored.len(), 1);
        assert!(restored.get(ball).is_none());
        assert_eq!(restored.joint_body_handle1(revolute), Ok(h2));
        assert_eq!(restored.joint_body_handle2(revolute), Ok(h3));
        assert_eq!(restored.joint_axis1(revolute), Ok(axis1));
        assert_eq!(
            restored.joint_frame_x1(revolute),
            joints.joint_frame_x1(revolute)
        );
        assert_eq!(restored_bodies.len(), 3);
        assert_eq!(
            restored_bodies[h3].translation(),
            bodies[h3].translation()
        );
    }

}
