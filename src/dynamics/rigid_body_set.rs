use crate::data::HandleTable;
use crate::dynamics::{RigidBody, RigidBodyHandle};
use std::ops::{Index, IndexMut};

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Default, Debug)]
/// A set of rigid bodies that can be handled by a physics pipeline.
///
/// Joints only refer to the bodies of this set by handle: removing a body from here never
/// touches the joints attached to it. Call
/// [`JointSet::remove_joints_attached_to_rigid_body`](crate::dynamics::JointSet::remove_joints_attached_to_rigid_body)
/// explicitly if those joints must go too.
pub struct RigidBodySet {
    pub(crate) bodies: HandleTable<RigidBody>,
}

impl RigidBodySet {
    /// Create a new empty set of rigid bodies.
    pub fn new() -> Self {
        RigidBodySet {
            bodies: HandleTable::new(),
        }
    }

    /// The number of rigid bodies on this set.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// `true` if there are no rigid bodies in this set.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Is the given body handle valid?
    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle.0)
    }

    /// Insert a rigid body into this set and retrieve its handle.
    pub fn insert(&mut self, rb: impl Into<RigidBody>) -> RigidBodyHandle {
        RigidBodyHandle(self.bodies.insert(rb.into()))
    }

    /// Removes a rigid-body from this set.
    ///
    /// Joints attached to this rigid-body keep referencing its (now stale) handle.
    pub fn remove(&mut self, handle: RigidBodyHandle) -> Option<RigidBody> {
        self.bodies.remove(handle.0)
    }

    /// Gets the rigid-body with the given handle without a known generation.
    ///
    /// This is useful when you know you want the rigid-body at position `i` but
    /// don't know what is its current generation number. Generation numbers are
    /// used to protect from the ABA problem because the rigid-body position `i`
    /// are recycled between two insertion and a removal.
    ///
    /// Using this is discouraged in favor of `self.get(handle)` which does not
    /// suffer form the ABA problem.
    pub fn get_unknown_gen(&self, i: u32) -> Option<(&RigidBody, RigidBodyHandle)> {
        self.bodies
            .get_unknown_gen(i)
            .map(|(b, h)| (b, RigidBodyHandle(h)))
    }

    /// Gets the rigid-body with the given handle.
    pub fn get(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.0)
    }

    /// Gets a mutable reference to the rigid-body with the given handle.
    pub fn get_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.0)
    }

    /// Iterates through all the rigid-bodies on this set.
    pub fn iter(&self) -> impl Iterator<Item = (RigidBodyHandle, &RigidBody)> {
        self.bodies.iter().map(|(h, b)| (RigidBodyHandle(h), b))
    }

    /// Iterates mutably through all the rigid-bodies on this set.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (RigidBodyHandle, &mut RigidBody)> {
        self.bodies.iter_mut().map(|(h, b)| (RigidBodyHandle(h), b))
    }
}

impl Index<RigidBodyHandle> for RigidBodySet {
    type Output = RigidBody;

    fn index(&self, index: RigidBodyHandle) -> &RigidBody {
        &self.bodies[index.0]
    }
}

impl IndexMut<RigidBodyHandle> for RigidBodySet {
    fn index_mut(&mut self, handle: RigidBodyHandle) -> &mut RigidBody {
        &mut self.bodies[handle.0]
    }
}

#[cfg(test)]
mod test {
    use crate::dynamics::{RigidBodyBuilder, RigidBodyHandle, RigidBodySet};

    #[test]
    fn insert_and_remove_bodies() {
        let mut bodies = RigidBodySet::new();
        let h1 = bodies.insert(RigidBodyBuilder::dynamic());
        let h2 = bodies.insert(RigidBodyBuilder::fixed().build());

        assert_eq!(bodies.len(), 2);
        assert!(bodies.contains(h1));
        assert!(bodies[h2].is_fixed());

        assert!(bodies.remove(h1).is_some());
        assert!(bodies.remove(h1).is_none());
        assert!(bodies.get(h1).is_none());
        assert!(!bodies.contains(RigidBodyHandle::invalid()));
        assert_eq!(bodies.iter().map(|(h, _)| h).collect::<Vec<_>>(), vec![h2]);
    }

    #[test]
    fn raw_handle_lookup() {
        let mut bodies = RigidBodySet::new();
        let h = bodies.insert(RigidBodyBuilder::dynamic().user_data(3));
        let (index, generation) = h.into_raw_parts();

        assert_eq!(RigidBodyHandle::from_raw_parts(index, generation), h);
        let (rb, found) = bodies.get_unknown_gen(index).unwrap();
        assert_eq!(found, h);
        assert_eq!(rb.user_data, 3);
    }
}
