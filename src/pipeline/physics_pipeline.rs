//! Physics pipeline structures.

use crate::dynamics::{
    IntegrationParameters, Joint, JointError, JointHandle, JointSet, RigidBody, RigidBodySet,
};
use crate::pipeline::{JointConstraint, JointSolver};
#[cfg(feature = "dim3")]
use na::Unit;

/// The outcome of a [`PhysicsPipeline::step`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepReport {
    /// The number of joints handed to the solver.
    pub num_solved_joints: usize,
    /// The joints that were skipped, and why.
    pub failures: Vec<(JointHandle, JointError)>,
}

impl StepReport {
    /// `true` if every joint could be handed to the solver.
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The physics pipeline, responsible for stepping the whole physics simulation.
///
/// Joints only refer to their rigid-bodies by handle, so each step resolves those handles
/// again. A joint attached to a rigid-body that no longer exists is skipped and reported
/// instead of being solved.
#[derive(Default)]
pub struct PhysicsPipeline {
    constraints: Vec<JointConstraint>,
}

impl PhysicsPipeline {
    /// Initializes a new physics pipeline.
    pub fn new() -> PhysicsPipeline {
        PhysicsPipeline {
            constraints: Vec::new(),
        }
    }

    /// The joint constraints built during the last step.
    pub fn joint_constraints(&self) -> &[JointConstraint] {
        &self.constraints
    }

    /// Executes one timestep of the joint resolution.
    ///
    /// Neither the rigid-bodies nor the joints are modified by this step.
    pub fn step(
        &mut self,
        integration_parameters: &IntegrationParameters,
        bodies: &RigidBodySet,
        joints: &JointSet,
        solver: &mut dyn JointSolver,
    ) -> StepReport {
        let mut report = StepReport::default();
        self.constraints.clear();

        for (handle, joint) in joints.iter() {
            let resolved = Self::resolve(bodies, joint).map(|(rb1, rb2)| {
                Self::build_constraint(integration_parameters, handle, joint, rb1, rb2)
            });

            match resolved {
                Ok(constraint) => self.constraints.push(constraint),
                Err(err) => {
                    log::debug!("Skipping joint {:?} during this step: {}", handle, err);
                    report.failures.push((handle, err));
                }
            }
        }

        solver.solve_joints(integration_parameters, bodies, &self.constraints);
        report.num_solved_joints = self.constraints.len();
        report
    }

    fn resolve<'a>(
        bodies: &'a RigidBodySet,
        joint: &Joint,
    ) -> Result<(&'a RigidBody, &'a RigidBody), JointError> {
        let rb1 = bodies
            .get(joint.body1())
            .ok_or(JointError::InvalidBodyHandle(joint.body1()))?;
        let rb2 = bodies
            .get(joint.body2())
            .ok_or(JointError::InvalidBodyHandle(joint.body2()))?;
        Ok((rb1, rb2))
    }

    fn build_constraint(
        params: &IntegrationParameters,
        handle: JointHandle,
        joint: &Joint,
        rb1: &RigidBody,
        rb2: &RigidBody,
    ) -> JointConstraint {
        let data = joint.data();
        let world_anchor1 = rb1.local_point_to_world(data.local_anchor1());
        let world_anchor2 = rb2.local_point_to_world(data.local_anchor2());
        let linear_error = world_anchor2 - world_anchor1;

        #[cfg(feature = "dim3")]
        let world_axes = data
            .local_axis1()
            .zip(data.local_axis2())
            .map(|(axis1, axis2)| {
                [
                    Unit::new_normalize(rb1.local_vector_to_world(axis1)),
                    Unit::new_normalize(rb2.local_vector_to_world(axis2)),
                ]
            });

        JointConstraint {
            joint: handle,
            joint_type: joint.joint_type(),
            body1: joint.body1(),
            body2: joint.body2(),
            world_anchor1,
            world_anchor2,
            linear_error,
            linear_rhs: linear_error * params.joint_erp_inv_dt(),
            #[cfg(feature = "dim3")]
            world_axes,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::dynamics::{
        IntegrationParameters, JointError, JointParams, JointSet, RigidBodyBuilder, RigidBodySet,
    };
    use crate::math::{Point, Vector};
    use crate::pipeline::{JointConstraint, JointSolver, PhysicsPipeline};

    #[derive(Default)]
    struct RecordingSolver {
        calls: usize,
        constraints: Vec<JointConstraint>,
    }

    impl JointSolver for RecordingSolver {
        fn solve_joints(
            &mut self,
            _params: &IntegrationParameters,
            _bodies: &RigidBodySet,
            constraints: &[JointConstraint],
        ) {
            self.calls += 1;
            self.constraints = constraints.to_vec();
        }
    }

    #[test]
    fn ball_joint_constraint_in_world_space() {
        let mut bodies = RigidBodySet::new();
        let h1 = bodies.insert(RigidBodyBuilder::fixed());
        let h2 = bodies.insert(RigidBodyBuilder::dynamic().translation(Vector::repeat(1.0)));
        let mut joints = JointSet::new();
        let anchor2 = Point::from(-Vector::repeat(0.5));
        let handle = joints
            .insert(&bodies, h1, h2, JointParams::ball(Point::origin(), anchor2))
            .unwrap();

        let params = IntegrationParameters {
            dt: 0.5,
            joint_erp: 0.5,
        };
        let mut pipeline = PhysicsPipeline::new();
        let mut solver = RecordingSolver::default();
        let report = pipeline.step(&params, &bodies, &joints, &mut solver);

        assert!(report.is_ok());
        assert_eq!(report.num_solved_joints, 1);
        assert_eq!(solver.calls, 1);

        let constraint = &solver.constraints[0];
        assert_eq!(constraint.joint, handle);
        assert_eq!(constraint.body1, h1);
        assert_eq!(constraint.body2, h2);
        assert_eq!(constraint.world_anchor1, Point::origin());
        assert_eq!(constraint.world_anchor2, Point::from(Vector::repeat(0.5)));
        assert_eq!(constraint.linear_error, Vector::repeat(0.5));
        assert_eq!(constraint.linear_rhs, Vector::repeat(0.5));
        assert_eq!(pipeline.joint_constraints(), &solver.constraints[..]);
    }

    #[test]
    fn removed_body_is_reported_by_the_step() {
        let mut bodies = RigidBodySet::new();
        let h1 = bodies.insert(RigidBodyBuilder::fixed());
        let h2 = bodies.insert(RigidBodyBuilder::dynamic());
        let h3 = bodies.insert(RigidBodyBuilder::dynamic());
        let mut joints = JointSet::new();
        let params = JointParams::ball(Point::origin(), Point::origin());
        let dangling = joints.insert(&bodies, h1, h2, params).unwrap();
        let healthy = joints.insert(&bodies, h1, h3, params).unwrap();

        bodies.remove(h2);
        assert_eq!(joints.joint_body_handle2(dangling), Ok(h2));

        let mut pipeline = PhysicsPipeline::new();
        let mut solver = RecordingSolver::default();
        let report = pipeline.step(&IntegrationParameters::default(), &bodies, &joints, &mut solver);

        assert!(!report.is_ok());
        assert_eq!(
            report.failures,
            vec![(dangling, JointError::InvalidBodyHandle(h2))]
        );
        assert_eq!(report.num_solved_joints, 1);
        assert_eq!(solver.constraints.len(), 1);
        assert_eq!(solver.constraints[0].joint, healthy);

        // The step doesn't repair the joint set.
        assert!(joints.contains(dangling));
    }

    #[test]
    fn unit_solver_accepts_everything() {
        let bodies = RigidBodySet::new();
        let joints = JointSet::new();
        let mut pipeline = PhysicsPipeline::new();
        let report = pipeline.step(&IntegrationParameters::default(), &bodies, &joints, &mut ());

        assert!(report.is_ok());
        assert_eq!(report.num_solved_joints, 0);
    }

    #[cfg(feature = "dim3")]
    #[test]
    fn revolute_axes_are_normalized_in_world_space() {
        use crate::math::Real;

        let mut bodies = RigidBodySet::new();
        let h1 = bodies.insert(RigidBodyBuilder::fixed());
        let h2 = bodies.insert(
            RigidBodyBuilder::dynamic()
                .rotation(Vector::z() * (std::f32::consts::FRAC_PI_2 as Real)),
        );
        let mut joints = JointSet::new();
        let params = JointParams::revolute(
            Point::origin(),
            Vector::new(0.0, 4.0, 0.0),
            Point::origin(),
            Vector::new(2.0, 0.0, 0.0),
        );
        joints.insert(&bodies, h1, h2, params).unwrap();

        let mut pipeline = PhysicsPipeline::new();
        let mut solver = RecordingSolver::default();
        pipeline.step(&IntegrationParameters::default(), &bodies, &joints, &mut solver);

        let [axis1, axis2] = solver.constraints[0].world_axes.unwrap();
        assert!((axis1.into_inner() - Vector::y()).norm() < 1.0e-5);
        // The x axis of the second body points along the world y axis.
        assert!((axis2.into_inner() - Vector::y()).norm() < 1.0e-5);
    }
}
