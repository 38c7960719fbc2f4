//! # Rapier joints
//!
//! Handle-based rigid-body and joint sets for driving the Rapier physics engine from a
//! scripting environment or a testbed.
//!
//! Everything that crosses the boundary is referred to by an opaque, generational handle:
//! - Rigid-bodies live in a [`RigidBodySet`](dynamics::RigidBodySet).
//! - Joints are described by [`JointParams`](dynamics::JointParams), created into a
//!   [`JointSet`](dynamics::JointSet), and read back through a
//!   [`JointView`](dynamics::JointView).
//! - The [`PhysicsPipeline`](pipeline::PhysicsPipeline) hands the resolved joints to the
//!   constraint solver once per step.
//!
//! A handle that was removed, or that belongs to a set which was freed, never aliases a
//! newer object: lookups simply report it as missing.

#![deny(bare_trait_objects)]
#![warn(missing_docs)]
#![allow(clippy::module_inception)]

pub extern crate nalgebra as na;
#[cfg(feature = "serde-serialize")]
#[macro_use]
extern crate serde;

#[cfg(all(feature = "dim2", feature = "dim3"))]
std::compile_error!("The `dim2` and `dim3` features are mutually exclusive.");
#[cfg(not(any(feature = "dim2", feature = "dim3")))]
std::compile_error!("Either the `dim2` or the `dim3` feature must be enabled.");

pub(crate) const INVALID_U32: u32 = u32::MAX;

/// The string version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod data;
pub mod dynamics;
pub mod pipeline;
pub mod utils;

/// Elementary mathematical entities (vectors, points, rotations, isometries).
pub mod math {
    /// The scalar type used throughout this crate.
    pub type Real = f32;

    /// The dimension of the space.
    #[cfg(feature = "dim2")]
    pub const DIM: usize = 2;
    /// The dimension of the space.
    #[cfg(feature = "dim3")]
    pub const DIM: usize = 3;

    /// The point type.
    pub type Point<N> = na::Point<N, DIM>;
    /// The vector type.
    pub type Vector<N> = na::SVector<N, DIM>;
    /// The translation type.
    pub type Translation<N> = na::Translation<N, DIM>;

    /// The rotation type.
    #[cfg(feature = "dim2")]
    pub type Rotation<N> = na::UnitComplex<N>;
    /// The rotation type.
    #[cfg(feature = "dim3")]
    pub type Rotation<N> = na::UnitQuaternion<N>;

    /// The angular vector type (a scalar in 2D, a vector in 3D).
    #[cfg(feature = "dim2")]
    pub type AngVector<N> = N;
    /// The angular vector type (a scalar in 2D, a vector in 3D).
    #[cfg(feature = "dim3")]
    pub type AngVector<N> = na::Vector3<N>;

    /// The isometry type.
    #[cfg(feature = "dim2")]
    pub type Isometry<N> = na::Isometry2<N>;
    /// The isometry type.
    #[cfg(feature = "dim3")]
    pub type Isometry<N> = na::Isometry3<N>;
}

/// Prelude containing the common types defined by this crate.
pub mod prelude {
    pub use crate::dynamics::*;
    pub use crate::math::*;
    pub use crate::pipeline::*;
    pub use na::{point, vector};
    pub extern crate nalgebra;
}
