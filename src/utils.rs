//! Miscellaneous utilities.

use crate::math::Real;
use na::{Vector2, Vector3};

/// Trait to compute the orthonormal basis of a vector.
pub trait WBasis: Sized {
    /// The type of the array of orthonormal vectors.
    type Basis;
    /// Computes the vectors which, when combined with `self`, form an orthonormal basis.
    ///
    /// `self` must have a unit length.
    fn orthonormal_basis(self) -> Self::Basis;
    /// Computes a vector orthogonal to `self` with a unit length (if `self` has a unit length).
    fn orthonormal_vector(self) -> Self;
}

impl WBasis for Vector2<Real> {
    type Basis = [Vector2<Real>; 1];
    fn orthonormal_basis(self) -> [Vector2<Real>; 1] {
        [Vector2::new(-self.y, self.x)]
    }
    fn orthonormal_vector(self) -> Vector2<Real> {
        Vector2::new(-self.y, self.x)
    }
}

impl WBasis for Vector3<Real> {
    type Basis = [Vector3<Real>; 2];
    // Robust and branchless implementation from Pixar:
    // https://graphics.pixar.com/library/OrthonormalB/paper.pdf
    fn orthonormal_basis(self) -> [Vector3<Real>; 2] {
        let sign = (1.0 as Real).copysign(self.z);
        let a = -1.0 / (sign + self.z);
        let b = self.x * self.y * a;

        [
            Vector3::new(1.0 + sign * self.x * self.x * a, sign * b, -sign * self.x),
            Vector3::new(b, sign + self.y * self.y * a, -self.y),
        ]
    }

    fn orthonormal_vector(self) -> Vector3<Real> {
        let sign = (1.0 as Real).copysign(self.z);
        let a = -1.0 / (sign + self.z);
        let b = self.x * self.y * a;
        Vector3::new(b, sign + self.y * self.y * a, -self.y)
    }
}

#[cfg(test)]
mod test {
    use super::WBasis;
    use na::{Vector2, Vector3};

    #[test]
    fn basis_is_orthonormal() {
        let axes = [
            Vector3::x(),
            Vector3::y(),
            Vector3::z(),
            -Vector3::z(),
            Vector3::new(1.0, 2.0, -3.0).normalize(),
        ];

        for n in axes {
            let [b1, b2] = n.orthonormal_basis();
            assert!((b1.norm() - 1.0).abs() < 1.0e-5);
            assert!((b2.norm() - 1.0).abs() < 1.0e-5);
            assert!(b1.dot(&n).abs() < 1.0e-5);
            assert!(b2.dot(&n).abs() < 1.0e-5);
            assert!(b1.dot(&b2).abs() < 1.0e-5);
            // (n, b1, b2) is right-handed.
            assert!((n.cross(&b1) - b2).norm() < 1.0e-5);
            assert_eq!(n.orthonormal_vector(), b2);
        }

        let v = Vector2::new(0.6, 0.8);
        assert!(v.orthonormal_basis()[0].dot(&v).abs() < 1.0e-6);
    }
}
