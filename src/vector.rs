//! Minimal 3-vector helpers.
//!
//! Thin wrappers over [`nalgebra::Vector3`] so that the orbital formulas read
//! like their textbook form (`dot(r, v)`, `cross(r, v)`).
use nalgebra::Vector3;

/// Euclidean norm of a vector.
#[inline]
pub fn norm(v: &Vector3<f64>) -> f64 {
    v.norm()
}

/// Dot product of two vectors.
#[inline]
pub fn dot(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
    a.dot(b)
}

/// Cross product `a × b`.
#[inline]
pub fn cross(a: &Vector3<f64>, b: &Vector3<f64>) -> Vector3<f64> {
    a.cross(b)
}

/// Unit vector along `v`, or `None` for a (numerically) zero vector.
#[inline]
pub fn unit(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    v.try_normalize(f64::EPSILON)
}
