//! Rays and ray-triangle intersection.

use crate::math::{Isometry, Point, Real, Vector};

/// Tolerance of the ray-triangle test.
///
/// Determinants smaller than this in absolute value are treated as a ray
/// parallel to the triangle plane, and hits at a distance not larger than this
/// are treated as behind the ray origin.
pub const RAY_EPSILON: Real = 1.0e-7;

/// A Ray.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Ray {
    /// Starting point of the ray.
    pub origin: Point<Real>,
    /// Direction of the ray.
    pub dir: Vector<Real>,
}

impl Ray {
    /// Creates a new ray starting from `origin` and with the direction `dir`.
    pub fn new(origin: Point<Real>, dir: Vector<Real>) -> Ray {
        Ray { origin, dir }
    }

    /// Transforms this ray by the given isometry.
    #[inline]
    pub fn transform_by(&self, m: &Isometry<Real>) -> Self {
        Self::new(m * self.origin, m * self.dir)
    }

    /// Transforms this ray by the inverse of the given isometry.
    #[inline]
    pub fn inverse_transform_by(&self, m: &Isometry<Real>) -> Self {
        Self::new(
            m.inverse_transform_point(&self.origin),
            m.inverse_transform_vector(&self.dir),
        )
    }

    /// Maps this ray through the diagonal matrix `1 / scale`.
    ///
    /// Ray parameters are preserved: `point_at(t)` of the result is the image
    /// of `point_at(t)` of `self`.
    #[inline]
    pub fn inverse_scale_by(&self, scale: &Vector<Real>) -> Self {
        Self::new(
            self.origin.coords.component_div(scale).into(),
            self.dir.component_div(scale),
        )
    }

    /// Computes the point at the given parameter on this line.
    ///
    /// This computes `self.origin + self.dir * t`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.origin + self.dir * t
    }
}

/// Computes the parameter at which `ray` hits the triangle `(a, b, c)`.
///
/// Both faces are hit. Returns `None` if the ray is nearly parallel to the
/// triangle plane, misses the triangle, or only its supporting line (not the
/// ray itself) crosses the triangle.
#[inline]
pub fn ray_triangle_intersection(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    ray: &Ray,
) -> Option<Real> {
    let ab = b - a;
    let ac = c - a;

    let h = ray.dir.cross(&ac);
    let det = ab.dot(&h);

    // the ray is parallel to the triangle plane
    if det > -RAY_EPSILON && det < RAY_EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let ap = ray.origin - a;
    let u = inv_det * ap.dot(&h);

    if u < 0.0 || u > 1.0 {
        return None;
    }

    let q = ap.cross(&ab);
    let v = inv_det * ray.dir.dot(&q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = inv_det * ac.dot(&q);
    (t > RAY_EPSILON).then_some(t)
}
