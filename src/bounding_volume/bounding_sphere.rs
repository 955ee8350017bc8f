//! Bounding sphere.

use crate::math::{Point, Real};

/// A sphere enclosing a set of points.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct BoundingSphere {
    /// The center of the sphere.
    pub center: Point<Real>,
    /// The radius of the sphere.
    pub radius: Real,
}

impl BoundingSphere {
    /// Creates a new bounding sphere.
    pub fn new(center: Point<Real>, radius: Real) -> BoundingSphere {
        BoundingSphere { center, radius }
    }

    /// The bounding sphere center.
    #[inline]
    pub fn center(&self) -> &Point<Real> {
        &self.center
    }

    /// The bounding sphere radius.
    #[inline]
    pub fn radius(&self) -> Real {
        self.radius
    }

    /// Is `point` inside this sphere or on its boundary?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        na::distance_squared(&self.center, point) <= self.radius * self.radius
    }

    /// This sphere with its radius grown by `amount`.
    ///
    /// # Panics
    /// If `amount` is negative.
    #[inline]
    #[must_use]
    pub fn loosened(&self, amount: Real) -> BoundingSphere {
        assert!(amount >= 0.0, "The loosening margin must be positive.");
        BoundingSphere::new(self.center, self.radius + amount)
    }
}
