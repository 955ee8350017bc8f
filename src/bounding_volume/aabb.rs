//! Axis Aligned Bounding Box.

use crate::math::{Point, Real, Vector};

/// An Axis-Aligned Bounding Box.
///
/// Mesh queries return it as the six scalars `xmin, ymin, zmin` (in `mins`)
/// and `xmax, ymax, zmax` (in `maxs`).
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
#[repr(C)]
pub struct Aabb {
    /// The point with minimum coordinates.
    pub mins: Point<Real>,
    /// The point with maximum coordinates.
    pub maxs: Point<Real>,
}

impl Aabb {
    /// Creates a box from its two extreme corners.
    ///
    /// Each component of `mins` should not exceed the matching component of `maxs`.
    #[inline]
    pub fn new(mins: Point<Real>, maxs: Point<Real>) -> Aabb {
        Aabb { mins, maxs }
    }

    /// An empty box: `mins` at `Real::MAX` and `maxs` at `-Real::MAX`.
    ///
    /// Taking any point into it yields the box reduced to that point.
    #[inline]
    pub fn new_invalid() -> Self {
        Self::new(
            Vector::repeat(Real::MAX).into(),
            Vector::repeat(-Real::MAX).into(),
        )
    }

    /// A box centered on `center`, spanning `half_extents` on each side.
    #[inline]
    pub fn from_half_extents(center: Point<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// The smallest box containing every point of `pts`.
    ///
    /// Returns [`Aabb::new_invalid`] if `pts` is empty.
    pub fn from_points<I>(pts: I) -> Self
    where
        I: IntoIterator<Item = Point<Real>>,
    {
        let mut result = Self::new_invalid();
        for pt in pts {
            result.take_point(pt);
        }
        result
    }

    /// The center of this `Aabb`.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        na::center(&self.mins, &self.maxs)
    }

    /// The width, height and depth of this `Aabb`.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.maxs - self.mins
    }

    /// Grows this `Aabb` so it also contains `pt`.
    pub fn take_point(&mut self, pt: Point<Real>) {
        self.mins = self.mins.coords.inf(&pt.coords).into();
        self.maxs = self.maxs.coords.sup(&pt.coords).into();
    }

    /// This `Aabb` moved by `translation`.
    #[inline]
    #[must_use]
    pub fn translated(mut self, translation: &Vector<Real>) -> Self {
        self.mins += translation;
        self.maxs += translation;
        self
    }

    /// The box bounding `self` once its corners are multiplied component-wise by `scale`.
    ///
    /// Negative factors swap the matching components of `mins` and `maxs`.
    #[inline]
    #[must_use]
    pub fn scaled(self, scale: &Vector<Real>) -> Self {
        let a = self.mins.coords.component_mul(scale);
        let b = self.maxs.coords.component_mul(scale);
        Self {
            mins: a.inf(&b).into(),
            maxs: a.sup(&b).into(),
        }
    }

    /// Is `point` inside this `Aabb` or on its boundary?
    #[inline]
    pub fn contains_local_point(&self, point: &Point<Real>) -> bool {
        (0..3).all(|i| point[i] >= self.mins[i] && point[i] <= self.maxs[i])
    }
}

#[cfg(test)]
mod test {
    use super::Aabb;
    use crate::math::{Point, Vector};

    #[test]
    fn from_points_is_tight() {
        let aabb = Aabb::from_points([
            Point::new(1.0, 2.0, 3.0),
            Point::new(-1.0, 4.0, 2.0),
            Point::new(0.0, 0.0, 5.0),
        ]);
        assert_eq!(aabb.mins, Point::new(-1.0, 0.0, 2.0));
        assert_eq!(aabb.maxs, Point::new(1.0, 4.0, 5.0));
        assert_eq!(aabb.extents(), Vector::new(2.0, 4.0, 3.0));
    }

    #[test]
    fn negative_scale_keeps_mins_below_maxs() {
        let aabb = Aabb::new(Point::new(1.0, 1.0, 1.0), Point::new(2.0, 3.0, 4.0));
        let scaled = aabb.scaled(&Vector::new(-1.0, 2.0, 1.0));
        assert_eq!(scaled.mins, Point::new(-2.0, 2.0, 1.0));
        assert_eq!(scaled.maxs, Point::new(-1.0, 6.0, 4.0));
    }

    #[test]
    fn translated_box_contains_moved_points() {
        let aabb = Aabb::from_half_extents(Point::origin(), Vector::new(1.0, 2.0, 3.0))
            .translated(&Vector::new(3.0, 0.0, 0.0));
        assert_eq!(aabb.center(), Point::new(3.0, 0.0, 0.0));
        assert!(aabb.contains_local_point(&Point::new(4.0, -2.0, 3.0)));
        assert!(!aabb.contains_local_point(&Point::new(1.5, 0.0, 0.0)));
    }
}
