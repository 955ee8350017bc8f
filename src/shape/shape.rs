//! A shape: a shared class stretched to its extents.

use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Matrix, Point, Real, Vector};
use crate::query::Ray;
use crate::shape::{ShapeClass, SupportMap};
use std::sync::Arc;

/// A shape: a reference-counted [`ShapeClass`] stretched to its actual extents.
///
/// The class describes the geometry in the canonical box `[-1, 1]³`; the
/// shape maps it to true dimensions with the diagonal scale `extents / 2`.
/// Cloning a `Shape` only increments the reference count of its class.
#[derive(Clone, Debug)]
pub struct Shape {
    class: Arc<dyn ShapeClass>,
    extents: Vector<Real>,
}

impl Shape {
    /// Creates a shape with the given class and dimensions.
    pub fn new(class: Arc<dyn ShapeClass>, extents: Vector<Real>) -> Self {
        Self { class, extents }
    }

    /// The class of this shape.
    #[inline]
    pub fn class(&self) -> &dyn ShapeClass {
        &*self.class
    }

    /// The width, height and depth of this shape.
    #[inline]
    pub fn extents(&self) -> Vector<Real> {
        self.extents
    }

    /// The scale mapping the canonical space of the class to this shape.
    #[inline]
    pub fn scale(&self) -> Vector<Real> {
        self.extents / 2.0
    }

    /// A shape of the same class with different extents.
    pub fn with_extents(&self, extents: Vector<Real>) -> Self {
        Self::new(self.class.clone(), extents)
    }

    /// A shape of the same class, with its extents multiplied by `sx`, `sy`, `sz`.
    pub fn scaled(&self, sx: Real, sy: Real, sz: Real) -> Self {
        self.with_extents(self.extents.component_mul(&Vector::new(sx, sy, sz)))
    }

    /// Do `self` and `other` have the same class instance?
    #[inline]
    pub fn shares_class_with(&self, other: &Shape) -> bool {
        Arc::ptr_eq(&self.class, &other.class)
    }

    /// The axis-aligned bounds of this shape.
    pub fn local_bounds(&self) -> Aabb {
        self.class.local_bounds().scaled(&self.scale())
    }

    /// The bounds of this shape along the three rows of `frame`.
    pub fn bounds_in_frame(&self, frame: &Matrix<Real>) -> Aabb {
        self.class
            .bounds_in_frame(&(frame * Matrix::from_diagonal(&self.scale())))
    }

    /// The axis-aligned bounding box of this shape placed at `pos`.
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        let rotation = pos.rotation.to_rotation_matrix().into_inner();
        self.bounds_in_frame(&rotation)
            .translated(&pos.translation.vector)
    }

    /// The largest distance between the origin and a point of this shape.
    pub fn max_radius(&self) -> Real {
        self.class.scaled_max_radius(&self.scale())
    }

    /// The smallest parameter at which `ray` hits this shape, or `Real::INFINITY`.
    ///
    /// Every extent must be non-zero.
    pub fn intersection_distance(&self, ray: &Ray) -> Real {
        self.class
            .intersection_distance(&ray.inverse_scale_by(&self.scale()))
    }

    /// The smallest parameter at which `ray` hits this shape, if any.
    pub fn cast_ray(&self, ray: &Ray) -> Option<Real> {
        let toi = self.intersection_distance(ray);
        (toi != Real::INFINITY).then_some(toi)
    }

    /// The volume of this shape.
    pub fn volume(&self) -> Real {
        self.class.volume() * self.scale().product()
    }
}

impl SupportMap for Shape {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let scale = self.scale();
        let local = self.class.local_support_point(&dir.component_mul(&scale));
        local.coords.component_mul(&scale).into()
    }
}

#[cfg(test)]
mod test {
    use crate::math::{Isometry, Point, Real, Vector};
    use crate::query::Ray;
    use crate::shape::{box_shape, cylinder_shape, sphere_shape, SupportMap};
    use approx::assert_relative_eq;

    #[test]
    fn box_shape_maps_the_canonical_box() {
        let shape = box_shape(2.0, 4.0, 6.0);
        assert_eq!(shape.scale(), Vector::new(1.0, 2.0, 3.0));
        assert_eq!(shape.local_bounds().maxs, Point::new(1.0, 2.0, 3.0));
        assert_eq!(
            shape.local_support_point(&Vector::new(-1.0, 1.0, -1.0)),
            Point::new(-1.0, 2.0, -3.0)
        );
        assert_relative_eq!(shape.volume(), 48.0);
        assert_relative_eq!(shape.max_radius(), Vector::<Real>::new(1.0, 2.0, 3.0).norm());
    }

    #[test]
    fn anisotropic_sphere_support() {
        // An ellipsoid with semi-axes 1, 2, 3: the support toward `d` is
        // `S² d / |S d|`.
        let shape = sphere_shape(1.0).scaled(1.0, 2.0, 3.0);
        let dir = Vector::new(1.0, 1.0, 1.0);
        let s = Vector::new(1.0, 2.0, 3.0);
        let expected = s.component_mul(&s).component_mul(&dir) / s.component_mul(&dir).norm();
        assert_relative_eq!(
            shape.local_support_point(&dir),
            Point::from(expected),
            epsilon = 1.0e-5
        );
    }

    #[test]
    fn rays_keep_their_parameter() {
        let shape = cylinder_shape(2.0, 10.0);
        let ray = Ray::new(Point::new(-10.0, 0.0, 0.0), Vector::new(2.0, 0.0, 0.0));
        assert_relative_eq!(shape.intersection_distance(&ray), 4.0);

        let down = Ray::new(Point::new(0.0, 1.0, 20.0), -Vector::z());
        assert_relative_eq!(shape.intersection_distance(&down), 15.0);
        assert_eq!(
            shape.cast_ray(&Ray::new(Point::new(0.0, 3.0, 20.0), -Vector::z())),
            None
        );
    }

    #[test]
    fn placed_aabb() {
        let shape = box_shape(2.0, 2.0, 4.0);
        let pos = Isometry::translation(1.0, 0.0, 0.0)
            * Isometry::rotation(Vector::y() * std::f32::consts::FRAC_PI_2);
        let aabb = shape.aabb(&pos);
        assert_relative_eq!(aabb.mins, Point::new(-1.0, -1.0, -1.0), epsilon = 1.0e-5);
        assert_relative_eq!(aabb.maxs, Point::new(3.0, 1.0, 1.0), epsilon = 1.0e-5);
    }

    #[test]
    fn derived_shapes_share_their_class() {
        let a = sphere_shape(1.0);
        let b = a.with_extents(Vector::new(1.0, 2.0, 3.0));
        let c = sphere_shape(5.0);
        let d = box_shape(1.0, 1.0, 1.0);
        assert!(a.shares_class_with(&b));
        assert!(a.shares_class_with(&c));
        assert!(!a.shares_class_with(&d));
    }
}
