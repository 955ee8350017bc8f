//! Normalized geometry shared by every [`Shape`](crate::shape::Shape) of the same kind.

use crate::bounding_volume::Aabb;
use crate::math::{Matrix, Point, Real, Vector};
use crate::query::{Ray, RAY_EPSILON};
use crate::shape::PolyhedronClass;
use na::Unit;
use std::f32::consts::PI;
use std::fmt::Debug;
use std::sync::{Arc, OnceLock};

/// The geometry of a family of shapes, expressed in a canonical space where it
/// fits the box `[-1, 1]³`.
///
/// A class never knows the true dimensions of the shapes using it: a
/// [`Shape`](crate::shape::Shape) pairs a class with the scale mapping the
/// canonical space to its actual extents.
pub trait ShapeClass: Debug + Send + Sync {
    /// The point of this class maximizing its dot product with `dir`.
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real>;

    /// The bounds of this class along the three rows of `frame`.
    ///
    /// The default implementation evaluates the support function in the
    /// directions of each row and of its opposite.
    fn bounds_in_frame(&self, frame: &Matrix<Real>) -> Aabb {
        let mut mins = Point::origin();
        let mut maxs = Point::origin();

        for i in 0..3 {
            let axis = frame.row(i).transpose();
            maxs[i] = self.local_support_point(&axis).coords.dot(&axis);
            mins[i] = self.local_support_point(&-axis).coords.dot(&axis);
        }

        Aabb::new(mins, maxs)
    }

    /// The axis-aligned bounds of this class.
    fn local_bounds(&self) -> Aabb {
        self.bounds_in_frame(&Matrix::identity())
    }

    /// The largest norm of a point of this class, scaled component-wise by `scale`.
    fn scaled_max_radius(&self, scale: &Vector<Real>) -> Real;

    /// The smallest parameter at which `ray` hits the boundary of this class,
    /// or `Real::INFINITY` if it hits none.
    fn intersection_distance(&self, ray: &Ray) -> Real;

    /// The volume of this class.
    fn volume(&self) -> Real;

    /// This class as a polyhedron, if it is one.
    fn as_polyhedron(&self) -> Option<&PolyhedronClass> {
        None
    }
}

/// Smallest root of `a t² + 2 b t + c` greater than [`RAY_EPSILON`].
fn smallest_positive_root(a: Real, b: Real, c: Real) -> Option<Real> {
    let discr = b * b - a * c;

    if a == 0.0 || discr < 0.0 {
        return None;
    }

    let sqrt_discr = discr.sqrt();
    [(-b - sqrt_discr) / a, (-b + sqrt_discr) / a]
        .into_iter()
        .filter(|t| *t > RAY_EPSILON)
        .reduce(Real::min)
}

/// The unit sphere.
#[derive(Copy, Clone, Debug, Default)]
pub struct SphereClass;

impl SphereClass {
    /// The process-wide instance of this class.
    pub fn shared() -> Arc<dyn ShapeClass> {
        static CLASS: OnceLock<Arc<dyn ShapeClass>> = OnceLock::new();
        CLASS.get_or_init(|| Arc::new(SphereClass)).clone()
    }
}

impl ShapeClass for SphereClass {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        Unit::try_new(*dir, 0.0)
            .map(|dir| Point::from(dir.into_inner()))
            .unwrap_or_else(Point::origin)
    }

    fn bounds_in_frame(&self, frame: &Matrix<Real>) -> Aabb {
        let half_extents = Vector::from_fn(|i, _| frame.row(i).norm());
        Aabb::from_half_extents(Point::origin(), half_extents)
    }

    fn scaled_max_radius(&self, scale: &Vector<Real>) -> Real {
        scale.abs().max()
    }

    fn intersection_distance(&self, ray: &Ray) -> Real {
        let a = ray.dir.norm_squared();
        let b = ray.origin.coords.dot(&ray.dir);
        let c = ray.origin.coords.norm_squared() - 1.0;
        smallest_positive_root(a, b, c).unwrap_or(Real::INFINITY)
    }

    fn volume(&self) -> Real {
        4.0 / 3.0 * PI
    }
}

/// The cylinder of radius 1 and half-height 1, with its principal axis aligned with `z`.
#[derive(Copy, Clone, Debug, Default)]
pub struct CylinderClass;

impl CylinderClass {
    /// The process-wide instance of this class.
    pub fn shared() -> Arc<dyn ShapeClass> {
        static CLASS: OnceLock<Arc<dyn ShapeClass>> = OnceLock::new();
        CLASS.get_or_init(|| Arc::new(CylinderClass)).clone()
    }
}

impl ShapeClass for CylinderClass {
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        let mut vres = *dir;

        vres.z = 0.0;

        if vres.try_normalize_mut(0.0).is_none() {
            vres = Vector::zeros();
        }

        vres.z = (1.0 as Real).copysign(dir.z);

        Point::from(vres)
    }

    fn bounds_in_frame(&self, frame: &Matrix<Real>) -> Aabb {
        let half_extents = Vector::from_fn(|i, _| {
            let row = frame.row(i);
            row[0].hypot(row[1]) + row[2].abs()
        });
        Aabb::from_half_extents(Point::origin(), half_extents)
    }

    fn scaled_max_radius(&self, scale: &Vector<Real>) -> Real {
        (scale.x.abs().max(scale.y.abs()).powi(2) + scale.z * scale.z).sqrt()
    }

    fn intersection_distance(&self, ray: &Ray) -> Real {
        let (o, d) = (ray.origin, ray.dir);

        // Lateral surface, restricted to |z| <= 1.
        let lateral = smallest_positive_root(
            d.x * d.x + d.y * d.y,
            o.x * d.x + o.y * d.y,
            o.x * o.x + o.y * o.y - 1.0,
        )
        .filter(|t| (o.z + d.z * t).abs() <= 1.0);

        // Caps, restricted to the unit disk.
        let caps = [-1.0, 1.0].into_iter().filter_map(|z: Real| {
            if d.z == 0.0 {
                return None;
            }

            let t = (z - o.z) / d.z;
            let hit = ray.point_at(t);
            (t > RAY_EPSILON && hit.x * hit.x + hit.y * hit.y <= 1.0).then_some(t)
        });

        lateral
            .into_iter()
            .chain(caps)
            .fold(Real::INFINITY, Real::min)
    }

    fn volume(&self) -> Real {
        2.0 * PI
    }
}

/// The box `[-1, 1]³`.
#[derive(Copy, Clone, Debug, Default)]
pub struct BoxClass;

impl BoxClass {
    /// The process-wide instance of this class.
    pub fn shared() -> Arc<dyn ShapeClass> {
        static CLASS: OnceLock<Arc<dyn ShapeClass>> = OnceLock::new();
        CLASS.get_or_init(|| Arc::new(BoxClass)).clone()
    }
}

impl ShapeClass for BoxClass {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        Point::from(dir.map(|x| (1.0 as Real).copysign(x)))
    }

    fn bounds_in_frame(&self, frame: &Matrix<Real>) -> Aabb {
        Aabb::from_half_extents(Point::origin(), frame.abs() * Vector::repeat(1.0))
    }

    fn scaled_max_radius(&self, scale: &Vector<Real>) -> Real {
        scale.norm()
    }

    fn intersection_distance(&self, ray: &Ray) -> Real {
        let mut tmin = Real::NEG_INFINITY;
        let mut tmax = Real::INFINITY;

        for i in 0..3 {
            if ray.dir[i] == 0.0 {
                if ray.origin[i].abs() > 1.0 {
                    return Real::INFINITY;
                }
                continue;
            }

            let denom = 1.0 / ray.dir[i];
            let t1 = (-1.0 - ray.origin[i]) * denom;
            let t2 = (1.0 - ray.origin[i]) * denom;
            tmin = tmin.max(t1.min(t2));
            tmax = tmax.min(t1.max(t2));

            if tmin > tmax {
                return Real::INFINITY;
            }
        }

        if tmin > RAY_EPSILON {
            tmin
        } else if tmax > RAY_EPSILON {
            tmax
        } else {
            Real::INFINITY
        }
    }

    fn volume(&self) -> Real {
        8.0
    }
}
