//! Portable reductions, visiting the logical range of the buffer one vertex at a time.

use crate::bounding_volume::Aabb;
use crate::math::{Matrix, Point, Real, Vector};
use crate::shape::planar_buffer::PlanarBuffer;

#[inline]
fn points(vertices: &PlanarBuffer<Real>) -> impl Iterator<Item = Point<Real>> + '_ {
    vertices.iter().map(Point::from)
}

/// Computes the index of the support point of a planar cloud of points.
///
/// Ties are resolved in favor of the lowest index.
pub(crate) fn furthest_index(vertices: &PlanarBuffer<Real>, dir: &Vector<Real>) -> usize {
    let mut best_pt = 0;
    let mut best_dot = Real::NEG_INFINITY;

    for (i, p) in points(vertices).enumerate() {
        let dot = p.coords.dot(dir);

        if dot > best_dot {
            best_dot = dot;
            best_pt = i;
        }
    }

    best_pt
}

pub(crate) fn bounds(vertices: &PlanarBuffer<Real>) -> Aabb {
    Aabb::from_points(points(vertices))
}

pub(crate) fn bounds_in_frame(vertices: &PlanarBuffer<Real>, frame: &Matrix<Real>) -> Aabb {
    Aabb::from_points(points(vertices).map(|p| Point::from(frame * p.coords)))
}

pub(crate) fn max_radius_sq(
    vertices: &PlanarBuffer<Real>,
    reference: &Point<Real>,
    scale: &Vector<Real>,
) -> Real {
    points(vertices)
        .map(|p| (p - reference).component_mul(scale).norm_squared())
        .fold(0.0, Real::max)
}
