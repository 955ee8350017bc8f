//! Factories building [`Shape`]s from their dimensions or from raw geometry.

use crate::kernel::Kernel;
use crate::math::{Point, Real, Vector};
use crate::shape::{
    BoxClass, CylinderClass, MeshError, PolyhedronClass, Shape, SphereClass, Triangle,
    TriangleMesh,
};
use std::sync::Arc;

/// Error indicating that a shape could not be built from its geometry.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq)]
pub enum ShapeError {
    /// The bounding box of the geometry has a zero or non-finite extent, so
    /// it cannot be scaled to the canonical box.
    #[error("The polyhedron has a zero or non-finite extent: {extents:?}.")]
    FlatPolyhedron {
        /// The extents of the bounding box of the geometry.
        extents: Vector<Real>,
    },
    /// The geometry does not describe a valid triangle mesh.
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// A sphere of the given radius.
pub fn sphere_shape(radius: Real) -> Shape {
    Shape::new(SphereClass::shared(), Vector::repeat(2.0 * radius))
}

/// A cylinder of the given radius and height, with its principal axis aligned with `z`.
pub fn cylinder_shape(radius: Real, height: Real) -> Shape {
    Shape::new(
        CylinderClass::shared(),
        Vector::new(2.0 * radius, 2.0 * radius, height),
    )
}

/// A box of the given width (along `x`), height (along `y`) and depth (along `z`).
pub fn box_shape(width: Real, height: Real, depth: Real) -> Shape {
    Shape::new(BoxClass::shared(), Vector::new(width, height, depth))
}

/// A polyhedron shape, answering queries with the best kernel of the running CPU.
///
/// See [`polyhedron_shape_with_kernel`].
pub fn polyhedron_shape(mesh: &TriangleMesh) -> Result<Shape, ShapeError> {
    polyhedron_shape_with_kernel(mesh, Kernel::best())
}

/// A polyhedron shape with the same dimensions as `mesh`.
///
/// The class stores a copy of `mesh` centered on the origin and scaled to the
/// canonical box `[-1, 1]³`; the returned shape carries the original extents.
/// The center offset is not kept: the shape is centered on the origin.
pub fn polyhedron_shape_with_kernel(
    mesh: &TriangleMesh,
    kernel: Kernel,
) -> Result<Shape, ShapeError> {
    let bounds = mesh.bounds_with(kernel);
    let extents = bounds.extents();

    if extents.iter().any(|e| !e.is_finite() || *e <= 0.0) {
        return Err(ShapeError::FlatPolyhedron { extents });
    }

    let scale = extents.map(|e| 2.0 / e);
    let normalized = mesh.translated_and_scaled(&-bounds.center().coords, &scale);
    let class = PolyhedronClass::new(normalized, kernel);

    Ok(Shape::new(Arc::new(class), extents))
}

/// A polyhedron shape built from a vertex list and a triangle list.
pub fn polyhedron_shape_from_parts(
    vertices: &[Point<Real>],
    triangles: &[Triangle],
) -> Result<Shape, ShapeError> {
    let mesh = TriangleMesh::new(vertices, triangles)?;
    polyhedron_shape(&mesh)
}
