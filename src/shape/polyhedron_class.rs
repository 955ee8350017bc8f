//! Shape class answering its queries with a triangle mesh.

use crate::bounding_volume::Aabb;
use crate::kernel::Kernel;
use crate::math::{Matrix, Point, Real, Vector};
use crate::query::Ray;
use crate::shape::{ShapeClass, TriangleMesh};

/// A shape class backed by a triangle mesh.
///
/// Every support, bounds and radius query is answered by the kernel chosen
/// when the class was built.
#[derive(Clone, Debug)]
pub struct PolyhedronClass {
    mesh: TriangleMesh,
    kernel: Kernel,
}

impl PolyhedronClass {
    /// Creates a class answering queries on `mesh` with `kernel`.
    ///
    /// The mesh is used as-is: normalizing it to the canonical box is up to
    /// the caller, see [`polyhedron_shape`](crate::shape::polyhedron_shape).
    pub fn new(mesh: TriangleMesh, kernel: Kernel) -> Self {
        log::debug!(
            "Building a polyhedron class with {} vertices and {} triangles on the {} kernel.",
            mesh.vertex_count(),
            mesh.triangle_count(),
            kernel.kind()
        );
        Self { mesh, kernel }
    }

    /// The mesh of this class.
    #[inline]
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// The kernel answering the queries of this class.
    #[inline]
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }
}

impl ShapeClass for PolyhedronClass {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.mesh.furthest_in_direction_with(self.kernel, dir)
    }

    #[inline]
    fn bounds_in_frame(&self, frame: &Matrix<Real>) -> Aabb {
        self.mesh.bounds_in_frame_with(self.kernel, frame)
    }

    #[inline]
    fn local_bounds(&self) -> Aabb {
        self.mesh.bounds_with(self.kernel)
    }

    fn scaled_max_radius(&self, scale: &Vector<Real>) -> Real {
        self.mesh
            .max_radius_sq_with(self.kernel, &Point::origin(), scale)
            .sqrt()
    }

    fn intersection_distance(&self, ray: &Ray) -> Real {
        self.mesh.intersection_distance(ray)
    }

    fn volume(&self) -> Real {
        self.mesh.volume()
    }

    fn as_polyhedron(&self) -> Option<&PolyhedronClass> {
        Some(self)
    }
}
