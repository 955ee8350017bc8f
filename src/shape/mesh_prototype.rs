//! Raw mesh storage and its validated mutation view.

use crate::math::{Point, Real};
use crate::shape::planar_buffer::PlanarBuffer;
use crate::shape::{MeshError, Triangle};
use std::ops::Deref;
use std::sync::Arc;

/// Planar vertex and triangle buffers of a mesh, without any geometric logic.
///
/// The triangle buffer is reference-counted so meshes derived from each other
/// by vertex transforms share one topology. Writes go through copy-on-write,
/// which makes `clone` behave as a deep copy.
#[derive(Clone, Debug, Default)]
pub struct MeshPrototype {
    pub(crate) vertices: PlanarBuffer<Real>,
    pub(crate) triangles: Arc<PlanarBuffer<u32>>,
}

impl MeshPrototype {
    /// Allocates zero-initialized buffers for `vertex_count` vertices and `triangle_count` triangles.
    pub fn new(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: PlanarBuffer::new(vertex_count),
            triangles: Arc::new(PlanarBuffer::new(triangle_count)),
        }
    }

    /// Allocates a vertex buffer for `vertex_count` vertices, reusing an existing topology.
    pub(crate) fn with_topology(vertex_count: usize, triangles: Arc<PlanarBuffer<u32>>) -> Self {
        Self {
            vertices: PlanarBuffer::new(vertex_count),
            triangles,
        }
    }

    /// The number of vertices of this mesh.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// The number of triangles of this mesh.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// The `i`-th vertex.
    ///
    /// # Panics
    /// If `i >= self.vertex_count()`.
    #[inline]
    pub fn vertex(&self, i: usize) -> Point<Real> {
        Point::from(self.vertices.get(i))
    }

    /// The `i`-th triangle.
    ///
    /// # Panics
    /// If `i >= self.triangle_count()`.
    #[inline]
    pub fn triangle(&self, i: usize) -> Triangle {
        Triangle::from(self.triangles.get(i))
    }

    /// Do `self` and `other` share the same triangle buffer?
    #[inline]
    pub fn shares_topology_with(&self, other: &MeshPrototype) -> bool {
        Arc::ptr_eq(&self.triangles, &other.triangles)
    }

    /// Checks that this prototype describes a valid triangle mesh.
    ///
    /// The mesh must have at least one vertex and one triangle, and every
    /// triangle must reference three distinct existing vertices.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.vertex_count() == 0 {
            return Err(MeshError::EmptyVertices);
        }

        if self.triangle_count() == 0 {
            return Err(MeshError::EmptyTriangles);
        }

        for (i, idx) in self.triangles.iter().enumerate() {
            if let Some(bad) = idx.iter().find(|id| **id as usize >= self.vertex_count()) {
                return Err(MeshError::IndexOutOfBounds {
                    triangle: i as u32,
                    index: *bad,
                    vertex_count: self.vertex_count(),
                });
            }

            if Triangle::from(idx).is_degenerate() {
                return Err(MeshError::DegenerateTriangle(i as u32));
            }
        }

        Ok(())
    }

    /// Replicates the last vertex and triangle into the padding lanes.
    pub(crate) fn fix_padding(&mut self) {
        self.vertices.fix_padding();
        if !self.triangles.is_padding_consistent() {
            Arc::make_mut(&mut self.triangles).fix_padding();
        }
    }
}

/// A mesh that can be written to.
///
/// Every write is checked before it is committed: writing out of bounds or
/// writing a triangle that does not reference three distinct existing vertices
/// is a programming error and panics.
#[derive(Clone, Debug, Default)]
pub struct EditableMesh(MeshPrototype);

impl EditableMesh {
    /// Allocates a zero-initialized mesh for `vertex_count` vertices and `triangle_count` triangles.
    pub fn new(vertex_count: usize, triangle_count: usize) -> Self {
        Self(MeshPrototype::new(vertex_count, triangle_count))
    }

    /// An editable mesh with `vertex_count` zeroed vertices and the given, shared, topology.
    pub(crate) fn with_topology(vertex_count: usize, triangles: Arc<PlanarBuffer<u32>>) -> Self {
        Self(MeshPrototype::with_topology(vertex_count, triangles))
    }

    /// Creates an editable mesh from a vertex list and a triangle list.
    ///
    /// # Panics
    /// If a triangle references a vertex that does not exist or is degenerate.
    pub fn from_parts(vertices: &[Point<Real>], triangles: &[Triangle]) -> Self {
        let mut result = Self::new(vertices.len(), triangles.len());

        for (i, pt) in vertices.iter().enumerate() {
            result.set_vertex(i, pt);
        }

        for (i, tri) in triangles.iter().enumerate() {
            result.set_triangle(i, *tri);
        }

        result
    }

    /// Overwrites the `i`-th vertex.
    ///
    /// # Panics
    /// If `i >= self.vertex_count()`.
    #[inline]
    pub fn set_vertex(&mut self, i: usize, vertex: &Point<Real>) {
        self.0.vertices.set(i, [vertex.x, vertex.y, vertex.z]);
    }

    /// Overwrites the `i`-th triangle.
    ///
    /// # Panics
    /// If `i >= self.triangle_count()`, or if `triangle` does not reference
    /// three distinct vertices of this mesh.
    pub fn set_triangle(&mut self, i: usize, triangle: Triangle) {
        assert!(
            i < self.triangle_count(),
            "triangle index out of bounds: {i} >= {}",
            self.triangle_count()
        );
        assert!(
            triangle.is_valid_for(self.vertex_count()),
            "invalid triangle {triangle:?} for a mesh with {} vertices",
            self.vertex_count()
        );

        Arc::make_mut(&mut self.0.triangles).set(i, triangle.indices());
    }

    /// Unwraps the underlying prototype.
    #[inline]
    pub fn into_prototype(self) -> MeshPrototype {
        self.0
    }
}

impl Deref for EditableMesh {
    type Target = MeshPrototype;

    #[inline]
    fn deref(&self) -> &MeshPrototype {
        &self.0
    }
}

impl From<MeshPrototype> for EditableMesh {
    #[inline]
    fn from(prototype: MeshPrototype) -> Self {
        Self(prototype)
    }
}

impl From<EditableMesh> for MeshPrototype {
    #[inline]
    fn from(mesh: EditableMesh) -> Self {
        mesh.0
    }
}
