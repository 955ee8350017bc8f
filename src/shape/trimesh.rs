//! Immutable triangle meshes and their geometric queries.

use crate::bounding_volume::{Aabb, BoundingSphere};
use crate::kernel::Kernel;
use crate::math::{Isometry, Matrix, Point, Real, Rotation, Translation, Vector};
use crate::query::{ray_triangle_intersection, Ray};
use crate::shape::planar_buffer::PlanarBuffer;
use crate::shape::{EditableMesh, MeshPrototype, SupportMap, Triangle};
use num::Zero;
use std::sync::Arc;

/// Error indicating that a triangle mesh could not be built from its buffers.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// A triangle mesh must contain at least one vertex.
    #[error("A triangle mesh must contain at least one vertex.")]
    EmptyVertices,
    /// A triangle mesh must contain at least one triangle.
    #[error("A triangle mesh must contain at least one triangle.")]
    EmptyTriangles,
    /// A triangle references a vertex that does not exist.
    #[error("Triangle {triangle} references the vertex {index}, but the mesh only has {vertex_count} vertices.")]
    IndexOutOfBounds {
        /// The offending triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        index: u32,
        /// The number of vertices of the mesh.
        vertex_count: usize,
    },
    /// A triangle references the same vertex more than once.
    #[error("Triangle {0} does not reference three distinct vertices.")]
    DegenerateTriangle(u32),
}

/// An immutable triangle mesh.
///
/// Vertices are stored in padded planar buffers so the support-function and
/// bounds queries can run on any [`Kernel`]. Every transformation returns a
/// new mesh that shares the triangle buffer of `self`.
#[derive(Clone, Debug)]
pub struct TriangleMesh {
    mesh: MeshPrototype,
}

impl TriangleMesh {
    /// Builds a triangle mesh from a vertex list and a triangle list.
    pub fn new(vertices: &[Point<Real>], triangles: &[Triangle]) -> Result<Self, MeshError> {
        let prototype = MeshPrototype {
            vertices: PlanarBuffer::from_triples(vertices.iter().map(|pt| [pt.x, pt.y, pt.z])),
            triangles: Arc::new(PlanarBuffer::from_triples(
                triangles.iter().map(|tri| tri.indices()),
            )),
        };

        Self::try_from(prototype)
    }

    /// Wraps buffers known to be valid, e.g., derived from another mesh.
    fn from_prototype_unchecked(mut mesh: MeshPrototype) -> Self {
        debug_assert_eq!(mesh.validate(), Ok(()));
        mesh.fix_padding();
        Self { mesh }
    }

    /// The number of vertices of this mesh.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.mesh.vertex_count()
    }

    /// The number of triangles of this mesh.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }

    /// The `i`-th vertex.
    ///
    /// # Panics
    /// If `i >= self.vertex_count()`.
    #[inline]
    pub fn vertex(&self, i: usize) -> Point<Real> {
        self.mesh.vertex(i)
    }

    /// The `i`-th triangle.
    ///
    /// # Panics
    /// If `i >= self.triangle_count()`.
    #[inline]
    pub fn triangle(&self, i: usize) -> Triangle {
        self.mesh.triangle(i)
    }

    /// Iterates through the vertices of this mesh.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = Point<Real>> + '_ {
        self.mesh.vertices.iter().map(Point::from)
    }

    /// Iterates through the triangles of this mesh.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        self.mesh.triangles.iter().map(Triangle::from)
    }

    /// Copies the vertices of this mesh into a `Vec`.
    pub fn to_vertex_vec(&self) -> Vec<Point<Real>> {
        self.vertices().collect()
    }

    /// Copies the triangles of this mesh into a `Vec`.
    pub fn to_triangle_vec(&self) -> Vec<Triangle> {
        self.triangles().collect()
    }

    /// One unit normal per vertex: the area-weighted average of the normals of
    /// the triangles sharing it.
    ///
    /// Vertices not referenced by any triangle get a zero normal.
    pub fn vertex_normals(&self) -> Vec<Vector<Real>> {
        let mut normals = vec![Vector::zeros(); self.vertex_count()];

        for i in 0..self.triangle_count() {
            let normal = self.triangle_normal(i);
            for id in self.triangle(i).indices() {
                normals[id as usize] += normal;
            }
        }

        for normal in &mut normals {
            *normal = normal.try_normalize(Real::EPSILON).unwrap_or_else(Vector::zeros);
        }

        normals
    }

    /// The raw buffers of this mesh.
    #[inline]
    pub fn as_prototype(&self) -> &MeshPrototype {
        &self.mesh
    }

    /// The three vertices of the `i`-th triangle.
    #[inline]
    pub fn triangle_vertices(&self, i: usize) -> [Point<Real>; 3] {
        self.triangle(i).indices().map(|id| self.vertex(id as usize))
    }

    /// The unnormalized normal `(b - a) × (c - a)` of the `i`-th triangle.
    ///
    /// Its norm is twice the area of the triangle.
    pub fn triangle_normal(&self, i: usize) -> Vector<Real> {
        let [a, b, c] = self.triangle_vertices(i);
        (b - a).cross(&(c - a))
    }

    /// The volume enclosed by this mesh.
    ///
    /// Only meaningful for closed meshes. The result is negative if the
    /// triangles are wound clockwise when seen from outside.
    pub fn volume(&self) -> Real {
        (0..self.triangle_count())
            .map(|i| {
                let [a, b, c] = self.triangle_vertices(i);
                a.coords.dot(&b.coords.cross(&c.coords))
            })
            .sum::<Real>()
            / 6.0
    }

    /// The center of mass of the solid enclosed by this mesh, assuming a uniform density.
    ///
    /// Falls back to the center of the bounds for meshes enclosing no volume.
    pub fn center_of_mass(&self) -> Point<Real> {
        let mut volume = 0.0;
        let mut moment = Vector::zeros();

        for i in 0..self.triangle_count() {
            let [a, b, c] = self.triangle_vertices(i);
            let tet_volume = a.coords.dot(&b.coords.cross(&c.coords));
            volume += tet_volume;
            moment += (a.coords + b.coords + c.coords) * tet_volume;
        }

        if volume.abs() <= Real::EPSILON {
            return self.bounds().center();
        }

        Point::from(moment / (4.0 * volume))
    }

    /// The inertia tensor of the solid enclosed by this mesh, relative to `reference`.
    ///
    /// The density is 1, so the mass equals [`Self::volume`]. The axes are the
    /// axes of the space of the mesh.
    pub fn inertia_tensor_about(&self, reference: &Point<Real>) -> Matrix<Real> {
        let mut covariance = Matrix::zero();

        // Each triangle spans a tetrahedron with apex `reference`. Its second
        // moment is `V / 20 * (Σ qᵢqᵢᵀ + s sᵀ)` with `s = Σ qᵢ`.
        for i in 0..self.triangle_count() {
            let [a, b, c] = self.triangle_vertices(i).map(|pt| pt - reference);
            let tet_volume = a.dot(&b.cross(&c)) / 6.0;
            let s = a + b + c;
            covariance += (a * a.transpose() + b * b.transpose() + c * c.transpose()
                + s * s.transpose())
                * (tet_volume / 20.0);
        }

        Matrix::from_diagonal_element(covariance.trace()) - covariance
    }

    /// The inertia tensor of the solid enclosed by this mesh, relative to its center of mass.
    pub fn inertia_tensor(&self) -> Matrix<Real> {
        self.inertia_tensor_about(&self.center_of_mass())
    }

    /// The inertia tensor relative to the origin of `frame`, expressed in the axes of `frame`.
    pub fn inertia_tensor_in_frame(&self, frame: &Isometry<Real>) -> Matrix<Real> {
        let rotation = frame.rotation.to_rotation_matrix().into_inner();
        let inertia = self.inertia_tensor_about(&Point::from(frame.translation.vector));
        rotation.transpose() * inertia * rotation
    }

    /// The principal moments of inertia, and the frame in which the inertia
    /// tensor is diagonal.
    ///
    /// The frame is centered on the center of mass and its axes are the
    /// principal axes, in the order of the returned moments.
    pub fn principal_inertia(&self) -> (Vector<Real>, Isometry<Real>) {
        let center = self.center_of_mass();
        let eigen = self.inertia_tensor_about(&center).symmetric_eigen();
        let mut axes = eigen.eigenvectors;

        if axes.determinant() < 0.0 {
            axes.column_mut(2).neg_mut();
        }

        let rotation =
            Rotation::from_rotation_matrix(&na::Rotation3::from_matrix_unchecked(axes));
        let frame = Isometry::from_parts(Translation::from(center.coords), rotation);
        (eigen.eigenvalues, frame)
    }

    /*
     * Transformations.
     */
    fn map_vertices(&self, f: impl Fn(Point<Real>) -> Point<Real>) -> Self {
        let mut result =
            EditableMesh::with_topology(self.vertex_count(), self.mesh.triangles.clone());

        for (i, pt) in self.vertices().enumerate() {
            result.set_vertex(i, &f(pt));
        }

        Self::from_prototype_unchecked(result.into_prototype())
    }

    /// This mesh with every vertex translated by `offset`.
    pub fn translated(&self, offset: &Vector<Real>) -> Self {
        self.map_vertices(|pt| pt + offset)
    }

    /// This mesh with every vertex rotated by `rotation` around the origin.
    pub fn rotated(&self, rotation: &Rotation<Real>) -> Self {
        self.map_vertices(|pt| rotation * pt)
    }

    /// Maps this mesh, expressed in the local space of `frame`, to the global space.
    pub fn local_to_global(&self, frame: &Isometry<Real>) -> Self {
        self.map_vertices(|pt| frame * pt)
    }

    /// Maps this mesh, expressed in the global space, to the local space of `frame`.
    pub fn global_to_local(&self, frame: &Isometry<Real>) -> Self {
        self.map_vertices(|pt| frame.inverse_transform_point(&pt))
    }

    /// This mesh scaled by `sx`, `sy`, `sz` along the coordinate axes.
    pub fn scaled(&self, sx: Real, sy: Real, sz: Real) -> Self {
        self.scaled_by(&Vector::new(sx, sy, sz))
    }

    /// This mesh with every vertex multiplied by the diagonal matrix `scale`.
    pub fn scaled_by(&self, scale: &Vector<Real>) -> Self {
        self.map_vertices(|pt| pt.coords.component_mul(scale).into())
    }

    /// This mesh with every vertex `v` replaced by `scale ⊙ (v + offset)`.
    pub fn translated_and_scaled(&self, offset: &Vector<Real>, scale: &Vector<Real>) -> Self {
        self.map_vertices(|pt| (pt.coords + offset).component_mul(scale).into())
    }

    /*
     * Support function and bounds.
     */
    /// Index of the vertex maximizing its dot product with `dir`.
    ///
    /// When several vertices tie, any of them may be returned.
    #[inline]
    pub fn furthest_index_in_direction(&self, dir: &Vector<Real>) -> usize {
        self.furthest_index_in_direction_with(Kernel::best(), dir)
    }

    /// Same as [`Self::furthest_index_in_direction`], computed by the given kernel.
    #[inline]
    pub fn furthest_index_in_direction_with(&self, kernel: Kernel, dir: &Vector<Real>) -> usize {
        kernel.furthest_index(&self.mesh.vertices, dir)
    }

    /// The vertex maximizing its dot product with `dir`.
    #[inline]
    pub fn furthest_in_direction(&self, dir: &Vector<Real>) -> Point<Real> {
        self.furthest_in_direction_with(Kernel::best(), dir)
    }

    /// Same as [`Self::furthest_in_direction`], computed by the given kernel.
    #[inline]
    pub fn furthest_in_direction_with(&self, kernel: Kernel, dir: &Vector<Real>) -> Point<Real> {
        self.vertex(self.furthest_index_in_direction_with(kernel, dir))
    }

    /// The smallest axis-aligned box containing every vertex.
    #[inline]
    pub fn bounds(&self) -> Aabb {
        self.bounds_with(Kernel::best())
    }

    /// Same as [`Self::bounds`], computed by the given kernel.
    #[inline]
    pub fn bounds_with(&self, kernel: Kernel) -> Aabb {
        kernel.bounds(&self.mesh.vertices)
    }

    /// The bounds of this mesh along the three rows of `frame`.
    ///
    /// For a rotation matrix `frame`, this is the axis-aligned bounding box of
    /// the mesh rotated by `frame`, computed without building the rotated mesh.
    #[inline]
    pub fn bounds_in_frame(&self, frame: &Matrix<Real>) -> Aabb {
        self.bounds_in_frame_with(Kernel::best(), frame)
    }

    /// Same as [`Self::bounds_in_frame`], computed by the given kernel.
    #[inline]
    pub fn bounds_in_frame_with(&self, kernel: Kernel, frame: &Matrix<Real>) -> Aabb {
        kernel.bounds_in_frame(&self.mesh.vertices, frame)
    }

    /// The axis-aligned bounding box of this mesh placed at `pos`.
    pub fn aabb(&self, pos: &Isometry<Real>) -> Aabb {
        let rotation = pos.rotation.to_rotation_matrix().into_inner();
        self.bounds_in_frame(&rotation)
            .translated(&pos.translation.vector)
    }

    /// The largest squared distance between `reference` and a vertex
    /// multiplied component-wise by `scale`, computed by the given kernel.
    #[inline]
    pub fn max_radius_sq_with(
        &self,
        kernel: Kernel,
        reference: &Point<Real>,
        scale: &Vector<Real>,
    ) -> Real {
        kernel.max_radius_sq(&self.mesh.vertices, reference, scale)
    }

    /// The largest squared distance between the origin and a vertex.
    #[inline]
    pub fn max_radius_sq(&self) -> Real {
        self.max_radius_sq_from(&Point::origin())
    }

    /// The largest distance between the origin and a vertex.
    #[inline]
    pub fn max_radius(&self) -> Real {
        self.max_radius_sq().sqrt()
    }

    /// The largest squared distance between `reference` and a vertex.
    #[inline]
    pub fn max_radius_sq_from(&self, reference: &Point<Real>) -> Real {
        self.max_radius_sq_with(Kernel::best(), reference, &Vector::repeat(1.0))
    }

    /// The largest distance between `reference` and a vertex.
    #[inline]
    pub fn max_radius_from(&self, reference: &Point<Real>) -> Real {
        self.max_radius_sq_from(reference).sqrt()
    }

    /// The largest squared norm of a vertex scaled component-wise by `scale`.
    #[inline]
    pub fn scaled_max_radius_sq(&self, scale: &Vector<Real>) -> Real {
        self.max_radius_sq_with(Kernel::best(), &Point::origin(), scale)
    }

    /// The largest norm of a vertex scaled component-wise by `scale`.
    #[inline]
    pub fn scaled_max_radius(&self, scale: &Vector<Real>) -> Real {
        self.scaled_max_radius_sq(scale).sqrt()
    }

    /// A sphere containing every vertex.
    ///
    /// Its center is the center of [`Self::bounds`], so this is generally not
    /// the smallest enclosing sphere.
    pub fn circumscribing_sphere(&self) -> BoundingSphere {
        let center = self.bounds().center();
        BoundingSphere::new(center, self.max_radius_from(&center))
    }

    /*
     * Ray casting.
     */
    /// The smallest parameter at which `ray` hits a triangle of this mesh,
    /// or `Real::INFINITY` if it hits none.
    pub fn intersection_distance(&self, ray: &Ray) -> Real {
        (0..self.triangle_count())
            .filter_map(|i| {
                let [a, b, c] = self.triangle_vertices(i);
                ray_triangle_intersection(&a, &b, &c, ray)
            })
            .fold(Real::INFINITY, Real::min)
    }

    /// The smallest parameter at which `ray` hits a triangle of this mesh, if any.
    pub fn cast_ray(&self, ray: &Ray) -> Option<Real> {
        let toi = self.intersection_distance(ray);
        (toi != Real::INFINITY).then_some(toi)
    }

    /// Is `point` inside the solid enclosed by this mesh?
    ///
    /// Counts the triangles crossed by a ray leaving `point`: the point is
    /// inside if that count is odd. Only meaningful for closed meshes.
    pub fn contains_point(&self, point: &Point<Real>) -> bool {
        if !self.bounds().contains_local_point(point) {
            return false;
        }

        // Skewed so it does not graze the edges of axis-aligned meshes.
        let ray = Ray::new(*point, Vector::new(0.455_213, 0.785_301, 0.419_652));
        let crossings = (0..self.triangle_count())
            .filter(|i| {
                let [a, b, c] = self.triangle_vertices(*i);
                ray_triangle_intersection(&a, &b, &c, &ray).is_some()
            })
            .count();

        crossings % 2 == 1
    }
}

impl TryFrom<MeshPrototype> for TriangleMesh {
    type Error = MeshError;

    fn try_from(mut mesh: MeshPrototype) -> Result<Self, MeshError> {
        mesh.validate()?;
        mesh.fix_padding();
        Ok(Self { mesh })
    }
}

impl TryFrom<EditableMesh> for TriangleMesh {
    type Error = MeshError;

    fn try_from(mesh: EditableMesh) -> Result<Self, MeshError> {
        Self::try_from(mesh.into_prototype())
    }
}

impl SupportMap for TriangleMesh {
    #[inline]
    fn local_support_point(&self, dir: &Vector<Real>) -> Point<Real> {
        self.furthest_in_direction(dir)
    }
}
