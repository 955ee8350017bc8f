use polykernel3d::math::{Point, Real, Vector};
use polykernel3d::shape::{Triangle, TriangleMesh};

pub fn unit_cube() -> TriangleMesh {
    let vertices = [
        Point::new(-0.5, -0.5, -0.5),
        Point::new(0.5, -0.5, -0.5),
        Point::new(0.5, 0.5, -0.5),
        Point::new(-0.5, 0.5, -0.5),
        Point::new(-0.5, -0.5, 0.5),
        Point::new(0.5, -0.5, 0.5),
        Point::new(0.5, 0.5, 0.5),
        Point::new(-0.5, 0.5, 0.5),
    ];
    let triangles = [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ]
    .map(Triangle::from);

    TriangleMesh::new(&vertices, &triangles).unwrap()
}

/// A strip of triangles over `len` random vertices in `[-extent, extent]³`.
pub fn random_mesh(rng: &mut oorandom::Rand32, len: usize, extent: Real) -> TriangleMesh {
    let vertices: Vec<_> = (0..len)
        .map(|_| {
            Point::new(
                (rng.rand_float() * 2.0 - 1.0) * extent,
                (rng.rand_float() * 2.0 - 1.0) * extent,
                (rng.rand_float() * 2.0 - 1.0) * extent,
            )
        })
        .collect();
    let triangles: Vec<_> = (0..len as u32 - 2)
        .map(|i| Triangle::new(i, i + 1, i + 2))
        .collect();

    TriangleMesh::new(&vertices, &triangles).unwrap()
}

pub fn random_direction(rng: &mut oorandom::Rand32) -> Vector<Real> {
    Vector::new(
        rng.rand_float() * 2.0 - 1.0,
        rng.rand_float() * 2.0 - 1.0,
        rng.rand_float() * 2.0 - 1.0,
    )
}
