use crate::meshes::{random_direction, random_mesh};
use polykernel3d::kernel::Kernel;
use polykernel3d::math::{Isometry, Vector};
use polykernel3d::shape::SupportMap;

#[test]
fn support_is_maximal_on_every_kernel() {
    let mut rng = oorandom::Rand32::new(1234);

    // Sizes that are, and are not, multiples of the padding width.
    for len in [3, 4, 5, 8, 9, 12, 16, 23, 24, 57, 128, 301] {
        let mesh = random_mesh(&mut rng, len, 10.0);

        for _ in 0..20 {
            let dir = random_direction(&mut rng);

            for kernel in Kernel::available() {
                let id = mesh.furthest_index_in_direction_with(kernel, &dir);
                assert!(id < mesh.vertex_count());

                let best = mesh.vertex(id).coords.dot(&dir);
                for pt in mesh.vertices() {
                    assert!(
                        best >= pt.coords.dot(&dir) - 1.0e-4,
                        "{:?} kernel, {len} vertices: support is not maximal",
                        kernel.kind()
                    );
                }
            }
        }
    }
}

#[test]
fn placed_support_point() {
    let mut rng = oorandom::Rand32::new(99);
    let mesh = random_mesh(&mut rng, 30, 1.0);
    let pos = Isometry::new(Vector::new(5.0, 0.0, 0.0), Vector::new(0.0, 0.0, 1.0));
    let dir = Vector::new(0.3, -0.4, 1.0);

    let support = mesh.support_point(&pos, &dir);
    let best = support.coords.dot(&dir);
    for pt in mesh.vertices() {
        assert!(best >= (pos * pt).coords.dot(&dir) - 1.0e-4);
    }
}
