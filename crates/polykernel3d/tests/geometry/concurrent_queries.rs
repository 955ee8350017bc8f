use crate::meshes::{random_direction, random_mesh};
use polykernel3d::shape::{polyhedron_shape, SupportMap};
use std::thread;

#[test]
fn shapes_are_shared_between_threads() {
    let mut rng = oorandom::Rand32::new(5);
    let mesh = random_mesh(&mut rng, 200, 3.0);
    let shape = polyhedron_shape(&mesh).unwrap();
    let dirs: Vec<_> = (0..64).map(|_| random_direction(&mut rng)).collect();
    let expected: Vec<_> = dirs.iter().map(|d| shape.local_support_point(d)).collect();
    let bounds = mesh.bounds();

    thread::scope(|s| {
        for _ in 0..4 {
            let _ = s.spawn(|| {
                for (dir, expected) in dirs.iter().zip(&expected) {
                    assert_eq!(shape.local_support_point(dir), *expected);
                    assert_eq!(mesh.bounds(), bounds);
                }
            });
        }
    });
}
