use crate::meshes::random_mesh;
use approx::assert_relative_eq;
use polykernel3d::bounding_volume::Aabb;
use polykernel3d::kernel::Kernel;
use polykernel3d::math::{Isometry, Real, Rotation, Vector};

#[test]
fn bounds_are_tight() {
    let mut rng = oorandom::Rand32::new(7);

    for len in [3, 8, 13, 64, 100] {
        let mesh = random_mesh(&mut rng, len, 3.0);

        for kernel in Kernel::available() {
            let bounds = mesh.bounds_with(kernel);

            // Every vertex is inside, and every face of the box touches a vertex.
            for i in 0..3 {
                assert!(mesh.vertices().all(|pt| pt[i] >= bounds.mins[i] && pt[i] <= bounds.maxs[i]));
                assert!(mesh.vertices().any(|pt| pt[i] == bounds.mins[i]));
                assert!(mesh.vertices().any(|pt| pt[i] == bounds.maxs[i]));
            }
        }
    }
}

#[test]
fn bounds_in_frame_match_rotated_mesh() {
    let mut rng = oorandom::Rand32::new(8);
    let mesh = random_mesh(&mut rng, 45, 2.0);
    let rotation = Rotation::<Real>::from_euler_angles(0.9, -0.3, 2.1);
    let expected = mesh.rotated(&rotation).bounds();

    for kernel in Kernel::available() {
        let bounds =
            mesh.bounds_in_frame_with(kernel, &rotation.to_rotation_matrix().into_inner());
        assert_relative_eq!(bounds.mins, expected.mins, epsilon = 1.0e-4);
        assert_relative_eq!(bounds.maxs, expected.maxs, epsilon = 1.0e-4);
    }
}

#[test]
fn world_aabb_contains_placed_vertices() {
    let mut rng = oorandom::Rand32::new(9);
    let mesh = random_mesh(&mut rng, 19, 1.0);
    let pos = Isometry::new(Vector::new(10.0, -4.0, 2.0), Vector::new(-0.5, 0.25, 1.5));
    let aabb = mesh.aabb(&pos);
    let expected = Aabb::from_points(mesh.vertices().map(|pt| pos * pt));

    assert_relative_eq!(aabb.mins, expected.mins, epsilon = 1.0e-4);
    assert_relative_eq!(aabb.maxs, expected.maxs, epsilon = 1.0e-4);
}

#[test]
fn circumscribing_sphere_contains_every_vertex() {
    let mut rng = oorandom::Rand32::new(10);
    let mesh = random_mesh(&mut rng, 77, 4.0);
    let sphere = mesh.circumscribing_sphere();

    assert_eq!(*sphere.center(), mesh.bounds().center());
    for pt in mesh.vertices() {
        assert!((pt - sphere.center()).norm() <= sphere.radius() + 1.0e-4);
    }
}
