use crate::meshes::random_mesh;
use approx::assert_relative_eq;
use polykernel3d::math::{Isometry, Vector};

#[test]
fn translation_round_trip() {
    let mut rng = oorandom::Rand32::new(42);
    let mesh = random_mesh(&mut rng, 37, 5.0);
    let offset = Vector::new(3.5, -1.25, 8.0);
    let round_trip = mesh.translated(&offset).translated(&-offset);

    for (a, b) in mesh.vertices().zip(round_trip.vertices()) {
        assert_relative_eq!(a, b, epsilon = 1.0e-5);
    }
    assert_eq!(round_trip.to_triangle_vec(), mesh.to_triangle_vec());
}

#[test]
fn scale_round_trip() {
    let mut rng = oorandom::Rand32::new(43);
    let mesh = random_mesh(&mut rng, 20, 2.0);
    let round_trip = mesh.scaled(2.0, 0.5, 4.0).scaled(0.5, 2.0, 0.25);

    // Powers of two scale exactly.
    assert_eq!(round_trip.to_vertex_vec(), mesh.to_vertex_vec());
}

#[test]
fn frame_round_trip() {
    let mut rng = oorandom::Rand32::new(44);
    let mesh = random_mesh(&mut rng, 11, 1.0);
    let frame = Isometry::new(Vector::new(-2.0, 0.5, 1.0), Vector::new(1.2, 0.1, -0.7));
    let round_trip = mesh.global_to_local(&frame).local_to_global(&frame);

    for (a, b) in mesh.vertices().zip(round_trip.vertices()) {
        assert_relative_eq!(a, b, epsilon = 1.0e-5);
    }
}
