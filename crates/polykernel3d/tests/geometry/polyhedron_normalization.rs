use crate::meshes::{random_direction, random_mesh, unit_cube};
use approx::assert_relative_eq;
use polykernel3d::kernel::Kernel;
use polykernel3d::math::{Point, Vector};
use polykernel3d::query::Ray;
use polykernel3d::shape::{polyhedron_shape, polyhedron_shape_with_kernel, SupportMap};

#[test]
fn class_is_normalized_and_shape_keeps_the_extents() {
    let mesh = unit_cube()
        .scaled(2.0, 3.0, 0.5)
        .translated(&Vector::new(10.0, -2.0, 4.0));
    let shape = polyhedron_shape(&mesh).unwrap();

    let class_bounds = shape.class().local_bounds();
    assert_relative_eq!(class_bounds.mins, Point::new(-1.0, -1.0, -1.0), epsilon = 1.0e-6);
    assert_relative_eq!(class_bounds.maxs, Point::new(1.0, 1.0, 1.0), epsilon = 1.0e-6);
    assert_relative_eq!(shape.extents(), Vector::new(2.0, 3.0, 0.5), epsilon = 1.0e-6);

    let bounds = shape.local_bounds();
    assert_relative_eq!(bounds.mins, Point::new(-1.0, -1.5, -0.25), epsilon = 1.0e-6);
    assert_relative_eq!(bounds.maxs, Point::new(1.0, 1.5, 0.25), epsilon = 1.0e-6);
    assert_relative_eq!(shape.volume(), 3.0, epsilon = 1.0e-5);
}

#[test]
fn shape_queries_match_the_centered_mesh() {
    let mut rng = oorandom::Rand32::new(17);
    let mesh = random_mesh(&mut rng, 60, 5.0);
    let centered = mesh.translated(&-mesh.bounds().center().coords);

    for kernel in Kernel::available() {
        let shape = polyhedron_shape_with_kernel(&mesh, kernel).unwrap();
        let class = shape.class().as_polyhedron().unwrap();
        assert_eq!(class.kernel(), kernel);
        assert_eq!(class.mesh().vertex_count(), mesh.vertex_count());

        for _ in 0..10 {
            let dir = random_direction(&mut rng);
            let expected = centered.furthest_in_direction(&dir).coords.dot(&dir);
            let actual = shape.local_support_point(&dir).coords.dot(&dir);
            assert_relative_eq!(actual, expected, epsilon = 1.0e-3);
        }

        assert_relative_eq!(
            shape.max_radius(),
            centered.max_radius(),
            epsilon = 1.0e-3
        );
    }
}

#[test]
fn shape_ray_cast_matches_the_centered_mesh() {
    let shape = polyhedron_shape(&unit_cube().scaled(4.0, 2.0, 2.0)).unwrap();
    let ray = Ray::new(Point::new(-10.0, 0.1, 0.2), Vector::x());
    assert_relative_eq!(shape.intersection_distance(&ray), 8.0, epsilon = 1.0e-5);
    assert_eq!(
        shape.cast_ray(&Ray::new(Point::new(-10.0, 3.0, 0.0), Vector::x())),
        None
    );
}
