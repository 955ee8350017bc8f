use crate::meshes::unit_cube;
use polykernel3d::bounding_volume::Aabb;
use polykernel3d::math::{Point, Vector};
use polykernel3d::query::Ray;

#[test]
fn unit_cube_bounds() {
    assert_eq!(
        unit_cube().bounds(),
        Aabb::new(Point::new(-0.5, -0.5, -0.5), Point::new(0.5, 0.5, 0.5))
    );
}

#[test]
fn unit_cube_support_toward_z() {
    let support = unit_cube().furthest_in_direction(&Vector::z());
    assert_eq!(support.z, 0.5);
}

#[test]
fn unit_cube_ray_cast() {
    let ray = Ray::new(Point::new(-10.0, 0.0, 0.0), Vector::x());
    assert_eq!(unit_cube().intersection_distance(&ray), 9.5);
}

#[test]
fn translated_unit_cube_bounds() {
    let cube = unit_cube().translated(&Vector::new(2.0, 0.0, 0.0));
    assert_eq!(
        cube.bounds(),
        Aabb::new(Point::new(1.5, -0.5, -0.5), Point::new(2.5, 0.5, 0.5))
    );
}
