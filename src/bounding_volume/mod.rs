//! Bounding volumes.

pub use self::aabb::Aabb;
pub use self::bounding_sphere::BoundingSphere;

mod aabb;
mod bounding_sphere;
