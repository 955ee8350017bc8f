//! Non-persistent geometric queries.

pub use self::ray::{ray_triangle_intersection, Ray, RAY_EPSILON};

mod ray;
