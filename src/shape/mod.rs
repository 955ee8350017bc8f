//! Triangle meshes and the shapes built on top of them.

pub use self::mesh_prototype::{EditableMesh, MeshPrototype};
pub use self::planar_buffer::{Block, PlanarBuffer, LANE_WIDTH};
pub use self::polyhedron_class::PolyhedronClass;
#[doc(inline)]
pub use self::shape::Shape;
pub use self::shape_class::{BoxClass, CylinderClass, ShapeClass, SphereClass};
pub use self::shape_creation::{
    box_shape, cylinder_shape, polyhedron_shape, polyhedron_shape_from_parts,
    polyhedron_shape_with_kernel, sphere_shape, ShapeError,
};
#[doc(inline)]
pub use self::support_map::SupportMap;
pub use self::triangle::Triangle;
pub use self::trimesh::{MeshError, TriangleMesh};

mod mesh_prototype;
pub(crate) mod planar_buffer;
mod polyhedron_class;
mod shape;
mod shape_class;
mod shape_creation;
mod support_map;
mod triangle;
mod trimesh;
