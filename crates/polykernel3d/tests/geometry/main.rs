mod bounds_tightness;
mod concurrent_queries;
mod meshes;
mod polyhedron_normalization;
mod support_maximality;
mod transform_round_trip;
mod unit_cube;
