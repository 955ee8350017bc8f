//! Entry points compiled with the instruction set extensions of each x86 kernel.
//!
//! Every function here is `unsafe`: it must only be called once the features
//! named in its `target_feature` attribute have been detected on the running
//! CPU. [`super::Kernel`] is the only caller and checks this at construction.

macro_rules! x86_kernel(
    ($name: ident, $features: literal, $N: ty, $fma: expr) => {
        pub(crate) mod $name {
            use crate::bounding_volume::Aabb;
            use crate::kernel::lanes;
            use crate::math::{Matrix, Point, Real, Vector};
            use crate::shape::planar_buffer::PlanarBuffer;

            #[target_feature(enable = $features)]
            pub(crate) unsafe fn furthest_index(
                vertices: &PlanarBuffer<Real>,
                dir: &Vector<Real>,
            ) -> usize {
                lanes::furthest_index::<$N, $fma>(vertices, dir)
            }

            #[target_feature(enable = $features)]
            pub(crate) unsafe fn bounds(vertices: &PlanarBuffer<Real>) -> Aabb {
                lanes::bounds::<$N>(vertices)
            }

            #[target_feature(enable = $features)]
            pub(crate) unsafe fn bounds_in_frame(
                vertices: &PlanarBuffer<Real>,
                frame: &Matrix<Real>,
            ) -> Aabb {
                lanes::bounds_in_frame::<$N, $fma>(vertices, frame)
            }

            #[target_feature(enable = $features)]
            pub(crate) unsafe fn max_radius_sq(
                vertices: &PlanarBuffer<Real>,
                reference: &Point<Real>,
                scale: &Vector<Real>,
            ) -> Real {
                lanes::max_radius_sq::<$N, $fma>(vertices, reference, scale)
            }
        }
    }
);

x86_kernel!(avx2_fma, "avx,avx2,fma", lanes::Real8, true);
x86_kernel!(sse41, "sse,sse2,sse4.1", lanes::Real4, false);
x86_kernel!(sse2, "sse,sse2", lanes::Real4, false);
