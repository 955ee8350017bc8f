//! Lane-parallel reductions over planar vertex buffers.
//!
//! Every reduction walks the padded buffer chunk by chunk, keeps one running
//! candidate per lane, and only reduces the lanes to a single value once the
//! whole buffer has been visited.

use crate::bounding_volume::Aabb;
use crate::math::{Matrix, Point, Real, Vector};
use crate::shape::planar_buffer::{PlanarBuffer, LANE_WIDTH};
use simba::simd::{SimdBool, SimdRealField};

#[cfg(feature = "simd-stable")]
pub(crate) use simba::simd::{WideF32x4 as Real4, WideF32x8 as Real8};

#[cfg(not(feature = "simd-stable"))]
pub(crate) use simba::simd::{AutoF32x4 as Real4, AutoF32x8 as Real8};

/// A pack of `WIDTH` reals processed in lock-step.
pub(crate) trait Lanes: SimdRealField<Element = Real> + Copy {
    /// The number of lanes.
    const WIDTH: usize;

    /// Loads `WIDTH` consecutive values.
    fn load(values: &[Real]) -> Self;
}

macro_rules! impl_lanes(
    ($($T: ty, $width: expr);*) => {$(
        impl Lanes for $T {
            const WIDTH: usize = $width;

            #[inline(always)]
            fn load(values: &[Real]) -> Self {
                let mut lanes = [0.0; $width];
                lanes.copy_from_slice(values);
                <$T>::from(lanes)
            }
        }
    )*}
);

impl_lanes!(Real4, 4; Real8, 8);

#[inline(always)]
fn splat3<N: Lanes>(v: &Vector<Real>) -> [N; 3] {
    [N::splat(v.x), N::splat(v.y), N::splat(v.z)]
}

#[inline(always)]
fn dot<N: Lanes, const FMA: bool>(a: &[N; 3], b: &[N; 3]) -> N {
    if FMA {
        a[0].simd_mul_add(b[0], a[1].simd_mul_add(b[1], a[2] * b[2]))
    } else {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }
}

/// Iterates through the padded buffer, `N::WIDTH` vertices at a time.
#[inline(always)]
fn chunks<N: Lanes>(vertices: &PlanarBuffer<Real>) -> impl Iterator<Item = [N; 3]> + '_ {
    let [xs, ys, zs] = vertices.axes();
    xs.iter().zip(ys).zip(zs).flat_map(|((x, y), z)| {
        (0..LANE_WIDTH / N::WIDTH).map(move |k| {
            let lanes = k * N::WIDTH..(k + 1) * N::WIDTH;
            [
                N::load(&x.0[lanes.clone()]),
                N::load(&y.0[lanes.clone()]),
                N::load(&z.0[lanes]),
            ]
        })
    })
}

/// Index of the vertex maximizing its dot product with `dir`.
///
/// The buffer must be non-empty, with consistent padding.
#[inline(always)]
pub(crate) fn furthest_index<N: Lanes, const FMA: bool>(
    vertices: &PlanarBuffer<Real>,
    dir: &Vector<Real>,
) -> usize {
    let dir = splat3::<N>(dir);
    let mut best_dot = N::splat(Real::NEG_INFINITY);
    let mut best_chunk = N::splat(0.0);

    for (chunk_id, pts) in chunks::<N>(vertices).enumerate() {
        let proj = dot::<N, FMA>(&dir, &pts);
        // NaN never compares greater, so a NaN dot product never wins.
        let better = proj.simd_gt(best_dot);
        best_dot = proj.select(better, best_dot);
        best_chunk = N::splat(chunk_id as Real).select(better, best_chunk);
    }

    let max = best_dot.simd_horizontal_max();
    let winners = best_dot.simd_eq(N::splat(max)).bitmask();
    debug_assert_ne!(winners, 0);

    let lane = winners.trailing_zeros() as usize;
    let id = best_chunk.extract(lane) as usize * N::WIDTH + lane;

    // A padding lane holds a copy of the last vertex.
    id.min(vertices.len() - 1)
}

/// Axis-aligned bounds of the projections of every vertex onto the rows of `frame`.
#[inline(always)]
pub(crate) fn bounds_in_frame<N: Lanes, const FMA: bool>(
    vertices: &PlanarBuffer<Real>,
    frame: &Matrix<Real>,
) -> Aabb {
    let axes = [0, 1, 2].map(|i| splat3::<N>(&frame.row(i).transpose()));
    let mut mins = [N::splat(Real::MAX); 3];
    let mut maxs = [N::splat(-Real::MAX); 3];

    for pts in chunks::<N>(vertices) {
        for i in 0..3 {
            let proj = dot::<N, FMA>(&axes[i], &pts);
            mins[i] = mins[i].simd_min(proj);
            maxs[i] = maxs[i].simd_max(proj);
        }
    }

    reduce_bounds(mins, maxs)
}

/// Axis-aligned bounds of the vertices.
#[inline(always)]
pub(crate) fn bounds<N: Lanes>(vertices: &PlanarBuffer<Real>) -> Aabb {
    let mut mins = [N::splat(Real::MAX); 3];
    let mut maxs = [N::splat(-Real::MAX); 3];

    for pts in chunks::<N>(vertices) {
        for i in 0..3 {
            mins[i] = mins[i].simd_min(pts[i]);
            maxs[i] = maxs[i].simd_max(pts[i]);
        }
    }

    reduce_bounds(mins, maxs)
}

#[inline(always)]
fn reduce_bounds<N: Lanes>(mins: [N; 3], maxs: [N; 3]) -> Aabb {
    Aabb::new(
        Point::from(mins.map(|m| m.simd_horizontal_min())),
        Point::from(maxs.map(|m| m.simd_horizontal_max())),
    )
}

/// Largest squared norm of `scale ⊙ (v - reference)` over every vertex `v`.
#[inline(always)]
pub(crate) fn max_radius_sq<N: Lanes, const FMA: bool>(
    vertices: &PlanarBuffer<Real>,
    reference: &Point<Real>,
    scale: &Vector<Real>,
) -> Real {
    let reference = splat3::<N>(&reference.coords);
    let scale = splat3::<N>(scale);
    let mut best = N::splat(0.0);

    for pts in chunks::<N>(vertices) {
        let delta = [0, 1, 2].map(|i| (pts[i] - reference[i]) * scale[i]);
        best = best.simd_max(dot::<N, FMA>(&delta, &delta));
    }

    best.simd_horizontal_max()
}
