//! Hardware-dispatched reductions over planar vertex buffers.
//!
//! A [`Kernel`] names one of several functionally equivalent implementations
//! of the support-function, bounds and radius reductions. They only differ by
//! the vector instruction set they are compiled for. Picking one is done once,
//! when a shape is built, never per query.

pub use self::cpu_features::CpuFeatures;

use crate::bounding_volume::Aabb;
use crate::math::{Matrix, Point, Real, Vector};
use crate::shape::planar_buffer::PlanarBuffer;
use std::fmt;
use std::sync::OnceLock;

mod cpu_features;
#[cfg(any(target_arch = "x86", target_arch = "x86_64", test))]
mod lanes;
pub(crate) mod scalar;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86;

/// Lane-parallel argmax tracks chunk ids as floats, which are exact below this.
const MAX_LANE_INDEXED: usize = 1 << 24;

/// The implementations a [`Kernel`] can run.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KernelKind {
    /// Eight lanes, with fused multiply-add.
    Avx2Fma,
    /// Four lanes, compiled with SSE4.1 enabled.
    Sse41,
    /// Four lanes, plain SSE2.
    Sse2,
    /// Portable one-vertex-at-a-time scan.
    Scalar,
}

impl KernelKind {
    /// Every kind, from the widest to the narrowest.
    pub const ALL: [KernelKind; 4] = [
        KernelKind::Avx2Fma,
        KernelKind::Sse41,
        KernelKind::Sse2,
        KernelKind::Scalar,
    ];

    /// The widest kind that can run on a CPU with the given features.
    pub fn select(features: CpuFeatures) -> KernelKind {
        Self::ALL
            .into_iter()
            .find(|kind| features.contains(kind.required_features()))
            .unwrap_or(KernelKind::Scalar)
    }

    /// The CPU features this kind is compiled for.
    pub fn required_features(self) -> CpuFeatures {
        match self {
            KernelKind::Avx2Fma => CpuFeatures::AVX | CpuFeatures::AVX2 | CpuFeatures::FMA,
            KernelKind::Sse41 => CpuFeatures::SSE | CpuFeatures::SSE2 | CpuFeatures::SSE4_1,
            KernelKind::Sse2 => CpuFeatures::SSE | CpuFeatures::SSE2,
            KernelKind::Scalar => CpuFeatures::empty(),
        }
    }

    /// The number of vertices processed per step.
    pub fn lane_width(self) -> usize {
        match self {
            KernelKind::Avx2Fma => 8,
            KernelKind::Sse41 | KernelKind::Sse2 => 4,
            KernelKind::Scalar => 1,
        }
    }

    /// Can this kind run on a CPU with the given features?
    pub fn is_supported_by(self, features: CpuFeatures) -> bool {
        features.contains(self.required_features())
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KernelKind::Avx2Fma => "avx2+fma",
            KernelKind::Sse41 => "sse4.1",
            KernelKind::Sse2 => "sse2",
            KernelKind::Scalar => "scalar",
        };
        f.write_str(name)
    }
}

/// A kernel the running CPU is able to execute.
///
/// A `Kernel` can only be obtained for a [`KernelKind`] whose required
/// features were detected, so dispatching to its `target_feature` code is
/// always sound.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Kernel {
    kind: KernelKind,
}

impl Default for Kernel {
    fn default() -> Self {
        Self::best()
    }
}

impl Kernel {
    /// The widest kernel supported by the running CPU.
    ///
    /// The CPU is probed on the first call only. With the
    /// `enhanced-determinism` feature, this is always the scalar kernel.
    pub fn best() -> Kernel {
        static BEST: OnceLock<Kernel> = OnceLock::new();
        *BEST.get_or_init(|| {
            let features = CpuFeatures::detect();

            #[cfg(feature = "enhanced-determinism")]
            let kind = KernelKind::Scalar;
            #[cfg(not(feature = "enhanced-determinism"))]
            let kind = KernelKind::select(features);

            log::debug!("Selected the {kind} geometry kernel (cpu features: {features:?}).");
            Kernel { kind }
        })
    }

    /// The kernel of the given kind, if the running CPU supports it.
    pub fn new(kind: KernelKind) -> Option<Kernel> {
        if kind.is_supported_by(CpuFeatures::detect()) {
            Some(Kernel { kind })
        } else {
            log::debug!("The {kind} geometry kernel is not supported by this CPU.");
            None
        }
    }

    /// The portable kernel, available everywhere.
    pub fn scalar() -> Kernel {
        Kernel {
            kind: KernelKind::Scalar,
        }
    }

    /// Every kernel the running CPU supports, from the widest to the narrowest.
    pub fn available() -> impl Iterator<Item = Kernel> {
        let features = CpuFeatures::detect();
        KernelKind::ALL
            .into_iter()
            .filter(move |kind| kind.is_supported_by(features))
            .map(|kind| Kernel { kind })
    }

    /// The kind of this kernel.
    #[inline]
    pub fn kind(&self) -> KernelKind {
        self.kind
    }
}

macro_rules! dispatch(
    ($self: ident, $op: ident($($arg: expr),*)) => {
        match $self.kind {
            // SAFETY: a `Kernel` of a given kind only exists once the features
            //         of that kind have been detected on the running CPU.
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            KernelKind::Avx2Fma => unsafe { x86::avx2_fma::$op($($arg),*) },
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            KernelKind::Sse41 => unsafe { x86::sse41::$op($($arg),*) },
            #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
            KernelKind::Sse2 => unsafe { x86::sse2::$op($($arg),*) },
            _ => scalar::$op($($arg),*),
        }
    }
);

impl Kernel {
    /// Index of the vertex maximizing its dot product with `dir`.
    ///
    /// `vertices` must be non-empty with consistent padding.
    pub(crate) fn furthest_index(&self, vertices: &PlanarBuffer<Real>, dir: &Vector<Real>) -> usize {
        if vertices.len() >= MAX_LANE_INDEXED {
            return scalar::furthest_index(vertices, dir);
        }

        dispatch!(self, furthest_index(vertices, dir))
    }

    pub(crate) fn bounds(&self, vertices: &PlanarBuffer<Real>) -> Aabb {
        dispatch!(self, bounds(vertices))
    }

    pub(crate) fn bounds_in_frame(&self, vertices: &PlanarBuffer<Real>, frame: &Matrix<Real>) -> Aabb {
        dispatch!(self, bounds_in_frame(vertices, frame))
    }

    pub(crate) fn max_radius_sq(
        &self,
        vertices: &PlanarBuffer<Real>,
        reference: &Point<Real>,
        scale: &Vector<Real>,
    ) -> Real {
        dispatch!(self, max_radius_sq(vertices, reference, scale))
    }
}

#[cfg(test)]
mod test {
    use super::{CpuFeatures, Kernel, KernelKind};

    #[test]
    fn selection_prefers_the_widest_kind() {
        let sse2 = CpuFeatures::SSE | CpuFeatures::SSE2;
        let sse41 = sse2 | CpuFeatures::SSE4_1;
        let avx = sse41 | CpuFeatures::AVX | CpuFeatures::AVX2 | CpuFeatures::FMA;

        assert_eq!(KernelKind::select(CpuFeatures::empty()), KernelKind::Scalar);
        assert_eq!(KernelKind::select(CpuFeatures::SSE), KernelKind::Scalar);
        assert_eq!(KernelKind::select(sse2), KernelKind::Sse2);
        assert_eq!(KernelKind::select(sse41), KernelKind::Sse41);
        assert_eq!(KernelKind::select(avx), KernelKind::Avx2Fma);
        // AVX2 without FMA does not qualify for the 8-wide kernel.
        assert_eq!(
            KernelKind::select(avx - CpuFeatures::FMA),
            KernelKind::Sse41
        );
    }

    #[test]
    fn available_kernels_are_supported() {
        let detected = CpuFeatures::detect();
        let available: Vec<_> = Kernel::available().collect();

        assert_eq!(available.last(), Some(&Kernel::scalar()));
        assert!(available.contains(&Kernel::best()));
        for kernel in &available {
            assert!(kernel.kind().is_supported_by(detected));
            assert_eq!(Kernel::new(kernel.kind()), Some(*kernel));
        }
        for kind in KernelKind::ALL {
            assert_eq!(Kernel::new(kind).is_some(), kind.is_supported_by(detected));
        }
    }

    #[cfg(not(feature = "enhanced-determinism"))]
    #[test]
    fn best_kernel_matches_detection() {
        assert_eq!(
            Kernel::best().kind(),
            KernelKind::select(CpuFeatures::detect())
        );
    }
}
