//! Detection of the vector instruction set extensions of the running CPU.

use std::sync::OnceLock;

/// Vector instruction set extensions available on the running CPU.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct CpuFeatures(u32);

bitflags::bitflags! {
    impl CpuFeatures: u32 {
        /// Streaming SIMD extensions.
        const SSE = 1;
        /// Streaming SIMD extensions 2.
        const SSE2 = 1 << 1;
        /// Streaming SIMD extensions 4.1.
        const SSE4_1 = 1 << 2;
        /// Advanced vector extensions.
        const AVX = 1 << 3;
        /// Advanced vector extensions 2.
        const AVX2 = 1 << 4;
        /// Fused multiply-add.
        const FMA = 1 << 5;
    }
}

impl CpuFeatures {
    /// The features of the running CPU.
    ///
    /// The CPU is probed on the first call only; the result is shared by the
    /// whole process afterwards.
    pub fn detect() -> CpuFeatures {
        static DETECTED: OnceLock<CpuFeatures> = OnceLock::new();
        *DETECTED.get_or_init(Self::probe)
    }

    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    fn probe() -> CpuFeatures {
        let mut features = CpuFeatures::empty();
        features.set(CpuFeatures::SSE, is_x86_feature_detected!("sse"));
        features.set(CpuFeatures::SSE2, is_x86_feature_detected!("sse2"));
        features.set(CpuFeatures::SSE4_1, is_x86_feature_detected!("sse4.1"));
        features.set(CpuFeatures::AVX, is_x86_feature_detected!("avx"));
        features.set(CpuFeatures::AVX2, is_x86_feature_detected!("avx2"));
        features.set(CpuFeatures::FMA, is_x86_feature_detected!("fma"));
        features
    }

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    fn probe() -> CpuFeatures {
        CpuFeatures::empty()
    }
}
