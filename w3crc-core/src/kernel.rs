//! CRC-32C update kernels.
//!
//! The raw (pre-inverted) CRC-32C register can be advanced by three
//! interchangeable kernels:
//!
//! - **SSE4.2** `crc32` instruction on x86/x86_64
//! - **CRC extension** `crc32c*` instructions on aarch64
//! - **Portable** table-driven update, available everywhere
//!
//! All three produce bit-identical registers for the same input. The CPU is
//! probed once per process; a [`Kernel`] value is the result of that probe
//! and can only name a hardware kernel the running CPU actually supports.

use crate::tables::CRC32C_TABLE;
use std::fmt;
use std::sync::OnceLock;

/// Which implementation a [`Kernel`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KernelKind {
    /// Table-driven software update.
    Portable,
    /// x86 SSE4.2 `crc32` instruction.
    Sse42,
    /// aarch64 CRC extension.
    ArmCrc,
}

impl KernelKind {
    /// Short lowercase name, used in logs and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            Self::Portable => "portable",
            Self::Sse42 => "sse4.2",
            Self::ArmCrc => "arm-crc",
        }
    }
}

impl fmt::Display for KernelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A CRC-32C update strategy that is valid on the running CPU.
///
/// # Example
///
/// ```
/// use w3crc_core::kernel::Kernel;
///
/// let kernel = Kernel::detect();
/// let raw = kernel.update(!0, b"123456789");
/// assert_eq!(!raw, 0xE3069283);
/// assert_eq!(raw, Kernel::portable().update(!0, b"123456789"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    kind: KernelKind,
}

static DETECTED: OnceLock<Kernel> = OnceLock::new();

impl Kernel {
    /// The table-driven kernel.
    pub const fn portable() -> Self {
        Self {
            kind: KernelKind::Portable,
        }
    }

    /// The best kernel for this CPU, probed on first call and cached.
    pub fn detect() -> Self {
        *DETECTED.get_or_init(|| {
            let kernel = Self::hardware().unwrap_or_else(Self::portable);
            tracing::debug!(kernel = kernel.kind.name(), "selected CRC-32C kernel");
            kernel
        })
    }

    /// A hardware kernel, if the CPU has CRC-32C instructions.
    pub fn hardware() -> Option<Self> {
        #[cfg(all(feature = "hardware", any(target_arch = "x86", target_arch = "x86_64")))]
        {
            if x86::is_supported() {
                return Some(Self {
                    kind: KernelKind::Sse42,
                });
            }
        }
        #[cfg(all(feature = "hardware", target_arch = "aarch64"))]
        {
            if arm::is_supported() {
                return Some(Self {
                    kind: KernelKind::ArmCrc,
                });
            }
        }
        None
    }

    /// Which implementation this kernel runs.
    pub fn kind(&self) -> KernelKind {
        self.kind
    }

    /// True for the instruction-based kernels.
    pub fn is_hardware(&self) -> bool {
        self.kind != KernelKind::Portable
    }

    /// Advance a raw CRC-32C register over `data`.
    ///
    /// No inversion is applied on either side; callers start from `!0` and
    /// complement the final register.
    #[inline]
    pub fn update(&self, crc: u32, data: &[u8]) -> u32 {
        match self.kind {
            #[cfg(all(feature = "hardware", any(target_arch = "x86", target_arch = "x86_64")))]
            // SAFETY: a Sse42 kernel is only built after `x86::is_supported()`.
            KernelKind::Sse42 => unsafe { x86::update_sse42(crc, data) },
            #[cfg(all(feature = "hardware", target_arch = "aarch64"))]
            // SAFETY: an ArmCrc kernel is only built after `arm::is_supported()`.
            KernelKind::ArmCrc => unsafe { arm::update_crc(crc, data) },
            _ => update_portable(crc, data),
        }
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::detect()
    }
}

/// Table-driven update, unrolled over 4-byte words.
#[inline]
pub(crate) fn update_portable(mut crc: u32, data: &[u8]) -> u32 {
    let mut words = data.chunks_exact(4);
    for word in &mut words {
        crc = CRC32C_TABLE[((crc ^ word[0] as u32) & 0xFF) as usize] ^ (crc >> 8);
        crc = CRC32C_TABLE[((crc ^ word[1] as u32) & 0xFF) as usize] ^ (crc >> 8);
        crc = CRC32C_TABLE[((crc ^ word[2] as u32) & 0xFF) as usize] ^ (crc >> 8);
        crc = CRC32C_TABLE[((crc ^ word[3] as u32) & 0xFF) as usize] ^ (crc >> 8);
    }
    for &byte in words.remainder() {
        crc = CRC32C_TABLE[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8);
    }
    crc
}

#[cfg(all(feature = "hardware", any(target_arch = "x86", target_arch = "x86_64")))]
mod x86 {
    #[cfg(target_arch = "x86")]
    use core::arch::x86::{_mm_crc32_u8, _mm_crc32_u32};
    #[cfg(target_arch = "x86_64")]
    use core::arch::x86_64::{_mm_crc32_u8, _mm_crc32_u32};

    /// Check if SSE4.2 is available at runtime
    #[inline]
    pub fn is_supported() -> bool {
        #[cfg(target_feature = "sse4.2")]
        {
            true
        }
        #[cfg(not(target_feature = "sse4.2"))]
        {
            std::is_x86_feature_detected!("sse4.2")
        }
    }

    /// Fold little-endian 4-byte words, then the 1-3 byte tail.
    ///
    /// # Safety
    ///
    /// Requires SSE4.2. Caller must verify `is_supported()` returns true.
    #[target_feature(enable = "sse4.2")]
    pub unsafe fn update_sse42(mut crc: u32, data: &[u8]) -> u32 {
        let mut words = data.chunks_exact(4);
        for word in &mut words {
            let value = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
            crc = unsafe { _mm_crc32_u32(crc, value) };
        }
        for &byte in words.remainder() {
            crc = unsafe { _mm_crc32_u8(crc, byte) };
        }
        crc
    }
}

#[cfg(all(feature = "hardware", target_arch = "aarch64"))]
mod arm {
    use core::arch::aarch64::{__crc32cb, __crc32cw};

    /// Check if the CRC extension is available at runtime
    #[inline]
    pub fn is_supported() -> bool {
        #[cfg(target_feature = "crc")]
        {
            true
        }
        #[cfg(not(target_feature = "crc"))]
        {
            std::arch::is_aarch64_feature_detected!("crc")
        }
    }

    /// Fold little-endian 4-byte words, then the 1-3 byte tail.
    ///
    /// # Safety
    ///
    /// Requires the CRC extension. Caller must verify `is_supported()`.
    #[target_feature(enable = "crc")]
    pub unsafe fn update_crc(mut crc: u32, data: &[u8]) -> u32 {
        let mut words = data.chunks_exact(4);
        for word in &mut words {
            let value = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
            crc = unsafe { __crc32cw(crc, value) };
        }
        for &byte in words.remainder() {
            crc = unsafe { __crc32cb(crc, byte) };
        }
        crc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Byte-at-a-time reference with no unrolling.
    fn reference(mut crc: u32, data: &[u8]) -> u32 {
        for &byte in data {
            crc = CRC32C_TABLE[((crc ^ byte as u32) & 0xFF) as usize] ^ (crc >> 8);
        }
        crc
    }

    fn pseudo_random(size: usize, mut seed: u64) -> Vec<u8> {
        (0..size)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                (seed >> 32) as u8
            })
            .collect()
    }

    #[test]
    fn test_portable_check_value() {
        assert_eq!(!Kernel::portable().update(!0, b"123456789"), 0xE3069283);
    }

    #[test]
    fn test_detected_check_value() {
        assert_eq!(!Kernel::detect().update(!0, b"123456789"), 0xE3069283);
    }

    #[test]
    fn test_detect_is_cached() {
        assert_eq!(Kernel::detect(), Kernel::detect());
    }

    #[test]
    fn test_hardware_kind() {
        match Kernel::hardware() {
            Some(kernel) => assert!(kernel.is_hardware()),
            None => assert_eq!(Kernel::detect().kind(), KernelKind::Portable),
        }
        assert!(!Kernel::portable().is_hardware());
    }

    #[test]
    fn test_kernels_agree_on_all_tail_lengths() {
        let data = pseudo_random(1031, 0x123456789ABCDEF0);
        let detected = Kernel::detect();
        for len in [0, 1, 2, 3, 4, 5, 6, 7, 8, 63, 64, 65, 1024, 1031] {
            let slice = &data[..len];
            let expected = reference(!0, slice);
            assert_eq!(update_portable(!0, slice), expected, "portable, len {}", len);
            assert_eq!(detected.update(!0, slice), expected, "detected, len {}", len);
        }
    }

    #[test]
    fn test_kernels_agree_from_arbitrary_state() {
        let data = pseudo_random(300, 42);
        let detected = Kernel::detect();
        for start in [0u32, 1, 0xDEADBEEF, u32::MAX] {
            assert_eq!(detected.update(start, &data), reference(start, &data));
        }
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(KernelKind::Portable.to_string(), "portable");
        assert_eq!(KernelKind::Sse42.name(), "sse4.2");
        assert_eq!(KernelKind::ArmCrc.name(), "arm-crc");
    }
}
