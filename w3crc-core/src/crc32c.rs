//! CRC-32C (Castagnoli).
//!
//! - Polynomial: 0x1EDC6F41 (reflected: 0x82F63B78)
//! - Initial value: 0xFFFFFFFF
//! - Final XOR: 0xFFFFFFFF
//! - Reflected input/output: Yes
//!
//! This is the same convention the streaming engine in [`crate::stream`]
//! uses, so a single-shot checksum and a streamed checksum over the same
//! bytes are equal. A persisted checksum is a 4-byte little-endian trailer.

use crate::kernel::Kernel;

/// CRC-32C calculator.
///
/// Updates run on the kernel picked by [`Kernel::detect`] unless one is
/// given to [`Crc32c::with_kernel`].
///
/// # Example
///
/// ```
/// use w3crc_core::crc32c::Crc32c;
///
/// let mut crc = Crc32c::new();
/// crc.update(b"1234");
/// crc.update(b"56789");
/// assert_eq!(crc.finalize(), 0xE3069283);
/// ```
#[derive(Debug, Clone)]
pub struct Crc32c {
    crc: u32,
    kernel: Kernel,
}

impl Crc32c {
    /// Create a new CRC-32C calculator on the detected kernel.
    pub fn new() -> Self {
        Self::with_kernel(Kernel::detect())
    }

    /// Create a new CRC-32C calculator on a specific kernel.
    pub fn with_kernel(kernel: Kernel) -> Self {
        Self {
            crc: 0xFFFFFFFF,
            kernel,
        }
    }

    /// Reset the CRC to its initial state.
    pub fn reset(&mut self) {
        self.crc = 0xFFFFFFFF;
    }

    /// Update the CRC with more data.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.crc = self.kernel.update(self.crc, data);
    }

    /// Get the current CRC value (without finalizing).
    #[inline(always)]
    pub fn value(&self) -> u32 {
        self.crc ^ 0xFFFFFFFF
    }

    /// Finalize and return the CRC value.
    #[inline(always)]
    pub fn finalize(self) -> u32 {
        self.crc ^ 0xFFFFFFFF
    }

    /// The kernel this calculator updates with.
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    /// Compute CRC-32C for a slice in one call.
    #[inline]
    pub fn compute(data: &[u8]) -> u32 {
        let mut crc = Self::new();
        crc.update(data);
        crc.finalize()
    }

    /// Check data whose last four bytes are its little-endian CRC-32C.
    ///
    /// Returns `false` when fewer than four bytes are given.
    pub fn validate(data_with_crc: &[u8]) -> bool {
        let Some(split) = data_with_crc.len().checked_sub(4) else {
            return false;
        };
        let (data, trailer) = data_with_crc.split_at(split);
        let expected = u32::from_le_bytes([trailer[0], trailer[1], trailer[2], trailer[3]]);
        Self::compute(data) == expected
    }

    /// Append the CRC-32C of `data` as a little-endian trailer.
    pub fn append_checksum(data: &mut Vec<u8>) {
        let crc = Self::compute(data);
        data.extend_from_slice(&crc.to_le_bytes());
    }
}

impl Default for Crc32c {
    fn default() -> Self {
        Self::new()
    }
}
