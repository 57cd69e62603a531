//! CRC-16/CCITT (the "CCITT-FALSE" parameterization).
//!
//! - Polynomial: 0x1021
//! - Initial value: 0xFFFF
//! - Final XOR: 0x0000
//! - Reflected input/output: No
//!
//! The register shifts MSB-first, but a persisted checksum is stored as a
//! little-endian trailer: low byte first, high byte last.

use crate::tables::CRC16_CCITT_TABLE;

/// CRC-16/CCITT calculator.
///
/// # Example
///
/// ```
/// use w3crc_core::crc16::Crc16;
///
/// let mut crc = Crc16::new();
/// crc.update(b"12345");
/// crc.update(b"6789");
/// assert_eq!(crc.finalize(), 0x29B1);
/// ```
#[derive(Debug, Clone)]
pub struct Crc16 {
    crc: u16,
}

impl Crc16 {
    /// Create a new CRC-16 calculator.
    pub fn new() -> Self {
        Self { crc: 0xFFFF }
    }

    /// Reset the CRC to its initial state.
    pub fn reset(&mut self) {
        self.crc = 0xFFFF;
    }

    /// Update the CRC with more data.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            let index = ((self.crc >> 8) as u8 ^ byte) as usize;
            self.crc = (self.crc << 8) ^ CRC16_CCITT_TABLE[index];
        }
    }

    /// Get the current CRC value.
    pub fn value(&self) -> u16 {
        self.crc
    }

    /// Finalize and return the CRC value.
    pub fn finalize(self) -> u16 {
        self.crc
    }

    /// Compute CRC-16 for a slice in one call.
    pub fn compute(data: &[u8]) -> u16 {
        let mut crc = Self::new();
        crc.update(data);
        crc.finalize()
    }

    /// Check data whose last two bytes are its little-endian CRC-16.
    ///
    /// Returns `false` when fewer than two bytes are given.
    pub fn validate(data_with_crc: &[u8]) -> bool {
        let Some(split) = data_with_crc.len().checked_sub(2) else {
            return false;
        };
        let (data, trailer) = data_with_crc.split_at(split);
        let expected = u16::from_le_bytes([trailer[0], trailer[1]]);
        Self::compute(data) == expected
    }

    /// Append the CRC-16 of `data` as a little-endian trailer.
    pub fn append_checksum(data: &mut Vec<u8>) {
        let crc = Self::compute(data);
        data.extend_from_slice(&crc.to_le_bytes());
    }
}

impl Default for Crc16 {
    fn default() -> Self {
        Self::new()
    }
}
