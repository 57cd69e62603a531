//! CRC-8/ATM.
//!
//! - Polynomial: 0x07
//! - Initial value: 0x00
//! - Final XOR: 0x00
//! - Reflected input/output: No
//!
//! A persisted checksum is a single trailing byte.

use crate::tables::CRC8_TABLE;

/// CRC-8 calculator.
///
/// # Example
///
/// ```
/// use w3crc_core::crc8::Crc8;
///
/// let mut crc = Crc8::new();
/// crc.update(b"1234");
/// crc.update(b"56789");
/// assert_eq!(crc.finalize(), 0xF4);
/// ```
#[derive(Debug, Clone)]
pub struct Crc8 {
    crc: u8,
}

impl Crc8 {
    /// Create a new CRC-8 calculator.
    pub fn new() -> Self {
        Self { crc: 0x00 }
    }

    /// Reset the CRC to its initial state.
    pub fn reset(&mut self) {
        self.crc = 0x00;
    }

    /// Update the CRC with more data.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.crc = CRC8_TABLE[(self.crc ^ byte) as usize];
        }
    }

    /// Get the current CRC value.
    pub fn value(&self) -> u8 {
        self.crc
    }

    /// Finalize and return the CRC value.
    pub fn finalize(self) -> u8 {
        self.crc
    }

    /// Compute CRC-8 for a slice in one call.
    pub fn compute(data: &[u8]) -> u8 {
        let mut crc = Self::new();
        crc.update(data);
        crc.finalize()
    }

    /// Check data whose last byte is its CRC-8.
    ///
    /// Returns `false` for an empty slice.
    pub fn validate(data_with_crc: &[u8]) -> bool {
        match data_with_crc.split_last() {
            Some((&expected, data)) => Self::compute(data) == expected,
            None => false,
        }
    }

    /// Append the CRC-8 of `data` as a trailing byte.
    pub fn append_checksum(data: &mut Vec<u8>) {
        let crc = Self::compute(data);
        data.push(crc);
    }
}

impl Default for Crc8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc8_empty() {
        assert_eq!(Crc8::compute(b""), 0x00);
    }

    #[test]
    fn test_crc8_check() {
        // CRC-8/ATM check value for "123456789"
        assert_eq!(Crc8::compute(b"123456789"), 0xF4);
    }

    #[test]
    fn test_crc8_hello_world() {
        assert_eq!(Crc8::compute(b"Hello, World!"), 0x87);
    }

    #[test]
    fn test_crc8_validate() {
        assert!(Crc8::validate(b"123456789\xF4"));
        assert!(!Crc8::validate(b"123456789\xF5"));
        assert!(!Crc8::validate(b"123456780\xF4"));
        // A lone byte is a checksum over nothing.
        assert!(Crc8::validate(&[0x00]));
        assert!(!Crc8::validate(&[]));
    }

    #[test]
    fn test_crc8_append() {
        let mut data = b"Hello, World!".to_vec();
        Crc8::append_checksum(&mut data);
        assert_eq!(data.last(), Some(&0x87));
        assert!(Crc8::validate(&data));
    }

    #[test]
    fn test_crc8_reset() {
        let mut crc = Crc8::new();
        crc.update(b"garbage");
        crc.reset();
        crc.update(b"123456789");
        assert_eq!(crc.value(), 0xF4);
    }
}
