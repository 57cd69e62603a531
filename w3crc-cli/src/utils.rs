//! Shared argument types and output helpers for the CLI.

use clap::{Args, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use w3crc_core::{Crc8, Crc16, Crc32c, DEFAULT_BLOCK_SIZE, EngineConfig, KernelChoice};

/// Single-shot checksum algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Algorithm {
    /// CRC-8/ATM, 1-byte trailer
    Crc8,
    /// CRC-16/CCITT, 2-byte little-endian trailer
    Crc16,
    /// CRC-32C, 4-byte little-endian trailer
    #[default]
    Crc32c,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Self::Crc8 => "crc8",
            Self::Crc16 => "crc16",
            Self::Crc32c => "crc32c",
        }
    }

    /// Trailer length in bytes.
    pub fn width(self) -> usize {
        match self {
            Self::Crc8 => 1,
            Self::Crc16 => 2,
            Self::Crc32c => 4,
        }
    }

    pub fn compute(self, data: &[u8]) -> u32 {
        match self {
            Self::Crc8 => Crc8::compute(data) as u32,
            Self::Crc16 => Crc16::compute(data) as u32,
            Self::Crc32c => Crc32c::compute(data),
        }
    }

    pub fn append(self, data: &mut Vec<u8>) {
        match self {
            Self::Crc8 => Crc8::append_checksum(data),
            Self::Crc16 => Crc16::append_checksum(data),
            Self::Crc32c => Crc32c::append_checksum(data),
        }
    }

    pub fn validate(self, data_with_crc: &[u8]) -> bool {
        match self {
            Self::Crc8 => Crc8::validate(data_with_crc),
            Self::Crc16 => Crc16::validate(data_with_crc),
            Self::Crc32c => Crc32c::validate(data_with_crc),
        }
    }

    /// Uppercase hex, zero-padded to the checksum width.
    pub fn format(self, crc: u32) -> String {
        format!("{:0width$X}", crc, width = self.width() * 2)
    }
}

/// Byte range and engine options shared by the streaming commands.
#[derive(Debug, Clone, Args)]
pub struct RangeArgs {
    /// Bytes read per block
    #[arg(short, long, default_value_t = DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Start of the range
    #[arg(short, long, default_value_t = 0)]
    pub offset: u64,

    /// Length of the range (defaults to the rest of the file)
    #[arg(short, long)]
    pub count: Option<u64>,

    /// Use the table-driven kernel even when CRC instructions are available
    #[arg(long)]
    pub portable: bool,
}

impl RangeArgs {
    pub fn config(&self) -> EngineConfig {
        let kernel = if self.portable {
            KernelChoice::Portable
        } else {
            KernelChoice::Auto
        };
        EngineConfig::new(self.block_size).with_kernel(kernel)
    }

    /// The explicit count, or everything from the offset to the end of the file.
    pub fn resolve_count(&self, file: &File) -> std::io::Result<u64> {
        match self.count {
            Some(count) => Ok(count),
            None => Ok(file.metadata()?.len().saturating_sub(self.offset)),
        }
    }
}

/// JSON output for a checksum result.
#[derive(Debug, Serialize)]
pub struct ChecksumJson<'a> {
    pub file: String,
    pub algorithm: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kernel: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
}

impl<'a> ChecksumJson<'a> {
    pub fn new(file: &Path, algorithm: &'a str) -> Self {
        Self {
            file: file.display().to_string(),
            algorithm,
            kernel: None,
            offset: None,
            count: None,
            checksum: None,
            valid: None,
        }
    }

    pub fn print(&self) -> Result<(), Box<dyn std::error::Error>> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn range(offset: u64, count: Option<u64>) -> RangeArgs {
        RangeArgs {
            block_size: 64,
            offset,
            count,
            portable: false,
        }
    }

    #[test]
    fn test_format_width() {
        assert_eq!(Algorithm::Crc8.format(0x7), "07");
        assert_eq!(Algorithm::Crc16.format(0x29B1), "29B1");
        assert_eq!(Algorithm::Crc32c.format(0x0306), "00000306");
    }

    #[test]
    fn test_append_then_validate() {
        for algorithm in [Algorithm::Crc8, Algorithm::Crc16, Algorithm::Crc32c] {
            let mut data = b"123456789".to_vec();
            algorithm.append(&mut data);
            assert_eq!(data.len(), 9 + algorithm.width());
            assert!(algorithm.validate(&data), "{}", algorithm.name());
        }
    }

    #[test]
    fn test_resolve_count() {
        let mut file = tempfile::tempfile().unwrap();
        file.write_all(&[0u8; 100]).unwrap();

        assert_eq!(range(0, None).resolve_count(&file).unwrap(), 100);
        assert_eq!(range(30, None).resolve_count(&file).unwrap(), 70);
        assert_eq!(range(200, None).resolve_count(&file).unwrap(), 0);
        assert_eq!(range(0, Some(5)).resolve_count(&file).unwrap(), 5);
    }

    #[test]
    fn test_portable_flag() {
        let mut args = range(0, None);
        assert_eq!(args.config().kernel, KernelChoice::Auto);
        args.portable = true;
        assert_eq!(args.config().kernel, KernelChoice::Portable);
        assert_eq!(args.config().block_size, 64);
    }

    #[test]
    fn test_json_skips_empty_fields() {
        let mut output = ChecksumJson::new(Path::new("a.bin"), "crc32c");
        output.checksum = Some("E3069283".to_string());
        let json = serde_json::to_string(&output).unwrap();
        assert_eq!(
            json,
            r#"{"file":"a.bin","algorithm":"crc32c","checksum":"E3069283"}"#
        );
    }
}
