//! # w3crc Core
//!
//! Cyclic redundancy checks over byte buffers and seekable sources:
//!
//! - [`crc8`]: CRC-8/ATM, single trailing byte
//! - [`crc16`]: CRC-16/CCITT, little-endian 2-byte trailer
//! - [`crc32c`]: CRC-32C (Castagnoli), little-endian 4-byte trailer
//! - [`stream`]: CRC-32C over a byte range of a `Read + Seek` source,
//!   read in fixed-size blocks
//! - [`kernel`]: SSE4.2 / aarch64 CRC / table-driven CRC-32C kernels
//! - [`tables`]: the fixed lookup tables
//! - [`config`]: streaming engine configuration
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use w3crc_core::{Crc16, Crc32c, Crc32cStream, Crc8};
//!
//! assert_eq!(Crc8::compute(b"123456789"), 0xF4);
//! assert_eq!(Crc16::compute(b"123456789"), 0x29B1);
//! assert_eq!(Crc32c::compute(b"123456789"), 0xE3069283);
//!
//! let mut data = b"123456789".to_vec();
//! Crc32c::append_checksum(&mut data);
//!
//! let mut stream = Crc32cStream::new(Cursor::new(data)).unwrap();
//! assert_eq!(stream.compute_checksum(4, 0, 9).unwrap(), 0xE3069283);
//! assert!(stream.validate(4, 0, 13).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod crc16;
pub mod crc32c;
pub mod crc8;
pub mod error;
pub mod kernel;
pub mod stream;
pub mod tables;

// Re-exports for convenience
pub use config::{DEFAULT_BLOCK_SIZE, EngineConfig, KernelChoice};
pub use crc8::Crc8;
pub use crc16::Crc16;
pub use crc32c::Crc32c;
pub use error::{CrcError, Result};
pub use kernel::{Kernel, KernelKind};
pub use stream::Crc32cStream;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{EngineConfig, KernelChoice};
    pub use crate::crc8::Crc8;
    pub use crate::crc16::Crc16;
    pub use crate::crc32c::Crc32c;
    pub use crate::error::{CrcError, Result};
    pub use crate::stream::Crc32cStream;
}
