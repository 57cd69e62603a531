//! Streaming CRC-32C over byte ranges of a seekable source.
//!
//! [`Crc32cStream`] seeks its source to an offset and folds `count` bytes
//! through a block buffer, producing the same checksum as
//! [`Crc32c::compute`](crate::crc32c::Crc32c::compute) over those bytes
//! whatever block size is used.
//!
//! The source cursor is shared state: every call seeks it and leaves it
//! wherever the last read stopped. Reading the source through another
//! handle in the middle of a call gives meaningless results.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use w3crc_core::stream::Crc32cStream;
//!
//! let mut stream = Crc32cStream::new(Cursor::new(b"xx123456789".to_vec())).unwrap();
//! assert_eq!(stream.compute_checksum(4, 2, 9).unwrap(), 0xE3069283);
//! ```

use crate::config::EngineConfig;
use crate::error::{CrcError, Result};
use crate::kernel::Kernel;
use std::io::{self, Read, Seek, SeekFrom};
use tracing::{debug, trace};

/// Size of the CRC-32C trailer read by [`Crc32cStream::validate`].
pub const TRAILER_LEN: u64 = 4;

/// CRC-32C engine over a `Read + Seek` source.
///
/// Holds a block buffer that is resized at the start of every call, so an
/// engine serves one call at a time. Use one engine per source handle to
/// checksum in parallel.
#[derive(Debug)]
pub struct Crc32cStream<R> {
    inner: R,
    kernel: Kernel,
    config: EngineConfig,
    buffer: Vec<u8>,
}

impl<R: Read + Seek> Crc32cStream<R> {
    /// Create an engine with the default configuration.
    ///
    /// Fails with [`CrcError::UnsupportedSource`] if the source cannot
    /// report a position or cannot be read.
    pub fn new(inner: R) -> Result<Self> {
        Self::with_config(inner, EngineConfig::DEFAULT)
    }

    /// Create an engine with a specific configuration.
    pub fn with_config(mut inner: R, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        probe_source(&mut inner)?;

        let kernel = config.kernel.resolve();
        debug!(kernel = kernel.kind().name(), "created CRC-32C stream engine");

        Ok(Self {
            inner,
            kernel,
            config,
            buffer: Vec::new(),
        })
    }

    /// Checksum `count` bytes starting at `offset`, reading `block_size`
    /// bytes at a time.
    ///
    /// Stops early without error if the source runs out, returning the
    /// checksum of the bytes that were read. A read failing with
    /// `ErrorKind::Interrupted` is the only one reissued; any other read
    /// error ends the call.
    ///
    /// A `block_size` too large to allocate fails with
    /// [`CrcError::InvalidArgument`].
    pub fn compute_checksum(&mut self, block_size: usize, offset: u64, count: u64) -> Result<u32> {
        check_block_size(block_size)?;
        if count == 0 {
            return Err(CrcError::invalid_argument(
                "count",
                "must be greater than zero",
            ));
        }

        debug!(block_size, offset, count, "computing CRC-32C");
        let crc = self.accumulate(block_size, offset, count)?;
        Ok(!crc)
    }

    /// Checksum with the configured default block size.
    pub fn compute_range(&mut self, offset: u64, count: u64) -> Result<u32> {
        self.compute_checksum(self.config.block_size, offset, count)
    }

    /// Check a range whose last four bytes are the little-endian CRC-32C of
    /// the bytes before them.
    ///
    /// `count` includes the trailer and must be greater than four. A
    /// mismatch, or a trailer cut short by the end of the source, returns
    /// `Ok(false)`.
    pub fn validate(&mut self, block_size: usize, offset: u64, count: u64) -> Result<bool> {
        check_block_size(block_size)?;
        if count <= TRAILER_LEN {
            return Err(CrcError::invalid_argument(
                "count",
                format!("must be greater than {TRAILER_LEN} to hold data and a checksum"),
            ));
        }

        debug!(block_size, offset, count, "validating CRC-32C");
        let actual = !self.accumulate(block_size, offset, count - TRAILER_LEN)?;

        let mut trailer = [0u8; TRAILER_LEN as usize];
        let filled = read_full(&mut self.inner, &mut trailer)?;
        if filled < trailer.len() {
            debug!(filled, "source ended inside the checksum trailer");
            return Ok(false);
        }

        let expected = u32::from_le_bytes(trailer);
        trace!(expected, actual, "compared CRC-32C trailer");
        Ok(actual == expected)
    }

    /// Validate with the configured default block size.
    pub fn validate_range(&mut self, offset: u64, count: u64) -> Result<bool> {
        self.validate(self.config.block_size, offset, count)
    }

    /// Fold up to `count` bytes from `offset` into a raw register.
    fn accumulate(&mut self, block_size: usize, offset: u64, mut count: u64) -> Result<u32> {
        self.buffer.clear();
        self.buffer.try_reserve_exact(block_size).map_err(|e| {
            CrcError::invalid_argument(
                "block_size",
                format!("cannot allocate a {block_size}-byte block buffer: {e}"),
            )
        })?;
        self.buffer.resize(block_size, 0);
        self.buffer.shrink_to(block_size);

        self.inner.seek(SeekFrom::Start(offset))?;

        let mut crc = u32::MAX;
        while count > 0 {
            let to_read = usize::try_from(count).map_or(block_size, |c| c.min(block_size));
            let read = read_retrying(&mut self.inner, &mut self.buffer[..to_read])?;
            if read == 0 {
                debug!(remaining = count, "source exhausted before end of range");
                break;
            }

            crc = self.kernel.update(crc, &self.buffer[..read]);
            count -= read as u64;
            trace!(read, remaining = count, "folded block");
        }

        Ok(crc)
    }
}

impl<R> Crc32cStream<R> {
    /// The kernel this engine updates with.
    pub fn kernel(&self) -> Kernel {
        self.kernel
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Get a mutable reference to the underlying source.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Consume the engine and return the underlying source.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

fn check_block_size(block_size: usize) -> Result<()> {
    if block_size == 0 {
        return Err(CrcError::invalid_argument(
            "block_size",
            "must be greater than zero",
        ));
    }
    Ok(())
}

/// Reject sources that cannot seek or cannot be read.
fn probe_source<R: Read + Seek>(inner: &mut R) -> Result<()> {
    if inner.stream_position().is_err() {
        return Err(CrcError::unsupported_source("seekable"));
    }
    if inner.read(&mut []).is_err() {
        return Err(CrcError::unsupported_source("readable"));
    }
    Ok(())
}

/// A single read, retried only on `Interrupted`.
fn read_retrying<R: Read>(inner: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match inner.read(buf) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

/// Read until `buf` is full or the source ends; returns the bytes filled.
fn read_full<R: Read>(inner: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match read_retrying(inner, &mut buf[filled..])? {
            0 => break,
            n => filled += n,
        }
    }
    Ok(filled)
}
