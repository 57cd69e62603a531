//! Error types for checksum operations.
//!
//! A checksum mismatch is never an error: every `validate` reports it as
//! `false`. Errors are reserved for calls that cannot be carried out at all,
//! such as bad arguments or a source that cannot be seeked or read.

use std::io;
use thiserror::Error;

/// The main error type for w3crc operations.
#[derive(Debug, Error)]
pub enum CrcError {
    /// I/O error from the underlying source while seeking or reading.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An argument is outside the range the operation accepts.
    #[error("Invalid argument `{argument}`: {message}")]
    InvalidArgument {
        /// Name of the offending argument.
        argument: &'static str,
        /// What the operation requires of it.
        message: String,
    },

    /// The source lacks a capability the streaming engine needs.
    #[error("Unsupported source: not {capability}")]
    UnsupportedSource {
        /// The missing capability ("seekable" or "readable").
        capability: &'static str,
    },
}

/// Result type alias for w3crc operations.
pub type Result<T> = std::result::Result<T, CrcError>;

impl CrcError {
    /// Create an invalid argument error.
    pub fn invalid_argument(argument: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument,
            message: message.into(),
        }
    }

    /// Create an unsupported source error.
    pub fn unsupported_source(capability: &'static str) -> Self {
        Self::UnsupportedSource { capability }
    }

    /// Returns true for argument violations.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CrcError::invalid_argument("block_size", "must be greater than zero");
        assert!(err.to_string().contains("block_size"));
        assert!(err.to_string().contains("greater than zero"));
        assert!(err.is_invalid_argument());

        let err = CrcError::unsupported_source("seekable");
        assert_eq!(err.to_string(), "Unsupported source: not seekable");
        assert!(!err.is_invalid_argument());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: CrcError = io_err.into();
        assert!(matches!(err, CrcError::Io(_)));
    }
}
