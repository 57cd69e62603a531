//! Streaming engine configuration.

use crate::error::{CrcError, Result};
use crate::kernel::Kernel;

/// Block size used when a caller has no preference.
pub const DEFAULT_BLOCK_SIZE: usize = 4096;

/// Kernel selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelChoice {
    /// Use CRC-32C instructions when the CPU has them.
    #[default]
    Auto,
    /// Always use the table-driven kernel.
    Portable,
}

impl KernelChoice {
    /// Resolve the policy to a concrete kernel.
    pub fn resolve(self) -> Kernel {
        match self {
            Self::Auto => Kernel::detect(),
            Self::Portable => Kernel::portable(),
        }
    }
}

/// Configuration for a [`Crc32cStream`](crate::stream::Crc32cStream).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Kernel selection policy, resolved once at engine construction.
    pub kernel: KernelChoice,
    /// Block size for callers that do not pass one explicitly.
    pub block_size: usize,
}

impl EngineConfig {
    /// Hardware kernel when available, 4 KiB blocks.
    pub const DEFAULT: Self = Self {
        kernel: KernelChoice::Auto,
        block_size: DEFAULT_BLOCK_SIZE,
    };

    /// Table-driven kernel, 4 KiB blocks.
    pub const PORTABLE: Self = Self {
        kernel: KernelChoice::Portable,
        block_size: DEFAULT_BLOCK_SIZE,
    };

    /// Create a configuration with the given default block size.
    pub fn new(block_size: usize) -> Self {
        Self {
            block_size,
            ..Self::DEFAULT
        }
    }

    /// Set the kernel selection policy.
    pub fn with_kernel(mut self, kernel: KernelChoice) -> Self {
        self.kernel = kernel;
        self
    }

    /// Check the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if self.block_size == 0 {
            return Err(CrcError::invalid_argument(
                "block_size",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
