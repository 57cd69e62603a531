//! Command implementations for the w3crc CLI.

pub mod append;
pub mod compute;
pub mod sum;
pub mod validate;

pub use append::cmd_append;
pub use compute::cmd_compute;
pub use sum::cmd_sum;
pub use validate::cmd_validate;
