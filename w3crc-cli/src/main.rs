//! w3crc CLI
//!
//! CRC-8, CRC-16/CCITT and streaming CRC-32C checksums for files.

mod commands;
mod utils;

use clap::{Parser, Subcommand};
use commands::{cmd_append, cmd_compute, cmd_sum, cmd_validate};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use utils::{Algorithm, RangeArgs};

#[derive(Parser)]
#[command(name = "w3crc")]
#[command(author, version, about = "CRC-8, CRC-16/CCITT and CRC-32C checksums")]
#[command(long_about = "
Computes and checks cyclic redundancy checks over files.

The streaming commands read a byte range in fixed-size blocks and use the
CPU's CRC-32C instruction when it has one.

Examples:
  w3crc compute data.bin
  w3crc compute data.bin --offset 512 --count 4096 --block-size 64
  w3crc validate record.bin
  w3crc sum data.bin --algorithm crc16
  w3crc append data.bin --algorithm crc8
  w3crc sum data.bin --algorithm crc8 --check

Set RUST_LOG=w3crc=debug to see which kernel is in use.
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream a byte range and print its CRC-32C
    #[command(alias = "c")]
    Compute {
        /// File to read
        file: PathBuf,

        #[command(flatten)]
        range: RangeArgs,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Check a byte range ending in its little-endian CRC-32C
    #[command(alias = "v")]
    Validate {
        /// File to read
        file: PathBuf,

        #[command(flatten)]
        range: RangeArgs,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Checksum a whole file in memory
    #[command(alias = "s")]
    Sum {
        /// File to read
        file: PathBuf,

        /// Checksum algorithm
        #[arg(short, long, value_enum, default_value = "crc32c")]
        algorithm: Algorithm,

        /// Treat the end of the file as its checksum and verify it
        #[arg(long)]
        check: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Append a checksum trailer to a file
    Append {
        /// File to extend
        file: PathBuf,

        /// Checksum algorithm
        #[arg(short, long, value_enum, default_value = "crc32c")]
        algorithm: Algorithm,

        /// Show verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("w3crc=warn")),
        )
        .init();
}

fn main() {
    setup_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compute { file, range, json } => cmd_compute(&file, &range, json).map(|()| true),
        Commands::Validate { file, range, json } => cmd_validate(&file, &range, json),
        Commands::Sum {
            file,
            algorithm,
            check,
            json,
        } => cmd_sum(&file, algorithm, check, json),
        Commands::Append {
            file,
            algorithm,
            verbose,
        } => cmd_append(&file, algorithm, verbose).map(|()| true),
    };

    if let Err(e) = &result {
        eprintln!("Error: {}", e);
    }
    let code = exit_code(&result);
    if code != 0 {
        std::process::exit(code);
    }
}

/// 0 when the checksum matched, 1 on a mismatch, 2 when the command failed.
fn exit_code(result: &Result<bool, Box<dyn std::error::Error>>) -> i32 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn range(count: Option<u64>) -> RangeArgs {
        RangeArgs {
            block_size: 16,
            offset: 0,
            count,
            portable: false,
        }
    }

    fn record() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"123456789").unwrap();
        file.flush().unwrap();
        cmd_append(file.path(), Algorithm::Crc32c, false).unwrap();
        file
    }

    #[test]
    fn test_exit_code_for_match() {
        let file = record();
        assert_eq!(exit_code(&cmd_validate(file.path(), &range(None), false)), 0);
    }

    #[test]
    fn test_exit_code_for_mismatch() {
        let file = record();
        let mut data = std::fs::read(file.path()).unwrap();
        data[9] ^= 0xFF;
        std::fs::write(file.path(), &data).unwrap();
        assert_eq!(exit_code(&cmd_validate(file.path(), &range(None), false)), 1);
    }

    #[test]
    fn test_exit_code_for_error() {
        let file = record();
        assert_eq!(
            exit_code(&cmd_validate(file.path(), &range(Some(4)), false)),
            2
        );

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.bin");
        assert_eq!(
            exit_code(&cmd_sum(&missing, Algorithm::Crc8, true, false)),
            2
        );
    }
}
