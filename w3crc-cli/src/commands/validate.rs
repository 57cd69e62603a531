//! Validate command implementation.

use crate::utils::{Algorithm, ChecksumJson, RangeArgs};
use std::fs::File;
use std::path::Path;
use tracing::info;
use w3crc_core::Crc32cStream;

/// Returns whether the trailing CRC-32C matched.
pub fn cmd_validate(
    file: &Path,
    range: &RangeArgs,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let source = File::open(file)?;
    let count = range.resolve_count(&source)?;

    let mut stream = Crc32cStream::with_config(source, range.config())?;
    let kernel = stream.kernel().kind();
    info!(file = %file.display(), %kernel, count, "validating CRC-32C trailer");

    let valid = stream.validate(range.block_size, range.offset, count)?;

    if json {
        let mut output = ChecksumJson::new(file, Algorithm::Crc32c.name());
        output.kernel = Some(kernel.name());
        output.offset = Some(range.offset);
        output.count = Some(count);
        output.valid = Some(valid);
        output.print()?;
    } else {
        println!("{}: {}", file.display(), if valid { "OK" } else { "FAILED" });
    }

    Ok(valid)
}
