//! Compute command implementation.

use crate::utils::{Algorithm, ChecksumJson, RangeArgs};
use std::fs::File;
use std::path::Path;
use tracing::info;
use w3crc_core::Crc32cStream;

pub fn cmd_compute(
    file: &Path,
    range: &RangeArgs,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = File::open(file)?;
    let count = range.resolve_count(&source)?;

    let mut stream = Crc32cStream::with_config(source, range.config())?;
    let kernel = stream.kernel().kind();
    info!(file = %file.display(), %kernel, count, "streaming CRC-32C");

    let crc = stream.compute_checksum(range.block_size, range.offset, count)?;
    let checksum = Algorithm::Crc32c.format(crc);

    if json {
        let mut output = ChecksumJson::new(file, Algorithm::Crc32c.name());
        output.kernel = Some(kernel.name());
        output.offset = Some(range.offset);
        output.count = Some(count);
        output.checksum = Some(checksum);
        return output.print();
    }

    println!("{}  {}", checksum, file.display());
    Ok(())
}
