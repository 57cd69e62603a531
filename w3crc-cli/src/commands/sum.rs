//! Sum command implementation.

use crate::utils::{Algorithm, ChecksumJson};
use std::path::Path;

/// Single-shot checksum of a whole file. With `check`, the file is expected
/// to end in its own checksum and the result is whether it matches.
pub fn cmd_sum(
    file: &Path,
    algorithm: Algorithm,
    check: bool,
    json: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let data = std::fs::read(file)?;
    let mut output = ChecksumJson::new(file, algorithm.name());

    if check {
        let valid = algorithm.validate(&data);
        if json {
            output.valid = Some(valid);
            output.print()?;
        } else {
            println!("{}: {}", file.display(), if valid { "OK" } else { "FAILED" });
        }
        return Ok(valid);
    }

    let checksum = algorithm.format(algorithm.compute(&data));
    if json {
        output.checksum = Some(checksum);
        output.print()?;
    } else {
        println!("{}  {}", checksum, file.display());
    }
    Ok(true)
}
