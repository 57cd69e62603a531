//! Append command implementation.

use crate::utils::Algorithm;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Append the checksum of the file's current contents as a trailer.
pub fn cmd_append(
    file: &Path,
    algorithm: Algorithm,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut data = std::fs::read(file)?;
    let len = data.len();
    algorithm.append(&mut data);

    let mut out = OpenOptions::new().append(true).open(file)?;
    out.write_all(&data[len..])?;
    out.flush()?;

    info!(file = %file.display(), algorithm = algorithm.name(), "appended checksum");
    if verbose {
        println!(
            "{}: appended {} {}",
            file.display(),
            algorithm.name(),
            algorithm.format(algorithm.compute(&data[..len]))
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cmd_sum;

    #[test]
    fn test_append_adds_trailer() {
        for algorithm in [Algorithm::Crc8, Algorithm::Crc16, Algorithm::Crc32c] {
            let file = tempfile::NamedTempFile::new().unwrap();
            std::fs::write(file.path(), b"123456789").unwrap();

            cmd_append(file.path(), algorithm, true).unwrap();

            let data = std::fs::read(file.path()).unwrap();
            assert_eq!(data.len(), 9 + algorithm.width());
            assert_eq!(&data[..9], b"123456789");
            assert!(cmd_sum(file.path(), algorithm, true, false).unwrap());
        }
    }

    #[test]
    fn test_append_crc16_little_endian() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"123456789").unwrap();

        cmd_append(file.path(), Algorithm::Crc16, false).unwrap();

        let data = std::fs::read(file.path()).unwrap();
        assert_eq!(&data[9..], &[0xB1, 0x29]);
    }

    #[test]
    fn test_append_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.bin");
        assert!(cmd_append(&missing, Algorithm::Crc32c, false).is_err());
        assert!(!missing.exists());
    }
}
