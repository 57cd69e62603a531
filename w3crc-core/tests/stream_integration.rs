//! Streaming CRC-32C against real files.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, Seek, SeekFrom, Write};
use w3crc_core::{Crc32c, Crc32cStream, CrcError, EngineConfig};

fn pseudo_random(size: usize, mut seed: u64) -> Vec<u8> {
    (0..size)
        .map(|_| {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            (seed >> 32) as u8
        })
        .collect()
}

/// 1000 data bytes followed by their little-endian CRC-32C.
fn write_record(file: &mut File) -> Vec<u8> {
    let mut data = pseudo_random(1000, 0x5EED);
    Crc32c::append_checksum(&mut data);
    file.write_all(&data).unwrap();
    file.flush().unwrap();
    data
}

#[test]
fn test_file_with_valid_trailer() {
    let mut file = tempfile::tempfile().unwrap();
    let data = write_record(&mut file);

    let mut stream = Crc32cStream::new(file).unwrap();
    assert!(stream.validate(64, 0, 1004).unwrap());

    let one = stream.compute_checksum(1, 0, 1000).unwrap();
    let whole = stream.compute_checksum(1004, 0, 1000).unwrap();
    assert_eq!(one, whole);
    assert_eq!(one, Crc32c::compute(&data[..1000]));
}

#[test]
fn test_block_sizes_agree_over_whole_record() {
    let mut file = tempfile::tempfile().unwrap();
    write_record(&mut file);

    let mut stream = Crc32cStream::new(file).unwrap();
    let reference = stream.compute_checksum(1, 0, 1004).unwrap();
    assert_eq!(stream.compute_checksum(1004, 0, 1004).unwrap(), reference);
    assert_eq!(stream.compute_checksum(7, 0, 1004).unwrap(), reference);
    assert_eq!(stream.compute_checksum(4096, 0, 1004).unwrap(), reference);
}

#[test]
fn test_corrupted_trailer_byte_fails() {
    for position in 1000..1004u64 {
        let mut file = tempfile::tempfile().unwrap();
        let data = write_record(&mut file);

        file.seek(SeekFrom::Start(position)).unwrap();
        file.write_all(&[data[position as usize] ^ 0x01]).unwrap();
        file.flush().unwrap();

        let mut stream = Crc32cStream::new(file).unwrap();
        assert!(
            !stream.validate(64, 0, 1004).unwrap(),
            "trailer byte {} corrupted",
            position
        );
    }
}

#[test]
fn test_corrupted_data_byte_fails() {
    let mut file = tempfile::tempfile().unwrap();
    let data = write_record(&mut file);

    file.seek(SeekFrom::Start(500)).unwrap();
    file.write_all(&[!data[500]]).unwrap();

    let mut stream = Crc32cStream::new(file).unwrap();
    assert!(!stream.validate(64, 0, 1004).unwrap());
}

#[test]
fn test_buffered_file_source() {
    let mut file = tempfile::tempfile().unwrap();
    write_record(&mut file);

    let mut stream =
        Crc32cStream::with_config(BufReader::new(file), EngineConfig::PORTABLE).unwrap();
    assert!(stream.validate(100, 0, 1004).unwrap());
    assert!(stream.validate(3, 0, 1004).unwrap());
}

#[test]
fn test_count_of_four_rejected() {
    let mut file = tempfile::tempfile().unwrap();
    write_record(&mut file);

    let mut stream = Crc32cStream::new(file).unwrap();
    let err = stream.validate(64, 1000, 4).unwrap_err();
    assert!(matches!(err, CrcError::InvalidArgument { .. }));
}

#[cfg(unix)]
#[test]
fn test_write_only_handle_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("write-only.bin");
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .unwrap();

    let err = Crc32cStream::new(file).unwrap_err();
    assert!(matches!(
        err,
        CrcError::UnsupportedSource {
            capability: "readable"
        }
    ));
}

#[test]
fn test_separate_engines_on_separate_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("record.bin");
    let mut file = File::create(&path).unwrap();
    let data = write_record(&mut file);
    drop(file);

    let handles: Vec<_> = (0..4u64)
        .map(|i| {
            let path = path.clone();
            std::thread::spawn(move || {
                let mut stream = Crc32cStream::new(File::open(path).unwrap()).unwrap();
                stream.compute_checksum(64, i * 250, 250).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let start = i * 250;
        assert_eq!(
            handle.join().unwrap(),
            Crc32c::compute(&data[start..start + 250])
        );
    }
}
