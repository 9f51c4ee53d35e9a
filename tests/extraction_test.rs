//! Extraction behavior: filesystem layout, parent creation, and the
//! explicit fail-fast / best-effort policy split.

use std::fs;
use stowzip::{ArchiveReader, ArchiveWriter, ExtractMode, LocalFs, ZipError};

fn sample_archive() -> Vec<u8> {
    let mut writer = ArchiveWriter::new();
    writer.add_directory("docs").unwrap();
    writer.add_file("docs/guide.txt", b"read me first").unwrap();
    writer.add_file("deep/tree/leaf.bin", &[7u8; 32]).unwrap();
    writer.add_file("root.txt", b"top level").unwrap();
    writer.finalize().unwrap()
}

#[test]
fn test_extract_all_layout() {
    let reader = ArchiveReader::open(sample_archive()).unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("out");

    let summary = reader.extract_all(&dest, &LocalFs).unwrap();
    assert_eq!(summary.files_written, 3);
    assert_eq!(summary.directories_created, 1);
    assert!(summary.failures.is_empty());

    assert!(dest.join("docs").is_dir());
    assert_eq!(
        fs::read(dest.join("docs/guide.txt")).unwrap(),
        b"read me first"
    );
    // Parents appear even without their own directory entries
    assert_eq!(fs::read(dest.join("deep/tree/leaf.bin")).unwrap(), [7u8; 32]);
    assert_eq!(fs::read(dest.join("root.txt")).unwrap(), b"top level");
}

#[test]
fn test_extract_roundtrip_of_tree() {
    // Build a tree, archive it, extract it elsewhere, compare
    let tmp = tempfile::tempdir().unwrap();
    let src = tmp.path().join("src");
    fs::create_dir_all(src.join("nested")).unwrap();
    fs::write(src.join("a.txt"), b"alpha").unwrap();
    fs::write(src.join("nested/b.txt"), b"beta").unwrap();

    let mut writer = ArchiveWriter::new();
    writer.add_tree(&src, &LocalFs).unwrap();
    let reader = ArchiveReader::open(writer.finalize().unwrap()).unwrap();

    let dest = tmp.path().join("dest");
    reader.extract_all(&dest, &LocalFs).unwrap();

    assert_eq!(fs::read(dest.join("a.txt")).unwrap(), b"alpha");
    assert_eq!(fs::read(dest.join("nested/b.txt")).unwrap(), b"beta");
}

/// Corrupt one entry's content so its CRC check fails at extraction.
fn archive_with_one_bad_entry() -> Vec<u8> {
    let mut writer = ArchiveWriter::new();
    writer.add_file("good1.txt", b"ok").unwrap();
    writer.add_file("marker-content.bin", b"MARKERPAYLOAD").unwrap();
    writer.add_file("good2.txt", b"also ok").unwrap();
    let mut bytes = writer.finalize().unwrap();

    let needle = b"MARKERPAYLOAD";
    let pos = bytes
        .windows(needle.len())
        .position(|w| w == needle)
        .unwrap();
    bytes[pos] ^= 0x01;
    bytes
}

#[test]
fn test_fail_fast_aborts_on_first_failure() {
    let reader = ArchiveReader::open(archive_with_one_bad_entry()).unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("out");

    let result = reader.extract_all_with(&dest, &LocalFs, ExtractMode::FailFast);
    assert!(matches!(result, Err(ZipError::CrcMismatch { .. })));

    // The entry before the failure landed; the one after was never reached
    assert!(dest.join("good1.txt").is_file());
    assert!(!dest.join("good2.txt").exists());
}

#[test]
fn test_best_effort_continues_and_reports() {
    let reader = ArchiveReader::open(archive_with_one_bad_entry()).unwrap();
    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("out");

    let summary = reader
        .extract_all_with(&dest, &LocalFs, ExtractMode::BestEffort)
        .unwrap();

    assert_eq!(summary.files_written, 2);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].0, "marker-content.bin");
    assert!(matches!(
        summary.failures[0].1,
        ZipError::CrcMismatch { .. }
    ));

    assert_eq!(fs::read(dest.join("good1.txt")).unwrap(), b"ok");
    assert_eq!(fs::read(dest.join("good2.txt")).unwrap(), b"also ok");
    assert!(!dest.join("marker-content.bin").exists());
}

#[test]
fn test_extract_directory_only_archive() {
    let mut writer = ArchiveWriter::new();
    writer.add_directory("a").unwrap();
    writer.add_directory("a/b").unwrap();
    let reader = ArchiveReader::open(writer.finalize().unwrap()).unwrap();

    let tmp = tempfile::tempdir().unwrap();
    let dest = tmp.path().join("out");
    let summary = reader.extract_all(&dest, &LocalFs).unwrap();

    assert_eq!(summary.files_written, 0);
    assert_eq!(summary.directories_created, 2);
    assert!(dest.join("a/b").is_dir());
}
