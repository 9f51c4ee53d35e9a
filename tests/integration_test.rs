//! Integration tests for the stowzip library

use std::fs;
use stowzip::{ArchiveReader, ArchiveWriter, LocalFs, ZipError};

#[test]
fn test_basic_archive_roundtrip() {
    // Create archive
    let mut writer = ArchiveWriter::new();
    writer.add_file("test.txt", b"Hello, World!").unwrap();
    writer
        .add_file("data/nested.txt", b"Nested content")
        .unwrap();
    let bytes = writer.finalize().unwrap();

    // Read archive
    let reader = ArchiveReader::open(bytes).unwrap();
    assert_eq!(reader.entry_count(), 2);
    assert!(reader.contains("test.txt"));
    assert!(reader.contains("data/nested.txt"));

    assert_eq!(reader.read_entry("test.txt").unwrap(), b"Hello, World!");
    assert_eq!(
        reader.read_entry("data/nested.txt").unwrap(),
        b"Nested content"
    );
}

#[test]
fn test_listing_order_and_metadata() {
    let mut writer = ArchiveWriter::new();
    writer.add_file("a.txt", &[0x41, 0x42]).unwrap();
    writer.add_directory("sub").unwrap();
    let bytes = writer.finalize().unwrap();

    let reader = ArchiveReader::open(bytes).unwrap();
    let entries = reader.list_entries();
    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].path, "a.txt");
    assert!(!entries[0].is_directory());
    assert_eq!(entries[0].uncompressed_size, 2);
    assert_eq!(entries[0].compressed_size, 2);

    assert_eq!(entries[1].path, "sub/");
    assert!(entries[1].is_directory());
    assert_eq!(entries[1].uncompressed_size, 0);
}

#[test]
fn test_empty_archive() {
    let mut writer = ArchiveWriter::new();
    let bytes = writer.finalize().unwrap();

    let reader = ArchiveReader::open(bytes).unwrap();
    assert_eq!(reader.entry_count(), 0);
    assert!(reader.list_entries().is_empty());
}

#[test]
fn test_sealed_writer() {
    let mut writer = ArchiveWriter::new();
    writer.add_file("a.txt", b"a").unwrap();
    let _bytes = writer.finalize().unwrap();

    assert!(matches!(
        writer.add_file("late.txt", b"late"),
        Err(ZipError::ArchiveSealed)
    ));
    assert!(matches!(writer.finalize(), Err(ZipError::ArchiveSealed)));
}

#[test]
fn test_zero_length_and_binary_content() {
    let binary: Vec<u8> = (0u8..=255).collect();

    let mut writer = ArchiveWriter::new();
    writer.add_file("empty.bin", b"").unwrap();
    writer.add_file("bytes.bin", &binary).unwrap();
    let bytes = writer.finalize().unwrap();

    let reader = ArchiveReader::open(bytes).unwrap();
    assert_eq!(reader.read_entry("empty.bin").unwrap(), b"");
    assert_eq!(reader.read_entry("bytes.bin").unwrap(), binary);
}

#[test]
fn test_missing_entry_lookup() {
    let mut writer = ArchiveWriter::new();
    writer.add_file("present.txt", b"here").unwrap();
    let reader = ArchiveReader::open(writer.finalize().unwrap()).unwrap();

    assert!(reader.get_entry("absent.txt").is_none());
    assert!(matches!(
        reader.read_entry("absent.txt"),
        Err(ZipError::EntryNotFound(_))
    ));
}

#[test]
fn test_add_tree_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("project");
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("readme.md"), b"docs").unwrap();
    fs::write(root.join("src/lib.rs"), b"code").unwrap();
    fs::write(root.join("src/main.rs"), b"more code").unwrap();
    fs::create_dir(root.join("assets")).unwrap();
    fs::write(root.join("assets/logo.bin"), &[1, 2, 3]).unwrap();

    let archive = |root: &std::path::Path| {
        let mut writer = ArchiveWriter::new();
        writer.add_tree(root, &LocalFs).unwrap();
        writer.finalize().unwrap()
    };

    let first = archive(&root);
    let second = archive(&root);
    assert_eq!(first, second);

    // Lexicographic per directory, parents before children
    let reader = ArchiveReader::open(first).unwrap();
    let paths: Vec<&str> = reader.list_entries().iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "assets/",
            "assets/logo.bin",
            "readme.md",
            "src/",
            "src/lib.rs",
            "src/main.rs",
        ]
    );
}

#[test]
fn test_add_tree_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("single.txt");
    fs::write(&file, b"just me").unwrap();

    let mut writer = ArchiveWriter::new();
    writer.add_tree(&file, &LocalFs).unwrap();
    let reader = ArchiveReader::open(writer.finalize().unwrap()).unwrap();

    assert_eq!(reader.entry_count(), 1);
    assert_eq!(reader.read_entry("single.txt").unwrap(), b"just me");
}
