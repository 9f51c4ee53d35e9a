//! Generate seed corpus for fuzzing

use std::fs;
use stowzip::ArchiveWriter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let corpus_dir = "fuzz/corpus/fuzz_archive_parse";
    fs::create_dir_all(corpus_dir)?;

    println!("Generating seed corpus...");

    // Seed 1: Empty archive (no entries)
    {
        let path = format!("{}/seed_empty.zip", corpus_dir);
        let mut writer = ArchiveWriter::new();
        fs::write(&path, writer.finalize()?)?;
        println!("✓ Generated: {}", path);
    }

    // Seed 2: Single small file
    {
        let path = format!("{}/seed_single_small.zip", corpus_dir);
        let mut writer = ArchiveWriter::new();
        writer.add_file("test.txt", b"Hello, World!")?;
        fs::write(&path, writer.finalize()?)?;
        println!("✓ Generated: {}", path);
    }

    // Seed 3: Multiple files and a directory
    {
        let path = format!("{}/seed_multi.zip", corpus_dir);
        let mut writer = ArchiveWriter::new();
        writer.add_file("file1.txt", b"First file")?;
        writer.add_directory("dir")?;
        writer.add_file("dir/file2.txt", b"Second file in directory")?;
        fs::write(&path, writer.finalize()?)?;
        println!("✓ Generated: {}", path);
    }

    // Seed 4: Binary data
    {
        let path = format!("{}/seed_binary.zip", corpus_dir);
        let mut writer = ArchiveWriter::new();
        let binary_data: Vec<u8> = (0u8..=255).collect();
        writer.add_file("binary.bin", &binary_data)?;
        fs::write(&path, writer.finalize()?)?;
        println!("✓ Generated: {}", path);
    }

    // Seed 5: Zero-length file
    {
        let path = format!("{}/seed_zero_length.zip", corpus_dir);
        let mut writer = ArchiveWriter::new();
        writer.add_file("empty.bin", b"")?;
        fs::write(&path, writer.finalize()?)?;
        println!("✓ Generated: {}", path);
    }

    println!("Seed corpus complete");
    Ok(())
}
