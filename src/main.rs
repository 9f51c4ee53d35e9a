//! Command-line entry point for stowzip.
//!
//! Maps the `-c` / `-d` / `-l` actions onto the archive writer and
//! reader, keeping all filesystem work at this boundary: the library
//! only ever sees byte buffers and the injected [`LocalFs`] capability.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;

use stowzip::cli::{archive_output_path, extract_output_dir, Cli};
use stowzip::{ArchiveReader, ArchiveWriter, ExtractMode, LocalFs};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(input) = cli.compress.as_deref() {
        compress(input)
    } else if let Some(archive) = cli.extract.as_deref() {
        extract(archive, cli.keep_going)
    } else if let Some(archive) = cli.list.as_deref() {
        list(archive, cli.verbose)
    } else {
        unreachable!("clap enforces exactly one action")
    }
}

/// Pack a file or directory tree into `<input>.zip`.
fn compress(input: &Path) -> Result<()> {
    let mut writer = ArchiveWriter::new();
    writer
        .add_tree(input, &LocalFs)
        .with_context(|| format!("failed to archive {}", input.display()))?;

    for entry in writer.entries() {
        eprintln!("  adding: {}", entry.path);
    }

    let entry_count = writer.entry_count();
    let bytes = writer.finalize()?;
    let output = archive_output_path(input);
    fs::write(&output, &bytes).with_context(|| format!("failed to write {}", output.display()))?;

    println!(
        "{}: {} entries, {} bytes",
        output.display(),
        entry_count,
        bytes.len()
    );
    Ok(())
}

/// Extract an archive into `<archive-basename>/`.
fn extract(archive: &Path, keep_going: bool) -> Result<()> {
    let bytes =
        fs::read(archive).with_context(|| format!("failed to read {}", archive.display()))?;
    let reader = ArchiveReader::open(bytes)
        .with_context(|| format!("failed to open {}", archive.display()))?;

    let dest = extract_output_dir(archive);
    fs::create_dir_all(&dest)
        .with_context(|| format!("failed to create {}", dest.display()))?;

    for entry in reader.list_entries() {
        eprintln!("  extracting: {}", entry.path);
    }

    let mode = if keep_going {
        ExtractMode::BestEffort
    } else {
        ExtractMode::FailFast
    };
    let summary = reader
        .extract_all_with(&dest, &LocalFs, mode)
        .with_context(|| format!("failed to extract into {}", dest.display()))?;

    for (path, err) in &summary.failures {
        eprintln!("  failed: {}: {}", path, err);
    }
    println!(
        "{}: {} files, {} directories",
        dest.display(),
        summary.files_written,
        summary.directories_created
    );

    if !summary.failures.is_empty() {
        bail!("{} entries failed to extract", summary.failures.len());
    }
    Ok(())
}

/// List archive contents, optionally with a size/checksum table.
fn list(archive: &Path, verbose: bool) -> Result<()> {
    let bytes =
        fs::read(archive).with_context(|| format!("failed to read {}", archive.display()))?;
    let reader = ArchiveReader::open(bytes)
        .with_context(|| format!("failed to open {}", archive.display()))?;

    if !verbose {
        for entry in reader.list_entries() {
            println!("{}", entry.path);
        }
        return Ok(());
    }

    println!("{:>10}  {:>8}  Name", "Length", "CRC-32");
    println!("{}", "-".repeat(44));

    let mut total = 0u64;
    let mut file_count = 0usize;
    for entry in reader.list_entries() {
        println!(
            "{:>10}  {:08x}  {}",
            entry.uncompressed_size, entry.crc32, entry.path
        );
        if !entry.is_directory() {
            total += entry.uncompressed_size as u64;
            file_count += 1;
        }
    }

    println!("{}", "-".repeat(44));
    println!("{:>10}  {:>8}  {} files", total, "", file_count);
    Ok(())
}
