use std::io;
use thiserror::Error;

/// Result type for archive operations
pub type Result<T> = std::result::Result<T, ZipError>;

/// Unified error type for all archive operations
#[derive(Debug, Error)]
pub enum ZipError {
    // Writer misuse
    #[error("Invalid entry path: {0}")]
    InvalidPath(String),

    #[error("Duplicate entry name: {0}")]
    DuplicateEntry(String),

    #[error("Archive already finalized")]
    ArchiveSealed,

    #[error("Entry too large for a 32-bit archive: {0} bytes")]
    EntryTooLarge(u64),

    #[error("Archive would exceed the 32-bit offset limit")]
    ArchiveTooLarge,

    #[error("Too many entries for one archive: {0} (max 65535)")]
    TooManyEntries(usize),

    // Reader/parsing failures
    #[error("Truncated input: needed {needed} bytes, {remaining} remain")]
    TruncatedInput { needed: usize, remaining: usize },

    #[error("Malformed entry: {0}")]
    MalformedEntry(String),

    #[error("Not a ZIP archive: no end-of-central-directory record found")]
    NotAnArchive,

    #[error("Malformed archive: {0}")]
    MalformedArchive(String),

    #[error("CRC mismatch: expected {expected:08x}, got {actual:08x}")]
    CrcMismatch { expected: u32, actual: u32 },

    #[error("Entry not found in archive: {0}")]
    EntryNotFound(String),

    // I/O errors (filesystem collaborators)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
