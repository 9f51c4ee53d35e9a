//! Stowzip: stored-method ZIP archive toolkit
//!
//! Creates, lists, and extracts ZIP archives whose members use the
//! "stored" method (method 0, no compression transform). The container
//! layer is implemented here directly:
//! - Local file headers followed by raw member content
//! - Central directory records carrying Unix attribute bits
//! - End-record location tolerant of trailing comments
//! - CRC-32 verification on every member read
//!
//! Filesystem access stays behind the [`vfs`] capabilities, so the
//! writer and reader themselves only ever move bytes.
//!
//! # Example
//!
//! ```
//! use stowzip::{ArchiveReader, ArchiveWriter};
//!
//! let mut writer = ArchiveWriter::new();
//! writer.add_file("hello.txt", b"Hello, World!")?;
//! writer.add_directory("sub")?;
//! let bytes = writer.finalize()?;
//!
//! let reader = ArchiveReader::open(bytes)?;
//! assert_eq!(reader.read_entry("hello.txt")?, b"Hello, World!");
//! # Ok::<(), stowzip::ZipError>(())
//! ```

// Core modules
pub mod archive;
pub mod cli;
pub mod crc;
pub mod error;
pub mod vfs;

// Re-export commonly used types
pub use archive::{
    ArchiveReader, ArchiveWriter, EndRecord, EntryInfo, ExtractMode, ExtractSummary,
    LocalFileHeader, END_RECORD_SIGNATURE, END_RECORD_SIZE, MAX_COMMENT_LENGTH, METHOD_STORED,
};
pub use crc::Crc32;
pub use error::{Result, ZipError};
pub use vfs::{FileStat, FsLister, FsWriter, LocalFs};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Ensure core types are accessible
        let writer = ArchiveWriter::new();
        assert_eq!(writer.entry_count(), 0);
        assert_eq!(Crc32::compute(b""), 0);
    }
}
