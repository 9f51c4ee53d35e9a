use crate::archive::cursor::SliceCursor;
use crate::archive::end_record::EndRecord;
use crate::archive::format::{normalize_entry_path, EntryInfo};
use crate::archive::local_entry::LocalFileHeader;
use crate::crc::Crc32;
use crate::error::{Result, ZipError};
use crate::vfs::FsWriter;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

/// Policy for per-entry failures during extraction.
///
/// `FailFast` aborts the whole extraction on the first failing entry.
/// `BestEffort` continues past it and reports every failure in the
/// returned [`ExtractSummary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    FailFast,
    BestEffort,
}

/// Outcome of an [`ArchiveReader::extract_all_with`] run.
#[derive(Debug, Default)]
pub struct ExtractSummary {
    pub files_written: usize,
    pub directories_created: usize,
    pub failures: Vec<(String, ZipError)>,
}

/// Archive reader with O(1) member lookup.
///
/// `open` parses the whole central directory up front; a structurally
/// broken archive is rejected there and never partially exposed. Member
/// content is materialized lazily per [`read_entry`], with the CRC checked
/// on every read.
///
/// [`read_entry`]: ArchiveReader::read_entry
pub struct ArchiveReader {
    buf: Vec<u8>,
    entries: Vec<EntryInfo>,
    index: HashMap<String, usize>,
}

impl ArchiveReader {
    /// Open an archive from its complete byte buffer.
    pub fn open(bytes: Vec<u8>) -> Result<Self> {
        let (end, end_offset) = EndRecord::locate(&bytes)?;

        let cd_offset = end.central_directory_offset as usize;
        let cd_size = end.central_directory_size as usize;
        if cd_offset.checked_add(cd_size) != Some(end_offset) {
            return Err(ZipError::MalformedArchive(format!(
                "central directory ({} bytes at offset {}) does not end at the end record (offset {})",
                cd_size, cd_offset, end_offset
            )));
        }

        let mut cursor = SliceCursor::new(&bytes);
        cursor.seek(cd_offset)?;

        let mut entries = Vec::with_capacity(end.entry_count as usize);
        let mut index = HashMap::with_capacity(end.entry_count as usize);
        for i in 0..end.entry_count {
            let entry = EntryInfo::read_from(&mut cursor).map_err(|e| {
                ZipError::MalformedArchive(format!("central directory record {}: {}", i, e))
            })?;
            if index.insert(entry.path.clone(), entries.len()).is_some() {
                return Err(ZipError::MalformedArchive(format!(
                    "duplicate entry name: {}",
                    entry.path
                )));
            }
            entries.push(entry);
        }
        if cursor.position() != end_offset {
            return Err(ZipError::MalformedArchive(format!(
                "central directory records span {} bytes, end record declares {}",
                cursor.position() - cd_offset,
                cd_size
            )));
        }

        debug!(entries = entries.len(), "opened archive");
        Ok(Self {
            buf: bytes,
            entries,
            index,
        })
    }

    /// Member descriptors in archive order. O(1) after `open`.
    pub fn list_entries(&self) -> &[EntryInfo] {
        &self.entries
    }

    /// Number of members in the archive.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Check whether a member exists.
    pub fn contains(&self, path: &str) -> bool {
        self.index.contains_key(path) || self.index.contains_key(&path.replace('\\', "/"))
    }

    /// Get a member descriptor without materializing content.
    pub fn get_entry(&self, path: &str) -> Option<&EntryInfo> {
        self.lookup(path).ok()
    }

    /// Read one member's content, verifying its CRC-32.
    ///
    /// The local header is re-parsed at its recorded offset and must agree
    /// with the central directory record; disagreement means the archive
    /// was truncated or rewritten underneath its directory.
    pub fn read_entry(&self, path: &str) -> Result<Vec<u8>> {
        let entry = self.lookup(path)?;

        let mut cursor = SliceCursor::new(&self.buf);
        cursor.seek(entry.local_header_offset as usize)?;
        let header = LocalFileHeader::read_from(&mut cursor)?;
        if header.path != entry.path
            || header.crc32 != entry.crc32
            || header.compressed_size != entry.compressed_size
            || header.uncompressed_size != entry.uncompressed_size
        {
            return Err(ZipError::MalformedArchive(format!(
                "local header for `{}` disagrees with the central directory",
                entry.path
            )));
        }

        let data = cursor.read_bytes(entry.compressed_size as usize)?;
        let actual = Crc32::compute(data);
        if actual != entry.crc32 {
            return Err(ZipError::CrcMismatch {
                expected: entry.crc32,
                actual,
            });
        }

        debug!(path = %entry.path, size = data.len(), "read entry");
        Ok(data.to_vec())
    }

    /// Extract every member under `dest`, aborting on the first failure.
    pub fn extract_all(&self, dest: &Path, fs: &dyn FsWriter) -> Result<ExtractSummary> {
        self.extract_all_with(dest, fs, ExtractMode::FailFast)
    }

    /// Extract every member under `dest` with an explicit failure policy.
    ///
    /// Directory members become directories (created recursively); file
    /// members are CRC-verified and written with parents created as
    /// needed. Member names are re-validated before any filesystem call,
    /// so archives carrying absolute or parent-escaping names cannot write
    /// outside `dest`.
    pub fn extract_all_with(
        &self,
        dest: &Path,
        fs: &dyn FsWriter,
        mode: ExtractMode,
    ) -> Result<ExtractSummary> {
        let mut summary = ExtractSummary::default();
        for entry in &self.entries {
            match self.extract_entry(entry, dest, fs) {
                Ok(true) => summary.files_written += 1,
                Ok(false) => summary.directories_created += 1,
                Err(err) => match mode {
                    ExtractMode::FailFast => return Err(err),
                    ExtractMode::BestEffort => {
                        warn!(path = %entry.path, error = %err, "extraction failed, continuing");
                        summary.failures.push((entry.path.clone(), err));
                    }
                },
            }
        }
        Ok(summary)
    }

    /// Returns true when a file was written, false for a directory.
    fn extract_entry(&self, entry: &EntryInfo, dest: &Path, fs: &dyn FsWriter) -> Result<bool> {
        // Archives from elsewhere may carry hostile names; nothing touches
        // the filesystem unless the name survives the writer's own rules.
        let safe = normalize_entry_path(&entry.path, entry.is_directory())?;
        if safe != entry.path {
            return Err(ZipError::InvalidPath(entry.path.clone()));
        }

        let target = dest.join(&entry.path);
        if entry.is_directory() {
            fs.create_directory(&target, true)?;
            Ok(false)
        } else {
            if let Some(parent) = target.parent() {
                fs.create_directory(parent, true)?;
            }
            let data = self.read_entry(&entry.path)?;
            fs.write_all(&target, &data)?;
            Ok(true)
        }
    }

    fn lookup(&self, path: &str) -> Result<&EntryInfo> {
        let normalized = path.replace('\\', "/");
        self.index
            .get(&normalized)
            .or_else(|| self.index.get(path))
            .map(|&i| &self.entries[i])
            .ok_or_else(|| ZipError::EntryNotFound(path.to_string()))
    }
}
