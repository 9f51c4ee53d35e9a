use crate::archive::end_record::EndRecord;
use crate::archive::format::{normalize_entry_path, EntryInfo};
use crate::archive::local_entry::LocalFileHeader;
use crate::crc::Crc32;
use crate::error::{Result, ZipError};
use crate::vfs::FsLister;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

/// Archive writer building a stored-method ZIP in memory.
///
/// Members are appended in caller order (local header + raw content each),
/// then [`finalize`] writes the central directory and end record and seals
/// the builder. The writer never touches the filesystem itself; tree walks
/// go through an injected [`FsLister`].
///
/// [`finalize`]: ArchiveWriter::finalize
pub struct ArchiveWriter {
    buf: Vec<u8>,
    entries: Vec<EntryInfo>,
    names: HashSet<String>,
    sealed: bool,
}

impl ArchiveWriter {
    /// Create a new empty archive builder.
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            entries: Vec::new(),
            names: HashSet::new(),
            sealed: false,
        }
    }

    /// Add a file member with the given content.
    pub fn add_file(&mut self, path: &str, data: &[u8]) -> Result<()> {
        self.ensure_open()?;
        let name = normalize_entry_path(path, false)?;
        self.ensure_unique(&name)?;
        if data.len() as u64 > u32::MAX as u64 {
            return Err(ZipError::EntryTooLarge(data.len() as u64));
        }

        let offset = self.next_offset()?;
        let crc32 = Crc32::compute(data);
        let header = LocalFileHeader::new(name.clone(), crc32, data.len() as u32);
        header.write_to(&mut self.buf)?;
        self.buf.extend_from_slice(data);

        debug!(path = %name, size = data.len(), "added file entry");
        self.names.insert(name.clone());
        self.entries
            .push(EntryInfo::file(name, crc32, data.len() as u32, offset));
        Ok(())
    }

    /// Add a directory member (zero-length, trailing slash).
    pub fn add_directory(&mut self, path: &str) -> Result<()> {
        self.ensure_open()?;
        let name = normalize_entry_path(path, true)?;
        self.ensure_unique(&name)?;

        let offset = self.next_offset()?;
        let header = LocalFileHeader::new(name.clone(), 0, 0);
        header.write_to(&mut self.buf)?;

        debug!(path = %name, "added directory entry");
        self.names.insert(name.clone());
        self.entries.push(EntryInfo::directory(name, offset));
        Ok(())
    }

    /// Add a file or a whole directory tree from the injected filesystem.
    ///
    /// A plain file is added under its file name. A directory is walked
    /// recursively, adding every file and subdirectory with paths relative
    /// to `root`. Each directory's children are visited in lexicographic
    /// order so the same tree always produces the same archive bytes.
    pub fn add_tree(&mut self, root: &Path, fs: &dyn FsLister) -> Result<()> {
        let stat = fs.stat(root)?;
        if stat.is_file {
            let name = root
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| ZipError::InvalidPath(root.display().to_string()))?;
            let data = fs.read_all(root)?;
            self.add_file(name, &data)
        } else if stat.is_directory {
            self.walk_tree(root, "", fs)
        } else {
            Err(ZipError::InvalidPath(format!(
                "{}: not a file or directory",
                root.display()
            )))
        }
    }

    fn walk_tree(&mut self, dir: &Path, prefix: &str, fs: &dyn FsLister) -> Result<()> {
        let mut names = fs.list_directory(dir)?;
        names.sort();

        for name in names {
            let child = dir.join(&name);
            let rel = if prefix.is_empty() {
                name
            } else {
                format!("{}/{}", prefix, name)
            };
            let stat = fs.stat(&child)?;
            if stat.is_directory {
                self.add_directory(&rel)?;
                self.walk_tree(&child, &rel, fs)?;
            } else if stat.is_file {
                let data = fs.read_all(&child)?;
                self.add_file(&rel, &data)?;
            } else {
                warn!(path = %child.display(), "skipping special file");
            }
        }
        Ok(())
    }

    /// Write the central directory and end record, seal the builder, and
    /// return the complete archive bytes.
    pub fn finalize(&mut self) -> Result<Vec<u8>> {
        self.ensure_open()?;
        if self.entries.len() > u16::MAX as usize {
            return Err(ZipError::TooManyEntries(self.entries.len()));
        }

        let cd_offset = self.next_offset()?;
        let mut cd_size = 0usize;
        for entry in &self.entries {
            cd_size += entry.write_to(&mut self.buf)?;
        }
        let cd_size = u32::try_from(cd_size).map_err(|_| ZipError::ArchiveTooLarge)?;

        let end = EndRecord::new(self.entries.len() as u16, cd_size, cd_offset);
        end.write_to(&mut self.buf)?;
        self.sealed = true;

        debug!(
            entries = self.entries.len(),
            bytes = self.buf.len(),
            "finalized archive"
        );
        Ok(std::mem::take(&mut self.buf))
    }

    /// Members recorded so far, in insertion order.
    pub fn entries(&self) -> &[EntryInfo] {
        &self.entries
    }

    /// Number of members recorded so far.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether `finalize` has already run.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.sealed {
            return Err(ZipError::ArchiveSealed);
        }
        Ok(())
    }

    fn ensure_unique(&self, name: &str) -> Result<()> {
        if self.names.contains(name) {
            return Err(ZipError::DuplicateEntry(name.to_string()));
        }
        Ok(())
    }

    fn next_offset(&self) -> Result<u32> {
        u32::try_from(self.buf.len()).map_err(|_| ZipError::ArchiveTooLarge)
    }
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_rejected_after_normalization() {
        let mut writer = ArchiveWriter::new();
        writer.add_file("dir/file.txt", b"data1").unwrap();

        let result = writer.add_file("dir\\file.txt", b"data2");
        assert!(matches!(result, Err(ZipError::DuplicateEntry(_))));

        let result = writer.add_file("dir//file.txt", b"data3");
        assert!(matches!(result, Err(ZipError::DuplicateEntry(_))));
    }

    #[test]
    fn test_sealed_writer_rejects_everything() {
        let mut writer = ArchiveWriter::new();
        writer.add_file("a.txt", b"a").unwrap();
        writer.finalize().unwrap();
        assert!(writer.is_sealed());

        assert!(matches!(
            writer.add_file("b.txt", b"b"),
            Err(ZipError::ArchiveSealed)
        ));
        assert!(matches!(
            writer.add_directory("sub"),
            Err(ZipError::ArchiveSealed)
        ));
        assert!(matches!(writer.finalize(), Err(ZipError::ArchiveSealed)));
    }

    #[test]
    fn test_directory_normalized_to_single_slash() {
        let mut writer = ArchiveWriter::new();
        writer.add_directory("sub").unwrap();
        assert_eq!(writer.entries()[0].path, "sub/");

        let result = writer.add_directory("sub/");
        assert!(matches!(result, Err(ZipError::DuplicateEntry(_))));
    }

    #[test]
    fn test_empty_archive_layout() {
        let mut writer = ArchiveWriter::new();
        let bytes = writer.finalize().unwrap();
        // Just the 22-byte end record with zero entries
        assert_eq!(bytes.len(), 22);
        assert_eq!(&bytes[0..4], b"PK\x05\x06");
    }
}
