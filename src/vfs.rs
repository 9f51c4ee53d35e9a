//! Filesystem capabilities consumed by the archive layer.
//!
//! The container core is side-effect free: the writer walks directory
//! trees and the reader materializes entries through these traits instead
//! of touching `std::fs` directly. Hosts can substitute their own
//! implementations (in-memory trees in tests, sandboxed roots, etc.);
//! [`LocalFs`] is the plain local-disk one the CLI uses.

use crate::error::{Result, ZipError};
use std::fs;
use std::path::Path;

/// What a path is, as reported by [`FsLister::stat`].
#[derive(Debug, Clone, Copy)]
pub struct FileStat {
    pub is_file: bool,
    pub is_directory: bool,
}

/// Read-side filesystem capability used by the writer's tree walk.
pub trait FsLister {
    fn stat(&self, path: &Path) -> Result<FileStat>;

    /// Child names (not paths) of a directory, in no particular order.
    fn list_directory(&self, path: &Path) -> Result<Vec<String>>;

    fn read_all(&self, path: &Path) -> Result<Vec<u8>>;
}

/// Write-side filesystem capability used by extraction.
pub trait FsWriter {
    fn create_directory(&self, path: &Path, recursive: bool) -> Result<()>;

    fn write_all(&self, path: &Path, data: &[u8]) -> Result<()>;
}

/// Local filesystem implementation of both capabilities.
pub struct LocalFs;

impl FsLister for LocalFs {
    fn stat(&self, path: &Path) -> Result<FileStat> {
        let meta = fs::metadata(path)?;
        Ok(FileStat {
            is_file: meta.is_file(),
            is_directory: meta.is_dir(),
        })
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            let name = entry.file_name().into_string().map_err(|name| {
                ZipError::InvalidPath(name.to_string_lossy().into_owned())
            })?;
            names.push(name);
        }
        Ok(names)
    }

    fn read_all(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(path)?)
    }
}

impl FsWriter for LocalFs {
    fn create_directory(&self, path: &Path, recursive: bool) -> Result<()> {
        if recursive {
            fs::create_dir_all(path)?;
        } else {
            fs::create_dir(path)?;
        }
        Ok(())
    }

    fn write_all(&self, path: &Path, data: &[u8]) -> Result<()> {
        Ok(fs::write(path, data)?)
    }
}
