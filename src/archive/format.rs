use crate::archive::cursor::SliceCursor;
use crate::error::{Result, ZipError};
use std::io::Write;

/// Central directory record signature "PK\x01\x02"
pub const CENTRAL_DIR_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x01, 0x02];

/// Minimum version needed to extract: 2.0, plain stored entries
pub const VERSION_NEEDED: u16 = 20;

/// Version made by: Unix host, PKZIP 3.0 (the upper byte selects the attribute mapping)
pub const VERSION_MADE_BY: u16 = 0x031E;

/// Compression method 0: content stored verbatim
pub const METHOD_STORED: u16 = 0;

/// Fixed placeholder timestamp (1980-01-01 00:00). The format carries DOS
/// time fields but nothing in this container depends on them.
pub const DOS_TIME: u16 = 0;
pub const DOS_DATE: u16 = 0x21;

/// Unix mode bits carried in the upper half of the external attributes
pub const MODE_FILE: u32 = 0o100644;
pub const MODE_DIR: u32 = 0o40755;

/// MS-DOS directory bit in the low byte of the external attributes
pub const MSDOS_DIR_BIT: u32 = 0x10;

/// Fixed portion of a central directory record (name bytes follow)
pub const CENTRAL_DIR_FIXED_SIZE: usize = 46;

/// Normalize an entry path to the archive's forward-slash form.
///
/// Backslashes become forward slashes; empty and `.` segments are dropped.
/// Absolute paths, drive-letter prefixes, `..` segments, NUL bytes, and
/// paths that normalize to nothing are rejected. With `trailing_dir` the
/// result carries exactly one trailing slash.
pub fn normalize_entry_path(path: &str, trailing_dir: bool) -> Result<String> {
    if path.contains('\0') {
        return Err(ZipError::InvalidPath(format!(
            "{}: contains NUL byte",
            path.escape_default()
        )));
    }

    let unified = path.replace('\\', "/");
    if unified.starts_with('/') {
        return Err(ZipError::InvalidPath(format!("{}: absolute path", path)));
    }
    let bytes = unified.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return Err(ZipError::InvalidPath(format!(
            "{}: drive-letter prefix",
            path
        )));
    }

    let mut segments = Vec::new();
    for segment in unified.split('/') {
        match segment {
            "" | "." => continue,
            ".." => {
                return Err(ZipError::InvalidPath(format!(
                    "{}: parent traversal",
                    path
                )))
            }
            s => segments.push(s),
        }
    }
    if segments.is_empty() {
        return Err(ZipError::InvalidPath(format!("{}: empty path", path)));
    }

    let mut normalized = segments.join("/");
    if trailing_dir {
        normalized.push('/');
    }
    Ok(normalized)
}

/// Central directory record, doubling as the public member descriptor.
///
/// One per member, written in insertion order when the archive is
/// finalized. Directory members end in `/` and have zero-length content.
#[derive(Debug, Clone)]
pub struct EntryInfo {
    pub path: String,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub local_header_offset: u32,
    pub external_attrs: u32,
}

impl EntryInfo {
    /// Record for a regular file member.
    pub fn file(path: String, crc32: u32, size: u32, local_header_offset: u32) -> Self {
        Self {
            path,
            crc32,
            compressed_size: size,
            uncompressed_size: size,
            local_header_offset,
            external_attrs: MODE_FILE << 16,
        }
    }

    /// Record for a directory member.
    pub fn directory(path: String, local_header_offset: u32) -> Self {
        Self {
            path,
            crc32: 0,
            compressed_size: 0,
            uncompressed_size: 0,
            local_header_offset,
            external_attrs: (MODE_DIR << 16) | MSDOS_DIR_BIT,
        }
    }

    /// Directory members carry a trailing slash.
    pub fn is_directory(&self) -> bool {
        self.path.ends_with('/')
    }

    /// Unix permission bits from the external attributes.
    pub fn unix_mode(&self) -> u32 {
        self.external_attrs >> 16
    }

    /// Write the record to a writer, returning the bytes written.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<usize> {
        let name = self.path.as_bytes();
        if name.len() > u16::MAX as usize {
            return Err(ZipError::InvalidPath(format!(
                "{}: name longer than {} bytes",
                self.path,
                u16::MAX
            )));
        }

        writer.write_all(&CENTRAL_DIR_SIGNATURE)?;
        writer.write_all(&VERSION_MADE_BY.to_le_bytes())?;
        writer.write_all(&VERSION_NEEDED.to_le_bytes())?;
        writer.write_all(&0u16.to_le_bytes())?; // general purpose flags
        writer.write_all(&METHOD_STORED.to_le_bytes())?;
        writer.write_all(&DOS_TIME.to_le_bytes())?;
        writer.write_all(&DOS_DATE.to_le_bytes())?;
        writer.write_all(&self.crc32.to_le_bytes())?;
        writer.write_all(&self.compressed_size.to_le_bytes())?;
        writer.write_all(&self.uncompressed_size.to_le_bytes())?;
        writer.write_all(&(name.len() as u16).to_le_bytes())?;
        writer.write_all(&0u16.to_le_bytes())?; // extra field length
        writer.write_all(&0u16.to_le_bytes())?; // comment length
        writer.write_all(&0u16.to_le_bytes())?; // disk number start
        writer.write_all(&0u16.to_le_bytes())?; // internal attributes
        writer.write_all(&self.external_attrs.to_le_bytes())?;
        writer.write_all(&self.local_header_offset.to_le_bytes())?;
        writer.write_all(name)?;

        Ok(CENTRAL_DIR_FIXED_SIZE + name.len())
    }

    /// Read one record at the cursor's position.
    pub fn read_from(cursor: &mut SliceCursor<'_>) -> Result<Self> {
        let sig = cursor.read_bytes(4)?;
        if sig != CENTRAL_DIR_SIGNATURE {
            return Err(ZipError::MalformedEntry(
                "invalid central directory record signature".to_string(),
            ));
        }

        let _version_made_by = cursor.read_u16()?;
        let _version_needed = cursor.read_u16()?;
        let _flags = cursor.read_u16()?;
        let method = cursor.read_u16()?;
        let _dos_time = cursor.read_u16()?;
        let _dos_date = cursor.read_u16()?;
        let crc32 = cursor.read_u32()?;
        let compressed_size = cursor.read_u32()?;
        let uncompressed_size = cursor.read_u32()?;
        let name_len = cursor.read_u16()?;
        let extra_len = cursor.read_u16()?;
        let comment_len = cursor.read_u16()?;
        let _disk_start = cursor.read_u16()?;
        let _internal_attrs = cursor.read_u16()?;
        let external_attrs = cursor.read_u32()?;
        let local_header_offset = cursor.read_u32()?;

        if method != METHOD_STORED {
            return Err(ZipError::MalformedEntry(format!(
                "unsupported compression method: {}",
                method
            )));
        }
        if compressed_size != uncompressed_size {
            return Err(ZipError::MalformedEntry(format!(
                "stored entry sizes disagree: {} compressed, {} uncompressed",
                compressed_size, uncompressed_size
            )));
        }
        if name_len == 0 {
            return Err(ZipError::MalformedEntry("empty entry name".to_string()));
        }

        let path = String::from_utf8(cursor.read_bytes(name_len as usize)?.to_vec())
            .map_err(|e| ZipError::MalformedEntry(format!("invalid UTF-8 in name: {}", e)))?;
        cursor.skip(extra_len as usize)?;
        cursor.skip(comment_len as usize)?;

        Ok(Self {
            path,
            crc32,
            compressed_size,
            uncompressed_size,
            local_header_offset,
            external_attrs,
        })
    }
}
