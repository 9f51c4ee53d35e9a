use crate::archive::cursor::SliceCursor;
use crate::error::{Result, ZipError};
use std::io::Write;

/// End-of-central-directory signature "PK\x05\x06"
pub const END_RECORD_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];

/// End record size in bytes, without a trailing comment
pub const END_RECORD_SIZE: usize = 22;

/// Maximum archive comment length the format allows
pub const MAX_COMMENT_LENGTH: usize = 65535;

/// End of Central Directory Record
///
/// Located at the very end of the archive, possibly followed by a comment
/// of up to 64 KiB. Readers locate it by scanning backward from the end of
/// the buffer for its signature, then use it to find the central directory
/// without walking every local header.
///
/// Structure (22 bytes fixed):
/// - Signature: "PK\x05\x06" (4 bytes)
/// - Disk number / disk with central directory: uint16 + uint16 (both 0)
/// - Entries on this disk / total entries: uint16 + uint16 (equal)
/// - Central directory size: uint32
/// - Central directory offset: uint32
/// - Comment length: uint16
#[derive(Debug, Clone)]
pub struct EndRecord {
    pub entry_count: u16,
    pub central_directory_size: u32,
    pub central_directory_offset: u32,
}

impl EndRecord {
    /// Create a new end record.
    pub fn new(entry_count: u16, central_directory_size: u32, central_directory_offset: u32) -> Self {
        Self {
            entry_count,
            central_directory_size,
            central_directory_offset,
        }
    }

    /// Write the record (zero-length comment) to a writer.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<usize> {
        writer.write_all(&END_RECORD_SIGNATURE)?;
        writer.write_all(&0u16.to_le_bytes())?; // disk number
        writer.write_all(&0u16.to_le_bytes())?; // disk with central directory
        writer.write_all(&self.entry_count.to_le_bytes())?;
        writer.write_all(&self.entry_count.to_le_bytes())?;
        writer.write_all(&self.central_directory_size.to_le_bytes())?;
        writer.write_all(&self.central_directory_offset.to_le_bytes())?;
        writer.write_all(&0u16.to_le_bytes())?; // comment length

        Ok(END_RECORD_SIZE)
    }

    /// Read a record at the cursor's position.
    pub fn read_from(cursor: &mut SliceCursor<'_>) -> Result<Self> {
        let sig = cursor.read_bytes(4)?;
        if sig != END_RECORD_SIGNATURE {
            return Err(ZipError::MalformedArchive(
                "invalid end record signature".to_string(),
            ));
        }

        let disk_number = cursor.read_u16()?;
        let disk_with_cd = cursor.read_u16()?;
        let disk_entries = cursor.read_u16()?;
        let total_entries = cursor.read_u16()?;
        let central_directory_size = cursor.read_u32()?;
        let central_directory_offset = cursor.read_u32()?;
        let _comment_len = cursor.read_u16()?;

        if disk_number != 0 || disk_with_cd != 0 {
            return Err(ZipError::MalformedArchive(
                "multi-volume archives are not supported".to_string(),
            ));
        }
        if disk_entries != total_entries {
            return Err(ZipError::MalformedArchive(format!(
                "end record entry counts disagree: {} on disk, {} total",
                disk_entries, total_entries
            )));
        }

        Ok(Self {
            entry_count: total_entries,
            central_directory_size,
            central_directory_offset,
        })
    }

    /// Locate and parse the end record in an archive buffer.
    ///
    /// Fast path: the record sits at the buffer's tail with a zero-length
    /// comment. Otherwise scan backward across the maximum comment window;
    /// the last signature in the buffer wins, so trailing bytes appended
    /// after a valid archive do not hide it. Returns the record and its
    /// offset, or `NotAnArchive` when no signature parses in the window.
    pub fn locate(buf: &[u8]) -> Result<(Self, usize)> {
        if buf.len() < END_RECORD_SIZE {
            return Err(ZipError::NotAnArchive);
        }

        let tail = buf.len() - END_RECORD_SIZE;
        if buf[tail..tail + 4] == END_RECORD_SIGNATURE && buf[tail + 20..tail + 22] == [0, 0] {
            let mut cursor = SliceCursor::new(buf);
            cursor.seek(tail)?;
            let record = Self::read_from(&mut cursor)?;
            return Ok((record, tail));
        }

        let window_start = buf.len().saturating_sub(MAX_COMMENT_LENGTH + END_RECORD_SIZE);
        for pos in (window_start..=tail).rev() {
            if buf[pos..pos + 4] != END_RECORD_SIGNATURE {
                continue;
            }
            let mut cursor = SliceCursor::new(buf);
            cursor.seek(pos)?;
            if let Ok(record) = Self::read_from(&mut cursor) {
                return Ok((record, pos));
            }
        }

        Err(ZipError::NotAnArchive)
    }
}
