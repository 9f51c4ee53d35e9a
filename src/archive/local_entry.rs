use crate::archive::cursor::SliceCursor;
use crate::archive::format::{DOS_DATE, DOS_TIME, METHOD_STORED, VERSION_NEEDED};
use crate::error::{Result, ZipError};
use std::io::Write;

/// Local file header signature "PK\x03\x04"
pub const LOCAL_HEADER_SIGNATURE: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

/// Fixed portion of a local file header (name bytes follow)
pub const LOCAL_HEADER_FIXED_SIZE: usize = 30;

/// Local File Header
///
/// Precedes each member's raw content in the archive. Under the stored
/// method the content follows the header verbatim, so the compressed and
/// uncompressed sizes are always equal.
///
/// Structure (30 fixed bytes + name):
/// - Signature: "PK\x03\x04" (4 bytes)
/// - Version needed: uint16
/// - General purpose flags: uint16 (always 0)
/// - Compression method: uint16 (always 0, stored)
/// - DOS time / date: uint16 + uint16 (fixed placeholder)
/// - CRC-32: uint32
/// - Compressed size: uint32
/// - Uncompressed size: uint32
/// - Name length: uint16
/// - Extra field length: uint16 (always 0 when written here)
/// - Name: variable (UTF-8, forward slashes)
#[derive(Debug, Clone)]
pub struct LocalFileHeader {
    pub path: String,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
}

impl LocalFileHeader {
    /// Header for a stored member of `size` content bytes.
    pub fn new(path: String, crc32: u32, size: u32) -> Self {
        Self {
            path,
            crc32,
            compressed_size: size,
            uncompressed_size: size,
        }
    }

    /// Write the header to a writer, returning the bytes written.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<usize> {
        let name = self.path.as_bytes();
        if name.len() > u16::MAX as usize {
            return Err(ZipError::InvalidPath(format!(
                "{}: name longer than {} bytes",
                self.path,
                u16::MAX
            )));
        }

        writer.write_all(&LOCAL_HEADER_SIGNATURE)?;
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
        writer.write_all(name)?;

        Ok(LOCAL_HEADER_FIXED_SIZE + name.len())
    }

    /// Read a header at the cursor's position, leaving the cursor at the
    /// first content byte.
    pub fn read_from(cursor: &mut SliceCursor<'_>) -> Result<Self> {
        let sig = cursor.read_bytes(4)?;
        if sig != LOCAL_HEADER_SIGNATURE {
            return Err(ZipError::MalformedEntry(
                "invalid local file header signature".to_string(),
            ));
        }

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

        let path = String::from_utf8(cursor.read_bytes(name_len as usize)?.to_vec())
            .map_err(|e| ZipError::MalformedEntry(format!("invalid UTF-8 in name: {}", e)))?;
        cursor.skip(extra_len as usize)?;

        Ok(Self {
            path,
            crc32,
            compressed_size,
            uncompressed_size,
        })
    }

    /// Total size of this header when written.
    pub fn header_size(&self) -> usize {
        LOCAL_HEADER_FIXED_SIZE + self.path.len()
    }
}
