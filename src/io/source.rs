use std::io::{Read, Seek, SeekFrom};

use crate::error::IoError;

/// Trait for positioned reads from an already-open, seekable byte source.
///
/// This abstraction lets the TIFF parser work against files, in-memory
/// buffers, or anything else implementing `Read + Seek`. The parser performs
/// seek/read/seek-back sequences while decoding out-of-line values, so one
/// parse or hash operation needs exclusive use of the source's cursor for its
/// whole duration.
pub trait Source {
    /// Read exactly `buf.len()` bytes at the current position.
    ///
    /// A source that ends before any byte is read reports [`IoError::Eof`];
    /// one that ends mid-read reports [`IoError::ShortRead`].
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), IoError>;

    /// Seek to an absolute byte offset.
    fn seek_to(&mut self, offset: u64) -> Result<(), IoError>;

    /// Current absolute byte offset.
    fn position(&mut self) -> Result<u64, IoError>;
}

/// Any `Read + Seek` works as a source, including `File` and `Cursor`.
impl<T: Read + Seek> Source for T {
    fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), IoError> {
        let mut total = 0;
        while total < buf.len() {
            match self.read(&mut buf[total..]) {
                Ok(0) if total == 0 => return Err(IoError::Eof),
                Ok(0) => {
                    return Err(IoError::ShortRead {
                        expected: buf.len(),
                        actual: total,
                    })
                }
                Ok(n) => total += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(IoError::Io(e)),
            }
        }
        Ok(())
    }

    fn seek_to(&mut self, offset: u64) -> Result<(), IoError> {
        self.seek(SeekFrom::Start(offset))?;
        Ok(())
    }

    fn position(&mut self) -> Result<u64, IoError> {
        Ok(self.stream_position()?)
    }
}

// =============================================================================
// Endian Helper Functions
// =============================================================================
//
// TIFF files can be either little-endian or big-endian, determined by the
// magic bytes at the start of the file. These helpers are used extensively
// by the TIFF parser.

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a little-endian u64 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 8 bytes.
#[inline]
pub fn read_u64_le(bytes: &[u8]) -> u64 {
    u64::from_le_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}

/// Read a big-endian u64 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 8 bytes.
#[inline]
pub fn read_u64_be(bytes: &[u8]) -> u64 {
    u64::from_be_bytes([
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
    ])
}
