//! TIFF header parsing.
//!
//! The header determines everything the rest of the parser needs:
//! byte order, classic TIFF vs BigTIFF field widths, and the offset of the
//! first directory.
//!
//! # TIFF Header Structure
//!
//! ## Classic TIFF (8 bytes)
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD (4 bytes)
//! ```
//!
//! ## BigTIFF (16 bytes)
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Version (43 = 0x002B)
//! Bytes 4-5: Offset byte size (must be 8)
//! Bytes 6-7: Reserved (must be 0)
//! Bytes 8-15: Offset to first IFD (8 bytes)
//! ```

use tracing::debug;

use crate::error::{FormatError, IoError, TiffError};
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, read_u64_be, read_u64_le, Source};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// Version number for classic TIFF
const VERSION_TIFF: u16 = 42;

/// Version number for BigTIFF
const VERSION_BIGTIFF: u16 = 43;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) of a TIFF file.
///
/// TIFF files declare their byte order in the first two bytes of the header.
/// All multi-byte values in the file must be read respecting this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    /// Read a u64 from a byte slice using this byte order.
    #[inline]
    pub fn read_u64(self, bytes: &[u8]) -> u64 {
        match self {
            ByteOrder::LittleEndian => read_u64_le(bytes),
            ByteOrder::BigEndian => read_u64_be(bytes),
        }
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF file header.
///
/// Contains the essential information needed to begin walking IFDs:
/// - Byte order for reading all subsequent values
/// - Whether this is classic TIFF or BigTIFF (affects field widths)
/// - Location of the first IFD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the file
    pub byte_order: ByteOrder,

    /// Whether this is a BigTIFF file (64-bit offsets)
    pub big_tiff: bool,

    /// Offset of the first IFD in the file
    pub first_dir_offset: u64,
}

impl TiffHeader {
    /// Read and validate a TIFF header from the start of a source.
    ///
    /// Seeks to offset 0, then reads 8 bytes (classic) or 16 bytes (BigTIFF).
    /// A stream too short to hold a header is classified as an unsupported
    /// format rather than bad data: it cannot be a TIFF at all.
    ///
    /// # Errors
    /// - [`FormatError::UnrecognizedMagic`] if the byte order marker is not II or MM
    /// - [`FormatError::UnrecognizedVersion`] if the version is not 42 or 43
    /// - [`FormatError::BadBigTiffHeader`] if a BigTIFF offset size is not 8
    ///   or the reserved field is not 0
    /// - [`FormatError::TruncatedHeader`] if the stream ends inside the header
    pub fn read_from<S: Source>(source: &mut S) -> Result<Self, TiffError> {
        source.seek_to(0)?;

        let mut magic_bytes = [0u8; 2];
        read_header_bytes(source, &mut magic_bytes)?;

        // The marker is palindromic per byte order, so reading it LE is fine
        let magic = u16::from_le_bytes(magic_bytes);
        let byte_order = match magic {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(FormatError::UnrecognizedMagic(magic).into()),
        };

        let mut version_bytes = [0u8; 2];
        read_header_bytes(source, &mut version_bytes)?;
        let version = byte_order.read_u16(&version_bytes);

        let big_tiff = match version {
            VERSION_TIFF => false,
            VERSION_BIGTIFF => true,
            _ => return Err(FormatError::UnrecognizedVersion(version).into()),
        };

        if big_tiff {
            let mut buf = [0u8; 4];
            read_header_bytes(source, &mut buf)?;
            let offset_size = byte_order.read_u16(&buf[0..2]);
            let reserved = byte_order.read_u16(&buf[2..4]);
            if offset_size != 8 || reserved != 0 {
                return Err(FormatError::BadBigTiffHeader.into());
            }
        }

        let first_dir_offset = if big_tiff {
            let mut buf = [0u8; 8];
            read_header_bytes(source, &mut buf)?;
            byte_order.read_u64(&buf)
        } else {
            let mut buf = [0u8; 4];
            read_header_bytes(source, &mut buf)?;
            byte_order.read_u32(&buf) as u64
        };

        debug!(
            ?byte_order,
            big_tiff, first_dir_offset, "parsed TIFF header"
        );

        Ok(TiffHeader {
            byte_order,
            big_tiff,
            first_dir_offset,
        })
    }

    /// Width of the entry-count field at the start of an IFD.
    ///
    /// Classic TIFF: 2 bytes (u16). BigTIFF: 8 bytes (u64).
    #[inline]
    pub const fn dir_count_size(&self) -> usize {
        if self.big_tiff {
            8
        } else {
            2
        }
    }

    /// Width of the per-entry element count field.
    ///
    /// Classic TIFF: 4 bytes (u32). BigTIFF: 8 bytes (u64).
    #[inline]
    pub const fn entry_count_size(&self) -> usize {
        if self.big_tiff {
            8
        } else {
            4
        }
    }

    /// Width of the inline value/offset field in an IFD entry.
    ///
    /// This is also the inline storage threshold: values no longer than
    /// this are stored directly in the entry.
    #[inline]
    pub const fn value_field_size(&self) -> usize {
        if self.big_tiff {
            8
        } else {
            4
        }
    }

    /// Width of the next-IFD offset field at the end of an IFD.
    ///
    /// Classic TIFF: 4 bytes (u32). BigTIFF: 8 bytes (u64).
    #[inline]
    pub const fn next_offset_size(&self) -> usize {
        if self.big_tiff {
            8
        } else {
            4
        }
    }
}

/// Header reads classify truncation as "not a TIFF", not as bad data.
fn read_header_bytes<S: Source>(source: &mut S, buf: &mut [u8]) -> Result<(), TiffError> {
    source.read_exact(buf).map_err(|e| match e {
        IoError::Eof | IoError::ShortRead { .. } => FormatError::TruncatedHeader.into(),
        other => TiffError::Io(other),
    })
}

// =============================================================================
// Tests
// =============================================================================
