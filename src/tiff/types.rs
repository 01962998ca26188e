//! TIFF tag type and tag id definitions.
//!
//! This module defines the vocabulary for TIFF parsing: the closed set of
//! value types an IFD entry can carry, and the well-known tag ids consumed
//! by the property extractor and the quickhash.

// =============================================================================
// TIFF Tag Types
// =============================================================================

/// TIFF value types that determine how entry values are encoded.
///
/// Each type has a fixed element width, which is critical for:
/// - Determining if a value fits inline in an IFD entry
/// - Reading and byte-swapping arrays of values correctly
///
/// This is the complete type table from the TIFF 6.0 and BigTIFF
/// specifications. Vendor dialects reuse these types with proprietary tag
/// ids, so none can be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum TagType {
    /// Unsigned 8-bit integer
    Byte = 1,

    /// 8-bit character; values are NUL-terminated strings
    Ascii = 2,

    /// Unsigned 16-bit integer
    Short = 3,

    /// Unsigned 32-bit integer
    Long = 4,

    /// Two unsigned 32-bit integers: numerator, denominator
    Rational = 5,

    /// Signed 8-bit integer
    SByte = 6,

    /// Opaque byte data
    Undefined = 7,

    /// Signed 16-bit integer
    SShort = 8,

    /// Signed 32-bit integer
    SLong = 9,

    /// Two signed 32-bit integers: numerator, denominator
    SRational = 10,

    /// IEEE 32-bit float
    Float = 11,

    /// IEEE 64-bit float
    Double = 12,

    /// Unsigned 32-bit offset of a sub-IFD
    Ifd = 13,

    /// Unsigned 64-bit integer (BigTIFF)
    Long8 = 16,

    /// Signed 64-bit integer (BigTIFF)
    SLong8 = 17,

    /// Unsigned 64-bit offset of a sub-IFD (BigTIFF)
    Ifd8 = 18,
}

impl TagType {
    /// Create a TagType from its numeric value.
    ///
    /// Returns `None` for unknown type ids; the directory walker treats
    /// those as bad data rather than skipping the entry.
    pub fn from_u16(value: u16) -> Option<Self> {
        match value {
            1 => Some(TagType::Byte),
            2 => Some(TagType::Ascii),
            3 => Some(TagType::Short),
            4 => Some(TagType::Long),
            5 => Some(TagType::Rational),
            6 => Some(TagType::SByte),
            7 => Some(TagType::Undefined),
            8 => Some(TagType::SShort),
            9 => Some(TagType::SLong),
            10 => Some(TagType::SRational),
            11 => Some(TagType::Float),
            12 => Some(TagType::Double),
            13 => Some(TagType::Ifd),
            16 => Some(TagType::Long8),
            17 => Some(TagType::SLong8),
            18 => Some(TagType::Ifd8),
            _ => None,
        }
    }

    /// Width in bytes of one raw element of this type.
    ///
    /// Rational and SRational report 4: one logical element occupies two raw
    /// 4-byte slots (numerator, denominator), which the decoder accounts for
    /// by doubling the raw element count.
    #[inline]
    pub const fn value_size(self) -> usize {
        match self {
            TagType::Byte | TagType::Ascii | TagType::SByte | TagType::Undefined => 1,
            TagType::Short | TagType::SShort => 2,
            TagType::Long
            | TagType::SLong
            | TagType::Float
            | TagType::Ifd
            | TagType::Rational
            | TagType::SRational => 4,
            TagType::Double | TagType::Long8 | TagType::SLong8 | TagType::Ifd8 => 8,
        }
    }

    /// True for Rational/SRational, whose logical elements each span two
    /// raw 4-byte slots.
    #[inline]
    pub const fn is_rational(self) -> bool {
        matches!(self, TagType::Rational | TagType::SRational)
    }
}

// =============================================================================
// Well-Known Tags
// =============================================================================

/// Tag ids consumed by the property extractor, the quickhash, and format
/// plugins built on this crate.
///
/// Directories are keyed by raw `u16`, so unknown vendor tags are stored
/// verbatim; these constants only name the ones this crate interprets.
pub mod tags {
    /// Name of the document the image was scanned from
    pub const DOCUMENT_NAME: u16 = 269;

    /// Description string (contains vendor metadata in many WSI formats)
    pub const IMAGE_DESCRIPTION: u16 = 270;

    /// Scanner manufacturer
    pub const MAKE: u16 = 271;

    /// Scanner model
    pub const MODEL: u16 = 272;

    /// Byte offsets of strips (stripped layout)
    pub const STRIP_OFFSETS: u16 = 273;

    /// Byte counts of strips (stripped layout)
    pub const STRIP_BYTE_COUNTS: u16 = 279;

    /// Pixels per resolution unit in X
    pub const X_RESOLUTION: u16 = 282;

    /// Pixels per resolution unit in Y
    pub const Y_RESOLUTION: u16 = 283;

    /// X offset of the image origin, in resolution units
    pub const X_POSITION: u16 = 286;

    /// Y offset of the image origin, in resolution units
    pub const Y_POSITION: u16 = 287;

    /// Unit of resolution (1=none, 2=inch, 3=centimeter)
    pub const RESOLUTION_UNIT: u16 = 296;

    /// Software that produced the file
    pub const SOFTWARE: u16 = 305;

    /// Creation date/time
    pub const DATE_TIME: u16 = 306;

    /// Person who created the image
    pub const ARTIST: u16 = 315;

    /// Computer that produced the file
    pub const HOST_COMPUTER: u16 = 316;

    /// Byte offsets of tiles (tiled layout)
    pub const TILE_OFFSETS: u16 = 324;

    /// Byte counts of tiles (tiled layout)
    pub const TILE_BYTE_COUNTS: u16 = 325;

    /// Copyright notice
    pub const COPYRIGHT: u16 = 33432;
}

// =============================================================================
// Tests
// =============================================================================
