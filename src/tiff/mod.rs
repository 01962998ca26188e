//! Generic TIFF and BigTIFF container parsing.
//!
//! This module reads the chained Image File Directories (IFDs) of a TIFF
//! file into an in-memory, typed model without decoding any pixel data. It
//! is the foundation vendor-specific slide format plugins build on: most
//! microscope vendors store slide pyramids inside TIFF-compatible
//! containers with proprietary tag dialects.
//!
//! # Key Concepts
//!
//! - **Byte order**: TIFF files declare their endianness (II = little-endian,
//!   MM = big-endian) in the header. All multi-byte values must be read
//!   respecting this order.
//!
//! - **Classic TIFF vs BigTIFF**: Classic TIFF uses 32-bit offsets (max 4GB
//!   files), while BigTIFF uses 64-bit offsets. The parser handles both
//!   transparently.
//!
//! - **IFD (Image File Directory)**: one directory of tag/value entries plus
//!   a pointer to the next directory. Hostile files may contain cycles; the
//!   walker detects and rejects them.
//!
//! - **Inline vs offset values**: small values are stored inline in the IFD
//!   entry, larger values at an offset pointed to by the entry.

mod dump;
mod entry;
mod header;
mod model;
mod properties;
mod quickhash;
mod types;

pub use dump::dump;
pub use entry::TagEntry;
pub use header::{ByteOrder, TiffHeader};
pub use model::{Directory, TiffFile};
pub use properties::{
    build_properties, init_properties_and_hash, store_and_hash_properties, PROPERTY_NAME_COMMENT,
};
pub use quickhash::{hash_level, QuickHash};
pub use types::{tags, TagType};
