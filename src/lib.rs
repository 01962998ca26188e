//! # tifflike
//!
//! A generic, format-agnostic parser for TIFF and BigTIFF container
//! structures, built for whole-slide image (WSI) readers.
//!
//! Most microscope vendors store slide pyramids inside TIFF-compatible
//! containers with proprietary tag dialects. This crate reads the chained
//! Image File Directories of such a file into an immutable, typed model
//! without decoding any pixel data, and safely consumes untrusted input:
//! either endianness, classic or BigTIFF headers, directory chains that may
//! cycle, and entry values whose storage location and width depend on type
//! tags carried inside the data itself.
//!
//! ## What this crate does not do
//!
//! No pixel decoding, no semantic validation of vendor dialects, no write
//! support. Vendor format plugins interpret the parsed tags; this crate
//! only makes them safely accessible.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::fs::File;
//! use tifflike::{build_properties, TiffFile};
//!
//! fn main() -> Result<(), tifflike::TiffError> {
//!     let mut file = File::open("slide.svs").map_err(tifflike::IoError::from)?;
//!     let tiff = TiffFile::open(&mut file)?;
//!
//!     println!("{} directories", tiff.directory_count());
//!     let width = tiff.get_uint(0, 256, 0).unwrap_or(0);
//!     let height = tiff.get_uint(0, 257, 0).unwrap_or(0);
//!     println!("level 0: {width}x{height}");
//!
//!     let props = build_properties(&tiff, 0);
//!     if let Some(desc) = props.get("tiff.ImageDescription") {
//!         println!("description: {desc}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! Parsing and hashing perform seek/read/seek-back sequences, so one
//! operation needs exclusive use of the source's cursor for its whole
//! duration; serialize concurrent calls externally or open one source per
//! caller. A constructed [`TiffFile`] is immutable and safe to read from
//! many threads without locking.

pub mod error;
pub mod io;
pub mod tiff;

// Re-export commonly used types
pub use error::{DataError, FormatError, IoError, TiffError};
pub use io::Source;
pub use tiff::{
    build_properties, dump, hash_level, init_properties_and_hash, store_and_hash_properties,
    tags, ByteOrder, Directory, QuickHash, TagEntry, TagType, TiffFile, TiffHeader,
    PROPERTY_NAME_COMMENT,
};
