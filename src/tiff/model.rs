//! Directory walking and the parsed TIFF model.
//!
//! A TIFF file is a singly-linked chain of IFDs (Image File Directories).
//! [`TiffFile::open`] follows the chain from the header's first offset,
//! decoding every entry of every directory into owned, typed buffers. The
//! result is immutable; no pixel data is read or interpreted.
//!
//! The chain in a hostile file may cycle, so the walker tracks visited
//! offsets and fails on a revisit. Any structural failure anywhere in the
//! chain discards the whole model; no partial result is ever returned.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::error::{DataError, IoError, TiffError};
use crate::io::Source;

use super::entry::TagEntry;
use super::header::TiffHeader;

// =============================================================================
// Directory
// =============================================================================

/// One parsed IFD: a mapping from 16-bit tag id to decoded entry.
///
/// Duplicate tag ids within one directory are resolved last-write-wins.
/// Malformed real-world files do this, and they are expected input, not an
/// error condition to reject.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    entries: HashMap<u16, TagEntry>,
}

impl Directory {
    /// Look up an entry by tag id.
    pub fn get(&self, tag: u16) -> Option<&TagEntry> {
        self.entries.get(&tag)
    }

    /// Tag ids present in this directory, in ascending order.
    ///
    /// Map iteration order is never exposed; callers that need stable
    /// ordering (the diagnostic dump) get it from this explicit sort.
    pub fn sorted_tags(&self) -> Vec<u16> {
        let mut tags: Vec<u16> = self.entries.keys().copied().collect();
        tags.sort_unstable();
        tags
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the directory holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// TiffFile
// =============================================================================

/// A fully parsed TIFF or BigTIFF container.
///
/// Directories appear in file-chain discovery order; index 0 is the first
/// directory reached from the header. No parent/child (sub-IFD) structure is
/// imposed; callers interpret IFD-typed tags themselves. Immutable once
/// constructed, so it can be shared freely across readers.
#[derive(Debug, Clone)]
pub struct TiffFile {
    header: TiffHeader,
    directories: Vec<Directory>,
}

impl TiffFile {
    /// Parse the whole directory chain of a TIFF/BigTIFF source.
    ///
    /// All-or-nothing: any structural failure discards every directory
    /// parsed so far.
    ///
    /// # Errors
    /// - [`crate::error::FormatError`] variants when the header does not
    ///   match any recognized TIFF variant
    /// - [`DataError`] variants for cyclic chains, unknown type ids,
    ///   unreadable values, or an empty chain
    pub fn open<S: Source>(source: &mut S) -> Result<Self, TiffError> {
        let header = TiffHeader::read_from(source)?;

        let mut directories = Vec::new();
        let mut visited: HashSet<u64> = HashSet::new();
        let mut offset = header.first_dir_offset;

        while offset != 0 {
            let (directory, next) = read_directory(source, &header, offset, &mut visited)?;
            debug!(
                index = directories.len(),
                entries = directory.len(),
                next_offset = next,
                "parsed directory"
            );
            directories.push(directory);
            offset = next;
        }

        if directories.is_empty() {
            return Err(DataError::NoDirectories.into());
        }

        Ok(TiffFile {
            header,
            directories,
        })
    }

    /// The parsed file header.
    pub fn header(&self) -> &TiffHeader {
        &self.header
    }

    /// Number of directories in the chain.
    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    /// Directory at `dir`, if in range.
    pub fn directory(&self, dir: usize) -> Option<&Directory> {
        self.directories.get(dir)
    }

    /// Logical element count for a tag, or 0 if the directory or tag is
    /// absent. Zero-count entries cannot occur structurally, so 0 always
    /// means "not present".
    pub fn value_count(&self, dir: usize, tag: u16) -> u64 {
        self.entry(dir, tag).map_or(0, |e| e.count())
    }

    /// Unsigned integer element, widened to u64.
    ///
    /// `None` for a missing directory/tag, an out-of-range index, or a
    /// non-unsigned stored type. Callers wanting the sentinel convention use
    /// `.unwrap_or(0)`.
    pub fn get_uint(&self, dir: usize, tag: u16, i: u64) -> Option<u64> {
        self.entry(dir, tag)?.uint(i)
    }

    /// Signed integer element, widened to i64. Same failure rules as
    /// [`get_uint`](Self::get_uint).
    pub fn get_sint(&self, dir: usize, tag: u16, i: u64) -> Option<i64> {
        self.entry(dir, tag)?.sint(i)
    }

    /// Floating-point element. Rationals divide numerator by denominator
    /// with IEEE semantics. Callers wanting the sentinel convention use
    /// `.unwrap_or(f64::NAN)`.
    pub fn get_float(&self, dir: usize, tag: u16, i: u64) -> Option<f64> {
        self.entry(dir, tag)?.float(i)
    }

    /// Raw backing bytes for Ascii/Undefined entries; `None` for all other
    /// types. The slice borrows the model's owned storage.
    pub fn get_buffer(&self, dir: usize, tag: u16) -> Option<&[u8]> {
        self.entry(dir, tag)?.buffer()
    }

    fn entry(&self, dir: usize, tag: u16) -> Option<&TagEntry> {
        self.directories.get(dir)?.get(tag)
    }
}

// =============================================================================
// Directory Walker
// =============================================================================

/// Read one directory at `offset`, returning it plus the next-IFD offset.
fn read_directory<S: Source>(
    source: &mut S,
    header: &TiffHeader,
    offset: u64,
    visited: &mut HashSet<u64>,
) -> Result<(Directory, u64), TiffError> {
    if offset == 0 {
        return Err(DataError::BadOffset.into());
    }
    if !visited.insert(offset) {
        return Err(DataError::LoopDetected.into());
    }

    source.seek_to(offset)?;

    let entry_count = read_uint(source, header.dir_count_size(), header)
        .map_err(|_| DataError::TruncatedDirectory)?;

    let mut entries = HashMap::with_capacity(entry_count.min(1024) as usize);

    for _ in 0..entry_count {
        let tag = read_uint(source, 2, header).map_err(|_| DataError::TruncatedDirectory)? as u16;
        let raw_type =
            read_uint(source, 2, header).map_err(|_| DataError::TruncatedDirectory)? as u16;
        let raw_count = read_uint(source, header.entry_count_size(), header)
            .map_err(|_| DataError::TruncatedDirectory)?;

        let mut value_field = [0u8; 8];
        let value_field = &mut value_field[..header.value_field_size()];
        source
            .read_exact(value_field)
            .map_err(|_| DataError::TruncatedDirectory)?;

        let entry = TagEntry::decode(source, raw_type, raw_count, value_field, header.byte_order)?;

        // last write wins on duplicate tags
        entries.insert(tag, entry);
    }

    let next_offset = read_uint(source, header.next_offset_size(), header)
        .map_err(|_| DataError::TruncatedDirectory)?;

    Ok((Directory { entries }, next_offset))
}

/// Read one unsigned integer of `size` bytes in the file's byte order.
fn read_uint<S: Source>(source: &mut S, size: usize, header: &TiffHeader) -> Result<u64, IoError> {
    let mut buf = [0u8; 8];
    source.read_exact(&mut buf[..size])?;
    Ok(match size {
        1 => buf[0] as u64,
        2 => header.byte_order.read_u16(&buf[..2]) as u64,
        4 => header.byte_order.read_u32(&buf[..4]) as u64,
        8 => header.byte_order.read_u64(&buf[..8]),
        n => unreachable!("field width is {n}"),
    })
}

// =============================================================================
// Tests
// =============================================================================
