//! Bounded-cost content fingerprinting ("quickhash").
//!
//! A slide's identity fingerprint is a SHA-256 over one resolution level's
//! pixel byte ranges plus a fixed sequence of metadata strings. Hashing an
//! arbitrary level could cost arbitrary time on non-pyramidal files, so the
//! total tile/strip size is capped: past the cap the accumulator transitions
//! to a permanent disabled state, which is valid-but-degraded ("no stable
//! hash available"), not an error.
//!
//! The order in which bytes and string pairs are fed to the accumulator is a
//! compatibility contract: the digest is consumed elsewhere as a per-file
//! identity and must stay stable across releases.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{DataError, TiffError};
use crate::io::Source;

use super::model::TiffFile;
use super::types::tags;

/// Ceiling on the summed tile/strip bytes fed to the hash (5 MiB).
///
/// A level bigger than this is a non-pyramidal image or a very large top
/// level; hashing it would make open() take an arbitrary amount of time.
const HASH_SIZE_CEILING: u64 = 5 << 20;

// =============================================================================
// QuickHash
// =============================================================================

/// Accumulator for the per-file content fingerprint.
///
/// Starts enabled; [`disable`](Self::disable) is permanent. All update
/// operations are no-ops once disabled, so callers can keep feeding it
/// unconditionally.
pub struct QuickHash {
    state: Option<Sha256>,
}

impl QuickHash {
    /// New enabled accumulator.
    pub fn new() -> Self {
        QuickHash {
            state: Some(Sha256::new()),
        }
    }

    /// Permanently disable the accumulator.
    pub fn disable(&mut self) {
        self.state = None;
    }

    /// False once the accumulator has been disabled.
    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }

    /// Feed raw bytes.
    pub fn update(&mut self, data: &[u8]) {
        if let Some(state) = self.state.as_mut() {
            state.update(data);
        }
    }

    /// Feed one string, or the empty string for `None`, plus a trailing NUL.
    ///
    /// The NUL keeps adjacent strings from running together; a missing value
    /// hashes identically to an empty one. This framing is part of the
    /// digest compatibility contract.
    pub fn update_string(&mut self, s: Option<&str>) {
        if let Some(state) = self.state.as_mut() {
            state.update(s.unwrap_or("").as_bytes());
            state.update([0u8]);
        }
    }

    /// Final hex digest, or `None` if the accumulator was disabled.
    pub fn finalize(self) -> Option<String> {
        self.state.map(|state| hex::encode(state.finalize()))
    }
}

impl Default for QuickHash {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Level hashing
// =============================================================================

/// Feed one directory's pixel-region byte ranges into the accumulator.
///
/// Layout detection prefers tiles over strips. If the summed lengths exceed
/// the 5 MiB ceiling, the accumulator is disabled and `Ok` is returned
/// without reading any pixel bytes; otherwise every tile/strip range is read
/// from the source in index order and fed to the hash.
///
/// # Errors
/// - [`DataError::NotTiledOrStripped`] if the directory has neither layout
/// - [`DataError::InvalidTileCounts`] on offset/length count mismatch
/// - [`DataError::InvalidTileLocation`] if an offset or length entry cannot
///   be widened to an unsigned integer
/// - [`crate::error::IoError`] if a pixel range cannot be read
pub fn hash_level<S: Source>(
    hash: &mut QuickHash,
    source: &mut S,
    tiff: &TiffFile,
    dir: usize,
) -> Result<(), TiffError> {
    // determine layout
    let (offset_tag, length_tag) = if tiff.value_count(dir, tags::TILE_OFFSETS) > 0 {
        (tags::TILE_OFFSETS, tags::TILE_BYTE_COUNTS)
    } else if tiff.value_count(dir, tags::STRIP_OFFSETS) > 0 {
        (tags::STRIP_OFFSETS, tags::STRIP_BYTE_COUNTS)
    } else {
        return Err(DataError::NotTiledOrStripped(dir).into());
    };

    let count = tiff.value_count(dir, offset_tag);
    if count == 0 || count != tiff.value_count(dir, length_tag) {
        return Err(DataError::InvalidTileCounts(dir).into());
    }

    // bound the cost before touching any pixel bytes
    let mut total: u64 = 0;
    for i in 0..count {
        let length = tiff
            .get_uint(dir, length_tag, i)
            .ok_or(DataError::InvalidTileLocation(dir))?;
        total = total.saturating_add(length);
        if total > HASH_SIZE_CEILING {
            debug!(dir, total, "level exceeds hash ceiling, disabling quickhash");
            hash.disable();
            return Ok(());
        }
    }

    for i in 0..count {
        let offset = tiff
            .get_uint(dir, offset_tag, i)
            .ok_or(DataError::InvalidTileLocation(dir))?;
        let length = tiff
            .get_uint(dir, length_tag, i)
            .ok_or(DataError::InvalidTileLocation(dir))?;

        let mut buf = vec![0u8; length as usize];
        source.seek_to(offset)?;
        source.read_exact(&mut buf)?;
        hash.update(&buf);
    }

    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
