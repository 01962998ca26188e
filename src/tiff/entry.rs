//! IFD entry value decoding.
//!
//! Each directory entry carries a type id, an element count, and a value
//! field. Small values live inline in the value field; larger ones live at a
//! file offset held in that field. This module turns one raw entry into a
//! typed, owned value buffer, handling both storage forms and byte order.

use bytes::Bytes;

use crate::error::{DataError, TiffError};
use crate::io::Source;

use super::header::ByteOrder;
use super::types::TagType;

// =============================================================================
// TagEntry
// =============================================================================

/// One decoded directory entry: a typed, owned value buffer.
///
/// The buffer always holds `value_size * raw_count` bytes in native byte
/// order, and is always a defensive copy, even when the value was small
/// enough to be stored inline. For Rational/SRational, `count` is the
/// logical element count; the buffer holds two raw 4-byte slots per element.
#[derive(Debug, Clone, PartialEq)]
pub struct TagEntry {
    tag_type: TagType,
    count: u64,
    value: Bytes,
}

impl TagEntry {
    /// Decode one directory entry.
    ///
    /// `value_field` is the raw inline value/offset field: 4 bytes for
    /// classic TIFF, 8 for BigTIFF. If the value's total byte length fits in
    /// the field, the bytes are taken from it directly and no seek occurs.
    /// Otherwise the field is interpreted as an absolute file offset; the
    /// value is read from there, and the source's position is restored so
    /// the caller's sequential reads are undisturbed.
    ///
    /// # Errors
    /// - [`DataError::UnknownType`] for a type id outside the TIFF type table
    /// - [`DataError::CannotReadValue`] for a zero count, an overflowing or
    ///   unallocatable byte length, or a failed out-of-line seek/read
    pub fn decode<S: Source>(
        source: &mut S,
        raw_type: u16,
        raw_count: u64,
        value_field: &[u8],
        byte_order: ByteOrder,
    ) -> Result<Self, TiffError> {
        let tag_type = TagType::from_u16(raw_type).ok_or(DataError::UnknownType(raw_type))?;

        if raw_count == 0 {
            return Err(DataError::CannotReadValue.into());
        }

        // Rationals store two raw 4-byte slots per logical element
        let slot_count = if tag_type.is_rational() {
            raw_count.checked_mul(2).ok_or(DataError::CannotReadValue)?
        } else {
            raw_count
        };

        let width = tag_type.value_size();
        let len: usize = (width as u64)
            .checked_mul(slot_count)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(DataError::CannotReadValue)?;

        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| DataError::CannotReadValue)?;

        if len <= value_field.len() {
            // Inline storage
            buf.extend_from_slice(&value_field[..len]);
        } else {
            // The field holds an absolute offset to the value bytes
            let offset = match value_field.len() {
                4 => byte_order.read_u32(value_field) as u64,
                8 => byte_order.read_u64(value_field),
                n => unreachable!("value field is {n} bytes"),
            };
            buf.resize(len, 0);

            let old_pos = source.position().map_err(|_| DataError::CannotReadValue)?;
            source
                .seek_to(offset)
                .map_err(|_| DataError::CannotReadValue)?;
            source
                .read_exact(&mut buf)
                .map_err(|_| DataError::CannotReadValue)?;
            source
                .seek_to(old_pos)
                .map_err(|_| DataError::CannotReadValue)?;
        }

        fix_byte_order(&mut buf, width, byte_order);

        Ok(TagEntry {
            tag_type,
            count: raw_count,
            value: Bytes::from(buf),
        })
    }

    /// The entry's value type.
    #[inline]
    pub fn tag_type(&self) -> TagType {
        self.tag_type
    }

    /// Logical element count (rationals count as one element each).
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Element `i` widened to u64, for unsigned integer and IFD-offset types.
    ///
    /// `None` for any other stored type or an out-of-range index.
    pub fn uint(&self, i: u64) -> Option<u64> {
        if i >= self.count {
            return None;
        }
        let i = i as usize;
        match self.tag_type {
            TagType::Byte => Some(self.value[i] as u64),
            TagType::Short => Some(self.read_ne_u16(i) as u64),
            TagType::Long | TagType::Ifd => Some(self.read_ne_u32(i) as u64),
            TagType::Long8 | TagType::Ifd8 => Some(self.read_ne_u64(i)),
            _ => None,
        }
    }

    /// Element `i` widened to i64, for signed integer types.
    ///
    /// `None` for any other stored type or an out-of-range index.
    pub fn sint(&self, i: u64) -> Option<i64> {
        if i >= self.count {
            return None;
        }
        let i = i as usize;
        match self.tag_type {
            TagType::SByte => Some(self.value[i] as i8 as i64),
            TagType::SShort => Some(self.read_ne_u16(i) as i16 as i64),
            TagType::SLong => Some(self.read_ne_u32(i) as i32 as i64),
            TagType::SLong8 => Some(self.read_ne_u64(i) as i64),
            _ => None,
        }
    }

    /// Element `i` as f64, for Float/Double/Rational/SRational.
    ///
    /// Rationals divide numerator by denominator with ordinary IEEE
    /// semantics: a zero denominator yields ±infinity or NaN, not `None`.
    /// `None` for any other stored type or an out-of-range index.
    pub fn float(&self, i: u64) -> Option<f64> {
        if i >= self.count {
            return None;
        }
        let i = i as usize;
        match self.tag_type {
            TagType::Float => Some(f32::from_bits(self.read_ne_u32(i)) as f64),
            TagType::Double => Some(f64::from_bits(self.read_ne_u64(i))),
            TagType::Rational => {
                let num = self.read_ne_u32(i * 2);
                let den = self.read_ne_u32(i * 2 + 1);
                Some(num as f64 / den as f64)
            }
            TagType::SRational => {
                let num = self.read_ne_u32(i * 2) as i32;
                let den = self.read_ne_u32(i * 2 + 1) as i32;
                Some(num as f64 / den as f64)
            }
            _ => None,
        }
    }

    /// The raw backing bytes, for Ascii/Undefined entries only.
    ///
    /// The returned slice borrows the entry's owned storage.
    pub fn buffer(&self) -> Option<&[u8]> {
        match self.tag_type {
            TagType::Ascii | TagType::Undefined => Some(&self.value),
            _ => None,
        }
    }

    #[inline]
    fn read_ne_u16(&self, i: usize) -> u16 {
        let b = &self.value[i * 2..i * 2 + 2];
        u16::from_ne_bytes([b[0], b[1]])
    }

    #[inline]
    fn read_ne_u32(&self, i: usize) -> u32 {
        let b = &self.value[i * 4..i * 4 + 4];
        u32::from_ne_bytes([b[0], b[1], b[2], b[3]])
    }

    #[inline]
    fn read_ne_u64(&self, i: usize) -> u64 {
        let b = &self.value[i * 8..i * 8 + 8];
        u64::from_ne_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]])
    }
}

/// Convert every element of `buf` from the file's byte order to native order.
///
/// `width` is the raw element width; one-byte elements need no work.
fn fix_byte_order(buf: &mut [u8], width: usize, byte_order: ByteOrder) {
    match width {
        1 => {}
        2 => {
            for chunk in buf.chunks_exact_mut(2) {
                let v = byte_order.read_u16(chunk);
                chunk.copy_from_slice(&v.to_ne_bytes());
            }
        }
        4 => {
            for chunk in buf.chunks_exact_mut(4) {
                let v = byte_order.read_u32(chunk);
                chunk.copy_from_slice(&v.to_ne_bytes());
            }
        }
        8 => {
            for chunk in buf.chunks_exact_mut(8) {
                let v = byte_order.read_u64(chunk);
                chunk.copy_from_slice(&v.to_ne_bytes());
            }
        }
        _ => unreachable!("element width is {width}"),
    }
}

// =============================================================================
// Tests
// =============================================================================
