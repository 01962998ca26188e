//! Well-known tag extraction into a string-keyed property table.
//!
//! Format plugins built on this crate expose vendor metadata as flat string
//! properties. This module handles the generic TIFF subset: descriptive
//! strings, resolution/position numbers, and the resolution unit.
//!
//! String properties participate in the quickhash; resolution and position
//! floats deliberately do not, because floating-point formatting may vary
//! across platforms and over time.

use std::collections::HashMap;

use crate::error::TiffError;
use crate::io::Source;

use super::model::TiffFile;
use super::quickhash::{hash_level, QuickHash};
use super::types::tags;

/// Generic comment property, duplicated from ImageDescription for callers
/// that don't know the TIFF-specific name.
pub const PROPERTY_NAME_COMMENT: &str = "comment";

/// Extract the well-known TIFF tags of one directory as string properties.
///
/// Absent tags are omitted, never stored as empty strings. Keys use the
/// `tiff.<TagName>` convention plus the generic [`PROPERTY_NAME_COMMENT`].
pub fn build_properties(tiff: &TiffFile, dir: usize) -> HashMap<String, String> {
    let mut props = HashMap::new();
    let mut unused = QuickHash::new();
    unused.disable();
    store_and_hash_properties(tiff, dir, &mut props, &mut unused);
    props
}

/// Extract properties and feed the hashed subset to the accumulator.
///
/// The string properties are hashed as (name, value) pairs in a fixed order;
/// that order is part of the quickhash compatibility contract. Resolution
/// and position values are stored but never hashed.
pub fn store_and_hash_properties(
    tiff: &TiffFile,
    dir: usize,
    props: &mut HashMap<String, String>,
    hash: &mut QuickHash,
) {
    // generic comment, stored but not hashed under this name
    store_string_property(tiff, dir, props, PROPERTY_NAME_COMMENT, tags::IMAGE_DESCRIPTION);

    // strings to store and hash, in contract order
    store_and_hash_string_property(
        tiff,
        dir,
        props,
        hash,
        "tiff.ImageDescription",
        tags::IMAGE_DESCRIPTION,
    );
    store_and_hash_string_property(tiff, dir, props, hash, "tiff.Make", tags::MAKE);
    store_and_hash_string_property(tiff, dir, props, hash, "tiff.Model", tags::MODEL);
    store_and_hash_string_property(tiff, dir, props, hash, "tiff.Software", tags::SOFTWARE);
    store_and_hash_string_property(tiff, dir, props, hash, "tiff.DateTime", tags::DATE_TIME);
    store_and_hash_string_property(tiff, dir, props, hash, "tiff.Artist", tags::ARTIST);
    store_and_hash_string_property(
        tiff,
        dir,
        props,
        hash,
        "tiff.HostComputer",
        tags::HOST_COMPUTER,
    );
    store_and_hash_string_property(tiff, dir, props, hash, "tiff.Copyright", tags::COPYRIGHT);
    store_and_hash_string_property(
        tiff,
        dir,
        props,
        hash,
        "tiff.DocumentName",
        tags::DOCUMENT_NAME,
    );

    // floats are stored but never hashed: their formatting might be
    // unstable over time
    store_float_property(tiff, dir, props, "tiff.XResolution", tags::X_RESOLUTION);
    store_float_property(tiff, dir, props, "tiff.YResolution", tags::Y_RESOLUTION);
    store_float_property(tiff, dir, props, "tiff.XPosition", tags::X_POSITION);
    store_float_property(tiff, dir, props, "tiff.YPosition", tags::Y_POSITION);

    // resolution unit defaults to inch when absent or unreadable
    let unit = match tiff.get_uint(dir, tags::RESOLUTION_UNIT, 0) {
        Some(1) => "none",
        Some(3) => "centimeter",
        Some(2) | None => "inch",
        Some(_) => "unknown",
    };
    props.insert("tiff.ResolutionUnit".to_string(), unit.to_string());
}

/// Hash one directory's pixel ranges, then store and hash its properties.
///
/// This is the standard open-time sequence for format plugins: the level
/// hash comes first, then the property strings, so the digest layout stays
/// stable. `lowest_resolution_dir` is the directory whose pixel bytes are
/// hashed (usually the smallest pyramid level); `property_dir` supplies the
/// metadata (usually directory 0).
pub fn init_properties_and_hash<S: Source>(
    tiff: &TiffFile,
    source: &mut S,
    hash: &mut QuickHash,
    lowest_resolution_dir: usize,
    property_dir: usize,
) -> Result<HashMap<String, String>, TiffError> {
    hash_level(hash, source, tiff, lowest_resolution_dir)?;

    let mut props = HashMap::new();
    store_and_hash_properties(tiff, property_dir, &mut props, hash);
    Ok(props)
}

fn store_string_property(
    tiff: &TiffFile,
    dir: usize,
    props: &mut HashMap<String, String>,
    name: &str,
    tag: u16,
) -> Option<String> {
    let buf = tiff.get_buffer(dir, tag)?;
    // stop at the NUL terminator if present
    let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    let value = String::from_utf8_lossy(&buf[..end]).into_owned();
    props.insert(name.to_string(), value.clone());
    Some(value)
}

fn store_and_hash_string_property(
    tiff: &TiffFile,
    dir: usize,
    props: &mut HashMap<String, String>,
    hash: &mut QuickHash,
    name: &str,
    tag: u16,
) {
    hash.update_string(Some(name));
    let value = store_string_property(tiff, dir, props, name, tag);
    hash.update_string(value.as_deref());
}

fn store_float_property(
    tiff: &TiffFile,
    dir: usize,
    props: &mut HashMap<String, String>,
    name: &str,
    tag: u16,
) {
    if let Some(value) = tiff.get_float(dir, tag, 0) {
        props.insert(name.to_string(), format!("{value}"));
    }
}

// =============================================================================
// Tests
// =============================================================================
