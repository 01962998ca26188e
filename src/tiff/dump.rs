//! Diagnostic dump of a parsed TIFF model.
//!
//! Prints every directory in chain order and every tag in ascending id
//! order with type-appropriate formatting. Intended for humans debugging
//! vendor dialects, not for machine consumption.

use std::io::{self, Write};

use super::entry::TagEntry;
use super::model::{Directory, TiffFile};
use super::types::TagType;

/// Write a human-readable dump of every directory to `out`.
pub fn dump<W: Write>(tiff: &TiffFile, out: &mut W) -> io::Result<()> {
    for dir in 0..tiff.directory_count() {
        writeln!(out, "Directory {dir}")?;
        if let Some(directory) = tiff.directory(dir) {
            dump_directory(directory, out)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn dump_directory<W: Write>(directory: &Directory, out: &mut W) -> io::Result<()> {
    // explicit sort; map iteration order is not part of the model
    for tag in directory.sorted_tags() {
        let Some(entry) = directory.get(tag) else {
            continue;
        };
        writeln!(
            out,
            " {tag}: type: {:?}, count: {}",
            entry.tag_type(),
            entry.count()
        )?;
        write!(out, " ")?;
        dump_value(entry, out)?;
        writeln!(out)?;
    }
    Ok(())
}

fn dump_value<W: Write>(entry: &TagEntry, out: &mut W) -> io::Result<()> {
    match entry.tag_type() {
        TagType::Ascii => {
            // only the first string is printed if there are multiple
            let buf = entry.buffer().unwrap_or(&[]);
            if buf.last() != Some(&0) {
                write!(out, " <not null-terminated>")?;
            } else {
                let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
                write!(out, " {}", String::from_utf8_lossy(&buf[..end]))?;
            }
        }
        TagType::Undefined => {
            for b in entry.buffer().unwrap_or(&[]) {
                write!(out, " {b}")?;
            }
        }
        TagType::Byte | TagType::Short | TagType::Long | TagType::Long8 => {
            for i in 0..entry.count() {
                write!(out, " {}", entry.uint(i).unwrap_or(0))?;
            }
        }
        TagType::Ifd | TagType::Ifd8 => {
            for i in 0..entry.count() {
                write!(out, " {:016x}", entry.uint(i).unwrap_or(0))?;
            }
        }
        TagType::SByte | TagType::SShort | TagType::SLong | TagType::SLong8 => {
            for i in 0..entry.count() {
                write!(out, " {}", entry.sint(i).unwrap_or(0))?;
            }
        }
        TagType::Float | TagType::Double | TagType::Rational | TagType::SRational => {
            for i in 0..entry.count() {
                write!(out, " {}", entry.float(i).unwrap_or(f64::NAN))?;
            }
        }
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
