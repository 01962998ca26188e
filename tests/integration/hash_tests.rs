//! Quickhash tests: layout detection, size ceiling, and digest stability.

use sha2::{Digest, Sha256};

use tifflike::{
    init_properties_and_hash, tags, DataError, QuickHash, TiffError, TiffFile,
};

use super::test_utils::{TiffBuilder, Value};

/// One stripped directory over the given pixel blobs.
fn stripped_level(strips: &[&[u8]]) -> TiffBuilder {
    let mut builder = TiffBuilder::little_endian();
    let mut offsets = Vec::new();
    let mut lengths = Vec::new();
    for strip in strips {
        offsets.push(builder.blob(strip.to_vec()));
        lengths.push(strip.len() as u32);
    }
    builder
        .directory()
        .entry(tags::STRIP_OFFSETS, Value::Longs(offsets))
        .entry(tags::STRIP_BYTE_COUNTS, Value::Longs(lengths));
    builder
}

#[test]
fn test_stripped_level_digest_matches_direct_hash() {
    let strips: [&[u8]; 3] = [b"first strip", b"second", b"third strip data"];
    let builder = stripped_level(&strips);

    let mut source = builder.build_source();
    let tiff = TiffFile::open(&mut source).unwrap();

    let mut hash = QuickHash::new();
    tifflike::hash_level(&mut hash, &mut source, &tiff, 0).unwrap();

    let mut expected = Sha256::new();
    for strip in strips {
        expected.update(strip);
    }
    assert_eq!(hash.finalize().unwrap(), hex::encode(expected.finalize()));
}

#[test]
fn test_tiles_preferred_over_strips() {
    let mut builder = TiffBuilder::little_endian();
    let tile_at = builder.blob(b"tile bytes".to_vec());
    let strip_at = builder.blob(b"strip bytes, different".to_vec());
    builder
        .directory()
        .entry(tags::TILE_OFFSETS, Value::Longs(vec![tile_at]))
        .entry(tags::TILE_BYTE_COUNTS, Value::Longs(vec![10]))
        .entry(tags::STRIP_OFFSETS, Value::Longs(vec![strip_at]))
        .entry(tags::STRIP_BYTE_COUNTS, Value::Longs(vec![22]));

    let mut source = builder.build_source();
    let tiff = TiffFile::open(&mut source).unwrap();
    let mut hash = QuickHash::new();
    tifflike::hash_level(&mut hash, &mut source, &tiff, 0).unwrap();

    let expected = hex::encode(Sha256::digest(b"tile bytes"));
    assert_eq!(hash.finalize().unwrap(), expected);
}

#[test]
fn test_untiled_unstripped_level_is_data_error() {
    let mut builder = TiffBuilder::little_endian();
    builder.directory().entry(256, Value::Shorts(vec![64]));

    let mut source = builder.build_source();
    let tiff = TiffFile::open(&mut source).unwrap();
    let mut hash = QuickHash::new();
    let result = tifflike::hash_level(&mut hash, &mut source, &tiff, 0);

    assert!(matches!(
        result,
        Err(TiffError::BadData(DataError::NotTiledOrStripped(0)))
    ));
}

#[test]
fn test_oversized_level_disables_hash_without_reading() {
    // claims a 6 MiB strip at a bogus offset; the pre-scan must disable the
    // hash before any pixel read happens, so the bogus offset never trips
    let mut builder = TiffBuilder::little_endian();
    builder
        .directory()
        .entry(tags::STRIP_OFFSETS, Value::Longs(vec![0xDEAD_0000]))
        .entry(tags::STRIP_BYTE_COUNTS, Value::Longs(vec![6 << 20]));

    let mut source = builder.build_source();
    let tiff = TiffFile::open(&mut source).unwrap();
    let mut hash = QuickHash::new();
    tifflike::hash_level(&mut hash, &mut source, &tiff, 0).unwrap();

    assert!(!hash.is_enabled());
    assert_eq!(hash.finalize(), None);
}

#[test]
fn test_disabled_hash_stays_disabled() {
    let builder = stripped_level(&[b"pixels"]);
    let mut source = builder.build_source();
    let tiff = TiffFile::open(&mut source).unwrap();

    let mut hash = QuickHash::new();
    hash.disable();
    tifflike::hash_level(&mut hash, &mut source, &tiff, 0).unwrap();
    hash.update_string(Some("more data"));

    assert_eq!(hash.finalize(), None);
}

#[test]
fn test_full_fingerprint_is_deterministic() {
    fn fingerprint() -> Option<String> {
        let mut builder = stripped_level(&[b"lowest level pixels"]);
        builder
            .entry(tags::IMAGE_DESCRIPTION, Value::Ascii("scan 17".to_string()))
            .entry(tags::MAKE, Value::Ascii("Acme".to_string()));

        let mut source = builder.build_source();
        let tiff = TiffFile::open(&mut source).unwrap();
        let mut hash = QuickHash::new();
        init_properties_and_hash(&tiff, &mut source, &mut hash, 0, 0).unwrap();
        hash.finalize()
    }

    let a = fingerprint().unwrap();
    let b = fingerprint().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 64); // SHA-256 hex
}

#[test]
fn test_fingerprint_changes_with_pixels_and_metadata() {
    fn fingerprint(pixels: &[u8], desc: &str) -> String {
        let mut builder = stripped_level(&[pixels]);
        builder.entry(tags::IMAGE_DESCRIPTION, Value::Ascii(desc.to_string()));

        let mut source = builder.build_source();
        let tiff = TiffFile::open(&mut source).unwrap();
        let mut hash = QuickHash::new();
        init_properties_and_hash(&tiff, &mut source, &mut hash, 0, 0).unwrap();
        hash.finalize().unwrap()
    }

    let base = fingerprint(b"pixels", "scan");
    assert_ne!(base, fingerprint(b"pixelz", "scan"));
    assert_ne!(base, fingerprint(b"pixels", "scan 2"));
}
