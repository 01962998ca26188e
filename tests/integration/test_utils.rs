//! Shared utilities for integration tests.
//!
//! `TiffBuilder` assembles synthetic classic TIFF files in memory, in either
//! byte order, choosing inline vs out-of-line storage the same way a real
//! writer would. Tests drive the parser through the public API only.

use std::io::Cursor;

/// Logical entry values, encoded at serialization time.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Value {
    Bytes(Vec<u8>),
    Ascii(String),
    Shorts(Vec<u16>),
    Longs(Vec<u32>),
    SLongs(Vec<i32>),
    Rationals(Vec<(u32, u32)>),
    SRationals(Vec<(i32, i32)>),
    Floats(Vec<f32>),
    Doubles(Vec<f64>),
    Undefined(Vec<u8>),
    /// Raw escape hatch: explicit type id, count, and element bytes.
    Raw {
        type_id: u16,
        count: u32,
        bytes: Vec<u8>,
    },
}

impl Value {
    fn type_id(&self) -> u16 {
        match self {
            Value::Bytes(_) => 1,
            Value::Ascii(_) => 2,
            Value::Shorts(_) => 3,
            Value::Longs(_) => 4,
            Value::Rationals(_) => 5,
            Value::Undefined(_) => 7,
            Value::SLongs(_) => 9,
            Value::SRationals(_) => 10,
            Value::Floats(_) => 11,
            Value::Doubles(_) => 12,
            Value::Raw { type_id, .. } => *type_id,
        }
    }

    fn count(&self) -> u32 {
        match self {
            Value::Bytes(v) | Value::Undefined(v) => v.len() as u32,
            Value::Ascii(s) => s.len() as u32 + 1, // NUL included
            Value::Shorts(v) => v.len() as u32,
            Value::Longs(v) => v.len() as u32,
            Value::SLongs(v) => v.len() as u32,
            Value::Rationals(v) => v.len() as u32,
            Value::SRationals(v) => v.len() as u32,
            Value::Floats(v) => v.len() as u32,
            Value::Doubles(v) => v.len() as u32,
            Value::Raw { count, .. } => *count,
        }
    }

    fn encode(&self, big_endian: bool) -> Vec<u8> {
        fn put4(out: &mut Vec<u8>, v: u32, big: bool) {
            out.extend_from_slice(&if big { v.to_be_bytes() } else { v.to_le_bytes() });
        }

        let mut out = Vec::new();
        match self {
            Value::Bytes(v) | Value::Undefined(v) => out.extend_from_slice(v),
            Value::Ascii(s) => {
                out.extend_from_slice(s.as_bytes());
                out.push(0);
            }
            Value::Shorts(v) => {
                for x in v {
                    out.extend_from_slice(&if big_endian {
                        x.to_be_bytes()
                    } else {
                        x.to_le_bytes()
                    });
                }
            }
            Value::Longs(v) => {
                for x in v {
                    put4(&mut out, *x, big_endian);
                }
            }
            Value::SLongs(v) => {
                for x in v {
                    put4(&mut out, *x as u32, big_endian);
                }
            }
            Value::Rationals(v) => {
                for (num, den) in v {
                    put4(&mut out, *num, big_endian);
                    put4(&mut out, *den, big_endian);
                }
            }
            Value::SRationals(v) => {
                for (num, den) in v {
                    put4(&mut out, *num as u32, big_endian);
                    put4(&mut out, *den as u32, big_endian);
                }
            }
            Value::Floats(v) => {
                for x in v {
                    put4(&mut out, x.to_bits(), big_endian);
                }
            }
            Value::Doubles(v) => {
                for x in v {
                    out.extend_from_slice(&if big_endian {
                        x.to_bits().to_be_bytes()
                    } else {
                        x.to_bits().to_le_bytes()
                    });
                }
            }
            Value::Raw { bytes, .. } => out.extend_from_slice(bytes),
        }
        out
    }
}

/// Builder for synthetic classic TIFF files.
pub struct TiffBuilder {
    big_endian: bool,
    directories: Vec<Vec<(u16, Value)>>,
    blobs: Vec<Vec<u8>>,
}

#[allow(dead_code)]
impl TiffBuilder {
    pub fn little_endian() -> Self {
        TiffBuilder {
            big_endian: false,
            directories: Vec::new(),
            blobs: Vec::new(),
        }
    }

    pub fn big_endian() -> Self {
        TiffBuilder {
            big_endian: true,
            directories: Vec::new(),
            blobs: Vec::new(),
        }
    }

    /// Start a new directory; subsequent entries go to it.
    pub fn directory(&mut self) -> &mut Self {
        self.directories.push(Vec::new());
        self
    }

    /// Add one entry to the current directory.
    pub fn entry(&mut self, tag: u16, value: Value) -> &mut Self {
        self.directories
            .last_mut()
            .expect("call directory() first")
            .push((tag, value));
        self
    }

    /// Place a data blob in the file body and return its offset. Blobs
    /// always precede out-of-line entry payloads, so the offset is fixed
    /// at insertion time.
    pub fn blob(&mut self, bytes: Vec<u8>) -> u32 {
        let offset = 8 + self.blobs.iter().map(|b| b.len() as u32).sum::<u32>();
        self.blobs.push(bytes);
        offset
    }

    fn u16_bytes(&self, v: u16) -> [u8; 2] {
        if self.big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    }

    fn u32_bytes(&self, v: u32) -> [u8; 4] {
        if self.big_endian {
            v.to_be_bytes()
        } else {
            v.to_le_bytes()
        }
    }

    /// Serialize to file bytes.
    pub fn build(&self) -> Vec<u8> {
        const HEADER_SIZE: u32 = 8;

        // lay out the body: blobs first, then out-of-line entry payloads
        let mut heap: Vec<u8> = Vec::new();
        for blob in &self.blobs {
            heap.extend_from_slice(blob);
        }

        // encode payloads, assigning offsets to out-of-line values
        let mut dirs_encoded: Vec<Vec<(u16, u16, u32, [u8; 4])>> = Vec::new();
        for dir in &self.directories {
            let mut encoded = Vec::new();
            for (tag, value) in dir {
                let payload = value.encode(self.big_endian);
                let mut field = [0u8; 4];
                if payload.len() <= 4 {
                    field[..payload.len()].copy_from_slice(&payload);
                } else {
                    let offset = HEADER_SIZE + heap.len() as u32;
                    heap.extend_from_slice(&payload);
                    field = self.u32_bytes(offset);
                }
                encoded.push((*tag, value.type_id(), value.count(), field));
            }
            // entries must be sorted by tag per the format
            encoded.sort_by_key(|e| e.0);
            dirs_encoded.push(encoded);
        }

        // directories follow the body
        let mut dir_offsets = Vec::new();
        let mut cursor = HEADER_SIZE + heap.len() as u32;
        for dir in &dirs_encoded {
            dir_offsets.push(cursor);
            cursor += 2 + 12 * dir.len() as u32 + 4;
        }

        let mut data = Vec::new();
        data.extend_from_slice(if self.big_endian {
            &[0x4D, 0x4D]
        } else {
            &[0x49, 0x49]
        });
        data.extend_from_slice(&self.u16_bytes(42));
        data.extend_from_slice(&self.u32_bytes(*dir_offsets.first().unwrap_or(&0)));
        data.extend_from_slice(&heap);
        for (i, dir) in dirs_encoded.iter().enumerate() {
            data.extend_from_slice(&self.u16_bytes(dir.len() as u16));
            for (tag, type_id, count, field) in dir {
                data.extend_from_slice(&self.u16_bytes(*tag));
                data.extend_from_slice(&self.u16_bytes(*type_id));
                data.extend_from_slice(&self.u32_bytes(*count));
                data.extend_from_slice(field);
            }
            let next = dir_offsets.get(i + 1).copied().unwrap_or(0);
            data.extend_from_slice(&self.u32_bytes(next));
        }

        data
    }

    pub fn build_source(&self) -> Cursor<Vec<u8>> {
        Cursor::new(self.build())
    }
}
