use thiserror::Error;

/// I/O errors that can occur when reading from a seekable source.
#[derive(Debug, Error)]
pub enum IoError {
    /// Error from the underlying reader
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source returned fewer bytes than requested before ending
    #[error("Short read: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    /// The source ended before any bytes could be read
    #[error("Unexpected end of file")]
    Eof,
}

/// Errors indicating the byte stream is not a TIFF or BigTIFF file at all.
///
/// Callers use these to decide "try a different decoder for this stream",
/// as opposed to [`DataError`] which means "this is a TIFF, but corrupt".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Byte order marker is neither II (0x4949) nor MM (0x4D4D)
    #[error("Unrecognized TIFF magic number: 0x{0:04X}")]
    UnrecognizedMagic(u16),

    /// Version field is neither 42 (classic TIFF) nor 43 (BigTIFF)
    #[error("Unrecognized TIFF version: {0}")]
    UnrecognizedVersion(u16),

    /// BigTIFF offset size was not 8 or the reserved field was not 0
    #[error("Unexpected value in BigTIFF header")]
    BadBigTiffHeader,

    /// The stream ended inside the header
    #[error("Can't read TIFF header")]
    TruncatedHeader,
}

/// Errors for structurally invalid content inside a recognized TIFF file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// Directory offset points nowhere useful
    #[error("Bad offset")]
    BadOffset,

    /// The directory chain revisited an offset
    #[error("Loop detected")]
    LoopDetected,

    /// The directory chain produced zero directories
    #[error("TIFF contains no directories")]
    NoDirectories,

    /// Directory entry carried a type id outside the TIFF type table
    #[error("Unknown type encountered: {0}")]
    UnknownType(u16),

    /// Entry value could not be read (zero count, oversized allocation,
    /// or a failed out-of-line seek/read)
    #[error("Cannot read value")]
    CannotReadValue,

    /// The stream ended inside a directory structure
    #[error("Cannot read directory")]
    TruncatedDirectory,

    /// Directory has neither tile offsets nor strip offsets
    #[error("Directory {0} is neither tiled nor stripped")]
    NotTiledOrStripped(usize),

    /// Tile/strip offset and length counts disagree or are zero
    #[error("Invalid tile/strip counts for directory {0}")]
    InvalidTileCounts(usize),

    /// Tile/strip offset or length entry could not be widened to an integer
    #[error("Invalid tile/strip offset/length for directory {0}")]
    InvalidTileLocation(usize),
}

/// Top-level error for all fallible tifflike operations.
#[derive(Debug, Error)]
pub enum TiffError {
    /// Source-level read/seek failure
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// Stream does not look like any recognized TIFF variant
    #[error("Unsupported format: {0}")]
    FormatNotSupported(#[from] FormatError),

    /// Stream claims to be TIFF but is structurally invalid
    #[error("Bad data: {0}")]
    BadData(#[from] DataError),
}

impl TiffError {
    /// True if the error means "not a TIFF at all" rather than "corrupt TIFF".
    pub fn is_format_error(&self) -> bool {
        matches!(self, TiffError::FormatNotSupported(_))
    }
}
