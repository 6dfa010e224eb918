//! PNG header reader.
//!
//! Only the signature and the IHDR chunk are looked at. The IHDR chunk is
//! required to come first, so width and height always sit at fixed offsets
//! 16 and 20; no general chunk walker is needed. The rest of the stream is
//! carried along untouched and later becomes an ICO payload verbatim.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use png2ico_common::layout::{IHDR_CHUNK_TYPE, MAX_DIMENSION, PNG_SIGNATURE};

use crate::error::{ConstraintViolation, Error, FormatIssue, IoOp, Result};

/// A PNG source whose header has been validated for use as an icon image.
///
/// Construction fails for non-square images and for images larger than
/// [`MAX_DIMENSION`] pixels per side, so every value of this type satisfies
/// `width == height <= 512`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImage {
    source: PathBuf,
    width: u32,
    height: u32,
    bytes: Vec<u8>,
}

impl ParsedImage {
    /// Read and validate the PNG file at `path`.
    ///
    /// # Errors
    ///
    /// See [`read_png`].
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        read_png(path)
    }

    /// Path this image was read from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Width in pixels, as declared by IHDR.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels, as declared by IHDR.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// The complete original PNG stream, signature included.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length of the PNG stream in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the PNG stream is empty (never the case after validation).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Give up the image and keep its PNG stream.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Read and validate the PNG file at `path`.
///
/// # Errors
///
/// - [`Error::Io`] if the file cannot be opened or read.
/// - [`Error::Format`] if the signature is wrong, the first chunk is not
///   IHDR, or the file ends before the dimensions.
/// - [`Error::Constraint`] if the image is not square or exceeds
///   [`MAX_DIMENSION`] pixels per side.
pub fn read_png(path: impl AsRef<Path>) -> Result<ParsedImage> {
    let path = path.as_ref();
    let file = File::open(path).map_err(Error::io(IoOp::Open, path))?;
    read_png_from(BufReader::new(file), path)
}

/// Read and validate a PNG stream; `source` is only used to label errors and
/// the resulting image.
///
/// # Errors
///
/// Same as [`read_png`], with read failures of `reader` reported as
/// [`Error::Io`] against `source`.
pub fn read_png_from<R: Read + Seek>(mut reader: R, source: &Path) -> Result<ParsedImage> {
    let format_error = |issue| Error::Format {
        path: source.to_path_buf(),
        issue,
    };

    let mut signature = [0u8; 8];
    read_header_field(&mut reader, &mut signature, source)?;
    if signature != PNG_SIGNATURE {
        return Err(format_error(FormatIssue::BadSignature));
    }

    // Chunk length is not checked, only the type.
    let mut preamble = [0u8; 8];
    read_header_field(&mut reader, &mut preamble, source)?;
    let mut chunk_type = [0u8; 4];
    chunk_type.copy_from_slice(&preamble[4..]);
    if chunk_type != IHDR_CHUNK_TYPE {
        return Err(format_error(FormatIssue::MissingIhdr { found: chunk_type }));
    }

    let mut dimensions = [0u8; 8];
    read_header_field(&mut reader, &mut dimensions, source)?;
    let [w0, w1, w2, w3, h0, h1, h2, h3] = dimensions;
    let width = u32::from_be_bytes([w0, w1, w2, w3]);
    let height = u32::from_be_bytes([h0, h1, h2, h3]);

    check_dimensions(width, height).map_err(|violation| Error::Constraint {
        path: source.to_path_buf(),
        violation,
    })?;

    let mut bytes = Vec::new();
    let _ = reader
        .seek(SeekFrom::Start(0))
        .and_then(|_| reader.read_to_end(&mut bytes))
        .map_err(Error::io(IoOp::Read, source))?;

    Ok(ParsedImage {
        source: source.to_path_buf(),
        width,
        height,
        bytes,
    })
}

/// Check the icon dimension rules: square first, then size.
///
/// # Errors
///
/// Returns the first rule that `width` x `height` breaks.
pub const fn check_dimensions(
    width: u32,
    height: u32,
) -> std::result::Result<(), ConstraintViolation> {
    if width != height {
        return Err(ConstraintViolation::NotSquare { width, height });
    }
    if width > MAX_DIMENSION {
        return Err(ConstraintViolation::TooLarge {
            size: width,
            max: MAX_DIMENSION,
        });
    }
    Ok(())
}

/// `read_exact`, with a short read reported as a truncated header.
fn read_header_field<R: Read>(reader: &mut R, buf: &mut [u8], source: &Path) -> Result<()> {
    reader.read_exact(buf).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Error::Format {
                path: source.to_path_buf(),
                issue: FormatIssue::Truncated,
            }
        } else {
            Error::io(IoOp::Read, source)(err)
        }
    })
}
