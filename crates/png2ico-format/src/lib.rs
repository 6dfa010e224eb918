//! PNG to ICO conversion.
//!
//! - [`png`] - validates a PNG header and keeps the whole stream
//! - [`ico`] - lays out and writes the ICO header, directory and payloads
//! - [`convert`] - reads up to [`MAX_ICON_COUNT`] sources and writes one icon
//!
//! Conversion is fail-fast: the first error aborts the whole run and is
//! returned to the caller unchanged.

pub mod error;
pub mod ico;
pub mod png;

use std::path::Path;

pub use error::{ConstraintViolation, Error, ErrorKind, FormatIssue, IoOp, Result};
pub use ico::{DirectoryEntry, IcoDirectory, write_ico, write_ico_to};
pub use png::{ParsedImage, read_png, read_png_from};

/// Most images packed into one icon; further inputs are ignored.
pub const MAX_ICON_COUNT: usize = 16;

/// Pack the PNG files in `inputs` into an ICO file at `output`.
///
/// Only the first [`MAX_ICON_COUNT`] inputs are used. Every source is read
/// and validated before the output file is created.
///
/// # Errors
///
/// - [`Error::NoInputs`] if `inputs` is empty.
/// - Any error from [`read_png`] for the first source that fails.
/// - Any error from [`write_ico`].
pub fn convert<P: AsRef<Path>>(output: impl AsRef<Path>, inputs: &[P]) -> Result<IcoDirectory> {
    if inputs.is_empty() {
        return Err(Error::NoInputs);
    }

    let images = inputs
        .iter()
        .take(MAX_ICON_COUNT)
        .map(read_png)
        .collect::<Result<Vec<_>>>()?;

    write_ico(output, images)
}
