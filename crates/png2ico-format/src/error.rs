//! Errors raised while reading PNG sources or writing the ICO container.
//!
//! Every variant carries the path of the file involved so that a single
//! `Display` line is enough to tell the user what went wrong and where.

use std::io;
use std::path::PathBuf;

use strum_macros::Display;
use thiserror::Error;

/// The file operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum IoOp {
    /// Opening a PNG source for reading.
    Open,
    /// Reading from an opened PNG source.
    Read,
    /// Creating (or truncating) the ICO output.
    Create,
    /// Writing or flushing the ICO output.
    Write,
}

/// Why a source was rejected as not being a PNG stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatIssue {
    /// The first eight bytes are not the PNG signature.
    #[error("signature mismatch")]
    BadSignature,
    /// The stream ends before the IHDR width and height.
    #[error("file ends before the image header")]
    Truncated,
    /// The first chunk after the signature is not `IHDR`.
    #[error("first chunk is {} instead of IHDR", String::from_utf8_lossy(.found))]
    MissingIhdr {
        /// Chunk type found where `IHDR` was expected.
        found: [u8; 4],
    },
}

/// An image dimension rule that a PNG source breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConstraintViolation {
    /// Icons must be square.
    #[error("png image should be square, width = height (got {width}x{height})")]
    NotSquare {
        /// Width declared in IHDR.
        width: u32,
        /// Height declared in IHDR.
        height: u32,
    },
    /// Icons are limited to `max` pixels per side.
    #[error("png width and height should not exceed {max} pixels (got {size})")]
    TooLarge {
        /// Side length declared in IHDR.
        size: u32,
        /// Largest accepted side length.
        max: u32,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    /// A file could not be opened, read, created or written.
    Io,
    /// A source is not a PNG stream.
    Format,
    /// A PNG source has unsupported dimensions.
    Constraint,
    /// The caller asked for an impossible conversion.
    Usage,
}

/// Error type for every png2ico operation.
#[derive(Debug, Error)]
pub enum Error {
    /// A file operation failed.
    #[error("unable to {op} file {}: {source}", path.display())]
    Io {
        /// The operation that failed.
        op: IoOp,
        /// The file it was applied to.
        path: PathBuf,
        /// The underlying OS error.
        #[source]
        source: io::Error,
    },
    /// A source is not a PNG stream.
    #[error("{} is not a png file: {issue}", path.display())]
    Format {
        /// The offending source.
        path: PathBuf,
        /// What is wrong with its header.
        issue: FormatIssue,
    },
    /// A PNG source cannot become an icon image.
    #[error("{}: {violation}", path.display())]
    Constraint {
        /// The offending source.
        path: PathBuf,
        /// The broken rule.
        violation: ConstraintViolation,
    },
    /// No input images were given.
    #[error("no input files specified")]
    NoInputs,
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Io { .. } => ErrorKind::Io,
            Self::Format { .. } => ErrorKind::Format,
            Self::Constraint { .. } => ErrorKind::Constraint,
            Self::NoInputs => ErrorKind::Usage,
        }
    }

    /// Build a closure that wraps an [`io::Error`] for `path`, for use with `map_err`.
    pub(crate) fn io(op: IoOp, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { op, path, source }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
