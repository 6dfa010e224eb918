//! ICO container writer.
//!
//! Layout of the produced file, all integers little-endian:
//!
//! ```text
//! header     6 bytes        reserved = 0, type = 1, count = N
//! directory  16 * N bytes   one entry per image, in input order
//! payloads   sum(size)      each PNG stream verbatim, in directory order
//! ```
//!
//! The directory is computed in full before the first byte is written, so an
//! unrepresentable image set never creates the output file.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use png2ico_common::layout::{
    ICO_BIT_COUNT, ICO_ENTRY_SIZE, ICO_HEADER_SIZE, ICO_PLANES, ICO_RESOURCE_TYPE,
    dimension_byte, put_u16_le, put_u32_le,
};
use png2ico_common::warning::warn_once;

use crate::error::{Error, IoOp, Result};
use crate::png::ParsedImage;

/// One 16-byte record of the ICO directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Image width, or 0 if it does not fit in a byte.
    pub width: u8,
    /// Image height, or 0 if it does not fit in a byte.
    pub height: u8,
    /// Palette size; always 0 for PNG payloads.
    pub color_count: u8,
    /// Must be 0.
    pub reserved: u8,
    /// Colour planes.
    pub planes: u16,
    /// Bits per pixel.
    pub bit_count: u16,
    /// Payload length in bytes.
    pub size: u32,
    /// Absolute file offset of the payload.
    pub offset: u32,
}

impl DirectoryEntry {
    /// Entry for `image` with its payload placed at `offset`.
    ///
    /// # Errors
    ///
    /// Fails with [`io::ErrorKind::InvalidInput`] if the image is larger than
    /// `u32::MAX` bytes.
    pub fn for_image(image: &ParsedImage, offset: u32) -> io::Result<Self> {
        let size = u32::try_from(image.len()).map_err(|_| {
            invalid_input(format!(
                "{} is too large for an icon payload",
                image.source().display()
            ))
        })?;

        Ok(Self {
            width: dimension_byte(image.width()),
            height: dimension_byte(image.height()),
            color_count: 0,
            reserved: 0,
            planes: ICO_PLANES,
            bit_count: ICO_BIT_COUNT,
            size,
            offset,
        })
    }

    /// Serialize into the on-disk form.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; ICO_ENTRY_SIZE] {
        let mut buf = [0u8; ICO_ENTRY_SIZE];
        buf[0] = self.width;
        buf[1] = self.height;
        buf[2] = self.color_count;
        buf[3] = self.reserved;
        put_u16_le(&mut buf, 4, self.planes);
        put_u16_le(&mut buf, 6, self.bit_count);
        put_u32_le(&mut buf, 8, self.size);
        put_u32_le(&mut buf, 12, self.offset);
        buf
    }

    /// Decode an entry from its on-disk form.
    #[must_use]
    pub fn from_bytes(buf: &[u8; ICO_ENTRY_SIZE]) -> Self {
        let [
            width,
            height,
            color_count,
            reserved,
            p0,
            p1,
            b0,
            b1,
            s0,
            s1,
            s2,
            s3,
            o0,
            o1,
            o2,
            o3,
        ] = *buf;
        Self {
            width,
            height,
            color_count,
            reserved,
            planes: u16::from_le_bytes([p0, p1]),
            bit_count: u16::from_le_bytes([b0, b1]),
            size: u32::from_le_bytes([s0, s1, s2, s3]),
            offset: u32::from_le_bytes([o0, o1, o2, o3]),
        }
    }

    /// One past the last payload byte.
    #[must_use]
    pub fn end(&self) -> u64 {
        u64::from(self.offset) + u64::from(self.size)
    }
}

/// The header and directory of an ICO file, with payload offsets resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IcoDirectory {
    entry_count: u16,
    entries: Vec<DirectoryEntry>,
}

impl IcoDirectory {
    /// Lay out `images` contiguously after the directory, in order.
    ///
    /// # Errors
    ///
    /// Fails with [`io::ErrorKind::InvalidInput`] if there are more than
    /// `u16::MAX` images or a payload would start beyond `u32::MAX`.
    pub fn for_images(images: &[ParsedImage]) -> io::Result<Self> {
        let entry_count = u16::try_from(images.len())
            .map_err(|_| invalid_input(format!("{} images do not fit an icon", images.len())))?;

        let mut offset = payload_base(entry_count);
        let mut entries = Vec::with_capacity(images.len());
        for image in images {
            let entry = DirectoryEntry::for_image(image, offset)?;
            offset = offset
                .checked_add(entry.size)
                .ok_or_else(|| invalid_input("icon payloads exceed 4 GiB".to_string()))?;
            entries.push(entry);
        }

        Ok(Self {
            entry_count,
            entries,
        })
    }

    /// Number of directory entries.
    #[must_use]
    pub const fn entry_count(&self) -> u16 {
        self.entry_count
    }

    /// Directory entries in payload order.
    #[must_use]
    pub fn entries(&self) -> &[DirectoryEntry] {
        &self.entries
    }

    /// File offset of the first payload.
    #[must_use]
    pub fn payload_base(&self) -> u32 {
        payload_base(self.entry_count)
    }

    /// Total size of the ICO file described by this directory.
    #[must_use]
    pub fn file_size(&self) -> u64 {
        self.entries
            .last()
            .map_or_else(|| u64::from(self.payload_base()), DirectoryEntry::end)
    }

    /// Serialize the 6-byte file header.
    #[must_use]
    pub fn header_bytes(&self) -> [u8; ICO_HEADER_SIZE] {
        let mut buf = [0u8; ICO_HEADER_SIZE];
        put_u16_le(&mut buf, 0, 0);
        put_u16_le(&mut buf, 2, ICO_RESOURCE_TYPE);
        put_u16_le(&mut buf, 4, self.entry_count);
        buf
    }

    /// Write the header, the directory and then every payload.
    ///
    /// `images` must be the slice this directory was computed from.
    fn emit<W: Write>(&self, writer: &mut W, images: &[ParsedImage]) -> io::Result<()> {
        warn_clamped(images);
        writer.write_all(&self.header_bytes())?;
        for entry in &self.entries {
            writer.write_all(&entry.to_bytes())?;
        }

        let mut position = u64::from(self.payload_base());
        for (entry, image) in self.entries.iter().zip(images) {
            debug_assert_eq!(position, u64::from(entry.offset));
            writer.write_all(image.bytes())?;
            position += u64::from(entry.size);
        }
        writer.flush()
    }
}

/// Write an ICO container holding `images` to `writer`.
///
/// # Errors
///
/// Returns the first write or flush failure, or
/// [`io::ErrorKind::InvalidInput`] if the directory cannot be represented.
/// Bytes already written are not rolled back.
pub fn write_ico_to<W: Write>(mut writer: W, images: &[ParsedImage]) -> io::Result<IcoDirectory> {
    let directory = IcoDirectory::for_images(images)?;
    directory.emit(&mut writer, images)?;
    Ok(directory)
}

/// Create (or truncate) `path` and write an ICO container holding `images`.
///
/// Returns the directory that was written.
///
/// # Errors
///
/// [`Error::Io`] if the directory cannot be represented, the file cannot be
/// created, or any write fails. A partially written file is left in place.
pub fn write_ico(path: impl AsRef<Path>, images: Vec<ParsedImage>) -> Result<IcoDirectory> {
    let path = path.as_ref();
    let directory = IcoDirectory::for_images(&images).map_err(Error::io(IoOp::Write, path))?;

    let file = File::create(path).map_err(Error::io(IoOp::Create, path))?;
    let mut writer = BufWriter::new(file);
    directory
        .emit(&mut writer, &images)
        .map_err(Error::io(IoOp::Write, path))?;
    Ok(directory)
}

/// Report images whose dimensions are stored as 0 in the directory.
fn warn_clamped(images: &[ParsedImage]) {
    for image in images {
        if image.width() > 255 || image.height() > 255 {
            warn_once("ICO", &clamp_warning(image.width(), image.height()));
        }
    }
}

fn clamp_warning(width: u32, height: u32) -> String {
    format!("{width}x{height} does not fit a directory byte; dimensions recorded as 0")
}

// At most 6 + 16 * 65535, well inside u32.
#[allow(clippy::cast_possible_truncation)]
const fn payload_base(entry_count: u16) -> u32 {
    ICO_HEADER_SIZE as u32 + ICO_ENTRY_SIZE as u32 * entry_count as u32
}

fn invalid_input(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message)
}
