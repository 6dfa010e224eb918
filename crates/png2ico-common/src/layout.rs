//! Fixed binary layout of the PNG header and the ICO container.
//!
//! PNG stores multi-byte integers big-endian; ICO stores them little-endian.
//! Everything here works on explicit byte offsets so the serialized form never
//! depends on in-memory struct layout.

/// The first eight bytes of every PNG datastream.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];

/// Length field plus type tag that precede every PNG chunk's data.
pub const PNG_CHUNK_PREAMBLE_SIZE: usize = 8;

/// Type tag of the image header chunk, which must come first.
pub const IHDR_CHUNK_TYPE: [u8; 4] = *b"IHDR";

/// Absolute file offset of the IHDR width field.
pub const PNG_WIDTH_OFFSET: usize = PNG_SIGNATURE.len() + PNG_CHUNK_PREAMBLE_SIZE;

/// Absolute file offset of the IHDR height field.
pub const PNG_HEIGHT_OFFSET: usize = PNG_WIDTH_OFFSET + 4;

/// Largest width (and height) accepted for an icon image.
pub const MAX_DIMENSION: u32 = 512;

/// `reserved`, `type` and `count`, two bytes each.
pub const ICO_HEADER_SIZE: usize = 6;

/// Four `u8` fields, two `u16` fields, two `u32` fields.
pub const ICO_ENTRY_SIZE: usize = 16;

/// Resource type stored in the ICO header (1 = icon, 2 = cursor).
pub const ICO_RESOURCE_TYPE: u16 = 1;

/// Colour planes recorded in every directory entry.
pub const ICO_PLANES: u16 = 1;

/// Bits per pixel recorded in every directory entry.
pub const ICO_BIT_COUNT: u16 = 32;

/// Read a big-endian `u32` starting at `at`, or `None` if `bytes` is too short.
#[must_use]
pub fn be_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let field = bytes.get(at..at.checked_add(4)?)?;
    field.try_into().ok().map(u32::from_be_bytes)
}

/// Read a little-endian `u16` starting at `at`, or `None` if `bytes` is too short.
#[must_use]
pub fn le_u16(bytes: &[u8], at: usize) -> Option<u16> {
    let field = bytes.get(at..at.checked_add(2)?)?;
    field.try_into().ok().map(u16::from_le_bytes)
}

/// Read a little-endian `u32` starting at `at`, or `None` if `bytes` is too short.
#[must_use]
pub fn le_u32(bytes: &[u8], at: usize) -> Option<u32> {
    let field = bytes.get(at..at.checked_add(4)?)?;
    field.try_into().ok().map(u32::from_le_bytes)
}

/// Store `value` little-endian at `buf[at..at + 2]`.
///
/// # Panics
///
/// Panics if `buf` is shorter than `at + 2`.
pub fn put_u16_le(buf: &mut [u8], at: usize, value: u16) {
    buf[at..at + 2].copy_from_slice(&value.to_le_bytes());
}

/// Store `value` little-endian at `buf[at..at + 4]`.
///
/// # Panics
///
/// Panics if `buf` is shorter than `at + 4`.
pub fn put_u32_le(buf: &mut [u8], at: usize, value: u32) {
    buf[at..at + 4].copy_from_slice(&value.to_le_bytes());
}

/// Encode a pixel dimension into an ICO directory byte.
///
/// Values that do not fit in a byte become 0. The ICO convention of 0 meaning
/// 256 is not applied: 256 and 512 both encode as 0, same as a real 0.
#[must_use]
pub fn dimension_byte(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(0)
}
