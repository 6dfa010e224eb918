//! Integration tests for the PNG header reader.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use png2ico_common::layout::{PNG_HEIGHT_OFFSET, PNG_SIGNATURE, PNG_WIDTH_OFFSET, be_u32};
use png2ico_format::{
    ConstraintViolation, Error, ErrorKind, FormatIssue, IoOp, ParsedImage, read_png,
    read_png_from,
};
use quickcheck_macros::quickcheck;

/// Encode a real RGBA PNG with the `image` crate.
fn encoded_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([200, 40, 90, 255]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

/// Signature plus an IHDR chunk declaring `width` x `height`, no pixel data.
fn header_only(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = PNG_SIGNATURE.to_vec();
    bytes.extend_from_slice(&13u32.to_be_bytes());
    bytes.extend_from_slice(b"IHDR");
    bytes.extend_from_slice(&width.to_be_bytes());
    bytes.extend_from_slice(&height.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0, 0, 0, 0, 0]);
    bytes
}

fn parse(bytes: Vec<u8>) -> Result<ParsedImage, Error> {
    read_png_from(Cursor::new(bytes), Path::new("input.png"))
}

// ========== valid sources ==========

#[test]
fn test_reads_encoded_png_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icon-64.png");
    let bytes = encoded_png(64, 64);
    fs::write(&path, &bytes).unwrap();

    let image = read_png(&path).unwrap();
    assert_eq!(image.width(), 64);
    assert_eq!(image.height(), 64);
    assert_eq!(image.bytes(), bytes.as_slice());
    assert_eq!(image.source(), path.as_path());
}

#[test]
fn test_parsed_image_read_matches_read_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("icon-16.png");
    fs::write(&path, encoded_png(16, 16)).unwrap();

    assert_eq!(ParsedImage::read(&path).unwrap(), read_png(&path).unwrap());
}

#[test]
fn test_largest_allowed_size() {
    let image = parse(encoded_png(512, 512)).unwrap();
    assert_eq!(image.width(), 512);
}

#[test]
fn test_into_bytes_returns_whole_file() {
    let bytes = header_only(24, 24);
    let image = parse(bytes.clone()).unwrap();
    assert_eq!(image.len(), bytes.len());
    assert!(!image.is_empty());
    assert_eq!(image.into_bytes(), bytes);
}

#[quickcheck]
fn prop_dimensions_read_back_from_bytes(side: u32) -> bool {
    let side = side % 513;
    let image = parse(header_only(side, side)).unwrap();
    be_u32(image.bytes(), PNG_WIDTH_OFFSET) == Some(image.width())
        && be_u32(image.bytes(), PNG_HEIGHT_OFFSET) == Some(image.height())
        && image.width() == side
}

// ========== constraint errors ==========

#[test]
fn test_non_square_rejected() {
    let err = parse(encoded_png(32, 16)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Constraint);
    assert!(matches!(
        err,
        Error::Constraint {
            violation: ConstraintViolation::NotSquare {
                width: 32,
                height: 16
            },
            ..
        }
    ));
}

#[test]
fn test_oversized_rejected() {
    let err = parse(encoded_png(513, 513)).unwrap_err();
    assert!(matches!(
        err,
        Error::Constraint {
            violation: ConstraintViolation::TooLarge { size: 513, max: 512 },
            ..
        }
    ));
}

#[quickcheck]
fn prop_invalid_dimensions_never_parse(width: u32, height: u32) -> bool {
    let valid = width == height && width <= 512;
    match parse(header_only(width, height)) {
        Ok(_) => valid,
        Err(err) => !valid && err.kind() == ErrorKind::Constraint,
    }
}

// ========== format errors ==========

#[test]
fn test_wrong_signature_rejected() {
    let mut bytes = encoded_png(16, 16);
    bytes[0] = 0x88;
    let err = parse(bytes).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert!(matches!(
        err,
        Error::Format {
            issue: FormatIssue::BadSignature,
            ..
        }
    ));
}

#[test]
fn test_text_file_rejected() {
    let err = parse(b"this is definitely not an image, just some text".to_vec()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
    assert_eq!(
        err.to_string(),
        "input.png is not a png file: signature mismatch"
    );
}

#[quickcheck]
fn prop_any_signature_mismatch_is_format_error(prefix: Vec<u8>) -> bool {
    let mut bytes = header_only(16, 16);
    let n = prefix.len().min(8);
    bytes[..n].copy_from_slice(&prefix[..n]);
    let intact = bytes[..8] == PNG_SIGNATURE;
    match parse(bytes) {
        Ok(_) => intact,
        Err(err) => !intact && err.kind() == ErrorKind::Format,
    }
}

// ========== io errors ==========

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_png(dir.path().join("absent.png")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
    assert!(matches!(err, Error::Io { op: IoOp::Open, .. }));
    assert!(err.to_string().starts_with("unable to open file "));
}
