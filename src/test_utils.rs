// SPDX-License-Identifier: MPL-2.0
//! Test utilities for float comparisons and generated image files.
//!
//! This module re-exports the `approx` crate's assertion macros for float comparison,
//! which properly handle floating-point precision issues that `assert_eq!` cannot.

// Re-export approx macros for convenient use in tests
pub use approx::{assert_abs_diff_eq, assert_relative_eq};

use image_rs::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format)
        .expect("failed to encode test image");
    bytes
}

/// PNG of the given size, filled with opaque red.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

/// Baseline JPEG without any APP1 segment.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([40, 80, 120]));
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}

/// JPEG with an APP1 `Exif` segment wrapping the given TIFF block, inserted
/// right after SOI.
pub fn jpeg_with_app1(width: u32, height: u32, tiff: &[u8]) -> Vec<u8> {
    let jpeg = jpeg_bytes(width, height);
    let mut payload = b"Exif\0\0".to_vec();
    payload.extend_from_slice(tiff);
    let len = u16::try_from(payload.len() + 2).expect("APP1 payload too large");

    let mut bytes = vec![0xFF, 0xD8, 0xFF, 0xE1];
    bytes.extend_from_slice(&len.to_be_bytes());
    bytes.extend_from_slice(&payload);
    bytes.extend_from_slice(&jpeg[2..]);
    bytes
}

/// JPEG whose EXIF block holds a single Orientation tag (little-endian).
pub fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    let mut tiff = b"II\x2A\x00\x08\x00\x00\x00".to_vec();
    // one IFD0 entry: 0x0112 Orientation, SHORT, count 1
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x0112u16.to_le_bytes());
    tiff.extend_from_slice(&3u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&orientation.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]);
    // no next IFD
    tiff.extend_from_slice(&0u32.to_le_bytes());
    jpeg_with_app1(width, height, &tiff)
}

/// Writes `bytes` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).expect("failed to write test file");
    path
}
