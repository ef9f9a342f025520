// SPDX-License-Identifier: MPL-2.0
//! Pixel decoding of JPEG and PNG files.

use crate::error::{Error, Result};
use image_rs::{DynamicImage, GenericImageView};

/// Layout of a decoded pixel buffer, one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Grayscale,
    GrayscaleAlpha,
    Rgb,
    Rgba,
}

impl PixelFormat {
    /// Maps a channel count (1–4) to its pixel format.
    #[must_use]
    pub fn from_channels(channels: u8) -> Option<Self> {
        match channels {
            1 => Some(Self::Grayscale),
            2 => Some(Self::GrayscaleAlpha),
            3 => Some(Self::Rgb),
            4 => Some(Self::Rgba),
            _ => None,
        }
    }

    #[must_use]
    pub fn channels(self) -> u8 {
        match self {
            Self::Grayscale => 1,
            Self::GrayscaleAlpha => 2,
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }
}

/// Pixels of a decoded image, ready to be uploaded as a texture.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pixels: Vec<u8>,
}

impl DecodedImage {
    /// Wraps a raw pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the dimensions are zero or the buffer
    /// length does not match `width * height * channels`.
    pub fn new(width: u32, height: u32, format: PixelFormat, pixels: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::Decode("Image has empty dimensions".into()));
        }
        let expected = width as usize * height as usize * usize::from(format.channels());
        if pixels.len() != expected {
            return Err(Error::Decode(format!(
                "Pixel buffer holds {} bytes, expected {}",
                pixels.len(),
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            pixels,
        })
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Expands the buffer to RGBA, the layout GPU textures are built from.
    #[must_use]
    pub fn into_rgba(self) -> Vec<u8> {
        let (width, height) = (self.width, self.height);
        let dynamic = match self.format {
            PixelFormat::Rgba => return self.pixels,
            PixelFormat::Grayscale => image_rs::GrayImage::from_raw(width, height, self.pixels)
                .map(DynamicImage::ImageLuma8),
            PixelFormat::GrayscaleAlpha => {
                image_rs::GrayAlphaImage::from_raw(width, height, self.pixels)
                    .map(DynamicImage::ImageLumaA8)
            }
            PixelFormat::Rgb => image_rs::RgbImage::from_raw(width, height, self.pixels)
                .map(DynamicImage::ImageRgb8),
        };
        // Lengths were validated in `new`, so the buffer always fits.
        dynamic.map(|img| img.to_rgba8().into_vec()).unwrap_or_default()
    }
}

/// Turns encoded file bytes into pixels.
pub trait PixelDecoder {
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when the bytes are not a decodable image.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage>;
}

/// [`PixelDecoder`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageRsDecoder;

impl PixelDecoder for ImageRsDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage> {
        let img = image_rs::load_from_memory(bytes)?;
        let (width, height) = img.dimensions();

        let (format, pixels) = match img {
            DynamicImage::ImageLuma8(buf) => (PixelFormat::Grayscale, buf.into_raw()),
            DynamicImage::ImageLumaA8(buf) => (PixelFormat::GrayscaleAlpha, buf.into_raw()),
            DynamicImage::ImageRgb8(buf) => (PixelFormat::Rgb, buf.into_raw()),
            DynamicImage::ImageRgba8(buf) => (PixelFormat::Rgba, buf.into_raw()),
            // 16-bit and float buffers are narrowed to 8-bit RGBA
            other => (PixelFormat::Rgba, other.to_rgba8().into_raw()),
        };

        DecodedImage::new(width, height, format, pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), format)
            .expect("failed to encode test image");
        bytes
    }

    #[test]
    fn decode_png_returns_expected_dimensions() {
        let img = RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]));
        let bytes = encode(DynamicImage::ImageRgba8(img), ImageFormat::Png);

        let decoded = ImageRsDecoder.decode(&bytes).expect("png should decode");
        assert_eq!(decoded.width, 4);
        assert_eq!(decoded.height, 2);
        assert_eq!(decoded.format, PixelFormat::Rgba);
        assert_eq!(decoded.pixels().len(), 4 * 2 * 4);
    }

    #[test]
    fn decode_jpeg_reports_rgb_channels() {
        let img = RgbImage::from_pixel(8, 6, Rgb([10, 20, 30]));
        let bytes = encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg);

        let decoded = ImageRsDecoder.decode(&bytes).expect("jpeg should decode");
        assert_eq!((decoded.width, decoded.height), (8, 6));
        assert_eq!(decoded.format, PixelFormat::Rgb);
    }

    #[test]
    fn decode_grayscale_png_keeps_single_channel() {
        let img = image_rs::GrayImage::from_pixel(3, 3, Luma([128]));
        let bytes = encode(DynamicImage::ImageLuma8(img), ImageFormat::Png);

        let decoded = ImageRsDecoder.decode(&bytes).expect("gray png should decode");
        assert_eq!(decoded.format, PixelFormat::Grayscale);
        assert_eq!(decoded.clone().into_rgba(), vec![128, 128, 128, 255].repeat(9));
    }

    #[test]
    fn decode_garbage_returns_decode_error() {
        match ImageRsDecoder.decode(b"not an image") {
            Err(Error::Decode(message)) => assert!(!message.is_empty()),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn channel_counts_map_to_formats() {
        assert_eq!(PixelFormat::from_channels(1), Some(PixelFormat::Grayscale));
        assert_eq!(PixelFormat::from_channels(2), Some(PixelFormat::GrayscaleAlpha));
        assert_eq!(PixelFormat::from_channels(3), Some(PixelFormat::Rgb));
        assert_eq!(PixelFormat::from_channels(4), Some(PixelFormat::Rgba));
        assert_eq!(PixelFormat::from_channels(5), None);
    }

    #[test]
    fn new_rejects_mismatched_buffer() {
        assert!(DecodedImage::new(2, 2, PixelFormat::Rgb, vec![0; 11]).is_err());
        assert!(DecodedImage::new(0, 2, PixelFormat::Rgb, Vec::new()).is_err());
    }

    #[test]
    fn rgb_expands_to_opaque_rgba() {
        let decoded =
            DecodedImage::new(1, 1, PixelFormat::Rgb, vec![1, 2, 3]).expect("valid buffer");
        assert_eq!(decoded.into_rgba(), vec![1, 2, 3, 255]);
    }
}
