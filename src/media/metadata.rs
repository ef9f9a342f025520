// SPDX-License-Identifier: MPL-2.0
//! EXIF metadata extraction.
//!
//! The JPEG container is walked here to find the APP1 `Exif` segment, so that
//! a missing segment, a PNG, and an unknown TIFF byte order can be told apart.
//! The TIFF structure inside the segment is parsed with `kamadak-exif`.

use std::fmt;

const JPEG_SOI: [u8; 2] = [0xFF, 0xD8];
const MARKER_APP1: u8 = 0xE1;
const MARKER_SOS: u8 = 0xDA;
const MARKER_EOI: u8 = 0xD9;
const EXIF_HEADER: &[u8] = b"Exif\0\0";
const TIFF_HEADER_LEN: usize = 8;

/// EXIF orientation tag (values 1–8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    Transpose,
    Rotate90,
    Transverse,
    Rotate270,
}

impl Orientation {
    /// Maps the raw tag value; values outside 1–8 are unknown.
    #[must_use]
    pub fn from_exif(value: u16) -> Option<Self> {
        match value {
            1 => Some(Self::Normal),
            2 => Some(Self::FlipHorizontal),
            3 => Some(Self::Rotate180),
            4 => Some(Self::FlipVertical),
            5 => Some(Self::Transpose),
            6 => Some(Self::Rotate90),
            7 => Some(Self::Transverse),
            8 => Some(Self::Rotate270),
            _ => None,
        }
    }

    #[must_use]
    pub fn exif_value(self) -> u16 {
        match self {
            Self::Normal => 1,
            Self::FlipHorizontal => 2,
            Self::Rotate180 => 3,
            Self::FlipVertical => 4,
            Self::Transpose => 5,
            Self::Rotate90 => 6,
            Self::Transverse => 7,
            Self::Rotate270 => 8,
        }
    }

    /// Clockwise rotation needed to display the image upright.
    ///
    /// Mirrored orientations (2, 4, 5, 7) are not corrected and yield 0.
    #[must_use]
    pub fn rotation_degrees(self) -> u16 {
        match self {
            Self::Rotate90 => 90,
            Self::Rotate180 => 180,
            Self::Rotate270 => 270,
            _ => 0,
        }
    }

    #[must_use]
    pub fn is_mirrored(self) -> bool {
        matches!(
            self,
            Self::FlipHorizontal | Self::FlipVertical | Self::Transpose | Self::Transverse
        )
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Normal => "Normal",
            Self::FlipHorizontal => "Mirrored horizontal",
            Self::Rotate180 => "Rotated 180°",
            Self::FlipVertical => "Mirrored vertical",
            Self::Transpose => "Mirrored horizontal + rotated 270°",
            Self::Rotate90 => "Rotated 90° CW",
            Self::Transverse => "Mirrored horizontal + rotated 90°",
            Self::Rotate270 => "Rotated 270° CW",
        };
        write!(f, "{} ({})", label, self.exif_value())
    }
}

/// Camera fields read from a successfully parsed EXIF block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExifInfo {
    /// Camera manufacturer (e.g., "SONY")
    pub make: Option<String>,
    /// Camera model (e.g., "ILCE-7M3")
    pub model: Option<String>,
    /// Date and time as written by the camera (`YYYY:MM:DD HH:MM:SS`)
    pub date_time: Option<String>,
    /// Exposure time in seconds
    pub exposure_time: Option<f64>,
    /// Aperture f-number
    pub f_number: Option<f64>,
    /// ISO speed rating
    pub iso: Option<u32>,
    /// Focal length in mm
    pub focal_length: Option<f64>,
    /// Focal length equivalent to 35mm film, in mm
    pub focal_length_35mm: Option<u32>,
    /// Raw orientation tag value
    pub orientation: Option<u16>,
}

impl ExifInfo {
    fn from_exif(exif: &exif::Exif) -> Self {
        Self {
            make: ascii_field(exif, exif::Tag::Make),
            model: ascii_field(exif, exif::Tag::Model),
            date_time: ascii_field(exif, exif::Tag::DateTime),
            exposure_time: rational_field(exif, exif::Tag::ExposureTime),
            f_number: rational_field(exif, exif::Tag::FNumber),
            iso: uint_field(exif, exif::Tag::PhotographicSensitivity),
            focal_length: rational_field(exif, exif::Tag::FocalLength),
            focal_length_35mm: uint_field(exif, exif::Tag::FocalLengthIn35mmFilm),
            orientation: uint_field(exif, exif::Tag::Orientation)
                .and_then(|v| u16::try_from(v).ok()),
        }
    }

    /// Decoded orientation; unknown or missing values count as normal.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
            .and_then(Orientation::from_exif)
            .unwrap_or_default()
    }

    /// Lines shown in the image info panel, in display order.
    #[must_use]
    pub fn display_lines(&self) -> Vec<(&'static str, String)> {
        let mut lines = Vec::new();
        let camera = match (&self.make, &self.model) {
            (Some(make), Some(model)) => Some(format!("{make} ({model})")),
            (Some(make), None) => Some(make.clone()),
            (None, Some(model)) => Some(model.clone()),
            (None, None) => None,
        };
        if let Some(camera) = camera {
            lines.push(("Camera", camera));
        }
        if let Some(date_time) = &self.date_time {
            lines.push(("Date-time", date_time.clone()));
        }
        if let Some(exposure) = self.exposure_time {
            lines.push(("Shutter speed", format_shutter_speed(exposure)));
        }
        if let Some(f_number) = self.f_number {
            lines.push(("Aperture", format_aperture(f_number)));
        }
        if let Some(iso) = self.iso {
            lines.push(("ISO", iso.to_string()));
        }
        if let Some(focal) = self.focal_length {
            lines.push((
                "Focal length",
                format_focal_length(focal, self.focal_length_35mm),
            ));
        }
        if self.orientation.is_some() {
            lines.push(("Orientation", self.orientation().to_string()));
        }
        lines
    }
}

/// Result of looking for EXIF data in a file's bytes.
#[derive(Debug, Clone, PartialEq)]
pub enum ExifOutcome {
    /// A JPEG without an APP1 `Exif` segment.
    NoExifContainer,
    /// Not a JPEG at all, so it cannot carry EXIF in the supported layout.
    NotAJpeg,
    /// The TIFF header names neither `II` nor `MM` byte order.
    UnknownByteAlignment,
    /// The segment or its TIFF structure is malformed.
    CorruptData,
    Success(ExifInfo),
}

impl ExifOutcome {
    /// Fields of a successful parse.
    #[must_use]
    pub fn info(&self) -> Option<&ExifInfo> {
        match self {
            ExifOutcome::Success(info) => Some(info),
            _ => None,
        }
    }

    /// Orientation to display the image with; anything but a successful parse
    /// counts as normal.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.info().map(ExifInfo::orientation).unwrap_or_default()
    }

    /// User-facing message for the outcomes that carry no data.
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ExifOutcome::NoExifContainer => Some("EXIF data not found"),
            ExifOutcome::NotAJpeg => Some("Cannot parse EXIF data for non-JPEG images"),
            ExifOutcome::UnknownByteAlignment => {
                Some("Error reading EXIF data (unknown byte alignment)")
            }
            ExifOutcome::CorruptData => Some("Error reading EXIF data (data corrupted)"),
            ExifOutcome::Success(_) => None,
        }
    }

    /// Logs the outcome at a severity that matches it.
    pub fn log(&self, file_name: &str) {
        match self {
            ExifOutcome::NoExifContainer => tracing::info!("{file_name}: EXIF data not found"),
            ExifOutcome::NotAJpeg => {
                tracing::warn!("{file_name}: cannot parse EXIF data for non-JPEG images");
            }
            ExifOutcome::UnknownByteAlignment => {
                tracing::error!("{file_name}: error reading EXIF data (unknown byte alignment)");
            }
            ExifOutcome::CorruptData => {
                tracing::error!("{file_name}: error reading EXIF data (data corrupted)");
            }
            ExifOutcome::Success(info) => {
                for (label, value) in info.display_lines() {
                    tracing::debug!("{file_name}: {label}: {value}");
                }
            }
        }
    }
}

/// Parses EXIF metadata out of a file's bytes.
pub trait MetadataDecoder {
    fn parse(&self, bytes: &[u8]) -> ExifOutcome;
}

/// [`MetadataDecoder`] for JPEG files, backed by `kamadak-exif`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExifReader;

impl MetadataDecoder for ExifReader {
    fn parse(&self, bytes: &[u8]) -> ExifOutcome {
        let tiff = match find_exif_segment(bytes) {
            Segment::Found(tiff) => tiff,
            Segment::NotJpeg => return ExifOutcome::NotAJpeg,
            Segment::Missing => return ExifOutcome::NoExifContainer,
            Segment::Truncated => return ExifOutcome::CorruptData,
        };

        if tiff.len() < TIFF_HEADER_LEN {
            return ExifOutcome::CorruptData;
        }
        if &tiff[..2] != b"II" && &tiff[..2] != b"MM" {
            return ExifOutcome::UnknownByteAlignment;
        }

        match exif::Reader::new().read_raw(tiff.to_vec()) {
            Ok(exif) => ExifOutcome::Success(ExifInfo::from_exif(&exif)),
            Err(err) => {
                tracing::debug!("EXIF block rejected: {err}");
                ExifOutcome::CorruptData
            }
        }
    }
}

enum Segment<'a> {
    Found(&'a [u8]),
    NotJpeg,
    Missing,
    Truncated,
}

/// Walks the JPEG markers up to the start of scan looking for APP1 `Exif`.
fn find_exif_segment(bytes: &[u8]) -> Segment<'_> {
    if !bytes.starts_with(&JPEG_SOI) {
        return Segment::NotJpeg;
    }

    let mut pos = JPEG_SOI.len();
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return Segment::Truncated;
        }
        let marker = bytes[pos + 1];
        match marker {
            // fill byte
            0xFF => {
                pos += 1;
                continue;
            }
            MARKER_SOS | MARKER_EOI => return Segment::Missing,
            // standalone markers carry no length
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            _ => {}
        }

        let len = usize::from(u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]));
        let end = pos + 2 + len;
        if len < 2 || end > bytes.len() {
            return Segment::Truncated;
        }
        let payload = &bytes[pos + 4..end];
        if marker == MARKER_APP1 && payload.starts_with(EXIF_HEADER) {
            return Segment::Found(&payload[EXIF_HEADER.len()..]);
        }
        pos = end;
    }

    Segment::Missing
}

fn ascii_field(exif: &exif::Exif, tag: exif::Tag) -> Option<String> {
    let field = exif.get_field(tag, exif::In::PRIMARY)?;
    let value = field
        .display_value()
        .to_string()
        .trim_matches('"')
        .trim()
        .to_string();
    (!value.is_empty()).then_some(value)
}

fn rational_field(exif: &exif::Exif, tag: exif::Tag) -> Option<f64> {
    let field = exif.get_field(tag, exif::In::PRIMARY)?;
    match &field.value {
        exif::Value::Rational(values) => values.first().map(exif::Rational::to_f64),
        exif::Value::SRational(values) => values.first().map(exif::SRational::to_f64),
        _ => None,
    }
}

fn uint_field(exif: &exif::Exif, tag: exif::Tag) -> Option<u32> {
    exif.get_field(tag, exif::In::PRIMARY)?.value.get_uint(0)
}

/// Formats an exposure time: `1/250 s` below one second, `2.50 s` otherwise.
#[must_use]
pub fn format_shutter_speed(seconds: f64) -> String {
    if seconds > 0.0 && seconds < 1.0 {
        format!("1/{} s", (1.0 / seconds).round() as u32)
    } else {
        format!("{seconds:.2} s")
    }
}

#[must_use]
pub fn format_aperture(f_number: f64) -> String {
    format!("f/{f_number:.1}")
}

#[must_use]
pub fn format_focal_length(mm: f64, equivalent_35mm: Option<u32>) -> String {
    match equivalent_35mm {
        Some(eq) if eq > 0 => format!("{} mm ({} mm equivalent)", mm.round() as u32, eq),
        _ => format!("{} mm", mm.round() as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{jpeg_bytes, jpeg_with_app1, jpeg_with_orientation, png_bytes};

    #[test]
    fn png_is_not_a_jpeg() {
        assert_eq!(ExifReader.parse(&png_bytes(4, 4)), ExifOutcome::NotAJpeg);
    }

    #[test]
    fn empty_bytes_are_not_a_jpeg() {
        assert_eq!(ExifReader.parse(&[]), ExifOutcome::NotAJpeg);
    }

    #[test]
    fn plain_jpeg_has_no_exif_container() {
        assert_eq!(
            ExifReader.parse(&jpeg_bytes(4, 4)),
            ExifOutcome::NoExifContainer
        );
    }

    #[test]
    fn orientation_tag_is_read() {
        let outcome = ExifReader.parse(&jpeg_with_orientation(8, 4, 6));

        let info = outcome.info().expect("exif should parse");
        assert_eq!(info.orientation, Some(6));
        assert_eq!(outcome.orientation(), Orientation::Rotate90);
    }

    #[test]
    fn unknown_byte_order_is_reported() {
        let mut tiff = b"XX\x2A\x00\x08\x00\x00\x00".to_vec();
        tiff.extend_from_slice(&[0, 0, 0, 0, 0, 0]);
        let bytes = jpeg_with_app1(4, 4, &tiff);

        assert_eq!(ExifReader.parse(&bytes), ExifOutcome::UnknownByteAlignment);
    }

    #[test]
    fn broken_ifd_offset_is_corrupt() {
        let tiff = b"II\x2A\x00\xFF\x00\x00\x00".to_vec();
        let bytes = jpeg_with_app1(4, 4, &tiff);

        assert_eq!(ExifReader.parse(&bytes), ExifOutcome::CorruptData);
    }

    #[test]
    fn truncated_segment_is_corrupt() {
        // SOI, APP1 claiming 0x100 bytes, then the file ends
        let bytes = [0xFF, 0xD8, 0xFF, 0xE1, 0x01, 0x00, b'E', b'x'];
        assert_eq!(ExifReader.parse(&bytes), ExifOutcome::CorruptData);
    }

    #[test]
    fn only_three_six_and_eight_rotate() {
        let rotations: Vec<u16> = (1..=8)
            .filter_map(Orientation::from_exif)
            .map(Orientation::rotation_degrees)
            .collect();
        assert_eq!(rotations, vec![0, 0, 180, 0, 0, 90, 0, 270]);
        assert_eq!(Orientation::from_exif(0), None);
        assert_eq!(Orientation::from_exif(9), None);
    }

    #[test]
    fn mirrored_orientations_are_flagged() {
        assert!(Orientation::FlipHorizontal.is_mirrored());
        assert!(Orientation::Transverse.is_mirrored());
        assert!(!Orientation::Rotate90.is_mirrored());
        assert!(!Orientation::Normal.is_mirrored());
    }

    #[test]
    fn failed_outcomes_have_distinct_messages() {
        let messages = [
            ExifOutcome::NoExifContainer.message(),
            ExifOutcome::NotAJpeg.message(),
            ExifOutcome::UnknownByteAlignment.message(),
            ExifOutcome::CorruptData.message(),
        ];
        for (i, a) in messages.iter().enumerate() {
            assert!(a.is_some());
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(ExifOutcome::Success(ExifInfo::default())
            .message()
            .is_none());
    }

    #[test]
    fn failed_outcomes_default_to_normal_orientation() {
        assert_eq!(ExifOutcome::CorruptData.orientation(), Orientation::Normal);
        assert_eq!(ExifOutcome::NotAJpeg.orientation(), Orientation::Normal);
    }

    #[test]
    fn shutter_speed_formats_fractions() {
        assert_eq!(format_shutter_speed(0.004), "1/250 s");
        assert_eq!(format_shutter_speed(2.5), "2.50 s");
        assert_eq!(format_shutter_speed(1.0), "1.00 s");
    }

    #[test]
    fn focal_length_mentions_equivalent() {
        assert_eq!(format_focal_length(50.0, Some(75)), "50 mm (75 mm equivalent)");
        assert_eq!(format_focal_length(23.4, None), "23 mm");
        assert_eq!(format_aperture(2.8), "f/2.8");
    }

    #[test]
    fn display_lines_skip_missing_fields() {
        let info = ExifInfo {
            make: Some("SONY".into()),
            model: Some("ILCE-7M3".into()),
            iso: Some(400),
            ..ExifInfo::default()
        };
        let lines = info.display_lines();
        assert_eq!(
            lines,
            vec![
                ("Camera", "SONY (ILCE-7M3)".to_string()),
                ("ISO", "400".to_string()),
            ]
        );
    }
}
