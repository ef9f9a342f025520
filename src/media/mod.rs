// SPDX-License-Identifier: MPL-2.0
//! Image files and what the viewer knows about them.
//!
//! An [`ImageRecord`] is created for every file admitted by the directory
//! scanner. The decoders in [`image`] and [`metadata`] turn the file's bytes
//! into pixels and EXIF data, and [`trash`] moves files out of the way.

pub mod image;
pub mod metadata;
pub mod trash;

use std::path::{Path, PathBuf};

pub use self::image::{DecodedImage, ImageRsDecoder, PixelDecoder, PixelFormat};
pub use metadata::{ExifInfo, ExifOutcome, ExifReader, MetadataDecoder, Orientation};

pub mod extensions {
    /// Image file extensions the viewer admits (compared case-insensitively).
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];
}

pub use extensions::IMAGE_EXTENSIONS;

/// Returns true if the path has a supported image extension.
///
/// Only the name is inspected; whether the path is a regular file is checked
/// by the directory scanner.
pub fn has_supported_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// One image file known to the viewer.
///
/// The name components are derived once at creation and never change.
/// `metadata` is `None` until the file has been parsed; afterwards it holds
/// the parse outcome, which itself tells "no EXIF" apart from "parse failed".
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    file_path: PathBuf,
    file_name: String,
    file_stem: String,
    extension: String,
    metadata: Option<ExifOutcome>,
}

impl ImageRecord {
    /// Creates a record for the given path, deriving its name components.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let file_path = path.into();
        let file_name = file_path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file_stem = file_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = file_path
            .extension()
            .map(|s| format!(".{}", s.to_string_lossy()))
            .unwrap_or_default();

        Self {
            file_path,
            file_name,
            file_stem,
            extension,
            metadata: None,
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// File name with extension, e.g. `DSC0001.JPG`.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// File name without extension, e.g. `DSC0001`.
    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }

    /// Extension with its leading dot, in its original case (e.g. `.JPG`).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Cached EXIF parse outcome; `None` means the file was not parsed yet.
    pub fn metadata(&self) -> Option<&ExifOutcome> {
        self.metadata.as_ref()
    }

    pub fn is_parsed(&self) -> bool {
        self.metadata.is_some()
    }

    pub(crate) fn set_metadata(&mut self, outcome: ExifOutcome) {
        self.metadata = Some(outcome);
    }
}
