// SPDX-License-Identifier: MPL-2.0
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Decode(String),
    Trash(TrashError),
}

/// Failures of the move-to-trash operation.
///
/// Every variant except `RawMoveFailed { rolled_back: false, .. }` means the
/// filesystem is unchanged and the image list must not be touched.
#[derive(Debug, Clone)]
pub enum TrashError {
    /// The trash directory is missing and could not be created.
    CreateDir { path: PathBuf, reason: String },

    /// A file with the same name already sits in the trash directory.
    DestinationExists(PathBuf),

    /// Moving the displayed image failed.
    MoveFailed {
        from: PathBuf,
        to: PathBuf,
        reason: String,
    },

    /// The image was moved but its raw sibling could not follow it.
    /// `rolled_back` tells whether the image was put back in place.
    RawMoveFailed {
        raw: PathBuf,
        reason: String,
        rolled_back: bool,
    },
}

impl TrashError {
    /// Returns true when the displayed image left its directory even though
    /// the operation as a whole failed.
    pub fn image_was_moved(&self) -> bool {
        matches!(
            self,
            TrashError::RawMoveFailed {
                rolled_back: false,
                ..
            }
        )
    }
}

impl fmt::Display for TrashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrashError::CreateDir { path, reason } => {
                write!(
                    f,
                    "Cannot create trash directory {}: {}",
                    path.display(),
                    reason
                )
            }
            TrashError::DestinationExists(path) => {
                write!(f, "Trash already contains {}", path.display())
            }
            TrashError::MoveFailed { from, to, reason } => write!(
                f,
                "Cannot move {} to {}: {}",
                from.display(),
                to.display(),
                reason
            ),
            TrashError::RawMoveFailed {
                raw,
                reason,
                rolled_back,
            } => {
                write!(f, "Cannot move raw file {}: {}", raw.display(), reason)?;
                if *rolled_back {
                    write!(f, " (image restored)")
                } else {
                    write!(f, " (image already in trash)")
                }
            }
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::Trash(e) => write!(f, "Delete Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<TrashError> for Error {
    fn from(err: TrashError) -> Self {
        Error::Trash(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn image_error_converts_to_decode_variant() {
        let image_error = image_rs::ImageError::IoError(std::io::Error::other("truncated"));
        let err: Error = image_error.into();
        assert!(matches!(err, Error::Decode(message) if message.contains("truncated")));
    }

    #[test]
    fn trash_error_wraps_into_error() {
        let err: Error = TrashError::DestinationExists(PathBuf::from("/trash/a.jpg")).into();
        assert_eq!(
            format!("{}", err),
            "Delete Error: Trash already contains /trash/a.jpg"
        );
    }

    #[test]
    fn only_unrolled_raw_failure_reports_moved_image() {
        let restored = TrashError::RawMoveFailed {
            raw: PathBuf::from("a.ARW"),
            reason: "denied".into(),
            rolled_back: true,
        };
        let stranded = TrashError::RawMoveFailed {
            raw: PathBuf::from("a.ARW"),
            reason: "denied".into(),
            rolled_back: false,
        };
        assert!(!restored.image_was_moved());
        assert!(stranded.image_was_moved());
        assert!(!TrashError::DestinationExists(PathBuf::from("x")).image_was_moved());
        assert!(format!("{}", restored).ends_with("(image restored)"));
    }
}
