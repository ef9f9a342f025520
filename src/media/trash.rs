// SPDX-License-Identifier: MPL-2.0
//! Moving an image and its raw sibling into the trash directory.
//!
//! The move is all-or-nothing as far as possible: both destinations are
//! checked before anything is touched, and a failed raw move puts the image
//! back where it was. Files already in the trash are never overwritten.

use crate::error::TrashError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where the files of a successful delete ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrashReport {
    pub image: PathBuf,
    /// `None` when the image had no raw sibling.
    pub raw: Option<PathBuf>,
}

/// Moves `image` into `trash_dir`, followed by `raw_sibling` if it exists.
///
/// The trash directory is created when missing. File names are preserved.
///
/// # Errors
///
/// Returns a [`TrashError`] describing the first failing step. Only
/// [`TrashError::RawMoveFailed`] with `rolled_back == false` leaves the
/// image in the trash; every other error leaves the filesystem unchanged.
pub fn move_to_trash(
    image: &Path,
    raw_sibling: &Path,
    trash_dir: &Path,
) -> Result<TrashReport, TrashError> {
    fs::create_dir_all(trash_dir).map_err(|e| TrashError::CreateDir {
        path: trash_dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let image_dest = destination(image, trash_dir)?;
    // With a raw extension equal to the image's own, the sibling is the image.
    let raw_dest = if raw_sibling != image && raw_sibling.is_file() {
        Some(destination(raw_sibling, trash_dir)?)
    } else {
        None
    };

    for dest in std::iter::once(&image_dest).chain(raw_dest.as_ref()) {
        if dest.exists() {
            return Err(TrashError::DestinationExists(dest.clone()));
        }
    }

    move_file(image, &image_dest).map_err(|e| TrashError::MoveFailed {
        from: image.to_path_buf(),
        to: image_dest.clone(),
        reason: e.to_string(),
    })?;
    tracing::info!("Moved {} to {}", image.display(), image_dest.display());

    if let Some(raw_dest) = &raw_dest {
        if let Err(err) = move_file(raw_sibling, raw_dest) {
            let rolled_back = match move_file(&image_dest, image) {
                Ok(()) => true,
                Err(rollback_err) => {
                    tracing::error!(
                        "Cannot restore {} from trash: {}",
                        image.display(),
                        rollback_err
                    );
                    false
                }
            };
            return Err(TrashError::RawMoveFailed {
                raw: raw_sibling.to_path_buf(),
                reason: err.to_string(),
                rolled_back,
            });
        }
        tracing::info!("Moved {} to {}", raw_sibling.display(), raw_dest.display());
    } else {
        tracing::debug!("No raw file at {}", raw_sibling.display());
    }

    Ok(TrashReport {
        image: image_dest,
        raw: raw_dest,
    })
}

fn destination(file: &Path, trash_dir: &Path) -> Result<PathBuf, TrashError> {
    match file.file_name() {
        Some(name) => Ok(trash_dir.join(name)),
        None => Err(TrashError::MoveFailed {
            from: file.to_path_buf(),
            to: trash_dir.to_path_buf(),
            reason: "path has no file name".into(),
        }),
    }
}

/// Renames `from` to `to`, copying across filesystems when a rename cannot.
fn move_file(from: &Path, to: &Path) -> io::Result<()> {
    match fs::rename(from, to) {
        Err(err) if err.kind() == io::ErrorKind::CrossesDevices => {
            fs::copy(from, to)?;
            if let Err(remove_err) = fs::remove_file(from) {
                let _ = fs::remove_file(to);
                return Err(remove_err);
            }
            Ok(())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path, content: &[u8]) {
        fs::write(path, content).expect("failed to write fixture");
    }

    #[test]
    fn moves_image_without_raw_sibling() {
        let dir = tempdir().expect("failed to create temp dir");
        let image = dir.path().join("a.jpg");
        touch(&image, b"jpg");
        let trash = dir.path().join("trash");

        let report = move_to_trash(&image, &dir.path().join("a.ARW"), &trash)
            .expect("move should succeed");

        assert!(!image.exists());
        assert_eq!(report.image, trash.join("a.jpg"));
        assert_eq!(report.raw, None);
        assert_eq!(fs::read(trash.join("a.jpg")).expect("read moved"), b"jpg");
    }

    #[test]
    fn moves_raw_sibling_along() {
        let dir = tempdir().expect("failed to create temp dir");
        let image = dir.path().join("a.jpg");
        let raw = dir.path().join("a.ARW");
        touch(&image, b"jpg");
        touch(&raw, b"raw");
        let trash = dir.path().join("trash");

        let report = move_to_trash(&image, &raw, &trash).expect("move should succeed");

        assert!(!image.exists());
        assert!(!raw.exists());
        assert_eq!(report.raw, Some(trash.join("a.ARW")));
        assert!(trash.join("a.ARW").is_file());
    }

    #[test]
    fn raw_sibling_equal_to_image_moves_only_the_image() {
        let dir = tempdir().expect("failed to create temp dir");
        let image = dir.path().join("a.jpg");
        touch(&image, b"jpg");
        let trash = dir.path().join("trash");

        let report = move_to_trash(&image, &dir.path().join("a.jpg"), &trash)
            .expect("move should succeed");

        assert!(!image.exists());
        assert_eq!(report.image, trash.join("a.jpg"));
        assert_eq!(report.raw, None);
    }

    #[test]
    fn existing_destination_leaves_everything_in_place() {
        let dir = tempdir().expect("failed to create temp dir");
        let image = dir.path().join("a.jpg");
        let raw = dir.path().join("a.ARW");
        let trash = dir.path().join("trash");
        fs::create_dir(&trash).expect("create trash");
        touch(&image, b"new");
        touch(&raw, b"raw");
        touch(&trash.join("a.ARW"), b"old raw");

        let err = move_to_trash(&image, &raw, &trash).expect_err("move should fail");

        assert!(matches!(err, TrashError::DestinationExists(ref p) if p == &trash.join("a.ARW")));
        assert!(!err.image_was_moved());
        assert!(image.exists());
        assert!(raw.exists());
        assert_eq!(fs::read(trash.join("a.ARW")).expect("read old"), b"old raw");
    }

    #[test]
    fn trash_dir_that_is_a_file_cannot_be_created() {
        let dir = tempdir().expect("failed to create temp dir");
        let image = dir.path().join("a.jpg");
        touch(&image, b"jpg");
        let trash = dir.path().join("trash");
        touch(&trash, b"not a directory");

        let err = move_to_trash(&image, &dir.path().join("a.ARW"), &trash)
            .expect_err("move should fail");

        assert!(matches!(err, TrashError::CreateDir { .. }));
        assert!(image.exists());
    }

    #[test]
    fn missing_image_reports_move_failure() {
        let dir = tempdir().expect("failed to create temp dir");
        let trash = dir.path().join("trash");

        let err = move_to_trash(
            &dir.path().join("gone.jpg"),
            &dir.path().join("gone.ARW"),
            &trash,
        )
        .expect_err("move should fail");

        assert!(matches!(err, TrashError::MoveFailed { .. }));
    }

    #[test]
    fn move_file_renames_within_a_filesystem() {
        let dir = tempdir().expect("failed to create temp dir");
        let from = dir.path().join("from.png");
        let to = dir.path().join("to.png");
        touch(&from, b"png");

        move_file(&from, &to).expect("rename should succeed");

        assert!(!from.exists());
        assert_eq!(fs::read(&to).expect("read target"), b"png");
    }
}
