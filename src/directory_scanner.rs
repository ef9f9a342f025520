// SPDX-License-Identifier: MPL-2.0
//! Directory scanner module for finding image files.
//!
//! This module turns a directory, a single file, or a list of dropped files
//! into an [`ImageCollection`]. Entries keep the order the filesystem reports
//! them in.

use crate::error::{Error, Result};
use crate::media::{self, ImageRecord};
use std::path::{Path, PathBuf};

/// Ordered image records with an optional current position.
///
/// `current_index` is `Some` exactly when the collection is non-empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ImageCollection {
    records: Vec<ImageRecord>,
    current_index: Option<usize>,
    reference_dir: Option<PathBuf>,
}

impl ImageCollection {
    /// Creates a new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans a directory or wraps a single file, depending on what `path` is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the path does not exist and
    /// [`Error::Io`] if a directory cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        if path.is_dir() {
            Self::from_directory(path)
        } else if path.is_file() {
            Ok(Self::from_file(path))
        } else {
            Err(Error::Config(format!(
                "Image path does not exist: {}",
                path.display()
            )))
        }
    }

    /// Collects the supported images directly inside `directory`.
    ///
    /// Subdirectories are not descended into. Entries that cannot be read or
    /// that vanish while scanning are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the directory itself cannot be read.
    pub fn from_directory(directory: &Path) -> Result<Self> {
        let mut records = Vec::new();

        for entry in std::fs::read_dir(directory)? {
            let Ok(entry) = entry else {
                continue;
            };
            let path = entry.path();

            if is_admissible(&path) {
                records.push(ImageRecord::new(path));
            }
        }

        tracing::info!(
            "Found {} image(s) in {}",
            records.len(),
            directory.display()
        );
        Ok(Self::with_records(records, Some(directory.to_path_buf())))
    }

    /// Wraps a single file; the collection is empty if it is not a supported
    /// image.
    pub fn from_file(path: &Path) -> Self {
        let reference_dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .or_else(|| Some(PathBuf::from(".")));

        let records = if is_admissible(path) {
            vec![ImageRecord::new(path)]
        } else {
            tracing::info!("{} is not a supported image", path.display());
            Vec::new()
        };

        Self::with_records(records, reference_dir)
    }

    /// Admits the supported images from an explicit list, e.g. dropped files.
    ///
    /// When at least one path is admitted, the reference directory becomes
    /// the parent of the first admitted path.
    pub fn from_list(paths: &[PathBuf]) -> Self {
        let records: Vec<ImageRecord> = paths
            .iter()
            .filter(|path| is_admissible(path))
            .map(ImageRecord::new)
            .collect();

        let reference_dir = records.first().map(|record| {
            record
                .file_path()
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        });

        tracing::info!(
            "Admitted {} of {} dropped path(s)",
            records.len(),
            paths.len()
        );
        Self::with_records(records, reference_dir)
    }

    fn with_records(records: Vec<ImageRecord>, reference_dir: Option<PathBuf>) -> Self {
        let current_index = if records.is_empty() { None } else { Some(0) };
        Self {
            records,
            current_index,
            reference_dir,
        }
    }

    /// Directory later operations are relative to (scanned directory, parent
    /// of a single file, or parent of the first admitted drop).
    pub fn reference_dir(&self) -> Option<&Path> {
        self.reference_dir.as_deref()
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    /// Returns the total number of images in the collection.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Checks if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the current index if set.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    /// Returns the current record.
    pub fn current(&self) -> Option<&ImageRecord> {
        self.current_index.and_then(|idx| self.records.get(idx))
    }

    pub(crate) fn current_mut(&mut self) -> Option<&mut ImageRecord> {
        self.current_index.and_then(|idx| self.records.get_mut(idx))
    }

    /// Returns the record at the specified index.
    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.records.get(index)
    }

    /// Checks if we're at the last image.
    pub fn is_at_last(&self) -> bool {
        matches!(self.current_index, Some(idx) if idx + 1 == self.records.len())
    }

    /// Moves to `index`. Returns true if the current index changed.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.records.len() || self.current_index == Some(index) {
            return false;
        }
        self.current_index = Some(index);
        true
    }

    /// Moves one step forward without wrapping. Returns true if it moved.
    pub fn select_next(&mut self) -> bool {
        match self.current_index {
            Some(idx) => self.select(idx + 1),
            None => false,
        }
    }

    /// Moves one step back without wrapping. Returns true if it moved.
    pub fn select_previous(&mut self) -> bool {
        match self.current_index {
            Some(idx) if idx > 0 => self.select(idx - 1),
            _ => false,
        }
    }

    pub fn select_first(&mut self) -> bool {
        self.select(0)
    }

    pub fn select_last(&mut self) -> bool {
        match self.records.len() {
            0 => false,
            len => self.select(len - 1),
        }
    }

    /// Removes the current record and steps back to the previous one
    /// (staying at 0 when the first record was removed).
    pub fn remove_current(&mut self) -> Option<ImageRecord> {
        let idx = self.current_index?;
        let removed = self.records.remove(idx);
        self.current_index = if self.records.is_empty() {
            None
        } else {
            Some(idx.saturating_sub(1))
        };
        Some(removed)
    }
}

/// Regular file with a supported image extension.
fn is_admissible(path: &Path) -> bool {
    media::has_supported_extension(path) && path.is_file()
}
