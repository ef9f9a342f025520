// SPDX-License-Identifier: MPL-2.0
//! The viewport engine: which image is shown and how.
//!
//! [`ImageViewport`] owns the image collection, the texture of the current
//! image, the camera, the rotation state, and the destination rectangle.
//! Every operation leaves them consistent with each other before returning,
//! so a [`DrawCommand`] never pairs a new texture with a stale rectangle.

use super::camera::Camera;
use super::fit;
use super::rotation::{RotationAngle, RotationState};
use crate::config::Paths;
use crate::directory_scanner::ImageCollection;
use crate::error::{Error, Result};
use crate::media::trash::{self, TrashReport};
use crate::media::{
    DecodedImage, ExifReader, ImageRecord, ImageRsDecoder, MetadataDecoder, PixelDecoder,
};
use iced::{Point, Rectangle, Size, Vector};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Graphics-side storage for decoded images.
///
/// The engine holds at most one texture and always releases it before
/// uploading the next one.
pub trait TextureStore {
    type Texture;

    fn upload(&mut self, image: DecodedImage) -> Self::Texture;

    fn release(&mut self, texture: Self::Texture);
}

/// Everything needed to draw the current image for one frame.
#[derive(Debug)]
pub struct DrawCommand<'a, T> {
    pub texture: &'a T,
    /// Full bounds of the decoded image.
    pub source: Rectangle,
    /// World-space rectangle, centred on the origin.
    pub destination: Rectangle,
    /// Point the rotation is applied around (the destination's centre).
    pub pivot: Point,
    pub rotation: RotationAngle,
    pub camera: Camera,
}

/// How loading the current image went, when the file could be read.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded,
    /// The pixels could not be decoded; the previous image stays on screen.
    DecodeFailed(String),
}

/// Result of replacing the collection.
#[derive(Debug, Clone)]
pub struct OpenReport {
    /// Directory the new collection is relative to. Callers retarget their
    /// [`Paths`] to it.
    pub reference_dir: Option<PathBuf>,
    pub count: usize,
    /// Loading the first image; `Ok(None)` when nothing was found.
    pub load: Result<Option<LoadOutcome>>,
}

/// Result of a successful delete.
#[derive(Debug, Clone)]
pub struct DeleteReport {
    pub removed: ImageRecord,
    pub trash: TrashReport,
    /// Loading the image that became current; `Ok(None)` when the
    /// collection is now empty.
    pub load: Result<Option<LoadOutcome>>,
}

pub struct ImageViewport<S: TextureStore> {
    store: S,
    pixel_decoder: Box<dyn PixelDecoder>,
    metadata_decoder: Box<dyn MetadataDecoder>,
    images: ImageCollection,
    texture: Option<S::Texture>,
    image_size: Size,
    rotation: RotationState,
    camera: Camera,
    window: Size,
    destination: Rectangle,
}

impl<S: TextureStore> ImageViewport<S> {
    /// Creates an empty viewport decoding with the `image` and `kamadak-exif`
    /// crates.
    pub fn new(store: S, window: Size) -> Self {
        Self::with_decoders(
            store,
            window,
            Box::new(ImageRsDecoder),
            Box::new(ExifReader),
        )
    }

    pub fn with_decoders(
        store: S,
        window: Size,
        pixel_decoder: Box<dyn PixelDecoder>,
        metadata_decoder: Box<dyn MetadataDecoder>,
    ) -> Self {
        Self {
            store,
            pixel_decoder,
            metadata_decoder,
            images: ImageCollection::new(),
            texture: None,
            image_size: Size::ZERO,
            rotation: RotationState::default(),
            camera: Camera::centered(window),
            window,
            destination: Rectangle::new(Point::ORIGIN, Size::ZERO),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn images(&self) -> &ImageCollection {
        &self.images
    }

    /// Record of the image currently shown, for the info panel.
    pub fn current(&self) -> Option<&ImageRecord> {
        self.images.current()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.images.current_index()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn destination(&self) -> Rectangle {
        self.destination
    }

    pub fn window_size(&self) -> Size {
        self.window
    }

    /// Native size of the displayed image.
    pub fn image_size(&self) -> Size {
        self.image_size
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Replaces the collection with the images at `path` (a directory or a
    /// single file) and loads the first one.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` does not exist or cannot be read; the
    /// current collection is left untouched in that case.
    pub fn open(&mut self, path: &Path) -> Result<OpenReport> {
        let collection = ImageCollection::from_path(path)?;
        Ok(self.replace_collection(collection))
    }

    /// Replaces the collection with the supported images among dropped paths.
    ///
    /// Returns `None` and keeps the current collection when none of the
    /// paths is a supported image.
    pub fn open_dropped(&mut self, paths: &[PathBuf]) -> Option<OpenReport> {
        let collection = ImageCollection::from_list(paths);
        if collection.is_empty() {
            tracing::info!("No images among {} dropped file(s)", paths.len());
            return None;
        }
        Some(self.replace_collection(collection))
    }

    fn replace_collection(&mut self, collection: ImageCollection) -> OpenReport {
        let started = Instant::now();
        self.release_texture();
        self.images = collection;
        self.camera.reset(self.window);

        let reference_dir = self.images.reference_dir().map(Path::to_path_buf);
        let count = self.images.len();
        if count == 0 {
            tracing::info!("No images found");
        }
        let load = self.reload();

        tracing::debug!(
            "Opened {} image(s) in {} ms",
            count,
            started.elapsed().as_millis()
        );
        OpenReport {
            reference_dir,
            count,
            load,
        }
    }

    /// Loads the current record, or clears the display if there is none.
    fn reload(&mut self) -> Result<Option<LoadOutcome>> {
        if self.images.current().is_some() {
            self.load_current().map(Some)
        } else {
            self.release_texture();
            Ok(None)
        }
    }

    /// Reads, decodes, and uploads the current image, then parses its EXIF
    /// data (once per record) and applies the orientation.
    ///
    /// A read failure clears the display so nothing stale is shown for the
    /// new record. A decode failure keeps the previous image on screen.
    fn load_current(&mut self) -> Result<LoadOutcome> {
        let started = Instant::now();
        let Some(path) = self.images.current().map(|r| r.file_path().to_path_buf()) else {
            return Ok(LoadOutcome::DecodeFailed("No current image".into()));
        };

        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) => {
                self.release_texture();
                tracing::error!("Cannot read {}: {}", path.display(), err);
                return Err(Error::Io(format!("Cannot read {}: {}", path.display(), err)));
            }
        };

        let decoded = match self.pixel_decoder.decode(&bytes) {
            Ok(decoded) => decoded,
            Err(err) => {
                tracing::warn!("Cannot decode {}: {}", path.display(), err);
                return Ok(LoadOutcome::DecodeFailed(err.to_string()));
            }
        };

        let orientation = match self.images.current_mut() {
            Some(record) => {
                if !record.is_parsed() {
                    let outcome = self.metadata_decoder.parse(&bytes);
                    outcome.log(record.file_name());
                    record.set_metadata(outcome);
                }
                record
                    .metadata()
                    .map(|outcome| outcome.orientation())
                    .unwrap_or_default()
            }
            None => Default::default(),
        };
        if orientation.is_mirrored() {
            tracing::info!(
                "{}: orientation {} is shown without mirroring",
                path.display(),
                orientation
            );
        }

        let size = Size::new(decoded.width as f32, decoded.height as f32);
        self.release_texture();
        self.texture = Some(self.store.upload(decoded));
        self.image_size = size;
        self.rotation = RotationState::from_original(orientation.into());
        self.recompute_destination();

        tracing::debug!(
            "Loaded {} in {} ms",
            path.display(),
            started.elapsed().as_millis()
        );
        Ok(LoadOutcome::Loaded)
    }

    fn release_texture(&mut self) {
        if let Some(texture) = self.texture.take() {
            self.store.release(texture);
        }
        self.image_size = Size::ZERO;
        self.rotation = RotationState::default();
        self.recompute_destination();
    }

    /// Releases the texture ahead of shutdown.
    pub fn shutdown(&mut self) {
        self.release_texture();
    }

    // =========================================================================
    // Window and drawing
    // =========================================================================

    /// Adopts a new window size. Pan and zoom are kept; the camera offset
    /// follows the window centre.
    pub fn resize(&mut self, window: Size) {
        self.window = window;
        self.camera.recenter(window);
        self.recompute_destination();
    }

    fn recompute_destination(&mut self) {
        self.destination =
            fit::destination_rect(self.window, self.image_size, self.rotation.current());
    }

    /// Describes the frame to draw, or `None` when there is nothing to show.
    pub fn draw(&self) -> Option<DrawCommand<'_, S::Texture>> {
        if self.images.is_empty() {
            return None;
        }
        let texture = self.texture.as_ref()?;
        Some(DrawCommand {
            texture,
            source: Rectangle::new(Point::ORIGIN, self.image_size),
            destination: self.destination,
            pivot: self.destination.center(),
            rotation: self.rotation.current(),
            camera: self.camera,
        })
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Shows the next image. `Ok(None)` means the index did not change.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the new current file cannot be read.
    pub fn next(&mut self) -> Result<Option<LoadOutcome>> {
        if self.images.select_next() {
            self.load_current().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Shows the previous image. `Ok(None)` means the index did not change.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the new current file cannot be read.
    pub fn prev(&mut self) -> Result<Option<LoadOutcome>> {
        if self.images.select_previous() {
            self.load_current().map(Some)
        } else {
            Ok(None)
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Io`] if the first file cannot be read.
    pub fn first(&mut self) -> Result<Option<LoadOutcome>> {
        if self.images.select_first() {
            self.load_current().map(Some)
        } else {
            Ok(None)
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Io`] if the last file cannot be read.
    pub fn last(&mut self) -> Result<Option<LoadOutcome>> {
        if self.images.select_last() {
            self.load_current().map(Some)
        } else {
            Ok(None)
        }
    }

    // =========================================================================
    // Camera and rotation
    // =========================================================================

    pub fn zoom_in(&mut self) {
        if !self.images.is_empty() {
            self.camera.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if !self.images.is_empty() {
            self.camera.zoom_out();
        }
    }

    pub fn reset_zoom(&mut self) {
        if !self.images.is_empty() {
            self.camera.reset_zoom();
        }
    }

    pub fn rotate_cw(&mut self) {
        if !self.images.is_empty() {
            self.rotation.rotate_clockwise();
            self.recompute_destination();
        }
    }

    pub fn rotate_ccw(&mut self) {
        if !self.images.is_empty() {
            self.rotation.rotate_counterclockwise();
            self.recompute_destination();
        }
    }

    /// Recentres the camera, resets the zoom, and restores the
    /// orientation-derived rotation.
    pub fn reset(&mut self) {
        if !self.images.is_empty() {
            self.camera.reset(self.window);
            self.rotation.reset();
            self.recompute_destination();
        }
    }

    /// Pans by a cursor movement in screen pixels.
    pub fn pan_by(&mut self, delta: Vector) {
        if !self.images.is_empty() {
            self.camera.pan_by(delta);
        }
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Moves the current image and its raw sibling to the trash, removes it
    /// from the collection, and shows the previous image.
    ///
    /// Returns `Ok(None)` on an empty collection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Trash`] when the files could not be moved. The
    /// collection is left untouched unless the image already reached the
    /// trash and could not be restored, in which case its record is removed
    /// as well.
    pub fn delete_current(&mut self, paths: &Paths) -> Result<Option<DeleteReport>> {
        let Some(record) = self.images.current() else {
            return Ok(None);
        };
        let raw = paths.raw_sibling(record.file_stem());

        match trash::move_to_trash(record.file_path(), &raw, &paths.trash_dir) {
            Ok(report) => {
                let Some(removed) = self.images.remove_current() else {
                    return Ok(None);
                };
                let load = self.reload();
                Ok(Some(DeleteReport {
                    removed,
                    trash: report,
                    load,
                }))
            }
            Err(err) => {
                tracing::error!("Delete failed: {err}");
                if err.image_was_moved() {
                    self.images.remove_current();
                    if let Err(load_err) = self.reload() {
                        tracing::error!("{load_err}");
                    }
                }
                Err(err.into())
            }
        }
    }
}

impl<S: TextureStore> Drop for ImageViewport<S> {
    fn drop(&mut self) {
        if let Some(texture) = self.texture.take() {
            self.store.release(texture);
        }
    }
}
