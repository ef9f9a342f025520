// SPDX-License-Identifier: MPL-2.0
//! Viewport state: camera, zoom, rotation, fitting, and the engine that ties
//! them to the image collection.

pub mod camera;
pub mod engine;
pub mod fit;
pub mod rotation;
pub mod zoom;

pub use camera::Camera;
pub use engine::{DeleteReport, DrawCommand, ImageViewport, LoadOutcome, OpenReport, TextureStore};
pub use rotation::{RotationAngle, RotationState};
pub use zoom::ZoomFactor;
