// SPDX-License-Identifier: MPL-2.0
//! 2D camera mapping world coordinates to the window.
//!
//! The image is drawn centred on the world origin. `target` is the world
//! point shown at `offset`, the window centre, scaled by `zoom`:
//!
//! ```text
//! screen = (world - target) * zoom + offset
//! ```

use super::zoom::ZoomFactor;
use iced::{Size, Vector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    offset: Vector,
    target: Vector,
    zoom: ZoomFactor,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vector::ZERO,
            target: Vector::ZERO,
            zoom: ZoomFactor::default(),
        }
    }
}

impl Camera {
    /// Camera looking at the world origin from the centre of `window`.
    #[must_use]
    pub fn centered(window: Size) -> Self {
        Self {
            offset: window_center(window),
            ..Self::default()
        }
    }

    /// Screen position the target is drawn at.
    #[must_use]
    pub fn offset(&self) -> Vector {
        self.offset
    }

    /// World position shown at the offset.
    #[must_use]
    pub fn target(&self) -> Vector {
        self.target
    }

    #[must_use]
    pub fn zoom(&self) -> ZoomFactor {
        self.zoom
    }

    /// Moves the offset to the centre of a resized window; pan and zoom stay.
    pub fn recenter(&mut self, window: Size) {
        self.offset = window_center(window);
    }

    /// Centres the view on the origin at the default zoom.
    pub fn reset(&mut self, window: Size) {
        *self = Self::centered(window);
    }

    /// Drags the view by a screen-space delta. The world moves with the
    /// cursor at any zoom level.
    pub fn pan_by(&mut self, delta: Vector) {
        self.target = self.target - delta * (1.0 / self.zoom.value());
    }

    pub fn zoom_in(&mut self) {
        self.zoom = self.zoom.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.zoom_out();
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = ZoomFactor::default();
    }
}

fn window_center(window: Size) -> Vector {
    Vector::new(window.width * 0.5, window.height * 0.5)
}
