// SPDX-License-Identifier: MPL-2.0
//! Zoom factor of the camera.

pub use crate::config::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

/// Zoom factor, guaranteed to be within the valid range (0.5–100.0).
///
/// This type ensures that zoom values are always valid, eliminating
/// the need for manual clamping at usage sites.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomFactor(f32);

impl ZoomFactor {
    /// Creates a new zoom factor, clamping the value to the valid range.
    #[must_use]
    pub fn new(factor: f32) -> Self {
        if factor.is_nan() {
            return Self::default();
        }
        Self(factor.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    /// Returns the raw factor.
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Increases zoom by one step.
    #[must_use]
    pub fn zoom_in(self) -> Self {
        Self::new(self.0 + ZOOM_STEP)
    }

    /// Decreases zoom by one step.
    #[must_use]
    pub fn zoom_out(self) -> Self {
        Self::new(self.0 - ZOOM_STEP)
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self(DEFAULT_ZOOM)
    }
}
