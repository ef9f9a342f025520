// SPDX-License-Identifier: MPL-2.0
//! Rotation of the displayed image.
//!
//! The angle is a property of the image quad, never of the camera, so panning
//! keeps its direction whatever the image rotation is.

use crate::media::Orientation;

/// Rotation angle in 90° increments.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always one of: 0°, 90°, 180°, or 270°.
///
/// # Example
///
/// ```
/// use photo_viewer::viewport::RotationAngle;
///
/// let angle = RotationAngle::default();
/// let full = angle
///     .rotate_clockwise()
///     .rotate_clockwise()
///     .rotate_clockwise()
///     .rotate_clockwise();
/// assert_eq!(full, angle);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RotationAngle(u16);

impl RotationAngle {
    /// No rotation (0°).
    pub const ZERO: Self = Self(0);

    /// Creates a new rotation angle, rounding down to a 90° increment and
    /// wrapping into 0–270°.
    #[must_use]
    pub fn new(degrees: u16) -> Self {
        Self(((degrees / 90) * 90) % 360)
    }

    #[must_use]
    pub fn degrees(self) -> u16 {
        self.0
    }

    #[must_use]
    pub fn radians(self) -> f32 {
        f32::from(self.0).to_radians()
    }

    /// Rotates 90° clockwise.
    #[must_use]
    pub fn rotate_clockwise(self) -> Self {
        Self((self.0 + 90) % 360)
    }

    /// Rotates 90° counter-clockwise.
    #[must_use]
    pub fn rotate_counterclockwise(self) -> Self {
        Self((self.0 + 270) % 360)
    }

    /// Returns true if width and height trade places on screen (90° and 270°).
    #[must_use]
    pub fn swaps_dimensions(self) -> bool {
        self.0 == 90 || self.0 == 270
    }
}

impl From<Orientation> for RotationAngle {
    fn from(orientation: Orientation) -> Self {
        Self::new(orientation.rotation_degrees())
    }
}

/// Rotation derived from EXIF at load time plus the user's adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RotationState {
    original: RotationAngle,
    current: RotationAngle,
}

impl RotationState {
    /// Starts both angles at the orientation-derived rotation.
    #[must_use]
    pub fn from_original(original: RotationAngle) -> Self {
        Self {
            original,
            current: original,
        }
    }

    #[must_use]
    pub fn original(self) -> RotationAngle {
        self.original
    }

    #[must_use]
    pub fn current(self) -> RotationAngle {
        self.current
    }

    pub fn rotate_clockwise(&mut self) {
        self.current = self.current.rotate_clockwise();
    }

    pub fn rotate_counterclockwise(&mut self) {
        self.current = self.current.rotate_counterclockwise();
    }

    /// Drops the user's adjustments.
    pub fn reset(&mut self) {
        self.current = self.original;
    }
}
