// SPDX-License-Identifier: MPL-2.0
//! Fitting the image into the window.
//!
//! The destination rectangle keeps the image's aspect ratio, is centred on
//! the world origin, and is never larger than the image's native size. At 90°
//! and 270° the rotated footprint is what has to fit, so width and height
//! trade places in the comparison.

use super::rotation::RotationAngle;
use iced::{Point, Rectangle, Size};

/// Unrotated rectangle to draw the image into, centred on the origin.
///
/// Returns a zero-sized rectangle when the window or the image is empty.
#[must_use]
pub fn destination_rect(window: Size, image: Size, rotation: RotationAngle) -> Rectangle {
    if !is_drawable(window) || !is_drawable(image) {
        return Rectangle::new(Point::ORIGIN, Size::ZERO);
    }

    let footprint = bounding_size(image, rotation);
    let scale = (window.width / footprint.width)
        .min(window.height / footprint.height)
        .min(1.0);

    let size = Size::new(image.width * scale, image.height * scale);
    Rectangle::new(Point::new(-size.width / 2.0, -size.height / 2.0), size)
}

/// Screen-aligned size of a rectangle drawn with the given rotation.
#[must_use]
pub fn bounding_size(size: Size, rotation: RotationAngle) -> Size {
    if rotation.swaps_dimensions() {
        Size::new(size.height, size.width)
    } else {
        size
    }
}

fn is_drawable(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}
