// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.

// ==========================================================================
// Zoom Defaults
// ==========================================================================

/// Zoom factor of a freshly loaded image (1.0 = fitted size).
pub const DEFAULT_ZOOM: f32 = 1.0;

/// Minimum allowed zoom factor.
pub const MIN_ZOOM: f32 = 0.5;

/// Maximum allowed zoom factor.
pub const MAX_ZOOM: f32 = 100.0;

/// Zoom change applied per key press or wheel tick.
pub const ZOOM_STEP: f32 = 0.2;

// ==========================================================================
// Rotation Defaults
// ==========================================================================

/// Rotation applied per rotate key press, in degrees.
pub const ROTATION_STEP_DEGREES: u16 = 90;

// ==========================================================================
// Window Defaults
// ==========================================================================

pub const DEFAULT_WINDOW_WIDTH: u32 = 1280;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 960;

// ==========================================================================
// Path Defaults
// ==========================================================================

/// Sony's raw file extension.
pub const DEFAULT_RAW_EXTENSION: &str = ".ARW";

/// Name of the trash directory created next to the images.
pub const TRASH_DIR_NAME: &str = "trash";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_ZOOM > 0.0);
    assert!(MIN_ZOOM < DEFAULT_ZOOM);
    assert!(MAX_ZOOM > DEFAULT_ZOOM);
    assert!(ZOOM_STEP > 0.0);
    assert!(ROTATION_STEP_DEGREES == 90);
    assert!(DEFAULT_WINDOW_WIDTH > 0);
    assert!(DEFAULT_WINDOW_HEIGHT > 0);
};
