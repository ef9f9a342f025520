// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! - [`canvas`] - Renders the viewport's draw command and holds the texture store
//! - [`image_info`] - Panel with the current file's name and EXIF data
//! - [`paths_form`] - Form editing the image, raw, and trash paths
//! - [`design_tokens`] - Colors, spacing, and sizes

pub mod canvas;
pub mod design_tokens;
pub mod image_info;
pub mod paths_form;
