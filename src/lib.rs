// SPDX-License-Identifier: MPL-2.0
//! `photo_viewer` is a keyboard-driven photo viewer built with the Iced GUI
//! framework.
//!
//! It browses the JPEG and PNG files of a directory one at a time, shows
//! their EXIF summary, and moves rejected shots (together with their raw
//! siblings) into a trash directory. The viewing engine in [`viewport`] is
//! independent of Iced's widgets and can be driven by any [`viewport::TextureStore`].

pub mod app;
pub mod config;
pub mod directory_scanner;
pub mod error;
pub mod logging;
pub mod media;
pub mod ui;
pub mod viewport;

#[cfg(test)]
mod test_utils;
