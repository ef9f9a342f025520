// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration: the directories the
//! viewer works with, the window size, and the optional `settings.toml` file
//! that provides defaults for them.
//!
//! # Ownership
//!
//! The top-level application is the only owner of a [`Config`]. The viewport
//! engine receives a borrowed [`Paths`] snapshot for each operation that needs
//! one and reports directory changes back explicitly, so nothing else keeps a
//! stale copy of the paths around.
//!
//! # Resolution Order
//!
//! 1. Command line options (`-i`, `-r`, `-t`, `-e`)
//! 2. `settings.toml` in the config directory
//! 3. Built-in defaults (see [`defaults`])
//!
//! The settings file is read-only from the application's point of view.
//!
//! # Examples
//!
//! ```no_run
//! use photo_viewer::config::{self, Config, Overrides};
//!
//! let (settings, _warning) = config::load();
//! let config = Config::resolve(&settings, &Overrides::default());
//! assert!(config.paths.raw_extension.starts_with('.'));
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "PhotoViewer";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "PHOTO_VIEWER_CONFIG_DIR";

// =============================================================================
// Paths
// =============================================================================

/// Directories and extension used to locate, pair, and trash images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Image file or directory of jpg/png images.
    pub image_path: PathBuf,
    /// Directory holding the raw siblings of the images.
    pub raw_image_dir: PathBuf,
    /// Where deleted images and their raw siblings are moved to.
    pub trash_dir: PathBuf,
    /// Extension of the raw files, including the leading dot (e.g. `.ARW`).
    pub raw_extension: String,
    /// Set when the raw directory was chosen by the user rather than derived
    /// from the image path. A pinned directory survives [`Paths::retarget`].
    raw_dir_pinned: bool,
    trash_dir_pinned: bool,
}

impl Paths {
    /// Derives all directories from the image path: raw files are expected
    /// next to the images and the trash lives in a `trash` subdirectory.
    pub fn for_image_path(path: impl Into<PathBuf>, raw_extension: impl Into<String>) -> Self {
        let image_path = path.into();
        let dir = directory_of(&image_path);
        Self {
            raw_image_dir: dir.clone(),
            trash_dir: dir.join(TRASH_DIR_NAME),
            image_path,
            raw_extension: raw_extension.into(),
            raw_dir_pinned: false,
            trash_dir_pinned: false,
        }
    }

    /// Uses `dir` for raw siblings from now on, whatever images are opened.
    pub fn pin_raw_image_dir(&mut self, dir: impl Into<PathBuf>) {
        self.raw_image_dir = dir.into();
        self.raw_dir_pinned = true;
    }

    /// Uses `dir` as the trash from now on, whatever images are opened.
    pub fn pin_trash_dir(&mut self, dir: impl Into<PathBuf>) {
        self.trash_dir = dir.into();
        self.trash_dir_pinned = true;
    }

    /// Applies a "reference directory changed" notification from the viewport
    /// (directory load or file drop).
    ///
    /// Derived directories follow `dir`; pinned ones and the raw extension
    /// are kept.
    pub fn retarget(&mut self, dir: &Path) {
        self.image_path = dir.to_path_buf();
        if !self.raw_dir_pinned {
            self.raw_image_dir = dir.to_path_buf();
        }
        if !self.trash_dir_pinned {
            self.trash_dir = dir.join(TRASH_DIR_NAME);
        }
    }

    /// Expected location of the raw sibling for an image with the given stem.
    pub fn raw_sibling(&self, file_stem: &str) -> PathBuf {
        self.raw_image_dir
            .join(format!("{file_stem}{}", self.raw_extension))
    }

    /// Builds paths from the text fields of the paths form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the image path does not exist, when a
    /// directory field is blank, or when the raw extension is empty.
    pub fn from_user_input(
        image_path: &str,
        raw_image_dir: &str,
        trash_dir: &str,
        raw_extension: &str,
    ) -> Result<Self> {
        let image_path = image_path.trim();
        if image_path.is_empty() {
            return Err(Error::Config("Image path is empty".into()));
        }
        let image_path = PathBuf::from(image_path);
        if !image_path.exists() {
            return Err(Error::Config(format!(
                "Image path does not exist: {}",
                image_path.display()
            )));
        }

        let raw_image_dir = raw_image_dir.trim();
        if raw_image_dir.is_empty() {
            return Err(Error::Config("Raw image directory is empty".into()));
        }
        let trash_dir = trash_dir.trim();
        if trash_dir.is_empty() {
            return Err(Error::Config("Trash directory is empty".into()));
        }
        let raw_extension = normalize_extension(raw_extension)
            .ok_or_else(|| Error::Config("Raw file extension is empty".into()))?;

        // Directories still matching what the image path implies stay derived.
        let mut paths = Self::for_image_path(image_path, raw_extension);
        let raw_image_dir = PathBuf::from(raw_image_dir);
        if raw_image_dir != paths.raw_image_dir {
            paths.pin_raw_image_dir(raw_image_dir);
        }
        let trash_dir = PathBuf::from(trash_dir);
        if trash_dir != paths.trash_dir {
            paths.pin_trash_dir(trash_dir);
        }
        Ok(paths)
    }
}

fn directory_of(path: &Path) -> PathBuf {
    if path.is_file() {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    } else {
        path.to_path_buf()
    }
}

/// Trims the extension and adds the leading dot when it is missing.
/// Returns `None` for blank input.
pub fn normalize_extension(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "." {
        return None;
    }
    if trimmed.starts_with('.') {
        Some(trimmed.to_string())
    } else {
        Some(format!(".{trimmed}"))
    }
}

// =============================================================================
// Settings file
// =============================================================================

/// `[paths]` section of `settings.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PathSettings {
    #[serde(default)]
    pub raw_extension: Option<String>,
    #[serde(default)]
    pub raw_image_dir: Option<PathBuf>,
    #[serde(default)]
    pub trash_dir: Option<PathBuf>,
}

/// `[window]` section of `settings.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct WindowSettings {
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// Contents of `settings.toml`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Settings {
    #[serde(default)]
    pub paths: PathSettings,
    #[serde(default)]
    pub window: WindowSettings,
}

fn get_default_config_path() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        if !dir.is_empty() {
            return Some(PathBuf::from(dir).join(CONFIG_FILE));
        }
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Loads settings from the default location.
///
/// A missing file yields defaults silently. An unreadable or invalid file
/// yields defaults together with a warning message for the user.
pub fn load() -> (Settings, Option<String>) {
    let Some(path) = get_default_config_path() else {
        return (Settings::default(), None);
    };
    if !path.exists() {
        return (Settings::default(), None);
    }
    match load_from_path(&path) {
        Ok(settings) => (settings, None),
        Err(err) => {
            tracing::warn!("Ignoring {}: {}", path.display(), err);
            (
                Settings::default(),
                Some(format!("Ignoring {}: {}", path.display(), err)),
            )
        }
    }
}

/// Loads settings from an explicit path.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`] if
/// it is not valid TOML for [`Settings`].
pub fn load_from_path(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

// =============================================================================
// Config
// =============================================================================

/// Values given on the command line. They win over the settings file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub image_path: Option<PathBuf>,
    pub raw_image_dir: Option<PathBuf>,
    pub trash_dir: Option<PathBuf>,
    pub raw_extension: Option<String>,
}

/// Application configuration, owned by the top-level application.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub paths: Paths,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: Paths::for_image_path(".", DEFAULT_RAW_EXTENSION),
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl Config {
    /// Combines built-in defaults, the settings file, and command line values.
    pub fn resolve(settings: &Settings, overrides: &Overrides) -> Self {
        let raw_extension = overrides
            .raw_extension
            .as_deref()
            .and_then(normalize_extension)
            .or_else(|| {
                settings
                    .paths
                    .raw_extension
                    .as_deref()
                    .and_then(normalize_extension)
            })
            .unwrap_or_else(|| DEFAULT_RAW_EXTENSION.to_string());

        let image_path = overrides
            .image_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let mut paths = Paths::for_image_path(image_path, raw_extension);

        if let Some(dir) = overrides
            .raw_image_dir
            .clone()
            .or_else(|| settings.paths.raw_image_dir.clone())
        {
            paths.pin_raw_image_dir(dir);
        }
        if let Some(dir) = overrides
            .trash_dir
            .clone()
            .or_else(|| settings.paths.trash_dir.clone())
        {
            paths.pin_trash_dir(dir);
        }

        Self {
            paths,
            window_width: settings
                .window
                .width
                .filter(|w| *w > 0)
                .unwrap_or(DEFAULT_WINDOW_WIDTH),
            window_height: settings
                .window
                .height
                .filter(|h| *h > 0)
                .unwrap_or(DEFAULT_WINDOW_HEIGHT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn paths_for_directory_put_trash_inside_it() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let paths = Paths::for_image_path(temp_dir.path(), ".ARW");

        assert_eq!(paths.image_path, temp_dir.path());
        assert_eq!(paths.raw_image_dir, temp_dir.path());
        assert_eq!(paths.trash_dir, temp_dir.path().join("trash"));
    }

    #[test]
    fn paths_for_file_use_parent_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let image = temp_dir.path().join("a.jpg");
        fs::write(&image, b"jpg").expect("write image");

        let paths = Paths::for_image_path(&image, ".CR2");

        assert_eq!(paths.image_path, image);
        assert_eq!(paths.raw_image_dir, temp_dir.path());
        assert_eq!(paths.raw_sibling("a"), temp_dir.path().join("a.CR2"));
    }

    #[test]
    fn retarget_keeps_raw_extension() {
        let mut paths = Paths::for_image_path("/old", ".NEF");
        paths.retarget(Path::new("/new"));

        assert_eq!(paths.image_path, PathBuf::from("/new"));
        assert_eq!(paths.trash_dir, PathBuf::from("/new/trash"));
        assert_eq!(paths.raw_extension, ".NEF");
    }

    #[test]
    fn retarget_keeps_pinned_directories() {
        let mut paths = Paths::for_image_path("/old", ".ARW");
        paths.pin_raw_image_dir("/raws");
        paths.pin_trash_dir("/bin");

        paths.retarget(Path::new("/new"));

        assert_eq!(paths.image_path, PathBuf::from("/new"));
        assert_eq!(paths.raw_image_dir, PathBuf::from("/raws"));
        assert_eq!(paths.trash_dir, PathBuf::from("/bin"));
    }

    #[test]
    fn user_input_pins_only_directories_that_differ_from_derived() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let image = temp_dir.path().to_string_lossy().to_string();
        let derived_trash = temp_dir.path().join("trash").to_string_lossy().to_string();

        let mut paths =
            Paths::from_user_input(&image, "/raws", &derived_trash, ".ARW").expect("valid input");
        paths.retarget(Path::new("/elsewhere"));

        assert_eq!(paths.raw_image_dir, PathBuf::from("/raws"));
        assert_eq!(paths.trash_dir, PathBuf::from("/elsewhere/trash"));
    }

    #[test]
    fn normalize_extension_adds_missing_dot() {
        assert_eq!(normalize_extension("ARW").as_deref(), Some(".ARW"));
        assert_eq!(normalize_extension(" .dng ").as_deref(), Some(".dng"));
        assert_eq!(normalize_extension("   "), None);
        assert_eq!(normalize_extension("."), None);
    }

    #[test]
    fn user_input_rejects_missing_image_path() {
        let result = Paths::from_user_input("/definitely/not/here", "/raw", "/trash", ".ARW");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn user_input_rejects_blank_fields() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let image = temp_dir.path().to_string_lossy().to_string();

        assert!(Paths::from_user_input(&image, "", "/trash", ".ARW").is_err());
        assert!(Paths::from_user_input(&image, "/raw", " ", ".ARW").is_err());
        assert!(Paths::from_user_input(&image, "/raw", "/trash", "").is_err());
    }

    #[test]
    fn user_input_accepts_valid_fields() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let image = temp_dir.path().to_string_lossy().to_string();

        let paths = Paths::from_user_input(&image, "/raw", "/trash", "arw").expect("valid input");
        assert_eq!(paths.raw_extension, ".arw");
        assert_eq!(paths.trash_dir, PathBuf::from("/trash"));
    }

    #[test]
    fn load_from_path_reads_sections() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(
            &config_path,
            "[paths]\nraw_extension = \"CR3\"\n\n[window]\nwidth = 640\nheight = 480\n",
        )
        .expect("write settings");

        let settings = load_from_path(&config_path).expect("settings should parse");
        assert_eq!(settings.paths.raw_extension.as_deref(), Some("CR3"));
        assert_eq!(settings.window.width, Some(640));
        assert_eq!(settings.window.height, Some(480));
    }

    #[test]
    fn load_from_path_reports_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("write invalid toml");

        assert!(matches!(
            load_from_path(&config_path),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn resolve_prefers_overrides_over_settings() {
        let settings = Settings {
            paths: PathSettings {
                raw_extension: Some(".CR2".into()),
                raw_image_dir: Some(PathBuf::from("/settings/raw")),
                trash_dir: None,
            },
            window: WindowSettings {
                width: Some(800),
                height: Some(0),
            },
        };
        let overrides = Overrides {
            image_path: Some(PathBuf::from("/photos")),
            raw_extension: Some("NEF".into()),
            trash_dir: Some(PathBuf::from("/bin")),
            ..Overrides::default()
        };

        let config = Config::resolve(&settings, &overrides);

        assert_eq!(config.paths.image_path, PathBuf::from("/photos"));
        assert_eq!(config.paths.raw_extension, ".NEF");
        assert_eq!(config.paths.raw_image_dir, PathBuf::from("/settings/raw"));
        assert_eq!(config.paths.trash_dir, PathBuf::from("/bin"));
        assert_eq!(config.window_width, 800);
        assert_eq!(config.window_height, DEFAULT_WINDOW_HEIGHT);
    }

    #[test]
    fn default_config_uses_sony_raw_extension() {
        let config = Config::default();
        assert_eq!(config.paths.raw_extension, DEFAULT_RAW_EXTENSION);
        assert_eq!(config.window_width, DEFAULT_WINDOW_WIDTH);
    }
}
