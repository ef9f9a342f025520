// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration.
//!
//! The `App` struct owns the [`Config`] and the viewport engine and turns
//! messages into engine operations. Path changes reported by the engine
//! (after opening a directory or a drop) are applied to the config here, the
//! only place that owns it.

pub mod keybindings;
mod message;
mod subscription;
mod view;

pub use keybindings::Action;
pub use message::{Flags, Message};

use crate::config::{self, Config};
use crate::error::Result;
use crate::ui::canvas::IcedTextures;
use crate::ui::paths_form;
use crate::viewport::{ImageViewport, LoadOutcome, OpenReport};
use iced::{window, Element, Point, Size, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Drops arriving within this window are opened together.
const DROP_BATCH_DELAY: Duration = Duration::from_millis(50);

const APP_TITLE: &str = "Photo Viewer";

/// Root Iced application state.
pub struct App {
    config: Config,
    viewport: ImageViewport<IcedTextures>,
    paths_form: paths_form::State,
    show_info: bool,
    show_paths: bool,
    show_ui: bool,
    fullscreen: bool,
    window_id: Option<window::Id>,
    /// Recoverable error shown in the banner until dismissed.
    error: Option<String>,
    pending_drops: Vec<PathBuf>,
    cursor: Option<Point>,
    /// Last cursor position while the left button is held.
    drag_anchor: Option<Point>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("image_count", &self.viewport.images().len())
            .field("current_index", &self.viewport.current_index())
            .finish()
    }
}

/// Builds the window settings from the configured size.
pub fn window_settings(config: &Config) -> window::Settings {
    window::Settings {
        size: Size::new(config.window_width as f32, config.window_height as f32),
        resizable: true,
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    let (settings, warning) = config::load();
    let config = Config::resolve(&settings, &flags.overrides);
    let window = window_settings(&config);

    let boot = move || App::new(config.clone(), warning.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window)
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Opens the configured image path and reports any problem in the banner.
    fn new(config: Config, warning: Option<String>) -> (Self, Task<Message>) {
        let window = Size::new(config.window_width as f32, config.window_height as f32);
        let mut app = App {
            paths_form: paths_form::State::from_paths(&config.paths),
            viewport: ImageViewport::new(IcedTextures, window),
            config,
            show_info: false,
            show_paths: false,
            show_ui: true,
            fullscreen: false,
            window_id: None,
            error: warning,
            pending_drops: Vec::new(),
            cursor: None,
            drag_anchor: None,
        };

        let image_path = app.config.paths.image_path.clone();
        let opened = app.viewport.open(&image_path);
        app.apply_open(opened);

        (app, Task::none())
    }

    fn title(&self) -> String {
        match self.viewport.current() {
            Some(record) => format!("{} - {}", record.file_name(), APP_TITLE),
            None => APP_TITLE.to_string(),
        }
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        subscription::create_event_subscription()
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(view::ViewContext {
            viewport: &self.viewport,
            paths_form: &self.paths_form,
            show_info: self.show_info,
            show_paths: self.show_paths,
            show_ui: self.show_ui,
            error: self.error.as_deref(),
        })
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Input { window, action } => {
                self.window_id = Some(window);
                self.handle_action(action)
            }
            Message::WindowOpened { window, size } | Message::WindowResized { window, size } => {
                self.window_id = Some(window);
                self.viewport.resize(size);
                Task::none()
            }
            Message::CursorMoved(position) => {
                if let Some(anchor) = self.drag_anchor {
                    self.viewport.pan_by(position - anchor);
                    self.drag_anchor = Some(position);
                }
                self.cursor = Some(position);
                Task::none()
            }
            Message::DragStarted => {
                self.drag_anchor = self.cursor;
                Task::none()
            }
            Message::DragEnded => {
                self.drag_anchor = None;
                Task::none()
            }
            Message::FileDropped(path) => {
                self.pending_drops.push(path);
                if self.pending_drops.len() == 1 {
                    Task::perform(
                        async { tokio::time::sleep(DROP_BATCH_DELAY).await },
                        |()| Message::FlushDroppedFiles,
                    )
                } else {
                    Task::none()
                }
            }
            Message::FlushDroppedFiles => {
                let paths = std::mem::take(&mut self.pending_drops);
                match self.viewport.open_dropped(&paths) {
                    Some(report) => self.apply_open(Ok(report)),
                    None => self.error = Some("No supported images were dropped".into()),
                }
                Task::none()
            }
            Message::DismissError => {
                self.error = None;
                Task::none()
            }
            Message::PathsForm(form_message) => {
                match self.paths_form.update(form_message) {
                    paths_form::Event::None => {}
                    paths_form::Event::Apply(paths) => {
                        tracing::info!("Paths updated: {:?}", paths);
                        self.config.paths = paths;
                    }
                    paths_form::Event::Load(paths) => {
                        self.config.paths = paths;
                        let image_path = self.config.paths.image_path.clone();
                        let opened = self.viewport.open(&image_path);
                        self.apply_open(opened);
                    }
                }
                Task::none()
            }
        }
    }

    fn handle_action(&mut self, action: Action) -> Task<Message> {
        let loaded = match action {
            Action::ZoomIn => {
                self.viewport.zoom_in();
                Ok(None)
            }
            Action::ZoomOut => {
                self.viewport.zoom_out();
                Ok(None)
            }
            Action::ResetZoom => {
                self.viewport.reset_zoom();
                Ok(None)
            }
            Action::RotateClockwise => {
                self.viewport.rotate_cw();
                Ok(None)
            }
            Action::RotateCounterclockwise => {
                self.viewport.rotate_ccw();
                Ok(None)
            }
            Action::Reset => {
                self.viewport.reset();
                Ok(None)
            }
            Action::Next => self.viewport.next(),
            Action::Previous => self.viewport.prev(),
            Action::First => self.viewport.first(),
            Action::Last => self.viewport.last(),
            Action::Delete => match self.viewport.delete_current(&self.config.paths) {
                Ok(Some(report)) => report.load,
                Ok(None) => Ok(None),
                Err(err) => Err(err),
            },
            Action::ToggleInfo => {
                self.show_info = !self.show_info;
                Ok(None)
            }
            Action::TogglePaths => {
                self.show_paths = !self.show_paths;
                if self.show_paths {
                    self.paths_form = paths_form::State::from_paths(&self.config.paths);
                }
                Ok(None)
            }
            Action::ToggleUi => {
                self.show_ui = !self.show_ui;
                Ok(None)
            }
            Action::ToggleFullscreen => return self.toggle_fullscreen(),
            Action::Quit => {
                self.viewport.shutdown();
                return iced::exit();
            }
        };
        self.report_load(loaded);
        Task::none()
    }

    /// Adopts the reference directory of a new collection and reports how
    /// loading its first image went.
    fn apply_open(&mut self, opened: Result<OpenReport>) {
        match opened {
            Ok(report) => {
                if let Some(dir) = &report.reference_dir {
                    self.config.paths.retarget(dir);
                    self.paths_form = paths_form::State::from_paths(&self.config.paths);
                }
                self.report_load(report.load);
            }
            Err(err) => {
                tracing::warn!("{err}");
                self.error = Some(err.to_string());
            }
        }
    }

    fn report_load(&mut self, loaded: Result<Option<LoadOutcome>>) {
        match loaded {
            Ok(Some(LoadOutcome::DecodeFailed(reason))) => {
                let name = self
                    .viewport
                    .current()
                    .map(|record| record.file_name().to_string())
                    .unwrap_or_default();
                self.error = Some(format!("Cannot decode {name}: {reason}"));
            }
            Ok(_) => {}
            Err(err) => self.error = Some(err.to_string()),
        }
    }

    fn toggle_fullscreen(&mut self) -> Task<Message> {
        let Some(window_id) = self.window_id else {
            return Task::none();
        };
        self.fullscreen = !self.fullscreen;
        let mode = if self.fullscreen {
            window::Mode::Fullscreen
        } else {
            window::Mode::Windowed
        };
        window::set_mode(window_id, mode)
    }
}
