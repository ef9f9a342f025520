// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use super::keybindings::Action;
use crate::config::Overrides;
use crate::ui::paths_form;
use iced::{window, Point, Size};
use std::path::PathBuf;

/// Top-level messages consumed by `App::update`.
#[derive(Debug, Clone)]
pub enum Message {
    /// A key or wheel event mapped to a viewer action.
    Input {
        window: window::Id,
        action: Action,
    },
    WindowOpened {
        window: window::Id,
        size: Size,
    },
    WindowResized {
        window: window::Id,
        size: Size,
    },
    CursorMoved(Point),
    /// Left button pressed outside any widget.
    DragStarted,
    DragEnded,
    /// A file was dropped on the window.
    FileDropped(PathBuf),
    /// The drop batch window elapsed; open everything dropped so far.
    FlushDroppedFiles,
    DismissError,
    PathsForm(paths_form::Message),
}

/// Runtime flags passed in from the CLI.
#[derive(Debug, Default)]
pub struct Flags {
    pub overrides: Overrides,
}
