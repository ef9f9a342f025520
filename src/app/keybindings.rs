// SPDX-License-Identifier: MPL-2.0
//! Mapping of keys and wheel ticks to viewer actions.
//!
//! Each event yields at most one action. Zoom keys also fire on key repeat;
//! every other action only fires on the initial press.

use iced::keyboard::{self, key::Named, Key, Modifiers};
use iced::mouse::ScrollDelta;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ZoomIn,
    ZoomOut,
    ResetZoom,
    RotateClockwise,
    RotateCounterclockwise,
    Reset,
    Next,
    Previous,
    First,
    Last,
    Delete,
    ToggleInfo,
    TogglePaths,
    ToggleUi,
    ToggleFullscreen,
    Quit,
}

/// Maps a key press to an action.
pub fn action_for_key(key: &Key, modifiers: Modifiers, repeat: bool) -> Option<Action> {
    let action = match key.as_ref() {
        Key::Named(Named::ArrowRight) => Action::Next,
        Key::Named(Named::ArrowLeft) => Action::Previous,
        Key::Named(Named::Home) => Action::First,
        Key::Named(Named::End) => Action::Last,
        Key::Named(Named::Delete) => Action::Delete,
        Key::Character(c) => {
            let c = c.to_ascii_lowercase();
            if modifiers.control() {
                return (c == "q" && !repeat).then_some(Action::Quit);
            }
            match c.as_str() {
                "-" | "s" => Action::ZoomOut,
                "=" | "+" | "w" => Action::ZoomIn,
                "0" | "z" => Action::ResetZoom,
                "]" | "e" => Action::RotateClockwise,
                "[" | "q" => Action::RotateCounterclockwise,
                "r" => Action::Reset,
                "d" => Action::Next,
                "a" => Action::Previous,
                "x" => Action::Delete,
                "i" => Action::ToggleInfo,
                "p" => Action::TogglePaths,
                "h" => Action::ToggleUi,
                "f" => Action::ToggleFullscreen,
                _ => return None,
            }
        }
        _ => return None,
    };

    if repeat && !matches!(action, Action::ZoomIn | Action::ZoomOut) {
        return None;
    }
    Some(action)
}

/// Wheel up zooms in, wheel down zooms out.
pub fn action_for_wheel(delta: ScrollDelta) -> Option<Action> {
    let y = match delta {
        ScrollDelta::Lines { y, .. } | ScrollDelta::Pixels { y, .. } => y,
    };
    if y > 0.0 {
        Some(Action::ZoomIn)
    } else if y < 0.0 {
        Some(Action::ZoomOut)
    } else {
        None
    }
}

/// Maps a keyboard event, ignoring everything but presses.
pub fn action_for_event(event: &keyboard::Event) -> Option<Action> {
    match event {
        keyboard::Event::KeyPressed {
            key,
            modifiers,
            repeat,
            ..
        } => action_for_key(key, *modifiers, *repeat),
        _ => None,
    }
}
