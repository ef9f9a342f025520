// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Native keyboard, mouse, and window events are turned into [`Message`]s.
//! Keys typed into a text field are captured by the widget and never reach
//! the viewer.

use super::keybindings;
use super::Message;
use iced::{event, mouse, window, Subscription};

pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, window_id| match event {
        event::Event::Window(window::Event::Opened { size, .. }) => Some(Message::WindowOpened {
            window: window_id,
            size,
        }),
        event::Event::Window(window::Event::Resized(size)) => Some(Message::WindowResized {
            window: window_id,
            size,
        }),
        event::Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),

        // Cursor tracking and release must see every event so a drag that
        // ends over a panel still stops.
        event::Event::Mouse(mouse::Event::CursorMoved { position }) => {
            Some(Message::CursorMoved(position))
        }
        event::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            Some(Message::DragEnded)
        }

        _ if matches!(status, event::Status::Captured) => None,

        event::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            Some(Message::DragStarted)
        }
        event::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
            keybindings::action_for_wheel(delta).map(|action| Message::Input {
                window: window_id,
                action,
            })
        }
        event::Event::Keyboard(keyboard_event) => {
            keybindings::action_for_event(&keyboard_event).map(|action| Message::Input {
                window: window_id,
                action,
            })
        }
        _ => None,
    })
}
