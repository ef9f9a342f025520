// SPDX-License-Identifier: MPL-2.0
//! Form for editing the image, raw, and trash paths.
//!
//! The form edits plain strings. Nothing reaches the application until
//! "Apply" or "Load" is pressed and the input validates; a rejected input
//! leaves the current paths alone and shows the reason under the fields.

use crate::config::Paths;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::image_info::panel_style;
use iced::widget::{button, text, text_input, Column, Container, Row};
use iced::{Element, Length};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    image_path: String,
    raw_image_dir: String,
    trash_dir: String,
    raw_extension: String,
    error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    ImagePathChanged(String),
    RawDirChanged(String),
    TrashDirChanged(String),
    RawExtensionChanged(String),
    Apply,
    Load,
}

/// What the application should do after a form message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    /// Adopt the new paths.
    Apply(Paths),
    /// Adopt the new paths and reload images from the image path.
    Load(Paths),
}

impl State {
    /// Fills the fields from the current paths.
    pub fn from_paths(paths: &Paths) -> Self {
        Self {
            image_path: paths.image_path.to_string_lossy().into_owned(),
            raw_image_dir: paths.raw_image_dir.to_string_lossy().into_owned(),
            trash_dir: paths.trash_dir.to_string_lossy().into_owned(),
            raw_extension: paths.raw_extension.clone(),
            error: None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::ImagePathChanged(value) => self.image_path = value,
            Message::RawDirChanged(value) => self.raw_image_dir = value,
            Message::TrashDirChanged(value) => self.trash_dir = value,
            Message::RawExtensionChanged(value) => self.raw_extension = value,
            Message::Apply => return self.submit().map_or(Event::None, Event::Apply),
            Message::Load => return self.submit().map_or(Event::None, Event::Load),
        }
        Event::None
    }

    fn submit(&mut self) -> Option<Paths> {
        match Paths::from_user_input(
            &self.image_path,
            &self.raw_image_dir,
            &self.trash_dir,
            &self.raw_extension,
        ) {
            Ok(paths) => {
                self.error = None;
                self.raw_extension.clone_from(&paths.raw_extension);
                Some(paths)
            }
            Err(err) => {
                tracing::warn!("Rejected paths: {err}");
                self.error = Some(err.to_string());
                None
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let buttons = Row::new()
            .spacing(spacing::XS)
            .push(button(text("Apply")).on_press(Message::Apply))
            .push(button(text("Load")).on_press(Message::Load));

        let mut column = Column::new()
            .spacing(spacing::XS)
            .push(text("Paths").size(typography::TITLE))
            .push(field(
                "Image path",
                &self.image_path,
                Message::ImagePathChanged,
            ))
            .push(field(
                "Raw image directory",
                &self.raw_image_dir,
                Message::RawDirChanged,
            ))
            .push(field("Trash directory", &self.trash_dir, Message::TrashDirChanged))
            .push(field(
                "Raw extension",
                &self.raw_extension,
                Message::RawExtensionChanged,
            ))
            .push(buttons);

        if let Some(error) = &self.error {
            column = column.push(
                text(error.as_str())
                    .size(typography::CAPTION)
                    .color(palette::ERROR_500),
            );
        }

        Container::new(column)
            .width(Length::Fixed(sizing::PATHS_FORM_WIDTH))
            .padding(spacing::SM)
            .style(panel_style)
            .into()
    }
}

fn field<'a>(
    label: &'static str,
    value: &'a str,
    on_input: fn(String) -> Message,
) -> Column<'a, Message> {
    Column::new()
        .spacing(spacing::XXS)
        .push(
            text(label)
                .size(typography::CAPTION)
                .color(palette::GRAY_200),
        )
        .push(
            text_input(label, value)
                .on_input(on_input)
                .size(typography::BODY)
                .padding(spacing::XXS),
        )
}
