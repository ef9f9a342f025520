// SPDX-License-Identifier: MPL-2.0
//! View composition: the image canvas with the panels layered on top.

use super::Message;
use crate::ui::canvas::{self, IcedTextures};
use crate::ui::design_tokens::{palette, radius, spacing, typography};
use crate::ui::{image_info, paths_form};
use crate::viewport::ImageViewport;
use iced::widget::{button, container, text, Column, Container, Row, Stack};
use iced::{alignment, Element, Length, Theme};

pub struct ViewContext<'a> {
    pub viewport: &'a ImageViewport<IcedTextures>,
    pub paths_form: &'a paths_form::State,
    pub show_info: bool,
    pub show_paths: bool,
    pub show_ui: bool,
    pub error: Option<&'a str>,
}

pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let mut layers = Stack::new()
        .width(Length::Fill)
        .height(Length::Fill)
        .push(canvas::view(ctx.viewport));

    if ctx.viewport.is_empty() {
        layers = layers.push(
            Container::new(
                text("No images found")
                    .size(typography::TITLE)
                    .color(palette::GRAY_200),
            )
            .center(Length::Fill),
        );
    }

    if ctx.show_ui {
        let mut panels = Row::new().spacing(spacing::SM);
        if ctx.show_info {
            panels = panels.push(image_info::view(ctx.viewport.current()));
        }
        if ctx.show_paths {
            panels = panels.push(ctx.paths_form.view().map(Message::PathsForm));
        }
        layers = layers.push(
            Container::new(panels)
                .width(Length::Fill)
                .height(Length::Fill)
                .padding(spacing::MD),
        );
    }

    if let Some(error) = ctx.error {
        layers = layers.push(error_banner(error));
    }

    layers.into()
}

fn error_banner(message: &str) -> Element<'_, Message> {
    let content = Row::new()
        .spacing(spacing::SM)
        .align_y(alignment::Vertical::Center)
        .push(
            Container::new(text(message).size(typography::BODY))
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Left),
        )
        .push(
            button(text("Dismiss").size(typography::CAPTION))
                .on_press(Message::DismissError)
                .padding(spacing::XXS),
        );

    let banner = Container::new(content)
        .padding(spacing::SM)
        .style(|_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(palette::ERROR_500)),
            border: iced::Border {
                color: palette::ERROR_500,
                width: 1.0,
                radius: radius::MD.into(),
            },
            text_color: Some(palette::WHITE),
            ..Default::default()
        });

    Container::new(Column::new().push(banner))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_y(alignment::Vertical::Bottom)
        .padding(spacing::MD)
        .into()
}
