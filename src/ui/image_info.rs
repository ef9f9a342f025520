// SPDX-License-Identifier: MPL-2.0
//! Image info panel: file name, extension, and EXIF data of the current image.

use crate::media::{ExifOutcome, ImageRecord};
use crate::ui::design_tokens::{opacity, palette, radius, sizing, spacing, typography};
use iced::widget::{text, Column, Container, Row};
use iced::{Color, Element, Length, Theme};

/// Label/value rows shown in the panel, in display order.
pub fn info_lines(record: &ImageRecord) -> Vec<(String, String)> {
    let mut lines = vec![
        ("File".to_string(), record.file_name().to_string()),
        ("Extension".to_string(), record.extension().to_string()),
    ];

    match record.metadata() {
        None => lines.push(("EXIF".to_string(), "Not parsed yet".to_string())),
        Some(ExifOutcome::Success(info)) => {
            let fields = info.display_lines();
            if fields.is_empty() {
                lines.push(("EXIF".to_string(), "No camera fields".to_string()));
            }
            lines.extend(
                fields
                    .into_iter()
                    .map(|(label, value)| (label.to_string(), value)),
            );
        }
        Some(outcome) => {
            if let Some(message) = outcome.message() {
                lines.push(("EXIF".to_string(), message.to_string()));
            }
        }
    }

    lines
}

pub fn view<'a, Message: 'a>(record: Option<&ImageRecord>) -> Element<'a, Message> {
    let mut column = Column::new()
        .spacing(spacing::XXS)
        .push(text("Image info").size(typography::TITLE));

    match record {
        Some(record) => {
            for (label, value) in info_lines(record) {
                column = column.push(
                    Row::new()
                        .spacing(spacing::XS)
                        .push(
                            text(label)
                                .size(typography::CAPTION)
                                .color(palette::GRAY_200)
                                .width(Length::Fixed(110.0)),
                        )
                        .push(text(value).size(typography::BODY)),
                );
            }
        }
        None => {
            column = column.push(text("No image").size(typography::BODY));
        }
    }

    Container::new(column)
        .width(Length::Fixed(sizing::INFO_PANEL_WIDTH))
        .padding(spacing::SM)
        .style(panel_style)
        .into()
}

/// Translucent dark card drawn over the image.
pub fn panel_style(_theme: &Theme) -> iced::widget::container::Style {
    iced::widget::container::Style {
        background: Some(iced::Background::Color(Color {
            a: opacity::OVERLAY_STRONG,
            ..palette::GRAY_900
        })),
        border: iced::Border {
            color: palette::GRAY_700,
            width: 1.0,
            radius: radius::MD.into(),
        },
        text_color: Some(palette::WHITE),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::ExifInfo;

    fn labels(lines: &[(String, String)]) -> Vec<&str> {
        lines.iter().map(|(label, _)| label.as_str()).collect()
    }

    #[test]
    fn unparsed_record_says_so() {
        let record = ImageRecord::new("/photos/a.JPG");
        let lines = info_lines(&record);

        assert_eq!(lines[0], ("File".to_string(), "a.JPG".to_string()));
        assert_eq!(lines[1], ("Extension".to_string(), ".JPG".to_string()));
        assert_eq!(lines[2].1, "Not parsed yet");
    }

    #[test]
    fn failed_outcome_shows_its_message() {
        let mut record = ImageRecord::new("b.png");
        record.set_metadata(ExifOutcome::NotAJpeg);

        let lines = info_lines(&record);
        assert_eq!(
            lines.last().map(|(_, v)| v.as_str()),
            ExifOutcome::NotAJpeg.message()
        );
    }

    #[test]
    fn success_lists_camera_fields() {
        let mut record = ImageRecord::new("c.jpg");
        record.set_metadata(ExifOutcome::Success(ExifInfo {
            model: Some("X100V".into()),
            exposure_time: Some(0.008),
            f_number: Some(2.0),
            orientation: Some(6),
            ..ExifInfo::default()
        }));

        let lines = info_lines(&record);
        assert_eq!(
            labels(&lines),
            vec!["File", "Extension", "Camera", "Shutter speed", "Aperture", "Orientation"]
        );
        assert_eq!(lines[3].1, "1/125 s");
    }
}
