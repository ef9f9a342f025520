// SPDX-License-Identifier: MPL-2.0
//! Canvas that renders the viewport's draw command.
//!
//! The frame applies the camera first (offset, zoom, then the negated
//! target) and draws the image into its destination rectangle, rotated
//! around the rectangle's centre.

use crate::media::DecodedImage;
use crate::ui::design_tokens::palette;
use crate::viewport::{DrawCommand, ImageViewport, TextureStore};
use iced::widget::canvas::{self, Canvas, Frame, Geometry};
use iced::widget::image::Handle;
use iced::{mouse, Element, Length, Point, Radians, Rectangle, Renderer, Theme, Vector};

/// Textures held as iced image handles. Releasing drops the handle, which
/// frees the GPU copy once the renderer no longer uses it.
#[derive(Debug, Default)]
pub struct IcedTextures;

impl TextureStore for IcedTextures {
    type Texture = Handle;

    fn upload(&mut self, image: DecodedImage) -> Handle {
        let (width, height) = (image.width, image.height);
        Handle::from_rgba(width, height, image.into_rgba())
    }

    fn release(&mut self, texture: Handle) {
        drop(texture);
    }
}

struct ViewportProgram<'a> {
    command: Option<DrawCommand<'a, Handle>>,
}

impl<Message> canvas::Program<Message> for ViewportProgram<'_> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), palette::GRAY_900);

        if let Some(command) = &self.command {
            let camera = command.camera;
            let target = camera.target();
            frame.with_save(|frame| {
                frame.translate(camera.offset());
                frame.scale(camera.zoom().value());
                frame.translate(Vector::new(-target.x, -target.y));
                frame.draw_image(
                    command.destination,
                    canvas::Image::new(command.texture.clone())
                        .rotation(Radians(command.rotation.radians())),
                );
            });
        }

        vec![frame.into_geometry()]
    }
}

/// Full-window canvas showing the current image, or just the background.
pub fn view<'a, Message: 'a>(viewport: &'a ImageViewport<IcedTextures>) -> Element<'a, Message> {
    Canvas::new(ViewportProgram {
        command: viewport.draw(),
    })
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
