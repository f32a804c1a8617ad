use super::Pressable;
use crate::canvas::Canvas;
use crate::error::WidgetError;
use crate::layout::centered_rect;
use crate::surface::Surface;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{OriginDimensions, Point, Size};
use embedded_graphics::primitives::Rectangle;
use tinybmp::Bmp;

/// Button showing a BMP image, with a second image for the pressed state.
///
/// Images should be one pixel smaller than the button in each direction so
/// the raised frame on the top and left edges stays visible.
#[derive(Debug, Clone)]
pub struct ImageButton {
    pub center: Point,
    pub size: Size,
    image: Bmp<'static, Rgb565>,
    image_selected: Bmp<'static, Rgb565>,
}

impl ImageButton {
    pub fn new(
        center: Point,
        size: Size,
        image: &'static [u8],
        image_selected: &'static [u8],
    ) -> Result<Self, WidgetError> {
        let image = Bmp::from_slice(image).map_err(WidgetError::Image)?;
        let image_selected = Bmp::from_slice(image_selected).map_err(WidgetError::Image)?;
        if image.size() != image_selected.size() {
            log::warn!(
                "image button images differ in size: {:?} vs {:?}",
                image.size(),
                image_selected.size()
            );
        }
        Ok(Self {
            center,
            size,
            image,
            image_selected,
        })
    }

    /// Top left corner of the drawn image, kept on screen
    fn origin(&self) -> Point {
        let rect = centered_rect(self.center, self.size);
        Point::new(rect.top_left.x.max(0), rect.top_left.y.max(0))
    }
}

impl Pressable for ImageButton {
    fn rect(&self) -> Rectangle {
        centered_rect(self.center, self.size)
    }

    fn draw<S: Surface>(&self, canvas: &mut Canvas<S>, pressed: bool) -> Result<(), S::Error> {
        let image = if pressed {
            &self.image_selected
        } else {
            &self.image
        };
        let origin = self.origin();
        let width = self.size.width.cast_signed();
        let height = self.size.height.cast_signed();
        let frame = canvas.theme().button_frame;

        let surface = canvas.surface_mut();
        surface.draw_image(origin, image)?;
        surface.draw_line(
            Point::new(origin.x, origin.y + height - 1),
            origin,
            frame,
        )?;
        surface.draw_line(origin, Point::new(origin.x + width - 1, origin.y), frame)
    }
}
