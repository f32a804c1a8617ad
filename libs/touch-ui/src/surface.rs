//! Drawing surface abstraction
//!
//! The UI core only needs a handful of filled primitives, raster images and
//! measured text. [`Surface`] captures exactly that, and [`DisplaySurface`]
//! implements it for any `embedded-graphics` RGB565 draw target.

use crate::fonts::Font;
use core::fmt::Debug;
use embedded_graphics::{
    Drawable,
    image::Image,
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle},
};
use thiserror::Error;
use tinybmp::Bmp;
use u8g2_fonts::types::{FontColor, VerticalPosition};

pub trait Surface {
    type Error: Debug;

    fn size(&self) -> Size;

    fn fill_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), Self::Error>;

    fn draw_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), Self::Error>;

    fn fill_rounded_rect(
        &mut self,
        rect: Rectangle,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb565) -> Result<(), Self::Error>;

    fn fill_triangle(
        &mut self,
        a: Point,
        b: Point,
        c: Point,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    fn fill_circle(&mut self, center: Point, radius: u32, color: Rgb565)
    -> Result<(), Self::Error>;

    fn draw_image(&mut self, top_left: Point, image: &Bmp<'_, Rgb565>) -> Result<(), Self::Error>;

    /// Advance width of `text` in pixels
    fn text_width(&self, font: Font, text: &str) -> u32;

    /// Cap height, or full glyph height including descenders
    fn font_height(&self, font: Font, with_descenders: bool) -> u32;

    /// Draw `text` with the top of its capitals at `top_left.y`
    fn draw_text(
        &mut self,
        font: Font,
        top_left: Point,
        text: &str,
        color: Rgb565,
    ) -> Result<(), Self::Error>;
}

#[derive(Error, Debug)]
pub enum SurfaceError<E: Debug> {
    #[error("Display error: {0:?}")]
    Display(E),
    #[error("Font error: {0}")]
    Font(String),
}

/// [`Surface`] backed by an `embedded-graphics` draw target
pub struct DisplaySurface<D> {
    target: D,
}

impl<D> DisplaySurface<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
    D::Error: Debug,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn draw_styled<P>(
        &mut self,
        primitive: P,
        style: PrimitiveStyle<Rgb565>,
    ) -> Result<(), SurfaceError<D::Error>>
    where
        P: Primitive,
        embedded_graphics::primitives::Styled<P, PrimitiveStyle<Rgb565>>:
            Drawable<Color = Rgb565, Output = ()>,
    {
        primitive
            .into_styled(style)
            .draw(&mut self.target)
            .map_err(SurfaceError::Display)
    }
}

fn measure(font: Font, text: &str) -> Option<Rectangle> {
    font.renderer()
        .get_rendered_dimensions(text, Point::zero(), VerticalPosition::Top)
        .ok()
        .and_then(|d| d.bounding_box)
}

impl<D> Surface for DisplaySurface<D>
where
    D: DrawTarget<Color = Rgb565> + OriginDimensions,
    D::Error: Debug,
{
    type Error = SurfaceError<D::Error>;

    fn size(&self) -> Size {
        self.target.size()
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        self.target
            .fill_solid(&rect, color)
            .map_err(SurfaceError::Display)
    }

    fn draw_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        self.draw_styled(rect, PrimitiveStyle::with_stroke(color, 1))
    }

    fn fill_rounded_rect(
        &mut self,
        rect: Rectangle,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        let shape = RoundedRectangle::with_equal_corners(rect, Size::new(radius, radius));
        self.draw_styled(shape, PrimitiveStyle::with_fill(color))
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb565) -> Result<(), Self::Error> {
        self.draw_styled(Line::new(from, to), PrimitiveStyle::with_stroke(color, 1))
    }

    fn fill_triangle(
        &mut self,
        a: Point,
        b: Point,
        c: Point,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        self.draw_styled(Triangle::new(a, b, c), PrimitiveStyle::with_fill(color))
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        let circle = Circle::with_center(center, radius * 2 + 1);
        self.draw_styled(circle, PrimitiveStyle::with_fill(color))
    }

    fn draw_image(&mut self, top_left: Point, image: &Bmp<'_, Rgb565>) -> Result<(), Self::Error> {
        Image::new(image, top_left)
            .draw(&mut self.target)
            .map_err(SurfaceError::Display)
    }

    fn text_width(&self, font: Font, text: &str) -> u32 {
        font.renderer()
            .get_rendered_dimensions(text, Point::zero(), VerticalPosition::Top)
            .map_or(0, |d| d.advance.x.max(0).cast_unsigned())
    }

    fn font_height(&self, font: Font, with_descenders: bool) -> u32 {
        let sample = if with_descenders { "Hgjpqy" } else { "H" };
        measure(font, sample).map_or(0, |b| b.size.height)
    }

    fn draw_text(
        &mut self,
        font: Font,
        top_left: Point,
        text: &str,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        // VerticalPosition::Top aligns to the font's ascent, which sits above
        // the capitals by a font-specific gap.
        let cap_offset = measure(font, "H").map_or(0, |b| b.top_left.y);
        font.renderer()
            .render(
                text,
                top_left - Point::new(0, cap_offset),
                VerticalPosition::Top,
                FontColor::Transparent(color),
                &mut self.target,
            )
            .map(|_| ())
            .map_err(|e| match e {
                u8g2_fonts::Error::DisplayError(e) => SurfaceError::Display(e),
                other => SurfaceError::Font(format!("{other:?}")),
            })
    }
}
