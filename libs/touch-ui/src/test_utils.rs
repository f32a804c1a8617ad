//! Test utilities for driving the UI without a display
//!
//! [`RecordingSurface`] implements [`Surface`] with fixed-width font metrics
//! and records every drawing call, so tests can assert on what was drawn
//! and where.

use crate::fonts::Font;
use crate::surface::Surface;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{OriginDimensions, Point, Size};
use embedded_graphics::primitives::Rectangle;
use tinybmp::Bmp;

/// Pixel width of every character on a [`RecordingSurface`]
pub const CHAR_WIDTH: u32 = 8;
/// Cap height reported by a [`RecordingSurface`]
pub const CAP_HEIGHT: u32 = 10;
/// Glyph height including descenders reported by a [`RecordingSurface`]
pub const FULL_HEIGHT: u32 = 13;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    FillRect {
        rect: Rectangle,
        color: Rgb565,
    },
    DrawRect {
        rect: Rectangle,
        color: Rgb565,
    },
    RoundedRect {
        rect: Rectangle,
        radius: u32,
        color: Rgb565,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgb565,
    },
    Triangle {
        points: [Point; 3],
        color: Rgb565,
    },
    Circle {
        center: Point,
        radius: u32,
        color: Rgb565,
    },
    Image {
        top_left: Point,
        size: Size,
    },
    Text {
        font: Font,
        top_left: Point,
        text: String,
        color: Rgb565,
    },
}

pub struct RecordingSurface {
    size: Size,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// All text drawn so far, in drawing order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn drew_text(&self, wanted: &str) -> bool {
        self.texts().contains(&wanted)
    }

    /// Color of the last fill that covers `rect` exactly
    pub fn last_fill_of(&self, rect: Rectangle) -> Option<Rgb565> {
        self.ops.iter().rev().find_map(|op| match op {
            DrawOp::FillRect { rect: r, color } if *r == rect => Some(*color),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn size(&self) -> Size {
        self.size
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::FillRect { rect, color });
        Ok(())
    }

    fn draw_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::DrawRect { rect, color });
        Ok(())
    }

    fn fill_rounded_rect(
        &mut self,
        rect: Rectangle,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::RoundedRect {
            rect,
            radius,
            color,
        });
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgb565) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Line { from, to, color });
        Ok(())
    }

    fn fill_triangle(
        &mut self,
        a: Point,
        b: Point,
        c: Point,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Triangle {
            points: [a, b, c],
            color,
        });
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
        });
        Ok(())
    }

    fn draw_image(&mut self, top_left: Point, image: &Bmp<'_, Rgb565>) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Image {
            top_left,
            size: image.size(),
        });
        Ok(())
    }

    fn text_width(&self, _font: Font, text: &str) -> u32 {
        u32::try_from(text.chars().count()).unwrap_or(u32::MAX) * CHAR_WIDTH
    }

    fn font_height(&self, _font: Font, with_descenders: bool) -> u32 {
        if with_descenders { FULL_HEIGHT } else { CAP_HEIGHT }
    }

    fn draw_text(
        &mut self,
        font: Font,
        top_left: Point,
        text: &str,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        self.ops.push(DrawOp::Text {
            font,
            top_left,
            text: text.to_string(),
            color,
        });
        Ok(())
    }
}

/// Build a tiny 24-bit BMP of `width` x `height` pixels filled with one color
#[must_use]
pub fn solid_bmp(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let row_len = (width as usize * 3).div_ceil(4) * 4;
    let pixel_bytes = row_len * height as usize;
    let offset = 14 + 40;
    let file_len = offset + pixel_bytes;

    let mut data = Vec::with_capacity(file_len);
    data.extend_from_slice(b"BM");
    data.extend_from_slice(&u32::try_from(file_len).unwrap_or(u32::MAX).to_le_bytes());
    data.extend_from_slice(&[0; 4]);
    data.extend_from_slice(&u32::try_from(offset).unwrap_or(u32::MAX).to_le_bytes());

    // BITMAPINFOHEADER
    data.extend_from_slice(&40u32.to_le_bytes());
    data.extend_from_slice(&width.cast_signed().to_le_bytes());
    data.extend_from_slice(&height.cast_signed().to_le_bytes());
    data.extend_from_slice(&1u16.to_le_bytes());
    data.extend_from_slice(&24u16.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&u32::try_from(pixel_bytes).unwrap_or(u32::MAX).to_le_bytes());
    data.extend_from_slice(&2835u32.to_le_bytes());
    data.extend_from_slice(&2835u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());
    data.extend_from_slice(&0u32.to_le_bytes());

    let [r, g, b] = rgb;
    for _ in 0..height {
        let mut row = Vec::with_capacity(row_len);
        for _ in 0..width {
            row.extend_from_slice(&[b, g, r]);
        }
        row.resize(row_len, 0);
        data.extend_from_slice(&row);
    }
    data
}
