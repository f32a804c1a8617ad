use core::convert::Infallible;
use embedded_graphics::{
    geometry::Dimensions,
    pixelcolor::{Rgb565, RgbColor},
    prelude::{DrawTarget, OriginDimensions, Pixel, Point, PointsIter, Size},
    primitives::Rectangle,
};
use std::io::{self, Write};

/// In-memory RGB565 frame, for headless rendering and tests.
pub struct Framebuffer {
    size: Size,
    pixels: Box<[Rgb565]>,
}

impl Framebuffer {
    #[must_use]
    pub fn new(size: Size) -> Self {
        let len = size.width as usize * size.height as usize;
        Self {
            size,
            pixels: vec![Rgb565::BLACK; len].into_boxed_slice(),
        }
    }

    fn index(&self, point: Point) -> Option<usize> {
        let Size { width, height } = self.size;
        if point.x < 0
            || point.x >= width.cast_signed()
            || point.y < 0
            || point.y >= height.cast_signed()
        {
            return None;
        }
        Some(point.y.cast_unsigned() as usize * width as usize + point.x.cast_unsigned() as usize)
    }

    pub fn pixel(&self, point: Point) -> Option<Rgb565> {
        self.index(point).map(|i| self.pixels[i])
    }

    /// Write the frame as a binary PPM (P6) image
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.size.width, self.size.height)?;
        let mut row = Vec::with_capacity(self.size.width as usize * 3);
        for line in self.pixels.chunks(self.size.width.max(1) as usize) {
            row.clear();
            for color in line {
                // expand 5/6-bit channels to 8 bits
                row.push((color.r() << 3) | (color.r() >> 2));
                row.push((color.g() << 2) | (color.g() >> 4));
                row.push((color.b() << 3) | (color.b() >> 2));
            }
            out.write_all(&row)?;
        }
        out.flush()
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let Some(i) = self.index(coord) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped_area = area.intersection(&self.bounding_box());

        if clipped_area.is_zero_sized() {
            return Ok(());
        }

        self.draw_iter(clipped_area.points().map(|p| Pixel(p, color)))
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        self.size
    }
}
