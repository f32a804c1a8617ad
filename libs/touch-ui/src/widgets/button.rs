use super::Pressable;
use crate::canvas::Canvas;
use crate::layout::centered_rect;
use crate::surface::Surface;
use crate::theme::ButtonStyle;
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

/// Rectangular text button, positioned by its center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub center: Point,
    pub size: Size,
    /// Colors to use instead of the theme's menu button colors
    pub style: Option<ButtonStyle>,
}

impl Button {
    #[must_use]
    pub fn new(label: &str, center: Point, size: Size) -> Self {
        Self {
            label: label.to_string(),
            center,
            size,
            style: None,
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = Some(style);
        self
    }
}

impl Pressable for Button {
    fn rect(&self) -> Rectangle {
        centered_rect(self.center, self.size)
    }

    fn draw<S: Surface>(&self, canvas: &mut Canvas<S>, pressed: bool) -> Result<(), S::Error> {
        let style = self.style.unwrap_or_else(|| canvas.button_style());
        canvas.draw_button(&self.label, self.rect(), pressed, &style)
    }
}
