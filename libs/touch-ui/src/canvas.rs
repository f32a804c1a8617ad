//! Screen partitioning, title bar and standard button rendering
//!
//! The screen is split into a title bar across the top and a framed
//! "display space" below it where menus and widgets live. The title bar may
//! carry a Back button or a Menu (hamburger) button on its left edge.

use crate::config::LayoutConfig;
use crate::fonts::Font;
use crate::surface::Surface;
use crate::text::wrap_label;
use crate::theme::{ButtonStyle, Theme};
use crate::touch::{TouchEvent, TouchEventKind};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

const BACK_LABEL: &str = "Back";
// Width of the arrow on the Back button and on submenu buttons
pub(crate) const ARROW_WIDTH: i32 = 8;
const TITLE_BUTTON_X: i32 = 4;
const TITLE_TEXT_CLEARANCE: i32 = 6;
// Horizontal space kept free inside a button around its label
const LABEL_MARGIN: u32 = 8;

/// Button shown on the left of the title bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TitleButton {
    #[default]
    None,
    Back,
    Menu,
}

pub struct Canvas<S> {
    surface: S,
    theme: Theme,
    layout: LayoutConfig,
    title: String,
    title_button: TitleButton,
}

impl<S: Surface> Canvas<S> {
    pub fn new(surface: S, theme: Theme, layout: LayoutConfig) -> Self {
        Self {
            surface,
            theme,
            layout,
            title: String::new(),
            title_button: TitleButton::None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Colors of a standard menu button under the current theme
    pub fn button_style(&self) -> ButtonStyle {
        ButtonStyle::from_theme(&self.theme)
    }

    pub fn screen_size(&self) -> Size {
        self.surface.size()
    }

    /// Area below the title bar, inside a one pixel frame
    pub fn display_space(&self) -> Rectangle {
        let Size { width, height } = self.surface.size();
        let title = self.layout.title_bar_height;
        Rectangle::new(
            Point::new(1, title.cast_signed()),
            Size::new(
                width.saturating_sub(2),
                height.saturating_sub(title).saturating_sub(1),
            ),
        )
    }

    pub fn clear_display_space(&mut self) -> Result<(), S::Error> {
        self.clear_display_space_with(self.theme.background)
    }

    pub fn clear_display_space_with(&mut self, color: Rgb565) -> Result<(), S::Error> {
        let area = self.display_space();
        let frame = self.theme.title_bar;
        let left = area.top_left.x - 1;
        let right = area.top_left.x + area.size.width.cast_signed();
        let top = area.top_left.y;
        let bottom = top + area.size.height.cast_signed();

        self.surface
            .draw_line(Point::new(right, top), Point::new(right, bottom), frame)?;
        self.surface
            .draw_line(Point::new(right, bottom), Point::new(left, bottom), frame)?;
        self.surface
            .draw_line(Point::new(left, bottom), Point::new(left, top), frame)?;
        self.surface.fill_rect(area, color)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn title_button(&self) -> TitleButton {
        self.title_button
    }

    pub fn draw_title_bar(&mut self, text: &str, button: TitleButton) -> Result<(), S::Error> {
        text.clone_into(&mut self.title);
        self.title_button = button;
        self.render_title_bar(text)
    }

    /// Draw `text` over the title bar without forgetting the current title
    pub fn draw_title_message(&mut self, text: &str) -> Result<(), S::Error> {
        let saved = self.title_button;
        self.title_button = TitleButton::None;
        let result = self.render_title_bar(text);
        self.title_button = saved;
        result
    }

    /// Redraw the last title set with [`draw_title_bar`](Self::draw_title_bar)
    pub fn redraw_title_bar(&mut self) -> Result<(), S::Error> {
        let title = std::mem::take(&mut self.title);
        let result = self.render_title_bar(&title);
        self.title = title;
        result
    }

    fn render_title_bar(&mut self, text: &str) -> Result<(), S::Error> {
        let Size { width, .. } = self.surface.size();
        let bar_height = self.layout.title_bar_height;
        self.surface.fill_rect(
            Rectangle::new(Point::zero(), Size::new(width, bar_height)),
            self.theme.title_bar,
        )?;

        let text_width = self.surface.text_width(Font::Title, text).cast_signed();
        let mut text_x = (width.cast_signed() / 2 - text_width / 2).max(2);
        let button_rect = match self.title_button {
            TitleButton::None => None,
            TitleButton::Back => Some(self.back_button_rect()),
            TitleButton::Menu => Some(self.menu_button_rect()),
        };
        if let Some(rect) = button_rect {
            let clear_of_button =
                rect.top_left.x + rect.size.width.cast_signed() + TITLE_TEXT_CLEARANCE;
            text_x = text_x.max(clear_of_button);
        }

        let cap = self.surface.font_height(Font::Title, false).cast_signed();
        let text_y = bar_height.cast_signed() / 2 - cap / 2;
        self.surface.draw_text(
            Font::Title,
            Point::new(text_x, text_y),
            text,
            self.theme.title_text,
        )?;

        match self.title_button {
            TitleButton::None => Ok(()),
            TitleButton::Back => self.draw_back_button(false),
            TitleButton::Menu => self.draw_menu_button(false),
        }
    }

    fn title_button_height(&self) -> i32 {
        self.layout.title_bar_height.cast_signed() - 6
    }

    pub fn back_button_rect(&self) -> Rectangle {
        let height = self.title_button_height();
        let radius = height / 2;
        let label = self.surface.text_width(Font::Title, BACK_LABEL).cast_signed();
        let width = radius + ARROW_WIDTH * 2 + label + radius - 3;
        let y = (self.layout.title_bar_height.cast_signed() - height) / 2;
        Rectangle::new(
            Point::new(TITLE_BUTTON_X, y),
            Size::new(width.max(0).cast_unsigned(), height.max(0).cast_unsigned()),
        )
    }

    pub fn menu_button_rect(&self) -> Rectangle {
        let height = self.title_button_height();
        let width = height * 18 / 10;
        let y = (self.layout.title_bar_height.cast_signed() - height) / 2;
        Rectangle::new(
            Point::new(TITLE_BUTTON_X, y),
            Size::new(width.max(0).cast_unsigned(), height.max(0).cast_unsigned()),
        )
    }

    fn title_button_color(&self, pressed: bool) -> Rgb565 {
        if pressed {
            self.theme.title_button_selected
        } else {
            self.theme.title_button
        }
    }

    fn draw_back_button(&mut self, pressed: bool) -> Result<(), S::Error> {
        let rect = self.back_button_rect();
        let height = rect.size.height.cast_signed();
        let radius = height / 2;
        let Point { x, y } = rect.top_left;

        self.surface.fill_rounded_rect(
            rect,
            radius.cast_unsigned(),
            self.title_button_color(pressed),
        )?;

        let cap = self.surface.font_height(Font::Title, false).cast_signed();
        self.surface.draw_text(
            Font::Title,
            Point::new(
                x + radius + ARROW_WIDTH * 2 - 2,
                y + height / 2 - cap / 2 - 1,
            ),
            BACK_LABEL,
            self.theme.title_text,
        )?;

        let arrow_x = x + radius - 2;
        let arrow_y = y + radius - 1;
        self.surface.fill_triangle(
            Point::new(arrow_x, arrow_y),
            Point::new(arrow_x + ARROW_WIDTH, arrow_y - ARROW_WIDTH / 2),
            Point::new(arrow_x + ARROW_WIDTH, arrow_y + ARROW_WIDTH / 2),
            self.theme.button_text,
        )
    }

    fn draw_menu_button(&mut self, pressed: bool) -> Result<(), S::Error> {
        let rect = self.menu_button_rect();
        let width = rect.size.width.cast_signed();
        let height = rect.size.height.cast_signed();
        self.surface.fill_rounded_rect(
            rect,
            (height / 4).cast_unsigned(),
            self.title_button_color(pressed),
        )?;

        // three bars of a hamburger icon
        let bar_width = width / 2;
        let bar_x = rect.top_left.x + width / 2 - bar_width / 2;
        let middle_y = rect.top_left.y + height / 2 - 1;
        for offset in [-6, 0, 6] {
            self.surface.fill_rect(
                Rectangle::new(
                    Point::new(bar_x, middle_y + offset),
                    Size::new(bar_width.cast_unsigned(), 2),
                ),
                self.theme.button_text,
            )?;
        }
        Ok(())
    }

    /// Standard click contract for the title bar's Back button.
    ///
    /// Returns true once the button is released; always false when the
    /// title bar has no Back button.
    pub fn check_back_button_clicked(&mut self, event: &TouchEvent) -> Result<bool, S::Error> {
        if self.title_button != TitleButton::Back {
            return Ok(false);
        }
        let rect = self.back_button_rect();
        if event.is_inside(TouchEventKind::Pressed, &rect) {
            self.draw_back_button(true)?;
            return Ok(false);
        }
        if event.is_inside(TouchEventKind::Released, &rect) {
            self.draw_back_button(false)?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn check_menu_button_clicked(&mut self, event: &TouchEvent) -> Result<bool, S::Error> {
        if self.title_button != TitleButton::Menu {
            return Ok(false);
        }
        let rect = self.menu_button_rect();
        if event.is_inside(TouchEventKind::Pressed, &rect) {
            self.draw_menu_button(true)?;
            return Ok(false);
        }
        if event.is_inside(TouchEventKind::Released, &rect) {
            self.draw_menu_button(false)?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Draw a raised rectangular button with a one or two line label
    pub fn draw_button(
        &mut self,
        label: &str,
        rect: Rectangle,
        pressed: bool,
        style: &ButtonStyle,
    ) -> Result<(), S::Error> {
        let Point { x, y } = rect.top_left;
        let width = rect.size.width.cast_signed();
        let height = rect.size.height.cast_signed();

        self.surface
            .draw_line(Point::new(x, y + height - 1), Point::new(x, y), style.frame)?;
        self.surface
            .draw_line(Point::new(x, y), Point::new(x + width - 1, y), style.frame)?;
        self.surface.fill_rect(
            Rectangle::new(
                Point::new(x + 1, y + 1),
                rect.size.saturating_sub(Size::new(1, 1)),
            ),
            style.face(pressed),
        )?;

        let max_width = rect.size.width.saturating_sub(LABEL_MARGIN);
        let surface = &self.surface;
        let (first, second) = wrap_label(label, max_width, |text| {
            surface.text_width(Font::Button, text)
        });

        let cap = self.surface.font_height(Font::Button, false).cast_signed();
        let center_x = x + width / 2;
        let middle_y = y + height / 2;
        let font = Font::Button;
        match second {
            None => self.draw_text_centered(font, center_x, middle_y - cap / 2, first, style.text),
            Some(second) => {
                let first_y = middle_y - (4 + cap);
                self.draw_text_centered(font, center_x, first_y, first, style.text)?;
                self.draw_text_centered(font, center_x, middle_y + 2, second, style.text)
            }
        }
    }

    /// Draw `text` horizontally centered on `center_x` with its top at `top_y`
    pub fn draw_text_centered(
        &mut self,
        font: Font,
        center_x: i32,
        top_y: i32,
        text: &str,
        color: Rgb565,
    ) -> Result<(), S::Error> {
        let width = self.surface.text_width(font, text).cast_signed();
        self.surface
            .draw_text(font, Point::new(center_x - width / 2, top_y), text, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{DrawOp, RecordingSurface};

    fn canvas() -> Canvas<RecordingSurface> {
        Canvas::new(
            RecordingSurface::new(Size::new(320, 240)),
            Theme::blue(),
            LayoutConfig::default(),
        )
    }

    fn pressed(x: i32, y: i32) -> TouchEvent {
        TouchEvent::new(TouchEventKind::Pressed, Point::new(x, y))
    }

    fn released(x: i32, y: i32) -> TouchEvent {
        TouchEvent::new(TouchEventKind::Released, Point::new(x, y))
    }

    #[test]
    fn display_space_sits_below_title_bar() {
        let canvas = canvas();
        assert_eq!(
            canvas.display_space(),
            Rectangle::new(Point::new(1, 34), Size::new(318, 205))
        );
    }

    #[test]
    fn back_button_width_depends_on_label_width() {
        let canvas = canvas();
        // 28 high, radius 14, "Back" is 4 * 8 pixels in the recording font
        assert_eq!(
            canvas.back_button_rect(),
            Rectangle::new(Point::new(4, 3), Size::new(14 + 16 + 32 + 14 - 3, 28))
        );
        assert_eq!(canvas.menu_button_rect().size, Size::new(50, 28));
    }

    #[test]
    fn back_button_click_commits_on_release() {
        let mut canvas = canvas();
        canvas.draw_title_bar("Settings", TitleButton::Back).unwrap();

        assert!(!canvas.check_back_button_clicked(&pressed(10, 10)).unwrap());
        assert!(canvas.check_back_button_clicked(&released(10, 10)).unwrap());
        assert!(!canvas.check_back_button_clicked(&released(200, 10)).unwrap());
    }

    #[test]
    fn back_button_ignored_when_not_shown() {
        let mut canvas = canvas();
        canvas.draw_title_bar("Main", TitleButton::None).unwrap();
        assert!(!canvas.check_back_button_clicked(&released(10, 10)).unwrap());

        canvas.draw_title_bar("Main", TitleButton::Menu).unwrap();
        assert!(!canvas.check_back_button_clicked(&released(10, 10)).unwrap());
        assert!(canvas.check_menu_button_clicked(&released(10, 10)).unwrap());
    }

    #[test]
    fn title_text_clears_back_button() {
        let mut canvas = canvas();
        let long_title = "A very long title that would be centered left";
        canvas.draw_title_bar(long_title, TitleButton::Back).unwrap();

        let back = canvas.back_button_rect();
        let text_x = canvas
            .surface()
            .ops()
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { text, top_left, .. } if text == long_title => Some(top_left.x),
                _ => None,
            })
            .unwrap();
        assert_eq!(text_x, back.top_left.x + back.size.width.cast_signed() + 6);
    }

    #[test]
    fn title_message_keeps_title_for_redraw() {
        let mut canvas = canvas();
        canvas.draw_title_bar("Volume", TitleButton::Back).unwrap();
        canvas.draw_title_message("Out of range").unwrap();
        assert_eq!(canvas.title(), "Volume");
        assert_eq!(canvas.title_button(), TitleButton::Back);

        canvas.surface_mut().clear_ops();
        canvas.redraw_title_bar().unwrap();
        assert!(canvas.surface().drew_text("Volume"));
    }

    #[test]
    fn long_label_is_drawn_on_two_lines() {
        let mut canvas = canvas();
        let style = canvas.button_style();
        let rect = Rectangle::new(Point::new(0, 50), Size::new(100, 40));
        canvas
            .draw_button("Set the clock", rect, false, &style)
            .unwrap();

        let surface = canvas.surface();
        assert!(surface.drew_text("Set the"));
        assert!(surface.drew_text("clock"));
    }

    #[test]
    fn pressed_button_uses_selected_face() {
        let mut canvas = canvas();
        let style = canvas.button_style();
        let rect = Rectangle::new(Point::new(0, 50), Size::new(100, 40));
        canvas.draw_button("OK", rect, true, &style).unwrap();

        let face = Rectangle::new(Point::new(1, 51), Size::new(99, 39));
        assert!(canvas.surface().ops().contains(&DrawOp::FillRect {
            rect: face,
            color: style.face_selected,
        }));
    }
}
