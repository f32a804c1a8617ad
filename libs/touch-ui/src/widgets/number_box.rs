use super::hit;
use crate::canvas::Canvas;
use crate::error::WidgetError;
use crate::fonts::Font;
use crate::layout::{NumberBoxRegions, number_box_regions};
use crate::surface::Surface;
use crate::touch::{TouchEvent, TouchEventKind};
use core::fmt::{Debug, Display};
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

// Repeats needed before the step grows by one more multiple
const ACCELERATION_REPEATS: u32 = 16;
const FRAME: i32 = 3;
const ARROW_HALF_WIDTH: i32 = 5;

/// Numeric types a [`NumberBox`] can step through
pub trait NumberValue: Copy + PartialOrd + Debug + Display {
    const ZERO: Self;

    /// `self` moved by `count` steps, negative counts moving down
    #[must_use]
    fn stepped(self, step: Self, count: i32) -> Self;

    fn format(self, decimals: usize) -> String;
}

impl NumberValue for i32 {
    const ZERO: Self = 0;

    fn stepped(self, step: Self, count: i32) -> Self {
        self.saturating_add(step.saturating_mul(count))
    }

    fn format(self, _decimals: usize) -> String {
        self.to_string()
    }
}

impl NumberValue for f32 {
    const ZERO: Self = 0.0;

    #[allow(clippy::cast_precision_loss)]
    fn stepped(self, step: Self, count: i32) -> Self {
        self + step * count as f32
    }

    fn format(self, decimals: usize) -> String {
        format!("{self:.decimals$}")
    }
}

/// Up/down stepper with a number field between its two buttons.
///
/// Holding a button auto-repeats, and the step grows by one multiple for
/// every 16 repeats so large ranges can be crossed quickly.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberBox<T> {
    /// Caption drawn above the number field; may be empty
    pub label: String,
    pub center: Point,
    pub size: Size,
    pub value: T,
    pub min: T,
    pub max: T,
    pub step: T,
    /// Digits after the decimal point, for floating point boxes
    pub decimals: usize,
    repeat_count: u32,
}

pub type NumberBoxFloat = NumberBox<f32>;

impl<T: NumberValue> NumberBox<T> {
    pub fn new(
        label: &str,
        center: Point,
        size: Size,
        value: T,
        min: T,
        max: T,
        step: T,
    ) -> Result<Self, WidgetError> {
        if min > max {
            return Err(WidgetError::Range {
                min: min.to_string(),
                max: max.to_string(),
            });
        }
        Ok(Self {
            label: label.to_string(),
            center,
            size,
            value,
            min,
            max,
            step,
            decimals: 0,
            repeat_count: 0,
        })
    }

    #[must_use]
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn regions(&self) -> NumberBoxRegions {
        number_box_regions(self.center, self.size)
    }

    /// Auto-repeats seen since the current press
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    pub fn step_multiplier(&self) -> i32 {
        i32::try_from(self.repeat_count / ACCELERATION_REPEATS + 1).unwrap_or(i32::MAX)
    }

    /// Amount the next repeat will move the value by
    pub fn effective_step(&self) -> T {
        T::ZERO.stepped(self.step, self.step_multiplier())
    }

    pub fn formatted(&self) -> String {
        self.value.format(self.decimals)
    }

    /// Move the value by `count` steps, clamped to the range.
    ///
    /// Returns true if the value changed.
    fn apply(&mut self, count: i32) -> bool {
        let mut next = self.value.stepped(self.step, count);
        if count > 0 && next > self.max {
            next = self.max;
        }
        if count < 0 && next < self.min {
            next = self.min;
        }
        if count == 0 || next == self.value {
            return false;
        }
        self.value = next;
        true
    }

    /// Handle one event on the up and down buttons.
    ///
    /// Presses and repeats step the value; returns true if it changed.
    pub fn check_touched<S: Surface>(
        &mut self,
        canvas: &mut Canvas<S>,
        event: &TouchEvent,
    ) -> Result<bool, S::Error> {
        let regions = self.regions();
        for (rect, direction) in [(regions.down, -1), (regions.up, 1)] {
            let Some(kind) = hit(event, &rect) else {
                continue;
            };
            let changed = match kind {
                TouchEventKind::Pressed => {
                    self.draw_arrow(canvas, rect, direction, true)?;
                    self.repeat_count = 0;
                    self.apply(direction)
                }
                TouchEventKind::Repeating => {
                    self.repeat_count = self.repeat_count.saturating_add(1);
                    self.apply(direction * self.step_multiplier())
                }
                TouchEventKind::Released => {
                    self.draw_arrow(canvas, rect, direction, false)?;
                    false
                }
                TouchEventKind::None => false,
            };
            if changed {
                log::debug!("number box '{}' -> {}", self.label, self.formatted());
                self.draw_number(canvas)?;
            }
            return Ok(changed);
        }
        Ok(false)
    }

    pub fn draw<S: Surface>(&self, canvas: &mut Canvas<S>) -> Result<(), S::Error> {
        let NumberBoxRegions { down, number, up } = self.regions();
        let left = down.top_left.x;
        let top = down.top_left.y;
        let height = down.size.height.cast_signed();
        let overall = (down.size.width + number.size.width + up.size.width).cast_signed();
        let right = left + overall;
        let color = canvas.theme().button;
        let frame = canvas.theme().button_frame;

        let bar = |x: i32, y: i32, w: i32, h: i32| {
            Rectangle::new(
                Point::new(x, y),
                Size::new(w.max(0).cast_unsigned(), h.max(0).cast_unsigned()),
            )
        };
        let surface = canvas.surface_mut();
        surface.fill_rect(bar(left, top, overall, FRAME), color)?;
        surface.fill_rect(bar(left, top + height - FRAME, overall, FRAME), color)?;
        surface.fill_rect(bar(left, top, FRAME, height), color)?;
        surface.fill_rect(bar(number.top_left.x - FRAME, top, FRAME, height), color)?;
        surface.fill_rect(bar(up.top_left.x, top, FRAME, height), color)?;
        surface.fill_rect(bar(right - FRAME, top, FRAME, height), color)?;

        // raised edge
        surface.draw_line(
            Point::new(left - 1, top + height - 1),
            Point::new(left - 1, top - 1),
            frame,
        )?;
        surface.draw_line(
            Point::new(left - 1, top - 1),
            Point::new(right - 1, top - 1),
            frame,
        )?;

        self.draw_arrow(canvas, up, 1, false)?;
        self.draw_arrow(canvas, down, -1, false)?;
        self.draw_number(canvas)?;

        if !self.label.is_empty() {
            let text_height = canvas.surface().font_height(Font::Button, true).cast_signed();
            let text = canvas.theme().button_text;
            canvas.draw_text_centered(
                Font::Button,
                number.center().x,
                top - (text_height + 2),
                &self.label,
                text,
            )?;
        }
        Ok(())
    }

    fn draw_arrow<S: Surface>(
        &self,
        canvas: &mut Canvas<S>,
        rect: Rectangle,
        direction: i32,
        pressed: bool,
    ) -> Result<(), S::Error> {
        let theme = *canvas.theme();
        let face = if pressed {
            theme.button_selected
        } else {
            theme.button
        };
        let inner = Rectangle::new(
            rect.top_left + Point::new(FRAME, FRAME),
            rect.size.saturating_sub(Size::new(6, 6)),
        );
        canvas.surface_mut().fill_rect(inner, face)?;

        let cx = rect.top_left.x + rect.size.width.cast_signed() / 2;
        let cy = self.center.y;
        let h = ARROW_HALF_WIDTH;
        let (a, b, c) = if direction < 0 {
            (
                Point::new(cx - h, cy - h),
                Point::new(cx + h, cy - h),
                Point::new(cx, cy + h),
            )
        } else {
            (
                Point::new(cx, cy - h),
                Point::new(cx - h, cy + h),
                Point::new(cx + h, cy + h),
            )
        };
        canvas.surface_mut().fill_triangle(a, b, c, theme.button_text)
    }

    fn draw_number<S: Surface>(&self, canvas: &mut Canvas<S>) -> Result<(), S::Error> {
        let number = self.regions().number;
        let cap = canvas.surface().font_height(Font::Number, false);
        let text_y = self.center.y - cap.cast_signed() / 2;
        let theme = *canvas.theme();

        let blank = Rectangle::new(
            Point::new(number.top_left.x + FRAME, text_y),
            Size::new(number.size.width.saturating_sub(6), cap + 1),
        );
        canvas.surface_mut().fill_rect(blank, theme.background)?;
        canvas.draw_text_centered(
            Font::Number,
            number.center().x,
            text_y,
            &self.formatted(),
            theme.button_text,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LayoutConfig;
    use crate::test_utils::RecordingSurface;
    use crate::theme::Theme;

    fn canvas() -> Canvas<RecordingSurface> {
        Canvas::new(
            RecordingSurface::new(Size::new(320, 240)),
            Theme::blue(),
            LayoutConfig::default(),
        )
    }

    fn volume() -> NumberBox<i32> {
        NumberBox::new("Volume", Point::new(160, 120), Size::new(200, 40), 10, 0, 20, 1).unwrap()
    }

    fn on(kind: TouchEventKind, rect: Rectangle) -> TouchEvent {
        TouchEvent::new(kind, rect.center())
    }

    #[test]
    fn down_button_is_on_the_left() {
        let mut canvas = canvas();
        let mut number = volume();
        let regions = number.regions();
        assert!(regions.down.top_left.x < regions.up.top_left.x);

        assert!(number
            .check_touched(&mut canvas, &on(TouchEventKind::Pressed, regions.down))
            .unwrap());
        assert_eq!(number.value, 9);
        assert!(canvas.surface().drew_text("9"));
    }

    #[test]
    fn press_steps_once_and_release_does_not() {
        let mut canvas = canvas();
        let mut number = volume();
        let up = number.regions().up;

        assert!(number.check_touched(&mut canvas, &on(TouchEventKind::Pressed, up)).unwrap());
        assert!(!number.check_touched(&mut canvas, &on(TouchEventKind::Released, up)).unwrap());
        assert_eq!(number.value, 11);
    }

    #[test]
    fn step_doubles_after_sixteen_repeats() {
        let mut canvas = canvas();
        let mut number = NumberBox::new("", Point::new(160, 120), Size::new(200, 40), 10, 0, 200, 1)
            .unwrap();
        let up = number.regions().up;

        number.check_touched(&mut canvas, &on(TouchEventKind::Pressed, up)).unwrap();
        assert_eq!(number.value, 11);
        for _ in 0..15 {
            number.check_touched(&mut canvas, &on(TouchEventKind::Repeating, up)).unwrap();
        }
        assert_eq!(number.repeat_count(), 15);
        assert_eq!(number.value, 26);
        assert_eq!(number.effective_step(), 1);

        number.check_touched(&mut canvas, &on(TouchEventKind::Repeating, up)).unwrap();
        assert_eq!(number.repeat_count(), 16);
        assert_eq!(number.effective_step(), 2);
        assert_eq!(number.value, 28);
    }

    #[test]
    fn new_press_resets_acceleration() {
        let mut canvas = canvas();
        let mut number = NumberBox::new("", Point::new(160, 120), Size::new(200, 40), 0, 0, 1000, 1)
            .unwrap();
        let up = number.regions().up;
        number.check_touched(&mut canvas, &on(TouchEventKind::Pressed, up)).unwrap();
        for _ in 0..40 {
            number.check_touched(&mut canvas, &on(TouchEventKind::Repeating, up)).unwrap();
        }
        assert_eq!(number.step_multiplier(), 3);

        number.check_touched(&mut canvas, &on(TouchEventKind::Released, up)).unwrap();
        number.check_touched(&mut canvas, &on(TouchEventKind::Pressed, up)).unwrap();
        assert_eq!(number.repeat_count(), 0);
        assert_eq!(number.step_multiplier(), 1);
    }

    #[test]
    fn value_is_clamped_and_unchanged_at_limit() {
        let mut canvas = canvas();
        let mut number = NumberBox::new("", Point::new(160, 120), Size::new(200, 40), 19, 0, 20, 5)
            .unwrap();
        let up = number.regions().up;

        assert!(number.check_touched(&mut canvas, &on(TouchEventKind::Pressed, up)).unwrap());
        assert_eq!(number.value, 20);
        assert!(!number.check_touched(&mut canvas, &on(TouchEventKind::Repeating, up)).unwrap());
        assert_eq!(number.value, 20);
    }

    #[test]
    fn touching_number_field_does_nothing() {
        let mut canvas = canvas();
        let mut number = volume();
        let field = number.regions().number;
        assert!(!number.check_touched(&mut canvas, &on(TouchEventKind::Pressed, field)).unwrap());
        assert_eq!(number.value, 10);
        assert!(canvas.surface().ops().is_empty());
    }

    #[test]
    fn float_box_formats_with_decimals() {
        let mut canvas = canvas();
        let mut number: NumberBoxFloat =
            NumberBox::new("Gain", Point::new(160, 120), Size::new(200, 40), 1.0, 0.0, 2.0, 0.25)
                .unwrap()
                .with_decimals(2);
        let up = number.regions().up;
        number.check_touched(&mut canvas, &on(TouchEventKind::Pressed, up)).unwrap();
        assert!((number.value - 1.25).abs() < f32::EPSILON);
        assert!(canvas.surface().drew_text("1.25"));
    }

    #[test]
    fn inverted_range_is_rejected() {
        let result = NumberBox::new("", Point::zero(), Size::new(100, 30), 0, 10, 5, 1);
        assert!(matches!(result, Err(WidgetError::Range { .. })));
    }

    #[test]
    fn full_draw_shows_label_and_value() {
        let mut canvas = canvas();
        volume().draw(&mut canvas).unwrap();
        assert!(canvas.surface().drew_text("Volume"));
        assert!(canvas.surface().drew_text("10"));
    }
}
