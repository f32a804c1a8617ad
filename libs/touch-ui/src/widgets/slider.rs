//! Horizontal slider
//!
//! Unlike the other widgets, a slider follows the finger continuously. It
//! reads the live [`TouchSample`] every poll instead of the frozen position
//! carried by discrete events, and only moves when the touch started on
//! its ball.

use crate::canvas::Canvas;
use crate::fonts::Font;
use crate::layout::{SLIDER_BALL_RADIUS, SliderTrack};
use crate::surface::Surface;
use crate::touch::TouchSample;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;

/// Where the current continuous touch began, relative to the ball
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    /// Not touched
    #[default]
    Idle,
    /// The touch began on the ball; the ball follows the finger
    Captured,
    /// The touch began elsewhere and is ignored until released
    Missed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slider {
    /// Caption drawn above the slider; may be empty
    pub label: String,
    pub track: SliderTrack,
    pub value: i32,
    drag: DragState,
}

impl Slider {
    pub fn new(label: &str, track: SliderTrack, value: i32) -> Self {
        Self {
            label: label.to_string(),
            track,
            value: value.clamp(track.min.min(track.max), track.max.max(track.min)),
            drag: DragState::Idle,
        }
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Track the finger for one poll; returns true if the value changed.
    ///
    /// The first touched sample only decides whether the ball was grabbed.
    pub fn check_dragged<S: Surface>(
        &mut self,
        canvas: &mut Canvas<S>,
        sample: &TouchSample,
    ) -> Result<bool, S::Error> {
        if !sample.touched {
            self.drag = DragState::Idle;
            return Ok(false);
        }

        match self.drag {
            DragState::Idle => {
                let grab = self.track.capture_rect(self.value, canvas.screen_size());
                self.drag = if grab.contains(sample.point) {
                    log::trace!("slider '{}' captured at {:?}", self.label, sample.point);
                    DragState::Captured
                } else {
                    DragState::Missed
                };
                Ok(false)
            }
            DragState::Captured => {
                let next = self.track.value_at(sample.point.x);
                if next == self.value {
                    return Ok(false);
                }
                let background = canvas.theme().background;
                self.draw_ball(canvas, background)?;
                self.value = next;
                self.draw_track(canvas)?;
                Ok(true)
            }
            DragState::Missed => Ok(false),
        }
    }

    pub fn draw<S: Surface>(&self, canvas: &mut Canvas<S>) -> Result<(), S::Error> {
        self.draw_track(canvas)?;

        if !self.label.is_empty() {
            let text_height = canvas.surface().font_height(Font::Button, true).cast_signed();
            let color = canvas.theme().button_text;
            canvas.draw_text_centered(
                Font::Button,
                self.track.center.x,
                self.track.center.y - SLIDER_BALL_RADIUS.cast_signed() - (text_height + 3),
                &self.label,
                color,
            )?;
        }
        Ok(())
    }

    fn draw_ball<S: Surface>(&self, canvas: &mut Canvas<S>, color: Rgb565) -> Result<(), S::Error> {
        let center = Point::new(self.track.ball_x(self.value), self.track.center.y);
        canvas
            .surface_mut()
            .fill_circle(center, SLIDER_BALL_RADIUS, color)
    }

    fn draw_track<S: Surface>(&self, canvas: &mut Canvas<S>) -> Result<(), S::Error> {
        let color = canvas.theme().button;
        self.draw_ball(canvas, color)?;
        let half = self.track.width.cast_signed() / 2;
        let y = self.track.center.y;
        canvas.surface_mut().draw_line(
            Point::new(self.track.center.x - half, y),
            Point::new(self.track.center.x + half - 1, y),
            color,
        )
    }
}
