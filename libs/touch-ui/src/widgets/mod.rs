//! Touch widgets
//!
//! Widgets are plain descriptors owned by the application. Each `check_*`
//! method takes the single event produced by the current poll, hit-tests it
//! against the widget's rectangle, updates the widget and redraws it on the
//! canvas. Nothing is cached between calls except a widget's own value and
//! interaction state.

mod button;
mod image_button;
mod number_box;
mod selection_box;
mod slider;

pub use button::Button;
pub use image_button::ImageButton;
pub use number_box::{NumberBox, NumberBoxFloat, NumberValue};
pub use selection_box::SelectionBox;
pub use slider::{DragState, Slider};

use crate::canvas::Canvas;
use crate::surface::Surface;
use crate::touch::{TouchEvent, TouchEventKind};
use embedded_graphics::primitives::Rectangle;

/// Kind of `event` if it landed inside `rect`
pub(crate) fn hit(event: &TouchEvent, rect: &Rectangle) -> Option<TouchEventKind> {
    (!event.is_none() && rect.contains(event.point)).then_some(event.kind)
}

/// A widget drawn as one raised button that can be shown pressed.
///
/// Implementors get the three standard press contracts for free.
pub trait Pressable {
    fn rect(&self) -> Rectangle;

    fn draw<S: Surface>(&self, canvas: &mut Canvas<S>, pressed: bool) -> Result<(), S::Error>;

    /// True once the button is released over itself.
    ///
    /// A press highlights the button without committing, so a touch that
    /// starts on the button can still be abandoned.
    fn check_clicked<S: Surface>(
        &self,
        canvas: &mut Canvas<S>,
        event: &TouchEvent,
    ) -> Result<bool, S::Error> {
        match hit(event, &self.rect()) {
            Some(TouchEventKind::Pressed) => {
                self.draw(canvas, true)?;
                Ok(false)
            }
            Some(TouchEventKind::Released) => {
                self.draw(canvas, false)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// True on the press and on every auto-repeat while held
    fn check_auto_repeat<S: Surface>(
        &self,
        canvas: &mut Canvas<S>,
        event: &TouchEvent,
    ) -> Result<bool, S::Error> {
        match hit(event, &self.rect()) {
            Some(TouchEventKind::Pressed) => {
                self.draw(canvas, true)?;
                Ok(true)
            }
            Some(TouchEventKind::Repeating) => Ok(true),
            Some(TouchEventKind::Released) => {
                self.draw(canvas, false)?;
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    /// True only on the press, once per touch
    fn check_first_touched<S: Surface>(
        &self,
        canvas: &mut Canvas<S>,
        event: &TouchEvent,
    ) -> Result<bool, S::Error> {
        match hit(event, &self.rect()) {
            Some(TouchEventKind::Pressed) => {
                self.draw(canvas, true)?;
                Ok(true)
            }
            Some(TouchEventKind::Released) => {
                self.draw(canvas, false)?;
                Ok(false)
            }
            _ => Ok(false),
        }
    }
}
