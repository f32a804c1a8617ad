use super::hit;
use crate::canvas::Canvas;
use crate::error::WidgetError;
use crate::fonts::Font;
use crate::layout::selection_cell_rect;
use crate::surface::Surface;
use crate::touch::{TouchEvent, TouchEventKind};
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

const MAX_CHOICES: usize = 4;

/// Row of one to four mutually exclusive choices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionBox {
    /// Caption drawn above the box; may be empty
    pub label: String,
    pub center: Point,
    pub size: Size,
    /// Index of the selected choice
    pub value: usize,
    choices: Vec<String>,
}

impl SelectionBox {
    pub fn new(
        label: &str,
        center: Point,
        size: Size,
        value: usize,
        choices: &[&str],
    ) -> Result<Self, WidgetError> {
        if choices.is_empty() || choices.len() > MAX_CHOICES {
            return Err(WidgetError::ChoiceCount(choices.len()));
        }
        Ok(Self {
            label: label.to_string(),
            center,
            size,
            value: value.min(choices.len() - 1),
            choices: choices.iter().map(ToString::to_string).collect(),
        })
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn selected(&self) -> &str {
        self.choices.get(self.value).map_or("", String::as_str)
    }

    pub fn cell_rect(&self, cell: usize) -> Option<Rectangle> {
        selection_cell_rect(self.center, self.size, self.choices.len(), cell)
    }

    /// Handle one event on the choice cells.
    ///
    /// A press selects the touched cell and highlights it; returns true only
    /// if that changed the selection.
    pub fn check_touched<S: Surface>(
        &mut self,
        canvas: &mut Canvas<S>,
        event: &TouchEvent,
    ) -> Result<bool, S::Error> {
        for cell in 0..self.choices.len() {
            let Some(rect) = self.cell_rect(cell) else {
                continue;
            };
            match hit(event, &rect) {
                Some(TouchEventKind::Pressed) => {
                    let previous = self.value;
                    self.value = cell;
                    self.draw_cells(canvas, true)?;
                    if previous != cell {
                        log::debug!("selection box '{}' -> {}", self.label, self.selected());
                    }
                    return Ok(previous != cell);
                }
                Some(TouchEventKind::Released) => {
                    self.draw_cells(canvas, false)?;
                    return Ok(false);
                }
                _ => {}
            }
        }
        Ok(false)
    }

    pub fn draw<S: Surface>(&self, canvas: &mut Canvas<S>) -> Result<(), S::Error> {
        let Some(first) = self.cell_rect(0) else {
            return Ok(());
        };
        let cells = u32::try_from(self.choices.len()).unwrap_or(1);
        let overall = first.size.width * cells + 2;
        let outline = Rectangle::new(
            first.top_left - Point::new(1, 1),
            Size::new(overall, first.size.height + 2),
        );
        let theme = *canvas.theme();
        canvas.surface_mut().draw_rect(outline, theme.button)?;

        self.draw_cells(canvas, false)?;

        if !self.label.is_empty() {
            let text_height = canvas.surface().font_height(Font::Button, true).cast_signed();
            canvas.draw_text_centered(
                Font::Button,
                outline.top_left.x + overall.cast_signed() / 2,
                first.top_left.y - (text_height + 2),
                &self.label,
                theme.button_text,
            )?;
        }
        Ok(())
    }

    fn draw_cells<S: Surface>(&self, canvas: &mut Canvas<S>, pressed: bool) -> Result<(), S::Error> {
        (0..self.choices.len()).try_for_each(|cell| self.draw_cell(canvas, cell, pressed))
    }

    fn draw_cell<S: Surface>(
        &self,
        canvas: &mut Canvas<S>,
        cell: usize,
        pressed: bool,
    ) -> Result<(), S::Error> {
        let Some(rect) = self.cell_rect(cell) else {
            return Ok(());
        };
        let theme = *canvas.theme();
        let fill = match (cell == self.value, pressed) {
            (true, true) => theme.button_selected,
            (true, false) => theme.button,
            (false, _) => theme.background,
        };

        let surface = canvas.surface_mut();
        surface.draw_rect(rect, theme.button)?;
        surface.fill_rect(
            Rectangle::new(
                rect.top_left + Point::new(1, 1),
                rect.size.saturating_sub(Size::new(2, 2)),
            ),
            fill,
        )?;

        let cap = canvas.surface().font_height(Font::Button, false).cast_signed();
        canvas.draw_text_centered(
            Font::Button,
            rect.center().x,
            self.center.y - cap / 2,
            &self.choices[cell],
            theme.button_text,
        )
    }
}
