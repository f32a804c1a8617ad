//! Geometry for menus and composite widgets
//!
//! Everything here is a pure function of its inputs. Rectangles are
//! recomputed from the widget description whenever they are needed, so the
//! drawn geometry and the hit-test geometry can never drift apart.

use crate::config::LayoutConfig;
use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

/// Radius of a slider's draggable ball
pub const SLIDER_BALL_RADIUS: u32 = 10;
// Extra slop around the ball that still counts as grabbing it
const SLIDER_CAPTURE_MARGIN: i32 = 2;

// Number box parts never shrink below this width
const NUMBER_BOX_MIN_PART: i32 = 30;

/// Rectangle of `size` whose center is `center`.
///
/// Odd sizes put the extra pixel on the right/bottom, matching how button
/// hit boxes have always been computed.
pub fn centered_rect(center: Point, size: Size) -> Rectangle {
    let half = Point::new(
        size.width.cast_signed() / 2,
        size.height.cast_signed() / 2,
    );
    Rectangle::new(center - half, size)
}

fn sized(x: i32, y: i32, width: i32, height: i32) -> Rectangle {
    Rectangle::new(
        Point::new(x, y),
        Size::new(width.max(0).cast_unsigned(), height.max(0).cast_unsigned()),
    )
}

/// Number of button columns in a menu grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Columns {
    #[default]
    One,
    Two,
    Three,
    Four,
}

impl Columns {
    /// Any count outside 1..=4 falls back to a single column
    pub fn from_count(count: u32) -> Self {
        match count {
            1 => Columns::One,
            2 => Columns::Two,
            3 => Columns::Three,
            4 => Columns::Four,
            other => {
                log::warn!("unsupported menu column count {other}, using 1");
                Columns::One
            }
        }
    }

    pub fn get(self) -> u32 {
        match self {
            Columns::One => 1,
            Columns::Two => 2,
            Columns::Three => 3,
            Columns::Four => 4,
        }
    }
}

/// Rectangle of menu button `index` in a grid of `count` buttons.
///
/// Buttons share one size. Spare space left by integer division is split
/// evenly on both sides, and a short last row is centered on its own button
/// count. Returns `None` if `index` is out of range, the area is too
/// small to hold the grid, or the geometry does not fit in `i32`.
pub fn menu_button_rect(
    count: usize,
    columns: Columns,
    index: usize,
    area: Rectangle,
    layout: &LayoutConfig,
) -> Option<Rectangle> {
    if index >= count {
        return None;
    }
    let count = i32::try_from(count).ok()?;
    let index = i32::try_from(index).ok()?;
    let cols = columns.get().cast_signed();
    let rows = (count - 1) / cols + 1;

    let width = i32::try_from(area.size.width).ok()?;
    let height = i32::try_from(area.size.height).ok()?;
    let side = i32::try_from(layout.menu_side_padding).ok()?;
    let vertical = i32::try_from(layout.menu_vertical_padding).ok()?;
    let gap = i32::try_from(layout.menu_gap).ok()?;

    let button_width = width
        .checked_sub(side.checked_mul(2)?)?
        .checked_sub(gap.checked_mul(cols - 1)?)?
        / cols;
    let button_height = height
        .checked_sub(vertical.checked_mul(2)?)?
        .checked_sub(gap.checked_mul(rows - 1)?)?
        / rows;
    if button_width <= 0 || button_height <= 0 {
        return None;
    }
    let top_padding = (height - button_height * rows - gap * (rows - 1)) / 2;

    let row = index / cols;
    let column = index % cols;
    let on_this_row = if row != rows - 1 || count % cols == 0 {
        cols
    } else {
        count % cols
    };

    // every offset below stays inside the area, only the origin can overflow
    let left = (width - button_width * on_this_row - gap * (on_this_row - 1)) / 2;
    let x = area
        .top_left
        .x
        .checked_add(left + (button_width + gap) * column)?;
    let y = area
        .top_left
        .y
        .checked_add(top_padding + (button_height + gap) * row)?;

    Some(sized(x, y, button_width, button_height))
}

/// The three touch regions of a number box, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberBoxRegions {
    pub down: Rectangle,
    pub number: Rectangle,
    pub up: Rectangle,
}

/// Split a number box into its down button, number field and up button.
///
/// The down button is always the leftmost part and the up button the
/// rightmost.
///
/// Each button is 1.6 times the box height, capped at 40% of the width;
/// buttons and the number field are never narrower than 30 pixels, even if
/// that makes the parts overflow the declared width.
pub fn number_box_regions(center: Point, size: Size) -> NumberBoxRegions {
    let width = size.width.cast_signed();
    let height = size.height.cast_signed();

    let button_width = (height * 16 / 10)
        .min(width * 4 / 10)
        .max(NUMBER_BOX_MIN_PART);
    let number_width = (width - 2 * button_width).max(NUMBER_BOX_MIN_PART);

    let left = center.x - width / 2;
    let top = center.y - height / 2;
    let number_x = left + button_width;
    let up_x = number_x + number_width;

    NumberBoxRegions {
        down: sized(left, top, button_width, height),
        number: sized(number_x, top, number_width, height),
        up: sized(up_x, top, button_width, height),
    }
}

/// Rectangle of choice `cell` in a selection box with `choices` cells.
///
/// Cells share the width evenly, less a 3 pixel border, and the row of cells
/// is centered on the box.
pub fn selection_cell_rect(
    center: Point,
    size: Size,
    choices: usize,
    cell: usize,
) -> Option<Rectangle> {
    if choices == 0 || cell >= choices {
        return None;
    }
    let choices = i32::try_from(choices).ok()?;
    let cell = i32::try_from(cell).ok()?;

    let cell_width = (size.width.cast_signed() - 3) / choices;
    let overall = cell_width * choices;
    let cell_height = size.height.cast_signed() - 3;

    let x = center.x - overall / 2 + cell * cell_width;
    let y = center.y - cell_height / 2;
    Some(sized(x, y, cell_width, cell_height))
}

/// Geometry and value range of a horizontal slider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderTrack {
    pub center: Point,
    pub width: u32,
    pub min: i32,
    pub max: i32,
    pub step: i32,
}

impl SliderTrack {
    pub fn left(&self) -> i32 {
        self.center.x - self.width.cast_signed() / 2
    }

    /// X position of the ball's center for `value`
    #[allow(clippy::cast_possible_truncation)]
    pub fn ball_x(&self, value: i32) -> i32 {
        if self.max == self.min {
            return self.left();
        }
        let fraction = (f64::from(value) - f64::from(self.min))
            / (f64::from(self.max) - f64::from(self.min));
        self.left() + (fraction * f64::from(self.width)).round() as i32
    }

    pub fn ball_rect(&self, value: i32) -> Rectangle {
        let diameter = SLIDER_BALL_RADIUS * 2 + 1;
        centered_rect(
            Point::new(self.ball_x(value), self.center.y),
            Size::new(diameter, diameter),
        )
    }

    /// Region that grabs the ball, clipped to the screen
    pub fn capture_rect(&self, value: i32, screen: Size) -> Rectangle {
        let reach = SLIDER_BALL_RADIUS.cast_signed() + SLIDER_CAPTURE_MARGIN;
        let x = self.ball_x(value);
        let right_edge = screen.width.cast_signed() - 1;
        let bottom_edge = screen.height.cast_signed() - 1;

        let left = (x - reach).max(0);
        let right = (x + reach).min(right_edge);
        let top = (self.center.y - reach).max(0);
        let bottom = (self.center.y + reach).min(bottom_edge);
        if right < left || bottom < top {
            return Rectangle::zero();
        }
        Rectangle::with_corners(Point::new(left, top), Point::new(right, bottom))
    }

    /// Value under screen column `x`, clamped to the range and snapped to
    /// the nearest multiple of `step`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn value_at(&self, x: i32) -> i32 {
        let (min, max) = (i64::from(self.min), i64::from(self.max));
        if self.width == 0 || max <= min {
            return self.min;
        }
        let position = i64::from(x - self.left());
        let mut value = (position * (max - min) / i64::from(self.width) + min).clamp(min, max);

        if self.step > 0 {
            let step = i64::from(self.step);
            value = ((value + step / 2).div_euclid(step) * step).clamp(min, max);
        }
        value as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rectangle {
        // display space of a 320x240 screen under a 34 pixel title bar
        Rectangle::new(Point::new(1, 34), Size::new(318, 205))
    }

    fn grid(count: usize, columns: Columns) -> Vec<Rectangle> {
        (0..count)
            .map(|i| menu_button_rect(count, columns, i, area(), &LayoutConfig::default()).unwrap())
            .collect()
    }

    #[test]
    fn five_entries_in_two_columns_center_last_row() {
        let rects = grid(5, Columns::Two);

        assert_eq!(rects[0], Rectangle::new(Point::new(11, 44), Size::new(144, 55)));
        assert_eq!(rects[1], Rectangle::new(Point::new(165, 44), Size::new(144, 55)));
        assert_eq!(rects[2].top_left, Point::new(11, 109));
        assert_eq!(rects[3].top_left, Point::new(165, 109));
        // single button on the third row, centered on one button width
        assert_eq!(rects[4], Rectangle::new(Point::new(88, 174), Size::new(144, 55)));
    }

    #[test]
    fn single_column_spans_width_less_padding() {
        let rects = grid(3, Columns::One);
        for rect in &rects {
            assert_eq!(rect.top_left.x, 11);
            assert_eq!(rect.size.width, 298);
        }
        assert_eq!(rects[1].top_left.y - rects[0].top_left.y, 55 + 10);
    }

    #[test]
    fn spare_vertical_space_is_split_evenly() {
        // 205 - 20 - 10 = 175 over 2 rows -> 87 high, one spare pixel
        let rects = grid(4, Columns::Two);
        assert_eq!(rects[0].size.height, 87);
        assert_eq!(rects[0].top_left.y, 34 + 10);
        assert_eq!(rects[2].top_left.y, 34 + 10 + 87 + 10);
    }

    #[test]
    fn index_out_of_range_has_no_rect() {
        let layout = LayoutConfig::default();
        assert!(menu_button_rect(3, Columns::Two, 3, area(), &layout).is_none());
        assert!(menu_button_rect(0, Columns::Two, 0, area(), &layout).is_none());
    }

    #[test]
    fn area_too_small_has_no_rect() {
        let tiny = Rectangle::new(Point::zero(), Size::new(15, 15));
        assert!(menu_button_rect(2, Columns::Two, 0, tiny, &LayoutConfig::default()).is_none());
    }

    #[test]
    fn huge_padding_has_no_rect() {
        let area = Rectangle::new(Point::new(1, 34), Size::new(318, 205));
        let layout = LayoutConfig {
            menu_side_padding: 1_500_000_000,
            ..LayoutConfig::default()
        };
        assert!(menu_button_rect(3, Columns::Two, 0, area, &layout).is_none());

        let layout = LayoutConfig {
            menu_gap: u32::MAX,
            ..LayoutConfig::default()
        };
        assert!(menu_button_rect(3, Columns::Two, 0, area, &layout).is_none());
    }

    #[test]
    fn column_counts_outside_range_default_to_one() {
        assert_eq!(Columns::from_count(0), Columns::One);
        assert_eq!(Columns::from_count(5), Columns::One);
        assert_eq!(Columns::from_count(3).get(), 3);
    }

    #[test]
    fn number_box_splits_into_three_regions() {
        let regions = number_box_regions(Point::new(160, 100), Size::new(200, 40));
        // 40 * 1.6 = 64, under the 80 pixel cap
        assert_eq!(regions.down, Rectangle::new(Point::new(60, 80), Size::new(64, 40)));
        assert_eq!(regions.number, Rectangle::new(Point::new(124, 80), Size::new(72, 40)));
        assert_eq!(regions.up, Rectangle::new(Point::new(196, 80), Size::new(64, 40)));
    }

    #[test]
    fn number_box_buttons_capped_at_forty_percent() {
        let regions = number_box_regions(Point::new(100, 100), Size::new(100, 60));
        assert_eq!(regions.down.size.width, 40);
        assert_eq!(regions.number.size.width, 30);
    }

    #[test]
    fn number_box_parts_have_minimum_width() {
        let regions = number_box_regions(Point::new(50, 50), Size::new(60, 10));
        assert_eq!(regions.down.size.width, 30);
        assert_eq!(regions.number.size.width, 30);
        assert_eq!(regions.up.size.width, 30);
    }

    #[test]
    fn selection_cells_share_width_evenly() {
        let center = Point::new(160, 120);
        let size = Size::new(203, 33);
        let cells: Vec<_> = (0..4)
            .map(|i| selection_cell_rect(center, size, 4, i).unwrap())
            .collect();

        assert_eq!(cells[0], Rectangle::new(Point::new(60, 105), Size::new(50, 30)));
        assert_eq!(cells[3].top_left.x, 210);
        assert!(selection_cell_rect(center, size, 4, 4).is_none());
        assert!(selection_cell_rect(center, size, 0, 0).is_none());
    }

    fn track() -> SliderTrack {
        SliderTrack {
            center: Point::new(160, 120),
            width: 200,
            min: 0,
            max: 100,
            step: 5,
        }
    }

    #[test]
    fn slider_ball_interpolates_across_width() {
        let track = track();
        assert_eq!(track.ball_x(0), 60);
        assert_eq!(track.ball_x(50), 160);
        assert_eq!(track.ball_x(100), 260);
        assert_eq!(track.ball_rect(50).center(), Point::new(160, 120));
    }

    #[test]
    fn slider_value_snaps_to_step_and_clamps() {
        let track = track();
        assert_eq!(track.value_at(60), 0);
        assert_eq!(track.value_at(160), 50);
        // 0.5 * 73 = 36 -> 35
        assert_eq!(track.value_at(133), 35);
        // 0.5 * 76 = 38 -> snaps up to 40
        assert_eq!(track.value_at(136), 40);
        assert_eq!(track.value_at(-500), 0);
        assert_eq!(track.value_at(1000), 100);
    }

    #[test]
    fn slider_snapping_never_leaves_range() {
        let track = SliderTrack {
            min: 3,
            max: 17,
            step: 10,
            ..track()
        };
        for x in 0..320 {
            let value = track.value_at(x);
            assert!((3..=17).contains(&value), "x={x} gave {value}");
        }
    }

    #[test]
    fn degenerate_slider_ranges_do_not_divide_by_zero() {
        let flat = SliderTrack {
            min: 7,
            max: 7,
            ..track()
        };
        assert_eq!(flat.ball_x(7), flat.left());
        assert_eq!(flat.value_at(200), 7);

        let narrow = SliderTrack { width: 0, ..track() };
        assert_eq!(narrow.value_at(200), 0);
    }

    #[test]
    fn capture_rect_is_clamped_to_screen() {
        let track = SliderTrack {
            center: Point::new(5, 3),
            width: 10,
            ..track()
        };
        let rect = track.capture_rect(0, Size::new(320, 240));
        assert_eq!(rect.top_left, Point::zero());
        assert_eq!(rect.bottom_right(), Some(Point::new(12, 15)));
    }

    #[test]
    fn centered_rect_puts_extra_pixel_right() {
        let rect = centered_rect(Point::new(10, 10), Size::new(5, 4));
        assert_eq!(rect.top_left, Point::new(8, 8));
        assert_eq!(rect.bottom_right(), Some(Point::new(12, 11)));
    }
}
