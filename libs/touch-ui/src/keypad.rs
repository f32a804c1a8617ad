//! Full screen numeric keypad
//!
//! Laid out for a 320x240 landscape screen: a 3x4 digit pad on the left, the
//! number field with OK, Cancel and delete buttons on the right.

use crate::canvas::TitleButton;
use crate::clock::Clock;
use crate::fonts::Font;
use crate::surface::Surface;
use crate::touch::TouchSampler;
use crate::ui::{MESSAGE_MS, TouchUi};
use crate::widgets::{Button, Pressable};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::{Point, RgbColor, Size};
use embedded_graphics::primitives::Rectangle;

/// Longest entry the number field accepts
pub const MAX_CHARACTERS: usize = 12;
pub const OUT_OF_RANGE_MESSAGE: &str = ">>> NUMBER OUT OF RANGE <<<";

const DIGIT_SIZE: Size = Size::new(56, 44);
const DIGIT_X: i32 = 35;
const DIGIT_Y: i32 = 61;
const DIGIT_PITCH_X: i32 = 56 + 7;
const DIGIT_PITCH_Y: i32 = 44 + 7;

const FIELD: Rectangle = Rectangle::new(Point::new(196, 46), Size::new(117, 32));
const FIELD_TEXT_INSET: i32 = 11;
const FIELD_BLANK_INSET: i32 = 15;

const SIDE_X: i32 = 254;
const SIDE_Y: i32 = 111;
const SIDE_SIZE: Size = Size::new(80, 44);

/// Number types the keypad can enter
pub trait KeypadValue: Copy + PartialOrd + std::fmt::Display {
    /// Whether the decimal point key is offered
    const FRACTIONAL: bool;

    fn to_f64(self) -> f64;

    /// Value of an entry, reading as much of it as forms a number
    fn from_entry(text: &str) -> Self;
}

impl KeypadValue for i32 {
    const FRACTIONAL: bool = false;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_entry(text: &str) -> Self {
        let number = leading_number(text);
        number.parse::<i64>().map_or(0, |value| {
            i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
        })
    }
}

impl KeypadValue for f32 {
    const FRACTIONAL: bool = true;

    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    fn from_entry(text: &str) -> Self {
        leading_number(text).parse().unwrap_or(0.0)
    }
}

/// Longest prefix of `text` that looks like a signed decimal number
fn leading_number(text: &str) -> &str {
    let mut end = 0;
    let mut seen_dot = false;
    for (index, c) in text.char_indices() {
        let accepted = match c {
            '-' | '+' => index == 0,
            '.' if !seen_dot => {
                seen_dot = true;
                true
            }
            c => c.is_ascii_digit(),
        };
        if !accepted {
            break;
        }
        end = index + c.len_utf8();
    }
    let number = &text[..end];
    let number = number.strip_suffix('.').unwrap_or(number);
    if number.is_empty() || number == "-" || number == "+" {
        "0"
    } else {
        number
    }
}

/// The text typed so far on the keypad.
///
/// The first key typed replaces the initial value instead of appending to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadEntry {
    text: String,
    fresh: bool,
    fractional: bool,
}

impl KeypadEntry {
    pub fn new(initial: &str, fractional: bool) -> Self {
        Self {
            text: initial.chars().take(MAX_CHARACTERS).collect(),
            fresh: true,
            fractional,
        }
    }

    pub fn from_value<V: KeypadValue>(value: V) -> Self {
        Self::new(&initial_text(value.to_f64()), V::FRACTIONAL)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// True until the first key replaces the initial value
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    fn push(&mut self, c: char) -> bool {
        if self.fresh {
            self.text.clear();
        }
        if self.text.chars().count() >= MAX_CHARACTERS {
            return false;
        }
        self.fresh = false;
        self.text.push(c);
        true
    }

    pub fn push_digit(&mut self, digit: char) -> bool {
        digit.is_ascii_digit() && self.push(digit)
    }

    /// Only one decimal point, and only for fractional entries
    pub fn push_dot(&mut self) -> bool {
        if !self.fractional || (!self.fresh && self.text.contains('.')) {
            return false;
        }
        self.push('.')
    }

    /// A minus sign may only start the entry
    pub fn push_minus(&mut self) -> bool {
        if !self.fresh && !self.text.is_empty() {
            return false;
        }
        self.push('-')
    }

    pub fn delete(&mut self) {
        self.text.pop();
        self.fresh = false;
    }

    pub fn value<V: KeypadValue>(&self) -> V {
        V::from_entry(&self.text)
    }
}

/// Format `value` with four decimals, then drop trailing zeros and a
/// trailing decimal point.
pub fn initial_text(value: f64) -> String {
    let mut text: String = format!("{value:.4}").chars().take(MAX_CHARACTERS).collect();
    if text.contains('.') {
        while text.len() > 2 && text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
    }
    text
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Key {
    Digit(char),
    Dot,
    Minus,
    Delete,
    Ok,
    Cancel,
}

fn digit_center(column: i32, row: i32) -> Point {
    Point::new(DIGIT_X + column * DIGIT_PITCH_X, DIGIT_Y + row * DIGIT_PITCH_Y)
}

fn side_center(index: i32) -> Point {
    Point::new(SIDE_X, SIDE_Y + index * DIGIT_PITCH_Y)
}

/// Buttons of the keypad for an integer or fractional entry
fn keys(fractional: bool) -> Vec<(Key, Button)> {
    let mut keys = Vec::with_capacity(15);
    let rows = [['7', '8', '9'], ['4', '5', '6'], ['1', '2', '3']];
    for (row, digits) in (0..).zip(rows) {
        for (column, digit) in (0..).zip(digits) {
            keys.push((
                Key::Digit(digit),
                Button::new(&digit.to_string(), digit_center(column, row), DIGIT_SIZE),
            ));
        }
    }

    if fractional {
        keys.push((Key::Digit('0'), Button::new("0", digit_center(0, 3), DIGIT_SIZE)));
        keys.push((Key::Dot, Button::new(".", digit_center(1, 3), DIGIT_SIZE)));
    } else {
        keys.push((Key::Digit('0'), Button::new("0", digit_center(1, 3), DIGIT_SIZE)));
    }
    keys.push((Key::Minus, Button::new("+/-", digit_center(2, 3), DIGIT_SIZE)));

    keys.push((Key::Ok, Button::new("OK", side_center(0), SIDE_SIZE)));
    keys.push((Key::Cancel, Button::new("Cancel", side_center(1), SIDE_SIZE)));
    keys.push((Key::Delete, Button::new("<", side_center(2), SIDE_SIZE)));
    keys
}

fn draw_entry<S: Surface, T: TouchSampler, C: Clock>(
    ui: &mut TouchUi<S, T, C>,
    entry: &KeypadEntry,
) -> Result<(), S::Error> {
    let canvas = ui.canvas_mut();
    let cap = canvas.surface().font_height(Font::Number, false);
    let top = FIELD.top_left.y + FIELD_TEXT_INSET;
    let blank = Rectangle::new(
        Point::new(FIELD.top_left.x + FIELD_BLANK_INSET, top),
        Size::new(FIELD.size.width - 2 * FIELD_BLANK_INSET.cast_unsigned(), cap + 1),
    );
    canvas.surface_mut().fill_rect(blank, Rgb565::BLACK)?;
    canvas.draw_text_centered(
        Font::Number,
        FIELD.center().x,
        top,
        entry.text(),
        Rgb565::WHITE,
    )
}

/// Let the user type a number between `min` and `max`.
///
/// Returns the entered value on OK and `None` on Cancel. An out of range
/// entry flashes a message in the title bar and keeps the keypad open.
pub fn numeric_keypad<V, S, T, C>(
    ui: &mut TouchUi<S, T, C>,
    title: &str,
    initial: V,
    min: V,
    max: V,
) -> Result<Option<V>, S::Error>
where
    V: KeypadValue,
    S: Surface,
    T: TouchSampler,
    C: Clock,
{
    let keys = keys(V::FRACTIONAL);
    let mut entry = KeypadEntry::from_value(initial);

    {
        let canvas = ui.canvas_mut();
        canvas.draw_title_bar(title, TitleButton::None)?;
        canvas.clear_display_space()?;
        for (_, button) in &keys {
            button.draw(canvas, false)?;
        }
        canvas.surface_mut().draw_rect(FIELD, Rgb565::WHITE)?;
    }
    draw_entry(ui, &entry)?;

    loop {
        let event = ui.poll();
        if event.is_none() {
            continue;
        }

        let mut pressed = None;
        for (key, button) in &keys {
            if ui.check_clicked(button)? {
                pressed = Some(*key);
            }
        }
        let Some(key) = pressed else {
            continue;
        };

        let changed = match key {
            Key::Digit(digit) => entry.push_digit(digit),
            Key::Dot => entry.push_dot(),
            Key::Minus => entry.push_minus(),
            Key::Delete => {
                entry.delete();
                true
            }
            Key::Ok => {
                let value: V = entry.value();
                if value >= min && value <= max {
                    log::debug!("keypad '{title}' entered {value}");
                    return Ok(Some(value));
                }
                log::warn!("keypad entry {value} outside {min}..={max}");
                ui.show_message(OUT_OF_RANGE_MESSAGE, MESSAGE_MS)?;
                false
            }
            Key::Cancel => return Ok(None),
        };
        if changed {
            draw_entry(ui, &entry)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_text_drops_trailing_zeros() {
        assert_eq!(initial_text(42.0), "42");
        assert_eq!(initial_text(3.5), "3.5");
        assert_eq!(initial_text(-0.125), "-0.125");
        assert_eq!(initial_text(0.0), "0");
        assert_eq!(initial_text(1.23456), "1.2346");
    }

    #[test]
    fn initial_text_is_capped_at_twelve_characters() {
        // "123456789.1235" is cut to "123456789.12"
        assert_eq!(initial_text(123_456_789.123_45), "123456789.12");
    }

    #[test]
    fn first_key_replaces_initial_value() {
        let mut entry = KeypadEntry::from_value(42);
        assert_eq!(entry.text(), "42");
        assert!(entry.push_digit('7'));
        assert_eq!(entry.text(), "7");
        assert!(entry.push_digit('5'));
        assert_eq!(entry.text(), "75");
    }

    #[test]
    fn delete_keeps_the_rest_of_the_initial_value() {
        let mut entry = KeypadEntry::from_value(42);
        entry.delete();
        assert_eq!(entry.text(), "4");
        entry.push_digit('1');
        assert_eq!(entry.text(), "41");
    }

    #[test]
    fn only_one_dot_and_only_for_fractions() {
        let mut entry = KeypadEntry::new("", true);
        entry.push_digit('1');
        assert!(entry.push_dot());
        assert!(!entry.push_dot());
        entry.push_digit('5');
        assert_eq!(entry.value::<f32>(), 1.5);

        let mut whole = KeypadEntry::new("", false);
        whole.push_digit('1');
        assert!(!whole.push_dot());
    }

    #[test]
    fn dot_can_replace_a_fractional_initial_value() {
        let mut entry = KeypadEntry::from_value(2.5_f32);
        assert!(entry.push_dot());
        assert_eq!(entry.text(), ".");
    }

    #[test]
    fn minus_only_at_the_start() {
        let mut entry = KeypadEntry::from_value(9);
        assert!(entry.push_minus());
        entry.push_digit('3');
        assert!(!entry.push_minus());
        assert_eq!(entry.value::<i32>(), -3);
    }

    #[test]
    fn entry_length_is_capped() {
        let mut entry = KeypadEntry::new("", false);
        for _ in 0..20 {
            entry.push_digit('9');
        }
        assert_eq!(entry.text().len(), MAX_CHARACTERS);
    }

    #[test]
    fn partial_entries_parse_like_numbers() {
        assert_eq!(i32::from_entry(""), 0);
        assert_eq!(i32::from_entry("-"), 0);
        assert_eq!(i32::from_entry("-12"), -12);
        assert_eq!(f32::from_entry("."), 0.0);
        assert_eq!(f32::from_entry("3."), 3.0);
        assert_eq!(i32::from_entry("99999999999"), i32::MAX);
    }

    #[test]
    fn integer_pad_has_no_dot_key() {
        let plain = keys(false);
        assert!(plain.iter().all(|(key, _)| *key != Key::Dot));
        let zero = plain.iter().find(|(key, _)| *key == Key::Digit('0')).unwrap();
        assert_eq!(zero.1.center, Point::new(98, 214));

        assert_eq!(keys(true).len(), 15);
    }
}
