//! Numeric keypad driven through a scripted touch session

use embedded_graphics::prelude::{Point, Size};
use touch_ui::keypad::OUT_OF_RANGE_MESSAGE;
use touch_ui::script::SharedTime;
use touch_ui::test_utils::RecordingSurface;
use touch_ui::{
    ScriptedSampler, SteppingClock, TouchSample, TouchSampler, TouchUi, UiConfig, numeric_keypad,
};

struct Guarded {
    inner: ScriptedSampler,
    time: SharedTime,
    limit_ms: u64,
}

impl TouchSampler for Guarded {
    fn sample(&mut self) -> TouchSample {
        assert!(self.time.get() < self.limit_ms, "keypad never returned");
        self.inner.sample()
    }
}

type Ui = TouchUi<RecordingSurface, Guarded, SteppingClock>;

// Key centers on the 320x240 keypad
const SEVEN: Point = Point::new(35, 61);
const NINE: Point = Point::new(161, 61);
const FOUR: Point = Point::new(35, 112);
const TWO: Point = Point::new(98, 163);
const FLOAT_ZERO: Point = Point::new(35, 214);
const DOT: Point = Point::new(98, 214);
const SIGN: Point = Point::new(161, 214);
const OK: Point = Point::new(254, 111);
const CANCEL: Point = Point::new(254, 162);
const DELETE: Point = Point::new(254, 213);

/// Taps each key at its scheduled time
fn ui_scripted(taps: &[(u64, Point)]) -> Ui {
    let clock = SteppingClock::new(1);
    let time = clock.time();
    let mut script = ScriptedSampler::new(clock.time());
    for (at, key) in taps {
        script = script.tap(*at, 60, key.x, key.y);
    }
    let limit_ms = script.end_ms() + 5_000;
    TouchUi::new(
        RecordingSurface::new(Size::new(320, 240)),
        Guarded {
            inner: script,
            time,
            limit_ms,
        },
        clock,
        &UiConfig::default(),
    )
}

/// Taps `keys` 300 ms apart starting at `start_ms`
fn ui_typing(start_ms: u64, keys: &[Point]) -> Ui {
    let taps: Vec<_> = (0..)
        .map(|i| start_ms + i * 300)
        .zip(keys.iter().copied())
        .collect();
    ui_scripted(&taps)
}

#[test]
fn typed_integer_replaces_initial_value() {
    let mut ui = ui_typing(100, &[FOUR, TWO, OK]);
    let value = numeric_keypad(&mut ui, "Timeout", 13, 0, 100).unwrap();
    assert_eq!(value, Some(42));

    let texts = ui.canvas().surface().texts();
    assert!(texts.contains(&"13"), "initial value shown");
    assert!(texts.contains(&"42"));
    assert_eq!(ui.canvas().title(), "Timeout");
}

#[test]
fn cancel_returns_none() {
    let mut ui = ui_typing(100, &[NINE, CANCEL]);
    assert_eq!(numeric_keypad(&mut ui, "Timeout", 7, 0, 100).unwrap(), None);
}

#[test]
fn ok_without_typing_keeps_initial_value() {
    let mut ui = ui_typing(100, &[OK]);
    assert_eq!(numeric_keypad(&mut ui, "Timeout", 35, 0, 100).unwrap(), Some(35));
}

#[test]
fn negative_entry_with_sign_key() {
    let mut ui = ui_typing(100, &[SIGN, FOUR, OK]);
    assert_eq!(numeric_keypad(&mut ui, "Offset", 0, -50, 50).unwrap(), Some(-4));
}

#[test]
fn delete_edits_the_initial_value() {
    let mut ui = ui_typing(100, &[DELETE, SEVEN, OK]);
    assert_eq!(numeric_keypad(&mut ui, "Timeout", 42, 0, 100).unwrap(), Some(47));
}

#[test]
fn out_of_range_shows_message_and_stays_open() {
    // OK is released at about 1060 ms, the message then holds the UI for
    // 1.5 s, so Cancel is scheduled well after it
    let mut ui = ui_scripted(&[
        (100, NINE),
        (400, NINE),
        (700, NINE),
        (1_000, OK),
        (3_000, CANCEL),
    ]);
    assert_eq!(numeric_keypad(&mut ui, "Percent", 5, 0, 100).unwrap(), None);
    assert!(ui.canvas().surface().drew_text(OUT_OF_RANGE_MESSAGE));
    assert!(ui.clock().delayed_ms() >= touch_ui::MESSAGE_MS);
    assert_eq!(ui.canvas().title(), "Percent");
}

#[test]
fn fractional_entry() {
    let mut ui = ui_typing(100, &[FLOAT_ZERO, DOT, SEVEN, DOT, OK]);
    let value = numeric_keypad(&mut ui, "Gain", 2.5_f32, 0.0, 1.0).unwrap();
    assert_eq!(value, Some(0.7));
    assert!(ui.canvas().surface().drew_text("2.5"));
    assert!(ui.canvas().surface().drew_text("0.7"));
}

#[test]
fn integer_keypad_ignores_dot_position() {
    // bottom left is empty on the integer pad
    let mut ui = ui_typing(100, &[FLOAT_ZERO, TWO, OK]);
    assert_eq!(numeric_keypad(&mut ui, "Count", 9, 0, 10).unwrap(), Some(2));
}
