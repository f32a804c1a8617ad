//! Touch event state machine
//!
//! Turns a stream of raw, bouncy touch samples into at most one discrete
//! event per poll. The coordinates of a confirmed press are frozen for the
//! whole touch-down episode: every `Repeating` event and the final
//! `Released` event report the position where the press was confirmed,
//! not where the finger drifted to.
//!
//! There is no queue. A consumer that skips a poll result loses that event.

use crate::config::TouchTiming;
use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::Rectangle;

/// One raw reading from the touch sensor, in display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchSample {
    pub touched: bool,
    pub point: Point,
}

impl TouchSample {
    pub const fn released() -> Self {
        Self {
            touched: false,
            point: Point::zero(),
        }
    }

    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            touched: true,
            point: Point::new(x, y),
        }
    }
}

/// Source of raw touch samples, already calibrated to display space.
pub trait TouchSampler {
    fn sample(&mut self) -> TouchSample;
}

impl<T: TouchSampler + ?Sized> TouchSampler for &mut T {
    fn sample(&mut self) -> TouchSample {
        (**self).sample()
    }
}

impl<T: TouchSampler + ?Sized> TouchSampler for Box<T> {
    fn sample(&mut self) -> TouchSample {
        (**self).sample()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchEventKind {
    #[default]
    None,
    Pressed,
    Released,
    Repeating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchEvent {
    pub kind: TouchEventKind,
    pub point: Point,
}

impl Default for TouchEvent {
    fn default() -> Self {
        Self::NONE
    }
}

impl TouchEvent {
    pub const NONE: Self = Self {
        kind: TouchEventKind::None,
        point: Point::zero(),
    };

    pub const fn new(kind: TouchEventKind, point: Point) -> Self {
        Self { kind, point }
    }

    pub fn is_none(&self) -> bool {
        self.kind == TouchEventKind::None
    }

    /// True if this event is of `kind` and lies inside `rect`
    pub fn is_inside(&self, kind: TouchEventKind, rect: &Rectangle) -> bool {
        kind != TouchEventKind::None && self.kind == kind && rect.contains(self.point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TouchState {
    #[default]
    Idle,
    ConfirmingDown,
    Down,
    AutoRepeating,
    ConfirmingUp,
}

/// Debouncing, auto-repeating touch event generator.
///
/// Call [`poll`](Self::poll) exactly once per UI loop iteration with a
/// monotonic timestamp and the current raw sample.
#[derive(Debug, Clone)]
pub struct TouchStateMachine {
    state: TouchState,
    anchor_ms: u64,
    recorded: Point,
    timing: TouchTiming,
}

impl Default for TouchStateMachine {
    fn default() -> Self {
        Self::new(TouchTiming::default())
    }
}

impl TouchStateMachine {
    pub fn new(timing: TouchTiming) -> Self {
        Self {
            state: TouchState::Idle,
            anchor_ms: 0,
            recorded: Point::zero(),
            timing,
        }
    }

    pub fn state(&self) -> TouchState {
        self.state
    }

    pub fn timing(&self) -> TouchTiming {
        self.timing
    }

    /// Position frozen when the current (or last) press was confirmed
    pub fn recorded_point(&self) -> Point {
        self.recorded
    }

    /// Drop any episode in progress and return to `Idle`
    pub fn reset(&mut self) {
        self.state = TouchState::Idle;
        self.anchor_ms = 0;
    }

    pub fn poll(&mut self, now_ms: u64, sample: TouchSample) -> TouchEvent {
        let elapsed = now_ms.saturating_sub(self.anchor_ms);

        let (next, kind) = match self.state {
            TouchState::Idle => {
                if sample.touched {
                    self.anchor_ms = now_ms;
                    (TouchState::ConfirmingDown, TouchEventKind::None)
                } else {
                    (TouchState::Idle, TouchEventKind::None)
                }
            }

            TouchState::ConfirmingDown => {
                if elapsed < self.timing.debounce_ms {
                    (TouchState::ConfirmingDown, TouchEventKind::None)
                } else if !sample.touched {
                    // contact noise
                    (TouchState::Idle, TouchEventKind::None)
                } else {
                    self.recorded = sample.point;
                    self.anchor_ms = now_ms;
                    (TouchState::Down, TouchEventKind::Pressed)
                }
            }

            TouchState::Down => {
                if !sample.touched {
                    (TouchState::ConfirmingUp, TouchEventKind::None)
                } else if elapsed >= self.timing.auto_repeat_delay_ms {
                    self.anchor_ms = now_ms;
                    (TouchState::AutoRepeating, TouchEventKind::Repeating)
                } else {
                    (TouchState::Down, TouchEventKind::None)
                }
            }

            TouchState::AutoRepeating => {
                if !sample.touched {
                    (TouchState::ConfirmingUp, TouchEventKind::None)
                } else if elapsed >= self.timing.auto_repeat_rate_ms {
                    self.anchor_ms = now_ms;
                    (TouchState::AutoRepeating, TouchEventKind::Repeating)
                } else {
                    (TouchState::AutoRepeating, TouchEventKind::None)
                }
            }

            // The anchor is not reset on entry, so a release after a long
            // hold is reported on the next untouched poll.
            TouchState::ConfirmingUp => {
                if sample.touched {
                    self.anchor_ms = now_ms;
                    (TouchState::ConfirmingUp, TouchEventKind::None)
                } else if elapsed >= self.timing.debounce_ms {
                    (TouchState::Idle, TouchEventKind::Released)
                } else {
                    (TouchState::ConfirmingUp, TouchEventKind::None)
                }
            }
        };

        if next != self.state {
            log::trace!("touch {:?} -> {next:?} at {now_ms} ms", self.state);
            self.state = next;
        }

        if kind == TouchEventKind::None {
            TouchEvent::NONE
        } else {
            log::debug!("touch event {kind:?} at {:?}", self.recorded);
            TouchEvent::new(kind, self.recorded)
        }
    }
}
