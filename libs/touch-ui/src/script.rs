//! Scripted input for replaying touch sessions off-device
//!
//! A [`SteppingClock`] advances virtual time by a fixed step every time it
//! is read, and a [`ScriptedSampler`] looks up what the finger was doing at
//! the clock's current time. Together they drive a [`TouchUi`](crate::TouchUi)
//! deterministically from a recorded or hand-written timeline.

use crate::clock::Clock;
use crate::touch::{TouchSample, TouchSampler};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// Virtual time shared between a clock and the samplers that follow it
pub type SharedTime = Rc<Cell<u64>>;

/// Clock that moves forward by `step_ms` on every read
#[derive(Debug, Clone)]
pub struct SteppingClock {
    now: SharedTime,
    step_ms: u64,
    delays: Rc<Cell<u64>>,
}

impl SteppingClock {
    pub fn new(step_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(0)),
            step_ms,
            delays: Rc::new(Cell::new(0)),
        }
    }

    /// Handle to the virtual time, for samplers that follow this clock
    pub fn time(&self) -> SharedTime {
        Rc::clone(&self.now)
    }

    /// Current virtual time, without advancing it
    pub fn peek(&self) -> u64 {
        self.now.get()
    }

    /// Total time spent in [`Clock::delay_ms`]
    pub fn delayed_ms(&self) -> u64 {
        self.delays.get()
    }
}

impl Clock for SteppingClock {
    fn now_ms(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now.saturating_add(self.step_ms));
        now
    }

    fn delay_ms(&mut self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
        self.delays.set(self.delays.get().saturating_add(ms));
    }
}

/// One step of a touch script: from `at_ms` on, the sensor reads `touch`
/// (`None` meaning not touched) until the next step starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub at_ms: u64,
    #[serde(default)]
    pub touch: Option<(i32, i32)>,
}

/// Touch sampler that plays back a timeline of [`ScriptStep`]s
#[derive(Debug, Clone)]
pub struct ScriptedSampler {
    time: SharedTime,
    steps: Vec<ScriptStep>,
}

impl ScriptedSampler {
    pub fn new(time: SharedTime) -> Self {
        Self {
            time,
            steps: Vec::new(),
        }
    }

    pub fn from_steps(time: SharedTime, mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by_key(|step| step.at_ms);
        Self { time, steps }
    }

    /// Finger down at `(x, y)` from `at_ms`
    #[must_use]
    pub fn touch(mut self, at_ms: u64, x: i32, y: i32) -> Self {
        self.push(ScriptStep {
            at_ms,
            touch: Some((x, y)),
        });
        self
    }

    /// Finger lifted from `at_ms`
    #[must_use]
    pub fn release(mut self, at_ms: u64) -> Self {
        self.push(ScriptStep { at_ms, touch: None });
        self
    }

    /// Press at `(x, y)` for `hold_ms` starting at `at_ms`
    #[must_use]
    pub fn tap(self, at_ms: u64, hold_ms: u64, x: i32, y: i32) -> Self {
        self.touch(at_ms, x, y).release(at_ms + hold_ms)
    }

    fn push(&mut self, step: ScriptStep) {
        let index = self.steps.partition_point(|s| s.at_ms <= step.at_ms);
        self.steps.insert(index, step);
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    /// Time of the last step, after which the script stays constant
    pub fn end_ms(&self) -> u64 {
        self.steps.last().map_or(0, |step| step.at_ms)
    }

    pub fn sample_at(&self, now_ms: u64) -> TouchSample {
        let index = self.steps.partition_point(|s| s.at_ms <= now_ms);
        match index.checked_sub(1).and_then(|i| self.steps.get(i)) {
            Some(ScriptStep {
                touch: Some((x, y)),
                ..
            }) => TouchSample::at(*x, *y),
            _ => TouchSample::released(),
        }
    }
}

impl TouchSampler for ScriptedSampler {
    fn sample(&mut self) -> TouchSample {
        self.sample_at(self.time.get())
    }
}
