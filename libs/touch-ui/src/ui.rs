//! The UI context
//!
//! [`TouchUi`] bundles the canvas, the touch sampler, the clock and the touch
//! state machine. Everything that used to be process-wide state lives here,
//! so several independent UIs can coexist and tests can drive one with
//! scripted input.

use crate::canvas::Canvas;
use crate::clock::Clock;
use crate::config::UiConfig;
use crate::surface::Surface;
use crate::theme::Theme;
use crate::touch::{
    TouchEvent, TouchEventKind, TouchSample, TouchSampler, TouchState, TouchStateMachine,
};
use crate::widgets::{NumberBox, NumberValue, Pressable, SelectionBox, Slider};

/// Milliseconds an error message stays in the title bar
pub const MESSAGE_MS: u64 = 1500;

/// Discrete events produced since the UI was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCounts {
    pub pressed: usize,
    pub repeating: usize,
    pub released: usize,
}

impl EventCounts {
    fn record(&mut self, kind: TouchEventKind) {
        match kind {
            TouchEventKind::None => {}
            TouchEventKind::Pressed => self.pressed += 1,
            TouchEventKind::Repeating => self.repeating += 1,
            TouchEventKind::Released => self.released += 1,
        }
    }
}

pub struct TouchUi<S, T, C> {
    canvas: Canvas<S>,
    sampler: T,
    clock: C,
    touch: TouchStateMachine,
    event: TouchEvent,
    sample: TouchSample,
    counts: EventCounts,
}

impl<S, T, C> TouchUi<S, T, C>
where
    S: Surface,
    T: TouchSampler,
    C: Clock,
{
    pub fn new(surface: S, sampler: T, clock: C, config: &UiConfig) -> Self {
        Self {
            canvas: Canvas::new(surface, Theme::from(config.palette), config.layout),
            sampler,
            clock,
            touch: TouchStateMachine::new(config.touch),
            event: TouchEvent::NONE,
            sample: TouchSample::released(),
            counts: EventCounts::default(),
        }
    }

    /// Sample the touch sensor once and advance the state machine.
    ///
    /// Call exactly once per loop iteration; the returned event is also kept
    /// as [`event`](Self::event) for the widget checks until the next poll.
    pub fn poll(&mut self) -> TouchEvent {
        self.sample = self.sampler.sample();
        let now = self.clock.now_ms();
        self.event = self.touch.poll(now, self.sample);
        self.counts.record(self.event.kind);
        self.event
    }

    /// Event produced by the latest poll
    pub fn event(&self) -> TouchEvent {
        self.event
    }

    /// Raw sample read by the latest poll
    pub fn sample(&self) -> TouchSample {
        self.sample
    }

    /// Events seen by every poll so far, including polls made by screens
    /// running their own loop
    pub fn event_counts(&self) -> EventCounts {
        self.counts
    }

    pub fn touch_state(&self) -> TouchState {
        self.touch.state()
    }

    pub fn canvas(&self) -> &Canvas<S> {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<S> {
        &mut self.canvas
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn sampler_mut(&mut self) -> &mut T {
        &mut self.sampler
    }

    pub fn into_parts(self) -> (S, T, C) {
        (self.canvas.into_surface(), self.sampler, self.clock)
    }

    /// Show `text` in the title bar for `ms` milliseconds, then restore the
    /// title.
    ///
    /// Blocks for the whole period; touches during it are not processed.
    pub fn show_message(&mut self, text: &str, ms: u64) -> Result<(), S::Error> {
        log::warn!("{text}");
        self.canvas.draw_title_message(text)?;
        self.clock.delay_ms(ms);
        self.canvas.redraw_title_bar()
    }

    pub fn check_clicked(&mut self, widget: &impl Pressable) -> Result<bool, S::Error> {
        widget.check_clicked(&mut self.canvas, &self.event)
    }

    pub fn check_auto_repeat(&mut self, widget: &impl Pressable) -> Result<bool, S::Error> {
        widget.check_auto_repeat(&mut self.canvas, &self.event)
    }

    pub fn check_first_touched(&mut self, widget: &impl Pressable) -> Result<bool, S::Error> {
        widget.check_first_touched(&mut self.canvas, &self.event)
    }

    pub fn check_number_box<V: NumberValue>(
        &mut self,
        number_box: &mut NumberBox<V>,
    ) -> Result<bool, S::Error> {
        number_box.check_touched(&mut self.canvas, &self.event)
    }

    pub fn check_selection_box(&mut self, selection: &mut SelectionBox) -> Result<bool, S::Error> {
        selection.check_touched(&mut self.canvas, &self.event)
    }

    /// Sliders follow the live sample rather than the discrete event
    pub fn check_slider(&mut self, slider: &mut Slider) -> Result<bool, S::Error> {
        slider.check_dragged(&mut self.canvas, &self.sample)
    }

    pub fn check_back_button_clicked(&mut self) -> Result<bool, S::Error> {
        self.canvas.check_back_button_clicked(&self.event)
    }

    pub fn check_menu_button_clicked(&mut self) -> Result<bool, S::Error> {
        self.canvas.check_menu_button_clicked(&self.event)
    }
}
