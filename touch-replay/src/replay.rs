use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use embedded_graphics::prelude::Size;
use serde::Deserialize;
use touch_ui::{
    DisplaySurface, Framebuffer, MenuNavigator, NavOutcome, ScriptStep, ScriptedSampler,
    SteppingClock, TouchUi, UiConfig,
};

use crate::demo::{self, KeepRunning};

const DEFAULT_WIDTH: u32 = 320;
const DEFAULT_HEIGHT: u32 = 240;

/// Recorded touch session
#[derive(Debug, Clone, Deserialize)]
pub struct Trace {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    pub steps: Vec<ScriptStep>,
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

impl Trace {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read trace {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse trace {}", path.display()))
    }
}

pub struct ReplayOptions {
    pub trace: PathBuf,
    pub config: Option<PathBuf>,
    pub out: PathBuf,
    pub step_ms: u64,
    pub tail_ms: u64,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub presses: usize,
    pub repeats: usize,
    pub releases: usize,
    pub elapsed_ms: u64,
    pub final_title: String,
}

/// Play `trace` through the demo menu and return the final frame
pub fn replay(
    trace: Trace,
    config: &UiConfig,
    step_ms: u64,
    tail_ms: u64,
) -> Result<(Framebuffer, Summary)> {
    let clock = SteppingClock::new(step_ms);
    let time = clock.time();
    let sampler = ScriptedSampler::from_steps(clock.time(), trace.steps);
    let end_ms = sampler.end_ms().saturating_add(tail_ms);
    let surface = DisplaySurface::new(Framebuffer::new(Size::new(trace.width, trace.height)));
    let mut ui = TouchUi::new(surface, sampler, clock, config);

    let keep_running: KeepRunning = Rc::new(move || time.get() <= end_ms);
    let (tree, root) = demo::menu_tree(&keep_running)?;
    let mut navigator = MenuNavigator::new(tree, root)?;
    navigator.redraw(&mut ui)?;

    while keep_running() {
        let event = ui.poll();
        if !event.is_none() {
            log::debug!(
                "{} ms: {:?} at ({}, {})",
                ui.clock().peek(),
                event.kind,
                event.point.x,
                event.point.y
            );
        }
        if navigator.handle_event(&mut ui, &event)? == NavOutcome::Exit {
            log::info!("menu exited");
            break;
        }
    }

    // screens opened from the menu poll on their own, so take the counts
    // from the UI rather than from this loop
    let counts = ui.event_counts();
    let final_title = ui.canvas().title().to_string();
    let (surface, _, clock) = ui.into_parts();
    let summary = Summary {
        presses: counts.pressed,
        repeats: counts.repeating,
        releases: counts.released,
        elapsed_ms: clock.peek(),
        final_title,
    };
    Ok((surface.into_inner(), summary))
}

pub fn run(options: &ReplayOptions) -> Result<()> {
    let trace = Trace::load(&options.trace)?;
    let config = match &options.config {
        Some(path) => UiConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => UiConfig::default(),
    };
    log::info!(
        "Replaying {} steps from {}",
        trace.steps.len(),
        options.trace.display()
    );

    let (frame, summary) = replay(trace, &config, options.step_ms, options.tail_ms)?;

    let file = File::create(&options.out)
        .with_context(|| format!("Failed to create {}", options.out.display()))?;
    frame
        .write_ppm(BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", options.out.display()))?;

    log::info!(
        "{} presses, {} repeats, {} releases over {} ms; ended on '{}'",
        summary.presses,
        summary.repeats,
        summary.releases,
        summary.elapsed_ms,
        summary.final_title
    );
    log::info!("Final frame written to {}", options.out.display());
    Ok(())
}
