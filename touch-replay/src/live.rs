use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use gt1151::{Gt1151, Rotation};
use linux_embedded_hal::I2cdev;
use touch_ui::{Clock, SystemClock, TouchSampler, TouchStateMachine, UiConfig};

/// Panel mounting, in degrees clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PanelRotation {
    #[value(name = "0")]
    Deg0,
    #[value(name = "90")]
    Deg90,
    #[value(name = "180")]
    Deg180,
    #[value(name = "270")]
    Deg270,
}

impl From<PanelRotation> for Rotation {
    fn from(rotation: PanelRotation) -> Self {
        match rotation {
            PanelRotation::Deg0 => Rotation::Deg0,
            PanelRotation::Deg90 => Rotation::Deg90,
            PanelRotation::Deg180 => Rotation::Deg180,
            PanelRotation::Deg270 => Rotation::Deg270,
        }
    }
}

pub struct LiveOptions {
    pub bus: PathBuf,
    pub config: Option<PathBuf>,
    pub rotation: PanelRotation,
    pub panel: (u16, u16),
    pub poll_ms: u64,
}

pub fn run(options: &LiveOptions) -> Result<()> {
    let config = match &options.config {
        Some(path) => UiConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => UiConfig::default(),
    };

    let running = Arc::new(AtomicBool::new(true));
    let running_for_signal = Arc::clone(&running);
    if let Err(e) = ctrlc::set_handler(move || {
        log::info!("Received Ctrl+C, shutting down...");
        running_for_signal.store(false, Ordering::SeqCst);
    }) {
        log::error!("Failed to set Ctrl-C handler: {e}");
    }

    let i2c = I2cdev::new(&options.bus)
        .with_context(|| format!("Failed to open I2C bus {}", options.bus.display()))?;
    let mut touch = Gt1151::new(i2c, options.rotation.into(), options.panel);
    touch
        .product_id()
        .context("Failed to read touchscreen product ID")?;

    let clock = SystemClock::new();
    let mut fsm = TouchStateMachine::new(config.touch);
    log::info!("Polling every {} ms, Ctrl-C to stop", options.poll_ms);

    while running.load(Ordering::SeqCst) {
        let sample = touch.sample();
        let event = fsm.poll(clock.now_ms(), sample);
        if !event.is_none() {
            log::info!(
                "{:?} at ({}, {})",
                event.kind,
                event.point.x,
                event.point.y
            );
        }
        std::thread::sleep(Duration::from_millis(options.poll_ms));
    }

    touch
        .sleep()
        .context("Failed to put touchscreen to sleep")?;
    Ok(())
}
