use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod demo;
mod live;
mod replay;

/// Replay recorded touch traces through the touch UI, or watch a live panel
#[derive(Parser, Debug)]
#[command(name = "touch-replay")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drive the demo menu from a recorded trace and save the final frame
    Replay {
        /// JSON trace of timed touch steps
        trace: PathBuf,

        /// UI configuration file (JSON)
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Where to write the final frame as a PPM image
        #[arg(long, short, default_value = "frame.ppm")]
        out: PathBuf,

        /// Simulated milliseconds between polls
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        step_ms: u64,

        /// Keep polling this long after the last trace step
        #[arg(long, default_value_t = 1000)]
        tail_ms: u64,
    },
    /// Log touch events from a GT1151 on a Linux I2C bus until Ctrl-C
    Live {
        /// I2C bus device
        #[arg(long, default_value = "/dev/i2c-1")]
        bus: PathBuf,

        /// UI configuration file (JSON), for the touch timing
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// How the panel is mounted relative to the display
        #[arg(long, value_enum, default_value = "90")]
        rotation: live::PanelRotation,

        /// Native panel width in pixels
        #[arg(long, default_value_t = 122)]
        panel_width: u16,

        /// Native panel height in pixels
        #[arg(long, default_value_t = 250)]
        panel_height: u16,

        /// Milliseconds between controller reads
        #[arg(long, default_value_t = 10)]
        poll_ms: u64,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Replay {
            trace,
            config,
            out,
            step_ms,
            tail_ms,
        } => replay::run(&replay::ReplayOptions {
            trace,
            config,
            out,
            step_ms,
            tail_ms,
        }),
        Commands::Live {
            bus,
            config,
            rotation,
            panel_width,
            panel_height,
            poll_ms,
        } => live::run(&live::LiveOptions {
            bus,
            config,
            rotation,
            panel: (panel_width, panel_height),
            poll_ms,
        }),
    }
}
