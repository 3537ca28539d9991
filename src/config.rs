use std::{path::PathBuf, time::Duration};

use clap::{ArgAction, Parser, Subcommand};

use crate::{Engine, Topology};

/// what the binary was asked to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// time every engine on a large board instead of animating
    Bench,
}

/// runs conway's game of life, drawn with braille glyphs.
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(name = "cgolrs", version, about, long_about = None)]
pub struct Config {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// columns, a multiple of 2. negative values follow the terminal width
    #[arg(
        short = 'x',
        long = "width",
        default_value_t = -1,
        allow_negative_numbers = true,
        global = true
    )]
    pub width: i64,

    /// rows, a multiple of 4. negative values follow the terminal height
    #[arg(
        short = 'y',
        long = "height",
        default_value_t = -1,
        allow_negative_numbers = true,
        global = true
    )]
    pub height: i64,

    /// workers running in parallel. non-positive values run serially
    #[arg(
        short = 'j',
        long = "parallel",
        default_value_t = 0,
        allow_negative_numbers = true,
        global = true
    )]
    pub workers: i64,

    /// dispatch workers on a thread pool instead of fresh threads
    #[arg(long, global = true)]
    pub pool: bool,

    /// seconds to run for
    #[arg(short = 't', long = "time", default_value = "5", value_parser = parse_runtime)]
    pub runtime: Duration,

    /// updates per second
    #[arg(short = 'r', long = "fps", default_value_t = 60.0, value_parser = parse_fps)]
    pub framerate: f64,

    /// do not sleep inside the display call
    #[arg(long = "skip_synthetic_delay", action = ArgAction::SetFalse)]
    pub synthetic_delay: bool,

    /// wrap around the grid edges
    #[arg(long, global = true)]
    pub wrap: bool,

    /// random seed
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// share of live cells in the random seed
    #[arg(long, default_value_t = 0.2, value_parser = parse_density, global = true)]
    pub density: f64,

    /// load a `#` pattern file instead of random cells
    #[arg(long)]
    pub pattern: Option<PathBuf>,
}

impl Config {
    pub fn bench(&self) -> bool {
        self.command == Some(Command::Bench)
    }

    pub fn engine(&self) -> Engine {
        Engine::from_workers(self.workers, self.pool)
    }

    pub fn topology(&self) -> Topology {
        if self.wrap {
            Topology::Toroidal
        } else {
            Topology::Bounded
        }
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.framerate)
    }
}

fn parse_runtime(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw.parse().map_err(|err| format!("{err}"))?;
    Duration::try_from_secs_f64(secs).map_err(|err| format!("{err}"))
}

fn parse_fps(raw: &str) -> Result<f64, String> {
    let fps: f64 = raw.parse().map_err(|err| format!("{err}"))?;
    if fps > 0.0 && fps.is_finite() {
        Ok(fps)
    } else {
        Err(format!("{fps} is not a positive rate"))
    }
}

fn parse_density(raw: &str) -> Result<f64, String> {
    let density: f64 = raw.parse().map_err(|err| format!("{err}"))?;
    if (0.0..=1.0).contains(&density) {
        Ok(density)
    } else {
        Err(format!("{density} is not within 0..=1"))
    }
}
