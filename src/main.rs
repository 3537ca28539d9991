use std::{
    fs,
    io::{self, stdout},
    process::exit,
};

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use utils::Pos;
mod utils;

pub use error::{Error, GridError, Result, StepError};
mod error;

pub use grid::{Board, Grid, Topology};
pub mod grid;

mod rule;

pub use engine::{step, step_parallel, step_pooled, Engine};
pub mod engine;

mod seed;

pub use view::View;
mod view;

pub use sim::{Sim, Stats};
mod sim;

mod bench;

pub use config::{Command, Config};
mod config;

pub fn main() {
    init_tracing();

    let config = Config::parse();
    if let Err(err) = run(&config) {
        eprintln!("[error] {err}");
        exit(1);
    }
}

fn init_tracing() {
    // stdout belongs to the drawing
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cgolrs=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(config: &Config) -> Result<()> {
    if config.bench() {
        let grid = build_grid(config, || Ok((bench::BOARD_SIZE, bench::BOARD_SIZE)))?;
        bench::run(&grid, &bench::engines(), bench::TRIALS, &mut stdout())?;
        return Ok(());
    }

    let grid = build_grid(config, view::screen_dimensions)?;
    let view = View::stdout(config.synthetic_delay);
    let sim = Sim::new(grid, config.engine(), view);
    let (stats, _) = sim.run(config.runtime, config.frame_delay())?;
    println!(
        "{} frames, with an update of {:.6}s.",
        stats.frames,
        stats.avg_update.as_secs_f64()
    );
    Ok(())
}

fn build_grid(
    config: &Config,
    fallback: impl FnOnce() -> io::Result<(usize, usize)>,
) -> Result<Grid> {
    let requested = (usize::try_from(config.height), usize::try_from(config.width));
    let (height, width) = match requested {
        (Ok(height), Ok(width)) => (height, width),
        (height, width) => {
            let (fallback_height, fallback_width) = fallback()?;
            (
                height.unwrap_or(fallback_height),
                width.unwrap_or(fallback_width),
            )
        }
    };
    let mut grid = Grid::new(height, width)?.with_topology(config.topology());

    match &config.pattern {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let clipped = seed::pattern(&mut grid, seed::parse_pattern(&content));
            if clipped > 0 {
                warn!(clipped, path = %path.display(), "pattern does not fit the grid");
            }
        }
        None => {
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            seed::random(&mut grid, config.density, &mut rng)?;
        }
    }
    let population = grid.active().population();
    info!(height, width, population, "grid seeded");
    Ok(grid)
}
