use std::{
    io::Write,
    time::{Duration, Instant},
};

use termion::color;
use tracing::warn;

use crate::{engine::available_workers, utils::secs, Engine, Grid, Result, StepError};

pub const BOARD_SIZE: usize = 1000;
pub const TRIALS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trial {
    pub engine: Engine,
    pub trials: u32,
    pub elapsed: Duration,
    /// digest of the generation the engine produced.
    pub digest: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Timed(Trial),
    Skipped(Engine),
}

/// serial first, it is the baseline the others are checked against.
pub fn engines() -> Vec<Engine> {
    let mut engines = vec![
        Engine::Serial,
        Engine::Threads(2),
        Engine::Threads(4),
        Engine::Pool(2),
        Engine::Pool(4),
    ];
    let host = available_workers();
    if host > 4 {
        engines.extend([Engine::Threads(host), Engine::Pool(host)]);
    }
    engines
}

/// times `trials` passes of `engine` over a copy of `grid`.
pub fn run_trial(grid: &Grid, engine: Engine, trials: u32) -> Result<Outcome, StepError> {
    let mut grid = grid.clone();
    let start = Instant::now();
    for _ in 0..trials {
        match engine.step(&mut grid) {
            Ok(()) => (),
            Err(err) if err.is_unsupported() => {
                warn!(%engine, %err, "skipping engine");
                return Ok(Outcome::Skipped(engine));
            }
            Err(err) => return Err(err),
        }
    }
    let elapsed = start.elapsed();
    grid.swap();
    Ok(Outcome::Timed(Trial {
        engine,
        trials,
        elapsed,
        digest: grid.digest(),
    }))
}

/// runs every engine over `grid` and reports to `out`.
pub fn run(
    grid: &Grid,
    engines: &[Engine],
    trials: u32,
    out: &mut impl Write,
) -> Result<Vec<Outcome>> {
    let title = "step() timing test";
    writeln!(out, "\n{}\n{title:^30}\n{}", "=".repeat(30), "=".repeat(30))?;
    writeln!(out, "{} x {} cells", grid.height(), grid.width())?;

    let mut baseline = None;
    let mut outcomes = Vec::with_capacity(engines.len());
    for &engine in engines {
        let outcome = run_trial(grid, engine, trials)?;
        report(out, &outcome, &mut baseline)?;
        outcomes.push(outcome);
    }
    Ok(outcomes)
}

fn report(out: &mut impl Write, outcome: &Outcome, baseline: &mut Option<u64>) -> Result<()> {
    let name = |engine: &Engine| {
        format!(
            "{}{engine}{}",
            color::Fg(color::LightBlack),
            color::Fg(color::Reset)
        )
    };
    match outcome {
        Outcome::Skipped(engine) => {
            writeln!(out, "{}:", name(engine))?;
            writeln!(out, "   not yet implemented. Test skipped.")?;
        }
        Outcome::Timed(trial) => {
            let magenta = color::Fg(color::Magenta);
            let cyan = color::Fg(color::Cyan);
            let reset = color::Fg(color::Reset);
            let per_trial = trial.elapsed / trial.trials.max(1);
            writeln!(out, "{}:", name(&trial.engine))?;
            writeln!(
                out,
                "   {cyan}{}{reset} trials in {magenta}{}{reset}s.",
                trial.trials,
                secs(trial.elapsed)
            )?;
            writeln!(out, "     ({magenta}{}{reset}s / trial)", secs(per_trial))?;

            match *baseline {
                None => *baseline = Some(trial.digest),
                Some(digest) if digest != trial.digest => {
                    warn!(engine = %trial.engine, "result differs from the serial pass");
                    writeln!(out, "   result differs from step()!")?;
                }
                Some(_) => (),
            }
        }
    }
    Ok(())
}
