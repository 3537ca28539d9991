use std::{
    io::Write,
    thread,
    time::{Duration, Instant},
};

use tracing::{debug, info};

use crate::{Engine, Grid, Result, View};

/// what a run achieved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub frames: u64,
    /// running mean of display + update + swap.
    pub avg_update: Duration,
}

/// the frame loop: draw the active generation, compute the next one, swap.
pub struct Sim<W>
where
    W: Write,
{
    grid: Grid,
    engine: Engine,
    view: View<W>,
}

impl<W> Sim<W>
where
    W: Write,
{
    pub fn new(grid: Grid, engine: Engine, view: View<W>) -> Self {
        Self { grid, engine, view }
    }

    #[cfg(test)]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// one frame. the swap only happens once the whole pass succeeded.
    pub fn tick(&mut self) -> Result<Duration> {
        let start = Instant::now();
        self.view.display(&self.grid.active())?;
        self.engine.step(&mut self.grid)?;
        self.grid.swap();
        let elapsed = start.elapsed();
        debug!(
            generation = self.grid.generation(),
            population = self.grid.active().population(),
            ?elapsed,
            "frame"
        );
        Ok(elapsed)
    }

    /// runs frames for `runtime`, each one padded to at least `frame_delay`.
    pub fn run(mut self, runtime: Duration, frame_delay: Duration) -> Result<(Stats, Grid)> {
        info!(
            height = self.grid.height(),
            width = self.grid.width(),
            topology = ?self.grid.topology(),
            engine = %self.engine,
            ?runtime,
            "starting simulation"
        );
        let start = Instant::now();
        self.view.display(&self.grid.active())?;

        let mut stats = Stats {
            frames: 0,
            avg_update: Duration::ZERO,
        };
        while start.elapsed() < runtime {
            let update = self.tick()?;
            stats.frames += 1;
            let avg = stats.avg_update.as_secs_f64();
            let avg = avg + (update.as_secs_f64() - avg) / stats.frames as f64;
            stats.avg_update = Duration::from_secs_f64(avg.max(0.0));

            if let Some(rest) = frame_delay.checked_sub(update) {
                thread::sleep(rest);
            }
        }
        self.view.finish()?;

        info!(frames = stats.frames, avg_update = ?stats.avg_update, "simulation done");
        Ok((stats, self.grid))
    }
}
