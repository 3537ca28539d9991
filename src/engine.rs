//! generation update passes.
//!
//! every pass reads the active generation through a shared [`Board`] and writes the next
//! generation into the grid's second buffer. The parallel passes hand each worker an
//! exclusive slice of that buffer, cut along the ranges produced by
//! [`partition`](crate::grid::partition), so workers never share a write target and
//! never write anything another worker reads.

use std::{fmt, num::NonZeroUsize, ops::Range, thread};
#[cfg(feature = "pool")]
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use tracing::debug;

use crate::{
    grid::{partition, split_mut},
    pos, rule, Board, Grid, Pos, StepError,
};

/// serial pass over every cell in row-major order.
pub fn step(grid: &mut Grid) {
    let (board, next) = grid.split();
    let width = board.width();
    for row in 0..board.height() {
        for col in 0..width {
            next[row * width + col] = rule::next_state(&board, pos!(row, col));
        }
    }
}

/// parallel pass on freshly spawned threads, one per partition.
///
/// `None` or `Some(0)` uses the host parallelism. returns once every worker has been
/// joined.
pub fn step_parallel(grid: &mut Grid, workers: Option<usize>) -> Result<(), StepError> {
    let workers = resolve_workers(workers);
    let ranges = partition(grid.len(), workers);
    let (board, next) = grid.split();
    debug!(workers, cells = next.len(), "threaded pass");
    run_threads(board, next, &ranges, apply_range)
}

/// parallel pass on a rayon pool sized to `workers`.
///
/// the pool is built on first use for a given size and reused by later passes.
#[cfg(feature = "pool")]
pub fn step_pooled(grid: &mut Grid, workers: Option<usize>) -> Result<(), StepError> {
    let workers = resolve_workers(workers);
    let pool = pool(workers)?;
    let ranges = partition(grid.len(), workers);
    let (board, next) = grid.split();
    debug!(workers, cells = next.len(), "pooled pass");
    run_pool(&pool, board, next, &ranges, apply_range)
}

#[cfg(feature = "pool")]
fn pool(workers: usize) -> Result<Arc<rayon::ThreadPool>, StepError> {
    static POOLS: OnceLock<Mutex<HashMap<usize, Arc<rayon::ThreadPool>>>> = OnceLock::new();

    let mut pools = POOLS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    if let Some(pool) = pools.get(&workers) {
        return Ok(Arc::clone(pool));
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map(Arc::new)
        .map_err(|err| StepError::Pool(err.to_string()))?;
    debug!(workers, "worker pool built");
    pools.insert(workers, Arc::clone(&pool));
    Ok(pool)
}

#[cfg(not(feature = "pool"))]
pub fn step_pooled(_grid: &mut Grid, _workers: Option<usize>) -> Result<(), StepError> {
    Err(StepError::Unsupported("built without the `pool` feature"))
}

pub fn available_workers() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

pub fn resolve_workers(requested: Option<usize>) -> usize {
    match requested {
        Some(workers) if workers > 0 => workers,
        _ => available_workers(),
    }
}

/// fills `out`, the slice of the next buffer that starts at flat index `start`.
fn apply_range(board: &Board<'_>, start: usize, out: &mut [bool]) {
    let width = board.width();
    for (offset, cell) in out.iter_mut().enumerate() {
        *cell = rule::next_state(board, Pos::from_index(start + offset, width));
    }
}

fn run_threads<F>(
    board: Board<'_>,
    next: &mut [bool],
    ranges: &[Range<usize>],
    kernel: F,
) -> Result<(), StepError>
where
    F: Fn(&Board<'_>, usize, &mut [bool]) + Sync,
{
    let kernel = &kernel;
    let slices = split_mut(next, ranges);

    thread::scope(|scope| {
        let handles: Vec<_> = ranges
            .iter()
            .zip(slices)
            .map(|(range, slice)| {
                let start = range.start;
                scope.spawn(move || kernel(&board, start, slice))
            })
            .collect();

        // join everything before reporting, a pass is all or nothing
        let mut outcome = Ok(());
        for (worker, handle) in handles.into_iter().enumerate() {
            if handle.join().is_err() && outcome.is_ok() {
                outcome = Err(StepError::WorkerPanicked { worker });
            }
        }
        outcome
    })
}

#[cfg(feature = "pool")]
fn run_pool<F>(
    pool: &rayon::ThreadPool,
    board: Board<'_>,
    next: &mut [bool],
    ranges: &[Range<usize>],
    kernel: F,
) -> Result<(), StepError>
where
    F: Fn(&Board<'_>, usize, &mut [bool]) + Sync,
{
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use rayon::prelude::*;

    let slices = split_mut(next, ranges);
    pool.install(|| {
        ranges
            .par_iter()
            .zip(slices)
            .enumerate()
            .map(|(worker, (range, slice))| {
                catch_unwind(AssertUnwindSafe(|| kernel(&board, range.start, slice)))
                    .map_err(|_| StepError::WorkerPanicked { worker })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .collect()
    })
}

/// how an update pass is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    Serial,
    Threads(usize),
    Pool(usize),
}

impl Engine {
    /// non-positive requests run serially.
    pub fn from_workers(requested: i64, pooled: bool) -> Self {
        match usize::try_from(requested) {
            Ok(workers) if workers > 0 && pooled => Engine::Pool(workers),
            Ok(workers) if workers > 0 => Engine::Threads(workers),
            _ => Engine::Serial,
        }
    }

    /// fills the next buffer of `grid` from its active one.
    pub fn step(self, grid: &mut Grid) -> Result<(), StepError> {
        match self {
            Engine::Serial => {
                step(grid);
                Ok(())
            }
            Engine::Threads(workers) => step_parallel(grid, Some(workers)),
            Engine::Pool(workers) => step_pooled(grid, Some(workers)),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Serial => write!(f, "step()"),
            Engine::Threads(workers) => write!(f, "step_parallel({workers})"),
            Engine::Pool(workers) => write!(f, "step_pooled({workers})"),
        }
    }
}
