//! error types.

use thiserror::Error;

/// grid construction and seeding errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// height must be a positive multiple of 4 and width a positive multiple of 2.
    #[error(
        "invalid dimension {height}x{width}: height must be a positive multiple of 4, \
         width a positive multiple of 2"
    )]
    InvalidDimension { height: usize, width: usize },

    /// the cell count does not fit in memory addressing.
    #[error("grid of {height}x{width} cells is too large")]
    TooLarge { height: usize, width: usize },

    /// a seed buffer does not match the grid shape.
    #[error("seed of {actual} cells does not fit a grid of {expected} cells")]
    ShapeMismatch { expected: usize, actual: usize },
}

/// update pass errors.
#[derive(Debug, Error)]
pub enum StepError {
    /// the requested engine is not available in this build.
    #[error("unsupported engine: {0}")]
    Unsupported(&'static str),

    /// a worker panicked; the whole pass is void.
    #[error("worker {worker} panicked during the update pass")]
    WorkerPanicked { worker: usize },

    /// the worker pool could not be built.
    #[error("worker pool error: {0}")]
    Pool(String),
}

impl StepError {
    /// true when the engine is missing rather than broken.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, StepError::Unsupported(_))
    }
}

/// top-level error.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Step(#[from] StepError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
