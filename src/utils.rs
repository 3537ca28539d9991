use std::time::Duration;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

#[macro_export]
macro_rules! pos {
    ($row:expr, $col:expr) => {
        Pos {
            row: $row,
            col: $col,
        }
    };
}

impl Pos {
    /// row-major linearization: index `i` lives at `(i / width, i % width)`.
    pub fn from_index(index: usize, width: usize) -> Self {
        pos!(index / width, index % width)
    }

    pub fn index(self, width: usize) -> usize {
        self.row * width + self.col
    }
}

/// formats a duration in seconds with millisecond precision.
pub fn secs(duration: Duration) -> String {
    format!("{:.3}", duration.as_secs_f64())
}
