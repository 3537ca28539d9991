use std::{
    io::{self, stdout, Stdout, Write},
    thread,
    time::Duration,
};

use crate::Board;

pub use canvas::Canvas;
mod canvas;

/// pretends rendering is slow, as a real display pipeline would be.
const SYNTHETIC_DELAY: Duration = Duration::from_millis(50);

/// draws generations in place on a terminal.
pub struct View<W = Stdout>
where
    W: Write,
{
    out: W,
    synthetic_delay: bool,
    drawn_lines: usize,
}

impl View<Stdout> {
    pub fn stdout(synthetic_delay: bool) -> Self {
        Self::new(stdout(), synthetic_delay)
    }
}

impl<W> View<W>
where
    W: Write,
{
    pub fn new(out: W, synthetic_delay: bool) -> Self {
        Self {
            out,
            synthetic_delay,
            drawn_lines: 0,
        }
    }

    /// draws `board`, replacing the previous frame if there is one.
    pub fn display(&mut self, board: &Board<'_>) -> io::Result<()> {
        if self.drawn_lines > 0 {
            write!(self.out, "\r")?;
            if self.drawn_lines > 1 {
                let up = termion::cursor::Up((self.drawn_lines - 1) as u16);
                write!(self.out, "{up}")?;
            }
        }
        if self.synthetic_delay {
            thread::sleep(SYNTHETIC_DELAY);
        }

        let canvas = Canvas::from_board(board);
        write!(self.out, "{canvas}\r")?;
        self.out.flush()?;
        self.drawn_lines = canvas.height();
        Ok(())
    }

    /// moves past the last frame.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.drawn_lines > 0 {
            writeln!(self.out)?;
            self.drawn_lines = 0;
        }
        self.out.flush()
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// grid dimensions filling the terminal, one line kept for the cursor.
pub fn screen_dimensions() -> io::Result<(usize, usize)> {
    let (columns, lines) = termion::terminal_size()?;
    let height = (lines.saturating_sub(1) as usize) * 4;
    let width = columns as usize * 2;
    Ok((height, width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pos, Grid, Pos};

    #[test]
    fn redraw_moves_back_over_previous_frame() {
        let mut grid = Grid::new(12, 2).unwrap();
        let mut view = View::new(Vec::new(), false);

        view.display(&grid.active()).unwrap();
        grid.set(pos!(0, 0), true);
        view.display(&grid.active()).unwrap();
        view.finish().unwrap();

        let written = String::from_utf8(view.into_inner()).unwrap();
        let blank = "\u{2800}\n\u{2800}\n\u{2800}\r";
        let up = termion::cursor::Up(2).to_string();
        let second = "\u{2801}\n\u{2800}\n\u{2800}\r";
        assert_eq!(written, format!("{blank}\r{up}{second}\n"));
    }

    #[test]
    fn finish_without_frames_writes_nothing() {
        let mut view = View::new(Vec::new(), false);
        view.finish().unwrap();
        assert!(view.into_inner().is_empty());
    }
}
