use crate::{pos, Board, Pos};

const BRAILLE_BASE: u32 = 0x2800;

/// cell offsets (row, col) inside a glyph, in braille dot bit order.
const DOTS: [(usize, usize); 8] = [
    (0, 0),
    (1, 0),
    (2, 0),
    (0, 1),
    (1, 1),
    (2, 1),
    (3, 0),
    (3, 1),
];

/// a board packed into braille glyphs, each covering 4 rows by 2 columns of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    lines: Vec<String>,
}

impl Canvas {
    pub fn from_board(board: &Board<'_>) -> Self {
        let rows = board.height() / 4;
        let cols = board.width() / 2;
        let lines = (0..rows)
            .map(|row| {
                (0..cols)
                    .map(|col| glyph(board, pos!(row * 4, col * 2)))
                    .collect::<String>()
            })
            .collect();
        Self { lines }
    }

    pub fn height(&self) -> usize {
        self.lines.len()
    }
}

fn glyph(board: &Board<'_>, origin: Pos) -> char {
    let bits = DOTS
        .iter()
        .enumerate()
        .filter(|&(_, &(dr, dc))| board.get(pos!(origin.row + dr, origin.col + dc)))
        .fold(0u32, |bits, (bit, _)| bits | 1 << bit);
    // every value in 0..=0xff is a valid braille pattern
    char::from_u32(BRAILLE_BASE + bits).unwrap_or(' ')
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lines.join("\n"))
    }
}
