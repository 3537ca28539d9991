use crate::{Board, Pos};

pub fn live_neighbors(board: &Board<'_>, pos: Pos) -> usize {
    board.neighbors(pos).filter(|&p| board.get(p)).count()
}

/// B3/S23: a live cell survives with 2 or 3 live neighbors, a dead one is born with 3.
pub fn next_state(board: &Board<'_>, pos: Pos) -> bool {
    match (board.get(pos), live_neighbors(board, pos)) {
        (true, 2 | 3) => true, // stay
        (false, 3) => true,    // becomes alive
        _ => false,            // dies or stays dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{pos, Grid, Topology};

    /// 4x2 grid with the given cells alive.
    fn grid(alive: &[(usize, usize)]) -> Grid {
        let mut grid = Grid::new(4, 2).unwrap();
        for &(row, col) in alive {
            grid.set(pos!(row, col), true);
        }
        grid
    }

    fn next_of(alive: &[(usize, usize)], row: usize, col: usize) -> bool {
        let grid = grid(alive);
        next_state(&grid.active(), pos!(row, col))
    }

    #[test]
    fn dead_cell_with_three_neighbors_is_born() {
        assert!(next_of(&[(0, 0), (0, 1), (2, 0)], 1, 1));
    }

    #[test]
    fn dead_cell_with_two_or_four_neighbors_stays_dead() {
        assert!(!next_of(&[(0, 0), (2, 1)], 1, 1));
        assert!(!next_of(&[(0, 0), (0, 1), (2, 0), (2, 1)], 1, 1));
    }

    #[test]
    fn live_cell_with_one_neighbor_dies() {
        assert!(!next_of(&[(1, 1), (0, 0)], 1, 1));
    }

    #[test]
    fn live_cell_with_two_neighbors_survives() {
        assert!(next_of(&[(1, 1), (0, 0), (2, 1)], 1, 1));
    }

    #[test]
    fn live_cell_with_four_neighbors_dies() {
        assert!(!next_of(&[(1, 1), (0, 0), (0, 1), (2, 0), (2, 1)], 1, 1));
    }

    #[test]
    fn corner_is_clipped_not_wrapped() {
        assert!(next_of(&[(0, 1), (1, 0), (1, 1)], 0, 0));
        // cells across the bottom edge are not neighbors of the top row
        assert!(!next_of(&[(3, 0), (3, 1), (0, 1)], 0, 0));
    }

    #[test]
    fn toroidal_corner_sees_across_edges() {
        let mut grid = Grid::new(8, 4).unwrap().with_topology(Topology::Toroidal);
        for p in [pos!(7, 3), pos!(7, 0), pos!(0, 3)] {
            grid.set(p, true);
        }
        assert_eq!(live_neighbors(&grid.active(), pos!(0, 0)), 3);
        assert!(next_state(&grid.active(), pos!(0, 0)));
    }
}
