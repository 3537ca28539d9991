use std::hash::{Hash, Hasher};

use metrohash::MetroHash64;

use crate::{pos, GridError, Pos};

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// how the neighbor window behaves at the grid edges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// out-of-range neighbors do not exist.
    #[default]
    Bounded,
    /// edges wrap around.
    Toroidal,
}

impl Topology {
    /// positions of the neighbors of `pos`, the center excluded.
    pub fn neighbors(self, pos: Pos, height: usize, width: usize) -> impl Iterator<Item = Pos> {
        NEIGHBOR_OFFSETS
            .into_iter()
            .filter_map(move |(dr, dc)| self.offset(pos, dr, dc, height, width))
    }

    fn offset(self, pos: Pos, dr: isize, dc: isize, height: usize, width: usize) -> Option<Pos> {
        match self {
            Topology::Bounded => {
                let row = pos.row.checked_add_signed(dr).filter(|&row| row < height)?;
                let col = pos.col.checked_add_signed(dc).filter(|&col| col < width)?;
                Some(pos!(row, col))
            }
            Topology::Toroidal => Some(pos!(wrap(pos.row, dr, height), wrap(pos.col, dc, width))),
        }
    }
}

fn wrap(n: usize, delta: isize, len: usize) -> usize {
    (n as isize + delta).rem_euclid(len as isize) as usize
}

/// read-only view over one buffer of a [`Grid`].
#[derive(Debug, Clone, Copy)]
pub struct Board<'a> {
    cells: &'a [bool],
    height: usize,
    width: usize,
    topology: Topology,
}

impl<'a> Board<'a> {
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, pos: Pos) -> bool {
        self.cells[pos.index(self.width)]
    }

    pub fn neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> {
        self.topology.neighbors(pos, self.height, self.width)
    }

    pub fn cells(&self) -> &'a [bool] {
        self.cells
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }
}

/// the double-buffered cell grid.
///
/// `active` is the current generation, read by the rule and the renderer. `next` is the
/// write target of an update pass. [`Grid::swap`] exchanges the two roles without
/// copying a single cell.
#[derive(Debug, Clone)]
pub struct Grid {
    height: usize,
    width: usize,
    topology: Topology,
    generation: u64,
    active: Vec<bool>,
    next: Vec<bool>,
}

impl Grid {
    pub fn new(height: usize, width: usize) -> Result<Self, GridError> {
        if height == 0 || height % 4 != 0 || width == 0 || width % 2 != 0 {
            return Err(GridError::InvalidDimension { height, width });
        }
        let len = height
            .checked_mul(width)
            .filter(|&len| len <= isize::MAX as usize)
            .ok_or(GridError::TooLarge { height, width })?;
        Ok(Self {
            height,
            width,
            topology: Topology::default(),
            generation: 0,
            active: vec![false; len],
            next: vec![false; len],
        })
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn len(&self) -> usize {
        self.height * self.width
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// number of swaps performed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active(&self) -> Board<'_> {
        self.board(&self.active)
    }

    #[cfg(test)]
    pub fn next(&self) -> Board<'_> {
        self.board(&self.next)
    }

    fn board<'a>(&self, cells: &'a [bool]) -> Board<'a> {
        Board {
            cells,
            height: self.height,
            width: self.width,
            topology: self.topology,
        }
    }

    /// writes a cell of the active generation.
    pub fn set(&mut self, pos: Pos, alive: bool) {
        debug_assert!(
            pos.row < self.height && pos.col < self.width,
            "{pos:?} is outside a {}x{} grid",
            self.height,
            self.width
        );
        let index = pos.index(self.width);
        self.active[index] = alive;
    }

    /// overwrites the whole active generation with a row-major buffer.
    pub fn seed(&mut self, cells: &[bool]) -> Result<(), GridError> {
        if cells.len() != self.active.len() {
            return Err(GridError::ShapeMismatch {
                expected: self.active.len(),
                actual: cells.len(),
            });
        }
        self.active.copy_from_slice(cells);
        Ok(())
    }

    /// the active generation as a shared view and the next one as an exclusive slice.
    pub(crate) fn split(&mut self) -> (Board<'_>, &mut [bool]) {
        let board = Board {
            cells: &self.active,
            height: self.height,
            width: self.width,
            topology: self.topology,
        };
        (board, &mut self.next)
    }

    /// promotes the next buffer to be the active one.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.active, &mut self.next);
        self.generation += 1;
    }

    /// fingerprint of the active generation.
    pub fn digest(&self) -> u64 {
        let mut hasher = MetroHash64::default();
        self.height.hash(&mut hasher);
        self.width.hash(&mut hasher);
        self.active().cells().hash(&mut hasher);
        hasher.finish()
    }
}

pub use partition::{partition, split_mut};
pub mod partition;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_dimensions() {
        for (height, width) in [(0, 2), (4, 0), (6, 2), (4, 3), (2, 2), (0, 0)] {
            assert_eq!(
                Grid::new(height, width).unwrap_err(),
                GridError::InvalidDimension { height, width }
            );
        }
        assert!(Grid::new(4, 2).is_ok());
        assert!(Grid::new(1000, 1000).is_ok());
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        assert_eq!(
            Grid::new(8, 1 << 62).unwrap_err(),
            GridError::TooLarge {
                height: 8,
                width: 1 << 62
            }
        );
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "outside")]
    fn set_rejects_columns_past_the_edge() {
        let mut grid = Grid::new(4, 2).unwrap();
        grid.set(pos!(0, 5), true);
    }

    #[test]
    fn starts_empty() {
        let grid = Grid::new(8, 6).unwrap();
        assert_eq!(grid.active().population(), 0);
        assert_eq!(grid.next().population(), 0);
        assert_eq!(grid.generation(), 0);
        assert_eq!(grid.topology(), Topology::Bounded);
    }

    #[test]
    fn seed_checks_shape() {
        let mut grid = Grid::new(4, 2).unwrap();
        assert_eq!(
            grid.seed(&[true; 7]),
            Err(GridError::ShapeMismatch {
                expected: 8,
                actual: 7
            })
        );
        grid.seed(&[true, false, false, true, false, false, true, true])
            .unwrap();
        assert!(grid.active().get(pos!(0, 0)));
        assert!(grid.active().get(pos!(1, 1)));
        assert!(!grid.active().get(pos!(2, 0)));
        assert_eq!(grid.active().population(), 4);
    }

    #[test]
    fn swap_exchanges_roles_without_copy() {
        let mut grid = Grid::new(4, 2).unwrap();
        grid.set(pos!(0, 0), true);
        let active_ptr = grid.active().cells().as_ptr();
        let next_ptr = grid.next().cells().as_ptr();

        grid.swap();

        assert_eq!(grid.active().cells().as_ptr(), next_ptr);
        assert_eq!(grid.next().cells().as_ptr(), active_ptr);
        assert!(grid.next().get(pos!(0, 0)));
        assert!(!grid.active().get(pos!(0, 0)));
        assert_eq!(grid.generation(), 1);
    }

    #[test]
    fn bounded_corner_has_three_neighbors() {
        let neighbors: Vec<_> = Topology::Bounded.neighbors(pos!(0, 0), 4, 2).collect();
        assert_eq!(neighbors, vec![pos!(0, 1), pos!(1, 0), pos!(1, 1)]);
        assert_eq!(Topology::Bounded.neighbors(pos!(1, 1), 4, 4).count(), 8);
        assert_eq!(Topology::Bounded.neighbors(pos!(3, 1), 4, 4).count(), 5);
    }

    #[test]
    fn toroidal_corner_wraps() {
        let neighbors: Vec<_> = Topology::Toroidal.neighbors(pos!(0, 0), 8, 4).collect();
        assert_eq!(neighbors.len(), 8);
        assert!(neighbors.contains(&pos!(7, 3)));
        assert!(neighbors.contains(&pos!(7, 0)));
        assert!(neighbors.contains(&pos!(0, 3)));
        assert!(neighbors.contains(&pos!(1, 1)));
    }

    #[test]
    fn digest_tracks_active_generation() {
        let mut a = Grid::new(4, 2).unwrap();
        let b = Grid::new(4, 2).unwrap();
        assert_eq!(a.digest(), b.digest());
        a.set(pos!(3, 1), true);
        assert_ne!(a.digest(), b.digest());
    }
}
