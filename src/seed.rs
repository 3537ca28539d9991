use rand::Rng;

use crate::{pos, Grid, GridError, Pos};

/// fills the active generation with cells alive with probability `density`.
pub fn random(grid: &mut Grid, density: f64, rng: &mut impl Rng) -> Result<(), GridError> {
    let density = density.clamp(0.0, 1.0);
    let cells: Vec<bool> = (0..grid.len()).map(|_| rng.gen_bool(density)).collect();
    grid.seed(&cells)
}

/// reads a text pattern where `#` marks a live cell, anything else a dead one.
pub fn parse_pattern(str: &str) -> Vec<Pos> {
    let mut result = vec![];
    let mut pos = pos!(0, 0);
    for c in str.chars() {
        match c {
            '#' => {
                result.push(pos);
                pos.col += 1
            }
            '\n' => pos = pos!(pos.row + 1, 0),
            '\r' => (),
            _ => pos.col += 1,
        }
    }
    result
}

/// activates the pattern cells that fit on the grid, returns how many were dropped.
pub fn pattern(grid: &mut Grid, actives: impl IntoIterator<Item = Pos>) -> usize {
    let mut clipped = 0;
    for active in actives {
        if active.row < grid.height() && active.col < grid.width() {
            grid.set(active, true);
        } else {
            clipped += 1;
        }
    }
    clipped
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn parses_hash_pattern() {
        let actives = parse_pattern(" #\n  #\r\n###\n");
        assert_eq!(
            actives,
            vec![pos!(0, 1), pos!(1, 2), pos!(2, 0), pos!(2, 1), pos!(2, 2)]
        );
    }

    #[test]
    fn pattern_is_clipped_to_the_grid() {
        let mut grid = Grid::new(4, 2).unwrap();
        let clipped = pattern(&mut grid, parse_pattern("###\n\n\n\n#"));
        assert_eq!(clipped, 2);
        assert!(grid.active().get(pos!(0, 0)));
        assert!(grid.active().get(pos!(0, 1)));
        assert_eq!(grid.active().population(), 2);
    }

    #[test]
    fn random_seed_is_reproducible() {
        let mut a = Grid::new(40, 40).unwrap();
        let mut b = Grid::new(40, 40).unwrap();
        random(&mut a, 0.2, &mut StdRng::seed_from_u64(42)).unwrap();
        random(&mut b, 0.2, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a.digest(), b.digest());

        let population = a.active().population();
        assert!(population > 160 && population < 480, "{population}");
    }

    #[test]
    fn density_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut grid = Grid::new(8, 8).unwrap();
        random(&mut grid, 1.0, &mut rng).unwrap();
        assert_eq!(grid.active().population(), 64);
        random(&mut grid, 0.0, &mut rng).unwrap();
        assert_eq!(grid.active().population(), 0);
    }
}
