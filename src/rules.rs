//! Generation rules for the color Game of Life.
//!
//! Birth and survival follow the classic thresholds; newborn cells get their
//! color from the live neighbors that produced them (see [`crate::color::inherit`]).

use rand::Rng;

use crate::color::{inherit, MutationSpeeds, Rgb};
use crate::grid::{Cell, Grid};

/// Game of Life standard rules:
/// 1. Any live cell with fewer than two live neighbors dies (underpopulation)
/// 2. Any live cell with two or three live neighbors lives (survival)
/// 3. Any live cell with more than three live neighbors dies (overpopulation)
/// 4. Any dead cell with exactly three live neighbors becomes alive (reproduction)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    /// Minimum neighbors for a live cell to survive
    pub survival_min: u32,
    /// Maximum neighbors for a live cell to survive
    pub survival_max: u32,
    /// Number of neighbors for a dead cell to become alive
    pub birth_count: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        // B3/S23
        Self {
            survival_min: 2,
            survival_max: 3,
            birth_count: 3,
        }
    }
}

impl GameRules {
    pub fn survives(&self, neighbors: u32) -> bool {
        (self.survival_min..=self.survival_max).contains(&neighbors)
    }

    pub fn is_born(&self, neighbors: u32) -> bool {
        neighbors == self.birth_count
    }
}

/// Neighbor offsets in scan order: row by row, left to right.
const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Colors of the live neighbors of (row, col) in scan order. Positions past the
/// grid edge do not count; there is no wraparound.
pub fn live_neighbor_colors(grid: &Grid, row: usize, col: usize) -> Vec<Rgb> {
    NEIGHBOR_OFFSETS
        .iter()
        .filter_map(|&(dr, dc)| {
            let p = grid.point_at(row as i64 + dr, col as i64 + dc)?;
            grid.get(p.row, p.col)?.color()
        })
        .collect()
}

pub fn count_neighbors(grid: &Grid, row: usize, col: usize) -> u32 {
    live_neighbor_colors(grid, row, col).len() as u32
}

/// Computes the next generation from `grid`.
///
/// Every cell of the result is derived from the previous generation only; the
/// input is never modified.
pub fn advance<R: Rng + ?Sized>(
    grid: &Grid,
    rules: &GameRules,
    speeds: MutationSpeeds,
    rng: &mut R,
) -> Grid {
    let mut next_rows = Vec::with_capacity(grid.height());

    for (row, cells) in grid.rows().enumerate() {
        let mut next_row = Vec::with_capacity(cells.len());
        for (col, cell) in cells.iter().enumerate() {
            let parents = live_neighbor_colors(grid, row, col);
            let neighbors = parents.len() as u32;

            next_row.push(match cell {
                Cell::Alive(color) if rules.survives(neighbors) => Cell::Alive(*color),
                Cell::Alive(_) => Cell::Empty,
                Cell::Empty if rules.is_born(neighbors) => {
                    inherit(&parents, speeds, rng).map_or(Cell::Empty, Cell::Alive)
                }
                Cell::Empty => Cell::Empty,
            });
        }
        next_rows.push(next_row);
    }

    Grid::from_rows(grid.width(), next_rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    const C: Rgb = Rgb::new(0x11, 0x22, 0x33);
    const RED: Rgb = Rgb::new(0xff, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 0xff);

    fn grid_with(cells: &[(usize, usize, Rgb)]) -> Grid {
        let mut grid = Grid::new(10, 10);
        for &(row, col, color) in cells {
            grid.set(row, col, Cell::Alive(color)).unwrap();
        }
        grid
    }

    fn step(grid: &Grid, speeds: MutationSpeeds) -> Grid {
        let mut rng = SmallRng::seed_from_u64(0);
        advance(grid, &GameRules::default(), speeds, &mut rng)
    }

    #[test]
    fn rule_table() {
        let rules = GameRules::default();
        assert!(!rules.survives(1));
        assert!(rules.survives(2));
        assert!(rules.survives(3));
        assert!(!rules.survives(4));
        assert!(rules.is_born(3));
        assert!(!rules.is_born(2));
    }

    #[test]
    fn corner_cells_have_no_wraparound_neighbors() {
        let grid = grid_with(&[(0, 9, C), (9, 0, C), (9, 9, C), (1, 1, C)]);
        assert_eq!(count_neighbors(&grid, 0, 0), 1);
    }

    #[test]
    fn neighbor_colors_follow_scan_order() {
        let grid = grid_with(&[(5, 6, BLUE), (4, 4, RED), (6, 5, C)]);
        assert_eq!(live_neighbor_colors(&grid, 5, 5), vec![RED, BLUE, C]);
    }

    #[test]
    fn lone_cell_dies() {
        let grid = grid_with(&[(4, 4, C)]);
        assert_eq!(step(&grid, MutationSpeeds::NONE).live_count(), 0);
    }

    #[test]
    fn crowded_cell_dies() {
        // Center of a plus sign has four neighbors.
        let grid = grid_with(&[(4, 4, C), (3, 4, C), (5, 4, C), (4, 3, C), (4, 5, C)]);
        let next = step(&grid, MutationSpeeds::NONE);
        assert_eq!(next.get(4, 4), Some(Cell::Empty));
    }

    #[test]
    fn block_is_a_fixed_point() {
        let grid = grid_with(&[(2, 2, C), (2, 3, C), (3, 2, C), (3, 3, C)]);
        let next = step(&grid, MutationSpeeds::new(50.0, 50.0));
        assert_eq!(next, grid);
        assert_eq!(step(&next, MutationSpeeds::NONE), grid);
    }

    #[test]
    fn blinker_oscillates() {
        let horizontal = grid_with(&[(4, 3, C), (4, 4, C), (4, 5, C)]);
        let vertical = grid_with(&[(3, 4, C), (4, 4, C), (5, 4, C)]);
        assert_eq!(step(&horizontal, MutationSpeeds::NONE), vertical);
        assert_eq!(step(&vertical, MutationSpeeds::NONE), horizontal);
    }

    #[test]
    fn survivor_keeps_its_color() {
        // (2, 2) has two live neighbors and keeps its color.
        let grid = grid_with(&[(2, 2, C), (2, 3, RED), (3, 2, BLUE)]);
        let next = step(&grid, MutationSpeeds::new(50.0, 50.0));
        assert_eq!(next.get(2, 2), Some(Cell::Alive(C)));
    }

    #[test]
    fn birth_from_same_colored_parents_without_mutation() {
        let grid = grid_with(&[(1, 1, C), (1, 2, C), (1, 3, C)]);
        let next = step(&grid, MutationSpeeds::NONE);
        assert_eq!(next.get(0, 2), Some(Cell::Alive(C)));
        assert_eq!(next.get(2, 2), Some(Cell::Alive(C)));
    }

    #[test]
    fn birth_from_mixed_parents_takes_first_in_scan_order() {
        let grid = grid_with(&[(1, 1, BLUE), (1, 2, RED), (1, 3, RED)]);
        let next = step(&grid, MutationSpeeds::new(50.0, 50.0));
        // Above the row, (1, 1) is scanned first; below it too.
        assert_eq!(next.get(0, 2), Some(Cell::Alive(BLUE)));
        assert_eq!(next.get(2, 2), Some(Cell::Alive(BLUE)));
    }

    #[test]
    fn black_parents_with_lightness_drift_cannot_reproduce() {
        let black = Rgb::new(0, 0, 0);
        let grid = grid_with(&[(1, 1, black), (1, 2, black), (1, 3, black)]);
        let next = step(&grid, MutationSpeeds::new(0.0, 4.0));
        assert_eq!(next.get(0, 2), Some(Cell::Empty));
        assert_eq!(next.get(2, 2), Some(Cell::Empty));
        // The survivor in the middle is unaffected.
        assert_eq!(next.get(1, 2), Some(Cell::Alive(black)));
    }

    #[test]
    fn advance_keeps_non_square_dimensions() {
        let mut grid = Grid::new(13, 11);
        for col in 10..13 {
            grid.set(10, col, Cell::Alive(C)).unwrap();
        }
        let next = step(&grid, MutationSpeeds::NONE);
        assert_eq!(next.dimensions(), (13, 11));
        // Bottom-right blinker loses its vertical half past the edge.
        assert_eq!(next.get(9, 11), Some(Cell::Alive(C)));
        assert_eq!(next.get(10, 11), Some(Cell::Alive(C)));
        assert_eq!(next.live_count(), 2);
    }

    #[test]
    fn advance_is_deterministic_without_mutation() {
        let grid = grid_with(&[(0, 1, C), (1, 2, RED), (2, 0, C), (2, 1, BLUE), (2, 2, C)]);
        let mut a = SmallRng::seed_from_u64(1);
        let mut b = SmallRng::seed_from_u64(2);
        let rules = GameRules::default();
        let mut ga = grid.clone();
        let mut gb = grid.clone();
        for _ in 0..8 {
            ga = advance(&ga, &rules, MutationSpeeds::NONE, &mut a);
            gb = advance(&gb, &rules, MutationSpeeds::NONE, &mut b);
        }
        assert_eq!(ga, gb);
        assert_eq!(ga.live_count(), 5);
    }
}
