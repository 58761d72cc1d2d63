use crate::simulation::cell::Cell;
use crate::simulation::grid::Grid;

/// Advances the grid one generation at a time.
///
/// The next generation is computed entirely from the previous one, so the
/// engine keeps a scratch buffer and swaps it into the grid once the pass
/// is complete. The scratch persists across steps; a step allocates only
/// when the grid has grown since the last one.
pub struct Engine {
    scratch: Vec<Cell>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            scratch: Vec::new(),
        }
    }

    pub fn step(&mut self, grid: &mut Grid) {
        let (rows, cols) = (grid.rows(), grid.cols());
        self.scratch.clear();
        self.scratch.resize(rows * cols, Cell::Empty);

        for r in 0..rows {
            for c in 0..cols {
                self.scratch[r * cols + c] = next_state(grid, r, c);
            }
        }

        grid.swap_cells(&mut self.scratch);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn next_state(grid: &Grid, row: usize, col: usize) -> Cell {
    match grid.get(row, col) {
        Cell::Empty => Cell::Empty,
        Cell::ElectronHead => Cell::ElectronTail,
        Cell::ElectronTail => Cell::Conductor,
        Cell::Conductor => match head_neighbors(grid, row, col) {
            1 | 2 => Cell::ElectronHead,
            _ => Cell::Conductor,
        },
    }
}

/// Count of ElectronHead cells in the Moore neighborhood. Positions past
/// the grid edge contribute nothing; the automaton is bounded, not
/// toroidal.
fn head_neighbors(grid: &Grid, row: usize, col: usize) -> u32 {
    let mut heads = 0;

    for dr in -1i64..=1 {
        for dc in -1i64..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let r = row as i64 + dr;
            let c = col as i64 + dc;
            if r < 0 || c < 0 || r >= grid.rows() as i64 || c >= grid.cols() as i64 {
                continue;
            }
            if grid.get(r as usize, c as usize) == Cell::ElectronHead {
                heads += 1;
            }
        }
    }

    heads
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn count_state(grid: &Grid, state: Cell) -> usize {
        let mut n = 0;
        for r in 0..grid.rows() {
            for c in 0..grid.cols() {
                if grid.get(r, c) == state {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn head_decays_to_tail_then_conductor() {
        // Decay ignores the neighborhood entirely; surround the head with
        // more heads to prove it.
        let mut grid = Grid::new(3, 3);
        for r in 0..3 {
            for c in 0..3 {
                grid.set(r, c, Cell::ElectronHead);
            }
        }

        let mut engine = Engine::new();
        engine.step(&mut grid);
        assert_eq!(grid.get(1, 1), Cell::ElectronTail);

        engine.step(&mut grid);
        assert_eq!(grid.get(1, 1), Cell::Conductor);
    }

    #[test]
    fn conductor_birth_rule_is_exhaustive_over_neighbor_counts() {
        // Center conductor in a 3x3 grid; fill 0..=8 neighbor slots with
        // heads. Only counts 1 and 2 fire.
        let slots = [
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 0),
            (1, 2),
            (2, 0),
            (2, 1),
            (2, 2),
        ];

        for heads in 0..=8 {
            let mut grid = Grid::new(3, 3);
            grid.set(1, 1, Cell::Conductor);
            for &(r, c) in slots.iter().take(heads) {
                grid.set(r, c, Cell::ElectronHead);
            }

            Engine::new().step(&mut grid);

            let expected = if heads == 1 || heads == 2 {
                Cell::ElectronHead
            } else {
                Cell::Conductor
            };
            assert_eq!(grid.get(1, 1), expected, "with {heads} head neighbors");
        }
    }

    #[test]
    fn corner_cells_count_no_phantom_neighbors() {
        let mut grid = Grid::new(4, 4);
        grid.set(0, 0, Cell::Conductor);
        grid.set(0, 1, Cell::ElectronHead);

        Engine::new().step(&mut grid);

        // One real head neighbor; the five out-of-bounds positions
        // contribute nothing.
        assert_eq!(grid.get(0, 0), Cell::ElectronHead);
    }

    #[test]
    fn signal_propagates_along_a_wire() {
        let mut grid = Grid::new(23, 40);
        grid.set(5, 5, Cell::Conductor);
        grid.set(5, 6, Cell::ElectronHead);

        Engine::new().step(&mut grid);

        assert_eq!(grid.get(5, 5), Cell::ElectronHead);
        assert_eq!(grid.get(5, 6), Cell::ElectronTail);
    }

    #[test]
    fn step_keeps_dimensions() {
        let mut grid = Grid::new(7, 11);
        grid.set(3, 3, Cell::ElectronHead);
        Engine::new().step(&mut grid);
        assert_eq!((grid.rows(), grid.cols()), (7, 11));
    }

    proptest! {
        #[test]
        fn empty_grid_is_a_fixed_point(rows in 1usize..40, cols in 1usize..40) {
            let mut grid = Grid::new(rows, cols);
            Engine::new().step(&mut grid);
            prop_assert_eq!(count_state(&grid, Cell::Empty), rows * cols);
        }

        /// Every head becomes a tail and every tail a conductor in one
        /// step, whatever the rest of the grid holds.
        #[test]
        fn decay_ignores_neighbors(seed in proptest::collection::vec(0u8..4, 25)) {
            let mut grid = Grid::new(5, 5);
            for (i, &s) in seed.iter().enumerate() {
                let cell = match s {
                    0 => Cell::Empty,
                    1 => Cell::Conductor,
                    2 => Cell::ElectronHead,
                    _ => Cell::ElectronTail,
                };
                grid.set(i / 5, i % 5, cell);
            }

            let heads = count_state(&grid, Cell::ElectronHead);
            let tails = count_state(&grid, Cell::ElectronTail);

            let before: Vec<Cell> = (0..25).map(|i| grid.get(i / 5, i % 5)).collect();
            Engine::new().step(&mut grid);

            for (i, &was) in before.iter().enumerate() {
                let now = grid.get(i / 5, i % 5);
                match was {
                    Cell::ElectronHead => prop_assert_eq!(now, Cell::ElectronTail),
                    Cell::ElectronTail => prop_assert_eq!(now, Cell::Conductor),
                    Cell::Empty => prop_assert_eq!(now, Cell::Empty),
                    Cell::Conductor => {}
                }
            }

            // Tail count next generation equals head count this one.
            prop_assert_eq!(count_state(&grid, Cell::ElectronTail), heads);
            prop_assert!(count_state(&grid, Cell::Conductor) >= tails);
        }
    }
}
