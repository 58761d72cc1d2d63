use crate::simulation::cell::Cell;

/// Direction of a grid growth, named from the viewer's perspective.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Growth {
    Up,
    Down,
    Left,
    Right,
}

/// The cell store: a row-major flat buffer plus the world-space position
/// of cell (0,0)'s top-left corner.
///
/// The anchor ties grid indices to world space: cell (r,c) covers the
/// square starting at `anchor + (c,r) * cell_size`. Growing up or left
/// shifts the anchor backward by the same distance the contents are
/// inset, so every pre-existing cell keeps its world position.
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    anchor: (f32, f32),
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "grid dimensions must be positive");
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
            anchor: (0.0, 0.0),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// World-space position of cell (0,0)'s top-left corner.
    pub fn anchor(&self) -> (f32, f32) {
        self.anchor
    }

    /// Callers must range-check first; the coordinate mapper is the only
    /// producer of indices.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[self.index(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        let i = self.index(row, col);
        self.cells[i] = cell;
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Grow by `amount` rows/cols in the given direction.
    ///
    /// A single allocate-copy-reanchor operation: existing contents land
    /// at an inset of `amount` for Up/Left (with the anchor shifted back
    /// by `amount * cell_size` on that axis) and at offset 0 for
    /// Down/Right. Newly exposed cells are Empty.
    pub fn grow(&mut self, direction: Growth, amount: usize, cell_size: f32) {
        let (new_rows, new_cols) = match direction {
            Growth::Up | Growth::Down => (self.rows + amount, self.cols),
            Growth::Left | Growth::Right => (self.rows, self.cols + amount),
        };

        let (row_inset, col_inset) = match direction {
            Growth::Up => (amount, 0),
            Growth::Left => (0, amount),
            Growth::Down | Growth::Right => (0, 0),
        };

        let mut next = vec![Cell::Empty; new_rows * new_cols];
        for r in 0..self.rows {
            let src = r * self.cols;
            let dst = (r + row_inset) * new_cols + col_inset;
            next[dst..dst + self.cols].copy_from_slice(&self.cells[src..src + self.cols]);
        }

        match direction {
            Growth::Up => self.anchor.1 -= amount as f32 * cell_size,
            Growth::Left => self.anchor.0 -= amount as f32 * cell_size,
            Growth::Down | Growth::Right => {}
        }

        self.rows = new_rows;
        self.cols = new_cols;
        self.cells = next;

        log::debug!(
            "grid grew {:?} by {} -> {}x{}",
            direction,
            amount,
            self.rows,
            self.cols
        );
    }

    /// Move the world-space origin of the grid. Used when the view scale
    /// changes and the rescale is anchored at the cursor.
    pub fn re_anchor(&mut self, x: f32, y: f32) {
        self.anchor = (x, y);
    }

    /// Swap in a fully computed next generation of identical dimensions.
    /// The engine's scratch buffer receives the previous generation.
    pub(crate) fn swap_cells(&mut self, other: &mut Vec<Cell>) {
        debug_assert_eq!(other.len(), self.cells.len());
        std::mem::swap(&mut self.cells, other);
    }

    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.rows && col < self.cols, "cell index out of range");
        row * self.cols + col
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn new_grid_is_all_empty() {
        let grid = Grid::new(23, 40);
        for r in 0..grid.rows() {
            for c in 0..grid.cols() {
                assert_eq!(grid.get(r, c), Cell::Empty);
            }
        }
        assert_eq!(grid.anchor(), (0.0, 0.0));
    }

    #[test]
    fn set_then_get() {
        let mut grid = Grid::new(4, 4);
        grid.set(2, 3, Cell::ElectronHead);
        assert_eq!(grid.get(2, 3), Cell::ElectronHead);
        assert_eq!(grid.get(3, 2), Cell::Empty);
    }

    #[test]
    fn clear_resets_every_cell() {
        let mut grid = Grid::new(3, 3);
        grid.set(0, 0, Cell::Conductor);
        grid.set(2, 2, Cell::ElectronTail);
        grid.clear();
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(grid.get(r, c), Cell::Empty);
            }
        }
    }

    #[test]
    fn grow_left_insets_contents_and_shifts_anchor() {
        let mut grid = Grid::new(3, 5);
        grid.set(1, 2, Cell::Conductor);

        grid.grow(Growth::Left, 4, 20.0);

        assert_eq!((grid.rows(), grid.cols()), (3, 9));
        assert_eq!(grid.get(1, 6), Cell::Conductor);
        assert_eq!(grid.anchor(), (-80.0, 0.0));
        // The vacated border is empty.
        for r in 0..3 {
            for c in 0..4 {
                assert_eq!(grid.get(r, c), Cell::Empty);
            }
        }
    }

    #[test]
    fn grow_up_insets_contents_and_shifts_anchor() {
        let mut grid = Grid::new(3, 5);
        grid.set(0, 4, Cell::ElectronHead);

        grid.grow(Growth::Up, 2, 10.0);

        assert_eq!((grid.rows(), grid.cols()), (5, 5));
        assert_eq!(grid.get(2, 4), Cell::ElectronHead);
        assert_eq!(grid.anchor(), (0.0, -20.0));
    }

    #[test]
    fn grow_down_and_right_keep_indices_and_anchor() {
        let mut grid = Grid::new(3, 3);
        grid.set(2, 2, Cell::ElectronTail);

        grid.grow(Growth::Down, 3, 20.0);
        grid.grow(Growth::Right, 3, 20.0);

        assert_eq!((grid.rows(), grid.cols()), (6, 6));
        assert_eq!(grid.get(2, 2), Cell::ElectronTail);
        assert_eq!(grid.anchor(), (0.0, 0.0));
        assert_eq!(grid.get(5, 5), Cell::Empty);
    }

    proptest! {
        /// Growing keeps every existing cell at its original world-space
        /// position: index shifts by the inset, anchor moves to match.
        #[test]
        fn grow_preserves_world_positions(
            rows in 1usize..12,
            cols in 1usize..12,
            r in 0usize..12,
            c in 0usize..12,
            amount in 1usize..10,
        ) {
            prop_assume!(r < rows && c < cols);
            let cell_size = 20.0;

            for direction in [Growth::Up, Growth::Down, Growth::Left, Growth::Right] {
                let mut grid = Grid::new(rows, cols);
                grid.set(r, c, Cell::Conductor);
                let (ax, ay) = grid.anchor();
                let world = (ax + c as f32 * cell_size, ay + r as f32 * cell_size);

                grid.grow(direction, amount, cell_size);

                let (new_r, new_c) = match direction {
                    Growth::Up => (r + amount, c),
                    Growth::Left => (r, c + amount),
                    Growth::Down | Growth::Right => (r, c),
                };
                prop_assert_eq!(grid.get(new_r, new_c), Cell::Conductor);

                let (ax, ay) = grid.anchor();
                let world_after =
                    (ax + new_c as f32 * cell_size, ay + new_r as f32 * cell_size);
                prop_assert_eq!(world, world_after);
            }
        }
    }
}
