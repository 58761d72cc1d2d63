use std::ops::Range;

use crate::config;
use crate::simulation::{Grid, Growth};

/// Screen-space rectangle in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

/// The view transform.
///
/// `target` is the world point under the screen's top-left pixel, so
/// screen-to-world is a pure translation. `cell_size` is the one scale
/// factor in play: world units coincide with screen pixels and zooming
/// changes how many of them a cell spans.
pub struct Camera {
    pub target: (f32, f32),
    pub cell_size: f32,
}

impl Camera {
    pub fn new(cell_size: f32) -> Self {
        Self {
            target: (0.0, 0.0),
            cell_size,
        }
    }

    pub fn screen_to_world(&self, screen: (f32, f32)) -> (f32, f32) {
        (self.target.0 + screen.0, self.target.1 + screen.1)
    }

    pub fn world_to_screen(&self, world: (f32, f32)) -> (f32, f32) {
        (world.0 - self.target.0, world.1 - self.target.1)
    }

    /// Drag the view by a screen-space delta.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.target.0 -= dx;
        self.target.1 -= dy;
    }

    /// Grid coordinate under a screen point, unclamped. May be negative
    /// or past the far edge; used for the hover outline.
    pub fn cell_under(&self, grid: &Grid, screen: (f32, f32)) -> (i64, i64) {
        let (wx, wy) = self.screen_to_world(screen);
        let (ax, ay) = grid.anchor();
        let row = ((wy - ay) / self.cell_size).floor() as i64;
        let col = ((wx - ax) / self.cell_size).floor() as i64;
        (row, col)
    }

    /// In-bounds grid coordinate under a screen point, or None when the
    /// point falls outside the grid.
    pub fn hit_cell(&self, grid: &Grid, screen: (f32, f32)) -> Option<(usize, usize)> {
        let (row, col) = self.cell_under(grid, screen);
        if row >= 0 && col >= 0 && (row as usize) < grid.rows() && (col as usize) < grid.cols() {
            Some((row as usize, col as usize))
        } else {
            None
        }
    }

    /// Screen-space rectangle covered by a grid coordinate (clamped or
    /// not — the rect is well defined either way).
    pub fn cell_rect(&self, grid: &Grid, (row, col): (i64, i64)) -> Rect {
        let (ax, ay) = grid.anchor();
        let world = (
            ax + col as f32 * self.cell_size,
            ay + row as f32 * self.cell_size,
        );
        let (sx, sy) = self.world_to_screen(world);
        Rect::new(sx, sy, self.cell_size, self.cell_size)
    }

    /// Minimal visible index rectangle for the given screen size, clamped
    /// to grid bounds. Rendering iterates exactly these rows and columns.
    pub fn visible_cells(
        &self,
        grid: &Grid,
        screen_w: f32,
        screen_h: f32,
    ) -> (Range<usize>, Range<usize>) {
        let (ax, ay) = grid.anchor();
        let s = self.cell_size;

        let clamp = |v: f32, hi: usize| -> usize { (v.max(0.0) as usize).min(hi) };

        let start_row = clamp(((self.target.1 - ay) / s).floor(), grid.rows());
        let end_row = clamp(((self.target.1 + screen_h - ay) / s).ceil(), grid.rows());
        let start_col = clamp(((self.target.0 - ax) / s).floor(), grid.cols());
        let end_col = clamp(((self.target.0 + screen_w - ax) / s).ceil(), grid.cols());

        (start_row..end_row, start_col..end_col)
    }

    /// Change the cell size, keeping the grid coordinate under `cursor`
    /// on the same screen pixel. The camera translation is untouched; the
    /// grid anchor absorbs the rescale.
    pub fn zoom_around(&mut self, grid: &mut Grid, cursor: (f32, f32), new_size: f32) {
        let new_size = new_size.clamp(config::MIN_CELL_SIZE, config::MAX_CELL_SIZE);
        if new_size == self.cell_size {
            return;
        }

        let (wx, wy) = self.screen_to_world(cursor);
        let (ax, ay) = grid.anchor();
        let gx = (wx - ax) / self.cell_size;
        let gy = (wy - ay) / self.cell_size;

        grid.re_anchor(wx - gx * new_size, wy - gy * new_size);
        self.cell_size = new_size;
    }
}

/// Grow the grid wherever the camera's visible world rectangle has left
/// its bounds. Runs once per frame before rendering; all four directions
/// are checked so a diagonal pan can grow two axes at once. The increment
/// is fixed — a very fast pan may out-run it for a frame, and the
/// uncovered area simply reads as out of bounds until the next check.
pub fn grow_to_fit(grid: &mut Grid, camera: &Camera, screen_w: f32, screen_h: f32) {
    let s = camera.cell_size;
    let inc = config::GROWTH_INCREMENT;
    let (min_x, min_y) = camera.target;
    let (max_x, max_y) = (min_x + screen_w, min_y + screen_h);

    if min_x < grid.anchor().0 {
        grid.grow(Growth::Left, inc, s);
    }
    if min_y < grid.anchor().1 {
        grid.grow(Growth::Up, inc, s);
    }
    if max_x > grid.anchor().0 + grid.cols() as f32 * s {
        grid.grow(Growth::Right, inc, s);
    }
    if max_y > grid.anchor().1 + grid.rows() as f32 * s {
        grid.grow(Growth::Down, inc, s);
    }
}
