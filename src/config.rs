/// RGBA color, one byte per channel.
pub type Rgba = [u8; 4];

/// Initial window size. The starting grid is sized to fill it.
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 460;

/// Side length of a cell in world units (= screen pixels at startup).
/// This is the single scale factor of the view: zooming changes it.
pub const DEFAULT_CELL_SIZE: f32 = 20.0;
pub const MIN_CELL_SIZE: f32 = 4.0;
pub const MAX_CELL_SIZE: f32 = 80.0;

/// Multiplier applied to the cell size per mouse-wheel notch.
pub const ZOOM_STEP: f32 = 1.1;

/// Simulation steps per second while running.
pub const REFRESH_RATE: f32 = 5.0;
pub const REFRESH_INTERVAL: f32 = 1.0 / REFRESH_RATE;

/// Rows/columns added per growth event when the view leaves the grid.
pub const GROWTH_INCREMENT: usize = 8;

/// Base unit for the fixed on-screen controls. Independent of the cell
/// size so the UI does not scale with zoom.
pub const UI_UNIT: f32 = 20.0;

// Cell state colors, matching the classic Wireworld palette.
pub const EMPTY_COLOR: Rgba = [59, 74, 107, 255];
pub const CONDUCTOR_COLOR: Rgba = [240, 212, 58, 255];
pub const HEAD_COLOR: Rgba = [34, 178, 218, 255];
pub const TAIL_COLOR: Rgba = [242, 53, 87, 255];

pub const BACKGROUND_COLOR: Rgba = [245, 245, 245, 255];
pub const GRID_LINE_COLOR: Rgba = [0, 0, 0, 255];
pub const HIGHLIGHT_COLOR: Rgba = [255, 255, 255, 255];
