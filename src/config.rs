use crate::simulation::Color;

/// Grid dimensions in cells (40x40 = 1600 cells)
pub const GRID_WIDTH: usize = 40;
pub const GRID_HEIGHT: usize = 40;

/// Logical canvas size in pixels; the window letterboxes this area
pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 800;

/// Gap between neighbouring cell rectangles in pixels
pub const CELL_GAP: f32 = 1.0;

/// Simulation frequency in generations per second
pub const STEPS_PER_SECOND: f64 = 20.0;

/// Fraction of cells brought to life by the random soup command
pub const RANDOM_FILL_DENSITY: f64 = 0.3;

pub const WINDOW_TITLE: &str = "Game of Life";

// ============================================
// Palette
// ============================================

pub const BACKGROUND_COLOR: Color = Color::rgb(33, 33, 33);
pub const DEAD_CELL_COLOR: Color = Color::rgb(56, 59, 64);
pub const ALIVE_CELL_COLOR: Color = Color::rgb(195, 199, 205);

/// Everything the simulation core needs to build its grid and clock.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub cell_gap: f32,
    pub steps_per_second: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            canvas_width: CANVAS_WIDTH as f32,
            canvas_height: CANVAS_HEIGHT as f32,
            cell_gap: CELL_GAP,
            steps_per_second: STEPS_PER_SECOND,
        }
    }
}

impl SimConfig {
    /// Small grid on a canvas where every cell is `cell_px` wide, for tests.
    #[cfg(test)]
    pub fn with_grid(width: usize, height: usize, cell_px: f32) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            canvas_width: width as f32 * cell_px,
            canvas_height: height as f32 * cell_px,
            ..Self::default()
        }
    }
}
