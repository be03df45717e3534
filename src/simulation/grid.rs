use rand::Rng;

use crate::config::{SimConfig, ALIVE_CELL_COLOR};
use crate::simulation::cell::{Cell, CellAction, Rect};

/// Fixed-size toroidal board.
///
/// Cells live in a flat row-major array (`index = row * width + col`) and
/// `rects[i]` is always the draw rectangle of `cells[i]`.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Cell>,
    rects: Vec<Rect>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Create a grid of dead cells laid out over a `canvas_width` x `canvas_height` canvas
    pub fn new(width: usize, height: usize, canvas_width: f32, canvas_height: f32, gap: f32) -> Self {
        assert!(width > 0 && height > 0, "grid must have at least one cell");

        let cell_count = width * height;
        let cell_width = canvas_width / width as f32 - gap;
        let cell_height = canvas_height / height as f32 - gap;

        let mut cells = Vec::with_capacity(cell_count);
        let mut rects = Vec::with_capacity(cell_count);

        for row in 0..height {
            for col in 0..width {
                // Boxes are shrunk by the gap, half of it on each side
                rects.push(Rect::new(
                    gap / 2.0 + col as f32 * (cell_width + gap),
                    gap / 2.0 + row as f32 * (cell_height + gap),
                    cell_width,
                    cell_height,
                ));
                cells.push(Cell::new(col, row, width, height, ALIVE_CELL_COLOR));
            }
        }

        Self {
            cells,
            rects,
            width,
            height,
        }
    }

    /// Create a grid from the simulation configuration
    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(
            config.grid_width,
            config.grid_height,
            config.canvas_width,
            config.canvas_height,
            config.cell_gap,
        )
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn index_of(&self, col: usize, row: usize) -> usize {
        row * self.width + col
    }

    /// Cell by flat index
    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub fn cell_at(&self, col: usize, row: usize) -> &Cell {
        &self.cells[self.index_of(col, row)]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Draw rectangles, index-aligned with `cells()`
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn rect(&self, index: usize) -> &Rect {
        &self.rects[index]
    }

    /// Index of the first cell (row-major) whose rectangle contains the point.
    /// `None` for points in a gap or off the canvas.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        self.rects.iter().position(|rect| rect.contains(x, y))
    }

    pub fn set_cell(&mut self, col: usize, row: usize, action: CellAction) {
        let index = self.index_of(col, row);
        self.apply(index, action);
    }

    /// Apply an action to the cell at a flat index
    pub fn apply(&mut self, index: usize, action: CellAction) {
        self.cells[index].apply(action);
    }

    pub fn is_alive(&self, index: usize) -> bool {
        self.cells[index].alive
    }

    /// Number of live cells among the neighbours of `index`
    pub fn live_neighbors(&self, index: usize) -> usize {
        self.cells[index]
            .neighbors()
            .iter()
            .filter(|&&n| self.cells[n].alive)
            .count()
    }

    /// Kill every cell
    pub fn reset_all(&mut self) {
        for cell in &mut self.cells {
            cell.alive = false;
        }
    }

    /// Replace the board with random soup where each cell lives with probability `density`
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        let density = density.clamp(0.0, 1.0);
        for cell in &mut self.cells {
            cell.alive = rng.gen_bool(density);
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.alive).count()
    }

    /// Rectangle and color of every live cell, in row-major order
    pub fn alive_cells(&self) -> impl Iterator<Item = (&Rect, &Cell)> + '_ {
        self.rects
            .iter()
            .zip(&self.cells)
            .filter(|(_, cell)| cell.alive)
    }

    /// Flat indices of live cells, in row-major order
    pub fn alive_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.alive)
            .map(|(index, _)| index)
            .collect()
    }
}
