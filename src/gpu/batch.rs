use std::ops::{Deref, DerefMut};

use crate::config::DEAD_CELL_COLOR;
use crate::simulation::{Color, Grid, Rect};

/// One filled rectangle as seen by the vertex shader.
///
/// Layout: 32 bytes.
/// - rect: [f32; 4] = x, y, width, height in canvas pixels
/// - color: [f32; 4] = RGBA, already in the surface's color space
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RectInstance {
    pub rect: [f32; 4],
    pub color: [f32; 4],
}

/// CPU-side list of rectangles for one frame, filled with a current draw color.
pub struct ShapeBatch {
    draw_color: Color,
    linear: bool,
    instances: Vec<RectInstance>,
}

impl ShapeBatch {
    /// `linear` selects sRGB decoding for sRGB render targets
    pub fn new(capacity: usize, linear: bool) -> Self {
        Self {
            draw_color: Color::rgb(0, 0, 0),
            linear,
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn draw_color(&self) -> Color {
        self.draw_color
    }

    pub fn set_draw_color(&mut self, color: Color) {
        self.draw_color = color;
    }

    /// Switch the draw color until the returned guard is dropped
    pub fn with_color(&mut self, color: Color) -> ColorScope<'_> {
        let previous = self.draw_color;
        self.draw_color = color;
        ColorScope {
            batch: self,
            previous,
        }
    }

    pub fn fill_rect(&mut self, rect: &Rect) {
        self.instances.push(RectInstance {
            rect: [rect.x, rect.y, rect.w, rect.h],
            color: self.draw_color.to_f32(self.linear),
        });
    }

    pub fn fill_rects<'r>(&mut self, rects: impl IntoIterator<Item = &'r Rect>) {
        for rect in rects {
            self.fill_rect(rect);
        }
    }

    pub fn instances(&self) -> &[RectInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// Guard restoring the batch's previous draw color when it goes out of scope.
pub struct ColorScope<'a> {
    batch: &'a mut ShapeBatch,
    previous: Color,
}

impl Deref for ColorScope<'_> {
    type Target = ShapeBatch;

    fn deref(&self) -> &ShapeBatch {
        self.batch
    }
}

impl DerefMut for ColorScope<'_> {
    fn deref_mut(&mut self) -> &mut ShapeBatch {
        self.batch
    }
}

impl Drop for ColorScope<'_> {
    fn drop(&mut self) {
        self.batch.draw_color = self.previous;
    }
}

/// Rebuild the batch for the current grid: every cell as a dead square, then
/// the live cells drawn over them in their own color.
pub fn build_frame(grid: &Grid, batch: &mut ShapeBatch) {
    batch.clear();

    batch.with_color(DEAD_CELL_COLOR).fill_rects(grid.rects());

    for (rect, cell) in grid.alive_cells() {
        batch.with_color(cell.color).fill_rect(rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ALIVE_CELL_COLOR;
    use crate::simulation::CellAction;

    #[test]
    fn test_instance_size() {
        assert_eq!(std::mem::size_of::<RectInstance>(), 32);
    }

    #[test]
    fn test_color_scope_restores_previous() {
        let mut batch = ShapeBatch::new(4, false);
        let base = Color::rgb(1, 1, 1);
        batch.set_draw_color(base);

        {
            let mut scope = batch.with_color(Color::rgb(9, 9, 9));
            scope.fill_rect(&Rect::new(0.0, 0.0, 1.0, 1.0));
            assert_eq!(scope.draw_color(), Color::rgb(9, 9, 9));

            let mut nested = scope.with_color(Color::rgb(5, 5, 5));
            nested.fill_rect(&Rect::new(1.0, 0.0, 1.0, 1.0));
        }
        assert_eq!(batch.draw_color(), base);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.instances()[0].color, Color::rgb(9, 9, 9).to_f32(false));
        assert_eq!(batch.instances()[1].color, Color::rgb(5, 5, 5).to_f32(false));
    }

    #[test]
    fn test_color_scope_restores_on_early_return() {
        fn draw_until(batch: &mut ShapeBatch, rects: &[Rect], limit: f32) -> Option<()> {
            let mut scope = batch.with_color(Color::rgb(200, 0, 0));
            for rect in rects {
                if rect.x > limit {
                    return None;
                }
                scope.fill_rect(rect);
            }
            Some(())
        }

        let mut batch = ShapeBatch::new(4, false);
        let rects = [Rect::new(0.0, 0.0, 1.0, 1.0), Rect::new(5.0, 0.0, 1.0, 1.0)];
        assert!(draw_until(&mut batch, &rects, 2.0).is_none());
        assert_eq!(batch.draw_color(), Color::rgb(0, 0, 0));
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_build_frame_dead_pass_then_live_overlay() {
        let mut grid = Grid::new(3, 2, 30.0, 20.0, 1.0);
        grid.set_cell(1, 1, CellAction::SetAlive);
        grid.set_cell(2, 0, CellAction::SetAlive);

        let mut batch = ShapeBatch::new(12, false);
        build_frame(&grid, &mut batch);

        let instances = batch.instances();
        assert_eq!(instances.len(), grid.cell_count() + 2);

        let dead = DEAD_CELL_COLOR.to_f32(false);
        for (instance, rect) in instances.iter().zip(grid.rects()) {
            assert_eq!(instance.color, dead);
            assert_eq!(instance.rect, [rect.x, rect.y, rect.w, rect.h]);
        }

        let alive = ALIVE_CELL_COLOR.to_f32(false);
        let overlay = &instances[grid.cell_count()..];
        let r = grid.rect(grid.index_of(2, 0));
        assert_eq!(overlay[0], RectInstance { rect: [r.x, r.y, r.w, r.h], color: alive });
        let r = grid.rect(grid.index_of(1, 1));
        assert_eq!(overlay[1], RectInstance { rect: [r.x, r.y, r.w, r.h], color: alive });
    }

    #[test]
    fn test_build_frame_replaces_previous_contents() {
        let grid = Grid::new(2, 2, 20.0, 20.0, 1.0);
        let mut batch = ShapeBatch::new(8, true);
        build_frame(&grid, &mut batch);
        build_frame(&grid, &mut batch);
        assert_eq!(batch.len(), 4);
    }
}
